//! Diff engine
//!
//! Compares the entity collections of two organization snapshots and
//! produces the ordered operation list that aligns the destination with the
//! origin. Pure over its inputs: the same two snapshots always produce the
//! same operations and the same summary.

use colored::Colorize;
use serde_json::Value;

use crate::api::{Method, Operation};
use crate::collections::Dictionary;
use crate::json;
use crate::org::{Entity, EntityKind, Organization};

use super::options::GraduateOptions;

/// A change the operator's allowed-methods set prevented from becoming an
/// operation. Recorded so nothing disappears silently.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedChange {
    pub name: String,
    pub verb: Method,
}

/// Human-readable account of one diff.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffSummary {
    pub kind: EntityKind,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    pub unchanged: usize,
    pub skipped: Vec<SkippedChange>,
}

impl DiffSummary {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            created: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
            unchanged: 0,
            skipped: Vec::new(),
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.created.is_empty() || !self.updated.is_empty() || !self.deleted.is_empty()
    }

    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "{} diff: {} to create, {} to update, {} to delete, {} unchanged",
            self.kind.label(),
            self.created.len(),
            self.updated.len(),
            self.deleted.len(),
            self.unchanged
        )];
        for name in &self.created {
            lines.push(format!("  {} {}", "+".green(), name));
        }
        for name in &self.updated {
            lines.push(format!("  {} {}", "~".yellow(), name));
        }
        for name in &self.deleted {
            lines.push(format!("  {} {}", "-".red(), name));
        }
        for skipped in &self.skipped {
            lines.push(format!(
                "  {} {} (would {}, method not allowed)",
                "!".dimmed(),
                skipped.name,
                skipped.verb
            ));
        }
        lines.join("\n")
    }
}

/// Operations plus summary for one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffResult {
    pub operations: Vec<Operation>,
    pub summary: DiffSummary,
}

/// Compute the operations that align `destination` with `origin` for one
/// entity kind.
///
/// Operations come out grouped by verb in the fixed order CREATE, UPDATE,
/// DELETE; within a group they follow the origin collection's iteration
/// order (destination order for deletes). That ordering is part of the
/// contract.
pub fn compute(
    origin: &Organization,
    destination: &Organization,
    kind: EntityKind,
    options: &GraduateOptions,
) -> DiffResult {
    let origin_entities = origin.collection(kind);
    let destination_entities = destination.collection(kind);

    let mut creates = Vec::new();
    let mut updates = Vec::new();
    let mut deletes = Vec::new();
    let mut summary = DiffSummary::new(kind);

    for (name, entity) in origin_entities.iter() {
        if origin.blacklist().is_blacklisted(kind, name) {
            continue;
        }
        match destination_entities.get(name) {
            None => {
                if options.methods.allows(Method::Post) {
                    creates.push(Operation::create(kind, name, entity.attributes().clone()));
                    summary.created.push(name.to_string());
                } else {
                    summary.skipped.push(SkippedChange {
                        name: name.to_string(),
                        verb: Method::Post,
                    });
                }
            }
            Some(existing) => {
                if comparable_leaves(entity, options) == comparable_leaves(existing, options) {
                    summary.unchanged += 1;
                } else if options.methods.allows(Method::Put) {
                    // the whitelist narrowed the comparison above; the
                    // applied payload stays complete
                    updates.push(Operation::update(kind, name, entity.attributes().clone()));
                    summary.updated.push(name.to_string());
                } else {
                    summary.skipped.push(SkippedChange {
                        name: name.to_string(),
                        verb: Method::Put,
                    });
                }
            }
        }
    }

    for (name, _) in destination_entities.iter() {
        if origin.blacklist().is_blacklisted(kind, name) {
            continue;
        }
        if origin_entities.contains_key(name) {
            continue;
        }
        if options.methods.allows(Method::Delete) {
            deletes.push(Operation::delete(kind, name));
            summary.deleted.push(name.to_string());
        } else {
            summary.skipped.push(SkippedChange {
                name: name.to_string(),
                verb: Method::Delete,
            });
        }
    }

    let mut operations = creates;
    operations.append(&mut updates);
    operations.append(&mut deletes);

    DiffResult {
        operations,
        summary,
    }
}

/// Flatten an entity's attributes and narrow them to the leaves that
/// participate in the comparison.
fn comparable_leaves(entity: &Entity, options: &GraduateOptions) -> Dictionary<Value> {
    let mut flat = json::flatten(entity.attributes());
    json::retain_whitelisted_keys(&mut flat, &options.key_whitelist);
    json::remove_flattened_keys(&mut flat, &options.key_blacklist);
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graduate::options::AllowedMethods;
    use crate::org::Blacklist;
    use serde_json::json;
    use std::collections::HashMap;

    fn org_with(kind: EntityKind, entities: Vec<(&str, Value)>) -> Organization {
        let mut org = Organization::new("org", "key", Blacklist::with_defaults(HashMap::new()));
        for (name, attributes) in entities {
            org.add_entity(kind, Entity::new(name, attributes));
        }
        org
    }

    fn all_verbs() -> GraduateOptions {
        GraduateOptions {
            methods: AllowedMethods::all(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_update_delete_in_fixed_order() {
        let origin = org_with(
            EntityKind::Field,
            vec![
                ("a", json!({ "name": "a", "type": "STRING" })),
                ("b", json!({ "name": "b", "type": "LONG" })),
            ],
        );
        let destination = org_with(
            EntityKind::Field,
            vec![
                ("b", json!({ "name": "b", "type": "STRING" })),
                ("c", json!({ "name": "c", "type": "STRING" })),
            ],
        );

        let result = compute(&origin, &destination, EntityKind::Field, &all_verbs());

        let described: Vec<(&str, &str)> = result
            .operations
            .iter()
            .map(|op| (op.method().as_str(), op.name()))
            .collect();
        assert_eq!(
            described,
            vec![("POST", "a"), ("PUT", "b"), ("DELETE", "c")]
        );
    }

    #[test]
    fn test_identical_collections_produce_no_operations() {
        let attributes = json!({ "name": "a", "type": "STRING" });
        let origin = org_with(EntityKind::Field, vec![("a", attributes.clone())]);
        let destination = org_with(EntityKind::Field, vec![("a", attributes)]);

        let result = compute(&origin, &destination, EntityKind::Field, &all_verbs());

        assert!(result.operations.is_empty());
        assert_eq!(result.summary.unchanged, 1);
        assert!(!result.summary.has_changes());
    }

    #[test]
    fn test_whitelist_narrows_comparison_not_payload() {
        let origin = org_with(
            EntityKind::Field,
            vec![("f1", json!({ "name": "f1", "type": "STRING", "extra": "X" }))],
        );
        let destination = org_with(
            EntityKind::Field,
            vec![("f1", json!({ "name": "f1", "type": "LONG", "extra": "X" }))],
        );

        let options = GraduateOptions {
            key_whitelist: vec!["type".to_string()],
            methods: AllowedMethods::all(),
            ..Default::default()
        };
        let result = compute(&origin, &destination, EntityKind::Field, &options);

        assert_eq!(result.operations.len(), 1);
        // payload is the origin's full document, not just the whitelisted key
        assert_eq!(
            result.operations[0].payload(),
            Some(&json!({ "name": "f1", "type": "STRING", "extra": "X" }))
        );
    }

    #[test]
    fn test_whitelist_hides_differences_outside_it() {
        let origin = org_with(
            EntityKind::Field,
            vec![("f1", json!({ "name": "f1", "type": "STRING", "extra": "X" }))],
        );
        let destination = org_with(
            EntityKind::Field,
            vec![("f1", json!({ "name": "f1", "type": "STRING", "extra": "Y" }))],
        );

        let options = GraduateOptions {
            key_whitelist: vec!["type".to_string()],
            methods: AllowedMethods::all(),
            ..Default::default()
        };
        let result = compute(&origin, &destination, EntityKind::Field, &options);

        assert!(result.operations.is_empty());
        assert_eq!(result.summary.unchanged, 1);
    }

    #[test]
    fn test_key_blacklist_ignores_nested_differences() {
        let origin = org_with(
            EntityKind::Source,
            vec![(
                "s1",
                json!({ "name": "s1", "stream": { "allmetadatavalues": 1, "origin": "a" } }),
            )],
        );
        let destination = org_with(
            EntityKind::Source,
            vec![(
                "s1",
                json!({ "name": "s1", "stream": { "allmetadatavalues": 2, "origin": "a" } }),
            )],
        );

        let options = GraduateOptions {
            key_blacklist: vec!["allmetadatavalues".to_string()],
            methods: AllowedMethods::all(),
            ..Default::default()
        };
        let result = compute(&origin, &destination, EntityKind::Source, &options);

        assert!(result.operations.is_empty());
    }

    #[test]
    fn test_one_sided_leaf_counts_as_difference() {
        let origin = org_with(
            EntityKind::Field,
            vec![("f1", json!({ "name": "f1", "facet": true }))],
        );
        let destination = org_with(
            EntityKind::Field,
            vec![("f1", json!({ "name": "f1" }))],
        );

        let result = compute(&origin, &destination, EntityKind::Field, &all_verbs());

        assert_eq!(result.operations.len(), 1);
        assert_eq!(result.operations[0].method(), Method::Put);
    }

    #[test]
    fn test_disallowed_verbs_record_skipped_changes() {
        let origin = org_with(
            EntityKind::Extension,
            vec![("only-origin", json!({ "name": "only-origin", "content": "x" }))],
        );
        let destination = org_with(EntityKind::Extension, vec![]);

        let options = GraduateOptions {
            methods: AllowedMethods::from_methods(&[Method::Put, Method::Delete]),
            ..Default::default()
        };
        let result = compute(&origin, &destination, EntityKind::Extension, &options);

        assert!(result.operations.is_empty());
        assert_eq!(
            result.summary.skipped,
            vec![SkippedChange {
                name: "only-origin".to_string(),
                verb: Method::Post,
            }]
        );
    }

    #[test]
    fn test_compute_is_deterministic() {
        let origin = org_with(
            EntityKind::Field,
            vec![
                ("a", json!({ "name": "a", "type": "STRING" })),
                ("b", json!({ "name": "b", "type": "LONG" })),
                ("d", json!({ "name": "d", "type": "DATE" })),
            ],
        );
        let destination = org_with(
            EntityKind::Field,
            vec![
                ("b", json!({ "name": "b", "type": "STRING" })),
                ("c", json!({ "name": "c", "type": "STRING" })),
            ],
        );

        let first = compute(&origin, &destination, EntityKind::Field, &all_verbs());
        let second = compute(&origin, &destination, EntityKind::Field, &all_verbs());

        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_render_lists_names() {
        let origin = org_with(
            EntityKind::Field,
            vec![("a", json!({ "name": "a", "type": "STRING" }))],
        );
        let destination = org_with(EntityKind::Field, vec![]);

        let result = compute(&origin, &destination, EntityKind::Field, &all_verbs());
        let rendered = result.summary.render();

        assert!(rendered.contains("1 to create"));
        assert!(rendered.contains('a'));
    }
}
