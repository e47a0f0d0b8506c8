//! Per-tenant organization store
//!
//! An [`Organization`] holds one insertion-ordered collection per entity
//! kind, the tenant credentials, and the per-kind blacklist of entity names
//! that are excluded from load and diff.

use std::collections::HashMap;

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collections::Dictionary;
use crate::error::GraduateError;

/// Category of configuration object handled by graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Field,
    Extension,
    Source,
    Page,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Field,
        EntityKind::Extension,
        EntityKind::Source,
        EntityKind::Page,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Field => "field",
            EntityKind::Extension => "extension",
            EntityKind::Source => "source",
            EntityKind::Page => "page",
        }
    }

    /// REST route segment for this kind.
    pub fn route(&self) -> &'static str {
        match self {
            EntityKind::Field => "fields",
            EntityKind::Extension => "extensions",
            EntityKind::Source => "sources",
            EntityKind::Page => "pages",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single configuration entity: its unique name plus the raw attribute
/// document as returned by the platform. Attributes are only ever replaced
/// wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    attributes: Value,
}

impl Entity {
    pub fn new(name: impl Into<String>, attributes: Value) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Value {
        &self.attributes
    }
}

/// Extensions the platform injects into every organization; diffing them
/// only produces noise, so they are always ignored.
static DEFAULT_EXTENSION_BLACKLIST: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "allfieldvalues",
        "allfieldsvalue",
        "allfieldsvalues",
        "allmetadatavalue",
        "allmetadatavalues",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

/// Per-kind entity-name blacklist. Membership checks are normalized
/// (lowercased, spaces stripped) so operator-entered names tolerate casing
/// and spacing variance; entries may also be regular expressions.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    entries: HashMap<EntityKind, Vec<String>>,
}

impl Blacklist {
    /// Build a blacklist from operator entries, unioned with the built-in
    /// extension defaults.
    pub fn with_defaults(mut entries: HashMap<EntityKind, Vec<String>>) -> Self {
        let extensions = entries.entry(EntityKind::Extension).or_default();
        for name in DEFAULT_EXTENSION_BLACKLIST.iter() {
            if !extensions.contains(name) {
                extensions.push(name.clone());
            }
        }
        Self { entries }
    }

    pub fn entries(&self, kind: EntityKind) -> &[String] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_blacklisted(&self, kind: EntityKind, name: &str) -> bool {
        let normalized = normalize(name);
        for pattern in self.entries(kind) {
            if normalize(pattern) == normalized {
                return true;
            }
            match Regex::new(&format!("^(?:{})$", pattern)) {
                Ok(re) => {
                    if re.is_match(name) {
                        return true;
                    }
                }
                Err(err) => {
                    let filter_err = GraduateError::Filter {
                        pattern: pattern.clone(),
                        message: err.to_string(),
                    };
                    warn!("{}", filter_err);
                }
            }
        }
        false
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// One tenant environment: id, API credential, blacklist, and one entity
/// collection per kind. Created once per command invocation, populated by
/// the paginated fetcher, then handed read-only to the diff engine.
#[derive(Debug, Clone)]
pub struct Organization {
    id: String,
    api_key: String,
    blacklist: Blacklist,
    fields: Dictionary<Entity>,
    extensions: Dictionary<Entity>,
    sources: Dictionary<Entity>,
    pages: Dictionary<Entity>,
}

impl Organization {
    pub fn new(id: impl Into<String>, api_key: impl Into<String>, blacklist: Blacklist) -> Self {
        Self {
            id: id.into(),
            api_key: api_key.into(),
            blacklist,
            fields: Dictionary::new(),
            extensions: Dictionary::new(),
            sources: Dictionary::new(),
            pages: Dictionary::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn collection(&self, kind: EntityKind) -> &Dictionary<Entity> {
        match kind {
            EntityKind::Field => &self.fields,
            EntityKind::Extension => &self.extensions,
            EntityKind::Source => &self.sources,
            EntityKind::Page => &self.pages,
        }
    }

    fn collection_mut(&mut self, kind: EntityKind) -> &mut Dictionary<Entity> {
        match kind {
            EntityKind::Field => &mut self.fields,
            EntityKind::Extension => &mut self.extensions,
            EntityKind::Source => &mut self.sources,
            EntityKind::Page => &mut self.pages,
        }
    }

    /// Insert an entity into the kind's collection. Duplicate names keep the
    /// first occurrence; the collision is logged instead of silently
    /// dropping data.
    pub fn add_entity(&mut self, kind: EntityKind, entity: Entity) {
        let org_id = self.id.clone();
        let name = entity.name().to_string();
        let collection = self.collection_mut(kind);
        if !collection.add(name.clone(), entity) {
            warn!(
                "duplicate {} '{}' in organization {}, keeping the first occurrence",
                kind.label(),
                name,
                org_id
            );
        }
    }

    pub fn clear_collection(&mut self, kind: EntityKind) {
        self.collection_mut(kind).clear();
    }
}
