//! Flattening and key filtering for nested entity attribute documents

use serde_json::Value;

use crate::collections::Dictionary;

/// Flatten a nested JSON document into dot-joined leaf paths.
///
/// Objects are descended recursively; arrays and empty objects are kept as
/// terminal values under their current path, so two documents differing only
/// inside an array compare as one leaf difference.
pub fn flatten(value: &Value) -> Dictionary<Value> {
    let mut out = Dictionary::new();
    flatten_into(None, value, &mut out);
    out
}

fn flatten_into(prefix: Option<&str>, value: &Value, out: &mut Dictionary<Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, key),
                    None => key.clone(),
                };
                flatten_into(Some(&path), child, out);
            }
        }
        _ => {
            if let Some(path) = prefix {
                out.add(path, value.clone());
            }
        }
    }
}

/// Remove the listed top-level keys from a non-flattened document.
pub fn remove_keys(value: &mut Value, ignore: &[String]) {
    if let Value::Object(map) = value {
        for key in ignore {
            map.remove(key);
        }
    }
}

/// Remove every flattened entry whose path contains an ignored name as a
/// segment. This covers both required match positions: an ignored name in the
/// middle of a path (`stream.allmetadatavalues.x`) and as the trailing
/// segment (`stream.allmetadatavalues`).
pub fn remove_flattened_keys(dict: &mut Dictionary<Value>, ignore: &[String]) {
    if ignore.is_empty() {
        return;
    }
    let doomed: Vec<String> = dict
        .keys()
        .iter()
        .filter(|path| path.split('.').any(|segment| ignore.iter().any(|i| i == segment)))
        .map(|path| path.to_string())
        .collect();
    for path in doomed {
        dict.remove(&path);
    }
}

/// Retain only the flattened entries selected by the whitelist. An entry is
/// kept when its path equals a whitelisted key or descends from one on a
/// segment boundary (`content` keeps `content.body.text` but not
/// `contentType`). An empty whitelist retains everything.
pub fn retain_whitelisted_keys(dict: &mut Dictionary<Value>, whitelist: &[String]) {
    if whitelist.is_empty() {
        return;
    }
    let doomed: Vec<String> = dict
        .keys()
        .iter()
        .filter(|path| !whitelist.iter().any(|w| path_matches(path, w)))
        .map(|path| path.to_string())
        .collect();
    for path in doomed {
        dict.remove(&path);
    }
}

fn path_matches(path: &str, key: &str) -> bool {
    path == key || (path.len() > key.len() && path.starts_with(key) && path.as_bytes()[key.len()] == b'.')
}
