//! Insertion-ordered keyed collection backing the organization stores

use indexmap::IndexMap;

/// An insertion-ordered mapping from string keys to values.
///
/// Adding a key that already exists is a no-op: the first value wins. This
/// keeps repeated loads idempotent instead of silently overwriting entities
/// that were already merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary<T> {
    items: IndexMap<String, T>,
}

impl<T> Dictionary<T> {
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Insert a value under `key`. Returns `false` without touching the
    /// existing value when the key is already present.
    pub fn add(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        if self.items.contains_key(&key) {
            return false;
        }
        self.items.insert(key, value);
        true
    }

    /// Remove `key` if present. Absent keys are a silent no-op.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        // shift_remove preserves the insertion order of the remaining keys
        self.items.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.items.keys().map(String::as_str).collect()
    }

    /// Values in insertion order, index-aligned with `keys()`.
    pub fn values(&self) -> Vec<&T> {
        self.items.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> FromIterator<(String, T)> for Dictionary<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (key, value) in iter {
            dict.add(key, value);
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut dict: Dictionary<String> = Dictionary::new();
        assert!(!dict.contains_key("key1"));
        assert!(dict.add("key1", "value1".to_string()));
        assert!(dict.contains_key("key1"));
        assert_eq!(dict.get("key1"), Some(&"value1".to_string()));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut dict: Dictionary<String> = Dictionary::new();
        assert!(dict.add("key1", "first".to_string()));
        assert!(!dict.add("key1", "second".to_string()));
        assert_eq!(dict.len(), 1);
        // the first value stays in place
        assert_eq!(dict.get("key1"), Some(&"first".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let mut dict: Dictionary<String> = Dictionary::new();
        dict.add("trololo", "hohoho".to_string());
        assert_eq!(dict.get("notInTheDict"), None);
    }

    #[test]
    fn test_remove() {
        let mut dict: Dictionary<String> = Dictionary::new();
        dict.add("hello", "world".to_string());
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.remove("hello"), Some("world".to_string()));
        assert_eq!(dict.len(), 0);
        assert!(!dict.contains_key("hello"));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut dict: Dictionary<String> = Dictionary::new();
        dict.add("hello", "world".to_string());
        assert_eq!(dict.remove("rambo"), None);
        assert_eq!(dict.len(), 1);
        assert!(dict.contains_key("hello"));
    }

    #[test]
    fn test_keys_and_values_in_insertion_order() {
        let mut dict: Dictionary<String> = Dictionary::new();
        assert!(dict.keys().is_empty());
        dict.add("planet", "mars".to_string());
        dict.add("animal", "cat".to_string());
        dict.add("fruit", "apple".to_string());
        dict.add("number", "32".to_string());

        assert_eq!(dict.len(), 4);
        assert_eq!(dict.keys(), vec!["planet", "animal", "fruit", "number"]);
        assert_eq!(
            dict.values(),
            vec![&"mars".to_string(), &"cat".to_string(), &"apple".to_string(), &"32".to_string()]
        );
    }

    #[test]
    fn test_remove_preserves_order_of_remaining_keys() {
        let mut dict: Dictionary<u32> = Dictionary::new();
        dict.add("a", 1);
        dict.add("b", 2);
        dict.add("c", 3);
        dict.remove("b");
        assert_eq!(dict.keys(), vec!["a", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut dict: Dictionary<String> = Dictionary::new();
        dict.add("planet", "mars".to_string());
        dict.add("animal", "cat".to_string());
        dict.clear();
        assert_eq!(dict.len(), 0);
        assert!(dict.keys().is_empty());
        assert!(dict.values().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut dict: Dictionary<String> = Dictionary::new();
        dict.add("planet", "mars".to_string());
        dict.add("animal", "cat".to_string());

        let mut clone = dict.clone();
        dict.add("extra", "item".to_string());
        clone.remove("planet");

        assert_eq!(dict.keys(), vec!["planet", "animal", "extra"]);
        assert_eq!(clone.keys(), vec!["animal"]);
    }

    #[test]
    fn test_from_iterator_keeps_first_on_duplicates() {
        let dict: Dictionary<u32> = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("a".to_string(), 3),
        ]
        .into_iter()
        .collect();

        assert_eq!(dict.keys(), vec!["a", "b"]);
        assert_eq!(dict.get("a"), Some(&1));
    }
}
