//! Operator-facing graduation options

use crate::api::Method;

/// Largest number of entities sent in one remote batch call.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Which HTTP verbs the graduation may use against the destination.
/// Deletion is opt-in: the default only allows create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedMethods {
    pub post: bool,
    pub put: bool,
    pub delete: bool,
}

impl AllowedMethods {
    pub fn from_methods(methods: &[Method]) -> Self {
        Self {
            post: methods.contains(&Method::Post),
            put: methods.contains(&Method::Put),
            delete: methods.contains(&Method::Delete),
        }
    }

    pub fn all() -> Self {
        Self {
            post: true,
            put: true,
            delete: true,
        }
    }

    pub fn allows(&self, method: Method) -> bool {
        match method {
            Method::Post => self.post,
            Method::Put => self.put,
            Method::Delete => self.delete,
        }
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self {
            post: true,
            put: true,
            delete: false,
        }
    }
}

/// Pure configuration value for one graduation run. The only implicit
/// default is that an empty whitelist compares every key.
#[derive(Debug, Clone)]
pub struct GraduateOptions {
    /// Leaf attribute paths included in the diff comparison. Narrows the
    /// comparison only; applied payloads stay complete.
    pub key_whitelist: Vec<String>,
    /// Attribute names excluded from the diff comparison wherever they
    /// appear in a path.
    pub key_blacklist: Vec<String>,
    pub methods: AllowedMethods,
    pub batch_size: usize,
}

impl Default for GraduateOptions {
    fn default() -> Self {
        Self {
            key_whitelist: Vec::new(),
            key_blacklist: Vec::new(),
            methods: AllowedMethods::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_methods_from_list() {
        let methods = AllowedMethods::from_methods(&[Method::Put, Method::Delete]);
        assert!(!methods.allows(Method::Post));
        assert!(methods.allows(Method::Put));
        assert!(methods.allows(Method::Delete));
    }

    #[test]
    fn test_default_excludes_delete() {
        let methods = AllowedMethods::default();
        assert!(methods.allows(Method::Post));
        assert!(methods.allows(Method::Put));
        assert!(!methods.allows(Method::Delete));
    }
}
