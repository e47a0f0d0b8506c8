//! Graduation operation types

use serde_json::Value;

use crate::org::EntityKind;

/// HTTP verbs a graduation is allowed to use against the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Post,
    Put,
    Delete,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Post, Method::Put, Method::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!(
                "unknown HTTP method '{}', expected POST, PUT or DELETE",
                other
            )),
        }
    }
}

/// A single change the diff engine wants applied to the destination
/// organization. Immutable once produced; consumed only by the batch
/// applier.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Create an entity that only exists in the origin.
    Create {
        kind: EntityKind,
        name: String,
        payload: Value,
    },
    /// Overwrite a destination entity with the origin's full payload.
    Update {
        kind: EntityKind,
        name: String,
        payload: Value,
    },
    /// Delete a destination entity absent from the origin.
    Delete { kind: EntityKind, name: String },
}

impl Operation {
    pub fn create(kind: EntityKind, name: impl Into<String>, payload: Value) -> Self {
        Self::Create {
            kind,
            name: name.into(),
            payload,
        }
    }

    pub fn update(kind: EntityKind, name: impl Into<String>, payload: Value) -> Self {
        Self::Update {
            kind,
            name: name.into(),
            payload,
        }
    }

    pub fn delete(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::Delete {
            kind,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Create { kind, .. } | Self::Update { kind, .. } | Self::Delete { kind, .. } => {
                *kind
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Create { name, .. } | Self::Update { name, .. } | Self::Delete { name, .. } => {
                name
            }
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Create { payload, .. } | Self::Update { payload, .. } => Some(payload),
            Self::Delete { .. } => None,
        }
    }

    /// The HTTP verb this operation maps to on the wire.
    pub fn method(&self) -> Method {
        match self {
            Self::Create { .. } => Method::Post,
            Self::Update { .. } => Method::Put,
            Self::Delete { .. } => Method::Delete,
        }
    }
}
