use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The inferred type of a single property.
///
/// Serialized in the hand-off format as a lowercase tag for leaf types
/// (`"integer"`, `"string"`) and a single-key object for wrappers
/// (`{"array": "string"}`, `{"class": "Address"}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// JSON number without a fractional part in every sample
    Integer,

    /// JSON number with a fractional part in at least one sample
    Float,

    String,

    Boolean,

    /// Homogeneous array
    Array(Box<PropertyType>),

    /// Reference to a nested class by name
    Class(String),

    /// Nullable or sometimes-missing value
    Optional(Box<PropertyType>),

    /// Dynamic value whose samples had conflicting shapes
    Any,

    /// Only `null` was ever observed
    Null,
}

impl PropertyType {
    pub fn array(item: PropertyType) -> Self {
        PropertyType::Array(Box::new(item))
    }

    pub fn optional(inner: PropertyType) -> Self {
        PropertyType::Optional(Box::new(inner))
    }

    pub fn class(name: impl Into<String>) -> Self {
        PropertyType::Class(name.into())
    }

    /// Widen two observations of the same property into one type that
    /// accommodates both.
    pub fn widen(t1: &PropertyType, t2: &PropertyType) -> PropertyType {
        use PropertyType::*;

        if t1 == t2 {
            return t1.clone();
        }

        // Any absorbs everything
        match (t1, t2) {
            (Any, _) | (_, Any) => return Any,
            _ => {}
        }

        // null observed next to a value makes it optional
        match (t1, t2) {
            (Null, Optional(inner)) | (Optional(inner), Null) => {
                return Optional(inner.clone());
            }
            (Null, other) | (other, Null) => {
                return Optional(Box::new(other.clone()));
            }
            _ => {}
        }

        match (t1, t2) {
            (Optional(inner1), Optional(inner2)) => {
                return Optional(Box::new(PropertyType::widen(inner1, inner2))).normalize();
            }
            (Optional(inner), other) | (other, Optional(inner)) => {
                return Optional(Box::new(PropertyType::widen(inner, other))).normalize();
            }
            _ => {}
        }

        match (t1, t2) {
            (Integer, Float) | (Float, Integer) => return Float,
            (Array(inner1), Array(inner2)) => {
                return Array(Box::new(PropertyType::widen(inner1, inner2)));
            }
            _ => {}
        }

        // Incompatible shapes
        Any
    }

    /// Collapse redundant wrappers: `Optional(Optional(T))` becomes
    /// `Optional(T)` and `Optional(Null)` becomes `Null`.
    pub fn normalize(self) -> PropertyType {
        match self {
            PropertyType::Optional(inner) => match inner.normalize() {
                PropertyType::Optional(inner) => PropertyType::Optional(inner),
                PropertyType::Null => PropertyType::Null,
                PropertyType::Any => PropertyType::Any,
                other => PropertyType::Optional(Box::new(other)),
            },
            PropertyType::Array(inner) => PropertyType::Array(Box::new(inner.normalize())),
            other => other,
        }
    }

    /// Check if this type is a number, string or boolean
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            PropertyType::Integer
                | PropertyType::Float
                | PropertyType::String
                | PropertyType::Boolean
        )
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, PropertyType::Optional(_))
    }

    /// Strip one optional wrapper, reporting whether there was one
    pub fn unwrap_optional(&self) -> (&PropertyType, bool) {
        match self {
            PropertyType::Optional(inner) => (inner.as_ref(), true),
            other => (other, false),
        }
    }

    /// Class names referenced anywhere inside this type, in order
    pub fn referenced_classes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            PropertyType::Class(name) => out.push(name.as_str()),
            PropertyType::Array(inner) | PropertyType::Optional(inner) => {
                inner.collect_references(out)
            }
            _ => {}
        }
    }

    /// Rewrite class references through `renames`; names not in the map
    /// are kept.
    pub fn rename_classes(&self, renames: &HashMap<String, String>) -> PropertyType {
        match self {
            PropertyType::Class(name) => {
                PropertyType::Class(renames.get(name).cloned().unwrap_or_else(|| name.clone()))
            }
            PropertyType::Array(inner) => {
                PropertyType::Array(Box::new(inner.rename_classes(renames)))
            }
            PropertyType::Optional(inner) => {
                PropertyType::Optional(Box::new(inner.rename_classes(renames)))
            }
            other => other.clone(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Integer => write!(f, "integer"),
            PropertyType::Float => write!(f, "float"),
            PropertyType::String => write!(f, "string"),
            PropertyType::Boolean => write!(f, "boolean"),
            PropertyType::Array(inner) => write!(f, "array<{}>", inner),
            PropertyType::Class(name) => write!(f, "class {}", name),
            PropertyType::Optional(inner) => write!(f, "optional<{}>", inner),
            PropertyType::Any => write!(f, "any"),
            PropertyType::Null => write!(f, "null"),
        }
    }
}
