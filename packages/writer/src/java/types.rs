use crate::error::WriterResult;
use crate::writer::TypeNames;
use jsonmodeler_model::{ClassModel, PropertyType};

/// Java keywords and literals
pub const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "var", "record",
    "yield",
];

/// `java.lang` and imported types a generated class must not shadow
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "Object", "String", "Long", "Double", "Boolean", "Integer", "Float", "Number", "Class",
    "System", "Math", "Override", "List", "Objects",
];

pub(super) fn reserved_type_names() -> Vec<&'static str> {
    KEYWORDS
        .iter()
        .chain(RESERVED_TYPE_NAMES.iter())
        .copied()
        .collect()
}

/// How two values of a field are compared in `equals`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Comparison {
    Primitive,
    FloatingPoint,
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct JavaType {
    pub name: String,
    pub comparison: Comparison,
    pub uses_list: bool,
}

impl JavaType {
    fn primitive(name: &str) -> Self {
        Self {
            name: name.to_string(),
            comparison: Comparison::Primitive,
            uses_list: false,
        }
    }

    fn object(name: impl Into<String>, uses_list: bool) -> Self {
        Self {
            name: name.into(),
            comparison: Comparison::Object,
            uses_list,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.name == "boolean"
    }
}

/// Java spelling of a property type
pub(super) fn java_type(
    ty: &PropertyType,
    class: &ClassModel,
    property: &str,
    names: &TypeNames,
) -> WriterResult<JavaType> {
    let mapped = match ty {
        PropertyType::Integer => JavaType::primitive("long"),
        PropertyType::Float => JavaType {
            comparison: Comparison::FloatingPoint,
            ..JavaType::primitive("double")
        },
        PropertyType::Boolean => JavaType::primitive("boolean"),
        PropertyType::Optional(inner) => {
            let inner = java_type(inner, class, property, names)?;
            JavaType::object(boxed(&inner.name), inner.uses_list)
        }
        PropertyType::Array(inner) => {
            let element = java_type(inner, class, property, names)?;
            JavaType::object(format!("List<{}>", boxed(&element.name)), true)
        }
        other => JavaType::object(reference_type(other, names)?, false),
    };
    Ok(mapped)
}

fn reference_type(ty: &PropertyType, names: &TypeNames) -> WriterResult<String> {
    Ok(match ty {
        PropertyType::String => "String".to_string(),
        PropertyType::Class(target) => names.get(target)?.to_string(),
        _ => "Object".to_string(),
    })
}

/// Wrapper class for primitives, everything else unchanged
fn boxed(name: &str) -> String {
    match name {
        "long" => "Long".to_string(),
        "double" => "Double".to_string(),
        "boolean" => "Boolean".to_string(),
        other => other.to_string(),
    }
}
