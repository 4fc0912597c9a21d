use crate::error::WriterResult;
use crate::language::Language;
use crate::writer::{unsupported, TypeNames};
use jsonmodeler_model::{ClassModel, PropertyType};

/// C and Objective-C keywords plus `NSObject` members a property would
/// shadow
pub const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "id", "nil", "Nil", "YES", "NO", "self",
    "super", "in", "out", "inout", "bycopy", "byref", "oneway", "atomic", "nonatomic",
    "retain", "assign", "strong", "weak", "readonly", "readwrite", "BOOL", "Class", "SEL",
    "IMP", "class", "description", "debugDescription", "hash", "superclass", "zone", "bool",
    "true", "false", "_Bool", "NULL", "instancetype",
];

/// Foundation types a generated class must not shadow
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "NSObject", "NSString", "NSNumber", "NSArray", "NSDictionary", "NSMutableArray",
    "NSMutableDictionary", "NSNull", "NSInteger", "NSUInteger", "NSData", "NSDate", "NSURL",
];

/// Prefixes that put a method in an ARC ownership family
const METHOD_FAMILIES: &[&str] = &["mutableCopy", "alloc", "copy", "init", "new"];

pub(super) fn reserved_type_names() -> Vec<&'static str> {
    KEYWORDS
        .iter()
        .chain(RESERVED_TYPE_NAMES.iter())
        .copied()
        .collect()
}

/// Getters named like `newItems` would be treated as returning a +1
/// reference, so such members get a `the` prefix.
pub(super) fn avoid_method_family(name: String) -> String {
    let in_family = METHOD_FAMILIES.iter().any(|family| {
        name.strip_prefix(family)
            .map(|rest| rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_uppercase()))
            .unwrap_or(false)
    });

    if in_family {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("the{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => name,
        }
    } else {
        name
    }
}

/// Property setter semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Storage {
    Assign,
    Copy,
    Retain,
}

/// How a value moves between the dictionary and the property
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ValueKind {
    /// C scalar unboxed with `getter` and boxed with `boxer`
    Scalar {
        getter: &'static str,
        boxer: &'static str,
    },
    /// Foundation object stored as-is
    Object,
    /// Nested model object
    Model(String),
    /// Array of nested model objects
    ModelArray(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ObjcType {
    /// Declaration spelling including the pointer star, e.g. `NSString *`
    pub decl: String,
    pub storage: Storage,
    pub kind: ValueKind,
}

impl ObjcType {
    fn object(decl: impl Into<String>, storage: Storage, kind: ValueKind) -> Self {
        Self {
            decl: decl.into(),
            storage,
            kind,
        }
    }

    fn scalar(decl: &str, getter: &'static str, boxer: &'static str) -> Self {
        Self {
            decl: decl.to_string(),
            storage: Storage::Assign,
            kind: ValueKind::Scalar { getter, boxer },
        }
    }
}

/// Objective-C spelling of a property type
pub(super) fn objc_type(
    ty: &PropertyType,
    class: &ClassModel,
    property: &str,
    names: &TypeNames,
) -> WriterResult<ObjcType> {
    let mapped = match ty {
        PropertyType::Integer => ObjcType::scalar("NSInteger", "integerValue", "numberWithInteger"),
        PropertyType::Float => ObjcType::scalar("double", "doubleValue", "numberWithDouble"),
        PropertyType::Boolean => ObjcType::scalar("BOOL", "boolValue", "numberWithBool"),
        PropertyType::String => ObjcType::object("NSString *", Storage::Copy, ValueKind::Object),
        PropertyType::Class(target) => {
            let name = names.get(target)?;
            ObjcType::object(format!("{} *", name), Storage::Retain, ValueKind::Model(name.to_string()))
        }
        PropertyType::Optional(inner) => match inner.as_ref() {
            // Optional scalars need a boxed representation for nil
            inner if inner.is_scalar() && *inner != PropertyType::String => {
                ObjcType::object("NSNumber *", Storage::Retain, ValueKind::Object)
            }
            inner => objc_type(inner, class, property, names)?,
        },
        // NSNull elements are skipped by the dictionary glue, so optional
        // model elements map like plain ones
        PropertyType::Array(inner) => match inner.unwrap_optional().0 {
            PropertyType::Class(target) => {
                let name = names.get(target)?;
                ObjcType::object(
                    format!("NSArray<{} *> *", name),
                    Storage::Retain,
                    ValueKind::ModelArray(name.to_string()),
                )
            }
            inner => ObjcType::object(
                format!("NSArray<{}> *", element_type(inner, class, property, ty)?),
                Storage::Retain,
                ValueKind::Object,
            ),
        },
        PropertyType::Any | PropertyType::Null => {
            ObjcType::object("id", Storage::Retain, ValueKind::Object)
        }
    };
    Ok(mapped)
}

/// Element spelling inside `NSArray<...>` for elements kept as plain
/// Foundation objects
fn element_type(
    inner: &PropertyType,
    class: &ClassModel,
    property: &str,
    whole: &PropertyType,
) -> WriterResult<&'static str> {
    match inner {
        PropertyType::Integer | PropertyType::Float | PropertyType::Boolean => Ok("NSNumber *"),
        PropertyType::String => Ok("NSString *"),
        PropertyType::Any | PropertyType::Null => Ok("id"),
        PropertyType::Optional(inner) => element_type(inner, class, property, whole),
        PropertyType::Array(_) | PropertyType::Class(_) => {
            // Nested arrays stay raw; model objects inside them cannot be
            // converted by the dictionary glue
            if inner.referenced_classes().is_empty() {
                Ok("NSArray *")
            } else {
                Err(unsupported(Language::ObjectiveC, class, property, whole))
            }
        }
    }
}
