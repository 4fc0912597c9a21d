use crate::error::WriterResult;
use crate::language::Language;
use crate::writer::{unsupported, TypeNames};
use jsonmodeler_model::{ClassModel, PropertyType};

/// Swift keywords, escaped when used as member names
pub const KEYWORDS: &[&str] = &[
    "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func", "import",
    "init", "inout", "internal", "let", "open", "operator", "private", "precedencegroup",
    "protocol", "public", "rethrows", "static", "struct", "subscript", "typealias", "var",
    "break", "case", "catch", "continue", "default", "defer", "do", "else", "fallthrough",
    "for", "guard", "if", "in", "repeat", "return", "throw", "switch", "where", "while",
    "Any", "as", "await", "false", "is", "nil", "self", "Self", "super", "throws", "true",
    "try", "Type", "Protocol",
];

/// Names a generated type must not shadow
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "String", "Int", "Double", "Float", "Bool", "Array", "Dictionary", "Set", "Optional",
    "Data", "Date", "URL", "Decoder", "Encoder", "Codable", "Decodable", "Encodable",
    "Equatable", "Hashable", "Error", "CodingKey", "CodingKeys", "Foundation", "NSObject",
];

pub(super) fn reserved_type_names() -> Vec<&'static str> {
    KEYWORDS
        .iter()
        .chain(RESERVED_TYPE_NAMES.iter())
        .copied()
        .collect()
}

/// Swift spelling of a property type
pub(super) fn swift_type(
    ty: &PropertyType,
    class: &ClassModel,
    property: &str,
    names: &TypeNames,
) -> WriterResult<String> {
    let mapped = match ty {
        PropertyType::Integer => "Int".to_string(),
        PropertyType::Float => "Double".to_string(),
        PropertyType::String => "String".to_string(),
        PropertyType::Boolean => "Bool".to_string(),
        PropertyType::Array(inner) => format!("[{}]", swift_type(inner, class, property, names)?),
        PropertyType::Class(target) => names.get(target)?.to_string(),
        PropertyType::Optional(inner) => match inner.as_ref() {
            PropertyType::Optional(_) | PropertyType::Null | PropertyType::Any => {
                return swift_type(&ty.clone().normalize(), class, property, names);
            }
            inner => format!("{}?", swift_type(inner, class, property, names)?),
        },
        // Codable has no dynamic value type
        PropertyType::Any | PropertyType::Null => {
            return Err(unsupported(Language::Swift, class, property, ty));
        }
    };
    Ok(mapped)
}
