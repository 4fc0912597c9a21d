//! Identifier case conversion and collision handling shared by the writers.

use std::collections::HashSet;

/// Split a JSON key or class name into words.
///
/// Any character that is not ASCII alphanumeric separates words, as do
/// lower→upper transitions (`firstName`) and the end of an acronym
/// (`HTTPServer` → `HTTP`, `Server`).
pub fn to_words(source: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = source.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let lower_to_upper = c.is_ascii_uppercase() && (prev.is_ascii_lowercase() || prev.is_ascii_digit());
            let acronym_end = c.is_ascii_uppercase()
                && prev.is_ascii_uppercase()
                && next.map(|n| n.is_ascii_lowercase()).unwrap_or(false);
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase())
            .chain(chars.map(|c| c.to_ascii_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// `first_name` → `FirstName`
pub fn pascal_case(source: &str) -> String {
    to_words(source).iter().map(|w| capitalize(w)).collect()
}

/// `first_name` → `firstName`
pub fn camel_case(source: &str) -> String {
    to_words(source)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_ascii_lowercase() } else { capitalize(w) })
        .collect()
}

/// ASCII identifier: a letter or `_` followed by letters, digits or `_`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Make a converted name usable as an identifier: empty names become
/// `fallback` and names starting with a digit get `fallback` prepended.
pub fn ensure_identifier(name: String, fallback: &str) -> String {
    if name.is_empty() {
        fallback.to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", fallback, name)
    } else {
        name
    }
}

/// Append `suffix` when `name` is one of `reserved`
pub fn escape_reserved(name: String, reserved: &[&str], suffix: &str) -> String {
    if reserved.contains(&name.as_str()) {
        format!("{}{}", name, suffix)
    } else {
        name
    }
}

/// `firstName` → `FIRST_NAME`
pub fn screaming_snake_case(source: &str) -> String {
    to_words(source)
        .iter()
        .map(|w| w.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// How control characters are spelled inside a generated string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralStyle {
    /// `\u{1b}`
    Swift,
    /// Three-digit octal `\033`, valid in C, Objective-C and Java
    Octal,
}

/// Body of a double-quoted string literal holding `value`.
///
/// Quotes, backslashes and control characters are escaped so the literal
/// always stays on one line.
pub fn escape_literal(value: &str, style: LiteralStyle) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => match style {
                LiteralStyle::Swift => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
                // C1 controls are valid UTF-8 and may stay raw
                LiteralStyle::Octal if (c as u32) < 0x80 => {
                    out.push_str(&format!("\\{:03o}", c as u32))
                }
                LiteralStyle::Octal => out.push(c),
            },
            c => out.push(c),
        }
    }
    out
}

/// Hands out unique identifiers within one scope.
///
/// The first request for a name gets it unchanged; later requests get a
/// numeric suffix starting at 2. Results depend only on request order.
#[derive(Debug, Default)]
pub struct IdentifierAllocator {
    used: HashSet<String>,
}

impl IdentifierAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve names that must never be handed out (e.g. generated members)
    pub fn reserve<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.used.extend(names.into_iter().map(str::to_string));
    }

    pub fn allocate(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_words() {
        assert_eq!(to_words("first_name"), vec!["first", "name"]);
        assert_eq!(to_words("firstName"), vec!["first", "Name"]);
        assert_eq!(to_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(to_words("user-id 2"), vec!["user", "id", "2"]);
        assert_eq!(to_words("address2Line"), vec!["address2", "Line"]);
        assert!(to_words("$$").is_empty());
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(pascal_case("order_item"), "OrderItem");
        assert_eq!(pascal_case("Person"), "Person");
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("Name"), "name");
        assert_eq!(camel_case("userID"), "userId");
        assert_eq!(camel_case("class"), "class");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Person"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("with space"));
    }

    #[test]
    fn test_ensure_identifier() {
        assert_eq!(ensure_identifier(String::new(), "value"), "value");
        assert_eq!(ensure_identifier("123".to_string(), "value"), "value123");
        assert_eq!(ensure_identifier("name".to_string(), "value"), "name");
    }

    #[test]
    fn test_escape_reserved() {
        let reserved = ["class", "struct"];
        assert_eq!(escape_reserved("class".to_string(), &reserved, "Value"), "classValue");
        assert_eq!(escape_reserved("klass".to_string(), &reserved, "Value"), "klass");
    }

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(screaming_snake_case("firstName"), "FIRST_NAME");
        assert_eq!(screaming_snake_case("classValue"), "CLASS_VALUE");
        assert_eq!(screaming_snake_case("value42"), "VALUE42");
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("plain", LiteralStyle::Swift), "plain");
        assert_eq!(escape_literal("a\"b\\c", LiteralStyle::Octal), "a\\\"b\\\\c");
        assert_eq!(escape_literal("line\nbreak\t", LiteralStyle::Swift), "line\\nbreak\\t");
        assert_eq!(escape_literal("\u{1b}[0m", LiteralStyle::Swift), "\\u{1b}[0m");
        assert_eq!(escape_literal("\u{0}x\u{7f}", LiteralStyle::Octal), "\\000x\\177");
        assert_eq!(escape_literal("caf\u{e9}", LiteralStyle::Octal), "caf\u{e9}");
    }

    #[test]
    fn test_allocator_suffixes_collisions() {
        let mut names = IdentifierAllocator::new();
        names.reserve(["codingKeys"]);
        assert_eq!(names.allocate("firstName".to_string()), "firstName");
        assert_eq!(names.allocate("firstName".to_string()), "firstName2");
        assert_eq!(names.allocate("firstName".to_string()), "firstName3");
        assert_eq!(names.allocate("codingKeys".to_string()), "codingKeys2");
    }
}
