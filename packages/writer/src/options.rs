use crate::error::{WriterError, WriterResult};
use crate::language::Language;
use crate::naming::is_identifier;
use crate::{java, objc, swift};
use jsonmodeler_model::DedupPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether each class gets its own file(s) or everything goes into one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileLayout {
    #[default]
    PerClass,
    SingleFile,
}

/// Options understood by every writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonOptions {
    /// Prepended to every generated class name (e.g. `XY` → `XYPerson`)
    pub class_prefix: String,

    pub file_layout: FileLayout,

    /// File stem used by [`FileLayout::SingleFile`]
    pub single_file_name: String,

    /// How structurally-equal classes are collapsed before rendering
    pub dedup: DedupPolicy,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            class_prefix: String::new(),
            file_layout: FileLayout::PerClass,
            single_file_name: "Models".to_string(),
            dedup: DedupPolicy::ByPath,
        }
    }
}

const COMMON_KEYS: &[&str] = &["class_prefix", "file_layout", "single_file_name", "dedup"];

impl CommonOptions {
    fn set(&mut self, language: Language, key: &str, value: &str) -> WriterResult<bool> {
        match key {
            "class_prefix" => self.class_prefix = value.to_string(),
            "file_layout" => {
                self.file_layout = match value {
                    "per_class" => FileLayout::PerClass,
                    "single_file" => FileLayout::SingleFile,
                    _ => {
                        return Err(WriterError::invalid_option(
                            language,
                            key,
                            value,
                            "expected per_class or single_file",
                        ))
                    }
                }
            }
            "single_file_name" => self.single_file_name = value.to_string(),
            "dedup" => {
                self.dedup = match value {
                    "by_path" => DedupPolicy::ByPath,
                    "by_shape" => DedupPolicy::ByShape,
                    _ => {
                        return Err(WriterError::invalid_option(
                            language,
                            key,
                            value,
                            "expected by_path or by_shape",
                        ))
                    }
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn validate(&self, language: Language, keywords: &[&str]) -> WriterResult<()> {
        if !self.class_prefix.is_empty() && !is_identifier(&self.class_prefix) {
            return Err(WriterError::invalid_option(
                language,
                "class_prefix",
                &self.class_prefix,
                "must be a valid identifier prefix",
            ));
        }
        if !is_identifier(&self.single_file_name) || keywords.contains(&self.single_file_name.as_str()) {
            return Err(WriterError::invalid_option(
                language,
                "single_file_name",
                &self.single_file_name,
                "must be a valid identifier",
            ));
        }
        Ok(())
    }
}

/// Kind of Swift declaration emitted per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwiftTypeKind {
    #[default]
    Struct,
    Class,
    FinalClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLevel {
    #[default]
    Internal,
    Public,
    Open,
}

impl AccessLevel {
    /// Declaration prefix including the trailing space, empty for internal
    pub fn prefix(&self) -> &'static str {
        match self {
            AccessLevel::Internal => "",
            AccessLevel::Public => "public ",
            AccessLevel::Open => "open ",
        }
    }
}

/// Swift writer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftOptions {
    pub common: CommonOptions,
    pub type_kind: SwiftTypeKind,
    /// Superclass for class kinds; not allowed with structs
    pub base_class: Option<String>,
    pub access_level: AccessLevel,
    /// `var` instead of `let` for stored properties
    pub mutable_properties: bool,
    pub equatable: bool,
    pub codable: bool,
}

impl Default for SwiftOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            type_kind: SwiftTypeKind::Struct,
            base_class: None,
            access_level: AccessLevel::Internal,
            mutable_properties: false,
            equatable: true,
            codable: true,
        }
    }
}

const SWIFT_KEYS: &[&str] = &[
    "type_kind",
    "base_class",
    "access_level",
    "mutable_properties",
    "equatable",
    "codable",
];

impl SwiftOptions {
    fn set(&mut self, key: &str, value: &str) -> WriterResult<bool> {
        let language = Language::Swift;
        if self.common.set(language, key, value)? {
            return Ok(true);
        }
        match key {
            "type_kind" => {
                self.type_kind = match value {
                    "struct" => SwiftTypeKind::Struct,
                    "class" => SwiftTypeKind::Class,
                    "final_class" => SwiftTypeKind::FinalClass,
                    _ => {
                        return Err(WriterError::invalid_option(
                            language,
                            key,
                            value,
                            "expected struct, class or final_class",
                        ))
                    }
                }
            }
            "base_class" => {
                self.base_class = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "access_level" => {
                self.access_level = match value {
                    "internal" => AccessLevel::Internal,
                    "public" => AccessLevel::Public,
                    "open" => AccessLevel::Open,
                    _ => {
                        return Err(WriterError::invalid_option(
                            language,
                            key,
                            value,
                            "expected internal, public or open",
                        ))
                    }
                }
            }
            "mutable_properties" => self.mutable_properties = parse_bool(language, key, value)?,
            "equatable" => self.equatable = parse_bool(language, key, value)?,
            "codable" => self.codable = parse_bool(language, key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn validate(&self) -> WriterResult<()> {
        let language = Language::Swift;
        self.common.validate(language, swift::KEYWORDS)?;

        if let Some(base) = &self.base_class {
            validate_type_name(language, "base_class", base, swift::KEYWORDS)?;
            if self.type_kind == SwiftTypeKind::Struct {
                return Err(WriterError::conflict(
                    language,
                    "base_class",
                    "type_kind",
                    "structs cannot inherit from a base class",
                ));
            }
        }

        if self.access_level == AccessLevel::Open && self.type_kind != SwiftTypeKind::Class {
            return Err(WriterError::conflict(
                language,
                "access_level",
                "type_kind",
                "only non-final classes can be open",
            ));
        }

        Ok(())
    }
}

/// Objective-C writer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveCOptions {
    pub common: CommonOptions,
    pub base_class: String,
    /// `strong` properties under ARC, `retain` plus `dealloc` otherwise
    pub use_arc: bool,
    pub atomic: bool,
}

impl Default for ObjectiveCOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            base_class: "NSObject".to_string(),
            use_arc: true,
            atomic: false,
        }
    }
}

const OBJC_KEYS: &[&str] = &["base_class", "use_arc", "atomic"];

impl ObjectiveCOptions {
    fn set(&mut self, key: &str, value: &str) -> WriterResult<bool> {
        let language = Language::ObjectiveC;
        if self.common.set(language, key, value)? {
            return Ok(true);
        }
        match key {
            "base_class" => self.base_class = value.to_string(),
            "use_arc" => self.use_arc = parse_bool(language, key, value)?,
            "atomic" => self.atomic = parse_bool(language, key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn validate(&self) -> WriterResult<()> {
        let language = Language::ObjectiveC;
        self.common.validate(language, objc::KEYWORDS)?;
        validate_type_name(language, "base_class", &self.base_class, objc::KEYWORDS)
    }
}

/// Java writer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaOptions {
    pub common: CommonOptions,
    /// Dotted package name, default package when absent
    pub package: Option<String>,
    pub base_class: Option<String>,
    /// Final fields assigned through a constructor
    pub immutable: bool,
    pub generate_setters: bool,
}

impl Default for JavaOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            package: None,
            base_class: None,
            immutable: false,
            generate_setters: true,
        }
    }
}

const JAVA_KEYS: &[&str] = &["package", "base_class", "immutable", "generate_setters"];

impl JavaOptions {
    /// Immutable value classes: final fields, no setters
    pub fn immutable() -> Self {
        Self {
            immutable: true,
            generate_setters: false,
            ..Default::default()
        }
    }

    fn set(&mut self, key: &str, value: &str, setters_given: &mut bool) -> WriterResult<bool> {
        let language = Language::Java;
        if self.common.set(language, key, value)? {
            return Ok(true);
        }
        match key {
            "package" => {
                self.package = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "base_class" => {
                self.base_class = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "immutable" => {
                self.immutable = parse_bool(language, key, value)?;
                if !*setters_given {
                    self.generate_setters = !self.immutable;
                }
            }
            "generate_setters" => {
                self.generate_setters = parse_bool(language, key, value)?;
                *setters_given = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn validate(&self) -> WriterResult<()> {
        let language = Language::Java;
        self.common.validate(language, java::KEYWORDS)?;

        if self.common.file_layout == FileLayout::SingleFile {
            return Err(WriterError::invalid_option(
                language,
                "file_layout",
                "single_file",
                "Java requires one public class per file",
            ));
        }

        if let Some(package) = &self.package {
            let valid = package
                .split('.')
                .all(|segment| is_identifier(segment) && !java::KEYWORDS.contains(&segment));
            if !valid {
                return Err(WriterError::invalid_option(
                    language,
                    "package",
                    package,
                    "must be a dotted sequence of identifiers",
                ));
            }
        }

        if let Some(base) = &self.base_class {
            validate_type_name(language, "base_class", base, java::KEYWORDS)?;
        }

        if self.immutable && self.generate_setters {
            return Err(WriterError::conflict(
                language,
                "immutable",
                "generate_setters",
                "immutable classes cannot have setters",
            ));
        }

        Ok(())
    }
}

/// Closed, typed configuration for one render call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritingOptions {
    Swift(SwiftOptions),
    ObjectiveC(ObjectiveCOptions),
    Java(JavaOptions),
}

impl WritingOptions {
    pub fn default_for(language: Language) -> Self {
        match language {
            Language::Swift => WritingOptions::Swift(SwiftOptions::default()),
            Language::ObjectiveC => WritingOptions::ObjectiveC(ObjectiveCOptions::default()),
            Language::Java => WritingOptions::Java(JavaOptions::default()),
        }
    }

    pub fn language(&self) -> Language {
        match self {
            WritingOptions::Swift(_) => Language::Swift,
            WritingOptions::ObjectiveC(_) => Language::ObjectiveC,
            WritingOptions::Java(_) => Language::Java,
        }
    }

    pub fn common(&self) -> &CommonOptions {
        match self {
            WritingOptions::Swift(o) => &o.common,
            WritingOptions::ObjectiveC(o) => &o.common,
            WritingOptions::Java(o) => &o.common,
        }
    }

    /// Every key accepted for `language`, common keys first
    pub fn keys(language: Language) -> Vec<&'static str> {
        let specific = match language {
            Language::Swift => SWIFT_KEYS,
            Language::ObjectiveC => OBJC_KEYS,
            Language::Java => JAVA_KEYS,
        };
        COMMON_KEYS.iter().chain(specific.iter()).copied().collect()
    }

    /// Build options from string pairs, as supplied by a UI or the CLI.
    ///
    /// Unknown keys, malformed values and keys given twice are rejected.
    /// The result is validated before it is returned.
    pub fn from_pairs<I, K, V>(language: Language, pairs: I) -> WriterResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = WritingOptions::default_for(language);
        let mut seen = HashSet::new();
        let mut setters_given = false;

        for (key, value) in pairs {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            if !seen.insert(key.to_string()) {
                return Err(WriterError::invalid_option(
                    language,
                    key,
                    value,
                    "option given more than once",
                ));
            }

            let known = match &mut options {
                WritingOptions::Swift(o) => o.set(key, value)?,
                WritingOptions::ObjectiveC(o) => o.set(key, value)?,
                WritingOptions::Java(o) => o.set(key, value, &mut setters_given)?,
            };
            if !known {
                return Err(WriterError::UnknownOption {
                    language,
                    key: key.to_string(),
                });
            }
        }

        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> WriterResult<()> {
        match self {
            WritingOptions::Swift(o) => o.validate(),
            WritingOptions::ObjectiveC(o) => o.validate(),
            WritingOptions::Java(o) => o.validate(),
        }
    }
}

impl From<SwiftOptions> for WritingOptions {
    fn from(options: SwiftOptions) -> Self {
        WritingOptions::Swift(options)
    }
}

impl From<ObjectiveCOptions> for WritingOptions {
    fn from(options: ObjectiveCOptions) -> Self {
        WritingOptions::ObjectiveC(options)
    }
}

impl From<JavaOptions> for WritingOptions {
    fn from(options: JavaOptions) -> Self {
        WritingOptions::Java(options)
    }
}

fn parse_bool(language: Language, key: &str, value: &str) -> WriterResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(WriterError::invalid_option(
            language,
            key,
            value,
            "expected true or false",
        )),
    }
}

fn validate_type_name(language: Language, key: &str, name: &str, keywords: &[&str]) -> WriterResult<()> {
    if !is_identifier(name) || keywords.contains(&name) {
        return Err(WriterError::invalid_option(
            language,
            key,
            name,
            "must be a valid type name",
        ));
    }
    Ok(())
}
