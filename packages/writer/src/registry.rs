use crate::error::{WriterError, WriterResult};
use crate::java::JavaWriter;
use crate::language::Language;
use crate::objc::ObjectiveCWriter;
use crate::swift::SwiftWriter;
use crate::writer::OutputLanguageWriter;

/// Registry of available output-language writers
pub struct WriterRegistry {
    writers: Vec<Box<dyn OutputLanguageWriter>>,
}

impl WriterRegistry {
    /// Create a new registry with all built-in writers
    pub fn new() -> Self {
        Self {
            writers: vec![
                Box::new(SwiftWriter::new()),
                Box::new(ObjectiveCWriter::new()),
                Box::new(JavaWriter::new()),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { writers: Vec::new() }
    }

    /// Add a writer, replacing any writer registered for the same language
    pub fn register(&mut self, writer: Box<dyn OutputLanguageWriter>) {
        let language = writer.language();
        self.writers.retain(|w| w.language() != language);
        self.writers.push(writer);
    }

    pub fn writers(&self) -> &[Box<dyn OutputLanguageWriter>] {
        &self.writers
    }

    pub fn languages(&self) -> Vec<Language> {
        self.writers.iter().map(|w| w.language()).collect()
    }

    pub fn get(&self, language: Language) -> Option<&dyn OutputLanguageWriter> {
        self.writers
            .iter()
            .find(|w| w.language() == language)
            .map(|w| w.as_ref())
    }

    /// Look up a writer by a user-supplied language name like `objc`
    pub fn get_by_name(&self, name: &str) -> WriterResult<&dyn OutputLanguageWriter> {
        let language: Language = name.parse()?;
        self.get(language)
            .ok_or_else(|| WriterError::UnknownLanguage(name.to_string()))
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}
