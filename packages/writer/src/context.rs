/// Indentation-aware text buffer used while emitting one class
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    buffer: String,
    indent_level: usize,
    indent_unit: &'static str,
}

impl SourceBuffer {
    pub fn new(indent_unit: &'static str) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_unit,
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Indented line; empty text produces an empty line without trailing spaces
    pub fn add_line(&mut self, text: &str) {
        if !text.is_empty() {
            self.add_indented(text);
        }
        self.buffer.push('\n');
    }

    pub fn add_indented(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_unit);
        }
        self.buffer.push_str(text);
    }

    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Run `body` one level deeper
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.indent();
        body(self);
        self.dedent();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Empty buffer sharing this buffer's indentation
    pub fn with_new_buffer(&self) -> Self {
        Self {
            buffer: String::new(),
            indent_level: self.indent_level,
            indent_unit: self.indent_unit,
        }
    }

    pub fn merge_buffer(&mut self, other: &SourceBuffer) {
        self.buffer.push_str(&other.buffer);
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}
