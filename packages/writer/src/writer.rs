use crate::error::{WriterError, WriterResult};
use crate::language::Language;
use crate::naming::{camel_case, ensure_identifier, escape_reserved, pascal_case, IdentifierAllocator};
use crate::options::WritingOptions;
use jsonmodeler_model::{ClassGraph, ClassModel, PropertyType, Traversal};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One rendered file: suggested name plus UTF-8 source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub filename: String,
    pub contents: String,
}

impl OutputFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

/// Where nested class declarations go relative to their users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationOrder {
    /// Parents before their nested classes; for languages without
    /// forward-declaration requirements
    ParentsFirst,
    /// Every class after the classes it references
    LeavesFirst,
}

/// Plugin trait implemented by every output language.
///
/// Implementations hold no mutable state: the same graph and options
/// always produce the same files, and one writer may be shared across
/// threads.
pub trait OutputLanguageWriter: Send + Sync {
    fn language(&self) -> Language;

    fn declaration_order(&self) -> DeclarationOrder;

    /// Render the graph, aborting between classes when `budget` runs out.
    ///
    /// Returns every file or an error; never a partial set.
    fn render_with_budget(
        &self,
        graph: &ClassGraph,
        options: &WritingOptions,
        budget: &RenderBudget,
    ) -> WriterResult<Vec<OutputFile>>;

    fn render(&self, graph: &ClassGraph, options: &WritingOptions) -> WriterResult<Vec<OutputFile>> {
        self.render_with_budget(graph, options, &RenderBudget::unlimited())
    }
}

/// Caller-imposed limits checked between top-level class renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderBudget {
    pub max_classes: Option<usize>,
    pub max_bytes: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl RenderBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_classes(mut self, max: usize) -> Self {
        self.max_classes = Some(max);
        self
    }

    pub fn with_max_bytes(mut self, max: usize) -> Self {
        self.max_bytes = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub(crate) fn start(&self, total: usize) -> BudgetMeter<'_> {
        BudgetMeter {
            budget: self,
            started: Instant::now(),
            total,
            rendered: 0,
            bytes: 0,
        }
    }
}

/// Running totals for one render call
#[derive(Debug)]
pub(crate) struct BudgetMeter<'a> {
    budget: &'a RenderBudget,
    started: Instant,
    total: usize,
    rendered: usize,
    bytes: usize,
}

impl BudgetMeter<'_> {
    /// Called before each class; fails once any limit is reached
    pub(crate) fn check(&self) -> WriterResult<()> {
        let exceeded = |reason: String| WriterError::BudgetExceeded {
            rendered: self.rendered,
            total: self.total,
            reason,
        };

        if let Some(max) = self.budget.max_classes {
            if self.rendered >= max {
                return Err(exceeded(format!("class limit of {} reached", max)));
            }
        }
        self.check_bytes(self.bytes)?;
        if let Some(limit) = self.budget.time_limit {
            if self.started.elapsed() > limit {
                return Err(exceeded(format!("time limit of {:?} elapsed", limit)));
            }
        }
        Ok(())
    }

    /// Add one rendered class; fails as soon as the byte cap is passed
    pub(crate) fn record(&mut self, bytes: usize) -> WriterResult<()> {
        self.bytes += bytes;
        self.check_bytes(self.bytes)?;
        self.rendered += 1;
        Ok(())
    }

    /// Check the assembled files, which add headers and imports on top of
    /// the recorded declarations
    pub(crate) fn finish(&self, files: &[OutputFile]) -> WriterResult<()> {
        self.check_bytes(files.iter().map(|f| f.contents.len()).sum())
    }

    fn check_bytes(&self, bytes: usize) -> WriterResult<()> {
        match self.budget.max_bytes {
            Some(max) if bytes > max => Err(WriterError::BudgetExceeded {
                rendered: self.rendered,
                total: self.total,
                reason: format!("output exceeds {} bytes", max),
            }),
            _ => Ok(()),
        }
    }
}

/// Classes in the order a writer emits them
pub(crate) fn ordered_classes(graph: &ClassGraph, order: DeclarationOrder) -> Vec<&ClassModel> {
    match order {
        DeclarationOrder::ParentsFirst => graph.traverse(Traversal::DepthFirst),
        DeclarationOrder::LeavesFirst => graph.leaves_first(),
    }
}

/// Rendered type name for every class of a graph.
///
/// Names are PascalCased, prefixed, escaped with a `Model` suffix when
/// they hit a reserved name and made unique in declaration order.
#[derive(Debug, Clone)]
pub struct TypeNames {
    language: Language,
    names: HashMap<String, String>,
}

impl TypeNames {
    pub fn new(language: Language, graph: &ClassGraph, prefix: &str, reserved: &[&str]) -> Self {
        let mut allocator = IdentifierAllocator::new();
        let names = graph
            .classes()
            .iter()
            .map(|class| {
                let base = ensure_identifier(pascal_case(class.name()), "Model");
                let prefixed = escape_reserved(format!("{}{}", prefix, base), reserved, "Model");
                (class.name().to_string(), allocator.allocate(prefixed))
            })
            .collect();

        Self { language, names }
    }

    pub fn get(&self, class: &str) -> WriterResult<&str> {
        self.names.get(class).map(String::as_str).ok_or_else(|| {
            WriterError::Invariant(format!(
                "{} writer has no type name for class '{}'",
                self.language, class
            ))
        })
    }

    /// Whether some class of the graph renders under `type_name`
    pub fn is_generated(&self, type_name: &str) -> bool {
        self.names.values().any(|n| n == type_name)
    }

    /// A base class must not be one of the generated classes, which
    /// would make that class inherit from itself
    pub(crate) fn check_base_class(&self, base: Option<&str>) -> WriterResult<()> {
        match base {
            Some(base) if self.is_generated(base) => Err(WriterError::conflict(
                self.language,
                "base_class",
                "class_prefix",
                format!("'{}' is also the name of a generated class", base),
            )),
            _ => Ok(()),
        }
    }
}

/// Member identifiers for the properties of `class`, index-aligned with
/// `class.properties()`.
///
/// Keys are camelCased; reserved words get a `Value` suffix; `adjust`
/// applies writer-specific rules; `generated` names are never handed out.
pub(crate) fn member_names(
    class: &ClassModel,
    reserved: &[&str],
    generated: &[&str],
    adjust: impl Fn(String) -> String,
) -> Vec<String> {
    let mut allocator = IdentifierAllocator::new();
    allocator.reserve(generated.iter().copied());

    class
        .properties()
        .iter()
        .map(|p| {
            let name = ensure_identifier(camel_case(&p.name), "value");
            let name = adjust(escape_reserved(name, reserved, "Value"));
            allocator.allocate(name)
        })
        .collect()
}

pub(crate) fn unsupported(language: Language, class: &ClassModel, property: &str, ty: &PropertyType) -> WriterError {
    WriterError::UnsupportedType {
        language,
        class: class.name().to_string(),
        property: property.to_string(),
        ty: ty.to_string(),
    }
}
