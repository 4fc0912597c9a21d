mod declaration;
mod types;

pub use types::{KEYWORDS, RESERVED_TYPE_NAMES};

use crate::context::SourceBuffer;
use crate::error::{WriterError, WriterResult};
use crate::language::Language;
use crate::options::{FileLayout, SwiftOptions, WritingOptions};
use crate::writer::{ordered_classes, DeclarationOrder, OutputFile, OutputLanguageWriter, RenderBudget, TypeNames};
use jsonmodeler_model::ClassGraph;
use tracing::{debug, info, instrument};

const INDENT: &str = "    ";

/// Swift model writer: one `struct` or `class` per model class
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftWriter;

impl SwiftWriter {
    pub fn new() -> Self {
        Self
    }

    fn options<'a>(&self, options: &'a WritingOptions) -> WriterResult<&'a SwiftOptions> {
        match options {
            WritingOptions::Swift(o) => Ok(o),
            other => Err(WriterError::OptionsMismatch {
                writer: Language::Swift,
                given: other.language(),
            }),
        }
    }
}

fn file_header(buf: &mut SourceBuffer, filename: &str) {
    buf.add_line("//");
    buf.add_line(&format!("//  {}", filename));
    buf.add_line("//");
    buf.add_line("//  Generated by JSONModeler. Do not edit.");
    buf.add_line("//");
    buf.blank_line();
    buf.add_line("import Foundation");
    buf.blank_line();
}

impl OutputLanguageWriter for SwiftWriter {
    fn language(&self) -> Language {
        Language::Swift
    }

    /// Swift resolves types across the whole module, so parents can come first
    fn declaration_order(&self) -> DeclarationOrder {
        DeclarationOrder::ParentsFirst
    }

    #[instrument(skip_all, fields(language = "swift", classes = graph.len()))]
    fn render_with_budget(
        &self,
        graph: &ClassGraph,
        options: &WritingOptions,
        budget: &RenderBudget,
    ) -> WriterResult<Vec<OutputFile>> {
        let options = self.options(options)?;
        options.validate()?;

        let graph = graph.deduplicated(options.common.dedup)?;
        let classes = ordered_classes(&graph, self.declaration_order());
        let names = TypeNames::new(
            Language::Swift,
            &graph,
            &options.common.class_prefix,
            &types::reserved_type_names(),
        );
        names.check_base_class(options.base_class.as_deref())?;

        let mut meter = budget.start(classes.len());
        let mut declarations = Vec::with_capacity(classes.len());
        for class in classes {
            meter.check()?;
            let mut buf = SourceBuffer::new(INDENT);
            declaration::write_declaration(&mut buf, class, &names, options)?;
            let text = buf.into_output();
            meter.record(text.len())?;
            debug!(class = class.name(), bytes = text.len(), "rendered swift declaration");
            declarations.push((names.get(class.name())?.to_string(), text));
        }

        let files = match options.common.file_layout {
            FileLayout::PerClass => declarations
                .into_iter()
                .map(|(type_name, text)| {
                    let filename = format!("{}.swift", type_name);
                    let mut buf = SourceBuffer::new(INDENT);
                    file_header(&mut buf, &filename);
                    buf.add(&text);
                    OutputFile::new(filename, buf.into_output())
                })
                .collect(),
            FileLayout::SingleFile => {
                if declarations.is_empty() {
                    Vec::new()
                } else {
                    let filename = format!("{}.swift", options.common.single_file_name);
                    let mut buf = SourceBuffer::new(INDENT);
                    file_header(&mut buf, &filename);
                    for (i, (_, text)) in declarations.iter().enumerate() {
                        if i > 0 {
                            buf.blank_line();
                        }
                        buf.add(text);
                    }
                    vec![OutputFile::new(filename, buf.into_output())]
                }
            }
        };

        meter.finish(&files)?;
        info!(files = files.len(), "swift render complete");
        Ok(files)
    }
}
