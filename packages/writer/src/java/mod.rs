mod declaration;
mod types;

pub use types::{KEYWORDS, RESERVED_TYPE_NAMES};

use crate::context::SourceBuffer;
use crate::error::{WriterError, WriterResult};
use crate::language::Language;
use crate::options::{JavaOptions, WritingOptions};
use crate::writer::{ordered_classes, DeclarationOrder, OutputFile, OutputLanguageWriter, RenderBudget, TypeNames};
use jsonmodeler_model::ClassGraph;
use tracing::{debug, info, instrument};

const INDENT: &str = "    ";

/// Java model writer: one public class per `.java` file
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaWriter;

impl JavaWriter {
    pub fn new() -> Self {
        Self
    }

    fn options<'a>(&self, options: &'a WritingOptions) -> WriterResult<&'a JavaOptions> {
        match options {
            WritingOptions::Java(o) => Ok(o),
            other => Err(WriterError::OptionsMismatch {
                writer: Language::Java,
                given: other.language(),
            }),
        }
    }
}

impl OutputLanguageWriter for JavaWriter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn declaration_order(&self) -> DeclarationOrder {
        DeclarationOrder::ParentsFirst
    }

    #[instrument(skip_all, fields(language = "java", classes = graph.len()))]
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
            Language::Java,
            &graph,
            &options.common.class_prefix,
            &types::reserved_type_names(),
        );
        names.check_base_class(options.base_class.as_deref())?;

        let mut meter = budget.start(classes.len());
        let mut files = Vec::with_capacity(classes.len());
        for class in classes {
            meter.check()?;

            let mut body = SourceBuffer::new(INDENT);
            let imports = declaration::write_class(&mut body, class, &names, options)?;

            let filename = format!("{}.java", names.get(class.name())?);
            let mut buf = SourceBuffer::new(INDENT);
            buf.add_line("//");
            buf.add_line(&format!("//  {}", filename));
            buf.add_line("//");
            buf.add_line("//  Generated by JSONModeler. Do not edit.");
            buf.add_line("//");
            buf.blank_line();
            if let Some(package) = &options.package {
                buf.add_line(&format!("package {};", package));
                buf.blank_line();
            }
            if imports.list {
                buf.add_line("import java.util.List;");
            }
            if imports.objects {
                buf.add_line("import java.util.Objects;");
            }
            if imports.list || imports.objects {
                buf.blank_line();
            }
            buf.merge_buffer(&body);

            let contents = buf.into_output();
            meter.record(contents.len())?;
            debug!(class = class.name(), bytes = contents.len(), "rendered java class");
            files.push(OutputFile::new(filename, contents));
        }

        meter.finish(&files)?;
        info!(files = files.len(), "java render complete");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FileLayout;
    use jsonmodeler_model::{ClassModel, PropertyType};

    fn person_graph() -> ClassGraph {
        ClassGraph::builder()
            .class(
                ClassModel::builder("person")
                    .property("name", PropertyType::String)
                    .property("age", PropertyType::Integer)
                    .property("score", PropertyType::Float)
                    .property("active", PropertyType::Boolean)
                    .property("nickname", PropertyType::optional(PropertyType::String))
                    .property("tags", PropertyType::array(PropertyType::class("tag")))
                    .build()
                    .unwrap(),
            )
            .class(
                ClassModel::builder("tag")
                    .property("label", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn render(graph: &ClassGraph, options: JavaOptions) -> Vec<OutputFile> {
        JavaWriter::new()
            .render(graph, &WritingOptions::Java(options))
            .expect("Failed to render")
    }

    #[test]
    fn test_one_file_per_class_parents_first() {
        let files = render(&person_graph(), JavaOptions::default());
        let filenames: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(filenames, vec!["Person.java", "Tag.java"]);
    }

    #[test]
    fn test_mutable_class() {
        let options = JavaOptions {
            package: Some("com.example.models".to_string()),
            ..Default::default()
        };
        let files = render(&person_graph(), options);
        let text = &files[0].contents;
        println!("Generated code:\n{}", text);

        assert!(text.contains("package com.example.models;\n\nimport java.util.List;\nimport java.util.Objects;\n\n"));
        assert!(text.contains("public class Person {\n"));
        assert!(text.contains("    private String name;\n"));
        assert!(text.contains("    private long age;\n"));
        assert!(text.contains("    private double score;\n"));
        assert!(text.contains("    private boolean active;\n"));
        assert!(text.contains("    private String nickname;\n"));
        assert!(text.contains("    private List<Tag> tags;\n"));
        assert!(text.contains("    public Person() {\n    }\n"));
        assert!(text.contains(
            "    public Person(String name, long age, double score, boolean active, String nickname, List<Tag> tags) {\n"
        ));
        assert!(text.contains("    public boolean isActive() {\n        return active;\n    }\n"));
        assert!(text.contains("    public void setAge(long age) {\n        this.age = age;\n    }\n"));
        assert!(text.contains("        return Objects.equals(this.name, that.name)\n"));
        assert!(text.contains("                && this.age == that.age\n"));
        assert!(text.contains("                && Double.compare(this.score, that.score) == 0\n"));
        assert!(text.contains("                && Objects.equals(this.tags, that.tags);\n"));
        assert!(text.contains("        return Objects.hash(name, age, score, active, nickname, tags);\n"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_immutable_class() {
        let files = render(&person_graph(), JavaOptions::immutable());
        let text = &files[1].contents;
        println!("Generated code:\n{}", text);

        assert!(!text.contains("package"));
        assert!(!text.contains("import java.util.List;"));
        assert!(text.contains("    private final String label;\n"));
        assert!(!text.contains("public Tag() {"));
        assert!(text.contains("    public Tag(String label) {\n"));
        assert!(text.contains("    public String getLabel() {\n"));
        assert!(!text.contains("setLabel"));
    }

    #[test]
    fn test_optional_scalars_and_dynamic_values() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("Reading")
                    .property("value", PropertyType::optional(PropertyType::Float))
                    .property("raw", PropertyType::Any)
                    .property("counts", PropertyType::array(PropertyType::Integer))
                    .property("class", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let text = &render(&graph, JavaOptions::default())[0].contents;

        assert!(text.contains("    private Double value;\n"));
        assert!(text.contains("    private Object raw;\n"));
        assert!(text.contains("    private List<Long> counts;\n"));
        assert!(text.contains("    private String classValue;\n"));
        assert!(text.contains("public String getClassValue() {"));
    }

    #[test]
    fn test_key_constants_keep_json_keys() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("User")
                    .property("first_name", PropertyType::String)
                    .property("class", PropertyType::String)
                    .property("line\nbreak", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let text = &render(&graph, JavaOptions::default())[0].contents;
        println!("Generated code:\n{}", text);

        assert!(text.contains("    public static final String KEY_FIRST_NAME = \"first_name\";\n"));
        assert!(text.contains("    public static final String KEY_CLASS_VALUE = \"class\";\n"));
        assert!(text.contains("    public static final String KEY_LINE_BREAK = \"line\\nbreak\";\n"));
        assert!(text.contains("    private String firstName;\n"));
    }

    #[test]
    fn test_boolean_question_getters() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("Account")
                    .property("is_active", PropertyType::Boolean)
                    .property("is_admin", PropertyType::Boolean)
                    .property("admin", PropertyType::Boolean)
                    .property("is_note", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let text = &render(&graph, JavaOptions::default())[0].contents;
        println!("Generated code:\n{}", text);

        assert!(text.contains("    public boolean isActive() {\n        return isActive;\n    }\n"));
        assert!(!text.contains("isIsActive"));
        // `isAdmin()` already belongs to `admin`
        assert!(text.contains("    public boolean isIsAdmin() {\n"));
        assert!(text.contains("    public boolean isAdmin() {\n        return admin;\n    }\n"));
        assert!(text.contains("    public String getIsNote() {\n"));
    }

    #[test]
    fn test_base_class_named_like_generated_class() {
        let options = JavaOptions {
            base_class: Some("Tag".to_string()),
            ..Default::default()
        };
        let result = JavaWriter::new().render(&person_graph(), &WritingOptions::Java(options));
        assert!(matches!(result, Err(WriterError::ConflictingOptions { .. })));
    }

    #[test]
    fn test_base_class() {
        let options = JavaOptions {
            base_class: Some("BaseModel".to_string()),
            ..Default::default()
        };
        let text = &render(&person_graph(), options)[1].contents;
        assert!(text.contains("public class Tag extends BaseModel {\n"));
    }

    #[test]
    fn test_single_file_rejected() {
        let mut options = JavaOptions::default();
        options.common.file_layout = FileLayout::SingleFile;
        let result = JavaWriter::new().render(&person_graph(), &WritingOptions::Java(options));
        assert!(matches!(result, Err(WriterError::InvalidOption { ref key, .. }) if key == "file_layout"));
    }

    #[test]
    fn test_empty_class() {
        let graph = ClassGraph::builder()
            .class(ClassModel::builder("Marker").build().unwrap())
            .build()
            .unwrap();
        let text = &render(&graph, JavaOptions::default())[0].contents;
        println!("Generated code:\n{}", text);

        assert!(!text.contains("import"));
        assert!(text.contains("    public Marker() {\n    }\n"));
        assert!(text.contains("        return 0;\n"));
    }
}
