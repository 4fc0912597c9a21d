mod declaration;
mod types;

pub use types::{KEYWORDS, RESERVED_TYPE_NAMES};

use crate::context::SourceBuffer;
use crate::error::{WriterError, WriterResult};
use crate::language::Language;
use crate::naming::IdentifierAllocator;
use crate::options::{FileLayout, ObjectiveCOptions, WritingOptions};
use crate::writer::{ordered_classes, DeclarationOrder, OutputFile, OutputLanguageWriter, RenderBudget, TypeNames};
use jsonmodeler_model::ClassGraph;
use tracing::{debug, info, instrument};

const INDENT: &str = "    ";

/// Objective-C model writer: an `.h`/`.m` pair per class, or one pair
/// for the whole graph
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveCWriter;

impl ObjectiveCWriter {
    pub fn new() -> Self {
        Self
    }

    fn options<'a>(&self, options: &'a WritingOptions) -> WriterResult<&'a ObjectiveCOptions> {
        match options {
            WritingOptions::ObjectiveC(o) => Ok(o),
            other => Err(WriterError::OptionsMismatch {
                writer: Language::ObjectiveC,
                given: other.language(),
            }),
        }
    }
}

/// Rendered halves of one class
struct ClassSource {
    type_name: String,
    nested: Vec<String>,
    interface: String,
    implementation: String,
}

fn file_header(buf: &mut SourceBuffer, filename: &str) {
    buf.add_line("//");
    buf.add_line(&format!("//  {}", filename));
    buf.add_line("//");
    buf.add_line("//  Generated by JSONModeler. Do not edit.");
    buf.add_line("//");
    buf.blank_line();
}

fn header_imports(buf: &mut SourceBuffer, options: &ObjectiveCOptions) {
    buf.add_line("#import <Foundation/Foundation.h>");
    if options.base_class != "NSObject" {
        buf.add_line(&format!("#import \"{}.h\"", options.base_class));
    }
    buf.blank_line();
}

fn per_class_files(sources: Vec<ClassSource>, options: &ObjectiveCOptions) -> Vec<OutputFile> {
    let mut files = Vec::with_capacity(sources.len() * 2);
    for source in sources {
        let header_name = format!("{}.h", source.type_name);
        let mut h = SourceBuffer::new(INDENT);
        file_header(&mut h, &header_name);
        header_imports(&mut h, options);
        if !source.nested.is_empty() {
            h.add_line(&format!("@class {};", source.nested.join(", ")));
            h.blank_line();
        }
        h.add(&source.interface);

        let implementation_name = format!("{}.m", source.type_name);
        let mut m = SourceBuffer::new(INDENT);
        file_header(&mut m, &implementation_name);
        m.add_line(&format!("#import \"{}\"", header_name));
        for nested in &source.nested {
            m.add_line(&format!("#import \"{}.h\"", nested));
        }
        m.blank_line();
        m.add(&source.implementation);

        files.push(OutputFile::new(header_name, h.into_output()));
        files.push(OutputFile::new(implementation_name, m.into_output()));
    }
    files
}

fn single_file(sources: Vec<ClassSource>, options: &ObjectiveCOptions) -> Vec<OutputFile> {
    if sources.is_empty() {
        return Vec::new();
    }

    let header_name = format!("{}.h", options.common.single_file_name);
    let mut h = SourceBuffer::new(INDENT);
    file_header(&mut h, &header_name);
    header_imports(&mut h, options);

    let implementation_name = format!("{}.m", options.common.single_file_name);
    let mut m = SourceBuffer::new(INDENT);
    file_header(&mut m, &implementation_name);
    m.add_line(&format!("#import \"{}\"", header_name));
    m.blank_line();

    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            h.blank_line();
            m.blank_line();
        }
        h.add(&source.interface);
        m.add(&source.implementation);
    }

    vec![
        OutputFile::new(header_name, h.into_output()),
        OutputFile::new(implementation_name, m.into_output()),
    ]
}

impl OutputLanguageWriter for ObjectiveCWriter {
    fn language(&self) -> Language {
        Language::ObjectiveC
    }

    /// Interfaces must be declared before the classes that use them
    fn declaration_order(&self) -> DeclarationOrder {
        DeclarationOrder::LeavesFirst
    }

    #[instrument(skip_all, fields(language = "objc", classes = graph.len()))]
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
            Language::ObjectiveC,
            &graph,
            &options.common.class_prefix,
            &types::reserved_type_names(),
        );
        names.check_base_class(Some(options.base_class.as_str()))?;

        let mut meter = budget.start(classes.len());
        let mut constants = IdentifierAllocator::new();
        let mut sources = Vec::with_capacity(classes.len());
        for class in classes {
            meter.check()?;
            let resolved = declaration::resolve(class, &names, &mut constants)?;

            let mut interface = SourceBuffer::new(INDENT);
            declaration::write_interface(&mut interface, &resolved, options);
            let mut implementation = SourceBuffer::new(INDENT);
            declaration::write_implementation(&mut implementation, &resolved, options);

            let bytes = interface.len() + implementation.len();
            meter.record(bytes)?;
            debug!(class = class.name(), bytes, "rendered objc class");

            sources.push(ClassSource {
                type_name: resolved.type_name.to_string(),
                nested: resolved.nested.iter().map(|n| n.to_string()).collect(),
                interface: interface.into_output(),
                implementation: implementation.into_output(),
            });
        }

        let files = match options.common.file_layout {
            FileLayout::PerClass => per_class_files(sources, options),
            FileLayout::SingleFile => single_file(sources, options),
        };

        meter.finish(&files)?;
        info!(files = files.len(), "objc render complete");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonmodeler_model::{ClassModel, PropertyType};

    fn order_graph() -> ClassGraph {
        ClassGraph::builder()
            .class(
                ClassModel::builder("Order")
                    .property("id", PropertyType::Integer)
                    .property("customer_name", PropertyType::String)
                    .property("discount", PropertyType::optional(PropertyType::Float))
                    .property("items", PropertyType::array(PropertyType::class("Item")))
                    .property("shipping", PropertyType::class("Address"))
                    .build()
                    .unwrap(),
            )
            .class(
                ClassModel::builder("Item")
                    .property("sku", PropertyType::String)
                    .property("price", PropertyType::Float)
                    .build()
                    .unwrap(),
            )
            .class(
                ClassModel::builder("Address")
                    .property("city", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn render(graph: &ClassGraph, options: ObjectiveCOptions) -> Vec<OutputFile> {
        ObjectiveCWriter::new()
            .render(graph, &WritingOptions::ObjectiveC(options))
            .expect("Failed to render")
    }

    fn file<'a>(files: &'a [OutputFile], name: &str) -> &'a str {
        &files
            .iter()
            .find(|f| f.filename == name)
            .unwrap_or_else(|| panic!("missing {}", name))
            .contents
    }

    #[test]
    fn test_per_class_pairs_leaves_first() {
        let files = render(&order_graph(), ObjectiveCOptions::default());
        let filenames: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(
            filenames,
            vec!["Item.h", "Item.m", "Address.h", "Address.m", "Order.h", "Order.m"]
        );
    }

    #[test]
    fn test_header() {
        let files = render(&order_graph(), ObjectiveCOptions::default());
        let header = file(&files, "Order.h");
        println!("Generated code:\n{}", header);

        assert!(header.contains("#import <Foundation/Foundation.h>\n"));
        assert!(header.contains("@class Item, Address;\n"));
        assert!(header.contains("@interface Order : NSObject\n"));
        assert!(!header.contains("NSInteger id;"));
        assert!(header.contains("@property (nonatomic, assign) NSInteger idValue;\n"));
        assert!(header.contains("@property (nonatomic, copy) NSString *customerName;\n"));
        assert!(header.contains("@property (nonatomic, strong) NSNumber *discount;\n"));
        assert!(header.contains("@property (nonatomic, strong) NSArray<Item *> *items;\n"));
        assert!(header.contains("@property (nonatomic, strong) Address *shipping;\n"));
        assert!(header.contains("+ (instancetype)modelObjectWithDictionary:(NSDictionary *)dict;\n"));
        assert!(header.ends_with("@end\n"));
    }

    #[test]
    fn test_implementation() {
        let files = render(&order_graph(), ObjectiveCOptions::default());
        let m = file(&files, "Order.m");
        println!("Generated code:\n{}", m);

        assert!(m.contains("#import \"Order.h\"\n#import \"Item.h\"\n#import \"Address.h\"\n"));
        assert!(m.contains("static NSString *const kOrderIdValue = @\"id\";\n"));
        assert!(m.contains("NSString *const kOrderCustomerName = @\"customer_name\";\n"));
        assert!(m.contains(
            "        self.idValue = [[self objectOrNilForKey:kOrderIdValue fromDictionary:dict] integerValue];\n"
        ));
        assert!(m.contains(
            "        self.shipping = [Address modelObjectWithDictionary:[self objectOrNilForKey:kOrderShipping fromDictionary:dict]];\n"
        ));
        assert!(m.contains("[parsedItems addObject:[Item modelObjectWithDictionary:item]];\n"));
        assert!(m.contains("        self.items = [NSArray arrayWithArray:parsedItems];\n"));
        assert!(m.contains("    [mutableDict setValue:[NSNumber numberWithInteger:self.idValue] forKey:kOrderIdValue];\n"));
        assert!(m.contains("    [mutableDict setValue:[self.shipping dictionaryRepresentation] forKey:kOrderShipping];\n"));
        assert!(m.contains("- (id)objectOrNilForKey:(id)aKey fromDictionary:(NSDictionary *)dict\n"));
        assert!(m.contains("    return [[self alloc] initWithDictionary:dict];\n"));
        assert!(!m.contains("dealloc"));
    }

    #[test]
    fn test_manual_memory_management() {
        let options = ObjectiveCOptions {
            use_arc: false,
            atomic: true,
            ..Default::default()
        };
        let files = render(&order_graph(), options);
        let header = file(&files, "Order.h");
        let m = file(&files, "Order.m");
        println!("Generated code:\n{}", m);

        assert!(header.contains("@property (atomic, retain) Address *shipping;\n"));
        assert!(header.contains("@property (atomic, copy) NSString *customerName;\n"));
        assert!(m.contains("    return [[[self alloc] initWithDictionary:dict] autorelease];\n"));
        assert!(m.contains(
            "- (void)dealloc\n{\n    [_customerName release];\n    [_discount release];\n    [_items release];\n    [_shipping release];\n    [super dealloc];\n}\n"
        ));
    }

    #[test]
    fn test_single_file_layout_with_prefix() {
        let mut options = ObjectiveCOptions::default();
        options.common.file_layout = FileLayout::SingleFile;
        options.common.class_prefix = "XY".to_string();
        let files = render(&order_graph(), options);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "Models.h");
        assert_eq!(files[1].filename, "Models.m");

        let header = &files[0].contents;
        let item = header.find("@interface XYItem : NSObject").unwrap();
        let order = header.find("@interface XYOrder : NSObject").unwrap();
        assert!(item < order);
        assert!(files[1].contents.contains("#import \"Models.h\"\n"));
    }

    #[test]
    fn test_custom_base_class_is_imported() {
        let options = ObjectiveCOptions {
            base_class: "XYBaseModel".to_string(),
            ..Default::default()
        };
        let files = render(&order_graph(), options);
        let header = file(&files, "Address.h");
        assert!(header.contains("#import \"XYBaseModel.h\"\n"));
        assert!(header.contains("@interface Address : XYBaseModel\n"));
    }

    #[test]
    fn test_member_naming_rules() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("Feed")
                    .property("new_items", PropertyType::array(PropertyType::String))
                    .property("description", PropertyType::String)
                    .property("payload", PropertyType::Any)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let files = render(&graph, ObjectiveCOptions::default());
        let header = file(&files, "Feed.h");
        println!("Generated code:\n{}", header);

        assert!(header.contains("@property (nonatomic, strong) NSArray<NSString *> *theNewItems;\n"));
        assert!(header.contains("@property (nonatomic, copy) NSString *descriptionValue;\n"));
        assert!(header.contains("@property (nonatomic, strong) id payload;\n"));
    }

    #[test]
    fn test_key_constants_unique_across_classes() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("Ab")
                    .property("cd_x", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .class(
                ClassModel::builder("AbCd")
                    .property("x", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let mut options = ObjectiveCOptions::default();
        options.common.file_layout = FileLayout::SingleFile;
        let files = render(&graph, options);
        let m = file(&files, "Models.m");
        println!("Generated code:\n{}", m);

        assert_eq!(m.matches("static NSString *const kAbCdX = ").count(), 1);
        assert_eq!(m.matches("static NSString *const kAbCdX2 = ").count(), 1);
        assert!(m.contains("[self objectOrNilForKey:kAbCdX2 fromDictionary:dict]"));
    }

    #[test]
    fn test_control_characters_in_keys_are_escaped() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("Doc")
                    .property("line\nbreak", PropertyType::String)
                    .property("esc\u{1b}1", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let files = render(&graph, ObjectiveCOptions::default());
        let m = file(&files, "Doc.m");

        assert!(m.contains("static NSString *const kDocLineBreak = @\"line\\nbreak\";\n"));
        assert!(m.contains("static NSString *const kDocEsc1 = @\"esc\\0331\";\n"));
    }

    #[test]
    fn test_stdbool_names_are_escaped() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("Flags")
                    .property("true", PropertyType::Integer)
                    .property("bool", PropertyType::String)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let files = render(&graph, ObjectiveCOptions::default());
        let header = file(&files, "Flags.h");

        assert!(header.contains("@property (nonatomic, assign) NSInteger trueValue;\n"));
        assert!(header.contains("@property (nonatomic, copy) NSString *boolValue;\n"));
    }

    #[test]
    fn test_array_of_optional_models() {
        let graph = ClassGraph::builder()
            .class(
                ClassModel::builder("Cart")
                    .property("items", PropertyType::array(PropertyType::optional(PropertyType::class("Item"))))
                    .build()
                    .unwrap(),
            )
            .class(ClassModel::builder("Item").build().unwrap())
            .build()
            .unwrap();
        let files = render(&graph, ObjectiveCOptions::default());

        assert!(file(&files, "Cart.h").contains("@property (nonatomic, strong) NSArray<Item *> *items;\n"));
        assert!(file(&files, "Cart.m").contains("[parsedItems addObject:[Item modelObjectWithDictionary:item]];\n"));
    }

    #[test]
    fn test_base_class_named_like_generated_class() {
        let options = ObjectiveCOptions {
            base_class: "Item".to_string(),
            ..Default::default()
        };
        let result = ObjectiveCWriter::new().render(&order_graph(), &WritingOptions::ObjectiveC(options));
        assert!(matches!(result, Err(WriterError::ConflictingOptions { .. })));
    }

    #[test]
    fn test_empty_graph_renders_nothing() {
        let graph = ClassGraph::builder().build().unwrap();
        let mut options = ObjectiveCOptions::default();
        options.common.file_layout = FileLayout::SingleFile;
        assert!(render(&graph, options).is_empty());
    }
}
