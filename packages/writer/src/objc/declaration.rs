use super::types::{avoid_method_family, objc_type, ObjcType, Storage, ValueKind, KEYWORDS};
use crate::context::SourceBuffer;
use crate::error::WriterResult;
use crate::naming::{escape_literal, IdentifierAllocator, LiteralStyle};
use crate::options::ObjectiveCOptions;
use crate::writer::{member_names, TypeNames};
use jsonmodeler_model::ClassModel;

/// Selectors every generated class defines
const GENERATED_MEMBERS: &[&str] = &[
    "modelObjectWithDictionary",
    "initWithDictionary",
    "dictionaryRepresentation",
    "objectOrNilForKey",
];

/// A property resolved for emission
pub(super) struct Member<'a> {
    ident: String,
    key: &'a str,
    constant: String,
    ty: ObjcType,
}

/// One class with every name and type resolved
pub(super) struct ResolvedClass<'a> {
    pub type_name: &'a str,
    members: Vec<Member<'a>>,
    /// Rendered names of the classes this one references
    pub nested: Vec<&'a str>,
}

/// Resolve `class`; key constant names come from `constants`, which is
/// shared by every class of one render so symbols never repeat
pub(super) fn resolve<'a>(
    class: &'a ClassModel,
    names: &'a TypeNames,
    constants: &mut IdentifierAllocator,
) -> WriterResult<ResolvedClass<'a>> {
    let type_name = names.get(class.name())?;
    let idents = member_names(class, KEYWORDS, GENERATED_MEMBERS, avoid_method_family);

    let mut members = Vec::with_capacity(idents.len());
    for (property, ident) in class.properties().iter().zip(idents) {
        let ty = objc_type(&property.ty.clone().normalize(), class, &property.name, names)?;
        let constant = format!("k{}{}", type_name, capitalize_first(&ident));
        members.push(Member {
            constant: constants.allocate(constant),
            ident,
            key: &property.name,
            ty,
        });
    }

    let nested = class
        .nested_classes()
        .into_iter()
        .map(|n| names.get(n))
        .collect::<WriterResult<Vec<_>>>()?;

    Ok(ResolvedClass {
        type_name,
        members,
        nested,
    })
}

fn capitalize_first(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn declarator(ty: &ObjcType, ident: &str) -> String {
    if ty.decl.ends_with('*') {
        format!("{}{}", ty.decl, ident)
    } else {
        format!("{} {}", ty.decl, ident)
    }
}

/// `@interface` block for the header
pub(super) fn write_interface(buf: &mut SourceBuffer, class: &ResolvedClass, options: &ObjectiveCOptions) {
    let atomicity = if options.atomic { "atomic" } else { "nonatomic" };

    buf.add_line(&format!("@interface {} : {}", class.type_name, options.base_class));
    buf.blank_line();
    for member in &class.members {
        let storage = match member.ty.storage {
            Storage::Assign => "assign",
            Storage::Copy => "copy",
            Storage::Retain if options.use_arc => "strong",
            Storage::Retain => "retain",
        };
        buf.add_line(&format!(
            "@property ({}, {}) {};",
            atomicity,
            storage,
            declarator(&member.ty, &member.ident)
        ));
    }
    if !class.members.is_empty() {
        buf.blank_line();
    }
    buf.add_line("+ (instancetype)modelObjectWithDictionary:(NSDictionary *)dict;");
    buf.add_line("- (instancetype)initWithDictionary:(NSDictionary *)dict;");
    buf.add_line("- (NSDictionary *)dictionaryRepresentation;");
    buf.blank_line();
    buf.add_line("@end");
}

/// Key constants, class extension and `@implementation` block
pub(super) fn write_implementation(buf: &mut SourceBuffer, class: &ResolvedClass, options: &ObjectiveCOptions) {
    for member in &class.members {
        buf.add_line(&format!(
            "static NSString *const {} = @\"{}\";",
            member.constant,
            escape_literal(member.key, LiteralStyle::Octal)
        ));
    }
    if !class.members.is_empty() {
        buf.blank_line();
    }

    buf.add_line(&format!("@interface {} ()", class.type_name));
    buf.blank_line();
    buf.add_line("- (id)objectOrNilForKey:(id)aKey fromDictionary:(NSDictionary *)dict;");
    buf.blank_line();
    buf.add_line("@end");
    buf.blank_line();

    buf.add_line(&format!("@implementation {}", class.type_name));
    buf.blank_line();

    buf.add_line("+ (instancetype)modelObjectWithDictionary:(NSDictionary *)dict");
    buf.add_line("{");
    buf.indented(|b| {
        if options.use_arc {
            b.add_line("return [[self alloc] initWithDictionary:dict];");
        } else {
            b.add_line("return [[[self alloc] initWithDictionary:dict] autorelease];");
        }
    });
    buf.add_line("}");
    buf.blank_line();

    write_init(buf, class);
    buf.blank_line();
    write_dictionary_representation(buf, class);
    buf.blank_line();

    buf.add_line("- (NSString *)description");
    buf.add_line("{");
    buf.indented(|b| b.add_line("return [NSString stringWithFormat:@\"%@\", [self dictionaryRepresentation]];"));
    buf.add_line("}");
    buf.blank_line();

    buf.add_line("#pragma mark - Helper Method");
    buf.blank_line();
    buf.add_line("- (id)objectOrNilForKey:(id)aKey fromDictionary:(NSDictionary *)dict");
    buf.add_line("{");
    buf.indented(|b| {
        b.add_line("id object = [dict objectForKey:aKey];");
        b.add_line("return [object isEqual:[NSNull null]] ? nil : object;");
    });
    buf.add_line("}");

    if !options.use_arc {
        buf.blank_line();
        write_dealloc(buf, class);
    }

    buf.blank_line();
    buf.add_line("@end");
}

fn write_init(buf: &mut SourceBuffer, class: &ResolvedClass) {
    buf.add_line("- (instancetype)initWithDictionary:(NSDictionary *)dict");
    buf.add_line("{");
    buf.indented(|b| {
        b.add_line("self = [super init];");
        b.add_line("if (self && [dict isKindOfClass:[NSDictionary class]]) {");
        b.indented(|b| {
            for member in &class.members {
                write_member_parse(b, member);
            }
        });
        b.add_line("}");
        b.add_line("return self;");
    });
    buf.add_line("}");
}

fn write_member_parse(buf: &mut SourceBuffer, member: &Member) {
    let lookup = format!("[self objectOrNilForKey:{} fromDictionary:dict]", member.constant);
    match &member.ty.kind {
        ValueKind::Scalar { getter, .. } => {
            buf.add_line(&format!("self.{} = [{} {}];", member.ident, lookup, getter));
        }
        ValueKind::Object => {
            buf.add_line(&format!("self.{} = {};", member.ident, lookup));
        }
        ValueKind::Model(type_name) => {
            buf.add_line(&format!(
                "self.{} = [{} modelObjectWithDictionary:{}];",
                member.ident, type_name, lookup
            ));
        }
        ValueKind::ModelArray(type_name) => {
            let suffix = capitalize_first(&member.ident);
            let received = format!("received{}", suffix);
            let parsed = format!("parsed{}", suffix);
            buf.add_line(&format!("NSObject *{} = {};", received, lookup));
            buf.add_line(&format!("NSMutableArray *{} = [NSMutableArray array];", parsed));
            buf.add_line(&format!("if ([{} isKindOfClass:[NSArray class]]) {{", received));
            buf.indented(|b| {
                b.add_line(&format!("for (NSDictionary *item in (NSArray *){}) {{", received));
                b.indented(|b| {
                    b.add_line("if ([item isKindOfClass:[NSDictionary class]]) {");
                    b.indented(|b| {
                        b.add_line(&format!(
                            "[{} addObject:[{} modelObjectWithDictionary:item]];",
                            parsed, type_name
                        ));
                    });
                    b.add_line("}");
                });
                b.add_line("}");
            });
            buf.add_line(&format!("}} else if ([{} isKindOfClass:[NSDictionary class]]) {{", received));
            buf.indented(|b| {
                b.add_line(&format!(
                    "[{} addObject:[{} modelObjectWithDictionary:(NSDictionary *){}]];",
                    parsed, type_name, received
                ));
            });
            buf.add_line("}");
            buf.add_line(&format!("self.{} = [NSArray arrayWithArray:{}];", member.ident, parsed));
        }
    }
}

fn write_dictionary_representation(buf: &mut SourceBuffer, class: &ResolvedClass) {
    buf.add_line("- (NSDictionary *)dictionaryRepresentation");
    buf.add_line("{");
    buf.indented(|b| {
        b.add_line("NSMutableDictionary *mutableDict = [NSMutableDictionary dictionary];");
        for member in &class.members {
            let value = format!("self.{}", member.ident);
            match &member.ty.kind {
                ValueKind::Scalar { boxer, .. } => {
                    b.add_line(&format!(
                        "[mutableDict setValue:[NSNumber {}:{}] forKey:{}];",
                        boxer, value, member.constant
                    ));
                }
                ValueKind::Object => {
                    b.add_line(&format!("[mutableDict setValue:{} forKey:{}];", value, member.constant));
                }
                ValueKind::Model(_) => {
                    b.add_line(&format!(
                        "[mutableDict setValue:[{} dictionaryRepresentation] forKey:{}];",
                        value, member.constant
                    ));
                }
                ValueKind::ModelArray(_) => {
                    let temp = format!("tempArrayFor{}", capitalize_first(&member.ident));
                    b.add_line(&format!("NSMutableArray *{} = [NSMutableArray array];", temp));
                    b.add_line(&format!("for (NSObject *subArrayObject in {}) {{", value));
                    b.indented(|b| {
                        b.add_line("if ([subArrayObject respondsToSelector:@selector(dictionaryRepresentation)]) {");
                        b.indented(|b| {
                            b.add_line(&format!(
                                "[{} addObject:[subArrayObject performSelector:@selector(dictionaryRepresentation)]];",
                                temp
                            ));
                        });
                        b.add_line("} else {");
                        b.indented(|b| b.add_line(&format!("[{} addObject:subArrayObject];", temp)));
                        b.add_line("}");
                    });
                    b.add_line("}");
                    b.add_line(&format!(
                        "[mutableDict setValue:[NSArray arrayWithArray:{}] forKey:{}];",
                        temp, member.constant
                    ));
                }
            }
        }
        b.blank_line();
        b.add_line("return [NSDictionary dictionaryWithDictionary:mutableDict];");
    });
    buf.add_line("}");
}

fn write_dealloc(buf: &mut SourceBuffer, class: &ResolvedClass) {
    buf.add_line("- (void)dealloc");
    buf.add_line("{");
    buf.indented(|b| {
        for member in class.members.iter().filter(|m| m.ty.storage != Storage::Assign) {
            b.add_line(&format!("[_{} release];", member.ident));
        }
        b.add_line("[super dealloc];");
    });
    buf.add_line("}");
}
