use super::types::{java_type, Comparison, JavaType, KEYWORDS};
use crate::context::SourceBuffer;
use crate::error::WriterResult;
use crate::naming::{
    escape_literal, screaming_snake_case, to_words, IdentifierAllocator, LiteralStyle,
};
use crate::options::JavaOptions;
use crate::writer::{member_names, TypeNames};
use jsonmodeler_model::ClassModel;

struct Field<'a> {
    ident: String,
    key: &'a str,
    /// `KEY_*` constant holding the JSON key
    constant: String,
    getter: String,
    ty: JavaType,
}

impl Field<'_> {
    fn accessor_suffix(&self) -> String {
        let mut chars = self.ident.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    fn default_getter(&self) -> String {
        let prefix = if self.ty.is_boolean() { "is" } else { "get" };
        format!("{}{}", prefix, self.accessor_suffix())
    }

    /// `isActive` instead of `isIsActive` for booleans already named as a
    /// question
    fn question_getter(&self) -> Option<&str> {
        let words = to_words(&self.ident);
        (self.ty.is_boolean() && words.len() > 1 && words[0] == "is").then_some(self.ident.as_str())
    }
}

/// Imports a class body needs
pub(super) struct Imports {
    pub list: bool,
    pub objects: bool,
}

/// Emit the class declaration into `buf` and report the imports it uses
pub(super) fn write_class(
    buf: &mut SourceBuffer,
    class: &ClassModel,
    names: &TypeNames,
    options: &JavaOptions,
) -> WriterResult<Imports> {
    let type_name = names.get(class.name())?;
    let idents = member_names(class, KEYWORDS, &[], |n| n);

    let mut constants = IdentifierAllocator::new();
    let mut fields = Vec::with_capacity(idents.len());
    for (property, ident) in class.properties().iter().zip(idents) {
        fields.push(Field {
            ty: java_type(&property.ty.clone().normalize(), class, &property.name, names)?,
            constant: constants.allocate(format!("KEY_{}", screaming_snake_case(&ident))),
            getter: String::new(),
            key: &property.name,
            ident,
        });
    }
    assign_getters(&mut fields);

    let extends = options
        .base_class
        .as_ref()
        .map(|base| format!(" extends {}", base))
        .unwrap_or_default();
    buf.add_line(&format!("public class {}{} {{", type_name, extends));

    buf.indented(|b| {
        if !fields.is_empty() {
            b.blank_line();
            for field in &fields {
                b.add_line(&format!(
                    "public static final String {} = \"{}\";",
                    field.constant,
                    escape_literal(field.key, LiteralStyle::Octal)
                ));
            }
        }

        let modifier = if options.immutable { "private final" } else { "private" };
        if !fields.is_empty() {
            b.blank_line();
            for field in &fields {
                b.add_line(&format!("{} {} {};", modifier, field.ty.name, field.ident));
            }
        }

        // Final fields must be assigned, so only mutable classes get a no-arg constructor
        if !options.immutable || fields.is_empty() {
            b.blank_line();
            b.add_line(&format!("public {}() {{", type_name));
            b.add_line("}");
        }
        if !fields.is_empty() {
            b.blank_line();
            write_constructor(b, type_name, &fields);
        }

        for field in &fields {
            b.blank_line();
            b.add_line(&format!("public {} {}() {{", field.ty.name, field.getter));
            b.indented(|b| b.add_line(&format!("return {};", field.ident)));
            b.add_line("}");

            if options.generate_setters && !options.immutable {
                b.blank_line();
                b.add_line(&format!(
                    "public void set{}({} {}) {{",
                    field.accessor_suffix(),
                    field.ty.name,
                    field.ident
                ));
                b.indented(|b| b.add_line(&format!("this.{} = {};", field.ident, field.ident)));
                b.add_line("}");
            }
        }

        b.blank_line();
        write_equals(b, type_name, &fields);
        b.blank_line();
        write_hash_code(b, &fields);
    });

    buf.add_line("}");

    Ok(Imports {
        list: fields.iter().any(|f| f.ty.uses_list),
        objects: !fields.is_empty(),
    })
}

/// Default getters, shortened for `is…` booleans unless that would
/// clash with another field's getter
fn assign_getters(fields: &mut [Field]) {
    let defaults: Vec<String> = fields.iter().map(Field::default_getter).collect();
    for (i, field) in fields.iter_mut().enumerate() {
        let short = field
            .question_getter()
            .filter(|short| !defaults.iter().enumerate().any(|(j, g)| j != i && g == short))
            .map(str::to_string);
        field.getter = short.unwrap_or_else(|| defaults[i].clone());
    }
}

fn write_constructor(buf: &mut SourceBuffer, type_name: &str, fields: &[Field]) {
    let params: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.ty.name, f.ident))
        .collect();
    buf.add_line(&format!("public {}({}) {{", type_name, params.join(", ")));
    buf.indented(|b| {
        for field in fields {
            b.add_line(&format!("this.{} = {};", field.ident, field.ident));
        }
    });
    buf.add_line("}");
}

fn write_equals(buf: &mut SourceBuffer, type_name: &str, fields: &[Field]) {
    buf.add_line("@Override");
    buf.add_line("public boolean equals(Object o) {");
    buf.indented(|b| {
        b.add_line("if (this == o) {");
        b.indented(|b| b.add_line("return true;"));
        b.add_line("}");
        b.add_line("if (o == null || getClass() != o.getClass()) {");
        b.indented(|b| b.add_line("return false;"));
        b.add_line("}");

        if fields.is_empty() {
            b.add_line("return true;");
            return;
        }

        b.add_line(&format!("{} that = ({}) o;", type_name, type_name));
        for (i, field) in fields.iter().enumerate() {
            let comparison = match field.ty.comparison {
                Comparison::Primitive => format!("this.{} == that.{}", field.ident, field.ident),
                Comparison::FloatingPoint => {
                    format!("Double.compare(this.{}, that.{}) == 0", field.ident, field.ident)
                }
                Comparison::Object => {
                    format!("Objects.equals(this.{}, that.{})", field.ident, field.ident)
                }
            };
            let terminator = if i + 1 == fields.len() { ";" } else { "" };
            if i == 0 {
                b.add_line(&format!("return {}{}", comparison, terminator));
            } else {
                b.add_line(&format!("        && {}{}", comparison, terminator));
            }
        }
    });
    buf.add_line("}");
}

fn write_hash_code(buf: &mut SourceBuffer, fields: &[Field]) {
    buf.add_line("@Override");
    buf.add_line("public int hashCode() {");
    buf.indented(|b| {
        if fields.is_empty() {
            b.add_line("return 0;");
        } else {
            let idents: Vec<&str> = fields.iter().map(|f| f.ident.as_str()).collect();
            b.add_line(&format!("return Objects.hash({});", idents.join(", ")));
        }
    });
    buf.add_line("}");
}
