use super::types::{swift_type, KEYWORDS};
use crate::context::SourceBuffer;
use crate::error::WriterResult;
use crate::naming::{escape_literal, LiteralStyle};
use crate::options::{AccessLevel, SwiftOptions, SwiftTypeKind};
use crate::writer::{member_names, TypeNames};
use jsonmodeler_model::ClassModel;

/// A property resolved for emission
struct Member<'a> {
    ident: String,
    key: &'a str,
    ty: String,
    optional: bool,
}

/// Emit the declaration of one class into `buf`
pub(super) fn write_declaration(
    buf: &mut SourceBuffer,
    class: &ClassModel,
    names: &TypeNames,
    options: &SwiftOptions,
) -> WriterResult<()> {
    let type_name = names.get(class.name())?;
    let idents = member_names(class, KEYWORDS, &[], |n| n);

    let mut members = Vec::with_capacity(idents.len());
    for (property, ident) in class.properties().iter().zip(idents) {
        let ty = property.ty.clone().normalize();
        members.push(Member {
            ty: swift_type(&ty, class, &property.name, names)?,
            optional: ty.is_optional(),
            ident,
            key: &property.name,
        });
    }

    let is_class = options.type_kind != SwiftTypeKind::Struct;
    // Stored properties cannot be `open`
    let member_access = match options.access_level {
        AccessLevel::Open => AccessLevel::Public.prefix(),
        level => level.prefix(),
    };

    buf.add_line(&format!(
        "{}{} {}{} {{",
        options.access_level.prefix(),
        match options.type_kind {
            SwiftTypeKind::Struct => "struct",
            SwiftTypeKind::Class => "class",
            SwiftTypeKind::FinalClass => "final class",
        },
        type_name,
        conformances(options)
    ));

    buf.indented(|b| {
        let binding = if options.mutable_properties { "var" } else { "let" };
        for member in &members {
            b.add_line(&format!("{}{} {}: {}", member_access, binding, member.ident, member.ty));
        }

        let explicit_coding = options.codable && options.base_class.is_some();
        if options.codable && (explicit_coding || members.iter().any(|m| m.ident != m.key)) && !members.is_empty() {
            b.blank_line();
            write_coding_keys(b, &members);
        }

        if is_class || options.access_level != AccessLevel::Internal {
            b.blank_line();
            write_initializer(b, &members, options, member_access);
        }

        if explicit_coding {
            b.blank_line();
            write_decoder_init(b, &members, member_access);
            b.blank_line();
            write_encode(b, &members, member_access);
        }

        if options.equatable && is_class {
            b.blank_line();
            write_equality(b, type_name, &members, member_access);
        }
    });

    buf.add_line("}");
    Ok(())
}

fn conformances(options: &SwiftOptions) -> String {
    let mut list: Vec<&str> = Vec::new();
    if let Some(base) = &options.base_class {
        list.push(base);
    }
    if options.codable {
        list.push("Codable");
    }
    if options.equatable {
        list.push("Equatable");
    }

    if list.is_empty() {
        String::new()
    } else {
        format!(": {}", list.join(", "))
    }
}

fn write_coding_keys(buf: &mut SourceBuffer, members: &[Member]) {
    buf.add_line("enum CodingKeys: String, CodingKey {");
    buf.indented(|b| {
        for member in members {
            if member.ident == member.key {
                b.add_line(&format!("case {}", member.ident));
            } else {
                b.add_line(&format!(
                    "case {} = \"{}\"",
                    member.ident,
                    escape_literal(member.key, LiteralStyle::Swift)
                ));
            }
        }
    });
    buf.add_line("}");
}

fn write_initializer(buf: &mut SourceBuffer, members: &[Member], options: &SwiftOptions, access: &str) {
    let params: Vec<String> = members
        .iter()
        .map(|m| {
            if m.optional {
                format!("{}: {} = nil", m.ident, m.ty)
            } else {
                format!("{}: {}", m.ident, m.ty)
            }
        })
        .collect();

    let has_base = options.base_class.is_some();
    let override_kw = if has_base && members.is_empty() { "override " } else { "" };

    buf.add_line(&format!("{}{}init({}) {{", access, override_kw, params.join(", ")));
    buf.indented(|b| {
        for m in members {
            b.add_line(&format!("self.{} = {}", m.ident, m.ident));
        }
        if has_base {
            b.add_line("super.init()");
        }
    });
    buf.add_line("}");
}

fn write_decoder_init(buf: &mut SourceBuffer, members: &[Member], access: &str) {
    buf.add_line(&format!("{}required init(from decoder: Decoder) throws {{", access));
    buf.indented(|b| {
        if !members.is_empty() {
            b.add_line("let container = try decoder.container(keyedBy: CodingKeys.self)");
        }
        for m in members {
            if m.optional {
                let inner = m.ty.strip_suffix('?').unwrap_or(&m.ty);
                b.add_line(&format!(
                    "{} = try container.decodeIfPresent({}.self, forKey: .{})",
                    m.ident, inner, m.ident
                ));
            } else {
                b.add_line(&format!(
                    "{} = try container.decode({}.self, forKey: .{})",
                    m.ident, m.ty, m.ident
                ));
            }
        }
        b.add_line("try super.init(from: decoder)");
    });
    buf.add_line("}");
}

fn write_encode(buf: &mut SourceBuffer, members: &[Member], access: &str) {
    buf.add_line(&format!("{}override func encode(to encoder: Encoder) throws {{", access));
    buf.indented(|b| {
        if !members.is_empty() {
            b.add_line("var container = encoder.container(keyedBy: CodingKeys.self)");
        }
        for m in members {
            let method = if m.optional { "encodeIfPresent" } else { "encode" };
            b.add_line(&format!("try container.{}({}, forKey: .{})", method, m.ident, m.ident));
        }
        b.add_line("try super.encode(to: encoder)");
    });
    buf.add_line("}");
}

fn write_equality(buf: &mut SourceBuffer, type_name: &str, members: &[Member], access: &str) {
    buf.add_line(&format!(
        "{}static func == (lhs: {}, rhs: {}) -> Bool {{",
        access, type_name, type_name
    ));
    buf.indented(|b| {
        if members.is_empty() {
            b.add_line("return true");
            return;
        }
        for (i, m) in members.iter().enumerate() {
            let comparison = format!("lhs.{} == rhs.{}", m.ident, m.ident);
            if i == 0 {
                b.add_line(&format!("return {}", comparison));
            } else {
                b.add_line(&format!("    && {}", comparison));
            }
        }
    });
    buf.add_line("}");
}
