//! Printing types in TypeScript syntax for diagnostics.

use crate::def::TypeResolver;
use crate::intern::TypeInterner;
use crate::recursion::{DepthCounter, RecursionProfile};
use crate::types::{FunctionShape, LiteralValue, ObjectShape, TypeData, TypeId, Visibility};
use crate::utils;
use duck_common::interner::Atom;

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
    resolver: Option<&'a dyn TypeResolver>,
    depth: DepthCounter,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeFormatter {
            interner,
            resolver: None,
            depth: DepthCounter::with_profile(RecursionProfile::TypeFormatting),
        }
    }

    /// Named references print as their declaration name.
    pub fn with_resolver(interner: &'a TypeInterner, resolver: &'a dyn TypeResolver) -> Self {
        TypeFormatter {
            resolver: Some(resolver),
            ..Self::new(interner)
        }
    }

    pub fn format(&mut self, type_id: TypeId) -> String {
        if !self.depth.enter() {
            return "...".to_string();
        }
        let text = self.format_inner(type_id);
        self.depth.leave();
        text
    }

    pub fn format_atom(&self, atom: Atom) -> String {
        self.interner.resolve_atom(atom).to_string()
    }

    fn format_inner(&mut self, type_id: TypeId) -> String {
        let Some(data) = self.interner.lookup(type_id) else {
            return format!("<type {}>", type_id.0);
        };
        match data {
            TypeData::Intrinsic(kind) => kind.name().to_string(),
            TypeData::Opaque(name) => self.format_atom(name),
            TypeData::Literal(literal) => self.format_literal(literal),
            TypeData::Object(shape_id) => {
                let shape = self.interner.object_shape(shape_id);
                self.format_object(&shape)
            }
            TypeData::Function(shape_id) => {
                let shape = self.interner.function_shape(shape_id);
                self.format_function(&shape)
            }
            TypeData::Array(element) => {
                let needs_parens = matches!(
                    self.interner.lookup(element),
                    Some(TypeData::Union(_) | TypeData::Function(_))
                );
                let element = self.format(element);
                if needs_parens {
                    format!("({element})[]")
                } else {
                    format!("{element}[]")
                }
            }
            TypeData::Union(list_id) => {
                let members = self.interner.type_list(list_id);
                members
                    .iter()
                    .map(|&m| self.format(m))
                    .collect::<Vec<_>>()
                    .join(" | ")
            }
            TypeData::Lazy(def_id) => self
                .resolver
                .and_then(|resolver| resolver.def_name(def_id))
                .map(str::to_string)
                .unwrap_or_else(|| format!("<def {}>", def_id.0)),
        }
    }

    fn format_literal(&self, literal: LiteralValue) -> String {
        match literal {
            LiteralValue::String(atom) => format!("\"{}\"", self.interner.resolve_atom(atom)),
            LiteralValue::Number(n) => utils::js_number_to_string(n.0),
            LiteralValue::Boolean(b) => b.to_string(),
        }
    }

    fn format_object(&mut self, shape: &ObjectShape) -> String {
        let mut members = Vec::with_capacity(shape.properties.len() + 2);
        for prop in shape.properties_in_declaration_order() {
            let mut member = String::new();
            match prop.visibility {
                Visibility::Public => {}
                Visibility::Protected => member.push_str("protected "),
                Visibility::Private => member.push_str("private "),
            }
            if prop.readonly {
                member.push_str("readonly ");
            }
            member.push_str(&self.format_atom(prop.name));
            if prop.optional {
                member.push('?');
            }
            member.push_str(": ");
            member.push_str(&self.format(prop.type_id));
            members.push(member);
        }
        if let Some(index) = &shape.string_index {
            members.push(format!("[key: string]: {}", self.format(index.value_type)));
        }
        if let Some(index) = &shape.number_index {
            members.push(format!("[index: number]: {}", self.format(index.value_type)));
        }

        if members.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {}; }}", members.join("; "))
        }
    }

    fn format_function(&mut self, shape: &FunctionShape) -> String {
        let params = shape
            .params
            .iter()
            .enumerate()
            .map(|(idx, param)| {
                let name = param
                    .name
                    .map(|name| self.format_atom(name))
                    .unwrap_or_else(|| format!("arg{idx}"));
                let ty = self.format(param.type_id);
                if param.rest {
                    format!("...{name}: {ty}")
                } else if param.optional {
                    format!("{name}?: {ty}")
                } else {
                    format!("{name}: {ty}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("({params}) => {}", self.format(shape.return_type))
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
