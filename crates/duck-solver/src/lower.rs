//! Lowering of `TypeRef` trees into interned types.
//!
//! Lowering is where the value-model invariants are enforced: field names
//! are unique per shape, optional parameters form a suffix of the fixed
//! parameters, and a rest parameter comes last and has an array type.
//! References are resolved against an optional [`TypeEnvironment`]; they
//! lower to `Lazy` types and are only followed during subtype checking.

use crate::def::TypeEnvironment;
use crate::intern::TypeInterner;
use crate::recursion::{DepthCounter, RecursionProfile};
use crate::type_ref::{FunctionSignature, LiteralRef, ShapeDescriptor, TypeRef};
use crate::types::{
    FunctionShape, IndexSignature, IntrinsicKind, ObjectFlags, ObjectShape, ParamInfo,
    PropertyInfo, TypeData, TypeId,
};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTypeRef {
    #[error("duplicate field '{0}' in shape")]
    DuplicateField(String),
    #[error("required parameter at position {0} follows an optional parameter")]
    RequiredParameterAfterOptional(usize),
    #[error("rest parameter at position {0} is not the last parameter")]
    RestParameterNotLast(usize),
    #[error("rest parameter must have an array type")]
    RestParameterNotArray,
    #[error("cannot find type '{0}'")]
    UnresolvedReference(String),
    #[error("type is nested too deeply")]
    TooDeep,
}

pub struct TypeLowering<'a> {
    interner: &'a TypeInterner,
    env: Option<&'a TypeEnvironment>,
    depth: DepthCounter,
}

impl<'a> TypeLowering<'a> {
    /// Lowering without declarations: every `Ref` is unresolved.
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeLowering {
            interner,
            env: None,
            depth: DepthCounter::with_profile(RecursionProfile::TypeLowering),
        }
    }

    pub fn with_environment(interner: &'a TypeInterner, env: &'a TypeEnvironment) -> Self {
        TypeLowering {
            env: Some(env),
            ..Self::new(interner)
        }
    }

    pub fn lower(&mut self, type_ref: &TypeRef) -> Result<TypeId, MalformedTypeRef> {
        if !self.depth.enter() {
            debug!("type lowering exceeded depth limit");
            return Err(MalformedTypeRef::TooDeep);
        }
        let result = self.lower_inner(type_ref);
        self.depth.leave();
        result
    }

    fn lower_inner(&mut self, type_ref: &TypeRef) -> Result<TypeId, MalformedTypeRef> {
        match type_ref {
            TypeRef::Primitive { name } => Ok(match IntrinsicKind::from_name(name) {
                Some(kind) => kind.type_id(),
                None => self.interner.opaque(name),
            }),
            TypeRef::Literal { value } => Ok(match value {
                LiteralRef::Boolean(b) => self.interner.literal_boolean(*b),
                LiteralRef::Number(n) => self.interner.literal_number(*n),
                LiteralRef::String(s) => self.interner.literal_string(s),
            }),
            TypeRef::Shape(shape) => self.lower_shape(shape),
            TypeRef::Function(sig) => self.lower_function(sig),
            TypeRef::Array { element } => {
                let element = self.lower(element)?;
                Ok(self.interner.array(element))
            }
            TypeRef::Union { members } => {
                let members = members
                    .iter()
                    .map(|m| self.lower(m))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.interner.union(members))
            }
            TypeRef::Ref { name } => {
                let def_id = self
                    .env
                    .and_then(|env| env.lookup(name))
                    .ok_or_else(|| MalformedTypeRef::UnresolvedReference(name.clone()))?;
                Ok(self.interner.lazy(def_id))
            }
            TypeRef::Any => Ok(TypeId::ANY),
            TypeRef::Unknown => Ok(TypeId::UNKNOWN),
            TypeRef::Void => Ok(TypeId::VOID),
            TypeRef::Never => Ok(TypeId::NEVER),
        }
    }

    fn lower_shape(&mut self, shape: &ShapeDescriptor) -> Result<TypeId, MalformedTypeRef> {
        let mut seen = FxHashSet::default();
        let mut properties = Vec::with_capacity(shape.fields.len());

        for field in &shape.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(MalformedTypeRef::DuplicateField(field.name.clone()));
            }
            let type_id = self.lower(&field.ty)?;
            let is_method = matches!(&field.ty, TypeRef::Function(sig) if sig.method);
            properties.push(PropertyInfo {
                name: self.interner.intern_string(&field.name),
                type_id,
                optional: field.optional,
                readonly: field.readonly,
                is_method,
                visibility: field.visibility,
                parent_id: field
                    .origin
                    .as_deref()
                    .map(|origin| self.interner.intern_string(origin)),
                declaration_order: properties.len() as u32,
            });
        }

        let string_index = match &shape.string_index {
            Some(value) => Some(IndexSignature {
                key_type: TypeId::STRING,
                value_type: self.lower(value)?,
                readonly: false,
            }),
            None => None,
        };
        let number_index = match &shape.number_index {
            Some(value) => Some(IndexSignature {
                key_type: TypeId::NUMBER,
                value_type: self.lower(value)?,
                readonly: false,
            }),
            None => None,
        };

        let flags = if shape.fresh {
            ObjectFlags::FRESH_LITERAL
        } else {
            ObjectFlags::empty()
        };

        Ok(self.interner.object_with_shape(ObjectShape {
            flags,
            properties,
            string_index,
            number_index,
        }))
    }

    fn lower_function(&mut self, sig: &FunctionSignature) -> Result<TypeId, MalformedTypeRef> {
        let last = sig.params.len().saturating_sub(1);
        let mut seen_optional = false;
        let mut params = Vec::with_capacity(sig.params.len());

        for (idx, param) in sig.params.iter().enumerate() {
            if param.rest && idx != last {
                return Err(MalformedTypeRef::RestParameterNotLast(idx));
            }
            if !param.rest {
                if param.optional {
                    seen_optional = true;
                } else if seen_optional {
                    return Err(MalformedTypeRef::RequiredParameterAfterOptional(idx));
                }
            }

            let type_id = self.lower(&param.ty)?;
            if param.rest && !self.is_array_like(type_id) {
                return Err(MalformedTypeRef::RestParameterNotArray);
            }

            params.push(ParamInfo {
                name: param
                    .name
                    .as_deref()
                    .map(|name| self.interner.intern_string(name)),
                type_id,
                optional: param.optional && !param.rest,
                rest: param.rest,
            });
        }

        let return_type = self.lower(&sig.return_type)?;
        Ok(self.interner.function(FunctionShape {
            params,
            return_type,
            is_method: sig.method,
        }))
    }

    /// Arrays, `any`, and references (checked when resolved).
    fn is_array_like(&self, type_id: TypeId) -> bool {
        matches!(
            self.interner.lookup(type_id),
            Some(TypeData::Array(_) | TypeData::Lazy(_) | TypeData::Intrinsic(IntrinsicKind::Any))
        )
    }
}

/// Build an environment from named declarations.
///
/// Every name is declared before any body is lowered, so declarations may
/// refer to each other (and to themselves) in any order.
pub fn build_environment<'d>(
    interner: &TypeInterner,
    declarations: impl IntoIterator<Item = (&'d str, &'d TypeRef)>,
) -> Result<TypeEnvironment, MalformedTypeRef> {
    let declarations: Vec<_> = declarations.into_iter().collect();
    let mut env = TypeEnvironment::new();
    for (name, _) in &declarations {
        env.declare(name);
    }

    let mut bodies = Vec::with_capacity(declarations.len());
    {
        let mut lowering = TypeLowering::with_environment(interner, &env);
        for (name, type_ref) in &declarations {
            let body = lowering.lower(type_ref)?;
            trace!(name, body = body.0, "lowered declaration");
            bodies.push((*name, body));
        }
    }

    for (name, body) in bodies {
        if let Some(def_id) = env.lookup(name) {
            env.define(def_id, body);
        }
    }
    Ok(env)
}

#[cfg(test)]
#[path = "../tests/lower_tests.rs"]
mod tests;
