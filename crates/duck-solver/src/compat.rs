//! Compatibility layer for assignability.
//!
//! `CompatChecker` applies the option-dependent rules (`strictFunctionTypes`,
//! `strictNullChecks`, excess property checks for fresh object literals)
//! before delegating to the structural `SubtypeChecker`, and caches results
//! per `(source, target)` pair. Changing an option clears the cache.

use crate::def::{NoopResolver, TypeResolver};
use crate::diagnostics::SubtypeFailureReason;
use crate::intern::TypeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::subtype::SubtypeChecker;
use crate::types::{ObjectShape, TypeData, TypeId};
use crate::utils;
use duck_common::interner::Atom;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::trace;

/// Accepts `true`/`false` as well as common string spellings of them.
pub fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

fn default_true() -> bool {
    true
}

/// Options that change assignability results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatOptions {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict_function_types: bool,
    #[serde(default = "default_true", deserialize_with = "deserialize_bool_or_string")]
    pub strict_null_checks: bool,
    #[serde(default = "default_true", deserialize_with = "deserialize_bool_or_string")]
    pub excess_property_checks: bool,
}

impl Default for CompatOptions {
    fn default() -> Self {
        CompatOptions {
            strict_function_types: false,
            strict_null_checks: true,
            excess_property_checks: true,
        }
    }
}

pub struct CompatChecker<'a, R: TypeResolver = NoopResolver> {
    interner: &'a TypeInterner,
    resolver: &'a R,
    subtype: SubtypeChecker<'a, R>,
    options: CompatOptions,
    cache: FxHashMap<(TypeId, TypeId), bool>,
}

impl<'a> CompatChecker<'a, NoopResolver> {
    pub fn new(interner: &'a TypeInterner) -> CompatChecker<'a, NoopResolver> {
        let subtype = SubtypeChecker::new(interner);
        let resolver = subtype.resolver;
        CompatChecker::from_parts(interner, resolver, subtype)
    }
}

impl<'a, R: TypeResolver> CompatChecker<'a, R> {
    pub fn with_resolver(interner: &'a TypeInterner, resolver: &'a R) -> Self {
        let subtype = SubtypeChecker::with_resolver(interner, resolver);
        CompatChecker::from_parts(interner, resolver, subtype)
    }

    fn from_parts(interner: &'a TypeInterner, resolver: &'a R, subtype: SubtypeChecker<'a, R>) -> Self {
        let mut checker = CompatChecker {
            interner,
            resolver,
            subtype,
            options: CompatOptions::default(),
            cache: FxHashMap::default(),
        };
        checker.configure_subtype();
        checker
    }

    pub fn with_options(mut self, options: CompatOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn options(&self) -> CompatOptions {
        self.options
    }

    pub fn set_options(&mut self, options: CompatOptions) {
        if self.options != options {
            self.options = options;
            self.configure_subtype();
            self.cache.clear();
        }
    }

    /// Configure strict function parameter checking.
    pub fn set_strict_function_types(&mut self, strict: bool) {
        self.set_options(CompatOptions {
            strict_function_types: strict,
            ..self.options
        });
    }

    /// Configure strict null checks (legacy null/undefined assignability).
    pub fn set_strict_null_checks(&mut self, strict: bool) {
        self.set_options(CompatOptions {
            strict_null_checks: strict,
            ..self.options
        });
    }

    pub fn set_excess_property_checks(&mut self, enabled: bool) {
        self.set_options(CompatOptions {
            excess_property_checks: enabled,
            ..self.options
        });
    }

    fn configure_subtype(&mut self) {
        self.subtype.strict_function_types = self.options.strict_function_types;
        self.subtype.strict_null_checks = self.options.strict_null_checks;
    }

    /// Number of cached results.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Check if `source` is assignable to `target` using TS compatibility rules.
    pub fn is_assignable(&mut self, source: TypeId, target: TypeId) -> bool {
        let key = (source, target);
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }

        let result = if source == target {
            true
        } else if self.options.excess_property_checks
            && self.find_excess_property(source, target).is_some()
        {
            false
        } else {
            self.subtype.is_subtype_of(source, target)
        };

        trace!(source = source.0, target = target.0, result, "assignability");
        self.cache.insert(key, result);
        result
    }

    /// Explain why `source` is not assignable to `target`, or `None` if it is.
    pub fn explain_failure(
        &mut self,
        source: TypeId,
        target: TypeId,
    ) -> Option<SubtypeFailureReason> {
        if self.options.excess_property_checks
            && let Some((property_name, target_type)) = self.find_excess_property(source, target)
        {
            return Some(SubtypeFailureReason::ExcessProperty {
                property_name,
                target_type,
            });
        }
        self.subtype.explain_failure(source, target)
    }

    /// First property of a fresh object literal `source` that `target` does
    /// not know, with the (possibly nested) target it was checked against.
    pub fn find_excess_property(&self, source: TypeId, target: TypeId) -> Option<(Atom, TypeId)> {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::ExcessPropertyCheck);
        self.find_excess_property_inner(source, target, &mut guard)
    }

    fn find_excess_property_inner(
        &self,
        source: TypeId,
        target: TypeId,
        guard: &mut RecursionGuard<(TypeId, TypeId)>,
    ) -> Option<(Atom, TypeId)> {
        let Some(TypeData::Object(s_shape_id)) = self.interner.lookup(source) else {
            return None;
        };
        let s_shape = self.interner.object_shape(s_shape_id);
        if !s_shape.is_fresh() {
            return None;
        }

        let targets = self.object_targets(target)?;
        if targets.iter().any(|t| t.string_index.is_some()) {
            return None;
        }
        // `{}` accepts any object literal.
        if let [only] = targets.as_slice()
            && only.properties.is_empty()
            && !only.has_index_signature()
        {
            return None;
        }

        let key = (source, target);
        if !guard.enter(key).is_entered() {
            return None;
        }

        let mut found = None;
        for prop in s_shape.properties_in_declaration_order() {
            let owners: Vec<_> = targets
                .iter()
                .filter_map(|t| t.find_property(prop.name))
                .collect();

            if owners.is_empty() {
                let numeric_ok = targets.iter().any(|t| t.number_index.is_some())
                    && utils::is_numeric_property_name(self.interner, prop.name);
                if !numeric_ok {
                    found = Some((prop.name, target));
                    break;
                }
                continue;
            }

            // Descend only when the property has a single declared type.
            if let [owner] = owners.as_slice()
                && let Some(nested) =
                    self.find_excess_property_inner(prop.type_id, owner.type_id, guard)
            {
                found = Some(nested);
                break;
            }
        }

        guard.leave(key);
        found
    }

    /// Object shapes the target is made of, or `None` if the target is not
    /// object-like (in which case no excess check applies).
    fn object_targets(&self, target: TypeId) -> Option<Vec<Arc<ObjectShape>>> {
        let target = self.resolve(target)?;
        match self.interner.lookup(target)? {
            TypeData::Object(shape_id) => Some(vec![self.interner.object_shape(shape_id)]),
            TypeData::Union(list_id) => {
                let members = self.interner.type_list(list_id);
                let mut shapes = Vec::new();
                for &member in members.iter() {
                    let member = self.resolve(member)?;
                    match self.interner.lookup(member)? {
                        TypeData::Object(shape_id) => {
                            shapes.push(self.interner.object_shape(shape_id));
                        }
                        // Non-object members do not know any property names.
                        TypeData::Intrinsic(_) | TypeData::Literal(_) | TypeData::Opaque(_) => {}
                        _ => return None,
                    }
                }
                (!shapes.is_empty()).then_some(shapes)
            }
            _ => None,
        }
    }

    fn resolve(&self, type_id: TypeId) -> Option<TypeId> {
        let mut current = type_id;
        // Alias chains are short; the bound guards `type A = B; type B = A`.
        for _ in 0..16 {
            match self.interner.lookup(current)? {
                TypeData::Lazy(def_id) => current = self.resolver.resolve_lazy(def_id, self.interner)?,
                _ => return Some(current),
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod tests;
