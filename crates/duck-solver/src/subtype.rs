//! Structural subtype checking.
//!
//! `SubtypeChecker` answers "is `source` assignable to `target`" over
//! interned types. It is a recursive predicate with a coinductive cycle
//! guard: a `(source, target)` pair met again while it is still being
//! compared is assumed to hold. The guard also bounds depth and total work;
//! running out of budget answers `false`.
//!
//! The per-kind rules live in `subtype_rules/` as further `impl` blocks.

use crate::def::{NoopResolver, TypeResolver};
use crate::intern::TypeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{IntrinsicKind, TypeData, TypeId};
use tracing::{debug, trace};

/// Outcome of a single subtype query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtypeResult {
    True,
    False,
    /// The pair was already under comparison; assumed related.
    CycleDetected,
    /// The recursion budget ran out; treated as unrelated.
    DepthExceeded,
}

impl SubtypeResult {
    #[inline]
    pub fn is_true(self) -> bool {
        matches!(self, SubtypeResult::True | SubtypeResult::CycleDetected)
    }

    #[inline]
    pub fn is_false(self) -> bool {
        !self.is_true()
    }

    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            SubtypeResult::True
        } else {
            SubtypeResult::False
        }
    }
}

static NOOP_RESOLVER: NoopResolver = NoopResolver;

pub struct SubtypeChecker<'a, R: TypeResolver = NoopResolver> {
    pub(crate) interner: &'a TypeInterner,
    pub(crate) resolver: &'a R,
    pub(crate) guard: RecursionGuard<(TypeId, TypeId)>,
    /// Compare function parameters contravariantly (methods excepted).
    pub strict_function_types: bool,
    /// When off, `null` and `undefined` are assignable to every type but `never`.
    pub strict_null_checks: bool,
}

impl<'a> SubtypeChecker<'a, NoopResolver> {
    pub fn new(interner: &'a TypeInterner) -> SubtypeChecker<'a, NoopResolver> {
        SubtypeChecker::with_resolver(interner, &NOOP_RESOLVER)
    }
}

impl<'a, R: TypeResolver> SubtypeChecker<'a, R> {
    pub fn with_resolver(interner: &'a TypeInterner, resolver: &'a R) -> Self {
        SubtypeChecker {
            interner,
            resolver,
            guard: RecursionGuard::with_profile(RecursionProfile::SubtypeCheck),
            strict_function_types: false,
            strict_null_checks: true,
        }
    }

    pub fn with_strict_function_types(mut self, strict: bool) -> Self {
        self.strict_function_types = strict;
        self
    }

    pub fn with_strict_null_checks(mut self, strict: bool) -> Self {
        self.strict_null_checks = strict;
        self
    }

    /// Top-level query. Resets the recursion budget.
    pub fn is_subtype_of(&mut self, source: TypeId, target: TypeId) -> bool {
        self.guard.reset();
        let result = self.check_subtype(source, target);
        trace!(
            source = source.0,
            target = target.0,
            ?result,
            "subtype query"
        );
        result.is_true()
    }

    /// Recursive entry point used by the rules.
    pub fn check_subtype(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        if source == target {
            return SubtypeResult::True;
        }
        if source == TypeId::NEVER {
            return SubtypeResult::True;
        }
        if source == TypeId::ANY || target == TypeId::ANY || target == TypeId::UNKNOWN {
            return SubtypeResult::True;
        }
        // A named side may still resolve to `never` or `unknown`; these
        // shortcuts only hold once the other side is not a reference.
        if target == TypeId::NEVER && !self.is_lazy(source) {
            return SubtypeResult::False;
        }
        if source == TypeId::UNKNOWN && !self.is_lazy(target) {
            return SubtypeResult::False;
        }
        if !self.strict_null_checks && source.is_nullish() && !self.is_lazy(target) {
            return SubtypeResult::True;
        }

        let key = (source, target);
        match self.guard.enter(key) {
            RecursionResult::Entered => {
                let result = self.check_subtype_inner(source, target);
                self.guard.leave(key);
                result
            }
            RecursionResult::Cycle => {
                trace!(source = source.0, target = target.0, "assuming cyclic pair related");
                SubtypeResult::CycleDetected
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                debug!(
                    source = source.0,
                    target = target.0,
                    depth = self.guard.depth(),
                    iterations = self.guard.iterations(),
                    "subtype recursion budget exhausted"
                );
                SubtypeResult::DepthExceeded
            }
        }
    }

    fn check_subtype_inner(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        let (Some(s_resolved), Some(t_resolved)) =
            (self.resolve_lazy(source), self.resolve_lazy(target))
        else {
            return SubtypeResult::False;
        };
        if s_resolved != source || t_resolved != target {
            return self.check_subtype(s_resolved, t_resolved);
        }

        let (Some(s_data), Some(t_data)) =
            (self.interner.lookup(source), self.interner.lookup(target))
        else {
            return SubtypeResult::False;
        };

        if let TypeData::Union(members) = s_data {
            return self.check_union_source_subtype(members, target);
        }
        if let TypeData::Union(members) = t_data {
            return self.check_union_target_subtype(source, members);
        }

        match (s_data, t_data) {
            (TypeData::Object(s_shape), TypeData::Object(t_shape)) => {
                let s_shape = self.interner.object_shape(s_shape);
                let t_shape = self.interner.object_shape(t_shape);
                self.check_object_subtype(&s_shape, &t_shape)
            }
            (TypeData::Function(s_fn), TypeData::Function(t_fn)) => {
                let s_fn = self.interner.function_shape(s_fn);
                let t_fn = self.interner.function_shape(t_fn);
                self.check_function_subtype(&s_fn, &t_fn)
            }
            (TypeData::Array(s_elem), TypeData::Array(t_elem)) => {
                self.check_subtype(s_elem, t_elem)
            }
            (
                TypeData::Function(_)
                | TypeData::Array(_)
                | TypeData::Intrinsic(IntrinsicKind::Object),
                TypeData::Object(t_shape),
            ) => {
                let t_shape = self.interner.object_shape(t_shape);
                SubtypeResult::from_bool(self.is_empty_like_shape(&t_shape))
            }
            _ => self.check_intrinsic_subtype(s_data, target),
        }
    }

    fn is_lazy(&self, type_id: TypeId) -> bool {
        matches!(self.interner.lookup(type_id), Some(TypeData::Lazy(_)))
    }

    /// Follow a `Lazy` reference to its body. `None` if it cannot be resolved.
    pub(crate) fn resolve_lazy(&self, type_id: TypeId) -> Option<TypeId> {
        match self.interner.lookup(type_id) {
            Some(TypeData::Lazy(def_id)) => self.resolver.resolve_lazy(def_id, self.interner),
            Some(_) => Some(type_id),
            None => None,
        }
    }
}

/// Check assignability with default options and no declarations.
pub fn is_subtype_of(interner: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    SubtypeChecker::new(interner).is_subtype_of(source, target)
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
