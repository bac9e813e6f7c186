//! Intrinsic and literal subtyping.
//!
//! By the time these rules run, `any`, `unknown`, `never`, identical ids and
//! (without strict null checks) nullish sources have been handled.

use crate::def::TypeResolver;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::{IntrinsicKind, TypeData, TypeId};

impl<'a, R: TypeResolver> SubtypeChecker<'a, R> {
    /// Rules for a target that is an intrinsic or literal, or for any pair
    /// the structural rules did not claim.
    ///
    /// - `"a"` <: `string`, `1` <: `number`, `true` <: `boolean`
    /// - `undefined` <: `void`
    /// - objects, functions and arrays <: `object`
    /// - opaque primitives are equal only to themselves
    pub(crate) fn check_intrinsic_subtype(
        &mut self,
        source: TypeData,
        target: TypeId,
    ) -> SubtypeResult {
        if target == TypeId::OBJECT {
            return SubtypeResult::from_bool(matches!(
                source,
                TypeData::Object(_) | TypeData::Function(_) | TypeData::Array(_)
            ));
        }

        match source {
            TypeData::Literal(literal) => SubtypeResult::from_bool(literal.widened() == target),
            TypeData::Intrinsic(IntrinsicKind::Undefined) => {
                SubtypeResult::from_bool(target == TypeId::VOID)
            }
            _ => SubtypeResult::False,
        }
    }
}
