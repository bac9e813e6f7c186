//! Union subtyping.
//!
//! - `A | B <: T` iff every member is assignable to `T`
//! - `S <: A | B` iff `S` is assignable to at least one member

use crate::def::TypeResolver;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::{TypeId, TypeListId};

impl<'a, R: TypeResolver> SubtypeChecker<'a, R> {
    pub(crate) fn check_union_source_subtype(
        &mut self,
        members: TypeListId,
        target: TypeId,
    ) -> SubtypeResult {
        let members = self.interner.type_list(members);
        for &member in members.iter() {
            let result = self.check_subtype(member, target);
            if !result.is_true() {
                return result;
            }
        }
        SubtypeResult::True
    }

    pub(crate) fn check_union_target_subtype(
        &mut self,
        source: TypeId,
        members: TypeListId,
    ) -> SubtypeResult {
        let members = self.interner.type_list(members);
        if members.contains(&source) {
            return SubtypeResult::True;
        }

        let mut exhausted = false;
        for &member in members.iter() {
            match self.check_subtype(source, member) {
                result if result.is_true() => return result,
                SubtypeResult::DepthExceeded => exhausted = true,
                _ => {}
            }
        }

        if exhausted {
            SubtypeResult::DepthExceeded
        } else {
            SubtypeResult::False
        }
    }
}
