//! Subtype rules, one file per type family.
//!
//! Each file adds an `impl SubtypeChecker` block; dispatch happens in
//! `SubtypeChecker::check_subtype_inner`.

pub(crate) mod functions;
pub(crate) mod intrinsics;
pub(crate) mod objects;
pub(crate) mod unions;
