//! Structural type compatibility solver.
//!
//! Types are described as `TypeRef` value trees, lowered into a hash-consed
//! `TypeInterner`, and compared by a recursive structural predicate with
//! coinductive cycle handling:
//!
//! - O(1) type equality via interning (`TypeId` comparison)
//! - Named, mutually recursive declarations via `TypeEnvironment` and `Lazy` types
//! - TypeScript's option-dependent rules in `CompatChecker`
//! - Structured failure reasons rendered as TypeScript diagnostics

mod compat;
pub mod def;
mod diagnostics;
mod format;
mod intern;
mod lower;
pub mod recursion;
mod subtype;
mod subtype_explain;
mod subtype_rules;
pub mod type_ref;
pub mod types;
pub mod utils;

pub use compat::{CompatChecker, CompatOptions, deserialize_bool_or_string};
pub use def::{DefId, NoopResolver, TypeEnvironment, TypeResolver};
pub use diagnostics::SubtypeFailureReason;
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use lower::{MalformedTypeRef, TypeLowering, build_environment};
pub use subtype::{SubtypeChecker, SubtypeResult, is_subtype_of};
pub use type_ref::{FieldSpec, FunctionSignature, LiteralRef, ParamSpec, ShapeDescriptor, TypeRef};
pub use types::{
    FunctionShape, IndexSignature, IntrinsicKind, LiteralValue, ObjectFlags, ObjectShape,
    OrderedFloat, ParamInfo, PropertyInfo, TypeData, TypeId, Visibility,
};

use tracing::debug;

/// Whether a value of type `source` may be used where `target` is expected,
/// with default options and no named declarations.
///
/// Malformed inputs (including any `Ref`) are not assignable.
pub fn is_assignable(source: &TypeRef, target: &TypeRef) -> bool {
    is_assignable_with_options(source, target, CompatOptions::default())
}

pub fn is_assignable_with_options(
    source: &TypeRef,
    target: &TypeRef,
    options: CompatOptions,
) -> bool {
    let interner = TypeInterner::new();
    let mut lowering = TypeLowering::new(&interner);
    let (source, target) = match (lowering.lower(source), lowering.lower(target)) {
        (Ok(source), Ok(target)) => (source, target),
        (Err(err), _) | (_, Err(err)) => {
            debug!(%err, "malformed type in assignability query");
            return false;
        }
    };
    CompatChecker::new(&interner)
        .with_options(options)
        .is_assignable(source, target)
}

#[cfg(test)]
#[path = "../tests/assignability_tests.rs"]
mod assignability_tests;

#[cfg(test)]
#[path = "../tests/cycle_tests.rs"]
mod cycle_tests;

#[cfg(test)]
#[path = "../tests/concurrent_tests.rs"]
mod concurrent_tests;
