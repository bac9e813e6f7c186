//! Centralized limits and thresholds.
//!
//! Shared constants for recursion depths and capacity limits used across the
//! workspace. Keeping them here prevents duplicate definitions with
//! inconsistent values.
//!
//! # Solver recursion limits
//!
//! Recursion limits for subtype checking live in
//! [`duck_solver::recursion::RecursionProfile`] rather than here; the
//! profiles are the single source of truth for solver recursion.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of a `TypeRef` tree accepted by lowering.
///
/// Lowering is recursive over the caller-provided value tree. Anything nested
/// deeper than this is rejected as malformed instead of risking the stack.
///
/// ```typescript
/// // Each `{ next: ... }` adds one level:
/// type Deep = { next: { next: { next: { /* ... 500 levels ... */ } } } };
/// ```
pub const MAX_LOWERING_DEPTH: u32 = 500;

/// Maximum depth for printing a type.
///
/// The formatter stops expanding and prints `...` past this depth. Named
/// references are printed by name, so only anonymous nesting counts.
pub const MAX_FORMAT_DEPTH: u32 = 32;

/// Maximum nesting depth of a constant enum initializer expression.
///
/// ```typescript
/// enum E { A = ((((((1 + 2) * 3) << 4) | 5) - 6) /* ... */) }
/// ```
pub const MAX_ENUM_INITIALIZER_DEPTH: u32 = 100;

/// Maximum nesting depth of a failure explanation.
///
/// `PropertyTypeMismatch` reasons nest one level per property path segment.
pub const MAX_EXPLAIN_DEPTH: u32 = 16;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum size of a recursion guard's visiting set.
pub const MAX_VISITING_SET_SIZE: u32 = 10_000;

/// Inline capacity for small type lists (union members, parameter types).
pub const TYPE_LIST_INLINE: usize = 8;

/// Number of union members listed in a diagnostic before eliding the rest.
pub const UNION_MEMBER_DIAGNOSTIC_LIMIT: usize = 3;
