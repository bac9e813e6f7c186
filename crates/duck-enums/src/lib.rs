//! Enum registry for the duck workspace.
//!
//! - `EnumDecl`: ordered member declarations with optional initializers
//! - `EnumTable::build`: auto-increment numbering, constant evaluation of
//!   initializers, const-enum restrictions
//! - `EnumTable::lookup_value` / `EnumTable::lookup_name`: forward and
//!   reverse (numeric enums only) lookup
//! - `types`: member literal types, the enum union type and the runtime
//!   enum object shape, for use with the structural solver

pub mod decl;
pub mod error;
pub mod evaluator;
pub mod registry;
pub mod types;

pub use decl::{BinaryOp, EnumDecl, EnumInitializer, EnumKind, EnumMemberDecl, UnaryOp};
pub use error::EnumError;
pub use evaluator::{ConstantEvaluator, EnumValue};
pub use registry::{EnumRegistry, EnumTable, build};
pub use types::{enum_type, member_type, runtime_object_type};
