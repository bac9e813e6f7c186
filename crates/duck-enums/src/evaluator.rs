//! Constant evaluation of enum member initializers.
//!
//! Arithmetic follows JavaScript number semantics: bitwise operators work on
//! int32 (`>>>` on uint32), shift counts are masked to five bits, and `+`
//! concatenates when either operand is a string. Anything that is not a
//! constant expression evaluates to `EnumValue::Computed`.

use crate::decl::{BinaryOp, EnumInitializer, UnaryOp};
use crate::error::EnumError;
use duck_solver::recursion::{DepthCounter, RecursionProfile};
use duck_solver::utils::js_number_to_string;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// The value of an enum member.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    Number(f64),
    String(String),
    /// Known only at runtime (a computed initializer, or one that depends on
    /// a computed member).
    Computed,
}

impl EnumValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EnumValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnumValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, EnumValue::String(_))
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Number(n) => f.write_str(&js_number_to_string(*n)),
            EnumValue::String(s) => write!(f, "\"{s}\""),
            EnumValue::Computed => f.write_str("<computed>"),
        }
    }
}

/// Evaluates one member's initializer against the members declared before it.
pub struct ConstantEvaluator<'a> {
    enum_name: &'a str,
    member: &'a str,
    earlier: &'a IndexMap<String, EnumValue>,
    depth: DepthCounter,
}

impl<'a> ConstantEvaluator<'a> {
    pub fn new(
        enum_name: &'a str,
        member: &'a str,
        earlier: &'a IndexMap<String, EnumValue>,
    ) -> Self {
        ConstantEvaluator {
            enum_name,
            member,
            earlier,
            depth: DepthCounter::with_profile(RecursionProfile::EnumInitializer),
        }
    }

    pub fn evaluate(&mut self, initializer: &EnumInitializer) -> Result<EnumValue, EnumError> {
        if !self.depth.enter() {
            debug!(
                enum_name = self.enum_name,
                member = self.member,
                "initializer nests too deeply, treating as computed"
            );
            return Ok(EnumValue::Computed);
        }
        let value = self.evaluate_inner(initializer);
        self.depth.leave();
        value
    }

    fn evaluate_inner(&mut self, initializer: &EnumInitializer) -> Result<EnumValue, EnumError> {
        Ok(match initializer {
            EnumInitializer::Number(n) => EnumValue::Number(*n),
            EnumInitializer::String(s) => EnumValue::String(s.clone()),
            EnumInitializer::Computed(_) => EnumValue::Computed,
            EnumInitializer::Ref(name) => self.resolve_reference(name)?,
            EnumInitializer::Unary { op, operand } => match self.evaluate(operand)? {
                EnumValue::Number(n) => EnumValue::Number(apply_unary(*op, n)),
                _ => EnumValue::Computed,
            },
            EnumInitializer::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                apply_binary(*op, left, right)
            }
        })
    }

    /// `A` or `E.A` where `E` is the enclosing enum.
    fn resolve_reference(&self, name: &str) -> Result<EnumValue, EnumError> {
        let bare = name
            .strip_prefix(self.enum_name)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(name);
        self.earlier
            .get(bare)
            .cloned()
            .ok_or_else(|| EnumError::UnresolvedMemberReference {
                enum_name: self.enum_name.to_string(),
                member: self.member.to_string(),
                reference: name.to_string(),
            })
    }
}

fn apply_unary(op: UnaryOp, value: f64) -> f64 {
    match op {
        UnaryOp::Plus => value,
        UnaryOp::Minus => -value,
        UnaryOp::BitNot => f64::from(!to_int32(value)),
    }
}

fn apply_binary(op: BinaryOp, left: EnumValue, right: EnumValue) -> EnumValue {
    match (op, left, right) {
        (BinaryOp::Add, EnumValue::String(a), EnumValue::String(b)) => EnumValue::String(a + &b),
        (BinaryOp::Add, EnumValue::String(a), EnumValue::Number(b)) => {
            EnumValue::String(a + &js_number_to_string(b))
        }
        (BinaryOp::Add, EnumValue::Number(a), EnumValue::String(b)) => {
            EnumValue::String(js_number_to_string(a) + &b)
        }
        (op, EnumValue::Number(a), EnumValue::Number(b)) => {
            EnumValue::Number(apply_numeric(op, a, b))
        }
        _ => EnumValue::Computed,
    }
}

fn apply_numeric(op: BinaryOp, a: f64, b: f64) -> f64 {
    let shift = to_uint32(b) & 0x1f;
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        BinaryOp::Shl => f64::from(to_int32(a).wrapping_shl(shift)),
        BinaryOp::Shr => f64::from(to_int32(a) >> shift),
        BinaryOp::UShr => f64::from(to_uint32(a) >> shift),
        BinaryOp::BitAnd => f64::from(to_int32(a) & to_int32(b)),
        BinaryOp::BitOr => f64::from(to_int32(a) | to_int32(b)),
        BinaryOp::BitXor => f64::from(to_int32(a) ^ to_int32(b)),
    }
}

/// ECMAScript `ToUint32`.
fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// ECMAScript `ToInt32`.
fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

#[cfg(test)]
#[path = "../tests/evaluator_tests.rs"]
mod tests;
