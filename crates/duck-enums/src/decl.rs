//! Enum declarations as plain values.
//!
//! The JSON form mirrors TypeScript source closely:
//!
//! ```json
//! { "name": "E", "kind": "const", "members": [
//!     { "name": "A", "initializer": 1 },
//!     { "name": "B", "initializer": { "binary": { "op": "*", "left": { "ref": "A" }, "right": 2 } } },
//!     { "name": "C" }
//! ] }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumKind {
    #[default]
    Regular,
    /// Erased at runtime; every initializer must be a constant expression.
    Const,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub kind: EnumKind,
    pub members: Vec<EnumMemberDecl>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = EnumMemberDecl>) -> Self {
        EnumDecl {
            name: name.into(),
            kind: EnumKind::Regular,
            members: members.into_iter().collect(),
        }
    }

    pub fn new_const(
        name: impl Into<String>,
        members: impl IntoIterator<Item = EnumMemberDecl>,
    ) -> Self {
        EnumDecl {
            kind: EnumKind::Const,
            ..Self::new(name, members)
        }
    }

    /// Members named in order, none initialized.
    pub fn auto(name: impl Into<String>, members: &[&str]) -> Self {
        Self::new(name, members.iter().map(|m| EnumMemberDecl::auto(*m)))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumMemberDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<EnumInitializer>,
}

impl EnumMemberDecl {
    pub fn auto(name: impl Into<String>) -> Self {
        EnumMemberDecl {
            name: name.into(),
            initializer: None,
        }
    }

    pub fn with(name: impl Into<String>, initializer: EnumInitializer) -> Self {
        EnumMemberDecl {
            name: name.into(),
            initializer: Some(initializer),
        }
    }
}

/// An enum member initializer expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumInitializer {
    /// An earlier member of the same enum, bare (`A`) or qualified (`E.A`).
    Ref(String),
    Unary {
        op: UnaryOp,
        operand: Box<EnumInitializer>,
    },
    Binary {
        op: BinaryOp,
        left: Box<EnumInitializer>,
        right: Box<EnumInitializer>,
    },
    /// A non-constant expression such as `getSomeValue()`; the text is kept
    /// for display only.
    Computed(String),
    #[serde(untagged)]
    Number(f64),
    #[serde(untagged)]
    String(String),
}

impl EnumInitializer {
    pub fn reference(name: impl Into<String>) -> Self {
        EnumInitializer::Ref(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        EnumInitializer::String(value.into())
    }

    pub fn computed(text: impl Into<String>) -> Self {
        EnumInitializer::Computed(text.into())
    }

    pub fn unary(op: UnaryOp, operand: EnumInitializer) -> Self {
        EnumInitializer::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: EnumInitializer, right: EnumInitializer) -> Self {
        EnumInitializer::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "~")]
    BitNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Rem,
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = ">>>")]
    UShr,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
}
