use duck_common::diagnostics::{Diagnostic, diagnostic_codes as codes};
use thiserror::Error;

/// Errors from building an enum table or querying it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EnumError {
    /// A member without initializer follows a member whose value is not a
    /// resolved number.
    #[error("enum member '{member}' of '{enum_name}' must have an initializer")]
    AmbiguousEnumOrdering { enum_name: String, member: String },

    #[error("duplicate enum member '{member}' in '{enum_name}'")]
    DuplicateMember { enum_name: String, member: String },

    #[error("initializer of '{enum_name}.{member}' references '{reference}', which is not an earlier member")]
    UnresolvedMemberReference {
        enum_name: String,
        member: String,
        reference: String,
    },

    #[error("initializer of const enum member '{enum_name}.{member}' is not a constant expression")]
    NonConstantInitializer { enum_name: String, member: String },

    #[error("const enum member '{enum_name}.{member}' evaluated to a non-finite value")]
    NonFiniteConstValue { enum_name: String, member: String },

    #[error("'{enum_name}' has no member named '{member}'")]
    UnknownMember { enum_name: String, member: String },

    #[error("'{enum_name}' has no member with value {value}")]
    UnknownValue { enum_name: String, value: String },

    #[error("'{enum_name}' has string members and no reverse mapping")]
    NoReverseMapping { enum_name: String },
}

impl EnumError {
    /// Whether the error comes from the declaration rather than a query.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            EnumError::AmbiguousEnumOrdering { .. }
                | EnumError::DuplicateMember { .. }
                | EnumError::UnresolvedMemberReference { .. }
                | EnumError::NonConstantInitializer { .. }
                | EnumError::NonFiniteConstValue { .. }
        )
    }

    /// The TypeScript diagnostic code reported for this error, if any.
    pub fn code(&self) -> Option<u32> {
        match self {
            EnumError::AmbiguousEnumOrdering { .. } => Some(codes::ENUM_MEMBER_MUST_HAVE_INITIALIZER),
            EnumError::DuplicateMember { .. } => Some(codes::DUPLICATE_IDENTIFIER),
            EnumError::UnresolvedMemberReference { .. } => Some(codes::ENUM_MEMBER_FORWARD_REFERENCE),
            EnumError::NonConstantInitializer { .. } => {
                Some(codes::CONST_ENUM_MEMBER_INITIALIZERS_MUST_BE_CONSTANT)
            }
            EnumError::NonFiniteConstValue { .. } => Some(codes::CONST_ENUM_MEMBER_NON_FINITE),
            EnumError::UnknownMember { .. } => Some(codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE),
            EnumError::UnknownValue { .. } | EnumError::NoReverseMapping { .. } => None,
        }
    }

    /// Render as a TypeScript diagnostic. Errors without a code fall back to
    /// their display text.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EnumError::DuplicateMember { member, .. } => {
                Diagnostic::from_code(codes::DUPLICATE_IDENTIFIER, &[member.as_str()])
            }
            EnumError::UnknownMember { enum_name, member } => {
                let owner = format!("typeof {enum_name}");
                Diagnostic::from_code(
                    codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
                    &[member.as_str(), owner.as_str()],
                )
            }
            _ => match self.code() {
                Some(code) => Diagnostic::from_code(code, &[]),
                None => Diagnostic::error(self.to_string(), 0),
            },
        }
    }
}
