//! Diagnostic codes, message templates and rendered diagnostics.
//!
//! Codes and message texts follow TypeScript's diagnostic catalogue so that
//! output reads the way `tsc` users expect. Templates use `{0}`, `{1}`, ...
//! placeholders filled by [`format_message`].

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    // Enum declarations
    pub const ENUM_MEMBER_MUST_HAVE_INITIALIZER: u32 = 1061;
    pub const DUPLICATE_IDENTIFIER: u32 = 2300;
    pub const ENUM_MEMBER_FORWARD_REFERENCE: u32 = 2651;
    pub const CONST_ENUM_MEMBER_INITIALIZERS_MUST_BE_CONSTANT: u32 = 2474;
    pub const CONST_ENUM_MEMBER_NON_FINITE: u32 = 2477;
    pub const PROPERTY_DOES_NOT_EXIST_ON_TYPE: u32 = 2339;
    pub const CANNOT_FIND_NAME: u32 = 2304;

    // Assignability
    pub const TYPE_NOT_ASSIGNABLE: u32 = 2322;
    pub const TYPES_OF_PROPERTY_INCOMPATIBLE: u32 = 2326;
    pub const PROPERTY_OPTIONAL_BUT_REQUIRED: u32 = 2327;
    pub const TYPES_OF_PARAMETERS_INCOMPATIBLE: u32 = 2328;
    pub const INDEX_SIGNATURES_INCOMPATIBLE: u32 = 2330;
    pub const PROPERTY_PRIVATE_IN_ONE_TYPE: u32 = 2341;
    pub const OBJECT_LITERAL_KNOWN_PROPERTIES: u32 = 2353;
    pub const SEPARATE_PRIVATE_DECLARATIONS: u32 = 2442;
    pub const PROPERTY_PROTECTED_IN_ONE_TYPE: u32 = 2444;
    pub const PROPERTY_MISSING_BUT_REQUIRED: u32 = 2741;
    pub const TARGET_SIGNATURE_TOO_FEW_ARGUMENTS: u32 = 2849;
}

use diagnostic_codes::*;

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: ENUM_MEMBER_MUST_HAVE_INITIALIZER,
        category: DiagnosticCategory::Error,
        message: "Enum member must have initializer.",
    },
    DiagnosticMessage {
        code: DUPLICATE_IDENTIFIER,
        category: DiagnosticCategory::Error,
        message: "Duplicate identifier '{0}'.",
    },
    DiagnosticMessage {
        code: ENUM_MEMBER_FORWARD_REFERENCE,
        category: DiagnosticCategory::Error,
        message: "A member initializer in a enum declaration cannot reference members declared after it, including members defined in other enums.",
    },
    DiagnosticMessage {
        code: CONST_ENUM_MEMBER_INITIALIZERS_MUST_BE_CONSTANT,
        category: DiagnosticCategory::Error,
        message: "const enum member initializers must be constant expressions.",
    },
    DiagnosticMessage {
        code: CONST_ENUM_MEMBER_NON_FINITE,
        category: DiagnosticCategory::Error,
        message: "'const' enum member initializer was evaluated to a non-finite value.",
    },
    DiagnosticMessage {
        code: PROPERTY_DOES_NOT_EXIST_ON_TYPE,
        category: DiagnosticCategory::Error,
        message: "Property '{0}' does not exist on type '{1}'.",
    },
    DiagnosticMessage {
        code: CANNOT_FIND_NAME,
        category: DiagnosticCategory::Error,
        message: "Cannot find name '{0}'.",
    },
    DiagnosticMessage {
        code: TYPE_NOT_ASSIGNABLE,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' is not assignable to type '{1}'.",
    },
    DiagnosticMessage {
        code: TYPES_OF_PROPERTY_INCOMPATIBLE,
        category: DiagnosticCategory::Error,
        message: "Types of property '{0}' are incompatible.",
    },
    DiagnosticMessage {
        code: PROPERTY_OPTIONAL_BUT_REQUIRED,
        category: DiagnosticCategory::Error,
        message: "Property '{0}' is optional in type '{1}' but required in type '{2}'.",
    },
    DiagnosticMessage {
        code: TYPES_OF_PARAMETERS_INCOMPATIBLE,
        category: DiagnosticCategory::Error,
        message: "Types of parameters '{0}' and '{1}' are incompatible.",
    },
    DiagnosticMessage {
        code: INDEX_SIGNATURES_INCOMPATIBLE,
        category: DiagnosticCategory::Error,
        message: "'{0}' index signatures are incompatible.",
    },
    DiagnosticMessage {
        code: PROPERTY_PRIVATE_IN_ONE_TYPE,
        category: DiagnosticCategory::Error,
        message: "Property '{0}' is private in type '{1}' but not in type '{2}'.",
    },
    DiagnosticMessage {
        code: OBJECT_LITERAL_KNOWN_PROPERTIES,
        category: DiagnosticCategory::Error,
        message: "Object literal may only specify known properties, and '{0}' does not exist in type '{1}'.",
    },
    DiagnosticMessage {
        code: SEPARATE_PRIVATE_DECLARATIONS,
        category: DiagnosticCategory::Error,
        message: "Types have separate declarations of a private property '{0}'.",
    },
    DiagnosticMessage {
        code: PROPERTY_PROTECTED_IN_ONE_TYPE,
        category: DiagnosticCategory::Error,
        message: "Property '{0}' is protected in type '{1}' but public in type '{2}'.",
    },
    DiagnosticMessage {
        code: PROPERTY_MISSING_BUT_REQUIRED,
        category: DiagnosticCategory::Error,
        message: "Property '{0}' is missing in type '{1}' but required in type '{2}'.",
    },
    DiagnosticMessage {
        code: TARGET_SIGNATURE_TOO_FEW_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: "Target signature provides too few arguments. Expected {0} or more, but got {1}.",
    },
];

/// A rendered diagnostic: a head message plus an elaboration chain.
///
/// `related_information` holds the nested explanation lines, outermost
/// first, the way `tsc` prints them indented under the head message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message_text: String,
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            message_text: message.into(),
            related_information: Vec::new(),
        }
    }

    /// Build an error from the message catalogue, filling the template.
    pub fn from_code(code: u32, args: &[&str]) -> Self {
        let template = get_message_template(code).unwrap_or("{0}");
        Self::error(format_message(template, args), code)
    }

    pub fn with_related(mut self, code: u32, message: impl Into<String>) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            code,
            message_text: message.into(),
        });
        self
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_message_fills_placeholders() {
        let text = format_message(
            "Type '{0}' is not assignable to type '{1}'.",
            &["string", "number"],
        );
        assert_eq!(text, "Type 'string' is not assignable to type 'number'.");
    }

    #[test]
    fn from_code_uses_catalogue() {
        let diag = Diagnostic::from_code(diagnostic_codes::DUPLICATE_IDENTIFIER, &["Up"]);
        assert_eq!(diag.code, 2300);
        assert_eq!(diag.category, DiagnosticCategory::Error);
        assert_eq!(diag.message_text, "Duplicate identifier 'Up'.");
        assert!(diag.related_information.is_empty());
    }

    #[test]
    fn every_code_has_a_unique_template() {
        for (i, a) in DIAGNOSTIC_MESSAGES.iter().enumerate() {
            for b in &DIAGNOSTIC_MESSAGES[i + 1..] {
                assert_ne!(a.code, b.code, "duplicate catalogue entry {}", a.code);
            }
        }
    }
}
