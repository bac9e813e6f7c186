//! Structured assignability failures and their rendering.
//!
//! `SubtypeFailureReason` is produced by the explain path
//! (`SubtypeChecker::explain_failure`, `CompatChecker::explain_failure`) and
//! rendered into a `Diagnostic` with TypeScript's codes and wording.

use crate::format::TypeFormatter;
use crate::types::{TypeId, Visibility};
use duck_common::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, diagnostic_codes as codes,
    format_message, get_message_template,
};
use duck_common::interner::Atom;
use duck_common::limits::UNION_MEMBER_DIAGNOSTIC_LIMIT;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubtypeFailureReason {
    /// A required property is missing in the source type.
    MissingProperty {
        property_name: Atom,
        source_type: TypeId,
        target_type: TypeId,
    },
    /// Property types are incompatible.
    PropertyTypeMismatch {
        property_name: Atom,
        source_property_type: TypeId,
        target_property_type: TypeId,
        nested_reason: Option<Box<SubtypeFailureReason>>,
    },
    /// Optional property cannot satisfy required property.
    OptionalPropertyRequired {
        property_name: Atom,
        source_type: TypeId,
        target_type: TypeId,
    },
    /// One side declares the property private or protected, the other does not.
    PropertyVisibilityMismatch {
        property_name: Atom,
        source_visibility: Visibility,
        target_visibility: Visibility,
    },
    /// Separate declarations of a private or protected property.
    PropertyNominalMismatch { property_name: Atom },
    /// A fresh object literal names a property the target does not know.
    ExcessProperty {
        property_name: Atom,
        target_type: TypeId,
    },
    ReturnTypeMismatch {
        source_return: TypeId,
        target_return: TypeId,
        nested_reason: Option<Box<SubtypeFailureReason>>,
    },
    ParameterTypeMismatch {
        param_index: usize,
        param_name: Option<Atom>,
        source_param: TypeId,
        target_param: TypeId,
    },
    /// The source requires more parameters than the target supplies.
    TooManyParameters {
        source_count: usize,
        target_count: usize,
    },
    ArrayElementMismatch {
        source_element: TypeId,
        target_element: TypeId,
        nested_reason: Option<Box<SubtypeFailureReason>>,
    },
    IndexSignatureMismatch {
        index_kind: &'static str,
        source_value_type: TypeId,
        target_value_type: TypeId,
    },
    NoUnionMemberMatches {
        source_type: TypeId,
        target_union_members: Vec<TypeId>,
    },
    TypeMismatch {
        source_type: TypeId,
        target_type: TypeId,
    },
}

impl SubtypeFailureReason {
    /// The diagnostic code of the head message for this reason.
    pub fn code(&self) -> u32 {
        match self {
            SubtypeFailureReason::ExcessProperty { .. } => codes::OBJECT_LITERAL_KNOWN_PROPERTIES,
            _ => codes::TYPE_NOT_ASSIGNABLE,
        }
    }

    /// Render as a diagnostic: a head message for `source`/`target` followed
    /// by the elaboration chain.
    pub fn to_diagnostic(
        &self,
        formatter: &mut TypeFormatter<'_>,
        source: TypeId,
        target: TypeId,
    ) -> Diagnostic {
        if let SubtypeFailureReason::ExcessProperty {
            property_name,
            target_type,
        } = self
        {
            let name = formatter.format_atom(*property_name);
            let target = formatter.format(*target_type);
            return Diagnostic::from_code(codes::OBJECT_LITERAL_KNOWN_PROPERTIES, &[&name, &target]);
        }

        let s = formatter.format(source);
        let t = formatter.format(target);
        let mut diag = Diagnostic::from_code(codes::TYPE_NOT_ASSIGNABLE, &[&s, &t]);
        self.elaborate(formatter, source, target, &mut diag);
        diag
    }

    fn elaborate(
        &self,
        formatter: &mut TypeFormatter<'_>,
        source: TypeId,
        target: TypeId,
        diag: &mut Diagnostic,
    ) {
        match self {
            SubtypeFailureReason::MissingProperty {
                property_name,
                source_type,
                target_type,
            } => {
                let args = [
                    formatter.format_atom(*property_name),
                    formatter.format(*source_type),
                    formatter.format(*target_type),
                ];
                push_related(diag, codes::PROPERTY_MISSING_BUT_REQUIRED, &args);
            }

            SubtypeFailureReason::PropertyTypeMismatch {
                property_name,
                source_property_type,
                target_property_type,
                nested_reason,
            } => {
                let name = formatter.format_atom(*property_name);
                push_related(diag, codes::TYPES_OF_PROPERTY_INCOMPATIBLE, &[name]);
                nested_mismatch(
                    formatter,
                    *source_property_type,
                    *target_property_type,
                    nested_reason.as_deref(),
                    diag,
                );
            }

            SubtypeFailureReason::OptionalPropertyRequired {
                property_name,
                source_type,
                target_type,
            } => {
                let args = [
                    formatter.format_atom(*property_name),
                    formatter.format(*source_type),
                    formatter.format(*target_type),
                ];
                push_related(diag, codes::PROPERTY_OPTIONAL_BUT_REQUIRED, &args);
            }

            SubtypeFailureReason::PropertyVisibilityMismatch {
                property_name,
                source_visibility,
                target_visibility,
            } => {
                let name = formatter.format_atom(*property_name);
                let s = formatter.format(source);
                let t = formatter.format(target);
                let (code, args) = match (source_visibility, target_visibility) {
                    (Visibility::Private, _) => (codes::PROPERTY_PRIVATE_IN_ONE_TYPE, [name, s, t]),
                    (_, Visibility::Private) => (codes::PROPERTY_PRIVATE_IN_ONE_TYPE, [name, t, s]),
                    (Visibility::Protected, _) => {
                        (codes::PROPERTY_PROTECTED_IN_ONE_TYPE, [name, s, t])
                    }
                    _ => (codes::PROPERTY_PROTECTED_IN_ONE_TYPE, [name, t, s]),
                };
                push_related(diag, code, &args);
            }

            SubtypeFailureReason::PropertyNominalMismatch { property_name } => {
                let name = formatter.format_atom(*property_name);
                push_related(diag, codes::SEPARATE_PRIVATE_DECLARATIONS, &[name]);
            }

            SubtypeFailureReason::ExcessProperty {
                property_name,
                target_type,
            } => {
                let args = [
                    formatter.format_atom(*property_name),
                    formatter.format(*target_type),
                ];
                push_related(diag, codes::OBJECT_LITERAL_KNOWN_PROPERTIES, &args);
            }

            SubtypeFailureReason::ReturnTypeMismatch {
                source_return,
                target_return,
                nested_reason,
            } => nested_mismatch(
                formatter,
                *source_return,
                *target_return,
                nested_reason.as_deref(),
                diag,
            ),

            SubtypeFailureReason::ParameterTypeMismatch {
                param_index,
                param_name,
                source_param,
                target_param,
            } => {
                let name = param_name
                    .map(|name| formatter.format_atom(name))
                    .unwrap_or_else(|| format!("arg{param_index}"));
                push_related(
                    diag,
                    codes::TYPES_OF_PARAMETERS_INCOMPATIBLE,
                    &[name.clone(), name],
                );
                nested_mismatch(formatter, *target_param, *source_param, None, diag);
            }

            SubtypeFailureReason::TooManyParameters {
                source_count,
                target_count,
            } => {
                let args = [source_count.to_string(), target_count.to_string()];
                push_related(diag, codes::TARGET_SIGNATURE_TOO_FEW_ARGUMENTS, &args);
            }

            SubtypeFailureReason::ArrayElementMismatch {
                source_element,
                target_element,
                nested_reason,
            } => nested_mismatch(
                formatter,
                *source_element,
                *target_element,
                nested_reason.as_deref(),
                diag,
            ),

            SubtypeFailureReason::IndexSignatureMismatch {
                index_kind,
                source_value_type,
                target_value_type,
            } => {
                push_related(
                    diag,
                    codes::INDEX_SIGNATURES_INCOMPATIBLE,
                    &[(*index_kind).to_string()],
                );
                nested_mismatch(formatter, *source_value_type, *target_value_type, None, diag);
            }

            SubtypeFailureReason::NoUnionMemberMatches {
                source_type,
                target_union_members,
            } => {
                for &member in target_union_members.iter().take(UNION_MEMBER_DIAGNOSTIC_LIMIT) {
                    nested_mismatch(formatter, *source_type, member, None, diag);
                }
            }

            SubtypeFailureReason::TypeMismatch { .. } => {}
        }
    }
}

/// `Type 'S' is not assignable to type 'T'.` followed by the nested chain.
fn nested_mismatch(
    formatter: &mut TypeFormatter<'_>,
    source: TypeId,
    target: TypeId,
    nested: Option<&SubtypeFailureReason>,
    diag: &mut Diagnostic,
) {
    let args = [formatter.format(source), formatter.format(target)];
    push_related(diag, codes::TYPE_NOT_ASSIGNABLE, &args);
    if let Some(nested) = nested {
        nested.elaborate(formatter, source, target, diag);
    }
}

fn push_related(diag: &mut Diagnostic, code: u32, args: &[String]) {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let template = get_message_template(code).unwrap_or("{0}");
    diag.related_information.push(DiagnosticRelatedInformation {
        category: DiagnosticCategory::Message,
        code,
        message_text: format_message(template, &args),
    });
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
