use colored::Colorize;
use serde_json::{Value, json};

use crate::driver::{CheckReport, QueryOutcome, QueryResult};
use duck_common::diagnostics::{Diagnostic, DiagnosticCategory};

/// Renders a [`CheckReport`] as tsc-style text.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, report: &CheckReport) -> String {
        let mut out = String::new();
        for diagnostic in &report.declaration_errors {
            out.push_str(&self.format_diagnostic(diagnostic, 0));
            out.push('\n');
        }
        for (index, result) in report.results.iter().enumerate() {
            out.push_str(&self.format_result(index + 1, result));
            out.push('\n');
        }
        out.push_str(&self.format_summary(report));
        out.push('\n');
        out
    }

    fn format_result(&self, number: usize, result: &QueryResult) -> String {
        let status = if result.passed() {
            self.paint("ok", |s| s.green().bold().to_string())
        } else {
            self.paint("FAIL", |s| s.red().bold().to_string())
        };
        let mut output = format!("[{number}] {status} {} {}", result.kind, result.subject);

        match &result.outcome {
            QueryOutcome::Assignable {
                result: assignable,
                expect,
                diagnostic,
            } => {
                output.push_str(": ");
                output.push_str(verdict(*assignable));
                if let Some(expected) = expect
                    && expected != assignable
                {
                    output.push_str(&format!(" (expected {})", verdict(*expected)));
                }
                if let Some(diagnostic) = diagnostic {
                    output.push('\n');
                    output.push_str(&self.format_diagnostic(diagnostic, 1));
                }
            }
            QueryOutcome::EnumValue(value) => {
                output.push_str(&format!(" = {value}"));
            }
            QueryOutcome::EnumName(name) => {
                output.push_str(&format!(" = {name}"));
            }
            QueryOutcome::Error(diagnostic) => {
                output.push('\n');
                output.push_str(&self.format_diagnostic(diagnostic, 1));
            }
        }
        output
    }

    /// `error TS2322: ...` followed by the elaboration chain, each level
    /// indented one step further.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic, indent: usize) -> String {
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = "  ".repeat(indent);
        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        for (depth, related) in diagnostic.related_information.iter().enumerate() {
            output.push('\n');
            output.push_str(&"  ".repeat(indent + depth + 1));
            output.push_str(&related.message_text);
        }
        output
    }

    fn format_summary(&self, report: &CheckReport) -> String {
        let failed = report.failed_count();
        let mut summary = format!("{} queries, {} failed", report.results.len(), failed);
        if !report.declaration_errors.is_empty() {
            summary.push_str(&format!(
                ", {} declaration errors",
                report.declaration_errors.len()
            ));
        }
        if failed == 0 && report.declaration_errors.is_empty() {
            self.paint(&summary, |s| s.green().to_string())
        } else {
            self.paint(&summary, |s| s.red().to_string())
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category_label(category);

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("TS{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}

fn verdict(assignable: bool) -> &'static str {
    if assignable {
        "assignable"
    } else {
        "not assignable"
    }
}

fn category_label(category: DiagnosticCategory) -> &'static str {
    match category {
        DiagnosticCategory::Error => "error",
        DiagnosticCategory::Warning => "warning",
        DiagnosticCategory::Suggestion => "suggestion",
        DiagnosticCategory::Message => "message",
    }
}

fn diagnostic_json(diagnostic: &Diagnostic) -> Value {
    json!({
        "category": category_label(diagnostic.category),
        "code": diagnostic.code,
        "message": diagnostic.message_text,
        "related": diagnostic
            .related_information
            .iter()
            .map(|related| json!({ "code": related.code, "message": related.message_text }))
            .collect::<Vec<_>>(),
    })
}

fn result_json(result: &QueryResult) -> Value {
    let mut value = json!({
        "query": result.kind,
        "subject": result.subject,
        "passed": result.passed(),
    });
    let Value::Object(fields) = &mut value else {
        return value;
    };
    match &result.outcome {
        QueryOutcome::Assignable {
            result,
            expect,
            diagnostic,
        } => {
            fields.insert("result".to_string(), json!(result));
            if let Some(expect) = expect {
                fields.insert("expect".to_string(), json!(expect));
            }
            if let Some(diagnostic) = diagnostic {
                fields.insert("diagnostic".to_string(), diagnostic_json(diagnostic));
            }
        }
        QueryOutcome::EnumValue(enum_value) => {
            fields.insert("value".to_string(), json!(enum_value));
        }
        QueryOutcome::EnumName(name) => {
            fields.insert("name".to_string(), json!(name));
        }
        QueryOutcome::Error(diagnostic) => {
            fields.insert("error".to_string(), diagnostic_json(diagnostic));
        }
    }
    value
}

/// The whole report as one JSON document.
pub fn render_json(report: &CheckReport) -> Value {
    json!({
        "compilerOptions": report.options,
        "declarationErrors": report
            .declaration_errors
            .iter()
            .map(diagnostic_json)
            .collect::<Vec<_>>(),
        "results": report.results.iter().map(result_json).collect::<Vec<_>>(),
        "failed": report.failed_count(),
        "exitCode": report.exit_code(),
    })
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
