//! Runs a declaration document: registers its enums, builds the type
//! environment and answers each query in order.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::{Document, Query};
use duck_common::diagnostics::{Diagnostic, diagnostic_codes};
use duck_enums::{EnumRegistry, EnumValue, enum_type, runtime_object_type};
use duck_solver::{
    CompatChecker, CompatOptions, MalformedTypeRef, TypeEnvironment, TypeFormatter, TypeInterner,
    TypeLowering, TypeRef,
};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_EXPECTATION_FAILED: i32 = 1;
pub const EXIT_LOAD_ERROR: i32 = 2;

#[derive(Debug)]
pub struct CheckReport {
    pub options: CompatOptions,
    /// Errors from enum declarations. Queries still run against the enums
    /// that did build.
    pub declaration_errors: Vec<Diagnostic>,
    pub results: Vec<QueryResult>,
}

#[derive(Debug)]
pub struct QueryResult {
    pub kind: &'static str,
    /// Human-readable subject, e.g. `{ x: number; } -> Point` or `Direction.Up`.
    pub subject: String,
    pub outcome: QueryOutcome,
}

#[derive(Debug)]
pub enum QueryOutcome {
    Assignable {
        result: bool,
        expect: Option<bool>,
        /// Why the check failed, when it did.
        diagnostic: Option<Diagnostic>,
    },
    EnumValue(EnumValue),
    EnumName(String),
    /// The query could not be evaluated.
    Error(Diagnostic),
}

impl QueryResult {
    /// Evaluated, and matched its expectation if it had one.
    pub fn passed(&self) -> bool {
        match &self.outcome {
            QueryOutcome::Assignable { result, expect, .. } => {
                expect.is_none_or(|expected| expected == *result)
            }
            QueryOutcome::EnumValue(_) | QueryOutcome::EnumName(_) => true,
            QueryOutcome::Error(_) => false,
        }
    }
}

impl CheckReport {
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }

    pub fn exit_code(&self) -> i32 {
        if !self.declaration_errors.is_empty() {
            EXIT_LOAD_ERROR
        } else if self.failed_count() > 0 {
            EXIT_EXPECTATION_FAILED
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Name under which the runtime object of enum `name` is declared.
pub fn runtime_object_name(name: &str) -> String {
    format!("typeof {name}")
}

/// Declare every type, every enum (as the union of its members) and every
/// runtime enum object (as `typeof E`), then lower the type bodies. Names
/// may be referenced before their declaration.
pub fn build_document_environment(
    interner: &TypeInterner,
    types: &IndexMap<String, TypeRef>,
    registry: &EnumRegistry,
) -> Result<TypeEnvironment> {
    let mut env = TypeEnvironment::new();
    for name in types.keys() {
        env.declare(name);
    }
    for table in registry.iter() {
        if env.lookup(table.name()).is_some() {
            bail!("'{}' is declared both as a type and as an enum", table.name());
        }
        env.declare(table.name());
        if table.has_runtime_object() {
            env.declare(&runtime_object_name(table.name()));
        }
    }

    let mut bodies = Vec::with_capacity(env.len());
    {
        let mut lowering = TypeLowering::with_environment(interner, &env);
        for (name, type_ref) in types {
            let body = lowering
                .lower(type_ref)
                .with_context(|| format!("invalid declaration of type '{name}'"))?;
            bodies.push((name.clone(), body));
        }
    }
    for table in registry.iter() {
        bodies.push((table.name().to_string(), enum_type(interner, table)));
        if let Some(object) = runtime_object_type(interner, table) {
            bodies.push((runtime_object_name(table.name()), object));
        }
    }

    for (name, body) in bodies {
        if let Some(def_id) = env.lookup(&name) {
            env.define(def_id, body);
        }
    }
    Ok(env)
}

/// Run every query of `document` under `options`.
pub fn check(document: &Document, options: CompatOptions) -> Result<CheckReport> {
    let mut registry = EnumRegistry::new();
    let mut declaration_errors = Vec::new();
    for decl in &document.enums {
        if let Err(err) = registry.register(decl) {
            warn!(enum_name = %decl.name, %err, "enum declaration rejected");
            declaration_errors.push(err.to_diagnostic());
        }
    }

    let interner = TypeInterner::new();
    let env = build_document_environment(&interner, &document.types, &registry)?;
    info!(
        types = document.types.len(),
        enums = registry.len(),
        queries = document.queries.len(),
        "document loaded"
    );

    let mut runner = QueryRunner {
        interner: &interner,
        env: &env,
        registry: &registry,
        checker: CompatChecker::with_resolver(&interner, &env).with_options(options),
    };
    let results = document
        .queries
        .iter()
        .map(|query| runner.run(query))
        .collect();

    Ok(CheckReport {
        options,
        declaration_errors,
        results,
    })
}

struct QueryRunner<'a> {
    interner: &'a TypeInterner,
    env: &'a TypeEnvironment,
    registry: &'a EnumRegistry,
    checker: CompatChecker<'a, TypeEnvironment>,
}

impl QueryRunner<'_> {
    fn run(&mut self, query: &Query) -> QueryResult {
        let kind = query.kind();
        let (subject, outcome) = match query {
            Query::Assignable {
                source,
                target,
                expect,
            } => self.assignable(source, target, *expect),
            Query::EnumValue { enum_name, member } => {
                let subject = format!("{enum_name}.{member}");
                (subject, self.enum_value(enum_name, member))
            }
            Query::EnumName { enum_name, value } => {
                let subject = format!("{enum_name}[{value}]");
                (subject, self.enum_name(enum_name, *value))
            }
        };
        debug!(kind, %subject, "query evaluated");
        QueryResult {
            kind,
            subject,
            outcome,
        }
    }

    fn assignable(
        &mut self,
        source: &TypeRef,
        target: &TypeRef,
        expect: Option<bool>,
    ) -> (String, QueryOutcome) {
        let mut lowering = TypeLowering::with_environment(self.interner, self.env);
        let lowered = lowering
            .lower(source)
            .and_then(|s| lowering.lower(target).map(|t| (s, t)));
        let (source, target) = match lowered {
            Ok(pair) => pair,
            Err(err) => {
                return ("<malformed>".to_string(), QueryOutcome::Error(lowering_diagnostic(&err)));
            }
        };

        let mut formatter = TypeFormatter::with_resolver(self.interner, self.env);
        let subject = format!(
            "{} -> {}",
            formatter.format(source),
            formatter.format(target)
        );

        let result = self.checker.is_assignable(source, target);
        let diagnostic = if result {
            None
        } else {
            let diag = match self.checker.explain_failure(source, target) {
                Some(reason) => reason.to_diagnostic(&mut formatter, source, target),
                None => {
                    let s = formatter.format(source);
                    let t = formatter.format(target);
                    Diagnostic::from_code(diagnostic_codes::TYPE_NOT_ASSIGNABLE, &[&s, &t])
                }
            };
            Some(diag)
        };

        (
            subject,
            QueryOutcome::Assignable {
                result,
                expect,
                diagnostic,
            },
        )
    }

    fn enum_value(&self, enum_name: &str, member: &str) -> QueryOutcome {
        let Some(table) = self.registry.get(enum_name) else {
            return unknown_enum(enum_name);
        };
        match table.lookup_value(member) {
            Ok(value) => QueryOutcome::EnumValue(value.clone()),
            Err(err) => QueryOutcome::Error(err.to_diagnostic()),
        }
    }

    fn enum_name(&self, enum_name: &str, value: f64) -> QueryOutcome {
        let Some(table) = self.registry.get(enum_name) else {
            return unknown_enum(enum_name);
        };
        match table.lookup_name(value) {
            Ok(name) => QueryOutcome::EnumName(name.to_string()),
            Err(err) => QueryOutcome::Error(err.to_diagnostic()),
        }
    }
}

fn unknown_enum(name: &str) -> QueryOutcome {
    QueryOutcome::Error(Diagnostic::from_code(
        diagnostic_codes::CANNOT_FIND_NAME,
        &[name],
    ))
}

fn lowering_diagnostic(err: &MalformedTypeRef) -> Diagnostic {
    match err {
        MalformedTypeRef::UnresolvedReference(name) => {
            Diagnostic::from_code(diagnostic_codes::CANNOT_FIND_NAME, &[name.as_str()])
        }
        other => Diagnostic::error(other.to_string(), 0),
    }
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
