//! Enum tables: forward (name → value) and reverse (value → name) lookup.

use crate::decl::{EnumDecl, EnumKind};
use crate::error::EnumError;
use crate::evaluator::{ConstantEvaluator, EnumValue};
use duck_solver::utils::js_number_to_string;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// An immutable, fully evaluated enum.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumTable {
    name: String,
    kind: EnumKind,
    members: IndexMap<String, EnumValue>,
    /// Keyed by the property-key spelling of the value (`"1"`, `"-0.5"`), the
    /// way the runtime reverse mapping is keyed. Later members overwrite
    /// earlier ones.
    reverse: FxHashMap<String, usize>,
    fully_numeric: bool,
}

impl EnumTable {
    /// Evaluate every member of `decl` in declaration order.
    pub fn build(decl: &EnumDecl) -> Result<EnumTable, EnumError> {
        let mut members: IndexMap<String, EnumValue> = IndexMap::with_capacity(decl.members.len());

        for member in &decl.members {
            if members.contains_key(&member.name) {
                return Err(EnumError::DuplicateMember {
                    enum_name: decl.name.clone(),
                    member: member.name.clone(),
                });
            }

            let value = match &member.initializer {
                Some(initializer) => {
                    ConstantEvaluator::new(&decl.name, &member.name, &members)
                        .evaluate(initializer)?
                }
                None => match members.last() {
                    None => EnumValue::Number(0.0),
                    Some((_, EnumValue::Number(previous))) => EnumValue::Number(previous + 1.0),
                    Some(_) => {
                        return Err(EnumError::AmbiguousEnumOrdering {
                            enum_name: decl.name.clone(),
                            member: member.name.clone(),
                        });
                    }
                },
            };

            if decl.kind == EnumKind::Const {
                match value {
                    EnumValue::Computed => {
                        return Err(EnumError::NonConstantInitializer {
                            enum_name: decl.name.clone(),
                            member: member.name.clone(),
                        });
                    }
                    EnumValue::Number(n) if !n.is_finite() => {
                        return Err(EnumError::NonFiniteConstValue {
                            enum_name: decl.name.clone(),
                            member: member.name.clone(),
                        });
                    }
                    _ => {}
                }
            }

            trace!(enum_name = %decl.name, member = %member.name, %value, "enum member");
            members.insert(member.name.clone(), value);
        }

        let mut reverse = FxHashMap::default();
        for (index, (name, value)) in members.iter().enumerate() {
            if let EnumValue::Number(n) = value
                && let Some(previous) = reverse.insert(js_number_to_string(*n), index)
            {
                debug!(
                    enum_name = %decl.name,
                    value = *n,
                    shadowed = %members.get_index(previous).map_or("", |(k, _)| k.as_str()),
                    by = %name,
                    "reverse mapping overwritten"
                );
            }
        }
        let fully_numeric = !members.values().any(EnumValue::is_string);

        Ok(EnumTable {
            name: decl.name.clone(),
            kind: decl.kind,
            members,
            reverse,
            fully_numeric,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EnumKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = (&str, &EnumValue)> {
        self.members.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn get(&self, name: &str) -> Option<&EnumValue> {
        self.members.get(name)
    }

    /// No member is string-valued. Computed members are numeric at runtime.
    pub fn is_fully_numeric(&self) -> bool {
        self.fully_numeric
    }

    /// Const enums are erased and have no runtime object.
    pub fn has_runtime_object(&self) -> bool {
        self.kind != EnumKind::Const
    }

    pub fn lookup_value(&self, name: &str) -> Result<&EnumValue, EnumError> {
        self.members.get(name).ok_or_else(|| EnumError::UnknownMember {
            enum_name: self.name.clone(),
            member: name.to_string(),
        })
    }

    /// Reverse mapping. When several members share `value`, the last
    /// declared one wins.
    pub fn lookup_name(&self, value: f64) -> Result<&str, EnumError> {
        if !self.fully_numeric {
            return Err(EnumError::NoReverseMapping {
                enum_name: self.name.clone(),
            });
        }
        let key = js_number_to_string(value);
        self.reverse
            .get(&key)
            .and_then(|&index| self.members.get_index(index))
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| EnumError::UnknownValue {
                enum_name: self.name.clone(),
                value: key,
            })
    }
}

/// Build a table from a declaration.
pub fn build(decl: &EnumDecl) -> Result<EnumTable, EnumError> {
    EnumTable::build(decl)
}

/// A set of enum tables keyed by enum name, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct EnumRegistry {
    tables: IndexMap<String, EnumTable>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register `decl`. A later declaration with the same name
    /// replaces the earlier table.
    pub fn register(&mut self, decl: &EnumDecl) -> Result<&EnumTable, EnumError> {
        let table = EnumTable::build(decl)?;
        let (index, previous) = self.tables.insert_full(decl.name.clone(), table);
        if previous.is_some() {
            debug!(enum_name = %decl.name, "enum redeclared, replacing table");
        }
        Ok(&self.tables[index])
    }

    pub fn get(&self, name: &str) -> Option<&EnumTable> {
        self.tables.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnumTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
