//! Named type declarations.
//!
//! A `DefId` names a declaration (`interface Named { ... }`,
//! `type List = { next: List }`). Types refer to declarations through
//! `TypeData::Lazy(DefId)` and the solver resolves them on demand, which is
//! what lets declarations reference each other cyclically.
//!
//! `TypeEnvironment` is built in two phases: every name is declared first
//! (reserving its `DefId`), then bodies are lowered and defined. After
//! construction it is immutable and can be shared across threads.

use crate::intern::TypeInterner;
use crate::types::TypeId;
use indexmap::IndexMap;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

/// Resolves lazy references during subtype checking.
pub trait TypeResolver {
    /// Body of the declaration, or `None` if it is unknown or not yet defined.
    fn resolve_lazy(&self, def_id: DefId, interner: &TypeInterner) -> Option<TypeId>;

    /// Display name of the declaration, used by the formatter.
    fn def_name(&self, _def_id: DefId) -> Option<&str> {
        None
    }
}

/// Resolver that knows no declarations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopResolver;

impl TypeResolver for NoopResolver {
    fn resolve_lazy(&self, _def_id: DefId, _interner: &TypeInterner) -> Option<TypeId> {
        None
    }
}

#[derive(Debug, Default)]
pub struct TypeEnvironment {
    /// Declared names in declaration order; the index is the `DefId`.
    names: IndexMap<String, Option<TypeId>>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a `DefId` for `name`. Declaring a name twice returns the
    /// existing id.
    pub fn declare(&mut self, name: &str) -> DefId {
        if let Some(idx) = self.names.get_index_of(name) {
            return DefId(idx as u32);
        }
        let (idx, _) = self.names.insert_full(name.to_string(), None);
        trace!(name, def_id = idx, "declared type");
        DefId(idx as u32)
    }

    /// Attach a body to a declared name.
    pub fn define(&mut self, def_id: DefId, body: TypeId) {
        if let Some((_, slot)) = self.names.get_index_mut(def_id.0 as usize) {
            *slot = Some(body);
        }
    }

    /// The `Lazy` type referring to `def_id`.
    pub fn reference(&self, def_id: DefId, interner: &TypeInterner) -> TypeId {
        interner.lazy(def_id)
    }

    pub fn lookup(&self, name: &str) -> Option<DefId> {
        self.names.get_index_of(name).map(|idx| DefId(idx as u32))
    }

    pub fn body(&self, def_id: DefId) -> Option<TypeId> {
        self.names
            .get_index(def_id.0 as usize)
            .and_then(|(_, body)| *body)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.names.get(name).is_some_and(Option::is_some)
    }

    /// Names declared but never defined.
    pub fn undefined_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .filter(|(_, body)| body.is_none())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TypeResolver for TypeEnvironment {
    fn resolve_lazy(&self, def_id: DefId, _interner: &TypeInterner) -> Option<TypeId> {
        self.body(def_id)
    }

    fn def_name(&self, def_id: DefId) -> Option<&str> {
        self.names
            .get_index(def_id.0 as usize)
            .map(|(name, _)| name.as_str())
    }
}
