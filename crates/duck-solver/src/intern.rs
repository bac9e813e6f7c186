//! Type interning for structural deduplication.
//!
//! Converts `TypeData` structures into lightweight `TypeId` handles:
//! - O(1) type equality (compare `TypeId` values)
//! - each unique structure stored once
//! - `Send + Sync`, so one interner can back checkers on many threads
//!
//! Stores are append-only. A poisoned lock is recovered rather than
//! propagated since no store is ever left half-updated across an await or
//! callback.

use crate::def::DefId;
use crate::types::*;
use duck_common::interner::{Atom, ShardedInterner};
use duck_common::limits::TYPE_LIST_INLINE;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

struct StoreInner<T> {
    items: Vec<Arc<T>>,
    map: FxHashMap<Arc<T>, u32>,
}

/// Hash-consing store handing out dense `u32` ids.
struct ValueInterner<T> {
    inner: RwLock<StoreInner<T>>,
}

impl<T> ValueInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        ValueInterner {
            inner: RwLock::new(StoreInner {
                items: Vec::new(),
                map: FxHashMap::default(),
            }),
        }
    }

    fn intern(&self, value: T) -> u32 {
        if let Some(&id) = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .get(&value)
        {
            return id;
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(&id) = inner.map.get(&value) {
            return id;
        }
        let arc = Arc::new(value);
        let id = inner.items.len() as u32;
        inner.items.push(arc.clone());
        inner.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<T>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .get(id as usize)
            .cloned()
    }

    fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .len()
    }
}

pub struct TypeInterner {
    strings: ShardedInterner,
    types: ValueInterner<TypeData>,
    object_shapes: ValueInterner<ObjectShape>,
    function_shapes: ValueInterner<FunctionShape>,
    type_lists: ValueInterner<Vec<TypeId>>,
}

impl TypeInterner {
    pub fn new() -> Self {
        let interner = TypeInterner {
            strings: ShardedInterner::new(),
            types: ValueInterner::new(),
            object_shapes: ValueInterner::new(),
            function_shapes: ValueInterner::new(),
            type_lists: ValueInterner::new(),
        };

        // Intrinsics occupy the fixed ids declared on `TypeId`.
        for kind in IntrinsicKind::ALL {
            let id = interner.types.intern(TypeData::Intrinsic(kind));
            debug_assert_eq!(id, kind.type_id().0);
        }
        let t = interner
            .types
            .intern(TypeData::Literal(LiteralValue::Boolean(true)));
        let f = interner
            .types
            .intern(TypeData::Literal(LiteralValue::Boolean(false)));
        debug_assert_eq!(t, TypeId::BOOLEAN_TRUE.0);
        debug_assert_eq!(f, TypeId::BOOLEAN_FALSE.0);

        interner
    }

    // -----------------------------------------------------------------------
    // Core intern / lookup
    // -----------------------------------------------------------------------

    pub fn intern(&self, data: TypeData) -> TypeId {
        TypeId(self.types.intern(data))
    }

    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.get(id.0).map(|data| *data)
    }

    /// Number of interned types, intrinsics included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.strings.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.strings.resolve(atom)
    }

    pub fn object_shape(&self, id: ObjectShapeId) -> Arc<ObjectShape> {
        self.object_shapes
            .get(id.0)
            .unwrap_or_else(|| Arc::new(ObjectShape::default()))
    }

    pub fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape> {
        self.function_shapes
            .get(id.0)
            .unwrap_or_else(|| Arc::new(FunctionShape::new(Vec::new(), TypeId::VOID)))
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<Vec<TypeId>> {
        self.type_lists
            .get(id.0)
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }

    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    pub fn literal_string(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeData::Literal(LiteralValue::String(atom)))
    }

    pub fn literal_number(&self, value: f64) -> TypeId {
        self.intern(TypeData::Literal(LiteralValue::Number(OrderedFloat(value))))
    }

    pub fn literal_boolean(&self, value: bool) -> TypeId {
        if value {
            TypeId::BOOLEAN_TRUE
        } else {
            TypeId::BOOLEAN_FALSE
        }
    }

    /// A primitive name the engine does not model, compared by name only.
    pub fn opaque(&self, name: &str) -> TypeId {
        let atom = self.intern_string(name);
        self.intern(TypeData::Opaque(atom))
    }

    pub fn lazy(&self, def_id: DefId) -> TypeId {
        self.intern(TypeData::Lazy(def_id))
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    /// Object type with only named properties.
    pub fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        self.object_with_shape(ObjectShape {
            properties,
            ..ObjectShape::default()
        })
    }

    /// Object literal type, subject to excess property checks.
    pub fn fresh_object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        self.object_with_shape(ObjectShape {
            flags: ObjectFlags::FRESH_LITERAL,
            properties,
            ..ObjectShape::default()
        })
    }

    /// Intern a full object shape. The given property order is recorded as
    /// declaration order, then properties are sorted into canonical order;
    /// for duplicate names the first entry wins.
    pub fn object_with_shape(&self, mut shape: ObjectShape) -> TypeId {
        for (index, prop) in shape.properties.iter_mut().enumerate() {
            prop.declaration_order = index as u32;
        }
        shape.properties.sort_by_key(|p| p.name);
        shape.properties.dedup_by_key(|p| p.name);
        let id = ObjectShapeId(self.object_shapes.intern(shape));
        self.intern(TypeData::Object(id))
    }

    pub fn function(&self, shape: FunctionShape) -> TypeId {
        let id = FunctionShapeId(self.function_shapes.intern(shape));
        self.intern(TypeData::Function(id))
    }

    /// The same object type without the fresh-literal flag.
    pub fn widen_freshness(&self, type_id: TypeId) -> TypeId {
        match self.lookup(type_id) {
            Some(TypeData::Object(shape_id)) => {
                let shape = self.object_shape(shape_id);
                if !shape.is_fresh() {
                    return type_id;
                }
                let mut widened = (*shape).clone();
                widened.flags.remove(ObjectFlags::FRESH_LITERAL);
                widened.properties.sort_by_key(|p| p.declaration_order);
                self.object_with_shape(widened)
            }
            _ => type_id,
        }
    }

    /// Build a normalized union.
    ///
    /// Members are flattened, `never` is dropped, `any` and `unknown` absorb
    /// everything, literals are absorbed by their widened primitive,
    /// `true | false` becomes `boolean`, and duplicates are removed. An empty
    /// union is `never`; a single member is returned as-is.
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat = TypeListBuffer::new();
        for member in members {
            match self.lookup(member) {
                Some(TypeData::Union(list_id)) => flat.extend(self.type_list(list_id).iter().copied()),
                _ => flat.push(member),
            }
        }

        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }

        flat.retain(|m| *m != TypeId::NEVER);
        flat.sort_unstable();
        flat.dedup();

        if flat.contains(&TypeId::BOOLEAN_TRUE) && flat.contains(&TypeId::BOOLEAN_FALSE) {
            flat.retain(|m| *m != TypeId::BOOLEAN_TRUE && *m != TypeId::BOOLEAN_FALSE);
            flat.push(TypeId::BOOLEAN);
            flat.sort_unstable();
            flat.dedup();
        }

        let has_string = flat.contains(&TypeId::STRING);
        let has_number = flat.contains(&TypeId::NUMBER);
        let has_boolean = flat.contains(&TypeId::BOOLEAN);
        if has_string || has_number || has_boolean {
            flat.retain(|m| match self.lookup(*m) {
                Some(TypeData::Literal(lit)) => {
                    !is_absorbed_literal(lit, has_string, has_number, has_boolean)
                }
                _ => true,
            });
        }

        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            n => {
                trace!(members = n, "interning union");
                let list_id = TypeListId(self.type_lists.intern(flat.into_vec()));
                self.intern(TypeData::Union(list_id))
            }
        }
    }

    /// Members of a union, or the type itself for a non-union.
    pub fn union_members(&self, type_id: TypeId) -> Arc<Vec<TypeId>> {
        match self.lookup(type_id) {
            Some(TypeData::Union(list_id)) => self.type_list(list_id),
            _ => Arc::new(vec![type_id]),
        }
    }
}

fn is_absorbed_literal(
    literal: LiteralValue,
    has_string: bool,
    has_number: bool,
    has_boolean: bool,
) -> bool {
    match literal {
        LiteralValue::String(_) => has_string,
        LiteralValue::Number(_) => has_number,
        LiteralValue::Boolean(_) => has_boolean,
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
