//! Interned type representation.
//!
//! `TypeData` is the structural form of a type. It is interned by
//! [`TypeInterner`](crate::TypeInterner) into a `TypeId` handle, so type
//! equality is an integer comparison and every unique structure is stored
//! once. Variants carry ids only, which keeps `TypeData` `Copy`.

use crate::def::DefId;
use bitflags::bitflags;
use duck_common::interner::Atom;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);
    pub const UNDEFINED: TypeId = TypeId(4);
    pub const NULL: TypeId = TypeId(5);
    pub const BOOLEAN: TypeId = TypeId(6);
    pub const NUMBER: TypeId = TypeId(7);
    pub const STRING: TypeId = TypeId(8);
    pub const BIGINT: TypeId = TypeId(9);
    pub const SYMBOL: TypeId = TypeId(10);
    /// The non-primitive `object` type.
    pub const OBJECT: TypeId = TypeId(11);
    pub const BOOLEAN_TRUE: TypeId = TypeId(12);
    pub const BOOLEAN_FALSE: TypeId = TypeId(13);

    /// First id handed out for user-constructed types.
    pub const FIRST_USER: u32 = 14;

    #[inline]
    pub fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[inline]
    pub fn is_nullish(self) -> bool {
        self == Self::NULL || self == Self::UNDEFINED
    }
}

/// Built-in types with a fixed `TypeId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Bigint,
    Symbol,
    Object,
}

impl IntrinsicKind {
    pub const ALL: [IntrinsicKind; 12] = [
        IntrinsicKind::Any,
        IntrinsicKind::Unknown,
        IntrinsicKind::Never,
        IntrinsicKind::Void,
        IntrinsicKind::Undefined,
        IntrinsicKind::Null,
        IntrinsicKind::Boolean,
        IntrinsicKind::Number,
        IntrinsicKind::String,
        IntrinsicKind::Bigint,
        IntrinsicKind::Symbol,
        IntrinsicKind::Object,
    ];

    pub fn type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Any => TypeId::ANY,
            IntrinsicKind::Unknown => TypeId::UNKNOWN,
            IntrinsicKind::Never => TypeId::NEVER,
            IntrinsicKind::Void => TypeId::VOID,
            IntrinsicKind::Undefined => TypeId::UNDEFINED,
            IntrinsicKind::Null => TypeId::NULL,
            IntrinsicKind::Boolean => TypeId::BOOLEAN,
            IntrinsicKind::Number => TypeId::NUMBER,
            IntrinsicKind::String => TypeId::STRING,
            IntrinsicKind::Bigint => TypeId::BIGINT,
            IntrinsicKind::Symbol => TypeId::SYMBOL,
            IntrinsicKind::Object => TypeId::OBJECT,
        }
    }

    /// Map a TypeScript keyword to its intrinsic.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "any" => IntrinsicKind::Any,
            "unknown" => IntrinsicKind::Unknown,
            "never" => IntrinsicKind::Never,
            "void" => IntrinsicKind::Void,
            "undefined" => IntrinsicKind::Undefined,
            "null" => IntrinsicKind::Null,
            "boolean" => IntrinsicKind::Boolean,
            "number" => IntrinsicKind::Number,
            "string" => IntrinsicKind::String,
            "bigint" => IntrinsicKind::Bigint,
            "symbol" => IntrinsicKind::Symbol,
            "object" => IntrinsicKind::Object,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Number => "number",
            IntrinsicKind::String => "string",
            IntrinsicKind::Bigint => "bigint",
            IntrinsicKind::Symbol => "symbol",
            IntrinsicKind::Object => "object",
        }
    }
}

/// `f64` with total equality and hashing, so numeric literals can be interned.
///
/// `-0.0` and `0.0` compare equal and every NaN is the same value.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct OrderedFloat(pub f64);

impl OrderedFloat {
    #[inline]
    fn canonical_bits(self) -> u64 {
        if self.0 == 0.0 {
            0.0f64.to_bits()
        } else if self.0.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for OrderedFloat {}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralValue {
    String(Atom),
    Number(OrderedFloat),
    Boolean(bool),
}

impl LiteralValue {
    /// The primitive a literal widens to.
    pub fn widened(self) -> TypeId {
        match self {
            LiteralValue::String(_) => TypeId::STRING,
            LiteralValue::Number(_) => TypeId::NUMBER,
            LiteralValue::Boolean(_) => TypeId::BOOLEAN,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

#[derive(Clone, Debug)]
pub struct PropertyInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
    pub is_method: bool,
    pub visibility: Visibility,
    /// Declaring class for private/protected members.
    pub parent_id: Option<Atom>,
    /// Position in the declared shape, used only for display. Not part of
    /// the shape's identity.
    pub declaration_order: u32,
}

impl PartialEq for PropertyInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_id == other.type_id
            && self.optional == other.optional
            && self.readonly == other.readonly
            && self.is_method == other.is_method
            && self.visibility == other.visibility
            && self.parent_id == other.parent_id
    }
}

impl Eq for PropertyInfo {}

impl Hash for PropertyInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.type_id.hash(state);
        self.optional.hash(state);
        self.readonly.hash(state);
        self.is_method.hash(state);
        self.visibility.hash(state);
        self.parent_id.hash(state);
    }
}

impl PropertyInfo {
    pub fn new(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            name,
            type_id,
            optional: false,
            readonly: false,
            is_method: false,
            visibility: Visibility::Public,
            parent_id: None,
            declaration_order: 0,
        }
    }

    pub fn optional(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            optional: true,
            ..Self::new(name, type_id)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexSignature {
    pub key_type: TypeId,
    pub value_type: TypeId,
    pub readonly: bool,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u32 {
        /// Object literal written at the assignment site; subject to
        /// excess property checks.
        const FRESH_LITERAL = 1 << 0;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    pub flags: ObjectFlags,
    /// Sorted by name atom.
    pub properties: Vec<PropertyInfo>,
    pub string_index: Option<IndexSignature>,
    pub number_index: Option<IndexSignature>,
}

impl ObjectShape {
    pub fn find_property(&self, name: Atom) -> Option<&PropertyInfo> {
        self.properties
            .binary_search_by_key(&name, |p| p.name)
            .ok()
            .map(|idx| &self.properties[idx])
    }

    /// Properties as they were declared.
    pub fn properties_in_declaration_order(&self) -> Vec<&PropertyInfo> {
        let mut props: Vec<_> = self.properties.iter().collect();
        props.sort_by_key(|p| p.declaration_order);
        props
    }

    pub fn is_fresh(&self) -> bool {
        self.flags.contains(ObjectFlags::FRESH_LITERAL)
    }

    pub fn has_index_signature(&self) -> bool {
        self.string_index.is_some() || self.number_index.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Option<Atom>,
    /// For a rest parameter this is the array type, not the element type.
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

impl ParamInfo {
    pub fn required(type_id: TypeId) -> Self {
        ParamInfo {
            name: None,
            type_id,
            optional: false,
            rest: false,
        }
    }

    pub fn named(name: Atom, type_id: TypeId) -> Self {
        ParamInfo {
            name: Some(name),
            ..Self::required(type_id)
        }
    }

    pub fn optional(type_id: TypeId) -> Self {
        ParamInfo {
            optional: true,
            ..Self::required(type_id)
        }
    }

    pub fn rest(array_type: TypeId) -> Self {
        ParamInfo {
            rest: true,
            ..Self::required(array_type)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    /// Method signatures stay bivariant in their parameters under
    /// `strictFunctionTypes`.
    pub is_method: bool,
}

impl FunctionShape {
    pub fn new(params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        FunctionShape {
            params,
            return_type,
            is_method: false,
        }
    }

    /// Parameters that are neither optional nor rest.
    pub fn required_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.optional && !p.rest)
            .count()
    }

    /// Parameters before the rest parameter, if any.
    pub fn fixed_params(&self) -> &[ParamInfo] {
        match self.params.last() {
            Some(last) if last.rest => &self.params[..self.params.len() - 1],
            _ => &self.params,
        }
    }

    pub fn rest_param(&self) -> Option<&ParamInfo> {
        self.params.last().filter(|p| p.rest)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectShapeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionShapeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeListId(pub u32);

/// Structural form of an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// A primitive name the engine does not know; equal only to itself.
    Opaque(Atom),
    Literal(LiteralValue),
    Object(ObjectShapeId),
    Function(FunctionShapeId),
    Array(TypeId),
    /// Normalized: flattened, deduplicated, sorted, at least two members.
    Union(TypeListId),
    /// Reference to a named declaration, resolved through a `TypeResolver`.
    Lazy(DefId),
}
