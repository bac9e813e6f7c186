//! Caller-facing type values.
//!
//! `TypeRef` is a plain owned tree describing a type. It is what callers
//! construct (directly or from JSON) and what [`TypeLowering`](crate::TypeLowering)
//! turns into interned `TypeId`s. Nothing here is validated; lowering reports
//! malformed trees.
//!
//! JSON form is internally tagged on `kind`:
//!
//! ```json
//! { "kind": "shape", "fields": [ { "name": "a", "type": { "kind": "primitive", "name": "number" } } ] }
//! ```

use crate::types::Visibility;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    /// A primitive by name. Built-in names map to intrinsics; any other
    /// name is an opaque primitive equal only to itself.
    Primitive { name: String },
    Literal { value: LiteralRef },
    Shape(ShapeDescriptor),
    Function(FunctionSignature),
    Array { element: Box<TypeRef> },
    Union { members: Vec<TypeRef> },
    /// Reference to a named declaration in the type environment.
    Ref { name: String },
    Any,
    Unknown,
    Void,
    Never,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralRef {
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDescriptor {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_index: Option<Box<TypeRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_index: Option<Box<TypeRef>>,
    /// Object literal written at the assignment site.
    #[serde(default, skip_serializing_if = "is_false")]
    pub fresh: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(default)]
    pub visibility: Visibility,
    /// Declaring class of a private or protected field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSignature {
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    pub return_type: Box<TypeRef>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub method: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// `...name: T[]`; `ty` is the array type.
    #[serde(default, skip_serializing_if = "is_false")]
    pub rest: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

impl TypeRef {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeRef::Primitive { name: name.into() }
    }

    pub fn number() -> Self {
        Self::primitive("number")
    }

    pub fn string() -> Self {
        Self::primitive("string")
    }

    pub fn boolean() -> Self {
        Self::primitive("boolean")
    }

    pub fn null() -> Self {
        Self::primitive("null")
    }

    pub fn undefined() -> Self {
        Self::primitive("undefined")
    }

    pub fn literal_string(value: impl Into<String>) -> Self {
        TypeRef::Literal {
            value: LiteralRef::String(value.into()),
        }
    }

    pub fn literal_number(value: f64) -> Self {
        TypeRef::Literal {
            value: LiteralRef::Number(value),
        }
    }

    pub fn literal_boolean(value: bool) -> Self {
        TypeRef::Literal {
            value: LiteralRef::Boolean(value),
        }
    }

    pub fn shape(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        TypeRef::Shape(ShapeDescriptor::new(fields))
    }

    /// A shape marked as a fresh object literal.
    pub fn fresh_shape(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        TypeRef::Shape(ShapeDescriptor::new(fields).fresh())
    }

    pub fn function(params: impl IntoIterator<Item = ParamSpec>, return_type: TypeRef) -> Self {
        TypeRef::Function(FunctionSignature::new(params, return_type))
    }

    pub fn method(params: impl IntoIterator<Item = ParamSpec>, return_type: TypeRef) -> Self {
        TypeRef::Function(FunctionSignature {
            method: true,
            ..FunctionSignature::new(params, return_type)
        })
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
        }
    }

    pub fn union(members: impl IntoIterator<Item = TypeRef>) -> Self {
        TypeRef::Union {
            members: members.into_iter().collect(),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeRef::Ref { name: name.into() }
    }
}

impl ShapeDescriptor {
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        ShapeDescriptor {
            fields: fields.into_iter().collect(),
            ..ShapeDescriptor::default()
        }
    }

    pub fn with_string_index(mut self, value: TypeRef) -> Self {
        self.string_index = Some(Box::new(value));
        self
    }

    pub fn with_number_index(mut self, value: TypeRef) -> Self {
        self.number_index = Some(Box::new(value));
        self
    }

    pub fn fresh(mut self) -> Self {
        self.fresh = true;
        self
    }
}

impl From<ShapeDescriptor> for TypeRef {
    fn from(shape: ShapeDescriptor) -> Self {
        TypeRef::Shape(shape)
    }
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        FieldSpec {
            name: name.into(),
            ty,
            optional: false,
            readonly: false,
            visibility: Visibility::Public,
            origin: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn private(mut self, origin: impl Into<String>) -> Self {
        self.visibility = Visibility::Private;
        self.origin = Some(origin.into());
        self
    }

    pub fn protected(mut self, origin: impl Into<String>) -> Self {
        self.visibility = Visibility::Protected;
        self.origin = Some(origin.into());
        self
    }
}

impl FunctionSignature {
    pub fn new(params: impl IntoIterator<Item = ParamSpec>, return_type: TypeRef) -> Self {
        FunctionSignature {
            params: params.into_iter().collect(),
            return_type: Box::new(return_type),
            method: false,
        }
    }
}

impl ParamSpec {
    pub fn new(ty: TypeRef) -> Self {
        ParamSpec {
            name: None,
            ty,
            optional: false,
            rest: false,
        }
    }

    pub fn named(name: impl Into<String>, ty: TypeRef) -> Self {
        ParamSpec {
            name: Some(name.into()),
            ..Self::new(ty)
        }
    }

    /// `...xs: T[]`. `array_type` should be an array.
    pub fn rest(array_type: TypeRef) -> Self {
        ParamSpec {
            rest: true,
            ..Self::new(array_type)
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
