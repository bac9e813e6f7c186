use super::*;
use crate::types::{
    FunctionShape, IndexSignature, ObjectShape, ParamInfo, PropertyInfo, Visibility,
};

fn prop(interner: &TypeInterner, name: &str, type_id: TypeId) -> PropertyInfo {
    PropertyInfo::new(interner.intern_string(name), type_id)
}

fn func(params: Vec<ParamInfo>, return_type: TypeId) -> FunctionShape {
    FunctionShape::new(params, return_type)
}

// =============================================================================
// Intrinsics and literals
// =============================================================================

#[test]
fn test_never_and_any() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    assert!(checker.is_subtype_of(TypeId::NEVER, TypeId::STRING));
    assert!(checker.is_subtype_of(TypeId::NEVER, TypeId::NEVER));
    assert!(!checker.is_subtype_of(TypeId::STRING, TypeId::NEVER));
    assert!(!checker.is_subtype_of(TypeId::ANY, TypeId::NEVER));

    assert!(checker.is_subtype_of(TypeId::ANY, TypeId::NUMBER));
    assert!(checker.is_subtype_of(TypeId::NUMBER, TypeId::ANY));
}

#[test]
fn test_unknown_is_top() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let obj = interner.object(vec![]);

    assert!(checker.is_subtype_of(TypeId::STRING, TypeId::UNKNOWN));
    assert!(checker.is_subtype_of(obj, TypeId::UNKNOWN));
    assert!(checker.is_subtype_of(TypeId::UNKNOWN, TypeId::ANY));
    assert!(!checker.is_subtype_of(TypeId::UNKNOWN, TypeId::STRING));
    assert!(!checker.is_subtype_of(TypeId::UNKNOWN, obj));
}

#[test]
fn test_void() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    assert!(checker.is_subtype_of(TypeId::UNDEFINED, TypeId::VOID));
    assert!(!checker.is_subtype_of(TypeId::NULL, TypeId::VOID));
    assert!(!checker.is_subtype_of(TypeId::NUMBER, TypeId::VOID));
    assert!(!checker.is_subtype_of(TypeId::VOID, TypeId::UNDEFINED));
    assert!(checker.is_subtype_of(TypeId::VOID, TypeId::UNKNOWN));
}

#[test]
fn test_primitives_compare_by_identity() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    assert!(checker.is_subtype_of(TypeId::NUMBER, TypeId::NUMBER));
    assert!(!checker.is_subtype_of(TypeId::NUMBER, TypeId::STRING));
    assert!(!checker.is_subtype_of(TypeId::BIGINT, TypeId::NUMBER));

    let date = interner.opaque("Date");
    let regexp = interner.opaque("RegExp");
    assert!(checker.is_subtype_of(date, interner.opaque("Date")));
    assert!(!checker.is_subtype_of(date, regexp));
    assert!(!checker.is_subtype_of(date, TypeId::OBJECT));
}

#[test]
fn test_literals_widen() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let hi = interner.literal_string("hi");
    let one = interner.literal_number(1.0);

    assert!(checker.is_subtype_of(hi, TypeId::STRING));
    assert!(!checker.is_subtype_of(TypeId::STRING, hi));
    assert!(!checker.is_subtype_of(hi, interner.literal_string("ho")));
    assert!(checker.is_subtype_of(one, TypeId::NUMBER));
    assert!(!checker.is_subtype_of(one, TypeId::STRING));
    assert!(checker.is_subtype_of(TypeId::BOOLEAN_TRUE, TypeId::BOOLEAN));
    assert!(!checker.is_subtype_of(TypeId::BOOLEAN, TypeId::BOOLEAN_TRUE));
}

#[test]
fn test_strict_null_checks() {
    let interner = TypeInterner::new();
    let obj = interner.object(vec![prop(&interner, "a", TypeId::NUMBER)]);

    let mut strict = SubtypeChecker::new(&interner);
    assert!(!strict.is_subtype_of(TypeId::NULL, TypeId::STRING));
    assert!(!strict.is_subtype_of(TypeId::UNDEFINED, obj));
    assert!(strict.is_subtype_of(TypeId::NULL, TypeId::NULL));

    let mut loose = SubtypeChecker::new(&interner).with_strict_null_checks(false);
    assert!(loose.is_subtype_of(TypeId::NULL, TypeId::STRING));
    assert!(loose.is_subtype_of(TypeId::UNDEFINED, obj));
    assert!(!loose.is_subtype_of(TypeId::NULL, TypeId::NEVER));
}

#[test]
fn test_object_intrinsic() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let obj = interner.object(vec![]);
    let arr = interner.array(TypeId::NUMBER);
    let f = interner.function(func(vec![], TypeId::VOID));

    assert!(checker.is_subtype_of(obj, TypeId::OBJECT));
    assert!(checker.is_subtype_of(arr, TypeId::OBJECT));
    assert!(checker.is_subtype_of(f, TypeId::OBJECT));
    assert!(!checker.is_subtype_of(TypeId::STRING, TypeId::OBJECT));
    assert!(checker.is_subtype_of(TypeId::OBJECT, obj));
    let required = interner.object(vec![prop(&interner, "a", TypeId::NUMBER)]);
    assert!(!checker.is_subtype_of(TypeId::OBJECT, required));
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn test_object_width_and_depth() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    let empty = interner.object(vec![]);
    let a = interner.object(vec![prop(&interner, "a", TypeId::NUMBER)]);
    let ab = interner.object(vec![
        prop(&interner, "a", TypeId::NUMBER),
        prop(&interner, "b", TypeId::STRING),
    ]);
    let a_string = interner.object(vec![prop(&interner, "a", TypeId::STRING)]);

    assert!(checker.is_subtype_of(a, empty));
    assert!(!checker.is_subtype_of(empty, a));
    assert!(checker.is_subtype_of(ab, a));
    assert!(!checker.is_subtype_of(a, ab));
    assert!(!checker.is_subtype_of(a_string, a));

    let nested_src = interner.object(vec![prop(&interner, "inner", ab)]);
    let nested_tgt = interner.object(vec![prop(&interner, "inner", a)]);
    assert!(checker.is_subtype_of(nested_src, nested_tgt));
    assert!(!checker.is_subtype_of(nested_tgt, nested_src));
}

#[test]
fn test_object_optional_properties() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let name = interner.intern_string("a");

    let required = interner.object(vec![PropertyInfo::new(name, TypeId::NUMBER)]);
    let optional = interner.object(vec![PropertyInfo::optional(name, TypeId::NUMBER)]);
    let empty = interner.object(vec![]);

    assert!(checker.is_subtype_of(required, optional));
    assert!(checker.is_subtype_of(empty, optional));
    assert!(!checker.is_subtype_of(optional, required));
}

#[test]
fn test_object_readonly_is_ignored() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let name = interner.intern_string("a");

    let mutable = interner.object(vec![PropertyInfo::new(name, TypeId::NUMBER)]);
    let readonly = interner.object(vec![PropertyInfo {
        readonly: true,
        ..PropertyInfo::new(name, TypeId::NUMBER)
    }]);

    assert!(checker.is_subtype_of(mutable, readonly));
    assert!(checker.is_subtype_of(readonly, mutable));
}

#[test]
fn test_private_members_are_nominal() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let name = interner.intern_string("secret");
    let private_in = |class: &str| PropertyInfo {
        visibility: Visibility::Private,
        parent_id: Some(interner.intern_string(class)),
        ..PropertyInfo::new(name, TypeId::NUMBER)
    };

    let foo = interner.object(vec![private_in("Foo")]);
    let foo_again = interner.object(vec![
        private_in("Foo"),
        prop(&interner, "extra", TypeId::STRING),
    ]);
    let bar = interner.object(vec![private_in("Bar")]);
    let public = interner.object(vec![PropertyInfo::new(name, TypeId::NUMBER)]);

    assert!(checker.is_subtype_of(foo_again, foo));
    assert!(!checker.is_subtype_of(bar, foo));
    assert!(!checker.is_subtype_of(public, foo));
    assert!(!checker.is_subtype_of(foo, public));
}

#[test]
fn test_protected_members_are_nominal() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let name = interner.intern_string("x");
    let base = interner.intern_string("Base");

    let protected = interner.object(vec![PropertyInfo {
        visibility: Visibility::Protected,
        parent_id: Some(base),
        ..PropertyInfo::new(name, TypeId::NUMBER)
    }]);
    let private = interner.object(vec![PropertyInfo {
        visibility: Visibility::Private,
        parent_id: Some(base),
        ..PropertyInfo::new(name, TypeId::NUMBER)
    }]);

    assert!(checker.is_subtype_of(protected, protected));
    assert!(!checker.is_subtype_of(private, protected));
}

#[test]
fn test_string_index_signature() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    let dict = interner.object_with_shape(ObjectShape {
        string_index: Some(IndexSignature {
            key_type: TypeId::STRING,
            value_type: TypeId::NUMBER,
            readonly: false,
        }),
        ..ObjectShape::default()
    });
    let numbers = interner.object(vec![
        prop(&interner, "a", TypeId::NUMBER),
        prop(&interner, "b", TypeId::NUMBER),
    ]);
    let mixed = interner.object(vec![
        prop(&interner, "a", TypeId::NUMBER),
        prop(&interner, "b", TypeId::STRING),
    ]);

    assert!(checker.is_subtype_of(numbers, dict));
    assert!(!checker.is_subtype_of(mixed, dict));
    assert!(checker.is_subtype_of(interner.object(vec![]), dict));
}

#[test]
fn test_number_index_signature_checks_numeric_names_only() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    let list = interner.object_with_shape(ObjectShape {
        number_index: Some(IndexSignature {
            key_type: TypeId::NUMBER,
            value_type: TypeId::STRING,
            readonly: false,
        }),
        ..ObjectShape::default()
    });
    let ok = interner.object(vec![
        prop(&interner, "0", TypeId::STRING),
        prop(&interner, "length", TypeId::NUMBER),
    ]);
    let bad = interner.object(vec![prop(&interner, "1", TypeId::NUMBER)]);

    assert!(checker.is_subtype_of(ok, list));
    assert!(!checker.is_subtype_of(bad, list));
}

// =============================================================================
// Functions
// =============================================================================

#[test]
fn test_function_parameter_count() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    let one = interner.function(func(vec![ParamInfo::required(TypeId::NUMBER)], TypeId::NUMBER));
    let two = interner.function(func(
        vec![
            ParamInfo::required(TypeId::NUMBER),
            ParamInfo::required(TypeId::STRING),
        ],
        TypeId::NUMBER,
    ));
    let none = interner.function(func(vec![], TypeId::NUMBER));

    assert!(checker.is_subtype_of(one, two));
    assert!(!checker.is_subtype_of(two, one));
    assert!(checker.is_subtype_of(none, two));
}

#[test]
fn test_function_optional_parameters_do_not_count_as_required() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);

    let opt = interner.function(func(
        vec![
            ParamInfo::required(TypeId::NUMBER),
            ParamInfo::optional(TypeId::STRING),
        ],
        TypeId::VOID,
    ));
    let one = interner.function(func(vec![ParamInfo::required(TypeId::NUMBER)], TypeId::VOID));

    assert!(checker.is_subtype_of(opt, one));
    assert!(checker.is_subtype_of(one, opt));
}

#[test]
fn test_function_return_is_covariant() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let hi = interner.literal_string("hi");

    let returns_hi = interner.function(func(vec![], hi));
    let returns_string = interner.function(func(vec![], TypeId::STRING));
    let returns_number = interner.function(func(vec![], TypeId::NUMBER));

    assert!(checker.is_subtype_of(returns_hi, returns_string));
    assert!(!checker.is_subtype_of(returns_string, returns_hi));
    assert!(!checker.is_subtype_of(returns_number, returns_string));
}

#[test]
fn test_parameter_variance_modes() {
    let interner = TypeInterner::new();
    let animal = interner.object(vec![prop(&interner, "name", TypeId::STRING)]);
    let dog = interner.object(vec![
        prop(&interner, "name", TypeId::STRING),
        prop(&interner, "bark", TypeId::BOOLEAN),
    ]);

    let takes_dog = interner.function(func(vec![ParamInfo::required(dog)], TypeId::VOID));
    let takes_animal = interner.function(func(vec![ParamInfo::required(animal)], TypeId::VOID));

    let mut bivariant = SubtypeChecker::new(&interner);
    assert!(bivariant.is_subtype_of(takes_animal, takes_dog));
    assert!(bivariant.is_subtype_of(takes_dog, takes_animal));

    let mut strict = SubtypeChecker::new(&interner).with_strict_function_types(true);
    assert!(strict.is_subtype_of(takes_animal, takes_dog));
    assert!(!strict.is_subtype_of(takes_dog, takes_animal));

    let method_dog = interner.function(FunctionShape {
        is_method: true,
        ..func(vec![ParamInfo::required(dog)], TypeId::VOID)
    });
    let method_animal = interner.function(FunctionShape {
        is_method: true,
        ..func(vec![ParamInfo::required(animal)], TypeId::VOID)
    });
    assert!(strict.is_subtype_of(method_dog, method_animal));
}

#[test]
fn test_unrelated_parameters_fail_in_both_modes() {
    let interner = TypeInterner::new();
    let takes_number = interner.function(func(vec![ParamInfo::required(TypeId::NUMBER)], TypeId::VOID));
    let takes_string = interner.function(func(vec![ParamInfo::required(TypeId::STRING)], TypeId::VOID));

    assert!(!SubtypeChecker::new(&interner).is_subtype_of(takes_number, takes_string));
    assert!(
        !SubtypeChecker::new(&interner)
            .with_strict_function_types(true)
            .is_subtype_of(takes_number, takes_string)
    );
}

#[test]
fn test_rest_parameters() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let numbers = interner.array(TypeId::NUMBER);

    let rest_numbers = interner.function(func(vec![ParamInfo::rest(numbers)], TypeId::VOID));
    let two_numbers = interner.function(func(
        vec![
            ParamInfo::required(TypeId::NUMBER),
            ParamInfo::required(TypeId::NUMBER),
        ],
        TypeId::VOID,
    ));
    let number_string = interner.function(func(
        vec![
            ParamInfo::required(TypeId::NUMBER),
            ParamInfo::required(TypeId::STRING),
        ],
        TypeId::VOID,
    ));

    // A target rest parameter supplies any number of arguments.
    assert!(checker.is_subtype_of(two_numbers, rest_numbers));
    assert!(!checker.is_subtype_of(number_string, rest_numbers));
    // A source rest parameter accepts whatever the target passes.
    assert!(checker.is_subtype_of(rest_numbers, two_numbers));
    assert!(!checker.is_subtype_of(rest_numbers, number_string));
}

// =============================================================================
// Arrays and unions
// =============================================================================

#[test]
fn test_arrays_are_covariant() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let hi = interner.literal_string("hi");

    assert!(checker.is_subtype_of(interner.array(hi), interner.array(TypeId::STRING)));
    assert!(!checker.is_subtype_of(interner.array(TypeId::STRING), interner.array(hi)));
    assert!(!checker.is_subtype_of(interner.array(TypeId::NUMBER), TypeId::NUMBER));
}

#[test]
fn test_functions_and_arrays_against_shapes() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let f = interner.function(func(vec![], TypeId::VOID));
    let arr = interner.array(TypeId::NUMBER);
    let empty = interner.object(vec![]);
    let required = interner.object(vec![prop(&interner, "length", TypeId::NUMBER)]);

    assert!(checker.is_subtype_of(f, empty));
    assert!(checker.is_subtype_of(arr, empty));
    assert!(!checker.is_subtype_of(arr, required));
    assert!(!checker.is_subtype_of(empty, f));
}

#[test]
fn test_unions() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let sn = interner.union(vec![TypeId::STRING, TypeId::NUMBER]);
    let snb = interner.union(vec![TypeId::STRING, TypeId::NUMBER, TypeId::BOOLEAN]);

    assert!(checker.is_subtype_of(TypeId::STRING, sn));
    assert!(checker.is_subtype_of(interner.literal_number(4.0), sn));
    assert!(!checker.is_subtype_of(TypeId::BOOLEAN, sn));
    assert!(checker.is_subtype_of(sn, snb));
    assert!(!checker.is_subtype_of(snb, sn));
    assert!(!checker.is_subtype_of(sn, TypeId::STRING));

    let a = interner.object(vec![prop(&interner, "a", TypeId::NUMBER)]);
    let b = interner.object(vec![prop(&interner, "b", TypeId::NUMBER)]);
    let ab = interner.object(vec![
        prop(&interner, "a", TypeId::NUMBER),
        prop(&interner, "b", TypeId::NUMBER),
    ]);
    let a_or_b = interner.union(vec![a, b]);
    assert!(checker.is_subtype_of(ab, a_or_b));
    assert!(!checker.is_subtype_of(a_or_b, ab));
}

// =============================================================================
// Results and explanations
// =============================================================================

#[test]
fn test_subtype_result_helpers() {
    assert!(SubtypeResult::True.is_true());
    assert!(SubtypeResult::CycleDetected.is_true());
    assert!(SubtypeResult::False.is_false());
    assert!(SubtypeResult::DepthExceeded.is_false());
    assert_eq!(SubtypeResult::from_bool(true), SubtypeResult::True);
}

#[test]
fn test_explain_missing_property() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let a = interner.object(vec![prop(&interner, "a", TypeId::NUMBER)]);
    let empty = interner.object(vec![]);

    assert_eq!(checker.explain_failure(a, empty), None);
    assert_eq!(
        checker.explain_failure(empty, a),
        Some(crate::SubtypeFailureReason::MissingProperty {
            property_name: interner.intern_string("a"),
            source_type: empty,
            target_type: a,
        })
    );
}

#[test]
fn test_explain_property_and_parameter_mismatch() {
    let interner = TypeInterner::new();
    let mut checker = SubtypeChecker::new(&interner);
    let a_string = interner.object(vec![prop(&interner, "a", TypeId::STRING)]);
    let a_number = interner.object(vec![prop(&interner, "a", TypeId::NUMBER)]);

    let Some(crate::SubtypeFailureReason::PropertyTypeMismatch {
        source_property_type,
        target_property_type,
        nested_reason,
        ..
    }) = checker.explain_failure(a_string, a_number)
    else {
        panic!("expected property mismatch");
    };
    assert_eq!(source_property_type, TypeId::STRING);
    assert_eq!(target_property_type, TypeId::NUMBER);
    assert!(nested_reason.is_none());

    let two = interner.function(func(
        vec![
            ParamInfo::required(TypeId::NUMBER),
            ParamInfo::required(TypeId::STRING),
        ],
        TypeId::VOID,
    ));
    let one = interner.function(func(vec![ParamInfo::required(TypeId::NUMBER)], TypeId::VOID));
    assert_eq!(
        checker.explain_failure(two, one),
        Some(crate::SubtypeFailureReason::TooManyParameters {
            source_count: 2,
            target_count: 1,
        })
    );
}

#[test]
fn test_free_function_uses_defaults() {
    let interner = TypeInterner::new();
    assert!(is_subtype_of(&interner, TypeId::NEVER, TypeId::STRING));
    assert!(!is_subtype_of(&interner, TypeId::NULL, TypeId::STRING));
}
