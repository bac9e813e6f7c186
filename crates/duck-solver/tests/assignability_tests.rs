//! Assignability through the `TypeRef` front door.

use super::*;

fn num() -> TypeRef {
    TypeRef::number()
}

fn string() -> TypeRef {
    TypeRef::string()
}

fn field(name: &str, ty: TypeRef) -> FieldSpec {
    FieldSpec::new(name, ty)
}

fn fn_of(params: Vec<TypeRef>, ret: TypeRef) -> TypeRef {
    TypeRef::function(params.into_iter().map(ParamSpec::new), ret)
}

/// A spread of well-formed types covering every variant.
fn samples() -> Vec<TypeRef> {
    vec![
        num(),
        string(),
        TypeRef::boolean(),
        TypeRef::primitive("bigint"),
        TypeRef::primitive("Date"),
        TypeRef::primitive("object"),
        TypeRef::null(),
        TypeRef::undefined(),
        TypeRef::literal_string("hi"),
        TypeRef::literal_number(42.0),
        TypeRef::literal_boolean(true),
        TypeRef::shape([]),
        TypeRef::shape([field("a", num())]),
        TypeRef::shape([field("a", num()), field("b", string())]),
        TypeRef::shape([field("a", num()).optional()]),
        TypeRef::Shape(ShapeDescriptor::new([field("a", num())]).with_string_index(num())),
        fn_of(vec![num()], num()),
        fn_of(vec![num(), string()], num()),
        fn_of(vec![], TypeRef::Void),
        TypeRef::array(num()),
        TypeRef::array(TypeRef::shape([field("a", num())])),
        TypeRef::union([num(), string()]),
        TypeRef::union([TypeRef::shape([field("a", num())]), TypeRef::null()]),
        TypeRef::Any,
        TypeRef::Unknown,
        TypeRef::Void,
        TypeRef::Never,
    ]
}

// =============================================================================
// Core rules
// =============================================================================

#[test]
fn test_reflexivity() {
    for ty in samples() {
        assert!(is_assignable(&ty, &ty), "{ty:?} should be assignable to itself");
    }
}

#[test]
fn test_width_subtyping_examples() {
    let a = TypeRef::shape([field("a", num())]);
    let empty = TypeRef::shape([]);
    let ab = TypeRef::shape([field("a", num()), field("b", string())]);

    assert!(is_assignable(&a, &empty));
    assert!(!is_assignable(&empty, &a));
    assert!(is_assignable(&ab, &a));
}

#[test]
fn test_function_parameter_count_examples() {
    let one = fn_of(vec![num()], num());
    let two = fn_of(vec![num(), string()], num());

    assert!(is_assignable(&one, &two));
    assert!(!is_assignable(&two, &one));
}

#[test]
fn test_primitives() {
    assert!(is_assignable(&num(), &num()));
    assert!(!is_assignable(&num(), &string()));
    assert!(is_assignable(&TypeRef::Any, &num()));
    assert!(is_assignable(&num(), &TypeRef::Any));
    assert!(!is_assignable(&num(), &TypeRef::shape([])));
}

#[test]
fn test_never_and_any_short_circuit() {
    let shape = TypeRef::shape([field("a", num())]);
    for ty in samples() {
        assert!(is_assignable(&TypeRef::Never, &ty), "never -> {ty:?}");
        assert!(is_assignable(&ty, &TypeRef::Unknown), "{ty:?} -> unknown");
        if ty != TypeRef::Never {
            assert!(!is_assignable(&ty, &TypeRef::Never), "{ty:?} -> never");
            assert!(is_assignable(&TypeRef::Any, &ty), "any -> {ty:?}");
            assert!(is_assignable(&ty, &TypeRef::Any), "{ty:?} -> any");
        }
    }
    assert!(!is_assignable(&TypeRef::Any, &TypeRef::Never));
    assert!(is_assignable(&TypeRef::Never, &shape));
}

#[test]
fn test_void_rules() {
    assert!(is_assignable(&TypeRef::undefined(), &TypeRef::Void));
    assert!(is_assignable(&TypeRef::Never, &TypeRef::Void));
    assert!(is_assignable(&TypeRef::Any, &TypeRef::Void));
    assert!(!is_assignable(&num(), &TypeRef::Void));
    assert!(!is_assignable(&TypeRef::Void, &num()));
    assert!(is_assignable(&TypeRef::Void, &TypeRef::Unknown));
}

#[test]
fn test_arrays_and_unions() {
    assert!(is_assignable(
        &TypeRef::array(TypeRef::shape([field("a", num()), field("b", num())])),
        &TypeRef::array(TypeRef::shape([field("a", num())]))
    ));
    assert!(!is_assignable(
        &TypeRef::array(num()),
        &TypeRef::array(string())
    ));

    let sn = TypeRef::union([string(), num()]);
    assert!(is_assignable(&num(), &sn));
    assert!(!is_assignable(&sn, &num()));
    assert!(is_assignable(
        &TypeRef::union([TypeRef::literal_number(1.0), TypeRef::literal_number(2.0)]),
        &num()
    ));
}

// =============================================================================
// Transitivity
// =============================================================================

#[test]
fn test_transitivity_for_shapes() {
    let shapes = vec![
        TypeRef::shape([]),
        TypeRef::shape([field("a", num())]),
        TypeRef::shape([field("a", num()).optional()]),
        TypeRef::shape([field("a", num()), field("b", string())]),
        TypeRef::shape([field("a", TypeRef::literal_number(1.0)), field("b", string())]),
        TypeRef::shape([field("b", string())]),
        TypeRef::shape([field("a", TypeRef::union([num(), string()]))]),
        TypeRef::shape([field("a", TypeRef::shape([field("x", num())]))]),
        TypeRef::shape([field(
            "a",
            TypeRef::shape([field("x", num()), field("y", num())]),
        )]),
        TypeRef::Never,
        TypeRef::Any,
    ];

    for a in &shapes {
        for b in &shapes {
            for c in &shapes {
                // `any` is both top and bottom; chains through it are skipped.
                if *b == TypeRef::Any || drops_optional_field(b, c) {
                    continue;
                }
                if is_assignable(a, b) && is_assignable(b, c) {
                    assert!(
                        is_assignable(a, c),
                        "transitivity failed: {a:?} <: {b:?} <: {c:?}"
                    );
                }
            }
        }
    }
}

/// `middle` lacks a field that `last` declares optional. Width subtyping
/// forgets the field's type, so the chain need not compose.
fn drops_optional_field(middle: &TypeRef, last: &TypeRef) -> bool {
    let (TypeRef::Shape(middle), TypeRef::Shape(last)) = (middle, last) else {
        return false;
    };
    last.fields
        .iter()
        .filter(|f| f.optional)
        .any(|f| middle.fields.iter().all(|m| m.name != f.name))
}

#[test]
fn test_optional_fields_break_transitivity() {
    let wide = TypeRef::shape([field("a", TypeRef::union([num(), string()]))]);
    let empty = TypeRef::shape([]);
    let maybe_number = TypeRef::shape([field("a", num()).optional()]);

    assert!(is_assignable(&wide, &empty));
    assert!(is_assignable(&empty, &maybe_number));
    assert!(!is_assignable(&wide, &maybe_number));
}

// =============================================================================
// Malformed input and options
// =============================================================================

#[test]
fn test_malformed_inputs_are_not_assignable() {
    let dup = TypeRef::shape([field("a", num()), field("a", num())]);
    assert!(!is_assignable(&dup, &TypeRef::shape([])));
    assert!(!is_assignable(&TypeRef::shape([]), &dup));
    assert!(!is_assignable(&dup, &TypeRef::Any));

    let reference = TypeRef::reference("Missing");
    assert!(!is_assignable(&reference, &reference));
}

#[test]
fn test_options_through_front_door() {
    let dog = TypeRef::shape([field("name", string()), field("bark", TypeRef::boolean())]);
    let animal = TypeRef::shape([field("name", string())]);
    let takes_dog = fn_of(vec![dog], TypeRef::Void);
    let takes_animal = fn_of(vec![animal], TypeRef::Void);

    assert!(is_assignable(&takes_dog, &takes_animal));
    let strict = CompatOptions {
        strict_function_types: true,
        ..CompatOptions::default()
    };
    assert!(!is_assignable_with_options(&takes_dog, &takes_animal, strict));
    assert!(is_assignable_with_options(&takes_animal, &takes_dog, strict));

    let loose_nulls = CompatOptions {
        strict_null_checks: false,
        ..CompatOptions::default()
    };
    assert!(!is_assignable(&TypeRef::null(), &num()));
    assert!(is_assignable_with_options(&TypeRef::null(), &num(), loose_nulls));
}

#[test]
fn test_fresh_literal_through_front_door() {
    let literal = TypeRef::fresh_shape([field("a", num()), field("extra", num())]);
    let target = TypeRef::shape([field("a", num())]);
    assert!(!is_assignable(&literal, &target));

    let no_excess = CompatOptions {
        excess_property_checks: false,
        ..CompatOptions::default()
    };
    assert!(is_assignable_with_options(&literal, &target, no_excess));

    let regular = TypeRef::shape([field("a", num()), field("extra", num())]);
    assert!(is_assignable(&regular, &target));
}
