//! `==`/`!=` never raise: nil compares equal only to nil (object-nil and
//! function-nil are interchangeable for this purpose), same-tag values
//! compare by payload, and anything else — including a plain tag mismatch —
//! is simply unequal.

mod common;

#[test]
fn unassigned_object_and_function_variables_are_both_nil_and_equal_to_each_other() {
    let output = common::run(
        r#"
        func main() {
            var oo;
            var ff;
            print(oo == nil);
            print(ff == nil);
            print(oo == ff);
        }
        "#,
    );
    assert_eq!(output, vec!["true", "true", "true"]);
}

#[test]
fn a_populated_object_is_never_equal_to_nil() {
    let output = common::run(
        r#"
        func main() {
            var oo;
            oo = @;
            print(oo == nil);
            print(oo != nil);
        }
        "#,
    );
    assert_eq!(output, vec!["false", "true"]);
}

#[test]
fn mismatched_scalar_tags_compare_unequal_rather_than_erroring() {
    // comparing across value kinds never faults; it is simply false.
    let output = common::run(
        r#"
        func main() {
            var oo;
            oo = @;
            print(oo == 1);
        }
        "#,
    );
    assert_eq!(output, vec!["false"]);
}

#[test]
fn two_references_to_the_same_named_function_are_equal() {
    let output = common::run(
        r#"
        func doublei(xi) {
            return xi * 2;
        }
        func main() {
            var fa;
            var fb;
            fa = doublei;
            fb = doublei;
            print(fa == fb);
        }
        "#,
    );
    assert_eq!(output, vec!["true"]);
}

#[test]
fn a_named_function_reference_never_equals_a_closure() {
    let output = common::run(
        r#"
        func zerov() {
        }
        func main() {
            var fa;
            var fb;
            fa = zerov;
            fb = func(): void { };
            print(fa == fb);
        }
        "#,
    );
    assert_eq!(output, vec!["false"]);
}

#[test]
fn string_equality_compares_contents() {
    let output = common::run(
        r#"
        func main() {
            var stras;
            var strbs;
            stras = "same";
            strbs = "same";
            print(stras == strbs);
            print(stras == "different");
        }
        "#,
    );
    assert_eq!(output, vec!["true", "false"]);
}
