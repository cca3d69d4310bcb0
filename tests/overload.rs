//! S5 / P7: two top-level functions sharing a name but differing in their
//! parameter kinds resolve by the shape of the call's arguments; a nil
//! argument can leave that resolution ambiguous.

mod common;

#[test]
fn overloads_are_chosen_by_argument_type() {
    let output = common::run(
        r#"
        func describes(xi) {
            return "int";
        }
        func describes(xs) {
            return "string";
        }
        func main() {
            print(describes(1));
            print(describes("hi"));
        }
        "#,
    );
    assert_eq!(output, vec!["int", "string"]);
}

#[test]
fn overloads_distinguish_object_and_function_parameters() {
    let output = common::run(
        r#"
        func describes(oo) {
            return "object";
        }
        func describes(ff) {
            return "function";
        }
        func main() {
            var oo;
            oo = @;
            var ff;
            ff = func(): int { return 1; };
            print(describes(oo));
            print(describes(ff));
        }
        "#,
    );
    assert_eq!(output, vec!["object", "function"]);
}

#[test]
fn a_nil_argument_is_ambiguous_between_object_and_function_overloads() {
    let (kind, output) = common::run_err(
        r#"
        func describes(oo) {
            return "object";
        }
        func describes(ff) {
            return "function";
        }
        func main() {
            print(describes(nil));
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
    assert!(output.is_empty());
}

#[test]
fn calling_an_undeclared_overload_shape_is_a_name_error() {
    let (kind, _) = common::run_err(
        r#"
        func describes(xi) {
            return "int";
        }
        func main() {
            print(describes("hi"));
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
}

#[test]
fn redeclaring_the_same_name_and_parameter_shape_is_a_name_error() {
    let (kind, _) = common::run_err(
        r#"
        func describes(xi) {
            return 1;
        }
        func describes(yi) {
            return 2;
        }
        func main() {
            print(describes(1));
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
}
