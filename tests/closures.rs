//! S4 / P6: a lambda captures a deep snapshot of its lexical environment at
//! creation time — scalars are copied by value, objects and functions keep
//! sharing their heap identity.

mod common;

#[test]
fn lambda_sees_the_scalar_it_captured_not_later_reassignments() {
    let output = common::run(
        r#"
        func main() {
            var xi;
            xi = 10;
            var ff;
            ff = func(): int { return xi + 1; };
            xi = 99;
            print(ff());
        }
        "#,
    );
    assert_eq!(output, vec!["11"]);
}

#[test]
fn two_lambda_literals_are_distinct_closure_identities() {
    let output = common::run(
        r#"
        func main() {
            var fa;
            var fb;
            fa = func(): int { return 1; };
            fb = func(): int { return 1; };
            print(fa == fb);
            print(fa == fa);
        }
        "#,
    );
    assert_eq!(output, vec!["false", "true"]);
}

#[test]
fn lambda_capturing_an_object_observes_later_mutations_through_shared_identity() {
    let output = common::run(
        r#"
        func main() {
            var oo;
            oo = @;
            oo.counti = 1;
            var ff;
            ff = func(): int { return oo.counti; };
            oo.counti = 5;
            print(ff());
        }
        "#,
    );
    assert_eq!(output, vec!["5"]);
}

#[test]
fn nested_closures_each_capture_their_own_snapshot() {
    let output = common::run(
        r#"
        func makef(xi) {
            return func(): int { return xi; };
        }
        func main() {
            var fa;
            var fb;
            fa = makef(1);
            fb = makef(2);
            print(fa());
            print(fb());
        }
        "#,
    );
    assert_eq!(output, vec!["1", "2"]);
}

#[test]
fn closure_passed_as_a_callback_argument() {
    let output = common::run(
        r#"
        func applyi(ff) {
            return ff();
        }
        func main() {
            var xi;
            xi = 7;
            var ff;
            ff = func(): int { return xi * 2; };
            print(applyi(ff));
        }
        "#,
    );
    assert_eq!(output, vec!["14"]);
}

#[test]
fn bare_top_level_function_name_materializes_a_function_value() {
    // a bare name not bound as a variable but matching exactly one
    // top-level function materializes a callable reference to it.
    let output = common::run(
        r#"
        func doublei(xi) {
            return xi * 2;
        }
        func applyi(ff) {
            return ff(21);
        }
        func main() {
            print(applyi(doublei));
        }
        "#,
    );
    assert_eq!(output, vec!["42"]);
}
