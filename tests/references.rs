//! S2 / P5: a `ref` parameter shares the caller's cell, so mutation inside
//! the callee is observable at the call site.

mod common;

#[test]
fn ref_parameter_mutates_caller_binding() {
    let output = common::run(
        r#"
        func incv(ref xi) {
            xi = xi + 1;
        }
        func main() {
            var ai;
            ai = 41;
            incv(ai);
            print(ai);
        }
        "#,
    );
    assert_eq!(output, vec!["42"]);
}

#[test]
fn by_value_parameter_does_not_mutate_caller_binding() {
    let output = common::run(
        r#"
        func incv(xi) {
            xi = xi + 1;
        }
        func main() {
            var ai;
            ai = 41;
            incv(ai);
            print(ai);
        }
        "#,
    );
    assert_eq!(output, vec!["41"]);
}

#[test]
fn ref_parameter_aliases_an_object_field_cell() {
    let output = common::run(
        r#"
        func incv(ref xi) {
            xi = xi + 1;
        }
        func main() {
            var oo;
            oo = @;
            oo.counti = 9;
            incv(oo.counti);
            print(oo.counti);
        }
        "#,
    );
    assert_eq!(output, vec!["10"]);
}

#[test]
fn ref_argument_must_be_a_qualified_name() {
    let (kind, output) = common::run_err(
        r#"
        func incv(ref xi) {
            xi = xi + 1;
        }
        func main() {
            incv(1 + 1);
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Type);
    assert!(output.is_empty());
}

#[test]
fn ref_parameter_with_interface_annotation_requires_matching_caller_declaration() {
    // the caller-side check only fires when the caller's qname is *itself*
    // declared with a (different) interface letter; an unconstrained `o`
    // variable is never rejected on that basis, only on whether its current
    // value structurally satisfies the formal's interface.
    let (kind, _) = common::run_err(
        r#"
        interface Q { xi; }
        interface R { xi; }
        func usev(ref pQ) {
            pQ.xi = pQ.xi + 1;
        }
        func main() {
            var oo;
            oo = @;
            oo.xi = 1;
            var pR;
            pR = oo;
            usev(pR);
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Type);
}

#[test]
fn ref_parameter_with_interface_annotation_accepts_unconstrained_caller_variable() {
    // an `o`-typed (no interface) caller variable is accepted as a ref
    // argument to an interface-typed formal as long as its current value
    // structurally satisfies that interface; only a *declared* interface
    // mismatch on the caller's side is rejected.
    let output = common::run(
        r#"
        interface Q { xi; }
        func usev(ref pQ) {
            pQ.xi = pQ.xi + 1;
        }
        func main() {
            var oo;
            oo = @;
            oo.xi = 1;
            usev(oo);
            print(oo.xi);
        }
        "#,
    );
    assert_eq!(output, vec!["2"]);
}

#[test]
fn ref_parameter_with_matching_interface_annotation_succeeds() {
    let output = common::run(
        r#"
        interface Q { xi; }
        func usev(ref pQ) {
            pQ.xi = pQ.xi + 1;
        }
        func main() {
            var oo;
            oo = @;
            oo.xi = 1;
            var pQ;
            pQ = oo;
            usev(pQ);
            print(pQ.xi);
        }
        "#,
    );
    assert_eq!(output, vec!["2"]);
}
