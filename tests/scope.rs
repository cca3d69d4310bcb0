//! `var` binds at function scope regardless of textual nesting; `bvar` binds
//! at the innermost block and can shadow an outer `var` of the same name.

mod common;

#[test]
fn var_declared_inside_a_while_body_is_visible_after_the_loop_ends() {
    let output = common::run(
        r#"
        func main() {
            var ii;
            ii = 0;
            while (ii < 3) {
                var seeni;
                seeni = ii;
                ii = ii + 1;
            }
            print(ii);
        }
        "#,
    );
    assert_eq!(output, vec!["3"]);
}

#[test]
fn bvar_shadows_an_outer_function_scope_variable_within_its_block() {
    let output = common::run(
        r#"
        func main() {
            var xi;
            xi = 1;
            if (true) {
                bvar xi;
                xi = 2;
                print(xi);
            }
            print(xi);
        }
        "#,
    );
    assert_eq!(output, vec!["2", "1"]);
}

#[test]
fn redeclaring_a_var_in_the_same_function_scope_is_a_name_error() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            var xi;
            var xi;
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
}

#[test]
fn redeclaring_a_bvar_in_the_same_block_is_a_name_error() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            if (true) {
                bvar xi;
                bvar xi;
            }
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
}

#[test]
fn two_sibling_blocks_may_each_declare_a_bvar_with_the_same_name() {
    let output = common::run(
        r#"
        func main() {
            if (true) {
                bvar xi;
                xi = 1;
                print(xi);
            }
            if (true) {
                bvar xi;
                xi = 2;
                print(xi);
            }
        }
        "#,
    );
    assert_eq!(output, vec!["1", "2"]);
}

#[test]
fn referencing_an_undeclared_name_is_a_name_error() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            print(qi);
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
}
