//! `if`/`else` and `while`, including the requirement that their condition
//! evaluates to `bool`.

mod common;

#[test]
fn if_without_else_runs_the_body_only_when_true() {
    let output = common::run(
        r#"
        func main() {
            if (1 < 2) {
                print("yes");
            }
            if (2 < 1) {
                print("no");
            }
        }
        "#,
    );
    assert_eq!(output, vec!["yes"]);
}

#[test]
fn if_else_picks_the_else_branch_when_false() {
    let output = common::run(
        r#"
        func main() {
            if (2 < 1) {
                print("then");
            } else {
                print("else");
            }
        }
        "#,
    );
    assert_eq!(output, vec!["else"]);
}

#[test]
fn while_loop_accumulates_across_iterations() {
    let output = common::run(
        r#"
        func main() {
            var ii;
            var sumi;
            ii = 1;
            sumi = 0;
            while (ii <= 5) {
                sumi = sumi + ii;
                ii = ii + 1;
            }
            print(sumi);
        }
        "#,
    );
    assert_eq!(output, vec!["15"]);
}

#[test]
fn while_loop_that_never_runs_leaves_state_untouched() {
    let output = common::run(
        r#"
        func main() {
            var ii;
            ii = 0;
            while (ii > 0) {
                ii = ii + 1;
            }
            print(ii);
        }
        "#,
    );
    assert_eq!(output, vec!["0"]);
}

#[test]
fn if_condition_must_be_bool() {
    let (kind, output) = common::run_err(
        r#"
        func main() {
            if (1) {
                print("unreachable");
            }
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Type);
    assert!(output.is_empty());
}

#[test]
fn while_condition_must_be_bool() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            while (1) {
            }
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Type);
}

#[test]
fn return_inside_a_while_loop_exits_the_enclosing_function_immediately() {
    let output = common::run(
        r#"
        func firsti() {
            var ii;
            ii = 0;
            while (ii < 100) {
                if (ii == 3) {
                    return ii;
                }
                ii = ii + 1;
            }
            return -1;
        }
        func main() {
            print(firsti());
        }
        "#,
    );
    assert_eq!(output, vec!["3"]);
}

#[test]
fn falling_off_a_non_void_functions_end_yields_its_type_default() {
    // a missing `return` is not an error: the function yields the same
    // default value a bare `return;` would, per the declared return type.
    let output = common::run(
        r#"
        func zeroi() {
            var ai;
            ai = 1;
        }
        func blanks() {
        }
        func offb() {
        }
        func main() {
            print(zeroi());
            print(blanks());
            print(offb());
        }
        "#,
    );
    assert_eq!(output, vec!["0", "", "false"]);
}
