//! Broader error-classification coverage that doesn't fit naturally under
//! the other feature-specific integration tests.

mod common;

#[test]
fn a_program_with_no_main_function_is_a_name_error() {
    let (kind, output) = common::run_err("func helperi() { return 1; }");
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
    assert!(output.is_empty());
}

#[test]
fn calling_an_undefined_function_name_is_a_name_error() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            print(missingi(1));
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
}

#[test]
fn calling_through_an_unassigned_function_variable_is_a_fault() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            var ff;
            ff();
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Fault);
}

#[test]
fn adding_an_int_and_a_string_is_a_type_error() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            print(1 + "1");
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Type);
}

#[test]
fn division_by_zero_is_a_fault_not_a_type_error() {
    let (kind, output) = common::run_err(
        r#"
        func main() {
            print(1 / 0);
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Fault);
    assert!(output.is_empty());
}

#[test]
fn modulo_by_zero_is_a_fault() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            print(1 % 0);
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Fault);
}

#[test]
fn assigning_a_string_to_an_int_variable_is_a_type_error() {
    let (kind, _) = common::run_err(
        r#"
        func main() {
            var xi;
            xi = "not an int";
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Type);
}

#[test]
fn calling_a_function_with_the_wrong_number_of_arguments_is_a_name_error() {
    let (kind, _) = common::run_err(
        r#"
        func addi(ai, bi) {
            return ai + bi;
        }
        func main() {
            print(addi(1));
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Name);
}

#[test]
fn execution_halts_at_the_first_fault_emitting_no_further_output() {
    let (kind, output) = common::run_err(
        r#"
        func main() {
            print("before");
            print(1 / 0);
            print("after");
        }
        "#,
    );
    assert_eq!(kind, glyph_lang::error::ErrorKind::Fault);
    assert_eq!(output, vec!["before"]);
}
