use mylang::{run_source, Error};
use mylang_eval::{Interpreter, MemoryIo, RuntimeError};
use mylang_value::{Number, Value};

/// Runs `source` and returns every printed line.
fn interpret(source: &str) -> Vec<String> {
    interpret_with_input(source, Vec::<String>::new())
}

fn interpret_with_input(source: &str, input: Vec<impl Into<String>>) -> Vec<String> {
    let mut interpreter = Interpreter::with_io(MemoryIo::with_input(input));
    if let Err(err) = run_source(&mut interpreter, source) {
        panic!("{}", err);
    }
    interpreter.into_io().output().to_vec()
}

/// Runs `source`, expecting it to fail, and returns the error with everything printed before it.
fn interpret_err(source: &str) -> (Error, Vec<String>) {
    let mut interpreter = Interpreter::with_io(MemoryIo::new());
    let err = run_source(&mut interpreter, source).unwrap_err();
    (err, interpreter.into_io().output().to_vec())
}

fn runtime_err(source: &str) -> RuntimeError {
    match interpret_err(source).0 {
        Error::Runtime(err) => err,
        err => panic!("expected a runtime error, got {}", err),
    }
}

#[test]
fn variables() {
    assert_eq!(interpret("var x = 2 + 3; print(x);"), ["5"]);
    assert_eq!(interpret("var x = 1; x = x * 10; print(x);"), ["10"]);
    assert_eq!(interpret("var x; print(x);"), ["none"]);
}

#[test]
fn comments() {
    assert_eq!(
        interpret(
            r#"
            var x = 1; // a comment
            // print(2);
            print(x);"#,
        ),
        ["1"]
    );
}

#[test]
fn numeric_literals_keep_their_subtype() {
    for (literal, expected) in [
        ("0", Number::from(0)),
        ("1234567890", Number::from(1234567890)),
        ("9223372036854775807", Number::from(i64::MAX)),
        ("99999999999999999999", Number::from_literal("99999999999999999999").unwrap()),
        ("2.0", Number::Float(2.0)),
        ("0.125", Number::Float(0.125)),
    ] {
        let output = interpret(&format!("var v = {}; print(v);", literal));
        assert_eq!(output, [Value::Number(expected).to_string()]);
    }
    assert_eq!(
        interpret("print(99999999999999999999);"),
        ["99999999999999999999"]
    );
}

mod arithmetic {
    use super::*;

    #[test]
    fn precedence() {
        assert_eq!(interpret("print(1 + 2 * 3);"), ["7"]);
        assert_eq!(interpret("print((1 + 2) * 3);"), ["9"]);
        assert_eq!(interpret("print(10 - 4 - 3);"), ["3"]);
        assert_eq!(interpret("print(-2 * 3);"), ["-6"]);
        assert_eq!(interpret("print(2 - -3);"), ["5"]);
    }

    #[test]
    fn integers_have_arbitrary_precision() {
        assert_eq!(
            interpret("print(9223372036854775807 + 1);"),
            ["9223372036854775808"]
        );
        assert_eq!(
            interpret("print(0 - 9223372036854775807 - 2);"),
            ["-9223372036854775809"]
        );
        assert_eq!(
            interpret("var x = 4294967296; print(x * x * x);"),
            ["79228162514264337593543950336"]
        );
    }

    #[test]
    fn float_display() {
        assert_eq!(interpret("print(100000000.0 * 100000000.0);"), ["1e+16"]);
        assert_eq!(interpret("print(99999999999999999999.0);"), ["1e+20"]);
        assert_eq!(interpret("print(1000000000000000.0);"), ["1000000000000000.0"]);
        assert_eq!(interpret("print(1 / 100000);"), ["1e-05"]);
    }

    #[test]
    fn booleans_are_numbers() {
        assert_eq!(interpret("print(true + 1);"), ["2"]);
        assert_eq!(interpret("print(true - 1);"), ["0"]);
        assert_eq!(interpret("print(true * 3);"), ["3"]);
        assert_eq!(interpret("print(-true);"), ["-1"]);
        assert_eq!(interpret("print(false + false);"), ["0"]);
        assert_eq!(interpret("print(true / 2);"), ["0.5"]);
        assert_eq!(interpret(r#"print("x" + true);"#), ["xtrue"]);
        assert!(matches!(
            runtime_err("print(1 / false);"),
            RuntimeError::DivisionByZero
        ));
    }

    #[test]
    fn division() {
        assert_eq!(interpret("print(7 / 2);"), ["3.5"]);
        assert_eq!(interpret("print(6 / 3);"), ["2.0"]);
        assert!(matches!(
            runtime_err("print(1 / 0);"),
            RuntimeError::DivisionByZero
        ));
    }

    #[test]
    fn plus_is_polymorphic() {
        assert_eq!(interpret(r#"print("a" + 1);"#), ["a1"]);
        assert_eq!(interpret(r#"print("2" + "3");"#), ["5"]);
        assert_eq!(interpret(r#"print("2.5" + 1);"#), ["3.5"]);
        assert_eq!(interpret(r#"print("Hello " + "World");"#), ["Hello World"]);
        assert_eq!(interpret(r#"print(1.5 + 1.5);"#), ["3.0"]);
    }

    #[test]
    fn minus_coerces_text() {
        assert_eq!(interpret(r#"print("10" - 4);"#), ["6"]);
        assert!(runtime_err(r#"print("a" - "b");"#).is_type_error());
    }

    #[test]
    fn multiplication_does_not_coerce() {
        assert!(runtime_err(r#"print("2" * 3);"#).is_type_error());
        assert!(runtime_err(r#"print(6 / "3");"#).is_type_error());
    }

    #[test]
    fn unary_minus_requires_number() {
        assert!(runtime_err(r#"print(-"1");"#).is_type_error());
    }
}

mod logic {
    use super::*;

    #[test]
    fn comparisons() {
        assert_eq!(interpret("print(1 < 2);"), ["true"]);
        assert_eq!(interpret("print(2 <= 1);"), ["false"]);
        assert_eq!(interpret("print(1 == 1.0);"), ["true"]);
        assert_eq!(interpret(r#"print(1 != "1");"#), ["true"]);
        assert_eq!(interpret(r#"print("a" < "b");"#), ["true"]);
        assert_eq!(interpret("print(true == 1);"), ["true"]);
        assert_eq!(interpret("print(false == 0.0);"), ["true"]);
        assert_eq!(interpret("print(true != 2);"), ["true"]);
        assert_eq!(interpret("print(false < true);"), ["true"]);
        assert_eq!(interpret("print(true >= 1);"), ["true"]);
        assert!(runtime_err(r#"print(1 < "2");"#).is_type_error());
    }

    #[test]
    fn logical_operators() {
        assert_eq!(interpret("print(1 and 0);"), ["false"]);
        assert_eq!(interpret("print(0 or 2);"), ["true"]);
        assert_eq!(interpret("print(not 0);"), ["true"]);
        assert_eq!(interpret(r#"print(not "");"#), ["true"]);
        assert_eq!(interpret("print(1 < 2 and 2 < 3);"), ["true"]);
    }

    #[test]
    fn no_short_circuit() {
        assert_eq!(
            interpret(
                r#"
                func side() { print("evaluated"); }
                var r = true or side();
                var s = false and side();
                print(r);
                print(s);"#,
            ),
            ["evaluated", "evaluated", "true", "false"]
        );
    }

    #[test]
    fn boolean_literals_cannot_be_shadowed() {
        assert_eq!(interpret("var true = 99; print(true);"), ["true"]);
        assert_eq!(interpret("var false = 1; print(false);"), ["false"]);
    }
}

mod control_flow {
    use super::*;

    #[test]
    fn if_else() {
        assert_eq!(
            interpret(
                r#"
                var x = 5;
                if (x > 3) { print("big"); } else { print("small"); }
                if (x > 10) { print("huge"); }
                if (x > 10) { print("huge"); } else { print("not huge"); }"#,
            ),
            ["big", "not huge"]
        );
    }

    #[test]
    fn if_branch_has_its_own_scope() {
        let (err, output) = interpret_err(
            r#"
            var x = 1;
            if (x) { var inner = 2; x = 3; }
            print(x);
            print(inner);"#,
        );
        assert_eq!(output, ["3"]);
        assert!(matches!(
            err,
            Error::Runtime(RuntimeError::UndefinedVariable(name)) if name == "inner"
        ));
    }

    #[test]
    fn while_loop() {
        assert_eq!(
            interpret(
                r#"
                var i = 0;
                var sum = 0;
                while (i < 3) {
                    sum = sum + i;
                    i = i + 1;
                }
                print(sum);"#,
            ),
            ["3"]
        );
    }

    #[test]
    fn while_body_scope_is_fresh_each_iteration() {
        assert_eq!(
            interpret(
                r#"
                var i = 0;
                while (i < 2) {
                    var seen = i;
                    print(seen);
                    i = i + 1;
                }
                print(i);"#,
            ),
            ["0", "1", "2"]
        );
        assert!(matches!(
            runtime_err("var i = 0; while (i < 1) { var inner = 1; i = i + 1; } print(inner);"),
            RuntimeError::UndefinedVariable(_)
        ));
    }

    #[test]
    fn zero_iterations() {
        assert_eq!(interpret("while (0) { print(1); } print(2);"), ["2"]);
    }
}

mod functions {
    use super::*;

    #[test]
    fn functions() {
        assert_eq!(
            interpret(r#"func greet(name){ print("Hello " + name); } greet("World");"#),
            ["Hello World"]
        );
    }

    #[test]
    fn functions_with_params() {
        assert_eq!(
            interpret(
                r#"
                func show(a, b) {
                    print(a * b);
                }
                show(3, 4);
                show(-2, 5);"#,
            ),
            ["12", "-10"]
        );
    }

    #[test]
    fn recursion() {
        assert_eq!(
            interpret(
                r#"
                func countdown(n) {
                    if (n > 0) {
                        print(n);
                        countdown(n - 1);
                    }
                }
                countdown(3);"#,
            ),
            ["3", "2", "1"]
        );
    }

    #[test]
    fn missing_arguments_are_unbound() {
        let (err, output) = interpret_err(
            r#"
            func pair(a, b) { print(a); print(b); }
            pair(1);"#,
        );
        assert_eq!(output, ["1"]);
        assert!(matches!(
            err,
            Error::Runtime(RuntimeError::UndefinedVariable(name)) if name == "b"
        ));
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(
            interpret("func one(a) { print(a); } one(1, 2, 3);"),
            ["1"]
        );
    }

    #[test]
    fn callee_sees_call_site_scope() {
        assert_eq!(
            interpret(
                r#"
                var counter = 0;
                func bump() { counter = counter + 1; }
                bump();
                bump();
                print(counter);
                func show() { print(local); }
                if (1) { var local = "from caller"; show(); }"#,
            ),
            ["2", "from caller"]
        );
    }

    #[test]
    fn variables_and_functions_are_separate() {
        assert_eq!(
            interpret(r#"var f = "var"; func f() { print("func"); } f(); print(f);"#),
            ["func", "var"]
        );
    }

    #[test]
    fn undefined_function() {
        assert!(matches!(
            runtime_err("nope();"),
            RuntimeError::UndefinedFunction(name) if name == "nope"
        ));
    }

    #[test]
    fn function_declared_in_block_is_local() {
        assert!(matches!(
            runtime_err("if (1) { func inner() { } } inner();"),
            RuntimeError::UndefinedFunction(_)
        ));
    }

    #[test]
    fn result_of_last_statement() {
        let mut interpreter = Interpreter::with_io(MemoryIo::new());
        let value = run_source(
            &mut interpreter,
            "func five() { var x = 5; } func echo() { five(); } echo();",
        )
        .unwrap();
        assert_eq!(value, Value::None);
    }
}

mod io {
    use super::*;

    #[test]
    fn input_statement_and_expression() {
        assert_eq!(
            interpret_with_input(
                r#"
                input("Press enter");
                var name = input("Name: ");
                print("Hi " + name);
                var n = input("Number: ") + 1;
                print(n);"#,
                vec!["", "Ada", "41"],
            ),
            ["Hi Ada", "42"]
        );
    }

    #[test]
    fn lexical_errors_are_reported_and_skipped() {
        let output = interpret("var x = 1 @ ;\nprint(x);");
        assert_eq!(
            output,
            [
                "Lexical error at line 1, column 11: unexpected character '@'\nvar x = 1 @ ;\n          ^",
                "1",
            ]
        );
    }

    #[test]
    fn syntax_error_stops_before_evaluation() {
        let (err, output) = interpret_err("print(1);\nprint(2)\nprint(3);");
        assert!(output.is_empty());
        match err {
            Error::Syntax(diagnostic) => {
                assert_eq!(
                    diagnostic.to_string(),
                    "Syntax error at line 3, column 1: unexpected token 'print' (type=PRINT)\nprint(3);\n^"
                );
            }
            err => panic!("expected a syntax error, got {}", err),
        }
    }

    #[test]
    fn runtime_error_message() {
        let (err, _) = interpret_err("print(missing);");
        assert_eq!(err.to_string(), "Runtime error: undefined variable 'missing'");
    }
}
