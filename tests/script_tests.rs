
use scenescript::{CompilationError, EngineOptions, RuntimeErrorKind, ScriptError, Variant};
use test_harness::TestHarness;

fn fibonacci(n: u32) -> f64 {
    let (mut a, mut b) = (0.0_f64, 1.0_f64);
    for _ in 0..n {
        let t = a + b;
        a = b;
        b = t;
    }
    a
}

// ============================================================================
// Scripts
// ============================================================================

#[test]
fn test_fibonacci_script() {
    let run = TestHarness::new().run_file("fibonacci.ss");

    let expected = fibonacci(90);
    assert_eq!(run.result.unwrap(), Variant::from(expected));
    assert_eq!(run.output, format!("fib(90) = {}\n", expected));
    assert!(run.diagnostics.is_empty());
}

#[test]
fn test_fibonacci_one_liner() {
    let source = "n = 90; a=1; b=1; count=2; res=1; while(count<n) res=a+b; a=b; b=res; count=count+1 end; res";
    let run = TestHarness::new().run_source(source);

    let (mut a, mut b, mut res) = (1.0_f64, 1.0_f64, 1.0_f64);
    for _ in 2..90 {
        res = a + b;
        a = b;
        b = res;
    }
    assert_eq!(run.result.unwrap(), Variant::from(res));
    assert_eq!(res, fibonacci(90));
}

#[test]
fn test_color_script() {
    let run = TestHarness::new().run_file("colors.ss");

    assert_eq!(run.result.unwrap(), Variant::from(1.0));
    assert_eq!(
        run.output,
        "Color(0.5, 0, 0.5)\ngreen = 0.25\nColor(0, 0, 0)\n"
    );
}

#[test]
fn test_measurement_script() {
    let run = TestHarness::new().run_file("measurement.ss");

    assert_eq!(run.result.unwrap(), Variant::from(true));
    assert_eq!(run.output, "samples: 5\nafter reset: 0\n");
}

#[test]
fn test_comparisons_script() {
    let run = TestHarness::new().run_file("comparisons.ss");

    assert!(run.result.unwrap().is_unset());
    assert_eq!(run.output, "false\ntrue\ntrue\ntrue\ntrue\n");
}

#[test]
fn test_unbalanced_parenthesis_blocks_execution() {
    let run = TestHarness::new().run_file("unbalanced.ss");

    assert!(matches!(run.result, Err(ScriptError::Syntax { .. })));
    assert_eq!(run.output, "");
    assert!(run.diagnostics.contains("ERROR ["));
}

// ============================================================================
// Inline sources
// ============================================================================

#[test]
fn test_last_expression_is_result() {
    let harness = TestHarness::new();
    assert_eq!(harness.run_source("x = 1\nx").result.unwrap(), Variant::from(1.0));
    assert_eq!(
        harness.run_source("'a' + 1 + true").result.unwrap(),
        Variant::from("a1true")
    );
}

#[test]
fn test_unknown_function_fails_compilation() {
    let run = TestHarness::new().run_source("x = frobnicate(1)");

    match run.result {
        Err(ScriptError::Compilation(CompilationError::UnknownFunction { name, arity, .. })) => {
            assert_eq!(name, "frobnicate");
            assert_eq!(arity, 1);
        }
        other => panic!("expected an unknown function error, got {:?}", other),
    }
}

#[test]
fn test_unset_variable_fails_at_runtime() {
    let run = TestHarness::new().run_source("println('before')\ny = ghost + 1");

    match run.result {
        Err(ScriptError::Runtime(error)) => {
            assert_eq!(
                error.kind,
                RuntimeErrorKind::UnsetVariable {
                    name: "ghost".to_string()
                }
            );
            assert_eq!(error.line, 2);
        }
        other => panic!("expected a runtime error, got {:?}", other),
    }
    assert_eq!(run.output, "before\n");
}

#[test]
fn test_print_format_mismatch() {
    let run = TestHarness::new().run_source("println('{} {}', 1)");

    let error = run.result.unwrap_err();
    assert!(matches!(
        error,
        ScriptError::Runtime(ref e) if matches!(e.kind, RuntimeErrorKind::Native { .. })
    ));
    assert!(error.to_string().contains("placeholder"));
}

#[test]
fn test_method_with_wrong_argument_class() {
    let run = TestHarness::new().run_source("c = Color(1, 0, 0)\nm = Measurement()\nc.add(m)");

    let error = run.result.unwrap_err();
    assert!(
        error
            .to_string()
            .contains("expected instance of 'Color', found instance of 'Measurement'"),
        "unexpected message: {}",
        error
    );
}

#[test]
fn test_method_on_wrong_class() {
    let run = TestHarness::new().run_source("m = Measurement()\nm.scale(2)");

    match run.result {
        Err(ScriptError::Runtime(error)) => assert_eq!(
            error.kind,
            RuntimeErrorKind::WrongReceiver {
                method: "scale".to_string(),
                expected: "Color".to_string(),
                actual: "Measurement".to_string(),
            }
        ),
        other => panic!("expected a runtime error, got {:?}", other),
    }
}

#[test]
fn test_numbers_never_equal_bools() {
    let source = "n = 42\nif (n <> true) println('ne') end\nif (n == true) println('eqb') end\nif (n == 42) println('eq') end\nn == false";
    let run = TestHarness::new().run_source(source);

    assert_eq!(run.result.unwrap(), Variant::from(false));
    assert_eq!(run.output, "ne\neq\n");
}

#[test]
fn test_line_starting_with_minus_is_a_new_statement() {
    let run = TestHarness::new().run_source("c = Color(1, 2, 3)\n-c.green");

    assert_eq!(run.result.unwrap(), Variant::from(-2.0));
    assert!(run.diagnostics.is_empty());
}

#[test]
fn test_line_starting_with_paren_is_a_new_statement() {
    let run = TestHarness::new().run_source("x = 4\ny = x\n(y + 1) * 2");

    assert_eq!(run.result.unwrap(), Variant::from(10.0));
}

#[test]
fn test_condition_must_be_bool() {
    let run = TestHarness::new().run_source("if (1)\n println('x')\nend");

    match run.result {
        Err(ScriptError::Runtime(error)) => {
            assert!(matches!(error.kind, RuntimeErrorKind::ConditionNotBool { .. }));
        }
        other => panic!("expected a runtime error, got {:?}", other),
    }
}

#[test]
fn test_strict_declarations_reject_fibonacci_typo() {
    let harness = TestHarness::new().with_options(EngineOptions::new().with_strict_declarations(true));

    assert!(harness.run_file("fibonacci.ss").result.is_ok());
    let run = harness.run_source("total = 1\ntotal = totl + 1");
    assert!(matches!(
        run.result,
        Err(ScriptError::Compilation(CompilationError::UndeclaredVariable { ref name, .. })) if name == "totl"
    ));
}
