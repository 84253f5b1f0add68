use std::fmt;

use proptest::prelude::*;
use scenescript::{
    ClassBuilder, CompilationError, Engine, EngineOptions, FunctionRegistry, MetaClass, NativeClass,
    NativeError, ObjectRef, RegistrationError, RuntimeErrorKind, ScriptError, Variant,
};

#[derive(Debug, Default)]
struct Counter {
    value: f64,
}

impl NativeClass for Counter {
    const CLASS_NAME: &'static str = "Counter";
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter({})", self.value)
    }
}

fn new_counter() -> Result<ObjectRef<Counter>, NativeError> {
    Ok(ObjectRef::wrap(Counter::default()))
}

fn bump(counter: ObjectRef<Counter>, by: f64) -> Result<f64, NativeError> {
    let mut inner = counter.get_mut()?;
    inner.value += by;
    Ok(inner.value)
}

fn reset(counter: ObjectRef<Counter>) -> Result<(), NativeError> {
    counter.get_mut()?.value = 0.0;
    Ok(())
}

struct CounterClass;

impl MetaClass for CounterClass {
    fn name(&self) -> &str {
        Counter::CLASS_NAME
    }

    fn init(&self, registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
        ClassBuilder::<Counter>::new(registry)
            .constructor(new_counter)?
            .method("bump", bump)?
            .method("reset", reset)?
            .getter("value", |c: &Counter| c.value)?;
        Ok(())
    }
}

fn engine() -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();
    Engine::new().unwrap()
}

#[test]
fn test_register_meta_class() {
    let mut engine = engine();
    assert!(engine.register_meta_class(CounterClass).unwrap());
    assert!(engine.classes().contains("Counter"));

    let result = engine
        .execute("c = Counter()\nc.bump(2)\nc.bump(3)\nprintln('{}', c)\nc.value")
        .unwrap();
    assert_eq!(result, Variant::from(5.0));
    assert_eq!(engine.output(), "Counter(5)\n");
}

#[test]
fn test_method_shared_by_classes_dispatches_on_receiver() {
    let mut engine = engine();
    engine.register_meta_class(CounterClass).unwrap();

    let result = engine
        .execute("c = Counter()\nc.bump(4)\nm = Measurement()\nm.reset()\nc.reset()\nc.value")
        .unwrap();
    assert_eq!(result, Variant::from(0.0));

    // Two classes define reset(), so neither is named as the expected one.
    let error = engine.execute("k = Color()\nk.reset()").unwrap_err();
    match error {
        ScriptError::Runtime(error) => {
            assert_eq!(error.line, 2);
            assert_eq!(
                error.kind,
                RuntimeErrorKind::NoSuchMethod {
                    class: "Color".to_string(),
                    method: "reset".to_string(),
                    arity: 0,
                }
            );
        }
        other => panic!("expected a runtime error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_meta_class_is_ignored() {
    let mut engine = engine();
    let before = engine.functions().len();
    assert!(!engine.register_meta_class(scenescript_modules::ColorClass).unwrap());
    assert_eq!(engine.functions().len(), before);
}

#[test]
fn test_duplicate_function() {
    fn one() -> Result<f64, NativeError> {
        Ok(1.0)
    }

    let mut engine = engine();
    engine.register_function("one", one).unwrap();
    assert!(matches!(
        engine.register_function("one", one),
        Err(RegistrationError::DuplicateFunction { .. })
    ));
}

#[test]
fn test_strict_declarations() {
    let options = EngineOptions::new().with_strict_declarations(true);
    let mut engine = Engine::with_options(options).unwrap();

    assert_eq!(engine.execute("x = 1\nx + 1").unwrap(), Variant::from(2.0));
    match engine.execute("y = x + 1") {
        Err(ScriptError::Compilation(CompilationError::UndeclaredVariable { name, .. })) => {
            assert_eq!(name, "x");
        }
        other => panic!("expected an undeclared variable error, got {:?}", other),
    }
}

#[test]
fn test_warnings_as_errors() {
    let source = "if (true)\nend\nx = 1";

    let mut lenient = engine();
    assert!(lenient.execute(source).is_ok());
    assert!(lenient.diagnostic_output().contains("WARNING [W001]"));

    let mut strict = Engine::with_options(EngineOptions::new().with_warnings_as_errors(true)).unwrap();
    assert!(matches!(
        strict.execute(source),
        Err(ScriptError::Warnings { warnings: 1 })
    ));
}

#[test]
fn test_parse_compile_run_separately() {
    let mut engine = engine();
    let arena = bumpalo::Bump::new();
    let script = engine.parse("total = 0\ntotal = total + sqrt(16)\ntotal", &arena).unwrap();
    let program = engine.compile(&script).unwrap();

    // A compiled program can be run more than once.
    assert_eq!(engine.run(&program).unwrap(), Variant::from(4.0));
    assert_eq!(engine.run(&program).unwrap(), Variant::from(4.0));
    assert!(program.to_string().contains("CALL"));
}

proptest! {
    #[test]
    fn arithmetic_matches_native(a in -1000i32..1000, b in -1000i32..1000, c in 1i32..100) {
        let mut engine = Engine::new().unwrap();
        let source = format!("a = {}\nb = {}\nc = {}\n(a + b) * c - a / c", a.abs(), b.abs(), c);
        let (a, b, c) = (f64::from(a.abs()), f64::from(b.abs()), f64::from(c));
        let result = engine.execute(&source).unwrap();
        prop_assert_eq!(result, Variant::from((a + b) * c - a / c));
    }

    #[test]
    fn string_equality_is_reflexive(text in "[a-z ]{0,16}") {
        let mut engine = Engine::new().unwrap();
        let source = format!("s = '{}'\ns == '{}'", text, text);
        prop_assert_eq!(engine.execute(&source).unwrap(), Variant::from(true));
    }
}
