//! Evaluator behavior on hand-written modules.

use augment_engine::interp::MAX_CALL_DEPTH;
use augment_engine::{EvalError, Interpreter, Parser, Value};

fn run(source: &str) -> (Interpreter, Result<(), EvalError>) {
    let module = Parser::new(source).unwrap().parse().unwrap();
    let mut interp = Interpreter::new();
    let result = interp.run_module(&module);
    (interp, result)
}

fn output(source: &str) -> Vec<String> {
    let (interp, result) = run(source);
    result.unwrap();
    interp.output().to_vec()
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_number_formatting() {
    assert_eq!(
        output("console.log(0.1 + 0.2, 1e21, 1 / 0, -1 / 0, 0 / 0, -0, 100);"),
        vec!["0.30000000000000004 1e+21 Infinity -Infinity NaN 0 100"]
    );
}

#[test]
fn test_string_conversion_of_values() {
    assert_eq!(
        output(r#"console.log(String(null), String(undefined), String(true), String(), "" + 12);"#),
        vec!["null undefined true  12"]
    );
}

#[test]
fn test_error_to_string() {
    assert_eq!(
        output(r#"const e = new Error("bad"); console.log(`${e}`, e.message, String(new Error()));"#),
        vec!["Error: bad bad Error"]
    );
}

#[test]
fn test_relational_comparisons() {
    assert_eq!(
        output(r#"console.log(1 < 2, "a" < "b", "10" < "9", 10 < "9", 2 >= 2, 1 <= 0);"#),
        vec!["true true true false true false"]
    );
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_static_members() {
    let lines = output(
        r#"
        class Ids {
            static next: number = 1;
            static take(): number {
                const id = Ids.next;
                Ids.next = Ids.next + 1;
                return id;
            }
        }
        console.log(Ids.take(), Ids.take(), Ids.next, Ids.name);
        "#,
    );
    assert_eq!(lines, vec!["1 2 3 Ids"]);
}

#[test]
fn test_field_initializers_see_this() {
    let lines = output(
        r#"
        class Box {
            width: number = 2;
            area: number = this.width * 3;
        }
        console.log(new Box().area);
        "#,
    );
    assert_eq!(lines, vec!["6"]);
}

#[test]
fn test_early_return_and_conditionals() {
    let lines = output(
        r#"
        class Sign {
            of(n: number): string {
                if (n < 0) return "negative";
                else if (n === 0) {
                    return "zero";
                }
                return n > 100 ? "large" : "positive";
            }
        }
        const s = new Sign();
        console.log(s.of(-3), s.of(0), s.of(5), s.of(500));
        "#,
    );
    assert_eq!(lines, vec!["negative zero positive large"]);
}

#[test]
fn test_detached_method_value() {
    let lines = output(
        r#"
        class A { hello(): string { return "hi"; } }
        const a = new A();
        console.log(typeof a.hello, typeof a.missing, typeof A);
        "#,
    );
    assert_eq!(lines, vec!["function undefined function"]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_uncaught_throw_stops_execution() {
    let (interp, result) = run(
        r#"
        console.log("one");
        throw new Error("stop");
        console.log("two");
        "#,
    );
    assert_eq!(result.unwrap_err().to_string(), "Uncaught Error: stop");
    assert_eq!(interp.output(), ["one"]);
}

#[test]
fn test_throwing_non_error_value() {
    let (_, result) = run(r#"throw "plain";"#);
    assert_eq!(result.unwrap_err().thrown_message(), Some("plain"));
}

#[test]
fn test_property_of_null() {
    let (_, result) = run("const n = null; n.x;");
    match result {
        Err(EvalError::TypeError(message)) => {
            assert_eq!(message, "Cannot read properties of null (reading 'x')")
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_not_a_function() {
    let (_, result) = run("class A { x: number = 1; } new A().x();");
    assert!(matches!(result, Err(EvalError::TypeError(ref m)) if m.contains("is not a function")));
}

#[test]
fn test_unbounded_recursion_is_reported() {
    // Deep evaluation needs more than the default test thread stack.
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let (_, result) = run(
                r#"
                class R { static go(n: number): number { return R.go(n + 1); } }
                R.go(0);
                "#,
            );
            result
        })
        .unwrap();
    assert_eq!(handle.join().unwrap(), Err(EvalError::StackOverflow));
}

#[test]
fn test_recursion_under_limit() {
    let depth = MAX_CALL_DEPTH / 2;
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(move || {
            let (mut interp, result) = run(
                r#"
                class Sum { static to(n: number): number { return n === 0 ? 0 : n + Sum.to(n - 1); } }
                "#,
            );
            result.unwrap();
            let class = interp.global("Sum").unwrap();
            interp.call_method(&class, "to", vec![Value::Number(depth as f64)])
        })
        .unwrap();
    let expected = (MAX_CALL_DEPTH / 2) * (MAX_CALL_DEPTH / 2 + 1) / 2;
    assert_eq!(handle.join().unwrap(), Ok(Value::Number(expected as f64)));
}
