//! End-to-end tests: augment a module, then execute it with the evaluator.

use augment_engine::transform::config::AugmentConfig;
use augment_engine::{Augmenter, EvalError, Interpreter, Parser, Value};

fn expand(source: &str) -> String {
    Augmenter::new().expand_source(source).expect("augment failed")
}

fn execute(source: &str) -> (Interpreter, Result<(), EvalError>) {
    let result = Augmenter::new().augment_source(source).expect("augment failed");
    let mut interp = Interpreter::new();
    let outcome = interp.run_module(&result.module);
    (interp, outcome)
}

fn output(source: &str) -> Vec<String> {
    let (mut interp, outcome) = execute(source);
    outcome.expect("evaluation failed");
    interp.take_output()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_value_user_to_string_and_frozen() {
    let source = r#"
        @Value
        @ToString
        class User {
            id: number;
            name: string;
        }
        const u = new User(1, 'John');
        console.log(u.toString() === "User(id=1, name=John)");
    "#;
    let (interp, outcome) = execute(source);
    outcome.unwrap();
    assert_eq!(interp.output(), ["true"]);
    assert!(interp.is_frozen(&interp.global("u").unwrap()));

    let (_, outcome) = execute(&format!("{}\nu.name = \"Jane\";", source));
    match outcome {
        Err(EvalError::TypeError(message)) => assert!(message.contains("read only property 'name'")),
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_point_equality_and_hash() {
    let lines = output(
        r#"
        @EqualsAndHashCode
        @AllArgsConstructor
        class Point {
            x: number;
            y: number;
        }
        const a = new Point(1, 2);
        const b = new Point(1, 2);
        console.log(a.equals(b), a.hashCode() === b.hashCode());
        console.log(a.equals(a), a.equals(null), a.equals(undefined));
        console.log(a.equals(new Point(1, 3)), a.equals(new Point(2, 2)));
        console.log(a.hashCode());
        "#,
    );
    assert_eq!(lines, vec!["true true", "true false false", "false false", "33"]);
}

#[test]
fn test_product_with_updaters() {
    let lines = output(
        r#"
        @Value
        @With
        @EqualsAndHashCode
        class Product {
            id: number;
            name: string;
            price: number;
        }
        const p1 = new Product(1, 'Widget', 9.99);
        const p2 = p1.withPrice(19.99);
        console.log(p2.price === 19.99 && p2.name === 'Widget', p1.equals(p2));
        console.log(p1 === p2, p1.price, p2.id);
        "#,
    );
    assert_eq!(lines, vec!["true false", "false 9.99 1"]);
}

#[test]
fn test_empty_value_class() {
    let lines = output(
        r#"
        @Value
        class Empty {}
        console.log(new Empty().toString() === "Empty()");
        "#,
    );
    assert_eq!(lines, vec!["true"]);
}

#[test]
fn test_non_null_constructor_argument() {
    let class = r#"
        @AllArgsConstructor
        class User {
            @NonNull id: number;
            name: string;
        }
    "#;

    let lines = output(&format!("{}\nconsole.log(new User(1, 'x').id === 1);", class));
    assert_eq!(lines, vec!["true"]);

    for arg in ["null", "undefined"] {
        let (_, outcome) = execute(&format!("{}\nnew User({}, 'x');", class, arg));
        let err = outcome.unwrap_err();
        assert_eq!(err.thrown_message(), Some("id cannot be null or undefined"));
        assert!(err.to_string().contains("cannot be null"));
    }

    // falsy values other than null/undefined are accepted
    let lines = output(&format!("{}\nconsole.log(new User(0, '').id);", class));
    assert_eq!(lines, vec!["0"]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_unmarked_module_is_unchanged() {
    let source = r#"
        import { helper } from "./helper";
        @sealed
        class Plain {
            x: number = 1;
            @Memoize
            compute(): number { return this.x * 2; }
        }
    "#;
    let module = Parser::new(source).unwrap().parse().unwrap();
    let result = Augmenter::new().augment_module(module.clone());
    assert!(!result.is_changed());
    assert_eq!(result.module, module);
}

#[test]
fn test_expansion_is_idempotent() {
    let once = expand("@Data class A { x: number; y?: string; }");
    let twice = Augmenter::new().augment_source(&once).unwrap();
    assert!(!twice.is_changed());
    assert_eq!(twice.to_source(), once);
}

#[test]
fn test_record_is_alias_of_value() {
    let value = expand("@Value class A { x: number; }");
    let record = expand("@Record class A { x: number; }");
    assert_eq!(value, record);
}

#[test]
fn test_required_args_constructor() {
    let source = r#"
        @RequiredArgsConstructor
        class Req {
            a: number;
            b: number = 2;
            c?: string;
        }
        const r = new Req(5);
        console.log(r.a, r.b, r.c);
    "#;
    assert!(expand(source).contains("constructor(a: number) {"));
    assert_eq!(output(source), vec!["5 2 undefined"]);
}

#[test]
fn test_no_args_constructor() {
    let printed = expand("@NoArgsConstructor class N { a: number; }");
    assert!(printed.contains("constructor() {}"));
}

#[test]
fn test_all_args_order_follows_declaration() {
    let printed = expand("@AllArgsConstructor class A { b: string; a: number = 1; static s: number = 0; c?: boolean; }");
    assert!(printed.contains("constructor(b: string, a: number, c: boolean) {"));
}

#[test]
fn test_data_accessors() {
    let lines = output(
        r#"
        @Data
        class Account {
            owner: string;
            balance: number;
        }
        const acct = new Account("ann", 10);
        acct.setBalance(25);
        console.log(acct.getOwner(), acct.getBalance(), `${acct}`);
        "#,
    );
    assert_eq!(lines, vec!["ann 25 Account(owner=ann, balance=25)"]);
}

#[test]
fn test_immutable_class_gets_no_setters() {
    let printed = expand("@Value @Getter @Setter class A { x: number; }");
    assert!(printed.contains("getX(): number"));
    assert!(!printed.contains("setX("));
}

#[test]
fn test_singleton_accessor() {
    let lines = output(
        r#"
        @Singleton
        class Registry {
            count: number = 0;
        }
        const first = Registry.getInstance();
        first.count = 3;
        console.log(first === Registry.getInstance(), Registry.getInstance().count);
        "#,
    );
    assert_eq!(lines, vec!["true 3"]);
}

#[test]
fn test_log_field() {
    let lines = output(
        r#"
        @Log
        class Service {
            run(): void { this.log.log("running"); }
        }
        new Service().run();
        "#,
    );
    assert_eq!(lines, vec!["running"]);
}

#[test]
fn test_log_field_name_from_config() {
    let config: AugmentConfig = "log-field = \"logger\"".parse().unwrap();
    let printed = Augmenter::with_config(config)
        .expand_source("@Log class S {}")
        .unwrap();
    assert!(printed.contains("protected readonly logger = console;"));
}

#[test]
fn test_builder_factory_only() {
    let printed = expand("@Builder class Order { id: number; }");
    assert!(printed.contains("static builder(): OrderBuilder {\n    return new OrderBuilder();\n  }"));
    assert!(!printed.contains("class OrderBuilder"));
}

#[test]
fn test_generation_follows_priority_not_source_order() {
    let result = Augmenter::new()
        .augment_source("@Log @ToString @Value class A { x: number; }")
        .unwrap();
    let report = &result.classes[0];
    assert_eq!(report.markers, vec!["Log", "ToString", "Value"]);
    assert_eq!(
        report.generated,
        vec!["constructor", "toString", "equals", "hashCode", "log"]
    );
}

#[test]
fn test_hand_written_method_wins() {
    let source = r#"
        @ToString
        @AllArgsConstructor
        class Money {
            cents: number;
            toString(): string { return "$" + this.cents / 100; }
        }
        console.log(`${new Money(250)}`);
    "#;
    assert_eq!(output(source), vec!["$2.5"]);

    let result = Augmenter::new().augment_source(source).unwrap();
    assert_eq!(result.classes[0].suppressed, vec!["toString"]);
}

#[test]
fn test_nested_classes_are_augmented() {
    let source = r#"
        class Factory {
            make(): string {
                @ToString
                class Inner {
                    x: number = 3;
                }
                return new Inner().toString();
            }
        }
        console.log(new Factory().make());
    "#;
    let result = Augmenter::new().augment_source(source).unwrap();
    let names: Vec<&str> = result.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Inner"]);
    assert_eq!(output(source), vec!["Inner(x=3)"]);
}

#[test]
fn test_method_markers_are_inert() {
    let printed = expand("@ToString class A { x: number; @AutoBind @Memoize go(): number { return 1; } }");
    assert!(printed.contains("@AutoBind\n  @Memoize\n  go(): number {"));
}

#[test]
fn test_with_value_type_identity() {
    let lines = output(
        r#"
        @With
        class Pair {
            left: string;
            right: string;
        }
        const p = new Pair("a", "b");
        const q = p.withLeft("z");
        console.log(q instanceof Pair, q.left, q.right, p.left);
        "#,
    );
    assert_eq!(lines, vec!["true z b a"]);
}

#[test]
fn test_with_keeps_required_args_constructor() {
    let source = r#"
        @RequiredArgsConstructor
        @With
        class Range {
            low: number;
            high: number = 10;
        }
        const r = new Range(1);
        console.log(r.low, r.high);
    "#;
    let printed = expand(source);
    assert!(printed.contains("constructor(low: number) {"));
    assert!(printed.contains("withHigh(high: number): Range {"));
    assert_eq!(output(source), vec!["1 10"]);
}

#[test]
fn test_non_ascii_template_escape() {
    let lines = output("class T { s: string = `caf\\\u{e9} ${\"}\"}`; }\nconsole.log(new T().s);");
    assert_eq!(lines, vec!["caf\u{e9} }"]);
}

#[test]
fn test_shared_augmenter_across_threads() {
    let augmenter = std::sync::Arc::new(Augmenter::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let augmenter = augmenter.clone();
            std::thread::spawn(move || {
                augmenter
                    .expand_source(&format!("@ToString class C{} {{ v: number; }}", i))
                    .unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let printed = handle.join().unwrap();
        assert!(printed.contains(&format!("return `C{}(v=${{this.v}})`;", i)));
    }
}

#[test]
fn test_interpreter_values_are_inspectable() {
    let (mut interp, outcome) = execute("@Value class P { x: number; }");
    outcome.unwrap();
    let p = interp.construct("P", vec![Value::Number(4.0)]).unwrap();
    let q = interp.construct("P", vec![Value::Number(4.0)]).unwrap();
    assert_eq!(interp.call_method(&p, "equals", vec![q]).unwrap(), Value::Bool(true));
    assert!(interp.set_property(&p, "x", Value::Number(1.0)).is_err());
}

// ============================================================================
// Custom registries
// ============================================================================

mod custom {
    use augment_engine::parser::ast::{build, ClassMember};
    use augment_engine::transform::{
        GenerationFlags, HandlerMeta, MarkerHandler, SynthContext, TransformationPlan,
    };

    pub struct Describe;

    static META: HandlerMeta = HandlerMeta {
        marker: "Describe",
        priority: 50,
        description: "Adds describe() returning the field names",
    };

    impl MarkerHandler for Describe {
        fn meta(&self) -> &HandlerMeta {
            &META
        }

        fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
            GenerationFlags::new()
        }

        fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
            let names: Vec<&str> = plan.properties.iter().map(|p| p.name.as_str()).collect();
            vec![ClassMember::Method(build::method(
                "describe",
                vec![],
                None,
                vec![build::return_stmt(build::string(&names.join(",")))],
            ))]
        }
    }
}

#[test]
fn test_custom_registry() {
    use augment_engine::HandlerRegistry;

    let registry = HandlerRegistry::builder()
        .with_builtins()
        .register(Box::new(custom::Describe))
        .disable("Log")
        .build();
    let augmenter = Augmenter::with_registry(registry, AugmentConfig::default());

    let result = augmenter
        .augment_source(
            r#"
            @Describe
            @Log
            @AllArgsConstructor
            class Pair { a: number; b: number; }
            console.log(new Pair(1, 2).describe());
            "#,
        )
        .unwrap();
    assert_eq!(result.classes[0].generated, vec!["constructor", "describe"]);
    assert!(result.to_source().starts_with("@Log\nclass Pair {"));

    let mut interp = Interpreter::new();
    interp.run_module(&result.module).unwrap();
    assert_eq!(interp.output(), ["a,b"]);

    // the default registry does not know the marker
    assert!(!Augmenter::new().augment_source("@Describe class X { a: number; }").unwrap().is_changed());
}
