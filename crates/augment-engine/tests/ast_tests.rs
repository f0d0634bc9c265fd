use augment_engine::parser::ast::*;
use augment_engine::{Interpreter, Parser, Printer};

fn parse(source: &str) -> Module {
    Parser::new(source).unwrap().parse().unwrap()
}

// ============================================================================
// Printing
// ============================================================================

#[test]
fn test_round_trip_is_stable() {
    let source = r#"
        import { Service, helper } from "./lib";
        export default class {
            private static readonly cache: Map<string, number[]> | null = null;
            @Inject protected svc?: Service;
            constructor(a: number = 1, b?: string) {
                if (a > 0 && b != null) {
                    this.svc = helper(a, `${b}!`);
                } else throw new Error("bad");
            }
            static create(): number {
                let x = -(1 + 2) * 3;
                return x | 0;
            }
        }
        const y = typeof z === "undefined" ? null : z ?? 0;
    "#;
    let first = Printer::print_module(&parse(source));
    let second = Printer::print_module(&parse(&first));
    assert_eq!(first, second);
    assert!(first.starts_with("import { Service, helper } from \"./lib\";\n\nexport default class {\n"));
}

#[test]
fn test_built_class_prints_and_runs() {
    let class = ClassDecl {
        decorators: vec![],
        export: ExportKind::None,
        name: Some(build::ident("Greeter")),
        extends: None,
        members: vec![
            ClassMember::Field(build::field(
                "who",
                Some(build::primitive_type(PrimitiveType::String)),
                Some(build::string("world")),
            )),
            ClassMember::Method(build::method(
                "greet",
                vec![],
                Some(build::primitive_type(PrimitiveType::String)),
                vec![build::return_stmt(build::template(vec![
                    TemplateElement::String("hello ".to_string()),
                    TemplateElement::Expression(Box::new(build::this_member("who"))),
                ]))],
            )),
        ],
        span: Default::default(),
    };

    let printed = Printer::print_class(&class);
    assert_eq!(
        printed,
        "class Greeter {\n  who: string = \"world\";\n\n  greet(): string {\n    return `hello ${this.who}`;\n  }\n}\n"
    );

    let module = parse(&format!("{}console.log(new Greeter().greet());", printed));
    let mut interp = Interpreter::new();
    interp.run_module(&module).unwrap();
    assert_eq!(interp.output(), ["hello world"]);
}

// ============================================================================
// Visiting
// ============================================================================

struct CountClasses {
    names: Vec<String>,
}

impl VisitorMut for CountClasses {
    fn visit_class_decl(&mut self, decl: &mut ClassDecl) {
        self.names.push(decl.name_str().unwrap_or("default").to_string());
        walk_class_decl(self, decl);
    }
}

#[test]
fn test_visitor_reaches_nested_classes() {
    let mut module = parse(
        r#"
        class Outer {
            constructor() {
                class InCtor {}
            }
            run(): void {
                if (true) {
                    class InBlock {
                        deeper(): void { class Deepest {} }
                    }
                }
            }
        }
        "#,
    );
    let mut visitor = CountClasses { names: vec![] };
    visitor.visit_module(&mut module);
    assert_eq!(visitor.names, vec!["Outer", "InCtor", "InBlock", "Deepest"]);
}
