//! Source printer.
//!
//! Emits two-space indented source for a [`Module`]. The output is accepted
//! by [`Parser`](crate::parser::Parser) again; parentheses are inserted where
//! operator precedence requires them.

use crate::parser::ast::*;
use crate::parser::parser::precedence::{binary_precedence, logical_precedence, Precedence};

const INDENT: &str = "  ";

/// Pretty-printer producing source text.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a whole module.
    pub fn print_module(module: &Module) -> String {
        let mut printer = Printer::new();
        let mut previous: Option<&Statement> = None;
        for stmt in &module.statements {
            if let Some(prev) = previous {
                if needs_blank_line(prev, stmt) {
                    printer.out.push('\n');
                }
            }
            printer.statement(stmt);
            previous = Some(stmt);
        }
        printer.out
    }

    /// Print a single class declaration.
    pub fn print_class(class: &ClassDecl) -> String {
        let mut printer = Printer::new();
        printer.class_decl(class);
        printer.out
    }

    /// Print a single expression.
    pub fn print_expression(expr: &Expression) -> String {
        let mut printer = Printer::new();
        printer.expression(expr, Precedence::None);
        printer.out
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn start_line(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn end_line(&mut self) {
        self.out.push('\n');
    }

    fn line(&mut self, text: &str) {
        self.start_line();
        self.write(text);
        self.end_line();
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::ClassDecl(class) => self.class_decl(class),
            Statement::Block(block) => {
                self.start_line();
                self.block_body(block);
                self.end_line();
            }
            other => {
                self.start_line();
                self.inline_statement(other);
                self.end_line();
            }
        }
    }

    /// Print a statement starting at the current column, without the final newline.
    fn inline_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::ImportDecl(import) => {
                if import.specifiers.is_empty() {
                    self.write(&format!("import {};", quote_string(&import.source)));
                } else {
                    let names: Vec<&str> = import.specifiers.iter().map(|s| s.as_str()).collect();
                    self.write(&format!(
                        "import {{ {} }} from {};",
                        names.join(", "),
                        quote_string(&import.source)
                    ));
                }
            }
            Statement::VariableDecl(decl) => {
                self.write(decl.kind.keyword());
                self.write(" ");
                self.write(decl.name.as_str());
                if let Some(ty) = &decl.type_annotation {
                    self.write(": ");
                    self.type_annotation(ty);
                }
                if let Some(init) = &decl.initializer {
                    self.write(" = ");
                    self.expression(init, Precedence::Assignment);
                }
                self.write(";");
            }
            Statement::Expression(s) => {
                self.expression(&s.expression, Precedence::None);
                self.write(";");
            }
            Statement::If(s) => {
                self.write("if (");
                self.expression(&s.condition, Precedence::None);
                self.write(") ");
                self.branch(&s.then_branch);
                if let Some(else_branch) = &s.else_branch {
                    if matches!(*s.then_branch, Statement::Block(_)) {
                        self.write(" else ");
                    } else {
                        self.end_line();
                        self.start_line();
                        self.write("else ");
                    }
                    self.branch(else_branch);
                }
            }
            Statement::Return(s) => match &s.value {
                Some(value) => {
                    self.write("return ");
                    self.expression(value, Precedence::None);
                    self.write(";");
                }
                None => self.write("return;"),
            },
            Statement::Throw(s) => {
                self.write("throw ");
                self.expression(&s.value, Precedence::None);
                self.write(";");
            }
            Statement::Block(block) => self.block_body(block),
            Statement::Empty(_) => self.write(";"),
            Statement::ClassDecl(class) => {
                // Classes span several lines; emit them on their own.
                self.end_line();
                self.class_decl(class);
                self.start_line();
            }
        }
    }

    fn branch(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(block) => self.block_body(block),
            other => self.inline_statement(other),
        }
    }

    /// Print `{ ... }` starting at the current column; ends after `}`.
    fn block_body(&mut self, block: &BlockStatement) {
        if block.statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.end_line();
        self.indent += 1;
        for stmt in &block.statements {
            self.statement(stmt);
        }
        self.indent -= 1;
        self.start_line();
        self.write("}");
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn class_decl(&mut self, class: &ClassDecl) {
        for decorator in &class.decorators {
            self.start_line();
            self.decorator(decorator);
            self.end_line();
        }

        self.start_line();
        match class.export {
            ExportKind::None => {}
            ExportKind::Named => self.write("export "),
            ExportKind::Default => self.write("export default "),
        }
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(name.as_str());
        }
        if let Some(extends) = &class.extends {
            self.write(" extends ");
            self.write(extends.as_str());
        }

        if class.members.is_empty() {
            self.write(" {}");
            self.end_line();
            return;
        }

        self.write(" {");
        self.end_line();
        self.indent += 1;
        let mut previous: Option<&ClassMember> = None;
        for member in &class.members {
            if let Some(prev) = previous {
                let both_fields =
                    matches!(prev, ClassMember::Field(_)) && matches!(member, ClassMember::Field(_));
                if !both_fields {
                    self.end_line();
                }
            }
            self.class_member(member);
            previous = Some(member);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(field) => {
                self.start_line();
                for decorator in &field.decorators {
                    self.decorator(decorator);
                    self.write(" ");
                }
                if let Some(visibility) = field.visibility {
                    self.write(visibility.keyword());
                    self.write(" ");
                }
                if field.is_static {
                    self.write("static ");
                }
                if field.is_readonly {
                    self.write("readonly ");
                }
                self.write(field.name.as_str());
                if field.optional {
                    self.write("?");
                }
                if let Some(ty) = &field.type_annotation {
                    self.write(": ");
                    self.type_annotation(ty);
                }
                if let Some(init) = &field.initializer {
                    self.write(" = ");
                    self.expression(init, Precedence::Assignment);
                }
                self.write(";");
                self.end_line();
            }
            ClassMember::Method(method) => {
                for decorator in &method.decorators {
                    self.start_line();
                    self.decorator(decorator);
                    self.end_line();
                }
                self.start_line();
                if let Some(visibility) = method.visibility {
                    self.write(visibility.keyword());
                    self.write(" ");
                }
                if method.is_static {
                    self.write("static ");
                }
                self.write(method.name.as_str());
                self.parameters(&method.params);
                if let Some(ty) = &method.return_type {
                    self.write(": ");
                    self.type_annotation(ty);
                }
                self.write(" ");
                self.block_body(&method.body);
                self.end_line();
            }
            ClassMember::Constructor(ctor) => {
                self.start_line();
                self.write("constructor");
                self.parameters(&ctor.params);
                self.write(" ");
                self.block_body(&ctor.body);
                self.end_line();
            }
        }
    }

    fn parameters(&mut self, params: &[Parameter]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(param.name.as_str());
            if param.optional {
                self.write("?");
            }
            if let Some(ty) = &param.type_annotation {
                self.write(": ");
                self.type_annotation(ty);
            }
            if let Some(default) = &param.default_value {
                self.write(" = ");
                self.expression(default, Precedence::Assignment);
            }
        }
        self.write(")");
    }

    fn decorator(&mut self, decorator: &Decorator) {
        self.write("@");
        self.expression(&decorator.expression, Precedence::Call);
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn type_annotation(&mut self, ty: &TypeAnnotation) {
        match &ty.ty {
            Type::Primitive(p) => self.write(p.name()),
            Type::Reference(r) => {
                self.write(r.name.as_str());
                if let Some(args) = &r.type_args {
                    self.write("<");
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.type_annotation(arg);
                    }
                    self.write(">");
                }
            }
            Type::Union(u) => {
                for (i, member) in u.types.iter().enumerate() {
                    if i > 0 {
                        self.write(" | ");
                    }
                    self.type_annotation(member);
                }
            }
            Type::Array(arr) => {
                if matches!(arr.element_type.ty, Type::Union(_)) {
                    self.write("(");
                    self.type_annotation(&arr.element_type);
                    self.write(")");
                } else {
                    self.type_annotation(&arr.element_type);
                }
                self.write("[]");
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Print `expr`, parenthesizing it if it binds looser than `min`.
    fn expression(&mut self, expr: &Expression, min: Precedence) {
        let needs_parens = expression_precedence(expr) < min;
        if needs_parens {
            self.write("(");
        }
        self.expression_inner(expr);
        if needs_parens {
            self.write(")");
        }
    }

    fn expression_inner(&mut self, expr: &Expression) {
        match expr {
            Expression::NumberLiteral(n) => self.write(&format_number(n.value)),
            Expression::StringLiteral(s) => self.write(&quote_string(&s.value)),
            Expression::TemplateLiteral(t) => {
                self.write("`");
                for part in &t.parts {
                    match part {
                        TemplateElement::String(text) => self.write(&escape_template(text)),
                        TemplateElement::Expression(e) => {
                            self.write("${");
                            self.expression(e, Precedence::None);
                            self.write("}");
                        }
                    }
                }
                self.write("`");
            }
            Expression::BooleanLiteral(b) => self.write(if b.value { "true" } else { "false" }),
            Expression::NullLiteral(_) => self.write("null"),
            Expression::Identifier(id) => self.write(id.as_str()),
            Expression::This(_) => self.write("this"),
            Expression::Unary(u) => {
                self.write(u.operator.as_str());
                // Avoid `--x` / `++x` when nesting signs.
                let operand_sign = match u.operand.as_ref() {
                    Expression::Unary(inner) => Some(inner.operator),
                    _ => None,
                };
                if matches!(
                    (u.operator, operand_sign),
                    (UnaryOperator::Minus, Some(UnaryOperator::Minus))
                        | (UnaryOperator::Plus, Some(UnaryOperator::Plus))
                ) {
                    self.write(" ");
                }
                self.expression(&u.operand, Precedence::Unary);
            }
            Expression::Binary(b) => {
                let prec = binary_precedence(b.operator);
                self.expression(&b.left, prec);
                self.write(" ");
                self.write(b.operator.as_str());
                self.write(" ");
                self.expression(&b.right, prec.next());
            }
            Expression::Logical(l) => {
                let prec = logical_precedence(l.operator);
                self.expression(&l.left, prec);
                self.write(" ");
                self.write(l.operator.as_str());
                self.write(" ");
                self.expression(&l.right, prec.next());
            }
            Expression::Conditional(c) => {
                self.expression(&c.test, Precedence::NullCoalescing);
                self.write(" ? ");
                self.expression(&c.consequent, Precedence::Assignment);
                self.write(" : ");
                self.expression(&c.alternate, Precedence::Assignment);
            }
            Expression::Assignment(a) => {
                self.expression(&a.target, Precedence::Call);
                self.write(" = ");
                self.expression(&a.value, Precedence::Assignment);
            }
            Expression::Call(call) => {
                self.expression(&call.callee, Precedence::Call);
                self.arguments(&call.arguments);
            }
            Expression::Member(m) => {
                self.expression(&m.object, Precedence::Call);
                self.write(".");
                self.write(m.property.as_str());
            }
            Expression::New(n) => {
                self.write("new ");
                self.expression(&n.callee, Precedence::Call);
                self.arguments(&n.arguments);
            }
            Expression::Parenthesized(p) => {
                self.write("(");
                self.expression(&p.expression, Precedence::None);
                self.write(")");
            }
        }
    }

    fn arguments(&mut self, arguments: &[Expression]) {
        self.write("(");
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expression(arg, Precedence::Assignment);
        }
        self.write(")");
    }
}

/// Binding strength of an expression node.
fn expression_precedence(expr: &Expression) -> Precedence {
    match expr {
        Expression::Assignment(_) => Precedence::Assignment,
        Expression::Conditional(_) => Precedence::Conditional,
        Expression::Logical(l) => logical_precedence(l.operator),
        Expression::Binary(b) => binary_precedence(b.operator),
        Expression::Unary(_) => Precedence::Unary,
        Expression::Call(_) | Expression::Member(_) | Expression::New(_) => Precedence::Call,
        _ => Precedence::Primary,
    }
}

fn needs_blank_line(prev: &Statement, next: &Statement) -> bool {
    let is_class = |s: &Statement| matches!(s, Statement::ClassDecl(_));
    let is_import = |s: &Statement| matches!(s, Statement::ImportDecl(_));
    is_class(prev) || is_class(next) || (is_import(prev) && !is_import(next))
}

/// Format a number the way JavaScript's `Number.prototype.toString` does.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let abs = value.abs();
    if (1e-7..1e21).contains(&abs) {
        // Rust prints the shortest round-tripping decimal, matching JS in this range.
        return format!("{}", value);
    }
    // Exponential form: 1e+21, 1.5e-8
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn escape_template(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' => out.push_str("\\`"),
            '\\' => out.push_str("\\\\"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::build;
    use crate::parser::Parser;

    fn reprint(source: &str) -> String {
        let module = Parser::new(source).unwrap().parse().unwrap();
        Printer::print_module(&module)
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(9.99), "9.99");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_class_layout() {
        let printed = reprint(
            "@Value class Point { @NonNull x: number; private y?: number = 0; getX(): number { return this.x; } }",
        );
        assert_eq!(
            printed,
            "@Value\nclass Point {\n  @NonNull x: number;\n  private y?: number = 0;\n\n  getX(): number {\n    return this.x;\n  }\n}\n"
        );
    }

    #[test]
    fn test_empty_class_and_body() {
        assert_eq!(reprint("class Empty {}"), "class Empty {}\n");
        assert_eq!(
            reprint("class A { constructor() {} }"),
            "class A {\n  constructor() {}\n}\n"
        );
    }

    #[test]
    fn test_parentheses_follow_precedence() {
        let expr = build::binary(
            BinaryOperator::Multiply,
            build::binary(BinaryOperator::Add, build::id_expr("a"), build::id_expr("b")),
            build::id_expr("c"),
        );
        assert_eq!(Printer::print_expression(&expr), "(a + b) * c");

        let expr = build::binary(
            BinaryOperator::Subtract,
            build::id_expr("a"),
            build::binary(BinaryOperator::Subtract, build::id_expr("b"), build::id_expr("c")),
        );
        assert_eq!(Printer::print_expression(&expr), "a - (b - c)");

        let expr = build::unary(
            UnaryOperator::Not,
            build::binary(BinaryOperator::Instanceof, build::id_expr("o"), build::id_expr("P")),
        );
        assert_eq!(Printer::print_expression(&expr), "!(o instanceof P)");
    }

    #[test]
    fn test_if_without_braces() {
        assert_eq!(
            reprint("if (other == null) return false;"),
            "if (other == null) return false;\n"
        );
        assert_eq!(
            reprint("if (a) { b(); } else { c(); }"),
            "if (a) {\n  b();\n} else {\n  c();\n}\n"
        );
    }

    #[test]
    fn test_string_and_template_escapes() {
        assert_eq!(reprint(r#"let s = 'say "hi"';"#), "let s = \"say \\\"hi\\\"\";\n");
        assert_eq!(
            reprint("let t = `a${b}c`;"),
            "let t = `a${b}c`;\n"
        );
    }

    #[test]
    fn test_print_is_stable() {
        let source = r#"
            import { Value } from "augment";
            @Value
            export class User extends Base {
                static count: number = 0;
                id: number;
                tags: (string | null)[];
                constructor(id: number) { this.id = id; Object.freeze(this); }
                hashCode(): number {
                    let hash = 0;
                    hash = hash * 31 + (this.id == null ? 0 : typeof this.id === "number" ? this.id : String(this.id).length);
                    return hash | 0;
                }
            }
            let u = new User(1);
            console.log(u.hashCode());
        "#;
        let once = reprint(source);
        let twice = reprint(&once);
        assert_eq!(once, twice);
        assert!(once.contains("tags: (string | null)[];"));
        assert!(once.contains("import { Value } from \"augment\";\n\n@Value"));
    }
}
