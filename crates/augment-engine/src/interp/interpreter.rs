//! Tree-walking evaluator.
//!
//! Executes the statement and expression subset produced by the parser.
//! Method and constructor calls each get a fresh frame; there are no closures,
//! so a method body sees its own locals, module-level bindings and classes.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::parser::ast::*;
use crate::parser::Printer;

use super::class_registry::{ClassRegistry, RuntimeClass};
use super::error::EvalError;
use super::object::{Heap, Object, ObjectKind};
use super::value::{string_to_number, to_int32, Builtin, ClassId, FunctionRef, ObjectId, Value};

/// Maximum nesting of method and constructor calls.
pub const MAX_CALL_DEPTH: usize = 128;

type EvalResult<T> = Result<T, EvalError>;

/// How a statement finished.
enum Flow {
    Normal,
    Return(Value),
}

/// Activation record for a call.
#[derive(Debug)]
struct Frame {
    this: Value,
    scopes: Vec<FxHashMap<String, Value>>,
}

impl Frame {
    fn new(this: Value) -> Self {
        Self {
            this,
            scopes: vec![FxHashMap::default()],
        }
    }

    fn declare(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Overwrite an existing binding; returns `false` if the name is unbound.
    fn assign(&mut self, name: &str, value: Value) -> bool {
        match self.scopes.iter_mut().rev().find_map(|scope| scope.get_mut(name)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// The evaluator
#[derive(Debug)]
pub struct Interpreter {
    heap: Heap,
    classes: ClassRegistry,
    /// Module-level bindings
    module_frame: Frame,
    /// Active calls, innermost last
    frames: Vec<Frame>,
    /// Lines written by `console.log`
    output: Vec<String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            heap: Heap::new(),
            classes: ClassRegistry::new(),
            module_frame: Frame::new(Value::Undefined),
            frames: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Execute every top-level statement in order.
    pub fn run_module(&mut self, module: &Module) -> EvalResult<()> {
        for stmt in &module.statements {
            if let Flow::Return(_) = self.exec_statement(stmt)? {
                break;
            }
        }
        Ok(())
    }

    /// Lines printed by `console.log` so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Value of a module-level binding.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.module_frame.lookup(name).cloned()
    }

    /// `new ClassName(...args)`
    pub fn construct(&mut self, class_name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let callee = self
            .lookup(class_name)
            .ok_or_else(|| EvalError::ReferenceError(format!("{} is not defined", class_name)))?;
        self.instantiate(&callee, args, class_name)
    }

    /// `target.name(...args)`; a class target calls a static method.
    pub fn call_method(&mut self, target: &Value, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        match target {
            Value::Object(id) => {
                let kind = self.object(*id)?.kind;
                if let ObjectKind::Instance(class_id) = kind {
                    if let Some(method) = self.method(class_id, name, false) {
                        return self.invoke(method, target.clone(), args);
                    }
                }
                match self.object(*id)?.get_field(name).cloned() {
                    Some(callee) => self.call_value(&callee, target.clone(), args, name),
                    None if name == "toString" => Ok(Value::String(self.to_display_string(target)?)),
                    None => Err(EvalError::type_error(format!("{} is not a function", name))),
                }
            }
            Value::Class(id) => {
                if let Some(method) = self.method(*id, name, true) {
                    return self.invoke(method, target.clone(), args);
                }
                let callee = self.get_property(target, name)?;
                self.call_value(&callee, target.clone(), args, name)
            }
            Value::Undefined | Value::Null => Err(EvalError::type_error(format!(
                "Cannot read properties of {} (reading '{}')",
                target, name
            ))),
            _ if name == "toString" => Ok(Value::String(self.to_display_string(target)?)),
            _ => {
                let callee = self.get_property(target, name)?;
                self.call_value(&callee, target.clone(), args, name)
            }
        }
    }

    /// `target.name`
    pub fn get_property(&self, target: &Value, name: &str) -> EvalResult<Value> {
        match target {
            Value::Object(id) => {
                let object = self.object(*id)?;
                if let Some(value) = object.get_field(name) {
                    return Ok(value.clone());
                }
                if let Some(class_id) = object.class_id() {
                    if self.method(class_id, name, false).is_some() {
                        return Ok(Value::Function(FunctionRef {
                            class: class_id,
                            name: name.to_string(),
                            is_static: false,
                        }));
                    }
                }
                Ok(Value::Undefined)
            }
            Value::Class(id) => {
                let class = self.class(*id)?;
                if let Some(value) = class.statics.get(name) {
                    Ok(value.clone())
                } else if class.static_methods.contains_key(name) {
                    Ok(Value::Function(FunctionRef {
                        class: *id,
                        name: name.to_string(),
                        is_static: true,
                    }))
                } else if name == "name" {
                    Ok(Value::string(class.name.as_str()))
                } else {
                    Ok(Value::Undefined)
                }
            }
            Value::String(s) if name == "length" => Ok(Value::Number(s.encode_utf16().count() as f64)),
            Value::Native(Builtin::Console) if name == "log" => Ok(Value::Native(Builtin::ConsoleLog)),
            Value::Native(Builtin::Object) if name == "freeze" => {
                Ok(Value::Native(Builtin::ObjectFreeze))
            }
            Value::Undefined | Value::Null => Err(EvalError::type_error(format!(
                "Cannot read properties of {} (reading '{}')",
                target, name
            ))),
            _ => Ok(Value::Undefined),
        }
    }

    /// `target.name = value`; fails on frozen objects.
    pub fn set_property(&mut self, target: &Value, name: &str, value: Value) -> EvalResult<()> {
        match target {
            Value::Object(id) => self
                .heap
                .get_mut(*id)
                .ok_or_else(|| dangling("object"))?
                .set_field(name, value)
                .map_err(EvalError::TypeError),
            Value::Class(id) => {
                let class = self.classes.get_mut(*id).ok_or_else(|| dangling("class"))?;
                class.statics.insert(name.to_string(), value);
                Ok(())
            }
            Value::Undefined | Value::Null => Err(EvalError::type_error(format!(
                "Cannot set properties of {} (setting '{}')",
                target, name
            ))),
            other => Err(EvalError::type_error(format!(
                "Cannot create property '{}' on {} '{}'",
                name,
                other.type_of(),
                other
            ))),
        }
    }

    /// String conversion as done by templates and `String(value)`.
    ///
    /// Instances use their class's `toString()` method when it has one.
    pub fn to_display_string(&mut self, value: &Value) -> EvalResult<String> {
        match value {
            Value::Object(id) => match self.object_kind(*id)? {
                ObjectKind::Instance(class_id) => {
                    if self.method(class_id, "toString", false).is_none() {
                        return Ok("[object Object]".to_string());
                    }
                    match self.call_method(value, "toString", Vec::new())? {
                        Value::Object(_) => Ok("[object Object]".to_string()),
                        primitive => Ok(primitive.to_string()),
                    }
                }
                ObjectKind::Error => {
                    let message = self.error_message(*id)?;
                    if message.is_empty() {
                        Ok("Error".to_string())
                    } else {
                        Ok(format!("Error: {}", message))
                    }
                }
            },
            Value::Class(id) => Ok(format!("class {} {{ }}", self.class(*id)?.name)),
            other => Ok(other.to_string()),
        }
    }

    /// `a === b`
    pub fn strict_equals(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Object(x), Value::Object(y)) => x == y,
            (Value::Class(x), Value::Class(y)) => x == y,
            (Value::Function(x), Value::Function(y)) => x == y,
            (Value::Native(x), Value::Native(y)) => x == y,
            _ => false,
        }
    }

    /// `a == b`
    pub fn loose_equals(&mut self, a: &Value, b: &Value) -> EvalResult<bool> {
        match (a, b) {
            _ if a.is_nullish() || b.is_nullish() => Ok(a.is_nullish() && b.is_nullish()),
            (Value::Number(x), Value::String(s)) | (Value::String(s), Value::Number(x)) => {
                Ok(*x == string_to_number(s))
            }
            (Value::Bool(x), other) | (other, Value::Bool(x)) => {
                let as_number = Value::Number(if *x { 1.0 } else { 0.0 });
                self.loose_equals(&as_number, other)
            }
            (Value::Object(_), Value::Number(_) | Value::String(_)) => {
                let primitive = self.to_primitive(a)?;
                self.loose_equals(&primitive, b)
            }
            (Value::Number(_) | Value::String(_), Value::Object(_)) => {
                let primitive = self.to_primitive(b)?;
                self.loose_equals(a, &primitive)
            }
            _ => Ok(self.strict_equals(a, b)),
        }
    }

    /// Whether `Object.freeze` has been applied to the value.
    pub fn is_frozen(&self, value: &Value) -> bool {
        value
            .as_object()
            .and_then(|id| self.heap.get(id))
            .is_some_and(|object| object.is_frozen())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn exec_statement(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        match stmt {
            Statement::ImportDecl(_) | Statement::Empty(_) => Ok(Flow::Normal),
            Statement::ClassDecl(decl) => {
                self.declare_class(decl)?;
                Ok(Flow::Normal)
            }
            Statement::VariableDecl(decl) => {
                let value = match &decl.initializer {
                    Some(init) => self.eval(init)?,
                    None => Value::Undefined,
                };
                self.current_frame_mut().declare(decl.name.as_str(), value);
                Ok(Flow::Normal)
            }
            Statement::Expression(s) => {
                self.eval(&s.expression)?;
                Ok(Flow::Normal)
            }
            Statement::If(s) => {
                if self.eval(&s.condition)?.is_truthy() {
                    self.exec_statement(&s.then_branch)
                } else if let Some(else_branch) = &s.else_branch {
                    self.exec_statement(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Statement::Return(s) => {
                let value = match &s.value {
                    Some(value) => self.eval(value)?,
                    None => Value::Undefined,
                };
                Ok(Flow::Return(value))
            }
            Statement::Throw(s) => {
                let value = self.eval(&s.value)?;
                let message = match value.as_object() {
                    Some(id) if self.object_kind(id)? == ObjectKind::Error => self.error_message(id)?,
                    _ => self.to_display_string(&value)?,
                };
                trace!(%message, "throw");
                Err(EvalError::Thrown { message })
            }
            Statement::Block(block) => self.exec_block(block),
        }
    }

    fn exec_block(&mut self, block: &BlockStatement) -> EvalResult<Flow> {
        self.current_frame_mut().scopes.push(FxHashMap::default());
        let mut result = Ok(Flow::Normal);
        for stmt in &block.statements {
            match self.exec_statement(stmt) {
                Ok(Flow::Normal) => {}
                other => {
                    result = other;
                    break;
                }
            }
        }
        self.current_frame_mut().scopes.pop();
        result
    }

    /// Run a function body in the current frame and produce its return value.
    fn exec_body(&mut self, body: &BlockStatement) -> EvalResult<Value> {
        for stmt in &body.statements {
            if let Flow::Return(value) = self.exec_statement(stmt)? {
                return Ok(value);
            }
        }
        Ok(Value::Undefined)
    }

    fn declare_class(&mut self, decl: &ClassDecl) -> EvalResult<ClassId> {
        let id = self.classes.next_class_id();
        let name = decl.name_str().unwrap_or("default").to_string();
        self.classes.register(RuntimeClass::from_decl(id, name.clone(), decl));
        if decl.name.is_some() {
            self.current_frame_mut().declare(&name, Value::Class(id));
        }
        trace!(class = %name, "declared class");

        let class_value = Value::Class(id);
        for member in &decl.members {
            if let ClassMember::Field(field) = member {
                if field.is_static {
                    let value = match &field.initializer {
                        Some(init) => {
                            self.with_frame(Frame::new(class_value.clone()), |interp| interp.eval(init))?
                        }
                        None => Value::Undefined,
                    };
                    self.set_property(&class_value, field.name.as_str(), value)?;
                }
            }
        }

        Ok(id)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn eval(&mut self, expr: &Expression) -> EvalResult<Value> {
        match expr {
            Expression::NumberLiteral(n) => Ok(Value::Number(n.value)),
            Expression::StringLiteral(s) => Ok(Value::string(s.value.as_str())),
            Expression::BooleanLiteral(b) => Ok(Value::Bool(b.value)),
            Expression::NullLiteral(_) => Ok(Value::Null),
            Expression::TemplateLiteral(t) => self.eval_template(t),
            Expression::Identifier(id) => self
                .lookup(id.as_str())
                .ok_or_else(|| EvalError::ReferenceError(format!("{} is not defined", id.name))),
            Expression::This(_) => Ok(self.current_frame().this.clone()),
            Expression::Unary(u) => self.eval_unary(u),
            Expression::Binary(b) => {
                let left = self.eval(&b.left)?;
                let right = self.eval(&b.right)?;
                self.eval_binary(b.operator, left, right)
            }
            Expression::Logical(l) => {
                let left = self.eval(&l.left)?;
                let short_circuit = match l.operator {
                    LogicalOperator::And => !left.is_truthy(),
                    LogicalOperator::Or => left.is_truthy(),
                    LogicalOperator::NullishCoalescing => !left.is_nullish(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.eval(&l.right)
                }
            }
            Expression::Conditional(c) => {
                if self.eval(&c.test)?.is_truthy() {
                    self.eval(&c.consequent)
                } else {
                    self.eval(&c.alternate)
                }
            }
            Expression::Assignment(a) => self.eval_assignment(a),
            Expression::Call(call) => self.eval_call(call),
            Expression::Member(m) => {
                let object = self.eval(&m.object)?;
                self.get_property(&object, m.property.as_str())
            }
            Expression::New(n) => {
                let callee = self.eval(&n.callee)?;
                let args = self.eval_arguments(&n.arguments)?;
                self.instantiate(&callee, args, &Printer::print_expression(&n.callee))
            }
            Expression::Parenthesized(p) => self.eval(&p.expression),
        }
    }

    fn eval_template(&mut self, template: &TemplateLiteral) -> EvalResult<Value> {
        let mut out = String::new();
        for part in &template.parts {
            match part {
                TemplateElement::String(text) => out.push_str(text),
                TemplateElement::Expression(expr) => {
                    let value = self.eval(expr)?;
                    out.push_str(&self.to_display_string(&value)?);
                }
            }
        }
        Ok(Value::String(out))
    }

    fn eval_unary(&mut self, unary: &UnaryExpression) -> EvalResult<Value> {
        if unary.operator == UnaryOperator::Typeof {
            // `typeof undeclared` is "undefined", not a ReferenceError
            let value = match unary.operand.as_ref() {
                Expression::Identifier(id) => self.lookup(id.as_str()).unwrap_or(Value::Undefined),
                other => self.eval(other)?,
            };
            return Ok(Value::string(value.type_of()));
        }

        let operand = self.eval(&unary.operand)?;
        match unary.operator {
            UnaryOperator::Not => Ok(Value::Bool(!operand.is_truthy())),
            UnaryOperator::Minus => Ok(Value::Number(-self.to_number(&operand)?)),
            UnaryOperator::Plus => Ok(Value::Number(self.to_number(&operand)?)),
            UnaryOperator::Typeof => Ok(Value::string(operand.type_of())),
        }
    }

    fn eval_binary(&mut self, op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        use BinaryOperator::*;

        let value = match op {
            Add => {
                let left = self.to_primitive(&left)?;
                let right = self.to_primitive(&right)?;
                if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                    Value::String(format!("{}{}", left, right))
                } else {
                    Value::Number(self.to_number(&left)? + self.to_number(&right)?)
                }
            }
            Subtract => Value::Number(self.to_number(&left)? - self.to_number(&right)?),
            Multiply => Value::Number(self.to_number(&left)? * self.to_number(&right)?),
            Divide => Value::Number(self.to_number(&left)? / self.to_number(&right)?),
            Modulo => Value::Number(self.to_number(&left)? % self.to_number(&right)?),
            Equal => Value::Bool(self.loose_equals(&left, &right)?),
            NotEqual => Value::Bool(!self.loose_equals(&left, &right)?),
            StrictEqual => Value::Bool(self.strict_equals(&left, &right)),
            StrictNotEqual => Value::Bool(!self.strict_equals(&left, &right)),
            LessThan | GreaterThan | LessEqual | GreaterEqual => {
                let left = self.to_primitive(&left)?;
                let right = self.to_primitive(&right)?;
                let ordering = match (&left, &right) {
                    (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                    _ => self.to_number(&left)?.partial_cmp(&self.to_number(&right)?),
                };
                Value::Bool(ordering.is_some_and(|ord| match op {
                    LessThan => ord.is_lt(),
                    GreaterThan => ord.is_gt(),
                    LessEqual => ord.is_le(),
                    _ => ord.is_ge(),
                }))
            }
            BitwiseOr => {
                let (a, b) = (to_int32(self.to_number(&left)?), to_int32(self.to_number(&right)?));
                Value::Number(f64::from(a | b))
            }
            BitwiseAnd => {
                let (a, b) = (to_int32(self.to_number(&left)?), to_int32(self.to_number(&right)?));
                Value::Number(f64::from(a & b))
            }
            Instanceof => Value::Bool(self.instance_of(&left, &right)?),
        };
        Ok(value)
    }

    fn instance_of(&self, value: &Value, class: &Value) -> EvalResult<bool> {
        let kind = match value {
            Value::Object(id) => Some(self.object_kind(*id)?),
            _ => None,
        };
        match class {
            Value::Class(class_id) => Ok(kind == Some(ObjectKind::Instance(*class_id))),
            Value::Native(Builtin::Error) => Ok(kind == Some(ObjectKind::Error)),
            _ => Err(EvalError::type_error(
                "Right-hand side of 'instanceof' is not callable",
            )),
        }
    }

    fn eval_assignment(&mut self, assignment: &AssignmentExpression) -> EvalResult<Value> {
        match assignment.target.as_ref() {
            Expression::Identifier(id) => {
                let value = self.eval(&assignment.value)?;
                let assigned = self
                    .frames
                    .last_mut()
                    .is_some_and(|frame| frame.assign(id.as_str(), value.clone()))
                    || self.module_frame.assign(id.as_str(), value.clone());
                if !assigned {
                    return Err(EvalError::ReferenceError(format!("{} is not defined", id.name)));
                }
                Ok(value)
            }
            Expression::Member(m) => {
                let object = self.eval(&m.object)?;
                let value = self.eval(&assignment.value)?;
                self.set_property(&object, m.property.as_str(), value.clone())?;
                Ok(value)
            }
            _ => Err(EvalError::Unsupported("invalid assignment target".to_string())),
        }
    }

    fn eval_call(&mut self, call: &CallExpression) -> EvalResult<Value> {
        if let Expression::Member(m) = call.callee.as_ref() {
            let object = self.eval(&m.object)?;
            let args = self.eval_arguments(&call.arguments)?;
            return self.call_method(&object, m.property.as_str(), args);
        }

        let callee = self.eval(&call.callee)?;
        let args = self.eval_arguments(&call.arguments)?;
        self.call_value(&callee, Value::Undefined, args, &Printer::print_expression(&call.callee))
    }

    fn eval_arguments(&mut self, arguments: &[Expression]) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|arg| self.eval(arg)).collect()
    }

    // ========================================================================
    // Calls
    // ========================================================================

    fn call_value(
        &mut self,
        callee: &Value,
        this: Value,
        args: Vec<Value>,
        label: &str,
    ) -> EvalResult<Value> {
        match callee {
            Value::Function(f) => {
                let method = self
                    .method(f.class, &f.name, f.is_static)
                    .ok_or_else(|| EvalError::type_error(format!("{} is not a function", label)))?;
                self.invoke(method, this, args)
            }
            Value::Native(builtin) if builtin.is_callable() => self.call_builtin(*builtin, args),
            Value::Class(id) => Err(EvalError::type_error(format!(
                "Class constructor {} cannot be invoked without 'new'",
                self.class(*id)?.name
            ))),
            _ => Err(EvalError::type_error(format!("{} is not a function", label))),
        }
    }

    fn call_builtin(&mut self, builtin: Builtin, args: Vec<Value>) -> EvalResult<Value> {
        match builtin {
            Builtin::ConsoleLog => {
                let mut parts = Vec::with_capacity(args.len());
                for arg in &args {
                    parts.push(self.to_display_string(arg)?);
                }
                let line = parts.join(" ");
                trace!(%line, "console.log");
                self.output.push(line);
                Ok(Value::Undefined)
            }
            Builtin::ObjectFreeze => {
                let target = args.into_iter().next().unwrap_or(Value::Undefined);
                if let Value::Object(id) = target {
                    self.heap.get_mut(id).ok_or_else(|| dangling("object"))?.freeze();
                }
                Ok(target)
            }
            Builtin::String => match args.first() {
                Some(value) => Ok(Value::String(self.to_display_string(value)?)),
                None => Ok(Value::string("")),
            },
            Builtin::Error => self.new_error(args),
            Builtin::Console | Builtin::Object => Err(EvalError::type_error(format!(
                "{} is not a function",
                builtin.name()
            ))),
        }
    }

    fn invoke(&mut self, method: Rc<MethodDecl>, this: Value, args: Vec<Value>) -> EvalResult<Value> {
        self.with_frame(Frame::new(this), |interp| {
            interp.bind_params(&method.params, args)?;
            interp.exec_body(&method.body)
        })
    }

    fn instantiate(&mut self, callee: &Value, args: Vec<Value>, label: &str) -> EvalResult<Value> {
        match callee {
            Value::Class(id) => self.construct_instance(*id, args),
            Value::Native(Builtin::Error) => self.new_error(args),
            _ => Err(EvalError::type_error(format!("{} is not a constructor", label))),
        }
    }

    fn construct_instance(&mut self, class_id: ClassId, args: Vec<Value>) -> EvalResult<Value> {
        let (fields, constructor) = {
            let class = self.class(class_id)?;
            (class.instance_fields.clone(), class.constructor.clone())
        };

        let this = Value::Object(self.heap.alloc(Object::new(ObjectKind::Instance(class_id))));

        // Field initializers run first, in declaration order.
        self.with_frame(Frame::new(this.clone()), |interp| {
            for field in &fields {
                let value = match &field.initializer {
                    Some(init) => interp.eval(init)?,
                    None => Value::Undefined,
                };
                interp.set_property(&this, &field.name, value)?;
            }
            Ok(())
        })?;

        if let Some(ctor) = constructor {
            self.with_frame(Frame::new(this.clone()), |interp| {
                interp.bind_params(&ctor.params, args)?;
                interp.exec_body(&ctor.body)
            })?;
        }

        Ok(this)
    }

    fn new_error(&mut self, args: Vec<Value>) -> EvalResult<Value> {
        let message = match args.first() {
            Some(Value::Undefined) | None => String::new(),
            Some(value) => self.to_display_string(value)?,
        };
        let id = self.heap.alloc(Object::new(ObjectKind::Error));
        let error = Value::Object(id);
        self.set_property(&error, "name", Value::string("Error"))?;
        self.set_property(&error, "message", Value::String(message))?;
        Ok(error)
    }

    fn error_message(&self, id: ObjectId) -> EvalResult<String> {
        Ok(self
            .object(id)?
            .get_field("message")
            .map(|v| v.to_string())
            .unwrap_or_default())
    }

    fn bind_params(&mut self, params: &[Parameter], args: Vec<Value>) -> EvalResult<()> {
        let mut args = args.into_iter();
        for param in params {
            let mut value = args.next().unwrap_or(Value::Undefined);
            if matches!(value, Value::Undefined) {
                if let Some(default) = &param.default_value {
                    value = self.eval(default)?;
                }
            }
            self.current_frame_mut().declare(param.name.as_str(), value);
        }
        Ok(())
    }

    fn with_frame<T>(
        &mut self,
        frame: Frame,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        if self.frames.len() >= MAX_CALL_DEPTH {
            return Err(EvalError::StackOverflow);
        }
        self.frames.push(frame);
        let result = f(self);
        self.frames.pop();
        result
    }

    // ========================================================================
    // Lookup and conversion helpers
    // ========================================================================

    fn current_frame(&self) -> &Frame {
        self.frames.last().unwrap_or(&self.module_frame)
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => &mut self.module_frame,
        }
    }

    /// Resolve a name: locals, module bindings, classes, then host globals.
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.frames.last().and_then(|frame| frame.lookup(name)) {
            return Some(value.clone());
        }
        if let Some(value) = self.module_frame.lookup(name) {
            return Some(value.clone());
        }
        if let Some(id) = self.classes.id_by_name(name) {
            return Some(Value::Class(id));
        }
        if let Some(builtin) = Builtin::from_global(name) {
            return Some(Value::Native(builtin));
        }
        match name {
            "undefined" => Some(Value::Undefined),
            "NaN" => Some(Value::Number(f64::NAN)),
            "Infinity" => Some(Value::Number(f64::INFINITY)),
            _ => None,
        }
    }

    fn object(&self, id: ObjectId) -> EvalResult<&Object> {
        self.heap.get(id).ok_or_else(|| dangling("object"))
    }

    fn object_kind(&self, id: ObjectId) -> EvalResult<ObjectKind> {
        Ok(self.object(id)?.kind)
    }

    fn class(&self, id: ClassId) -> EvalResult<&RuntimeClass> {
        self.classes.get(id).ok_or_else(|| dangling("class"))
    }

    fn method(&self, class_id: ClassId, name: &str, is_static: bool) -> Option<Rc<MethodDecl>> {
        let class = self.classes.get(class_id)?;
        let table = if is_static {
            &class.static_methods
        } else {
            &class.methods
        };
        table.get(name).cloned()
    }

    fn to_primitive(&mut self, value: &Value) -> EvalResult<Value> {
        match value {
            Value::Object(_) | Value::Class(_) => Ok(Value::String(self.to_display_string(value)?)),
            other => Ok(other.clone()),
        }
    }

    fn to_number(&mut self, value: &Value) -> EvalResult<f64> {
        Ok(match value {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Object(_) => {
                let text = self.to_display_string(value)?;
                string_to_number(&text)
            }
            Value::Class(_) | Value::Function(_) | Value::Native(_) => f64::NAN,
        })
    }
}

fn dangling(what: &str) -> EvalError {
    EvalError::Unsupported(format!("dangling {} reference", what))
}
