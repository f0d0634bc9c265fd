//! Class registry for runtime class metadata

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::parser::ast::{ClassDecl, ClassMember, ConstructorDecl, Expression, MethodDecl};

use super::value::{ClassId, Value};

/// Instance field with its initializer, evaluated per construction.
#[derive(Debug, Clone)]
pub struct InstanceField {
    pub name: String,
    pub initializer: Option<Expression>,
}

/// Runtime view of a class declaration.
#[derive(Debug)]
pub struct RuntimeClass {
    pub id: ClassId,
    pub name: String,
    pub instance_fields: Vec<InstanceField>,
    pub constructor: Option<Rc<ConstructorDecl>>,
    pub methods: FxHashMap<String, Rc<MethodDecl>>,
    pub static_methods: FxHashMap<String, Rc<MethodDecl>>,
    /// Current values of static fields
    pub statics: FxHashMap<String, Value>,
}

impl RuntimeClass {
    /// Collect members of a declaration. Static fields start out `undefined`;
    /// the interpreter evaluates their initializers after registration.
    pub fn from_decl(id: ClassId, name: String, decl: &ClassDecl) -> Self {
        let mut class = Self {
            id,
            name,
            instance_fields: Vec::new(),
            constructor: None,
            methods: FxHashMap::default(),
            static_methods: FxHashMap::default(),
            statics: FxHashMap::default(),
        };

        for member in &decl.members {
            match member {
                ClassMember::Field(field) if field.is_static => {
                    class.statics.insert(field.name.name.clone(), Value::Undefined);
                }
                ClassMember::Field(field) => class.instance_fields.push(InstanceField {
                    name: field.name.name.clone(),
                    initializer: field.initializer.clone(),
                }),
                ClassMember::Method(method) if method.is_static => {
                    class
                        .static_methods
                        .insert(method.name.name.clone(), Rc::new(method.clone()));
                }
                ClassMember::Method(method) => {
                    class
                        .methods
                        .insert(method.name.name.clone(), Rc::new(method.clone()));
                }
                ClassMember::Constructor(ctor) => class.constructor = Some(Rc::new(ctor.clone())),
            }
        }

        class
    }
}

/// Class registry for the interpreter
#[derive(Debug, Default)]
pub struct ClassRegistry {
    /// Classes indexed by ID
    classes: Vec<RuntimeClass>,
    /// Class name to the most recently registered ID
    name_to_id: FxHashMap<String, ClassId>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_class_id(&self) -> ClassId {
        ClassId(self.classes.len())
    }

    /// Register a class; a later class with the same name shadows earlier ones.
    pub fn register(&mut self, class: RuntimeClass) -> ClassId {
        let id = class.id;
        self.name_to_id.insert(class.name.clone(), id);
        self.classes.push(class);
        id
    }

    pub fn get(&self, id: ClassId) -> Option<&RuntimeClass> {
        self.classes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ClassId) -> Option<&mut RuntimeClass> {
        self.classes.get_mut(id.0)
    }

    pub fn id_by_name(&self, name: &str) -> Option<ClassId> {
        self.name_to_id.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
