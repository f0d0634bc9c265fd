//! Heap objects

use rustc_hash::FxHashMap;

use super::value::{ClassId, ObjectId, Value};

/// What kind of object this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Instance of a user class
    Instance(ClassId),
    /// Created by `new Error(message)`
    Error,
}

/// Heap object
#[derive(Debug, Clone)]
pub struct Object {
    pub kind: ObjectKind,
    fields: FxHashMap<String, Value>,
    frozen: bool,
}

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            fields: FxHashMap::default(),
            frozen: false,
        }
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self.kind {
            ObjectKind::Instance(id) => Some(id),
            ObjectKind::Error => None,
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field, failing once the object is frozen.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), String> {
        if self.frozen {
            return Err(format!(
                "Cannot assign to read only property '{}' of object",
                name
            ));
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

/// Object storage. Objects live until the heap is dropped.
#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<Object>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frozen_object_rejects_writes() {
        let mut object = Object::new(ObjectKind::Instance(ClassId(0)));
        object.set_field("x", Value::Number(1.0)).unwrap();
        object.freeze();

        let err = object.set_field("x", Value::Number(2.0)).unwrap_err();
        assert!(err.contains("read only property 'x'"));
        assert!(object.set_field("y", Value::Null).is_err());
        assert_eq!(object.get_field("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_heap_alloc() {
        let mut heap = Heap::new();
        let a = heap.alloc(Object::new(ObjectKind::Error));
        let b = heap.alloc(Object::new(ObjectKind::Error));
        assert_ne!(a, b);
        assert_eq!(heap.len(), 2);
        assert!(heap.get(a).is_some());
    }
}
