//! Transformation plans.
//!
//! A plan collects what should be generated for one class. Handlers never
//! touch the plan directly: each returns a [`GenerationFlags`] update and the
//! plan merges it with [`TransformationPlan::apply`]. Merging is a flag-wise
//! union, so once a flag is set nothing can clear it.

use crate::parser::ast::ClassDecl;

use super::config::AugmentConfig;
use super::property::PropertyDescriptor;

/// Which properties become constructor parameters.
///
/// Ordered `None < RequiredFieldsOnly < AllFields`; merging keeps the larger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstructorMode {
    /// No parameters.
    #[default]
    None,
    /// Properties with neither a default value nor `?`.
    RequiredFieldsOnly,
    /// Every property, in declaration order.
    AllFields,
}

/// Independent generation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GenerationFlags {
    pub constructor: bool,
    pub immutable: bool,
    pub to_string: bool,
    pub equals: bool,
    pub hash_code: bool,
    pub with_methods: bool,
    pub getters: bool,
    pub setters: bool,
    pub builder: bool,
    pub log_field: bool,
    pub singleton: bool,
    pub null_validation: bool,
    pub constructor_mode: ConstructorMode,
}

impl GenerationFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a constructor with the given parameter mode.
    pub fn with_constructor(mut self, mode: ConstructorMode) -> Self {
        self.constructor = true;
        self.constructor_mode = mode;
        self
    }

    /// Flag-wise union: booleans are OR-ed, the constructor mode is the maximum.
    pub fn union(self, other: GenerationFlags) -> Self {
        Self {
            constructor: self.constructor || other.constructor,
            immutable: self.immutable || other.immutable,
            to_string: self.to_string || other.to_string,
            equals: self.equals || other.equals,
            hash_code: self.hash_code || other.hash_code,
            with_methods: self.with_methods || other.with_methods,
            getters: self.getters || other.getters,
            setters: self.setters || other.setters,
            builder: self.builder || other.builder,
            log_field: self.log_field || other.log_field,
            singleton: self.singleton || other.singleton,
            null_validation: self.null_validation || other.null_validation,
            constructor_mode: self.constructor_mode.max(other.constructor_mode),
        }
    }

    /// Names of the boolean flags that are set.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("constructor", self.constructor),
            ("immutable", self.immutable),
            ("toString", self.to_string),
            ("equals", self.equals),
            ("hashCode", self.hash_code),
            ("withMethods", self.with_methods),
            ("getters", self.getters),
            ("setters", self.setters),
            ("builder", self.builder),
            ("logField", self.log_field),
            ("singleton", self.singleton),
            ("nullValidation", self.null_validation),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

/// Per-class transformation plan.
#[derive(Debug)]
pub struct TransformationPlan<'a> {
    /// The declaration as written.
    pub class: &'a ClassDecl,
    pub class_name: String,
    pub properties: Vec<PropertyDescriptor>,
    /// Recognized class markers, ordered, without repeats.
    pub markers: Vec<String>,
    flags: GenerationFlags,
}

impl<'a> TransformationPlan<'a> {
    /// Build a plan. Null validation starts enabled iff some property is non-null.
    pub fn new(
        class: &'a ClassDecl,
        properties: Vec<PropertyDescriptor>,
        markers: Vec<String>,
        config: &AugmentConfig,
    ) -> Self {
        let class_name = class
            .name_str()
            .unwrap_or(&config.anonymous_class_name)
            .to_string();
        let flags = GenerationFlags {
            null_validation: properties.iter().any(|p| p.non_null),
            ..GenerationFlags::default()
        };

        Self {
            class,
            class_name,
            properties,
            markers,
            flags,
        }
    }

    pub fn flags(&self) -> &GenerationFlags {
        &self.flags
    }

    /// Merge an update into the plan.
    pub fn apply(&mut self, update: &GenerationFlags) {
        self.flags = self.flags.union(*update);
    }

    /// Properties that become constructor parameters.
    pub fn constructor_properties(&self) -> Vec<&PropertyDescriptor> {
        match self.flags.constructor_mode {
            ConstructorMode::None => Vec::new(),
            ConstructorMode::RequiredFieldsOnly => {
                self.properties.iter().filter(|p| p.is_required()).collect()
            }
            ConstructorMode::AllFields => self.properties.iter().collect(),
        }
    }
}
