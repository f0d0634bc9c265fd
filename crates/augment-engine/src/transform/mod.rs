//! Class augmentation.
//!
//! Reads markers on class declarations and rewrites each class with the
//! members those markers ask for.
//!
//! # Architecture
//!
//! - [`marker::classify`] and [`property::extract_properties`] inspect a class.
//! - A [`TransformationPlan`] collects generation flags from every selected
//!   [`MarkerHandler`], highest priority first.
//! - Handlers synthesize members from the finished plan; the
//!   [`rewriter`] merges them, resolves name conflicts and strips markers.
//! - [`Augmenter`] is the public entry point and walks a whole module once.
//!
//! # Example
//!
//! ```ignore
//! use augment_engine::transform::Augmenter;
//!
//! let augmenter = Augmenter::new();
//! let output = augmenter.expand_source("@ToString class P { x: number; }")?;
//! ```

pub mod config;
pub mod handler;
pub mod handlers;
pub mod marker;
pub mod plan;
pub mod property;
pub mod registry;
pub mod rewriter;
mod runner;
pub mod synth;

pub use config::{AugmentConfig, ConfigError};
pub use handler::{HandlerMeta, MarkerHandler, SynthContext};
pub use plan::{ConstructorMode, GenerationFlags, TransformationPlan};
pub use property::PropertyDescriptor;
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
pub use rewriter::ClassReport;

use std::fmt;

use thiserror::Error;

use crate::parser::ast::Module;
use crate::parser::{LexError, ParseError, Parser, Printer};
use runner::AugmentRunner;

/// Errors from the source-level entry points. The transform itself cannot fail.
#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("{}", join_errors(.0))]
    Lex(Vec<LexError>),

    #[error("{}", join_errors(.0))]
    Parse(Vec<ParseError>),
}

fn join_errors<E: fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of augmenting one module.
#[derive(Debug, Clone)]
pub struct AugmentResult {
    /// The rewritten module.
    pub module: Module,
    /// One report per processed class, in traversal order.
    pub classes: Vec<ClassReport>,
}

impl AugmentResult {
    /// Whether any class was rewritten.
    pub fn is_changed(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Print the rewritten module.
    pub fn to_source(&self) -> String {
        Printer::print_module(&self.module)
    }
}

/// The augmentation engine. Holds a handler registry and configuration.
#[derive(Debug, Default)]
pub struct Augmenter {
    registry: HandlerRegistry,
    config: AugmentConfig,
}

impl Augmenter {
    /// Augmenter with every built-in handler and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Augmenter with built-in handlers minus the configured `disabled` markers.
    pub fn with_config(config: AugmentConfig) -> Self {
        let registry = config
            .disabled
            .iter()
            .fold(HandlerRegistry::builder().with_builtins(), |builder, marker| {
                builder.disable(marker.as_str())
            })
            .build();
        Self { registry, config }
    }

    /// Augmenter with a caller-provided registry.
    pub fn with_registry(registry: HandlerRegistry, config: AugmentConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Rewrite every marked class in a module.
    pub fn augment_module(&self, mut module: Module) -> AugmentResult {
        let classes = AugmentRunner::new(&self.registry, &self.config).run(&mut module);
        AugmentResult { module, classes }
    }

    /// Parse source text and rewrite it.
    pub fn augment_source(&self, source: &str) -> Result<AugmentResult, AugmentError> {
        let parser = Parser::new(source).map_err(AugmentError::Lex)?;
        let module = parser.parse().map_err(AugmentError::Parse)?;
        Ok(self.augment_module(module))
    }

    /// Parse, rewrite and print.
    pub fn expand_source(&self, source: &str) -> Result<String, AugmentError> {
        Ok(self.augment_source(source)?.to_source())
    }
}
