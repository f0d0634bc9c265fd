//! Built-in marker handlers.

pub mod builder;
pub mod constructors;
pub mod data;
pub mod equals_and_hash_code;
pub mod getter;
pub mod log;
pub mod setter;
pub mod singleton;
pub mod to_string;
pub mod value;
pub mod with;

use super::handler::MarkerHandler;

/// Returns all built-in handlers in registration order.
pub fn all_handlers() -> Vec<Box<dyn MarkerHandler>> {
    vec![
        // Composite
        Box::new(value::Value),
        Box::new(value::Record),
        Box::new(data::Data),
        // Constructors
        Box::new(constructors::NoArgsConstructor),
        Box::new(constructors::AllArgsConstructor),
        Box::new(constructors::RequiredArgsConstructor),
        // Object protocol
        Box::new(equals_and_hash_code::EqualsAndHashCode),
        Box::new(to_string::ToString),
        Box::new(with::With),
        // Accessors
        Box::new(getter::Getter),
        Box::new(setter::Setter),
        // Structural
        Box::new(builder::Builder),
        Box::new(singleton::Singleton),
        Box::new(log::Log),
    ]
}
