//! Logger field synthesis.

use crate::parser::ast::{build, ClassMember, Visibility};
use crate::transform::config::AugmentConfig;

/// `protected readonly log = console;`
pub fn log_field(config: &AugmentConfig) -> ClassMember {
    let mut field = build::field(&config.log_field, None, Some(config.log_target_expression()));
    field.visibility = Some(Visibility::Protected);
    field.is_readonly = true;
    ClassMember::Field(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::synth::test_support::print_members;

    #[test]
    fn test_default_log_field() {
        assert_eq!(
            print_members(vec![log_field(&AugmentConfig::default())]),
            "class T {\n  protected readonly log = console;\n}\n"
        );
    }

    #[test]
    fn test_configured_log_field() {
        let config = AugmentConfig {
            log_field: "logger".to_string(),
            log_target: "app.logger".to_string(),
            ..AugmentConfig::default()
        };
        assert!(print_members(vec![log_field(&config)])
            .contains("protected readonly logger = app.logger;"));
    }
}
