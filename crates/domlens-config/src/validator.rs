//! Configuration validation.

use domlens_protocols::ModifierKey;

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_inspector(config, &mut result);
        Self::validate_highlight_style(config, &mut result);
        Self::validate_logging(config, &mut result);
        result
    }

    fn validate_inspector(config: &Config, result: &mut ValidationResult) {
        let inspector = &config.inspector;

        if inspector.hover_throttle_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "inspector.hover_throttle_ms",
                "hover_throttle_ms is 0, every pointer move will be processed",
            ));
        }

        if inspector.z_index <= 0 {
            result.add_warning(ValidationWarning::new(
                "inspector.z_index",
                format!(
                    "z_index {} may place the overlay below page content",
                    inspector.z_index
                ),
            ));
        }

        if ModifierKey::lookup(&inspector.multi_select_key).is_none() {
            result.add_warning(ValidationWarning::new(
                "inspector.multi_select_key",
                format!(
                    "Unknown modifier '{}', Shift will be used",
                    inspector.multi_select_key
                ),
            ));
        }
    }

    fn validate_highlight_style(config: &Config, result: &mut ValidationResult) {
        let style = &config.inspector.highlight_style;
        let fields = [
            ("border", &style.border),
            ("background", &style.background),
            ("border_radius", &style.border_radius),
        ];
        for (name, value) in fields {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                result.add_error(ValidationError::new(
                    format!("inspector.highlight_style.{}", name),
                    "Style value cannot be empty",
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
