//! Configuration validation.

use crate::error::ConfigError;
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

    /// First error as a [`ConfigError`], for callers that refuse to start on
    /// an invalid configuration.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
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
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_account(config, &mut result);
        Self::validate_profile(config, &mut result);
        Self::validate_campaign(config, &mut result);
        Self::validate_wizard(config, &mut result);
        Self::validate_pacing(config, &mut result);
        Self::validate_fallback(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "debug_port cannot be 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !std::path::Path::new(path).exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome binary does not exist: {}", path),
                ));
            }
        }
    }

    fn validate_account(config: &Config, result: &mut ValidationResult) {
        if !config.account.has_credentials() {
            result.add_warning(ValidationWarning::new(
                "account",
                "email or password is not set, login will rely on an existing browser session",
            ));
        }
    }

    fn validate_profile(config: &Config, result: &mut ValidationResult) {
        if config.profile.positions.iter().all(|p| p.trim().is_empty()) {
            result.add_warning(ValidationWarning::new(
                "profile.positions",
                "no target positions, discovery has nothing to search for",
            ));
        }

        if config.profile.locations.iter().all(|l| l.trim().is_empty()) {
            result.add_warning(ValidationWarning::new(
                "profile.locations",
                "no target locations, discovery has nothing to search for",
            ));
        }
    }

    fn validate_campaign(config: &Config, result: &mut ValidationResult) {
        let campaign = &config.campaign;

        if campaign.page_size == 0 {
            result.add_error(ValidationError::new(
                "campaign.page_size",
                "page_size must be greater than 0",
            ));
        }

        if campaign.max_pages == 0 {
            result.add_error(ValidationError::new(
                "campaign.max_pages",
                "max_pages must be greater than 0",
            ));
        }

        if campaign.page_size.checked_mul(campaign.max_pages).is_none() {
            result.add_error(ValidationError::new(
                "campaign.max_pages",
                "page_size * max_pages exceeds the largest result offset",
            ));
        }

        if !campaign.site_url.starts_with("http://") && !campaign.site_url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "campaign.site_url",
                "site_url must start with http:// or https://",
            ));
        }

        if campaign.max_applications == Some(0) {
            result.add_warning(ValidationWarning::new(
                "campaign.max_applications",
                "max_applications is 0, no job will be attempted",
            ));
        }
    }

    fn validate_wizard(config: &Config, result: &mut ValidationResult) {
        if config.wizard.max_iterations == 0 {
            result.add_error(ValidationError::new(
                "wizard.max_iterations",
                "max_iterations must be greater than 0",
            ));
        }

        if config.wizard.max_iterations > 100 {
            result.add_warning(ValidationWarning::new(
                "wizard.max_iterations",
                "max_iterations is very high (>100), a stuck wizard will take a long time to give up",
            ));
        }
    }

    fn validate_pacing(config: &Config, result: &mut ValidationResult) {
        if config.pacing.min_ms > config.pacing.max_ms {
            result.add_error(ValidationError::new(
                "pacing.min_ms",
                format!(
                    "min_ms ({}) must not exceed max_ms ({})",
                    config.pacing.min_ms, config.pacing.max_ms
                ),
            ));
        }
    }

    fn validate_fallback(config: &Config, result: &mut ValidationResult) {
        let fallback = &config.fallback;
        if !fallback.enabled {
            return;
        }

        if fallback.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            result.add_error(ValidationError::new(
                "fallback.api_key",
                "fallback is enabled but api_key is not set",
            ));
        }

        if !fallback.api_url.starts_with("http://") && !fallback.api_url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "fallback.api_url",
                "api_url must start with http:// or https://",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
