use super::*;

fn runnable_config() -> Config {
    let mut config = Config::default();
    config.account.email = "me@example.com".to_string();
    config.account.password = "secret".to_string();
    config.profile.positions = vec!["Backend Engineer".to_string()];
    config.profile.locations = vec!["Austin, TX".to_string()];
    config
}

#[test]
fn test_validate_runnable_config() {
    let result = ConfigValidator::validate(&runnable_config());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_validate_default_config_warns() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "account"));
    assert!(result.warnings.iter().any(|w| w.path == "profile.positions"));
    assert!(result.warnings.iter().any(|w| w.path == "profile.locations"));
}

#[test]
fn test_validate_zero_max_iterations() {
    let mut config = runnable_config();
    config.wizard.max_iterations = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "wizard.max_iterations"));
}

#[test]
fn test_validate_pacing_inverted() {
    let mut config = runnable_config();
    config.pacing.min_ms = 3000;
    config.pacing.max_ms = 1000;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "pacing.min_ms"));
}

#[test]
fn test_validate_pacing_equal_bounds() {
    let mut config = runnable_config();
    config.pacing.min_ms = 0;
    config.pacing.max_ms = 0;

    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_zero_page_size() {
    let mut config = runnable_config();
    config.campaign.page_size = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "campaign.page_size"));
}

#[test]
fn test_validate_offset_overflow() {
    let mut config = runnable_config();
    config.campaign.page_size = u32::MAX / 4;
    config.campaign.max_pages = 5;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "campaign.max_pages"));
}

#[test]
fn test_validate_invalid_site_url() {
    let mut config = runnable_config();
    config.campaign.site_url = "www.linkedin.com".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "campaign.site_url"));
}

#[test]
fn test_validate_fallback_without_key() {
    let mut config = runnable_config();
    config.fallback.enabled = true;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "fallback.api_key"));
}

#[test]
fn test_validate_fallback_disabled_ignores_key() {
    let mut config = runnable_config();
    config.fallback.enabled = false;
    config.fallback.api_key = None;

    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_fallback_with_key() {
    let mut config = runnable_config();
    config.fallback.enabled = true;
    config.fallback.api_key = Some("sk-test".to_string());

    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_high_max_iterations_warning() {
    let mut config = runnable_config();
    config.wizard.max_iterations = 500;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "wizard.max_iterations"));
}

#[test]
fn test_into_result() {
    let mut config = runnable_config();
    config.campaign.max_pages = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("campaign.max_pages"));

    let warnings = ConfigValidator::validate(&runnable_config())
        .into_result()
        .unwrap();
    assert!(warnings.is_empty());
}
