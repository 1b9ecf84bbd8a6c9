//! Configuration semantic validation.
//!
//! Range checks applied after parsing, so a bad file is rejected before any
//! network or disk work starts.

use crate::config::AuditConfig;
use crate::{Result, WsAuditError};

/// Largest page size the search service accepts.
const MAX_PER_PAGE: u32 = 100;

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if a numeric setting is out of range or the extension
/// list is empty.
pub fn validate_config_semantics(config: &AuditConfig) -> Result<()> {
    validate_search_section(config)?;
    validate_scan_section(config)?;
    Ok(())
}

fn validate_search_section(config: &AuditConfig) -> Result<()> {
    let search = &config.search;
    if !(1..=MAX_PER_PAGE).contains(&search.per_page) {
        return Err(WsAuditError::Config(format!(
            "search.per_page must be between 1 and {MAX_PER_PAGE}, got {}",
            search.per_page
        )));
    }
    if search.cooldown_secs == 0 {
        return Err(WsAuditError::Config(
            "search.cooldown_secs must be at least 1".to_string(),
        ));
    }
    if search.endpoint.trim().is_empty() {
        return Err(WsAuditError::Config(
            "search.endpoint must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_scan_section(config: &AuditConfig) -> Result<()> {
    let scan = &config.scan;
    if scan.threshold == 0 {
        return Err(WsAuditError::InvalidThreshold(scan.threshold));
    }
    if scan.max_repos == 0 {
        return Err(WsAuditError::Config(
            "scan.max_repos must be at least 1".to_string(),
        ));
    }
    if scan.extensions.is_empty() {
        return Err(WsAuditError::Config(
            "scan.extensions must list at least one extension".to_string(),
        ));
    }
    if let Some(blank) = scan.extensions.iter().position(|e| e.trim().is_empty()) {
        return Err(WsAuditError::Config(format!(
            "scan.extensions[{blank}] must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config_semantics(&AuditConfig::default()).is_ok());
    }

    #[test]
    fn zero_threshold_rejected() {
        let mut config = AuditConfig::default();
        config.scan.threshold = 0;
        let err = validate_config_semantics(&config).unwrap_err();
        assert!(matches!(err, WsAuditError::InvalidThreshold(0)));
    }

    #[test]
    fn zero_max_repos_rejected() {
        let mut config = AuditConfig::default();
        config.scan.max_repos = 0;
        let err = validate_config_semantics(&config).unwrap_err();
        assert!(err.to_string().contains("scan.max_repos"));
    }

    #[test]
    fn per_page_out_of_range_rejected() {
        for per_page in [0, 101] {
            let mut config = AuditConfig::default();
            config.search.per_page = per_page;
            let err = validate_config_semantics(&config).unwrap_err();
            assert!(err.to_string().contains("search.per_page"));
        }
    }

    #[test]
    fn per_page_bounds_accepted() {
        for per_page in [1, 100] {
            let mut config = AuditConfig::default();
            config.search.per_page = per_page;
            assert!(validate_config_semantics(&config).is_ok());
        }
    }

    #[test]
    fn zero_cooldown_rejected() {
        let mut config = AuditConfig::default();
        config.search.cooldown_secs = 0;
        let err = validate_config_semantics(&config).unwrap_err();
        assert!(err.to_string().contains("cooldown_secs"));
    }

    #[test]
    fn empty_extensions_rejected() {
        let mut config = AuditConfig::default();
        config.scan.extensions.clear();
        let err = validate_config_semantics(&config).unwrap_err();
        assert!(err.to_string().contains("scan.extensions"));
    }

    #[test]
    fn blank_extension_rejected() {
        let mut config = AuditConfig::default();
        config.scan.extensions = vec![".py".to_string(), "  ".to_string()];
        let err = validate_config_semantics(&config).unwrap_err();
        assert!(err.to_string().contains("scan.extensions[1]"));
    }
}
