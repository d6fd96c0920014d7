//! CLI command implementations

use crate::Cli;
use anyhow::{Context, Result};
use pureget_core::{ResolveError, Resolver};
use pureget_types::{ResolverConfig, ResultEnvelope};

/// Validate the positional argument into a package name
pub fn package_from_args(package: Option<&str>) -> Result<String, ResolveError> {
    let Some(raw) = package else {
        return Err(ResolveError::InvalidArguments(
            "No package name provided".to_string(),
        ));
    };

    let package = raw.trim();
    if package.is_empty() {
        return Err(ResolveError::InvalidArguments(
            "Package name is empty".to_string(),
        ));
    }

    Ok(package.to_string())
}

/// Build resolver settings from flags and environment
pub fn config_from_cli(cli: &Cli) -> ResolverConfig {
    let mut config = ResolverConfig::default();

    if let Some(ref base_url) = cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(ref locale) = cli.locale {
        config.alternate_locale = locale.clone();
    }
    config.proxy = cli.proxy.clone();

    if cli.no_delay {
        config = config.without_delays();
    }

    config
}

pub async fn resolve_package(package: &str, config: ResolverConfig) -> Result<ResultEnvelope> {
    let resolver = Resolver::new(config).context("Failed to set up catalog session")?;
    Ok(resolver.resolve(package).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_missing_package() {
        let err = package_from_args(None).unwrap_err();
        assert_eq!(err.to_string(), "No package name provided");
    }

    #[test]
    fn test_blank_package() {
        for blank in ["", "   ", "\t\n"] {
            let err = package_from_args(Some(blank)).unwrap_err();
            assert_eq!(err.to_string(), "Package name is empty");
        }
    }

    #[test]
    fn test_package_is_trimmed() {
        assert_eq!(
            package_from_args(Some("  com.example.app ")).unwrap(),
            "com.example.app"
        );
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::try_parse_from([
            "pureget",
            "com.example.app",
            "--base-url",
            "http://127.0.0.1:8080",
            "--locale",
            "fr",
            "--no-delay",
        ])
        .unwrap();
        let config = config_from_cli(&cli);

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.alternate_locale, "fr");
        assert!(config.listing_delay.is_fixed());
        assert_eq!(config.listing_timeout_secs, 10);
    }

    #[tokio::test]
    async fn test_bad_proxy_is_a_fatal_error() {
        let config = ResolverConfig {
            proxy: Some("not a proxy url".to_string()),
            ..ResolverConfig::default()
        };
        assert!(resolve_package("com.example.app", config).await.is_err());
    }
}
