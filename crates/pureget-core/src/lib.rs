//! pureget Core - Catalog Resolver
//!
//! This crate turns an application package name into a direct download
//! link on the app catalog. Resolution is a strict two-step pipeline:
//! find the listing page by guessing its URL, then scan the listing's
//! download page for the highest-priority link.

pub mod catalog;
mod error;

pub use error::*;

use catalog::{candidate_urls, extract_from_page, page_mentions_package, pause, CatalogSession};
use pureget_types::{DownloadInfo, ResolverConfig, ResultEnvelope};
use std::time::Duration;
use tracing::{debug, info, warn};

/// The resolver instance
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
    session: CatalogSession,
}

impl Resolver {
    /// Create a new Resolver
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| ResolveError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let session = CatalogSession::new(&config)?;

        Ok(Self { config, session })
    }

    /// Current settings
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Find the catalog listing page for a package.
    ///
    /// Candidates are tried in order; failures of any single candidate are
    /// logged and skipped. Returns the first accepted URL.
    pub async fn find_listing(&self, package_name: &str) -> Option<String> {
        let timeout = Duration::from_secs(self.config.listing_timeout_secs);
        let candidates = candidate_urls(
            &self.config.base_url,
            &self.config.alternate_locale,
            package_name,
        );

        for url in candidates {
            pause(self.config.listing_delay).await;

            match self.check_candidate(&url, package_name, timeout).await {
                Ok(true) => {
                    info!("Found listing for {}: {}", package_name, url);
                    return Some(url);
                }
                Ok(false) => debug!("Candidate rejected: {}", url),
                Err(e) => debug!("Candidate failed: {}: {}", url, e),
            }
        }

        info!("No listing found for {}", package_name);
        None
    }

    async fn check_candidate(
        &self,
        url: &str,
        package_name: &str,
        timeout: Duration,
    ) -> Result<bool, ResolveError> {
        let page = self.session.get_page(url, timeout).await?;
        Ok(page_mentions_package(&page, package_name))
    }

    // ========================================================================
    // Download Link
    // ========================================================================

    /// Extract the direct download link from a listing's download page
    pub async fn extract_download_link(&self, listing_url: &str) -> Option<DownloadInfo> {
        match self.fetch_download_link(listing_url).await {
            Ok(info) => {
                info!("Selected {} link: {}", info.file_type, info.url);
                Some(info)
            }
            Err(e) => {
                debug!("No download link on {}: {}", listing_url, e);
                None
            }
        }
    }

    async fn fetch_download_link(&self, listing_url: &str) -> Result<DownloadInfo, ResolveError> {
        let download_page = format!("{}/download", listing_url);
        let timeout = Duration::from_secs(self.config.download_page_timeout_secs);

        pause(self.config.download_page_delay).await;
        let page = self.session.get_page(&download_page, timeout).await?;

        if !page.is_ok() {
            return Err(ResolveError::UnexpectedStatus(page.status));
        }

        extract_from_page(&page.body, &self.config.base_url)?
            .ok_or(ResolveError::DownloadLinkNotFound)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve a package name into a result envelope.
    ///
    /// Never fails: every outcome, including unexpected faults, is reported
    /// through the envelope.
    pub async fn resolve(&self, package_name: &str) -> ResultEnvelope {
        match self.try_resolve(package_name).await {
            Ok(envelope) => envelope,
            Err(e) => {
                if e.is_not_found() {
                    info!("Resolution of {} ended: {}", package_name, e);
                } else {
                    warn!("Resolution of {} failed: {}", package_name, e);
                }
                ResultEnvelope::failure(e.to_string())
            }
        }
    }

    async fn try_resolve(&self, package_name: &str) -> Result<ResultEnvelope, ResolveError> {
        if package_name.trim().is_empty() {
            return Err(ResolveError::InvalidArguments(
                "Package name is empty".to_string(),
            ));
        }

        let listing_url = self
            .find_listing(package_name)
            .await
            .ok_or(ResolveError::AppNotFound)?;

        let info = self
            .extract_download_link(&listing_url)
            .await
            .ok_or(ResolveError::DownloadLinkNotFound)?;

        Ok(ResultEnvelope::success(package_name, listing_url, info))
    }
}
