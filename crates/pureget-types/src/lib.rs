//! Shared types for pureget
//!
//! This crate contains the plain data structures shared between the
//! resolver core and the CLI: download descriptors, the result envelope
//! printed to stdout, and the resolver configuration.

use serde::{Deserialize, Serialize};

// ============================================================================
// Download Types
// ============================================================================

/// Package format of a resolved download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "APK")]
    Apk,
    /// Main package bundled with its asset files
    #[serde(rename = "XAPK")]
    Xapk,
}

impl FileType {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Apk => "apk",
            FileType::Xapk => "xapk",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Apk => write!(f, "APK"),
            FileType::Xapk => write!(f, "XAPK"),
        }
    }
}

/// A direct download link extracted from a catalog download page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub url: String,
    pub file_type: FileType,
    /// True when the link points at a package-with-assets bundle
    pub is_xapk: bool,
}

impl DownloadInfo {
    /// Output filename for this download, derived from the bundle flag
    pub fn filename_for(&self, package_name: &str) -> String {
        let ext = if self.is_xapk { "xapk" } else { "apk" };
        format!("{}.{}", package_name, ext)
    }
}

// ============================================================================
// Result Envelope
// ============================================================================

/// The single JSON object printed for every invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultEnvelope {
    Success(DownloadResult),
    Failure(FailureResult),
}

/// Successful resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub success: bool,
    pub download_url: String,
    pub filename: String,
    pub is_xapk: bool,
    pub file_type: FileType,
    pub app_url: String,
}

/// Failed resolution or invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResult {
    pub success: bool,
    pub error: String,
}

impl ResultEnvelope {
    pub fn success(package_name: &str, listing_url: String, info: DownloadInfo) -> Self {
        ResultEnvelope::Success(DownloadResult {
            success: true,
            filename: info.filename_for(package_name),
            download_url: info.url,
            is_xapk: info.is_xapk,
            file_type: info.file_type,
            app_url: listing_url,
        })
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ResultEnvelope::Failure(FailureResult {
            success: false,
            error: error.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultEnvelope::Success(_))
    }
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Inclusive range of milliseconds for a randomized pause before a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JitterRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl JitterRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// No pause at all
    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    /// True when the range always yields the same value
    pub fn is_fixed(&self) -> bool {
        self.max_ms <= self.min_ms
    }
}

/// Browser family the HTTP session presents itself as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

/// Operating system the HTTP session presents itself as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Windows,
    MacOs,
    Linux,
}

/// Client identity used for every catalog request.
///
/// The identity header is derived from this profile alone; the session's
/// negotiation headers never carry one of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserProfile {
    pub browser: Browser,
    pub platform: Platform,
    pub mobile: bool,
}

/// Resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Catalog origin, used for candidate listings and relative links
    pub base_url: String,
    /// Locale path segment of the third listing candidate
    pub alternate_locale: String,
    pub listing_timeout_secs: u64,
    pub download_page_timeout_secs: u64,
    pub listing_delay: JitterRange,
    pub download_page_delay: JitterRange,
    #[serde(default)]
    pub browser: BrowserProfile,
    /// Proxy URL applied to all requests
    #[serde(default)]
    pub proxy: Option<String>,
}

pub const DEFAULT_BASE_URL: &str = "https://apkpure.com";

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            alternate_locale: "ar".to_string(),
            listing_timeout_secs: 10,
            download_page_timeout_secs: 15,
            listing_delay: JitterRange::new(100, 200),
            download_page_delay: JitterRange::new(100, 300),
            browser: BrowserProfile::default(),
            proxy: None,
        }
    }
}

impl ResolverConfig {
    /// Same settings with both request pauses disabled
    pub fn without_delays(mut self) -> Self {
        self.listing_delay = JitterRange::none();
        self.download_page_delay = JitterRange::none();
        self
    }
}
