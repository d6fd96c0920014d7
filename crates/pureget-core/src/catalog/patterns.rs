//! Download link patterns
//!
//! Download pages expose the direct link either as an absolute `href` on one
//! of the CDN hosts or as a `data-dt-file` attribute. The table below is
//! evaluated strictly in order and the first pattern that matches anywhere
//! in the page wins, so bundles with assets beat plain packages even when
//! the plain link appears earlier in the markup.

use crate::error::ResolveError;
use pureget_types::{DownloadInfo, FileType};
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// One entry of the ordered pattern table
#[derive(Debug)]
pub struct LinkPattern {
    pub regex: Regex,
    pub file_type: FileType,
    pub is_xapk: bool,
}

/// A link found on a download page, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink<'a> {
    pub url: &'a str,
    pub file_type: FileType,
    pub is_xapk: bool,
}

const PATTERN_TABLE: &[(&str, FileType, bool)] = &[
    // Bundles with assets
    (r#"href="(https://d\.apkpure\.com/b/XAPK/[^"]+)""#, FileType::Xapk, true),
    (r#"href="(https://download\.apkpure\.com/b/XAPK/[^"]+)""#, FileType::Xapk, true),
    (r#"data-dt-file="([^"]+\.xapk[^"]*)""#, FileType::Xapk, true),
    // Plain packages
    (r#"href="(https://d\.apkpure\.com/b/APK/[^"]+)""#, FileType::Apk, false),
    (r#"href="(https://download\.apkpure\.com/b/APK/[^"]+)""#, FileType::Apk, false),
    (r#"data-dt-file="([^"]+\.apk[^"]*)""#, FileType::Apk, false),
    // Untyped fallback
    (r#"data-dt-file="([^"]+)""#, FileType::Apk, false),
];

/// The compiled pattern table, in priority order
pub fn link_patterns() -> &'static [LinkPattern] {
    static PATTERNS: OnceLock<Vec<LinkPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PATTERN_TABLE
            .iter()
            .map(|(source, file_type, is_xapk)| LinkPattern {
                regex: RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .unwrap_or_else(|e| panic!("invalid link pattern {}: {}", source, e)),
                file_type: *file_type,
                is_xapk: *is_xapk,
            })
            .collect()
    })
}

/// Find the highest-priority download link in a page
pub fn match_download_link(html: &str) -> Option<RawLink<'_>> {
    link_patterns().iter().find_map(|pattern| {
        pattern
            .regex
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| RawLink {
                url: m.as_str(),
                file_type: pattern.file_type,
                is_xapk: pattern.is_xapk,
            })
    })
}

/// Turn a captured link into an absolute URL
pub fn normalize_link(raw: &str, base_url: &str) -> Result<String, ResolveError> {
    if raw.starts_with("http") {
        return Ok(raw.to_string());
    }
    if raw.starts_with("//") {
        return Ok(format!("https:{}", raw));
    }

    // Joined links come back percent-encoded ("my app.apk" -> "my%20app.apk").
    let base = url::Url::parse(base_url)?;
    Ok(base.join(raw)?.to_string())
}

/// Match and normalize in one step
pub fn extract_from_page(html: &str, base_url: &str) -> Result<Option<DownloadInfo>, ResolveError> {
    let Some(link) = match_download_link(html) else {
        return Ok(None);
    };

    Ok(Some(DownloadInfo {
        url: normalize_link(link.url, base_url)?,
        file_type: link.file_type,
        is_xapk: link.is_xapk,
    }))
}
