//! Listing URL guesses
//!
//! The catalog has no lookup by package name, so listing pages are found by
//! guessing: the trailing segment of the package name is used as the page
//! slug and combined with a few fixed path layouts.

use super::session::Page;

/// Trailing dot-separated segment of a package name
pub fn slug_for(package_name: &str) -> &str {
    package_name.rsplit('.').next().unwrap_or(package_name)
}

/// Candidate listing URLs, in the order they must be tried
pub fn candidate_urls(base_url: &str, locale: &str, package_name: &str) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    let slug = slug_for(package_name);

    vec![
        format!("{}/{}/{}", base, slug, package_name),
        format!("{}/{}-app/{}", base, slug, package_name),
        format!("{}/{}/{}/{}", base, locale, slug, package_name),
    ]
}

/// Whether a fetched candidate looks like the listing for `package_name`.
///
/// Only a literal substring check; any 200 page mentioning the package
/// counts as a hit.
pub fn page_mentions_package(page: &Page, package_name: &str) -> bool {
    page.is_ok() && page.body.contains(package_name)
}
