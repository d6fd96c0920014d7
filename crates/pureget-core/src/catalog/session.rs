//! HTTP session shared by every catalog request of one invocation
//!
//! The session presents a desktop browser: its identity comes from the
//! configured [`BrowserProfile`] and the negotiation headers mirror what
//! that browser sends for a page load. The negotiation headers must never
//! carry an identity of their own, otherwise they would override the one
//! the profile provides.

use crate::error::ResolveError;
use pureget_types::{Browser, BrowserProfile, JitterRange, Platform, ResolverConfig};
use rand::Rng;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_ENCODING: &str = "gzip, deflate";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const CONNECTION: &str = "keep-alive";

/// A fetched page
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Browser-like HTTP session
#[derive(Debug, Clone)]
pub struct CatalogSession {
    client: Client,
}

impl CatalogSession {
    /// Build the session from the resolver settings
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let mut builder = Client::builder()
            .user_agent(user_agent(&config.browser))
            .default_headers(negotiation_headers())
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(proxy) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| ResolveError::InvalidUrl(format!("{}: {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ResolveError::Unexpected(e.to_string()))?;

        Ok(Self { client })
    }

    /// Issue a single GET bounded by `timeout`
    pub async fn get_page(&self, url: &str, timeout: Duration) -> Result<Page, ResolveError> {
        debug!("GET {} (timeout {:?})", url, timeout);

        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(Page { status, body })
    }
}

/// Headers a desktop browser sends when loading a page, minus its identity
pub fn negotiation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static(ACCEPT_ENCODING),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static(CONNECTION));
    headers
}

/// Identity string for a browser profile
pub fn user_agent(profile: &BrowserProfile) -> &'static str {
    match (profile.browser, profile.platform, profile.mobile) {
        (Browser::Chrome, _, true) => {
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Mobile Safari/537.36"
        }
        (Browser::Firefox, _, true) => {
            "Mozilla/5.0 (Android 14; Mobile; rv:127.0) Gecko/127.0 Firefox/127.0"
        }
        (Browser::Chrome, Platform::Windows, false) => {
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
        }
        (Browser::Chrome, Platform::MacOs, false) => {
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
        }
        (Browser::Chrome, Platform::Linux, false) => {
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
        }
        (Browser::Firefox, Platform::Windows, false) => {
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:127.0) Gecko/20100101 Firefox/127.0"
        }
        (Browser::Firefox, Platform::MacOs, false) => {
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.5; rv:127.0) Gecko/20100101 Firefox/127.0"
        }
        (Browser::Firefox, Platform::Linux, false) => {
            "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0"
        }
    }
}

/// Pick a pause length within `range`
pub fn jitter_millis(range: JitterRange) -> u64 {
    if range.is_fixed() {
        range.min_ms
    } else {
        rand::rng().random_range(range.min_ms..=range.max_ms)
    }
}

/// Sleep for a random duration within `range`
pub async fn pause(range: JitterRange) {
    let millis = jitter_millis(range);
    if millis > 0 {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiation_headers_never_carry_identity() {
        let headers = negotiation_headers();
        assert!(!headers.contains_key(header::USER_AGENT));
        assert_eq!(headers.len(), 4);
        assert_eq!(headers[header::ACCEPT_LANGUAGE], "en-US,en;q=0.9");
        assert_eq!(headers[header::CONNECTION], "keep-alive");
    }

    #[test]
    fn test_default_profile_is_desktop_chrome_on_windows() {
        let agent = user_agent(&BrowserProfile::default());
        assert!(agent.contains("Windows NT"));
        assert!(agent.contains("Chrome/"));
        assert!(!agent.contains("Mobile"));
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let range = JitterRange::new(100, 200);
        for _ in 0..200 {
            let millis = jitter_millis(range);
            assert!((100..=200).contains(&millis));
        }
        assert_eq!(jitter_millis(JitterRange::new(50, 10)), 50);
        assert_eq!(jitter_millis(JitterRange::none()), 0);
    }

    #[test]
    fn test_session_rejects_bad_proxy() {
        let config = ResolverConfig {
            proxy: Some("not a proxy url".to_string()),
            ..ResolverConfig::default()
        };
        assert!(matches!(
            CatalogSession::new(&config),
            Err(ResolveError::InvalidUrl(_))
        ));
    }
}
