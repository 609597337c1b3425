//! Best-effort Altmetric badge hydration.
//!
//! The citation formatter leaves `altmetric-bar-wrap` placeholder spans
//! in the page, tagged with `data-doi` and `data-url` attributes. This
//! crate fills them with live score badges fetched from the public
//! Altmetric API.
//!
//! Every span is hydrated independently: a failed fetch (HTTP error,
//! timeout, malformed JSON) leaves that one span untouched and never
//! affects another span or the primary content. One attempt per span, no
//! retry.

use std::sync::LazyLock;
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};
use serde::Deserialize;
use ureq::Agent;

/// URL component charset: everything but unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

static BADGE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="altmetric-bar-wrap"([^>]*)>(?s:.*?)</span>"#).unwrap()
});

static DATA_DOI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-doi="([^"]*)""#).unwrap());

static DATA_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-url="([^"]*)""#).unwrap());

/// One resolved badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    /// Altmetric attention score, rounded and clamped at zero.
    pub score: u64,
    /// Details page the badge links to.
    pub details_url: String,
}

/// Altmetric API response, reduced to the fields the badge needs.
#[derive(Debug, Deserialize)]
struct AltmetricResponse {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    details_url: Option<String>,
}

/// Altmetric API client.
pub struct MetricsClient {
    agent: Agent,
    api_base: String,
}

impl MetricsClient {
    /// Create a client with the given per-request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_api_base(timeout, "https://api.altmetric.com")
    }

    /// Create a client against a custom API base URL.
    #[must_use]
    pub fn with_api_base(timeout: Duration, api_base: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_owned(),
        }
    }

    /// Hydrate every badge placeholder in `page`.
    ///
    /// Spans whose fetch fails keep their current content.
    #[must_use]
    pub fn hydrate(&self, page: &str) -> String {
        hydrate_with(page, |doi, url| self.fetch_badge(doi, url))
    }

    /// Fetch the badge for one placeholder.
    fn fetch_badge(&self, doi: Option<&str>, url: Option<&str>) -> Option<Badge> {
        let api_url = match (doi, url) {
            (Some(doi), _) => format!(
                "{}/v1/doi/{}",
                self.api_base,
                utf8_percent_encode(doi, COMPONENT)
            ),
            (None, Some(url)) => format!(
                "{}/v1/url/{}",
                self.api_base,
                utf8_percent_encode(url, COMPONENT)
            ),
            (None, None) => return None,
        };

        let response = match self.agent.get(&api_url).call() {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url = %api_url, error = %e, "Altmetric request failed");
                return None;
            }
        };

        let status = response.status().as_u16();
        if status >= 400 {
            tracing::debug!(url = %api_url, status, "Altmetric lookup unsuccessful");
            return None;
        }

        let parsed: AltmetricResponse = match response.into_body().read_json() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(url = %api_url, error = %e, "Altmetric response unreadable");
                return None;
            }
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = parsed.score.round().max(0.0) as u64;
        let details_url = parsed
            .details_url
            .unwrap_or_else(|| fallback_details_url(doi, url));

        Some(Badge { score, details_url })
    }
}

/// Details page used when the API response does not carry one.
fn fallback_details_url(doi: Option<&str>, url: Option<&str>) -> String {
    match doi {
        Some(doi) => format!(
            "https://www.altmetric.com/details.php?doi={}",
            utf8_percent_encode(doi, COMPONENT)
        ),
        None => format!(
            "https://www.altmetric.com/details.php?url={}",
            utf8_percent_encode(url.unwrap_or(""), COMPONENT)
        ),
    }
}

/// Badge markup placed inside a hydrated span.
fn badge_html(badge: &Badge) -> String {
    format!(
        r#"<a class="altmetric-link" href="{}" target="_blank" rel="noopener noreferrer"><img class="altmetric-bar" src="https://d1uo4w7k31k5mn.cloudfront.net/v2_hq/{}.png" alt="Altmetric score {}" width="88" height="18"/></a>"#,
        badge.details_url, badge.score, badge.score
    )
}

/// Rewrite badge spans using `fetch` to resolve each one.
///
/// Factored out of [`MetricsClient::hydrate`] so the rewrite logic is
/// testable without a network.
fn hydrate_with(
    page: &str,
    mut fetch: impl FnMut(Option<&str>, Option<&str>) -> Option<Badge>,
) -> String {
    BADGE_SPAN_RE
        .replace_all(page, |caps: &Captures<'_>| {
            let attrs = &caps[1];
            let doi = DATA_DOI_RE
                .captures(attrs)
                .map(|c| c.get(1).map_or("", |m| m.as_str()).to_owned());
            let url = DATA_URL_RE
                .captures(attrs)
                .map(|c| c.get(1).map_or("", |m| m.as_str()).to_owned());

            match fetch(doi.as_deref(), url.as_deref()) {
                Some(badge) => format!(
                    r#"<span class="altmetric-bar-wrap"{attrs}>{}</span>"#,
                    badge_html(&badge)
                ),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}
