use serde::{Deserialize, Serialize};

/// How a source wraps the status page in its response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// The body is the page itself.
    RawHtml,
    /// JSON object whose `contents` string is the page.
    AllOriginsJson,
}

/// One endpoint in the retrieval chain.
///
/// `url_template` placeholders:
/// - `{url}`: target URL, form-urlencoded
/// - `{raw_url}`: target URL as-is
/// - `{timestamp}`: milliseconds since the epoch, defeats proxy caches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub url_template: String,
    pub format: SourceFormat,
}

impl SourceSpec {
    pub fn new(name: &str, url_template: &str, format: SourceFormat) -> Self {
        Self {
            name: name.to_string(),
            url_template: url_template.to_string(),
            format,
        }
    }

    pub fn request_url(&self, target: &str, timestamp_ms: u128) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
        self.url_template
            .replace("{url}", &encoded)
            .replace("{raw_url}", target)
            .replace("{timestamp}", &timestamp_ms.to_string())
    }
}

pub fn default_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec::new("Direct", "{raw_url}", SourceFormat::RawHtml),
        SourceSpec::new("CORSProxy.io", "https://corsproxy.io/?{url}", SourceFormat::RawHtml),
        SourceSpec::new(
            "CodeTabs",
            "https://api.codetabs.com/v1/proxy?quest={url}",
            SourceFormat::RawHtml,
        ),
        SourceSpec::new(
            "AllOrigins",
            "https://api.allorigins.win/get?url={url}&timestamp={timestamp}",
            SourceFormat::AllOriginsJson,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalSettings {
    /// Tried in order; the first usable response wins.
    pub sources: Vec<SourceSpec>,
    /// Responses with this many characters or fewer are not the status page.
    pub min_content_len: usize,
    /// Marker of a "please enable JavaScript" stub page.
    pub javascript_hint: String,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            min_content_len: 500,
            javascript_hint: "JavaScript".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_urls_encode_the_target() {
        let spec = SourceSpec::new("p", "https://proxy/?q={url}&t={timestamp}", SourceFormat::RawHtml);
        let url = spec.request_url("https://shop.example/a b?x=1", 42);
        assert_eq!(url, "https://proxy/?q=https%3A%2F%2Fshop.example%2Fa+b%3Fx%3D1&t=42");
    }

    #[test]
    fn direct_source_keeps_the_target_verbatim() {
        let direct = &default_sources()[0];
        assert_eq!(direct.request_url("https://shop.example/4710/", 0), "https://shop.example/4710/");
    }
}
