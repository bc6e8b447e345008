use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use log::{debug, info, warn};
use regex::Regex;
use reqwest::{Client, ClientBuilder, Url, header::CONTENT_TYPE};

use crate::{
    config::{FETCH_TIMEOUT, ScheduleSource},
    fetch_error::FetchError,
};

// Browsers only look this far into the document for a <meta> charset.
const META_SNIFF_LEN: usize = 1024;

pub struct RequestClient {
    client: Client,
    meta_charset_regex: Regex,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_builder(ClientBuilder::new())
    }

    pub fn with_builder(builder: ClientBuilder) -> anyhow::Result<Self> {
        let client = builder
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let meta_charset_regex = Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_:.\-]+)"#)?;
        Ok(Self {
            client,
            meta_charset_regex,
        })
    }

    /// Returns the page markup from wherever `source` points.
    pub async fn load(&self, source: &ScheduleSource) -> Result<String, FetchError> {
        match source {
            ScheduleSource::Url(url) => self.fetch_url_body(url).await,
            ScheduleSource::File(path) => {
                info!("Reading saved timetable page from {}", path.display());
                tokio::fs::read_to_string(path).await.map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    /// Downloads `url` and decodes the body. tutu.ru serves windows-1251 and
    /// does not always say so, hence [`RequestClient::decode_body`].
    pub async fn fetch_url_body(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching timetable page {url}");
        let network_error = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type)
            .map(str::to_string);
        let tld = top_level_domain(response.url());
        let body = response.bytes().await.map_err(network_error)?;

        Ok(self.decode_body(&body, header_charset.as_deref(), tld.as_deref()))
    }

    /// Decodes with the first declared charset (header, then `<meta>`) that
    /// fits the bytes. When nothing is declared, or every declaration leaves
    /// malformed sequences, the encoding is guessed from the body itself.
    pub fn decode_body(&self, body: &[u8], header_charset: Option<&str>, tld: Option<&str>) -> String {
        let declared = header_charset
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .into_iter()
            .chain(self.sniff_meta_charset(body));

        for encoding in declared {
            let (text, _, had_errors) = encoding.decode(body);
            if !had_errors {
                debug!("Decoded {} bytes as declared {}", body.len(), encoding.name());
                return text.into_owned();
            }
            warn!("Body is not valid {}, ignoring the declared charset", encoding.name());
        }

        let encoding = detect_encoding(body, tld);
        info!("Detected {} from the page body", encoding.name());
        encoding.decode(body).0.into_owned()
    }

    fn sniff_meta_charset(&self, body: &[u8]) -> Option<&'static Encoding> {
        let head = String::from_utf8_lossy(&body[..body.len().min(META_SNIFF_LEN)]);
        let label = self.meta_charset_regex.captures(&head)?.get(1)?;
        Encoding::for_label(label.as_str().as_bytes())
    }
}

fn detect_encoding(body: &[u8], tld: Option<&str>) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(tld.map(str::as_bytes), true)
}

// chardetng weighs its guess by the site's country code.
fn top_level_domain(url: &Url) -> Option<String> {
    let label = url.host_str()?.rsplit('.').next()?;
    (!label.is_empty() && label.chars().all(|c| c.is_ascii_alphabetic())).then(|| label.to_ascii_lowercase())
}

fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}
