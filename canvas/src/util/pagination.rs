use crate::error::{Error, ErrorKind};
use crate::util::{self, request};
use crate::Config;
use failure::ResultExt;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, LINK};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use tracing::{debug, warn};

/// One page of a paginated listing.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub links: LinkHeaders,
}

/// Fetches and decodes a single page of a listing.
///
/// The `Link` header of the response is parsed into `Page::links`, with the
/// access token re-appended so the links can be requested as they are. A
/// page whose body decodes but whose `Link` header does not comes back with
/// its items and no links.
pub fn get_page<T: DeserializeOwned>(
    client: &Client,
    cfg: &Config,
    url: Url,
) -> Result<Page<T>, Error> {
    let shown = request::redact(&url);
    debug!(url = %shown, "GET");

    // reqwest errors carry the request URL, token included.
    let res = request::get_request_builder(client, url)
        .send()
        .map_err(reqwest::Error::without_url)
        .context(ErrorKind::Http(format!("request to {} failed", shown)))?;

    let status = res.status();
    if !status.is_success() {
        warn!(url = %shown, %status, "unexpected status");
        return Err(ErrorKind::Status(status.as_u16()).into());
    }

    let headers = res.headers().clone();
    let body = res
        .bytes()
        .map_err(reqwest::Error::without_url)
        .context(ErrorKind::Http(format!("could not read body of {}", shown)))?;
    let items: Vec<T> = serde_json::from_slice(&body)
        .map_err(|e| ErrorKind::Decode(format!("invalid JSON from {}: {}", shown, e)))?;

    let links = match LinkHeaders::new(&headers, cfg) {
        Ok(links) => links.unwrap_or_default(),
        Err(e) => {
            warn!(url = %shown, error = %e, "ignoring link-header");
            LinkHeaders::default()
        }
    };

    debug!(url = %shown, items = items.len(), "decoded page");
    Ok(Page { items, links })
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LinkHeaderType {
    Current,
    Prev,
    Next,
    First,
    Last,
    Unknown,
}

impl From<String> for LinkHeaderType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "current" => LinkHeaderType::Current,
            "prev" => LinkHeaderType::Prev,
            "next" => LinkHeaderType::Next,
            "first" => LinkHeaderType::First,
            "last" => LinkHeaderType::Last,
            _ => LinkHeaderType::Unknown,
        }
    }
}

impl FromStr for LinkHeaderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LinkHeaderType::from(s.to_string()))
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct LinkHeader {
    pub url: Url,
    pub page: Option<String>,
    pub per_page: Option<u32>,
    pub rel: LinkHeaderType,
}

/// Pagination links of a response, keyed by relation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LinkHeaders {
    pub current: Option<Url>,
    pub next: Option<Url>,
    pub prev: Option<Url>,
    pub first: Option<Url>,
    pub last: Option<Url>,
}

impl LinkHeaders {
    /// Reads the `Link` header, `None` when the response has none.
    pub fn new(headers: &HeaderMap, cfg: &Config) -> Result<Option<Self>, Error> {
        let raw_link_header = match headers.get(LINK) {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let raw = raw_link_header
            .to_str()
            .context(ErrorKind::LinkHeader("header is not visible ASCII".to_string()))?;

        Ok(Some(Self::parse(raw, cfg)?))
    }

    /// Parses a raw `Link` header value.
    pub fn parse(raw: &str, cfg: &Config) -> Result<Self, Error> {
        let mut out = LinkHeaders::default();

        for lh in util::parser::link_header(raw)? {
            debug!(rel = ?lh.rel, page = ?lh.page, per_page = ?lh.per_page, "link");
            let mut url = lh.url;
            request::authenticate(cfg, &mut url);

            match lh.rel {
                LinkHeaderType::Current => out.current = Some(url),
                LinkHeaderType::Next => out.next = Some(url),
                LinkHeaderType::Prev => out.prev = Some(url),
                LinkHeaderType::First => out.first = Some(url),
                LinkHeaderType::Last => out.last = Some(url),
                LinkHeaderType::Unknown => debug!(url = %request::redact(&url), "ignoring link"),
            }
        }

        Ok(out)
    }

    /// Looks up a link by its relation name.
    pub fn get(&self, rel: &str) -> Option<&Url> {
        match LinkHeaderType::from(rel.to_string()) {
            LinkHeaderType::Current => self.current.as_ref(),
            LinkHeaderType::Next => self.next.as_ref(),
            LinkHeaderType::Prev => self.prev.as_ref(),
            LinkHeaderType::First => self.first.as_ref(),
            LinkHeaderType::Last => self.last.as_ref(),
            LinkHeaderType::Unknown => None,
        }
    }

    /// Whether there is a next page that differs from `current`.
    pub fn should_next(&self, current: &Url) -> bool {
        match &self.next {
            Some(next) => next != current,
            None => false,
        }
    }

    /// The next page to request, if any.
    pub fn get_next(&self, current: &Url) -> Option<Url> {
        if self.should_next(current) {
            return self.next.clone();
        }
        None
    }
}
