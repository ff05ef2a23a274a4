use crate::error::{Error, ErrorKind};
use crate::Config;
use failure::ResultExt;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::Url;

/// Query parameter Canvas reads the access token from.
pub(crate) const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Returns a blocking 'reqwest' client configured according to `cfg`.
pub fn get_client(cfg: &Config) -> Result<Client, Error> {
    let client = Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .build()
        .context(ErrorKind::Http("could not build client".to_string()))?;

    Ok(client)
}

/// Returns a GET request-builder for a fully qualified Canvas URL.
pub fn get_request_builder(client: &Client, url: Url) -> RequestBuilder {
    client.get(url).header(ACCEPT, "application/json")
}

/// Appends the configured access token to `url`, unless it already carries one.
pub(crate) fn authenticate(cfg: &Config, url: &mut Url) {
    if let Some(token) = &cfg.access_token {
        if !url.query_pairs().any(|(k, _)| k == ACCESS_TOKEN_PARAM) {
            url.query_pairs_mut().append_pair(ACCESS_TOKEN_PARAM, token);
        }
    }
}

/// Renders `url` with the access token masked, for logs.
pub fn redact(url: &Url) -> String {
    let mut out = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == ACCESS_TOKEN_PARAM {
                "[redacted]".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    if pairs.is_empty() {
        return out.to_string();
    }

    out.query_pairs_mut().clear().extend_pairs(pairs);
    out.to_string()
}
