use reqwest::Url;

/// Connection settings for a Canvas instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub access_token: Option<String>,
    pub user_agent: String,
}

impl Config {
    pub fn new(base_url: Url) -> Self {
        Config {
            base_url,
            access_token: None,
            user_agent: format!("canvas-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn new_authenticated(base_url: Url, access_token: &str) -> Self {
        Config {
            access_token: Some(access_token.to_string()),
            ..Config::new(base_url)
        }
    }
}
