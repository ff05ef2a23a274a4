use failure::Fail;

/// Errors raised while setting up a planner run.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "No Canvas access token, set CANVAS_ACCESS_TOKEN or pass --access-token")]
    MissingAccessToken,
    #[fail(display = "Invalid Canvas base URL '{}': {}", _0, _1)]
    InvalidBaseUrl(String, String),
    #[fail(display = "Could not load .env file: {}", _0)]
    DotEnv(String),
}
