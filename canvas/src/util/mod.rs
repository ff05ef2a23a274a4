mod pagination;
mod parser;
mod request;

pub use pagination::{get_page, LinkHeaders, Page};
pub use request::{get_client, get_request_builder, redact};
pub(crate) use request::authenticate;
