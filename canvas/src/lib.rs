//! Canvas
//!
//! Blocking client for the parts of the Canvas LMS REST API we read.
//!
//! ## Usage
//! ```no_run
//! use canvas::endpoint::planner::{self, PlannerQuery};
//!
//! fn main() -> Result<(), canvas::Error> {
//!     let base = canvas::Url::parse("https://canvas.instructure.com").unwrap();
//!     let cfg = canvas::Config::new_authenticated(base, "secret_access_token");
//!     let client = canvas::util::get_client(&cfg)?;
//!     let url = planner::items_url(&cfg, &PlannerQuery::default())?;
//!     let page = planner::list_planner_items(&client, &cfg, url)?;
//!     for item in page.items {
//!         println!("{}", item.plannable.title);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
pub mod endpoint;
mod error;
pub mod util;

pub use config::Config;
pub use error::{Error, ErrorKind};
pub use reqwest::blocking::Client;
pub use reqwest::Url;
