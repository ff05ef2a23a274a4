use canvas::endpoint::planner::Plannable;
use canvas::util::Page;
use canvas::{Error, Url};

pub mod instructure;

/// Source of planner item pages.
pub trait Backend {
    /// URL of the first page to request.
    fn start_url(&self) -> Result<Url, Error>;

    fn fetch_page(&self, url: &Url) -> Result<Page<Plannable>, Error>;
}
