use canvas::endpoint::planner::{Plannable, PlannableType, PlannerQuery};
use canvas::Url;
use failure::{Error, Fail};
use tracing::{error, info};

pub mod backend;
pub mod error;
pub use error::ErrorKind;

use backend::Backend;

/// Canvas instance used when neither `--base-url` nor `CANVAS_BASE_URL` is given.
pub const DEFAULT_BASE_URL: &str = "https://uc.instructure.com";

/// How many planner items are printed by default.
pub const DEFAULT_COUNT: usize = 25;

/// Configuration for a planner run
#[derive(Debug, Clone)]
pub struct Config {
    /// Where and how to reach Canvas.
    pub canvas: canvas::Config,

    /// Query of the first planner page, later pages follow the `next` link.
    pub query: PlannerQuery,

    /// Which kinds of planner items to keep.
    pub types: TypeFilter,

    /// How many items to gather.
    pub count: usize,
}

impl Config {
    pub fn new(
        base_url: &str,
        access_token: Option<&str>,
        query: PlannerQuery,
        types: TypeFilter,
        count: usize,
    ) -> Result<Self, ErrorKind> {
        let token = access_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ErrorKind::MissingAccessToken)?;
        let base_url = Url::parse(base_url)
            .map_err(|e| ErrorKind::InvalidBaseUrl(base_url.to_string(), e.to_string()))?;

        Ok(Config {
            canvas: canvas::Config::new_authenticated(base_url, token),
            query,
            types,
            count,
        })
    }
}

/// Allow-list of planner item types. An empty list lets everything through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFilter(Vec<PlannableType>);

impl TypeFilter {
    pub fn new(types: Vec<PlannableType>) -> Self {
        TypeFilter(types)
    }

    pub fn matches(&self, plannable: &Plannable) -> bool {
        self.0.is_empty() || self.0.contains(&plannable.plannable_type)
    }
}

impl Default for TypeFilter {
    fn default() -> Self {
        TypeFilter(vec![PlannableType::Assignment, PlannableType::Quiz])
    }
}

/// Walks the planner pages of `backend` until `target` items matching
/// `filter` are gathered, and returns exactly that many in response order.
///
/// Fewer items come back when Canvas runs out of pages. A page that cannot
/// be decoded is fatal, and so is any failure on the first page (a rejected
/// token shows up there). A later page failing for another reason is logged
/// and ends the walk with what was gathered so far.
pub fn collect<B: Backend>(
    backend: &B,
    filter: &TypeFilter,
    target: usize,
) -> Result<Vec<Plannable>, Error> {
    let mut out = Vec::new();
    if target == 0 {
        return Ok(out);
    }

    let mut next = Some(backend.start_url()?);
    let mut pages = 0;

    while out.len() < target {
        let url = match next.take() {
            Some(url) => url,
            None => {
                info!(gathered = out.len(), target, "no more pages");
                break;
            }
        };

        let page = match backend.fetch_page(&url) {
            Ok(page) => page,
            Err(e) if e.is_decode() || pages == 0 => return Err(e.into()),
            Err(e) => {
                error!(error = %describe(&e), gathered = out.len(), "stopping pagination");
                break;
            }
        };

        pages += 1;
        let fetched = page.items.len();
        out.extend(page.items.into_iter().filter(|p| filter.matches(p)));
        info!(page = pages, fetched, gathered = out.len(), "planner page");

        next = page.links.get_next(&url);
    }

    out.truncate(target);
    Ok(out)
}

/// The error with its chain of causes, `outer: inner: ...`.
fn describe(e: &canvas::Error) -> String {
    let mut out = e.to_string();
    for cause in (e as &dyn Fail).iter_causes() {
        out.push_str(": ");
        out.push_str(&cause.to_string());
    }
    out
}
