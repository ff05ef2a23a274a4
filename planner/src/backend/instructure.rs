use crate::backend::Backend;
use canvas::endpoint::planner::{self, Plannable, PlannerQuery};
use canvas::util::{self, Page};
use canvas::{Client, Error, Url};

/// Reads planner items from a live Canvas instance.
pub struct Canvas {
    config: canvas::Config,
    query: PlannerQuery,
    client: Client,
}

impl Canvas {
    pub fn new(config: canvas::Config, query: PlannerQuery) -> Result<Self, Error> {
        let client = util::get_client(&config)?;
        Ok(Canvas {
            config,
            query,
            client,
        })
    }
}

impl Backend for Canvas {
    fn start_url(&self) -> Result<Url, Error> {
        planner::items_url(&self.config, &self.query)
    }

    fn fetch_page(&self, url: &Url) -> Result<Page<Plannable>, Error> {
        planner::list_planner_items(&self.client, &self.config, url.clone())
    }
}
