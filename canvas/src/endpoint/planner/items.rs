use crate::error::{Error, ErrorKind};
use crate::util::{self, Page};
use crate::Config;
use chrono::{DateTime, Utc};
use failure::ResultExt;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PLANNER_ITEMS_PATH: &str = "/api/v1/planner/items";

/// A single entry of the user's planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plannable {
    pub context_type: Option<String>,
    pub course_id: Option<u64>,
    pub plannable_id: u64,
    pub planner_override: Option<PlannerOverride>,
    pub plannable_type: PlannableType,
    #[serde(default)]
    pub new_activity: bool,
    #[serde(default)]
    pub submissions: serde_json::Value,
    pub plannable_date: Option<DateTime<Utc>>,
    pub plannable: PlannableDetail,
    pub html_url: Option<String>,
    pub context_name: Option<String>,
    pub context_image: Option<String>,
}

/// Per-user completion and dismissal state of a planner entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerOverride {
    pub id: u64,
    pub plannable_type: Option<String>,
    pub plannable_id: Option<u64>,
    pub user_id: Option<u64>,
    pub workflow_state: Option<String>,
    #[serde(default)]
    pub marked_complete: bool,
    #[serde(default)]
    pub dismissed: bool,
    pub assignment_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The assignment, quiz, ... a planner entry points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannableDetail {
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    pub unread_count: Option<u32>,
    pub read_state: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannableType {
    Assignment,
    Quiz,
    DiscussionTopic,
    Announcement,
    WikiPage,
    PlannerNote,
    CalendarEvent,
    AssessmentRequest,
    #[serde(other)]
    Other,
}

impl PlannableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlannableType::Assignment => "assignment",
            PlannableType::Quiz => "quiz",
            PlannableType::DiscussionTopic => "discussion_topic",
            PlannableType::Announcement => "announcement",
            PlannableType::WikiPage => "wiki_page",
            PlannableType::PlannerNote => "planner_note",
            PlannableType::CalendarEvent => "calendar_event",
            PlannableType::AssessmentRequest => "assessment_request",
            PlannableType::Other => "other",
        }
    }
}

impl fmt::Display for PlannableType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlannableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assignment" => Ok(PlannableType::Assignment),
            "quiz" => Ok(PlannableType::Quiz),
            "discussion_topic" => Ok(PlannableType::DiscussionTopic),
            "announcement" => Ok(PlannableType::Announcement),
            "wiki_page" => Ok(PlannableType::WikiPage),
            "planner_note" => Ok(PlannableType::PlannerNote),
            "calendar_event" => Ok(PlannableType::CalendarEvent),
            "assessment_request" => Ok(PlannableType::AssessmentRequest),
            other => Err(format!("unknown plannable type '{}'", other)),
        }
    }
}

/// Narrows planner items by completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerFilter {
    NewActivity,
    IncompleteItems,
    CompleteItems,
}

impl PlannerFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlannerFilter::NewActivity => "new_activity",
            PlannerFilter::IncompleteItems => "incomplete_items",
            PlannerFilter::CompleteItems => "complete_items",
        }
    }
}

impl FromStr for PlannerFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_activity" => Ok(PlannerFilter::NewActivity),
            "incomplete_items" => Ok(PlannerFilter::IncompleteItems),
            "complete_items" => Ok(PlannerFilter::CompleteItems),
            other => Err(format!("unknown planner filter '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            other => Err(format!("unknown order '{}'", other)),
        }
    }
}

/// Query parameters of `GET /api/v1/planner/items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub filter: Option<PlannerFilter>,
    pub order: Order,
    pub per_page: u32,
}

impl Default for PlannerQuery {
    fn default() -> Self {
        PlannerQuery {
            start_date: None,
            end_date: None,
            filter: None,
            order: Order::Desc,
            per_page: 10,
        }
    }
}

/// Builds the URL of the first page of planner items.
pub fn items_url(cfg: &Config, query: &PlannerQuery) -> Result<Url, Error> {
    let mut url = cfg
        .base_url
        .join(PLANNER_ITEMS_PATH)
        .context(ErrorKind::InvalidUrl(format!(
            "cannot join {} onto {}",
            PLANNER_ITEMS_PATH, cfg.base_url
        )))?;

    util::authenticate(cfg, &mut url);
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(start) = &query.start_date {
            pairs.append_pair("start_date", start);
        }
        if let Some(end) = &query.end_date {
            pairs.append_pair("end_date", end);
        }
        if let Some(filter) = query.filter {
            pairs.append_pair("filter", filter.as_str());
        }
        pairs.append_pair("order", query.order.as_str());
        pairs.append_pair("per_page", &query.per_page.to_string());
    }

    Ok(url)
}

/// Fetches one page of planner items.
pub fn list_planner_items(
    client: &Client,
    cfg: &Config,
    url: Url,
) -> Result<Page<Plannable>, Error> {
    util::get_page(client, cfg, url)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn config() -> Config {
        Config::new_authenticated(Url::parse("https://canvas.test").unwrap(), "s3cret")
    }

    #[test]
    fn test_items_url_defaults() {
        let url = items_url(&config(), &PlannerQuery::default()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://canvas.test/api/v1/planner/items?access_token=s3cret&order=desc&per_page=10"
        );
    }

    #[test]
    fn test_items_url_with_query() {
        let query = PlannerQuery {
            start_date: Some("2024-01-01T00:00:00Z".to_string()),
            end_date: None,
            filter: Some(PlannerFilter::IncompleteItems),
            order: Order::Asc,
            per_page: 50,
        };
        let url = items_url(&config(), &query).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/api/v1/planner/items");
        assert_eq!(
            pairs,
            vec![
                ("access_token".to_string(), "s3cret".to_string()),
                ("start_date".to_string(), "2024-01-01T00:00:00Z".to_string()),
                ("filter".to_string(), "incomplete_items".to_string()),
                ("order".to_string(), "asc".to_string()),
                ("per_page".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_plannables() {
        let body = json!([
            {
                "context_type": "Course",
                "course_id": 1201,
                "plannable_id": 88,
                "planner_override": null,
                "plannable_type": "assignment",
                "new_activity": false,
                "submissions": false,
                "plannable_date": "2024-03-01T05:59:59Z",
                "plannable": {
                    "id": 88,
                    "title": "Lab 3: Linked Lists",
                    "points_possible": 10.0,
                    "due_at": "2024-03-01T05:59:59Z",
                    "created_at": "2024-02-01T17:00:00Z",
                    "updated_at": "2024-02-02T17:00:00Z"
                },
                "html_url": "/courses/1201/assignments/88",
                "context_name": "Data Structures",
                "context_image": null
            },
            {
                "context_type": "Course",
                "course_id": 1201,
                "plannable_id": 12,
                "planner_override": {
                    "id": 7,
                    "plannable_type": "discussion_topic",
                    "plannable_id": 12,
                    "user_id": 3,
                    "workflow_state": "active",
                    "marked_complete": true,
                    "dismissed": false,
                    "created_at": "2024-02-03T10:00:00Z",
                    "updated_at": "2024-02-03T10:00:00Z",
                    "deleted_at": null
                },
                "plannable_type": "discussion_topic",
                "new_activity": true,
                "submissions": { "submitted": true, "graded": false },
                "plannable_date": "2024-02-20T12:00:00Z",
                "plannable": {
                    "id": 12,
                    "title": "Week 6 discussion",
                    "unread_count": 4,
                    "read_state": "unread"
                }
            },
            {
                "plannable_id": 5,
                "plannable_type": "sub_assignment",
                "plannable": { "title": "Checkpoint" }
            }
        ]);

        let items: Vec<Plannable> = serde_json::from_value(body).unwrap();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].plannable_type, PlannableType::Assignment);
        assert_eq!(items[0].plannable.title, "Lab 3: Linked Lists");
        assert!(items[0].planner_override.is_none());
        assert_eq!(
            items[0].plannable.due_at.map(|d| d.to_rfc3339()),
            Some("2024-03-01T05:59:59+00:00".to_string())
        );

        let overridden = items[1].planner_override.as_ref().unwrap();
        assert!(overridden.marked_complete);
        assert!(!overridden.dismissed);
        assert_eq!(items[1].plannable.read_state.as_deref(), Some("unread"));
        assert_eq!(items[1].plannable.unread_count, Some(4));

        assert_eq!(items[2].plannable_type, PlannableType::Other);
        assert!(!items[2].new_activity);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let res: Result<Vec<Plannable>, _> =
            serde_json::from_value(json!({ "errors": [{ "message": "Invalid access token." }] }));
        assert!(res.is_err());
    }

    #[test]
    fn test_plannable_type_from_str() {
        assert_eq!("quiz".parse::<PlannableType>(), Ok(PlannableType::Quiz));
        assert_eq!(
            " Wiki_Page ".parse::<PlannableType>(),
            Ok(PlannableType::WikiPage)
        );
        assert!("homework".parse::<PlannableType>().is_err());
        assert_eq!(PlannableType::CalendarEvent.to_string(), "calendar_event");
    }
}
