mod items;

pub use items::{
    items_url, list_planner_items, Order, Plannable, PlannableDetail, PlannableType,
    PlannerFilter, PlannerOverride, PlannerQuery,
};
