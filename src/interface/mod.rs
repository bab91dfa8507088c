pub mod prompts;
pub mod render;

pub use prompts::{
    PartialMetrics, collect_body_metrics, prompt_activity, prompt_age, prompt_days,
    prompt_height, prompt_sex, prompt_weight,
};
pub use render::{
    display_bounds, display_dish_list, display_metrics, display_optimization, display_plan,
    failure_json, plan_json,
};
