//! Goal Tools

use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::Goals;
use crate::store::NutritionStore;
use crate::tracker::Tracker;

/// Response for get_goals
#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    #[serde(flatten)]
    pub goals: Goals,
    /// Set when the stored goals could not be read and defaults are shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Response for update_goals
#[derive(Debug, Serialize)]
pub struct UpdateGoalsResponse {
    pub success: bool,
    pub goals: Goals,
}

pub fn get_goals<S: NutritionStore>(tracker: &Tracker<S>) -> GoalsResponse {
    let fetched = tracker.goals();
    GoalsResponse {
        goals: fetched.value,
        warning: fetched.warning,
    }
}

pub fn update_goals<S: NutritionStore>(
    tracker: &Tracker<S>,
    goals: Goals,
) -> TrackerResult<UpdateGoalsResponse> {
    let goals = tracker.update_goals(goals)?;
    Ok(UpdateGoalsResponse {
        success: true,
        goals,
    })
}
