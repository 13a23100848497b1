use serde::Serialize;
use ts_rs::TS;

use crate::core::controller::AppStateSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
#[ts(export)]
pub enum AppEvent {
    /// Controller state after a committed change.
    #[serde(rename = "state://updated")]
    StateUpdated(AppStateSnapshot),

    /// Total generations, refreshed after each successful generation.
    #[serde(rename = "counter://updated")]
    GenerationCountUpdated(u64),
}
