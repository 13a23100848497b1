//! Feedback command module
//!
//! Feedback form, PIN-gated admin listing and the global generation counter.

use crate::app::AppContext;
use crate::core::feedback::{FeedbackForm, FeedbackOutcome};
use crate::shared::errors::CommandResult;
use crate::shared::types::FeedbackItem;

pub async fn submit_feedback(ctx: &AppContext, form: FeedbackForm) -> CommandResult<FeedbackOutcome> {
    Ok(ctx.controller.submit_feedback(&form).await?)
}

pub async fn list_feedback(ctx: &AppContext, pin: String) -> CommandResult<Vec<FeedbackItem>> {
    Ok(ctx.controller.list_feedback(&pin).await?)
}

/// `None` while the counter is unavailable; the UI hides it.
pub async fn get_generation_count(ctx: &AppContext) -> CommandResult<Option<u64>> {
    Ok(ctx.controller.generation_count().await)
}
