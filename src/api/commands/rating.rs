//! Rating command module

use crate::app::AppContext;
use crate::core::controller::AppStateSnapshot;
use crate::shared::errors::CommandResult;
use crate::shared::types::SubmitRatingRequest;

/// Submit (or overwrite) this user's star rating. Failures are returned to
/// the caller and leave the state untouched.
pub async fn submit_rating(ctx: &AppContext, request: SubmitRatingRequest) -> CommandResult<AppStateSnapshot> {
    Ok(ctx
        .controller
        .submit_rating(&request.recipe_id, request.rating)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::fakes::Kitchen;
    use crate::shared::errors::{CommandError, ERR_RATING_SUBMIT};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_submit_rating() {
        let kitchen = Kitchen::new();
        let ctx = AppContext::for_tests(&kitchen, PathBuf::from("settings.json"));
        ctx.controller.generate_recipe("chicken").await;

        let request = SubmitRatingRequest {
            recipe_id: "golden-ginger-soy-chicken".to_string(),
            rating: 4,
        };
        let state = submit_rating(&ctx, request.clone()).await.unwrap();
        assert_eq!(state.recipe.unwrap().user_rating, Some(4));

        *kitchen.ratings.fail_upsert.lock().unwrap() = true;
        let err = submit_rating(&ctx, request).await.unwrap_err();
        assert_eq!(err, CommandError::NetworkError(ERR_RATING_SUBMIT.to_string()));
    }
}
