//! Settings command module
//!
//! Settings persistence. Changes apply on the next start.

use crate::app::AppContext;
use crate::shared::errors::CommandResult;
use crate::shared::settings::AppSettings;

/// Current settings with credentials masked
pub fn get_settings(ctx: &AppContext) -> AppSettings {
    ctx.settings.masked()
}

/// Save application settings
pub async fn save_settings(ctx: &AppContext, settings: AppSettings) -> CommandResult<()> {
    Ok(settings.save_to(&ctx.settings_path).await?)
}
