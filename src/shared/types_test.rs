//! Test to trigger ts-rs bindings export
//! Run with: cargo test export_bindings

#[cfg(test)]
mod tests {
    use ts_rs::TS;

    use crate::core::controller::AppStateSnapshot;
    use crate::core::feedback::{FeedbackForm, FeedbackOutcome};
    use crate::shared::errors::CommandError;
    use crate::shared::events::AppEvent;
    use crate::shared::types::*;
    use crate::shared::ui_text::UiText;

    #[test]
    fn export_bindings() {
        // State and events pushed to the front end
        AppStateSnapshot::export_all().expect("Failed to export AppStateSnapshot");
        AppEvent::export_all().expect("Failed to export AppEvent");
        UiText::export().expect("Failed to export UiText");

        // Command payloads
        SubmitRatingRequest::export().expect("Failed to export SubmitRatingRequest");
        ExportedText::export().expect("Failed to export ExportedText");
        FeedbackForm::export().expect("Failed to export FeedbackForm");
        FeedbackOutcome::export().expect("Failed to export FeedbackOutcome");
        FeedbackItem::export().expect("Failed to export FeedbackItem");
        Language::export().expect("Failed to export Language");
        CommandError::export().expect("Failed to export CommandError");
    }

    #[test]
    fn export_declarations_use_camel_case() {
        let decl = AppStateSnapshot::decl();
        assert!(decl.contains("displayLanguage"));
        assert!(decl.contains("isTranslating"));
    }
}
