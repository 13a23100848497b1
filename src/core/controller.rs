//! Application controller
//!
//! Owns the UI state and sequences the remote calls behind every user
//! action: generate, compose with ratings, translate, rate, reset.
//!
//! Work is ticketed against two counters. Content actions (generate,
//! reset, open shared recipe) bump both and supersede everything in flight.
//! A language change bumps only the translation counter, so it drops an
//! older translation but never a generation. Results are committed only
//! while their ticket is still the newest. State sits behind a std mutex
//! that is never held across an `.await`.

pub mod state;

#[cfg(test)]
pub(crate) mod fakes;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::feedback::{FeedbackForm, FeedbackOutcome, Screened};
use super::identity::UserIdentity;
use super::local_store::{LocalStore, LAST_FEEDBACK_KEY};
use super::recipe::export::render_text;
use super::recipe::share::{build_share_url, decode_share_payload, extract_share_payload};
use super::recipe::{build_translation_payload, derive_recipe_id, split_translation};
use super::services::{ContentTranslator, InteractionStore, RatingStore, RecipeGenerator};
use crate::shared::emit::EventEmitter;
use crate::shared::error::{AppError, AppResult};
use crate::shared::errors::{
    ERR_ADMIN_PIN, ERR_FEEDBACK_SUBMIT, ERR_RATING_RANGE, ERR_RATING_SUBMIT, ERR_TRANSLATION_PREFIX,
};
use crate::shared::events::AppEvent;
use crate::shared::types::{
    find_language, is_source_language, FeedbackItem, GeneratedRecipe, Language, RatingSummary,
    Recipe, UpsertRatingPayload, SOURCE_LANGUAGE,
};
use crate::shared::ui_text::UiText;

pub use state::AppStateSnapshot;

/// Remote and local collaborators the controller drives.
pub struct ControllerServices {
    pub generator: Arc<dyn RecipeGenerator>,
    pub translator: Arc<dyn ContentTranslator>,
    pub ratings: Arc<dyn RatingStore>,
    pub interactions: Arc<dyn InteractionStore>,
    pub local_store: Arc<dyn LocalStore>,
    pub emitter: Arc<dyn EventEmitter>,
}

/// Which counter a piece of in-flight work answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ticket {
    Content(u64),
    Translation(u64),
}

pub struct AppController {
    services: ControllerServices,
    identity: UserIdentity,
    admin_pin: String,
    state: Mutex<AppStateSnapshot>,
    content_epoch: AtomicU64,
    translation_epoch: AtomicU64,
}

impl AppController {
    pub fn new(services: ControllerServices, identity: UserIdentity, admin_pin: impl Into<String>) -> Self {
        Self {
            services,
            identity,
            admin_pin: admin_pin.into(),
            state: Mutex::new(AppStateSnapshot::default()),
            content_epoch: AtomicU64::new(0),
            translation_epoch: AtomicU64::new(0),
        }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn snapshot(&self) -> AppStateSnapshot {
        self.lock_state().clone()
    }

    // -- State plumbing --

    fn lock_state(&self) -> MutexGuard<'_, AppStateSnapshot> {
        // State stays consistent field by field, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Supersedes every generation and translation in flight.
    fn begin_content(&self) -> Ticket {
        let _state = self.lock_state();
        self.translation_epoch.fetch_add(1, Ordering::SeqCst);
        Ticket::Content(self.content_epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersedes the translation in flight, if any.
    fn begin_translation(&self) -> Ticket {
        let _state = self.lock_state();
        self.next_translation()
    }

    /// Caller holds the state lock.
    fn next_translation(&self) -> Ticket {
        Ticket::Translation(self.translation_epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        match ticket {
            Ticket::Content(epoch) => self.content_epoch.load(Ordering::SeqCst) == epoch,
            Ticket::Translation(epoch) => self.translation_epoch.load(Ordering::SeqCst) == epoch,
        }
    }

    /// Applies `update` if `ticket` is still current and publishes the result.
    fn commit<F>(&self, ticket: Ticket, update: F) -> bool
    where
        F: FnOnce(&mut AppStateSnapshot),
    {
        let snapshot = {
            let mut state = self.lock_state();
            if !self.is_current(ticket) {
                debug!(?ticket, "[Controller] Discarding superseded result");
                return false;
            }
            update(&mut state);
            state.clone()
        };
        self.services.emitter.emit(AppEvent::StateUpdated(snapshot));
        true
    }

    /// Applies `update` unconditionally. For changes that do not supersede
    /// anything (validation errors, rating patches).
    fn update<F>(&self, update: F)
    where
        F: FnOnce(&mut AppStateSnapshot),
    {
        let snapshot = {
            let mut state = self.lock_state();
            update(&mut state);
            state.clone()
        };
        self.services.emitter.emit(AppEvent::StateUpdated(snapshot));
    }

    // -- Generation --

    pub async fn generate_recipe(&self, ingredients: &str) -> AppStateSnapshot {
        let ingredients = ingredients.trim();
        if ingredients.is_empty() {
            self.update(|state| state.error = Some(state.ui_text.error_ingredients.clone()));
            return self.snapshot();
        }

        let ticket = self.begin_content();
        let source = UiText::source();
        info!(?ticket, "[Controller] Generating recipe");

        self.commit(ticket, |state| {
            state.clear_recipe();
            state.error = None;
            state.display_language = SOURCE_LANGUAGE.to_string();
            state.ui_text = source.clone();
            state.is_loading = true;
            state.is_translating = false;
            state.loading_message = source.loading_message_recipe.clone();
        });

        let generated = match self.services.generator.generate_recipe(ingredients).await {
            Ok(generated) => generated,
            Err(e) => {
                error!(error = %e, "[Controller] Recipe generation failed");
                self.commit(ticket, |state| {
                    state.error = Some(format!("{} {}", state.ui_text.error_prefix, e.user_message()));
                    state.finish_loading();
                });
                return self.snapshot();
            }
        };

        if !self.is_current(ticket) {
            debug!(?ticket, "[Controller] Generation superseded");
            return self.snapshot();
        }

        let (recipe, _) = tokio::join!(self.compose_recipe(generated), self.record_generation());
        self.present_recipe(ticket, recipe).await;
        self.snapshot()
    }

    /// Joins a generated recipe with its rating data. Lookup failures
    /// degrade to "no ratings yet".
    async fn compose_recipe(&self, generated: GeneratedRecipe) -> Recipe {
        let id = derive_recipe_id(&generated.recipe_name);
        let (summary, user_rating) = tokio::join!(
            self.services.ratings.rating_summary(&id),
            self.services.ratings.user_rating(&id, self.identity.as_str()),
        );

        let summary = summary.unwrap_or_else(|e| {
            warn!(error = %e, recipe_id = %id, "[Controller] Rating summary unavailable");
            RatingSummary::default()
        });
        let user_rating = user_rating.unwrap_or_else(|e| {
            warn!(error = %e, recipe_id = %id, "[Controller] User rating unavailable");
            None
        });

        Recipe::compose(id, generated, summary, user_rating)
    }

    /// Stores a freshly composed recipe and brings it into whatever
    /// language is selected when it lands.
    async fn present_recipe(&self, ticket: Ticket, recipe: Recipe) {
        let mut pending: Option<(Ticket, &'static Language)> = None;
        self.commit(ticket, |state| {
            state.original_recipe = Some(recipe.clone());
            state.recipe = Some(recipe);
            match find_language(&state.language).filter(|lang| !is_source_language(lang.code)) {
                Some(language) => {
                    // Replaces any UI-only translation started while generating.
                    pending = Some((self.next_translation(), language));
                    state.is_translating = true;
                    state.finish_loading();
                }
                None => {
                    state.language = SOURCE_LANGUAGE.to_string();
                    state.clear_progress();
                }
            }
        });

        if let Some((translation, language)) = pending {
            self.translate_to(translation, language).await;
            self.commit(translation, |state| state.finish_translation());
        }
    }

    async fn record_generation(&self) {
        if let Err(e) = self
            .services
            .interactions
            .record_generation(self.identity.as_str())
            .await
        {
            warn!(error = %e, "[Controller] Failed to record generation");
            return;
        }
        self.generation_count().await;
    }

    // -- Language --

    pub async fn change_language(&self, code: &str) -> AppResult<AppStateSnapshot> {
        let language = find_language(code)
            .ok_or_else(|| AppError::Validation(format!("Unsupported language: {}", code)))?;

        let unchanged = self.lock_state().language == language.code;
        if unchanged {
            return Ok(self.snapshot());
        }

        let ticket = self.begin_translation();
        info!(?ticket, language = language.code, "[Controller] Changing language");

        if is_source_language(language.code) {
            self.commit(ticket, |state| {
                state.language = language.code.to_string();
                state.display_language = language.code.to_string();
                state.ui_text = UiText::source();
                state.recipe = state.original_recipe.clone();
                state.finish_translation();
            });
            return Ok(self.snapshot());
        }

        self.commit(ticket, |state| {
            state.language = language.code.to_string();
            state.is_translating = true;
            if !state.is_loading {
                state.loading_message = state.ui_text.loading_message_translating.clone();
            }
        });
        self.translate_to(ticket, language).await;
        self.commit(ticket, |state| state.finish_translation());

        Ok(self.snapshot())
    }

    /// One translator round trip from the source copy and the original
    /// recipe into `language`. With no recipe yet only the copy is sent.
    async fn translate_to(&self, ticket: Ticket, language: &'static Language) {
        let source = UiText::source();
        let original = self.lock_state().original_recipe.clone();
        let payload = build_translation_payload(original.as_ref(), &source);

        match self
            .services
            .translator
            .translate_content(&payload, language.name)
            .await
        {
            Ok(response) => {
                let (ui_text, recipe) = split_translation(&source, original.as_ref(), &response);
                self.commit(ticket, |state| {
                    state.ui_text = ui_text;
                    if let Some(mut recipe) = recipe {
                        state.carry_ratings(&mut recipe);
                        state.recipe = Some(recipe);
                    }
                    if state.is_loading {
                        state.loading_message = state.ui_text.loading_message_recipe.clone();
                    }
                    state.display_language = language.code.to_string();
                    state.error = None;
                });
            }
            Err(e) => {
                error!(error = %e, language = language.code, "[Controller] Translation failed");
                self.commit(ticket, |state| {
                    state.error = Some(format!("{} {}", ERR_TRANSLATION_PREFIX, e.user_message()));
                    state.language = state.display_language.clone();
                });
            }
        }
    }

    // -- Ratings --

    pub async fn submit_rating(&self, recipe_id: &str, rating: u8) -> AppResult<AppStateSnapshot> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(ERR_RATING_RANGE.to_string()));
        }

        let payload = {
            let state = self.lock_state();
            let recipe = state
                .recipe
                .as_ref()
                .filter(|r| r.id == recipe_id)
                .or_else(|| state.original_recipe.as_ref().filter(|r| r.id == recipe_id))
                .ok_or_else(|| AppError::Validation(format!("No recipe with id {}", recipe_id)))?;
            UpsertRatingPayload {
                recipe_id: recipe.id.clone(),
                recipe_name: recipe.recipe_name.clone(),
                user_id: self.identity.as_str().to_string(),
                rating,
                language_code: state.display_language.clone(),
                ingredients: recipe.ingredients.clone(),
                updated_at: Utc::now(),
            }
        };

        info!(recipe_id, rating, "[Controller] Submitting rating");
        self.services.ratings.upsert_rating(&payload).await.map_err(|e| {
            error!(error = %e, "[Controller] Rating submission failed");
            AppError::Network(ERR_RATING_SUBMIT.to_string())
        })?;

        let summary = match self.services.ratings.rating_summary(recipe_id).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(error = %e, recipe_id, "[Controller] Could not refresh rating summary");
                None
            }
        };

        self.update(|state| {
            for slot in [&mut state.recipe, &mut state.original_recipe] {
                if let Some(recipe) = slot.as_mut().filter(|r| r.id == recipe_id) {
                    let summary = summary.unwrap_or(RatingSummary {
                        average_rating: recipe.average_rating.unwrap_or(0.0),
                        total_ratings: recipe.total_ratings.unwrap_or(0),
                    });
                    *recipe = recipe.with_rating(summary, rating);
                }
            }
        });

        Ok(self.snapshot())
    }

    // -- Reset --

    pub fn reset(&self) -> AppStateSnapshot {
        let ticket = self.begin_content();
        info!(?ticket, "[Controller] Reset");
        self.commit(ticket, |state| {
            state.clear_recipe();
            state.clear_progress();
            state.error = None;
            // A superseded translation never landed; keep selection and copy in step.
            state.language = state.display_language.clone();
        });
        self.snapshot()
    }

    // -- Share & export --

    /// Plain-text rendering of the displayed recipe.
    pub fn export_text(&self) -> Option<String> {
        let state = self.lock_state();
        state
            .recipe
            .as_ref()
            .map(|recipe| render_text(recipe, &state.ui_text))
    }

    /// Link carrying the untranslated recipe and the selected language.
    pub fn share_link(&self, base_url: &str) -> AppResult<Option<String>> {
        let state = self.lock_state();
        match state.original_recipe.as_ref() {
            Some(recipe) => build_share_url(base_url, recipe, &state.language).map(Some),
            None => Ok(None),
        }
    }

    pub async fn open_shared_recipe(&self, link: &str) -> AppResult<AppStateSnapshot> {
        let shared = decode_share_payload(extract_share_payload(link))?;

        let language = match find_language(&shared.l) {
            Some(language) => language.code,
            None => {
                warn!(language = %shared.l, "[Controller] Shared link has unknown language");
                SOURCE_LANGUAGE
            }
        };

        let ticket = self.begin_content();
        let source = UiText::source();
        info!(?ticket, language, "[Controller] Opening shared recipe");

        self.commit(ticket, |state| {
            state.clear_recipe();
            state.error = None;
            state.language = language.to_string();
            state.display_language = SOURCE_LANGUAGE.to_string();
            state.ui_text = source.clone();
            state.is_loading = true;
            state.is_translating = false;
            state.loading_message = source.loading_message_recipe.clone();
        });

        let recipe = self.compose_recipe(GeneratedRecipe::from(shared.r)).await;
        self.present_recipe(ticket, recipe).await;
        Ok(self.snapshot())
    }

    // -- Feedback & usage --

    pub async fn submit_feedback(&self, form: &FeedbackForm) -> AppResult<FeedbackOutcome> {
        let now = Utc::now();
        let data = match form.screen(now)? {
            Screened::Send(data) => data,
            Screened::FakeSuccess => return Ok(FeedbackOutcome::Accepted),
            Screened::TooFast => return Ok(FeedbackOutcome::Ignored),
        };

        self.services
            .interactions
            .submit_feedback(self.identity.as_str(), &data)
            .await
            .map_err(|e| {
                error!(error = %e, "[Controller] Feedback submission failed");
                AppError::Network(ERR_FEEDBACK_SUBMIT.to_string())
            })?;

        if let Err(e) = self
            .services
            .local_store
            .set(LAST_FEEDBACK_KEY, &now.to_rfc3339())
        {
            warn!(error = %e, "[Controller] Could not record feedback time");
        }
        info!("[Controller] Feedback sent");
        Ok(FeedbackOutcome::Accepted)
    }

    /// Total recipes generated by everyone, or `None` when the store is
    /// unreachable.
    pub async fn generation_count(&self) -> Option<u64> {
        match self.services.interactions.generation_count().await {
            Ok(count) => {
                self.services.emitter.emit(AppEvent::GenerationCountUpdated(count));
                Some(count)
            }
            Err(e) => {
                warn!(error = %e, "[Controller] Failed to fetch generation count");
                None
            }
        }
    }

    pub async fn list_feedback(&self, pin: &str) -> AppResult<Vec<FeedbackItem>> {
        if pin != self.admin_pin {
            warn!("[Controller] Admin PIN rejected");
            return Err(AppError::Validation(ERR_ADMIN_PIN.to_string()));
        }
        self.services.interactions.list_feedback().await
    }
}
