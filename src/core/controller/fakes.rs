//! In-memory service doubles for controller and command tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Notify;

use crate::core::identity::UserIdentity;
use crate::core::local_store::MemoryLocalStore;
use crate::core::services::{ContentTranslator, InteractionStore, RatingStore, RecipeGenerator};
use crate::shared::emit::BroadcastEmitter;
use crate::shared::error::{AppError, AppResult};
use crate::shared::errors::ERR_TRANSLATION_FAILED;
use crate::shared::translatable::TranslationPayload;
use crate::shared::types::{
    FeedbackData, FeedbackItem, GeneratedRecipe, RatingSummary, UpsertRatingPayload,
};

use super::{AppController, ControllerServices};

pub const TEST_PIN: &str = "2024";

pub fn golden_chicken() -> GeneratedRecipe {
    GeneratedRecipe {
        recipe_name: "Golden Ginger Soy Chicken".to_string(),
        description: "Sticky, savoury and perfect with rice.".to_string(),
        ingredients: vec!["500g chicken".to_string(), "3 tbsp soy sauce".to_string()],
        instructions: vec!["Marinate the chicken.".to_string(), "Fry until golden.".to_string()],
        prep_time: Some("15 minutes".to_string()),
        cook_time: Some("25 minutes".to_string()),
        total_time: None,
        servings: Some("4 people".to_string()),
    }
}

/// Anything not starting with "chicken" becomes a plain stew.
pub fn recipe_for(ingredients: &str) -> GeneratedRecipe {
    if ingredients.starts_with("chicken") {
        return golden_chicken();
    }
    GeneratedRecipe {
        recipe_name: format!("Plain {} Stew", ingredients),
        description: "Simple and warming.".to_string(),
        ingredients: vec![ingredients.to_string()],
        instructions: vec!["Simmer everything.".to_string()],
        prep_time: None,
        cook_time: None,
        total_time: None,
        servings: None,
    }
}

#[derive(Default)]
pub struct FakeGenerator {
    pub calls: AtomicUsize,
    pub fail_with: Mutex<Option<AppError>>,
    /// When set, the next call waits for a notification before answering.
    pub hold_next: Mutex<Option<Arc<Notify>>>,
}

impl FakeGenerator {
    pub fn hold_next(&self, gate: Arc<Notify>) {
        *self.hold_next.lock().unwrap() = Some(gate);
    }

    /// Yields until `count` calls have started.
    pub async fn wait_for_calls(&self, count: usize) {
        while self.calls.load(Ordering::SeqCst) < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn generate_recipe(&self, ingredients: &str) -> AppResult<GeneratedRecipe> {
        let gate = self.hold_next.lock().unwrap().take();
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(recipe_for(ingredients))
    }
}

/// Prefixes every string with `[<language>] `.
#[derive(Default)]
pub struct FakeTranslator {
    pub calls: AtomicUsize,
    pub payloads: Mutex<Vec<TranslationPayload>>,
    pub fail: Mutex<bool>,
    /// Keys left out of the response.
    pub drop_keys: Mutex<Vec<String>>,
    /// When set, each call waits for a notification before answering.
    pub gate: Option<Arc<Notify>>,
}

impl FakeTranslator {
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }
}

fn tag(value: &Value, prefix: &str) -> Value {
    match value {
        Value::String(s) => Value::String(format!("{}{}", prefix, s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| tag(v, prefix)).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl ContentTranslator for FakeTranslator {
    async fn translate_content(
        &self,
        content: &TranslationPayload,
        language_name: &str,
    ) -> AppResult<TranslationPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(content.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if *self.fail.lock().unwrap() {
            return Err(AppError::Network(ERR_TRANSLATION_FAILED.to_string()));
        }

        let prefix = format!("[{}] ", language_name);
        let dropped = self.drop_keys.lock().unwrap().clone();
        Ok(content
            .iter()
            .filter(|(key, _)| !dropped.contains(key))
            .map(|(key, value)| (key.clone(), tag(value, &prefix)))
            .collect())
    }
}

/// Ratings keyed by (recipe_id, user_id).
#[derive(Default)]
pub struct FakeRatings {
    pub rows: Mutex<HashMap<(String, String), u8>>,
    pub upserts: Mutex<Vec<UpsertRatingPayload>>,
    pub fail_upsert: Mutex<bool>,
    pub fail_reads: Mutex<bool>,
}

#[async_trait]
impl RatingStore for FakeRatings {
    async fn rating_summary(&self, recipe_id: &str) -> AppResult<RatingSummary> {
        if *self.fail_reads.lock().unwrap() {
            return Err(AppError::Network("offline".to_string()));
        }
        let rows = self.rows.lock().unwrap();
        let ratings: Vec<u8> = rows
            .iter()
            .filter(|((id, _), _)| id == recipe_id)
            .map(|(_, rating)| *rating)
            .collect();
        if ratings.is_empty() {
            return Ok(RatingSummary::default());
        }
        let total: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
        Ok(RatingSummary {
            average_rating: f64::from(total) / ratings.len() as f64,
            total_ratings: ratings.len() as u64,
        })
    }

    async fn user_rating(&self, recipe_id: &str, user_id: &str) -> AppResult<Option<u8>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(AppError::Network("offline".to_string()));
        }
        let key = (recipe_id.to_string(), user_id.to_string());
        Ok(self.rows.lock().unwrap().get(&key).copied())
    }

    async fn upsert_rating(&self, payload: &UpsertRatingPayload) -> AppResult<()> {
        if *self.fail_upsert.lock().unwrap() {
            return Err(AppError::Network("Rating upsert failed: 500".to_string()));
        }
        self.upserts.lock().unwrap().push(payload.clone());
        self.rows
            .lock()
            .unwrap()
            .insert((payload.recipe_id.clone(), payload.user_id.clone()), payload.rating);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeInteractions {
    pub feedback: Mutex<Vec<(String, FeedbackData)>>,
    pub generations: Mutex<Vec<String>>,
    pub offline: Mutex<bool>,
}

impl FakeInteractions {
    fn check_online(&self) -> AppResult<()> {
        if *self.offline.lock().unwrap() {
            return Err(AppError::Network("offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl InteractionStore for FakeInteractions {
    async fn submit_feedback(&self, user_id: &str, feedback: &FeedbackData) -> AppResult<()> {
        self.check_online()?;
        self.feedback
            .lock()
            .unwrap()
            .push((user_id.to_string(), feedback.clone()));
        Ok(())
    }

    async fn list_feedback(&self) -> AppResult<Vec<FeedbackItem>> {
        self.check_online()?;
        let rows = self.feedback.lock().unwrap();
        Ok(rows
            .iter()
            .enumerate()
            .rev()
            .map(|(i, (user_id, data))| FeedbackItem {
                id: i as i64 + 1,
                created_at: Utc::now(),
                user_id: Some(user_id.clone()),
                rating: data.rating,
                name: data.name.clone(),
                email: data.email.clone(),
                comment: data.comment.clone(),
            })
            .collect())
    }

    async fn record_generation(&self, user_id: &str) -> AppResult<()> {
        self.check_online()?;
        self.generations.lock().unwrap().push(user_id.to_string());
        Ok(())
    }

    async fn generation_count(&self) -> AppResult<u64> {
        self.check_online()?;
        Ok(self.generations.lock().unwrap().len() as u64)
    }
}

/// A controller wired to fakes, with handles to inspect them.
pub struct Kitchen {
    pub controller: Arc<AppController>,
    pub generator: Arc<FakeGenerator>,
    pub translator: Arc<FakeTranslator>,
    pub ratings: Arc<FakeRatings>,
    pub interactions: Arc<FakeInteractions>,
    pub store: Arc<MemoryLocalStore>,
    pub emitter: Arc<BroadcastEmitter>,
}

impl Kitchen {
    pub fn new() -> Self {
        Self::with_translator(FakeTranslator::default())
    }

    pub fn with_translator(translator: FakeTranslator) -> Self {
        let generator = Arc::new(FakeGenerator::default());
        let translator = Arc::new(translator);
        let ratings = Arc::new(FakeRatings::default());
        let interactions = Arc::new(FakeInteractions::default());
        let store = Arc::new(MemoryLocalStore::new());
        let emitter = Arc::new(BroadcastEmitter::default());

        let controller = AppController::new(
            ControllerServices {
                generator: generator.clone(),
                translator: translator.clone(),
                ratings: ratings.clone(),
                interactions: interactions.clone(),
                local_store: store.clone(),
                emitter: emitter.clone(),
            },
            UserIdentity::from("user-1".to_string()),
            TEST_PIN,
        );

        Self {
            controller: Arc::new(controller),
            generator,
            translator,
            ratings,
            interactions,
            store,
            emitter,
        }
    }
}
