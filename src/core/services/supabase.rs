//! Supabase (PostgREST) client for ratings, feedback and usage counters.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use super::{InteractionStore, RatingStore};
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::SupabaseSettings;
use crate::shared::types::{FeedbackData, FeedbackItem, RatingSummary, UpsertRatingPayload};

const RATINGS_TABLE: &str = "recipe_ratings";
const RATING_SUMMARY_VIEW: &str = "recipe_rating_summary";
const FEEDBACK_TABLE: &str = "toma_feedback";
const INTERACTIONS_TABLE: &str = "toma_interactions";

#[derive(Debug, Deserialize)]
struct SummaryRow {
    #[serde(default, deserialize_with = "loose_f64")]
    average_rating: Option<f64>,
    #[serde(default)]
    total_ratings: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UserRatingRow {
    rating: u8,
}

#[derive(Debug, Serialize)]
struct FeedbackRow<'a> {
    user_id: &'a str,
    rating: u8,
    name: &'a str,
    email: &'a str,
    comment: &'a str,
}

#[derive(Debug, Serialize)]
struct InteractionRow<'a> {
    user_id: &'a str,
}

/// Postgres `numeric` columns may arrive as strings.
fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Total from a PostgREST `Content-Range` header: `0-24/3573` or `*/0`.
pub(crate) fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

pub struct SupabaseClient {
    http: Client,
    rest_url: String,
}

impl SupabaseClient {
    pub fn new(settings: &SupabaseSettings, timeout: Option<Duration>) -> AppResult<Self> {
        if settings.url.trim().is_empty() || settings.anon_key.trim().is_empty() {
            return Err(AppError::Config("Supabase URL or anonymous key is not provided.".to_string()));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&settings.anon_key)
            .map_err(|e| AppError::Config(format!("Invalid Supabase key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.anon_key))
            .map_err(|e| AppError::Config(format!("Invalid Supabase key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let mut builder = Client::builder()
            .user_agent("toma-kitchen/supabase")
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", settings.url.trim_end_matches('/')),
        })
    }

    fn table(&self, name: &str) -> String {
        format!("{}/{}", self.rest_url, name)
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "[Supabase] {} request failed", context);
            AppError::Network(format!("{} request failed: {}", context, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "[Supabase] {} returned an error", context);
            return Err(AppError::Network(format!("{} failed: {}", context, status)));
        }
        Ok(response)
    }

    async fn read_rows<T: for<'de> Deserialize<'de>>(&self, response: Response, context: &str) -> AppResult<Vec<T>> {
        response.json::<Vec<T>>().await.map_err(|e| {
            error!(error = %e, "[Supabase] Failed to parse {} rows", context);
            AppError::Parse(format!("Invalid {} response: {}", context, e))
        })
    }
}

#[async_trait]
impl RatingStore for SupabaseClient {
    async fn rating_summary(&self, recipe_id: &str) -> AppResult<RatingSummary> {
        let request = self
            .http
            .get(self.table(RATING_SUMMARY_VIEW))
            .query(&[
                ("select", "average_rating,total_ratings".to_string()),
                ("recipe_id", format!("eq.{}", recipe_id)),
            ]);
        let response = self.send(request, "Rating summary").await?;
        let rows: Vec<SummaryRow> = self.read_rows(response, "rating summary").await?;

        let summary = rows
            .into_iter()
            .next()
            .map(|row| RatingSummary {
                average_rating: row.average_rating.unwrap_or(0.0),
                total_ratings: row.total_ratings.unwrap_or(0),
            })
            .unwrap_or_default();
        debug!(recipe_id, ?summary, "[Supabase] Rating summary");
        Ok(summary)
    }

    async fn user_rating(&self, recipe_id: &str, user_id: &str) -> AppResult<Option<u8>> {
        let request = self
            .http
            .get(self.table(RATINGS_TABLE))
            .query(&[
                ("select", "rating".to_string()),
                ("recipe_id", format!("eq.{}", recipe_id)),
                ("user_id", format!("eq.{}", user_id)),
            ]);
        let response = self.send(request, "User rating").await?;
        let rows: Vec<UserRatingRow> = self.read_rows(response, "user rating").await?;
        Ok(rows.into_iter().next().map(|row| row.rating))
    }

    async fn upsert_rating(&self, payload: &UpsertRatingPayload) -> AppResult<()> {
        info!(recipe_id = %payload.recipe_id, rating = payload.rating, "[Supabase] Upserting rating");
        let request = self
            .http
            .post(self.table(RATINGS_TABLE))
            .query(&[("on_conflict", "recipe_id,user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(payload);
        self.send(request, "Rating upsert").await?;
        Ok(())
    }
}

#[async_trait]
impl InteractionStore for SupabaseClient {
    async fn submit_feedback(&self, user_id: &str, feedback: &FeedbackData) -> AppResult<()> {
        let row = FeedbackRow {
            user_id,
            rating: feedback.rating,
            name: &feedback.name,
            email: &feedback.email,
            comment: &feedback.comment,
        };
        let request = self
            .http
            .post(self.table(FEEDBACK_TABLE))
            .header("Prefer", "return=minimal")
            .json(&row);
        self.send(request, "Feedback insert").await?;
        Ok(())
    }

    async fn list_feedback(&self) -> AppResult<Vec<FeedbackItem>> {
        let request = self
            .http
            .get(self.table(FEEDBACK_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = self.send(request, "Feedback list").await?;
        self.read_rows(response, "feedback").await
    }

    async fn record_generation(&self, user_id: &str) -> AppResult<()> {
        let request = self
            .http
            .post(self.table(INTERACTIONS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&InteractionRow { user_id });
        self.send(request, "Interaction insert").await?;
        Ok(())
    }

    async fn generation_count(&self) -> AppResult<u64> {
        let request = self
            .http
            .head(self.table(INTERACTIONS_TABLE))
            .query(&[("select", "*")])
            .header("Prefer", "count=exact");
        let response = self.send(request, "Interaction count").await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| AppError::Parse("Missing Content-Range count".to_string()))
    }
}
