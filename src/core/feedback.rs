//! Feedback form screening: bot traps and field validation run locally
//! before anything is sent to the interaction store.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::FeedbackData;

/// Forms submitted faster than this after opening are treated as bots.
pub const MIN_FILL_TIME_MS: i64 = 2_000;

pub const ERR_RATING_REQUIRED: &str = "Please give a star rating.";
pub const ERR_EMAIL_FORMAT: &str = "Please enter a valid email address.";
pub const ERR_EMAIL_DISPOSABLE: &str = "Sorry, disposable email addresses are not allowed.";

const DISPOSABLE_DOMAINS: &[&str] = &[
    "tempmail.com", "10minutemail.com", "guerrillamail.com", "sharklasers.com",
    "mailinator.com", "yopmail.com", "getairmail.com", "throwawaymail.com",
    "temp-mail.org", "fake-email.com", "dispostable.com", "maildrop.cc",
    "bccto.me", "mailpoof.com", "protonmail.com", "tutanota.com",
    "dayrep.com", "teleworm.us", "jourrapide.com", "rhyta.com", "superrito.com",
    "armyspy.com", "cuvox.de", "einrot.com", "fleckens.hu", "gustr.com",
    "weber.edu", "spam4.me", "emailfake.com",
];

/// Raw form as filled in by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FeedbackForm {
    pub rating: u8,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub comment: String,
    /// Hidden field; humans never fill it.
    #[serde(default)]
    pub honeypot: String,
    #[ts(type = "string")]
    pub opened_at: DateTime<Utc>,
}

/// What the caller sees after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FeedbackOutcome {
    Accepted,
    Ignored,
}

/// Result of screening a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Screened {
    Send(FeedbackData),
    /// Bot trap tripped; report success without sending.
    FakeSuccess,
    /// Submitted too quickly; drop silently.
    TooFast,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

/// Empty email is allowed.
pub fn validate_email(email: &str) -> AppResult<()> {
    if email.is_empty() {
        return Ok(());
    }
    if !email_regex().is_match(email) {
        return Err(AppError::Validation(ERR_EMAIL_FORMAT.to_string()));
    }
    let domain = email
        .split('@')
        .nth(1)
        .map(|d| d.to_lowercase())
        .unwrap_or_default();
    if DISPOSABLE_DOMAINS.contains(&domain.as_str()) {
        return Err(AppError::Validation(ERR_EMAIL_DISPOSABLE.to_string()));
    }
    Ok(())
}

impl FeedbackForm {
    pub fn screen(&self, now: DateTime<Utc>) -> AppResult<Screened> {
        if !self.honeypot.is_empty() {
            warn!("[Feedback] Bot detected: honeypot filled");
            return Ok(Screened::FakeSuccess);
        }

        if now - self.opened_at < Duration::milliseconds(MIN_FILL_TIME_MS) {
            warn!("[Feedback] Bot detected: form submitted too quickly");
            return Ok(Screened::TooFast);
        }

        if !(1..=5).contains(&self.rating) {
            return Err(AppError::Validation(ERR_RATING_REQUIRED.to_string()));
        }

        let email = self.email.trim();
        validate_email(email)?;

        Ok(Screened::Send(FeedbackData {
            rating: self.rating,
            name: self.name.trim().to_string(),
            email: email.to_string(),
            comment: self.comment.trim().to_string(),
        }))
    }
}
