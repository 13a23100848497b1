//! Toma kitchen backend
//!
//! Turns a list of ingredients into a halal Malaysian home-cooking recipe,
//! then translates, rates, shares and exports it.
//!
//! ## Layout
//!
//! - `api`: serializable command functions for a front end
//! - `app`: startup wiring ([`AppContext`](app::AppContext))
//! - `core`: controller, service clients, local persistence
//! - `shared`: types, UI copy, settings, errors and events
//!
//! ```no_run
//! # async fn run() -> toma_kitchen::shared::AppResult<()> {
//! toma_kitchen::logging::init();
//! let ctx = toma_kitchen::app::AppContext::bootstrap().await?;
//! let state = toma_kitchen::api::commands::recipe::generate_recipe(&ctx, "chicken, ginger".into()).await;
//! # let _ = state;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod core;
pub mod logging;
pub mod shared;
