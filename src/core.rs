//! Domain core
//!
//! - `recipe`: pure recipe transforms (ids, translation payloads, export, share)
//! - `services`: remote service traits and their HTTP clients
//! - `local_store`, `identity`: client-local persistence and the user id
//! - `feedback`: feedback form screening
//! - `controller`: state and orchestration

pub mod recipe;
pub mod services;
pub mod local_store;
pub mod identity;
pub mod feedback;
pub mod controller;
