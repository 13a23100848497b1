//! Front-end facing boundary
//!
//! Every command takes the shared [`AppContext`](crate::app::AppContext),
//! returns `CommandResult<T>` and only carries serializable types, so the
//! layer can sit behind any IPC bridge.

pub mod commands;
