//! Client-side state layer for the worklink app.
//!
//! Everything here is plain Rust: stores are mutated through `&mut self`
//! reducer-style methods that run to completion on the single-threaded UI
//! event loop, so no locking is involved. The app crate owns the signals and
//! the HTTP calls; these types own the merge/validation rules.

pub mod error;
pub mod feed;
pub mod jobs;
pub mod lookup;
pub mod session;
pub mod wizard;

pub use error::ApiError;

/// Lifecycle of a single fetch. No automatic retry; the caller re-invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}
