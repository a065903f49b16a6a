//! Reconciliation of the catalog sheet with external sources.
//!
//! Every synchronizer follows the same path: load the sheet, fetch from the
//! source, reconcile row by row, save the sheet, then rebuild the database
//! in full. Sources are reached through the traits in `gamecat-sources`, so
//! tests drive the synchronizers with in-memory fakes.

pub mod audit;
pub mod completion;
pub mod error;
pub mod options;
pub mod progress;
pub mod review;
pub mod steam;

pub use audit::{find_similar_games, format_missing_games};
pub use completion::CompletionSynchronizer;
pub use error::SyncError;
pub use options::{SyncMode, SyncOptions, SyncOutcome, SyncReport};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use review::ReviewSynchronizer;
pub use steam::{AddReport, StatusNames, SteamReport, SteamSynchronizer, apply_owned_game};
