//! Clients for the external sources the catalog is reconciled against:
//! the Steam Web API for ownership and playtime, Metacritic for review
//! scores and HowLongToBeat for completion times.
//!
//! Every client is blocking. Response parsing is split from the network call
//! so it can be exercised against fixture documents.

pub mod error;
pub mod hltb;
mod http;
pub mod metacritic;
pub mod source;
pub mod steam;

pub use error::SourceError;
pub use hltb::{CompletionTimes, HltbClient};
pub use metacritic::{MetacriticClient, ReviewRecord};
pub use source::{CompletionTimeSource, OwnershipSource, ReviewSource};
pub use steam::{OwnedGame, OwnedLibrary, SteamClient};
