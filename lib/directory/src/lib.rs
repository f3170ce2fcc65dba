//! User directory queries for opsdeck.
//!
//! The hosted identity provider owns the user records; this crate turns
//! its bulk admin-listing API into the paginated, filterable directory
//! the console serves:
//!
//! - `DirectoryRecord`: the raw provider record, and `UserStatus`
//! - `derive_status`: pure lifecycle derivation (banned / confirmed /
//!   invited signals)
//! - `UserSummary` / `to_summary`: the projection served to clients
//! - `UserFilter` and diacritic-insensitive search matching
//! - `AdminApiClient`: the privileged listing client
//! - `DirectoryQuery`: pagination orchestration, including the bounded
//!   full fetch used when filters are requested
//!
//! The provider has no server-side search or status filter, so filtered
//! queries fetch every page (bounded by a hard ceiling) and filter in
//! memory; unfiltered queries pass pagination straight through.

pub mod client;
pub mod error;
pub mod query;
pub mod record;
pub mod search;
pub mod status;
pub mod summary;

// Re-export main types at crate root
pub use client::{AdminApiClient, UserPage};
pub use error::DirectoryError;
pub use query::{DirectoryPage, DirectoryQuery};
pub use record::{DirectoryRecord, UserStatus};
pub use search::UserFilter;
pub use status::derive_status;
pub use summary::{UserSummary, to_summary};
