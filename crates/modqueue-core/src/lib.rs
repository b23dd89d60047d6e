//! # modqueue-core
//!
//! Core client logic for the modqueue moderation console.
//!
//! This crate provides:
//! - Domain models for moderation cases
//! - **Cursor-paged table source** - bridges pagination/sort controls to
//!   the backend's cursor-based case listing
//! - **Case navigator** - doubly-linked traversal over the loaded page,
//!   so detail views can step between cases without refetching
//! - Auto-refresh of the case backlog
//! - Services for reviews, notes, and image uploads

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod case;
mod error;
pub mod navigator;
mod refresh;
pub mod service;
pub mod table;

pub use case::{
    Analysis, Case, CaseState, Content, ContentType, Decision, Flag, FlagSource, Level,
    Likelihood, Priority, Review, ReviewStats, SafeSearchScores,
};
pub use error::{Error, Result};
pub use navigator::{CaseNavigator, CursorTokens, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use refresh::{AUTO_REFRESH_INTERVAL, AutoRefresh};
pub use service::{CaseService, ReviewService, UploadService};
pub use table::{
    CaseColumn, CasePage, CasePager, CaseTableSource, DEFAULT_ERROR_MSG, PageError, PageRequest,
    Paginator, RefreshHandle, SharedNavigator, Sort, SortControl, SortDirection,
};
