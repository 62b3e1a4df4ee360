//! # vn-dates
//!
//! Deterministic normalization of Vietnamese relative dates.
//!
//! Chat messages say "ngày mai 10h họp" or "tuần sau bay Đà Nẵng". Before
//! such a message is stored as memory, the relative phrases are rewritten
//! into absolute dates anchored to the message's send time, so the memory
//! layer never has to guess what "tomorrow" meant.
//!
//! ## Modules
//!
//! - [`normalizer`] — the pipeline: idiom check → day → week → month
//! - [`idiom`] — idioms ("mai mốt", "bữa nào") that suppress day rules
//! - [`indicator`] — time-indicator gate required before a day phrase is rewritten
//! - [`day`] — "hôm nay", "ngày mai", "hôm qua", "ngày kia" → `ngày DD/MM/YYYY`
//! - [`week`] — "tuần sau", "tuần trước" → `tuần DD/MM-DD/MM/YYYY`
//! - [`month`] — "tháng sau", "tháng trước" → `tháng M/YYYY`
//! - [`rules`] — static rule tables
//! - [`clock`] — reference instants and the injected clock
//! - [`memory`] — payload and facts schema for the downstream memory store
//! - [`config`] — downstream memory backend configuration
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod day;
pub mod error;
pub mod idiom;
pub mod indicator;
pub mod memory;
pub mod month;
pub mod normalizer;
mod rewrite;
pub mod rules;
pub mod week;

pub use clock::{Clock, FixedClock, ReferenceInstant, SystemClock};
pub use config::MemoryBackendConfig;
pub use error::VnDatesError;
pub use idiom::IdiomGuard;
pub use indicator::{Evidence, TimeIndicatorGate};
pub use memory::{prepare_add, AddMemoryRequest, ExtractedFacts, MemoryAddPayload};
pub use normalizer::{NormalizeOptions, Normalized, Normalizer};
pub use rewrite::{Stage, Substitution};
pub use week::WeekStartDay;
