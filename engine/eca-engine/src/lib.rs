//! Event-Coincident Analysis: find log texts that recur around incidents.
//!
//! Incident timestamps from master sources go into a sorted index; lines from
//! the other sources are normalized, classified as within / outside / not
//! applicable relative to that index, and the texts that meet the percentile
//! and accuracy thresholds are reported.
//!
//! No DB, no network; pure computation over files that fit in memory.

pub mod classify;
pub mod config;
pub mod dateparser;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod report;
pub mod source;
pub mod threshold;
pub mod timestamp;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use error::EcaError;
pub use timestamp::TimestampIndex;
pub use types::{Report, Timestamp};
