//! od-indexer: Aggregate construction for OpenDota player data.
//!
//! This crate provides the [`Indexer`] struct which is the main entry point
//! for turning a raw player identifier into a [`WrappedAggregate`].
//!
//! # Overview
//!
//! The indexer:
//! - Normalizes the identifier (`od-types`)
//! - Checks that the account exists before doing any expensive work
//! - Fans out to OpenDota via `od-ingestion`, sharing one request-scoped cache
//! - Searches for the player's first match ([`find_oldest_match`])
//! - Derives records and top friends
//!
//! # Example
//!
//! ```rust,no_run
//! use od_indexer::{Indexer, IndexerConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IndexerConfig::from_env().with_deadline(Duration::from_secs(60));
//!     let indexer = Indexer::new(config)?;
//!
//!     if !indexer.validate_account("111620041").await? {
//!         println!("No such player");
//!         return Ok(());
//!     }
//!
//!     let wrapped = indexer.build_wrapped("111620041").await?;
//!     println!("KDA: {}", wrapped.records.kda);
//!     if let Some(first) = &wrapped.first_match {
//!         println!("First match: {:?}", first.started_at());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! Any [`DataSource`] works, so tests run against `MockSource`:
//!
//! ```rust
//! use od_indexer::{Indexer, IndexerConfig};
//! use od_ingestion::MockSource;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let indexer = Indexer::with_source(MockSource::new(), IndexerConfig::default());
//! assert!(!indexer.validate_account("12345").await.unwrap());
//! # }
//! ```

mod error;
mod indexer;
mod oldest_match;
mod scope;

pub use error::IndexerError;
pub use indexer::{Indexer, IndexerConfig, DEFAULT_MATCH_SAMPLE};
pub use oldest_match::{find_oldest_match, probe, FinderConfig, ProbeOutcome, DEFAULT_PROBE_OFFSETS};
pub use scope::RequestScope;

// Re-export commonly used types from dependencies for convenience
pub use od_ingestion::{ClientConfig, DataSource, OpenDotaSource};
pub use od_types::{AccountId, Section, WrappedAggregate};
