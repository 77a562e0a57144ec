//! Application layer: configuration and the shared advisor service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Advisor (Mutex<StateStore + RNG>)   │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ uses                       │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Ports                               │   │
//! │  │  - RandomSource                      │   │
//! │  │  - HistorySource                     │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implemented by             │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Adapters                            │   │
//! │  │  - StdRandom / ScriptedRandom        │   │
//! │  │  - JsonHistoryFile / InMemoryHistory │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production
//!
//! ```
//! use chicken_advisor::app::{Advisor, AdvisorConfig};
//!
//! let advisor = Advisor::new(AdvisorConfig::default().with_seed(42))?;
//! let pick = advisor.select_next_ids(&[])?;
//! # Ok::<(), chicken_advisor::Error>(())
//! ```
//!
//! ## Testing
//!
//! ```
//! use chicken_advisor::adapters::ScriptedRandom;
//! use chicken_advisor::app::{Advisor, AdvisorConfig};
//! use chicken_advisor::engine::Strategy;
//!
//! let advisor = Advisor::with_random_source(
//!     AdvisorConfig::default(),
//!     Box::new(ScriptedRandom::exploring()),
//! )?;
//! assert_eq!(advisor.select_next_ids(&[])?.strategy, Strategy::Explore);
//! # Ok::<(), chicken_advisor::Error>(())
//! ```

pub mod advisor;
pub mod config;

pub use advisor::Advisor;
pub use config::AdvisorConfig;
