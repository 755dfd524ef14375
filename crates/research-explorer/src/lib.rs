//! Research Explorer
//!
//! Interactive discovery of research papers backed by the Semantic Scholar Graph API.
//! Find papers by topic, DOI, or paper URL, narrow them by publication year, sort and
//! page through them, export them, and look up related code and datasets.
//!
//! # Features
//!
//! - **Search**: topic search, direct DOI lookup, and paper-URL lookup
//! - **Filter and sort**: inclusive year bounds, newest-first or most-cited-first
//! - **Export**: CSV with formula-injection guarding, or compact JSON
//! - **Enrichment**: Papers with Code, GitHub, Zenodo, and Kaggle links per paper
//! - **AI summaries**: abstract critique via Gemini when a key is configured
//!
//! Upstream failures never surface as errors: every client degrades to an empty
//! result and logs a warning.
//!
//! # Example
//!
//! ```no_run
//! use research_explorer::{Command, Config, Explorer, SessionState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let explorer = Explorer::new(&config)?;
//!     let mut state = SessionState::new();
//!
//!     let outcome = explorer.dispatch(&mut state, Command::parse("federated learning")?).await;
//!     println!("{}", outcome.render(&state, explorer.page_size()));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod formatters;
pub mod keywords;
pub mod models;
pub mod normalize;
pub mod processor;
pub mod router;
pub mod session;
pub mod summary;

pub use client::SemanticScholarClient;
pub use config::Config;
pub use error::{ClientError, ExplorerError};
pub use session::{Command, Explorer, Outcome, SessionState};
