//! pagesflow deploy core
//!
//! This crate turns a validated set of Cloudflare Pages settings into a
//! single invocation of the publishing tool and reports what happened.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  pagesflow CLI                   │
//! │        (pagesflow generate / deploy)             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                pagesflow-core                    │
//! │  ┌──────────────┐  ┌──────────────────────────┐ │
//! │  │   Deployer   │──▶  trait ProcessRunner     │ │
//! │  └──────┬───────┘  └──────────────────────────┘ │
//! │         │          ┌──────────────────────────┐ │
//! │         └──────────▶  trait MessageSink       │ │
//! │                    └──────────────────────────┘ │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │  pagesflow-cloudflare (tokio process runner)     │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pagesflow_core::{DeployConfig, Deployer, PublishTool};
//!
//! let deployer = Deployer::new(runner, PublishTool::wrangler(), sink);
//! match deployer.deploy(&config).await {
//!     Ok(outcome) => println!("{}", outcome.message),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod config;
pub mod deployer;
pub mod error;
pub mod generator;
pub mod invocation;
pub mod message;
pub mod outcome;
pub mod runner;

pub use config::{ApiToken, DeployConfig, Setting};
pub use deployer::Deployer;
pub use error::{DeployError, GenerateError, Result, RunError};
pub use generator::{CommandGenerator, GenerationReport, StaticGenerator};
pub use invocation::{Invocation, PublishTool};
pub use message::{MemorySink, MessageLevel, MessageSink};
pub use outcome::{DeployOutcome, OutcomeKind, SPAWN_FAILURE_EXIT_CODE};
pub use runner::{ProcessOutput, ProcessRunner};
