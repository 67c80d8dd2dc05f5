//! Cloudflare Pages backend for pagesflow
//!
//! # Features
//!
//! - [`TokioRunner`]: runs the publishing tool as a child process with
//!   captured output and an optional timeout
//! - [`Wrangler`]: checks that wrangler can be started
//! - [`PagesApi`]: verifies the API token and the Pages project via the
//!   Cloudflare API
//!
//! # Requirements
//!
//! - `wrangler` (or `npx` with network access) for uploads
//!
//! # Example
//!
//! ```ignore
//! use pagesflow_cloudflare::{TokioRunner, Wrangler};
//! use pagesflow_core::PublishTool;
//!
//! let wrangler = Wrangler::new(PublishTool::wrangler(), TokioRunner);
//! println!("wrangler {}", wrangler.version().await?);
//! ```

pub mod error;
pub mod pages;
pub mod runner;
pub mod wrangler;

pub use error::{CloudflareError, Result};
pub use pages::{PagesApi, PagesProject, TokenStatus};
pub use runner::TokioRunner;
pub use wrangler::Wrangler;
