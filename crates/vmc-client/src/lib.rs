//! Client for the college directory API.
//!
//! The directory exposes four read-only endpoints, each answering with a
//! `{ "data": [...] }` envelope:
//!
//! - `specializations?stream=` - specializations under a stream
//! - `cities?stream=` - cities with colleges for a stream
//! - `colleges?stream=&specialization=[&city=]` - matching colleges
//! - `search-college?q=` - free-text college search
//!
//! # Example
//!
//! ```no_run
//! use vmc_client::{ClientConfig, CollegeDirectory, DirectoryClient};
//!
//! async fn list_specializations() -> vmc_client::Result<()> {
//!     let client = DirectoryClient::new(&ClientConfig::default())?;
//!     for course in client.specializations("Science").await? {
//!         println!("{course}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod types;

pub use client::{DirectoryClient, Endpoint};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use directory::CollegeDirectory;
pub use error::{ClientError, Result};
