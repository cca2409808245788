//! shared_with_me - List the Google Drive files shared with you.
//!
//! This library provides:
//! - Authentication via a service account or a ready-made access token
//! - Paginated enumeration of the "shared with me" listing that keeps
//!   partial results when a page fails
//! - A plain-text table report of the collected files
//!
//! # Example
//!
//! ```no_run
//! use shared_with_me::{enumerate, print_listing, Authenticator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let auth = Authenticator::from_file("service-account.json")?;
//!     let session = auth.authenticate().await?;
//!
//!     let listing = enumerate(&session).await;
//!     print_listing(&listing, &mut std::io::stdout())?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod enumerator;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;

// Re-exports for convenience
pub use auth::Authenticator;
pub use client::DriveSession;
pub use enumerator::{enumerate, Listing, PageSource};
pub use error::{DriveError, Result};
pub use models::SharedFileRecord;
pub use report::{print_listing, render_report};
