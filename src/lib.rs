//! Client for the Hostaway property-management API.
//!
//! ```no_run
//! # async fn run() -> hostaway::Result<()> {
//! use hostaway::{ClientConfig, HostawayClient};
//!
//! let client = HostawayClient::new(ClientConfig::new("12345", "secret")).await?;
//! let listings = client.listings().list(&[("city", "Austin")]).await?;
//! # let _ = listings;
//! # Ok(())
//! # }
//! ```

mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod types;

pub use client::{HostawayClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{HostawayError, Result};
pub use reqwest::Method;
pub use resources::{Resource, ResourceKind};
pub use types::{ApiResponse, Listing, Reservation};
