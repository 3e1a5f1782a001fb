//! Unofficial Rust client for the Google Labs image generation sandbox.
//!
//! The service is undocumented: authentication starts from a browser
//! session cookie, a short-lived bearer token is derived from it on first
//! need, and every operation resolves to a uniform `Result` instead of
//! panicking. The most involved flow is [`ImageClient::refine`], a
//! two-phase protocol that rewrites a prompt from an existing image plus
//! new instructions, then regenerates from the rewritten prompt.
//!
//! ```no_run
//! use whisk::{Prompt, WhiskClient, WhiskConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WhiskConfig::from_env();
//!     let client = WhiskClient::new(config)?;
//!
//!     if client.is_available().await? {
//!         let result = client.images().generate(Prompt::new("a cat on a roof")).await?;
//!         if let Some(encoded) = result.first_image_base64() {
//!             whisk::save_base64_image(encoded, "cat.png")?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod transport;

pub use client::{ImageClient, MediaClient, ProjectClient, WhiskClient};
pub use config::WhiskConfig;
pub use error::{Result, WhiskError};
pub use models::*;
pub use session::Session;
pub use transport::{HttpTransport, Transport};
