//! OBS Studio control for dbs.
//!
//! - [`ObsClient`]: a minimal obs-websocket v5 client (Hello/Identify
//!   handshake with optional password auth, request/response correlation)
//! - [`ObsConnector`]: opens authenticated [`ObsClient`] sessions
//! - [`SceneBuilder`]: replicates template scenes over any
//!   [`SceneControl`](dbs_interface::SceneControl) session
//! - [`wrap_text`]: line breaking for narrow text sources
//!
//! # Example
//!
//! ```no_run
//! use dbs_interface::SceneConnector;
//! use dbs_obs::{ObsConnector, SceneBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = ObsConnector::new("localhost", 4455, None);
//! let mut builder = SceneBuilder::new(connector.connect().await?);
//! builder.create_text_scene("John 3:16", "[16] For God so loved the world").await?;
//! builder.set_current_scene("John 3:16").await;
//! builder.close().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod client;
mod protocol;
mod scene_builder;
mod text;

pub use auth::authentication_string;
pub use client::{ObsClient, ObsConnector};
pub use protocol::OpCode;
pub use scene_builder::{SceneBuilder, SceneTemplate};
pub use text::{DEFAULT_MAX_CHARS_PER_LINE, wrap_text};
