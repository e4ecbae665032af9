//! Scripture references and verse retrieval.
//!
//! - [`parse_reference`] turns free text such as `"1 cor 13:4-7"` into a
//!   [`Reference`](dbs_core::Reference)
//! - [`ScriptureClient`] fetches a chapter from the Bible API and filters it
//!   down to the requested verses
//!
//! # Example
//!
//! ```no_run
//! use dbs_scripture::{ScriptureClient, parse_reference};
//! use dbs_interface::ScriptureSource;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reference = parse_reference("John 3:16-17")?;
//! let client = ScriptureClient::new("https://bible.helloao.org/api/BSB");
//! let passage = client.fetch_passage(&reference).await?;
//! println!("{}", passage.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod books;
mod client;
mod parser;

pub use books::{BOOKS, book_id, canonical_book};
pub use client::{DEFAULT_API_BASE_URL, ScriptureClient};
pub use parser::parse_reference;
