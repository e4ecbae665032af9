//! Generated media storage for dbs.
//!
//! Each processed reference gets its own directory under an output root,
//! named after the reference so separate passages of one chapter never
//! collide:
//!
//! ```text
//! output/
//! ├── John_3_16-17/
//! │   ├── img_0.png
//! │   └── img_1.png
//! └── 1_Samuel_23_1-5/
//!     └── img_0.png
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod output;

pub use output::OutputDirectory;
