//! # Bookpage Library
//!
//! Turns one long Markdown book into a single navigable HTML page with a
//! numbered table of contents and highlighted code blocks.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bookpage::{BookBuilder, BuildConfig};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BuildConfig {
//!         books_dir: PathBuf::from("docs/books"),
//!         output_dir: PathBuf::from("./build"),
//!         ..Default::default()
//!     };
//!
//!     // Segment, render and write docs/books/guide.md
//!     let builder = BookBuilder::new(config);
//!     let result = builder.build("guide").await?;
//!
//!     println!("Wrote {} sections to {}", result.sections, result.output_file.display());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{BookError, Result};
pub use services::{
    BlockRenderer, BookBuilder, BookSegmenter, BookSource, Highlighter, MarkdownRenderer,
    Publisher, SyntectHighlighter,
};
pub use types::{
    BuildConfig, BuildResult, ContentBlock, DocumentModel, Heading, PageFragments, Section,
    SectionItem,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
