//! # TextGrid Processor: A Parser and Generator for Praat TextGrid Files
//!
//! This crate provides tools for handling the plain-text TextGrid annotation
//! format produced by the Praat phonetics software. It understands both
//! textual dialects of the format — the verbose key-value "full" form and the
//! positional "short" form — and always writes the canonical short form.
//!
//! The two primary functions you will use are:
//! - [`parse_textgrid`]: Converts a TextGrid string into a `Textgrid` object
//!   from `textgrid_helper_core`, detecting the dialect automatically.
//! - [`generate_textgrid`]: Creates a short-dialect TextGrid string from a
//!   `Textgrid`, gap-filling every interval tier first so the written file
//!   has contiguous coverage.
//!
//! File-level helpers ([`read_textgrid_file`], [`write_textgrid_file`])
//! additionally handle the UTF-16 encoding used by many TextGrid files,
//! falling back to UTF-8 once when UTF-16 decoding fails.
//!
//! ## ⚠️ Important: Empty Labels Are Not Preserved
//!
//! Praat uses empty-label intervals as padding between meaningful entries.
//! Parsing strips them, and generation re-creates them from the tier gaps,
//! so a parse/generate round trip is only identity for textgrids whose
//! entries all carry non-empty labels.
//!
//! ## Examples
//!
//! A basic round-trip: build a textgrid, serialize it, and parse it back.
//!
//! ```rust
//! use textgrid_helper_core::{Interval, IntervalTier, Textgrid, Tier};
//! use textgrid_processor::{generate_textgrid, parse_textgrid};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut textgrid = Textgrid::new();
//!     let words = IntervalTier::new(
//!         "words",
//!         vec![
//!             Interval::new(0.0, 1.0, "hello")?,
//!             Interval::new(1.5, 2.0, "world")?,
//!         ],
//!         Some(0.0),
//!         Some(2.5),
//!     )?;
//!     textgrid.add_tier(Tier::Interval(words), None)?;
//!
//!     let serialized = generate_textgrid(&textgrid)?;
//!     assert!(serialized.contains("File type = \"ooTextFile short\""));
//!     assert!(serialized.contains("\"IntervalTier\""));
//!
//!     let parsed = parse_textgrid(&serialized)?;
//!     assert!(textgrid.approx_eq(&parsed));
//!     Ok(())
//! }
//! ```

pub mod generator;
pub mod io;
pub mod parser;

pub use generator::generate_textgrid;
pub use io::{read_textgrid_file, write_textgrid_file};
pub use parser::{Dialect, detect_dialect, parse_textgrid};
