//! Front matter support for docnav.
//!
//! Markdown pages may start with a YAML block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Getting Started
//! linkTitle: Start
//! weight: 10
//! ---
//! # Getting Started
//! ```
//!
//! [`FrontMatter::parse`] extracts that block into a generic key/value mapping,
//! and [`NavFields::decode`] classifies the fields used for navigation,
//! reporting type mismatches as [`FieldError`] values instead of failing.
//!
//! # Example
//!
//! ```
//! use docnav_meta::{FrontMatter, NavFields};
//!
//! let front = FrontMatter::parse("---\ntitle: Guide\nweight: 2\n---\nbody")?;
//! let fields = NavFields::decode(&front);
//! assert_eq!(fields.display_title(), Some("Guide"));
//! assert_eq!(fields.weight, Some(2));
//! # Ok::<(), docnav_meta::FrontMatterError>(())
//! ```

mod fields;
mod front_matter;

pub use fields::{FieldError, NavFields, ValueKind};
pub use front_matter::{DELIMITER, FrontMatter, FrontMatterError};
