//! This module contains a "high-level" interface to
//! the "low-level" types in `types`.
//!
//! This interface aims to make working with the archive easier than the raw data structures,
//! which are often idiosyncratic to save space in the archive.

mod archive;
mod file;
mod streams;
pub use archive::*;
pub use file::*;
pub use streams::*;

use super::types::*;
