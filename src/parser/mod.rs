//! Parsing of the 7zip header structures.
//!
//! `types` holds the raw structures, `parsers` the nom parsers producing them
//! and `interface` a friendlier per-file view on top.

pub mod crc;
pub mod err;
pub mod interface;
pub mod parsers;
pub mod types;

pub use err::*;
pub use interface::*;
