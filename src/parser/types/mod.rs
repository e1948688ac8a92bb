//! Structures that make up 7zip archives.
//! These are "low-level", meaning that they're meant to
//! reflect how data is stored in the archive, not provide a friendly interface to it.

mod coders_info;
mod files_info;
mod header;
mod property_id;
mod streams_info;
pub use coders_info::*;
pub use files_info::*;
pub use header::*;
pub use property_id::*;
pub use streams_info::*;

use bitvec::prelude::*;

/// An ordered sequence of booleans, packed MSB-first on the wire.
pub type BoolVector = BitVec<u8, Msb0>;

/// A list in which only some elements carry a value.
///
/// Stored the way 7zip stores it: one "defined" bit per element,
/// followed by the values of the defined elements only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefinedVec<T> {
    pub defined: BoolVector,
    pub values: Vec<T>,
}

impl<T: Copy> DefinedVec<T> {
    /// Every element is defined.
    pub fn all(values: Vec<T>) -> DefinedVec<T> {
        return DefinedVec {
            defined: BitVec::repeat(true, values.len()),
            values,
        };
    }

    pub fn from_options<It: IntoIterator<Item = Option<T>>>(items: It) -> DefinedVec<T> {
        let mut res = DefinedVec {
            defined: BoolVector::new(),
            values: Vec::new(),
        };
        for item in items {
            res.defined.push(item.is_some());
            if let Some(v) = item {
                res.values.push(v);
            }
        }
        return res;
    }

    /// Number of elements, defined or not.
    pub fn len(&self) -> usize {
        return self.defined.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.defined.is_empty();
    }

    pub fn all_defined(&self) -> bool {
        return self.defined.all();
    }

    pub fn get(&self, index: usize) -> Option<T> {
        if !self.defined.get(index).map(|b| *b).unwrap_or(false) {
            return None;
        }
        let rank = self.defined[..index].count_ones();
        return self.values.get(rank).copied();
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        let mut values = self.values.iter();
        return self
            .defined
            .iter()
            .by_vals()
            .map(move |d| if d { values.next().copied() } else { None });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackInfo {
    /// Offset of the first pack stream, relative to the end of the signature header.
    pub pack_pos: u64,
    pub sizes: Vec<u64>,
    pub digests: Option<DefinedVec<u32>>,
}

impl PackInfo {
    pub fn num_pack_streams(&self) -> usize {
        return self.sizes.len();
    }

    /// Offset of pack stream `index` relative to the end of the signature header,
    /// `None` if it overflows.
    pub fn stream_offset(&self, index: usize) -> Option<u64> {
        return self
            .sizes
            .iter()
            .take(index)
            .try_fold(self.pack_pos, |acc, &size| acc.checked_add(size));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveProperties {
    /// `(property type, data)` pairs.
    /// No property types are defined by the format, so the type byte is kept as-is.
    pub property_data: Vec<(u8, Vec<u8>)>,
}
