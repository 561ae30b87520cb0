//! Lines bucketed by rounded font size.

use std::collections::BTreeMap;

use crate::model::FontSize;

/// A qualifying line and the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedLine {
    pub text: String,
    pub page: u32,
}

/// Ordered mapping from rounded font size to the lines seen at that size.
///
/// Lines inside a bucket keep their insertion order; buckets are visited
/// from the largest size down.
#[derive(Debug, Clone, Default)]
pub struct SizeGroup {
    buckets: BTreeMap<FontSize, Vec<SizedLine>>,
}

impl SizeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the bucket for `size`.
    pub fn insert(&mut self, size: FontSize, text: String, page: u32) {
        self.buckets
            .entry(size)
            .or_default()
            .push(SizedLine { text, page });
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Distinct sizes, largest first.
    pub fn sizes_descending(&self) -> impl Iterator<Item = FontSize> + '_ {
        self.buckets.keys().rev().copied()
    }

    /// Lines recorded at `size`.
    pub fn bucket(&self, size: FontSize) -> &[SizedLine] {
        self.buckets.get(&size).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Consume the group into buckets ordered largest size first.
    pub fn into_ranked(self) -> impl Iterator<Item = (FontSize, Vec<SizedLine>)> {
        self.buckets.into_iter().rev()
    }
}
