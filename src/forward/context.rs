//! Query/consumption view over a parse.
//!
//! Mappers read occurrences through a [`ForwardContext`] and mark what they
//! translate as consumed. Consumed occurrences disappear from every later
//! query in the same resolution, and their tokens are dropped from the
//! passthrough list.

use std::collections::BTreeSet;

use super::parse::{FlagOccurrence, ParsedFlags};
use super::spec::FlagKey;

/// Mutable consumption state over an immutable [`ParsedFlags`].
#[derive(Debug)]
pub struct ForwardContext<'a> {
    parsed: &'a ParsedFlags,
    consumed: BTreeSet<usize>,
}

impl<'a> ForwardContext<'a> {
    pub fn new(parsed: &'a ParsedFlags) -> Self {
        Self {
            parsed,
            consumed: BTreeSet::new(),
        }
    }

    pub fn parsed(&self) -> &'a ParsedFlags {
        self.parsed
    }

    fn is_available(&self, occurrence: &FlagOccurrence) -> bool {
        occurrence
            .raw_indices
            .iter()
            .all(|index| !self.consumed.contains(index))
    }

    /// Every unconsumed occurrence of the given keys, in input order.
    pub fn all(&self, keys: &[FlagKey]) -> Vec<&'a FlagOccurrence> {
        self.parsed
            .occurrences
            .iter()
            .filter(|occ| keys.contains(&occ.key) && self.is_available(occ))
            .collect()
    }

    pub fn has(&self, keys: &[FlagKey]) -> bool {
        !self.all(keys).is_empty()
    }

    /// The last unconsumed occurrence among the given keys.
    pub fn latest(&self, keys: &[FlagKey]) -> Option<&'a FlagOccurrence> {
        self.all(keys).pop()
    }

    /// String value of [`latest`](Self::latest), if it carries one.
    pub fn latest_string(&self, keys: &[FlagKey]) -> Option<&'a str> {
        self.latest(keys).and_then(|occ| occ.value.as_str())
    }

    /// Marks every token of the given occurrences as consumed.
    pub fn consume(&mut self, occurrences: &[&FlagOccurrence]) {
        for occ in occurrences {
            self.consumed.extend(occ.raw_indices.iter().copied());
        }
    }

    /// Consumes and returns every unconsumed occurrence of the given keys.
    pub fn consume_keys(&mut self, keys: &[FlagKey]) -> Vec<&'a FlagOccurrence> {
        let found = self.all(keys);
        self.consume(&found);
        found
    }

    /// Consumes every occurrence of the given keys and returns the last one.
    ///
    /// Earlier repeats are discarded: they are consumed along with the last
    /// one ("last flag wins") and produce neither output nor passthrough.
    pub fn consume_latest(&mut self, keys: &[FlagKey]) -> Option<&'a FlagOccurrence> {
        self.consume_keys(keys).pop()
    }

    /// Consumes the given keys and reports whether any was present.
    pub fn consume_any_boolean(&mut self, keys: &[FlagKey]) -> bool {
        !self.consume_keys(keys).is_empty()
    }

    /// Consumes every occurrence that carries a string value and returns the
    /// values in input order. Switch occurrences are left alone.
    pub fn consume_all_strings(&mut self, keys: &[FlagKey]) -> Vec<String> {
        let found: Vec<&'a FlagOccurrence> = self
            .all(keys)
            .into_iter()
            .filter(|occ| occ.value.as_str().is_some())
            .collect();
        self.consume(&found);
        found
            .iter()
            .filter_map(|occ| occ.value.as_str())
            .map(str::to_string)
            .collect()
    }

    /// Like [`consume_all_strings`](Self::consume_all_strings), but also
    /// splits each value on commas, trimming and dropping empty items.
    ///
    /// An occurrence that yields no items (`--add-dir ","`) is not consumed.
    pub fn consume_all_csv_strings(&mut self, keys: &[FlagKey]) -> Vec<String> {
        let mut items = Vec::new();
        let mut used = Vec::new();
        for occ in self.all(keys) {
            let Some(value) = occ.value.as_str() else {
                continue;
            };
            let before = items.len();
            items.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string),
            );
            if items.len() > before {
                used.push(occ);
            }
        }
        self.consume(&used);
        items
    }

    /// The original tokens minus every consumed position, in order.
    pub fn passthrough_args(&self) -> Vec<String> {
        self.parsed
            .tokens
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.consumed.contains(index))
            .map(|(_, token)| token.clone())
            .collect()
    }

    /// Consumed positions, ascending.
    pub fn consumed_indices(&self) -> Vec<usize> {
        self.consumed.iter().copied().collect()
    }
}
