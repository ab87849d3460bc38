//! FrequencyTable — 26 case-folded letter buckets

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of buckets (a–z)
pub const LETTER_COUNT: usize = 26;

/// Occurrence counts for the ASCII letters a–z, case-insensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: [u64; LETTER_COUNT],
}

impl FrequencyTable {
    /// Create a zeroed table
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one byte into the table.
    ///
    /// Returns `true` if the byte was an ASCII letter and was counted.
    pub fn record(&mut self, byte: u8) -> bool {
        match bucket(byte) {
            Some(idx) => {
                self.counts[idx] += 1;
                true
            }
            None => false,
        }
    }

    /// Fold every byte of `bytes` into the table
    pub fn record_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.record(b);
        }
    }

    /// Count for `letter` (either case). Non-letters yield 0.
    pub fn count(&self, letter: char) -> u64 {
        if !letter.is_ascii() {
            return 0;
        }
        bucket(letter as u8).map(|idx| self.counts[idx]).unwrap_or(0)
    }

    /// Sum of all buckets
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(letter, count)` pairs in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(idx, &n)| ((b'a' + idx as u8) as char, n))
    }
}

fn bucket(byte: u8) -> Option<usize> {
    if byte.is_ascii_alphabetic() {
        Some((byte.to_ascii_lowercase() - b'a') as usize)
    } else {
        None
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LETTER_COUNT))?;
        for (letter, n) in self.iter() {
            map.serialize_entry(&letter, &n)?;
        }
        map.end()
    }
}
