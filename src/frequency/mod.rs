//! Letter frequency counting
//!
//! Pure, per-file scanning. No shared state: every call builds and returns
//! its own table.

mod counter;
mod table;

pub use counter::{count_file, count_reader, CountError};
pub use table::{FrequencyTable, LETTER_COUNT};
