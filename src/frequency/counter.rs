//! Counter — scan one file into a FrequencyTable
//!
//! The file handle lives only inside `count_file`; it is released on every
//! return path when it goes out of scope.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::FrequencyTable;

const READ_BUF_SIZE: usize = 8 * 1024;

/// Errors that can occur while counting one file
#[derive(Error, Debug)]
pub enum CountError {
    #[error("Error opening file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Count letter occurrences in the file at `path`
///
/// # Returns
/// * `Ok(FrequencyTable)` - Counts for every letter byte read before EOF
/// * `Err(CountError::Open)` - File could not be opened
/// * `Err(CountError::Read)` - Read failed part-way through
pub fn count_file(path: &Path) -> Result<FrequencyTable, CountError> {
    let file = File::open(path).map_err(|source| CountError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    count_reader(file).map_err(|source| CountError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Count letter occurrences in everything `reader` yields until EOF
pub fn count_reader<R: Read>(mut reader: R) -> io::Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    let mut buf = [0u8; READ_BUF_SIZE];

    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(table),
            Ok(n) => table.record_all(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
