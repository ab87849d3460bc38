//! ReportBlock rendering

use std::fmt::Write;

use crate::frequency::FrequencyTable;

/// One file's rendered report, written to the destination as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    file_id: String,
    text: String,
}

impl ReportBlock {
    /// Render `table` under a header naming `file_id`
    ///
    /// Layout:
    /// ```text
    /// ********* Results of <file_id> *********
    /// a: <n>
    /// ...
    /// z: <n>
    ///
    /// ```
    pub fn render(file_id: &str, table: &FrequencyTable) -> Self {
        // header + 26 short lines + separator
        let mut text = String::with_capacity(file_id.len() + 64 + 26 * 12);
        let _ = writeln!(text, "********* Results of {} *********", file_id);
        for (letter, n) in table.iter() {
            let _ = writeln!(text, "{}: {}", letter, n);
        }
        text.push('\n');

        Self {
            file_id: file_id.to_string(),
            text,
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}
