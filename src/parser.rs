//! Defensive parsing of the completion's raw text.
//!
//! The model response is treated as hostile input: it may open with prose,
//! wrap the data in markdown fences, restate the requested header, drop
//! trailing columns, or split a description on the delimiter character.
//! Individual malformed lines never fail the parse; only a response with no
//! usable rows at all is an error.

use log::{debug, warn};

use crate::error::{AuditError, Result};
use crate::schema::{ColumnSchema, Delimiter};

pub struct ResponseParser {
    schema: ColumnSchema,
    delimiter: Delimiter,
}

impl ResponseParser {
    pub fn new(schema: ColumnSchema, delimiter: Delimiter) -> Self {
        ResponseParser { schema, delimiter }
    }

    /// Turn raw completion text into an ordered sequence of field tuples,
    /// one per data row, mapped positionally to the schema.
    ///
    /// Returns `AuditError::EmptyExtraction` when no usable rows survive
    /// filtering: an empty statement is implausible and far more likely a
    /// structural failure in the model response, so it must be surfaced
    /// distinctly from a legitimate result.
    pub fn parse(&self, raw: &str) -> Result<Vec<Vec<String>>> {
        let delim = self.delimiter.as_char();
        let mut rows = Vec::new();
        let mut dropped = 0usize;

        for line in raw.lines() {
            // Lines without the delimiter are commentary, fences, or blanks.
            if !line.contains(delim) {
                continue;
            }

            // The model sometimes restates the requested format as a header
            // row despite instructions; never trust that it won't.
            if self.schema.is_header_line(line) {
                debug!("Discarding restated header line: {}", line.trim());
                continue;
            }

            let mut fields: Vec<String> = line
                .split(delim)
                .map(|f| f.trim().to_string())
                .collect();

            if fields.iter().all(|f| f.is_empty()) {
                dropped += 1;
                continue;
            }

            // Short row: the model dropped trailing columns. Pad with the
            // column-kind default rather than discarding the row.
            while fields.len() < self.schema.len() {
                let kind = self.schema.columns[fields.len()].kind;
                fields.push(kind.default_token().to_string());
            }

            // Long row: the model over-segmented (delimiter inside a free
            // text field). Positional truncation is the defined policy; no
            // quote-aware reassembly is attempted.
            fields.truncate(self.schema.len());

            rows.push(fields);
        }

        if dropped > 0 {
            warn!("Dropped {} delimiter-bearing lines with no usable fields", dropped);
        }

        if rows.is_empty() {
            return Err(AuditError::EmptyExtraction);
        }

        debug!("Parsed {} data rows from completion", rows.len());
        Ok(rows)
    }
}
