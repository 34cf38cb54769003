//! Prompt construction for the extraction call.
//!
//! The output contract stated here is the single most load-bearing part of
//! the pipeline: the model must emit one delimited line per row, in a fixed
//! column order, with no header and no prose, using a delimiter that cannot
//! collide with thousands separators inside monetary text.

use crate::schema::{ColumnKind, ColumnSchema, Delimiter};

pub struct PromptBuilder {
    schema: ColumnSchema,
    delimiter: Delimiter,
    max_excerpt_chars: usize,
}

impl PromptBuilder {
    pub fn new(schema: ColumnSchema, delimiter: Delimiter, max_excerpt_chars: usize) -> Self {
        PromptBuilder {
            schema,
            delimiter,
            max_excerpt_chars,
        }
    }

    /// Standard extraction prompt for bank statement text.
    pub fn bank_statement(delimiter: Delimiter, max_excerpt_chars: usize) -> Self {
        PromptBuilder::new(ColumnSchema::bank_statement(), delimiter, max_excerpt_chars)
    }

    /// Extraction prompt for the logistics waybill variant.
    pub fn waybill(delimiter: Delimiter, max_excerpt_chars: usize) -> Self {
        PromptBuilder::new(ColumnSchema::waybill(), delimiter, max_excerpt_chars)
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Build the full instruction string for one document excerpt.
    ///
    /// Pure string construction; always succeeds.
    pub fn build(&self, extracted_text: &str) -> String {
        let delim = self.delimiter.as_char();
        let format_line = self
            .schema
            .columns
            .iter()
            .map(|col| col.name.as_str())
            .collect::<Vec<_>>()
            .join(&format!(" {} ", delim));

        let mut prompt = String::new();
        prompt.push_str(&format!(
            "Extract every data row from this text as {} fields per line.\n",
            self.schema.len()
        ));
        prompt.push_str(&format!(
            "Return ONLY raw data lines separated by {}.\n",
            self.delimiter.prompt_name()
        ));
        prompt.push_str("Do NOT return a header row.\n");
        prompt.push_str("Do NOT return explanations, commentary, or markdown code fences.\n");
        prompt.push_str("Do NOT use commas as field separators.\n");
        prompt.push_str(&format!("Format: {}\n", format_line));
        prompt.push_str("Rules:\n");
        for col in &self.schema.columns {
            if col.kind == ColumnKind::Amount {
                prompt.push_str(&format!("- If {} is empty/missing, put 0.\n", col.name));
            }
        }
        prompt.push_str("\nTEXT:\n");
        prompt.push_str(truncate_chars(extracted_text, self.max_excerpt_chars));
        prompt
    }
}

/// Truncate to at most `max_chars` characters, on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
