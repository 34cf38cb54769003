use serde::{Deserialize, Serialize};

use crate::risk::RiskPolicy;

/// A single extracted bank transaction.
///
/// All five fields are always present once a record leaves the normalizer:
/// textual fields default to their pass-through values and amount fields
/// default to 0.0. `date` is an opaque label: formats vary wildly between
/// source statements and no calendar parsing is attempted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub description: String,
    pub credit: f64,
    pub debit: f64,
    pub balance: f64,
}

/// A single extracted logistics waybill (one per document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaybillRecord {
    pub date: String,
    pub waybill_number: String,
    pub vendor: String,
    pub amount: f64,
}

/// Field delimiter the model is instructed to emit.
///
/// Commas are deliberately not an option: monetary text carries thousands
/// separators ("1,000.00") and a comma delimiter silently shifts column
/// alignment on exactly the rows that matter most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    Pipe,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Pipe => '|',
            Delimiter::Tab => '\t',
        }
    }

    /// How the delimiter is named in the prompt sent to the model.
    pub fn prompt_name(self) -> &'static str {
        match self {
            Delimiter::Pipe => "PIPES (|)",
            Delimiter::Tab => "TABS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Amount,
}

impl ColumnKind {
    /// Token substituted for a structurally absent field.
    pub fn default_token(self) -> &'static str {
        match self {
            ColumnKind::Text => "-",
            ColumnKind::Amount => "0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn text(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            kind: ColumnKind::Text,
        }
    }

    pub fn amount(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            kind: ColumnKind::Amount,
        }
    }
}

/// Ordered column layout the model is asked to produce and the parser maps
/// fields against positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub columns: Vec<Column>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        ColumnSchema { columns }
    }

    /// Date | Description | Credit_Amount | Debit_Amount | Balance
    pub fn bank_statement() -> Self {
        ColumnSchema::new(vec![
            Column::text("Date"),
            Column::text("Description"),
            Column::amount("Credit_Amount"),
            Column::amount("Debit_Amount"),
            Column::amount("Balance"),
        ])
    }

    /// Date | Waybill_Number | Vendor_Name | Total_Amount
    pub fn waybill() -> Self {
        ColumnSchema::new(vec![
            Column::text("Date"),
            Column::text("Waybill_Number"),
            Column::text("Vendor_Name"),
            Column::amount("Total_Amount"),
        ])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True if the line restates every column name, i.e. the model echoing the
    /// requested format back as a header row despite instructions not to.
    pub fn is_header_line(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.columns
            .iter()
            .all(|col| lower.contains(&col.name.to_lowercase()))
    }
}

/// Configuration for one pipeline deployment.
///
/// Passed explicitly into the pipeline entry points; nothing in the core
/// reads ambient or global state, so the whole pipeline is testable without
/// a live completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Model identifier forwarded verbatim to the completion service.
    pub model: String,
    pub delimiter: Delimiter,
    /// Character budget for the document excerpt embedded in the prompt.
    pub max_prompt_chars: usize,
    /// Below this many characters the document is treated as a scanned
    /// image rather than digital text.
    pub min_text_chars: usize,
    pub risk: RiskPolicy,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            model: "llama-3.1-8b-instant".to_string(),
            delimiter: Delimiter::Pipe,
            max_prompt_chars: 6000,
            min_text_chars: 50,
            risk: RiskPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_statement_schema_shape() {
        let schema = ColumnSchema::bank_statement();
        assert_eq!(schema.len(), 5);
        assert_eq!(schema.columns[0].kind, ColumnKind::Text);
        assert_eq!(schema.columns[2].kind, ColumnKind::Amount);
        assert_eq!(schema.columns[4].name, "Balance");
    }

    #[test]
    fn test_header_line_detection_is_case_insensitive() {
        let schema = ColumnSchema::bank_statement();
        assert!(schema.is_header_line("date | description | credit_amount | debit_amount | balance"));
        assert!(schema.is_header_line("Date|Description|Credit_Amount|Debit_Amount|Balance"));
        assert!(!schema.is_header_line("01/01 | SALARY JAN | 500000 | 0 | 500000"));
    }

    #[test]
    fn test_default_tokens() {
        assert_eq!(ColumnKind::Text.default_token(), "-");
        assert_eq!(ColumnKind::Amount.default_token(), "0");
    }

    #[test]
    fn test_delimiter_never_comma() {
        assert_ne!(Delimiter::Pipe.as_char(), ',');
        assert_ne!(Delimiter::Tab.as_char(), ',');
    }
}
