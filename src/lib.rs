//! # Statement Auditor
//!
//! A library for extracting structured transaction records from free-text
//! bank statements (and, in a variant, logistics waybills) by combining
//! externally-extracted document text with an LLM completion call, then
//! applying a rule-based risk-scoring pass over the result.
//!
//! ## Core Concepts
//!
//! - **Completion as hostile input**: the model's response is coerced into a
//!   well-typed table with an explicit default for every field; column
//!   count, delimiter fidelity, and header absence are never trusted
//! - **Delimiter discipline**: pipe or tab, never comma, so thousands
//!   separators inside monetary text cannot shift column alignment
//! - **Field-level fail-safe**: a corrupted amount token degrades to 0.0
//!   rather than aborting the record or the batch
//! - **Risk flags**: lump-sum credits out of proportion to declared salary,
//!   and optionally high turnover relative to the retained closing balance
//!
//! ## Example
//!
//! ```rust
//! use statement_auditor::{audit_completion, AuditConfig};
//!
//! let completion = "01/01 | SALARY JAN | 500000 | 0 | 500000\n\
//!                   02/01 | GIFT | 800000 | 0 | 1300000";
//!
//! let report = audit_completion(completion, 200_000.0, &AuditConfig::default()).unwrap();
//! assert_eq!(report.records.len(), 2);
//! assert_eq!(report.summary.total_inflow, 1_300_000.0);
//! ```
//!
//! The network-facing pipeline (`StatementAuditor`, `GroqClient`) lives in
//! the [`llm`] module behind the `groq` feature; everything above is plain
//! synchronous code with no service dependency.

pub mod error;
pub mod normalize;
pub mod parser;
pub mod prompt;
pub mod risk;
pub mod schema;

#[cfg(feature = "groq")]
pub mod llm;

pub use error::{AuditError, Result};
pub use normalize::{clean_money, normalize_record, normalize_waybill};
pub use parser::ResponseParser;
pub use prompt::PromptBuilder;
pub use risk::{AuditReport, AuditSummary, Flag, FlagKind, RiskEngine, RiskPolicy};
pub use schema::{
    AuditConfig, Column, ColumnKind, ColumnSchema, Delimiter, TransactionRecord, WaybillRecord,
};

use log::{debug, info};

/// Run the synchronous core over a raw completion text: parse the delimited
/// rows, normalize each into a [`TransactionRecord`], and evaluate the risk
/// rules against the declared salary.
///
/// This is the whole pipeline minus the completion call itself, so it is
/// also the seam used to audit canned or replayed completions in tests.
pub fn audit_completion(
    raw_completion: &str,
    declared_salary: f64,
    config: &AuditConfig,
) -> Result<AuditReport> {
    let parser = ResponseParser::new(ColumnSchema::bank_statement(), config.delimiter);
    let rows = parser.parse(raw_completion)?;

    let records: Vec<TransactionRecord> = rows.iter().map(|row| normalize_record(row)).collect();
    debug!("Normalized {} transaction records", records.len());

    let engine = RiskEngine::new(config.risk.clone());
    let (flags, summary) = engine.evaluate(&records, declared_salary);

    info!(
        "Audit complete: {} records, {} flags, total inflow {:.2}",
        records.len(),
        flags.len(),
        summary.total_inflow
    );

    Ok(AuditReport {
        records,
        flags,
        summary,
    })
}

/// Parse and normalize a waybill extraction completion (logistics variant).
///
/// Waybill prompts ask for a single record per document; if the model emits
/// several candidate lines the first is taken.
pub fn extract_waybill_record(raw_completion: &str, config: &AuditConfig) -> Result<WaybillRecord> {
    let parser = ResponseParser::new(ColumnSchema::waybill(), config.delimiter);
    let rows = parser.parse(raw_completion)?;
    Ok(normalize_waybill(&rows[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab_config() -> AuditConfig {
        AuditConfig {
            delimiter: Delimiter::Tab,
            ..AuditConfig::default()
        }
    }

    #[test]
    fn test_end_to_end_lump_sum_scenario() {
        let completion = "01/01\tSALARY\t500000\t0\t500000\n02/01\tGIFT\t800000\t0\t1300000";
        let report = audit_completion(completion, 200_000.0, &tab_config()).unwrap();

        // Threshold is 600000: the salary credit sits below it, the gift is
        // above it and carries no salary reference.
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.flags.len(), 1);
        assert_eq!(report.flags[0].kind, FlagKind::LumpSum);
        assert_eq!(report.flags[0].record, Some(1));
        assert!(report.flags[0].message.contains("800000.00"));
        assert!(report.flags[0].message.contains("02/01"));
        assert_eq!(report.summary.total_inflow, 1_300_000.0);
        assert_eq!(report.summary.closing_balance, 1_300_000.0);
    }

    #[test]
    fn test_end_to_end_no_delimiter_lines_is_empty_extraction() {
        let completion = "Unfortunately I could not locate a transaction table in this text.";
        let err = audit_completion(completion, 200_000.0, &AuditConfig::default()).unwrap_err();
        assert!(matches!(err, AuditError::EmptyExtraction));
    }

    #[test]
    fn test_end_to_end_short_row_is_default_padded() {
        let completion = "03/01\tREFUND\t1200000";
        let config = AuditConfig {
            risk: RiskPolicy {
                turnover_multiplier: None,
                ..RiskPolicy::default()
            },
            ..tab_config()
        };
        let report = audit_completion(completion, 1_000_000.0, &config).unwrap();

        let record = &report.records[0];
        assert_eq!(record.credit, 1_200_000.0);
        assert_eq!(record.debit, 0.0);
        assert_eq!(record.balance, 0.0);
    }

    #[test]
    fn test_waybill_extraction_takes_first_row() {
        let completion = "05/03 | WB-2211 | Dangote Cement | ₦450,000\n05/03 | WB-2211 | duplicate | 1";
        let record = extract_waybill_record(completion, &AuditConfig::default()).unwrap();
        assert_eq!(record.waybill_number, "WB-2211");
        assert_eq!(record.amount, 450_000.0);
    }
}
