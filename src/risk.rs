//! Rule-based risk scoring over the normalized record sequence.
//!
//! Evaluation is a pure function of the records, the declared salary, and
//! the policy. Flags are emitted in record order, never severity-sorted,
//! and an empty sequence yields zero flags and a zero summary rather than
//! an error.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::schema::TransactionRecord;

/// Tunable thresholds for the two screening rules.
///
/// The turnover heuristic is a blunt proxy with no agreed false-positive
/// tolerance, so both its multiplier and its very presence are policy:
/// `None` removes the rule entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// A credit above `declared_salary * lump_sum_multiplier` without a
    /// salary reference in its description is flagged.
    pub lump_sum_multiplier: f64,
    /// Total inflow above `closing_balance * turnover_multiplier` flags the
    /// whole statement once.
    pub turnover_multiplier: Option<f64>,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        RiskPolicy {
            lump_sum_multiplier: 3.0,
            turnover_multiplier: Some(5.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagKind {
    LumpSum,
    TurnoverRisk,
}

/// One audit finding, referencing the offending record where applicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub kind: FlagKind,
    pub message: String,
    /// Index into the record sequence; `None` for statement-level flags.
    pub record: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_inflow: f64,
    pub closing_balance: f64,
}

/// Everything the pipeline hands to the presenting caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub records: Vec<TransactionRecord>,
    pub flags: Vec<Flag>,
    pub summary: AuditSummary,
}

pub struct RiskEngine {
    policy: RiskPolicy,
}

impl RiskEngine {
    pub fn new(policy: RiskPolicy) -> Self {
        RiskEngine { policy }
    }

    /// Evaluate the record sequence against the declared salary.
    ///
    /// Reads the records only; assumes sequence order is chronological as
    /// extracted (the turnover rule takes the last record as the closing
    /// entry).
    pub fn evaluate(&self, records: &[TransactionRecord], declared_salary: f64) -> (Vec<Flag>, AuditSummary) {
        let mut flags = Vec::new();

        let lump_sum_threshold = declared_salary * self.policy.lump_sum_multiplier;
        for (idx, record) in records.iter().enumerate() {
            if record.credit > lump_sum_threshold && !mentions_salary(&record.description) {
                flags.push(Flag {
                    kind: FlagKind::LumpSum,
                    message: format!(
                        "Lump sum credit of {:.2} on {} exceeds {:.2} (declared salary x {})",
                        record.credit, record.date, lump_sum_threshold, self.policy.lump_sum_multiplier
                    ),
                    record: Some(idx),
                });
            }
        }

        let summary = AuditSummary {
            total_inflow: records.iter().map(|r| r.credit).sum(),
            closing_balance: records.last().map(|r| r.balance).unwrap_or(0.0),
        };

        if let Some(multiplier) = self.policy.turnover_multiplier {
            if summary.closing_balance > 0.0
                && summary.total_inflow > summary.closing_balance * multiplier
            {
                flags.push(Flag {
                    kind: FlagKind::TurnoverRisk,
                    message: format!(
                        "Total inflow of {:.2} exceeds {}x the closing balance of {:.2}; funds appear to pass through rather than accumulate",
                        summary.total_inflow, multiplier, summary.closing_balance
                    ),
                    record: None,
                });
            }
        }

        debug!(
            "Risk evaluation: {} records, {} flags, inflow {:.2}, closing {:.2}",
            records.len(),
            flags.len(),
            summary.total_inflow,
            summary.closing_balance
        );

        (flags, summary)
    }
}

fn mentions_salary(description: &str) -> bool {
    description.to_uppercase().contains("SALARY")
}
