//! Audit a bank statement's extracted text end-to-end against Groq.
//!
//! ```bash
//! GROQ_API_KEY=... cargo run --example audit_statement --features groq
//! ```

use anyhow::{Context, Result};
use statement_auditor::llm::{AuditEvent, GroqClient, StatementAuditor};
use statement_auditor::AuditConfig;

const SAMPLE_STATEMENT_TEXT: &str = "\
ACME BANK PLC — STATEMENT OF ACCOUNT
Account: 0123456789  Period: 01/01/2025 - 31/01/2025

01/01/2025  SALARY JANUARY            250,000.00 CR              310,450.00
05/01/2025  TRANSFER FROM B. OKAFOR   900,000.00 CR            1,210,450.00
09/01/2025  POS PURCHASE SHOPRITE                  45,000.00   1,165,450.00
14/01/2025  ATM WITHDRAWAL                        100,000.00   1,065,450.00
";

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("GROQ_API_KEY").context("GROQ_API_KEY must be set")?;
    let declared_salary = 250_000.0;

    let auditor = StatementAuditor::new(GroqClient::new(api_key), AuditConfig::default());

    let (tx, mut rx) = tokio::sync::mpsc::channel::<AuditEvent>(16);
    let progress = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("[progress] {:?}", event);
        }
    });

    let report = auditor
        .audit_text("sample_statement.pdf", SAMPLE_STATEMENT_TEXT, declared_salary, Some(&tx))
        .await?;
    drop(tx);
    progress.await?;

    println!("\n{} records extracted", report.records.len());
    for record in &report.records {
        println!(
            "  {}  {:<30}  credit {:>12.2}  debit {:>12.2}  balance {:>12.2}",
            record.date, record.description, record.credit, record.debit, record.balance
        );
    }

    println!("\nTotal inflow:    {:.2}", report.summary.total_inflow);
    println!("Closing balance: {:.2}", report.summary.closing_balance);

    if report.flags.is_empty() {
        println!("\nClean sheet. No flags raised.");
    } else {
        println!("\nAudit flags:");
        for flag in &report.flags {
            println!("  [{:?}] {}", flag.kind, flag.message);
        }
    }

    Ok(())
}
