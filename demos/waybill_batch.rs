//! Convert a batch of logistics waybill texts into structured records.
//!
//! ```bash
//! GROQ_API_KEY=... cargo run --example waybill_batch --features groq
//! ```

use anyhow::{Context, Result};
use statement_auditor::llm::{GroqClient, SourceDocument, StatementAuditor};
use statement_auditor::AuditConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("GROQ_API_KEY").context("GROQ_API_KEY must be set")?;

    let auditor = StatementAuditor::new(GroqClient::new(api_key), AuditConfig::default());

    let documents = vec![
        SourceDocument::new(
            "waybill_0142.pdf",
            "WAYBILL No WB-0142  Date: 05/03/2025\n\
             Consignor: Dangote Cement Plc\n\
             Goods: 600 bags cement   Total: ₦450,000.00\n\
             Driver: E. Musa   Vehicle: KJA-112-XA",
        ),
        SourceDocument::new(
            "waybill_0143.pdf",
            "WAYBILL No WB-0143  Date: 06/03/2025\n\
             Consignor: Flour Mills of Nigeria\n\
             Goods: 320 bags flour   Total: ₦212,500.00\n\
             Driver: A. Bello   Vehicle: ABC-904-KJ",
        ),
    ];

    let outcomes = auditor.extract_waybill_batch(&documents, None).await;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(record) => println!(
                "{}: {} | {} | {} | {:.2}",
                outcome.document, record.date, record.waybill_number, record.vendor, record.amount
            ),
            Err(e) => println!("{}: FAILED: {}", outcome.document, e),
        }
    }

    Ok(())
}
