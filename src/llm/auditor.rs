use log::{info, warn};
use tokio::sync::mpsc::Sender;

use crate::error::{AuditError, Result};
use crate::llm::client::CompletionBackend;
use crate::llm::types::{AuditEvent, SourceDocument};
use crate::prompt::PromptBuilder;
use crate::risk::AuditReport;
use crate::schema::{AuditConfig, WaybillRecord};
use crate::{audit_completion, extract_waybill_record};

/// Outcome of one document in a batch. A failed document is reported here
/// and the batch moves on; it never aborts the remaining items.
#[derive(Debug)]
pub struct DocumentOutcome<T> {
    pub document: String,
    pub result: Result<T>,
}

/// The full document-to-report pipeline: extractable-text gate, prompt
/// construction, completion call, defensive parse, normalization, and risk
/// evaluation.
pub struct StatementAuditor<C> {
    client: C,
    config: AuditConfig,
}

impl<C: CompletionBackend> StatementAuditor<C> {
    pub fn new(client: C, config: AuditConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit one statement's extracted text against a declared salary.
    pub async fn audit_text(
        &self,
        document: &str,
        text: &str,
        declared_salary: f64,
        progress: Option<&Sender<AuditEvent>>,
    ) -> Result<AuditReport> {
        self.check_extractable(text)?;

        self.send_event(
            progress,
            AuditEvent::Analyzing {
                document: document.to_string(),
            },
        )
        .await;

        let prompt = PromptBuilder::bank_statement(self.config.delimiter, self.config.max_prompt_chars)
            .build(text);
        let raw = self.client.complete(&self.config.model, &prompt).await?;

        let report = audit_completion(&raw, declared_salary, &self.config)?;

        self.send_event(
            progress,
            AuditEvent::Parsed {
                document: document.to_string(),
                rows: report.records.len(),
            },
        )
        .await;

        Ok(report)
    }

    /// Audit a batch of statements sequentially and independently.
    ///
    /// Every document produces a [`DocumentOutcome`]; a failure is recorded
    /// for that item and processing continues with the next one. Progress is
    /// reported incrementally as each item completes.
    pub async fn audit_batch(
        &self,
        documents: &[SourceDocument],
        declared_salary: f64,
        progress: Option<&Sender<AuditEvent>>,
    ) -> Vec<DocumentOutcome<AuditReport>> {
        self.send_event(progress, AuditEvent::Starting).await;
        info!("Auditing batch of {} documents", documents.len());

        let mut outcomes = Vec::with_capacity(documents.len());
        for doc in documents {
            let result = self
                .audit_text(&doc.name, &doc.text, declared_salary, progress)
                .await;
            self.report_outcome(&doc.name, &result, progress).await;
            outcomes.push(DocumentOutcome {
                document: doc.name.clone(),
                result,
            });
        }
        outcomes
    }

    /// Extract a single waybill record from one logistics document.
    pub async fn extract_waybill(
        &self,
        document: &str,
        text: &str,
        progress: Option<&Sender<AuditEvent>>,
    ) -> Result<WaybillRecord> {
        self.check_extractable(text)?;

        self.send_event(
            progress,
            AuditEvent::Analyzing {
                document: document.to_string(),
            },
        )
        .await;

        let prompt = PromptBuilder::waybill(self.config.delimiter, self.config.max_prompt_chars)
            .build(text);
        let raw = self.client.complete(&self.config.model, &prompt).await?;

        extract_waybill_record(&raw, &self.config)
    }

    /// Process a batch of logistics documents, one waybill record each.
    pub async fn extract_waybill_batch(
        &self,
        documents: &[SourceDocument],
        progress: Option<&Sender<AuditEvent>>,
    ) -> Vec<DocumentOutcome<WaybillRecord>> {
        self.send_event(progress, AuditEvent::Starting).await;

        let mut outcomes = Vec::with_capacity(documents.len());
        for doc in documents {
            let result = self.extract_waybill(&doc.name, &doc.text, progress).await;
            self.report_outcome(&doc.name, &result, progress).await;
            outcomes.push(DocumentOutcome {
                document: doc.name.clone(),
                result,
            });
        }
        outcomes
    }

    /// Below the configured floor the document is assumed to be a scanned
    /// image rather than digital text.
    fn check_extractable(&self, text: &str) -> Result<()> {
        let got = text.chars().count();
        if got < self.config.min_text_chars {
            return Err(AuditError::NoExtractableText {
                got,
                min: self.config.min_text_chars,
            });
        }
        Ok(())
    }

    async fn report_outcome<T>(
        &self,
        document: &str,
        result: &Result<T>,
        progress: Option<&Sender<AuditEvent>>,
    ) {
        match result {
            Ok(_) => {
                self.send_event(
                    progress,
                    AuditEvent::Completed {
                        document: document.to_string(),
                    },
                )
                .await;
            }
            Err(e) => {
                warn!("Document '{}' failed: {}", document, e);
                self.send_event(
                    progress,
                    AuditEvent::Failed {
                        document: document.to_string(),
                        reason: e.to_string(),
                    },
                )
                .await;
            }
        }
    }

    async fn send_event(&self, sender: Option<&Sender<AuditEvent>>, event: AuditEvent) {
        if let Some(tx) = sender {
            let _ = tx.send(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::FlagKind;
    use crate::schema::Delimiter;

    /// Backend returning a canned completion regardless of prompt.
    struct MockBackend {
        response: String,
    }

    impl MockBackend {
        fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
            }
        }
    }

    impl CompletionBackend for MockBackend {
        async fn complete(&self, _model: &str, _prompt: &str) -> Result<String> {
            Ok(self.response.clone())
        }
    }

    /// Backend that always reports the service as unreachable.
    struct UnavailableBackend;

    impl CompletionBackend for UnavailableBackend {
        async fn complete(&self, _model: &str, _prompt: &str) -> Result<String> {
            Err(AuditError::CompletionUnavailable(
                "connection refused".to_string(),
            ))
        }
    }

    fn statement_text() -> String {
        "ACME BANK PLC — STATEMENT OF ACCOUNT\nPeriod: 01/01 - 31/01\n".repeat(3)
    }

    #[tokio::test]
    async fn test_audit_text_end_to_end_with_mock_backend() {
        let completion = "Here you go:\n\
                          01/01 | SALARY JAN | 500,000 | 0 | 500,000\n\
                          02/01 | GIFT | ₦800,000 | 0 | 1,300,000";
        let auditor = StatementAuditor::new(MockBackend::new(completion), AuditConfig::default());

        let report = auditor
            .audit_text("statement.pdf", &statement_text(), 200_000.0, None)
            .await
            .unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.flags.len(), 1);
        assert_eq!(report.flags[0].kind, FlagKind::LumpSum);
        assert_eq!(report.summary.closing_balance, 1_300_000.0);
    }

    #[tokio::test]
    async fn test_short_text_is_rejected_before_any_completion_call() {
        let auditor = StatementAuditor::new(
            MockBackend::new("01/01 | A | 1 | 0 | 1"),
            AuditConfig::default(),
        );
        let err = auditor
            .audit_text("scan.pdf", "scanned image", 200_000.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::NoExtractableText { .. }));
    }

    #[tokio::test]
    async fn test_batch_continues_past_failing_document() {
        let auditor = StatementAuditor::new(UnavailableBackend, AuditConfig::default());
        let documents = vec![
            SourceDocument::new("a.pdf", statement_text()),
            SourceDocument::new("b.pdf", statement_text()),
        ];

        let outcomes = auditor.audit_batch(&documents, 200_000.0, None).await;

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(matches!(
                outcome.result,
                Err(AuditError::CompletionUnavailable(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_batch_reports_progress_per_document() {
        let completion = "01/01 | TRANSFER | 10,000 | 0 | 10,000";
        let auditor = StatementAuditor::new(MockBackend::new(completion), AuditConfig::default());
        let documents = vec![
            SourceDocument::new("a.pdf", statement_text()),
            SourceDocument::new("b.pdf", "too short"),
        ];

        let (tx, mut rx) = tokio::sync::mpsc::channel(32);
        let outcomes = auditor.audit_batch(&documents, 200_000.0, Some(&tx)).await;
        drop(tx);

        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert!(matches!(events[0], AuditEvent::Starting));
        assert!(events
            .iter()
            .any(|e| matches!(e, AuditEvent::Completed { document } if document == "a.pdf")));
        assert!(events
            .iter()
            .any(|e| matches!(e, AuditEvent::Failed { document, .. } if document == "b.pdf")));
    }

    #[tokio::test]
    async fn test_unusable_completion_surfaces_empty_extraction() {
        let auditor = StatementAuditor::new(
            MockBackend::new("No transactions were found in the supplied text."),
            AuditConfig::default(),
        );
        let err = auditor
            .audit_text("statement.pdf", &statement_text(), 200_000.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::EmptyExtraction));
    }

    #[tokio::test]
    async fn test_waybill_batch_with_mock_backend() {
        let completion = "05/03 | WB-2211 | Dangote Cement | ₦450,000";
        let config = AuditConfig {
            delimiter: Delimiter::Pipe,
            ..AuditConfig::default()
        };
        let auditor = StatementAuditor::new(MockBackend::new(completion), config);

        let documents = vec![SourceDocument::new(
            "waybill_03.pdf",
            "WAYBILL — Dangote Cement Plc, consignment details follow ...".repeat(2),
        )];
        let outcomes = auditor.extract_waybill_batch(&documents, None).await;

        let record = outcomes[0].result.as_ref().unwrap();
        assert_eq!(record.vendor, "Dangote Cement");
        assert_eq!(record.amount, 450_000.0);
    }
}
