//! Concurrent batch processing
//!
//! Documents are analysed on the blocking pool, bounded by a semaphore and
//! a per-document timeout. Results come back in input order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use decisio_core::{AnalysisStore, BatchConfig, DecisioError, DocumentAnalysis, Result};

use crate::DocumentPipeline;

/// One document to analyse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDocument {
    pub id: String,
    pub text: String,
}

impl BatchDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A document whose analysis failed or timed out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub document_id: String,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<BatchFailure>,
    pub analyses: Vec<DocumentAnalysis>,
    pub elapsed_ms: u64,
}

impl BatchReport {
    /// Add documents that failed before analysis, such as unreadable files
    pub fn with_failures(mut self, failures: Vec<BatchFailure>) -> Self {
        self.total += failures.len();
        self.failures.extend(failures);
        self.failed = self.failures.len();
        self
    }

    pub fn summary(&self) -> String {
        format!(
            "{} documents: {} succeeded, {} failed in {} ms",
            self.total, self.succeeded, self.failed, self.elapsed_ms
        )
    }
}

/// Runs a [`DocumentPipeline`] over many documents concurrently
pub struct BatchProcessor {
    pipeline: Arc<DocumentPipeline>,
    concurrency: usize,
    timeout: Duration,
}

impl BatchProcessor {
    pub fn new(pipeline: Arc<DocumentPipeline>, config: &BatchConfig) -> Self {
        Self {
            pipeline,
            concurrency: config.concurrency.max(1),
            timeout: Duration::from_secs(config.document_timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Analyse every document. Failures and timeouts are collected in the
    /// report and never stop the batch.
    pub async fn run(&self, documents: Vec<BatchDocument>) -> BatchReport {
        let start_time = Instant::now();
        let total = documents.len();
        tracing::info!(documents = total, concurrency = self.concurrency, "batch started");

        let limiter = Arc::new(Semaphore::new(self.concurrency));
        let handles: Vec<_> = documents
            .into_iter()
            .map(|document| {
                let limiter = limiter.clone();
                let pipeline = self.pipeline.clone();
                let timeout = self.timeout;
                tokio::spawn(async move {
                    let id = document.id.clone();
                    let result = process_one(limiter, pipeline, document, timeout).await;
                    (id, result)
                })
            })
            .collect();

        let mut report = BatchReport {
            total,
            ..Default::default()
        };
        for (index, joined) in futures::future::join_all(handles).await.into_iter().enumerate() {
            let (document_id, result) = match joined {
                Ok(pair) => pair,
                Err(e) => (format!("#{index}"), Err(DecisioError::Task(e.to_string()))),
            };
            match result {
                Ok(analysis) => report.analyses.push(analysis),
                Err(e) => {
                    tracing::warn!(document_id = %document_id, error = %e, "document failed");
                    report.failures.push(BatchFailure {
                        document_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        report.succeeded = report.analyses.len();
        report.failed = report.failures.len();
        report.elapsed_ms = start_time.elapsed().as_millis() as u64;
        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed,
            elapsed_ms = report.elapsed_ms,
            "batch completed"
        );
        report
    }

    /// Run the batch and persist every successful analysis
    pub async fn run_and_store(&self, documents: Vec<BatchDocument>, store: &dyn AnalysisStore) -> Result<BatchReport> {
        let report = self.run(documents).await;
        for analysis in &report.analyses {
            store.save(analysis).await?;
        }
        Ok(report)
    }
}

async fn process_one(
    limiter: Arc<Semaphore>,
    pipeline: Arc<DocumentPipeline>,
    document: BatchDocument,
    timeout: Duration,
) -> Result<DocumentAnalysis> {
    let permit = limiter
        .acquire_owned()
        .await
        .map_err(|e| DecisioError::Task(e.to_string()))?;

    let document_id = document.id.clone();
    // the permit is released when the analysis finishes, not when we stop waiting for it
    let work = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        pipeline.process(&document.id, &document.text)
    });

    match tokio::time::timeout(timeout, work).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(DecisioError::Task(join_error.to_string())),
        // the blocking task keeps its permit until done; its result is discarded
        Err(_) => Err(DecisioError::Timeout {
            document_id,
            secs: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use decisio_core::{AppConfig, InMemoryAnalysisStore, SummaryResult, Summarizer};

    struct SlowSummarizer(Duration);

    impl Summarizer for SlowSummarizer {
        fn summarize(&self, _text: &str, _max_sentences: usize, _method: &str) -> Result<SummaryResult> {
            std::thread::sleep(self.0);
            Ok(SummaryResult::empty("slow"))
        }
    }

    /// Sleeps and records the highest number of overlapping calls
    #[derive(Default)]
    struct CountingSummarizer {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl Summarizer for CountingSummarizer {
        fn summarize(&self, _text: &str, _max_sentences: usize, _method: &str) -> Result<SummaryResult> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(150));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(SummaryResult::empty("slow"))
        }
    }

    fn documents() -> Vec<BatchDocument> {
        vec![
            BatchDocument::new("a", "Julgo procedente o pedido de horas extras."),
            BatchDocument::new("b", "   "),
            BatchDocument::new("c", "Julgo improcedente o pedido de danos morais."),
        ]
    }

    fn processor() -> BatchProcessor {
        let pipeline = Arc::new(DocumentPipeline::default());
        BatchProcessor::new(pipeline, &BatchConfig::default()).with_concurrency(2)
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order_and_collects_failures() {
        let report = processor().run(documents()).await;

        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.analyses[0].document_id, "a");
        assert_eq!(report.analyses[1].document_id, "c");
        assert_eq!(report.failures[0].document_id, "b");
        assert!(report.summary().starts_with("3 documents: 2 succeeded, 1 failed"));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let report = processor().run(Vec::new()).await;
        assert_eq!(report.total, 0);
        assert!(report.analyses.is_empty());
    }

    #[tokio::test]
    async fn test_slow_documents_time_out() {
        let pipeline = DocumentPipeline::new(&AppConfig::default())
            .with_summarizer(Arc::new(SlowSummarizer(Duration::from_millis(500))));
        let processor = BatchProcessor::new(Arc::new(pipeline), &BatchConfig::default())
            .with_timeout(Duration::from_millis(50));

        let report = processor
            .run(vec![BatchDocument::new("slow", "Julgo procedente o pedido.")])
            .await;

        assert_eq!(report.failed, 1);
        assert!(report.failures[0].error.contains("timed out"), "{}", report.failures[0].error);
    }

    #[tokio::test]
    async fn test_timed_out_documents_keep_the_concurrency_bound() {
        let summarizer = Arc::new(CountingSummarizer::default());
        let pipeline = DocumentPipeline::new(&AppConfig::default()).with_summarizer(summarizer.clone());
        let processor = BatchProcessor::new(Arc::new(pipeline), &BatchConfig::default())
            .with_concurrency(1)
            .with_timeout(Duration::from_millis(30));

        let documents = (0..4)
            .map(|i| BatchDocument::new(format!("doc-{i}"), "Julgo procedente o pedido."))
            .collect();
        let report = processor.run(documents).await;

        assert_eq!(report.failed, 4);
        assert_eq!(summarizer.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_failures_updates_counts() {
        let report = BatchReport {
            total: 2,
            succeeded: 1,
            failed: 1,
            failures: vec![BatchFailure {
                document_id: "b".to_string(),
                error: "Input text is empty".to_string(),
            }],
            ..Default::default()
        }
        .with_failures(vec![BatchFailure {
            document_id: "c".to_string(),
            error: "failed to read c.txt".to_string(),
        }]);

        assert_eq!(report.total, 3);
        assert_eq!(report.failed, 2);
        assert_eq!(report.failures[1].document_id, "c");
        assert!(report.summary().starts_with("3 documents: 1 succeeded, 2 failed"));
    }

    #[tokio::test]
    async fn test_run_and_store() {
        let store = InMemoryAnalysisStore::new();
        let report = processor().run_and_store(documents(), &store).await.unwrap();

        assert_eq!(report.succeeded, 2);
        let mut ids = store.list_ids().await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
