//! Document processing coordinator.
//!
//! Owns every `StrDocument` and drives it through
//! recognition → extraction → analysis/opportunities → completed.
//!
//! Each document gets its own `watch` channel. The spawned processing task
//! is the only writer: it mutates a private copy and publishes a snapshot at
//! every transition, so readers poll without touching the document itself.
//! Stages run on the blocking pool; a panic inside a stage is reported as a
//! stage failure instead of tearing down the task.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::{PipelineConfig, ProgressMilestones};
use crate::models::{ModelError, ProcessingStatus, StrDocument};
use crate::pipeline::analysis::{analyze, AnalysisConfig};
use crate::pipeline::diagnostic;
use crate::pipeline::extraction::{
    EntryExtractor, ExtractionContext, ExtractionError, KeywordEntryExtractor,
};
use crate::pipeline::import::DocumentUpload;
use crate::pipeline::opportunity::{
    DisabilityProfile, OpportunityError, OpportunityGenerator, RuleBasedOpportunityGenerator,
};
use crate::pipeline::recognition::{placeholder_page, PlainTextRecognizer, RecognitionAdapter};
use crate::pipeline::summary::DocumentSummary;
use crate::timeline::{build_timeline, TimelineEvent};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during document processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Opportunity(#[from] OpportunityError),

    #[error("Invalid document state: {0}")]
    Model(#[from] ModelError),

    #[error("{stage} stage panicked: {reason}")]
    StagePanicked { stage: &'static str, reason: String },

    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Document {0} is still processing")]
    NotFinished(Uuid),

    #[error("Processing of document {0} stopped before reaching a terminal state")]
    Abandoned(Uuid),

    #[error("Document registry lock poisoned")]
    LockPoisoned,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Answer to a status poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub document_id: Uuid,
    pub status: ProcessingStatus,
    pub progress: u8,
    pub message: String,
}

impl StatusReport {
    fn of(document: &StrDocument, milestones: &ProgressMilestones) -> Self {
        Self {
            document_id: document.id,
            status: document.status,
            progress: document.progress,
            message: document.status_message(milestones),
        }
    }
}

/// Everything a caller gets once a document is terminal. For an errored
/// document this holds whatever the earlier stages produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub document: StrDocument,
    pub summary: DocumentSummary,
    pub timeline: Vec<TimelineEvent>,
}

impl ProcessingResult {
    fn of(document: StrDocument) -> Self {
        let summary = DocumentSummary::from_document(&document);
        let timeline = build_timeline(&document.entries).collect();
        Self {
            document,
            summary,
            timeline,
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Cheap to clone; clones share the same registry and engines.
#[derive(Clone)]
pub struct ProcessingCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    recognizer: RecognitionAdapter,
    extractor: Box<dyn EntryExtractor>,
    generator: Box<dyn OpportunityGenerator>,
    profile: Arc<dyn DisabilityProfile>,
    config: PipelineConfig,
    documents: RwLock<HashMap<Uuid, watch::Receiver<StrDocument>>>,
}

impl ProcessingCoordinator {
    pub fn new(
        recognizer: RecognitionAdapter,
        extractor: Box<dyn EntryExtractor>,
        generator: Box<dyn OpportunityGenerator>,
        profile: Arc<dyn DisabilityProfile>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                recognizer,
                extractor,
                generator,
                profile,
                config,
                documents: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Register a `pending` document and start processing it in the
    /// background. Returns immediately with the pending snapshot.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, upload: DocumentUpload) -> Result<StrDocument, ProcessingError> {
        let document = StrDocument::new(
            upload.filename.clone(),
            upload.size(),
            upload.file_kind(),
            upload.volume_label.clone(),
            Utc::now().naive_utc(),
        );
        let (tx, rx) = watch::channel(document.clone());

        self.inner
            .documents
            .write()
            .map_err(|_| ProcessingError::LockPoisoned)?
            .insert(document.id, rx);

        tracing::info!(
            document_id = %document.id,
            filename = %document.filename,
            file_kind = document.file_kind.as_str(),
            mime_type = document.file_kind.mime_type(),
            image = document.file_kind.is_image(),
            size = document.file_size,
            "Document submitted"
        );

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.run(upload, tx).await });

        Ok(document)
    }

    /// Submit and wait for the terminal result.
    pub async fn process(&self, upload: DocumentUpload) -> Result<ProcessingResult, ProcessingError> {
        let document = self.submit(upload)?;
        self.wait_for_terminal(document.id).await?;
        self.result(document.id)
    }

    /// Current `{status, progress, message}` for polling.
    pub fn status(&self, id: Uuid) -> Result<StatusReport, ProcessingError> {
        let rx = self.receiver(id)?;
        let document = rx.borrow();
        Ok(StatusReport::of(&document, &self.inner.config.progress))
    }

    /// Latest snapshot, terminal or not.
    pub fn document(&self, id: Uuid) -> Result<StrDocument, ProcessingError> {
        Ok(self.receiver(id)?.borrow().clone())
    }

    /// Full result with summary and timeline. Only for terminal documents.
    pub fn result(&self, id: Uuid) -> Result<ProcessingResult, ProcessingError> {
        let document = self.document(id)?;
        if !document.is_terminal() {
            return Err(ProcessingError::NotFinished(id));
        }
        Ok(ProcessingResult::of(document))
    }

    /// Resolve once the document is `completed` or `error`.
    pub async fn wait_for_terminal(&self, id: Uuid) -> Result<StrDocument, ProcessingError> {
        let mut rx = self.receiver(id)?;
        let document = rx
            .wait_for(StrDocument::is_terminal)
            .await
            .map_err(|_| ProcessingError::Abandoned(id))?;
        Ok(document.clone())
    }

    /// Subscribe to snapshots of one document.
    pub fn subscribe(&self, id: Uuid) -> Result<watch::Receiver<StrDocument>, ProcessingError> {
        self.receiver(id)
    }

    pub fn document_ids(&self) -> Result<Vec<Uuid>, ProcessingError> {
        let documents = self
            .inner
            .documents
            .read()
            .map_err(|_| ProcessingError::LockPoisoned)?;
        Ok(documents.keys().copied().collect())
    }

    fn receiver(&self, id: Uuid) -> Result<watch::Receiver<StrDocument>, ProcessingError> {
        self.inner
            .documents
            .read()
            .map_err(|_| ProcessingError::LockPoisoned)?
            .get(&id)
            .cloned()
            .ok_or(ProcessingError::DocumentNotFound(id))
    }
}

impl Inner {
    async fn run(self: Arc<Self>, upload: DocumentUpload, tx: watch::Sender<StrDocument>) {
        let mut document = tx.borrow().clone();
        let dump_dir = diagnostic::dump_dir_for(self.config.dump_dir.as_deref(), &document.id);
        if let Some(dir) = &dump_dir {
            diagnostic::dump_json(dir, "00-upload-info.json", &upload);
        }

        let outcome = Arc::clone(&self)
            .run_stages(&mut document, &tx, upload, dump_dir.as_deref())
            .await;

        if let Err(e) = outcome {
            tracing::error!(
                document_id = %document.id,
                progress = document.progress,
                error = %e,
                "Document processing failed"
            );
            if let Err(transition) = document.fail(e.to_string()) {
                tracing::warn!(
                    document_id = %document.id,
                    error = %transition,
                    "Could not mark document as failed"
                );
            }
            if let Some(dir) = &dump_dir {
                diagnostic::dump_text(dir, "04-error.txt", &e.to_string());
            }
            tx.send_replace(document.clone());
        }

        if let Some(dir) = &dump_dir {
            diagnostic::dump_json(dir, "05-final-document.json", &document);
        }
    }

    async fn run_stages(
        self: Arc<Self>,
        document: &mut StrDocument,
        tx: &watch::Sender<StrDocument>,
        upload: DocumentUpload,
        dump_dir: Option<&Path>,
    ) -> Result<(), ProcessingError> {
        let progress = self.config.progress;
        let document_id = document.id;

        document.start_processing(progress.started)?;
        tx.send_replace(document.clone());

        // Stage 1: recognition. Never fatal.
        let inner = Arc::clone(&self);
        let pages = match run_stage("recognition", move || inner.recognizer.recognize(&upload)).await {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(
                    document_id = %document_id,
                    error = %e,
                    "Recognition engine crashed, continuing with placeholder page"
                );
                vec![placeholder_page(&e.to_string())]
            }
        };
        document.record_pages(pages.len())?;
        document.advance(progress.recognized)?;
        tx.send_replace(document.clone());
        if let Some(dir) = dump_dir {
            diagnostic::dump_json(dir, "01-recognized-pages.json", &pages);
        }

        // Stage 2: entry extraction.
        let context = ExtractionContext {
            document_id,
            extracted_at: Utc::now().naive_utc(),
            date_fallback_penalty: self.config.date_fallback_penalty,
        };
        let inner = Arc::clone(&self);
        let entries =
            run_stage("extraction", move || inner.extractor.extract(&pages, &context)).await??;
        document.record_entries(entries)?;
        document.advance(progress.extracted)?;
        tx.send_replace(document.clone());
        if let Some(dir) = dump_dir {
            diagnostic::dump_json(dir, "02-entries.json", &document.entries);
        }

        // Stage 3: grouping, signatures and opportunities.
        let entries = document.entries.clone();
        let analysis_config = AnalysisConfig::from(&self.config);
        let inner = Arc::clone(&self);
        let opportunities = run_stage("opportunity", move || {
            let analyses = analyze(&entries, &analysis_config);
            inner.generator.generate(&analyses, inner.profile.as_ref())
        })
        .await??;
        document.record_opportunities(opportunities)?;
        document.advance(progress.analyzed)?;
        tx.send_replace(document.clone());
        if let Some(dir) = dump_dir {
            diagnostic::dump_json(dir, "03-opportunities.json", &document.opportunities);
        }

        document.complete(Utc::now().naive_utc())?;
        tx.send_replace(document.clone());

        tracing::info!(
            document_id = %document_id,
            pages = document.page_count.unwrap_or(0),
            entries = document.entries.len(),
            opportunities = document.opportunities.len(),
            "Document processing complete"
        );

        Ok(())
    }
}

/// Run one stage on the blocking pool, turning a panic into an error.
async fn run_stage<T, F>(stage: &'static str, f: F) -> Result<T, ProcessingError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        let reason = if e.is_panic() {
            let payload = e.into_panic();
            payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string())
        } else {
            e.to_string()
        };
        ProcessingError::StagePanicked { stage, reason }
    })
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Build a coordinator with the default engines:
///
/// - Recognition: `PlainTextRecognizer` (text-layer exports, form-feed pages)
/// - Extraction: `KeywordEntryExtractor` with the base keyword classifier
/// - Opportunities: `RuleBasedOpportunityGenerator`
pub fn build_coordinator(
    config: PipelineConfig,
    profile: Arc<dyn DisabilityProfile>,
) -> ProcessingCoordinator {
    let recognizer = RecognitionAdapter::new(Box::new(PlainTextRecognizer::new(
        config.placeholder_confidence,
    )));
    tracing::info!(
        engine = recognizer.engine_name(),
        exclude_fallback_dates = config.exclude_fallback_dates,
        "Processing coordinator ready"
    );

    ProcessingCoordinator::new(
        recognizer,
        Box::new(KeywordEntryExtractor::default()),
        Box::new(RuleBasedOpportunityGenerator),
        profile,
        config,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
