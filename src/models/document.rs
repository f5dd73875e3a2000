use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::MedicalEntry;
use super::enums::{FileKind, ProcessingStatus};
use super::opportunity::ClaimOpportunity;
use super::ModelError;
use crate::config::ProgressMilestones;

/// Inclusive span of service dates covered by a document's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Tightest range bounding every date, or `None` for an empty input.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |range, date| match range {
            None => Some(Self {
                start: date,
                end: date,
            }),
            Some(r) => Some(Self {
                start: r.start.min(date),
                end: r.end.max(date),
            }),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One uploaded service-treatment-record artifact and everything derived from it.
///
/// Created `pending` at upload time. Only the processing coordinator mutates
/// it (the mutators are crate-private), and it is sealed once it reaches
/// `completed` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrDocument {
    pub id: Uuid,
    pub filename: String,
    pub file_size: u64,
    pub file_kind: FileKind,
    pub uploaded_at: NaiveDateTime,
    /// Known only after text recognition.
    pub page_count: Option<usize>,
    pub volume_label: Option<String>,
    pub status: ProcessingStatus,
    /// 0-100, non-decreasing until a terminal state.
    pub progress: u8,
    pub date_range: Option<DateRange>,
    pub entries: Vec<MedicalEntry>,
    pub opportunities: Vec<ClaimOpportunity>,
    pub error_message: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
}

impl StrDocument {
    pub fn new(
        filename: impl Into<String>,
        file_size: u64,
        file_kind: FileKind,
        volume_label: Option<String>,
        uploaded_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            file_size,
            file_kind,
            uploaded_at,
            page_count: None,
            volume_label,
            status: ProcessingStatus::Pending,
            progress: 0,
            date_range: None,
            entries: Vec::new(),
            opportunities: Vec::new(),
            error_message: None,
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Human-readable line for status polling, keyed on the last progress
    /// milestone reached.
    pub fn status_message(&self, milestones: &ProgressMilestones) -> String {
        match self.status {
            ProcessingStatus::Pending => "Waiting to start".into(),
            ProcessingStatus::Processing if self.progress < milestones.recognized => {
                "Recognizing text".into()
            }
            ProcessingStatus::Processing if self.progress < milestones.extracted => format!(
                "Extracting entries from {} page(s)",
                self.page_count.unwrap_or(0)
            ),
            ProcessingStatus::Processing if self.progress < milestones.analyzed => {
                format!("Analyzing {} entries", self.entries.len())
            }
            ProcessingStatus::Processing => "Finalizing".into(),
            ProcessingStatus::Completed => format!(
                "Processing complete: {} entries, {} claim opportunities",
                self.entries.len(),
                self.opportunities.len()
            ),
            ProcessingStatus::Error => self
                .error_message
                .clone()
                .unwrap_or_else(|| "Processing failed".into()),
        }
    }

    // ── Coordinator-only transitions ─────────────────────────

    pub(crate) fn start_processing(&mut self, progress: u8) -> Result<(), ModelError> {
        if self.status != ProcessingStatus::Pending {
            return Err(ModelError::InvalidTransition {
                from: self.status,
                to: ProcessingStatus::Processing,
            });
        }
        self.status = ProcessingStatus::Processing;
        self.progress = self.progress.max(progress.min(100));
        Ok(())
    }

    /// Raise progress. Lower values are ignored so progress never regresses.
    pub(crate) fn advance(&mut self, progress: u8) -> Result<(), ModelError> {
        self.ensure_processing()?;
        self.progress = self.progress.max(progress.min(100));
        Ok(())
    }

    pub(crate) fn record_pages(&mut self, page_count: usize) -> Result<(), ModelError> {
        self.ensure_processing()?;
        self.page_count = Some(page_count);
        Ok(())
    }

    /// Store extracted entries and re-derive the date range from them.
    pub(crate) fn record_entries(&mut self, entries: Vec<MedicalEntry>) -> Result<(), ModelError> {
        self.ensure_processing()?;
        self.date_range = DateRange::from_dates(entries.iter().map(|e| e.date));
        self.entries = entries;
        Ok(())
    }

    /// Store opportunities after checking every supporting entry belongs here.
    pub(crate) fn record_opportunities(
        &mut self,
        opportunities: Vec<ClaimOpportunity>,
    ) -> Result<(), ModelError> {
        self.ensure_processing()?;
        for opportunity in &opportunities {
            for entry_id in &opportunity.supporting_entry_ids {
                if !self.entries.iter().any(|e| e.id == *entry_id) {
                    return Err(ModelError::ForeignEntry {
                        entry_id: *entry_id,
                        document_id: self.id,
                    });
                }
            }
        }
        self.opportunities = opportunities;
        Ok(())
    }

    pub(crate) fn complete(&mut self, at: NaiveDateTime) -> Result<(), ModelError> {
        if self.status != ProcessingStatus::Processing {
            return Err(ModelError::InvalidTransition {
                from: self.status,
                to: ProcessingStatus::Completed,
            });
        }
        self.status = ProcessingStatus::Completed;
        self.progress = 100;
        self.completed_at = Some(at);
        Ok(())
    }

    /// Move to `error`, keeping whatever earlier stages produced.
    pub(crate) fn fail(&mut self, message: impl Into<String>) -> Result<(), ModelError> {
        if self.is_terminal() {
            return Err(ModelError::InvalidTransition {
                from: self.status,
                to: ProcessingStatus::Error,
            });
        }
        self.status = ProcessingStatus::Error;
        self.error_message = Some(message.into());
        Ok(())
    }

    fn ensure_processing(&self) -> Result<(), ModelError> {
        if self.status != ProcessingStatus::Processing {
            return Err(ModelError::DocumentSealed(self.status));
        }
        Ok(())
    }
}
