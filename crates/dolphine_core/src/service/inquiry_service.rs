//! Contact-form submission and inquiry triage.
//!
//! # Invariants
//! - Submissions start as `new` / `medium`.
//! - Triage changes never rewrite the submission `date`.
//! - Logs carry inquiry ids and enum values only, never contact details.

use crate::model::inquiry::{
    Inquiry, InquiryId, InquiryPatch, InquiryStatus, NewInquiry, Priority,
};
use crate::model::now_epoch_ms;
use crate::repo::inquiry_repo::InquiryRepository;
use crate::repo::RepoError;
use crate::search::filter::{filter_inquiries, InquiryFilter};
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum InquiryServiceError {
    InquiryNotFound(InquiryId),
    Repo(RepoError),
}

impl Display for InquiryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InquiryNotFound(id) => write!(f, "inquiry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InquiryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InquiryNotFound(_) => None,
        }
    }
}

impl From<RepoError> for InquiryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::InquiryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type InquiryResult<T> = Result<T, InquiryServiceError>;

/// Inbox counters shown above the inquiry table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquirySummary {
    pub total: i64,
    pub new: i64,
    pub replied: i64,
    pub in_progress: i64,
    pub archived: i64,
}

impl InquirySummary {
    pub fn count(&self, status: InquiryStatus) -> i64 {
        match status {
            InquiryStatus::New => self.new,
            InquiryStatus::Replied => self.replied,
            InquiryStatus::InProgress => self.in_progress,
            InquiryStatus::Archived => self.archived,
        }
    }
}

pub struct InquiryService<R: InquiryRepository> {
    repo: R,
}

impl<R: InquiryRepository> InquiryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a contact-form submission.
    pub fn submit(&self, draft: &NewInquiry) -> InquiryResult<Inquiry> {
        let inquiry = self.repo.create_inquiry(draft)?;
        info!(
            "event=inquiry_submit module=inquiry status=ok inquiry_id={} department={}",
            inquiry.id,
            inquiry.department.as_str()
        );
        Ok(inquiry)
    }

    /// Lists inquiries newest first.
    pub fn list(&self, filter: &InquiryFilter) -> InquiryResult<Vec<Inquiry>> {
        Ok(filter_inquiries(self.repo.list_inquiries(None)?, filter))
    }

    pub fn recent(&self, limit: u32) -> InquiryResult<Vec<Inquiry>> {
        Ok(self.repo.list_inquiries(Some(limit))?)
    }

    pub fn get(&self, id: InquiryId) -> InquiryResult<Inquiry> {
        self.repo
            .get_inquiry(id)?
            .ok_or(InquiryServiceError::InquiryNotFound(id))
    }

    pub fn update(&self, id: InquiryId, patch: &InquiryPatch) -> InquiryResult<Inquiry> {
        let inquiry = self.repo.update_inquiry(id, patch)?;
        info!(
            "event=inquiry_update module=inquiry status=ok inquiry_id={} inquiry_status={} priority={}",
            inquiry.id,
            inquiry.status.as_str(),
            inquiry.priority.as_str()
        );
        Ok(inquiry)
    }

    /// Marks the inquiry replied at the current time.
    pub fn mark_replied(&self, id: InquiryId) -> InquiryResult<Inquiry> {
        self.mark_replied_at(id, now_epoch_ms())
    }

    pub fn mark_replied_at(&self, id: InquiryId, now: i64) -> InquiryResult<Inquiry> {
        self.update(
            id,
            &InquiryPatch {
                status: Some(InquiryStatus::Replied),
                last_reply: Some(now),
                ..InquiryPatch::default()
            },
        )
    }

    pub fn set_status(&self, id: InquiryId, status: InquiryStatus) -> InquiryResult<Inquiry> {
        self.update(
            id,
            &InquiryPatch {
                status: Some(status),
                ..InquiryPatch::default()
            },
        )
    }

    pub fn set_priority(&self, id: InquiryId, priority: Priority) -> InquiryResult<Inquiry> {
        self.update(
            id,
            &InquiryPatch {
                priority: Some(priority),
                ..InquiryPatch::default()
            },
        )
    }

    pub fn archive(&self, id: InquiryId) -> InquiryResult<Inquiry> {
        self.set_status(id, InquiryStatus::Archived)
    }

    /// Deletes an inquiry; unknown ids succeed with `false`.
    pub fn delete(&self, id: InquiryId) -> InquiryResult<bool> {
        let deleted = self.repo.delete_inquiry(id)?;
        info!("event=inquiry_delete module=inquiry status=ok inquiry_id={id} deleted={deleted}");
        Ok(deleted)
    }

    pub fn summary(&self) -> InquiryResult<InquirySummary> {
        let counts = self.repo.count_by_status()?;
        let count = |status: InquiryStatus| counts.get(status.as_str()).copied().unwrap_or(0);
        Ok(InquirySummary {
            total: counts.values().sum(),
            new: count(InquiryStatus::New),
            replied: count(InquiryStatus::Replied),
            in_progress: count(InquiryStatus::InProgress),
            archived: count(InquiryStatus::Archived),
        })
    }
}
