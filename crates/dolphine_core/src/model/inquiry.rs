//! Contact-form inquiry record and triage enums.
//!
//! # Invariants
//! - New inquiries start as `status = new`, `priority = medium`.
//! - `date` is set once at submission and never rewritten.
//! - Stored enum values use the same strings as [`InquiryStatus::as_str`] and
//!   friends.

use crate::model::validation::{require_email, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable inquiry identifier.
pub type InquiryId = Uuid;

/// Team the inquiry is routed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    #[default]
    Sales,
    Support,
    /// Service & maintenance.
    Service,
    General,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Sales,
        Department::Support,
        Department::Service,
        Department::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Support => "support",
            Self::Service => "service",
            Self::General => "general",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|item| item.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "department",
                value: value.to_string(),
            })
    }
}

/// Manual triage state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryStatus {
    #[default]
    New,
    Replied,
    InProgress,
    Archived,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 4] = [
        InquiryStatus::New,
        InquiryStatus::Replied,
        InquiryStatus::InProgress,
        InquiryStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Replied => "replied",
            Self::InProgress => "in-progress",
            Self::Archived => "archived",
        }
    }

    /// Parses a status, accepting `in_progress` as an alias of `in-progress`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|item| item.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "status",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|item| item.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "priority",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    /// Free-text product of interest, as typed by the customer.
    pub product: Option<String>,
    pub message: String,
    pub department: Department,
    pub status: InquiryStatus,
    pub priority: Priority,
    /// Submission time.
    pub date: i64,
    pub last_reply: Option<i64>,
}

/// Contact-form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub product: Option<String>,
    pub message: String,
    pub department: Department,
}

impl NewInquiry {
    /// Name, email and message are the form's required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_email(&self.email)?;
        require_text("message", &self.message)?;
        Ok(())
    }
}

/// Admin triage update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiryPatch {
    pub department: Option<Department>,
    pub status: Option<InquiryStatus>,
    pub priority: Option<Priority>,
    pub last_reply: Option<i64>,
}

impl InquiryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, inquiry: &mut Inquiry) {
        if let Some(value) = self.department {
            inquiry.department = value;
        }
        if let Some(value) = self.status {
            inquiry.status = value;
        }
        if let Some(value) = self.priority {
            inquiry.priority = value;
        }
        if let Some(value) = self.last_reply {
            inquiry.last_reply = Some(value);
        }
    }
}

/// Non-empty optional text, trimmed; blank input becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
