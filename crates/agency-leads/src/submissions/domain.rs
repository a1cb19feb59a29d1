use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which lead form produced the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    Contact,
    OfferClaim,
    PlanSelection,
}

impl SubmissionType {
    pub const ALL: [SubmissionType; 3] = [
        SubmissionType::Contact,
        SubmissionType::OfferClaim,
        SubmissionType::PlanSelection,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SubmissionType::Contact => "contact",
            SubmissionType::OfferClaim => "offer_claim",
            SubmissionType::PlanSelection => "plan_selection",
        }
    }

    /// Human readable label used by the dashboard and CSV export.
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionType::Contact => "Contact",
            SubmissionType::OfferClaim => "Offer Claim",
            SubmissionType::PlanSelection => "Plan Request",
        }
    }
}

/// Review state of a submission. Any state may be reassigned to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Read,
    Replied,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 3] = [
        SubmissionStatus::New,
        SubmissionStatus::Read,
        SubmissionStatus::Replied,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Read => "read",
            SubmissionStatus::Replied => "replied",
        }
    }
}

/// Fields captured only by the general contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// Promotional offer being claimed, supplied by the page embedding the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetails {
    pub offer_title: String,
    pub offer_price: String,
    pub original_price: String,
    pub savings: String,
}

/// Pricing plan the visitor picked plus their preferred timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    pub selected_plan: String,
    pub plan_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_timeline: Option<String>,
}

/// Type-specific field group. Exactly one group exists per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmissionDetails {
    Contact(ContactDetails),
    OfferClaim(OfferDetails),
    PlanSelection(PlanDetails),
}

impl SubmissionDetails {
    pub const fn kind(&self) -> SubmissionType {
        match self {
            SubmissionDetails::Contact(_) => SubmissionType::Contact,
            SubmissionDetails::OfferClaim(_) => SubmissionType::OfferClaim,
            SubmissionDetails::PlanSelection(_) => SubmissionType::PlanSelection,
        }
    }
}

/// A submission as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
    #[serde(flatten)]
    pub details: SubmissionDetails,
    pub status: SubmissionStatus,
    pub timestamp: DateTime<Utc>,
}

impl Submission {
    pub const fn kind(&self) -> SubmissionType {
        self.details.kind()
    }

    /// First non-empty of subject, selected plan, or offer title.
    pub fn headline(&self) -> Option<&str> {
        let candidate = match &self.details {
            SubmissionDetails::Contact(details) => details.subject.as_deref(),
            SubmissionDetails::PlanSelection(details) => Some(details.selected_plan.as_str()),
            SubmissionDetails::OfferClaim(details) => Some(details.offer_title.as_str()),
        };
        candidate.filter(|value| !value.is_empty())
    }

    /// Requested service for contacts, preferred timeline for plan requests.
    pub fn service_or_timeline(&self) -> Option<&str> {
        let candidate = match &self.details {
            SubmissionDetails::Contact(details) => details.service.as_deref(),
            SubmissionDetails::PlanSelection(details) => details.project_timeline.as_deref(),
            SubmissionDetails::OfferClaim(_) => None,
        };
        candidate.filter(|value| !value.is_empty())
    }

    /// Pricing summary shown next to offer claims and plan requests.
    pub fn additional_info(&self) -> String {
        match &self.details {
            SubmissionDetails::OfferClaim(offer) => {
                format!("{} (was {})", offer.offer_price, offer.original_price)
            }
            SubmissionDetails::PlanSelection(plan) => plan.plan_price.clone(),
            SubmissionDetails::Contact(_) => String::new(),
        }
    }
}

/// Validated submission waiting for the store to assign an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub details: SubmissionDetails,
    pub timestamp: DateTime<Utc>,
}

impl NewSubmission {
    pub const fn kind(&self) -> SubmissionType {
        self.details.kind()
    }

    /// Materialize the record. Every submission starts out as `new`.
    pub fn into_submission(self, id: SubmissionId) -> Submission {
        Submission {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            message: self.message,
            details: self.details,
            status: SubmissionStatus::New,
            timestamp: self.timestamp,
        }
    }
}
