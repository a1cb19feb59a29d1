use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::domain::{
    ContactDetails, NewSubmission, OfferDetails, PlanDetails, SubmissionDetails, SubmissionType,
};

/// Input-layer validation failure, raised before the store is contacted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email is not a valid address")]
    InvalidEmail,
}

impl FormError {
    /// Name of the offending input.
    pub fn field(&self) -> &'static str {
        match self {
            FormError::MissingField(field) => field,
            FormError::InvalidEmail => "email",
        }
    }
}

/// Behavior shared by the three lead forms.
pub trait SubmissionForm: Clone + Send + Sync {
    const KIND: SubmissionType;
    /// Whether the embedding page is told about success after the completion delay.
    const NOTIFIES_COMPLETION: bool;
    /// Generic retryable message shown when the store rejects the write.
    const FAILURE_MESSAGE: &'static str;

    fn validate(&self) -> Result<(), FormError>;

    /// Build the record. Callers validate first; see [`SubmissionForm::prepare`].
    fn to_new_submission(&self, timestamp: DateTime<Utc>) -> NewSubmission;

    /// Return the draft to its defaults, keeping externally supplied details.
    fn reset(&mut self);

    fn prepare(&self, timestamp: DateTime<Utc>) -> Result<NewSubmission, FormError> {
        self.validate()?;
        Ok(self.to_new_submission(timestamp))
    }
}

fn required(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

fn email(value: &str) -> Result<(), FormError> {
    required("email", value)?;
    if value.trim().validate_email() {
        Ok(())
    } else {
        Err(FormError::InvalidEmail)
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// General "get in touch" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub subject: String,
    pub service: String,
    pub message: String,
}

impl SubmissionForm for ContactForm {
    const KIND: SubmissionType = SubmissionType::Contact;
    const NOTIFIES_COMPLETION: bool = false;
    const FAILURE_MESSAGE: &'static str = "Failed to send message. Please try again.";

    fn validate(&self) -> Result<(), FormError> {
        required("name", &self.name)?;
        email(&self.email)?;
        required("subject", &self.subject)?;
        required("message", &self.message)
    }

    fn to_new_submission(&self, timestamp: DateTime<Utc>) -> NewSubmission {
        NewSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            company: optional(&self.company),
            message: self.message.trim().to_string(),
            details: SubmissionDetails::Contact(ContactDetails {
                subject: optional(&self.subject),
                service: optional(&self.service),
            }),
            timestamp,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Claim form for a promotional offer presented by the embedding page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferClaimForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub offer: OfferDetails,
}

impl OfferClaimForm {
    pub fn for_offer(offer: OfferDetails) -> Self {
        Self {
            offer,
            ..Self::default()
        }
    }
}

impl SubmissionForm for OfferClaimForm {
    const KIND: SubmissionType = SubmissionType::OfferClaim;
    const NOTIFIES_COMPLETION: bool = true;
    const FAILURE_MESSAGE: &'static str = "Failed to claim offer. Please try again.";

    fn validate(&self) -> Result<(), FormError> {
        required("name", &self.name)?;
        email(&self.email)?;
        required("phone", &self.phone)?;
        required("message", &self.message)
    }

    fn to_new_submission(&self, timestamp: DateTime<Utc>) -> NewSubmission {
        NewSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            company: optional(&self.company),
            message: self.message.trim().to_string(),
            details: SubmissionDetails::OfferClaim(self.offer.clone()),
            timestamp,
        }
    }

    fn reset(&mut self) {
        *self = Self::for_offer(self.offer.clone());
    }
}

/// Request form for one of the published pricing plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanSelectionForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub selected_plan: String,
    pub plan_price: String,
    pub project_timeline: String,
}

impl PlanSelectionForm {
    pub fn for_plan(selected_plan: impl Into<String>, plan_price: impl Into<String>) -> Self {
        Self {
            selected_plan: selected_plan.into(),
            plan_price: plan_price.into(),
            ..Self::default()
        }
    }
}

impl SubmissionForm for PlanSelectionForm {
    const KIND: SubmissionType = SubmissionType::PlanSelection;
    const NOTIFIES_COMPLETION: bool = true;
    const FAILURE_MESSAGE: &'static str = "Failed to submit request. Please try again.";

    fn validate(&self) -> Result<(), FormError> {
        required("name", &self.name)?;
        email(&self.email)?;
        required("phone", &self.phone)?;
        required("message", &self.message)
    }

    fn to_new_submission(&self, timestamp: DateTime<Utc>) -> NewSubmission {
        NewSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            company: optional(&self.company),
            message: self.message.trim().to_string(),
            details: SubmissionDetails::PlanSelection(PlanDetails {
                selected_plan: self.selected_plan.clone(),
                plan_price: self.plan_price.clone(),
                project_timeline: optional(&self.project_timeline),
            }),
            timestamp,
        }
    }

    fn reset(&mut self) {
        *self = Self::for_plan(self.selected_plan.clone(), self.plan_price.clone());
    }
}
