//! Lead submissions: the three intake forms, the store contract, and the admin review workflow.

pub mod domain;
pub mod export;
pub mod filter;
pub mod form;
pub mod moderator;
pub mod repository;
pub mod router;
pub mod service;
pub mod view;
pub mod writer;

#[cfg(test)]
mod tests;

pub use domain::{
    ContactDetails, NewSubmission, OfferDetails, PlanDetails, Submission, SubmissionDetails,
    SubmissionId, SubmissionStatus, SubmissionType,
};
pub use export::{export_csv, export_filename, CsvExport, ExportError, CSV_CONTENT_TYPE};
pub use filter::{FilterParseError, StatusFilter, SubmissionFilter, SubmissionStats, TypeFilter};
pub use form::{ContactForm, FormError, OfferClaimForm, PlanSelectionForm, SubmissionForm};
pub use moderator::{Moderator, ModeratorError};
pub use repository::{
    InMemorySubmissionStore, Snapshot, SnapshotPublisher, StoreError, SubmissionFeed,
    SubmissionStore,
};
pub use router::submission_router;
pub use service::{SubmissionService, SubmissionServiceError};
pub use view::SubmissionDetailView;
pub use writer::{CompletionCallback, SubmissionWriter, SubmitState, WriterError};
