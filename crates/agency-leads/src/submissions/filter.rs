use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{Submission, SubmissionStatus, SubmissionType};

/// Status predicate for the dashboard list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    New,
    Read,
    Replied,
}

impl StatusFilter {
    pub fn matches(self, status: SubmissionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::New => status == SubmissionStatus::New,
            StatusFilter::Read => status == SubmissionStatus::Read,
            StatusFilter::Replied => status == SubmissionStatus::Replied,
        }
    }
}

impl From<SubmissionStatus> for StatusFilter {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::New => StatusFilter::New,
            SubmissionStatus::Read => StatusFilter::Read,
            SubmissionStatus::Replied => StatusFilter::Replied,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "new" => Ok(StatusFilter::New),
            "read" => Ok(StatusFilter::Read),
            "replied" => Ok(StatusFilter::Replied),
            other => Err(FilterParseError::Status(other.to_string())),
        }
    }
}

/// Type predicate for the dashboard list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    #[default]
    All,
    Contact,
    OfferClaim,
    PlanSelection,
}

impl TypeFilter {
    pub fn matches(self, kind: SubmissionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Contact => kind == SubmissionType::Contact,
            TypeFilter::OfferClaim => kind == SubmissionType::OfferClaim,
            TypeFilter::PlanSelection => kind == SubmissionType::PlanSelection,
        }
    }
}

impl From<SubmissionType> for TypeFilter {
    fn from(kind: SubmissionType) -> Self {
        match kind {
            SubmissionType::Contact => TypeFilter::Contact,
            SubmissionType::OfferClaim => TypeFilter::OfferClaim,
            SubmissionType::PlanSelection => TypeFilter::PlanSelection,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Ok(TypeFilter::All),
            "contact" => Ok(TypeFilter::Contact),
            "offer_claim" => Ok(TypeFilter::OfferClaim),
            "plan_selection" => Ok(TypeFilter::PlanSelection),
            other => Err(FilterParseError::Type(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_or_all(deserializer)
    }
}

impl<'de> Deserialize<'de> for TypeFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_or_all(deserializer)
    }
}

/// Query values go through the same parser as CLI flags. A blank value means no filter.
fn parse_or_all<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = FilterParseError> + Default,
{
    let raw = String::deserialize(deserializer)?;
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    raw.parse().map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("unknown status filter '{0}' (expected all, new, read, or replied)")]
    Status(String),
    #[error("unknown type filter '{0}' (expected all, contact, offer_claim, or plan_selection)")]
    Type(String),
}

/// Two independent predicates combined with AND, evaluated in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionFilter {
    pub status: StatusFilter,
    #[serde(rename = "type")]
    pub kind: TypeFilter,
}

impl SubmissionFilter {
    pub fn new(status: StatusFilter, kind: TypeFilter) -> Self {
        Self { status, kind }
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        self.status.matches(submission.status) && self.kind.matches(submission.kind())
    }

    /// Matching submissions in their original order.
    pub fn apply<'a, I>(&self, submissions: I) -> Vec<&'a Submission>
    where
        I: IntoIterator<Item = &'a Submission>,
    {
        submissions
            .into_iter()
            .filter(|submission| self.matches(submission))
            .collect()
    }
}

/// Dashboard counters over the whole collection, ignoring any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionStats {
    pub total: usize,
    pub new: usize,
    pub read: usize,
    pub replied: usize,
    pub contacts: usize,
    pub offer_claims: usize,
    pub plan_selections: usize,
}

impl SubmissionStats {
    pub fn from_submissions<'a, I>(submissions: I) -> Self
    where
        I: IntoIterator<Item = &'a Submission>,
    {
        submissions
            .into_iter()
            .fold(Self::default(), |mut stats, submission| {
                stats.total += 1;
                match submission.status {
                    SubmissionStatus::New => stats.new += 1,
                    SubmissionStatus::Read => stats.read += 1,
                    SubmissionStatus::Replied => stats.replied += 1,
                }
                match submission.kind() {
                    SubmissionType::Contact => stats.contacts += 1,
                    SubmissionType::OfferClaim => stats.offer_claims += 1,
                    SubmissionType::PlanSelection => stats.plan_selections += 1,
                }
                stats
            })
    }
}
