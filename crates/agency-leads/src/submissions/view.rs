use serde::Serialize;

use super::domain::Submission;

/// Detail panel payload: the record plus reply shortcuts.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDetailView {
    #[serde(flatten)]
    pub submission: Submission,
    pub type_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    pub mailto: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
}

impl From<Submission> for SubmissionDetailView {
    fn from(submission: Submission) -> Self {
        let headline = submission.headline().map(str::to_string);
        Self {
            type_label: submission.kind().label(),
            mailto: mailto_link(&submission),
            tel: tel_link(&submission),
            headline,
            submission,
        }
    }
}

pub fn mailto_link(submission: &Submission) -> String {
    let subject = format!("Re: {}", submission.headline().unwrap_or("your enquiry"));
    let address = urlencoding::encode(&submission.email).replace("%40", "@");
    format!("mailto:{address}?subject={}", urlencoding::encode(&subject))
}

pub fn tel_link(submission: &Submission) -> Option<String> {
    let phone = submission.phone.as_deref()?;
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    (!digits.is_empty()).then(|| format!("tel:{digits}"))
}
