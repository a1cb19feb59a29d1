use super::common::*;
use crate::submissions::domain::SubmissionStatus;
use crate::submissions::filter::{StatusFilter, SubmissionFilter, SubmissionStats, TypeFilter};

fn mixed() -> Vec<crate::submissions::Submission> {
    vec![
        with_status(new_contact("Asha", at(10, 9)), "sub-1", SubmissionStatus::Read),
        with_status(new_contact("Bala", at(10, 10)), "sub-2", SubmissionStatus::New),
        with_status(new_offer_claim("Ravi", at(11, 9)), "sub-3", SubmissionStatus::Read),
        with_status(
            new_plan_selection("Meera", at(12, 9)),
            "sub-4",
            SubmissionStatus::Replied,
        ),
        with_status(new_contact("Chitra", at(13, 9)), "sub-5", SubmissionStatus::Read),
    ]
}

#[test]
fn status_and_type_filters_return_the_intersection() {
    let submissions = mixed();
    let filter = SubmissionFilter::new(StatusFilter::Read, TypeFilter::Contact);

    let ids: Vec<&str> = filter
        .apply(&submissions)
        .into_iter()
        .map(|submission| submission.id.0.as_str())
        .collect();

    assert_eq!(ids, vec!["sub-1", "sub-5"]);
}

#[test]
fn default_filter_keeps_everything_in_order() {
    let submissions = mixed();
    let visible = SubmissionFilter::default().apply(&submissions);
    assert_eq!(visible.len(), submissions.len());
    assert_eq!(visible[0].id.0, "sub-1");
}

#[test]
fn filters_parse_from_query_strings_and_cli_values() {
    assert_eq!("Replied".parse::<StatusFilter>(), Ok(StatusFilter::Replied));
    assert_eq!("offer-claim".parse::<TypeFilter>(), Ok(TypeFilter::OfferClaim));
    assert!("archived".parse::<StatusFilter>().is_err());

    let filter: SubmissionFilter =
        serde_json::from_value(serde_json::json!({ "type": "plan_selection" }))
            .expect("filter deserializes");
    assert_eq!(filter.status, StatusFilter::All);
    assert_eq!(filter.kind, TypeFilter::PlanSelection);
}

#[test]
fn stats_count_the_whole_collection() {
    let stats = SubmissionStats::from_submissions(&mixed());
    assert_eq!(
        stats,
        SubmissionStats {
            total: 5,
            new: 1,
            read: 3,
            replied: 1,
            contacts: 3,
            offer_claims: 1,
            plan_selections: 1,
        }
    );
}
