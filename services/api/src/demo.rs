use agency_leads::config::AppConfig;
use agency_leads::error::AppError;
use agency_leads::submissions::{
    ContactForm, InMemorySubmissionStore, Moderator, OfferClaimForm, OfferDetails,
    PlanSelectionForm, StatusFilter, Submission, SubmissionId, SubmissionStats, SubmissionStatus,
    SubmissionType, SubmissionWriter, TypeFilter,
};
use agency_leads::telemetry;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the filtered CSV export to this path.
    #[arg(long)]
    pub(crate) csv_output: Option<PathBuf>,
    /// Status filter for the export (all, new, read, replied).
    #[arg(long)]
    pub(crate) status: Option<StatusFilter>,
    /// Type filter for the export (all, contact, offer-claim, plan-selection).
    #[arg(long = "type")]
    pub(crate) kind: Option<TypeFilter>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let store = Arc::new(InMemorySubmissionStore::new());
    let mut moderator = Moderator::open(store.clone());
    let (completed_tx, mut completed_rx) = mpsc::unbounded_channel::<SubmissionType>();

    let contact = SubmissionWriter::new(store.clone(), ContactForm::default(), config.submissions);
    contact.edit(|draft| {
        draft.name = "Asha Verma".to_string();
        draft.email = "asha@example.com".to_string();
        draft.subject = "New website".to_string();
        draft.service = "web-development".to_string();
        draft.message = "We need a site for our design studio.".to_string();
    });
    contact.submit().await?;

    let offer = OfferDetails {
        offer_title: "Festive SEO Audit".to_string(),
        offer_price: "₹4,999".to_string(),
        original_price: "₹9,999".to_string(),
        savings: "₹5,000".to_string(),
    };
    let offer_done = completed_tx.clone();
    let claim = SubmissionWriter::new(
        store.clone(),
        OfferClaimForm::for_offer(offer),
        config.submissions,
    )
    .on_success(Arc::new(move || {
        let _ = offer_done.send(SubmissionType::OfferClaim);
    }));
    claim.edit(|draft| {
        draft.name = "Ravi Kumar".to_string();
        draft.email = "ravi@example.com".to_string();
        draft.phone = "+91 98765 43210".to_string();
        draft.message = "Please audit our storefront.".to_string();
    });
    claim.submit().await?;

    let plan_done = completed_tx;
    let plan = SubmissionWriter::new(
        store.clone(),
        PlanSelectionForm::for_plan("Growth", "₹49,999"),
        config.submissions,
    )
    .on_success(Arc::new(move || {
        let _ = plan_done.send(SubmissionType::PlanSelection);
    }));
    plan.edit(|draft| {
        draft.name = "Meera Iyer".to_string();
        draft.email = "meera@example.com".to_string();
        draft.phone = "+91 90000 00000".to_string();
        draft.company = "Iyer Bakes".to_string();
        draft.project_timeline = "2-3-months".to_string();
        draft.message = "Online ordering for the bakery.".to_string();
    });
    plan.submit().await?;

    moderator.sync();
    println!("Lead inbox after intake");
    render_stats(&moderator.stats());

    let contact_id = find_id(moderator.submissions(), SubmissionType::Contact);
    let offer_id = find_id(moderator.submissions(), SubmissionType::OfferClaim);
    if let Some(id) = contact_id {
        moderator.select(&id).await?;
        if let Some(selected) = moderator.selected() {
            println!(
                "\nOpened {} from {} <{}>: now {}",
                selected.id,
                selected.name,
                selected.email,
                selected.status.label()
            );
        }
    }
    if let Some(id) = offer_id {
        moderator.update_status(&id, SubmissionStatus::Replied).await?;
    }

    moderator.set_status_filter(args.status.unwrap_or_default());
    moderator.set_type_filter(args.kind.unwrap_or_default());

    println!("\nLead inbox after review");
    render_stats(&moderator.stats());
    println!("\nVisible submissions ({} shown)", moderator.visible().len());
    for submission in moderator.visible() {
        render_row(submission);
    }

    let export = moderator.export(Utc::now())?;
    match args.csv_output {
        Some(path) => {
            export.write_to(&path)?;
            println!(
                "\nExported {} row(s) to {} ({})",
                export.rows,
                path.display(),
                export.filename
            );
        }
        None => println!("\n{}\n{}", export.filename, export.body),
    }

    for _ in 0..2 {
        if let Some(kind) = completed_rx.recv().await {
            println!("Completion acknowledged for {}", kind.label());
        }
    }

    moderator.close();
    Ok(())
}

fn find_id(submissions: &[Submission], kind: SubmissionType) -> Option<SubmissionId> {
    submissions
        .iter()
        .find(|submission| submission.kind() == kind)
        .map(|submission| submission.id.clone())
}

fn render_stats(stats: &SubmissionStats) {
    println!(
        "  total {} | new {} | read {} | replied {}",
        stats.total, stats.new, stats.read, stats.replied
    );
    println!(
        "  contacts {} | offer claims {} | plan requests {}",
        stats.contacts, stats.offer_claims, stats.plan_selections
    );
}

fn render_row(submission: &Submission) {
    println!(
        "  [{}] {} {} <{}> {} | {}",
        submission.status.label(),
        submission.kind().label(),
        submission.name,
        submission.email,
        submission.headline().unwrap_or("-"),
        submission.timestamp.format("%Y-%m-%d %H:%M")
    );
}
