use anyhow::Result;
use rentswipe_core::{ListingId, Verdict};
use rentswipe_service::DecisionOutcome;
use serde_json::json;

use super::{Target, open_session, print_json};

pub(crate) async fn run_like(target: &Target, id: &str) -> Result<()> {
    run_decide(target, id, Verdict::Approve).await
}

pub(crate) async fn run_dislike(target: &Target, id: &str) -> Result<()> {
    run_decide(target, id, Verdict::Reject).await
}

async fn run_decide(target: &Target, raw_id: &str, verdict: Verdict) -> Result<()> {
    let id = ListingId::new(raw_id)?;
    let session = open_session(target).await?;
    let outcome = session.decide(&id, verdict).await;
    if let DecisionOutcome::Ignored(reason) = outcome {
        tracing::warn!(listing_id = %id, %reason, "Judgment not applied");
    }
    print_json(&json!({
        "listingId": id,
        "verdict": verdict,
        "result": outcome,
        "judgment": session.judgment(&id),
    }))
}

pub(crate) async fn run_reset(target: &Target) -> Result<()> {
    let session = open_session(target).await?;
    let outcome = session.reset().await;
    print_json(&serde_json::to_value(outcome)?)
}

pub(crate) async fn run_retry(target: &Target) -> Result<()> {
    let session = open_session(target).await?;
    let summary = session.retry_failed().await?;
    print_json(&json!({
        "summary": summary,
        "stillFailed": session.failed_judgments(),
    }))
}
