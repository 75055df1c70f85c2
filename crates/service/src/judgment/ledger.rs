use std::collections::BTreeMap;

use rentswipe_core::{JudgmentRecord, JudgmentStatus, ListingId, RemoteStage, Verdict};

/// Latest judgment per listing for the running session.
#[derive(Debug, Default, Clone)]
pub(crate) struct JudgmentLedger {
    records: BTreeMap<ListingId, JudgmentRecord>,
}

impl JudgmentLedger {
    pub(crate) fn begin(&mut self, id: &ListingId, verdict: Verdict) {
        self.records.insert(id.clone(), JudgmentRecord::pending(id.clone(), verdict));
    }

    pub(crate) fn retry(&mut self, id: &ListingId) {
        if let Some(record) = self.records.get_mut(id) {
            record.retry();
        }
    }

    pub(crate) fn confirm(&mut self, id: &ListingId) {
        if let Some(record) = self.records.get_mut(id) {
            record.confirm();
        }
    }

    pub(crate) fn fail(&mut self, id: &ListingId, stage: RemoteStage, error: &str) {
        if let Some(record) = self.records.get_mut(id) {
            record.fail(stage, error);
        }
    }

    /// A remote like that contradicts a local dislike found during rebuild.
    pub(crate) fn record_conflict(&mut self, id: &ListingId) {
        let mut record = JudgmentRecord::pending(id.clone(), Verdict::Reject);
        record.fail(RemoteStage::RemoveLike, "like still present on server");
        self.records.insert(id.clone(), record);
    }

    pub(crate) fn get(&self, id: &ListingId) -> Option<&JudgmentRecord> {
        self.records.get(id)
    }

    pub(crate) fn with_status(&self, status: JudgmentStatus) -> Vec<JudgmentRecord> {
        self.records.values().filter(|r| r.status == status).cloned().collect()
    }

    /// Approvals whose optimistic mark must survive a rebuild.
    pub(crate) fn live_approvals(&self) -> Vec<ListingId> {
        self.records
            .values()
            .filter(|r| r.verdict == Verdict::Approve && r.status != JudgmentStatus::Failed)
            .map(|r| r.listing_id.clone())
            .collect()
    }

    pub(crate) fn retain_pending(&mut self) {
        self.records.retain(|_, r| r.status == JudgmentStatus::Pending);
    }
}
