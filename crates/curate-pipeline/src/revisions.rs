// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Revision recording: every draft, edit, and revert appends a `Revision`
//! row with a sequence number strictly increasing per edition.

use curate_core::{Clock, Edition, IdGen, Revision, RevisionSource};
use curate_store::{Repository, StoreError};
use serde_json::Value as Json;

pub struct RevisionRecorder<I: IdGen, C: Clock> {
    revisions: Repository<Revision, C>,
    editions: Repository<Edition, C>,
    ids: I,
    clock: C,
}

impl<I: IdGen, C: Clock> RevisionRecorder<I, C> {
    pub fn new(revisions: Repository<Revision, C>, editions: Repository<Edition, C>, ids: I, clock: C) -> Self {
        Self {
            revisions,
            editions,
            ids,
            clock,
        }
    }

    async fn next_sequence(&self, edition_id: &str) -> Result<u64, StoreError> {
        let latest: Vec<Revision> = self
            .revisions
            .query(
                "SELECT TOP 1 * FROM c WHERE c.edition_id = @edition_id AND NOT IS_DEFINED(c.deleted_at) ORDER BY c.sequence DESC",
                &[("@edition_id", Json::from(edition_id))],
            )
            .await?;
        Ok(latest.first().map(|r| r.sequence + 1).unwrap_or(1))
    }

    /// Append a revision row for a draft/edit write. Does not itself touch
    /// the edition's `content` — callers write the edition first so a
    /// reader never observes a revision without its corresponding content.
    pub async fn record(
        &self,
        edition_id: &str,
        source: RevisionSource,
        trigger_id: &str,
        content: Json,
        summary: impl Into<String>,
    ) -> Result<Revision, StoreError> {
        let sequence = self.next_sequence(edition_id).await?;
        let revision = Revision::new(
            self.ids.next(),
            edition_id,
            sequence,
            source,
            trigger_id,
            content,
            summary,
            self.clock.now(),
        );
        self.revisions.create(revision).await
    }

    /// Reverts an edition's content to a prior revision, recording the
    /// revert itself as a new revision (Git-style: history is append-only).
    pub async fn revert(&self, revision_id: &str, edition_id: &str) -> Result<Option<Revision>, StoreError> {
        let Some(target) = self.revisions.get(revision_id, edition_id).await? else {
            return Ok(None);
        };
        let Some(mut edition) = self.editions.get(edition_id, edition_id).await? else {
            return Ok(None);
        };

        edition.content = target
            .content
            .as_object()
            .cloned()
            .unwrap_or_default();
        self.editions.update(edition).await?;

        let revert = self
            .record(
                edition_id,
                RevisionSource::Revert,
                revision_id,
                target.content.clone(),
                format!("Reverted to revision #{}", target.sequence),
            )
            .await?;
        Ok(Some(revert))
    }
}

#[cfg(test)]
#[path = "revisions_tests.rs"]
mod tests;
