//! Mock tag source for testing

use super::TagSource;
use super::error::{Result, SourceError};
use crate::stats::TagStatsResponse;
use crate::taxonomy::TagNode;
use crate::types::{ItemId, TagId};

/// A recorded `commit_tag_edit` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub target_ids: Vec<ItemId>,
    pub added: Vec<TagId>,
    pub deleted: Vec<TagId>,
}

/// Tag source that serves fixed data and records commits
///
/// Useful for testing sessions without a real catalog
#[derive(Debug, Clone, Default)]
pub struct MockTagSource {
    /// Taxonomy returned by every fetch
    pub roots: Vec<TagNode>,
    /// Stats returned by every fetch, regardless of targets
    pub stats: TagStatsResponse,
    /// Whether fetches should fail
    pub fail_fetch: bool,
    /// Whether commits should fail
    pub fail_commit: bool,
    /// Whether stats fetches should fail once a commit has succeeded
    pub fail_fetch_after_commit: bool,
    /// Successful commits, in call order
    pub commits: Vec<RecordedCommit>,
}

impl MockTagSource {
    #[must_use]
    pub fn new(roots: Vec<TagNode>, stats: TagStatsResponse) -> Self {
        Self {
            roots,
            stats,
            ..Self::default()
        }
    }

    /// Make every commit fail
    #[must_use]
    pub fn failing_commits(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    /// Make stats fetches fail after the first successful commit
    #[must_use]
    pub fn failing_fetch_after_commit(mut self) -> Self {
        self.fail_fetch_after_commit = true;
        self
    }

    /// Make every fetch fail
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.fail_fetch = true;
        self
    }
}

impl TagSource for MockTagSource {
    fn fetch_tag_taxonomy(&self) -> Result<Vec<TagNode>> {
        if self.fail_fetch {
            return Err(SourceError::Unavailable("mock source is offline".to_string()));
        }
        Ok(self.roots.clone())
    }

    fn fetch_tag_stats(&self, _target_ids: &[ItemId]) -> Result<TagStatsResponse> {
        if self.fail_fetch || (self.fail_fetch_after_commit && !self.commits.is_empty()) {
            return Err(SourceError::Unavailable("mock source is offline".to_string()));
        }
        Ok(self.stats.clone())
    }

    fn commit_tag_edit(
        &mut self,
        target_ids: &[ItemId],
        added: &[TagId],
        deleted: &[TagId],
    ) -> Result<()> {
        if self.fail_commit {
            return Err(SourceError::Unavailable("mock commit rejected".to_string()));
        }
        self.commits.push(RecordedCommit {
            target_ids: target_ids.to_vec(),
            added: added.to_vec(),
            deleted: deleted.to_vec(),
        });
        Ok(())
    }
}
