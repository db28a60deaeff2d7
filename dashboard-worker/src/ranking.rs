//! Leaderboard ranking and pagination
//!
//! Ranking is a stable descending sort, so identical data always renders in
//! the same order. Pagination clamps an out-of-range page back to the first
//! page instead of failing; this is what happens when a refresh shrinks the
//! entity list under a page the user had open.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::types::RankedEntity;

/// Current page of a leaderboard, owned by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page_index: usize,
    pub page_size: NonZeroUsize,
}

impl PageState {
    pub fn new(page_index: usize, page_size: NonZeroUsize) -> Self {
        Self { page_index, page_size }
    }

    /// First page with the given size
    pub fn first(page_size: NonZeroUsize) -> Self {
        Self::new(0, page_size)
    }

    /// Number of pages for `total` entities (at least 1)
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.get()).max(1)
    }

    /// Reset to the first page if the index no longer exists
    pub fn clamp(self, page_count: usize) -> Self {
        if self.page_index >= page_count {
            Self { page_index: 0, ..self }
        } else {
            self
        }
    }

    pub fn is_first(&self) -> bool {
        self.page_index == 0
    }

    pub fn is_last(&self, page_count: usize) -> bool {
        self.page_index + 1 >= page_count
    }

    /// Next page, or unchanged on the last page
    pub fn next(self, page_count: usize) -> Self {
        if self.is_last(page_count) {
            self
        } else {
            Self { page_index: self.page_index + 1, ..self }
        }
    }

    /// Previous page, or unchanged on the first page
    pub fn prev(self) -> Self {
        if self.is_first() {
            self
        } else {
            Self { page_index: self.page_index - 1, ..self }
        }
    }
}

/// One page of a ranked list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: &'a [RankedEntity],
    /// Effective page after clamping
    pub state: PageState,
    pub page_count: usize,
}

impl Page<'_> {
    /// Controls are hidden for single-page lists
    pub fn shows_controls(&self) -> bool {
        self.page_count > 1
    }

    /// `"Page 2 of 3"`
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.state.page_index + 1, self.page_count)
    }
}

/// Sort descending by count, keeping input order for ties
pub fn rank(entities: &[RankedEntity]) -> Vec<RankedEntity> {
    let mut ranked = entities.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Slice one page out of a ranked list
pub fn paginate(ranked: &[RankedEntity], state: PageState) -> Page<'_> {
    let page_count = state.page_count(ranked.len());
    let state = state.clamp(page_count);

    let size = state.page_size.get();
    let start = (state.page_index * size).min(ranked.len());
    let end = (start + size).min(ranked.len());

    Page {
        items: &ranked[start..end],
        state,
        page_count,
    }
}
