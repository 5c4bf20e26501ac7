//! "Recently viewed" list per visitor.

use crate::model::now_epoch_ms;
use crate::model::product::{Product, ProductId};
use crate::model::recent_view::{expiry_cutoff, RecentView, MAX_RECENT_VIEWS};
use crate::repo::recent_view_repo::RecentViewRepository;
use crate::repo::RepoResult;
use log::debug;

pub struct RecentViewService<R: RecentViewRepository> {
    repo: R,
}

impl<R: RecentViewRepository> RecentViewService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Moves `product` to the front of the visitor's list.
    pub fn record(&self, visitor: &str, product: &Product) -> RepoResult<RecentView> {
        self.record_at(visitor, product, now_epoch_ms())
    }

    pub fn record_at(&self, visitor: &str, product: &Product, now: i64) -> RepoResult<RecentView> {
        let view = RecentView::from_product(visitor, product, now);
        self.repo.record(&view, MAX_RECENT_VIEWS)?;
        Ok(view)
    }

    /// Lists the visitor's entries newest first, dropping expired ones.
    pub fn list(&self, visitor: &str) -> RepoResult<Vec<RecentView>> {
        self.list_at(visitor, now_epoch_ms())
    }

    pub fn list_at(&self, visitor: &str, now: i64) -> RepoResult<Vec<RecentView>> {
        let pruned = self.repo.prune_expired(visitor, expiry_cutoff(now))?;
        if pruned > 0 {
            debug!("event=recent_views_prune module=recent status=ok pruned={pruned}");
        }
        self.repo.list(visitor)
    }

    pub fn forget(&self, visitor: &str, product_id: ProductId) -> RepoResult<bool> {
        self.repo.remove(visitor, product_id)
    }

    pub fn clear(&self, visitor: &str) -> RepoResult<usize> {
        self.repo.clear(visitor)
    }
}
