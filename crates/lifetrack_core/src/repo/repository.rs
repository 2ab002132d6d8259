//! Generic store-mirrored collection shared by every record kind.
//!
//! # Responsibility
//! - Load a kind's collection from its store entry.
//! - Run add/update/delete through the kind's validator and write the whole
//!   collection back after each accepted mutation.
//! - Keep the filtered view in step with the remembered query.
//!
//! # Invariants
//! - Records are newest first; `add` prepends, `update` replaces in place.
//! - The "today" used by date rules comes from [`Clock::today`].
//! - `delete` is idempotent and always re-persists.

use crate::clock::Clock;
use crate::model::EntityId;
use crate::repo::{Record, RepoError, RepoResult};
use crate::search::filter_records;
use crate::store::Storage;
use log::{debug, info, warn};
use uuid::Uuid;

/// In-memory collection of `R` mirrored to one store entry.
///
/// Records are ordered newest first. The filtered view is recomputed from
/// the full collection whenever the collection or the query changes.
pub struct Repository<'s, R: Record> {
    store: &'s Storage,
    clock: &'s dyn Clock,
    items: Vec<R>,
    filtered: Vec<R>,
    query: String,
    filter: R::Filter,
}

impl<'s, R: Record> Repository<'s, R> {
    /// Loads the collection; an unset or unreadable entry yields an empty one.
    pub fn load(store: &'s Storage, clock: &'s dyn Clock) -> Self {
        let items = read_collection::<R>(store);
        Self {
            store,
            clock,
            filtered: items.clone(),
            items,
            query: String::new(),
            filter: R::Filter::default(),
        }
    }

    /// Re-reads the store and clears the active search.
    pub fn reload(&mut self) {
        self.items = read_collection::<R>(self.store);
        self.reset_view();
    }

    /// Full collection, newest first.
    pub fn all(&self) -> &[R] {
        &self.items
    }

    /// Result of the last search, or the full collection.
    pub fn filtered(&self) -> &[R] {
        &self.filtered
    }

    pub fn get(&self, id: EntityId) -> Option<&R> {
        self.items.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validates and prepends a new record, then persists.
    ///
    /// On success the active search is cleared and the stored record is
    /// returned.
    ///
    /// # Errors
    /// [`RepoError::Validation`] when the draft breaks a field rule.
    pub fn add(&mut self, draft: R::Draft) -> RepoResult<R> {
        let now = self.clock.now();
        let record = R::from_draft(draft, Uuid::new_v4(), now);
        if let Err(err) = record.check(None, self.clock.today()) {
            warn!(
                "event=repo_add module=repo entity={} status=rejected reason={}",
                R::KIND,
                err.code()
            );
            return Err(err.into());
        }

        self.items.insert(0, record.clone());
        self.persist("repo_add");
        self.reset_view();
        info!(
            "event=repo_add module=repo entity={} status=ok id={} count={}",
            R::KIND,
            record.id(),
            self.items.len()
        );
        Ok(record)
    }

    /// Merges `patch` over the stored record, validates the result and
    /// replaces it in place.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] for an unknown id (nothing is validated).
    /// - [`RepoError::Validation`] when the merged record breaks a rule.
    pub fn update(&mut self, id: EntityId, patch: R::Patch) -> RepoResult<R> {
        let Some(index) = self.items.iter().position(|record| record.id() == id) else {
            warn!(
                "event=repo_update module=repo entity={} status=not_found id={}",
                R::KIND,
                id
            );
            return Err(RepoError::NotFound(id));
        };

        let now = self.clock.now();
        let current = &self.items[index];
        let merged = current.apply_patch(patch, now);
        if let Err(err) = merged.check(Some(current), self.clock.today()) {
            warn!(
                "event=repo_update module=repo entity={} status=rejected id={} reason={}",
                R::KIND,
                id,
                err.code()
            );
            return Err(err.into());
        }

        self.items[index] = merged.clone();
        self.persist("repo_update");
        self.refresh_view();
        info!(
            "event=repo_update module=repo entity={} status=ok id={}",
            R::KIND,
            id
        );
        Ok(merged)
    }

    /// Removes `id` and persists. Unknown ids are a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn delete(&mut self, id: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|record| record.id() != id);
        let removed = self.items.len() != before;

        self.persist("repo_delete");
        self.refresh_view();
        info!(
            "event=repo_delete module=repo entity={} status=ok id={} removed={}",
            R::KIND,
            id,
            removed
        );
        removed
    }

    /// Recomputes the filtered view from the full collection and remembers
    /// the query for later refreshes.
    pub fn search(&mut self, query: &str, filter: R::Filter) -> &[R] {
        self.query = query.to_string();
        self.filter = filter;
        self.refresh_view();
        debug!(
            "event=repo_search module=repo entity={} status=ok matched={} total={}",
            R::KIND,
            self.filtered.len(),
            self.items.len()
        );
        &self.filtered
    }

    /// Drops the active query; the view shows the full collection again.
    pub fn clear_search(&mut self) {
        self.reset_view();
    }

    fn refresh_view(&mut self) {
        self.filtered = filter_records(&self.items, &self.query, &self.filter);
    }

    fn reset_view(&mut self) {
        self.query.clear();
        self.filter = R::Filter::default();
        self.filtered = self.items.clone();
    }

    fn persist(&self, event: &str) {
        if !self.store.set(R::KIND.storage_key(), &self.items) {
            warn!(
                "event={} module=repo entity={} status=persist_failed count={}",
                event,
                R::KIND,
                self.items.len()
            );
        }
    }
}

fn read_collection<R: Record>(store: &Storage) -> Vec<R> {
    let items: Vec<R> = store.get(R::KIND.storage_key()).unwrap_or_default();
    info!(
        "event=repo_load module=repo entity={} status=ok count={}",
        R::KIND,
        items.len()
    );
    items
}
