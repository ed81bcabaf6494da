//! Category resolution
//!
//! Maps category titles to stored categories, creating the missing ones.
//! Lookups are batched: one store query for the whole title set, then at most
//! one insert per distinct missing title.

use std::collections::{HashMap, HashSet};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Category;
use crate::storage::{CategoryStore, Storage};

/// How many times a batch is re-fetched after a concurrent duplicate insert
const MAX_RESOLVE_ATTEMPTS: usize = 3;

/// Service resolving (and lazily creating) categories by title
pub struct CategoryResolver<'a> {
    categories: &'a dyn CategoryStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(categories: &'a dyn CategoryStore) -> Self {
        Self {
            categories,
            audit: None,
        }
    }

    /// Record created categories in the audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Resolver over the default file-backed storage
    pub fn from_storage(storage: &'a Storage) -> Self {
        Self::new(&storage.categories).with_audit(storage.audit())
    }

    /// Resolve every distinct title to a single stored category
    ///
    /// Titles are matched exactly. Duplicates in `titles` map to the same
    /// category and cause at most one insert. If the store rejects the insert
    /// because another writer created one of the titles in the meantime, the
    /// batch is re-fetched and only the still-missing titles are retried.
    pub fn resolve(&self, titles: &[String]) -> LedgerResult<HashMap<String, Category>> {
        let mut distinct = Vec::new();
        let mut seen = HashSet::new();
        for title in titles {
            if seen.insert(title.as_str()) {
                distinct.push(title.clone());
            }
        }

        if distinct.is_empty() {
            return Ok(HashMap::new());
        }

        let mut attempt = 0;
        loop {
            attempt += 1;

            let mut resolved: HashMap<String, Category> = self
                .categories
                .find_by_titles(&distinct)?
                .into_iter()
                .map(|c| (c.title.clone(), c))
                .collect();

            let missing: Vec<Category> = distinct
                .iter()
                .filter(|title| !resolved.contains_key(title.as_str()))
                .map(|title| Category::new(title.clone()))
                .collect();

            if missing.is_empty() {
                return Ok(resolved);
            }

            match self.categories.insert_many(missing) {
                Ok(created) => {
                    self.log_created(&created);
                    resolved.extend(created.into_iter().map(|c| (c.title.clone(), c)));
                    return Ok(resolved);
                }
                Err(err) if err.is_duplicate() && attempt < MAX_RESOLVE_ATTEMPTS => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Resolve a single title (a one-element batch)
    pub fn resolve_one(&self, title: &str) -> LedgerResult<Category> {
        let title = title.to_string();
        self.resolve(std::slice::from_ref(&title))?
            .remove(&title)
            .ok_or_else(|| LedgerError::category_not_found(title))
    }

    /// All categories, sorted by title
    pub fn list(&self) -> LedgerResult<Vec<Category>> {
        self.categories.find_all()
    }

    fn log_created(&self, created: &[Category]) {
        let Some(audit) = self.audit else {
            return;
        };

        let entries: Vec<_> = created
            .iter()
            .map(|c| {
                AuditEntry::create(
                    EntityType::Category,
                    c.id.to_string(),
                    Some(c.title.clone()),
                    c,
                )
            })
            .collect();
        audit.log_committed(&entries);
    }
}
