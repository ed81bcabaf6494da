//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json. Titles are a
//! unique key: an insert that would repeat an existing title is rejected as a
//! whole with [`LedgerError::Duplicate`].

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::CategoryStore;

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
#[derive(Debug)]
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire write lock: {}", e)))?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> LedgerResult<usize> {
        let categories = self
            .categories
            .read()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire read lock: {}", e)))?;
        Ok(categories.len())
    }

    fn persist<'c>(&self, categories: impl Iterator<Item = &'c Category>) -> LedgerResult<()> {
        let mut list: Vec<_> = categories.cloned().collect();
        list.sort_by(|a, b| a.title.cmp(&b.title));
        write_json_atomic(&self.path, &CategoryData { categories: list })
    }
}

impl CategoryStore for CategoryRepository {
    fn find_by_titles(&self, titles: &[String]) -> LedgerResult<Vec<Category>> {
        let categories = self
            .categories
            .read()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        let wanted: HashSet<&str> = titles.iter().map(String::as_str).collect();
        Ok(categories
            .values()
            .filter(|c| wanted.contains(c.title.as_str()))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: CategoryId) -> LedgerResult<Option<Category>> {
        let categories = self
            .categories
            .read()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.get(&id).cloned())
    }

    fn find_all(&self) -> LedgerResult<Vec<Category>> {
        let categories = self
            .categories
            .read()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(list)
    }

    fn insert_many(&self, new_categories: Vec<Category>) -> LedgerResult<Vec<Category>> {
        if new_categories.is_empty() {
            return Ok(new_categories);
        }

        let mut categories = self
            .categories
            .write()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire write lock: {}", e)))?;

        let mut taken: HashSet<&str> = categories.values().map(|c| c.title.as_str()).collect();
        for category in &new_categories {
            category
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            if !taken.insert(category.title.as_str()) {
                return Err(LedgerError::duplicate_category(category.title.clone()));
            }
        }

        // Disk first, memory only once the write succeeded
        self.persist(categories.values().chain(new_categories.iter()))?;

        for category in &new_categories {
            categories.insert(category.id, category.clone());
        }

        Ok(new_categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_find_by_titles() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert_many(vec![Category::new("Food"), Category::new("Rent")])
            .unwrap();

        let found = repo.find_by_titles(&titles(&["Food", "Travel"])).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Food");
    }

    #[test]
    fn test_titles_are_case_sensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert_many(vec![Category::new("Food")]).unwrap();

        assert!(repo.find_by_titles(&titles(&["food"])).unwrap().is_empty());
        repo.insert_many(vec![Category::new("food")]).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_title_rejects_whole_batch() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert_many(vec![Category::new("Food")]).unwrap();

        let err = repo
            .insert_many(vec![Category::new("Rent"), Category::new("Food")])
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_within_batch_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo
            .insert_many(vec![Category::new("Food"), Category::new("Food")])
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("categories.json");
        std::fs::create_dir_all(path.join("blocker")).unwrap();
        let repo = CategoryRepository::new(path);

        let err = repo.insert_many(vec![Category::new("Food")]).unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let inserted = repo.insert_many(vec![Category::new("Food")]).unwrap();
        let id = inserted[0].id;

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.find_by_id(id).unwrap().unwrap().title, "Food");
    }
}
