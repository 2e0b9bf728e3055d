use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

use super::{load_or, write_pretty};

/// The keyword pool document (`keywords.json`): topic keywords the
/// scheduler draws from, plus CTA sentence variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSet {
    pub keywords: Vec<String>,
    pub sentences: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct KeywordStore {
    path: PathBuf,
}

impl KeywordStore {
    pub fn new(data_dir: &Path) -> Self {
        KeywordStore {
            path: data_dir.join("keywords.json"),
        }
    }

    pub async fn get(&self) -> KeywordSet {
        load_or(&self.path).await
    }

    /// Exact-match duplicates are skipped without touching the file.
    pub async fn add_keyword(&self, keyword: &str) -> Result<KeywordSet, AppError> {
        let mut set = self.get().await;
        if !set.keywords.iter().any(|k| k == keyword) {
            set.keywords.push(keyword.to_string());
            write_pretty(&self.path, &set).await?;
        }
        Ok(set)
    }

    pub async fn remove_keyword(&self, keyword: &str) -> Result<KeywordSet, AppError> {
        let mut set = self.get().await;
        set.keywords.retain(|k| k != keyword);
        write_pretty(&self.path, &set).await?;
        Ok(set)
    }

    pub async fn add_sentence(&self, sentence: &str) -> Result<KeywordSet, AppError> {
        let mut set = self.get().await;
        if !set.sentences.iter().any(|s| s == sentence) {
            set.sentences.push(sentence.to_string());
            write_pretty(&self.path, &set).await?;
        }
        Ok(set)
    }

    /// An out-of-range index leaves the set unchanged.
    pub async fn remove_sentence(&self, index: usize) -> Result<KeywordSet, AppError> {
        let mut set = self.get().await;
        if index < set.sentences.len() {
            set.sentences.remove(index);
            write_pretty(&self.path, &set).await?;
        }
        Ok(set)
    }

    /// Bulk replace from the admin UI; `None` keeps the stored list.
    pub async fn replace(
        &self,
        keywords: Option<Vec<String>>,
        sentences: Option<Vec<String>>,
    ) -> Result<KeywordSet, AppError> {
        let mut set = self.get().await;
        if let Some(keywords) = keywords {
            set.keywords = keywords;
        }
        if let Some(sentences) = sentences {
            set.sentences = sentences;
        }
        write_pretty(&self.path, &set).await?;
        Ok(set)
    }

    /// Uniform pick for auto-posting; `None` when the pool is empty.
    pub async fn random_keyword(&self) -> Option<String> {
        let set = self.get().await;
        set.keywords.choose(&mut rand::thread_rng()).cloned()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store(dir: &tempfile::TempDir) -> KeywordStore {
        KeywordStore::new(dir.path())
    }

    #[tokio::test]
    async fn test_add_keyword_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store.add_keyword("GST registration").await.unwrap();
        let set = store.add_keyword("GST registration").await.unwrap();

        assert_eq!(set.keywords, vec!["GST registration".to_string()]);
    }

    #[tokio::test]
    async fn test_keyword_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store.add_keyword("LLP registration").await.unwrap();
        let set = store.add_keyword("llp registration").await.unwrap();

        assert_eq!(set.keywords.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_keyword_by_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store.add_keyword("company registration").await.unwrap();
        store.add_keyword("trademark filing").await.unwrap();
        let set = store.remove_keyword("company registration").await.unwrap();

        assert_eq!(set.keywords, vec!["trademark filing".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_sentence_out_of_range_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store.add_sentence("Contact us today!").await.unwrap();
        let set = store.remove_sentence(5).await.unwrap();

        assert_eq!(set.sentences, vec!["Contact us today!".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_sentence_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store.add_sentence("First CTA").await.unwrap();
        store.add_sentence("Second CTA").await.unwrap();
        let set = store.remove_sentence(0).await.unwrap();

        assert_eq!(set.sentences, vec!["Second CTA".to_string()]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_only_provided_lists() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store.add_keyword("old keyword").await.unwrap();
        store.add_sentence("old sentence").await.unwrap();

        let set = store
            .replace(Some(vec!["new keyword".to_string()]), None)
            .await
            .unwrap();

        assert_eq!(set.keywords, vec!["new keyword".to_string()]);
        assert_eq!(set.sentences, vec!["old sentence".to_string()]);
    }

    #[tokio::test]
    async fn test_random_keyword_from_empty_pool_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        assert!(store.random_keyword().await.is_none());

        store.add_keyword("GST registration").await.unwrap();
        assert_eq!(
            store.random_keyword().await.as_deref(),
            Some("GST registration")
        );
    }
}
