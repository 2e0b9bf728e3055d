use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

use super::{load_or, write_pretty};

pub const DEFAULT_CATEGORY: &str = "Business Incorporation";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

/// A blog post as persisted in `blogs.json` and served to the admin UI.
/// `published_at` is set the first time a post goes live and survives a
/// later unpublish, so republishing keeps the original date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub original_content: String,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: BlogStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_auto_generated: bool,
}

/// Fields accepted when creating a blog. Everything except the title is
/// optional; handlers validate the title before calling the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBlog {
    pub title: String,
    pub slug: String,
    pub meta_description: String,
    pub content: String,
    pub original_content: String,
    pub keyword: String,
    pub tags: Vec<String>,
    pub category: String,
    pub status: Option<BlogStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_auto_generated: bool,
}

/// Partial update; `id` and `created_at` are not part of the patch and
/// cannot be changed. `published_at` can be set but not cleared.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub meta_description: Option<String>,
    pub content: Option<String>,
    pub original_content: Option<String>,
    pub keyword: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub status: Option<BlogStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_auto_generated: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct BlogsFile {
    blogs: Vec<Blog>,
}

#[derive(Debug, Clone)]
pub struct BlogStore {
    path: PathBuf,
}

impl BlogStore {
    pub fn new(data_dir: &Path) -> Self {
        BlogStore {
            path: data_dir.join("blogs.json"),
        }
    }

    async fn read(&self) -> BlogsFile {
        load_or(&self.path).await
    }

    async fn write(&self, file: &BlogsFile) -> Result<(), AppError> {
        write_pretty(&self.path, file).await
    }

    /// All blogs, newest first.
    pub async fn list(&self) -> Vec<Blog> {
        let mut blogs = self.read().await.blogs;
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        blogs
    }

    pub async fn get(&self, id: Uuid) -> Result<Blog, AppError> {
        self.read()
            .await
            .blogs
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))
    }

    pub async fn create(&self, new: NewBlog) -> Result<Blog, AppError> {
        let now = Utc::now();
        let status = new.status.unwrap_or_default();
        let blog = Blog {
            id: Uuid::new_v4(),
            slug: if new.slug.is_empty() {
                make_slug(&new.title)
            } else {
                new.slug
            },
            title: new.title,
            meta_description: new.meta_description,
            content: new.content,
            original_content: new.original_content,
            keyword: new.keyword,
            tags: new.tags,
            category: if new.category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                new.category
            },
            status,
            published_at: match (status, new.published_at) {
                (BlogStatus::Published, None) => Some(now),
                (_, provided) => provided,
            },
            created_at: now,
            updated_at: now,
            is_auto_generated: new.is_auto_generated,
        };

        let mut file = self.read().await;
        file.blogs.insert(0, blog.clone());
        self.write(&file).await?;
        Ok(blog)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateBlog) -> Result<Blog, AppError> {
        self.mutate(id, |blog| {
            if let Some(v) = patch.title {
                blog.title = v;
            }
            if let Some(v) = patch.slug {
                blog.slug = v;
            }
            if let Some(v) = patch.meta_description {
                blog.meta_description = v;
            }
            if let Some(v) = patch.content {
                blog.content = v;
            }
            if let Some(v) = patch.original_content {
                blog.original_content = v;
            }
            if let Some(v) = patch.keyword {
                blog.keyword = v;
            }
            if let Some(v) = patch.tags {
                blog.tags = v;
            }
            if let Some(v) = patch.category {
                blog.category = v;
            }
            if let Some(v) = patch.status {
                blog.status = v;
            }
            if let Some(v) = patch.published_at {
                blog.published_at = Some(v);
            }
            if let Some(v) = patch.is_auto_generated {
                blog.is_auto_generated = v;
            }
        })
        .await
    }

    pub async fn publish(&self, id: Uuid) -> Result<Blog, AppError> {
        self.mutate(id, |blog| {
            blog.status = BlogStatus::Published;
            if blog.published_at.is_none() {
                blog.published_at = Some(Utc::now());
            }
        })
        .await
    }

    pub async fn unpublish(&self, id: Uuid) -> Result<Blog, AppError> {
        self.mutate(id, |blog| {
            blog.status = BlogStatus::Draft;
        })
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut file = self.read().await;
        let before = file.blogs.len();
        file.blogs.retain(|b| b.id != id);
        if file.blogs.len() == before {
            return Err(AppError::NotFound("Blog not found".to_string()));
        }
        self.write(&file).await
    }

    async fn mutate<F>(&self, id: Uuid, apply: F) -> Result<Blog, AppError>
    where
        F: FnOnce(&mut Blog),
    {
        let mut file = self.read().await;
        let blog = file
            .blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;
        apply(blog);
        blog.updated_at = Utc::now();
        let updated = blog.clone();
        self.write(&file).await?;
        Ok(updated)
    }
}

/// Derives a URL slug from a keyword or title: lowercased, runs of
/// non-alphanumerics collapsed to single dashes, plus a base36 timestamp
/// suffix so repeated generations for the same keyword stay distinct.
pub fn make_slug(source: &str) -> String {
    let mut base = String::new();
    let mut pending_dash = false;
    for c in source.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !base.is_empty() {
                base.push('-');
            }
            base.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    format!(
        "{base}-guide-{}",
        to_base36(Utc::now().timestamp_millis() as u128)
    )
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    out.into_iter().rev().collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store(dir: &tempfile::TempDir) -> BlogStore {
        BlogStore::new(dir.path())
    }

    fn make_new_blog(title: &str) -> NewBlog {
        NewBlog {
            title: title.to_string(),
            content: "Some content".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_defaults_and_prepends() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let first = store.create(make_new_blog("First post")).await.unwrap();
        let second = store.create(make_new_blog("Second post")).await.unwrap();

        assert_eq!(first.status, BlogStatus::Draft);
        assert_eq!(first.category, DEFAULT_CATEGORY);
        assert!(first.published_at.is_none());
        assert!(first.slug.starts_with("first-post-guide-"));
        assert!(!first.is_auto_generated);

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
    }

    #[tokio::test]
    async fn test_create_published_stamps_published_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let blog = store
            .create(NewBlog {
                status: Some(BlogStatus::Published),
                ..make_new_blog("Live post")
            })
            .await
            .unwrap();

        assert_eq!(blog.status, BlogStatus::Published);
        assert!(blog.published_at.is_some());
    }

    #[tokio::test]
    async fn test_update_patches_fields_and_bumps_updated_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        let blog = store.create(make_new_blog("Draft post")).await.unwrap();

        let updated = store
            .update(
                blog.id,
                UpdateBlog {
                    title: Some("Edited post".to_string()),
                    tags: Some(vec!["GST".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, blog.id);
        assert_eq!(updated.title, "Edited post");
        assert_eq!(updated.tags, vec!["GST".to_string()]);
        assert_eq!(updated.created_at, blog.created_at);
        assert!(updated.updated_at >= blog.updated_at);
        // untouched fields survive
        assert_eq!(updated.content, "Some content");
        assert!(!updated.is_auto_generated);

        let flagged = store
            .update(
                blog.id,
                UpdateBlog {
                    is_auto_generated: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(flagged.is_auto_generated);
    }

    #[tokio::test]
    async fn test_publish_then_unpublish_keeps_published_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        let blog = store.create(make_new_blog("Cycle post")).await.unwrap();

        let published = store.publish(blog.id).await.unwrap();
        let first_publish = published.published_at;
        assert_eq!(published.status, BlogStatus::Published);
        assert!(first_publish.is_some());

        let unpublished = store.unpublish(blog.id).await.unwrap();
        assert_eq!(unpublished.status, BlogStatus::Draft);
        assert_eq!(unpublished.published_at, first_publish);

        // republishing keeps the original timestamp
        let republished = store.publish(blog.id).await.unwrap();
        assert_eq!(republished.published_at, first_publish);
    }

    #[tokio::test]
    async fn test_get_and_delete_unknown_id_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let missing = Uuid::new_v4();
        assert!(matches!(
            store.get(missing).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(missing).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_the_blog() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        let blog = store.create(make_new_blog("Doomed post")).await.unwrap();

        store.delete(blog.id).await.unwrap();
        assert!(store.list().await.is_empty());
    }

    #[test]
    fn test_slug_collapses_punctuation_and_keeps_base36_suffix() {
        let slug = make_slug("GST Registration (Online)!");
        assert!(slug.starts_with("gst-registration-online-guide-"));

        let suffix = slug.rsplit("guide-").next().unwrap();
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(46_655), "zzz");
    }
}
