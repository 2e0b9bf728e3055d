//! Complete-blog pipeline: title, body, optional humanize pass, meta
//! description, slug. Used by the complete-blog endpoint and by every
//! scheduler tick.

use serde::Serialize;

use crate::errors::AppError;
use crate::generation::content::ContentGenerator;
use crate::humanizer::HumanizerClient;
use crate::store::blogs::make_slug;

/// Everything needed to fill the blog editor (or an auto-post) in one
/// shot. `original_content` snapshots the pre-humanize text so an admin
/// can diff or revert the rewrite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedBlog {
    pub title: String,
    pub slug: String,
    pub meta_description: String,
    pub content: String,
    pub original_content: String,
    pub keyword: String,
}

pub async fn compose_blog(
    generator: &dyn ContentGenerator,
    humanizer: &HumanizerClient,
    keyword: &str,
    additional_context: &str,
    auto_humanize: bool,
) -> Result<ComposedBlog, AppError> {
    let title = generator.generate_title(keyword).await?;

    let original_content = generator.generate_content(keyword, additional_context).await?;
    let content = if auto_humanize {
        humanizer.humanize(&original_content).await
    } else {
        original_content.clone()
    };

    // meta description reflects what will actually be published
    let meta_description = generator.generate_meta_description(&title, &content).await?;

    Ok(ComposedBlog {
        title,
        slug: make_slug(keyword),
        meta_description,
        content,
        original_content,
        keyword: keyword.to_string(),
    })
}
