//! Dynamic `sitemap.xml` for the marketing site.
//!
//! Static marketing pages are listed with fixed crawl hints; published blog
//! posts are appended with their publish date as `lastmod`. Drafts never
//! appear.

use std::fmt::Write as _;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{Local, NaiveDate};

use crate::state::AppState;
use crate::store::blogs::{Blog, BlogStatus};

/// Marketing pages that exist regardless of blog content, with their
/// change frequency and priority hints.
const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("", "weekly", "1.0"),
    ("/how-it-works", "monthly", "0.8"),
    ("/blog", "daily", "0.9"),
    ("/pricing", "weekly", "0.8"),
    ("/contact", "monthly", "0.7"),
];

/// GET /sitemap.xml
pub async fn handle_sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.settings.effective().await;
    let blogs = state.blogs.list().await;
    let today = Local::now().date_naive();

    let xml = build_sitemap(&settings.website_url, &blogs, today);
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

pub fn build_sitemap(website_url: &str, blogs: &[Blog], today: NaiveDate) -> String {
    let today = today.to_string();

    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        "  <!-- Main Pages -->\n",
    ));
    for (path, changefreq, priority) in STATIC_PAGES {
        push_url(
            &mut xml,
            &format!("{website_url}{path}"),
            &today,
            changefreq,
            priority,
        );
    }

    for blog in blogs.iter().filter(|b| b.status == BlogStatus::Published) {
        let lastmod = blog
            .published_at
            .map(|t| t.date_naive().to_string())
            .unwrap_or_else(|| today.clone());
        push_url(
            &mut xml,
            &format!("{website_url}/blog/{}", blog.slug),
            &lastmod,
            "monthly",
            "0.7",
        );
    }

    xml.push_str("</urlset>");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    // writing into a String cannot fail
    let _ = write!(
        xml,
        "  <url>\n    <loc>{loc}</loc>\n    <lastmod>{lastmod}</lastmod>\n    \
         <changefreq>{changefreq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n"
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn make_blog(slug: &str, status: BlogStatus, published_at: Option<DateTime<Utc>>) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: slug.to_string(),
            slug: slug.to_string(),
            meta_description: String::new(),
            content: String::new(),
            original_content: String::new(),
            keyword: String::new(),
            tags: Vec::new(),
            category: String::new(),
            status,
            published_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_auto_generated: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_lists_the_static_pages() {
        let xml = build_sitemap("https://example.in", &[], today());

        assert_eq!(xml.matches("<url>").count(), 5);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://example.in</loc>"));
        assert!(xml.contains("<loc>https://example.in/how-it-works</loc>"));
        assert!(xml.contains("<lastmod>2025-03-14</lastmod>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn test_published_blogs_use_their_publish_date() {
        let published_at = Utc.with_ymd_and_hms(2025, 2, 10, 9, 30, 0).unwrap();
        let blogs = vec![
            make_blog("register-a-company", BlogStatus::Published, Some(published_at)),
            make_blog("unfinished-draft", BlogStatus::Draft, None),
        ];

        let xml = build_sitemap("https://example.in", &blogs, today());

        assert!(xml.contains("<loc>https://example.in/blog/register-a-company</loc>"));
        assert!(xml.contains("<lastmod>2025-02-10</lastmod>"));
        assert!(!xml.contains("unfinished-draft"));
        assert_eq!(xml.matches("<url>").count(), 6);
    }

    #[test]
    fn test_published_blog_without_date_falls_back_to_today() {
        let blogs = vec![make_blog("no-date", BlogStatus::Published, None)];

        let xml = build_sitemap("https://example.in", &blogs, today());

        assert!(xml.contains("<loc>https://example.in/blog/no-date</loc>"));
        assert_eq!(xml.matches("<lastmod>2025-03-14</lastmod>").count(), 6);
    }
}
