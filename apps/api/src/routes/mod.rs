//! HTTP route table.
//!
//! Every admin endpoint lives under `/api`; the sitemap is served from the
//! site root so crawlers can fetch it without a prefix.

pub mod blogs;
pub mod health;
pub mod keywords;
pub mod leads;
pub mod settings;
pub mod sitemap;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::scheduler::handlers as scheduler;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Settings API
        .route(
            "/api/settings",
            get(settings::handle_get_settings).put(settings::handle_update_settings),
        )
        .route(
            "/api/settings/api-keys",
            post(settings::handle_update_api_keys),
        )
        .route("/api/settings/api-status", get(settings::handle_api_status))
        // Keyword API
        .route(
            "/api/keywords",
            get(keywords::handle_get_keywords).put(keywords::handle_replace_keywords),
        )
        .route("/api/keywords/keyword", post(keywords::handle_add_keyword))
        .route(
            "/api/keywords/keyword/:keyword",
            delete(keywords::handle_remove_keyword),
        )
        .route("/api/keywords/sentence", post(keywords::handle_add_sentence))
        .route(
            "/api/keywords/sentence/:index",
            delete(keywords::handle_remove_sentence),
        )
        .route("/api/keywords/random", get(keywords::handle_random_keyword))
        // Blog API
        .route(
            "/api/blogs",
            get(blogs::handle_list_blogs).post(blogs::handle_create_blog),
        )
        .route(
            "/api/blogs/:id",
            get(blogs::handle_get_blog)
                .put(blogs::handle_update_blog)
                .delete(blogs::handle_delete_blog),
        )
        .route("/api/blogs/:id/publish", put(blogs::handle_publish_blog))
        .route("/api/blogs/:id/unpublish", put(blogs::handle_unpublish_blog))
        // Generation API
        .route(
            "/api/generate/content",
            post(generation::handle_generate_content),
        )
        .route("/api/generate/title", post(generation::handle_generate_title))
        .route(
            "/api/generate/meta-description",
            post(generation::handle_generate_meta),
        )
        .route("/api/generate/humanize", post(generation::handle_humanize))
        .route(
            "/api/generate/complete-blog",
            post(generation::handle_complete_blog),
        )
        // Scheduler API
        .route("/api/scheduler/status", get(scheduler::handle_status))
        .route("/api/scheduler/history", get(scheduler::handle_history))
        .route("/api/scheduler/toggle", put(scheduler::handle_toggle))
        .route("/api/scheduler/interval", put(scheduler::handle_update_interval))
        .route("/api/scheduler/trigger", post(scheduler::handle_trigger))
        // Lead API
        .route(
            "/api/leads",
            get(leads::handle_list_leads).post(leads::handle_create_lead),
        )
        .route(
            "/api/leads/:id",
            put(leads::handle_update_lead).delete(leads::handle_delete_lead),
        )
        // Public sitemap
        .route("/sitemap.xml", get(sitemap::handle_sitemap))
        .with_state(state)
}
