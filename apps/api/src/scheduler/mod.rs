//! Interval scheduler for auto-posting.
//!
//! At most one timer task exists at any instant: `start` aborts the
//! previous handle before spawning. The timer task owns only the cadence;
//! each firing is spawned as its own task, so stopping or restarting the
//! scheduler cancels future firings but lets a run already in progress
//! finish. Each tick re-reads effective settings, enforces the daily cap,
//! draws a keyword and runs the full generation pipeline. A failed tick
//! is logged and the timer keeps its cadence.

pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::generation::composer::compose_blog;
use crate::generation::content::{fallback_tags, ContentGenerator};
use crate::humanizer::HumanizerClient;
use crate::store::blogs::{Blog, BlogStatus, BlogStore, NewBlog, DEFAULT_CATEGORY};
use crate::store::keywords::KeywordStore;
use crate::store::settings::SettingsStore;

/// Delay before the bootstrap tick, so enabling auto-post shows an effect
/// without waiting out a full interval.
const BOOTSTRAP_DELAY: Duration = Duration::from_secs(5);

/// Everything a tick needs. Cloned into the timer task on start.
#[derive(Clone)]
pub struct TickContext {
    pub settings: SettingsStore,
    pub keywords: KeywordStore,
    pub blogs: BlogStore,
    pub generator: Arc<dyn ContentGenerator>,
    pub humanizer: HumanizerClient,
}

pub enum PostOutcome {
    Published(Blog),
    Skipped(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    pub auto_post_enabled: bool,
    pub post_interval_minutes: u32,
    pub max_posts_per_day: u32,
    pub posts_today: u32,
    pub last_post_time: Option<DateTime<Utc>>,
    pub next_post_time: Option<DateTime<Utc>>,
    pub can_post: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<Blog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone)]
pub struct Scheduler {
    ctx: TickContext,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Scheduler {
    pub fn new(ctx: TickContext) -> Self {
        Scheduler {
            ctx,
            timer: Arc::new(Mutex::new(None)),
        }
    }

    /// Starts (or replaces) the timer: one bootstrap tick shortly after
    /// start, then a fixed cadence.
    pub async fn start(&self, interval_minutes: u32) {
        let mut timer = self.timer.lock().await;
        if let Some(handle) = timer.take() {
            handle.abort();
        }
        let ctx = self.ctx.clone();
        let period = Duration::from_secs(u64::from(interval_minutes) * 60);
        *timer = Some(tokio::spawn(run_timer(ctx, period)));
        info!("Auto-posting enabled every {interval_minutes} minutes");
    }

    /// Idempotent; a stopped scheduler stays stopped. A tick already in
    /// flight finishes on its own.
    pub async fn stop(&self) {
        let mut timer = self.timer.lock().await;
        if let Some(handle) = timer.take() {
            handle.abort();
            info!("Auto-posting stopped");
        }
    }

    pub async fn restart(&self, interval_minutes: u32) {
        // start already cancels any running timer
        self.start(interval_minutes).await;
    }

    /// Runs the posting pipeline on demand. Never errors out: failures
    /// come back as a structured reason for the operator.
    pub async fn trigger(&self) -> TriggerResponse {
        match run_scheduled_post(&self.ctx).await {
            Ok(PostOutcome::Published(blog)) => TriggerResponse {
                success: true,
                blog: Some(blog),
                reason: None,
            },
            Ok(PostOutcome::Skipped(reason)) => TriggerResponse {
                success: false,
                blog: None,
                reason: Some(reason),
            },
            Err(e) => TriggerResponse {
                success: false,
                blog: None,
                reason: Some(e.to_string()),
            },
        }
    }

    /// Derived view over settings plus the blog store: nothing here is
    /// tracked as separate mutable state.
    pub async fn status(&self) -> SchedulerStatus {
        let settings = self.ctx.settings.effective().await;
        let blogs = self.ctx.blogs.list().await;
        let posts_today = posts_today(&blogs, Local::now());
        let last_post_time = last_post_time(&blogs);
        let interval = chrono::Duration::minutes(i64::from(settings.post_interval_minutes));

        SchedulerStatus {
            auto_post_enabled: settings.auto_post_enabled,
            post_interval_minutes: settings.post_interval_minutes,
            max_posts_per_day: settings.max_posts_per_day,
            posts_today: posts_today as u32,
            last_post_time,
            next_post_time: last_post_time.map(|t| t + interval),
            can_post: posts_today < settings.max_posts_per_day as usize,
        }
    }

    /// Auto-generated posts, newest first.
    pub async fn history(&self) -> Vec<Blog> {
        self.ctx
            .blogs
            .list()
            .await
            .into_iter()
            .filter(|b| b.is_auto_generated)
            .collect()
    }
}

async fn run_timer(ctx: TickContext, period: Duration) {
    tokio::time::sleep(BOOTSTRAP_DELAY).await;
    tokio::spawn(tick(ctx.clone()));

    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        tokio::spawn(tick(ctx.clone()));
    }
}

/// One timer firing, detached from the timer task: aborting the timer
/// never cancels a run already in progress. Checks the enabled flag (a
/// disabled scheduler left running posts nothing) and makes sure no error
/// ever escapes the task.
async fn tick(ctx: TickContext) {
    let settings = ctx.settings.effective().await;
    if !settings.auto_post_enabled {
        debug!("Auto-posting disabled, skipping tick");
        return;
    }

    info!("Running scheduled post");
    match run_scheduled_post(&ctx).await {
        Ok(PostOutcome::Published(blog)) => {
            info!("Auto-published \"{}\" ({})", blog.title, blog.slug);
        }
        Ok(PostOutcome::Skipped(reason)) => info!("Scheduled post skipped: {reason}"),
        Err(e) => error!("Scheduled post failed: {e}"),
    }
}

/// The shared posting pipeline: daily cap, keyword draw, generation,
/// persistence. The manual trigger runs this directly, without the
/// enabled check, so an operator can always force a post.
async fn run_scheduled_post(ctx: &TickContext) -> Result<PostOutcome, AppError> {
    let settings = ctx.settings.effective().await;

    let blogs = ctx.blogs.list().await;
    if posts_today(&blogs, Local::now()) >= settings.max_posts_per_day as usize {
        return Ok(PostOutcome::Skipped("daily cap reached".to_string()));
    }

    let Some(keyword) = ctx.keywords.random_keyword().await else {
        return Ok(PostOutcome::Skipped("no keywords available".to_string()));
    };

    let composed = compose_blog(ctx.generator.as_ref(), &ctx.humanizer, &keyword, "", true).await?;

    // tags are cosmetic; a failed tag call must not lose the post
    let tags = match ctx.generator.generate_tags(&composed.content, &keyword).await {
        Ok(tags) => tags,
        Err(e) => {
            warn!("Tag generation failed: {e}; using fallback tags");
            fallback_tags(&keyword)
        }
    };

    let blog = ctx
        .blogs
        .create(NewBlog {
            title: composed.title,
            slug: composed.slug,
            meta_description: composed.meta_description,
            content: composed.content,
            original_content: composed.original_content,
            keyword: composed.keyword,
            tags,
            category: DEFAULT_CATEGORY.to_string(),
            status: Some(BlogStatus::Published),
            published_at: None,
            is_auto_generated: true,
        })
        .await?;

    Ok(PostOutcome::Published(blog))
}

/// Auto-generated posts published within the current local calendar day.
fn posts_today(blogs: &[Blog], now: DateTime<Local>) -> usize {
    let today = now.date_naive();
    blogs
        .iter()
        .filter(|b| b.is_auto_generated)
        .filter_map(|b| b.published_at)
        .filter(|t| t.with_timezone(&Local).date_naive() == today)
        .count()
}

fn last_post_time(blogs: &[Blog]) -> Option<DateTime<Utc>> {
    blogs
        .iter()
        .filter(|b| b.is_auto_generated)
        .filter_map(|b| b.published_at)
        .max()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
