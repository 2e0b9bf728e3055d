use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::EnvOverrides;
use crate::errors::AppError;

use super::{load_or, write_pretty};

pub const DEFAULT_POST_INTERVAL_MINUTES: u32 = 30;

const MASK_PREFIX: &str = "****";

/// The stored settings document (`settings.json`), round-tripped with the
/// admin UI as-is. Secrets live here in the clear and are masked at the
/// API boundary by [`Settings::masked`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auto_post_enabled: bool,
    pub post_interval_minutes: u32,
    pub max_posts_per_day: u32,
    #[serde(rename = "defaultCTA")]
    pub default_cta: String,
    pub website_url: String,
    pub openai_api_key: String,
    pub humanizer_api_key: String,
    pub humanizer_api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            auto_post_enabled: false,
            post_interval_minutes: 30,
            max_posts_per_day: 48,
            default_cta:
                "Ready to start your business? Visit EZincorporation.in for expert assistance!"
                    .to_string(),
            website_url: "https://ezincorporation.in".to_string(),
            openai_api_key: String::new(),
            humanizer_api_key: String::new(),
            humanizer_api_url: String::new(),
        }
    }
}

impl Settings {
    /// Copy safe for the wire: API keys reduced to `****` plus the last
    /// four characters, empty keys stay empty.
    pub fn masked(&self) -> Settings {
        Settings {
            openai_api_key: mask_key(&self.openai_api_key),
            humanizer_api_key: mask_key(&self.humanizer_api_key),
            ..self.clone()
        }
    }
}

/// Partial update from `PUT /api/settings`. Absent fields keep their
/// stored value; a masked key value keeps the stored secret, an empty
/// string clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub auto_post_enabled: Option<bool>,
    pub post_interval_minutes: Option<u32>,
    pub max_posts_per_day: Option<u32>,
    #[serde(rename = "defaultCTA")]
    pub default_cta: Option<String>,
    pub website_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub humanizer_api_key: Option<String>,
    pub humanizer_api_url: Option<String>,
}

impl SettingsPatch {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.auto_post_enabled {
            settings.auto_post_enabled = v;
        }
        if let Some(v) = self.post_interval_minutes {
            settings.post_interval_minutes = v;
        }
        if let Some(v) = self.max_posts_per_day {
            settings.max_posts_per_day = v;
        }
        if let Some(v) = self.default_cta {
            settings.default_cta = v;
        }
        if let Some(v) = self.website_url {
            settings.website_url = v;
        }
        if let Some(v) = self.openai_api_key {
            if !v.starts_with(MASK_PREFIX) {
                settings.openai_api_key = v;
            }
        }
        if let Some(v) = self.humanizer_api_key {
            if !v.starts_with(MASK_PREFIX) {
                settings.humanizer_api_key = v;
            }
        }
        if let Some(v) = self.humanizer_api_url {
            settings.humanizer_api_url = v;
        }
    }
}

/// Body of `POST /api/settings/api-keys`. Only non-empty values are
/// written; this path performs no mask filtering.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKeysUpdate {
    pub openai_api_key: Option<String>,
    pub humanizer_api_key: Option<String>,
    pub humanizer_api_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    pub openai_configured: bool,
    pub humanizer_configured: bool,
}

/// Applies deployment env overrides on top of stored values. The interval
/// is normalized here as well: a stored zero falls back to the default.
pub fn resolve(mut settings: Settings, overrides: &EnvOverrides) -> Settings {
    if settings.post_interval_minutes < 1 {
        settings.post_interval_minutes = DEFAULT_POST_INTERVAL_MINUTES;
    }
    if let Some(enabled) = overrides.auto_post_enabled {
        settings.auto_post_enabled = enabled;
    }
    if let Some(minutes) = overrides.post_interval_minutes {
        settings.post_interval_minutes = minutes;
    }
    if let Some(key) = &overrides.humanizer_api_key {
        settings.humanizer_api_key = key.clone();
    }
    if let Some(url) = &overrides.humanizer_api_url {
        settings.humanizer_api_url = url.clone();
    }
    if let Some(url) = &overrides.website_url {
        settings.website_url = url.clone();
    }
    settings
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    overrides: EnvOverrides,
}

impl SettingsStore {
    pub fn new(data_dir: &Path, overrides: EnvOverrides) -> Self {
        SettingsStore {
            path: data_dir.join("settings.json"),
            overrides,
        }
    }

    /// Raw stored settings, secrets in the clear. For internal use and
    /// masking; never serialized to a response directly.
    pub async fn get(&self) -> Settings {
        load_or(&self.path).await
    }

    /// Stored settings with env overrides applied. The scheduler and the
    /// humanizer consult this view, never the raw file.
    pub async fn effective(&self) -> Settings {
        resolve(self.get().await, &self.overrides)
    }

    pub async fn put(&self, patch: SettingsPatch) -> Result<Settings, AppError> {
        let mut settings = self.get().await;
        patch.apply(&mut settings);
        write_pretty(&self.path, &settings).await?;
        Ok(settings)
    }

    pub async fn update_api_keys(&self, update: ApiKeysUpdate) -> Result<(), AppError> {
        let mut settings = self.get().await;
        if let Some(key) = update.openai_api_key.filter(|k| !k.is_empty()) {
            settings.openai_api_key = key;
        }
        if let Some(key) = update.humanizer_api_key.filter(|k| !k.is_empty()) {
            settings.humanizer_api_key = key;
        }
        if let Some(url) = update.humanizer_api_url.filter(|u| !u.is_empty()) {
            settings.humanizer_api_url = url;
        }
        write_pretty(&self.path, &settings).await
    }

    /// Configuration flags derived from the raw file: env-provided keys do
    /// not count as "configured" in the admin UI.
    pub async fn api_status(&self) -> ApiStatus {
        let settings = self.get().await;
        ApiStatus {
            openai_configured: !settings.openai_api_key.is_empty(),
            humanizer_configured: !settings.humanizer_api_key.is_empty()
                && !settings.humanizer_api_url.is_empty(),
        }
    }
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let tail: String = key
        .chars()
        .skip(key.chars().count().saturating_sub(4))
        .collect();
    format!("{MASK_PREFIX}{tail}")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path(), EnvOverrides::default())
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = make_store(&dir).get().await;

        assert!(!settings.auto_post_enabled);
        assert_eq!(settings.post_interval_minutes, 30);
        assert_eq!(settings.max_posts_per_day, 48);
        assert_eq!(settings.website_url, "https://ezincorporation.in");
        assert!(settings.openai_api_key.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("settings.json"), "{not json")
            .await
            .unwrap();

        let settings = make_store(&dir).get().await;
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_put_merges_partial_patch() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let updated = store
            .put(SettingsPatch {
                post_interval_minutes: Some(15),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.post_interval_minutes, 15);
        // untouched fields keep their defaults
        assert_eq!(updated.max_posts_per_day, 48);
        assert_eq!(
            updated.default_cta,
            "Ready to start your business? Visit EZincorporation.in for expert assistance!"
        );
    }

    #[tokio::test]
    async fn test_masked_key_is_not_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store
            .put(SettingsPatch {
                openai_api_key: Some("sk-test-1234".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        // the UI round-trips the masked view; the stored secret must survive
        store
            .put(SettingsPatch {
                openai_api_key: Some("****1234".to_string()),
                auto_post_enabled: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let settings = store.get().await;
        assert_eq!(settings.openai_api_key, "sk-test-1234");
        assert!(settings.auto_post_enabled);
    }

    #[tokio::test]
    async fn test_empty_string_clears_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store
            .put(SettingsPatch {
                openai_api_key: Some("sk-test-1234".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .put(SettingsPatch {
                openai_api_key: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(store.get().await.openai_api_key.is_empty());
    }

    #[tokio::test]
    async fn test_masked_view_keeps_last_four() {
        let settings = Settings {
            openai_api_key: "sk-test-abcd".to_string(),
            ..Default::default()
        };

        let masked = settings.masked();
        assert_eq!(masked.openai_api_key, "****abcd");
        assert_eq!(masked.humanizer_api_key, "");
    }

    #[tokio::test]
    async fn test_api_keys_update_skips_empty_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store
            .update_api_keys(ApiKeysUpdate {
                openai_api_key: Some("sk-live-9999".to_string()),
                humanizer_api_key: Some(String::new()),
                humanizer_api_url: None,
            })
            .await
            .unwrap();

        let settings = store.get().await;
        assert_eq!(settings.openai_api_key, "sk-live-9999");
        assert!(settings.humanizer_api_key.is_empty());
    }

    #[tokio::test]
    async fn test_api_status_requires_key_and_url_for_humanizer() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        store
            .update_api_keys(ApiKeysUpdate {
                humanizer_api_key: Some("hum-key".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let status = store.api_status().await;
        assert!(!status.openai_configured);
        assert!(!status.humanizer_configured);

        store
            .update_api_keys(ApiKeysUpdate {
                humanizer_api_url: Some("https://humanizer.example/api".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(store.api_status().await.humanizer_configured);
    }

    #[test]
    fn test_resolve_normalizes_interval_and_applies_overrides() {
        let stored = Settings {
            post_interval_minutes: 0,
            ..Default::default()
        };
        let resolved = resolve(stored, &EnvOverrides::default());
        assert_eq!(resolved.post_interval_minutes, 30);

        let overrides = EnvOverrides {
            auto_post_enabled: Some(true),
            post_interval_minutes: Some(5),
            website_url: Some("https://staging.example".to_string()),
            ..Default::default()
        };
        let resolved = resolve(Settings::default(), &overrides);
        assert!(resolved.auto_post_enabled);
        assert_eq!(resolved.post_interval_minutes, 5);
        assert_eq!(resolved.website_url, "https://staging.example");
    }
}
