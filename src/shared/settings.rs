use serde::{Deserialize, Serialize};
use tokio::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use tracing::{info, warn};

use super::error::{AppError, AppResult};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub gemini: GeminiSettings,
    pub supabase: SupabaseSettings,
    pub admin: AdminSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub pin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: String::new(),
        }
    }
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self { pin: "2024".to_string() }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl HttpSettings {
    /// `None` disables the request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl AppSettings {
    pub fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "antigravity", "toma-kitchen")
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    pub fn get_settings_path() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from the platform config directory, creating the file
    /// with defaults on first run, then apply environment overrides.
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_with_env(&path, |name| std::env::var(name).ok()).await
    }

    pub async fn load_with_env<F>(path: &Path, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::load_from(path).await?;
        settings.apply_env(lookup);
        Ok(settings)
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !fs::try_exists(path).await? {
            info!(path = %path.display(), "[Settings] No settings file; writing defaults");
            let settings = Self::default();
            settings.save_to(path).await?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Io(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content)
            .await
            .map_err(|e| AppError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Environment wins over the settings file for credentials.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.gemini.api_key = key;
        }
        if let Some(url) = non_empty("SUPABASE_URL") {
            self.supabase.url = url;
        }
        if let Some(key) = non_empty("SUPABASE_ANON_KEY") {
            self.supabase.anon_key = key;
        }
        if let Some(pin) = non_empty("TOMA_ADMIN_PIN") {
            self.admin.pin = pin;
        }
    }

    /// Checks that the remote services can be reached at all.
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(AppError::Config("API_KEY environment variable not set".to_string()));
        }
        if self.supabase.url.trim().is_empty() || self.supabase.anon_key.trim().is_empty() {
            return Err(AppError::Config("Supabase URL or anonymous key is not provided.".to_string()));
        }
        if self.http.timeout_secs == 0 {
            warn!("[Settings] http.timeout_secs is 0; requests will never time out");
        }
        Ok(())
    }

    /// Copy with secrets replaced, for display.
    pub fn masked(&self) -> Self {
        let mask = |value: &str| {
            if value.is_empty() {
                String::new()
            } else {
                "********".to_string()
            }
        };
        let mut copy = self.clone();
        copy.gemini.api_key = mask(&self.gemini.api_key);
        copy.supabase.anon_key = mask(&self.supabase.anon_key);
        copy.admin.pin = mask(&self.admin.pin);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let settings = AppSettings::load_from(&path).await.unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());

        let reloaded = AppSettings::load_from(&path).await.unwrap();
        assert_eq!(reloaded, settings);
    }

    #[tokio::test]
    async fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        tokio::fs::write(&path, r#"{"gemini": {"model": "gemini-2.0-flash"}}"#)
            .await
            .unwrap();

        let settings = AppSettings::load_from(&path).await.unwrap();
        assert_eq!(settings.gemini.model, "gemini-2.0-flash");
        assert_eq!(settings.gemini.base_url, GeminiSettings::default().base_url);
        assert_eq!(settings.admin.pin, "2024");
    }

    #[tokio::test]
    async fn test_environment_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        tokio::fs::write(
            &path,
            r#"{"gemini": {"api_key": "file-key"}, "supabase": {"url": "https://file.supabase.co"}}"#,
        )
        .await
        .unwrap();

        let env: HashMap<&str, &str> = HashMap::from([("GEMINI_API_KEY", "env-key")]);
        let settings = AppSettings::load_with_env(&path, |name| env.get(name).map(|v| v.to_string()))
            .await
            .unwrap();

        assert_eq!(settings.gemini.api_key, "env-key");
        assert_eq!(settings.supabase.url, "https://file.supabase.co");
    }

    #[test]
    fn test_env_overrides_and_validation() {
        let mut settings = AppSettings::default();
        assert!(settings.validate().is_err());

        let env: HashMap<&str, &str> = HashMap::from([
            ("API_KEY", "gemini-key"),
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("TOMA_ADMIN_PIN", " "),
        ]);
        settings.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(settings.gemini.api_key, "gemini-key");
        assert_eq!(settings.admin.pin, "2024");
        assert!(settings.validate().is_ok());
        assert_eq!(settings.http.timeout(), Some(Duration::from_secs(60)));

        let masked = settings.masked();
        assert_eq!(masked.gemini.api_key, "********");
        assert_eq!(masked.supabase.url, settings.supabase.url);
    }
}
