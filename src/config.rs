//! Environment-driven configuration.
//!
//! Nothing here is validated upfront: an empty cloud name or preset simply
//! makes every upload fail when the request is made.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_STORAGE_BASE_URL: &str = "https://api.cloudinary.com";
pub const DEFAULT_ENHANCE_ENDPOINT: &str = "https://api.ryzendesu.vip/api/ai/remini";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;
pub const STORE_FILE: &str = "store.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub cloud_name: String,
    pub upload_preset: String,
    pub storage_base_url: String,
    pub enhance_endpoint: String,
    pub data_dir: PathBuf,
    pub http_timeout_secs: u64,
}

/// Where uploaded images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub base_url: String,
    pub cloud_name: String,
    pub upload_preset: String,
}

impl Destination {
    pub fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| -> String {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(v) => v.trim().to_string(),
                None => {
                    log::info!("{key} not set, using default: {default:?}");
                    default.to_string()
                }
            }
        };

        let http_timeout_secs = lookup("PIXUP_HTTP_TIMEOUT_SECS")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    log::warn!("Invalid PIXUP_HTTP_TIMEOUT_SECS value: {raw:?}");
                    None
                }
            })
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        let data_dir = lookup("PIXUP_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(&lookup));

        Self {
            cloud_name: var("PIXUP_CLOUD_NAME", ""),
            upload_preset: var("PIXUP_UPLOAD_PRESET", ""),
            storage_base_url: var("PIXUP_STORAGE_BASE_URL", DEFAULT_STORAGE_BASE_URL),
            enhance_endpoint: var("PIXUP_ENHANCE_ENDPOINT", DEFAULT_ENHANCE_ENDPOINT),
            data_dir,
            http_timeout_secs,
        }
    }

    pub fn destination(&self) -> Destination {
        Destination {
            base_url: self.storage_base_url.clone(),
            cloud_name: self.cloud_name.clone(),
            upload_preset: self.upload_preset.clone(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}

fn default_data_dir<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(xdg) = lookup("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("pixup");
    }
    if let Some(home) = lookup("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".local").join("share").join("pixup");
    }
    PathBuf::from(".pixup")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config.cloud_name, "");
        assert_eq!(config.upload_preset, "");
        assert_eq!(config.storage_base_url, DEFAULT_STORAGE_BASE_URL);
        assert_eq!(config.enhance_endpoint, DEFAULT_ENHANCE_ENDPOINT);
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.data_dir, PathBuf::from(".pixup"));
    }

    #[test]
    fn reads_values_from_lookup() {
        let config = config_from(&[
            ("PIXUP_CLOUD_NAME", "demo"),
            ("PIXUP_UPLOAD_PRESET", " unsigned "),
            ("PIXUP_DATA_DIR", "/tmp/pixup-data"),
            ("PIXUP_HTTP_TIMEOUT_SECS", "30"),
        ]);
        assert_eq!(config.cloud_name, "demo");
        assert_eq!(config.upload_preset, "unsigned");
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.store_path(), PathBuf::from("/tmp/pixup-data/store.json"));
    }

    #[test]
    fn invalid_timeout_falls_back() {
        let config = config_from(&[("PIXUP_HTTP_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        let config = config_from(&[("PIXUP_HTTP_TIMEOUT_SECS", "0")]);
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn data_dir_prefers_xdg_then_home() {
        let config = config_from(&[("XDG_DATA_HOME", "/xdg"), ("HOME", "/home/u")]);
        assert_eq!(config.data_dir, PathBuf::from("/xdg/pixup"));
        let config = config_from(&[("HOME", "/home/u")]);
        assert_eq!(config.data_dir, PathBuf::from("/home/u/.local/share/pixup"));
    }

    #[test]
    fn upload_url_includes_cloud_name() {
        let dest = config_from(&[("PIXUP_CLOUD_NAME", "demo")]).destination();
        assert_eq!(
            dest.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        let dest = Destination {
            base_url: "http://localhost:9000/".into(),
            cloud_name: String::new(),
            upload_preset: String::new(),
        };
        assert_eq!(dest.upload_url(), "http://localhost:9000/v1_1//image/upload");
    }
}
