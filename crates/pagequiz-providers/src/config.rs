//! Configuration loading and provider factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pagequiz_core::model::ImagePart;
use pagequiz_core::traits::{
    GenerateRequest, GenerationProvider, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};

use crate::gemini::GeminiProvider;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Top-level pagequiz configuration.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct PagequizConfig {
    /// Gemini API key. Usually supplied through `GEMINI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Output token budget.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Directory containing one subdirectory of page images per topic.
    #[serde(default = "default_topics_dir")]
    pub topics_dir: PathBuf,
    /// Directory quizzes and the manifest are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for PagequizConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagequizConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("topics_dir", &self.topics_dir)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}
fn default_topics_dir() -> PathBuf {
    PathBuf::from("topics")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("quizzes")
}

impl Default for PagequizConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            topics_dir: default_topics_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl PagequizConfig {
    /// The API key, or an actionable error if none was configured.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => anyhow::bail!(
                "{API_KEY_VAR} not found in environment variables. \
                 Please set it in your .env file or export it before running."
            ),
        }
    }

    /// Build a generation request using the configured model and sampling.
    pub fn generate_request(&self, prompt: &str, images: Vec<ImagePart>) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            images,
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Apply `${VAR}` resolution and the `GEMINI_API_KEY` override.
fn apply_env(
    mut config: PagequizConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> PagequizConfig {
    config.api_key = config.api_key.as_deref().map(resolve_env_vars);
    config.base_url = config.base_url.as_deref().map(resolve_env_vars);
    config.model = resolve_env_vars(&config.model);

    if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.is_empty()) {
        config.api_key = Some(key);
    }
    config
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `pagequiz.toml` in the current directory
/// 2. `~/.config/pagequiz/config.toml`
///
/// `GEMINI_API_KEY` in the environment overrides the file's `api_key`.
/// Load `.env` before calling this to have its values picked up.
pub fn load_config() -> Result<PagequizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PagequizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pagequiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<PagequizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config file");
            config
        }
        None => PagequizConfig::default(),
    };

    Ok(apply_env(config, |name| std::env::var(name).ok()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pagequiz"))
}

/// Create the Gemini provider from the configuration.
///
/// Fails before any network activity if no API key is configured.
pub fn create_provider(config: &PagequizConfig) -> Result<Box<dyn GenerationProvider>> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(GeminiProvider::new(api_key, config.base_url.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_PAGEQUIZ_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_PAGEQUIZ_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_PAGEQUIZ_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_PAGEQUIZ_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_self_reference() {
        std::env::set_var("_PAGEQUIZ_SELF_REF", "${_PAGEQUIZ_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_PAGEQUIZ_SELF_REF}"),
            "${_PAGEQUIZ_SELF_REF}"
        );
        assert_eq!(
            resolve_env_vars("a${_PAGEQUIZ_SELF_REF}b${_PAGEQUIZ_SELF_REF}"),
            "a${_PAGEQUIZ_SELF_REF}b${_PAGEQUIZ_SELF_REF}"
        );
        std::env::remove_var("_PAGEQUIZ_SELF_REF");
    }

    #[test]
    fn resolve_env_vars_unterminated() {
        assert_eq!(resolve_env_vars("key-${UNCLOSED"), "key-${UNCLOSED");
        assert_eq!(resolve_env_vars("plain"), "plain");
    }

    #[test]
    fn default_config() {
        let config = PagequizConfig::default();
        assert_eq!(config.model, "gemini-3-pro-preview");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_output_tokens, 32_768);
        assert_eq!(config.topics_dir, PathBuf::from("topics"));
        assert_eq!(config.output_dir, PathBuf::from("quizzes"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
model = "gemini-2.5-flash"
base_url = "http://localhost:9999"
output_dir = "public/quizzes"
"#;
        let config: PagequizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9999"));
        assert_eq!(config.output_dir, PathBuf::from("public/quizzes"));
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn environment_key_overrides_file() {
        let config = PagequizConfig {
            api_key: Some("from-file".into()),
            ..Default::default()
        };
        let config = apply_env(config, |name| {
            (name == API_KEY_VAR).then(|| "from-env".to_string())
        });
        assert_eq!(config.require_api_key().unwrap(), "from-env");
    }

    #[test]
    fn empty_environment_key_is_ignored() {
        let config = PagequizConfig {
            api_key: Some("from-file".into()),
            ..Default::default()
        };
        let config = apply_env(config, |_| Some(String::new()));
        assert_eq!(config.require_api_key().unwrap(), "from-file");
    }

    #[test]
    fn missing_key_is_actionable() {
        let config = apply_env(PagequizConfig::default(), |_| None);
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
        assert!(err.to_string().contains(".env"));
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = PagequizConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn debug_masks_api_key() {
        let config = PagequizConfig {
            api_key: Some("sk-secret".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagequiz.toml");
        std::fs::write(&path, "temperature = 0.2\nmax_output_tokens = 1024\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_output_tokens, 1024);
    }

    #[test]
    fn request_uses_configured_sampling() {
        let config = PagequizConfig {
            model: "gemini-2.5-pro".into(),
            temperature: 0.3,
            ..Default::default()
        };
        let request = config.generate_request("prompt", vec![]);
        assert_eq!(request.model, "gemini-2.5-pro");
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.max_tokens, 32_768);
    }
}
