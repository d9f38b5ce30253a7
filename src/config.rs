//! Run configuration: credentials and endpoint settings.
//!
//! Everything the Vertex AI client needs is resolved once at startup into an
//! explicit [`VertexConfig`] and passed by reference to the client
//! constructor. Nothing mutates the process environment.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Default request timeout for the generation call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set (set it in .env or via environment variable)")]
    MissingVar(&'static str),
}

/// A parsed `key=value` configuration file.
///
/// Lines beginning with `#` or lacking an `=` are ignored. A missing file
/// yields an empty map rather than an error, so a bare environment still works.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    pub fn load(path: impl AsRef<Path>) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(contents: &str) -> Self {
        let mut vars = HashMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                vars.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Variable lookup combining a config file with the process environment.
///
/// File values take precedence, matching the original workflow where the
/// file is loaded over whatever the shell already exported.
#[derive(Debug, Clone, Default)]
pub struct Env {
    file: EnvFile,
}

impl Env {
    pub fn with_file(file: EnvFile) -> Self {
        Self { file }
    }

    pub fn var(&self, key: &str) -> Option<String> {
        self.file
            .get(key)
            .map(str::to_string)
            .or_else(|| std::env::var(key).ok())
            .filter(|v| !v.is_empty())
    }
}

/// Connection settings for Gemini on Vertex AI.
#[derive(Debug, Clone)]
pub struct VertexConfig {
    pub project_id: String,
    pub location: String,
    /// OAuth bearer token, e.g. from `gcloud auth print-access-token`.
    pub access_token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl VertexConfig {
    /// Resolve the full configuration from CLI overrides and the environment.
    ///
    /// Fails before any network activity when the project id or access token
    /// is missing.
    pub fn resolve(
        project_override: Option<String>,
        location_override: Option<String>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let project_id = project_override
            .or_else(|| env.var("GOOGLE_CLOUD_PROJECT"))
            .ok_or(ConfigError::MissingVar("GOOGLE_CLOUD_PROJECT"))?;

        let location = location_override
            .or_else(|| env.var("GOOGLE_CLOUD_LOCATION"))
            .unwrap_or_else(|| "us-central1".to_string());

        let access_token = env
            .var("GOOGLE_ACCESS_TOKEN")
            .ok_or(ConfigError::MissingVar("GOOGLE_ACCESS_TOKEN"))?;

        let base_url = env
            .var("LEXBENCH_BASE_URL")
            .unwrap_or_else(|| format!("https://{location}-aiplatform.googleapis.com/v1"));

        let timeout = env
            .var("LEXBENCH_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            project_id,
            location,
            access_token,
            base_url,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_file_skips_comments_and_malformed_lines() {
        let file = EnvFile::parse(
            "# a comment\n\
             GOOGLE_CLOUD_PROJECT=my-project\n\
             not a key value line\n\
             \n\
             GOOGLE_ACCESS_TOKEN = tok-123 \n",
        );
        assert_eq!(file.get("GOOGLE_CLOUD_PROJECT"), Some("my-project"));
        assert_eq!(file.get("GOOGLE_ACCESS_TOKEN"), Some("tok-123"));
        assert_eq!(file.get("not a key value line"), None);
    }

    #[test]
    fn env_file_keeps_equals_in_values() {
        let file = EnvFile::parse("KEY=a=b=c\n");
        assert_eq!(file.get("KEY"), Some("a=b=c"));
    }

    #[test]
    fn missing_env_file_is_empty() {
        let file = EnvFile::load("definitely/not/a/real/.env");
        assert_eq!(file.get("GOOGLE_CLOUD_PROJECT"), None);
    }

    // Env::var falls back to the process environment, so every resolve
    // scenario runs inside one test after clearing the relevant variables.
    #[test]
    fn resolve_scenarios() {
        for key in [
            "GOOGLE_CLOUD_PROJECT",
            "GOOGLE_CLOUD_LOCATION",
            "GOOGLE_ACCESS_TOKEN",
            "LEXBENCH_BASE_URL",
            "LEXBENCH_TIMEOUT_SECONDS",
        ] {
            std::env::remove_var(key);
        }

        // CLI override beats the file; location and base URL get defaults.
        let env = Env::with_file(EnvFile::parse(
            "GOOGLE_CLOUD_PROJECT=file-project\nGOOGLE_ACCESS_TOKEN=tok\n",
        ));
        let config =
            VertexConfig::resolve(Some("cli-project".to_string()), None, &env).unwrap();
        assert_eq!(config.project_id, "cli-project");
        assert_eq!(config.location, "us-central1");
        assert_eq!(
            config.base_url,
            "https://us-central1-aiplatform.googleapis.com/v1"
        );
        assert_eq!(config.timeout, Duration::from_secs(120));

        // Missing project.
        let env = Env::with_file(EnvFile::parse("GOOGLE_ACCESS_TOKEN=tok\n"));
        let err = VertexConfig::resolve(None, None, &env).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CLOUD_PROJECT"));

        // Missing token.
        let env = Env::with_file(EnvFile::parse("GOOGLE_CLOUD_PROJECT=p\n"));
        let err = VertexConfig::resolve(None, None, &env).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_ACCESS_TOKEN"));

        // Location and base URL overrides.
        let env = Env::with_file(EnvFile::parse(
            "GOOGLE_CLOUD_PROJECT=p\nGOOGLE_ACCESS_TOKEN=tok\nLEXBENCH_BASE_URL=http://localhost:9999\nLEXBENCH_TIMEOUT_SECONDS=5\n",
        ));
        let config =
            VertexConfig::resolve(None, Some("europe-west1".to_string()), &env).unwrap();
        assert_eq!(config.location, "europe-west1");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));

        // Process environment backs the file.
        std::env::set_var("GOOGLE_CLOUD_PROJECT", "proc-project");
        let env = Env::with_file(EnvFile::parse("GOOGLE_ACCESS_TOKEN=tok\n"));
        let config = VertexConfig::resolve(None, None, &env).unwrap();
        assert_eq!(config.project_id, "proc-project");
        std::env::remove_var("GOOGLE_CLOUD_PROJECT");
    }
}
