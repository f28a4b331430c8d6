//! Model endpoint configuration, baked in at build time.
//!
//! The client is a static WASM bundle, so settings come from `option_env!`
//! when the bundle is compiled rather than from the runtime environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// `None` means every call fails with `ModelError::MissingApiKey`.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl ModelConfig {
    /// Build typed config from compile-time environment variables.
    ///
    /// - `GEMINI_API_KEY`: required for live calls
    /// - `GEMINI_MODEL`: default `gemini-2.5-flash`
    /// - `GEMINI_BASE_URL`: default Google endpoint, trailing `/` stripped
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("GEMINI_API_KEY"), option_env!("GEMINI_MODEL"), option_env!("GEMINI_BASE_URL"))
    }

    /// Blank values count as unset.
    pub fn from_values(api_key: Option<&str>, model: Option<&str>, base_url: Option<&str>) -> Self {
        Self {
            api_key: non_blank(api_key).map(str::to_owned),
            model: non_blank(model).unwrap_or(DEFAULT_MODEL).to_owned(),
            base_url: non_blank(base_url)
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
        }
    }

    /// `{base}/models/{model}:generateContent`
    pub fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
