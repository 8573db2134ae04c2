use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default client timeout for generation calls, in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Cover images a new interview can be decorated with.
const DEFAULT_COVER_IMAGES: &[&str] = &[
    "/adobe.png",
    "/amazon.png",
    "/facebook.png",
    "/hostinger.png",
    "/pinterest.png",
    "/quora.png",
    "/reddit.png",
    "/skype.png",
    "/spotify.png",
    "/telegram.png",
    "/tiktok.png",
    "/yahoo.png",
];

#[derive(Debug, Clone, Deserialize)]
pub struct InterviewConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub otlp_endpoint: Option<String>,
    pub store: StoreConfig,
    pub mongodb: MongoConfig,
    pub genai: GenaiConfig,
    pub profile: HandlerProfile,
    pub cover_images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub collection: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenaiConfig {
    pub provider: ProviderKind,
    /// Google Generative AI key; required when `provider` is Gemini.
    pub api_key: Option<String>,
    /// Model used for question generation (e.g., gemini-2.0-flash-001)
    pub text_model: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(format!("Invalid generation provider: {}", s)),
        }
    }
}

/// Selects how the generate endpoint behaves.
///
/// Replaces the two historical handler variants: one validated its input and
/// answered browser preflights, the other did neither.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct HandlerProfile {
    /// Reject requests with missing fields before calling the model.
    pub validate_request: bool,
    /// Decorate stored interviews with a random cover image.
    pub attach_cover_image: bool,
    /// Answer OPTIONS and attach permissive CORS headers.
    pub allow_cross_origin: bool,
}

impl Default for HandlerProfile {
    fn default() -> Self {
        Self {
            validate_request: true,
            attach_cover_image: true,
            allow_cross_origin: true,
        }
    }
}

impl InterviewConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env and the APP__ prefix
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let backend: StoreBackend = get_env("INTERVIEW_STORE", Some("mongodb"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // The URI is only mandatory when MongoDB is actually used
        let mongo_uri = match backend {
            StoreBackend::Mongodb => get_env("MONGODB_URI", None, is_prod)?,
            StoreBackend::Memory => env::var("MONGODB_URI").unwrap_or_default(),
        };

        let provider: ProviderKind = get_env("GENAI_PROVIDER", Some("gemini"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let api_key = match provider {
            ProviderKind::Gemini => Some(get_env("GOOGLE_GENERATIVE_AI_API_KEY", None, is_prod)?),
            ProviderKind::Mock => env::var("GOOGLE_GENERATIVE_AI_API_KEY").ok(),
        };

        let config = InterviewConfig {
            common: common_config,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            store: StoreConfig {
                backend,
                collection: get_env("INTERVIEW_COLLECTION", Some("interviews"), is_prod)?,
            },
            mongodb: MongoConfig {
                uri: mongo_uri,
                database: get_env("MONGODB_DATABASE", Some("interview_db"), is_prod)?,
            },
            genai: GenaiConfig {
                provider,
                api_key,
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.0-flash-001"), is_prod)?,
                request_timeout_secs: get_env(
                    "GENAI_REQUEST_TIMEOUT_SECS",
                    Some(&DEFAULT_REQUEST_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            profile: HandlerProfile {
                validate_request: get_flag("INTERVIEW_VALIDATE_REQUEST", true)?,
                attach_cover_image: get_flag("INTERVIEW_ATTACH_COVER_IMAGE", true)?,
                allow_cross_origin: get_flag("INTERVIEW_ALLOW_CROSS_ORIGIN", true)?,
            },
            cover_images: env::var("INTERVIEW_COVER_IMAGES")
                .map(|list| parse_list(&list))
                .unwrap_or_else(|_| default_cover_images()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot serve a request.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.genai.provider == ProviderKind::Gemini
            && self.genai.api_key.as_deref().map_or(true, str::is_empty)
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GOOGLE_GENERATIVE_AI_API_KEY must be set for the gemini provider"
            )));
        }

        if self.profile.attach_cover_image && self.cover_images.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "INTERVIEW_COVER_IMAGES is empty but cover images are enabled"
            )));
        }

        Ok(())
    }
}

pub fn default_cover_images() -> Vec<String> {
    DEFAULT_COVER_IMAGES.iter().map(|s| s.to_string()).collect()
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got '{}'",
            key,
            other
        ))),
    }
}

fn get_flag(key: &str, default: bool) -> Result<bool, AppError> {
    match env::var(key) {
        Ok(val) => parse_flag(key, &val),
        Err(_) => Ok(default),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
