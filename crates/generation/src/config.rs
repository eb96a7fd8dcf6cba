use crate::messages::InferenceConfig;
use crate::GenerationError;

/// Model used when neither `BEDROCK_MODEL_ID` nor `BEDROCK_MODEL_NAME` is set.
pub const DEFAULT_MODEL_ID: &str = "us.amazon.nova-pro-v1:0";

/// Friendly model names accepted by `BEDROCK_MODEL_NAME`.
pub const MODEL_ALIASES: &[(&str, &str)] = &[
    ("Nova Pro", DEFAULT_MODEL_ID),
    ("DeepSeek-R1", "us.deepseek.r1-v1:0"),
    (
        "Llama 4 Maverick 17B Instruct",
        "us.meta.llama4-maverick-17b-instruct-v1:0",
    ),
    (
        "Llama 4 Scout 17B Instruct",
        "us.meta.llama4-scout-17b-instruct-v1:0",
    ),
];

/// Generation provider configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Runtime endpoint base URL.
    pub endpoint: String,
    /// Model or inference-profile identifier.
    pub model_id: String,
    /// Bearer API key. Requests are sent unauthenticated when absent.
    pub api_key: Option<String>,
    pub inference: InferenceConfig,
    /// Output token cap for the short plain-text daily lesson.
    pub daily_max_tokens: u32,
    /// Whole-request timeout for one generation call.
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                                          |
    /// |----------------------------|--------------------------------------------------|
    /// | `BEDROCK_REGION`           | `us-east-1`                                      |
    /// | `BEDROCK_ENDPOINT`         | `https://bedrock-runtime.{region}.amazonaws.com` |
    /// | `BEDROCK_MODEL_ID`         | (see `BEDROCK_MODEL_NAME`)                       |
    /// | `BEDROCK_MODEL_NAME`       | `us.amazon.nova-pro-v1:0`                        |
    /// | `AWS_BEARER_TOKEN_BEDROCK` | none                                             |
    /// | `GENERATION_MAX_TOKENS`    | `2048`                                           |
    /// | `GENERATION_TEMPERATURE`   | `0.7`                                            |
    /// | `DAILY_LESSON_MAX_TOKENS`  | `400`                                            |
    /// | `GENERATION_TIMEOUT_SECS`  | `90`                                             |
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GenerationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let region = get("BEDROCK_REGION").unwrap_or_else(|| "us-east-1".into());
        let endpoint = get("BEDROCK_ENDPOINT")
            .unwrap_or_else(|| format!("https://bedrock-runtime.{region}.amazonaws.com"));

        let model_id = resolve_model_id(
            get("BEDROCK_MODEL_ID").as_deref(),
            get("BEDROCK_MODEL_NAME").as_deref(),
        )?;

        let max_tokens = parse_or(get("GENERATION_MAX_TOKENS"), "GENERATION_MAX_TOKENS", 2048)?;
        let temperature = parse_or(get("GENERATION_TEMPERATURE"), "GENERATION_TEMPERATURE", 0.7)?;
        let daily_max_tokens =
            parse_or(get("DAILY_LESSON_MAX_TOKENS"), "DAILY_LESSON_MAX_TOKENS", 400)?;
        let timeout_secs = parse_or(get("GENERATION_TIMEOUT_SECS"), "GENERATION_TIMEOUT_SECS", 90)?;

        if !(0.0..=1.0).contains(&temperature) {
            return Err(GenerationError::Config(format!(
                "GENERATION_TEMPERATURE must be between 0.0 and 1.0 (got {temperature})"
            )));
        }

        Ok(Self {
            endpoint,
            model_id,
            api_key: get("AWS_BEARER_TOKEN_BEDROCK"),
            inference: InferenceConfig {
                max_tokens,
                temperature,
            },
            daily_max_tokens,
            timeout_secs,
        })
    }

    /// The same provider settings with the daily-lesson token cap.
    pub fn for_daily_lesson(&self) -> Self {
        Self {
            inference: InferenceConfig {
                max_tokens: self.daily_max_tokens,
                ..self.inference
            },
            ..self.clone()
        }
    }
}

/// Pick the model: an explicit id wins, then a known friendly name, then the default.
pub fn resolve_model_id(
    model_id: Option<&str>,
    model_name: Option<&str>,
) -> Result<String, GenerationError> {
    if let Some(id) = model_id {
        return Ok(id.to_string());
    }
    match model_name {
        None => Ok(DEFAULT_MODEL_ID.to_string()),
        Some(name) => MODEL_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, id)| (*id).to_string())
            .ok_or_else(|| {
                GenerationError::Config(format!("Unknown model name '{name}'"))
            }),
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &str,
    default: T,
) -> Result<T, GenerationError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| GenerationError::Config(format!("{key} has an invalid value '{v}'"))),
    }
}
