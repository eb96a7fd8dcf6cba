//! Converse request and response shapes.

use serde::Serialize;
use serde_json::Value;

/// JSON pointers tried, in order, when looking for the completion text.
///
/// The first is the Converse envelope (`output.message.content[0].text`);
/// the rest cover older invoke-style bodies.
const COMPLETION_PATHS: [&str; 4] = [
    "/output/message/content/0/text",
    "/content/0/text",
    "/generation",
    "/outputText",
];

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// One text block inside a message.
#[derive(Debug, Serialize)]
pub struct ContentBlock<'a> {
    pub text: &'a str,
}

/// One conversation turn.
#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: Vec<ContentBlock<'a>>,
}

/// Body of a Converse call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseRequest<'a> {
    pub messages: Vec<Message<'a>>,
    pub inference_config: InferenceConfig,
}

impl<'a> ConverseRequest<'a> {
    /// A single user turn carrying `prompt`.
    pub fn user_prompt(prompt: &'a str, inference_config: InferenceConfig) -> Self {
        Self {
            messages: vec![Message {
                role: "user",
                content: vec![ContentBlock { text: prompt }],
            }],
            inference_config,
        }
    }
}

/// Token accounting reported by the provider, when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Find the first text completion in a provider response body.
///
/// Total: returns `None` rather than panicking when no expected path
/// holds a string.
pub fn extract_completion_text(body: &Value) -> Option<&str> {
    COMPLETION_PATHS
        .iter()
        .find_map(|path| body.pointer(path).and_then(Value::as_str))
}

/// Read `usage.inputTokens` / `usage.outputTokens` if the provider sent them.
pub fn extract_usage(body: &Value) -> Option<TokenUsage> {
    let usage = body.get("usage")?;
    Some(TokenUsage {
        input_tokens: usage.get("inputTokens").and_then(Value::as_u64).unwrap_or(0),
        output_tokens: usage.get("outputTokens").and_then(Value::as_u64).unwrap_or(0),
    })
}
