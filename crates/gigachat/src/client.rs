//! GigaChat HTTP client and the [`ContentGenerator`] seam.

use async_trait::async_trait;
use storyforge_core::copywriter::{self, CopyContext};
use storyforge_core::lines::{
    StoryLines, MAX_BULLET, MAX_CTA, MAX_DEADLINE_LINE, MAX_FOOTNOTE, MAX_HEADLINE,
    MAX_PRICE_LINE, MAX_SUBHEADLINE,
};

use crate::api::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, TokenResponse};
use crate::config::{Credentials, GigaChatConfig};
use crate::token::{self, CachedToken, TokenCache};

/// Sampling temperature for copy generation.
const TEMPERATURE: f64 = 0.7;
/// Completion token budget; six variants fit comfortably.
const MAX_TOKENS: u32 = 1400;
/// Number of variants every generation must yield.
const VARIANT_COUNT: usize = 6;

/// Internal failures of the GigaChat integration.
///
/// Never escapes [`ContentGenerator::generate_variants`]; every variant of
/// this enum is absorbed by the fallback copywriter.
#[derive(Debug, thiserror::Error)]
pub enum GigaChatError {
    #[error("GigaChat credentials are not configured")]
    MissingCredentials,

    #[error("GigaChat OAuth {status}: {body}")]
    Auth { status: u16, body: String },

    #[error("GigaChat OAuth response missing access_token")]
    MissingAccessToken,

    #[error("GigaChat API {status}: {body}")]
    Api { status: u16, body: String },

    #[error("GigaChat response has empty content")]
    EmptyContent,

    #[error("GigaChat content is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("GigaChat returned {0} valid variants, expected {VARIANT_COUNT}")]
    Incomplete(usize),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Produces six copy variants for an offer. The only implementation that
/// talks to a network is [`GigaChatClient`]; tests substitute their own.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate exactly six valid [`StoryLines`]. Must never fail.
    async fn generate_variants(&self, ctx: &CopyContext) -> [StoryLines; VARIANT_COUNT];
}

/// GigaChat-backed content generator.
///
/// Holds the process-wide token cache; cheap to share behind an `Arc`
/// across all worker tasks.
pub struct GigaChatClient {
    http: reqwest::Client,
    config: GigaChatConfig,
    tokens: TokenCache,
}

impl GigaChatClient {
    /// Build a client with bounded timeouts on every outbound call.
    pub fn new(config: GigaChatConfig) -> Result<Self, GigaChatError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config,
            tokens: TokenCache::default(),
        })
    }

    /// Get a cached access token, refreshing it when stale.
    ///
    /// The cache lock is held across the refresh, so concurrent stale
    /// callers perform one fetch between them.
    async fn access_token(&self) -> Result<String, GigaChatError> {
        let mut slot = self.tokens.lock().await;
        let now_ms = chrono::Utc::now().timestamp_millis();

        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh(now_ms) {
                return Ok(cached.value.clone());
            }
        }

        let fetched = self.fetch_token().await?;
        let value = fetched.access_token.ok_or(GigaChatError::MissingAccessToken)?;
        let expires_at_ms = token::resolve_expiry_ms(now_ms, fetched.expires_at, fetched.expires_in);

        *slot = Some(CachedToken {
            value: value.clone(),
            expires_at_ms,
        });
        Ok(value)
    }

    /// OAuth client-credentials exchange with Basic credentials and a
    /// unique per-request correlation id.
    async fn fetch_token(&self) -> Result<TokenResponse, GigaChatError> {
        let request = self
            .http
            .post(&self.config.auth_url)
            .header("RqUID", uuid::Uuid::new_v4().to_string())
            .form(&[("scope", self.config.scope.as_str())]);

        let request = match &self.config.credentials {
            Some(Credentials::AuthKey(key)) => {
                request.header(reqwest::header::AUTHORIZATION, format!("Basic {key}"))
            }
            Some(Credentials::Pair {
                client_id,
                client_secret,
            }) => request.basic_auth(client_id, Some(client_secret)),
            None => return Err(GigaChatError::MissingCredentials),
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GigaChatError::Auth { status, body });
        }
        Ok(response.json().await?)
    }

    /// Fallible path: call the completion endpoint and demand six valid
    /// variants.
    async fn try_generate(
        &self,
        ctx: &CopyContext,
    ) -> Result<[StoryLines; VARIANT_COUNT], GigaChatError> {
        let token = self.access_token().await?;

        let body = ChatRequest {
            model: self.config.model.clone(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat::json_object(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a marketing copywriter.".to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(ctx),
                },
            ],
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GigaChatError::Api { status, body });
        }

        let envelope: ChatResponse = response.json().await?;
        let content = envelope.first_content().ok_or(GigaChatError::EmptyContent)?;

        let variants = parse_variants(&content)?;
        let count = variants.len();
        variants
            .try_into()
            .map_err(|_| GigaChatError::Incomplete(count))
    }
}

#[async_trait]
impl ContentGenerator for GigaChatClient {
    async fn generate_variants(&self, ctx: &CopyContext) -> [StoryLines; VARIANT_COUNT] {
        match self.try_generate(ctx).await {
            Ok(variants) => variants,
            Err(e) => {
                tracing::warn!(error = %e, "GigaChat request failed, using fallback copywriter");
                copywriter::fallback_variants(ctx)
            }
        }
    }
}

/// Build the single structured prompt demanding strict JSON output.
fn build_prompt(ctx: &CopyContext) -> String {
    [
        "You generate real estate Instagram stories text.".to_string(),
        "Return STRICT JSON ONLY.".to_string(),
        format!(
            "JSON shape: {{\"variants\":[{}]}}",
            ["StoryLines"; VARIANT_COUNT].join(",")
        ),
        "StoryLines fields: headline, subheadline, bullets(3 strings), cta, footnote, priceLine, deadlineLine.".to_string(),
        "Use Russian language text.".to_string(),
        "Do not exceed limits:".to_string(),
        format!(
            "headline<={MAX_HEADLINE}, subheadline<={MAX_SUBHEADLINE}, bullet<={MAX_BULLET}, \
             cta<={MAX_CTA}, footnote<={MAX_FOOTNOTE}, priceLine<={MAX_PRICE_LINE}, \
             deadlineLine<={MAX_DEADLINE_LINE}."
        ),
        format!(
            "Developer: {}. Complex: {}. Room type: {}.",
            ctx.developer_name, ctx.complex_name, ctx.room_label
        ),
        format!("Offer: {}", ctx.offer_text),
    ]
    .join("\n")
}

/// Parse the completion content as `{"variants": [...]}`, dropping any
/// element that fails the [`StoryLines`] schema, and keep at most six.
fn parse_variants(content: &str) -> Result<Vec<StoryLines>, GigaChatError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| GigaChatError::MalformedJson(e.to_string()))?;

    let raw = value
        .get("variants")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    Ok(raw
        .iter()
        .filter_map(StoryLines::parse_untrusted)
        .take(VARIANT_COUNT)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CopyContext {
        CopyContext {
            offer_text: "Рассрочка без первоначального взноса".to_string(),
            room_label: "2-комнатная".to_string(),
            complex_name: "Северный парк".to_string(),
            developer_name: "Группа Мост".to_string(),
        }
    }

    fn variant_json(headline: &str) -> serde_json::Value {
        serde_json::json!({
            "headline": headline,
            "subheadline": "S",
            "bullets": ["a", "b", "c"],
            "cta": "C",
            "footnote": "F",
            "priceLine": "P",
            "deadlineLine": "D",
        })
    }

    #[test]
    fn prompt_embeds_context_and_limits() {
        let prompt = build_prompt(&ctx());
        assert!(prompt.contains("Северный парк"));
        assert!(prompt.contains("Группа Мост"));
        assert!(prompt.contains("2-комнатная"));
        assert!(prompt.contains("Рассрочка"));
        assert!(prompt.contains("headline<=90"));
        assert!(prompt.contains("deadlineLine<=40"));
        assert!(prompt.contains("STRICT JSON"));
    }

    #[test]
    fn parses_six_valid_variants() {
        let content = serde_json::json!({
            "variants": (1..=6).map(|i| variant_json(&format!("H{i}"))).collect::<Vec<_>>(),
        })
        .to_string();
        let variants = parse_variants(&content).unwrap();
        assert_eq!(variants.len(), 6);
        assert_eq!(variants[0].headline, "H1");
    }

    #[test]
    fn drops_invalid_elements() {
        let mut items: Vec<serde_json::Value> =
            (1..=6).map(|i| variant_json(&format!("H{i}"))).collect();
        items[2] = serde_json::json!({ "headline": "only a headline" });
        items[4] = variant_json(&"x".repeat(MAX_HEADLINE + 1));

        let content = serde_json::json!({ "variants": items }).to_string();
        let variants = parse_variants(&content).unwrap();
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn keeps_at_most_six() {
        let content = serde_json::json!({
            "variants": (1..=9).map(|i| variant_json(&format!("H{i}"))).collect::<Vec<_>>(),
        })
        .to_string();
        assert_eq!(parse_variants(&content).unwrap().len(), 6);
    }

    #[test]
    fn missing_variants_key_yields_empty() {
        assert!(parse_variants("{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            parse_variants("not json"),
            Err(GigaChatError::MalformedJson(_))
        ));
    }
}
