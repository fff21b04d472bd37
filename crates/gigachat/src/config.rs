//! GigaChat endpoint and credential configuration.

/// Basic credentials for the OAuth exchange.
///
/// Either a pre-combined authorization key (already base64) or a client
/// id/secret pair that reqwest encodes itself.
#[derive(Debug, Clone)]
pub enum Credentials {
    AuthKey(String),
    Pair { client_id: String, client_secret: String },
}

/// Client configuration loaded from environment variables.
///
/// Endpoints default to the production GigaChat URLs. Credentials are
/// optional: without them every token fetch fails and the pipeline runs on
/// the fallback copywriter, which is the intended degraded mode.
#[derive(Debug, Clone)]
pub struct GigaChatConfig {
    /// OAuth token endpoint.
    pub auth_url: String,
    /// Chat completion endpoint.
    pub api_url: String,
    /// Model name sent with every completion request.
    pub model: String,
    /// OAuth scope parameter.
    pub scope: String,
    /// Basic credentials, if configured.
    pub credentials: Option<Credentials>,
    /// Timeout applied to both outbound calls, in seconds.
    pub request_timeout_secs: u64,
}

impl GigaChatConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                                                    |
    /// |--------------------------|------------------------------------------------------------|
    /// | `GIGACHAT_AUTH_URL`      | `https://ngw.devices.sberbank.ru:9443/api/v2/oauth`        |
    /// | `GIGACHAT_API_URL`       | `https://gigachat.devices.sberbank.ru/api/v1/chat/completions` |
    /// | `GIGACHAT_MODEL`         | `GigaChat-2-Max`                                           |
    /// | `GIGACHAT_SCOPE`         | `GIGACHAT_API_PERS`                                        |
    /// | `GIGACHAT_AUTH_KEY`      | unset                                                      |
    /// | `GIGACHAT_CLIENT_ID` / `GIGACHAT_CLIENT_SECRET` | unset                               |
    /// | `GIGACHAT_TIMEOUT_SECS`  | `30`                                                       |
    pub fn from_env() -> Self {
        let auth_url = std::env::var("GIGACHAT_AUTH_URL")
            .unwrap_or_else(|_| "https://ngw.devices.sberbank.ru:9443/api/v2/oauth".into());
        let api_url = std::env::var("GIGACHAT_API_URL").unwrap_or_else(|_| {
            "https://gigachat.devices.sberbank.ru/api/v1/chat/completions".into()
        });
        let model =
            std::env::var("GIGACHAT_MODEL").unwrap_or_else(|_| "GigaChat-2-Max".into());
        let scope =
            std::env::var("GIGACHAT_SCOPE").unwrap_or_else(|_| "GIGACHAT_API_PERS".into());

        let credentials = match std::env::var("GIGACHAT_AUTH_KEY") {
            Ok(key) if !key.is_empty() => Some(Credentials::AuthKey(key)),
            _ => {
                let client_id = std::env::var("GIGACHAT_CLIENT_ID").unwrap_or_default();
                let client_secret = std::env::var("GIGACHAT_CLIENT_SECRET").unwrap_or_default();
                if client_id.is_empty() || client_secret.is_empty() {
                    None
                } else {
                    Some(Credentials::Pair {
                        client_id,
                        client_secret,
                    })
                }
            }
        };

        let request_timeout_secs: u64 = std::env::var("GIGACHAT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("GIGACHAT_TIMEOUT_SECS must be a valid u64");

        Self {
            auth_url,
            api_url,
            model,
            scope,
            credentials,
            request_timeout_secs,
        }
    }
}
