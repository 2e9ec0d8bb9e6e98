use crate::error::SourceError;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
const TOKEN_URL: &str = "https://api.trakt.tv/oauth/token";
const AUTHORIZE_URL: &str = "https://trakt.tv/oauth/authorize";

/// Tokens are treated as expired this long before the service says so
const EXPIRY_MARGIN_SECONDS: i64 = 120;

pub fn create_trakt_client() -> Client {
    Client::builder()
        .user_agent(concat!("trakt-watch/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenResponse> for TokenInfo {
    fn from(response: TokenResponse) -> Self {
        let lifetime = response.expires_in as i64 - EXPIRY_MARGIN_SECONDS;
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: Utc::now() + Duration::seconds(lifetime.max(0)),
        }
    }
}

/// URL the user opens to grant access and receive an authorization code
pub fn authorize_url(client_id: &str) -> String {
    format!(
        "{}?response_type=code&client_id={}&redirect_uri={}",
        AUTHORIZE_URL,
        urlencoding::encode(client_id),
        urlencoding::encode(REDIRECT_URI)
    )
}

async fn request_token(client: &Client, payload: serde_json::Value, context: &str) -> Result<TokenInfo, SourceError> {
    let response = client
        .post(TOKEN_URL)
        .json(&payload)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            context: context.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let token_response: TokenResponse = serde_json::from_str(&response.text().await?)?;
    Ok(token_response.into())
}

/// Exchange an authorization code from `authorize_url` for tokens
pub async fn exchange_code(
    client: &Client,
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> Result<TokenInfo, SourceError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(SourceError::NotAuthenticated(
            "authorization code cannot be empty".to_string(),
        ));
    }

    let payload = serde_json::json!({
        "code": code,
        "client_id": client_id,
        "client_secret": client_secret,
        "redirect_uri": REDIRECT_URI,
        "grant_type": "authorization_code"
    });
    let token = request_token(client, payload, "Failed to exchange authorization code").await?;
    info!("Obtained Trakt access token (expires at {})", token.expires_at);
    Ok(token)
}

pub async fn refresh_access_token(
    client: &Client,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<TokenInfo, SourceError> {
    let payload = serde_json::json!({
        "refresh_token": refresh_token,
        "client_id": client_id,
        "client_secret": client_secret,
        "redirect_uri": REDIRECT_URI,
        "grant_type": "refresh_token"
    });
    let token = request_token(client, payload, "Token refresh failed").await?;
    info!("Refreshed Trakt access token (expires at {})", token.expires_at);
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_encodes_redirect() {
        let url = authorize_url("abc123");
        assert!(url.starts_with("https://trakt.tv/oauth/authorize?response_type=code&client_id=abc123"));
        assert!(url.ends_with("redirect_uri=urn%3Aietf%3Awg%3Aoauth%3A2.0%3Aoob"));
    }

    #[test]
    fn test_token_expiry_includes_margin() {
        let before = Utc::now();
        let token: TokenInfo = TokenResponse {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: 7_776_000,
        }
        .into();
        let lifetime = token.expires_at - before;
        assert!(lifetime.num_seconds() <= 7_776_000 - EXPIRY_MARGIN_SECONDS);
        assert!(lifetime.num_seconds() >= 7_776_000 - EXPIRY_MARGIN_SECONDS - 5);
    }
}
