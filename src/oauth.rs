//! One-time LinkedIn OAuth authorization handshake.
//!
//! Step one sends the administrator's browser to LinkedIn with a CSRF state
//! token; step two receives the callback, verifies the state, exchanges the
//! authorization code for an access token, and persists the token into the
//! configuration store the feed acquirer reads from. There is no refresh
//! logic: the token is exchanged once and replaced manually when it expires.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use rand::RngCore;
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::error::OauthError;

pub const AUTHORIZATION_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
pub const TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
pub const SCOPE: &str = "r_liteprofile r_emailaddress w_member_social r_organization_social";

/// Random hex token bound to the authorization redirect and checked on the
/// callback as a CSRF defense.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(32), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

/// Build the LinkedIn authorization URL the browser is redirected to.
pub fn authorization_url(client_id: &str, redirect_uri: &str, state: &str) -> Url {
    let mut url = Url::parse(AUTHORIZATION_URL).expect("authorization URL is valid");
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("state", state)
        .append_pair("scope", SCOPE);
    url
}

/// Access token grant returned by the code exchange. LinkedIn tokens
/// usually live for 60 days.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: u64,
}

/// Exchange an authorization code for an access token via a server-to-server
/// form POST.
pub async fn exchange_code(
    client: &reqwest::Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    redirect_uri: &str,
    code: &str,
) -> Result<TokenGrant, OauthError> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let response = client.post(token_url).form(&params).send().await?;
    let status = response.status().as_u16();
    if status != 200 {
        let body = response.text().await.unwrap_or_default();
        return Err(OauthError::Exchange { status, body });
    }

    let grant = response.json::<TokenGrant>().await?;
    info!(
        "LinkedIn: access token obtained, expires in {} seconds",
        grant.expires_in
    );
    Ok(grant)
}

/// Destination for the exchanged access token.
pub trait TokenStore: Send + Sync {
    fn save_access_token(&self, token: &str) -> std::io::Result<()>;
}

/// Rewrites the `LINKEDIN_ACCESS_TOKEN=` line of a dotenv-style file, so the
/// token survives process restarts the same way the rest of the credentials
/// are provisioned.
pub struct EnvFileStore {
    path: PathBuf,
}

impl EnvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for EnvFileStore {
    fn save_access_token(&self, token: &str) -> std::io::Result<()> {
        let contents = fs::read_to_string(&self.path).unwrap_or_default();
        let line = format!("LINKEDIN_ACCESS_TOKEN={}", token);

        let mut replaced = false;
        let mut out: Vec<String> = contents
            .lines()
            .map(|existing| {
                if existing.starts_with("LINKEDIN_ACCESS_TOKEN=") {
                    replaced = true;
                    line.clone()
                } else {
                    existing.to_string()
                }
            })
            .collect();
        if !replaced {
            out.push(line);
        }

        fs::write(&self.path, out.join("\n") + "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn state_tokens_are_hex_and_unique() {
        let first = generate_state();
        let second = generate_state();
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn authorization_url_carries_the_handshake_parameters() {
        let url = authorization_url("client123", "http://localhost:8080/cb", "deadbeef");
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.as_str().starts_with(AUTHORIZATION_URL));
        assert!(query.contains(&("response_type".to_string(), "code".to_string())));
        assert!(query.contains(&("client_id".to_string(), "client123".to_string())));
        assert!(query.contains(&("state".to_string(), "deadbeef".to_string())));
        assert!(query.contains(&("scope".to_string(), SCOPE.to_string())));
    }

    #[tokio::test]
    async fn code_exchange_parses_the_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/accessToken"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=the-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "AQX-new-token",
                "expires_in": 5_184_000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let grant = exchange_code(
            &client,
            &format!("{}/oauth/v2/accessToken", server.uri()),
            "client",
            "secret",
            "http://localhost:8080/cb",
            "the-code",
        )
        .await
        .unwrap();

        assert_eq!(grant.access_token, "AQX-new-token");
        assert_eq!(grant.expires_in, 5_184_000);
    }

    #[tokio::test]
    async fn failed_exchange_reports_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = exchange_code(&client, &server.uri(), "c", "s", "r", "bad-code")
            .await
            .unwrap_err();

        match err {
            OauthError::Exchange { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "invalid_grant");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn env_file_store_replaces_only_the_token_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "LINKEDIN_CLIENT_ID=abc\nLINKEDIN_ACCESS_TOKEN=old\nLINKEDIN_COMPANY_ID=123\n",
        )
        .unwrap();

        EnvFileStore::new(&path).save_access_token("new-token").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("LINKEDIN_CLIENT_ID=abc"));
        assert!(contents.contains("LINKEDIN_ACCESS_TOKEN=new-token"));
        assert!(contents.contains("LINKEDIN_COMPANY_ID=123"));
        assert!(!contents.contains("old"));
    }

    #[test]
    fn env_file_store_appends_when_the_line_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "LINKEDIN_CLIENT_ID=abc\n").unwrap();

        EnvFileStore::new(&path).save_access_token("tok").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with("LINKEDIN_ACCESS_TOKEN=tok\n"));
    }
}
