use serde::Deserialize;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, File};

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OauthConfig {
    /// Callback URL registered with the LinkedIn application.
    pub redirect_uri: String,
    /// Env file the exchanged access token is written back into.
    pub env_file: String,
    /// Token-exchange endpoint of the identity provider.
    pub token_url: String,
}

/// The four values needed to call the LinkedIn API. Any of them may be
/// missing; a blank or obvious placeholder value counts as missing too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub company_id: Option<String>,
    pub access_token: Option<String>,
}

/// Borrowed view of a fully configured credential set.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub company_id: &'a str,
    pub access_token: &'a str,
}

impl Credentials {
    /// Returns the credential set only when all four values are usable.
    pub fn configured(&self) -> Option<ConfiguredCredentials<'_>> {
        Some(ConfiguredCredentials {
            client_id: usable(&self.client_id)?,
            client_secret: usable(&self.client_secret)?,
            company_id: usable(&self.company_id)?,
            access_token: usable(&self.access_token)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.configured().is_some()
    }
}

pub(crate) fn usable(value: &Option<String>) -> Option<&str> {
    let value = value.as_deref()?.trim();
    if value.is_empty() || value.to_ascii_lowercase().starts_with("your_") {
        return None;
    }
    Some(value)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub oauth: OauthConfig,
    #[serde(default)]
    pub linkedin: Credentials,
}

impl Config {
    /// Layered load: built-in defaults, then an optional config file, then
    /// the `LINKEDIN_*` environment variables the deployment already uses.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder: ConfigBuilder<DefaultState> = ConfigBuilder::default();

        builder = builder
            .set_default("server.listen_addr", "0.0.0.0:8080")?
            .set_default("logging.level", "info")?
            .set_default(
                "oauth.redirect_uri",
                "http://localhost:8080/auth/linkedin/callback",
            )?
            .set_default("oauth.env_file", ".env")?
            .set_default("oauth.token_url", crate::oauth::TOKEN_URL)?;

        builder = builder.add_source(File::with_name(path.unwrap_or("config")).required(false));

        builder = builder
            .set_override_option("linkedin.client_id", env_var("LINKEDIN_CLIENT_ID"))?
            .set_override_option("linkedin.client_secret", env_var("LINKEDIN_CLIENT_SECRET"))?
            .set_override_option("linkedin.company_id", env_var("LINKEDIN_COMPANY_ID"))?
            .set_override_option("linkedin.access_token", env_var("LINKEDIN_ACCESS_TOKEN"))?
            .set_override_option("oauth.redirect_uri", env_var("LINKEDIN_REDIRECT_URI"))?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_credentials() -> Credentials {
        Credentials {
            client_id: Some("86abcdef".to_string()),
            client_secret: Some("s3cret".to_string()),
            company_id: Some("12345678".to_string()),
            access_token: Some("AQX-token".to_string()),
        }
    }

    #[test]
    fn complete_credentials_are_configured() {
        assert!(full_credentials().is_configured());
    }

    #[test]
    fn any_missing_field_means_not_configured() {
        for field in 0..4 {
            let mut creds = full_credentials();
            match field {
                0 => creds.client_id = None,
                1 => creds.client_secret = None,
                2 => creds.company_id = None,
                _ => creds.access_token = None,
            }
            assert!(!creds.is_configured(), "field {} should gate", field);
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut creds = full_credentials();
        creds.access_token = Some("   ".to_string());
        assert!(!creds.is_configured());
    }

    #[test]
    fn placeholder_values_count_as_missing() {
        let mut creds = full_credentials();
        creds.client_id = Some("YOUR_CLIENT_ID_HERE".to_string());
        assert!(!creds.is_configured());
    }
}
