//! Inbound JSON API. The feed route always answers `success: true` with a
//! usable post list, even when every upstream call failed; only a malformed
//! inbound request produces the explicit failure envelope.

use std::sync::{Arc, Mutex, RwLock};

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::config::{usable, Config, Credentials, OauthConfig};
use crate::error::OauthError;
use crate::feed::FeedAcquirer;
use crate::oauth::{self, EnvFileStore, TokenGrant, TokenStore};
use crate::types::Post;

const DEFAULT_COUNT: u32 = 5;

/// In-process holder for the pending OAuth CSRF state token.
#[derive(Default)]
pub struct OauthSession(pub Mutex<Option<String>>);

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Post>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: i64,
}

impl ApiResponse {
    fn success(data: Vec<Post>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: epoch_seconds(),
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            timestamp: epoch_seconds(),
        }
    }
}

fn epoch_seconds() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    count: Option<u32>,
}

async fn linkedin_feed(
    acquirer: web::Data<FeedAcquirer>,
    query: web::Query<FeedQuery>,
) -> HttpResponse {
    let count = query.count.unwrap_or(DEFAULT_COUNT);
    if count == 0 {
        return HttpResponse::InternalServerError()
            .json(ApiResponse::failure("count must be a positive integer"));
    }

    let posts = acquirer.get_company_posts(count).await;
    HttpResponse::Ok().json(ApiResponse::success(posts))
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    success: bool,
    configured: bool,
    client_id: bool,
    client_secret: bool,
    company_id: bool,
    access_token: bool,
    timestamp: i64,
}

/// Reports which credentials are present, never their values.
async fn linkedin_status(credentials: web::Data<RwLock<Credentials>>) -> HttpResponse {
    let creds = credentials.read().unwrap().clone();
    HttpResponse::Ok().json(StatusResponse {
        success: true,
        configured: creds.is_configured(),
        client_id: usable(&creds.client_id).is_some(),
        client_secret: usable(&creds.client_secret).is_some(),
        company_id: usable(&creds.company_id).is_some(),
        access_token: usable(&creds.access_token).is_some(),
        timestamp: epoch_seconds(),
    })
}

async fn linkedin_auth(
    credentials: web::Data<RwLock<Credentials>>,
    oauth_config: web::Data<OauthConfig>,
    session: web::Data<OauthSession>,
) -> HttpResponse {
    let client_id = {
        let creds = credentials.read().unwrap();
        usable(&creds.client_id).map(str::to_string)
    };
    let Some(client_id) = client_id else {
        return HttpResponse::InternalServerError()
            .json(ApiResponse::failure("LinkedIn client id not configured"));
    };

    let state = oauth::generate_state();
    *session.0.lock().unwrap() = Some(state.clone());

    let url = oauth::authorization_url(&client_id, &oauth_config.redirect_uri, &state);
    HttpResponse::Found()
        .insert_header((header::LOCATION, url.to_string()))
        .finish()
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

async fn linkedin_callback(
    query: web::Query<CallbackQuery>,
    credentials: web::Data<RwLock<Credentials>>,
    oauth_config: web::Data<OauthConfig>,
    session: web::Data<OauthSession>,
    http_client: web::Data<reqwest::Client>,
    token_store: web::Data<dyn TokenStore>,
) -> HttpResponse {
    match handle_callback(
        &query,
        &credentials,
        &oauth_config,
        &session,
        &http_client,
        token_store.get_ref(),
    )
    .await
    {
        Ok(grant) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "expires_in": grant.expires_in,
            "timestamp": epoch_seconds(),
        })),
        Err(err) => {
            HttpResponse::InternalServerError().json(ApiResponse::failure(err.to_string()))
        }
    }
}

async fn handle_callback(
    query: &CallbackQuery,
    credentials: &RwLock<Credentials>,
    oauth_config: &OauthConfig,
    session: &OauthSession,
    http_client: &reqwest::Client,
    token_store: &dyn TokenStore,
) -> Result<TokenGrant, OauthError> {
    if let Some(error) = &query.error {
        let detail = query.error_description.clone().unwrap_or_else(|| error.clone());
        return Err(OauthError::Denied(detail));
    }

    // The state token is single-use: taken here whether or not it matches.
    let expected = session.0.lock().unwrap().take();
    match (expected.as_deref(), query.state.as_deref()) {
        (Some(expected), Some(state)) if expected == state => {}
        _ => return Err(OauthError::StateMismatch),
    }

    let code = query.code.as_deref().ok_or(OauthError::MissingCode)?;

    let (client_id, client_secret) = {
        let creds = credentials.read().unwrap();
        match (usable(&creds.client_id), usable(&creds.client_secret)) {
            (Some(id), Some(secret)) => (id.to_string(), secret.to_string()),
            _ => return Err(OauthError::MissingCredentials),
        }
    };

    let grant = oauth::exchange_code(
        http_client,
        &oauth_config.token_url,
        &client_id,
        &client_secret,
        &oauth_config.redirect_uri,
        code,
    )
    .await?;

    token_store.save_access_token(&grant.access_token)?;
    credentials.write().unwrap().access_token = Some(grant.access_token.clone());
    info!("LinkedIn: access token persisted");

    Ok(grant)
}

fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response =
        HttpResponse::InternalServerError().json(ApiResponse::failure(err.to_string()));
    actix_web::error::InternalError::from_response(err, response).into()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .route("/api/linkedin-feed", web::get().to(linkedin_feed))
        .route("/api/linkedin-status", web::get().to(linkedin_status))
        .route("/auth/linkedin", web::get().to(linkedin_auth))
        .route("/auth/linkedin/callback", web::get().to(linkedin_callback));
}

pub async fn run(config: Config, listen_addr: &str) -> Result<()> {
    let credentials = Arc::new(RwLock::new(config.linkedin.clone()));
    let acquirer = web::Data::new(FeedAcquirer::new(Arc::clone(&credentials))?);
    let credentials = web::Data::from(credentials);
    let oauth_config = web::Data::new(config.oauth.clone());
    let session = web::Data::new(OauthSession::default());
    let token_store: Arc<dyn TokenStore> = Arc::new(EnvFileStore::new(&config.oauth.env_file));
    let token_store = web::Data::from(token_store);
    let http_client = web::Data::new(
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?,
    );

    info!("Listening on {}", listen_addr);
    HttpServer::new(move || {
        // Same surface the PHP handlers exposed: any origin, GET only.
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .allowed_header(header::CONTENT_TYPE);
        App::new()
            .wrap(cors)
            .app_data(acquirer.clone())
            .app_data(credentials.clone())
            .app_data(oauth_config.clone())
            .app_data(session.clone())
            .app_data(token_store.clone())
            .app_data(http_client.clone())
            .configure(routes)
    })
    .bind(listen_addr)?
    .run()
    .await?;

    Ok(())
}
