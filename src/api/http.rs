//! ureq-backed directory API client

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ureq::Body;
use ureq::http::{HeaderMap, Response};

use super::{ApiError, ContactForm, DirectoryApi, LoginReply, Result, SimilarAgents, User, WishlistReply};
use crate::catalog::{Agent, FilterOptionSet};
use crate::config::ApiConfig;

/// Name of the session cookie the server sets on login
const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WishlistBody {
    agent: SavedCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedCount {
    #[serde(default)]
    saved_by_count: u64,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    user: User,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentUserBody {
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct Subscription<'a> {
    email: &'a str,
}

/// HTTP client for the directory service
pub struct HttpDirectoryApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpDirectoryApi {
    /// Create a client for `config.base_url`, e.g. `https://host/api`
    pub fn new(config: &ApiConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str, token: Option<&str>) -> Result<Response<Body>> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let mut request = self.agent.get(&url);
        if let Some(token) = token {
            request = request.header("Cookie", &cookie_header(token));
        }

        check_status(request.call()?)
    }

    fn post<B: Serialize>(&self, path: &str, body: Option<&B>, token: Option<&str>) -> Result<Response<Body>> {
        let url = self.url(path);
        log::debug!("POST {}", url);

        let mut request = self.agent.post(&url);
        if let Some(token) = token {
            request = request.header("Cookie", &cookie_header(token));
        }

        let response = match body {
            Some(body) => {
                let payload = serde_json::to_string(body)?;
                request
                    .header("Content-Type", "application/json")
                    .send(payload.as_bytes())?
            }
            None => request.send_empty()?,
        };

        check_status(response)
    }
}

impl DirectoryApi for HttpDirectoryApi {
    fn fetch_agents(&self) -> Result<Vec<Agent>> {
        read_json(self.get("/agents/all", None)?)
    }

    fn fetch_filter_options(&self) -> Result<FilterOptionSet> {
        read_json(self.get("/agents/filters", None)?)
    }

    fn fetch_similar(&self, agent_id: &str) -> Result<SimilarAgents> {
        read_json(self.get(&format!("/agents/similar/{}", urlencoding::encode(agent_id)), None)?)
    }

    fn toggle_wishlist(&self, agent_id: &str, token: &str) -> Result<WishlistReply> {
        let response = self.post(
            &format!("/users/wishlist/{}", urlencoding::encode(agent_id)),
            None::<&()>,
            Some(token),
        )?;
        let status = response.status().as_u16();
        let body: WishlistBody = read_json(response)?;

        Ok(WishlistReply {
            status,
            saved_by_count: body.agent.saved_by_count,
        })
    }

    fn login(&self, email: &str, password: &str) -> Result<LoginReply> {
        let response = self.post("/users/login", Some(&Credentials { email, password }), None)?;
        let cookie_token = token_from_headers(response.headers());
        let body: LoginBody = read_json(response)?;

        Ok(LoginReply {
            user: body.user,
            token: cookie_token.or(body.token),
        })
    }

    fn current_user(&self, token: &str) -> Result<User> {
        let body: CurrentUserBody = read_json(self.get("/users/current_user", Some(token))?)?;
        body.user.ok_or(ApiError::Unauthenticated)
    }

    fn logout(&self, token: &str) -> Result<()> {
        self.post("/users/logout", None::<&()>, Some(token))?;
        Ok(())
    }

    fn submit_contact(&self, form: &ContactForm) -> Result<Option<String>> {
        read_message(self.post("/contact", Some(form), None)?)
    }

    fn subscribe_newsletter(&self, email: &str) -> Result<Option<String>> {
        read_message(self.post("/newsletter/subscribe", Some(&Subscription { email }), None)?)
    }
}

fn cookie_header(token: &str) -> String {
    format!("{}={}", TOKEN_COOKIE, token)
}

/// Turn non-2xx responses into `ApiError::Status`, keeping the server's message
fn check_status(mut response: Response<Body>) -> Result<Response<Body>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.body_mut().read_to_string().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_string());

    log::debug!("Request failed with status {}: {}", status.as_u16(), message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T> {
    let body = response.body_mut().read_to_string()?;
    Ok(serde_json::from_str(&body)?)
}

/// Confirmation endpoints may answer with an empty or non-JSON body
fn read_message(mut response: Response<Body>) -> Result<Option<String>> {
    let body = response.body_mut().read_to_string()?;
    Ok(serde_json::from_str::<MessageBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty()))
}

fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_token_cookie)
}

/// Extract the session token from one `Set-Cookie` header value
fn parse_token_cookie(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim() == TOKEN_COOKIE && !value.is_empty() {
        Some(value.trim().to_string())
    } else {
        None
    }
}
