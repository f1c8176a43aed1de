use crate::models::{
    AppointmentRequest, AvailabilitySlot, ProfileUpdate, Provider, SessionResponse, SignInRequest,
    User,
};
use chrono::{Datelike, NaiveDate};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Any failure talking to the booking API.
///
/// Screens never show these details to the user; they end up in the log.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RequestError {
    /// HTTP status for API-level failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// HTTP client for the booking REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create an unauthenticated client for the API at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gobarber/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// A copy of this client that sends `token` as bearer credentials.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    /// A copy of this client without credentials.
    pub fn without_token(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> Result<Url, RequestError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| RequestError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header("Accept", "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, RequestError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("API error ({}): {}", status, body);
            return Err(RequestError::Status { status, body });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, RequestError> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST /sessions`
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionResponse, RequestError> {
        info!("Signing in as {}", email);
        let body = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self.request(Method::POST, self.url("sessions")?).json(&body);
        self.send_json(builder).await
    }

    /// `GET /providers`
    pub async fn providers(&self) -> Result<Vec<Provider>, RequestError> {
        info!("Fetching providers");
        let builder = self.request(Method::GET, self.url("providers")?);
        let providers: Vec<Provider> = self.send_json(builder).await?;
        debug!("Fetched {} providers", providers.len());
        Ok(providers)
    }

    /// `GET /providers/{id}/day-availability?year&month&day`
    pub async fn day_availability(
        &self,
        provider_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>, RequestError> {
        info!("Fetching availability for provider {} on {}", provider_id, date);
        let mut url = self.url(&format!("providers/{provider_id}/day-availability"))?;
        url.query_pairs_mut()
            .append_pair("year", &date.year().to_string())
            .append_pair("month", &date.month().to_string())
            .append_pair("day", &date.day().to_string());

        let builder = self.request(Method::GET, url);
        self.send_json(builder).await
    }

    /// `POST /appointments`
    ///
    /// The created appointment in the response body is not used.
    pub async fn create_appointment(&self, request: &AppointmentRequest) -> Result<(), RequestError> {
        info!(
            "Creating appointment with provider {} at {}",
            request.provider_id, request.date
        );
        let builder = self
            .request(Method::POST, self.url("appointments")?)
            .json(request);
        self.send(builder).await?;
        Ok(())
    }

    /// `PUT /profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, RequestError> {
        info!(
            "Updating profile (password change: {})",
            update.password_change.is_some()
        );
        let builder = self.request(Method::PUT, self.url("profile")?).json(update);
        self.send_json(builder).await
    }

    /// `PATCH /users/avatar` with the image at `path` as multipart field `avatar`.
    pub async fn update_avatar(&self, user_id: &str, path: &Path) -> Result<User, RequestError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| RequestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let (extension, mime) = image_mime(path);
        info!("Uploading avatar {} ({} bytes, {})", path.display(), bytes.len(), mime);

        let part = Part::bytes(bytes)
            .file_name(format!("{user_id}.{extension}"))
            .mime_str(mime)?;
        let form = Form::new().part("avatar", part);

        let builder = self
            .request(Method::PATCH, self.url("users/avatar")?)
            .multipart(form);
        self.send_json(builder).await
    }
}

/// File extension and MIME type used for an avatar upload. Unknown types go up as JPEG.
fn image_mime(path: &Path) -> (&'static str, &'static str) {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => ("png", "image/png"),
        Some("gif") => ("gif", "image/gif"),
        Some("webp") => ("webp", "image/webp"),
        _ => ("jpg", "image/jpeg"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:3333/", Duration::from_secs(1)).unwrap();
        let url = client.url("/providers").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/providers");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = ApiClient::new("not a url", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            client.url("providers"),
            Err(RequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_with_token_marks_authenticated() {
        let client = ApiClient::new("http://localhost:3333", Duration::from_secs(1)).unwrap();
        assert!(!client.is_authenticated());
        let authed = client.with_token("abc");
        assert!(authed.is_authenticated());
        assert!(!authed.without_token().is_authenticated());
        assert!(!format!("{:?}", authed).contains("abc"));
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("me.PNG")), ("png", "image/png"));
        assert_eq!(image_mime(Path::new("me.jpeg")), ("jpg", "image/jpeg"));
        assert_eq!(image_mime(Path::new("avatar")), ("jpg", "image/jpeg"));
    }
}
