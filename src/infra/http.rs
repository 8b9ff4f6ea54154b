use std::time::Duration;

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{AppError, AppResult};

const LOGIN_PATH: &str = "/auth/login";

/// JSON client for the portal backend. The session cookie set at login is
/// kept in the client's cookie store and sent with every request.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|err| {
                AppError::Configuration(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.http.get(self.endpoint(path))).await?;
        decode(checked(response).await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        let response = self.send(request).await?;
        decode(checked(response).await?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .put(self.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        let response = self.send(request).await?;
        decode(checked(response).await?).await
    }

    /// Sends a request without status normalization. The auth endpoints use
    /// this because a login rejection is not a mid-session redirect.
    pub async fn post_raw<B>(&self, path: &str, body: Option<&B>) -> AppResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.post(self.endpoint(path));
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let request = request.header(ACCEPT, "application/json");
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Network(format!("failed to reach backend: {err}")))?;
        debug!(status = %response.status(), url = %response.url(), "backend responded");
        Ok(response)
    }
}

/// Converts redirect-to-login and non-2xx responses into errors.
pub async fn checked(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status == StatusCode::FOUND || response.url().path().starts_with(LOGIN_PATH) {
        return Err(AppError::Auth("authentication required".to_string()));
    }
    if status == StatusCode::UNAUTHORIZED {
        let message = server_message(response)
            .await
            .unwrap_or_else(|| "authentication required".to_string());
        return Err(AppError::Auth(message));
    }
    if !status.is_success() {
        let message = server_message(response)
            .await
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        return Err(AppError::Server {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

pub async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let body = response
        .text()
        .await
        .map_err(|err| AppError::Network(format!("failed to read response: {err}")))?;
    let payload = if body.trim().is_empty() {
        "null"
    } else {
        body.as_str()
    };
    serde_json::from_str(payload).map_err(|err| AppError::Decode(err.to_string()))
}

/// The `message` field of a JSON error body, if there is one.
pub async fn server_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&body)
        .ok()?
        .message
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use mockito::Server;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    fn client(url: &str) -> ApiClient {
        ApiClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn joins_endpoints_without_double_slashes() {
        let api = client("http://localhost:5000/");
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(
            api.endpoint("/patient/tickets"),
            "http://localhost:5000/patient/tickets"
        );
    }

    #[tokio::test]
    async fn surfaces_server_message_on_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/patient/profile")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Patient not found"}"#)
            .create_async()
            .await;

        let error = client(&server.url())
            .get::<Value>("/patient/profile")
            .await
            .unwrap_err();

        mock.assert_async().await;
        match error {
            AppError::Server { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Patient not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn falls_back_to_generic_status_message() {
        let mut server = Server::new_async().await;
        let _stats = server
            .mock("GET", "/admin/stats")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let error = client(&server.url())
            .get::<Value>("/admin/stats")
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn redirect_to_login_is_an_auth_error() {
        let mut server = Server::new_async().await;
        let _tickets = server
            .mock("GET", "/department/tickets")
            .with_status(302)
            .with_header("location", "/auth/login")
            .create_async()
            .await;
        let _login = server
            .mock("GET", "/auth/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Please log in to access this resource"}"#)
            .create_async()
            .await;

        let error = client(&server.url())
            .get::<Value>("/department/tickets")
            .await
            .unwrap_err();

        assert!(error.is_auth());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let error = client("http://127.0.0.1:1")
            .get::<Value>("/auth/status")
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::Network(_)));
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _workers = server
            .mock("GET", "/maintenance/workers")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let error = client(&server.url())
            .get::<Vec<Value>>("/maintenance/workers")
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::Decode(_)));
    }
}
