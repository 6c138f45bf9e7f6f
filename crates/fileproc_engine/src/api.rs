use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

use crate::types::{
    map_reqwest_error, ApiError, ErrorBody, PageWire, ProcessAck, ProcessRequestWire, ResultWire,
    UploadAck,
};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Service origin, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Bearer credential; requests go out unauthenticated without it.
    pub bearer_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            bearer_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP surface of the file-processing service, behind a trait so the app
/// loop and tests can substitute transports.
#[async_trait::async_trait]
pub trait ProcessingApi: Send + Sync {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PageWire, ApiError>;
    async fn upload(&self, paths: &[PathBuf]) -> Result<UploadAck, ApiError>;
    async fn submit(&self, file_names: &[String], client_id: &str)
        -> Result<ProcessAck, ApiError>;
    /// Stored result for one file; `Ok(None)` when none exists yet.
    async fn fetch_result(&self, file_name: &str) -> Result<Option<ResultWire>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.settings.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.settings.bearer_token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl ProcessingApi for ReqwestApi {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PageWire, ApiError> {
        let request = self
            .authorize(self.client.get(self.endpoint("files")))
            .query(&[("page", page), ("page_size", page_size)]);
        let response = request.send().await.map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<PageWire>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn upload(&self, paths: &[PathBuf]) -> Result<UploadAck, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for path in paths {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|err| ApiError::File(format!("{}: {err}", path.display())))?;
            let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name_of(path));
            form = form.part("files", part);
        }

        let request = self
            .authorize(self.client.post(self.endpoint("upload")))
            .multipart(form);
        let response = request.send().await.map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<UploadAck>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn submit(
        &self,
        file_names: &[String],
        client_id: &str,
    ) -> Result<ProcessAck, ApiError> {
        let body = ProcessRequestWire {
            file_names: file_names.to_vec(),
            client_id: client_id.to_string(),
        };
        let request = self
            .authorize(self.client.post(self.endpoint("process")))
            .json(&body);
        let response = request.send().await.map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<ProcessAck>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn fetch_result(&self, file_name: &str) -> Result<Option<ResultWire>, ApiError> {
        let request = self.authorize(
            self.client
                .get(self.endpoint(&format!("results/filename/{file_name}"))),
        );
        let response = request.send().await.map_err(map_reqwest_error)?;
        // 404 means "no result yet", not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        response
            .json::<ResultWire>()
            .await
            .map(Some)
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Maps non-success responses to [`ApiError::Status`], preferring the
/// service's own error body over the bare status text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => match body.details {
            Some(details) => format!("{} ({details})", body.error),
            None => body.error,
        },
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
