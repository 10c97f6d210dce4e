//! Posting the form to its action

use crate::forms::FormSnapshot;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

/// Transport failures while posting the form
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Falha de conexão: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Falha ao ler anexo: {0}")]
    Attachment(#[from] std::io::Error),
}

/// What came back from the submission target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    /// Final URL after redirects, when known
    pub url: Option<String>,
    pub body: String,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for posting a form, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormTransport: Send + Sync {
    /// POST every entry of `form` to `action`
    async fn submit(&self, action: &str, form: &FormSnapshot) -> Result<SubmitResponse, TransportError>;
}

/// [`FormTransport`] over HTTP: urlencoded, or multipart when files are attached
pub struct HttpFormTransport {
    http: reqwest::Client,
}

impl HttpFormTransport {
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
        })
    }

    async fn multipart(form: &FormSnapshot) -> Result<Form, TransportError> {
        let mut multipart = Form::new();
        for (name, value) in form.text_pairs() {
            multipart = multipart.text(name, value);
        }
        for (name, file) in form.files() {
            let bytes = tokio::fs::read(&file.path).await?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(&file.mime)?;
            multipart = multipart.part(name.to_string(), part);
        }
        Ok(multipart)
    }
}

#[async_trait]
impl FormTransport for HttpFormTransport {
    async fn submit(&self, action: &str, form: &FormSnapshot) -> Result<SubmitResponse, TransportError> {
        let request = self.http.post(action);
        let request = if form.has_files() {
            request.multipart(Self::multipart(form).await?)
        } else {
            request.form(&form.text_pairs())
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = Some(response.url().to_string());
        let body = response.text().await?;
        tracing::debug!(status, "form posted");

        Ok(SubmitResponse { status, url, body })
    }
}
