use async_trait::async_trait;
use std::time::Duration;

use super::{ArchiveError, ArchiveRequest, Archiver};

/// Posts archive requests as a urlencoded form to a fixed webhook.
pub struct WebhookArchiver {
    endpoint: String,
    client: reqwest::Client,
}

impl WebhookArchiver {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ArchiveError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(concat!("service-log-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(endpoint, client))
    }

    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl Archiver for WebhookArchiver {
    async fn archive(&self, request: &ArchiveRequest) -> Result<(), ArchiveError> {
        log::debug!(
            "forwarding {} ({} base64 bytes) to archive",
            request.filename,
            request.file_data.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status(status.as_u16()));
        }

        log::info!("archived {} for {}", request.filename, request.company);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request() -> ArchiveRequest {
        ArchiveRequest {
            file_data: "JVBERi0xLjc=".into(),
            filename: "Acme_Corp_service_07-03-2024.pdf".into(),
            company: "Acme Corp".into(),
            date: "2024-03-07".into(),
            mime_type: "application/pdf".into(),
        }
    }

    #[tokio::test]
    async fn test_posts_urlencoded_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/exec")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("fileData".into(), "JVBERi0xLjc=".into()),
                Matcher::UrlEncoded("filename".into(), "Acme_Corp_service_07-03-2024.pdf".into()),
                Matcher::UrlEncoded("company".into(), "Acme Corp".into()),
                Matcher::UrlEncoded("date".into(), "2024-03-07".into()),
                Matcher::UrlEncoded("mimeType".into(), "application/pdf".into()),
            ]))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let archiver =
            WebhookArchiver::new(format!("{}/exec", server.url()), Duration::from_secs(5)).unwrap();
        archiver.archive(&request()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/exec")
            .with_status(500)
            .create_async()
            .await;

        let archiver =
            WebhookArchiver::new(format!("{}/exec", server.url()), Duration::from_secs(5)).unwrap();
        let err = archiver.archive(&request()).await.unwrap_err();
        assert!(matches!(err, ArchiveError::Status(500)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_failure() {
        let archiver =
            WebhookArchiver::new("http://127.0.0.1:1/exec", Duration::from_secs(2)).unwrap();
        let err = archiver.archive(&request()).await.unwrap_err();
        assert!(matches!(err, ArchiveError::Request(_)));
    }
}
