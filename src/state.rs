//! Shared, read-only application state handed to every request.

use std::sync::Arc;
use std::time::Duration;

use crate::archive::{ArchiveError, Archiver, DisabledArchiver, WebhookArchiver};
use crate::config::AppConfig;
use crate::generators::{
    Generator, GeneratorError, ServiceLogPdfGenerator, ServiceLogXlsxGenerator, TypstRenderEngine,
};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

#[derive(Clone)]
pub struct AppState {
    pub pdf: Arc<dyn Generator>,
    pub xlsx: Arc<dyn Generator>,
    pub archiver: Arc<dyn Archiver>,
    pub archive_timeout: Duration,
}

impl AppState {
    pub fn new(
        pdf: Arc<dyn Generator>,
        xlsx: Arc<dyn Generator>,
        archiver: Arc<dyn Archiver>,
        archive_timeout: Duration,
    ) -> Self {
        Self {
            pdf,
            xlsx,
            archiver,
            archive_timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StateError> {
        let pdf = ServiceLogPdfGenerator::new(
            &config.template_dir,
            config.logo_path.clone(),
            TypstRenderEngine::new(config.typst_binary.clone()),
        )?;

        if !config.logo_path.is_file() {
            log::warn!(
                "logo {} not found; log sheets will be rendered without it",
                config.logo_path.display()
            );
        }

        let archiver: Arc<dyn Archiver> = match &config.archive_endpoint {
            Some(endpoint) => {
                log::info!("archiving log sheets to {}", endpoint);
                Arc::new(WebhookArchiver::new(endpoint.clone(), config.archive_timeout)?)
            }
            None => {
                log::warn!("ARCHIVE_ENDPOINT_URL not set; archiving is disabled");
                Arc::new(DisabledArchiver)
            }
        };

        Ok(Self::new(
            Arc::new(pdf),
            Arc::new(ServiceLogXlsxGenerator::default()),
            archiver,
            config.archive_timeout,
        ))
    }
}
