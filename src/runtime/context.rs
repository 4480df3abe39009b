use std::sync::Arc;

use crate::config::ClientConfig;
use crate::processing::Processor;
use crate::request::BuilderRegistry;
use crate::source::{HttpImageProbe, ImageProbe};
use crate::transport::{ApiClient, BlobStore, RequestSender};

use super::{CatalogService, JobService, ProcessService, Result};

#[derive(Debug, Clone)]
pub struct AppContext {
    config: ClientConfig,
    catalog_service: CatalogService,
    process_service: ProcessService,
    job_service: JobService,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = ApiClient::from_config(&config)?;
        let probe = HttpImageProbe::new(config.agent(), config.max_probe_bytes);
        Ok(Self::with_parts(config, Arc::new(client), Arc::new(probe)))
    }

    pub fn with_parts(
        config: ClientConfig,
        sender: Arc<dyn RequestSender>,
        probe: Arc<dyn ImageProbe>,
    ) -> Self {
        let processor = Processor::new(BuilderRegistry::default(), sender, probe, BlobStore::new());
        let process_service = ProcessService::new(processor);
        Self {
            config,
            catalog_service: CatalogService,
            job_service: JobService::new(process_service.clone()),
            process_service,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn catalog_service(&self) -> &CatalogService {
        &self.catalog_service
    }

    pub fn process_service(&self) -> &ProcessService {
        &self.process_service
    }

    pub fn job_service(&self) -> &JobService {
        &self.job_service
    }
}
