use crate::{
    application::{proxy_process::use_case::ProcessProxyUseCase, upload_photo::use_case::UploadPhotoUseCase},
    config::Config,
    infrastructure::upstream::traits::UpstreamService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upload: Arc<UploadPhotoUseCase>,
    pub process: Arc<ProcessProxyUseCase>,
}

impl AppState {
    pub fn new(config: Config, upstream: Arc<dyn UpstreamService>) -> Self {
        Self {
            config,
            upload: Arc::new(UploadPhotoUseCase::new(Arc::clone(&upstream))),
            process: Arc::new(ProcessProxyUseCase::new(upstream)),
        }
    }
}
