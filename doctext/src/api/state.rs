use std::sync::Arc;

use crate::api::uploads::UploadStore;
use crate::config::Config;
use crate::processing::TextExtractor;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: TextExtractor,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let uploads = UploadStore::new(config.uploads.dir.clone());
        Self {
            config: Arc::new(config),
            extractor: TextExtractor::new(),
            uploads,
        }
    }
}
