use std::sync::Arc;

use log::info;

use crate::{
    config::Config, database::open_database, error::AppError, store::GreetingStore,
    upload::PhotoStore,
};

pub struct AppState {
    pub config: Config,
    pub greetings: GreetingStore,
    pub photos: PhotoStore,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let greetings = GreetingStore::new(open_database(&config.database_path)?);
        info!("{} greetings on record", greetings.count().await?);

        let photos = PhotoStore::new(&config.upload_dir);
        photos.ensure_dir().await?;
        info!("Storing uploads in {}", photos.dir().display());

        Ok(Arc::new(Self {
            config,
            greetings,
            photos,
        }))
    }
}
