// Application configuration, persisted as JSON in the platform config
// directory

use serde::{Deserialize, Serialize};

use crate::LiftlogError;
use crate::workout::WeightType;

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_HISTORY_PAGE_SIZE: usize = 10;

#[derive(Serialize, Deserialize, Debug)]
pub struct AppConfig {
    /// Unit new weights default to (lbs or kg)
    pub preferred_weight_type: WeightType,
    /// Number of records shown per page by the history listing
    pub history_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preferred_weight_type: WeightType::Lbs,
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_local_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join("liftlog").join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let file = std::fs::File::open(config_path).expect("Could not open config file");
            Some(serde_json::from_reader(file).expect("Could not parse config file"))
        } else {
            None
        }
    }

    pub fn save(&self) -> Result<(), LiftlogError> {
        let config_path = dirs::config_dir()
            .ok_or(LiftlogError::NoConfigDir)?
            .join("liftlog")
            .join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            std::fs::create_dir_all(config_path.parent().unwrap())
                .map_err(|e| LiftlogError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| LiftlogError::ConfigIOError { source: e })?;
        serde_json::to_writer(file, self)
            .map_err(|e| LiftlogError::ConfigSerializeError { source: e })
    }
}
