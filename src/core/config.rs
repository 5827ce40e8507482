

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{PadronError, Result};
use crate::{DEFAULT_NUMBER_SCAN_LIMIT, DEFAULT_RESULT_LIMIT, DEFAULT_TYPE_PREFETCH_LIMIT};


const ENV_PREFIX: &str = "PADRON";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {

    pub result_limit: usize,
    pub type_prefetch_limit: usize,
    pub number_scan_limit: usize,

    /// Establishment queries only return rows with at least one contact.
    pub require_contacts: bool,


    pub dataset_path: Option<PathBuf>,


    pub log_filter: String,


    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
}

impl SearchConfig {

    pub fn new() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            type_prefetch_limit: DEFAULT_TYPE_PREFETCH_LIMIT,
            number_scan_limit: DEFAULT_NUMBER_SCAN_LIMIT,
            require_contacts: true,
            dataset_path: None,
            log_filter: "info".to_string(),
            cache_capacity: 64,
            cache_ttl_secs: 900,
        }
    }


    /// Layers an optional config file (TOML, JSON, YAML... by extension) under
    /// `PADRON_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Self = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| PadronError::Config(e.to_string()))?;

        config.limits()?;
        Ok(config)
    }


    pub fn limits(&self) -> Result<SearchLimits> {
        let limits = SearchLimits {
            result_limit: self.result_limit,
            type_prefetch_limit: self.type_prefetch_limit,
            number_scan_limit: self.number_scan_limit,
            require_contacts: self.require_contacts,
        };
        limits.validate()?;
        Ok(limits)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}


/// Caps and join policy the executor applies on every path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub result_limit: usize,
    /// Rows fetched by synonym before the local number-token filter.
    pub type_prefetch_limit: usize,
    /// Rows scanned when a bare number has no type to narrow by.
    pub number_scan_limit: usize,
    pub require_contacts: bool,
}

impl SearchLimits {
    fn validate(&self) -> Result<()> {
        if self.result_limit == 0 {
            return Err(PadronError::Config("result_limit must be greater than zero".to_string()));
        }
        if self.type_prefetch_limit == 0 || self.number_scan_limit == 0 {
            return Err(PadronError::Config("prefetch limits must be greater than zero".to_string()));
        }
        Ok(())
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            type_prefetch_limit: DEFAULT_TYPE_PREFETCH_LIMIT,
            number_scan_limit: DEFAULT_NUMBER_SCAN_LIMIT,
            require_contacts: true,
        }
    }
}
