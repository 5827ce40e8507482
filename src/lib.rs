
pub mod core;
pub mod db;
pub mod toolkit;
pub mod utils;

pub use utils::{normalize_text, truncate_for_log, NormalizedText};


pub use crate::core::config::{SearchConfig, SearchLimits};
pub use crate::core::error::{PadronError, Result};
pub use db::{MemoryStore, Record, RecordStore, StoreError};
pub use toolkit::search::{
    classify, LastSearchCache, QueryExecutor, SearchIntent, SearchResponse, SearchVocabulary,
};


pub const DEFAULT_RESULT_LIMIT: usize = 50;


pub const DEFAULT_TYPE_PREFETCH_LIMIT: usize = 200;


pub const DEFAULT_NUMBER_SCAN_LIMIT: usize = 500;
