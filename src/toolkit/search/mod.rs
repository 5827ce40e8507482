pub mod cache;
pub mod executor;
pub mod query_processor;

pub use cache::{CacheStats, CachedSearch, LastSearchCache};
pub use executor::{QueryExecutor, SearchDiagnostic, SearchResponse};
pub use query_processor::{classify, IntentKind, SearchIntent, SearchVocabulary};
