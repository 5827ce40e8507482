pub mod models;
pub mod patterns;
pub mod processor;
pub mod vocabulary;

pub use models::{IntentKind, SearchIntent};
pub use patterns::{build_number_token_regex, NumberTokenMatcher};
pub use processor::{classify, ClassificationRule, CLASSIFICATION_RULES};
pub use vocabulary::{map_level_to_storage_labels, synonyms_for, SearchVocabulary, STANDARD_VOCABULARY};
