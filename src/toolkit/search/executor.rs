use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::query_processor::{classify, NumberTokenMatcher, SearchIntent, SearchVocabulary, STANDARD_VOCABULARY};
use crate::core::SearchLimits;
use crate::db::{Collection, Field, FilterSpec, Record, RecordStore};
use crate::utils::{normalize_text, truncate_for_log};


const ESTABLISHMENT_TEXT_FIELDS: &[Field] = &[Field::Name, Field::Alias, Field::District, Field::City];

const ORGANISM_TEXT_FIELDS: &[Field] = &[Field::Name, Field::OrgType, Field::OrgSubtype, Field::District];

const NAME_FIELDS: &[Field] = &[Field::Name, Field::Alias];


/// A store failure that was absorbed into an empty partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchDiagnostic {
    pub path: String,
    pub message: String,
}


#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResponse {
    /// `None` when the input was blank and nothing ran.
    pub intent: Option<SearchIntent>,
    pub records: Vec<Record>,
    pub diagnostics: Vec<SearchDiagnostic>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when at least one store call failed.
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}


/// Turns a [`SearchIntent`] into store filters, runs them and caps the
/// result.
///
/// Store errors never escape: each failing call contributes no records and
/// one [`SearchDiagnostic`].
pub struct QueryExecutor {
    store: Arc<dyn RecordStore>,
    vocabulary: Arc<SearchVocabulary>,
    limits: SearchLimits,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn RecordStore>, vocabulary: Arc<SearchVocabulary>, limits: SearchLimits) -> Self {
        Self {
            store,
            vocabulary,
            limits,
        }
    }


    pub fn with_defaults(store: Arc<dyn RecordStore>) -> Self {
        Self::new(store, STANDARD_VOCABULARY.clone(), SearchLimits::default())
    }


    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Classifies and executes a raw search string. Blank input returns an
    /// empty response without touching the store.
    pub async fn search(&self, raw_input: &str) -> SearchResponse {
        if raw_input.trim().is_empty() {
            return SearchResponse::empty();
        }

        let intent = classify(raw_input);
        debug!(
            "Search '{}' -> {} on store {}",
            truncate_for_log(raw_input.trim(), 80),
            intent.as_ref(),
            self.store.store_name()
        );
        self.execute(&intent).await
    }


    pub async fn execute(&self, intent: &SearchIntent) -> SearchResponse {
        let mut diagnostics = Vec::new();

        let mut records = match intent {
            SearchIntent::ExactCode { value } => self.by_organism_code(value, &mut diagnostics).await,
            SearchIntent::NumericId8 { value } => self.by_cue(value, &mut diagnostics).await,
            SearchIntent::NumericId6 { value } => self.by_predio(value, &mut diagnostics).await,
            SearchIntent::LevelAndNumber { level, number } => {
                self.by_level_and_number(level, number, &mut diagnostics).await
            }
            SearchIntent::TypeAndNumber { school_type, number } => {
                self.by_type_and_number(school_type, number, &mut diagnostics).await
            }
            SearchIntent::TypeOnly { school_type } => self.by_type(school_type, &mut diagnostics).await,
            SearchIntent::FreeText { value } => self.by_free_text(value, &mut diagnostics).await,
        };

        records.truncate(self.limits.result_limit);

        if diagnostics.is_empty() {
            info!("{} search returned {} record(s)", intent.as_ref(), records.len());
        } else {
            warn!(
                "{} search degraded: {} record(s), {} failed store call(s)",
                intent.as_ref(),
                records.len(),
                diagnostics.len()
            );
        }

        SearchResponse {
            intent: Some(intent.clone()),
            records,
            diagnostics,
        }
    }

    fn establishments(&self) -> FilterSpec {
        FilterSpec::new(Collection::Establishments).with_contacts_if(self.limits.require_contacts)
    }

    async fn fetch(&self, path: &str, filter: &FilterSpec) -> Result<Vec<Record>, SearchDiagnostic> {
        debug!("{}: {:?}", path, filter);
        self.store.fetch(filter).await.map_err(|e| {
            error!("Error in {} search: {}", path, e);
            SearchDiagnostic {
                path: path.to_string(),
                message: e.to_string(),
            }
        })
    }

    async fn fetch_or_empty(
        &self,
        path: &str,
        filter: &FilterSpec,
        diagnostics: &mut Vec<SearchDiagnostic>,
    ) -> Vec<Record> {
        absorb(self.fetch(path, filter).await, diagnostics)
    }

    async fn by_organism_code(&self, code: &str, diagnostics: &mut Vec<SearchDiagnostic>) -> Vec<Record> {
        let filter = FilterSpec::new(Collection::Organisms)
            .equals(Field::Code, code)
            .limit(1);
        self.fetch_or_empty("exact_code", &filter, diagnostics).await
    }

    async fn by_cue(&self, cue: &str, diagnostics: &mut Vec<SearchDiagnostic>) -> Vec<Record> {
        let filter = self.establishments().equals(Field::Cue, cue).limit(1);
        self.fetch_or_empty("numeric_id8", &filter, diagnostics).await
    }

    async fn by_predio(&self, predio: &str, diagnostics: &mut Vec<SearchDiagnostic>) -> Vec<Record> {
        let filter = self
            .establishments()
            .equals(Field::Predio, predio)
            .order_by(Field::Name)
            .limit(self.limits.result_limit);
        self.fetch_or_empty("numeric_id6", &filter, diagnostics).await
    }

    async fn by_level_and_number(
        &self,
        level: &str,
        number: &str,
        diagnostics: &mut Vec<SearchDiagnostic>,
    ) -> Vec<Record> {
        let labels = self.vocabulary.map_level_to_storage_labels(level);
        debug!("Level '{}' maps to storage labels {:?}", level, labels);

        let filter = self
            .establishments()
            .any_contains(&[Field::Level], &labels)
            .contains(Field::Name, number)
            .order_by(Field::Name)
            .limit(self.limits.result_limit);
        self.fetch_or_empty("level_and_number", &filter, diagnostics).await
    }

    async fn by_type(&self, school_type: &str, diagnostics: &mut Vec<SearchDiagnostic>) -> Vec<Record> {
        let synonyms = self.vocabulary.synonyms_for(school_type);
        if synonyms.is_empty() {
            debug!("No synonyms for type '{}', widening to free text", school_type);
            return self.by_free_text(school_type, diagnostics).await;
        }

        let filter = self
            .establishments()
            .any_contains(NAME_FIELDS, synonyms)
            .order_by(Field::Name)
            .limit(self.limits.result_limit);
        self.fetch_or_empty("type_only", &filter, diagnostics).await
    }

    /// One fetch narrowed by type synonyms (or a bounded scan when there is
    /// no usable type), then the number-token filter runs locally.
    async fn by_type_and_number(
        &self,
        school_type: &str,
        number: &str,
        diagnostics: &mut Vec<SearchDiagnostic>,
    ) -> Vec<Record> {
        let matcher = match NumberTokenMatcher::new(number) {
            Ok(matcher) => matcher,
            Err(e) => {
                error!("Invalid number token '{}': {}", number, e);
                diagnostics.push(SearchDiagnostic {
                    path: "type_and_number".to_string(),
                    message: e.to_string(),
                });
                return Vec::new();
            }
        };

        let synonyms = if school_type.is_empty() {
            &[][..]
        } else {
            self.vocabulary.synonyms_for(school_type)
        };

        let (path, filter) = if synonyms.is_empty() {
            (
                "type_and_number/scan",
                self.establishments()
                    .order_by(Field::Name)
                    .limit(self.limits.number_scan_limit),
            )
        } else {
            (
                "type_and_number",
                self.establishments()
                    .any_contains(NAME_FIELDS, synonyms)
                    .order_by(Field::Name)
                    .limit(self.limits.type_prefetch_limit),
            )
        };

        let candidates = self.fetch_or_empty(path, &filter, diagnostics).await;
        let fetched = candidates.len();

        let matched: Vec<Record> = candidates
            .into_iter()
            .filter(|record| number_token_in_names(record, &matcher))
            .take(self.limits.result_limit)
            .collect();

        debug!(
            "Number token '{}' kept {} of {} candidate(s)",
            matcher.number(),
            matched.len(),
            fetched
        );
        matched
    }

    /// Both collections are queried concurrently and fail independently;
    /// establishments come first.
    async fn by_free_text(&self, text: &str, diagnostics: &mut Vec<SearchDiagnostic>) -> Vec<Record> {
        let needle = normalize_text(text);
        if needle.is_empty() {
            return Vec::new();
        }

        let establishment_filter = self
            .establishments()
            .any_contains(ESTABLISHMENT_TEXT_FIELDS, &[needle.as_str()])
            .order_by(Field::Name)
            .limit(self.limits.result_limit);
        let organism_filter = FilterSpec::new(Collection::Organisms)
            .any_contains(ORGANISM_TEXT_FIELDS, &[needle.as_str()])
            .order_by(Field::Name)
            .limit(self.limits.result_limit);

        let (establishments, organisms) = futures::future::join(
            self.fetch("free_text/establishments", &establishment_filter),
            self.fetch("free_text/organisms", &organism_filter),
        )
        .await;

        let mut records = absorb(establishments, diagnostics);
        records.extend(absorb(organisms, diagnostics));
        records
    }
}


fn absorb(result: Result<Vec<Record>, SearchDiagnostic>, diagnostics: &mut Vec<SearchDiagnostic>) -> Vec<Record> {
    match result {
        Ok(records) => records,
        Err(diagnostic) => {
            diagnostics.push(diagnostic);
            Vec::new()
        }
    }
}

fn number_token_in_names(record: &Record, matcher: &NumberTokenMatcher) -> bool {
    [Field::Name, Field::Alias]
        .into_iter()
        .filter_map(|field| record.field(field))
        .any(|value| matcher.is_match(&normalize_text(value)))
}
