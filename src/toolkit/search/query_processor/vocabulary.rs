use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::utils::{normalize_text, NormalizedText};


/// Several spellings of one school type sharing one synonym list.
struct SynonymGroup {
    keys: &'static [&'static str],
    synonyms: &'static [&'static str],
}

const SCHOOL_TYPE_GROUPS: &[SynonymGroup] = &[
    SynonymGroup {
        keys: &["tecnica", "técnica", "tec", "et"],
        synonyms: &["tecnica", "técnica", "tec", "escuela tecnica", "escuela técnica", "et"],
    },
    SynonymGroup {
        keys: &["jardin", "jardín", "infantes", "ji"],
        synonyms: &[
            "jardin",
            "jardín",
            "ji",
            "j.i.",
            "infantes",
            "jardin de infantes",
            "jardín de infantes",
        ],
    },
    SynonymGroup {
        keys: &["secundaria", "ees", "media"],
        synonyms: &["secundaria", "ees", "media", "escuela secundaria"],
    },
    SynonymGroup {
        keys: &["primaria", "ep"],
        synonyms: &["primaria", "ep", "escuela primaria"],
    },
    SynonymGroup {
        keys: &["cfp", "centro"],
        synonyms: &[
            "cfp",
            "centro de formacion profesional",
            "centro de formación profesional",
            "formacion profesional",
        ],
    },
    SynonymGroup {
        keys: &["especial", "eee"],
        synonyms: &["especial", "eee", "escuela especial"],
    },
    SynonymGroup {
        keys: &["adultos", "cea", "cens"],
        synonyms: &["adultos", "cea", "cens", "centro de adultos"],
    },
];

/// Spoken level word -> labels actually present in the `level` column.
/// Historical data mixes "Nivel X" and bare forms, so both are listed.
const LEVEL_STORAGE_LABELS: &[(&str, &[&str])] = &[
    ("primaria", &["Nivel Primario", "Primaria"]),
    ("primario", &["Nivel Primario", "Primaria"]),
    ("secundaria", &["Nivel Secundario", "Secundaria"]),
    ("secundario", &["Nivel Secundario", "Secundaria"]),
    ("inicial", &["Nivel Inicial", "Inicial"]),
    ("jardin", &["Nivel Inicial", "Inicial", "Jardín"]),
    ("tecnica", &["Nivel Secundario", "Secundaria", "Técnica"]),
    ("especial", &["Nivel Especial", "Especial"]),
    ("adultos", &["Adultos", "Nivel Adultos"]),
    ("adulto", &["Adultos", "Nivel Adultos"]),
    ("superior", &["Nivel Superior", "Superior"]),
    ("formacion profesional", &["Formación Profesional", "CFP"]),
    ("formacion", &["Formación Profesional", "CFP"]),
];


/// Read-only lookup tables for school-type synonyms and level labels.
///
/// Built once and shared; keys are stored normalized so lookups are case-
/// and accent-insensitive.
#[derive(Debug, Clone)]
pub struct SearchVocabulary {
    synonym_index: HashMap<NormalizedText, usize>,
    synonym_groups: Vec<Vec<NormalizedText>>,
    level_labels: HashMap<NormalizedText, &'static [&'static str]>,
}

impl SearchVocabulary {

    pub fn standard() -> Self {
        let mut synonym_index = HashMap::new();
        let mut synonym_groups = Vec::with_capacity(SCHOOL_TYPE_GROUPS.len());

        for (idx, group) in SCHOOL_TYPE_GROUPS.iter().enumerate() {
            let mut synonyms: Vec<NormalizedText> = Vec::with_capacity(group.synonyms.len());
            for synonym in group.synonyms {
                let normalized = normalize_text(synonym);
                if !synonyms.contains(&normalized) {
                    synonyms.push(normalized);
                }
            }
            synonym_groups.push(synonyms);

            for key in group.keys {
                synonym_index.insert(normalize_text(key), idx);
            }
        }

        let level_labels = LEVEL_STORAGE_LABELS
            .iter()
            .map(|(word, labels)| (normalize_text(word), *labels))
            .collect();

        Self {
            synonym_index,
            synonym_groups,
            level_labels,
        }
    }

    /// Normalized synonyms for a school-type token. Empty when the type is
    /// unknown, meaning no type-based narrowing is possible.
    pub fn synonyms_for(&self, type_key: &str) -> &[NormalizedText] {
        self.synonym_index
            .get(&normalize_text(type_key))
            .map(|idx| self.synonym_groups[*idx].as_slice())
            .unwrap_or(&[])
    }

    /// Storage labels to OR together for a level word. Unknown words come
    /// back unchanged as the only label.
    pub fn map_level_to_storage_labels(&self, level_word: &str) -> Vec<String> {
        match self.level_labels.get(&normalize_text(level_word)) {
            Some(labels) => labels.iter().map(|label| label.to_string()).collect(),
            None => vec![level_word.to_string()],
        }
    }
}

impl Default for SearchVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}


lazy_static! {
    pub static ref STANDARD_VOCABULARY: Arc<SearchVocabulary> = Arc::new(SearchVocabulary::standard());
}


pub fn synonyms_for(type_key: &str) -> &'static [NormalizedText] {
    STANDARD_VOCABULARY.synonyms_for(type_key)
}


pub fn map_level_to_storage_labels(level_word: &str) -> Vec<String> {
    STANDARD_VOCABULARY.map_level_to_storage_labels(level_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tecnica_spellings_share_group() {
        let base = synonyms_for("tecnica");
        assert!(!base.is_empty());
        assert_eq!(synonyms_for("técnica"), base);
        assert_eq!(synonyms_for("tec"), base);
        assert_eq!(synonyms_for("et"), base);
        assert_eq!(synonyms_for("TÉCNICA"), base);
    }

    #[test]
    fn test_synonyms_are_normalized_and_unique() {
        let jardin = synonyms_for("jardín");
        let as_str: Vec<&str> = jardin.iter().map(|s| s.as_str()).collect();
        assert_eq!(as_str, vec!["jardin", "ji", "j.i.", "infantes", "jardin de infantes"]);
        assert_eq!(synonyms_for("infantes"), jardin);
        assert_eq!(synonyms_for("ji"), jardin);
    }

    #[test]
    fn test_unknown_type_is_empty() {
        assert!(synonyms_for("universidad").is_empty());
        assert!(synonyms_for("").is_empty());
    }

    #[test]
    fn test_centro_maps_to_cfp() {
        assert_eq!(synonyms_for("centro"), synonyms_for("cfp"));
        assert!(synonyms_for("cfp").iter().any(|s| s == "formacion profesional"));
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(map_level_to_storage_labels("primaria"), vec!["Nivel Primario", "Primaria"]);
        assert_eq!(map_level_to_storage_labels("Jardín"), vec!["Nivel Inicial", "Inicial", "Jardín"]);
        assert_eq!(
            map_level_to_storage_labels("Formación  Profesional"),
            vec!["Formación Profesional", "CFP"]
        );
        assert_eq!(map_level_to_storage_labels("adulto"), map_level_to_storage_labels("adultos"));
    }

    #[test]
    fn test_unknown_level_falls_back_to_raw_input() {
        assert_eq!(map_level_to_storage_labels("Primari"), vec!["Primari"]);
    }

    #[test]
    fn test_custom_instance_matches_shared() {
        let vocabulary = SearchVocabulary::default();
        assert_eq!(vocabulary.synonyms_for("ees"), synonyms_for("secundaria"));
    }
}
