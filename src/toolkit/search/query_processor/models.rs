use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumDiscriminants};


/// What a raw search string asks for. Exactly one variant per input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumDiscriminants)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[strum_discriminants(name(IntentKind), derive(Hash))]
pub enum SearchIntent {
    /// Organism code such as `jr01` or `jd113`, lowercased.
    ExactCode { value: String },

    /// 8-digit CUE.
    NumericId8 { value: String },

    /// 6-digit site (predio) identifier.
    NumericId6 { value: String },

    /// Educational level word plus a school number, e.g. "secundaria 8".
    LevelAndNumber { level: String, number: String },

    /// Type abbreviation plus number. An empty `school_type` means a bare
    /// number to be matched against any name or alias.
    TypeAndNumber { school_type: String, number: String },

    TypeOnly { school_type: String },

    /// Trimmed, not normalized.
    FreeText { value: String },
}

impl SearchIntent {

    pub fn kind(&self) -> IntentKind {
        IntentKind::from(self)
    }

    /// Lookups that expect at most one record back.
    pub fn is_exact_identity(&self) -> bool {
        matches!(self, Self::ExactCode { .. } | Self::NumericId8 { .. })
    }
}
