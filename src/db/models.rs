use serde::{Deserialize, Deserializer, Serialize};

use super::filter::Field;


/// Placeholder strings older form flows stored instead of "no FED assigned".
const FED_SENTINELS: &[&str] = &["NONE", "Sin FED asignado"];


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}


/// An educational establishment, identified by its 8-digit CUE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Establishment {
    #[serde(default)]
    pub id: String,

    pub cue: String,

    /// 6-digit site identifier; one site can host several establishments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predio: Option<String>,

    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<u32>,

    #[serde(
        default,
        deserialize_with = "deserialize_fed",
        skip_serializing_if = "Option::is_none"
    )]
    pub fed_in_charge: Option<String>,

    #[serde(default = "default_true")]
    pub is_educational: bool,

    #[serde(default)]
    pub contacts: Vec<Contact>,
}


/// A decentralized government office, identified by a short code like `jr01`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    #[serde(default)]
    pub id: String,

    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub org_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_subtype: Option<String>,

    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_role: Option<String>,
}


/// One search hit. Serialized with an `entity_type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity_type")]
pub enum Record {
    #[serde(rename = "establecimiento")]
    Establishment(Establishment),
    #[serde(rename = "organismo")]
    Organism(Organism),
}

impl Record {

    pub fn id(&self) -> &str {
        match self {
            Self::Establishment(e) => &e.id,
            Self::Organism(o) => &o.id,
        }
    }


    pub fn display_name(&self) -> &str {
        match self {
            Self::Establishment(e) => &e.name,
            Self::Organism(o) => o.name.as_deref().unwrap_or(&o.code),
        }
    }


    pub fn as_establishment(&self) -> Option<&Establishment> {
        match self {
            Self::Establishment(e) => Some(e),
            Self::Organism(_) => None,
        }
    }


    pub fn as_organism(&self) -> Option<&Organism> {
        match self {
            Self::Organism(o) => Some(o),
            Self::Establishment(_) => None,
        }
    }

    /// Value of a filterable column, `None` when the record kind lacks it or
    /// the optional value is unset.
    pub fn field(&self, field: Field) -> Option<&str> {
        match self {
            Self::Establishment(e) => match field {
                Field::Id => Some(e.id.as_str()),
                Field::Cue => Some(e.cue.as_str()),
                Field::Predio => e.predio.as_deref(),
                Field::Name => Some(e.name.as_str()),
                Field::Alias => e.alias.as_deref(),
                Field::District => Some(e.district.as_str()),
                Field::City => Some(e.city.as_str()),
                Field::Level => e.level.as_deref(),
                Field::Modality => e.modality.as_deref(),
                Field::Code | Field::OrgType | Field::OrgSubtype => None,
            },
            Self::Organism(o) => match field {
                Field::Id => Some(o.id.as_str()),
                Field::Code => Some(o.code.as_str()),
                Field::Name => o.name.as_deref(),
                Field::District => Some(o.district.as_str()),
                Field::City => Some(o.locality.as_str()),
                Field::OrgType => Some(o.org_type.as_str()),
                Field::OrgSubtype => o.org_subtype.as_deref(),
                Field::Cue | Field::Predio | Field::Alias | Field::Level | Field::Modality => None,
            },
        }
    }


    pub fn has_contacts(&self) -> bool {
        match self {
            Self::Establishment(e) => !e.contacts.is_empty(),
            Self::Organism(o) => o.contact_name.is_some(),
        }
    }
}


fn default_true() -> bool {
    true
}

fn deserialize_fed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() || FED_SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn establishment_json(fed: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "e1",
            "cue": "06012345",
            "name": "Escuela Primaria N° 8",
            "fed_in_charge": fed,
        })
    }

    #[test]
    fn test_fed_sentinels_become_none() {
        for sentinel in [json!("NONE"), json!("Sin FED asignado"), json!(""), json!(null)] {
            let e: Establishment = serde_json::from_value(establishment_json(sentinel)).unwrap();
            assert!(e.fed_in_charge.is_none());
        }

        let e: Establishment = serde_json::from_value(establishment_json(json!("Carlos Franco"))).unwrap();
        assert_eq!(e.fed_in_charge.as_deref(), Some("Carlos Franco"));
    }

    #[test]
    fn test_record_entity_type_tag() {
        let e: Establishment = serde_json::from_value(establishment_json(json!(null))).unwrap();
        let value = serde_json::to_value(Record::Establishment(e)).unwrap();
        assert_eq!(value["entity_type"], "establecimiento");
        assert_eq!(value["cue"], "06012345");
        assert!(value["is_educational"].as_bool().unwrap());

        let org: Record = serde_json::from_value(json!({
            "entity_type": "organismo",
            "code": "jr01",
            "org_type": "Jefatura Regional",
        }))
        .unwrap();
        assert_eq!(org.display_name(), "jr01");
        assert!(org.as_organism().is_some());
    }

    #[test]
    fn test_field_access_by_kind() {
        let e: Establishment = serde_json::from_value(establishment_json(json!(null))).unwrap();
        let record = Record::Establishment(e);
        assert_eq!(record.field(Field::Cue), Some("06012345"));
        assert_eq!(record.field(Field::Code), None);
        assert_eq!(record.field(Field::Alias), None);
        assert!(!record.has_contacts());
    }
}
