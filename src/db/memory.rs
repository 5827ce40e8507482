use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::filter::{Collection, Condition, FilterSpec};
use super::models::{Establishment, Organism, Record};
use super::store::{RecordStore, StoreError};
use crate::utils::normalize_text;


/// On-disk shape of a registry snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub establishments: Vec<Establishment>,
    #[serde(default)]
    pub organisms: Vec<Organism>,
}


/// In-process [`RecordStore`].
///
/// `Contains` compares case- and accent-insensitively, ordering uses the
/// normalized field value, and the limit is applied after ordering.
pub struct MemoryStore {
    data: RwLock<Dataset>,
}

impl MemoryStore {

    pub fn new() -> Self {
        Self {
            data: RwLock::new(Dataset::default()),
        }
    }


    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        let store = Self::new();
        for establishment in dataset.establishments {
            store.insert_establishment(establishment)?;
        }
        for organism in dataset.organisms {
            store.insert_organism(organism)?;
        }
        Ok(store)
    }


    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        let dataset: Dataset = serde_json::from_str(&raw)?;
        let store = Self::from_dataset(dataset)?;
        info!(
            "Loaded {} establishments and {} organisms from {}",
            store.data.read().establishments.len(),
            store.data.read().organisms.len(),
            path.display()
        );
        Ok(store)
    }

    /// Rejects a CUE that is already registered. Returns the record id,
    /// generating one when the incoming id is blank.
    pub fn insert_establishment(&self, mut establishment: Establishment) -> Result<String, StoreError> {
        let mut data = self.data.write();
        if data.establishments.iter().any(|e| e.cue == establishment.cue) {
            return Err(StoreError::Duplicate(format!(
                "an establishment with CUE {} already exists",
                establishment.cue
            )));
        }
        if establishment.id.trim().is_empty() {
            establishment.id = Uuid::new_v4().to_string();
        }
        let id = establishment.id.clone();
        data.establishments.push(establishment);
        Ok(id)
    }

    /// Rejects an organism code that is already registered.
    pub fn insert_organism(&self, mut organism: Organism) -> Result<String, StoreError> {
        let mut data = self.data.write();
        if data.organisms.iter().any(|o| o.code == organism.code) {
            return Err(StoreError::Duplicate(format!(
                "an organism with code {} already exists",
                organism.code
            )));
        }
        if organism.id.trim().is_empty() {
            organism.id = Uuid::new_v4().to_string();
        }
        let id = organism.id.clone();
        data.organisms.push(organism);
        Ok(id)
    }


    pub fn len(&self) -> usize {
        let data = self.data.read();
        data.establishments.len() + data.organisms.len()
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self, collection: Collection) -> Vec<Record> {
        let data = self.data.read();
        match collection {
            Collection::Establishments => data
                .establishments
                .iter()
                .cloned()
                .map(Record::Establishment)
                .collect(),
            Collection::Organisms => data.organisms.iter().cloned().map(Record::Organism).collect(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch(&self, filter: &FilterSpec) -> Result<Vec<Record>, StoreError> {
        let mut records: Vec<Record> = self
            .snapshot(filter.collection)
            .into_iter()
            .filter(|record| !filter.require_contacts || record.has_contacts())
            .filter(|record| {
                filter
                    .groups
                    .iter()
                    .all(|group| group.iter().any(|condition| condition_holds(record, condition)))
            })
            .collect();

        if let Some(field) = filter.order_by {
            records.sort_by_cached_key(|record| {
                record.field(field).map(normalize_text).unwrap_or_default()
            });
        }

        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }

        debug!(
            "MemoryStore fetched {} {} record(s) for {} condition group(s)",
            records.len(),
            filter.collection,
            filter.groups.len()
        );
        Ok(records)
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}


fn condition_holds(record: &Record, condition: &Condition) -> bool {
    match condition {
        Condition::Eq { field, value } => record.field(*field) == Some(value.as_str()),
        Condition::Contains { field, value } => record
            .field(*field)
            .map(|haystack| normalize_text(haystack).contains(normalize_text(value).as_str()))
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::filter::Field;
    use crate::db::models::Contact;

    fn contact() -> Contact {
        Contact {
            name: "Ana".to_string(),
            surname: "Gómez".to_string(),
            role: Some("Directora".to_string()),
            phone: None,
            email: None,
        }
    }

    fn school(cue: &str, name: &str, level: &str, with_contact: bool) -> Establishment {
        Establishment {
            id: String::new(),
            cue: cue.to_string(),
            predio: None,
            name: name.to_string(),
            alias: None,
            district: "La Plata".to_string(),
            city: "La Plata".to_string(),
            address: String::new(),
            level: Some(level.to_string()),
            modality: None,
            enrollment: None,
            fed_in_charge: None,
            is_educational: true,
            contacts: if with_contact { vec![contact()] } else { Vec::new() },
        }
    }

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_establishment(school("00000003", "Escuela Técnica N° 5", "Nivel Secundario", true)).unwrap();
        store.insert_establishment(school("00000001", "Escuela Primaria N° 8", "Nivel Primario", true)).unwrap();
        store.insert_establishment(school("00000002", "Escuela Primaria N° 18", "Primaria", false)).unwrap();
        store
    }

    #[tokio::test]
    async fn test_contains_is_accent_insensitive() {
        let store = store();
        let filter = FilterSpec::new(Collection::Establishments).contains(Field::Name, "tecnica");
        let records = store.fetch(&filter).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name(), "Escuela Técnica N° 5");
    }

    #[tokio::test]
    async fn test_eq_is_exact() {
        let store = store();
        let filter = FilterSpec::new(Collection::Establishments).equals(Field::Cue, "00000001");
        assert_eq!(store.fetch(&filter).await.unwrap().len(), 1);

        let filter = FilterSpec::new(Collection::Establishments).equals(Field::Cue, "0000000");
        assert!(store.fetch(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_limit_and_contacts() {
        let store = store();
        let filter = FilterSpec::new(Collection::Establishments)
            .any_contains(&[Field::Level], &["Nivel Primario", "Primaria"])
            .order_by(Field::Name);
        let names: Vec<String> = store
            .fetch(&filter)
            .await
            .unwrap()
            .iter()
            .map(|r| r.display_name().to_string())
            .collect();
        assert_eq!(names, vec!["Escuela Primaria N° 18", "Escuela Primaria N° 8"]);

        let filter = filter.with_contacts().limit(5);
        assert_eq!(store.fetch(&filter).await.unwrap().len(), 1);

        let filter = FilterSpec::new(Collection::Establishments).order_by(Field::Name).limit(2);
        assert_eq!(store.fetch(&filter).await.unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_cue_rejected() {
        let store = store();
        let result = store.insert_establishment(school("00000001", "Otra", "Inicial", false));
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_blank_id_gets_generated() {
        let store = MemoryStore::new();
        let id = store.insert_establishment(school("12345678", "Jardín 903", "Nivel Inicial", false)).unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_load_dataset_json() {
        let raw = r#"{
            "establishments": [
                {"id": "e1", "cue": "06000001", "name": "EES N° 3", "fed_in_charge": "NONE"}
            ],
            "organisms": [
                {"id": "o1", "code": "jr01", "name": "Jefatura Regional I", "org_type": "Jefatura"}
            ]
        }"#;
        let dataset: Dataset = serde_json::from_str(raw).unwrap();
        let store = MemoryStore::from_dataset(dataset).unwrap();
        assert_eq!(store.len(), 2);
    }
}
