use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Establishments,
    Organisms,
}


/// Columns the search core filters, matches or orders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Id,
    Cue,
    Predio,
    Name,
    Alias,
    District,
    City,
    Level,
    Modality,
    Code,
    OrgType,
    OrgSubtype,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    /// Exact, case-sensitive equality.
    Eq { field: Field, value: String },
    /// Case-insensitive substring match.
    Contains { field: Field, value: String },
}

impl Condition {
    pub fn field(&self) -> Field {
        match self {
            Self::Eq { field, .. } | Self::Contains { field, .. } => *field,
        }
    }
}


/// A query for the record store.
///
/// `groups` is in conjunctive form: every group must hold, and a group holds
/// when any one of its conditions does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub collection: Collection,
    pub groups: Vec<Vec<Condition>>,
    pub order_by: Option<Field>,
    pub limit: Option<usize>,
    /// Inner-join style: only records with at least one related contact.
    pub require_contacts: bool,
}

impl FilterSpec {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            groups: Vec::new(),
            order_by: None,
            limit: None,
            require_contacts: false,
        }
    }

    pub fn equals(mut self, field: Field, value: impl Into<String>) -> Self {
        self.groups.push(vec![Condition::Eq { field, value: value.into() }]);
        self
    }

    pub fn contains(mut self, field: Field, value: impl Into<String>) -> Self {
        self.groups.push(vec![Condition::Contains { field, value: value.into() }]);
        self
    }

    /// One OR group over every (field, value) pair. An empty cross product
    /// adds nothing.
    pub fn any_contains<S: AsRef<str>>(mut self, fields: &[Field], values: &[S]) -> Self {
        let group: Vec<Condition> = values
            .iter()
            .flat_map(|value| {
                fields.iter().map(move |field| Condition::Contains {
                    field: *field,
                    value: value.as_ref().to_string(),
                })
            })
            .collect();

        if !group.is_empty() {
            self.groups.push(group);
        }
        self
    }

    pub fn order_by(mut self, field: Field) -> Self {
        self.order_by = Some(field);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_contacts(mut self) -> Self {
        self.require_contacts = true;
        self
    }

    pub fn with_contacts_if(self, required: bool) -> Self {
        if required { self.with_contacts() } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_groups() {
        let spec = FilterSpec::new(Collection::Establishments)
            .any_contains(&[Field::Level], &["Nivel Primario", "Primaria"])
            .contains(Field::Name, "8")
            .order_by(Field::Name)
            .limit(50)
            .with_contacts();

        assert_eq!(spec.groups.len(), 2);
        assert_eq!(spec.groups[0].len(), 2);
        assert_eq!(spec.groups[1][0].field(), Field::Name);
        assert_eq!(spec.order_by, Some(Field::Name));
        assert_eq!(spec.limit, Some(50));
        assert!(spec.require_contacts);
    }

    #[test]
    fn test_any_contains_cross_product() {
        let spec = FilterSpec::new(Collection::Establishments)
            .any_contains(&[Field::Name, Field::Alias], &["ep", "primaria", "escuela primaria"]);
        assert_eq!(spec.groups.len(), 1);
        assert_eq!(spec.groups[0].len(), 6);
    }

    #[test]
    fn test_any_contains_empty_adds_nothing() {
        let empty: [&str; 0] = [];
        let spec = FilterSpec::new(Collection::Organisms).any_contains(&[Field::Name], &empty);
        assert!(spec.groups.is_empty());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::OrgSubtype.as_ref(), "org_subtype");
        assert_eq!(Collection::Establishments.to_string(), "establishments");
        assert_eq!("predio".parse::<Field>().unwrap(), Field::Predio);
    }
}
