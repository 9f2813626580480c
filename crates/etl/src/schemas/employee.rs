//! Employee schema.

use chrono::{DateTime, Utc};
use loyverse_core::{Email, EmployeeId};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de, join_all};

/// Employee as returned by `GET /employees`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEmployee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default, deserialize_with = "de::optional_email")]
    pub email: Option<Email>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Store ids kept as sent; not every account uses UUID store ids.
    pub stores: Vec<String>,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Stored employee row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: Option<Email>,
    pub phone_number: Option<String>,
    /// Every assigned store id, comma-joined (empty when unassigned).
    pub stores: String,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Schema for RawEmployee {
    type Record = Employee;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Employee, ValidationError> {
        Ok(Employee {
            id: self.id,
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            stores: join_all(&self.stores),
            is_owner: self.is_owner,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schemas::validate;
    use crate::testing::fixtures::{self, STORE_1, STORE_2};

    #[test]
    fn test_stores_are_joined() {
        let employee = validate::<RawEmployee>(fixtures::employee(), &fixtures::ctx()).unwrap();
        assert_eq!(employee.stores, format!("{STORE_1},{STORE_2}"));
        assert_eq!(employee.email.unwrap().as_str(), "maria@example.com");
    }

    #[test]
    fn test_single_store_is_not_joined() {
        let mut raw = fixtures::employee();
        raw["stores"] = json!([STORE_1]);
        let employee = validate::<RawEmployee>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(employee.stores, STORE_1);
    }

    #[test]
    fn test_no_stores_gives_empty_string() {
        let mut raw = fixtures::employee();
        raw["stores"] = json!([]);
        let employee = validate::<RawEmployee>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(employee.stores, "");
    }

    #[test]
    fn test_blank_email_is_none() {
        let mut raw = fixtures::employee();
        raw["email"] = json!("  ");
        let employee = validate::<RawEmployee>(raw, &fixtures::ctx()).unwrap();
        assert!(employee.email.is_none());
    }

    #[test]
    fn test_malformed_email_rejects_record() {
        let mut raw = fixtures::employee();
        raw["email"] = json!("maria-at-example");
        assert!(matches!(
            validate::<RawEmployee>(raw, &fixtures::ctx()),
            Err(ValidationError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_id_rejects_record() {
        let mut raw = fixtures::employee();
        raw.as_object_mut().unwrap().remove("id");
        assert!(validate::<RawEmployee>(raw, &fixtures::ctx()).is_err());
    }

    #[test]
    fn test_non_uuid_stores_are_joined() {
        let mut raw = fixtures::employee();
        raw["stores"] = json!(["s1", "s2"]);
        let employee = validate::<RawEmployee>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(employee.stores, "s1,s2");
    }

    #[test]
    fn test_non_string_store_rejects_record() {
        let mut raw = fixtures::employee();
        raw["stores"] = json!([1, 2]);
        assert!(matches!(
            validate::<RawEmployee>(raw, &fixtures::ctx()),
            Err(ValidationError::Decode(_))
        ));
    }
}
