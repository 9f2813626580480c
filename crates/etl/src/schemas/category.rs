//! Category schema.

use chrono::{DateTime, Utc};
use loyverse_core::CategoryId;
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError};

/// Item category from `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Schema for Category {
    type Record = Self;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Self, ValidationError> {
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schemas::validate;
    use crate::testing::fixtures;

    #[test]
    fn test_category() {
        let raw = json!({
            "id": "7b6a5f4e-3d2c-4b1a-9f0e-8d7c6b5a4f3e",
            "name": "Drinks",
            "color": "BLUE",
            "created_at": "2025-01-16T08:30:00.000Z",
            "deleted_at": null
        });
        let category = validate::<Category>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(category.name, "Drinks");
        assert!(category.deleted_at.is_none());
    }

    #[test]
    fn test_color_required() {
        let raw = json!({
            "id": "7b6a5f4e-3d2c-4b1a-9f0e-8d7c6b5a4f3e",
            "name": "Drinks",
            "created_at": "2025-01-16T08:30:00.000Z"
        });
        assert!(validate::<Category>(raw, &fixtures::ctx()).is_err());
    }
}
