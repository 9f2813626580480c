//! POS device schema.

use chrono::{DateTime, Utc};
use loyverse_core::{PosDeviceId, StoreId};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError};

/// Register from `GET /pos_devices`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PosDevice {
    pub id: PosDeviceId,
    pub name: String,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    pub activated: bool,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Schema for PosDevice {
    type Record = Self;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Self, ValidationError> {
        Ok(self)
    }
}
