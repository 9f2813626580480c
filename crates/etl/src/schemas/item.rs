//! Item schema.
//!
//! Items embed their variants and composite components. Only the ids of
//! those survive into the stored row.

use chrono::{DateTime, Utc};
use loyverse_core::{CategoryId, ItemId, ModifierId, SupplierId, TaxId, VariantId};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de, join_ids};

/// Variant embedded in an item. Only the id is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemVariantRef {
    pub variant_id: VariantId,
}

/// Component of a composite item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Component {
    pub variant_id: VariantId,
    #[serde(default)]
    pub quantity: f64,
}

/// Item as returned by `GET /items`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: ItemId,
    pub handle: String,
    #[serde(default)]
    pub reference_id: Option<String>,
    pub item_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub track_stock: bool,
    pub sold_by_weight: bool,
    pub is_composite: bool,
    pub use_production: bool,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub primary_supplier_id: Option<SupplierId>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub tax_ids: Vec<TaxId>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub modifier_ids: Vec<ModifierId>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub option1_name: Option<String>,
    #[serde(default)]
    pub option2_name: Option<String>,
    #[serde(default)]
    pub option3_name: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub components: Vec<Component>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub variants: Vec<ItemVariantRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Stored item row with id lists comma-joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub handle: String,
    pub reference_id: Option<String>,
    pub item_name: String,
    pub description: Option<String>,
    pub track_stock: bool,
    pub sold_by_weight: bool,
    pub is_composite: bool,
    pub use_production: bool,
    pub category_id: Option<CategoryId>,
    pub primary_supplier_id: Option<SupplierId>,
    pub tax_ids: Option<String>,
    pub modifier_ids: Option<String>,
    pub form: Option<String>,
    pub color: Option<String>,
    pub image_url: Option<String>,
    pub option1_name: Option<String>,
    pub option2_name: Option<String>,
    pub option3_name: Option<String>,
    /// Variant ids of the components of a composite item.
    pub components: Option<String>,
    pub variants: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Schema for RawItem {
    type Record = Item;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Item, ValidationError> {
        let components: Vec<VariantId> = self.components.iter().map(|c| c.variant_id).collect();
        let variants: Vec<VariantId> = self.variants.iter().map(|v| v.variant_id).collect();

        Ok(Item {
            id: self.id,
            handle: self.handle,
            reference_id: self.reference_id,
            item_name: self.item_name,
            description: self.description,
            track_stock: self.track_stock,
            sold_by_weight: self.sold_by_weight,
            is_composite: self.is_composite,
            use_production: self.use_production,
            category_id: self.category_id,
            primary_supplier_id: self.primary_supplier_id,
            tax_ids: join_ids(&self.tax_ids),
            modifier_ids: join_ids(&self.modifier_ids),
            form: self.form,
            color: self.color,
            image_url: self.image_url,
            option1_name: self.option1_name,
            option2_name: self.option2_name,
            option3_name: self.option3_name,
            components: join_ids(&components),
            variants: join_ids(&variants),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
