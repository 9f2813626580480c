//! Resource marker types, one per Loyverse collection.
//!
//! Markers are uninhabited enums: they exist only at the type level so that
//! an `Endpoint<Customers>` and an `Endpoint<Receipts>` are different types
//! and resource-specific filters can be attached to exactly one of them.

/// A Loyverse resource collection.
pub trait Resource: Send + Sync + 'static {
    /// Path segment under the base URL, also the response field holding the
    /// items of a collection page.
    const NAME: &'static str;

    /// Field of a record that identifies it; overwritten by `update`.
    const ID_FIELD: &'static str = "id";

    /// Query parameter that filters the collection by a list of ids.
    const IDS_PARAM: &'static str;
}

macro_rules! define_resource {
    ($(#[$meta:meta])* $marker:ident, $name:literal, ids = $ids:literal $(, id = $id:literal)?) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $marker {}

        impl Resource for $marker {
            const NAME: &'static str = $name;
            $(const ID_FIELD: &'static str = $id;)?
            const IDS_PARAM: &'static str = $ids;
        }
    };
}

define_resource!(
    /// Item categories.
    Categories, "categories", ids = "category_ids"
);
define_resource!(
    /// Loyalty customers.
    Customers, "customers", ids = "customer_ids"
);
define_resource!(
    /// Discounts configured in the back office.
    Discounts, "discounts", ids = "discount_ids"
);
define_resource!(
    /// Staff members.
    Employees, "employees", ids = "employee_ids"
);
define_resource!(
    /// Stock levels per variant and store.
    Inventory, "inventory", ids = "variant_ids", id = "variant_id"
);
define_resource!(
    /// Catalogue items.
    Items, "items", ids = "items_ids"
);
define_resource!(
    /// Item modifiers.
    Modifiers, "modifiers", ids = "modifier_ids"
);
define_resource!(
    /// Payment types accepted at the register.
    PaymentTypes, "payment_types", ids = "payment_type_ids"
);
define_resource!(
    /// Registered POS devices.
    PosDevices, "pos_devices", ids = "pos_device_ids"
);
define_resource!(
    /// Sales and refund receipts.
    Receipts, "receipts", ids = "receipt_numbers", id = "receipt_number"
);
define_resource!(
    /// Cash register shifts.
    Shifts, "shifts", ids = "shift_ids"
);
define_resource!(
    /// Store locations.
    Stores, "stores", ids = "store_ids"
);
define_resource!(
    /// Suppliers.
    Suppliers, "suppliers", ids = "supplier_ids"
);
define_resource!(
    /// Taxes.
    Taxes, "taxes", ids = "tax_ids"
);
define_resource!(
    /// Webhook subscriptions.
    Webhooks, "webhooks", ids = "webhook_ids"
);
define_resource!(
    /// Item variants.
    Variants, "variants", ids = "variants_ids", id = "variant_id"
);
