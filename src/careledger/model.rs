use crate::codec::keys_match;
use crate::error::{LedgerError, Result};

/// Stand-in for the facility contact fields an inventory item never persists.
pub const PLACEHOLDER: &str = "N/A";

/// A flat record kind that can live in a [`RecordStore`](crate::store::RecordStore).
///
/// The field order returned by [`Record::to_fields`] is the on-disk column
/// order and must match what [`Record::from_fields`] expects.
pub trait Record: Clone + std::fmt::Debug {
    /// Partial update applied by [`Record::apply`].
    type Patch: std::fmt::Debug;

    /// Human label used in messages ("Facility", "Item").
    const KIND: &'static str;

    /// Lowercase plural used in listings ("facilities", "items").
    const PLURAL: &'static str;

    /// Number of persisted fields per row.
    const FIELD_COUNT: usize;

    /// Column headers for display, same order as [`Record::display_row`].
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> &str;

    fn to_fields(&self) -> Vec<String>;

    /// Builds a record from exactly [`Record::FIELD_COUNT`] raw fields.
    fn from_fields(fields: &[&str]) -> Result<Self>;

    fn display_row(&self) -> Vec<String>;

    /// Applies a patch in place. Fields the patch leaves as `None` are kept.
    fn apply(&mut self, patch: Self::Patch);

    /// Key the record will carry after `patch` is applied, if it changes.
    fn patched_key(patch: &Self::Patch) -> Option<&str>;

    fn key_matches(&self, key: &str) -> bool {
        keys_match(self.key(), key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Facility {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FacilityPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl Record for Facility {
    type Patch = FacilityPatch;

    const KIND: &'static str = "Facility";
    const PLURAL: &'static str = "facilities";
    const FIELD_COUNT: usize = 3;
    const COLUMNS: &'static [&'static str] = &["Facility Name", "Address", "Phone"];

    fn key(&self) -> &str {
        &self.name
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.address.clone(), self.phone.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        match fields {
            [name, address, phone] => Ok(Facility::new(*name, *address, *phone)),
            _ => Err(LedgerError::MalformedRecord {
                expected: Self::FIELD_COUNT,
                found: fields.len(),
            }),
        }
    }

    fn display_row(&self) -> Vec<String> {
        self.to_fields()
    }

    fn apply(&mut self, patch: FacilityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }

    fn patched_key(patch: &FacilityPatch) -> Option<&str> {
        patch.name.as_deref()
    }
}

/// A ledger entry. `address` and `phone` describe the stocking facility but
/// are not part of the row format, so they always read back as [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub expiration_date: String,
    pub item_type: String,
    pub address: String,
    pub phone: String,
}

impl InventoryItem {
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        expiration_date: impl Into<String>,
        item_type: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
            expiration_date: expiration_date.into(),
            item_type: item_type.into(),
            address: PLACEHOLDER.to_string(),
            phone: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub expiration_date: Option<String>,
    pub item_type: Option<String>,
}

pub fn parse_quantity(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| LedgerError::InvalidField {
            field: "quantity",
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

impl Record for InventoryItem {
    type Patch = ItemPatch;

    const KIND: &'static str = "Item";
    const PLURAL: &'static str = "items";
    const FIELD_COUNT: usize = 5;
    const COLUMNS: &'static [&'static str] =
        &["ID", "Item Name", "Quantity", "Expiration Date", "Type"];

    fn key(&self) -> &str {
        &self.item_id
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.item_id.clone(),
            self.name.clone(),
            self.quantity.to_string(),
            self.expiration_date.clone(),
            self.item_type.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        match fields {
            [item_id, name, quantity, expiration_date, item_type] => Ok(InventoryItem::new(
                item_id.trim(),
                name.trim(),
                parse_quantity(quantity)?,
                expiration_date.trim(),
                item_type.trim(),
            )),
            _ => Err(LedgerError::MalformedRecord {
                expected: Self::FIELD_COUNT,
                found: fields.len(),
            }),
        }
    }

    fn display_row(&self) -> Vec<String> {
        self.to_fields()
    }

    fn apply(&mut self, patch: ItemPatch) {
        if let Some(item_id) = patch.item_id {
            self.item_id = item_id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(expiration_date) = patch.expiration_date {
            self.expiration_date = expiration_date;
        }
        if let Some(item_type) = patch.item_type {
            self.item_type = item_type;
        }
    }

    fn patched_key(patch: &ItemPatch) -> Option<&str> {
        patch.item_id.as_deref()
    }
}
