//! Core catalog record types.
//!
//! A [`ProductRecord`] is the canonical validated form of one catalog row. It can
//! only be built through [`ProductRecord::new`], which enforces every field
//! invariant, so a value of this type is always internally consistent. Once a
//! record is accepted by the store it becomes a [`CatalogEntry`] with a
//! store-assigned surrogate id; `sku` stays the unique business key.

use serde::Serialize;
use thiserror::Error;

/// An invariant violated while constructing a [`ProductRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    /// `sku` is empty.
    #[error("sku must be a non-empty string")]
    EmptySku,
    /// `name` is empty.
    #[error("name must be a non-empty string")]
    EmptyName,
    /// `brand` is empty.
    #[error("brand must be a non-empty string")]
    EmptyBrand,
    /// `mrp` is negative.
    #[error("mrp must be non-negative")]
    NegativeMrp,
    /// `price` is negative.
    #[error("price must be non-negative")]
    NegativePrice,
    /// `price` is greater than `mrp`.
    #[error("price cannot be higher than MRP")]
    PriceAboveMrp,
    /// `quantity` is negative.
    #[error("quantity cannot be negative")]
    NegativeQuantity,
}

/// A validated, immutable product record.
///
/// Invariants (enforced by [`ProductRecord::new`]):
///
/// - `sku`, `name`, `brand` are non-empty
/// - `mrp >= 0`, `price >= 0`, `price <= mrp`
/// - `quantity >= 0`
/// - `color`/`size` are `None` rather than empty strings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    sku: String,
    name: String,
    brand: String,
    color: Option<String>,
    size: Option<String>,
    mrp: f64,
    price: f64,
    quantity: i64,
}

impl ProductRecord {
    /// Build a record, checking every invariant.
    ///
    /// The row validation pipeline already rejects rows that would violate these
    /// rules before calling this constructor; the checks here are the final guard
    /// that makes the invariants unconditional for every `ProductRecord` value,
    /// however it was produced.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        color: Option<String>,
        size: Option<String>,
        mrp: f64,
        price: f64,
        quantity: i64,
    ) -> Result<Self, RecordError> {
        let sku = sku.into();
        let name = name.into();
        let brand = brand.into();

        if sku.is_empty() {
            return Err(RecordError::EmptySku);
        }
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if brand.is_empty() {
            return Err(RecordError::EmptyBrand);
        }
        if mrp < 0.0 {
            return Err(RecordError::NegativeMrp);
        }
        if price < 0.0 {
            return Err(RecordError::NegativePrice);
        }
        if price > mrp {
            return Err(RecordError::PriceAboveMrp);
        }
        if quantity < 0 {
            return Err(RecordError::NegativeQuantity);
        }

        Ok(Self {
            sku,
            name,
            brand,
            color: color.filter(|c| !c.is_empty()),
            size: size.filter(|s| !s.is_empty()),
            mrp,
            price,
            quantity,
        })
    }

    /// Stock keeping unit; the unique business key.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Product display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Brand name.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Optional color attribute.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Optional size attribute.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Maximum retail price.
    pub fn mrp(&self) -> f64 {
        self.mrp
    }

    /// Selling price. Never exceeds [`Self::mrp`].
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units in stock.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// A persisted catalog entry: a [`ProductRecord`] plus its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Surrogate identifier assigned at insert time.
    pub id: u64,
    /// The stored record.
    #[serde(flatten)]
    pub record: ProductRecord,
}
