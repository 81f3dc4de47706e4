//! Per-row validation pipeline.
//!
//! [`validate_row`] takes one normalized [`RawRow`] and produces exactly one
//! outcome: a [`crate::record::ProductRecord`] or a [`RowFailure`]. Stages run in
//! order and short-circuit on the first failure:
//!
//! 1. presence of the required columns
//! 2. numeric coercion of `mrp`/`price`/`quantity`
//! 3. business rules (`price <= mrp`, `quantity >= 0`)
//! 4. record construction, which re-checks every invariant

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::record::{ProductRecord, RecordError};

use super::decode::RawRow;

/// Columns that must be present and non-empty in every row.
pub const REQUIRED_FIELDS: [&str; 5] = ["sku", "name", "brand", "mrp", "price"];

/// A business rule violated by an otherwise well-formed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// Selling price is greater than the maximum retail price.
    PriceExceedsMrp,
    /// Stock quantity is below zero.
    NegativeQuantity,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriceExceedsMrp => f.write_str("price cannot be higher than MRP"),
            Self::NegativeQuantity => f.write_str("quantity cannot be negative"),
        }
    }
}

/// Why a row was rejected.
///
/// The `Display` form is the user-facing `errors` string in the ingestion report.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    /// One or more required columns are missing or empty (all listed).
    MissingRequiredFields(Vec<String>),
    /// A numeric column failed to parse.
    NumericConversion {
        /// The offending column.
        column: String,
        /// The underlying parse error message.
        message: String,
    },
    /// A business rule was violated; only the first violation is reported.
    BusinessRule(RuleViolation),
    /// Record construction rejected the row's values.
    SchemaValidation(RecordError),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::NumericConversion { column, message } => {
                write!(f, "numeric conversion error in '{column}': {message}")
            }
            Self::BusinessRule(violation) => write!(f, "business rule violation: {violation}"),
            Self::SchemaValidation(err) => write!(f, "schema validation error: {err}"),
        }
    }
}

impl Serialize for RowRejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A rejected row: where it was, what it contained, and why it was refused.
///
/// Serializes as `{ "row": n, "row_data": { .. }, "errors": "..." }`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based input line number (header is line 1).
    pub row: usize,
    /// The normalized row payload as it entered validation.
    pub row_data: BTreeMap<String, String>,
    /// The rejection reason.
    pub reason: RowRejection,
}

impl RowFailure {
    fn new(row: &RawRow, reason: RowRejection) -> Self {
        Self {
            row: row.line,
            row_data: row.fields.clone(),
            reason,
        }
    }
}

impl Serialize for RowFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RowFailure", 3)?;
        s.serialize_field("row", &self.row)?;
        s.serialize_field("row_data", &self.row_data)?;
        s.serialize_field("errors", &self.reason)?;
        s.end()
    }
}

/// Validate one row into a [`ProductRecord`] or a [`RowFailure`].
///
/// Every input row yields exactly one outcome, and a failure here never affects
/// the processing of other rows.
pub fn validate_row(row: &RawRow) -> Result<ProductRecord, RowFailure> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| row.get(field).is_none_or(str::is_empty))
        .map(|field| (*field).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(RowFailure::new(
            row,
            RowRejection::MissingRequiredFields(missing),
        ));
    }

    // Required fields are known non-empty past this point.
    let mrp = parse_f64(row, "mrp")?;
    let price = parse_f64(row, "price")?;
    let quantity = match row.get("quantity") {
        None | Some("") => 0,
        Some(raw) => raw.parse::<i64>().map_err(|e| {
            RowFailure::new(
                row,
                RowRejection::NumericConversion {
                    column: "quantity".to_owned(),
                    message: e.to_string(),
                },
            )
        })?,
    };

    if price > mrp {
        return Err(RowFailure::new(
            row,
            RowRejection::BusinessRule(RuleViolation::PriceExceedsMrp),
        ));
    }
    if quantity < 0 {
        return Err(RowFailure::new(
            row,
            RowRejection::BusinessRule(RuleViolation::NegativeQuantity),
        ));
    }

    let color = row.get("color").filter(|c| !c.is_empty()).map(str::to_owned);
    let size = row.get("size").filter(|s| !s.is_empty()).map(str::to_owned);

    ProductRecord::new(
        row.get("sku").unwrap_or(""),
        row.get("name").unwrap_or(""),
        row.get("brand").unwrap_or(""),
        color,
        size,
        mrp,
        price,
        quantity,
    )
    .map_err(|e| RowFailure::new(row, RowRejection::SchemaValidation(e)))
}

fn parse_f64(row: &RawRow, column: &str) -> Result<f64, RowFailure> {
    row.get(column)
        .unwrap_or("")
        .parse::<f64>()
        .map_err(|e| {
            RowFailure::new(
                row,
                RowRejection::NumericConversion {
                    column: column.to_owned(),
                    message: e.to_string(),
                },
            )
        })
}
