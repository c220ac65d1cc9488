//! Movement form state and local validation.
//!
//! A [`MovementDraft`] is the raw form state as the browser submits it:
//! strings throughout, because that is what form inputs carry. Validation
//! parses it into a typed [`NewMovement`] wire body, or fails with inline
//! errors before any request is dispatched. Drafts also serialize to JSON
//! as-is for the named draft-save feature.

use core::fmt;

use serde::{Deserialize, Serialize};

use bodega_core::{MovementType, ProductId, Quantity, QuantityError, WarehouseId};

use crate::api::{NewMovement, NewMovementDetail};

/// One field-level validation failure, surfaced inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Form field the message belongs to (e.g. `warehouse`, `line 2 quantity`).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All validation failures of one submission.
///
/// Local by definition: produced without any network round trip, never
/// logged upstream, and distinct from backend-reported errors in the type
/// system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl ValidationErrors {
    /// Iterate the individual messages for template rendering.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

/// Unsubmitted movement form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementDraft {
    #[serde(default)]
    pub warehouse_id: String,
    #[serde(default)]
    pub movement_type: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub lines: Vec<DraftLine>,
}

/// One detail line of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLine {
    #[serde(default)]
    pub product_id: String,
    /// Display name echoed back by the autocomplete; not validated.
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub lot: String,
    #[serde(default)]
    pub expiration_date: String,
    #[serde(default)]
    pub notes: String,
}

impl DraftLine {
    /// Whether the user left every input of this line blank.
    ///
    /// The form always renders a trailing empty template row; blank lines are
    /// pruned rather than rejected.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.product_id.trim().is_empty()
            && self.quantity.trim().is_empty()
            && self.lot.trim().is_empty()
            && self.expiration_date.trim().is_empty()
            && self.notes.trim().is_empty()
    }
}

impl MovementDraft {
    /// Validate the draft and build the wire body.
    ///
    /// Entirely local: required relational fields (warehouse, type, product)
    /// must be present and parseable, every quantity must be a positive
    /// number, and at least one non-blank detail line must exist.
    ///
    /// # Errors
    ///
    /// Returns every failure at once so the form can show them all inline.
    pub fn validate(&self) -> Result<NewMovement, ValidationErrors> {
        let mut errors: Vec<ValidationError> = Vec::new();

        let warehouse_id = parse_required::<WarehouseId>(
            &self.warehouse_id,
            "warehouse",
            "a warehouse is required",
            "not a known warehouse",
            &mut errors,
        );

        let movement_type = parse_required::<MovementType>(
            &self.movement_type,
            "type",
            "a movement direction is required",
            "must be IN or OUT",
            &mut errors,
        );

        let lines: Vec<&DraftLine> = self.lines.iter().filter(|l| !l.is_blank()).collect();
        if lines.is_empty() {
            errors.push(ValidationError {
                field: "lines".to_string(),
                message: "at least one detail line is required".to_string(),
            });
        }

        let mut details: Vec<NewMovementDetail> = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let n = index + 1;
            let product_id = parse_required::<ProductId>(
                &line.product_id,
                &format!("line {n} product"),
                "a product is required",
                "not a known product",
                &mut errors,
            );

            let quantity = match Quantity::parse(&line.quantity) {
                Ok(q) => Some(q),
                Err(e) => {
                    let message = match e {
                        QuantityError::NotANumber if line.quantity.trim().is_empty() => {
                            "a quantity is required".to_string()
                        }
                        other => other.to_string(),
                    };
                    errors.push(ValidationError {
                        field: format!("line {n} quantity"),
                        message,
                    });
                    None
                }
            };

            let expiration_date = match trimmed(&line.expiration_date) {
                None => None,
                Some(raw) => match raw.parse::<chrono::NaiveDate>() {
                    Ok(date) => Some(date),
                    Err(_) => {
                        errors.push(ValidationError {
                            field: format!("line {n} expiration date"),
                            message: "must be a date (YYYY-MM-DD)".to_string(),
                        });
                        None
                    }
                },
            };

            if let (Some(product_id), Some(quantity)) = (product_id, quantity) {
                details.push(NewMovementDetail {
                    product_id,
                    quantity,
                    lot: trimmed(&line.lot),
                    expiration_date,
                    notes: trimmed(&line.notes),
                });
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        // Both are Some here; a None would have pushed an error above.
        match (warehouse_id, movement_type) {
            (Some(warehouse_id), Some(movement_type)) => Ok(NewMovement {
                warehouse_id,
                movement_type,
                notes: trimmed(&self.notes),
                details,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

/// Trim a form value, mapping blank to `None` rather than an empty-string
/// sentinel.
fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a required form field, pushing the right message when missing or
/// malformed.
fn parse_required<T: core::str::FromStr>(
    raw: &str,
    field: &str,
    missing: &str,
    invalid: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: missing.to_string(),
        });
        return None;
    }
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(ValidationError {
                field: field.to_string(),
                message: invalid.to_string(),
            });
            None
        }
    }
}
