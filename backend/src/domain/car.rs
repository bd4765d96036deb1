//! Car records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resource::{RecordId, Resource, required_text};
use super::Error;

/// Message reported when a car is missing its make or model.
pub const CAR_MAKE_MODEL_REQUIRED: &str = "Make and model are required";

/// A persisted car.
///
/// ## Invariants
/// - `make` and `model` are never blank.
/// - `created_at` is fixed at insertion; `updated_at` starts equal to it and
///   is re-stamped by every update that writes at least one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Car {
    #[schema(example = 1)]
    pub id: RecordId,
    #[schema(example = "Toyota")]
    pub make: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 2018)]
    pub year: Option<i32>,
    #[schema(example = "White")]
    pub color: Option<String>,
    #[schema(example = 12000.0)]
    pub price: Option<f64>,
    #[schema(example = 65000)]
    pub mileage: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a car. Unset optional fields are stored as
/// `NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub mileage: Option<i64>,
}

impl NewCar {
    /// Draft with only the required fields set.
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the model year.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the colour.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the asking price.
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the odometer reading.
    pub fn mileage(mut self, mileage: i64) -> Self {
        self.mileage = Some(mileage);
        self
    }
}

/// Partial update for a car.
///
/// Outer `None` leaves a column untouched; for nullable columns `Some(None)`
/// writes `NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarChanges {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<Option<i32>>,
    pub color: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub mileage: Option<Option<i64>>,
}

impl CarChanges {
    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.color.is_none()
            && self.price.is_none()
            && self.mileage.is_none()
    }
}

fn non_blank(value: Option<String>, field: &str) -> Result<Option<String>, Error> {
    match value {
        Some(raw) => required_text(&raw)
            .map(Some)
            .ok_or_else(|| Error::invalid_request(format!("{field} must not be empty"))),
        None => Ok(None),
    }
}

impl Resource for Car {
    type Draft = NewCar;
    type Changes = CarChanges;

    const LABEL: &'static str = "Car";

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate_draft(draft: NewCar) -> Result<NewCar, Error> {
        match (required_text(&draft.make), required_text(&draft.model)) {
            (Some(make), Some(model)) => Ok(NewCar {
                make,
                model,
                ..draft
            }),
            _ => Err(Error::invalid_request(CAR_MAKE_MODEL_REQUIRED)),
        }
    }

    fn validate_changes(changes: CarChanges) -> Result<CarChanges, Error> {
        let make = non_blank(changes.make, "Make")?;
        let model = non_blank(changes.model, "Model")?;
        Ok(CarChanges {
            make,
            model,
            ..changes
        })
    }

    fn samples() -> Vec<NewCar> {
        vec![
            NewCar::new("Toyota", "Corolla")
                .year(2018)
                .color("White")
                .price(12000.0)
                .mileage(65000),
            NewCar::new("Honda", "Civic")
                .year(2020)
                .color("Black")
                .price(18000.0)
                .mileage(30000),
            NewCar::new("Ford", "Focus")
                .year(2017)
                .color("Blue")
                .price(10000.0)
                .mileage(80000),
            NewCar::new("Tesla", "Model 3")
                .year(2022)
                .color("Red")
                .price(35000.0)
                .mileage(15000),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "Corolla")]
    #[case("Toyota", "")]
    #[case("  ", "  ")]
    fn draft_requires_make_and_model(#[case] make: &str, #[case] model: &str) {
        let error = Car::validate_draft(NewCar::new(make, model)).expect_err("invalid draft");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), CAR_MAKE_MODEL_REQUIRED);
    }

    #[rstest]
    fn draft_keeps_optional_fields() {
        let draft = Car::validate_draft(NewCar::new(" Toyota ", "Corolla").year(2018))
            .expect("valid draft");
        assert_eq!(draft.make, "Toyota");
        assert_eq!(draft.year, Some(2018));
        assert!(draft.price.is_none());
    }

    #[rstest]
    fn changes_reject_blank_model() {
        let changes = CarChanges {
            model: Some(String::new()),
            ..CarChanges::default()
        };
        let error = Car::validate_changes(changes).expect_err("blank model");
        assert_eq!(error.message(), "Model must not be empty");
    }

    #[rstest]
    fn nulling_an_optional_column_is_a_change() {
        let changes = CarChanges {
            price: Some(None),
            ..CarChanges::default()
        };
        assert!(!changes.is_empty());
        assert!(CarChanges::default().is_empty());
    }

    #[rstest]
    fn four_sample_cars() {
        let samples = Car::samples();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].make, "Toyota");
        assert_eq!(samples[3].model, "Model 3");
    }
}
