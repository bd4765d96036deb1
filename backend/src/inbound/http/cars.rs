//! Cars API handlers.
//!
//! ```text
//! GET    /api/cars
//! GET    /api/cars/{id}
//! POST   /api/cars        {"make":"Toyota","model":"Corolla","year":2018}
//! PUT    /api/cars/{id}   {"price":11500}
//! DELETE /api/cars/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CAR_MAKE_MODEL_REQUIRED, Car, CarChanges, Error, NewCar, Resource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{deserialize_some, parse_record_id, required_change};

/// Request body for `POST /api/cars`.
///
/// `make` and `model` are required; the rest may be omitted or `null`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateCarRequest {
    #[schema(example = "Toyota")]
    pub make: Option<String>,
    #[schema(example = "Corolla")]
    pub model: Option<String>,
    #[schema(example = 2018)]
    pub year: Option<i32>,
    #[schema(example = "White")]
    pub color: Option<String>,
    #[schema(example = 12000.0)]
    pub price: Option<f64>,
    #[schema(example = 65000)]
    pub mileage: Option<i64>,
}

impl From<CreateCarRequest> for NewCar {
    fn from(value: CreateCarRequest) -> Self {
        Self {
            make: value.make.unwrap_or_default(),
            model: value.model.unwrap_or_default(),
            year: value.year,
            color: value.color,
            price: value.price,
            mileage: value.mileage,
        }
    }
}

/// Request body for `PUT /api/cars/{id}`.
///
/// Omitted fields are left unchanged; `null` clears an optional field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCarRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub make: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i32>)]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub mileage: Option<Option<i64>>,
}

impl From<UpdateCarRequest> for CarChanges {
    fn from(value: UpdateCarRequest) -> Self {
        Self {
            make: required_change(value.make),
            model: required_change(value.model),
            year: value.year,
            color: value.color,
            price: value.price,
            mileage: value.mileage,
        }
    }
}

/// List every car ordered by id.
#[utoipa::path(
    get,
    path = "/api/cars",
    responses(
        (status = 200, description = "Cars", body = [Car]),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "listCars",
    security(("api_key" = []))
)]
#[get("")]
pub async fn list_cars(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Car>>> {
    state.cars.get_all().await.map(web::Json)
}

/// Fetch one car.
#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    params(("id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Car", body = Car),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 404, description = "Car not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "getCar",
    security(("api_key" = []))
)]
#[get("/{id}")]
pub async fn get_car(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Car>> {
    let id = parse_record_id::<Car>(&path)?;
    state
        .cars
        .get_by_id(id)
        .await?
        .map(web::Json)
        .ok_or_else(Car::not_found)
}

/// Create a car.
#[utoipa::path(
    post,
    path = "/api/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Created car", body = Car),
        (status = 400, description = "Make or model missing, or body malformed", body = Error),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "createCar",
    security(("api_key" = []))
)]
#[post("")]
pub async fn create_car(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCarRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    if payload.make.is_none() || payload.model.is_none() {
        return Err(Error::invalid_request(CAR_MAKE_MODEL_REQUIRED));
    }
    let car = state.cars.create(payload.into()).await?;
    Ok(HttpResponse::Created().json(car))
}

/// Apply a partial update to a car, refreshing `updated_at`.
#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    params(("id" = i64, Path, description = "Car identifier")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Updated car", body = Car),
        (status = 400, description = "Blank make or model, or body malformed", body = Error),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 404, description = "Car not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "updateCar",
    security(("api_key" = []))
)]
#[put("/{id}")]
pub async fn update_car(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCarRequest>,
) -> ApiResult<web::Json<Car>> {
    let id = parse_record_id::<Car>(&path)?;
    state
        .cars
        .update(id, payload.into_inner().into())
        .await?
        .map(web::Json)
        .ok_or_else(Car::not_found)
}

/// Delete a car.
#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    params(("id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 404, description = "Car not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "deleteCar",
    security(("api_key" = []))
)]
#[delete("/{id}")]
pub async fn delete_car(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id::<Car>(&path)?;
    if state.cars.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Car::not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use async_trait::async_trait;
    use mockall::mock;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::RecordId;
    use crate::domain::ports::ResourceUseCases;
    use crate::inbound::http::test_utils::{sqlite_state, test_app};

    mock! {
        CarUseCases {}

        #[async_trait]
        impl ResourceUseCases<Car> for CarUseCases {
            async fn get_all(&self) -> Result<Vec<Car>, Error>;
            async fn get_by_id(&self, id: RecordId) -> Result<Option<Car>, Error>;
            async fn create(&self, draft: NewCar) -> Result<Car, Error>;
            async fn update(&self, id: RecordId, changes: CarChanges) -> Result<Option<Car>, Error>;
            async fn delete(&self, id: RecordId) -> Result<bool, Error>;
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn corolla_lifecycle() {
        let app = actix_test::init_service(test_app(sqlite_state(false).await)).await;

        let create = actix_test::TestRequest::post()
            .uri("/api/cars")
            .set_json(json!({"make": "Toyota", "model": "Corolla", "year": 2018}))
            .to_request();
        let response = actix_test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(response).await;
        assert_eq!(created["make"], "Toyota");
        assert_eq!(created["year"], 2018);
        assert!(created["color"].is_null());
        assert!(created["price"].is_null());
        assert!(created["mileage"].is_null());
        assert_eq!(created["created_at"], created["updated_at"]);
        let id = created["id"].as_i64().expect("numeric id");

        let fetch = actix_test::TestRequest::get()
            .uri(&format!("/api/cars/{id}"))
            .to_request();
        let fetched: Value = actix_test::call_and_read_body_json(&app, fetch).await;
        assert_eq!(fetched, created);

        let update = actix_test::TestRequest::put()
            .uri(&format!("/api/cars/{id}"))
            .set_json(json!({"price": 9500}))
            .to_request();
        let response = actix_test::call_service(&app, update).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Car = actix_test::read_body_json(response).await;
        let before: Car = serde_json::from_value(created.clone()).expect("car payload");
        assert_eq!(updated.price, Some(9500.0));
        assert!(updated.updated_at > before.updated_at);
        assert_eq!(
            Car {
                price: before.price,
                updated_at: before.updated_at,
                ..updated.clone()
            },
            before
        );

        let delete = actix_test::TestRequest::delete()
            .uri(&format!("/api/cars/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, delete).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(actix_test::read_body(response).await.is_empty());

        let refetch = actix_test::TestRequest::get()
            .uri(&format!("/api/cars/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, refetch).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Car not found");
    }

    #[rstest]
    #[case(json!({"model": "Corolla"}))]
    #[case(json!({"make": "Toyota"}))]
    #[case(json!({"make": "  ", "model": "Corolla"}))]
    #[actix_web::test]
    async fn create_requires_make_and_model(#[case] payload: Value) {
        let app = actix_test::init_service(test_app(sqlite_state(false).await)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/cars")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Make and model are required");
    }

    #[rstest]
    #[case(json!({"model": "Corolla"}))]
    #[case(json!({"make": "Toyota", "model": null}))]
    #[actix_web::test]
    async fn missing_make_or_model_never_reaches_the_service(#[case] payload: Value) {
        let mut cars = MockCarUseCases::new();
        cars.expect_create().never();
        let mut state = sqlite_state(false).await;
        state.cars = Arc::new(cars);
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/cars")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Make and model are required");
    }

    #[rstest]
    #[actix_web::test]
    async fn partial_update_touches_only_supplied_fields() {
        let app = actix_test::init_service(test_app(sqlite_state(true).await)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/cars/1")
            .set_json(json!({"price": 11500, "color": null}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["make"], "Toyota");
        assert_eq!(body["mileage"], 65000);
        assert_eq!(body["price"], 11500.0);
        assert!(body["color"].is_null());
    }

    #[rstest]
    #[case(json!({"make": null}))]
    #[case(json!({"model": ""}))]
    #[actix_web::test]
    async fn update_rejects_blank_required_fields(#[case] payload: Value) {
        let app = actix_test::init_service(test_app(sqlite_state(true).await)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/cars/2")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_of_missing_car_is_not_found() {
        let app = actix_test::init_service(test_app(sqlite_state(true).await)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/cars/999")
            .set_json(json!({"price": 1}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_body_is_a_bad_request() {
        let app = actix_test::init_service(test_app(sqlite_state(false).await)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/cars")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[actix_web::test]
    async fn seeded_cars_are_listed_in_id_order() {
        let app = actix_test::init_service(test_app(sqlite_state(true).await)).await;

        let request = actix_test::TestRequest::get().uri("/api/cars").to_request();
        let cars: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;

        let models: Vec<&str> = cars
            .iter()
            .filter_map(|car| car["model"].as_str())
            .collect();
        assert_eq!(models, ["Corolla", "Civic", "Focus", "Model 3"]);
    }
}
