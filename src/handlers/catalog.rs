use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, BookingError};
use crate::models::booking::form_datetime;
use crate::models::{Car, City, PaymentBreakdown};
use crate::rental::catalog::{filter_cars, filter_cities, CatalogQuery, CategoryFilter, SortKey};
use crate::rental::pricing::{breakdown, Quote};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub q: Option<String>,
}

/// List cities, optionally narrowed by name or state
pub async fn list_cities(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Json<Vec<City>> {
    let term = params.q.unwrap_or_default();
    let cities = filter_cities(&state.cities, &term)
        .into_iter()
        .cloned()
        .collect();

    Json(cities)
}

#[derive(Debug, Deserialize)]
pub struct CarQuery {
    pub city: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl CarQuery {
    fn into_catalog_query(self) -> AppResult<CatalogQuery> {
        let city = self
            .city
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("city is required".to_string()))?;

        let category = match self.category.as_deref() {
            Some(raw) => raw.parse::<CategoryFilter>().map_err(AppError::BadRequest)?,
            None => CategoryFilter::All,
        };
        let sort = match self.sort.as_deref() {
            Some(raw) => raw.parse::<SortKey>().map_err(AppError::BadRequest)?,
            None => SortKey::default(),
        };

        Ok(CatalogQuery {
            city,
            search: self.q.unwrap_or_default(),
            category,
            sort,
        })
    }
}

/// Available cars in a city, filtered and sorted
pub async fn list_cars(
    State(state): State<AppState>,
    Query(params): Query<CarQuery>,
) -> AppResult<Json<Vec<Car>>> {
    let query = params.into_catalog_query()?;
    Ok(Json(filter_cars(&state.cars, &query)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub car_id: String,
    #[serde(default, deserialize_with = "form_datetime::option::deserialize")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "form_datetime::option::deserialize")]
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub car_id: String,
    pub total_hours: u32,
    pub base_amount: i64,
    pub breakdown: PaymentBreakdown,
}

/// Price a rental window for a car
pub async fn quote(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    let car = state
        .cars
        .iter()
        .find(|c| c.id == payload.car_id)
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    let quote = Quote::new(payload.start_date, payload.end_date, car.price_per_hour);
    if !quote.is_valid() {
        return Err(BookingError::InvalidDuration.into());
    }

    Ok(Json(QuoteResponse {
        car_id: car.id.clone(),
        total_hours: quote.total_hours,
        base_amount: quote.base_amount,
        breakdown: breakdown(quote.base_amount),
    }))
}
