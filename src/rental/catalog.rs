use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Car, Category, City};

/// Category restriction applied to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Price: low to high.
    #[default]
    PriceLow,
    /// Price: high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Most trips first.
    Trips,
}

impl SortKey {
    fn compare(&self, a: &Car, b: &Car) -> Ordering {
        match self {
            SortKey::PriceLow => a.price_per_hour.cmp(&b.price_per_hour),
            SortKey::PriceHigh => b.price_per_hour.cmp(&a.price_per_hour),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Trips => b.trips.cmp(&a.trips),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_low" => Ok(SortKey::PriceLow),
            "price_high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "trips" => Ok(SortKey::Trips),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

/// Everything the catalog view filters and orders on.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub city: String,
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }

    fn matches(&self, car: &Car, needle: &str) -> bool {
        let matches_search = car.name.to_lowercase().contains(needle)
            || car.brand.to_lowercase().contains(needle);

        matches_search
            && self.category.matches(car.category)
            && car.city == self.city
            && car.available
    }
}

/// Available cars in the query's city matching its search and category,
/// ordered by its sort key. Ties keep their input order.
pub fn filter_cars(cars: &[Car], query: &CatalogQuery) -> Vec<Car> {
    let needle = query.search.to_lowercase();

    let mut filtered: Vec<Car> = cars
        .iter()
        .filter(|car| query.matches(car, &needle))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| query.sort.compare(a, b));
    filtered
}

/// Cities whose name or state contains `term`, case-insensitively.
pub fn filter_cities<'a>(cities: &'a [City], term: &str) -> Vec<&'a City> {
    let needle = term.to_lowercase();

    cities
        .iter()
        .filter(|city| {
            city.name.to_lowercase().contains(&needle)
                || city.state.to_lowercase().contains(&needle)
        })
        .collect()
}
