use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Hatchback,
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Luxury,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Hatchback,
        Category::Sedan,
        Category::Suv,
        Category::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hatchback => "Hatchback",
            Category::Sedan => "Sedan",
            Category::Suv => "SUV",
            Category::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown car category: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    #[serde(rename = "CNG")]
    Cng,
    Electric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

/// A rentable car. Reference data, never mutated by a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub price_per_hour: i64,
    pub price_per_day: i64,
    pub image: String,
    pub features: Vec<String>,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub seats: u8,
    pub available: bool,
    pub city: String,
    pub rating: f64,
    pub trips: u32,
}

impl Car {
    /// "Brand Name", as shown on cards and receipts.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_case_insensitively() {
        assert_eq!("suv".parse::<Category>(), Ok(Category::Suv));
        assert_eq!("Luxury".parse::<Category>(), Ok(Category::Luxury));
        assert!("Convertible".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(serde_json::to_string(&Category::Suv).unwrap(), "\"SUV\"");
        assert_eq!(serde_json::to_string(&FuelType::Cng).unwrap(), "\"CNG\"");
        assert_eq!(
            serde_json::from_str::<Category>("\"Hatchback\"").unwrap(),
            Category::Hatchback
        );
    }
}
