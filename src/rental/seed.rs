//! Static reference data for cities and cars.

use crate::models::{Car, Category, City, FuelType, Transmission};

const CITIES: &[(&str, &str, &str, u32)] = &[
    ("1", "Mumbai", "Maharashtra", 245),
    ("2", "Delhi", "Delhi", 189),
    ("3", "Bangalore", "Karnataka", 167),
    ("4", "Pune", "Maharashtra", 134),
    ("5", "Chennai", "Tamil Nadu", 98),
    ("6", "Hyderabad", "Telangana", 87),
    ("7", "Kolkata", "West Bengal", 76),
    ("8", "Goa", "Goa", 65),
    ("9", "Ahmedabad", "Gujarat", 54),
    ("10", "Jaipur", "Rajasthan", 43),
];

pub fn cities() -> Vec<City> {
    CITIES
        .iter()
        .map(|&(id, name, state, cars_count)| City {
            id: id.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            available: true,
            cars_count,
        })
        .collect()
}

struct CarSeed {
    id: &'static str,
    brand: &'static str,
    name: &'static str,
    category: Category,
    price_per_hour: i64,
    fuel_type: FuelType,
    transmission: Transmission,
    seats: u8,
    city: &'static str,
    rating: f64,
    trips: u32,
    available: bool,
    features: &'static [&'static str],
}

const CARS: &[CarSeed] = &[
    CarSeed { id: "1", brand: "Maruti Suzuki", name: "Swift", category: Category::Hatchback, price_per_hour: 120, fuel_type: FuelType::Petrol, transmission: Transmission::Manual, seats: 5, city: "Mumbai", rating: 4.5, trips: 1200, available: true, features: &["AC", "Bluetooth", "Power Steering"] },
    CarSeed { id: "2", brand: "Hyundai", name: "Creta", category: Category::Suv, price_per_hour: 180, fuel_type: FuelType::Diesel, transmission: Transmission::Automatic, seats: 5, city: "Mumbai", rating: 4.6, trips: 890, available: true, features: &["AC", "Sunroof", "Cruise Control", "Reverse Camera"] },
    CarSeed { id: "3", brand: "Honda", name: "City", category: Category::Sedan, price_per_hour: 150, fuel_type: FuelType::Petrol, transmission: Transmission::Automatic, seats: 5, city: "Mumbai", rating: 4.4, trips: 650, available: true, features: &["AC", "Bluetooth", "Keyless Entry"] },
    CarSeed { id: "4", brand: "BMW", name: "3 Series", category: Category::Luxury, price_per_hour: 500, fuel_type: FuelType::Petrol, transmission: Transmission::Automatic, seats: 5, city: "Mumbai", rating: 4.8, trips: 210, available: true, features: &["Leather Seats", "Sunroof", "Premium Audio", "GPS"] },
    CarSeed { id: "5", brand: "Maruti Suzuki", name: "Baleno", category: Category::Hatchback, price_per_hour: 130, fuel_type: FuelType::Petrol, transmission: Transmission::Manual, seats: 5, city: "Mumbai", rating: 4.3, trips: 980, available: true, features: &["AC", "Touchscreen", "Bluetooth"] },
    CarSeed { id: "6", brand: "Mahindra", name: "XUV700", category: Category::Suv, price_per_hour: 220, fuel_type: FuelType::Diesel, transmission: Transmission::Automatic, seats: 7, city: "Mumbai", rating: 4.7, trips: 430, available: false, features: &["AC", "ADAS", "Panoramic Sunroof"] },
    CarSeed { id: "7", brand: "Tata", name: "Nexon EV", category: Category::Suv, price_per_hour: 200, fuel_type: FuelType::Electric, transmission: Transmission::Automatic, seats: 5, city: "Delhi", rating: 4.6, trips: 520, available: true, features: &["AC", "Fast Charging", "Connected Car"] },
    CarSeed { id: "8", brand: "Hyundai", name: "Verna", category: Category::Sedan, price_per_hour: 160, fuel_type: FuelType::Petrol, transmission: Transmission::Automatic, seats: 5, city: "Delhi", rating: 4.5, trips: 700, available: true, features: &["AC", "Ventilated Seats", "Bluetooth"] },
    CarSeed { id: "9", brand: "Maruti Suzuki", name: "Dzire", category: Category::Sedan, price_per_hour: 110, fuel_type: FuelType::Cng, transmission: Transmission::Manual, seats: 5, city: "Delhi", rating: 4.2, trips: 1500, available: true, features: &["AC", "Power Windows"] },
    CarSeed { id: "10", brand: "Mercedes-Benz", name: "C-Class", category: Category::Luxury, price_per_hour: 600, fuel_type: FuelType::Diesel, transmission: Transmission::Automatic, seats: 5, city: "Delhi", rating: 4.9, trips: 150, available: true, features: &["Leather Seats", "Ambient Lighting", "Premium Audio"] },
    CarSeed { id: "11", brand: "Hyundai", name: "i20", category: Category::Hatchback, price_per_hour: 125, fuel_type: FuelType::Petrol, transmission: Transmission::Manual, seats: 5, city: "Bangalore", rating: 4.4, trips: 800, available: true, features: &["AC", "Touchscreen", "Rear Camera"] },
    CarSeed { id: "12", brand: "Toyota", name: "Fortuner", category: Category::Suv, price_per_hour: 300, fuel_type: FuelType::Diesel, transmission: Transmission::Automatic, seats: 7, city: "Bangalore", rating: 4.7, trips: 300, available: true, features: &["AC", "4x4", "Cruise Control"] },
    CarSeed { id: "13", brand: "Tata", name: "Tiago", category: Category::Hatchback, price_per_hour: 100, fuel_type: FuelType::Cng, transmission: Transmission::Manual, seats: 5, city: "Pune", rating: 4.1, trips: 650, available: true, features: &["AC", "Bluetooth"] },
];

pub fn cars() -> Vec<Car> {
    CARS.iter()
        .map(|seed| Car {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            brand: seed.brand.to_string(),
            category: seed.category,
            price_per_hour: seed.price_per_hour,
            // Full-day rate is 20 billed hours
            price_per_day: seed.price_per_hour * 20,
            image: format!("https://images.driveeasy.in/cars/{}.jpg", seed.id),
            features: seed.features.iter().map(|f| f.to_string()).collect(),
            fuel_type: seed.fuel_type,
            transmission: seed.transmission,
            seats: seed.seats,
            available: seed.available,
            city: seed.city.to_string(),
            rating: seed.rating,
            trips: seed.trips,
        })
        .collect()
}

/// Look up a car by id in the seed list.
pub fn find_car(id: &str) -> Option<Car> {
    cars().into_iter().find(|car| car.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_car_city_is_a_known_city() {
        let cities = cities();
        for car in cars() {
            assert!(
                cities.iter().any(|c| c.name == car.city),
                "car {} is in unknown city {}",
                car.id,
                car.city
            );
        }
    }

    #[test]
    fn test_car_ids_are_unique() {
        let cars = cars();
        let mut ids: Vec<&str> = cars.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), cars.len());
    }
}
