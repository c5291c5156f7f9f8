//! Vehicle domain models
//!
//! `Vehicle` is a plain record (brand, model year, color, wheel count).
//! `Conveyance` is the closed set of vehicle shapes that share the
//! start/stop interface.

use serde::Serialize;

/// Paint color of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    White,
    Yellow,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::White => "white",
            Color::Yellow => "yellow",
        }
    }
}

/// A vehicle record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub brand: String,
    pub model_year: u16,
    pub color: Color,
    pub wheels: u8,
}

impl Vehicle {
    pub fn new(brand: impl Into<String>, model_year: u16, color: Color, wheels: u8) -> Self {
        Self {
            brand: brand.into(),
            model_year,
            color,
            wheels,
        }
    }

    pub fn start(&self) -> &'static str {
        "Started the car"
    }

    pub fn stop(&self) -> &'static str {
        "Stopped the car"
    }

    /// The three sample vehicles: a car, a bus and an auto-rickshaw
    pub fn fleet() -> Vec<Vehicle> {
        vec![
            Vehicle::new("Tata Nexon", 2023, Color::Blue, 4),
            Vehicle::new("Volva", 2023, Color::White, 6),
            Vehicle::new("Mahendra", 2023, Color::Yellow, 3),
        ]
    }
}

/// Vehicle shapes dispatched through a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conveyance {
    Car,
    Bicycle,
}

impl Conveyance {
    pub fn wheels(&self) -> u8 {
        match self {
            Conveyance::Car => 4,
            Conveyance::Bicycle => 2,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Conveyance::Car => "car",
            Conveyance::Bicycle => "bicycle",
        }
    }

    pub fn start(&self) -> String {
        format!("Starting the {}", self.noun())
    }

    pub fn stop(&self) -> String {
        format!("Stopping the {}", self.noun())
    }

    /// Wheel count followed by a start/stop cycle
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("This vehicle has {} wheels", self.wheels()),
            self.start(),
            self.stop(),
        ]
    }
}
