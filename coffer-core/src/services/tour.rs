//! Tour service - renders the object-model lessons as printable lines

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Error;
use crate::domain::{Account, Animal, Conveyance, Person, Vehicle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Class,
    Object,
    Abstraction,
    Encapsulation,
    Inheritance,
    Polymorphism,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Class,
        Topic::Object,
        Topic::Abstraction,
        Topic::Encapsulation,
        Topic::Inheritance,
        Topic::Polymorphism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Class => "class",
            Topic::Object => "object",
            Topic::Abstraction => "abstraction",
            Topic::Encapsulation => "encapsulation",
            Topic::Inheritance => "inheritance",
            Topic::Polymorphism => "polymorphism",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Topic::Class => "A blueprint bundling properties and methods",
            Topic::Object => "An instance built from a blueprint",
            Topic::Abstraction => "Showing the essential interface, hiding the details",
            Topic::Encapsulation => "State reachable only through its operations",
            Topic::Inheritance => "Shared behavior plus role-specific state",
            Topic::Polymorphism => "One request, different behavior per shape",
        }
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| Error::not_found(format!("tour topic '{}'", s.trim())))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered lesson
#[derive(Debug, Clone, Serialize)]
pub struct TourSection {
    pub topic: Topic,
    pub summary: &'static str,
    pub lines: Vec<String>,
}

/// Renders tour topics
///
/// Balances in the encapsulation lesson are shown with `decimal_places`
/// fractional digits (at least one, so 1000 prints as `1000.0`).
pub struct TourService {
    decimal_places: u32,
}

impl Default for TourService {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TourService {
    pub fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    pub fn render(&self, topic: Topic) -> TourSection {
        let lines = match topic {
            Topic::Class => class_lines(),
            Topic::Object => object_lines(),
            Topic::Abstraction => abstraction_lines(),
            Topic::Encapsulation => self.encapsulation_lines(),
            Topic::Inheritance => inheritance_lines(),
            Topic::Polymorphism => polymorphism_lines(),
        };
        TourSection {
            topic,
            summary: topic.summary(),
            lines,
        }
    }

    pub fn render_all(&self) -> Vec<TourSection> {
        Topic::ALL.into_iter().map(|t| self.render(t)).collect()
    }

    fn encapsulation_lines(&self) -> Vec<String> {
        let mut account = Account::new();
        let mut lines = Vec::new();

        account.deposit(Decimal::new(1000, 0));
        lines.push(format_balance(account.check_balance(), self.decimal_places));

        account.withdraw(Decimal::new(500, 0));
        lines.push(format_balance(account.check_balance(), self.decimal_places));

        account.withdraw(Decimal::new(1000, 0));
        lines.push(format_balance(account.check_balance(), self.decimal_places));

        lines
    }
}

/// Format a balance with at least `min_places` fractional digits
///
/// Extra precision is kept: 0.125 with one place prints as `0.125`.
pub fn format_balance(balance: Decimal, min_places: u32) -> String {
    let mut value = balance.normalize();
    if value.scale() < min_places {
        value.rescale(min_places);
    }
    value.to_string()
}

fn class_lines() -> Vec<String> {
    let vehicle = Vehicle::new("Tata Nexon", 2023, crate::domain::Color::Blue, 4);
    vec![
        format!(
            "Vehicle {{ brand: {}, model: {}, color: {}, wheels: {} }}",
            vehicle.brand,
            vehicle.model_year,
            vehicle.color.as_str(),
            vehicle.wheels
        ),
        vehicle.start().to_string(),
        vehicle.stop().to_string(),
    ]
}

fn object_lines() -> Vec<String> {
    Vehicle::fleet()
        .iter()
        .map(|v| {
            format!(
                "{} ({}, {}, {} wheels)",
                v.brand,
                v.model_year,
                v.color.as_str(),
                v.wheels
            )
        })
        .collect()
}

fn abstraction_lines() -> Vec<String> {
    [Conveyance::Car, Conveyance::Bicycle]
        .iter()
        .flat_map(Conveyance::describe)
        .collect()
}

fn inheritance_lines() -> Vec<String> {
    let mut john = Person::male("John", 30, true);
    let mut jane = Person::female("Jane", 25, false);

    let mut lines = vec![john.say_hello()];
    lines.extend(john.grow_beard());
    lines.push(jane.say_hello());
    lines.extend(jane.apply_makeup());
    lines
}

fn polymorphism_lines() -> Vec<String> {
    // once one by one, then again from a collection
    Animal::ALL
        .iter()
        .chain(Animal::ALL.iter())
        .map(|a| a.make_sound().to_string())
        .collect()
}
