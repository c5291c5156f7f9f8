//! Animal domain model

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Generic,
    Dog,
    Cat,
}

impl Animal {
    pub const ALL: [Animal; 3] = [Animal::Generic, Animal::Dog, Animal::Cat];

    pub fn make_sound(&self) -> &'static str {
        match self {
            Animal::Generic => "The animal makes a sound",
            Animal::Dog => "The dog barks",
            Animal::Cat => "The cat meows",
        }
    }
}
