//! Person domain model

use serde::Serialize;

/// Role-specific state of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Role {
    Male { facial_hair: bool },
    Female { makeup: bool },
}

/// A named person with a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub name: String,
    pub age: u8,
    pub role: Role,
}

impl Person {
    pub fn male(name: impl Into<String>, age: u8, facial_hair: bool) -> Self {
        Self {
            name: name.into(),
            age,
            role: Role::Male { facial_hair },
        }
    }

    pub fn female(name: impl Into<String>, age: u8, makeup: bool) -> Self {
        Self {
            name: name.into(),
            age,
            role: Role::Female { makeup },
        }
    }

    pub fn say_hello(&self) -> String {
        format!("Hello, my name is {}.", self.name)
    }

    /// Grow a beard if this is a male without one
    ///
    /// Returns the announcement when something changed.
    pub fn grow_beard(&mut self) -> Option<String> {
        match &mut self.role {
            Role::Male { facial_hair } if !*facial_hair => {
                *facial_hair = true;
                Some(format!("{} has grown a beard!", self.name))
            }
            _ => None,
        }
    }

    /// Apply makeup if this is a female without it
    pub fn apply_makeup(&mut self) -> Option<String> {
        match &mut self.role {
            Role::Female { makeup } if !*makeup => {
                *makeup = true;
                Some(format!("{} has applied makeup!", self.name))
            }
            _ => None,
        }
    }
}
