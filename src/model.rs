//! Pet and adoption request records as stored in and served from SQLite.
//!
//! Enumerated columns are TEXT in storage; each enum round-trips through its exact
//! variant name ("Male", "Adopted", ...), which is also its JSON form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not one of: {allowed}")]
pub struct UnknownVariant {
    pub value: String,
    pub allowed: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vaccinated {
    Yes,
    No,
}

/// Pet lifecycle. The only transition is `Available -> Adopted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetStatus {
    Available,
    Adopted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdoptionStatus {
    Pending,
    Approved,
    Rejected,
}

impl Gender {
    pub const ALLOWED: &'static str = "Male, Female";

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            _ => Err(UnknownVariant {
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl Vaccinated {
    pub const ALLOWED: &'static str = "Yes, No";

    pub fn as_str(&self) -> &'static str {
        match self {
            Vaccinated::Yes => "Yes",
            Vaccinated::No => "No",
        }
    }
}

impl FromStr for Vaccinated {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Vaccinated::Yes),
            "No" => Ok(Vaccinated::No),
            _ => Err(UnknownVariant {
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl PetStatus {
    pub const ALLOWED: &'static str = "Available, Adopted";

    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "Available",
            PetStatus::Adopted => "Adopted",
        }
    }
}

impl FromStr for PetStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(PetStatus::Available),
            "Adopted" => Ok(PetStatus::Adopted),
            _ => Err(UnknownVariant {
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl AdoptionStatus {
    pub const ALLOWED: &'static str = "Pending, Approved, Rejected";

    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::Pending => "Pending",
            AdoptionStatus::Approved => "Approved",
            AdoptionStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for AdoptionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AdoptionStatus::Pending),
            "Approved" => Ok(AdoptionStatus::Approved),
            "Rejected" => Ok(AdoptionStatus::Rejected),
            _ => Err(UnknownVariant {
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

// TryFrom<String> backs `#[sqlx(try_from = "String")]` on the row structs below.
impl TryFrom<String> for Gender {
    type Error = UnknownVariant;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Vaccinated {
    type Error = UnknownVariant;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for PetStatus {
    type Error = UnknownVariant;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for AdoptionStatus {
    type Error = UnknownVariant;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `pets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub breed: String,
    pub age: i64,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    pub size: String,
    pub weight: i64,
    pub color: String,
    #[sqlx(try_from = "String")]
    pub vaccinated: Vaccinated,
    pub personality: String,
    pub training: String,
    pub compatibility_pets: String,
    pub compatibility_kids: String,
    pub special_needs: String,
    #[sqlx(try_from = "String")]
    pub status: PetStatus,
    pub image: String,
}

/// Validated input for add-pet. Carries no status: new pets are always `Available`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub kind: String,
    pub breed: String,
    pub age: i64,
    pub gender: Gender,
    pub size: String,
    pub weight: i64,
    pub color: String,
    pub vaccinated: Vaccinated,
    pub personality: String,
    pub training: String,
    pub compatibility_pets: String,
    pub compatibility_kids: String,
    pub special_needs: String,
    pub image: String,
}

/// One row of `adoptions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AdoptionRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub pet_id: i64,
    #[sqlx(try_from = "String")]
    pub status: AdoptionStatus,
}

/// Validated input for submitting an adoption request; stored as `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdoptionRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub pet_id: i64,
}
