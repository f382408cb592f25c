//! Shared personal profile value object.
//!
//! Applicants, fellows, and employees all carry the same biographical
//! fields. Each role entity embeds `PersonalInfo` by value instead of
//! inheriting from a shared base record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{DomainError, ErrorCode};

/// Gender of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid gender: {}", s),
            )),
        }
    }
}

/// Religious affiliation of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Religion {
    Christian,
    Muslim,
    None,
}

impl Religion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Religion::Christian => "christian",
            Religion::Muslim => "muslim",
            Religion::None => "none",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "christian" => Ok(Religion::Christian),
            "muslim" => Ok(Religion::Muslim),
            "none" => Ok(Religion::None),
            _ => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid religion: {}", s),
            )),
        }
    }
}

/// Birth county of a person (the fifteen counties of Liberia).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum County {
    Bomi,
    Bong,
    Gbarpolu,
    GrandBassa,
    GrandCapeMount,
    GrandGedeh,
    GrandKru,
    Lofa,
    Margibi,
    Maryland,
    Montserrado,
    Nimba,
    RiverCess,
    RiverGee,
    Sinoe,
}

impl County {
    pub fn as_str(&self) -> &'static str {
        match self {
            County::Bomi => "bomi",
            County::Bong => "bong",
            County::Gbarpolu => "gbarpolu",
            County::GrandBassa => "grand_bassa",
            County::GrandCapeMount => "grand_cape_mount",
            County::GrandGedeh => "grand_gedeh",
            County::GrandKru => "grand_kru",
            County::Lofa => "lofa",
            County::Margibi => "margibi",
            County::Maryland => "maryland",
            County::Montserrado => "montserrado",
            County::Nimba => "nimba",
            County::RiverCess => "river_cess",
            County::RiverGee => "river_gee",
            County::Sinoe => "sinoe",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "bomi" => Ok(County::Bomi),
            "bong" => Ok(County::Bong),
            "gbarpolu" => Ok(County::Gbarpolu),
            "grand_bassa" => Ok(County::GrandBassa),
            "grand_cape_mount" => Ok(County::GrandCapeMount),
            "grand_gedeh" => Ok(County::GrandGedeh),
            "grand_kru" => Ok(County::GrandKru),
            "lofa" => Ok(County::Lofa),
            "margibi" => Ok(County::Margibi),
            "maryland" => Ok(County::Maryland),
            "montserrado" => Ok(County::Montserrado),
            "nimba" => Ok(County::Nimba),
            "river_cess" => Ok(County::RiverCess),
            "river_gee" => Ok(County::RiverGee),
            "sinoe" => Ok(County::Sinoe),
            _ => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid county: {}", s),
            )),
        }
    }
}

/// Biographical fields shared by every person-shaped entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub religion: Religion,
    pub county: County,
}

impl PersonalInfo {
    /// Age in whole years as of the given date.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age
    }
}
