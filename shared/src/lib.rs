use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic position of a visit, serialized as the pair `[lat, lng]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers that JSON can hold
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coords {
    fn from(pair: [f64; 2]) -> Self {
        Self { lat: pair[0], lng: pair[1] }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Categorical bucket derived from a visit rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Average,
    Bad,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Good => "good",
            Tier::Average => "average",
            Tier::Bad => "bad",
        }
    }

    /// Style class used for both the list entry and the marker popup
    pub fn css_class(&self) -> String {
        format!("visit--{}", self.as_str())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Tier::Good),
            "average" => Ok(Tier::Average),
            "bad" => Ok(Tier::Bad),
            other => Err(format!("Unknown tier: {}", other)),
        }
    }
}

/// Raw visit form contents exactly as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitForm {
    pub title: String,
    /// Rating as typed; parsed and range-checked before a visit is created
    pub rating: String,
    pub bathroom: String,
    pub feeding: String,
    pub changing: String,
    pub summary: String,
}

impl VisitForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.rating.clear();
        self.bathroom.clear();
        self.feeding.clear();
        self.changing.clear();
        self.summary.clear();
    }
}

/// Reasons a visit form submission is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VisitValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title is too long ({0} characters)")]
    TitleTooLong(usize),
    #[error("Rating cannot be empty")]
    EmptyRating,
    #[error("Rating is not a whole number: {0}")]
    InvalidRatingFormat(String),
    #[error("Rating must be between {min} and {max}")]
    RatingOutOfRange { min: i32, max: i32 },
}

/// Result of validating a visit form
#[derive(Debug, Clone, PartialEq)]
pub struct VisitFormValidation {
    pub is_valid: bool,
    pub errors: Vec<VisitValidationError>,
    pub parsed_rating: Option<i32>,
}

/// Rules applied to visit form input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitFormConfig {
    pub max_title_length: usize,
    pub min_rating: i32,
    pub max_rating: i32,
}

impl Default for VisitFormConfig {
    fn default() -> Self {
        Self {
            max_title_length: 256,
            min_rating: 1,
            max_rating: 10,
        }
    }
}

/// Display-ready rendering of one visit for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitListEntry {
    pub id: String,
    pub css_class: String,
    pub heading: String,
    pub rating_line: String,
    pub bathroom_line: String,
    pub changing_line: String,
    pub feeding_line: String,
    pub summary_line: String,
}
