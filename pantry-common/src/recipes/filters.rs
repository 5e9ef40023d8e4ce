//! Single-select diet and cuisine filters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dietary constraint; `All` disables the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryFilter {
    #[default]
    All,
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NonVegetarian,
}

impl DietaryFilter {
    pub const ALL: [DietaryFilter; 6] = [
        DietaryFilter::All,
        DietaryFilter::Vegetarian,
        DietaryFilter::Vegan,
        DietaryFilter::GlutenFree,
        DietaryFilter::DairyFree,
        DietaryFilter::NonVegetarian,
    ];

    /// Value compared against recipe `diets` entries
    pub fn as_str(self) -> &'static str {
        match self {
            DietaryFilter::All => "all",
            DietaryFilter::Vegetarian => "vegetarian",
            DietaryFilter::Vegan => "vegan",
            DietaryFilter::GlutenFree => "gluten-free",
            DietaryFilter::DairyFree => "dairy-free",
            DietaryFilter::NonVegetarian => "non-vegetarian",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DietaryFilter::All => "All Diets",
            DietaryFilter::Vegetarian => "Vegetarian",
            DietaryFilter::Vegan => "Vegan",
            DietaryFilter::GlutenFree => "Gluten-Free",
            DietaryFilter::DairyFree => "Dairy-Free",
            DietaryFilter::NonVegetarian => "Non-Vegetarian",
        }
    }

    /// True when the filter is `All` or any diet equals it, ignoring case
    pub fn accepts(self, diets: &[String]) -> bool {
        self == DietaryFilter::All || diets.iter().any(|d| d.eq_ignore_ascii_case(self.as_str()))
    }
}

/// Cuisine constraint; `All` disables the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CuisineFilter {
    #[default]
    All,
    Italian,
    Mexican,
    Indian,
    Chinese,
    Japanese,
    Thai,
    American,
    Mediterranean,
    French,
}

impl CuisineFilter {
    pub const ALL: [CuisineFilter; 10] = [
        CuisineFilter::All,
        CuisineFilter::Italian,
        CuisineFilter::Mexican,
        CuisineFilter::Indian,
        CuisineFilter::Chinese,
        CuisineFilter::Japanese,
        CuisineFilter::Thai,
        CuisineFilter::American,
        CuisineFilter::Mediterranean,
        CuisineFilter::French,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CuisineFilter::All => "all",
            CuisineFilter::Italian => "italian",
            CuisineFilter::Mexican => "mexican",
            CuisineFilter::Indian => "indian",
            CuisineFilter::Chinese => "chinese",
            CuisineFilter::Japanese => "japanese",
            CuisineFilter::Thai => "thai",
            CuisineFilter::American => "american",
            CuisineFilter::Mediterranean => "mediterranean",
            CuisineFilter::French => "french",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CuisineFilter::All => "All Cuisines",
            CuisineFilter::Italian => "Italian",
            CuisineFilter::Mexican => "Mexican",
            CuisineFilter::Indian => "Indian",
            CuisineFilter::Chinese => "Chinese",
            CuisineFilter::Japanese => "Japanese",
            CuisineFilter::Thai => "Thai",
            CuisineFilter::American => "American",
            CuisineFilter::Mediterranean => "Mediterranean",
            CuisineFilter::French => "French",
        }
    }

    pub fn accepts(self, cuisines: &[String]) -> bool {
        self == CuisineFilter::All
            || cuisines.iter().any(|c| c.eq_ignore_ascii_case(self.as_str()))
    }
}

impl fmt::Display for DietaryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CuisineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DietaryFilter::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown dietary filter: {s}"))
    }
}

impl FromStr for CuisineFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CuisineFilter::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown cuisine filter: {s}"))
    }
}
