//! Country fact records: capital, population, density, military ranking and
//! GDP.
//!
//! The table is intentionally partial. New countries are added by appending
//! to [`COUNTRY_FACTS`]; the tests at the bottom of this file keep the table
//! consistent as it grows.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::TableError;
use crate::table::Table;

/// Descriptive facts about a single country.
///
/// Serializes with the field names the front end expects
/// (`capital`, `population`, `density`, `militaryRanking`, `gdp`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryFacts {
    /// Capital city
    pub capital: &'static str,
    /// Number of inhabitants
    pub population: u64,
    /// People per square kilometre
    pub density: f64,
    /// Global military strength ranking, 1 being the strongest
    pub military_ranking: u32,
    /// Nominal GDP in millions of US dollars
    pub gdp: u64,
}

/// Name-keyed table of [`CountryFacts`].
pub type CountryTable = Table<CountryFacts>;

pub const COUNTRY_FACTS: &[(&str, CountryFacts)] = &[
    (
        "United States",
        CountryFacts {
            capital: "Washington, D.C.",
            population: 331_000_000,
            density: 36.0,
            military_ranking: 1,
            gdp: 21_433_226,
        },
    ),
    (
        "Canada",
        CountryFacts {
            capital: "Ottawa",
            population: 38_000_000,
            density: 4.0,
            military_ranking: 23,
            gdp: 1_647_126,
        },
    ),
    (
        "Mexico",
        CountryFacts {
            capital: "Mexico City",
            population: 128_900_000,
            density: 66.0,
            military_ranking: 31,
            gdp: 1_260_145,
        },
    ),
    (
        "Brazil",
        CountryFacts {
            capital: "Brasília",
            population: 213_000_000,
            density: 25.0,
            military_ranking: 10,
            gdp: 1_839_758,
        },
    ),
    (
        "United Kingdom",
        CountryFacts {
            capital: "London",
            population: 68_200_000,
            density: 281.0,
            military_ranking: 8,
            gdp: 3_124_659,
        },
    ),
    (
        "France",
        CountryFacts {
            capital: "Paris",
            population: 65_200_000,
            density: 119.0,
            military_ranking: 7,
            gdp: 2_715_518,
        },
    ),
    (
        "Germany",
        CountryFacts {
            capital: "Berlin",
            population: 83_100_000,
            density: 233.0,
            military_ranking: 16,
            gdp: 3_845_630,
        },
    ),
    (
        "Russia",
        CountryFacts {
            capital: "Moscow",
            population: 146_000_000,
            density: 9.0,
            military_ranking: 2,
            gdp: 1_483_496,
        },
    ),
    (
        "China",
        CountryFacts {
            capital: "Beijing",
            population: 1_412_000_000,
            density: 153.0,
            military_ranking: 3,
            gdp: 14_342_903,
        },
    ),
    (
        "India",
        CountryFacts {
            capital: "New Delhi",
            population: 1_393_000_000,
            density: 464.0,
            military_ranking: 4,
            gdp: 2_875_142,
        },
    ),
    (
        "Japan",
        CountryFacts {
            capital: "Tokyo",
            population: 125_800_000,
            density: 347.0,
            military_ranking: 5,
            gdp: 5_081_770,
        },
    ),
];

static GLOBAL_FACTS: Lazy<CountryTable> = Lazy::new(|| Table::index_first(COUNTRY_FACTS));

impl Table<CountryFacts> {
    /// The process-wide fact table, indexed on first access.
    pub fn global() -> &'static CountryTable {
        &GLOBAL_FACTS
    }

    /// Records ordered by military ranking, strongest first.
    pub fn by_military_ranking(&self) -> Vec<(&'static str, &'static CountryFacts)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by_key(|(_, facts)| facts.military_ranking);
        ranked
    }

    /// Checks every record for consistency.
    ///
    /// Population and GDP are unsigned and cannot go negative; density must be
    /// a finite, non-negative number. Military rankings must start at 1 and be
    /// pairwise distinct.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the table is consistent, or the first problem found.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut rankings: HashMap<u32, &'static str> = HashMap::with_capacity(self.len());

        for (name, facts) in self.iter() {
            if !facts.density.is_finite() || facts.density < 0.0 {
                return Err(TableError::InvalidDensity {
                    name: name.to_string(),
                    density: facts.density,
                });
            }

            if facts.military_ranking == 0 {
                return Err(TableError::ZeroRanking(name.to_string()));
            }

            if let Some(first) = rankings.insert(facts.military_ranking, name) {
                return Err(TableError::DuplicateRanking {
                    ranking: facts.military_ranking,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }

        Ok(())
    }
}
