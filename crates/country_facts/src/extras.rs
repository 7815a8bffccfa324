//! Extra per-country trivia: famous cities and places, land borders and a
//! few geographic flags.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::TableError;
use crate::facts::CountryTable;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    Northern,
    Southern,
}

/// Trivia shown alongside a country once it has been guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryExtra {
    pub famous_cities: &'static [&'static str],
    pub famous_places: &'static [&'static str],
    /// Countries sharing a land border, by display name
    pub bordering: &'static [&'static str],
    pub landlocked: bool,
    pub island: bool,
    pub hemisphere: Hemisphere,
}

pub type CountryExtras = Table<CountryExtra>;

pub const COUNTRY_EXTRAS: &[(&str, CountryExtra)] = &[
    (
        "United States",
        CountryExtra {
            famous_cities: &["New York", "Los Angeles", "Chicago"],
            famous_places: &["Statue of Liberty", "Grand Canyon", "Yellowstone"],
            bordering: &["Canada", "Mexico"],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "Canada",
        CountryExtra {
            famous_cities: &["Toronto", "Vancouver", "Montreal"],
            famous_places: &["Niagara Falls", "Banff National Park", "CN Tower"],
            bordering: &["United States"],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "Mexico",
        CountryExtra {
            famous_cities: &["Mexico City", "Guadalajara", "Monterrey"],
            famous_places: &["Chichen Itza", "Teotihuacan", "Cancun Beaches"],
            bordering: &["Belize", "Guatemala", "United States"],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "Brazil",
        CountryExtra {
            famous_cities: &["Rio de Janeiro", "São Paulo", "Brasília"],
            famous_places: &["Christ the Redeemer", "Sugarloaf Mountain", "Amazon Rainforest"],
            bordering: &[
                "Argentina",
                "Bolivia",
                "Colombia",
                "Guyana",
                "Paraguay",
                "Peru",
                "Suriname",
                "Uruguay",
                "Venezuela",
                "French Guiana",
            ],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Southern,
        },
    ),
    (
        "United Kingdom",
        CountryExtra {
            famous_cities: &["London", "Manchester", "Edinburgh"],
            famous_places: &["Big Ben", "Stonehenge", "Buckingham Palace"],
            bordering: &["Ireland"],
            landlocked: false,
            island: true,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "France",
        CountryExtra {
            famous_cities: &["Paris", "Lyon", "Marseille"],
            famous_places: &["Eiffel Tower", "Louvre Museum", "Mont Saint-Michel"],
            bordering: &[
                "Belgium",
                "Luxembourg",
                "Germany",
                "Switzerland",
                "Italy",
                "Spain",
                "Andorra",
                "Monaco",
            ],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "Germany",
        CountryExtra {
            famous_cities: &["Berlin", "Munich", "Frankfurt", "Hamburg", "Cologne"],
            famous_places: &[
                "Brandenburg Gate",
                "Neuschwanstein Castle",
                "Berlin Wall",
                "Cologne Cathedral",
                "Black Forest",
            ],
            bordering: &[
                "Austria",
                "Belgium",
                "Czechia",
                "Denmark",
                "France",
                "Luxembourg",
                "Netherlands",
                "Poland",
                "Switzerland",
            ],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "Russia",
        CountryExtra {
            famous_cities: &["Moscow", "Saint Petersburg", "Novosibirsk"],
            famous_places: &["Red Square", "Lake Baikal", "Kremlin"],
            bordering: &[
                "Azerbaijan",
                "Belarus",
                "China",
                "Estonia",
                "Finland",
                "Georgia",
                "Kazakhstan",
                "North Korea",
                "Latvia",
                "Lithuania",
                "Mongolia",
                "Norway",
                "Poland",
                "Ukraine",
            ],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "China",
        CountryExtra {
            famous_cities: &["Beijing", "Shanghai", "Guangzhou"],
            famous_places: &[
                "Great Wall of China",
                "Forbidden City",
                "Terracotta Army",
                "Potala Palace",
                "Li River",
            ],
            bordering: &[
                "Afghanistan",
                "Bhutan",
                "India",
                "Kazakhstan",
                "Kyrgyzstan",
                "Laos",
                "Mongolia",
                "Myanmar",
                "Nepal",
                "North Korea",
                "Pakistan",
                "Russia",
                "Tajikistan",
                "Vietnam",
            ],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "India",
        CountryExtra {
            famous_cities: &["Mumbai", "Delhi", "Bangalore"],
            famous_places: &["Taj Mahal", "Red Fort", "Gateway of India"],
            bordering: &["Bangladesh", "Bhutan", "China", "Myanmar", "Nepal", "Pakistan"],
            landlocked: false,
            island: false,
            hemisphere: Hemisphere::Northern,
        },
    ),
    (
        "Japan",
        CountryExtra {
            famous_cities: &["Tokyo", "Osaka", "Kyoto"],
            famous_places: &["Mount Fuji", "Fushimi Inari Shrine", "Himeji Castle"],
            bordering: &[],
            landlocked: false,
            island: true,
            hemisphere: Hemisphere::Northern,
        },
    ),
];

static GLOBAL_EXTRAS: Lazy<CountryExtras> = Lazy::new(|| Table::index_first(COUNTRY_EXTRAS));

impl Table<CountryExtra> {
    /// The process-wide extras table, indexed on first access.
    pub fn global() -> &'static CountryExtras {
        &GLOBAL_EXTRAS
    }

    /// Bordering countries of `name` that also have a fact record in
    /// `facts`. Unknown countries have no neighbours.
    pub fn neighbours_in(&self, name: &str, facts: &CountryTable) -> Vec<&'static str> {
        self.get(name)
            .map(|extra| {
                extra
                    .bordering
                    .iter()
                    .copied()
                    .filter(|neighbour| facts.contains(neighbour))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), TableError> {
        for (name, extra) in self.iter() {
            if extra.famous_cities.is_empty() {
                return Err(TableError::NoFamousCities(name.to_string()));
            }
            if extra.island && extra.landlocked {
                return Err(TableError::LandlockedIsland(name.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extras_cover_every_fact_record() {
        let extras = CountryExtras::global();
        for name in CountryTable::global().names() {
            assert!(extras.contains(name), "no extras for {name}");
        }
        assert!(CountryExtras::from_records(COUNTRY_EXTRAS).is_ok());
    }

    #[test]
    fn test_extras_validate() {
        assert!(CountryExtras::global().validate().is_ok());
    }

    #[test]
    fn test_neighbours_limited_to_known_countries() {
        let extras = CountryExtras::global();
        let facts = CountryTable::global();

        assert_eq!(
            extras.neighbours_in("United States", facts),
            vec!["Canada", "Mexico"]
        );
        assert_eq!(extras.neighbours_in("Mexico", facts), vec!["United States"]);
        assert_eq!(extras.neighbours_in("China", facts), vec!["India", "Russia"]);
        assert!(extras.neighbours_in("Japan", facts).is_empty());
        assert!(extras.neighbours_in("Atlantis", facts).is_empty());
    }

    #[test]
    fn test_hemisphere_serializes_lowercase() {
        let brazil = CountryExtras::global().lookup("Brazil").unwrap();
        let value = serde_json::to_value(brazil).unwrap();

        assert_eq!(value["hemisphere"], "southern");
        assert_eq!(value["famousCities"][1], "São Paulo");
        assert_eq!(value["landlocked"], false);
    }

    static FLOATING_FORTRESS: &[(&str, CountryExtra)] = &[(
        "Laputa",
        CountryExtra {
            famous_cities: &["Castle in the Sky"],
            famous_places: &[],
            bordering: &[],
            landlocked: true,
            island: true,
            hemisphere: Hemisphere::Northern,
        },
    )];

    #[test]
    fn test_validation_rejects_landlocked_island() {
        let table = CountryExtras::from_records(FLOATING_FORTRESS).unwrap();
        assert_eq!(
            table.validate(),
            Err(TableError::LandlockedIsland("Laputa".to_string()))
        );
    }
}
