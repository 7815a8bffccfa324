//! Error types for table construction, validation and lookup.

use thiserror::Error;

/// Returned when a lookup names a country the table does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Country not found: {name}")]
    NotFound { name: String },
}

/// Problems found while building or validating a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("Duplicate country: {0}")]
    DuplicateCountry(String),

    #[error("Country {name} has invalid density {density}")]
    InvalidDensity { name: String, density: f64 },

    #[error("Country {0} has military ranking 0 (rankings start at 1)")]
    ZeroRanking(String),

    #[error("Military ranking {ranking} is shared by {first} and {second}")]
    DuplicateRanking {
        ranking: u32,
        first: String,
        second: String,
    },

    #[error("Country {0} lists no famous cities")]
    NoFamousCities(String),

    #[error("Country {0} is marked both island and landlocked")]
    LandlockedIsland(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LookupError::NotFound {
            name: "Atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "Country not found: Atlantis");

        let err = TableError::DuplicateRanking {
            ranking: 3,
            first: "China".to_string(),
            second: "Narnia".to_string(),
        };
        assert!(err.to_string().contains("shared by China and Narnia"));
    }
}
