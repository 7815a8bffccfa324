//! # Country Facts
//!
//! Static lookup tables describing countries for the Globle family of games.
//!
//! Two tables live here:
//!
//! * [`CountryTable`] maps a country's display name to its [`CountryFacts`]
//!   (capital, population, density, military ranking and GDP). The front end
//!   uses these as hints once a player has guessed enough countries.
//! * [`CountryExtras`] maps the same display names to a [`CountryExtra`]
//!   record: famous cities and places, bordering countries and a few
//!   geographic flags.
//!
//! Both tables are authored as `const` slices, indexed once on first access
//! and never mutated afterwards.
//!
//! ## Example
//!
//! ```rust
//! use country_facts::CountryTable;
//!
//! let table = CountryTable::global();
//! let canada = table.lookup("Canada").unwrap();
//! assert_eq!(canada.capital, "Ottawa");
//! assert!(table.lookup("Atlantis").is_err());
//! ```

pub mod error;
pub mod extras;
pub mod facts;
pub mod table;

pub use error::{LookupError, TableError};
pub use extras::{CountryExtra, CountryExtras, Hemisphere, COUNTRY_EXTRAS};
pub use facts::{CountryFacts, CountryTable, COUNTRY_FACTS};
pub use table::Table;
