//! Read-only name-keyed table over a `'static` record slice.
//!
//! The records stay in the slice they were authored in; the table only adds a
//! name index on top so lookups do not scan. Iteration follows authoring
//! order.

use std::collections::HashMap;

use crate::error::{LookupError, TableError};

/// An immutable table of records keyed by country display name.
///
/// Construct with [`Table::from_records`], which rejects duplicate keys. The
/// process-wide tables are exposed through `CountryTable::global()` and
/// `CountryExtras::global()`.
#[derive(Debug, Clone)]
pub struct Table<T: 'static> {
    records: &'static [(&'static str, T)],
    index: HashMap<&'static str, usize>,
}

impl<T: 'static> Table<T> {
    /// Builds a table from a record slice.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateCountry`] when the same name appears
    /// more than once.
    pub fn from_records(records: &'static [(&'static str, T)]) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, (name, _)) in records.iter().enumerate() {
            if index.insert(*name, position).is_some() {
                return Err(TableError::DuplicateCountry((*name).to_string()));
            }
        }
        Ok(Self { records, index })
    }

    /// Indexes a slice without failing; the first record wins on a repeated
    /// name. Used for the compiled-in tables, whose uniqueness is covered by
    /// tests.
    pub(crate) fn index_first(records: &'static [(&'static str, T)]) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (position, (name, _)) in records.iter().enumerate() {
            index.entry(*name).or_insert(position);
        }
        Self { records, index }
    }

    /// Exact-key lookup.
    pub fn get(&self, name: &str) -> Option<&'static T> {
        let records = self.records;
        self.index.get(name).map(|&position| &records[position].1)
    }

    /// Like [`Table::get`], but absence is reported as
    /// [`LookupError::NotFound`].
    pub fn lookup(&self, name: &str) -> Result<&'static T, LookupError> {
        self.get(name).ok_or_else(|| LookupError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Country names in authoring order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.records.iter().map(|(name, _)| *name)
    }

    /// `(name, record)` pairs in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static T)> {
        self.records.iter().map(|(name, record)| (*name, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LETTERS: &[(&str, char)] = &[("Alpha", 'a'), ("Bravo", 'b'), ("Charlie", 'c')];
    static REPEATED: &[(&str, char)] = &[("Alpha", 'a'), ("Alpha", 'z')];

    #[test]
    fn test_lookup_present_and_absent() {
        let table = Table::from_records(LETTERS).unwrap();

        assert_eq!(table.get("Bravo"), Some(&'b'));
        assert_eq!(table.lookup("Charlie"), Ok(&'c'));
        assert_eq!(
            table.lookup("Delta"),
            Err(LookupError::NotFound {
                name: "Delta".to_string()
            })
        );
        assert!(!table.contains("alpha"), "lookups are exact-match");
    }

    #[test]
    fn test_iteration_follows_authoring_order() {
        let table = Table::from_records(LETTERS).unwrap();

        let names: Vec<_> = table.names().collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Table::from_records(REPEATED).unwrap_err();
        assert_eq!(err, TableError::DuplicateCountry("Alpha".to_string()));
    }

    #[test]
    fn test_index_first_keeps_first_record() {
        let table = Table::index_first(REPEATED);
        assert_eq!(table.get("Alpha"), Some(&'a'));
    }
}
