use std::collections::HashMap;

use crate::error::Result;
use crate::models::Author;
use crate::storage::database::Database;

/// Stored in `author_names` when an author id has no row in the author table.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Point lookup of an author by id.
pub trait AuthorLookup {
    fn find_author(&self, id: &str) -> Result<Option<Author>>;
}

impl AuthorLookup for Database {
    fn find_author(&self, id: &str) -> Result<Option<Author>> {
        Database::find_author(self, id)
    }
}

/// Turns author ids into the names denormalized onto a book.
///
/// With caching enabled, each distinct id hits the store at most once per
/// resolver. Misses are cached too. The author table is not written while
/// works load, so cached answers never go stale.
pub struct AuthorNameResolver<'a, L: AuthorLookup + ?Sized> {
    store: &'a L,
    cache: Option<HashMap<String, Option<String>>>,
    lookups: u64,
}

impl<'a, L: AuthorLookup + ?Sized> AuthorNameResolver<'a, L> {
    pub fn new(store: &'a L, cache_names: bool) -> Self {
        Self {
            store,
            cache: cache_names.then(HashMap::new),
            lookups: 0,
        }
    }

    /// Number of store queries issued so far.
    pub fn lookups(&self) -> u64 {
        self.lookups
    }

    pub fn resolve(&mut self, author_id: &str) -> Result<String> {
        let cached = self.cache.as_ref().and_then(|c| c.get(author_id)).cloned();
        let name = match cached {
            Some(name) => name,
            None => {
                self.lookups += 1;
                let found = self.store.find_author(author_id)?.map(|a| a.name);
                if let Some(cache) = self.cache.as_mut() {
                    cache.insert(author_id.to_string(), found.clone());
                }
                found
            }
        };
        Ok(name.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingStore {
        authors: HashMap<String, Author>,
        queries: Cell<u32>,
    }

    impl CountingStore {
        fn with(authors: &[(&str, &str)]) -> Self {
            Self {
                authors: authors
                    .iter()
                    .map(|(id, name)| (id.to_string(), Author::new(*id, *name)))
                    .collect(),
                queries: Cell::new(0),
            }
        }
    }

    impl AuthorLookup for CountingStore {
        fn find_author(&self, id: &str) -> Result<Option<Author>> {
            self.queries.set(self.queries.get() + 1);
            Ok(self.authors.get(id).cloned())
        }
    }

    fn resolve_each(resolver: &mut AuthorNameResolver<'_, CountingStore>, ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| resolver.resolve(id).unwrap()).collect()
    }

    #[test]
    fn test_unknown_author_sentinel_in_position() {
        let store = CountingStore::with(&[("A1", "Jane Doe"), ("A3", "John Roe")]);
        let mut resolver = AuthorNameResolver::new(&store, false);

        let names = resolve_each(&mut resolver, &["A3", "A2", "A1"]);
        assert_eq!(names, vec!["John Roe", UNKNOWN_AUTHOR, "Jane Doe"]);
    }

    #[test]
    fn test_found_author_with_empty_name_is_not_unknown() {
        let store = CountingStore::with(&[("A1", "")]);
        let mut resolver = AuthorNameResolver::new(&store, true);
        assert_eq!(resolver.resolve("A1").unwrap(), "");
    }

    #[test]
    fn test_uncached_queries_every_reference() {
        let store = CountingStore::with(&[("A1", "Jane Doe")]);
        let mut resolver = AuthorNameResolver::new(&store, false);

        resolve_each(&mut resolver, &["A1", "A1", "X"]);
        resolver.resolve("X").unwrap();
        assert_eq!(store.queries.get(), 4);
        assert_eq!(resolver.lookups(), 4);
    }

    #[test]
    fn test_cache_queries_each_id_once_with_same_output() {
        let store = CountingStore::with(&[("A1", "Jane Doe")]);
        let mut cached = AuthorNameResolver::new(&store, true);

        let first = resolve_each(&mut cached, &["A1", "X", "A1"]);
        let second = resolve_each(&mut cached, &["X", "A1"]);

        assert_eq!(first, vec!["Jane Doe", UNKNOWN_AUTHOR, "Jane Doe"]);
        assert_eq!(second, vec![UNKNOWN_AUTHOR, "Jane Doe"]);
        assert_eq!(store.queries.get(), 2);
    }

    #[test]
    fn test_database_lookup() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_author(&Author::new("OL1A", "Jane Doe")).unwrap();

        let mut resolver = AuthorNameResolver::new(&db, true);
        assert_eq!(resolver.resolve("OL1A").unwrap(), "Jane Doe");
        assert_eq!(resolver.resolve("OL2A").unwrap(), UNKNOWN_AUTHOR);
    }
}
