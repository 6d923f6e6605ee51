use std::sync::{Arc, OnceLock};

use catalog_core::core::bits::Title;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: Title,
    pub year: u16,
}

/// Plain list of movies with release year
#[derive(Default, Debug)]
pub struct MovieShelf {
    movies: Vec<MovieRecord>,
}

impl MovieShelf {
    pub fn new() -> Self {
        Self { movies: Vec::new() }
    }

    pub fn add_movie(&mut self, title: impl Into<Title>, year: u16) {
        let record = MovieRecord {
            title: title.into(),
            year,
        };
        tracing::debug!(title = %record.title, year, "Shelf: adding movie");
        self.movies.push(record);
    }

    pub fn list_movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// First movie matching the title, ignoring case
    pub fn find_movie(&self, title: &str) -> Option<&MovieRecord> {
        let wanted = title.to_lowercase();
        self.movies
            .iter()
            .find(|movie| movie.title.to_lowercase() == wanted)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

static SHARED_SHELF: OnceLock<Arc<RwLock<MovieShelf>>> = OnceLock::new();

/// Process-wide shelf, created on first use
///
/// Every call hands out the same instance.
pub fn shared_shelf() -> Arc<RwLock<MovieShelf>> {
    SHARED_SHELF
        .get_or_init(|| {
            tracing::debug!("Creating shared movie shelf");
            Arc::new(RwLock::new(MovieShelf::new()))
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use test_case::test_case;

    use super::{shared_shelf, MovieShelf};

    #[test]
    fn test_shared_shelf_is_single_instance() {
        let shelf_1 = shared_shelf();
        let shelf_2 = shared_shelf();
        assert!(Arc::ptr_eq(&shelf_1, &shelf_2));

        shelf_1.write().add_movie("Shared Shelf Test Movie", 2024);

        let found = shelf_2
            .read()
            .find_movie("shared shelf test movie")
            .cloned();
        assert_eq!(found.map(|movie| movie.year), Some(2024));
    }

    #[test_case("Matrix", Some(1999); "exact")]
    #[test_case("MATRIX", Some(1999); "upper case")]
    #[test_case("o senhor dos anéis", Some(2001); "accented lower case")]
    #[test_case("Interestelar", None; "missing")]
    fn test_find_movie(title: &str, expected_year: Option<u16>) {
        let mut shelf = MovieShelf::new();
        shelf.add_movie("O Senhor dos Anéis", 2001);
        shelf.add_movie("Matrix", 1999);

        assert_eq!(shelf.find_movie(title).map(|movie| movie.year), expected_year);
    }

    #[test]
    fn test_list_movies_keeps_insertion_order() {
        let mut shelf = MovieShelf::new();
        assert!(shelf.is_empty());

        shelf.add_movie("O Senhor dos Anéis", 2001);
        shelf.add_movie("Matrix", 1999);

        let titles: Vec<&str> = shelf
            .list_movies()
            .iter()
            .map(|movie| &*movie.title)
            .collect();
        assert_eq!(titles, ["O Senhor dos Anéis", "Matrix"]);
        assert_eq!(shelf.len(), 2);
    }
}
