use std::hash::{Hash, Hasher};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// RawMovie – one untyped row as read from the CSV source
// ---------------------------------------------------------------------------

/// A movie row exactly as it appears in the source file.
/// Every cell is optional text; typing happens in the cleaner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct RawMovie {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub release_year: Option<String>,
    pub votes: Option<String>,
    pub budget: Option<String>,
    pub revenue: Option<String>,
    pub director: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// Table – the raw dataset
// ---------------------------------------------------------------------------

/// The dataset as loaded, before any validation.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<RawMovie>,
}

impl Table {
    pub fn new(rows: Vec<RawMovie>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Movie – one validated row
// ---------------------------------------------------------------------------

/// A fully typed movie. `title`, `genre` and the five numeric fields are
/// always present; the descriptive columns may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub genre: String,
    pub rating: f64,
    pub release_year: i64,
    pub votes: i64,
    pub budget: f64,
    pub revenue: f64,
    pub director: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl Movie {
    /// Revenue minus budget. Derived on demand, never stored.
    pub fn profit(&self) -> f64 {
        self.revenue - self.budget
    }
}

// Coercion rejects NaN, so float equality is total on clean rows. Zero is
// hashed as +0.0 because `-0.0 == 0.0`.
impl Eq for Movie {}

fn float_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.genre.hash(state);
        float_bits(self.rating).hash(state);
        self.release_year.hash(state);
        self.votes.hash(state);
        float_bits(self.budget).hash(state);
        float_bits(self.revenue).hash(state);
        self.director.hash(state);
        self.language.hash(state);
        self.country.hash(state);
    }
}

#[cfg(test)]
impl From<&Movie> for RawMovie {
    fn from(m: &Movie) -> Self {
        RawMovie {
            title: Some(m.title.clone()),
            genre: Some(m.genre.clone()),
            rating: Some(m.rating.to_string()),
            release_year: Some(m.release_year.to_string()),
            votes: Some(m.votes.to_string()),
            budget: Some(m.budget.to_string()),
            revenue: Some(m.revenue.to_string()),
            director: m.director.clone(),
            language: m.language.clone(),
            country: m.country.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// CleanTable – the validated, deduplicated source of truth for reports
// ---------------------------------------------------------------------------

/// Rows that survived cleaning. Only the cleaner constructs one, which keeps
/// the no-missing-fields and no-duplicates invariants in a single place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanTable {
    movies: Vec<Movie>,
}

impl CleanTable {
    pub(crate) fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Turn the typed rows back into raw text rows, e.g. to re-clean them.
    #[cfg(test)]
    pub fn to_table(&self) -> Table {
        Table::new(self.movies.iter().map(RawMovie::from).collect())
    }
}
