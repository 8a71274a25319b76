use std::collections::HashSet;

use super::model::{CleanTable, Movie, RawMovie, Table};

/// Cell contents treated as "no value", in addition to the empty string.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Clean report
// ---------------------------------------------------------------------------

/// How many rows each cleaning step removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub input_rows: usize,
    pub duplicates: usize,
    pub missing_required: usize,
    pub failed_coercion: usize,
    pub kept: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.input_rows - self.kept
    }
}

// ---------------------------------------------------------------------------
// Cleaning pipeline
// ---------------------------------------------------------------------------

/// Narrow a raw table down to rows every report can trust.
///
/// Steps, in order:
/// 1. drop exact duplicate rows (first occurrence wins)
/// 2. drop rows missing `title`, `genre` or `rating`
/// 3. coerce `release_year`, `rating`, `votes`, `budget`, `revenue`
/// 4. drop rows where any of those failed to coerce
///
/// Coercion can make two distinct raw rows equal ("9" vs "9.0"), so a final
/// pass removes duplicates among the typed rows as well.
pub fn clean(table: Table) -> (CleanTable, CleanReport) {
    let mut report = CleanReport {
        input_rows: table.len(),
        ..CleanReport::default()
    };

    let mut seen: HashSet<RawMovie> = HashSet::with_capacity(table.len());
    let unique: Vec<RawMovie> = table
        .rows
        .into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect();
    report.duplicates = report.input_rows - unique.len();

    let complete: Vec<RawMovie> = unique
        .into_iter()
        .filter(|row| {
            present(&row.title).is_some()
                && present(&row.genre).is_some()
                && present(&row.rating).is_some()
        })
        .collect();
    report.missing_required = report.input_rows - report.duplicates - complete.len();

    let typed: Vec<Movie> = complete.iter().filter_map(coerce).collect();
    report.failed_coercion = complete.len() - typed.len();

    let mut seen_typed: HashSet<Movie> = HashSet::with_capacity(typed.len());
    let movies: Vec<Movie> = typed
        .into_iter()
        .filter(|m| seen_typed.insert(m.clone()))
        .collect();
    report.duplicates += report.input_rows
        - report.duplicates
        - report.missing_required
        - report.failed_coercion
        - movies.len();
    report.kept = movies.len();

    (CleanTable::from_movies(movies), report)
}

/// Type one row, or `None` if any numeric field fails coercion.
fn coerce(row: &RawMovie) -> Option<Movie> {
    Some(Movie {
        title: present(&row.title)?.to_string(),
        genre: present(&row.genre)?.to_string(),
        rating: to_number(&row.rating)?,
        release_year: to_whole(&row.release_year)?,
        votes: to_whole(&row.votes)?,
        budget: to_number(&row.budget)?,
        revenue: to_number(&row.revenue)?,
        director: present(&row.director).map(str::to_string),
        language: present(&row.language).map(str::to_string),
        country: present(&row.country).map(str::to_string),
    })
}

/// The cell's text, unless it is empty or a null marker.
fn present(cell: &Option<String>) -> Option<&str> {
    let s = cell.as_deref()?;
    if s.trim().is_empty() || NULL_TOKENS.contains(&s.trim()) {
        None
    } else {
        Some(s)
    }
}

/// Finite numbers only. `-0` comes back as `0.0`.
fn to_number(cell: &Option<String>) -> Option<f64> {
    present(cell)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v + 0.0)
}

/// Integers may be written with a zero fraction ("2001.0"), as spreadsheet
/// exports often do.
fn to_whole(cell: &Option<String>) -> Option<i64> {
    let v = to_number(cell)?;
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}
