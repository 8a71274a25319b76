use std::collections::HashMap;
use std::fmt;

use crate::data::model::{CleanTable, Movie};
use crate::store::{Column, Direction, Projection, Query, SortKey};

use super::result::{QueryResult, Value};

const TOP_N: usize = 5;
const TOP_VOTES_N: usize = 10;

// ---------------------------------------------------------------------------
// Report identifiers
// ---------------------------------------------------------------------------

/// The ten reports offered in the selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportId {
    TopRated,
    TopDirectors,
    ReleasesPerYear,
    BudgetRevenueByGenre,
    CommonGenres,
    BudgetVsRevenue,
    TopByVotes,
    ByLanguage,
    RatingByCountry,
    MostProfitable,
}

impl ReportId {
    /// Menu order.
    pub const ALL: [ReportId; 10] = [
        ReportId::TopRated,
        ReportId::TopDirectors,
        ReportId::ReleasesPerYear,
        ReportId::BudgetRevenueByGenre,
        ReportId::CommonGenres,
        ReportId::BudgetVsRevenue,
        ReportId::TopByVotes,
        ReportId::ByLanguage,
        ReportId::RatingByCountry,
        ReportId::MostProfitable,
    ];

    /// 1-based position in the menu.
    #[cfg(test)]
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).map_or(0, |i| i + 1)
    }

    /// Text shown in the selection control.
    pub fn label(self) -> &'static str {
        match self {
            ReportId::TopRated => "1. Top Rated Movies",
            ReportId::TopDirectors => "2. Top Directors by Avg Rating",
            ReportId::ReleasesPerYear => "3. Movies Released per Year",
            ReportId::BudgetRevenueByGenre => "4. Avg Budget & Revenue by Genre",
            ReportId::CommonGenres => "5. Most Common Genres",
            ReportId::BudgetVsRevenue => "6. Revenue vs Budget Scatter Plot",
            ReportId::TopByVotes => "7. Top 10 by Votes",
            ReportId::ByLanguage => "8. Movies by Language",
            ReportId::RatingByCountry => "9. Average Rating by Country",
            ReportId::MostProfitable => "10. Most Profitable Movies",
        }
    }

    /// Heading shown above the rendered result.
    pub fn title(self) -> &'static str {
        match self {
            ReportId::TopRated => "Top 5 Highest Rated Movies",
            ReportId::TopDirectors => "Top 5 Directors by Average Rating",
            ReportId::ReleasesPerYear => "Movie Count by Year",
            ReportId::BudgetRevenueByGenre => "Average Budget and Revenue by Genre",
            ReportId::CommonGenres => "Top 5 Most Common Genres",
            ReportId::BudgetVsRevenue => "Revenue vs Budget",
            ReportId::TopByVotes => "Top 10 Movies by Vote Count",
            ReportId::ByLanguage => "Top 5 Languages by Movie Count",
            ReportId::RatingByCountry => "Average Movie Rating by Country",
            ReportId::MostProfitable => "Top 5 Most Profitable Movies (Revenue - Budget)",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog entries
// ---------------------------------------------------------------------------

/// How a report's result is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Table,
    /// First column is the category, every further column one bar series.
    BarChart,
    /// First column is the x axis, every further column one line.
    LineChart,
    /// Two numeric columns: x then y.
    ScatterPlot,
}

/// Where a report gets its rows from.
#[derive(Clone)]
pub enum Computation {
    Relational(Query),
    InMemory(fn(&CleanTable) -> QueryResult),
}

impl fmt::Debug for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Computation::Relational(q) => f.debug_tuple("Relational").field(q).finish(),
            Computation::InMemory(_) => f.write_str("InMemory(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportSpec {
    pub id: ReportId,
    pub computation: Computation,
    pub shape: Shape,
}

/// Look up a report. The set is closed, so every id has an entry.
///
/// Orderings carry the group key or title as an ascending secondary key so
/// equal aggregates always come out in the same order.
pub fn entry(id: ReportId) -> ReportSpec {
    use Computation::{InMemory, Relational};
    use Direction::{Asc, Desc};

    let (computation, shape) = match id {
        ReportId::TopRated => (
            Relational(
                Query::select(vec![
                    Projection::Column(Column::Title),
                    Projection::Column(Column::Rating),
                ])
                .order_by(SortKey::Column(Column::Rating), Desc)
                .order_by(SortKey::Column(Column::Title), Asc)
                .limit(TOP_N),
            ),
            Shape::Table,
        ),
        ReportId::TopDirectors => (
            Relational(average_by(Column::Director, Column::Rating, "avg_rating")),
            Shape::Table,
        ),
        ReportId::ReleasesPerYear => (
            Relational(
                Query::select(vec![
                    Projection::Column(Column::ReleaseYear),
                    Projection::Count { alias: "movie_count" },
                ])
                .group_by(Column::ReleaseYear)
                .order_by(SortKey::Column(Column::ReleaseYear), Asc),
            ),
            Shape::LineChart,
        ),
        ReportId::BudgetRevenueByGenre => (
            Relational(
                Query::select(vec![
                    Projection::Column(Column::Genre),
                    Projection::Avg { column: Column::Budget, alias: "avg_budget" },
                    Projection::Avg { column: Column::Revenue, alias: "avg_revenue" },
                ])
                .group_by(Column::Genre)
                .order_by(SortKey::Alias("avg_revenue"), Desc)
                .order_by(SortKey::Column(Column::Genre), Asc)
                .limit(TOP_N),
            ),
            Shape::BarChart,
        ),
        ReportId::CommonGenres => (InMemory(genre_counts), Shape::BarChart),
        ReportId::BudgetVsRevenue => (InMemory(budget_revenue_pairs), Shape::ScatterPlot),
        ReportId::TopByVotes => (InMemory(top_by_votes), Shape::Table),
        ReportId::ByLanguage => (
            Relational(
                Query::select(vec![
                    Projection::Column(Column::Language),
                    Projection::Count { alias: "count" },
                ])
                .group_by(Column::Language)
                .order_by(SortKey::Alias("count"), Desc)
                .order_by(SortKey::Column(Column::Language), Asc)
                .limit(TOP_N),
            ),
            Shape::BarChart,
        ),
        ReportId::RatingByCountry => (
            Relational(average_by(Column::Country, Column::Rating, "avg_rating")),
            Shape::Table,
        ),
        ReportId::MostProfitable => (InMemory(most_profitable), Shape::Table),
    };

    ReportSpec {
        id,
        computation,
        shape,
    }
}

/// `key, AVG(value)` grouped by key, highest average first, top five.
fn average_by(key: Column, value: Column, alias: &'static str) -> Query {
    Query::select(vec![
        Projection::Column(key),
        Projection::Avg { column: value, alias },
    ])
    .group_by(key)
    .order_by(SortKey::Alias(alias), Direction::Desc)
    .order_by(SortKey::Column(key), Direction::Asc)
    .limit(TOP_N)
}

// ---------------------------------------------------------------------------
// In-memory computations
// ---------------------------------------------------------------------------

fn genre_counts(table: &CleanTable) -> QueryResult {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for m in table.movies() {
        *counts.entry(m.genre.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(&str, i64)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut result = QueryResult::new(["genre", "count"]);
    for (genre, n) in counts.into_iter().take(TOP_N) {
        result.push_row(vec![genre.into(), n.into()]);
    }
    result
}

fn budget_revenue_pairs(table: &CleanTable) -> QueryResult {
    let mut result = QueryResult::new(["budget", "revenue"]);
    for m in table.movies() {
        result.push_row(vec![m.budget.into(), m.revenue.into()]);
    }
    result
}

fn top_by_votes(table: &CleanTable) -> QueryResult {
    let mut movies: Vec<&Movie> = table.movies().iter().collect();
    movies.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.title.cmp(&b.title)));

    let mut result = QueryResult::new(["title", "votes"]);
    for m in movies.into_iter().take(TOP_VOTES_N) {
        result.push_row(vec![m.title.clone().into(), m.votes.into()]);
    }
    result
}

fn most_profitable(table: &CleanTable) -> QueryResult {
    let mut movies: Vec<(&Movie, f64)> = table.movies().iter().map(|m| (m, m.profit())).collect();
    movies.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.title.cmp(&b.0.title)));

    let mut result = QueryResult::new(["title", "budget", "revenue", "profit"]);
    for (m, profit) in movies.into_iter().take(TOP_N) {
        result.push_row(vec![
            Value::from(m.title.clone()),
            m.budget.into(),
            m.revenue.into(),
            profit.into(),
        ]);
    }
    result
}
