use std::path::Path;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params, params_from_iter, Connection, ToSql};
use thiserror::Error;

use crate::data::model::CleanTable;
use crate::report::result::{QueryResult, Value};

/// Name of the single table the store keeps.
pub const TABLE_NAME: &str = "movies";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed query: {0}")]
    MalformedQuery(String),
}

// ---------------------------------------------------------------------------
// Query descriptor
// ---------------------------------------------------------------------------

/// Columns of the `movies` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Genre,
    Rating,
    ReleaseYear,
    Votes,
    Budget,
    Revenue,
    Director,
    Language,
    Country,
}

impl Column {
    pub const fn name(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Genre => "genre",
            Column::Rating => "rating",
            Column::ReleaseYear => "release_year",
            Column::Votes => "votes",
            Column::Budget => "budget",
            Column::Revenue => "revenue",
            Column::Director => "director",
            Column::Language => "language",
            Column::Country => "country",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Column(Column),
    Count { alias: &'static str },
    Avg { column: Column, alias: &'static str },
}

impl Projection {
    fn output_name(&self) -> &'static str {
        match self {
            Projection::Column(c) => c.name(),
            Projection::Count { alias } | Projection::Avg { alias, .. } => *alias,
        }
    }

    fn is_aggregate(&self) -> bool {
        !matches!(self, Projection::Column(_))
    }

    fn sql(&self) -> String {
        match self {
            Projection::Column(c) => c.name().to_string(),
            Projection::Count { alias } => format!("COUNT(*) AS {alias}"),
            Projection::Avg { column, alias } => format!("AVG({}) AS {alias}", column.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Column(Column),
    Alias(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// What to read from the store. The first sort term is the primary order;
/// any further terms only break ties.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub projections: Vec<Projection>,
    pub filter: Option<(Column, Value)>,
    pub group_by: Option<Column>,
    pub order_by: Vec<(SortKey, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn select(projections: Vec<Projection>) -> Self {
        Self {
            projections,
            filter: None,
            group_by: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    #[cfg(test)]
    pub fn filter_eq(mut self, column: Column, value: impl Into<Value>) -> Self {
        self.filter = Some((column, value.into()));
        self
    }

    pub fn group_by(mut self, column: Column) -> Self {
        self.group_by = Some(column);
        self
    }

    pub fn order_by(mut self, key: SortKey, direction: Direction) -> Self {
        self.order_by.push((key, direction));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn validate(&self) -> Result<(), StoreError> {
        let malformed = |msg: String| -> Result<(), StoreError> { Err(StoreError::MalformedQuery(msg)) };

        if self.projections.is_empty() {
            return malformed("nothing selected".into());
        }
        let has_aggregate = self.projections.iter().any(Projection::is_aggregate);
        for p in &self.projections {
            if let Projection::Column(c) = p {
                match self.group_by {
                    Some(g) if g != *c => {
                        return malformed(format!("{} is not the group key", c.name()));
                    }
                    None if has_aggregate => {
                        return malformed(format!("{} mixed with aggregates", c.name()));
                    }
                    _ => {}
                }
            }
        }
        for (key, _) in &self.order_by {
            match key {
                SortKey::Alias(a) if !self.projections.iter().any(|p| p.output_name() == *a) => {
                    return malformed(format!("unknown sort alias {a}"));
                }
                SortKey::Column(c) if self.group_by.is_some_and(|g| g != *c) => {
                    return malformed(format!("cannot sort grouped rows by {}", c.name()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Render as SQL. The filter value is bound as `?1`.
    pub fn to_sql(&self) -> Result<String, StoreError> {
        self.validate()?;

        let select: Vec<String> = self.projections.iter().map(Projection::sql).collect();
        let mut sql = format!("SELECT {} FROM {TABLE_NAME}", select.join(", "));
        if let Some((column, _)) = &self.filter {
            sql.push_str(&format!(" WHERE {} = ?1", column.name()));
        }
        if let Some(g) = self.group_by {
            sql.push_str(&format!(" GROUP BY {}", g.name()));
        }
        if !self.order_by.is_empty() {
            let terms: Vec<String> = self
                .order_by
                .iter()
                .map(|(key, dir)| {
                    let key = match key {
                        SortKey::Column(c) => c.name(),
                        SortKey::Alias(a) => *a,
                    };
                    let dir = match dir {
                        Direction::Asc => "ASC",
                        Direction::Desc => "DESC",
                    };
                    format!("{key} {dir}")
                })
                .collect();
            sql.push_str(&format!(" ORDER BY {}", terms.join(", ")));
        }
        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        Ok(sql)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Value::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
        })
    }
}

fn value_from_ref(v: ValueRef<'_>) -> Value {
    match v {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            Value::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The relational copy of the clean table, backed by one SQLite database.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Replace whatever the store held with `table`. Runs in one
    /// transaction, so readers see either the old rows or the new ones.
    pub fn rebuild(&mut self, table: &CleanTable) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {TABLE_NAME};
             CREATE TABLE {TABLE_NAME} (
                 title        TEXT NOT NULL,
                 genre        TEXT NOT NULL,
                 rating       REAL NOT NULL,
                 release_year INTEGER NOT NULL,
                 votes        INTEGER NOT NULL,
                 budget       REAL NOT NULL,
                 revenue      REAL NOT NULL,
                 director     TEXT,
                 language     TEXT,
                 country      TEXT
             );"
        ))?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {TABLE_NAME}
                 (title, genre, rating, release_year, votes, budget, revenue, director, language, country)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ))?;
            for m in table.movies() {
                stmt.execute(params![
                    m.title,
                    m.genre,
                    m.rating,
                    m.release_year,
                    m.votes,
                    m.budget,
                    m.revenue,
                    m.director,
                    m.language,
                    m.country,
                ])?;
            }
        }
        tx.commit()?;
        Ok(table.len())
    }

    pub fn query(&self, query: &Query) -> Result<QueryResult, StoreError> {
        let sql = query.to_sql()?;
        let mut stmt = self.conn.prepare(&sql)?;
        let mut result = QueryResult::new(stmt.column_names());
        let width = result.columns.len();

        let mut rows = stmt.query(params_from_iter(query.filter.iter().map(|(_, v)| v)))?;
        while let Some(row) = rows.next()? {
            let cells = (0..width)
                .map(|i| row.get_ref(i).map(value_from_ref))
                .collect::<Result<Vec<_>, _>>()?;
            result.push_row(cells);
        }
        Ok(result)
    }

    /// Release the database handle.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaner::clean;
    use crate::data::model::{RawMovie, Table};

    fn movie(title: &str, genre: &str, rating: f64, director: Option<&str>) -> RawMovie {
        RawMovie {
            title: Some(title.into()),
            genre: Some(genre.into()),
            rating: Some(rating.to_string()),
            release_year: Some("2010".into()),
            votes: Some("10".into()),
            budget: Some("1".into()),
            revenue: Some("2".into()),
            director: director.map(str::to_string),
            language: Some("English".into()),
            country: Some("USA".into()),
        }
    }

    fn store_with(rows: Vec<RawMovie>) -> Store {
        let (table, _) = clean(Table::new(rows));
        let mut store = Store::open_in_memory().unwrap();
        store.rebuild(&table).unwrap();
        store
    }

    #[test]
    fn group_by_with_average_and_tie_break() -> anyhow::Result<()> {
        let store = store_with(vec![
            movie("A", "Drama", 8.0, Some("Nolan")),
            movie("B", "Drama", 6.0, Some("Nolan")),
            movie("C", "Drama", 7.0, Some("Bigelow")),
            movie("D", "Drama", 7.0, Some("Anderson")),
        ]);
        let q = Query::select(vec![
            Projection::Column(Column::Director),
            Projection::Avg { column: Column::Rating, alias: "avg_rating" },
        ])
        .group_by(Column::Director)
        .order_by(SortKey::Alias("avg_rating"), Direction::Desc)
        .order_by(SortKey::Column(Column::Director), Direction::Asc);

        let result = store.query(&q)?;
        assert_eq!(result.columns, ["director", "avg_rating"]);
        let directors: Vec<&str> = result.column(0).filter_map(Value::as_str).collect();
        assert_eq!(directors, ["Anderson", "Bigelow", "Nolan"]);
        Ok(())
    }

    #[test]
    fn equality_filter_and_limit() -> anyhow::Result<()> {
        let store = store_with(vec![
            movie("A", "Drama", 8.0, None),
            movie("B", "Comedy", 6.0, None),
            movie("C", "Drama", 7.0, None),
        ]);
        let q = Query::select(vec![Projection::Column(Column::Title)])
            .filter_eq(Column::Genre, "Drama")
            .order_by(SortKey::Column(Column::Rating), Direction::Asc)
            .limit(1);
        let result = store.query(&q)?;
        assert_eq!(result.rows, vec![vec![Value::from("C")]]);
        Ok(())
    }

    #[test]
    fn rebuild_replaces_previous_contents() -> anyhow::Result<()> {
        let mut store = store_with(vec![movie("Old", "Drama", 5.0, None)]);
        let (fresh, _) = clean(Table::new(vec![movie("New", "Drama", 9.0, None)]));
        store.rebuild(&fresh)?;

        let result = store.query(&Query::select(vec![Projection::Column(Column::Title)]))?;
        assert_eq!(result.rows, vec![vec![Value::from("New")]]);
        Ok(())
    }

    #[test]
    fn null_descriptive_columns_come_back_as_null() -> anyhow::Result<()> {
        let store = store_with(vec![movie("A", "Drama", 8.0, None)]);
        let result = store.query(&Query::select(vec![Projection::Column(Column::Director)]))?;
        assert_eq!(result.rows, vec![vec![Value::Null]]);
        Ok(())
    }

    #[test]
    fn malformed_descriptors_are_rejected() {
        let bare_column = Query::select(vec![
            Projection::Column(Column::Title),
            Projection::Count { alias: "n" },
        ])
        .group_by(Column::Genre);
        let unknown_alias = Query::select(vec![Projection::Column(Column::Title)])
            .order_by(SortKey::Alias("missing"), Direction::Desc);
        let empty = Query::select(Vec::new());

        for q in [bare_column, unknown_alias, empty] {
            assert!(matches!(q.to_sql(), Err(StoreError::MalformedQuery(_))), "{q:?}");
        }
    }

    #[test]
    fn renders_sql() -> anyhow::Result<()> {
        let q = Query::select(vec![
            Projection::Column(Column::Language),
            Projection::Count { alias: "count" },
        ])
        .group_by(Column::Language)
        .order_by(SortKey::Alias("count"), Direction::Desc)
        .limit(5);
        assert_eq!(
            q.to_sql()?,
            "SELECT language, COUNT(*) AS count FROM movies GROUP BY language ORDER BY count DESC LIMIT 5"
        );
        Ok(())
    }

    #[test]
    fn close_releases_the_handle() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("imdb.db");
        let mut store = Store::open(&path)?;
        store.rebuild(&CleanTable::default())?;
        store.close()?;
        assert!(path.exists());
        Ok(())
    }
}
