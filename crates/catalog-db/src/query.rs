//! # Search Query Builder
//!
//! Turns a [`SearchParams`] into one parameterized `SELECT` for a list
//! endpoint.
//!
//! ## Clause Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SELECT <columns> FROM <table>                                          │
//! │    WHERE 1=1                                                            │
//! │    AND price BETWEEN ? AND ?        ← products, min AND max present     │
//! │    AND <text> LIKE ?                ← name param   ('%value%')          │
//! │    AND <text> LIKE ?                ← title param  ('%value%')          │
//! │    ORDER BY created_at DESC         ← no sort                           │
//! │    ORDER BY <text> ASC|DESC         ← sort present                      │
//! │    LIMIT ?                          ← limit present                     │
//! │    OFFSET ?                         ← offset present (needs LIMIT)      │
//! │                                                                         │
//! │  <text> = title (products) | name (categories)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every user value travels as a bound argument. The only caller-influenced
//! SQL text is the sort keyword, which comes from the closed
//! [`SortDirection`](catalog_core::SortDirection) enum.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqliteConnection};

use catalog_core::SearchParams;

// =============================================================================
// Search Target
// =============================================================================

/// Table a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Products,
    Categories,
}

impl SearchTarget {
    /// `SELECT <columns> FROM <table>` with no `WHERE`.
    pub const fn base_select(self) -> &'static str {
        match self {
            SearchTarget::Products => {
                "SELECT id, title, description, price, image, category_id, created_at FROM products"
            }
            SearchTarget::Categories => "SELECT id, name, created_at FROM categories",
        }
    }

    pub const fn table(self) -> &'static str {
        match self {
            SearchTarget::Products => "products",
            SearchTarget::Categories => "categories",
        }
    }

    /// Primary text column, used by the `name`/`title` filters and by sort.
    pub const fn text_column(self) -> &'static str {
        match self {
            SearchTarget::Products => "title",
            SearchTarget::Categories => "name",
        }
    }

    /// Whether the table has a `price` column.
    pub const fn is_priced(self) -> bool {
        matches!(self, SearchTarget::Products)
    }
}

// =============================================================================
// Search Query
// =============================================================================

/// A positional argument for a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArg {
    Int(i64),
    Real(f64),
    Text(String),
}

/// SQL text plus arguments in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub sql: String,
    pub args: Vec<QueryArg>,
}

impl SearchQuery {
    /// Binds every argument and fetches all rows.
    pub async fn fetch_all<O>(&self, conn: &mut SqliteConnection) -> Result<Vec<O>, sqlx::Error>
    where
        O: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, O>(&self.sql);
        for arg in &self.args {
            query = match arg {
                QueryArg::Int(v) => query.bind(*v),
                QueryArg::Real(v) => query.bind(*v),
                QueryArg::Text(v) => query.bind(v.as_str()),
            };
        }
        query.fetch_all(conn).await
    }
}

/// Builds the list query for `target`.
///
/// `params` should already carry defaults (see
/// [`SearchParams::with_defaults`]); absent values simply drop their clause.
pub fn build_search_query(target: SearchTarget, params: &SearchParams) -> SearchQuery {
    let mut sql = String::from(target.base_select());
    let mut args = Vec::new();
    let column = target.text_column();

    sql.push_str(" WHERE 1=1");

    if target.is_priced() {
        if let (Some(min), Some(max)) = (params.min, params.max) {
            sql.push_str(" AND price BETWEEN ? AND ?");
            args.push(QueryArg::Real(min));
            args.push(QueryArg::Real(max));
        }
    }

    for filter in [&params.name, &params.title].into_iter().flatten() {
        sql.push_str(" AND ");
        sql.push_str(column);
        sql.push_str(" LIKE ?");
        args.push(QueryArg::Text(format!("%{filter}%")));
    }

    match params.sort {
        None => sql.push_str(" ORDER BY created_at DESC"),
        Some(direction) => {
            sql.push_str(" ORDER BY ");
            sql.push_str(column);
            sql.push(' ');
            sql.push_str(direction.as_sql());
        }
    }

    if let Some(limit) = params.limit {
        sql.push_str(" LIMIT ?");
        args.push(QueryArg::Int(limit));

        // SQLite only accepts OFFSET after LIMIT
        if let Some(skip) = params.row_skip() {
            sql.push_str(" OFFSET ?");
            args.push(QueryArg::Int(skip));
        }
    }

    SearchQuery { sql, args }
}

// =============================================================================
// Unit Tests
// =============================================================================
