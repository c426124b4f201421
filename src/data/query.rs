//! Deferred record queries
//!
//! A `RecordQuery` is only SQL text plus its key. Building one never
//! touches the store; it runs each time `all`, `one`, `count` or `exists`
//! is called against a pool or transaction.

use std::fmt;
use std::marker::PhantomData;
use std::time::Instant;

use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, FromRow, QueryBuilder, Sqlite};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    /// No key is bound
    Unkeyed,
    Key(i64),
    /// The linking column is NULL, so nothing can match
    Missing,
}

/// Lazy, re-executable query returning rows of `T`
pub struct RecordQuery<T> {
    table: &'static str,
    select: &'static str,
    /// Text around the bound key, e.g. `("tag.id = ", "")`
    condition: Option<(&'static str, &'static str)>,
    link: Link,
    order_by: Option<&'static str>,
    limit: Option<i64>,
    _row: PhantomData<fn() -> T>,
}

impl<T> RecordQuery<T> {
    /// Query filtered by `key`; a `None` key matches nothing
    pub(crate) fn keyed(
        table: &'static str,
        select: &'static str,
        condition: (&'static str, &'static str),
        key: Option<i64>,
    ) -> Self {
        Self {
            table,
            select,
            condition: Some(condition),
            link: key.map_or(Link::Missing, Link::Key),
            order_by: None,
            limit: None,
            _row: PhantomData,
        }
    }

    /// Query with a fixed (or no) condition
    pub(crate) fn unkeyed(
        table: &'static str,
        select: &'static str,
        condition: Option<&'static str>,
    ) -> Self {
        Self {
            table,
            select,
            condition: condition.map(|c| (c, "")),
            link: Link::Unkeyed,
            order_by: None,
            limit: None,
            _row: PhantomData,
        }
    }

    pub fn order_by(mut self, clause: &'static str) -> Self {
        self.order_by = Some(clause);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Table the rows come from
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Rendered SQL, `?` standing for the bound key
    pub fn sql(&self) -> String {
        self.builder(self.limit).sql().to_string()
    }

    fn builder(&self, limit: Option<i64>) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(self.select);
        if let Some((prefix, suffix)) = self.condition {
            builder.push(" WHERE ");
            builder.push(prefix);
            if let Link::Key(key) = self.link {
                builder.push_bind(key);
            }
            builder.push(suffix);
        }
        if let Some(order_by) = self.order_by {
            builder.push(" ORDER BY ");
            builder.push(order_by);
        }
        if let Some(limit) = limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }
        builder
    }

    fn observe(&self, operation: &str, started: Instant) {
        crate::metrics::observe_db_query(operation, self.table, started.elapsed());
    }

    /// Number of rows the query yields
    pub async fn count<'c, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        if self.link == Link::Missing {
            return Ok(0);
        }

        let started = Instant::now();
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM (");
        builder.push(self.select);
        if let Some((prefix, suffix)) = self.condition {
            builder.push(" WHERE ");
            builder.push(prefix);
            if let Link::Key(key) = self.link {
                builder.push_bind(key);
            }
            builder.push(suffix);
        }
        if let Some(limit) = self.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }
        builder.push(")");

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(executor)
            .await?;
        self.observe("count", started);
        Ok(count)
    }

    pub async fn exists<'c, E>(&self, executor: E) -> Result<bool, AppError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        Ok(self.count(executor).await? > 0)
    }
}

impl<T> RecordQuery<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    /// Every matching row
    pub async fn all<'c, E>(&self, executor: E) -> Result<Vec<T>, AppError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        if self.link == Link::Missing {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let mut builder = self.builder(self.limit);
        let rows = builder.build_query_as::<T>().fetch_all(executor).await?;
        self.observe("select", started);
        Ok(rows)
    }

    /// First matching row, if any
    pub async fn one<'c, E>(&self, executor: E) -> Result<Option<T>, AppError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        if self.link == Link::Missing {
            return Ok(None);
        }

        let started = Instant::now();
        let mut builder = self.builder(Some(1));
        let row = builder
            .build_query_as::<T>()
            .fetch_optional(executor)
            .await?;
        self.observe("select", started);
        Ok(row)
    }
}

impl<T> Clone for RecordQuery<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            select: self.select,
            condition: self.condition,
            link: self.link,
            order_by: self.order_by,
            limit: self.limit,
            _row: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RecordQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordQuery")
            .field("sql", &self.sql())
            .field("link", &self.link)
            .finish()
    }
}
