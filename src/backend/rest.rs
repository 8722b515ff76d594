//! Data API requests.
//!
//! [`Query`] builds PostgREST URLs (`select`, `eq`, `or`, `order`);
//! [`RestClient`] sends them with the right headers and maps error bodies
//! into [`StoreError`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{transport_error, ApiContext};
use crate::error::{QuireResult, StoreError};
use crate::traits::{Headers, Response};

/// Asks the data API for a single JSON object instead of an array.
pub(crate) const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Asks the data API to return written rows.
const RETURN_REPRESENTATION: &str = "return=representation";

/// A table query: the table name plus ordered URL parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            params: Vec::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Columns to return, including embedded joins like `users(name)`.
    pub fn select(mut self, columns: &str) -> Self {
        let columns: String = columns.chars().filter(|c| !c.is_whitespace()).collect();
        self.params.push(("select".to_string(), columns));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Match any of several `column.op.value` filters.
    pub fn or(mut self, filters: &[String]) -> Self {
        self.params
            .push(("or".to_string(), format!("({})", filters.join(","))));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Full URL under `base` (the `/rest/v1` root).
    pub fn to_url(&self, base: &str) -> String {
        let mut url = format!("{}/{}", base.trim_end_matches('/'), self.table);
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

/// Case-insensitive pattern filter, quoted so user text cannot break the
/// surrounding `or=(...)` list.
pub fn ilike_filter(column: &str, needle: &str) -> String {
    let escaped = needle.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{}.ilike.\"*{}*\"", column, escaped)
}

/// Sends queries to the data API.
#[derive(Clone)]
pub struct RestClient {
    ctx: ApiContext,
}

impl RestClient {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ApiContext {
        &self.ctx
    }

    fn url(&self, query: &Query) -> String {
        query.to_url(&self.ctx.config().rest_url())
    }

    fn single_headers(&self, write: bool) -> Headers {
        let mut headers = self.ctx.headers();
        headers.insert("Accept".to_string(), SINGLE_OBJECT.to_string());
        if write {
            headers.insert("Prefer".to_string(), RETURN_REPRESENTATION.to_string());
        }
        headers
    }

    fn check(table: &str, response: Response) -> QuireResult<Response> {
        if response.is_success() {
            Ok(response)
        } else {
            let err = StoreError::from_response(table, response.status, &response.text_lossy());
            if err.is_not_found() {
                tracing::debug!(table, "No matching row");
            } else {
                tracing::warn!(table, status = response.status, "Store rejected request: {}", err);
            }
            Err(err.into())
        }
    }

    /// Rows matching `query`.
    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> QuireResult<Vec<T>> {
        let url = self.url(query);
        tracing::debug!(table = query.table_name(), "GET {}", url);
        let response = self
            .ctx
            .http()
            .get(&url, &self.ctx.headers())
            .await
            .map_err(|e| transport_error(e, &url))?;
        Ok(Self::check(query.table_name(), response)?.json()?)
    }

    /// Exactly one row; zero rows is `StoreError::NotFound`.
    pub async fn select_single<T: DeserializeOwned>(&self, query: &Query) -> QuireResult<T> {
        let url = self.url(query);
        tracing::debug!(table = query.table_name(), "GET single {}", url);
        let response = self
            .ctx
            .http()
            .get(&url, &self.single_headers(false))
            .await
            .map_err(|e| transport_error(e, &url))?;
        Ok(Self::check(query.table_name(), response)?.json()?)
    }

    /// At most one row.
    pub async fn select_optional<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> QuireResult<Option<T>> {
        let rows: Vec<T> = self.select(query).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row and return it as stored.
    pub async fn insert_single<T, B>(&self, table: &str, row: &B) -> QuireResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let query = Query::table(table).select("*");
        let url = self.url(&query);
        let body = serde_json::to_string(&[row])?;
        tracing::debug!(table, "POST {}", url);
        let response = self
            .ctx
            .http()
            .post(&url, &body, &self.single_headers(true))
            .await
            .map_err(|e| transport_error(e, &url))?;
        Ok(Self::check(table, response)?.json()?)
    }

    /// Update the single row matched by `query` and return it.
    pub async fn update_single<T, B>(&self, query: &Query, changes: &B) -> QuireResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let query = query.clone().select("*");
        let url = self.url(&query);
        let body = serde_json::to_string(changes)?;
        tracing::debug!(table = query.table_name(), "PATCH {}", url);
        let response = self
            .ctx
            .http()
            .patch(&url, &body, &self.single_headers(true))
            .await
            .map_err(|e| transport_error(e, &url))?;
        Ok(Self::check(query.table_name(), response)?.json()?)
    }

    /// Delete every row matched by `query`.
    pub async fn delete(&self, query: &Query) -> QuireResult<()> {
        let url = self.url(query);
        tracing::debug!(table = query.table_name(), "DELETE {}", url);
        let response = self
            .ctx
            .http()
            .delete(&url, &self.ctx.headers())
            .await
            .map_err(|e| transport_error(e, &url))?;
        Self::check(query.table_name(), response)?;
        Ok(())
    }
}
