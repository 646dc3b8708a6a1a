use reqwest::Method;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Client;
use crate::error::Error;

/// Accept header that makes PostgREST return exactly one object, erroring
/// (code PGRST116) when zero or more than one row matches.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Clone, Copy)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn suffix(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Builder for one row query or mutation. Filters and ordering accumulate as
/// query parameters; a terminal call sends the request.
pub struct QueryBuilder<'a> {
    client: &'a Client,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(client: &'a Client, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.{}", column, order.suffix())));
        self
    }

    /// Fetch all matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, Error> {
        let resp = self.build(Method::GET).send().await?;
        decode(resp).await
    }

    /// Fetch exactly one row; zero or many matches surface as an API error
    /// carrying [`crate::error::NO_ROWS_CODE`].
    pub async fn single<T: DeserializeOwned>(self) -> Result<T, Error> {
        let resp = self
            .build(Method::GET)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;
        decode(resp).await
    }

    /// Insert the given rows and return the (single) inserted row.
    pub async fn insert<T: DeserializeOwned>(self, rows: &impl Serialize) -> Result<T, Error> {
        let resp = self
            .build(Method::POST)
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(rows)
            .send()
            .await?;
        decode(resp).await
    }

    /// Apply a partial update to the filtered rows and return the refreshed
    /// row. A filter matching nothing surfaces as the no-rows API error.
    pub async fn update<T: DeserializeOwned>(self, changes: &impl Serialize) -> Result<T, Error> {
        let resp = self
            .build(Method::PATCH)
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(changes)
            .send()
            .await?;
        decode(resp).await
    }

    /// Delete the filtered rows. No payload comes back.
    pub async fn delete(self) -> Result<(), Error> {
        let resp = self.build(Method::DELETE).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Error::from_response(resp).await)
        }
    }

    fn build(&self, method: Method) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.client.base_url, self.table);
        self.client.request(method, url).query(&self.params)
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    if resp.status().is_success() {
        Ok(resp.json::<T>().await?)
    } else {
        Err(Error::from_response(resp).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new("http://localhost:54321/", "anon-key").unwrap()
    }

    #[test]
    fn base_url_is_trimmed() {
        assert_eq!(client().base_url(), "http://localhost:54321");
    }

    #[test]
    fn select_eq_order_accumulate_in_call_order() {
        let c = client();
        let query = c
            .from("posts")
            .select("*,author_user:author(id,name,email)")
            .eq("id", "abc")
            .order("created_at", Order::Desc);

        assert_eq!(
            query.params,
            vec![
                (
                    "select".to_string(),
                    "*,author_user:author(id,name,email)".to_string()
                ),
                ("id".to_string(), "eq.abc".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn order_ascending_uses_asc_suffix() {
        let c = client();
        let query = c.from("posts").order("created_at", Order::Asc);
        assert_eq!(query.params[0].1, "created_at.asc");
    }
}
