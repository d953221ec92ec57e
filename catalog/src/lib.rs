//! # Recipe Catalog
//!
//! Client for the Spoonacular recipe catalog. All reads, no writes.
//!
//!
//!
//! ## Endpoints
//! - `GET /recipes/complexSearch?apiKey&offset&number[&sort][&query]`: one page of
//!   recipe summaries plus the total match count.
//! - `GET /recipes/{id}/information?apiKey&includeNutrition=false`: one full recipe
//!   record.
//! - `GET /recipes/informationBulk?apiKey&ids=...`: full records for a comma-joined
//!   id list, used to resolve bookmarked recipes in one round trip.
//!
//!
//!
//! ## Credential
//! The API key travels as a query parameter on every call. It is read once from the
//! environment at startup and may be absent; calls made without it fail before any
//! network I/O so the caller gets a stable, user-facing message instead of a
//! transport error.
//!
//!
//!
//! ## Failure Classification
//! Spoonacular signals credential problems with 401 and plan/billing exhaustion
//! with 402. Both get fixed messages. Everything else surfaces the underlying
//! transport error text.

use reqwest::Response;

pub mod error;
pub mod models;

use error::CatalogError;
use models::{RecipeDetail, SearchPage};

pub const BASE_URL: &str = "https://api.spoonacular.com";

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl Client {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    fn key(&self) -> Result<&str, CatalogError> {
        self.api_key.as_deref().ok_or(CatalogError::MissingApiKey)
    }

    /// One page of search results. Empty `query` and `sort: None` are omitted from
    /// the request rather than sent as empty parameters.
    pub async fn search(
        &self,
        query: &str,
        sort: Option<&str>,
        offset: u32,
        number: u32,
    ) -> Result<SearchPage, CatalogError> {
        let key = self.key()?;

        let mut params = vec![
            ("apiKey", key.to_string()),
            ("offset", offset.to_string()),
            ("number", number.to_string()),
        ];
        if let Some(sort) = sort {
            params.push(("sort", sort.to_string()));
        }
        if !query.is_empty() {
            params.push(("query", query.to_string()));
        }

        let response = self
            .http
            .get(format!("{}/recipes/complexSearch", self.base_url))
            .query(&params)
            .send()
            .await?;

        #[cfg(feature = "verbose")]
        println!("Status: {}\n", response.status());

        Ok(classify(response)?.json().await?)
    }

    pub async fn information(&self, id: u64) -> Result<RecipeDetail, CatalogError> {
        let key = self.key()?;

        let response = self
            .http
            .get(format!("{}/recipes/{id}/information", self.base_url))
            .query(&[("apiKey", key), ("includeNutrition", "false")])
            .send()
            .await?;

        Ok(classify(response)?.json().await?)
    }

    pub async fn information_bulk(&self, ids: &[u64]) -> Result<Vec<RecipeDetail>, CatalogError> {
        let key = self.key()?;

        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .http
            .get(format!("{}/recipes/informationBulk", self.base_url))
            .query(&[("apiKey", key), ("ids", joined.as_str())])
            .send()
            .await?;

        Ok(classify(response)?.json().await?)
    }
}

fn classify(response: Response) -> Result<Response, CatalogError> {
    if let Some(err) = CatalogError::for_status(response.status()) {
        return Err(err);
    }

    Ok(response.error_for_status()?)
}
