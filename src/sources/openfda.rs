use std::borrow::Cow;

use serde::Deserialize;

use crate::error::SponsorMatchError;
use crate::sources::{env_base, env_value, fetch_json, shared_client};

const OPENFDA_BASE: &str = "https://api.fda.gov";
const OPENFDA_API: &str = "openfda";
const OPENFDA_BASE_ENV: &str = "SPONSOR_MATCH_OPENFDA_BASE";
const OPENFDA_API_KEY_ENV: &str = "OPENFDA_API_KEY";
const DRUGSFDA_PATH: &str = "drug/drugsfda.json";
const MAX_QUERY_LEN: usize = 1024;
pub(crate) const DRUGSFDA_MAX_LIMIT: usize = 100;

/// Client for the openFDA Drugs@FDA endpoint.
pub struct OpenFdaClient {
    client: reqwest::Client,
    base: Cow<'static, str>,
    api_key: Option<String>,
}

impl OpenFdaClient {
    /// Reads the base URL and API key from the environment.
    pub fn new() -> Result<Self, SponsorMatchError> {
        Ok(Self {
            client: shared_client()?,
            base: env_base(OPENFDA_BASE, OPENFDA_BASE_ENV),
            api_key: env_value(OPENFDA_API_KEY_ENV),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(
        base: String,
        api_key: Option<String>,
    ) -> Result<Self, SponsorMatchError> {
        Ok(Self {
            client: shared_client()?,
            base: Cow::Owned(base),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// Lucene query matching a term against sponsor, brand and generic names.
    pub fn sponsor_query(term: &str) -> String {
        let escaped = crate::utils::query::escape_lucene_value(term.trim());
        ["sponsor_name", "openfda.brand_name", "openfda.generic_name"]
            .iter()
            .map(|field| format!("{field}:\"{escaped}\""))
            .collect::<Vec<_>>()
            .join(" OR ")
    }

    /// One page of Drugs@FDA applications; `None` when nothing matches.
    pub async fn drugsfda_search(
        &self,
        query: &str,
        limit: usize,
        skip: usize,
    ) -> Result<Option<OpenFdaResponse<DrugsFdaResult>>, SponsorMatchError> {
        let query = query.trim();
        check_search(query, limit)?;

        let url = format!("{}/{DRUGSFDA_PATH}", self.base.trim_end_matches('/'));
        let mut params = vec![
            ("search", query.to_string()),
            ("limit", limit.to_string()),
            ("skip", skip.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.trim().to_string()));
        }

        fetch_json(self.client.get(url).query(&params), OPENFDA_API).await
    }
}

fn check_search(query: &str, limit: usize) -> Result<(), SponsorMatchError> {
    let problem = if query.is_empty() {
        "Query is required. Example: sponsor-match fetch pembrolizumab".to_string()
    } else if query.len() > MAX_QUERY_LEN {
        format!("Query is too long (max {MAX_QUERY_LEN} bytes).")
    } else if !(1..=DRUGSFDA_MAX_LIMIT).contains(&limit) {
        format!("--limit must be between 1 and {DRUGSFDA_MAX_LIMIT}")
    } else {
        return Ok(());
    };
    Err(SponsorMatchError::InvalidArgument(problem))
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenFdaResponse<T> {
    #[serde(default)]
    pub meta: Option<OpenFdaMeta>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenFdaMeta {
    #[serde(default)]
    pub results: Option<OpenFdaMetaResults>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenFdaMetaResults {
    #[serde(default)]
    pub total: usize,
}

impl<T> OpenFdaResponse<T> {
    pub fn total(&self) -> Option<usize> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.results.as_ref())
            .map(|results| results.total)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrugsFdaResult {
    #[serde(default)]
    pub application_number: Option<String>,
    #[serde(default)]
    pub sponsor_name: Option<String>,
    #[serde(default)]
    pub products: Vec<DrugsFdaProduct>,
    #[serde(default)]
    pub openfda: Option<DrugsFdaOpenFda>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrugsFdaProduct {
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub dosage_form: Option<String>,
    #[serde(default)]
    pub marketing_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrugsFdaOpenFda {
    #[serde(default)]
    pub brand_name: Vec<String>,
    #[serde(default)]
    pub generic_name: Vec<String>,
    #[serde(default)]
    pub manufacturer_name: Vec<String>,
}
