use crate::models::job::JobRecord;
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Filters accepted by the job search, already reduced to the upstream
/// provider's vocabulary (`what`/`where`). Unset filters are omitted from
/// the outbound query entirely; the provider treats an empty string as a
/// real filter value.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub what: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<u32>,
    pub results_per_page: u32,
    pub page: u32,
    pub sort_by: Option<String>,
    pub full_time: Option<String>,
    pub permanent: Option<String>,
}

impl JobQuery {
    pub fn new() -> Self {
        JobQuery {
            results_per_page: 20,
            page: 1,
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobSearchError {
    #[error("Job search credentials are not configured")]
    MissingCredentials,
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

// Raw upstream shapes; everything is optional because the provider omits
// fields freely.
#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    results: Vec<RawJob>,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    id: Option<serde_json::Value>,
    title: Option<String>,
    company: Option<RawDisplayName>,
    location: Option<RawDisplayName>,
    category: Option<RawCategory>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    created: Option<String>,
    redirect_url: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDisplayName {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    label: Option<String>,
}

/// Thin adapter over the external job-search API (Adzuna query vocabulary).
///
/// One attempt per search, no retries; upstream failures surface as typed
/// errors and the caller decides what to tell the user.
#[derive(Clone)]
pub struct JobSearchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    app_id: Option<String>,
    app_key: Option<String>,
}

impl JobSearchClient {
    pub fn from_env() -> Self {
        Self::with_config(
            env::var("ADZUNA_APP_URL").ok(),
            env::var("ADZUNA_APP_ID").ok(),
            env::var("ADZUNA_APP_KEY").ok(),
        )
    }

    pub fn with_config(
        base_url: Option<String>,
        app_id: Option<String>,
        app_key: Option<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url,
            app_id,
            app_key,
        }
    }

    pub async fn search(&self, query: &JobQuery) -> Result<Vec<JobRecord>, JobSearchError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(JobSearchError::MissingCredentials)?;
        let app_id = self
            .app_id
            .as_deref()
            .ok_or(JobSearchError::MissingCredentials)?;
        let app_key = self
            .app_key
            .as_deref()
            .ok_or(JobSearchError::MissingCredentials)?;

        let mut params = vec![
            ("app_id".to_string(), app_id.to_string()),
            ("app_key".to_string(), app_key.to_string()),
            ("content-type".to_string(), "application/json".to_string()),
        ];
        params.extend(filter_params(query));

        let url = format!("{}/us/search/{}", base_url.trim_end_matches('/'), query.page);

        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Job search upstream returned {}", status);
            return Err(JobSearchError::UpstreamStatus(status.as_u16()));
        }

        let raw: RawSearchResponse = response
            .json()
            .await
            .map_err(|e| JobSearchError::MalformedResponse(e.to_string()))?;

        Ok(raw.results.into_iter().map(normalize_job).collect())
    }
}

/// The filter portion of the outbound query. Split out from `search` so the
/// omit-unset-filters contract is testable without a network.
pub fn filter_params(query: &JobQuery) -> Vec<(String, String)> {
    let mut params = vec![(
        "results_per_page".to_string(),
        query.results_per_page.to_string(),
    )];

    if let Some(what) = query.what.as_deref().filter(|s| !s.is_empty()) {
        params.push(("what".to_string(), what.to_string()));
    }
    if let Some(location) = query.location.as_deref().filter(|s| !s.is_empty()) {
        params.push(("where".to_string(), location.to_string()));
    }
    if let Some(salary_min) = query.salary_min {
        params.push(("salary_min".to_string(), salary_min.to_string()));
    }
    if let Some(sort_by) = query.sort_by.as_deref().filter(|s| !s.is_empty()) {
        params.push(("sort_by".to_string(), sort_by.to_string()));
    }
    if let Some(full_time) = query.full_time.as_deref().filter(|s| !s.is_empty()) {
        params.push(("full_time".to_string(), full_time.to_string()));
    }
    if let Some(permanent) = query.permanent.as_deref().filter(|s| !s.is_empty()) {
        params.push(("permanent".to_string(), permanent.to_string()));
    }

    params
}

fn normalize_job(raw: RawJob) -> JobRecord {
    JobRecord {
        id: raw
            .id
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        company_name: raw
            .company
            .and_then(|c| c.display_name)
            .unwrap_or_default(),
        location: raw
            .location
            .and_then(|l| l.display_name)
            .unwrap_or_default(),
        category: raw.category.and_then(|c| c.label).unwrap_or_default(),
        salary_range: format_salary_range(raw.salary_min, raw.salary_max),
        created_at: raw.created,
        redirect_url: raw.redirect_url,
        description: raw.description.unwrap_or_default(),
    }
}

fn format_salary_range(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("${} - ${}", min, max)),
        (Some(min), None) => Some(format!("${}", min)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_are_omitted_from_the_query() {
        let query = JobQuery::new();
        let params = filter_params(&query);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["results_per_page"]);
    }

    #[test]
    fn set_filters_are_mapped_to_the_upstream_vocabulary() {
        let query = JobQuery {
            what: Some("software engineer".to_string()),
            location: Some("New York".to_string()),
            salary_min: Some(50000),
            results_per_page: 10,
            page: 1,
            ..Default::default()
        };
        let params = filter_params(&query);

        assert!(params.contains(&("what".to_string(), "software engineer".to_string())));
        assert!(params.contains(&("where".to_string(), "New York".to_string())));
        assert!(params.contains(&("salary_min".to_string(), "50000".to_string())));
    }

    #[test]
    fn empty_strings_never_reach_the_query() {
        let query = JobQuery {
            what: Some(String::new()),
            location: Some(String::new()),
            results_per_page: 20,
            page: 1,
            ..Default::default()
        };
        let params = filter_params(&query);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();

        assert!(!keys.contains(&"what"));
        assert!(!keys.contains(&"where"));
    }

    #[test]
    fn salary_range_formats_both_bounds() {
        assert_eq!(
            format_salary_range(Some(50000.0), Some(80000.0)),
            Some("$50000 - $80000".to_string())
        );
        assert_eq!(
            format_salary_range(Some(50000.0), None),
            Some("$50000".to_string())
        );
        assert_eq!(format_salary_range(None, Some(80000.0)), None);
        assert_eq!(format_salary_range(None, None), None);
    }

    #[test]
    fn missing_credentials_is_a_typed_error() {
        let client = JobSearchClient::with_config(None, None, None);
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let result = runtime.block_on(client.search(&JobQuery::new()));
        assert!(matches!(result, Err(JobSearchError::MissingCredentials)));
    }
}
