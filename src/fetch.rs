//! Blocking HTTP fetching using ureq
//!
//! One agent is built per run and shared by catalog and image requests.
//! No retries: a failed request surfaces as a [`ScrapeError`] and the
//! caller decides what to do with it.

use ureq::Agent;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;

/// Build the agent used for the whole run.
pub fn build_agent(config: &ScrapeConfig) -> Agent {
    Agent::new_with_config(
        Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build(),
    )
}

/// GET a catalog page and return the body as text on any 2xx status.
pub fn fetch_page(agent: &Agent, url: &str, config: &ScrapeConfig) -> Result<String, ScrapeError> {
    let response = get_checked(agent, url, config)?;
    response
        .into_body()
        .read_to_string()
        .map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source: Box::new(source),
        })
}

/// GET an image URL and return the raw bytes on any 2xx status.
pub fn fetch_bytes(agent: &Agent, url: &str, config: &ScrapeConfig) -> Result<Vec<u8>, ScrapeError> {
    let response = get_checked(agent, url, config)?;
    response
        .into_body()
        .read_to_vec()
        .map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source: Box::new(source),
        })
}

fn get_checked(
    agent: &Agent,
    url: &str,
    config: &ScrapeConfig,
) -> Result<ureq::http::Response<ureq::Body>, ScrapeError> {
    let mut request = agent.get(url);
    for (name, value) in &config.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    match request.call() {
        Ok(response) if response.status().is_success() => Ok(response),
        Ok(response) => Err(ScrapeError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        }),
        // ureq reports 4xx/5xx as errors under its default configuration
        Err(ureq::Error::StatusCode(status)) => Err(ScrapeError::HttpStatus {
            status,
            url: url.to_string(),
        }),
        Err(source) => Err(ScrapeError::Http {
            url: url.to_string(),
            source: Box::new(source),
        }),
    }
}
