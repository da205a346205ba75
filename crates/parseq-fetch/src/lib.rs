//! Accession resolution: classify a bare registry identifier as NCBI or
//! iGEM, fetch the record with one blocking GET, and hand the body to the
//! normalization pipeline. Classification is pure so it can be tested
//! without touching the network.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use parseq_core::Seq;
use parseq_formats::{parse, ParseError, ParseOptions};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {accession} to {url} failed: {source}")]
    Request {
        accession: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request for {accession} to {url} returned status {status}")]
    Status {
        accession: String,
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("empty response body for {accession} from {url}")]
    EmptyBody { accession: String, url: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Which registry an accession belongs to. BioBrick identifiers carry the
/// `BB` prefix; everything else defaults to NCBI nucleotide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    Ncbi,
    Igem,
}

impl Registry {
    pub fn classify(accession: &str) -> Registry {
        if accession.starts_with("BB") {
            Registry::Igem
        } else {
            Registry::Ncbi
        }
    }
}

/// Whether a token is plausibly an accession rather than file content: a
/// `BB`-prefixed part id, or a short registry-shaped identifier.
pub fn is_accession(token: &str) -> bool {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| Regex::new(r"(?i)^[a-z0-9_\-.]+$").expect("valid pattern"));
    token.starts_with("BB") || (token.len() < 14 && shape.is_match(token))
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub ncbi_endpoint: String,
    pub igem_endpoint: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ncbi_endpoint:
                "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi?db=nuccore&rettype=gbwithparts&retmode=text&id="
                    .to_string(),
            igem_endpoint: "https://parts.igem.org/cgi/xml/part.cgi?part=".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetchConfig {
    pub fn url_for(&self, accession: &str) -> String {
        let endpoint = match Registry::classify(accession) {
            Registry::Igem => &self.igem_endpoint,
            Registry::Ncbi => &self.ncbi_endpoint,
        };
        format!("{endpoint}{accession}")
    }
}

/// Resolve an accession against the default endpoints.
pub fn fetch(accession: &str) -> Result<Vec<Seq>, FetchError> {
    fetch_with_config(accession, &FetchConfig::default())
}

pub fn fetch_with_config(accession: &str, config: &FetchConfig) -> Result<Vec<Seq>, FetchError> {
    let url = config.url_for(accession);
    debug!(%accession, %url, "fetching accession");

    let request_error = |url: &str, source: reqwest::Error| FetchError::Request {
        accession: accession.to_string(),
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| request_error(&url, e))?;
    let response = client.get(&url).send().map_err(|e| request_error(&url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            accession: accession.to_string(),
            url,
            status,
        });
    }
    let body = response.text().map_err(|e| request_error(&url, e))?;
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody {
            accession: accession.to_string(),
            url,
        });
    }

    debug!(%accession, bytes = body.len(), "parsing fetched body");
    Ok(parse(&body, &ParseOptions::with_file_name(accession))?)
}
