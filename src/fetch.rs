//! Single-shot retrieval of decoded attributes from the vehicle-data service.
//!
//! _Requires Cargo feature `fetch`._
//!
//! [`fetch_into`] drives one complete lookup: build the decode URL for a
//! record, issue one GET, and merge the response body into the record's
//! attribute cache. Each call makes exactly one request and resolves exactly
//! once; there is no retry, no deduplication of concurrent lookups for the
//! same VIN, and no cancellation. Callers must not replace a record's VIN
//! while a lookup keyed to the prior value is in flight, as the result is
//! merged into the record's cache regardless.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::record::VinRecord;
use crate::record::store::DecodeError;

/// Decode endpoint of the NHTSA vehicle-data service.
const DECODE_ENDPOINT: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValuesExtended";

/// Errors occurring while fetching decoded attributes.
#[derive(Debug, Error)]
pub enum Error {
    /// The record's VIN failed verification before a request was made.
    #[error("VIN failed check-digit verification.")]
    Format,
    /// A lookup URL could not be constructed.
    #[error("Could not construct a lookup URL.")]
    InvalidUrl,
    /// The service answered without data and without a transport failure.
    #[error("The decode service returned no data.")]
    NoData,
    /// The response body did not decode.
    #[error("Invalid decode data: {0}")]
    Decode(#[from] DecodeError),
    /// A transport failure from the HTTP client.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Build the decode lookup URL for a record.
///
/// The model year is appended only when one can be derived, letting the
/// service disambiguate year codes shared by two model years.
pub fn decode_url(record: &VinRecord) -> Result<Url, Error> {
    lookup_url(DECODE_ENDPOINT, record)
}

fn lookup_url(endpoint: &str, record: &VinRecord) -> Result<Url, Error> {
    let mut raw = format!("{endpoint}/{}?format=json", record.vin());

    let year = record.model_year();
    if year > 0 {
        raw.push_str(&format!("&modelyear={year}"));
    }

    Url::parse(&raw).map_err(|_| Error::InvalidUrl)
}

/// Single-shot client for the decode service.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(DECODE_ENDPOINT)
    }
}

impl Fetcher {
    /// Client against an alternate decode endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Apply a per-request timeout. Expiry surfaces as [`Error::Transport`].
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Issue one GET for `url`, resolving exactly once.
    ///
    /// A status other than 200 resolves to `Ok(None)` rather than an error;
    /// callers that treat "no data" as a benign no-op rely on this.
    pub async fn fetch(&self, url: Url) -> Result<Option<Vec<u8>>, Error> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if response.status().as_u16() != 200 {
            error!("decode service answered {}", response.status());
            return Ok(None);
        }

        let body = response.bytes().await?;
        Ok(Some(body.to_vec()))
    }
}

/// Fetch decoded attributes for a record and merge them into its cache.
///
/// With `check_validity` set, an invalid VIN fails with [`Error::Format`]
/// before any request is made. The fetcher's no-data resolution is reported
/// as [`Error::NoData`] so this function stays `Result`-shaped. On success
/// the raw response body is returned alongside the merged cache, for callers
/// that persist it.
pub async fn fetch_into(
    fetcher: &Fetcher,
    record: &mut VinRecord,
    check_validity: bool,
) -> Result<Vec<u8>, Error> {
    if check_validity && !record.is_valid() {
        return Err(Error::Format);
    }

    debug!("fetching decode data for VIN {}", record.vin());

    let url = lookup_url(&fetcher.endpoint, record)?;
    let Some(body) = fetcher.fetch(url).await? else {
        return Err(Error::NoData);
    };

    record.merge_decode_result(&body)?;

    Ok(body)
}
