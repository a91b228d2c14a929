//! Synchronous client for the well-construction JSON service.
//!
//! The service speaks an ad hoc contract: a successful response is the
//! [`WellReport`](crate::models::WellReport) payload, an unsuccessful one is
//! `{"message": "..."}` with HTTP 200. Both are handled here; callers get a
//! typed [`ServiceError`] for the latter.
//!
//! ### Notes
//! - Site numbers are validated before any request goes out (15 digits).
//! - Transient failures (5xx / network errors) are retried with a short
//!   fixed backoff ladder.
//! - An optional cooperator lithology endpoint supplies `gw_geoh` records
//!   when the state database has better logs than NWIS.

use crate::models::{LithologyRecord, WellReport};
use anyhow::{Context, Result, bail};
use log::{info, warn};
use percent_encoding::AsciiSet;
use regex::Regex;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Errors carried in an otherwise-successful service response.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service's ad hoc `{"message": "..."}` payload (unknown site,
    /// missing data files, and similar).
    #[error("service reported: {0}")]
    Message(String),
}

static SITE_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{15}$").expect("site number pattern"));
static COOP_SITE_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]{0,19}$").expect("coop site pattern"));

/// A NWIS site number is exactly 15 digits (example `433152121281301`).
pub fn is_valid_site_no(site_no: &str) -> bool {
    SITE_NO_RE.is_match(site_no)
}

/// Cooperator well log ids are short alphanumeric strings, spaces allowed
/// (example `HARN  1841`).
pub fn is_valid_coop_site_no(coop_site_no: &str) -> bool {
    COOP_SITE_NO_RE.is_match(coop_site_no)
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    pub lithology_base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("wellbore_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://or.water.usgs.gov/cgi-bin/well_construction".into(),
            lithology_base_url: "https://apps.wrd.state.or.us/apps/gw/gw_data_rws/api".into(),
            http,
        }
    }
}

impl Client {
    /// Fetch the well-construction report for one NWIS site.
    ///
    /// ### Errors
    /// - invalid site number (no request is made)
    /// - network/HTTP error after retries
    /// - JSON decoding error
    /// - service-level `{"message"}` payload, surfaced as [`ServiceError`]
    pub fn fetch_well_construction(&self, site_no: &str) -> Result<WellReport> {
        if !is_valid_site_no(site_no) {
            bail!(
                "need a NWIS USGS site number, which is a number consisting of 15 digits \
                 (example 433152121281301); got {:?}",
                site_no
            );
        }

        let url = format!(
            "{}/requestWellConstruction.py?site_no={}",
            self.base_url,
            enc(site_no)
        );
        info!("requesting well construction for site {}", site_no);
        let v = self.get_json(&url).with_context(|| format!("GET {}", url))?;

        // Error payloads come back with HTTP 200; sniff before decoding.
        if let Some(message) = v.get("message").and_then(Value::as_str) {
            return Err(ServiceError::Message(message.to_string()).into());
        }

        serde_json::from_value(v).context("parse well construction payload")
    }

    /// Fetch cooperator lithology records for a state well log id.
    ///
    /// The endpoint returns either a bare array of records or an object
    /// wrapping one under `gw_lithology`.
    pub fn fetch_lithology(&self, coop_site_no: &str) -> Result<Vec<LithologyRecord>> {
        if !is_valid_coop_site_no(coop_site_no) {
            bail!("invalid cooperator site id {:?}", coop_site_no);
        }

        let url = format!(
            "{}/{}/gw_lithology/",
            self.lithology_base_url,
            enc(coop_site_no)
        );
        info!("requesting lithology for cooperator site {}", coop_site_no);
        let v = self.get_json(&url).with_context(|| format!("GET {}", url))?;

        if let Some(message) = v.get("message").and_then(Value::as_str) {
            return Err(ServiceError::Message(message.to_string()).into());
        }

        let records = if v.is_array() {
            v
        } else if let Some(inner) = v.get("gw_lithology") {
            inner.clone()
        } else {
            bail!("unexpected response shape: expected an array of lithology records");
        };
        serde_json::from_value(records).context("parse lithology records")
    }

    /// Fetch the report and, when a cooperator id is given, its lithology.
    ///
    /// Cooperator lithology replaces the report's `gw_geoh` when the fetch
    /// succeeds with records; a failed lithology fetch degrades to a warning
    /// and the report renders without it.
    pub fn fetch_report(&self, site_no: &str, coop_site_no: Option<&str>) -> Result<WellReport> {
        let mut report = self.fetch_well_construction(site_no)?;

        if let Some(coop) = coop_site_no {
            match self.fetch_lithology(coop) {
                Ok(records) if !records.is_empty() => {
                    info!("using {} cooperator lithology records", records.len());
                    report.gw_geoh = records;
                }
                Ok(_) => {}
                Err(e) => warn!("lithology fetch for {} failed: {:#}", coop, e),
            }
        }

        Ok(report)
    }

    /// GET with a small retry for transient failures (5xx / network errors).
    fn get_json(&self, url: &str) -> Result<Value> {
        let mut last_err: Option<anyhow::Error> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.json().context("decode json");
                }
                Ok(r) if r.status().is_server_error() => { /* retry */ }
                Ok(r) => bail!("request failed with HTTP {}", r.status()),
                Err(e) => last_err = Some(e.into()),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        bail!("network error: {:?}", last_err);
    }
}

// Allow -, _, . unescaped; everything else percent-encoded (spaces in
// cooperator ids become %20).
const SAFE: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}
