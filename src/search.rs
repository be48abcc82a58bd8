use anyhow::Result;
use chrono::NaiveDate;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::ProviderConfig;
use crate::offer::FlightOffer;
use crate::provider::{NO_DATA_CODE, ProviderClient, ProviderError, RATE_LIMIT_CODE};

pub const PARIS_AIRPORTS: [&str; 2] = ["CDG", "ORY"];
pub const ISTANBUL_AIRPORTS: [&str; 2] = ["IST", "SAW"];

/// Pause before every provider call. The provider caps us at roughly 10
/// requests/second; 120ms of open-loop pacing keeps one search under that.
const PACING_DELAY: Duration = Duration::from_millis(120);
/// Backoff before the single retry after a rate-limit rejection.
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(1);
const MAX_ATTEMPTS: u32 = 2;

/// Searches the fixed Paris/Istanbul airport cross product against the
/// provider, one paced call per pair.
///
/// The pacing is per `SearchClient` call chain only. Concurrent searches
/// (one request's outbound plus its return dates, or several requests) each
/// pace themselves independently, so the aggregate call rate can exceed the
/// single-chain target. Accepted imprecision.
pub struct SearchClient {
    provider: ProviderClient,
}

impl SearchClient {
    pub fn new(config: ProviderConfig) -> SearchClient {
        SearchClient {
            provider: ProviderClient::new(config),
        }
    }

    /// One paced provider lookup for a single origin/destination/date.
    ///
    /// Provider-level errors never surface here: rate limiting gets one
    /// retry and then, like every other provider error, degrades to an
    /// empty list so one bad pair cannot sink the whole fan-out. Transport
    /// failures and malformed records do propagate.
    pub async fn search_one_pair(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<FlightOffer>> {
        for attempt in 0..MAX_ATTEMPTS {
            sleep(PACING_DELAY).await;
            match self.provider.flight_offers(origin, destination, date).await {
                Ok(records) => {
                    return records
                        .iter()
                        .map(|r| FlightOffer::from_raw(r).map_err(Into::into))
                        .collect();
                }
                Err(ProviderError::Api {
                    code: RATE_LIMIT_CODE,
                    ..
                }) if attempt == 0 => {
                    sleep(RATE_LIMIT_BACKOFF).await;
                }
                Err(ProviderError::Api {
                    code: NO_DATA_CODE, ..
                }) => {
                    // Routine "nothing flies that day", not worth a warning.
                    return Ok(Vec::new());
                }
                Err(ProviderError::Api { code, detail }) => {
                    log::warn!("provider {origin}->{destination} {date}: [{code}] {detail}");
                    return Ok(Vec::new());
                }
                Err(other) => return Err(other.into()),
            }
        }
        // Not reached: the second attempt always returns from the match.
        Ok(Vec::new())
    }

    /// All Paris -> Istanbul pairs for a given date, in group order.
    pub async fn search_outbound(&self, depart_date: NaiveDate) -> Result<Vec<FlightOffer>> {
        self.search_pairs(&PARIS_AIRPORTS, &ISTANBUL_AIRPORTS, depart_date)
            .await
    }

    /// All Istanbul -> Paris pairs for a given date, in group order.
    pub async fn search_return(&self, return_date: NaiveDate) -> Result<Vec<FlightOffer>> {
        self.search_pairs(&ISTANBUL_AIRPORTS, &PARIS_AIRPORTS, return_date)
            .await
    }

    // Sequential on purpose: the pairs share one rate budget.
    async fn search_pairs(
        &self,
        origins: &[&str],
        destinations: &[&str],
        date: NaiveDate,
    ) -> Result<Vec<FlightOffer>> {
        let mut results = Vec::new();
        for origin in origins {
            for destination in destinations {
                results.extend(self.search_one_pair(origin, destination, date).await?);
            }
        }
        Ok(results)
    }
}
