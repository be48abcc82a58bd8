use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::offer::FlightOffer;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub outbound_date: NaiveDate,
    pub return_dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outbound: Vec<FlightOffer>,
    pub returns: Vec<FlightOffer>,
}
