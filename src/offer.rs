use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Raised when a raw provider record is missing the fields the non-stop
/// contract guarantees. Not recovered anywhere; a record like this means the
/// provider broke its response shape.
#[derive(Error, Debug)]
pub enum OfferError {
    #[error("missing field in provider record: {0}")]
    MissingField(&'static str),

    #[error("bad timestamp in provider record at {path}: {value}")]
    BadTimestamp { path: &'static str, value: String },

    #[error("bad price in provider record: {0}")]
    BadPrice(String),
}

/// One non-stop flight, taken from the first segment of the first itinerary
/// of a raw provider record. Serializes to the transport shape the web layer
/// returns verbatim.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FlightOffer {
    pub origin: String,
    pub destination: String,
    pub departure_at: NaiveDateTime,
    pub arrival_at: NaiveDateTime,
    pub carrier: String,
    pub flight_number: String,
    pub duration: String,
    pub price: f64,
    pub currency: String,
}

impl FlightOffer {
    pub fn from_raw(raw: &Value) -> Result<FlightOffer, OfferError> {
        let segment = raw
            .pointer("/itineraries/0/segments/0")
            .ok_or(OfferError::MissingField("itineraries[0].segments[0]"))?;

        Ok(FlightOffer {
            origin: get_str(segment, "/departure/iataCode", "departure.iataCode")?,
            destination: get_str(segment, "/arrival/iataCode", "arrival.iataCode")?,
            departure_at: get_timestamp(segment, "/departure/at", "departure.at")?,
            arrival_at: get_timestamp(segment, "/arrival/at", "arrival.at")?,
            carrier: get_str(segment, "/carrierCode", "carrierCode")?,
            flight_number: get_str(segment, "/number", "number")?,
            // ISO-8601 duration, kept as the provider sent it.
            duration: get_str(segment, "/duration", "duration")?,
            price: parse_price(raw)?,
            currency: raw
                .pointer("/price/currency")
                .and_then(Value::as_str)
                .unwrap_or("EUR")
                .to_string(),
        })
    }
}

fn get_str(value: &Value, pointer: &str, path: &'static str) -> Result<String, OfferError> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(OfferError::MissingField(path))
}

fn get_timestamp(
    value: &Value,
    pointer: &str,
    path: &'static str,
) -> Result<NaiveDateTime, OfferError> {
    let raw = value
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or(OfferError::MissingField(path))?;
    raw.parse().map_err(|_| OfferError::BadTimestamp {
        path,
        value: raw.to_string(),
    })
}

fn parse_price(raw: &Value) -> Result<f64, OfferError> {
    let total = raw
        .pointer("/price/grandTotal")
        .and_then(Value::as_str)
        .ok_or(OfferError::MissingField("price.grandTotal"))?;
    total
        .parse()
        .map_err(|_| OfferError::BadPrice(total.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub fn mock_raw_offer() -> Value {
        json!({
            "price": {"grandTotal": "150.00", "currency": "EUR"},
            "itineraries": [{
                "segments": [{
                    "departure": {"iataCode": "CDG", "at": "2026-03-06T06:00:00"},
                    "arrival": {"iataCode": "IST", "at": "2026-03-06T09:30:00"},
                    "carrierCode": "TK",
                    "number": "1827",
                    "aircraft": {"code": "738"},
                    "duration": "PT3H30M"
                }]
            }]
        })
    }

    #[test]
    fn parses_first_segment() {
        let offer = FlightOffer::from_raw(&mock_raw_offer()).unwrap();
        assert_eq!(offer.price, 150.0);
        assert_eq!(offer.origin, "CDG");
        assert_eq!(offer.destination, "IST");
        assert_eq!(offer.carrier, "TK");
        assert_eq!(offer.flight_number, "1827");
        assert_eq!(offer.duration, "PT3H30M");
        assert_eq!(offer.currency, "EUR");
    }

    #[test]
    fn missing_itineraries_is_an_error() {
        let raw = json!({"price": {"grandTotal": "10.00"}});
        let err = FlightOffer::from_raw(&raw).unwrap_err();
        assert!(matches!(err, OfferError::MissingField(_)));
    }

    #[test]
    fn missing_price_is_an_error() {
        let mut raw = mock_raw_offer();
        raw.as_object_mut().unwrap().remove("price");
        assert!(FlightOffer::from_raw(&raw).is_err());
    }

    #[test]
    fn serializes_timestamps_as_iso8601() {
        let offer = FlightOffer::from_raw(&mock_raw_offer()).unwrap();
        let value = serde_json::to_value(&offer).unwrap();
        assert_eq!(value["departure_at"], "2026-03-06T06:00:00");
        assert_eq!(value["arrival_at"], "2026-03-06T09:30:00");
        assert_eq!(value["price"], 150.0);
    }
}
