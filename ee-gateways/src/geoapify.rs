use std::{thread, time::Duration};

use anyhow::{anyhow, Result as Fallible};
use serde::Deserialize;

use ee_core::gateways::geocode::{
    validate_geocoded, GeocodeFailure, GeocodeResult, GeocodingGateway, GeocodingRequest,
    RawGeocodeResult, RETRY_DELAY,
};

const API_URL: &str = "https://api.geoapify.com/v1/geocode/search";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Geocoding through the Geoapify forward-geocoding API,
/// restricted to Portugal.
pub struct Geoapify {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl Geoapify {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("HTTP client");
        Self { api_key, client }
    }

    /// A single request/parse round trip. `Err` means the call could
    /// not be completed (network or malformed payload) and may be
    /// retried; provider verdicts are final and returned as `Ok`.
    fn try_geocode(&self, request: &GeocodingRequest) -> Fallible<GeocodeResult> {
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("text", request.query_line().as_str()),
                ("filter", "countrycode:pt"),
                ("limit", "1"),
                ("format", "json"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(Err(GeocodeFailure::AuthFailure));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Ok(Err(GeocodeFailure::RateLimited));
        }
        if !status.is_success() {
            return Err(anyhow!("Unexpected geocoding response status: {status}"));
        }
        let payload: GeocodeResponse = response.json()?;
        let Some(result) = payload.results.into_iter().next() else {
            return Ok(Err(GeocodeFailure::NoResults));
        };
        Ok(validate_geocoded(RawGeocodeResult {
            lat: result.lat,
            lng: result.lon,
            confidence: result
                .rank
                .and_then(|rank| rank.confidence)
                .unwrap_or_default(),
            formatted: result.formatted.unwrap_or_default(),
        }))
    }
}

impl GeocodingGateway for Geoapify {
    fn geocode(&self, request: &GeocodingRequest) -> GeocodeResult {
        match self.try_geocode(request) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!(
                    "Geocoding '{}' failed ({err}), retrying once",
                    request.query_line()
                );
                thread::sleep(RETRY_DELAY);
                self.try_geocode(request).unwrap_or_else(|err| {
                    log::error!("Geocoding retry for '{}' failed: {err}", request.query_line());
                    Err(GeocodeFailure::Unavailable)
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResponseResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponseResult {
    lat: f64,
    lon: f64,
    formatted: Option<String>,
    rank: Option<GeocodeResponseRank>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponseRank {
    confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_provider_payload() {
        let payload = r#"{
            "results": [{
                "lat": 38.7077507,
                "lon": -9.1365919,
                "formatted": "Rua Augusta, 1100-048 Lisboa, Portugal",
                "rank": { "confidence": 0.95 }
            }]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(1, parsed.results.len());
        let result = &parsed.results[0];
        assert_eq!(38.7077507, result.lat);
        assert_eq!(
            Some(0.95),
            result.rank.as_ref().and_then(|r| r.confidence)
        );
    }

    #[test]
    fn parse_empty_payload() {
        let parsed: GeocodeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }
}
