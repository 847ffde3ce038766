use std::{thread, time::Duration};

use thiserror::Error;

use crate::{
    bbox,
    entities::{Address, MapPoint},
};

/// Minimum confidence score a provider result must reach.
pub const MIN_CONFIDENCE: f64 = 0.5;

/// Pause between successive calls when geocoding a batch, to
/// respect the provider's quota.
pub const BATCH_DELAY: Duration = Duration::from_millis(200);

/// Pause before the single retry after a transport failure.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

const COORD_DECIMALS_FACTOR: f64 = 1e7;

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingRequest {
    pub address: Address,
}

impl GeocodingRequest {
    pub fn new(street: Option<String>, city: String, region: Option<String>) -> Self {
        Self {
            address: Address {
                street,
                city,
                region,
                country: "Portugal".to_string(),
            },
        }
    }

    pub fn query_line(&self) -> String {
        self.address.single_line()
    }
}

/// An unvalidated result as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGeocodeResult {
    pub lat: f64,
    pub lng: f64,
    pub confidence: f64,
    pub formatted: String,
}

/// A validated result with coordinates rounded to 7 decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub pos: MapPoint,
    pub confidence: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeFailure {
    #[error("No geocoding results for the given address")]
    NoResults,
    #[error("Geocoding result confidence {0} is below the threshold")]
    LowConfidence(f64),
    #[error("Geocoding result lies outside of Portugal")]
    OutOfBounds,
    #[error("Geocoding provider rejected the API key")]
    AuthFailure,
    #[error("Geocoding provider rate limit exceeded")]
    RateLimited,
    #[error("Geocoding is temporarily unavailable")]
    Unavailable,
}

pub type GeocodeResult = Result<ResolvedLocation, GeocodeFailure>;

pub trait GeocodingGateway {
    /// Resolves a single address. Implementations retry exactly once
    /// after [`RETRY_DELAY`] on transport or parse failures.
    fn geocode(&self, request: &GeocodingRequest) -> GeocodeResult;
}

pub fn round_coord(deg: f64) -> f64 {
    (deg * COORD_DECIMALS_FACTOR).round() / COORD_DECIMALS_FACTOR
}

/// Applies the confidence and territory checks shared by all
/// provider implementations.
pub fn validate_geocoded(raw: RawGeocodeResult) -> GeocodeResult {
    let RawGeocodeResult {
        lat,
        lng,
        confidence,
        formatted,
    } = raw;
    if confidence < MIN_CONFIDENCE {
        return Err(GeocodeFailure::LowConfidence(confidence));
    }
    let pos = MapPoint::from_lat_lng_deg(round_coord(lat), round_coord(lng));
    if !pos.is_valid() || !bbox::is_in_portugal(pos) {
        return Err(GeocodeFailure::OutOfBounds);
    }
    Ok(ResolvedLocation {
        pos,
        confidence,
        formatted,
    })
}

/// Geocodes a list of addresses strictly sequentially, pausing
/// [`BATCH_DELAY`] between calls. Individual failures are collected,
/// never short-circuited.
pub fn geocode_batch<G>(gateway: &G, requests: &[GeocodingRequest]) -> Vec<GeocodeResult>
where
    G: GeocodingGateway + ?Sized,
{
    let mut results = Vec::with_capacity(requests.len());
    for (i, request) in requests.iter().enumerate() {
        if i > 0 {
            thread::sleep(BATCH_DELAY);
        }
        results.push(gateway.geocode(request));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lisbon_raw(confidence: f64) -> RawGeocodeResult {
        RawGeocodeResult {
            lat: 38.7223,
            lng: -9.1393,
            confidence,
            formatted: "Lisboa, Portugal".to_string(),
        }
    }

    #[test]
    fn accept_confident_result_in_portugal() {
        let resolved = validate_geocoded(lisbon_raw(0.9)).unwrap();
        assert_eq!(38.7223, resolved.pos.lat());
        assert_eq!(-9.1393, resolved.pos.lng());
    }

    #[test]
    fn reject_low_confidence_regardless_of_coordinates() {
        assert_eq!(
            Err(GeocodeFailure::LowConfidence(0.3)),
            validate_geocoded(lisbon_raw(0.3))
        );
    }

    #[test]
    fn reject_result_outside_portugal() {
        let raw = RawGeocodeResult {
            lat: 48.85,
            lng: 2.35,
            confidence: 1.0,
            formatted: "Paris, France".to_string(),
        };
        assert_eq!(Err(GeocodeFailure::OutOfBounds), validate_geocoded(raw));
    }

    #[test]
    fn coordinates_are_rounded_to_seven_decimals() {
        let raw = RawGeocodeResult {
            lat: 38.722_252_44,
            lng: -9.139_336_67,
            confidence: 1.0,
            formatted: String::new(),
        };
        let resolved = validate_geocoded(raw).unwrap();
        assert_eq!(38.722_252_4, resolved.pos.lat());
        assert_eq!(-9.139_336_7, resolved.pos.lng());
    }

    struct ScriptedGateway;

    impl GeocodingGateway for ScriptedGateway {
        fn geocode(&self, request: &GeocodingRequest) -> GeocodeResult {
            if request.address.city == "Lisboa" {
                validate_geocoded(lisbon_raw(0.9))
            } else {
                Err(GeocodeFailure::NoResults)
            }
        }
    }

    #[test]
    fn batch_collects_all_outcomes() {
        let requests = vec![
            GeocodingRequest::new(None, "Lisboa".into(), None),
            GeocodingRequest::new(None, "Atlantis".into(), None),
            GeocodingRequest::new(None, "Lisboa".into(), None),
        ];
        let results = geocode_batch(&ScriptedGateway, &requests);
        assert_eq!(3, results.len());
        assert!(results[0].is_ok());
        assert_eq!(Err(GeocodeFailure::NoResults), results[1]);
        assert!(results[2].is_ok());
    }
}
