use std::fmt;

/// A geographic coordinate in degrees (WGS 84).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A rectangular area given by its south-west and north-east corners.
///
/// None of the areas this application works with crosses the
/// antimeridian, so no wrap-around logic is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid()
            && self.ne.is_valid()
            && self.sw.lat() <= self.ne.lat()
            && self.sw.lng() <= self.ne.lng()
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        pt.lat() >= self.sw.lat()
            && pt.lat() <= self.ne.lat()
            && pt.lng() >= self.sw.lng()
            && pt.lng() <= self.ne.lng()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_validity() {
        assert!(MapPoint::from_lat_lng_deg(38.7223, -9.1393).is_valid());
        assert!(!MapPoint::from_lat_lng_deg(91.0, 0.0).is_valid());
        assert!(!MapPoint::from_lat_lng_deg(0.0, -181.0).is_valid());
    }

    #[test]
    fn bbox_contains_point() {
        let bbox = MapBbox::new(
            MapPoint::from_lat_lng_deg(-10.0, -10.0),
            MapPoint::from_lat_lng_deg(10.0, 10.0),
        );
        assert!(bbox.is_valid());
        assert!(bbox.contains_point(MapPoint::from_lat_lng_deg(5.0, 5.0)));
        assert!(bbox.contains_point(MapPoint::from_lat_lng_deg(-10.0, 10.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(10.1, 0.0)));
    }
}
