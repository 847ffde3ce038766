use crate::entities::{MapBbox, MapPoint};

// Portuguese territory, split into three rectangles. Coordinates
// outside all of them are rejected by the geocoding validation.

pub const MAINLAND: MapBbox = MapBbox::new(
    MapPoint::from_lat_lng_deg(36.838, -9.526),
    MapPoint::from_lat_lng_deg(42.280, -6.189),
);

pub const AZORES: MapBbox = MapBbox::new(
    MapPoint::from_lat_lng_deg(36.870, -31.385),
    MapPoint::from_lat_lng_deg(39.764, -24.746),
);

pub const MADEIRA: MapBbox = MapBbox::new(
    MapPoint::from_lat_lng_deg(32.350, -17.410),
    MapPoint::from_lat_lng_deg(33.150, -16.200),
);

const TERRITORY: [MapBbox; 3] = [MAINLAND, AZORES, MADEIRA];

pub fn is_in_portugal(pos: MapPoint) -> bool {
    TERRITORY.iter().any(|bbox| bbox.contains_point(pos))
}
