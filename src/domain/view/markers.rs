use crate::domain::entities::spot::{Spot, SpotId};

/// What the map layer needs to plot one spot.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: SpotId,
    pub name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub route_url: String,
}

impl MapMarker {
    pub fn from_spot(spot: &Spot) -> Option<Self> {
        let (latitude, longitude) = spot.coordinates()?;
        Some(Self {
            id: spot.id.clone(),
            name: spot.display_name().to_string(),
            city: spot.city.clone().unwrap_or_default(),
            latitude,
            longitude,
            route_url: waze_route_url(latitude, longitude),
        })
    }
}

pub fn waze_route_url(latitude: f64, longitude: f64) -> String {
    format!("https://waze.com/ul?ll={latitude},{longitude}&navigate=yes")
}

/// Spots without both coordinates are skipped.
pub fn markers_for(spots: &[Spot]) -> Vec<MapMarker> {
    spots.iter().filter_map(MapMarker::from_spot).collect()
}
