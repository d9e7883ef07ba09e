use super::domain::Filing;
use std::cmp::Ordering;

/// Fold any finite longitude into (-180, 180].
pub fn normalize_longitude(longitude: f64) -> Option<f64> {
    if !longitude.is_finite() {
        return None;
    }

    let wrapped = longitude.rem_euclid(360.0);
    if wrapped > 180.0 {
        Some(wrapped - 360.0)
    } else {
        Some(wrapped)
    }
}

/// Circular separation between two longitudes, in [0, 180].
pub fn longitudinal_distance(a: f64, b: f64) -> f64 {
    let raw = (a - b).abs().rem_euclid(360.0);
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// A filing inside the candidate window together with its separation from the satellite.
#[derive(Debug, Clone, Copy)]
pub struct NearbyFiling<'a> {
    pub filing: &'a Filing,
    pub distance: f64,
}

/// Filings within `window_degrees` of `longitude`, closest first, ties by name.
pub fn nearby<'a, I>(filings: I, longitude: f64, window_degrees: f64) -> Vec<NearbyFiling<'a>>
where
    I: IntoIterator<Item = &'a Filing>,
{
    let mut matches: Vec<NearbyFiling<'a>> = filings
        .into_iter()
        .filter_map(|filing| {
            let distance = longitudinal_distance(longitude, filing.longitude);
            (distance <= window_degrees).then_some(NearbyFiling { filing, distance })
        })
        .collect();

    matches.sort_by(|left, right| {
        left.distance
            .partial_cmp(&right.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| left.filing.name.cmp(&right.filing.name))
    });

    matches
}
