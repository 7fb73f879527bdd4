//! Nominatim response types and normalization.

use serde::Deserialize;

use crate::provider::Candidate;

/// One element of the `/search` response array.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    #[serde(default, alias = "class")]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    #[serde(default)]
    pub addresstype: Option<String>,
    #[serde(default)]
    pub importance: Option<f64>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

/// Structured address components (`addressdetails=1`).
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub country_code: Option<String>,
    pub postcode: Option<String>,
}

impl NominatimAddress {
    /// Most specific settlement name available.
    fn settlement(&self) -> Option<String> {
        [&self.city, &self.town, &self.village, &self.hamlet, &self.municipality]
            .into_iter()
            .find_map(|v| v.clone())
    }
}

impl NominatimPlace {
    /// Convert to a [`Candidate`]. Returns `None` if the coordinates do not parse.
    pub fn into_candidate(self) -> Option<Candidate> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        let address = self.address.unwrap_or_default();

        Some(Candidate {
            latitude,
            longitude,
            city: address.settlement(),
            state: address.state.clone().or_else(|| address.region.clone()),
            country_code: address.country_code.clone(),
            postcode: address.postcode,
            display_name: self.display_name,
            category: self.category,
            place_type: self.place_type,
            address_type: self.addresstype,
            importance: self.importance,
        })
    }
}

/// Normalize a raw response, dropping rows with unusable coordinates.
pub fn into_candidates(places: Vec<NominatimPlace>) -> Vec<Candidate> {
    places
        .into_iter()
        .filter_map(|place| {
            let label = place.display_name.clone();
            let candidate = place.into_candidate();
            if candidate.is_none() {
                tracing::warn!(display_name = %label, "dropping candidate with unparsable coordinates");
            }
            candidate
        })
        .collect()
}
