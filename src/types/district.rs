//! District option list and name normalization.

use crate::error::DashboardError;

/// The districts offered by the district selectors, in display order.
///
/// Names are spelled as in the `District` column of the forecast tables, so an
/// option can be passed straight to the views. The geometry catalog keys the
/// same districts with underscores; see [`normalize_district_key`].
pub const DISTRICTS: [&str; 36] = [
    "Attock",
    "Bahawalnagar",
    "Bahawalpur",
    "Bhakkar",
    "Chakwal",
    "Chiniot",
    "Faisalabad",
    "Gujranwala",
    "Gujrat",
    "Hafizabad",
    "Jhang",
    "Jhelum",
    "Kasur",
    "Khanewal",
    "Khushab",
    "Lahore",
    "Layyah",
    "Lodhran",
    "Mianwali",
    "Multan",
    "Muzaffargarh",
    "Narowal",
    "Okara",
    "Pakpattan",
    "Rajanpur",
    "Rawalpindi",
    "Sahiwal",
    "Sargodha",
    "Sheikhupura",
    "Sialkot",
    "Vehari",
    "Dera Ghazi Khan",
    "Mandi Bahuddin",
    "Nankana Sahib",
    "Rahim Yar Khan",
    "Toba Tek Singh",
];

/// Turns a district name as written in a forecast table into a geometry key.
///
/// ```rust
/// use punjab_aqi::normalize_district_key;
///
/// assert_eq!(normalize_district_key("Dera Ghazi Khan"), "Dera_Ghazi_Khan");
/// assert_eq!(normalize_district_key("Lahore"), "Lahore");
/// ```
pub fn normalize_district_key(name: &str) -> String {
    name.replace(' ', "_")
}

/// Resolves a selection to one of [`DISTRICTS`].
///
/// Both the table spelling ("Toba Tek Singh") and the key spelling
/// ("Toba_Tek_Singh") are accepted. The table spelling is returned, ready to
/// filter the forecast tables with.
///
/// ```rust
/// use punjab_aqi::parse_district;
///
/// assert_eq!(parse_district("Dera_Ghazi_Khan").unwrap(), "Dera Ghazi Khan");
/// ```
///
/// # Errors
///
/// Returns [`DashboardError::UnknownDistrict`] for anything outside the option list.
pub fn parse_district(name: &str) -> Result<&'static str, DashboardError> {
    let key = normalize_district_key(name);
    DISTRICTS
        .iter()
        .copied()
        .find(|district| normalize_district_key(district) == key)
        .ok_or_else(|| DashboardError::UnknownDistrict(name.to_string()))
}
