//! Defines the `Pollutant` enum, mapping the numeric fields of a forecast table
//! to strongly typed variants.

use crate::classify::error::ClassifyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A forecast field that can be classified, mapped and charted.
///
/// Seven variants are measured species; [`Pollutant::Aqi`] is the composite index
/// and uses its own six-bucket scale. The string form of every variant is the
/// exact column name used in the forecast tables (e.g. `"Pm_25"`), so a
/// `Pollutant` can be parsed straight from a page selection:
///
/// ```rust
/// use punjab_aqi::Pollutant;
///
/// let p: Pollutant = "Pm_25".parse().unwrap();
/// assert_eq!(p, Pollutant::Pm25);
/// assert_eq!(p.to_string(), "Pm_25");
/// assert!("pm25".parse::<Pollutant>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    /// Composite Air Quality Index.
    #[serde(rename = "Aqi")]
    Aqi,
    /// Carbon monoxide (CO).
    #[serde(rename = "Carbon_monoxide")]
    CarbonMonoxide,
    /// Airborne dust.
    #[serde(rename = "Dust")]
    Dust,
    /// Nitrogen dioxide (NO2).
    #[serde(rename = "Nitrogen_dioxide")]
    NitrogenDioxide,
    /// Ground level ozone (O3).
    #[serde(rename = "Ozone")]
    Ozone,
    /// Particulate matter up to 10 µm.
    #[serde(rename = "Pm_10")]
    Pm10,
    /// Particulate matter up to 2.5 µm.
    #[serde(rename = "Pm_25")]
    Pm25,
    /// Sulphur dioxide (SO2).
    #[serde(rename = "Sulphur_dioxide")]
    SulphurDioxide,
}

impl Pollutant {
    /// Every selectable field, in the order the bounds view offers them.
    pub const ALL: [Pollutant; 8] = [
        Pollutant::CarbonMonoxide,
        Pollutant::Dust,
        Pollutant::NitrogenDioxide,
        Pollutant::Ozone,
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::SulphurDioxide,
        Pollutant::Aqi,
    ];

    /// The measured species offered by the pollutant map, in display order.
    pub const SPECIES: [Pollutant; 7] = [
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::Ozone,
        Pollutant::NitrogenDioxide,
        Pollutant::SulphurDioxide,
        Pollutant::CarbonMonoxide,
        Pollutant::Dust,
    ];

    /// The column holding this field in a forecast table.
    pub fn column_name(&self) -> &'static str {
        match self {
            Pollutant::Aqi => "Aqi",
            Pollutant::CarbonMonoxide => "Carbon_monoxide",
            Pollutant::Dust => "Dust",
            Pollutant::NitrogenDioxide => "Nitrogen_dioxide",
            Pollutant::Ozone => "Ozone",
            Pollutant::Pm10 => "Pm_10",
            Pollutant::Pm25 => "Pm_25",
            Pollutant::SulphurDioxide => "Sulphur_dioxide",
        }
    }

    /// Weight of this species in the synthetic AQI of the bounds view.
    ///
    /// Returns `None` for [`Pollutant::Aqi`] itself. The weights sum to 1.0.
    pub fn synthetic_aqi_weight(&self) -> Option<f64> {
        match self {
            Pollutant::Aqi => None,
            Pollutant::Pm25 => Some(0.25),
            Pollutant::Pm10 => Some(0.25),
            Pollutant::NitrogenDioxide => Some(0.15),
            Pollutant::SulphurDioxide => Some(0.10),
            Pollutant::CarbonMonoxide => Some(0.10),
            Pollutant::Ozone => Some(0.10),
            Pollutant::Dust => Some(0.05),
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for Pollutant {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pollutant::ALL
            .into_iter()
            .find(|p| p.column_name() == s)
            .ok_or_else(|| ClassifyError::UnknownPollutant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_column_name_parses_back() {
        for pollutant in Pollutant::ALL {
            assert_eq!(pollutant.column_name().parse::<Pollutant>().unwrap(), pollutant);
        }
    }

    #[test]
    fn test_unknown_pollutant_is_rejected() {
        let err = "Pm_1".parse::<Pollutant>().unwrap_err();
        assert!(matches!(err, ClassifyError::UnknownPollutant(ref name) if name == "Pm_1"));
    }

    #[test]
    fn test_synthetic_weights_sum_to_one() {
        let total: f64 = Pollutant::SPECIES
            .iter()
            .filter_map(|p| p.synthetic_aqi_weight())
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(Pollutant::Aqi.synthetic_aqi_weight(), None);
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&Pollutant::SulphurDioxide).unwrap();
        assert_eq!(json, "\"Sulphur_dioxide\"");
        let back: Pollutant = serde_json::from_str("\"Pm_10\"").unwrap();
        assert_eq!(back, Pollutant::Pm10);
    }
}
