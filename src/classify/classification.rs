//! Ordered range tables mapping a pollutant value to a severity category and
//! its map color.

use crate::classify::error::ClassifyError;
use crate::types::pollutant::Pollutant;
use log::warn;
use serde::Serialize;
use std::fmt;

/// Severity of a classified value, shared by every scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One band of a scale. `upper` is `None` for the last, unbounded band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationRange {
    pub lower: f64,
    pub upper: Option<f64>,
    pub category: Category,
    pub color: &'static str,
}

impl ClassificationRange {
    const fn bounded(lower: f64, upper: f64, category: Category, color: &'static str) -> Self {
        Self {
            lower,
            upper: Some(upper),
            category,
            color,
        }
    }

    const fn open(lower: f64, category: Category, color: &'static str) -> Self {
        Self {
            lower,
            upper: None,
            category,
            color,
        }
    }

    /// Whether a scan that reached this band stops here.
    fn admits(&self, value: f64) -> bool {
        match self.upper {
            Some(upper) => value <= upper,
            None => true,
        }
    }

    /// Legend text of the band, e.g. `"0-50"` or `">1376"`.
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}-{}", self.lower, upper),
            None => format!(">{}", self.lower),
        }
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub color: &'static str,
}

use Category::*;

const AQI: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 50.0, Good, "#00E400"),
    ClassificationRange::bounded(51.0, 100.0, Moderate, "#FFFF00"),
    ClassificationRange::bounded(101.0, 150.0, UnhealthyForSensitiveGroups, "#FF7E00"),
    ClassificationRange::bounded(151.0, 200.0, Unhealthy, "#FF0000"),
    ClassificationRange::bounded(201.0, 300.0, VeryUnhealthy, "#8F3F97"),
    ClassificationRange::open(301.0, Hazardous, "#7E0023"),
];

const PM_10: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 275.0, Good, "#FFC080"),
    ClassificationRange::bounded(276.0, 550.0, Moderate, "#FFA07A"),
    ClassificationRange::bounded(551.0, 825.0, UnhealthyForSensitiveGroups, "#FF9900"),
    ClassificationRange::bounded(826.0, 1100.0, Unhealthy, "#FF6600"),
    ClassificationRange::bounded(1101.0, 1375.0, VeryUnhealthy, "#FF4400"),
    ClassificationRange::open(1376.0, Hazardous, "#FF0000"),
];

const PM_25: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 65.0, Good, "#FFC0CB"),
    ClassificationRange::bounded(66.0, 130.0, Moderate, "#FF69B4"),
    ClassificationRange::bounded(131.0, 195.0, UnhealthyForSensitiveGroups, "#FF0033"),
    ClassificationRange::bounded(196.0, 260.0, Unhealthy, "#FF0000"),
    ClassificationRange::bounded(261.0, 325.0, VeryUnhealthy, "#8B0A1A"),
    ClassificationRange::open(326.0, Hazardous, "#660000"),
];

const CARBON_MONOXIDE: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 1300.0, Good, "#ADD8E6"),
    ClassificationRange::bounded(1301.0, 2600.0, Moderate, "#87CEEB"),
    ClassificationRange::bounded(2601.0, 3900.0, UnhealthyForSensitiveGroups, "#6495ED"),
    ClassificationRange::bounded(3901.0, 5200.0, Unhealthy, "#0000FF"),
    ClassificationRange::bounded(5201.0, 6500.0, VeryUnhealthy, "#00008B"),
    ClassificationRange::open(6501.0, Hazardous, "#00008B"),
];

const DUST: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 625.0, Good, "#C5C3C5"),
    ClassificationRange::bounded(626.0, 1250.0, Moderate, "#C5107A"),
    ClassificationRange::bounded(1251.0, 1875.0, UnhealthyForSensitiveGroups, "#7A288A"),
    ClassificationRange::bounded(1876.0, 2500.0, Unhealthy, "#6c5ce7"),
    ClassificationRange::bounded(2501.0, 3125.0, VeryUnhealthy, "#4B0082"),
    ClassificationRange::open(3126.0, Hazardous, "#3B3F4E"),
];

const SULPHUR_DIOXIDE: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 35.0, Good, "#F5F5DC"),
    ClassificationRange::bounded(36.0, 70.0, Moderate, "#964B00"),
    ClassificationRange::bounded(71.0, 105.0, UnhealthyForSensitiveGroups, "#8B4513"),
    ClassificationRange::bounded(106.0, 140.0, Unhealthy, "#663300"),
    ClassificationRange::bounded(141.0, 175.0, VeryUnhealthy, "#4B2E2E"),
    ClassificationRange::open(176.0, Hazardous, "#3B2E2E"),
];

const NITROGEN_DIOXIDE: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 30.0, Good, "#F7D2C4"),
    ClassificationRange::bounded(31.0, 60.0, Moderate, "#FFC394"),
    ClassificationRange::bounded(61.0, 90.0, UnhealthyForSensitiveGroups, "#FF9900"),
    ClassificationRange::bounded(91.0, 120.0, Unhealthy, "#FF6600"),
    ClassificationRange::bounded(121.0, 150.0, VeryUnhealthy, "#FF4400"),
    ClassificationRange::open(151.0, Hazardous, "#FF0000"),
];

const OZONE: [ClassificationRange; 6] = [
    ClassificationRange::bounded(0.0, 55.0, Good, "#C7F464"),
    ClassificationRange::bounded(56.0, 110.0, Moderate, "#0097A7"),
    ClassificationRange::bounded(111.0, 165.0, UnhealthyForSensitiveGroups, "#00BFFF"),
    ClassificationRange::bounded(166.0, 220.0, Unhealthy, "#008000"),
    ClassificationRange::bounded(221.0, 275.0, VeryUnhealthy, "#00695C"),
    ClassificationRange::open(276.0, Hazardous, "#000080"),
];

/// The scale of `pollutant`, ascending.
pub fn ranges(pollutant: Pollutant) -> &'static [ClassificationRange; 6] {
    match pollutant {
        Pollutant::Aqi => &AQI,
        Pollutant::Pm10 => &PM_10,
        Pollutant::Pm25 => &PM_25,
        Pollutant::CarbonMonoxide => &CARBON_MONOXIDE,
        Pollutant::Dust => &DUST,
        Pollutant::SulphurDioxide => &SULPHUR_DIOXIDE,
        Pollutant::NitrogenDioxide => &NITROGEN_DIOXIDE,
        Pollutant::Ozone => &OZONE,
    }
}

/// Maps a value onto the scale of `pollutant`.
///
/// Bands are scanned in ascending order and the first whose upper bound is not
/// below `value` wins, so a value between two integer breakpoints (`50.5` on
/// the AQI scale) falls into the higher band and a tie on a breakpoint falls
/// into the lower. Negative values are treated as `0`.
///
/// ```rust
/// use punjab_aqi::{classify, Category, Pollutant};
///
/// let c = classify(Pollutant::Aqi, 42.0).unwrap();
/// assert_eq!((c.category, c.color), (Category::Good, "#00E400"));
/// assert_eq!(classify(Pollutant::Aqi, 50.5).unwrap().category, Category::Moderate);
/// ```
///
/// # Errors
///
/// [`ClassifyError::NotANumber`] for `NaN`.
pub fn classify(pollutant: Pollutant, value: f64) -> Result<Classification, ClassifyError> {
    if value.is_nan() {
        return Err(ClassifyError::NotANumber);
    }
    let value = if value < 0.0 {
        warn!("Negative {} value {} classified as 0", pollutant, value);
        0.0
    } else {
        value
    };

    let scale = ranges(pollutant);
    let band = scale
        .iter()
        .find(|band| band.admits(value))
        .unwrap_or(&scale[scale.len() - 1]);
    Ok(Classification {
        category: band.category,
        color: band.color,
    })
}

/// [`classify`] with the pollutant given by column name, as a page selection
/// delivers it.
pub fn classify_named(pollutant: &str, value: f64) -> Result<Classification, ClassifyError> {
    classify(pollutant.parse()?, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_are_contiguous_and_open_ended() {
        for pollutant in Pollutant::ALL {
            let scale = ranges(pollutant);
            assert_eq!(scale[0].lower, 0.0, "{pollutant} must start at 0");
            assert_eq!(scale[5].upper, None, "{pollutant} must be unbounded");
            for pair in scale.windows(2) {
                let upper = pair[0].upper.unwrap();
                assert_eq!(upper + 1.0, pair[1].lower, "{pollutant} has a gap at {upper}");
                assert!(pair[0].category < pair[1].category);
            }
        }
    }

    #[test]
    fn test_every_non_negative_value_has_one_category() {
        for pollutant in Pollutant::ALL {
            for value in [0.0, 0.5, 49.99, 65.5, 275.5, 1000.0, 6500.5, 1e9] {
                assert!(classify(pollutant, value).is_ok());
            }
        }
    }

    #[test]
    fn test_dera_ghazi_khan_aqi() {
        let c = classify(Pollutant::Aqi, 42.0).unwrap();
        assert_eq!(c.category, Category::Good);
        assert_eq!(c.category.label(), "Good");
        assert_eq!(c.color, "#00E400");
    }

    #[test]
    fn test_pm10_extremes() {
        assert_eq!(classify(Pollutant::Pm10, 0.0).unwrap().color, "#FFC080");
        assert_eq!(classify(Pollutant::Pm10, 10_000.0).unwrap().color, "#FF0000");
    }

    #[test]
    fn test_breakpoint_ties_go_to_the_lower_band() {
        assert_eq!(classify(Pollutant::Aqi, 50.0).unwrap().category, Category::Good);
        assert_eq!(classify(Pollutant::Aqi, 51.0).unwrap().category, Category::Moderate);
        assert_eq!(classify(Pollutant::Aqi, 300.0).unwrap().category, Category::VeryUnhealthy);
        assert_eq!(classify(Pollutant::Aqi, 301.0).unwrap().category, Category::Hazardous);
    }

    #[test]
    fn test_values_between_breakpoints_go_up() {
        assert_eq!(classify(Pollutant::Pm10, 275.5).unwrap().color, "#FFA07A");
        assert_eq!(classify(Pollutant::Ozone, 55.2).unwrap().color, "#0097A7");
    }

    #[test]
    fn test_negative_is_clamped_and_nan_rejected() {
        assert_eq!(classify(Pollutant::Dust, -3.0).unwrap().category, Category::Good);
        assert_eq!(classify(Pollutant::Dust, f64::NAN), Err(ClassifyError::NotANumber));
    }

    #[test]
    fn test_classify_named() {
        assert_eq!(classify_named("Pm_25", 100.0).unwrap().color, "#FF69B4");
        assert_eq!(
            classify_named("PM2.5", 100.0),
            Err(ClassifyError::UnknownPollutant("PM2.5".to_string()))
        );
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(ranges(Pollutant::Aqi)[0].label(), "0-50");
        assert_eq!(ranges(Pollutant::Pm10)[5].label(), ">1376");
    }
}
