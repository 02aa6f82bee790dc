use crate::classify::classification::ranges;
use crate::types::pollutant::Pollutant;
use serde::Serialize;

/// One swatch of a map legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub range: String,
    pub color: &'static str,
}

/// Upper end printed for the open AQI band.
const AQI_SCALE_MAX: u32 = 500;

/// The six AQI categories with their ranges, `"0-50"` through `"301-500"`.
pub fn aqi_legend() -> Vec<LegendEntry> {
    ranges(Pollutant::Aqi)
        .iter()
        .map(|band| LegendEntry {
            label: band.category.label(),
            range: match band.upper {
                Some(_) => band.label(),
                None => format!("{}-{}", band.lower, AQI_SCALE_MAX),
            },
            color: band.color,
        })
        .collect()
}

/// The legend of a pollutant map. The open band reads `">lower"`.
pub fn pollutant_legend(pollutant: Pollutant) -> Vec<LegendEntry> {
    if pollutant == Pollutant::Aqi {
        return aqi_legend();
    }
    ranges(pollutant)
        .iter()
        .map(|band| LegendEntry {
            label: band.category.label(),
            range: band.label(),
            color: band.color,
        })
        .collect()
}
