use log::warn;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Ranking colors from cleanest (index 0, green) to most polluted (red).
pub const RANKING_PALETTE: [&str; 36] = [
    "#00FF00", "#19F719", "#32EF32", "#4BE74B", "#64DF64", "#7DD77D", "#96CF96", "#AFC7AF",
    "#C8BFC8", "#E1B7E1", "#FF9FFF", "#FF99E5", "#FF92CC", "#FF8CB2", "#FF8699", "#FF7F80",
    "#FF7966", "#FF734D", "#FF6C33", "#FF662A", "#FF6020", "#FF5917", "#FF5313", "#FF4C0F",
    "#FF460B", "#FF4007", "#FF3A03", "#FF3300", "#FF2D00", "#FF2600", "#FF2000", "#FF1A00",
    "#FF1400", "#FF0D00", "#FF0700", "#FF0000",
];

/// A district's place in the AQI ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDistrict {
    /// Zero-based; 0 is the cleanest district.
    pub ranking: usize,
    pub district: String,
    pub aqi: Option<f64>,
    pub color: &'static str,
}

/// Palette color for a zero-based rank. Ranks past the palette reuse its last color.
pub fn palette_color(ranking: usize) -> &'static str {
    RANKING_PALETTE[ranking.min(RANKING_PALETTE.len() - 1)]
}

/// Orders districts by ascending AQI and assigns each its palette color.
///
/// Districts without an AQI rank last. Equal values keep their input order.
pub fn rank<I, S>(districts: I) -> Vec<RankedDistrict>
where
    I: IntoIterator<Item = (S, Option<f64>)>,
    S: Into<String>,
{
    let mut ordered: Vec<(String, Option<f64>)> = districts
        .into_iter()
        .map(|(district, aqi)| (district.into(), aqi))
        .collect();
    ordered.sort_by_key(|(_, aqi)| (aqi.is_none(), aqi.map(OrderedFloat)));

    if ordered.len() > RANKING_PALETTE.len() {
        warn!(
            "Ranking {} districts with a {} color palette; the most polluted share the last color",
            ordered.len(),
            RANKING_PALETTE.len()
        );
    }

    ordered
        .into_iter()
        .enumerate()
        .map(|(ranking, (district, aqi))| RankedDistrict {
            ranking,
            district,
            aqi,
            color: palette_color(ranking),
        })
        .collect()
}
