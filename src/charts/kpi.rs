// src/charts/kpi.rs
use crate::analysis::profile::thousands;
use crate::analysis::{DeltaType, KpiData};
use super::{Rgb, NEGATIVE, NEUTRAL, POSITIVE};

/// Whether a delta reads as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    pub fn color(self) -> Rgb {
        match self {
            Polarity::Positive => POSITIVE,
            Polarity::Neutral => NEUTRAL,
            Polarity::Negative => NEGATIVE,
        }
    }
}

/// Direction marker for a delta; follows the numeric sign, not the polarity.
pub fn delta_arrow(delta: f64) -> &'static str {
    if delta > 0.0 {
        "▲"
    } else if delta < 0.0 {
        "▼"
    } else {
        "■"
    }
}

/// The sign of `delta` decides the polarity; `IncreaseIsBad` inverts it.
pub fn delta_polarity(delta: f64, delta_type: Option<DeltaType>) -> Polarity {
    let by_sign = if delta > 0.0 {
        Polarity::Positive
    } else if delta < 0.0 {
        Polarity::Negative
    } else {
        Polarity::Neutral
    };

    match (delta_type, by_sign) {
        (Some(DeltaType::IncreaseIsBad), Polarity::Positive) => Polarity::Negative,
        (Some(DeltaType::IncreaseIsBad), Polarity::Negative) => Polarity::Positive,
        (_, polarity) => polarity,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub delta: f64,
    pub delta_label: String,
    pub polarity: Polarity,
}

fn count(value: f64) -> String {
    if value >= 0.0 && value.fract() == 0.0 {
        thousands(value as usize)
    } else {
        format!("{:.1}", value)
    }
}

fn signed(delta: f64, suffix: &str) -> String {
    if delta == 0.0 {
        return format!("0{}", suffix);
    }
    let magnitude = if delta.fract() == 0.0 {
        format!("{:.0}", delta.abs())
    } else {
        format!("{:.1}", delta.abs())
    };
    let sign = if delta > 0.0 { '+' } else { '-' };
    format!("{}{}{}", sign, magnitude, suffix)
}

fn card(title: &'static str, value: String, delta: f64, suffix: &str, delta_type: Option<DeltaType>) -> KpiCard {
    KpiCard {
        title,
        value,
        delta,
        delta_label: signed(delta, suffix),
        polarity: delta_polarity(delta, delta_type),
    }
}

/// Four independent cards in display order.
pub fn kpi_cards(kpi: &KpiData) -> [KpiCard; 4] {
    [
        card("Total Records", count(kpi.total_records), kpi.total_records_delta, "", None),
        card("Data Quality", format!("{:.1}%", kpi.data_quality), kpi.data_quality_delta, "%", None),
        card("Columns", count(kpi.columns), kpi.columns_delta, "", None),
        card(
            "Total Anomalies",
            count(kpi.anomalies),
            kpi.anomalies_delta,
            "",
            kpi.anomalies_delta_type,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpi() -> KpiData {
        KpiData {
            total_records: 12500.0,
            total_records_delta: 5.0,
            data_quality: 97.24,
            data_quality_delta: -1.5,
            columns: 8.0,
            columns_delta: 0.0,
            anomalies: 12.0,
            anomalies_delta: 5.0,
            anomalies_delta_type: Some(DeltaType::IncreaseIsBad),
        }
    }

    #[test]
    fn test_increase_is_bad_inverts_polarity() {
        assert_eq!(delta_polarity(5.0, Some(DeltaType::IncreaseIsBad)), Polarity::Negative);
        assert_eq!(delta_polarity(-5.0, Some(DeltaType::IncreaseIsBad)), Polarity::Positive);
    }

    #[test]
    fn test_sign_decides_without_override() {
        assert_eq!(delta_polarity(5.0, None), Polarity::Positive);
        assert_eq!(delta_polarity(-0.1, None), Polarity::Negative);
        assert_eq!(delta_polarity(0.0, None), Polarity::Neutral);
        assert_eq!(delta_polarity(0.0, Some(DeltaType::IncreaseIsBad)), Polarity::Neutral);
        assert_eq!(delta_polarity(5.0, Some(DeltaType::IncreaseIsGood)), Polarity::Positive);
    }

    #[test]
    fn test_cards_in_display_order() {
        let cards = kpi_cards(&kpi());
        let titles: Vec<&str> = cards.iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Total Records", "Data Quality", "Columns", "Total Anomalies"]);

        assert_eq!(cards[0].value, "12,500");
        assert_eq!(cards[0].delta_label, "+5");
        assert_eq!(cards[0].polarity, Polarity::Positive);

        assert_eq!(cards[1].value, "97.2%");
        assert_eq!(cards[1].delta_label, "-1.5%");
        assert_eq!(cards[1].polarity, Polarity::Negative);

        assert_eq!(cards[2].delta_label, "0");
        assert_eq!(cards[2].polarity, Polarity::Neutral);

        assert_eq!(cards[3].delta_label, "+5");
        assert_eq!(cards[3].polarity, Polarity::Negative);
    }

    #[test]
    fn test_arrow_follows_numeric_sign_not_polarity() {
        let cards = kpi_cards(&kpi());
        assert_eq!(delta_arrow(cards[3].delta), "▲");
        assert_eq!(delta_arrow(-0.5), "▼");
        assert_eq!(Polarity::Neutral.color(), NEUTRAL);
    }
}
