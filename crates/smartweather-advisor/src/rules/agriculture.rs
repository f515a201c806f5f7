//! Farming-oriented advisories: watering, spraying and disease risk.

use super::{Rule, RuleContext};
use crate::advisory::{AdvisoryCategory, AdvisoryItem};

pub const HOT_C: f64 = 32.0;
pub const COOL_C: f64 = 22.0;
pub const STRONG_WIND_MS: f64 = 8.0;
pub const HIGH_HUMIDITY_PCT: u8 = 80;
/// A forecast slot below this probability is a good watering window.
pub const LOW_RAIN_POP: f64 = 0.2;

pub const RULES: &[Rule] = &[
    Rule {
        id: "agri.rain",
        name: "Rain / no rain",
        evaluate: rain,
    },
    Rule {
        id: "agri.temperature",
        name: "Heat and cool weather",
        evaluate: temperature,
    },
    Rule {
        id: "agri.wind",
        name: "Spray drift",
        evaluate: wind,
    },
    Rule {
        id: "agri.humidity",
        name: "Fungal risk",
        evaluate: humidity,
    },
    Rule {
        id: "agri.schedule",
        name: "Watering window",
        evaluate: schedule,
    },
];

// Always fires: unknown condition counts as no rain.
fn rain(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let item = if ctx.snapshot.condition_contains("rain") {
        AdvisoryItem::new(
            "Rain detected",
            "Avoid watering now. Natural rainfall is already providing moisture.",
            AdvisoryCategory::Rain,
        )
    } else {
        AdvisoryItem::new(
            "No rain right now",
            "Watering is possible. Check rainfall chance in next few hours.",
            AdvisoryCategory::Rain,
        )
    };
    Some(item)
}

fn temperature(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let t = ctx.snapshot.temperature_c()?;
    if t >= HOT_C {
        Some(AdvisoryItem::new(
            "High temperature",
            "Water early morning or late evening to reduce evaporation.",
            AdvisoryCategory::Temperature,
        ))
    } else if t <= COOL_C {
        Some(AdvisoryItem::new(
            "Cool weather",
            "Evaporation is low. Moderate watering is sufficient.",
            AdvisoryCategory::Temperature,
        ))
    } else {
        None
    }
}

fn wind(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let speed = ctx.snapshot.wind_speed_ms?;
    (speed >= STRONG_WIND_MS).then(|| {
        AdvisoryItem::new(
            "Strong winds",
            "Avoid spraying pesticides/fertilizers now. Wind can cause drift and waste.",
            AdvisoryCategory::Wind,
        )
    })
}

fn humidity(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let pct = ctx.snapshot.humidity_pct?;
    (pct >= HIGH_HUMIDITY_PCT).then(|| {
        AdvisoryItem::new(
            "High humidity",
            "Higher risk of fungal disease. Improve airflow and monitor leaves.",
            AdvisoryCategory::Humidity,
        )
    })
}

fn schedule(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let forecast = ctx.forecast()?;
    let item = match forecast.first_where(|e| e.precipitation_probability < LOW_RAIN_POP) {
        Some(slot) => AdvisoryItem::new(
            "Best watering time (next 24h)",
            format!("Low rain probability around: {}.", slot.label),
            AdvisoryCategory::Schedule,
        ),
        None => AdvisoryItem::new(
            "Rain likely",
            "Rain probability is high in most upcoming hours — watering can be reduced.",
            AdvisoryCategory::Schedule,
        ),
    };
    Some(item)
}
