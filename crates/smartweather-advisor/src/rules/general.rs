//! Travel and everyday advisories.

use super::{Rule, RuleContext};
use crate::advisory::{AdvisoryCategory, AdvisoryItem};

pub const HOT_C: f64 = 32.0;
pub const CHILLY_C: f64 = 15.0;
pub const WINDY_MS: f64 = 10.0;
pub const MUGGY_PCT: u8 = 85;
pub const LOW_VISIBILITY_KM: f64 = 2.0;
pub const RAIN_EXPECTED_POP: f64 = 0.5;

pub const RULES: &[Rule] = &[
    Rule {
        id: "general.thunderstorm",
        name: "Thunderstorm warning",
        evaluate: thunderstorm,
    },
    Rule {
        id: "general.umbrella",
        name: "Umbrella",
        evaluate: umbrella,
    },
    Rule {
        id: "general.temperature",
        name: "Hot and chilly weather",
        evaluate: temperature,
    },
    Rule {
        id: "general.wind",
        name: "Wind",
        evaluate: wind,
    },
    Rule {
        id: "general.humidity",
        name: "Muggy air",
        evaluate: humidity,
    },
    Rule {
        id: "general.visibility",
        name: "Visibility",
        evaluate: visibility,
    },
    Rule {
        id: "general.outlook",
        name: "24h outlook",
        evaluate: outlook,
    },
];

fn thunderstorm(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    ctx.snapshot.condition_contains("thunderstorm").then(|| {
        AdvisoryItem::new(
            "Thunderstorm warning",
            "Stay indoors if you can and avoid open ground and tall trees.",
            AdvisoryCategory::Rain,
        )
    })
}

fn umbrella(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let s = ctx.snapshot;
    (s.condition_contains("rain") || s.condition_contains("drizzle")).then(|| {
        AdvisoryItem::new(
            "Carry an umbrella",
            "Rain is falling now. Allow extra time for travel.",
            AdvisoryCategory::Rain,
        )
    })
}

fn temperature(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let t = ctx.snapshot.temperature_c()?;
    if t >= HOT_C {
        Some(AdvisoryItem::new(
            "Hot weather",
            "Stay hydrated and avoid long stretches in direct sun around midday.",
            AdvisoryCategory::Temperature,
        ))
    } else if t <= CHILLY_C {
        Some(AdvisoryItem::new(
            "Chilly weather",
            "Bring a warm layer, especially for early mornings and evenings.",
            AdvisoryCategory::Temperature,
        ))
    } else {
        None
    }
}

fn wind(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let speed = ctx.snapshot.wind_speed_ms?;
    (speed >= WINDY_MS).then(|| {
        AdvisoryItem::new(
            "Windy conditions",
            "Secure loose items and take care on coastal roads and open bridges.",
            AdvisoryCategory::Wind,
        )
    })
}

fn humidity(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let pct = ctx.snapshot.humidity_pct?;
    (pct >= MUGGY_PCT).then(|| {
        AdvisoryItem::new(
            "Muggy air",
            "High humidity makes it feel warmer. Wear breathable clothing.",
            AdvisoryCategory::Humidity,
        )
    })
}

fn visibility(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let km = ctx.snapshot.visibility_km?;
    (km < LOW_VISIBILITY_KM).then(|| {
        AdvisoryItem::new(
            "Low visibility",
            "Drive slowly and keep headlights on.",
            AdvisoryCategory::Visibility,
        )
    })
}

fn outlook(ctx: &RuleContext<'_>) -> Option<AdvisoryItem> {
    let forecast = ctx.forecast()?;
    let item = match forecast.first_where(|e| e.precipitation_probability >= RAIN_EXPECTED_POP) {
        Some(slot) => AdvisoryItem::new(
            "Rain expected (next 24h)",
            format!("Rain is likely around: {}.", slot.label),
            AdvisoryCategory::Schedule,
        ),
        None => AdvisoryItem::new(
            "Dry outlook (next 24h)",
            "No significant rain expected in the coming hours.",
            AdvisoryCategory::Schedule,
        ),
    };
    Some(item)
}
