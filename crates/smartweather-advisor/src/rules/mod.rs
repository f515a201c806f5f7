//! Declarative rule tables, one per persona.
//!
//! A rule is a pure function of its [`RuleContext`] returning zero or one
//! advisory. Tables are evaluated in declared order; rules never see each
//! other's output.

pub mod agriculture;
pub mod general;

use smartweather_weather::{ForecastWindow, WeatherSnapshot};

use crate::advisory::{AdvisoryItem, Persona};

/// Inputs shared by every rule in a single evaluation.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub snapshot: &'a WeatherSnapshot,
    forecast: Option<&'a ForecastWindow>,
}

impl<'a> RuleContext<'a> {
    pub fn new(snapshot: &'a WeatherSnapshot, forecast: Option<&'a ForecastWindow>) -> Self {
        Self { snapshot, forecast }
    }

    /// The forecast window, or `None` when absent or empty.
    pub fn forecast(&self) -> Option<&'a ForecastWindow> {
        self.forecast.filter(|f| !f.is_empty())
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub evaluate: fn(&RuleContext<'_>) -> Option<AdvisoryItem>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

pub fn table(persona: Persona) -> &'static [Rule] {
    match persona {
        Persona::General => general::RULES,
        Persona::Agriculture => agriculture::RULES,
    }
}
