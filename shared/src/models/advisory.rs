//! Farming advisory models and the rules that produce them
//!
//! The lookup tables are plain data so deployments can override them from
//! configuration (for example to localize the tips).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::round_whole;

/// Recommendations that accompany a yield estimate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advisory {
    pub fertilizer: String,
    pub water: String,
    pub soil_tips: String,
    pub weather_advice: String,
}

/// Fertilizer dosing per hectare
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FertilizerRates {
    /// Soils dosed at `rich_soil_kg_per_ha` (lowercase keys)
    pub rich_soils: Vec<String>,
    pub rich_soil_kg_per_ha: f64,
    pub default_kg_per_ha: f64,
}

impl Default for FertilizerRates {
    fn default() -> Self {
        Self {
            rich_soils: vec!["loamy".to_string(), "black".to_string()],
            rich_soil_kg_per_ha: 60.0,
            default_kg_per_ha: 50.0,
        }
    }
}

/// Weekly irrigation counts per hectare
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IrrigationRates {
    /// Rainfall below this (mm) uses `dry_per_ha`
    pub dry_below_mm: f64,
    pub dry_per_ha: f64,
    pub wet_per_ha: f64,
}

impl Default for IrrigationRates {
    fn default() -> Self {
        Self {
            dry_below_mm: 80.0,
            dry_per_ha: 3.0,
            wet_per_ha: 2.0,
        }
    }
}

/// Condition on the expected rainfall, in millimetres
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RainfallCondition {
    /// Strictly below the bound
    Below(f64),
    /// Strictly above the bound
    Above(f64),
}

impl RainfallCondition {
    pub fn matches(&self, rainfall: f64) -> bool {
        match *self {
            RainfallCondition::Below(bound) => rainfall < bound,
            RainfallCondition::Above(bound) => rainfall > bound,
        }
    }
}

/// One entry of the ordered weather advice list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRule {
    pub when: RainfallCondition,
    pub advice: String,
}

/// Data-driven tables behind [`AdvisoryTables::advise`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdvisoryTables {
    pub fertilizer: FertilizerRates,
    pub irrigation: IrrigationRates,
    /// Soil tips keyed by lowercase soil name
    pub soil_tips: BTreeMap<String, String>,
    pub default_soil_tip: String,
    /// Checked in order; the first matching rule wins
    pub weather_rules: Vec<WeatherRule>,
    pub default_weather_advice: String,
}

impl Default for AdvisoryTables {
    fn default() -> Self {
        let soil_tips = [
            ("loamy", "Rich soil; add compost every season and maintain drainage."),
            ("clay", "Heavy soil; mix compost + coarse sand to improve aeration."),
            ("sandy", "Drains fast; add mulch + organic matter to retain moisture."),
            ("black", "Fertile soil; monitor pH and avoid overwatering."),
        ]
        .into_iter()
        .map(|(soil, tip)| (soil.to_string(), tip.to_string()))
        .collect();

        Self {
            fertilizer: FertilizerRates::default(),
            irrigation: IrrigationRates::default(),
            soil_tips,
            default_soil_tip: "Maintain soil pH 6.0–7.0 and add compost.".to_string(),
            weather_rules: vec![
                WeatherRule {
                    when: RainfallCondition::Below(50.0),
                    advice: "Low rainfall — use drip irrigation and mulch.".to_string(),
                },
                WeatherRule {
                    when: RainfallCondition::Above(200.0),
                    advice: "Heavy rainfall — increase drainage and prevent fungus.".to_string(),
                },
            ],
            default_weather_advice: "Moderate rainfall — maintain stable irrigation.".to_string(),
        }
    }
}

impl AdvisoryTables {
    /// Derive dosing and tips for a field. Pure: equal inputs give equal output.
    pub fn advise(&self, soil: &str, area: f64, rainfall: f64) -> Advisory {
        Advisory {
            fertilizer: format!("{:.0} kg NPK per season.", self.fertilizer_kg(soil, area)),
            water: format!("{:.0} irrigations/week.", self.irrigations_per_week(area, rainfall)),
            soil_tips: self.soil_tip(soil).to_string(),
            weather_advice: self.weather_advice(rainfall).to_string(),
        }
    }

    pub fn fertilizer_kg(&self, soil: &str, area: f64) -> f64 {
        let soil = soil.to_lowercase();
        let rate = if self.fertilizer.rich_soils.iter().any(|s| s.to_lowercase() == soil) {
            self.fertilizer.rich_soil_kg_per_ha
        } else {
            self.fertilizer.default_kg_per_ha
        };
        round_whole(area * rate)
    }

    pub fn irrigations_per_week(&self, area: f64, rainfall: f64) -> f64 {
        let rate = if rainfall < self.irrigation.dry_below_mm {
            self.irrigation.dry_per_ha
        } else {
            self.irrigation.wet_per_ha
        };
        round_whole(area * rate)
    }

    pub fn soil_tip(&self, soil: &str) -> &str {
        self.soil_tips
            .get(&soil.to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.default_soil_tip)
    }

    pub fn weather_advice(&self, rainfall: f64) -> &str {
        self.weather_rules
            .iter()
            .find(|rule| rule.when.matches(rainfall))
            .map(|rule| rule.advice.as_str())
            .unwrap_or(&self.default_weather_advice)
    }
}
