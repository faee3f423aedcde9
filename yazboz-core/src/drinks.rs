//! Table-wide drink tab: what was ordered and what it costs.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One orderable drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkKind {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

/// Drinks offered on the tab, in menu order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DrinkCatalog {
    pub drinks: Vec<DrinkKind>,
}

impl DrinkCatalog {
    /// Parse a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The bundled catalog, or the built-in list if the asset fails to parse.
    #[must_use]
    pub fn load_default() -> Self {
        Self::from_json(include_str!("../data/drinks.json")).unwrap_or_else(|err| {
            log::warn!("bundled drink catalog unreadable, using built-in list: {err}");
            Self::builtin()
        })
    }

    #[must_use]
    pub fn builtin() -> Self {
        let drinks = [
            ("çay", "Çay", "☕"),
            ("kahve", "Kahve", "☕"),
            ("ayran", "Ayran", "🥛"),
            ("kola", "Kola", "🥤"),
            ("soda", "Soda", "🥤"),
            ("meyveli-soda", "Meyveli Soda", "🥤"),
            ("nescafe", "Nescafe", "☕"),
            ("su", "Su", "💧"),
        ]
        .into_iter()
        .map(|(id, name, emoji)| DrinkKind {
            id: id.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
        })
        .collect();
        Self { drinks }
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DrinkKind> {
        self.drinks.iter().find(|drink| drink.id == id)
    }
}

/// Total cost of the tab. Drinks without a price cost nothing.
#[must_use]
pub fn drink_bill(counts: &BTreeMap<String, u32>, prices: &BTreeMap<String, f64>) -> f64 {
    counts
        .iter()
        .map(|(id, count)| f64::from(*count) * prices.get(id).copied().unwrap_or(0.0))
        .sum()
}

/// Render a bill the way the table prices drinks: kuruş precision when
/// `fractional`, whole lira otherwise.
#[must_use]
pub fn format_bill(total: f64, fractional: bool) -> String {
    if fractional {
        format!("{total:.2}")
    } else {
        format!("{total:.0}")
    }
}
