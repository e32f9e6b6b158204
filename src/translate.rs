//! Locale translation tables with default-locale fallback.
//!
//! Instruction text is resolved per request locale. A locale without a
//! table, or a key missing from a table, falls back to the default locale
//! instead of failing the request.

use std::collections::HashMap;

static EN: &[(&str, &str)] = &[
    ("continue", "Continue"),
    ("u_turn", "Make a U-turn"),
    ("sharp_left", "Turn sharp left"),
    ("left", "Turn left"),
    ("slight_left", "Turn slight left"),
    ("slight_right", "Turn slight right"),
    ("right", "Turn right"),
    ("sharp_right", "Turn sharp right"),
    ("finish", "Arrive at destination"),
    ("reached_via", "Waypoint reached"),
    ("roundabout_exit", "At the roundabout, take exit %s"),
    ("onto", "onto %s"),
    ("in_m", "In %s meters"),
    ("in_km", "In %s kilometers"),
    ("in_ft", "In %s feet"),
    ("in_mi", "In %s miles"),
    ("then", "then"),
];

static DE: &[(&str, &str)] = &[
    ("continue", "Geradeaus weiterfahren"),
    ("u_turn", "Wenden"),
    ("sharp_left", "Scharf links abbiegen"),
    ("left", "Links abbiegen"),
    ("slight_left", "Leicht links abbiegen"),
    ("slight_right", "Leicht rechts abbiegen"),
    ("right", "Rechts abbiegen"),
    ("sharp_right", "Scharf rechts abbiegen"),
    ("finish", "Sie haben Ihr Ziel erreicht"),
    ("reached_via", "Zwischenziel erreicht"),
    ("roundabout_exit", "Im Kreisverkehr Ausfahrt %s nehmen"),
    ("onto", "auf %s"),
    ("in_m", "In %s Metern"),
    ("in_km", "In %s Kilometern"),
    ("in_ft", "In %s Fu\u{df}"),
    ("in_mi", "In %s Meilen"),
    ("then", "dann"),
];

/// Read-only map from locale and key to display text.
#[derive(Debug, Clone)]
pub struct TranslationMap {
    tables: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    default_locale: String,
}

impl TranslationMap {
    pub fn new(default_locale: &str) -> Self {
        let mut tables = HashMap::new();
        tables.insert("en", EN.iter().copied().collect());
        tables.insert("de", DE.iter().copied().collect());
        Self {
            tables,
            default_locale: default_locale.to_string(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Resolve `key` for `locale`, falling back to the default locale and
    /// finally to the key itself so a missing entry never fails a request.
    pub fn tr(&self, locale: &str, key: &str) -> String {
        self.lookup(locale, key)
            .or_else(|| self.lookup(&self.default_locale, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Like [`tr`](Self::tr), substituting `arg` for the `%s` placeholder.
    pub fn tr1(&self, locale: &str, key: &str, arg: &str) -> String {
        self.tr(locale, key).replace("%s", arg)
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&'static str> {
        self.tables
            .get(language_of(locale))
            .and_then(|table| table.get(key))
            .copied()
    }
}

impl Default for TranslationMap {
    fn default() -> Self {
        Self::new("en")
    }
}

/// Reduce `de-DE` or `de_DE` style locales to the bare language part.
fn language_of(locale: &str) -> &str {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
}
