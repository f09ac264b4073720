//! Session selection state
//!
//! Everything the user has picked so far: origin, up to three targets,
//! profession, visa type and preference weights. Owned by the caller and
//! passed explicitly to the analyzer.

use crate::loader::sanitize_code;
use crate::{
    PreferenceDimension, UserPreferences, DEFAULT_VISA_TYPE, MAX_PREFERENCE,
    MAX_TARGET_COUNTRIES, MIN_PREFERENCE,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of a target toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Already at capacity; nothing changed
    Full,
    /// Code was empty after normalization; nothing changed
    Ignored,
}

/// Deserialized targets are replayed through [`SelectionState::toggle_target`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSelectionState")]
pub struct SelectionState {
    /// Origin country code
    pub current_country: Option<String>,
    /// Target country codes in selection order
    target_countries: Vec<String>,
    pub profession: Option<String>,
    pub visa_type: String,
    pub preferences: UserPreferences,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            current_country: None,
            target_countries: Vec::with_capacity(MAX_TARGET_COUNTRIES),
            profession: None,
            visa_type: DEFAULT_VISA_TYPE.to_string(),
            preferences: UserPreferences::default(),
        }
    }
}

/// Selection state as read from JSON, before normalization
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawSelectionState {
    current_country: Option<String>,
    target_countries: Vec<String>,
    profession: Option<String>,
    visa_type: String,
    preferences: UserPreferences,
}

impl Default for RawSelectionState {
    fn default() -> Self {
        let state = SelectionState::default();
        Self {
            current_country: state.current_country,
            target_countries: state.target_countries,
            profession: state.profession,
            visa_type: state.visa_type,
            preferences: state.preferences,
        }
    }
}

impl From<RawSelectionState> for SelectionState {
    fn from(raw: RawSelectionState) -> Self {
        let mut state = SelectionState::new().with_preferences(raw.preferences);
        if let Some(code) = raw.current_country {
            state.set_current_country(&code);
        }
        for code in &raw.target_countries {
            if state.is_target(code) {
                warn!("Dropping duplicate target {}", code);
                continue;
            }
            if state.toggle_target(code) == ToggleOutcome::Full {
                warn!("Target list full, dropping {}", code);
            }
        }
        state.set_profession(raw.profession);
        state.set_visa_type(raw.visa_type);
        state
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn set_current_country(&mut self, code: &str) {
        let code = sanitize_code(code);
        self.current_country = if code.is_empty() { None } else { Some(code) };
    }

    pub fn clear_current_country(&mut self) {
        self.current_country = None;
    }

    /// Select a target, or deselect it if already selected. Selecting a new
    /// code when [`MAX_TARGET_COUNTRIES`] are already chosen is a no-op.
    pub fn toggle_target(&mut self, code: &str) -> ToggleOutcome {
        let code = sanitize_code(code);
        if code.is_empty() {
            return ToggleOutcome::Ignored;
        }

        if let Some(pos) = self.target_countries.iter().position(|c| *c == code) {
            self.target_countries.remove(pos);
            debug!("Deselected target {}", code);
            return ToggleOutcome::Removed;
        }

        if self.target_countries.len() >= MAX_TARGET_COUNTRIES {
            debug!("Target list full, ignoring {}", code);
            return ToggleOutcome::Full;
        }

        debug!("Selected target {}", code);
        self.target_countries.push(code);
        ToggleOutcome::Added
    }

    pub fn target_countries(&self) -> &[String] {
        &self.target_countries
    }

    pub fn is_target(&self, code: &str) -> bool {
        let code = sanitize_code(code);
        self.target_countries.iter().any(|c| *c == code)
    }

    /// True once no further target can be added
    pub fn targets_full(&self) -> bool {
        self.target_countries.len() >= MAX_TARGET_COUNTRIES
    }

    pub fn set_profession(&mut self, profession: Option<String>) {
        self.profession = profession.filter(|p| !p.trim().is_empty());
    }

    pub fn set_visa_type(&mut self, visa_type: impl Into<String>) {
        self.visa_type = visa_type.into();
    }

    /// Slider update; the value is clamped to the slider range 1-10
    pub fn set_preference(&mut self, dimension: PreferenceDimension, value: f64) {
        let value = if value.is_nan() {
            MIN_PREFERENCE
        } else {
            value.clamp(MIN_PREFERENCE, MAX_PREFERENCE)
        };
        self.preferences.set(dimension, value);
    }

    /// Replace all weights as given, without clamping
    pub fn set_preferences(&mut self, preferences: UserPreferences) {
        self.preferences = preferences;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = SelectionState::new();
        assert_eq!(state.visa_type, "Work Visa");
        assert!(state.current_country.is_none());
        assert!(state.target_countries().is_empty());
        assert_eq!(state.preferences, UserPreferences::default());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut state = SelectionState::new();
        assert_eq!(state.toggle_target("NL"), ToggleOutcome::Added);
        assert_eq!(state.toggle_target("ca"), ToggleOutcome::Added);
        assert_eq!(state.target_countries(), &["NL".to_string(), "CA".to_string()]);

        assert_eq!(state.toggle_target("NL"), ToggleOutcome::Removed);
        assert_eq!(state.target_countries(), &["CA".to_string()]);
        assert!(!state.is_target("nl"));
    }

    #[test]
    fn test_fourth_target_is_noop() {
        let mut state = SelectionState::new();
        for code in ["NL", "CA", "AU"] {
            state.toggle_target(code);
        }
        let before = state.clone();

        assert_eq!(state.toggle_target("DE"), ToggleOutcome::Full);
        assert_eq!(state, before);
        assert!(state.targets_full());

        // Deselecting still works at capacity
        assert_eq!(state.toggle_target("CA"), ToggleOutcome::Removed);
        assert_eq!(state.toggle_target("DE"), ToggleOutcome::Added);
        assert_eq!(
            state.target_countries(),
            &["NL".to_string(), "AU".to_string(), "DE".to_string()]
        );
    }

    #[test]
    fn test_empty_code_ignored() {
        let mut state = SelectionState::new();
        assert_eq!(state.toggle_target("  "), ToggleOutcome::Ignored);
        assert!(state.target_countries().is_empty());

        state.set_current_country("in");
        assert_eq!(state.current_country.as_deref(), Some("IN"));
        state.set_current_country("");
        assert!(state.current_country.is_none());
    }

    #[test]
    fn test_slider_clamps() {
        let mut state = SelectionState::new();
        state.set_preference(PreferenceDimension::ClimateSuitability, 14.0);
        state.set_preference(PreferenceDimension::SafetyAndSecurity, -3.0);
        assert_eq!(state.preferences.climate_suitability, 10.0);
        assert_eq!(state.preferences.safety_and_security, 1.0);
    }

    #[test]
    fn test_blank_profession_cleared() {
        let mut state = SelectionState::new();
        state.set_profession(Some("Registered Nurse".into()));
        assert_eq!(state.profession.as_deref(), Some("Registered Nurse"));
        state.set_profession(Some("   ".into()));
        assert!(state.profession.is_none());
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut state = SelectionState::new();
        state.set_current_country("IN");
        state.toggle_target("NL");
        state.set_visa_type("Skilled Migrant Visa");

        let json = serde_json::to_string(&state).unwrap();
        let restored: SelectionState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_loaded_targets_are_normalized() {
        let state: SelectionState = serde_json::from_str(
            r#"{"current_country": "in", "target_countries": ["NL", "CA", "nl", " au ", "DE", "NL"]}"#,
        )
        .unwrap();

        assert_eq!(state.current_country.as_deref(), Some("IN"));
        assert_eq!(
            state.target_countries(),
            &["NL".to_string(), "CA".to_string(), "AU".to_string()]
        );
        assert!(state.targets_full());
        assert_eq!(state.visa_type, "Work Visa");

        let dataset = crate::Dataset::embedded().unwrap();
        let report = crate::analyze(&dataset, &state, None);
        assert_eq!(report.results.len(), MAX_TARGET_COUNTRIES);
    }

    #[test]
    fn test_loaded_state_drops_blank_codes() {
        let state: SelectionState =
            serde_json::from_str(r#"{"target_countries": ["", "--", "ch"]}"#).unwrap();
        assert_eq!(state.target_countries(), &["CH".to_string()]);
    }
}
