//! Operational Settings Model

use serde::{Deserialize, Serialize};

/// Store-wide operational settings (singleton record)
///
/// The `Default` impl is the fixed fallback used whenever the record is
/// absent from the store. There are no cross-field invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Delivery fee in currency unit
    pub delivery_fee: f64,
    pub is_open: bool,
    /// "HH:MM"
    pub opening_hours: String,
    /// "HH:MM"
    pub closing_hours: String,
    pub status_message: String,
    pub sound_enabled: bool,
    /// 0-100
    pub sound_volume: u8,
    pub auto_refresh: bool,
    pub refresh_interval_ms: u64,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delivery_fee: 8.00,
            is_open: true,
            opening_hours: "18:00".to_string(),
            closing_hours: "23:00".to_string(),
            status_message: "Open for orders!".to_string(),
            sound_enabled: true,
            sound_volume: 50,
            auto_refresh: true,
            refresh_interval_ms: 5000,
            theme: "light".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let settings = Settings::default();
        assert!(settings.is_open);
        assert_eq!(settings.delivery_fee, 8.00);
        assert_eq!(settings.opening_hours, "18:00");
        assert_eq!(settings.closing_hours, "23:00");
        assert_eq!(settings.sound_volume, 50);
        assert_eq!(settings.refresh_interval_ms, 5000);
        assert_eq!(settings.theme, "light");
    }
}
