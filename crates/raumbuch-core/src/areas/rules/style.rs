//! Blueprint style detection.

use serde::Serialize;

use super::patterns::*;
use crate::models::room::BlueprintStyle;

/// Raw probe results behind a style decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StyleSignals {
    /// `F: 22,79` (haardtring area label).
    pub has_f_colon: bool,
    /// `F= 50.37` (legacy leiq area label).
    pub has_f_equals: bool,
    /// `NRF: 3,45` (modern leiq area label).
    pub has_nrf: bool,
    /// `NGF: 20,00` (omniturm area label).
    pub has_ngf: bool,
    /// `R2.E5.3.5`, `R1A` or `E.E0.2.1` room numbers.
    pub has_haardtring_rooms: bool,
    /// `B.00.2.002` room numbers.
    pub has_b_pattern: bool,
    /// `03_b6.12` room numbers.
    pub has_grid_pattern: bool,
    /// `BA:`, `B:`, `W:`, `D:` metadata codes.
    pub has_haardtring_codes: bool,
}

impl StyleSignals {
    /// Run all probes over the document text.
    pub fn probe(text: &str) -> Self {
        Self {
            has_f_colon: PROBE_F_COLON.is_match(text),
            has_f_equals: PROBE_F_EQUALS.is_match(text),
            has_nrf: PROBE_NRF.is_match(text),
            has_ngf: PROBE_NGF.is_match(text),
            has_haardtring_rooms: PROBE_R_FULL.is_match(text)
                || PROBE_R_SIMPLE.is_match(text)
                || PROBE_E_APARTMENT.is_match(text),
            has_b_pattern: PROBE_B_ROOM.is_match(text),
            has_grid_pattern: PROBE_GRID_ROOM.is_match(text),
            has_haardtring_codes: PROBE_HAARDTRING_CODES.is_match(text),
        }
    }

    /// Resolve the probes to a style. The first matching rule wins.
    pub fn style(&self) -> BlueprintStyle {
        if self.has_f_colon && self.has_haardtring_rooms {
            BlueprintStyle::Haardtring
        } else if self.has_f_colon && self.has_haardtring_codes {
            BlueprintStyle::Haardtring
        } else if self.has_nrf && self.has_b_pattern {
            BlueprintStyle::Leiq
        } else if self.has_f_equals && self.has_b_pattern {
            BlueprintStyle::Leiq
        } else if self.has_ngf {
            BlueprintStyle::Omniturm
        } else if self.has_nrf || self.has_f_equals {
            BlueprintStyle::Leiq
        } else if self.has_f_colon {
            BlueprintStyle::Haardtring
        } else {
            BlueprintStyle::Unknown
        }
    }
}

/// Classify the concatenated document text into a blueprint style.
pub fn detect_blueprint_style(text: &str) -> BlueprintStyle {
    StyleSignals::probe(text).style()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_haardtring() {
        let text = "R2.E5.3.5\nSchlafen\nF: 12,34 m²\n";
        assert_eq!(detect_blueprint_style(text), BlueprintStyle::Haardtring);
    }

    #[test]
    fn test_detect_haardtring_by_codes() {
        let text = "Wohnung 4\nF: 55,10 m²\nBA: 2\nW: 1\n";
        assert_eq!(detect_blueprint_style(text), BlueprintStyle::Haardtring);
    }

    #[test]
    fn test_detect_leiq_modern_and_legacy() {
        assert_eq!(
            detect_blueprint_style("B.00.2.002\nBüro\nNRF: 3,45 m2"),
            BlueprintStyle::Leiq
        );
        assert_eq!(
            detect_blueprint_style("B.00.2.002\nBüro\nF= 50.37 m²"),
            BlueprintStyle::Leiq
        );
    }

    #[test]
    fn test_detect_omniturm() {
        assert_eq!(
            detect_blueprint_style("03_b6.12\nBüro\nNGF: 20,00 m2"),
            BlueprintStyle::Omniturm
        );
        assert_eq!(detect_blueprint_style("NGF: 7,5 m2"), BlueprintStyle::Omniturm);
    }

    #[test]
    fn test_detect_label_only_fallbacks() {
        assert_eq!(detect_blueprint_style("NRF: 3,45 m2"), BlueprintStyle::Leiq);
        assert_eq!(detect_blueprint_style("F: 3,45 m2"), BlueprintStyle::Haardtring);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(
            detect_blueprint_style("Grundriss EG\nMaßstab 1:100"),
            BlueprintStyle::Unknown
        );
        assert_eq!(detect_blueprint_style(""), BlueprintStyle::Unknown);
    }

    #[test]
    fn test_detection_is_pure() {
        let text = "B.00.2.002\nBüro\nNRF: 3,45 m2";
        assert_eq!(detect_blueprint_style(text), detect_blueprint_style(text));
    }

    #[test]
    fn test_signals() {
        let signals = StyleSignals::probe("03_b6.12\nNGF: 20,00 m2");
        assert_eq!(
            signals,
            StyleSignals {
                has_ngf: true,
                has_grid_pattern: true,
                ..Default::default()
            }
        );
    }
}
