//! Regex patterns for German floor-plan area extraction.
//!
//! Line patterns are applied to trimmed lines and are anchored with `^`
//! unless noted otherwise.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Style detection probes (searched anywhere in the document text)
    pub static ref PROBE_F_COLON: Regex = Regex::new(r"\bF:\s*[\d,]+").unwrap();
    pub static ref PROBE_F_EQUALS: Regex = Regex::new(r"\bF=\s*[\d.,]+").unwrap();
    pub static ref PROBE_NRF: Regex = Regex::new(r"(?i)\bNRF:\s*[\d,]+").unwrap();
    pub static ref PROBE_NGF: Regex = Regex::new(r"(?i)\bNGF:\s*[\d.,]+").unwrap();

    pub static ref PROBE_R_FULL: Regex = Regex::new(r"\bR\d+\.E\d+\.\d+\.\d+\b").unwrap();
    pub static ref PROBE_R_SIMPLE: Regex = Regex::new(r"\bR\d+[A-Z]\b").unwrap();
    pub static ref PROBE_E_APARTMENT: Regex = Regex::new(r"\bE\.[A-Z0-9]+\.\d+\.\d+\b").unwrap();
    pub static ref PROBE_B_ROOM: Regex = Regex::new(r"\bB\.\d+\.\d+\.\d+\b").unwrap();
    pub static ref PROBE_GRID_ROOM: Regex = Regex::new(r"\b\d+_[a-z]\d+\.\d+\b").unwrap();

    // Haardtring metadata codes (BA: 2,50 / B: 1 / W: 3 / D: 1)
    pub static ref PROBE_HAARDTRING_CODES: Regex = Regex::new(r"\b(BA:|B:|W:|D:)\s*\d").unwrap();

    // Haardtring (residential): R2.E5.3.5, R1A, E.E0.2.1
    pub static ref HAARDTRING_ROOM_FULL: Regex = Regex::new(r"^(R\d+\.E\d+\.\d+\.\d+)").unwrap();
    pub static ref HAARDTRING_ROOM_SIMPLE: Regex = Regex::new(r"^(R\d+[A-Z])").unwrap();
    pub static ref HAARDTRING_ROOM_APARTMENT: Regex = Regex::new(r"^(E\.[A-Z0-9]+(?:\.\d+)+)").unwrap();

    pub static ref HAARDTRING_AREA: Regex = Regex::new(r"(?i)^F:\s*([\d,]+)\s*m[²2]?").unwrap();
    pub static ref HAARDTRING_AREA_VALUE: Regex = Regex::new(r"^([\d,]+)\s*m[²2]?").unwrap();
    pub static ref HAARDTRING_OVERRIDE: Regex = Regex::new(r"(?i)^50%:\s*([\d,]+)\s*m[²2]?").unwrap();
    pub static ref HAARDTRING_NOT_A_NAME: Regex = Regex::new(r"^(F:|BA:|B:|W:|D:|[\d,]+)").unwrap();

    // LeiQ (office): B.00.2.002, B.00.2.002-A
    pub static ref LEIQ_ROOM: Regex = Regex::new(r"^(B\.\d+\.[0-9A-Z]+\.[A-Z]?\d+(?:-[A-Z])?)").unwrap();

    pub static ref LEIQ_AREA_MODERN: Regex = Regex::new(r"(?i)^NRF[=:]\s*([\d.,]+)\s*m[²2]?").unwrap();
    pub static ref LEIQ_AREA_LEGACY: Regex = Regex::new(r"(?i)^F[=:]\s*([\d.,]+)\s*m[²2]?").unwrap();
    pub static ref LEIQ_AREA_VALUE: Regex = Regex::new(r"^([\d.,]+)\s*m[²2]?").unwrap();
    pub static ref LEIQ_PERIMETER: Regex = Regex::new(r"(?i)^U[=:]\s*([\d.,]+)\s*m\b").unwrap();
    pub static ref LEIQ_HEIGHT: Regex = Regex::new(r"(?i)^L(?:R)?H[=:]\s*([\d.,]+)\s*m\b").unwrap();
    pub static ref LEIQ_NOT_A_NAME: Regex = Regex::new(r"(?i)^(NRF|F[=:]|U[=:]|LH[=:]|LRH[=:]|B\.|[\d,]+)").unwrap();

    // Omniturm (high-rise): 03_b6.12, BT1.TR.01
    pub static ref OMNITURM_ROOM: Regex = Regex::new(r"^(\d+_[a-z]\d+\.\d+|BT\d+\.[A-Z]+\.\d+)").unwrap();

    pub static ref OMNITURM_AREA: Regex = Regex::new(r"(?i)^NGF:\s*([\d.,]+)\s*m[²2]?").unwrap();
    pub static ref OMNITURM_AREA_VALUE: Regex = Regex::new(r"^([\d.,]+)\s*m[²2]?").unwrap();
    pub static ref OMNITURM_SHAFT: Regex = Regex::new(r"(?i)^(Schacht\s*\d+)").unwrap();
    pub static ref OMNITURM_SHAFT_AREA: Regex = Regex::new(r"^([\d,]+)\s*m[²2]?").unwrap();
    pub static ref OMNITURM_NOT_A_NAME: Regex = Regex::new(r"^(NGF|UKRD|UKFD|OKFF|OKRF|LRH|[\d,]+\s*m|Schacht)").unwrap();

    // Generic area labels (searched anywhere in the line)
    pub static ref GENERIC_AREA_LABELED: Regex = Regex::new(
        r"(?i)(?:NRF|NGF|BGF|Fläche|Fl|FL|GF|WF|NF)\s*[=:]\s*([\d.,]+)\s*m[²2]?"
    ).unwrap();
    pub static ref GENERIC_AREA_SHORT: Regex = Regex::new(r"(?i)^F\s*[=:]\s*([\d.,]+)\s*m[²2]?").unwrap();
    pub static ref GENERIC_AREA_QM: Regex = Regex::new(
        r"(?i)(?:NRF|NGF|Fläche)\s*[=:]\s*([\d.,]+)\s*qm\b"
    ).unwrap();

    // Generic room identifiers
    pub static ref GENERIC_ROOM_DOTTED: Regex = Regex::new(
        r"(?i)^([A-Z]+\d*[._][A-Z0-9]+[._][A-Z0-9]+[._][A-Z0-9]+)"
    ).unwrap();
    pub static ref GENERIC_ROOM_GRID: Regex = Regex::new(r"^(\d+_[a-z]\d+\.\d+)").unwrap();
    pub static ref GENERIC_ROOM_FLOOR: Regex = Regex::new(r"(?i)^([EOU]G\d*[._]\d{3})").unwrap();
    pub static ref GENERIC_ROOM_SHORT: Regex = Regex::new(r"(?i)^([A-Z][._]\d{3})").unwrap();

    // Lines that cannot be a room name in generic mode
    pub static ref GENERIC_NUMERIC_LINE: Regex = Regex::new(r"^[\d,.\s]+$").unwrap();
    pub static ref GENERIC_LABEL_LINE: Regex = Regex::new(
        r"(?i)^(NRF|NGF|F|U|LH|BA|B|W|D|OK|UK|UKRD|OKFF)[\s:=]"
    ).unwrap();
    pub static ref GENERIC_VALUE_LINE: Regex = Regex::new(r"^[\d.,]+\s*m[²2]?$").unwrap();

    // Plain-text fallback: NRF labels only
    pub static ref FALLBACK_NRF: Regex = Regex::new(r"(?i)NRF\s*:\s*(\d+[,.]?\d*)\s*m[²2]?").unwrap();
}

/// Haardtring room-number grammars, in match priority order.
pub fn haardtring_room_patterns() -> [&'static Regex; 3] {
    [
        &HAARDTRING_ROOM_FULL,
        &HAARDTRING_ROOM_SIMPLE,
        &HAARDTRING_ROOM_APARTMENT,
    ]
}

/// Generic area label patterns, first match per line wins.
pub fn generic_area_patterns() -> [&'static Regex; 3] {
    [&GENERIC_AREA_LABELED, &GENERIC_AREA_SHORT, &GENERIC_AREA_QM]
}

/// Generic room identifier patterns, first match per line wins.
pub fn generic_room_patterns() -> [&'static Regex; 4] {
    [
        &GENERIC_ROOM_DOTTED,
        &GENERIC_ROOM_GRID,
        &GENERIC_ROOM_FLOOR,
        &GENERIC_ROOM_SHORT,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haardtring_room_patterns() {
        assert!(HAARDTRING_ROOM_FULL.is_match("R2.E5.3.5"));
        assert!(HAARDTRING_ROOM_SIMPLE.is_match("R1A"));
        assert!(HAARDTRING_ROOM_APARTMENT.is_match("E.E0.2.1"));
        assert!(!HAARDTRING_ROOM_SIMPLE.is_match("R2.E5.3.5"));
    }

    #[test]
    fn test_leiq_room_pattern_with_suffix() {
        let caps = LEIQ_ROOM.captures("B.00.2.002-A Büro").unwrap();
        assert_eq!(&caps[1], "B.00.2.002-A");
        assert!(LEIQ_ROOM.is_match("B.01.K.U12"));
    }

    #[test]
    fn test_area_units() {
        assert!(HAARDTRING_AREA.is_match("F: 22,79 m²"));
        assert!(HAARDTRING_AREA.is_match("F: 22,79 m2"));
        assert!(HAARDTRING_AREA.is_match("F: 22,79"));
        assert!(GENERIC_AREA_QM.is_match("Fläche = 18,5 qm"));
        assert!(!GENERIC_AREA_QM.is_match("Fläche = 18,5 qmx"));
    }

    #[test]
    fn test_perimeter_and_height() {
        assert_eq!(&LEIQ_PERIMETER.captures("U: 14,20 m").unwrap()[1], "14,20");
        assert_eq!(&LEIQ_PERIMETER.captures("U= 14.20 m").unwrap()[1], "14.20");
        assert_eq!(&LEIQ_HEIGHT.captures("LRH= 2,75 m").unwrap()[1], "2,75");
        assert_eq!(&LEIQ_HEIGHT.captures("LH: 3,00 m").unwrap()[1], "3,00");
    }

    #[test]
    fn test_fallback_pattern_searches_anywhere() {
        let caps = FALLBACK_NRF.captures("Büro NRF : 12,5 m2 U: 14 m").unwrap();
        assert_eq!(&caps[1], "12,5");
    }
}
