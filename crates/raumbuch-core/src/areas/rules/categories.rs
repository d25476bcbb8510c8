//! Room categorization by German construction vocabulary.

use crate::models::room::RoomCategory;

/// Keyword table, searched in order. The first category with a matching
/// keyword wins.
pub static ROOM_CATEGORIES: &[(RoomCategory, &[&str])] = &[
    (RoomCategory::Office, &["büro", "office", "nutzungseinheit", "back office"]),
    (
        RoomCategory::Residential,
        &["schlafen", "wohnen", "essen", "kochen", "zimmer", "küche"],
    ),
    (
        RoomCategory::Circulation,
        &["flur", "diele", "schleuse", "vorraum", "eingang", "lobby"],
    ),
    (RoomCategory::Stairs, &["treppe", "treppenhaus", "trh"]),
    (
        RoomCategory::Elevators,
        &["aufzug", "lift", "aufzugsschacht", "aufzugsvorr"],
    ),
    (
        RoomCategory::Shafts,
        &["schacht", "lüftung", "medien", "druckbelüftung"],
    ),
    (
        RoomCategory::Technical,
        &["elektro", "technik", "hwr", "it verteiler", "elt", "glt", "fiz"],
    ),
    (
        RoomCategory::Sanitary,
        &["wc", "bad", "dusche", "gästebad", "umkleide", "sanitär"],
    ),
    (
        RoomCategory::Storage,
        &["lager", "abstellraum", "müll", "fahrrad"],
    ),
    (
        RoomCategory::Outdoor,
        &["balkon", "terrasse", "loggia", "dachterrasse", "freisitz"],
    ),
];

/// Determine the room category from its name.
pub fn categorize_room(room_name: &str) -> RoomCategory {
    let name = room_name.to_lowercase();
    if name.is_empty() {
        return RoomCategory::Other;
    }

    ROOM_CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(RoomCategory::Other)
}

/// Whether the room is outdoor space (balcony, terrace, ...).
pub fn is_outdoor_room(room_name: &str) -> bool {
    categorize_room(room_name) == RoomCategory::Outdoor
}
