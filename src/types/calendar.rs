//! Season calendar

use serde::{Deserialize, Serialize};

/// One round of a season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct RoundInfo {
    /// Round slug; doubles as the track identifier
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Race date as published (ISO date)
    pub date: String,
    #[serde(default)]
    pub official_name: String,
    #[serde(default)]
    pub round: u32,
}

/// Ordered rounds for one season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Calendar {
    pub year: i32,
    #[serde(default)]
    pub rounds: Vec<RoundInfo>,
}

impl Calendar {
    pub fn find_round(&self, id: &str) -> Option<&RoundInfo> {
        self.rounds.iter().find(|round| round.id == id)
    }

    /// (id, name) pairs in calendar order, for track pickers.
    pub fn track_list(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rounds.iter().map(|round| (round.id.as_str(), round.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calendar_and_finds_rounds() {
        let calendar: Calendar = serde_json::from_str(
            r#"{
                "year": 2025,
                "rounds": [
                    {"id": "australia", "name": "Australia", "location": "Melbourne",
                     "date": "2025-03-16", "officialName": "Formula 1 Louis Vuitton Australian Grand Prix 2025", "round": 1},
                    {"id": "china", "name": "China", "date": "2025-03-23", "round": 2}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(calendar.year, 2025);
        assert_eq!(calendar.find_round("china").map(|r| r.round), Some(2));
        assert!(calendar.find_round("monaco").is_none());
        assert_eq!(
            calendar.track_list().collect::<Vec<_>>(),
            vec![("australia", "Australia"), ("china", "China")]
        );
    }
}
