use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const SLOT_COUNT: usize = 4;
pub const SLOT_NAMES: [&str; SLOT_COUNT] = ["Morning", "Noon", "Evening", "Night"];
pub const UNDO_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DoseKey {
    pub date: NaiveDate,
    pub slot: u8,
}

impl DoseKey {
    pub fn new(date: NaiveDate, slot: u8) -> Self {
        Self { date, slot }
    }
}

impl fmt::Display for DoseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date, self.slot)
    }
}

impl std::str::FromStr for DoseKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (date_part, slot_part) = raw
            .rsplit_once('-')
            .ok_or_else(|| format!("invalid dose key: {raw}"))?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|_| format!("invalid date in dose key: {raw}"))?;
        let slot: u8 = slot_part
            .parse()
            .map_err(|_| format!("invalid slot in dose key: {raw}"))?;
        if usize::from(slot) >= SLOT_COUNT {
            return Err(format!("slot out of range in dose key: {raw}"));
        }
        Ok(Self { date, slot })
    }
}

impl TryFrom<String> for DoseKey {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<DoseKey> for String {
    fn from(key: DoseKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosePattern(pub [bool; SLOT_COUNT]);

impl Default for DosePattern {
    fn default() -> Self {
        let mut slots = [false; SLOT_COUNT];
        slots[0] = true;
        Self(slots)
    }
}

impl DosePattern {
    pub fn is_active(&self, slot: u8) -> bool {
        usize::from(slot) < SLOT_COUNT && self.0[usize::from(slot)]
    }

    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&active| active).count()
    }

    pub fn active_slots(&self) -> impl Iterator<Item = u8> + '_ {
        (0..SLOT_COUNT as u8).filter(|&slot| self.0[usize::from(slot)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoEntry {
    pub key: DoseKey,
    pub previous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerData {
    #[serde(default, with = "record_map")]
    pub records: BTreeSet<DoseKey>,
    #[serde(default)]
    pub dose_pattern: DosePattern,
    #[serde(default)]
    pub undo_stack: Vec<UndoEntry>,
}

// Records persist as a `"YYYY-MM-DD-N" -> true` map; absence means not taken.
// Entries with malformed keys or a false value are dropped on load.
mod record_map {
    use super::DoseKey;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn serialize<S>(records: &BTreeSet<DoseKey>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(records.len()))?;
        for key in records {
            map.serialize_entry(&key.to_string(), &true)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<DoseKey>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter(|(_, taken)| *taken)
            .filter_map(|(key, _)| key.parse().ok())
            .collect())
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: String,
    pub slot: u8,
}

#[derive(Debug, Deserialize)]
pub struct PatternRequest {
    pub slots: [bool; SLOT_COUNT],
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub start: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotView {
    pub slot: u8,
    pub name: String,
    pub active: bool,
    pub taken: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayView {
    pub date: String,
    pub weekday: String,
    pub is_today: bool,
    pub is_future: bool,
    pub complete: bool,
    pub slots: Vec<SlotView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekResponse {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DayView>,
    pub can_undo: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyCounts {
    pub taken: u32,
    pub open: u32,
    pub rate_percent: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Streaks {
    pub current: u32,
    pub best: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub month: MonthlyCounts,
    pub streaks: Streaks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub key: String,
    pub taken: bool,
    pub day: DayView,
    pub can_undo: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResponse {
    pub undone: bool,
    pub can_undo: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PatternResponse {
    pub slots: [bool; SLOT_COUNT],
    pub active_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(day: u32, slot: u8) -> DoseKey {
        DoseKey::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), slot)
    }

    #[test]
    fn dose_key_parses_canonical_form_only() {
        assert_eq!("2024-06-01-0".parse::<DoseKey>().unwrap(), key(1, 0));
        assert!("2024-06-01-4".parse::<DoseKey>().is_err());
        assert!("2024-13-01-0".parse::<DoseKey>().is_err());
        assert!("not-a-date-9".parse::<DoseKey>().is_err());
        assert!("junk".parse::<DoseKey>().is_err());
    }

    #[test]
    fn snapshot_load_drops_malformed_and_false_records() {
        let raw = r#"{
            "records": {
                "2024-06-01-0": true,
                "2024-06-02-0": false,
                "not-a-date-9": true,
                "2024-06-03-7": true
            }
        }"#;

        let data: TrackerData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.records.len(), 1);
        assert!(data.records.contains(&key(1, 0)));
    }

    #[test]
    fn snapshot_load_defaults_missing_fields() {
        let data: TrackerData = serde_json::from_str("{}").unwrap();
        assert!(data.records.is_empty());
        assert_eq!(data.dose_pattern, DosePattern::default());
        assert_eq!(data.dose_pattern.active_count(), 1);
        assert!(data.undo_stack.is_empty());
    }

    #[test]
    fn records_serialize_as_true_only_map() {
        let mut data = TrackerData::default();
        data.records.insert(key(1, 0));
        data.records.insert(key(2, 3));

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["records"]["2024-06-01-0"], serde_json::json!(true));
        assert_eq!(json["records"]["2024-06-02-3"], serde_json::json!(true));
        assert_eq!(json["records"].as_object().unwrap().len(), 2);

        let restored: TrackerData = serde_json::from_value(json).unwrap();
        assert_eq!(restored.records, data.records);
    }
}
