use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Days a space is open for booking. Document form is the lowercase name
/// ("monday", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => WeekDay::Monday,
            Weekday::Tue => WeekDay::Tuesday,
            Weekday::Wed => WeekDay::Wednesday,
            Weekday::Thu => WeekDay::Thursday,
            Weekday::Fri => WeekDay::Friday,
            Weekday::Sat => WeekDay::Saturday,
            Weekday::Sun => WeekDay::Sunday,
        }
    }
}

impl Serialize for WeekDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WeekDay::from_str(&raw)
            .map_err(|_| serde::de::Error::custom(format!("unknown weekday: {}", raw)))
    }
}

/// The kind of bookable unit. Open tag: unknown document values land in
/// `Other` rather than failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SpaceType {
    Room,
    Seat,
    Desk,
    Meeting,
    #[strum(default)]
    Other(String),
}

impl Serialize for SpaceType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpaceType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // FromStr is infallible here thanks to the Other fallback.
        Ok(SpaceType::from_str(&raw).unwrap_or(SpaceType::Other(raw)))
    }
}

/// Daily opening window, wall-clock. Documents store "HH:MM" strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTime {
    #[serde(with = "wall_clock")]
    pub start: NaiveTime,
    #[serde(with = "wall_clock")]
    pub end: NaiveTime,
}

impl fmt::Display for WorkingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Serde adapter for "HH:MM" wall-clock strings. Accepts a trailing
/// ":SS" on read since some older documents carry one.
mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| serde::de::Error::custom(format!("invalid wall-clock time: {}", raw)))
    }
}

/// A published, bookable workspace.
///
/// The remote store is the single writer of record; clients hold read-only
/// projections of this shape. Field names on the wire are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,
    pub name: String,
    pub address: String,
    pub geo_address: String,
    pub working_days: Vec<WeekDay>,
    pub working_time: WorkingTime,
    pub capacity: u32,
    /// Minimum booking length, minutes.
    pub min_duration: u32,
    /// Maximum booking length, minutes.
    pub max_duration: u32,
    pub min_charge: f64,
    pub max_charge: f64,
    pub images: Vec<String>,
    pub contact_line: String,
    pub features: Vec<String>,
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Soft-hide flag; records are never physically deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Space {
    /// Whether the space is open at `instant`: its weekday is a working day
    /// and its wall-clock time falls in `[start, end)`.
    ///
    /// Evaluated against UTC; `instant` should come from the synced server
    /// clock, never the raw device clock.
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> bool {
        let day = WeekDay::from(instant.weekday());
        if !self.working_days.contains(&day) {
            return false;
        }
        let time = instant.time();
        self.working_time.start <= time && time < self.working_time.end
    }
}

/// Payload for publishing a new space. Id and timestamps are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpace {
    pub name: String,
    pub address: String,
    pub geo_address: String,
    pub working_days: Vec<WeekDay>,
    pub working_time: WorkingTime,
    pub capacity: u32,
    pub min_duration: u32,
    pub max_duration: u32,
    pub min_charge: f64,
    pub max_charge: f64,
    pub images: Vec<String>,
    pub contact_line: String,
    pub features: Vec<String>,
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Partial edit of a published space. Absent fields are preserved by the
/// store's merge write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_days: Option<Vec<WeekDay>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_time: Option<WorkingTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub space_type: Option<SpaceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl UpdateSpace {
    /// The record as it would read after merging this edit into `space`.
    /// Used to validate an edit before anything is written.
    pub fn apply_to(&self, space: &Space) -> Space {
        Space {
            id: space.id.clone(),
            name: self.name.clone().unwrap_or_else(|| space.name.clone()),
            address: self.address.clone().unwrap_or_else(|| space.address.clone()),
            geo_address: self
                .geo_address
                .clone()
                .unwrap_or_else(|| space.geo_address.clone()),
            working_days: self
                .working_days
                .clone()
                .unwrap_or_else(|| space.working_days.clone()),
            working_time: self.working_time.unwrap_or(space.working_time),
            capacity: self.capacity.unwrap_or(space.capacity),
            min_duration: self.min_duration.unwrap_or(space.min_duration),
            max_duration: self.max_duration.unwrap_or(space.max_duration),
            min_charge: self.min_charge.unwrap_or(space.min_charge),
            max_charge: self.max_charge.unwrap_or(space.max_charge),
            images: self.images.clone().unwrap_or_else(|| space.images.clone()),
            contact_line: self
                .contact_line
                .clone()
                .unwrap_or_else(|| space.contact_line.clone()),
            features: self
                .features
                .clone()
                .unwrap_or_else(|| space.features.clone()),
            space_type: self
                .space_type
                .clone()
                .unwrap_or_else(|| space.space_type.clone()),
            description: self.description.clone().or_else(|| space.description.clone()),
            visible: self.visible.or(space.visible),
            created_at: space.created_at,
            updated_at: space.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_space() -> Space {
        serde_json::from_value(serde_json::json!({
            "id": "s1",
            "name": "Loft 12",
            "address": "12 Mill Lane",
            "geoAddress": "51.5,-0.1",
            "workingDays": ["monday", "tuesday", "wednesday"],
            "workingTime": {"start": "09:00", "end": "18:00"},
            "capacity": 8,
            "minDuration": 30,
            "maxDuration": 480,
            "minCharge": 5.0,
            "maxCharge": 40.0,
            "images": [],
            "contactLine": "+44 20 0000 0000",
            "features": ["wifi", "projector"],
            "type": "room"
        }))
        .unwrap()
    }

    #[test]
    fn test_camel_case_document_round_trip() {
        let space = sample_space();
        assert_eq!(space.space_type, SpaceType::Room);
        assert_eq!(space.working_days.len(), 3);
        assert_eq!(
            space.working_time.start,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );

        let json = serde_json::to_value(&space).unwrap();
        assert_eq!(json["geoAddress"], "51.5,-0.1");
        assert_eq!(json["type"], "room");
        assert_eq!(json["workingTime"]["start"], "09:00");
    }

    #[test]
    fn test_unknown_space_type_is_open_tag() {
        let parsed: SpaceType = serde_json::from_value(serde_json::json!("studio")).unwrap();
        assert_eq!(parsed, SpaceType::Other("studio".to_string()));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), "studio");
    }

    #[test]
    fn test_is_open_at_honors_days_and_window() {
        let space = sample_space();

        // Monday 2024-01-01, 10:00 UTC: open.
        let open = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert!(space.is_open_at(open));

        // The window includes its start instant and excludes its end.
        let opening = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        assert!(space.is_open_at(opening));
        let before_opening = Utc.with_ymd_and_hms(2024, 1, 1, 8, 59, 59).unwrap();
        assert!(!space.is_open_at(before_opening));
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
        assert!(!space.is_open_at(late));

        // Saturday is not a working day.
        let saturday = Utc.with_ymd_and_hms(2024, 1, 6, 10, 0, 0).unwrap();
        assert!(!space.is_open_at(saturday));
    }

    #[test]
    fn test_update_apply_to_preserves_unset_fields() {
        let space = sample_space();
        let update = UpdateSpace {
            capacity: Some(12),
            ..Default::default()
        };
        let merged = update.apply_to(&space);
        assert_eq!(merged.capacity, 12);
        assert_eq!(merged.name, space.name);
        assert_eq!(merged.working_time, space.working_time);
    }
}
