use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
pub enum OrbitClass {
    #[serde(rename = "LEO")]
    #[strum(serialize = "LEO")]
    Leo,
    #[serde(rename = "MEO")]
    #[strum(serialize = "MEO")]
    Meo,
    #[serde(rename = "GEO")]
    #[strum(serialize = "GEO")]
    Geo,
    Elliptical,
}

impl OrbitClass {
    pub const ALL: [OrbitClass; 4] = [
        OrbitClass::Leo,
        OrbitClass::Geo,
        OrbitClass::Meo,
        OrbitClass::Elliptical,
    ];
}

impl FromStr for OrbitClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEO" => Ok(OrbitClass::Leo),
            "MEO" => Ok(OrbitClass::Meo),
            "GEO" => Ok(OrbitClass::Geo),
            "ELLIPTICAL" => Ok(OrbitClass::Elliptical),
            other => Err(format!("unknown orbit class: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum OrbitType {
    Equatorial,
    #[serde(rename = "Non-Polar Inclined")]
    #[strum(serialize = "Non-Polar Inclined")]
    NonPolarInclined,
    Polar,
    #[serde(rename = "Sun-Synchronous")]
    #[strum(serialize = "Sun-Synchronous")]
    SunSynchronous,
    Cislunar,
    #[serde(rename = "Deep Highly Eccentric")]
    #[strum(serialize = "Deep Highly Eccentric")]
    DeepHighlyEccentric,
    Molniya,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Payload,
    Rocket,
    Debris,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum OperationalStatus {
    #[serde(rename = "OP")]
    #[strum(serialize = "OP")]
    Operational,
    #[serde(rename = "NON_OP")]
    #[strum(serialize = "NON_OP")]
    NonOperational,
    #[serde(rename = "PART_OP")]
    #[strum(serialize = "PART_OP")]
    PartiallyOperational,
    #[serde(rename = "STANDBY")]
    #[strum(serialize = "STANDBY")]
    Standby,
    #[serde(rename = "SPARE")]
    #[strum(serialize = "SPARE")]
    Spare,
    #[serde(rename = "EXTENDED")]
    #[strum(serialize = "EXTENDED")]
    Extended,
    #[serde(rename = "DECAYED")]
    #[strum(serialize = "DECAYED")]
    Decayed,
    #[default]
    #[serde(rename = "UNKNOWN")]
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl OperationalStatus {
    /// Statuses counted as "active" by the active-only filter.
    pub const ACTIVE: [OperationalStatus; 5] = [
        OperationalStatus::Operational,
        OperationalStatus::PartiallyOperational,
        OperationalStatus::Standby,
        OperationalStatus::Spare,
        OperationalStatus::Extended,
    ];

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }
}

/// Two-line element set. Only the propagator looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ElementSet {
    pub line1: String,
    pub line2: String,
}

impl ElementSet {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            line2: line2.into(),
        }
    }
}

impl From<(String, String)> for ElementSet {
    fn from((line1, line2): (String, String)) -> Self {
        Self { line1, line2 }
    }
}

impl From<ElementSet> for (String, String) {
    fn from(set: ElementSet) -> Self {
        (set.line1, set.line2)
    }
}

/// One catalog entry, as handed over by the data loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteRecord {
    /// COSPAR designator, e.g. `1998-067A`.
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub object_type: Option<ObjectType>,
    #[serde(default)]
    pub operational_status: OperationalStatus,
    #[serde(default)]
    pub owner: String,
    pub launch_date: NaiveDate,
    #[serde(default)]
    pub decay_date: Option<NaiveDate>,
    #[serde(default)]
    pub period_minutes: f64,
    #[serde(default)]
    pub inclination_deg: Option<f64>,
    #[serde(default)]
    pub apogee_km: Option<f64>,
    #[serde(default)]
    pub perigee_km: Option<f64>,
    #[serde(default)]
    pub users: BTreeSet<String>,
    #[serde(default)]
    pub purpose: BTreeSet<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub orbit_class: Option<OrbitClass>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub orbit_type: Option<OrbitType>,
    #[serde(default, rename = "tle")]
    pub element_set: Option<ElementSet>,
}

impl SatelliteRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, launch_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            object_type: None,
            operational_status: OperationalStatus::Unknown,
            owner: String::new(),
            launch_date,
            decay_date: None,
            period_minutes: 0.0,
            inclination_deg: None,
            apogee_km: None,
            perigee_km: None,
            users: BTreeSet::new(),
            purpose: BTreeSet::new(),
            orbit_class: None,
            orbit_type: None,
            element_set: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.operational_status.is_active()
    }

    pub fn has_trajectory(&self) -> bool {
        self.element_set.is_some()
    }
}

/// Reads an optional enum where the dataset writes "unset" as an empty string.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => {
            let inner: serde::de::value::StringDeserializer<D::Error> = s.into_deserializer();
            T::deserialize(inner).map(Some)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_from_loader_json() {
        let json = r#"{
            "id": "1998-067A",
            "name": "ISS (ZARYA)",
            "objectType": "PAYLOAD",
            "operationalStatus": "PART_OP",
            "owner": "ISS",
            "launchDate": "1998-11-20",
            "periodMinutes": 92.9,
            "users": ["Civil", "Government"],
            "purpose": ["Space Science"],
            "orbitClass": "LEO",
            "orbitType": "Non-Polar Inclined",
            "tle": ["1 25544U", "2 25544"]
        }"#;
        let record: SatelliteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.orbit_class, Some(OrbitClass::Leo));
        assert_eq!(record.orbit_type, Some(OrbitType::NonPolarInclined));
        assert_eq!(record.object_type, Some(ObjectType::Payload));
        assert!(record.is_active());
        assert!(record.users.contains("Civil"));
        assert_eq!(
            record.element_set,
            Some(ElementSet::new("1 25544U", "2 25544"))
        );
    }

    #[test]
    fn empty_orbit_class_is_unset() {
        let json = r#"{
            "id": "1957-001A",
            "name": "SL-1 R/B",
            "operationalStatus": "DECAYED",
            "launchDate": "1957-10-04",
            "orbitClass": ""
        }"#;
        let record: SatelliteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.orbit_class, None);
        assert!(!record.is_active());
        assert!(!record.has_trajectory());
        assert!(record.users.is_empty());
    }

    #[test]
    fn orbit_class_from_cli_text() {
        assert_eq!("leo".parse::<OrbitClass>(), Ok(OrbitClass::Leo));
        assert_eq!(
            "Elliptical".parse::<OrbitClass>(),
            Ok(OrbitClass::Elliptical)
        );
        assert!("HEO".parse::<OrbitClass>().is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(OrbitClass::Leo.to_string(), "LEO");
        assert_eq!(OrbitClass::Elliptical.to_string(), "Elliptical");
        assert_eq!(
            OperationalStatus::PartiallyOperational.to_string(),
            "PART_OP"
        );
        assert_eq!(ObjectType::Debris.to_string(), "DEBRIS");
    }
}
