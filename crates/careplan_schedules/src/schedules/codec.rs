//! JSON codec for schedule definitions.
//!
//! Specs are written as a flat record with dates and times in their
//! string forms:
//!
//! ```json
//! {
//!   "kind": "weekly",
//!   "start_time": "2016-01-03T08:00",
//!   "end_time": null,
//!   "times": [["08:00"], [], ["08:00"], [], ["08:00"], [], []],
//!   "time_units_to_skip": 1,
//!   "user_info": { "dose": { "kind": "number", "value": 2.5 } }
//! }
//! ```
//!
//! Decoding goes through [`ScheduleSpec::new`], so a record that breaks a
//! construction invariant is rejected with the same error a builder would
//! return.

use super::error::ScheduleError;
use super::kind::ScheduleKind;
use super::spec::ScheduleSpec;
use careplan_core::types::{DateComponents, DateError, TimeOfDay, UserInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while decoding or encoding a schedule.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed JSON or a missing field.
    #[error("Invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A date or time field failed to parse.
    #[error("Invalid schedule field: {0}")]
    Field(#[from] DateError),

    /// The decoded fields do not form a valid spec.
    #[error("Invalid schedule: {0}")]
    Shape(#[from] ScheduleError),

    /// The kind tag is not a known schedule kind.
    #[error("Unknown schedule kind: {0}")]
    UnknownKind(String),
}

/// Serialised form of a [`ScheduleSpec`].
///
/// Every field of the definition is carried. The skip count and metadata may be
/// omitted on input and default to zero and empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// Kind tag: `daily`, `weekly` or `other`.
    pub kind: String,
    /// Start as `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`.
    pub start_time: String,
    /// Optional end, same format as the start.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Time table as `HH:MM[:SS]` strings.
    pub times: Vec<Vec<String>>,
    /// Inactive periods between active ones.
    #[serde(default)]
    pub time_units_to_skip: u32,
    /// Caller metadata.
    #[serde(default)]
    #[serde(skip_serializing_if = "UserInfo::is_empty")]
    pub user_info: UserInfo,
}

/// Converts a spec into its serialised form.
pub fn to_record(spec: &ScheduleSpec) -> ScheduleRecord {
    ScheduleRecord {
        kind: spec.kind().name().to_string(),
        start_time: spec.start_time().to_string(),
        end_time: spec.end_time().map(|end| end.to_string()),
        times: spec
            .times()
            .iter()
            .map(|list| list.iter().map(TimeOfDay::to_string).collect())
            .collect(),
        time_units_to_skip: spec.time_units_to_skip(),
        user_info: spec.user_info().clone(),
    }
}

/// Rebuilds a spec from its serialised form.
///
/// # Errors
///
/// - [`CodecError::UnknownKind`] for an unrecognised kind tag
/// - [`CodecError::Field`] for an unparseable date or time
/// - [`CodecError::Shape`] if the time table or date range is invalid
pub fn from_record(record: ScheduleRecord) -> Result<ScheduleSpec, CodecError> {
    let kind: ScheduleKind = record
        .kind
        .parse()
        .map_err(|_| CodecError::UnknownKind(record.kind.clone()))?;
    let start = DateComponents::parse(&record.start_time)?;
    let end = record
        .end_time
        .as_deref()
        .map(DateComponents::parse)
        .transpose()?;
    let times = record
        .times
        .iter()
        .map(|list| {
            list.iter()
                .map(|s| TimeOfDay::parse(s))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScheduleSpec::new(
        kind,
        start,
        end,
        times,
        record.time_units_to_skip,
        record.user_info,
    )?)
}

/// Encodes a spec as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialisation fails.
///
/// # Examples
///
/// ```
/// use careplan_core::types::{DateComponents, TimeOfDay};
/// use careplan_schedules::schedules::{codec, CareSchedule};
///
/// let schedule = CareSchedule::daily(
///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
///     vec![TimeOfDay::from_hm(8, 0).unwrap()],
/// )
/// .unwrap();
///
/// let json = codec::encode_json(schedule.spec()).unwrap();
/// let decoded = codec::decode_json(&json).unwrap();
/// assert_eq!(&decoded, schedule.spec());
/// ```
pub fn encode_json(spec: &ScheduleSpec) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&to_record(spec))?)
}

/// Decodes a spec from JSON.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed input, otherwise the errors
/// of [`from_record`].
pub fn decode_json(json: &str) -> Result<ScheduleSpec, CodecError> {
    let record: ScheduleRecord = serde_json::from_str(json)?;
    from_record(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use careplan_core::types::{Date, UserInfoValue};

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    fn weekly_spec() -> ScheduleSpec {
        let mut nested = UserInfo::new();
        nested.insert("unit", "mg");
        nested.insert("amount", 200.0);

        let mut info = UserInfo::new();
        info.insert("medication", "ibuprofen");
        info.insert("with_food", true);
        info.insert("prescribed", Date::from_ymd(2015, 12, 20).unwrap());
        info.insert("dose", nested);

        ScheduleSpec::new(
            ScheduleKind::Weekly,
            DateComponents::with_time(Date::from_ymd(2016, 1, 3).unwrap(), t(8, 30)),
            Some(DateComponents::from_ymd(2016, 6, 30).unwrap()),
            vec![
                vec![t(8, 0)],
                vec![],
                vec![t(8, 0), t(20, 0)],
                vec![],
                vec![t(8, 0)],
                vec![],
                vec![],
            ],
            1,
            info,
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_weekly_with_metadata() {
        let spec = weekly_spec();
        let decoded = decode_json(&encode_json(&spec).unwrap()).unwrap();
        assert_eq!(decoded, spec);
        assert_eq!(decoded.start_time().time(), Some(t(8, 30)));
    }

    #[test]
    fn test_roundtrip_daily_unbounded() {
        let spec = ScheduleSpec::new(
            ScheduleKind::Daily,
            DateComponents::from_ymd(2016, 1, 1).unwrap(),
            None,
            vec![vec![t(7, 15), TimeOfDay::from_hms(21, 0, 30).unwrap()]],
            0,
            UserInfo::new(),
        )
        .unwrap();
        let decoded = decode_json(&encode_json(&spec).unwrap()).unwrap();
        assert_eq!(decoded, spec);
        assert!(decoded.end_time().is_none());
    }

    #[test]
    fn test_record_shape() {
        let record = to_record(&weekly_spec());
        assert_eq!(record.kind, "weekly");
        assert_eq!(record.start_time, "2016-01-03T08:30");
        assert_eq!(record.end_time.as_deref(), Some("2016-06-30"));
        assert_eq!(record.times.len(), 7);
        assert_eq!(record.times[2], vec!["08:00", "20:00"]);
    }

    #[test]
    fn test_records_compare_by_value() {
        let a = to_record(&weekly_spec());
        let b = to_record(&weekly_spec());
        assert_eq!(a, b);

        let mut c = b.clone();
        c.user_info.insert("with_food", false);
        assert_ne!(a, c);

        let mut d = b;
        d.time_units_to_skip = 0;
        assert_ne!(a, d);
    }

    #[test]
    fn test_non_finite_metadata_roundtrips() {
        let mut info = UserInfo::new();
        info.insert("ratio", f64::NAN);
        info.insert("ceiling", f64::INFINITY);
        info.insert("floor", f64::NEG_INFINITY);
        let spec = ScheduleSpec::new(
            ScheduleKind::Daily,
            DateComponents::from_ymd(2016, 1, 1).unwrap(),
            None,
            vec![vec![t(8, 0)]],
            0,
            info,
        )
        .unwrap();

        let json = encode_json(&spec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["user_info"]["ratio"]["value"], "NaN");
        assert_eq!(value["user_info"]["floor"]["value"], "-inf");

        let decoded = decode_json(&json).unwrap();
        assert_eq!(decoded, spec);
        assert!(decoded
            .user_info()
            .get("ratio")
            .and_then(UserInfoValue::as_f64)
            .is_some_and(f64::is_nan));
    }

    #[test]
    fn test_decode_minimal_record() {
        let json = r#"{"kind": "daily", "start_time": "2016-01-01", "times": [["08:00"]]}"#;
        let spec = decode_json(json).unwrap();
        assert_eq!(spec.kind(), ScheduleKind::Daily);
        assert_eq!(spec.time_units_to_skip(), 0);
        assert!(spec.end_time().is_none());
        assert!(spec.user_info().is_empty());
    }

    #[test]
    fn test_decode_weekly_with_six_lists_fails() {
        let json = r#"{
            "kind": "weekly",
            "start_time": "2016-01-03",
            "times": [[], [], [], [], [], []]
        }"#;
        assert!(matches!(
            decode_json(json),
            Err(CodecError::Shape(ScheduleError::InvalidWeekdayTable { got: 6 }))
        ));
    }

    #[test]
    fn test_decode_inverted_range_fails() {
        let json = r#"{
            "kind": "daily",
            "start_time": "2016-01-10",
            "end_time": "2016-01-01",
            "times": [[]]
        }"#;
        assert!(matches!(
            decode_json(json),
            Err(CodecError::Shape(ScheduleError::InvalidDateRange { .. }))
        ));
    }

    #[test]
    fn test_decode_bad_fields() {
        let bad_kind = r#"{"kind": "monthly", "start_time": "2016-01-01", "times": [[]]}"#;
        assert!(matches!(decode_json(bad_kind), Err(CodecError::UnknownKind(k)) if k == "monthly"));

        let bad_date = r#"{"kind": "daily", "start_time": "2016-02-30", "times": [[]]}"#;
        assert!(matches!(decode_json(bad_date), Err(CodecError::Field(_))));

        let bad_time = r#"{"kind": "daily", "start_time": "2016-02-01", "times": [["25:00"]]}"#;
        assert!(matches!(decode_json(bad_time), Err(CodecError::Field(_))));

        assert!(matches!(decode_json("{"), Err(CodecError::Json(_))));
        assert!(matches!(
            decode_json(r#"{"kind": "daily", "times": [[]]}"#),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn test_user_info_wire_format() {
        let json = encode_json(&weekly_spec()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["user_info"]["with_food"],
            serde_json::json!({"kind": "boolean", "value": true})
        );

        let decoded = decode_json(&json).unwrap();
        match decoded.user_info().get("dose") {
            Some(UserInfoValue::Map(dose)) => {
                assert_eq!(dose.get("amount").and_then(UserInfoValue::as_f64), Some(200.0));
            }
            other => panic!("expected nested map, got {:?}", other),
        }
    }
}
