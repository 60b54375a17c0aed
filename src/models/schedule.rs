// src/models/schedule.rs

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

// (full name, short name), Monday first
const WEEKDAYS: [(&str, &str); 7] = [
    ("Понедельник", "Пн"),
    ("Вторник", "Вт"),
    ("Среда", "Ср"),
    ("Четверг", "Чт"),
    ("Пятница", "Пт"),
    ("Суббота", "Сб"),
    ("Воскресенье", "Вс"),
];

fn weekday(day_of_week: i64) -> (&'static str, &'static str) {
    usize::try_from(day_of_week - 1)
        .ok()
        .and_then(|idx| WEEKDAYS.get(idx).copied())
        .unwrap_or(("", ""))
}

pub fn weekday_name(day_of_week: i64) -> &'static str {
    weekday(day_of_week).0
}

pub fn weekday_short(day_of_week: i64) -> &'static str {
    weekday(day_of_week).1
}

/// Hours of a fresh weekday.
pub fn default_hours() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
    )
}

// ---
// "HH:MM" time (de)serialization
// ---

fn format_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn serialize_hm<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => s.serialize_str(&format_hm(*t)),
        None => s.serialize_none(),
    }
}

/// Accepts "HH:MM" and "HH:MM:SS".
pub fn parse_hm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

// Outer Option: field present; inner Option: explicit null.
fn deserialize_hm<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<NaiveTime>>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw {
        None => Ok(Some(None)),
        Some(text) => parse_hm(&text)
            .map(|t| Some(Some(t)))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time `{text}`, expected HH:MM"))),
    }
}

// ---
// Records
// ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct WorkSchedule {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct WorkDay {
    pub id: i64,
    pub schedule: i64,
    pub day_of_week: i64,
    pub is_not_working: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl WorkDay {
    /// "Пн: 09:00–18:00" or "Пн: выходной".
    pub fn resume(&self) -> String {
        let short = weekday_short(self.day_of_week);
        match (self.is_not_working, self.start_time, self.end_time) {
            (false, Some(start), Some(end)) => {
                format!("{short}: {}–{}", format_hm(start), format_hm(end))
            }
            _ => format!("{short}: выходной"),
        }
    }
}

/// External representation of a work day. Hours are only present on
/// working days.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkDayView {
    pub id: i64,
    pub day_of_week: i64,
    pub day_of_week_name: String,
    pub is_not_working: bool,
    #[serde(serialize_with = "serialize_hm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(serialize_with = "serialize_hm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub resume: String,
}

impl From<WorkDay> for WorkDayView {
    fn from(day: WorkDay) -> Self {
        let resume = day.resume();
        let (start_time, end_time) = if day.is_not_working {
            (None, None)
        } else {
            (day.start_time, day.end_time)
        };

        Self {
            id: day.id,
            day_of_week: day.day_of_week,
            day_of_week_name: weekday_name(day.day_of_week).to_string(),
            is_not_working: day.is_not_working,
            start_time,
            end_time,
            resume,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkDayBrief {
    pub id: i64,
    pub resume: String,
}

impl From<&WorkDay> for WorkDayBrief {
    fn from(day: &WorkDay) -> Self {
        Self {
            id: day.id,
            resume: day.resume(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkScheduleSummary {
    pub id: i64,
    pub name: String,
    pub work_days: Vec<WorkDayBrief>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkScheduleDetail {
    pub id: i64,
    pub name: String,
    pub work_days: Vec<WorkDayView>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateSchedulePayload {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

/// PUT/PATCH body of a work day. `day_of_week` is not part of it: the day a
/// row stands for never changes.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkDayPayload {
    pub is_not_working: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_hm")]
    pub start_time: Option<Option<NaiveTime>>,
    #[serde(default, deserialize_with = "deserialize_hm")]
    pub end_time: Option<Option<NaiveTime>>,
}

impl UpdateWorkDayPayload {
    /// PUT replaces the whole row, so `is_not_working` must be sent.
    pub fn ensure_complete(&self) -> Result<(), ValidationErrors> {
        if self.is_not_working.is_none() {
            let mut errors = ValidationErrors::new();
            errors.add("is_not_working", ValidationError::new("required"));
            return Err(errors);
        }
        Ok(())
    }

    /// Applies the payload on top of the stored row and checks the result.
    pub fn apply(self, mut day: WorkDay) -> Result<WorkDay, ValidationErrors> {
        if let Some(flag) = self.is_not_working {
            day.is_not_working = flag;
        }
        if let Some(start) = self.start_time {
            day.start_time = start;
        }
        if let Some(end) = self.end_time {
            day.end_time = end;
        }

        let mut errors = ValidationErrors::new();
        if !day.is_not_working {
            match (day.start_time, day.end_time) {
                (Some(start), Some(end)) if start >= end => {
                    errors.add("end_time", ValidationError::new("time_order"));
                }
                (Some(_), Some(_)) => {}
                (start, end) => {
                    if start.is_none() {
                        errors.add("start_time", ValidationError::new("times_required"));
                    }
                    if end.is_none() {
                        errors.add("end_time", ValidationError::new("times_required"));
                    }
                }
            }
        }

        if errors.is_empty() { Ok(day) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday(is_not_working: bool) -> WorkDay {
        let (start, end) = default_hours();
        WorkDay {
            id: 1,
            schedule: 1,
            day_of_week: 1,
            is_not_working,
            start_time: Some(start),
            end_time: Some(end),
        }
    }

    #[test]
    fn resume_shows_hours_or_day_off() {
        assert_eq!(monday(false).resume(), "Пн: 09:00–18:00");
        assert_eq!(monday(true).resume(), "Пн: выходной");
    }

    #[test]
    fn day_off_hides_hours() {
        let json = serde_json::to_value(WorkDayView::from(monday(true))).unwrap();
        assert!(json.get("start_time").is_none());
        assert!(json.get("end_time").is_none());
        assert_eq!(json["day_of_week_name"], "Понедельник");

        let json = serde_json::to_value(WorkDayView::from(monday(false))).unwrap();
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], "18:00");
    }

    #[test]
    fn patch_accepts_seconds_and_checks_order() {
        let payload: UpdateWorkDayPayload =
            serde_json::from_str(r#"{"start_time": "10:00:00"}"#).unwrap();
        let day = payload.apply(monday(false)).unwrap();
        assert_eq!(day.start_time, parse_hm("10:00"));

        let payload: UpdateWorkDayPayload =
            serde_json::from_str(r#"{"start_time": "19:00"}"#).unwrap();
        let errors = payload.apply(monday(false)).unwrap_err();
        assert!(errors.field_errors().contains_key("end_time"));
    }

    #[test]
    fn working_day_needs_both_times() {
        let mut day = monday(true);
        day.start_time = None;
        day.end_time = None;
        let payload: UpdateWorkDayPayload =
            serde_json::from_str(r#"{"is_not_working": false, "start_time": "08:00"}"#).unwrap();
        let errors = payload.apply(day).unwrap_err();
        assert!(errors.field_errors().contains_key("end_time"));
        assert!(!errors.field_errors().contains_key("start_time"));
    }

    #[test]
    fn put_requires_the_flag() {
        assert!(UpdateWorkDayPayload::default().ensure_complete().is_err());
    }
}
