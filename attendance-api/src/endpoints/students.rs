use super::{count_or_zero, flag, Endpoint};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Relative path of the enrolment photo, if one was captured
    #[serde(default)]
    pub photo_path: Option<String>,
    #[serde(default)]
    pub bus_stop: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub on_leave: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCount {
    #[serde(default, deserialize_with = "count_or_zero")]
    pub count: u64,
}

// Requests

#[derive(Debug, Clone, Default)]
pub struct ListStudents;

impl Endpoint for ListStudents {
    type Response = Vec<Student>;

    fn path(&self) -> Cow<'_, str> {
        "/students".into()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountStudents;

impl Endpoint for CountStudents {
    type Response = StudentCount;

    fn path(&self) -> Cow<'_, str> {
        "/students/count".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_on_leave_accepts_ints_and_bools() {
        let rows = json!([
            { "student_id": "s001", "name": "Asha", "photo_path": "faces/s001.jpg", "bus_stop": "Depot", "on_leave": 1 },
            { "student_id": "s002", "photo_path": null, "on_leave": 0 },
            { "student_id": "s003", "photo_path": "faces/s003.jpg", "on_leave": true },
            { "student_id": "s004" }
        ]);

        let students: Vec<Student> = serde_json::from_value(rows).unwrap();
        assert!(students[0].on_leave);
        assert_eq!(students[0].bus_stop.as_deref(), Some("Depot"));
        assert!(!students[1].on_leave);
        assert_eq!(students[1].photo_path, None);
        assert!(students[2].on_leave);
        assert!(!students[3].on_leave);
        assert_eq!(students[3].name, None);
    }

    #[test]
    fn test_count_non_numeric_reads_as_zero() {
        let count: StudentCount = serde_json::from_value(json!({ "count": 42 })).unwrap();
        assert_eq!(count.count, 42);

        let count: StudentCount = serde_json::from_value(json!({ "count": "42" })).unwrap();
        assert_eq!(count.count, 0);

        let count: StudentCount = serde_json::from_value(json!({})).unwrap();
        assert_eq!(count.count, 0);
    }
}
