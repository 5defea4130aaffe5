use super::Endpoint;
use crate::error::ApiError;
use crate::request::RequestOptions;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

// Requests

#[derive(Debug, Clone, Default)]
pub struct ListAttendance;

impl Endpoint for ListAttendance {
    type Response = Vec<AttendanceRecord>;

    fn path(&self) -> Cow<'_, str> {
        "/attendance".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkAttendance {
    student_id: String,
}

impl MarkAttendance {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
        }
    }
}

impl Endpoint for MarkAttendance {
    type Response = MarkAttendanceResponse;

    fn path(&self) -> Cow<'_, str> {
        "/mark_attendance".into()
    }

    fn options(&self) -> Result<RequestOptions, ApiError> {
        RequestOptions::new().method(Method::POST).json(self)
    }
}

// Responses

/// `status` on success ("Attendance marked" / "Already marked today"), `error` otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendanceResponse {
    pub status: Option<String>,
    pub error: Option<String>,
}
