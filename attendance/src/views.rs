//! Plain-text rendering of the dashboard views

use crate::state::{Dashboard, DashboardStats};
use attendance_api::endpoints::attendance::AttendanceRecord;
use attendance_api::endpoints::students::Student;
use std::fmt::Write;

/// Shown in place of a counter when the data could not be loaded
pub const PLACEHOLDER: &str = "–";
const NO_PHOTO: &str = "—";

pub fn render_stats(stats: Option<&DashboardStats>) -> String {
    let (present, total, absent) = match stats {
        Some(s) => (s.present.to_string(), s.total.to_string(), s.absent.to_string()),
        None => (
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ),
    };

    format!(
        "Present: {}\nTotal students: {}\nAbsent: {}\n",
        present, total, absent
    )
}

pub fn render_attendance(records: &[AttendanceRecord]) -> String {
    if records.is_empty() {
        return "No attendance records for this date\n".to_string();
    }

    let width = column_width(records.iter().map(|r| r.student_id.as_str()), "Student ID");
    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:<10}  {:<8}  Status", "Student ID", "Date", "Time");
    for record in records {
        let _ = writeln!(
            out,
            "{:<width$}  {}  {}  Present",
            record.student_id,
            record.date.format("%Y-%m-%d"),
            record.time.format("%H:%M:%S"),
        );
    }
    out
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    format!(
        "Attendance for {}\n\n{}\n{}",
        dashboard.date,
        render_stats(Some(&dashboard.stats)),
        render_attendance(&dashboard.records)
    )
}

pub fn render_students(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students enrolled\n".to_string();
    }

    let id_width = column_width(students.iter().map(|s| s.student_id.as_str()), "Student ID");
    let name_width = column_width(
        students.iter().map(|s| s.name.as_deref().unwrap_or("")),
        "Name",
    );
    let stop_width = column_width(
        students.iter().map(|s| s.bus_stop.as_deref().unwrap_or("")),
        "Bus stop",
    );

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<name_width$}  {:<stop_width$}  {:<8}  Photo",
        "Student ID", "Name", "Bus stop", "On leave"
    );
    for student in students {
        let photo = student
            .photo_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(NO_PHOTO);
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {:<stop_width$}  {:<8}  {}",
            student.student_id,
            student.name.as_deref().unwrap_or(""),
            student.bus_stop.as_deref().unwrap_or(""),
            if student.on_leave { "yes" } else { "no" },
            photo,
        );
    }
    out
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}
