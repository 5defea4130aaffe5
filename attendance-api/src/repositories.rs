use crate::endpoints::{
    attendance::{ListAttendance, MarkAttendance},
    students::{CountStudents, ListStudents},
};

#[derive(Default)]
pub struct AttendanceRepository;

impl AttendanceRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListAttendance {
        ListAttendance
    }

    pub fn mark(&self, student_id: impl Into<String>) -> MarkAttendance {
        MarkAttendance::new(student_id)
    }
}

#[derive(Default)]
pub struct StudentRepository;

impl StudentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListStudents {
        ListStudents
    }

    pub fn count(&self) -> CountStudents {
        CountStudents
    }
}
