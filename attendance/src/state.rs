use attendance_api::endpoints::attendance::AttendanceRecord;
use chrono::NaiveDate;
use itertools::Itertools;

/// Counters shown above the attendance table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub present: u64,
    pub total: u64,
    pub absent: u64,
}

impl DashboardStats {
    pub fn new(present: u64, total: u64) -> Self {
        Self {
            present,
            total,
            absent: total.saturating_sub(present),
        }
    }
}

/// One day's attendance, built only when every fetch succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub records: Vec<AttendanceRecord>,
    pub stats: DashboardStats,
}

impl Dashboard {
    pub fn build(date: NaiveDate, records: Vec<AttendanceRecord>, total_students: u64) -> Self {
        let records: Vec<AttendanceRecord> = records.into_iter().filter(|r| r.date == date).collect();
        let present = records.iter().map(|r| r.student_id.as_str()).unique().count() as u64;

        Self {
            date,
            records,
            stats: DashboardStats::new(present, total_students),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(student_id: &str, date: &str, time: &str) -> AttendanceRecord {
        AttendanceRecord {
            student_id: student_id.to_string(),
            date: date.parse().unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn test_build_filters_by_date_and_counts_distinct_students() {
        let records = vec![
            record("s002", "2025-01-15", "08:10:00"),
            record("s001", "2025-01-15", "08:01:00"),
            record("s001", "2025-01-15", "16:30:00"),
            record("s003", "2025-01-14", "08:05:00"),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let dashboard = Dashboard::build(date, records, 40);

        assert_eq!(dashboard.records.len(), 3);
        assert_eq!(dashboard.records[0].student_id, "s002");
        assert_eq!(
            dashboard.stats,
            DashboardStats {
                present: 2,
                total: 40,
                absent: 38
            }
        );
    }

    #[test]
    fn test_build_with_no_records_for_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        let dashboard = Dashboard::build(date, vec![record("s001", "2025-01-15", "08:01:00")], 12);

        assert!(dashboard.records.is_empty());
        assert_eq!(dashboard.stats, DashboardStats::new(0, 12));
        assert_eq!(dashboard.stats.absent, 12);
    }

    #[test]
    fn test_absent_never_underflows() {
        // Count endpoint lagging behind the attendance table
        let stats = DashboardStats::new(5, 3);
        assert_eq!(stats.absent, 0);
    }
}
