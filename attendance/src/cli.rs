use attendance_api::Role;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Bus attendance dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to $ATTENDANCE_CONFIG or config.toml)
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login {
        /// Username or student ID
        #[arg(long)]
        id: String,

        /// student, admin or driver
        #[arg(long, default_value = "student")]
        role: Role,

        /// Prompted for when omitted
        #[arg(long, env = "ATTENDANCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Attendance counters and records for one day
    Dashboard {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List enrolled students
    Students,

    /// Mark a student present for today
    Mark {
        student_id: String,
    },
}
