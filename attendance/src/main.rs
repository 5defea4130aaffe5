use anyhow::Result;
use attendance::cli::{Cli, Command};
use attendance::{logging, App};
use attendance_auth::Settings;
use clap::Parser;
use secrecy::SecretString;
use std::io::Write;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (_log_path, _guard) = logging::init_logging()?;

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::new()?,
    };
    let app = App::new(&settings)?;

    let result = match cli.command {
        Command::Login { id, role, password } => {
            let password = match password {
                Some(password) => SecretString::from(password),
                None => prompt_password()?,
            };
            app.login(&id, &password, role).await
        }
        Command::Logout => app.logout(),
        Command::Status => Ok(app.status()),
        Command::Dashboard { date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            app.dashboard(date).await
        }
        Command::Students => app.students().await,
        Command::Mark { student_id } => app.mark(&student_id).await,
    };

    if app.needs_login() {
        eprintln!("Session expired. Run `attendance login` to sign in again.");
        return Ok(ExitCode::from(2));
    }

    print!("{}", result?);
    Ok(ExitCode::SUCCESS)
}

fn prompt_password() -> Result<SecretString> {
    print!("Password: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(SecretString::from(input.trim_end_matches(['\r', '\n']).to_string()))
}
