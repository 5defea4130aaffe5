use crate::background::{DataLoader, LoadError};
use crate::session::LoginRedirect;
use crate::views;
use anyhow::Result;
use attendance_api::{Client, LoginOutcome, Role};
use attendance_auth::{FileTokenStore, Settings, TokenStore};
use chrono::NaiveDate;
use secrecy::SecretString;
use std::sync::Arc;

pub struct App {
    client: Arc<Client>,
    loader: DataLoader,
    redirect: Arc<LoginRedirect>,
}

impl App {
    /// Build the app on the persistent token store named in `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        let store = FileTokenStore::new(&settings.token_key)?;
        tracing::debug!("Using token store at {}", store.path().display());
        Self::with_store(settings, Arc::new(store))
    }

    pub fn with_store(settings: &Settings, store: Arc<dyn TokenStore>) -> Result<Self> {
        settings.validate().map_err(anyhow::Error::msg)?;

        let redirect = Arc::new(LoginRedirect::new());
        let client = Arc::new(
            Client::from_settings(settings, store)?.with_session_listener(redirect.clone()),
        );

        Ok(Self {
            loader: DataLoader::new(client.clone()),
            client,
            redirect,
        })
    }

    /// Set when the server rejected the stored token during this run
    pub fn needs_login(&self) -> bool {
        self.redirect.needs_login()
    }

    pub async fn login(&self, id: &str, password: &SecretString, role: Role) -> Result<String> {
        match self.client.login(id, password, role).await? {
            LoginOutcome::Success(response) if response.token.is_some() => {
                Ok(format!("Logged in as {} ({})\n", id, role))
            }
            LoginOutcome::Success(_) => {
                anyhow::bail!("Login succeeded but the server did not issue a token")
            }
            LoginOutcome::Failed { message, .. } => anyhow::bail!(message),
        }
    }

    pub fn logout(&self) -> Result<String> {
        self.client.logout()?;
        Ok("Logged out\n".to_string())
    }

    pub fn status(&self) -> String {
        if self.client.token_store().is_logged_in() {
            "Logged in\n".to_string()
        } else {
            "Not logged in\n".to_string()
        }
    }

    /// Renders placeholders instead of partial data when a fetch fails
    pub async fn dashboard(&self, date: NaiveDate) -> Result<String> {
        match self.loader.load_dashboard(date).await {
            Ok(dashboard) => Ok(views::render_dashboard(&dashboard)),
            Err(LoadError::SessionExpired) => Err(LoadError::SessionExpired.into()),
            Err(e) => {
                tracing::error!("Failed to load attendance or students: {}", e);
                Ok(format!(
                    "Attendance for {}\n\n{}\nFailed to load data: {}\n",
                    date,
                    views::render_stats(None),
                    e
                ))
            }
        }
    }

    pub async fn students(&self) -> Result<String> {
        let students = self.loader.load_students().await?;
        Ok(views::render_students(&students))
    }

    pub async fn mark(&self, student_id: &str) -> Result<String> {
        let response = self.loader.mark_attendance(student_id).await?;
        match (response.status, response.error) {
            (_, Some(error)) => anyhow::bail!(error),
            (Some(status), None) => Ok(format!("{}: {}\n", student_id, status)),
            (None, None) => Ok(format!("{}: done\n", student_id)),
        }
    }
}
