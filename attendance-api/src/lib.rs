mod client;
pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
mod request;
mod response;

pub use crate::client::{Client, ExpiryReason, SessionListener};
pub use crate::endpoints::auth::{LoginOutcome, LoginResponse, Role};
pub use crate::endpoints::Endpoint;
pub use crate::error::ApiError;
pub use crate::request::{FormPart, FormValue, RequestBody, RequestOptions};
pub use crate::response::{ApiResponse, JsonReply};
use repositories::*;

pub struct Request;

impl Request {
    pub fn attendance() -> AttendanceRepository {
        AttendanceRepository::new()
    }

    pub fn students() -> StudentRepository {
        StudentRepository::new()
    }
}
