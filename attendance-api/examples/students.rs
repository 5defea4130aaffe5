use std::sync::Arc;

use attendance_api::{ApiError, Client, JsonReply, Request};
use attendance_auth::MemoryTokenStore;

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let store = Arc::new(MemoryTokenStore::with_token("api_token"));
    let client = Client::new("http://127.0.0.1:5000", store)?;

    match client.fetch(Request::students().list()).await? {
        JsonReply::Data(students) => println!("{} students", students.len()),
        JsonReply::Empty => println!("no usable data"),
        JsonReply::SessionExpired => println!("session expired, log in again"),
    }
    Ok(())
}
