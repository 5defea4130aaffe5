use crate::error::ApiError;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// A completed HTTP response with its body fully read
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    session_expired: bool,
}

impl ApiResponse {
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Self {
            status,
            headers,
            body,
            session_expired: false,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T>(&self) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.body).map_err(ApiError::Decode)
    }

    /// True when this response made the client drop the stored token
    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    pub(crate) fn mark_session_expired(&mut self) {
        self.session_expired = true;
    }

    /// Error body as JSON, or an empty object when it isn't JSON
    pub(crate) fn diagnostic(&self) -> serde_json::Value {
        self.json::<serde_json::Value>()
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}

/// Result of a JSON call
#[derive(Debug, Clone, PartialEq)]
pub enum JsonReply<T> {
    Data(T),
    /// The body could not be decoded: no usable data
    Empty,
    /// The stored token was rejected and has been cleared
    SessionExpired,
}

impl<T> JsonReply<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            JsonReply::Data(data) => Some(data),
            JsonReply::Empty | JsonReply::SessionExpired => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, JsonReply::SessionExpired)
    }

    pub fn map<U, F>(self, f: F) -> JsonReply<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            JsonReply::Data(data) => JsonReply::Data(f(data)),
            JsonReply::Empty => JsonReply::Empty,
            JsonReply::SessionExpired => JsonReply::SessionExpired,
        }
    }
}

#[cfg(test)]
impl ApiResponse {
    pub(crate) fn from_parts(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
            session_expired: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostic_falls_back_to_empty_object() {
        let response = ApiResponse::from_parts(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(response.diagnostic(), json!({}));

        let response = ApiResponse::from_parts(StatusCode::BAD_REQUEST, r#"{"error":"student_id missing"}"#);
        assert_eq!(response.diagnostic(), json!({ "error": "student_id missing" }));
    }

    #[test]
    fn test_json_decode_error() {
        let response = ApiResponse::from_parts(StatusCode::OK, "not json");
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(ApiError::Decode(_))
        ));
        assert_eq!(response.text(), "not json");
    }

    #[test]
    fn test_json_reply_into_option() {
        assert_eq!(JsonReply::Data(3).into_option(), Some(3));
        assert_eq!(JsonReply::<i32>::Empty.into_option(), None);
        assert_eq!(JsonReply::<i32>::SessionExpired.into_option(), None);
        assert!(JsonReply::<i32>::SessionExpired.is_session_expired());
        assert_eq!(JsonReply::Data(2).map(|n| n * 2), JsonReply::Data(4));
    }
}
