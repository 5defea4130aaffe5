use crate::error::ApiError;
use crate::macros::setter;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

/// Caller-supplied request configuration. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(method: Method);
    setter!(opt body: RequestBody);
    setter!(headers: HeaderMap);

    /// Serialize `value` as the JSON body
    pub fn json<T>(self, value: &T) -> Result<Self, ApiError>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.body(RequestBody::json(value)?))
    }

    pub fn header<K>(mut self, key: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.headers.insert(key, value);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    /// Binary multipart form. The transport sets `Content-Type` with the boundary.
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub fn json<T>(value: &T) -> Result<Self, ApiError>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(ApiError::Encode)
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<Vec<FormPart>> for RequestBody {
    fn from(parts: Vec<FormPart>) -> Self {
        RequestBody::Multipart(parts)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        bytes: Bytes,
        /// Guessed from `file_name` when unset
        mime: Option<String>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    pub fn file(name: impl Into<String>, file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::File {
                file_name: file_name.into(),
                bytes: bytes.into(),
                mime: None,
            },
        }
    }

    pub fn with_mime(mut self, mime_type: impl Into<String>) -> Self {
        if let FormValue::File { ref mut mime, .. } = self.value {
            *mime = Some(mime_type.into());
        }
        self
    }
}

pub(crate) fn build_form(parts: &[FormPart]) -> Result<Form, ApiError> {
    let mut form = Form::new();

    for part in parts {
        match &part.value {
            FormValue::Text(value) => {
                form = form.text(part.name.clone(), value.clone());
            }
            FormValue::File {
                file_name,
                bytes,
                mime,
            } => {
                let mime_type = match mime {
                    Some(mime) => mime.clone(),
                    None => mime_guess::from_path(file_name)
                        .first_or_octet_stream()
                        .to_string(),
                };

                let file_part = Part::bytes(bytes.to_vec())
                    .file_name(file_name.clone())
                    .mime_str(&mime_type)
                    .map_err(|e| ApiError::InvalidRequest(format!("Invalid MIME type: {}", e)))?;

                form = form.part(part.name.clone(), file_part);
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = RequestOptions::new();
        assert_eq!(options.method, Method::GET);
        assert!(options.body.is_none());
        assert!(options.headers.is_empty());
    }

    #[test]
    fn test_json_body() {
        let options = RequestOptions::new()
            .method(Method::POST)
            .json(&json!({ "student_id": "ekc23cs001" }))
            .unwrap();

        assert_eq!(options.method, Method::POST);
        assert_eq!(
            options.body,
            Some(RequestBody::Json(json!({ "student_id": "ekc23cs001" })))
        );
    }

    #[test]
    fn test_header_setter_replaces_value() {
        let options = RequestOptions::new()
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .header(CONTENT_TYPE, HeaderValue::from_static("text/csv"));

        assert_eq!(options.headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(options.headers[CONTENT_TYPE], "text/csv");
    }

    #[test]
    fn test_form_part_mime() {
        let part = FormPart::file("photo", "s001.jpg", vec![0xff, 0xd8]);
        assert!(matches!(part.value, FormValue::File { mime: None, .. }));

        let part = part.with_mime("image/png");
        assert!(
            matches!(part.value, FormValue::File { mime: Some(ref m), .. } if m == "image/png")
        );

        // Text parts have no MIME type to override
        let text = FormPart::text("student_id", "s001").with_mime("image/png");
        assert_eq!(text.value, FormValue::Text("s001".to_string()));
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let parts = vec![FormPart::file("photo", "s001.jpg", vec![1, 2, 3]).with_mime("not a mime")];
        assert!(matches!(build_form(&parts), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_build_form_accepts_guessed_mime() {
        let parts = vec![
            FormPart::text("student_id", "s001"),
            FormPart::file("photo", "s001.jpg", vec![1, 2, 3]),
            FormPart::file("blob", "data", vec![4, 5, 6]),
        ];
        assert!(build_form(&parts).is_ok());
    }
}
