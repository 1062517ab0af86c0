use reqwest::Method;
use serde_json::Value;

/// Body of an outgoing request. Form and JSON are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` fields, in insertion order.
    Form(Vec<(&'static str, String)>),
    Json(Value),
}

/// A single call against the API, relative to the client's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::POST, segments)
    }

    /// Append a form field, switching the body to form encoding.
    pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        match &mut self.body {
            RequestBody::Form(fields) => fields.push((name, value.into())),
            _ => self.body = RequestBody::Form(vec![(name, value.into())]),
        }
        self
    }

    /// Append a form field only when a non-empty value is given.
    pub fn optional_field(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.field(name, v),
            _ => self,
        }
    }

    pub fn json(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Path relative to the base URL, e.g. `/cloud/status`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_accumulate_in_order() {
        let req = ApiRequest::post(&["login"])
            .field("username", "alice")
            .field("password", "secret");

        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path(), "/login");
        assert_eq!(
            req.body,
            RequestBody::Form(vec![
                ("username", "alice".to_string()),
                ("password", "secret".to_string()),
            ])
        );
    }

    #[test]
    fn test_optional_field_skips_missing_and_empty() {
        let req = ApiRequest::post(&["remote"])
            .field("url", "http://a")
            .optional_field("remoteOptionId", None)
            .optional_field("folderId", Some(""));
        assert_eq!(
            req.body,
            RequestBody::Form(vec![("url", "http://a".to_string())])
        );

        let req = ApiRequest::post(&["instant"])
            .field("url", "http://a")
            .optional_field("proxyId", Some("p1"));
        assert_eq!(
            req.body,
            RequestBody::Form(vec![
                ("url", "http://a".to_string()),
                ("proxyId", "p1".to_string()),
            ])
        );
    }

    #[test]
    fn test_json_replaces_body() {
        let req = ApiRequest::post(&["cache"]).json(json!({"hashes": ["h1"]}));
        assert_eq!(req.body, RequestBody::Json(json!({"hashes": ["h1"]})));
    }

    #[test]
    fn test_get_without_body() {
        let req = ApiRequest::get(&["cloud", "explore", "abc"]);
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.body, RequestBody::Empty);
        assert_eq!(req.path(), "/cloud/explore/abc");
    }
}
