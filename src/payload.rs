use ::serde_json::Value;

/// The body a [`Step`](crate::Step) responds with.
///
/// Text is sent as is, and JSON is serialized when the server is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(Value),
}

impl Payload {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A JSON `null` is treated the same as no payload at all.
impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::default(),
            value => Self::Json(value),
        }
    }
}

impl<P> From<Option<P>> for Payload
where
    P: Into<Payload>,
{
    fn from(maybe_payload: Option<P>) -> Self {
        maybe_payload.map(Into::into).unwrap_or_default()
    }
}
