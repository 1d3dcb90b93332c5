use ::http::HeaderMap;
use ::http::HeaderName;
use ::http::HeaderValue;
use ::http::StatusCode;
use ::serde::Serialize;
use ::serde_json::Value;
use ::std::time::Duration;

use crate::Payload;
use crate::Stage;
use crate::StepOptions;

///
/// A `Step` is one response a [`MockServer`](crate::MockServer) will give,
/// made up of a [`Payload`] and the [`StepOptions`] for sending it.
///
/// Steps are usually made from a plain payload, or a pair of a payload and options.
///
/// ```rust
/// use ::axum_mock_steps::Step;
/// use ::axum_mock_steps::StepOptions;
/// use ::http::StatusCode;
/// use ::serde_json::json;
///
/// let steps: Vec<Step> = vec![
///     "I'm ready for my closeup, Mr. DeMille.".into(),
///     ("NO WIRE HANGERS", StepOptions::new().status(StatusCode::CONFLICT)).into(),
///     json!({ "david": "lynch" }).into(),
///     Step::text("ack!").status(StatusCode::SERVICE_UNAVAILABLE),
/// ];
/// ```
///
#[derive(Debug)]
pub struct Step {
    payload: Result<Payload, ::serde_json::Error>,
    options: StepOptions,
}

impl Step {
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            payload: Ok(payload.into()),
            options: StepOptions::default(),
        }
    }

    /// A step with an empty body.
    pub fn empty() -> Self {
        Self::new(Payload::default())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Payload::Text(text.into()))
    }

    /// A step which responds with the given value serialized as JSON.
    ///
    /// If the value cannot be serialized, then building a server with this step will fail.
    pub fn json<J>(body: &J) -> Self
    where
        J: ?Sized + Serialize,
    {
        Self {
            payload: ::serde_json::to_value(body).map(Payload::from),
            options: StepOptions::default(),
        }
    }

    pub fn with_options(mut self, options: StepOptions) -> Self {
        self.options = options;
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.options = self.options.status(status);
        self
    }

    pub fn header(mut self, name: impl Into<HeaderName>, value: impl Into<HeaderValue>) -> Self {
        self.options = self.options.header(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.options = self.options.headers(headers);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.options = self.options.delay(delay);
        self
    }

    /// Adds a stage which only runs whilst this step is being served.
    pub fn stage(mut self, stage: Stage) -> Self {
        self.options = self.options.stage(stage);
        self
    }

    pub(crate) fn into_parts(self) -> (Result<Payload, ::serde_json::Error>, StepOptions) {
        (self.payload, self.options)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Payload> for Step {
    fn from(payload: Payload) -> Self {
        Self::new(payload)
    }
}

impl From<&str> for Step {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Step {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<Value> for Step {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl<P> From<(P, StepOptions)> for Step
where
    P: Into<Payload>,
{
    fn from((payload, options): (P, StepOptions)) -> Self {
        Self::new(payload).with_options(options)
    }
}
