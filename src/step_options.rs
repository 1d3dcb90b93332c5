use ::http::HeaderMap;
use ::http::HeaderName;
use ::http::HeaderValue;
use ::http::StatusCode;
use ::std::time::Duration;

use crate::Stage;

/// The options for how a step responds.
///
/// Anything left as `None` falls back to the server's defaults,
/// and then to the built in defaults (a `200` with no extra headers, sent right away).
#[derive(Debug, Clone, Default)]
pub struct StepOptions {
    /// The status code to respond with.
    ///
    /// **Defaults** to `200 OK`.
    pub status: Option<StatusCode>,

    /// The headers to respond with.
    ///
    /// When set these _replace_ the defaults headers entirely,
    /// they are not merged together.
    /// A `Content-Type` is added based on the payload if one is not here.
    pub headers: Option<HeaderMap>,

    /// How long to wait before responding.
    pub delay: Option<Duration>,

    /// Stages run on the way to the response.
    ///
    /// On a step these only run whilst that step is the one being served.
    /// On the server defaults they run on every request.
    pub stages: Vec<Stage>,
}

impl StepOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds a header to respond with.
    ///
    /// This starts a new set of headers for these options,
    /// which will be used instead of any default headers.
    pub fn header(mut self, name: impl Into<HeaderName>, value: impl Into<HeaderValue>) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages<I>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = Stage>,
    {
        self.stages.extend(stages);
        self
    }
}

#[cfg(test)]
mod test_header {
    use super::*;
    use ::http::header::CONTENT_TYPE;

    #[test]
    fn it_should_start_a_header_map_when_none_set() {
        let options = StepOptions::new().header(
            HeaderName::from_static("x-terrifying"),
            HeaderValue::from_static("yes"),
        );

        let headers = options.headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["x-terrifying"], "yes");
    }

    #[test]
    fn it_should_add_to_headers_already_set() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));

        let options = StepOptions::new().headers(headers).header(
            HeaderName::from_static("x-terrifying"),
            HeaderValue::from_static("yes"),
        );

        let headers = options.headers.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[CONTENT_TYPE], "application/xml");
    }
}

#[cfg(test)]
mod test_stages {
    use super::*;
    use ::axum::extract::Request;
    use ::axum::middleware::Next;

    #[test]
    fn it_should_keep_stages_in_the_order_given() {
        let first = Stage::from_fn(|request: Request, next: Next| next.run(request));
        let second = Stage::from_fn(|request: Request, next: Next| next.run(request));

        let options = StepOptions::new().stage(first).stages(vec![second.clone(), second]);

        assert_eq!(options.stages.len(), 3);
    }
}
