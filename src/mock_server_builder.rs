use ::http::HeaderMap;
use ::http::HeaderName;
use ::http::HeaderValue;
use ::http::StatusCode;
use ::std::net::IpAddr;
use ::std::time::Duration;
use ::url::Url;

use crate::MockServer;
use crate::MockServerConfig;
use crate::MockServerError;
use crate::Stage;
use crate::Step;

/// A builder for [`crate::MockServer`]. Inside is a [`crate::MockServerConfig`],
/// configured by each method, and then turned into a server by [`crate::MockServerBuilder::build`].
///
/// The recommended way to make instances is to call [`crate::MockServer::builder`].
///
/// # Creating a [`crate::MockServer`]
///
/// ```rust
/// # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
/// #
/// use ::axum_mock_steps::MockServer;
/// use ::http::HeaderName;
/// use ::http::HeaderValue;
/// use ::http::StatusCode;
///
/// let server = MockServer::builder()
///     .status(StatusCode::CREATED)
///     .header(HeaderName::from_static("x-terrifying"), HeaderValue::from_static("yes"))
///     .leave_open()
///     .build(["I'm ready for my closeup, Mr. DeMille.", "NO WIRE HANGERS"])
///     .await?;
/// #
/// # Ok(())
/// # }
/// ```
///
/// # Creating a [`crate::MockServerConfig`]
///
/// ```rust
/// # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
/// #
/// use ::axum_mock_steps::MockServer;
/// use ::axum_mock_steps::MockServerBuilder;
/// use ::std::time::Duration;
///
/// let config = MockServerBuilder::new()
///     .delay(Duration::from_millis(250))
///     .into_config();
///
/// let server = MockServer::new_with_config(["slow"], config).await?;
/// #
/// # Ok(())
/// # }
/// ```
///
#[derive(Debug, Clone, Default)]
pub struct MockServerBuilder {
    config: MockServerConfig,
}

impl MockServerBuilder {
    /// Creates a default `MockServerBuilder`.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_config(config: MockServerConfig) -> Self {
        Self { config }
    }

    /// The status code used by steps which do not set their own.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.config.defaults = self.config.defaults.status(status);
        self
    }

    /// A header sent by steps which do not set their own headers.
    pub fn header(mut self, name: impl Into<HeaderName>, value: impl Into<HeaderValue>) -> Self {
        self.config.defaults = self.config.defaults.header(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.config.defaults = self.config.defaults.headers(headers);
        self
    }

    /// The delay used by steps which do not set their own.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.defaults = self.config.defaults.delay(delay);
        self
    }

    /// Adds a stage run on every request.
    pub fn stage(mut self, stage: Stage) -> Self {
        self.config.defaults = self.config.defaults.stage(stage);
        self
    }

    pub fn leave_open(mut self) -> Self {
        self.config.leave_open = true;
        self
    }

    pub fn close_after_last_step(mut self) -> Self {
        self.config.leave_open = false;
        self
    }

    pub fn ip(mut self, ip: IpAddr) -> Self {
        self.config.ip = Some(ip);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = Some(port);
        self
    }

    /// For turning this into a [`crate::MockServerConfig`] object,
    /// which can be passed to [`crate::MockServer::new_with_config`].
    pub fn into_config(self) -> MockServerConfig {
        self.config
    }

    /// Starts a [`crate::MockServer`] serving the given steps.
    pub async fn build<I, S>(self, steps: I) -> Result<MockServer, MockServerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        MockServer::new_with_config(steps, self.into_config()).await
    }

    /// Starts a server serving the given steps, returning only its url.
    ///
    /// The server keeps running in the background until its last step is served.
    pub async fn build_url<I, S>(self, steps: I) -> Result<Url, MockServerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        self.build(steps).await.map(MockServer::into_url)
    }
}

impl From<MockServerConfig> for MockServerBuilder {
    fn from(config: MockServerConfig) -> Self {
        MockServerBuilder::from_config(config)
    }
}
