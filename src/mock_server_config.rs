use ::std::net::IpAddr;

use crate::MockServerBuilder;
use crate::StepOptions;

/// The basic setup for a [`MockServer`](crate::MockServer).
#[derive(Debug, Clone, Default)]
pub struct MockServerConfig {
    /// The options every step falls back to.
    ///
    /// The stages given here run on _every_ request, whichever step is being served.
    pub defaults: StepOptions,

    /// Keeps the server running after the last step has been served.
    /// Any further requests receive the last step again.
    ///
    /// The server will then run until [`MockServer::close`](crate::MockServer::close)
    /// is called, or the `MockServer` is dropped.
    ///
    /// **Defaults** to false, closing after the last step.
    pub leave_open: bool,

    /// Set the IP to use for the server.
    ///
    /// **Defaults** to `127.0.0.1`.
    pub ip: Option<IpAddr>,

    /// Set the port number to use for the server.
    ///
    /// **Defaults** to a _random_ unused port.
    pub port: Option<u16>,
}

impl MockServerConfig {
    /// Creates a default `MockServerConfig`.
    pub fn new() -> Self {
        Default::default()
    }

    /// This is shorthand for calling [`crate::MockServerBuilder::new`].
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::new()
    }
}

impl From<StepOptions> for MockServerConfig {
    fn from(defaults: StepOptions) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }
}
