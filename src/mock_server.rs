use ::anyhow::Context;
use ::std::net::SocketAddr;
use ::std::sync::Arc;
use ::tracing::info;
use ::url::Url;

use crate::MockServerBuilder;
use crate::MockServerConfig;
use crate::MockServerError;
use crate::Step;
use crate::internals::ServerSession;
use crate::internals::StartingTcpSetup;
use crate::internals::StepQueue;
use crate::internals::build_pipeline;
use crate::internals::collect_step_stages;
use crate::internals::resolve_steps;
use crate::util::ServeHandle;
use crate::util::ShutdownSignal;
use crate::util::spawn_serve;

///
/// A `MockServer` serves a list of steps, one per request, on a local port.
///
/// The first request gets the first step, the second request gets the second step,
/// and so on. Once the last step has been served the server closes itself,
/// unless it was built with [`MockServerConfig::leave_open`].
///
/// ```rust
/// # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
/// #
/// use ::axum_mock_steps::MockServer;
/// use ::axum_mock_steps::Step;
/// use ::http::StatusCode;
/// use ::serde_json::json;
///
/// let server = MockServer::new([
///     Step::json(&json!({ "laura": "harring" })),
///     Step::text("no soup for you").status(StatusCode::FORBIDDEN),
/// ])
/// .await?;
///
/// // Point the code being tested at the server.
/// let url = server.url();
/// #
/// # Ok(())
/// # }
/// ```
///
/// Requests should be made one after another. When requests arrive at the
/// same time, which of them is served which step is not defined.
///
/// Dropping the `MockServer` closes it. Responses already being written
/// are allowed to finish.
///
#[derive(Debug)]
pub struct MockServer {
    session: Arc<ServerSession>,
    serve_handle: ServeHandle,
    socket_addr: SocketAddr,
    server_url: Url,
}

impl MockServer {
    /// Starts a server for the given steps, using the default configuration.
    pub async fn new<I, S>(steps: I) -> Result<Self, MockServerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        Self::new_with_config(steps, MockServerConfig::default()).await
    }

    /// This very similar to [`MockServer::new()`],
    /// however you can customise the defaults for each step,
    /// and how the server runs.
    ///
    /// See the [`MockServerConfig`] for more information on each configuration setting.
    pub async fn new_with_config<I, S>(steps: I, config: MockServerConfig) -> Result<Self, MockServerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        let MockServerConfig {
            defaults,
            leave_open,
            ip,
            port,
        } = config;

        // Everything which can fail without a socket is checked first.
        let resolved = resolve_steps(steps.into_iter().map(Into::into), &defaults)?;
        let step_count = resolved.len();
        let step_stages = collect_step_stages(&resolved);
        let queue = StepQueue::new(resolved, leave_open)?;

        let setup = StartingTcpSetup::new(ip, port)
            .context("Cannot create socket address for use")
            .map_err(MockServerError::PortAllocation)?;
        let (socket_addr, tcp_listener) = setup
            .into_tokio_listener()
            .map_err(MockServerError::Listen)?;

        let server_address = format!("http://{socket_addr}");
        let server_url: Url = server_address
            .parse()
            .context("Cannot build url for mock server")
            .map_err(MockServerError::PortAllocation)?;

        let (shutdown, release) = ShutdownSignal::new();
        let session = Arc::new(ServerSession::new(queue, shutdown.clone()));
        let router = build_pipeline(session.clone(), defaults.stages, step_stages);
        let serve_handle = spawn_serve(tcp_listener, router, shutdown, release);

        info!(url = %server_url, steps = step_count, leave_open, "Mock server listening");

        Ok(Self {
            session,
            serve_handle,
            socket_addr,
            server_url,
        })
    }

    /// Creates a [`MockServerBuilder`], for building a server with custom defaults.
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::new()
    }

    /// Returns the local web address for the mock server.
    ///
    /// This will be something like `http://127.0.0.1:1234/`,
    /// where `1234` is a randomly assigned port number.
    pub fn server_address(&self) -> &str {
        self.server_url.as_str()
    }

    pub fn url(&self) -> Url {
        self.server_url.clone()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.socket_addr
    }

    /// How many steps are still waiting to be served.
    ///
    /// The step being served right now is not included.
    pub fn steps_remaining(&self) -> usize {
        self.session
            .remaining()
            .context("Trying to read steps_remaining")
            .unwrap()
    }

    /// How many requests have been answered with a step.
    ///
    /// Requests answered by a stage, without reaching a step, are not counted.
    pub fn requests_served(&self) -> usize {
        self.session
            .served()
            .context("Trying to read requests_served")
            .unwrap()
    }

    /// Returns true once the server has stopped accepting connections.
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    /// Closes the server.
    ///
    /// When this returns, new connections will be refused.
    /// It is fine to call this on a server which has already closed.
    pub async fn close(&self) {
        self.session
            .close()
            .await
            .context("Trying to close mock server")
            .unwrap()
    }

    /// Gives up the handle to the server, returning its url.
    ///
    /// The server keeps running until its last step is served.
    /// If it is left open, it runs until the runtime ends.
    pub fn into_url(mut self) -> Url {
        self.serve_handle.detach();
        self.server_url.clone()
    }
}


#[cfg(test)]
mod test_steps_remaining {
    use super::*;

    #[tokio::test]
    async fn it_should_not_count_the_current_step() {
        let server = MockServer::new(["a", "b", "c"]).await.unwrap();

        assert_eq!(server.steps_remaining(), 2);
        assert_eq!(server.requests_served(), 0);
    }
}
