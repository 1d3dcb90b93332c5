use ::axum::response::Response;
use ::hyper::Request;
use ::hyper::body::Incoming;
use ::hyper::server::conn::http1;
use ::hyper_util::rt::TokioIo;
use ::hyper_util::service::TowerToHyperService;
use ::std::convert::Infallible;
use ::tokio::net::TcpListener;
use ::tokio::select;
use ::tokio::spawn;
use ::tower::Service;
use ::tracing::debug;
use ::tracing::warn;

use crate::util::ListenerRelease;
use crate::util::ServeHandle;
use crate::util::ShutdownSignal;

/// Serves the given service on the listener, in a new task.
///
/// Once a close is requested on the [`ShutdownSignal`], no more connections
/// are accepted and the listener is dropped. Connections already open are
/// shut down gracefully, so responses in flight are still written.
pub(crate) fn spawn_serve<S>(
    tcp_listener: TcpListener,
    service: S,
    shutdown: ShutdownSignal,
    release: ListenerRelease,
) -> ServeHandle
where
    S: Service<Request<Incoming>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    let accept_shutdown = shutdown.clone();
    let server_handle = spawn(async move {
        loop {
            let accepted = select! {
                _ = accept_shutdown.requested() => break,
                accepted = tcp_listener.accept() => accepted,
            };

            let (tcp_stream, remote_addr) = match accepted {
                Ok(accepted) => accepted,
                Err(err) => {
                    warn!(error = %err, "Mock server failed to accept a connection");
                    continue;
                }
            };

            let hyper_service = TowerToHyperService::new(service.clone());
            let connection_shutdown = accept_shutdown.clone();
            spawn(async move {
                let connection =
                    http1::Builder::new().serve_connection(TokioIo::new(tcp_stream), hyper_service);
                ::tokio::pin!(connection);

                let result = select! {
                    result = connection.as_mut() => result,
                    _ = connection_shutdown.requested() => {
                        connection.as_mut().graceful_shutdown();
                        connection.await
                    }
                };

                if let Err(err) = result {
                    debug!(%remote_addr, error = %err, "Mock server connection ended with an error");
                }
            });
        }

        drop(tcp_listener);
        release.release();
        debug!("Mock server stopped listening");
    });

    ServeHandle::new(server_handle, shutdown)
}
