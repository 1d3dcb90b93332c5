use ::axum::extract::Request;
use ::axum::middleware::Next;
use ::axum::response::Response;
use ::std::fmt::Debug;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;
use ::std::future::Future;
use ::std::pin::Pin;
use ::std::sync::Arc;

pub type StageFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

type StageFn = dyn Fn(Request, Next) -> StageFuture + Send + Sync + 'static;

///
/// A `Stage` is an extra piece of request handling, run before the mock
/// server writes its response. It works like an Axum middleware function;
/// it gets the request and the rest of the chain as a [`Next`].
///
/// A stage may answer the request itself by not calling `next`.
/// The current step is then left in place for the next request.
///
/// ```rust
/// use ::axum::extract::Request;
/// use ::axum::middleware::Next;
/// use ::axum_mock_steps::Stage;
/// use ::http::HeaderValue;
/// use ::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
///
/// let allow_cors = Stage::from_fn(|request: Request, next: Next| async move {
///     let mut response = next.run(request).await;
///     response
///         .headers_mut()
///         .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
///     response
/// });
/// ```
///
#[derive(Clone)]
pub struct Stage {
    inner: Arc<StageFn>,
}

impl Stage {
    pub fn from_fn<F, Fut>(stage_fn: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let inner = move |request: Request, next: Next| -> StageFuture {
            Box::pin(stage_fn(request, next))
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn call(&self, request: Request, next: Next) -> StageFuture {
        (self.inner)(request, next)
    }
}

impl Debug for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Stage").finish_non_exhaustive()
    }
}
