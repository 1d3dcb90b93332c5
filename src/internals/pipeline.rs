use ::anyhow::Error as AnyhowError;
use ::axum::Router;
use ::axum::body::Body;
use ::axum::extract::Request;
use ::axum::extract::State;
use ::axum::middleware::Next;
use ::axum::middleware::from_fn_with_state;
use ::axum::response::Response;
use ::http::StatusCode;
use ::std::sync::Arc;
use ::tokio::time::sleep;
use ::tracing::error;

use crate::Stage;
use crate::internals::ResolvedStep;
use crate::internals::ServerSession;
use crate::internals::StepId;

/// A stage, along with the step it belongs to.
/// Global stages have no step.
#[derive(Debug, Clone)]
struct StageBinding {
    session: Arc<ServerSession>,
    maybe_step_id: Option<StepId>,
    stage: Stage,
}

///
/// Builds the request handling for a mock server.
///
/// Requests go through, in order:
///  * a delay, if the current step has one,
///  * the global stages,
///  * the stages of every step, which are skipped unless their step is current,
///  * the response writer, which serves the current step and moves the queue on.
///
pub fn build_pipeline(
    session: Arc<ServerSession>,
    global_stages: Vec<Stage>,
    step_stages: Vec<(StepId, Stage)>,
) -> Router {
    let global_bindings = global_stages.into_iter().map(|stage| StageBinding {
        session: session.clone(),
        maybe_step_id: None,
        stage,
    });

    let step_bindings = step_stages.into_iter().map(|(step_id, stage)| StageBinding {
        session: session.clone(),
        maybe_step_id: Some(step_id),
        stage,
    });

    let bindings: Vec<StageBinding> = global_bindings.chain(step_bindings).collect();

    // Each layer wraps the ones before it, so they are added last to first.
    let mut router = Router::new()
        .fallback(write_current_step)
        .with_state(session.clone());
    for binding in bindings.into_iter().rev() {
        router = router.layer(from_fn_with_state(binding, run_stage));
    }

    router.layer(from_fn_with_state(session, delay_current_step))
}

/// Pairs every step's stages with that step, in the order the steps were given.
pub fn collect_step_stages(steps: &[ResolvedStep]) -> Vec<(StepId, Stage)> {
    steps
        .iter()
        .flat_map(|step| step.stages.iter().map(|stage| (step.id, stage.clone())))
        .collect()
}

async fn delay_current_step(
    State(session): State<Arc<ServerSession>>,
    request: Request,
    next: Next,
) -> Response {
    match session.current_delay() {
        Ok(Some(delay)) => sleep(delay).await,
        Ok(None) => {}
        Err(err) => return internal_error_response(err),
    }

    next.run(request).await
}

async fn run_stage(State(binding): State<StageBinding>, request: Request, next: Next) -> Response {
    if let Some(step_id) = binding.maybe_step_id {
        match binding.session.is_current(step_id) {
            Ok(true) => {}
            Ok(false) => return next.run(request).await,
            Err(err) => return internal_error_response(err),
        }
    }

    binding.stage.call(request, next).await
}

async fn write_current_step(State(session): State<Arc<ServerSession>>) -> Response {
    session
        .respond_and_advance()
        .await
        .unwrap_or_else(internal_error_response)
}

fn internal_error_response(err: AnyhowError) -> Response {
    error!(error = ?err, "Mock server could not handle request");

    let mut response = Response::new(Body::from(format!("{err:?}")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}
