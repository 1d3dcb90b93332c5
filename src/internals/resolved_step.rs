use ::axum::body::Body;
use ::axum::response::Response;
use ::bytes::Bytes;
use ::http::HeaderMap;
use ::http::StatusCode;
use ::std::fmt::Display;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;
use ::std::time::Duration;

use crate::MockServerError;
use crate::Payload;
use crate::Stage;
use crate::Step;
use crate::StepOptions;
use crate::internals::ensure_content_type_header;

/// Identifies a step by its position in the list the server was built with.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub struct StepId(pub(crate) usize);

impl StepId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for StepId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// A step with its payload serialized and every option filled in.
#[derive(Debug, Clone)]
pub struct ResolvedStep {
    pub id: StepId,
    pub body: Bytes,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub delay: Option<Duration>,
    pub stages: Vec<Stage>,
}

impl ResolvedStep {
    pub fn resolve(index: usize, step: Step, defaults: &StepOptions) -> Result<Self, MockServerError> {
        let (maybe_payload, options) = step.into_parts();
        let payload = maybe_payload
            .map_err(|source| MockServerError::Serialization { index, source })?;
        let body = payload_to_body(&payload)
            .map_err(|source| MockServerError::Serialization { index, source })?;

        let status = options
            .status
            .or(defaults.status)
            .unwrap_or(StatusCode::OK);

        // Headers are taken from one place only, never merged.
        let mut headers = options
            .headers
            .or_else(|| defaults.headers.clone())
            .unwrap_or_default();
        ensure_content_type_header(&payload, &mut headers);

        let delay = options
            .delay
            .or(defaults.delay)
            .filter(|delay| !delay.is_zero());

        Ok(Self {
            id: StepId(index),
            body,
            status,
            headers,
            delay,
            stages: options.stages,
        })
    }

    pub fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();

        response
    }
}

/// Resolves every step against the defaults.
///
/// This stops at the first step which cannot be resolved.
pub fn resolve_steps<I>(steps: I, defaults: &StepOptions) -> Result<Vec<ResolvedStep>, MockServerError>
where
    I: IntoIterator<Item = Step>,
{
    let resolved = steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| ResolvedStep::resolve(index, step, defaults))
        .collect::<Result<Vec<_>, _>>()?;

    if resolved.is_empty() {
        return Err(MockServerError::NoSteps);
    }

    Ok(resolved)
}

fn payload_to_body(payload: &Payload) -> Result<Bytes, ::serde_json::Error> {
    match payload {
        Payload::Text(text) => Ok(Bytes::from(text.clone())),
        Payload::Json(value) => ::serde_json::to_vec(value).map(Bytes::from),
    }
}


#[cfg(test)]
mod test_resolve_steps {
    use super::*;
    use ::serde::Serializer;
    use ::serde::ser::Error as SerError;
    use ::serde::Serialize;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(S::Error::custom("cannot be serialized"))
        }
    }

    #[test]
    fn it_should_reject_no_steps() {
        let result = resolve_steps(Vec::new(), &StepOptions::default());

        assert!(matches!(result, Err(MockServerError::NoSteps)));
    }

    #[test]
    fn it_should_number_steps_in_order() {
        let steps = vec![Step::text("a"), Step::text("b"), Step::text("c")];
        let resolved = resolve_steps(steps, &StepOptions::default()).unwrap();

        let ids: Vec<usize> = resolved.iter().map(|step| step.id.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn it_should_fail_everything_when_one_step_cannot_serialize() {
        let steps = vec![Step::text("a"), Step::json(&Unserializable), Step::text("c")];
        let result = resolve_steps(steps, &StepOptions::default());

        assert!(matches!(
            result,
            Err(MockServerError::Serialization { index: 1, .. })
        ));
    }
}
