use ::thiserror::Error;

/// The ways starting a [`MockServer`](crate::MockServer) can fail.
///
/// Every variant is raised before the server accepts a connection,
/// so a failed setup never leaves a listening socket behind.
#[derive(Debug, Error)]
pub enum MockServerError {
    /// No steps were given, so there is nothing to serve.
    #[error("A mock server needs at least one step to serve")]
    NoSteps,

    /// A structured payload could not be turned into JSON.
    #[error("Could not serialize the payload for step {index}, {source}")]
    Serialization {
        index: usize,
        #[source]
        source: ::serde_json::Error,
    },

    /// No port could be found, or the port asked for could not be bound.
    #[error("Could not reserve a port for the mock server, {0}")]
    PortAllocation(#[source] ::anyhow::Error),

    /// The bound socket could not be handed over to the runtime.
    #[error("Could not start listening for the mock server, {0}")]
    Listen(#[source] ::std::io::Error),
}

#[cfg(test)]
mod test_display {
    use super::*;

    #[test]
    fn it_should_mention_at_least_one_step_when_empty() {
        let message = MockServerError::NoSteps.to_string();

        assert!(message.contains("at least one step"));
    }

    #[test]
    fn it_should_name_the_step_which_failed_to_serialize() {
        let source = ::serde_json::from_str::<::serde_json::Value>("{").unwrap_err();
        let message = MockServerError::Serialization { index: 2, source }.to_string();

        assert!(message.starts_with("Could not serialize the payload for step 2"));
    }
}
