use ::url::Url;

use crate::MockServer;
use crate::MockServerConfig;
use crate::MockServerError;
use crate::Step;

/// Serves a single response, once, returning the url to request it from.
///
/// The server closes itself after answering one request.
///
/// ```rust
/// # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
/// #
/// use ::axum_mock_steps::serve_one;
/// use ::serde_json::json;
///
/// let url = serve_one(json!({ "embeth": "davidtz" })).await?;
/// #
/// # Ok(())
/// # }
/// ```
pub async fn serve_one<S>(step: S) -> Result<Url, MockServerError>
where
    S: Into<Step>,
{
    serve_sequence_as_url([step], MockServerConfig::default()).await
}

/// Serves the steps in order, one per request,
/// returning the [`MockServer`] for controlling it.
pub async fn serve_steps<I, S>(steps: I, config: MockServerConfig) -> Result<MockServer, MockServerError>
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    MockServer::new_with_config(steps, config).await
}

/// Serves the steps in order, one per request, returning the url to request them from.
///
/// The server runs in the background, and closes itself after the last step
/// unless the config leaves it open.
pub async fn serve_sequence_as_url<I, S>(steps: I, config: MockServerConfig) -> Result<Url, MockServerError>
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    serve_steps(steps, config).await.map(MockServer::into_url)
}

#[cfg(test)]
mod test_serve_one {
    use super::*;
    use ::serde::Serialize;
    use ::serde::Serializer;
    use ::serde::ser::Error as SerError;

    struct Circular;

    impl Serialize for Circular {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(S::Error::custom("circular reference"))
        }
    }

    #[tokio::test]
    async fn it_should_return_a_local_url() {
        let url = serve_one("hello").await.unwrap();

        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.path(), "/");
    }

    #[tokio::test]
    async fn it_should_fail_for_payloads_which_cannot_serialize() {
        let result = serve_one(Step::json(&Circular)).await;

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Could not serialize"));
    }
}

#[cfg(test)]
mod test_serve_steps {
    use super::*;

    #[tokio::test]
    async fn it_should_reject_no_steps() {
        let result = serve_steps(Vec::<Step>::new(), MockServerConfig::default()).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("at least one step"));
    }

    #[tokio::test]
    async fn it_should_hand_back_a_server_with_matching_url() {
        let server = serve_steps(["a", "b"], MockServerConfig::default()).await.unwrap();

        assert_eq!(server.url().as_str(), server.server_address());
        assert_eq!(server.steps_remaining(), 1);
    }
}
