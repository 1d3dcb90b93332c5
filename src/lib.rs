//!
//! Axum Mock Steps is a library for standing up throwaway HTTP servers in tests,
//! in place of a real service your code talks to:
//!
//!  * You give it a payload, or a list of payloads called steps,
//!  * it starts a server on a random local port,
//!  * each request made to it receives the next step,
//!  * then the server closes itself once every step has been served.
//!
//! Object payloads are serialized as JSON using Serde, and a matching
//! `Content-Type` is set unless you provide one.
//!
//! ## Getting Started
//!
//! Serve a single response, and get back the url to call:
//!
//! ```rust
//! # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::axum_mock_steps::serve_one;
//! use ::serde_json::json;
//!
//! let url = serve_one(json!({
//!     "username": "Terrance Pencilworth",
//! }))
//! .await?;
//!
//! // Call `url` from the code under test.
//! // The server closes after this one request.
//! #
//! # Ok(())
//! # }
//! ```
//!
//! ## Steps
//!
//! A server can serve a sequence of responses, one per request, in order.
//! Options set on the [`MockServerConfig`] apply to every step,
//! and options on each step override them.
//!
//! ```rust
//! # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::axum_mock_steps::MockServerConfig;
//! use ::axum_mock_steps::StepOptions;
//! use ::axum_mock_steps::serve_sequence_as_url;
//! use ::http::StatusCode;
//!
//! let config = MockServerConfig::builder()
//!     .status(StatusCode::CREATED)
//!     .into_config();
//!
//! let url = serve_sequence_as_url(
//!     [
//!         ("I'm ready for my closeup, Mr. DeMille.", StepOptions::new()),
//!         ("NO WIRE HANGERS", StepOptions::new().status(StatusCode::CONFLICT)),
//!     ],
//!     config,
//! )
//! .await?;
//! #
//! # Ok(())
//! # }
//! ```
//!
//! ## Stages
//!
//! A [`Stage`] is extra request handling, written like an Axum middleware function.
//! Stages on the server defaults run on every request.
//! Stages on a step only run whilst that step is the one being served.
//!
//! ```rust
//! # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::axum::extract::Request;
//! use ::axum::middleware::Next;
//! use ::axum_mock_steps::MockServer;
//! use ::axum_mock_steps::Stage;
//! use ::axum_mock_steps::Step;
//!
//! let check_query = Stage::from_fn(|request: Request, next: Next| async move {
//!     assert_eq!(request.uri().query(), Some("forme=topoopon"));
//!     next.run(request).await
//! });
//!
//! let server = MockServer::new([
//!     Step::text("first").stage(check_query),
//!     Step::text("second"),
//! ])
//! .await?;
//! #
//! # Ok(())
//! # }
//! ```
//!
//! ## Leave Open 🚪
//!
//! By default a server closes after its last step, and new connections to it are refused.
//! Setting [`MockServerConfig::leave_open`] keeps it running, serving the last step
//! to every further request, until [`MockServer::close`] is called or the server is dropped.
//!
//! ## Requests In Parallel
//!
//! Steps are handed out in the order requests reach the response.
//! If requests are made at the same time, which request receives which step is not defined.
//! Make requests one after another when the order matters.
//!

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub(crate) mod internals;
pub(crate) mod util;

mod mock_server;
pub use self::mock_server::*;

mod mock_server_builder;
pub use self::mock_server_builder::*;

mod mock_server_config;
pub use self::mock_server_config::*;

mod mock_server_error;
pub use self::mock_server_error::*;

mod payload;
pub use self::payload::*;

mod serve;
pub use self::serve::*;

mod stage;
pub use self::stage::*;

mod step;
pub use self::step::*;

mod step_options;
pub use self::step_options::*;

pub use ::http;
