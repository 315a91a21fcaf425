//! Declarative HTTP API-client engine.
//!
//! # Overview
//! Endpoints are declared as explicit metadata — a URL template, verb
//! markers, positional parameter bindings, and an optional signing-strategy
//! reference — and bound into an [`ApiClient`]. Each invocation then runs a
//! strictly linear pipeline: resolve the endpoint descriptor, collect the
//! arguments into a working parameter map, substitute `{name}` placeholders
//! in the URL (consuming each substituted entry so it is never duplicated
//! into the query string or form body), optionally append a computed
//! signature parameter, dispatch through the [`Transport`] collaborator, and
//! deserialize the raw body into the declared return type.
//!
//! # Design
//! - The core performs no I/O: [`Transport`] is the collaborator boundary,
//!   implemented by the caller (integration tests use ureq against the
//!   workspace mock server).
//! - Everything a call touches is call-scoped; the registries are resolved
//!   once at bind time and shared read-only, so `&ApiClient` is freely
//!   shared across threads when the transport is.
//! - A call either returns the declared type or one [`InvokeError`] with a
//!   stable [`ErrorCode`]; there are no partial results and no internal
//!   retries.
//! - The [`api_interface!`] macro expands an interface-like declaration into
//!   a typed client struct, replacing runtime proxying with ahead-of-time
//!   forwarding methods.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod interface;
pub mod metadata;
pub mod params;
pub mod sign;
pub mod template;

pub use client::{map_response, ApiClient, ApiClientBuilder};
pub use dispatch::{append_query, dispatch, Transport};
pub use error::{ErrorCode, InvokeError, TransportError};
pub use metadata::{resolve, EndpointDecl, EndpointDescriptor, EndpointRegistry, ParamBinding, Verb};
pub use params::{collect, ParamMap};
pub use sign::{HmacSha256Signer, Signature, SignatureStrategy, SignerRegistry};
pub use template::expand;
