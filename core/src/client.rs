//! The bound client and its invocation pipeline.
//!
//! # Design
//! `ApiClient` is built once from endpoint declarations and a signer
//! registry, then shared read-only: descriptors are resolved at bind time
//! and signer references are looked up at bind time, so a call is pure
//! pipeline with no shared mutable state. The pipeline per call is strictly
//! linear — resolve → collect → template → sign → dispatch → map — and each
//! stage either feeds the next or terminates the call with one
//! `InvokeError`. Retries, if any, belong to the transport.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::dispatch::{dispatch, Transport};
use crate::error::InvokeError;
use crate::metadata::{resolve, EndpointDecl, EndpointRegistry};
use crate::params::collect;
use crate::sign::{SignatureStrategy, SignerRegistry};
use crate::template::expand;

/// Deserialize a raw response body into the declared return type.
///
/// The raw body rides along in the error: when the server returned something
/// unexpected it is the only evidence of what actually happened.
pub fn map_response<R: DeserializeOwned>(body: &str) -> Result<R, InvokeError> {
    serde_json::from_str(body).map_err(|source| {
        warn!("response body failed structural deserialization: {body}");
        InvokeError::Deserialization {
            body: body.to_string(),
            source,
        }
    })
}

/// A client with its endpoints bound. Every declared method routes through
/// the same invocation pipeline.
pub struct ApiClient<T: Transport> {
    transport: T,
    endpoints: EndpointRegistry,
    // Per-method strategy, resolved from the declaration's reference at
    // bind time. A method absent here dispatches unsigned.
    signers: HashMap<String, Arc<dyn SignatureStrategy>>,
}

impl<T: Transport> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("signers", &self.signers.keys())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn builder(transport: T) -> ApiClientBuilder<T> {
        ApiClientBuilder {
            transport,
            signers: SignerRegistry::new(),
            decls: Vec::new(),
        }
    }

    /// Run the full pipeline for `method` and map the body into `R`.
    pub fn invoke<R: DeserializeOwned>(
        &self,
        method: &str,
        args: &[Option<&dyn fmt::Display>],
    ) -> Result<R, InvokeError> {
        let body = self.invoke_raw(method, args)?;
        map_response(&body)
    }

    /// Run the pipeline for `method` and return the raw response body
    /// without the mapping stage.
    pub fn invoke_raw(
        &self,
        method: &str,
        args: &[Option<&dyn fmt::Display>],
    ) -> Result<String, InvokeError> {
        let descriptor = self.endpoints.lookup(method)?;
        let mut params = collect(&descriptor.bindings, args);
        let url = expand(&descriptor.url_template, &mut params)?;
        let mut pairs = params.into_pairs();
        if let Some(strategy) = self.signers.get(method) {
            if let Some(signature) = strategy.sign(descriptor, &url, &pairs) {
                debug!("appending signature parameter `{}` for `{method}`", signature.name);
                pairs.push((signature.name, signature.value));
            }
        }
        dispatch(&self.transport, descriptor.verb, &url, &pairs)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Collects endpoint declarations and signer registrations, then resolves
/// everything once at `build`.
pub struct ApiClientBuilder<T: Transport> {
    transport: T,
    signers: SignerRegistry,
    decls: Vec<(String, EndpointDecl)>,
}

impl<T: Transport> ApiClientBuilder<T> {
    /// Register a signature strategy under `name`.
    pub fn signer(mut self, name: &str, strategy: Arc<dyn SignatureStrategy>) -> Self {
        self.signers.register(name, strategy);
        self
    }

    /// Use a pre-populated signer registry.
    pub fn signers(mut self, registry: SignerRegistry) -> Self {
        self.signers = registry;
        self
    }

    /// Declare the endpoint behind `method`.
    pub fn endpoint(mut self, method: &str, decl: EndpointDecl) -> Self {
        self.decls.push((method.to_string(), decl));
        self
    }

    /// Resolve every declaration into its descriptor and every signer
    /// reference into its strategy. A malformed declaration fails the build
    /// with `Metadata`; a reference to an unregistered strategy is logged
    /// and the endpoint proceeds unsigned — stale signature metadata must
    /// not break an endpoint.
    pub fn build(self) -> Result<ApiClient<T>, InvokeError> {
        let mut endpoints = EndpointRegistry::new();
        let mut signers = HashMap::new();
        for (method, decl) in &self.decls {
            let descriptor = resolve(method, decl)?;
            if let Some(reference) = &descriptor.signer {
                match self.signers.lookup(reference) {
                    Some(strategy) => {
                        signers.insert(method.clone(), strategy);
                    }
                    None => {
                        warn!(
                            "endpoint `{method}` references unregistered signature \
                             strategy `{reference}`; dispatching unsigned"
                        );
                    }
                }
            }
            endpoints.insert(method.clone(), descriptor);
        }
        Ok(ApiClient {
            transport: self.transport,
            endpoints,
            signers,
        })
    }
}
