//! Endpoint metadata: declarations, resolved descriptors, and the registry.
//!
//! # Design
//! The original engine discovered endpoint metadata through annotations at
//! call time. Here the metadata is an explicit, statically-checkable value:
//! each method registers an `EndpointDecl` (URL template, verb markers,
//! positional parameter bindings, optional signer reference), and `resolve`
//! turns it into an immutable `EndpointDescriptor`. Resolution is pure —
//! resolving the same declaration twice yields identical descriptors — so
//! the registry safely resolves once at bind time and shares the result
//! read-only across calls and threads.

use crate::error::InvokeError;

/// HTTP verb the dispatcher will use for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

/// Binds a logical parameter name to a positional argument index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamBinding {
    pub name: String,
    pub index: usize,
}

/// Authored metadata for one endpoint, as registered by the caller.
///
/// Verb markers mirror the declaration style of annotation-based clients:
/// `get` and `post` are independent flags, and the resolver decides which
/// one is honored (GET first, then POST, defaulting to POST).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDecl {
    pub url: String,
    pub get: bool,
    pub post: bool,
    pub bindings: Vec<ParamBinding>,
    pub signer: Option<String>,
}

impl EndpointDecl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            get: false,
            post: false,
            bindings: Vec::new(),
            signer: None,
        }
    }

    /// Mark this endpoint with the GET verb.
    pub fn get(mut self) -> Self {
        self.get = true;
        self
    }

    /// Mark this endpoint with the POST verb.
    pub fn post(mut self) -> Self {
        self.post = true;
        self
    }

    /// Bind logical parameter names to argument positions in order: the
    /// first name binds argument 0, the second argument 1, and so on.
    pub fn params(mut self, names: &[&str]) -> Self {
        self.bindings = names
            .iter()
            .enumerate()
            .map(|(index, name)| ParamBinding {
                name: (*name).to_string(),
                index,
            })
            .collect();
        self
    }

    /// Bind a single logical name to an explicit argument index.
    pub fn param(mut self, name: &str, index: usize) -> Self {
        self.bindings.push(ParamBinding {
            name: name.to_string(),
            index,
        });
        self
    }

    /// Reference a signature strategy by registry name.
    pub fn signed(mut self, strategy: &str) -> Self {
        self.signer = Some(strategy.to_string());
        self
    }
}

/// Resolved, immutable metadata for one endpoint. One descriptor exists per
/// registered method; the registry owns it for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub url_template: String,
    pub verb: Verb,
    pub signer: Option<String>,
    pub bindings: Vec<ParamBinding>,
}

/// Resolve an authored declaration into a descriptor.
///
/// Fails with `InvokeError::Metadata` when the declaration carries no URL
/// template — the method is effectively missing its endpoint declaration,
/// which is a defect in the interface definition and surfaces immediately.
pub fn resolve(method: &str, decl: &EndpointDecl) -> Result<EndpointDescriptor, InvokeError> {
    if decl.url.is_empty() {
        return Err(InvokeError::Metadata {
            method: method.to_string(),
            reason: "declaration has no URL template".to_string(),
        });
    }
    // GET wins when both markers are set; otherwise POST, which is also the
    // default when neither marker is declared.
    let verb = if decl.get { Verb::Get } else { Verb::Post };
    Ok(EndpointDescriptor {
        url_template: decl.url.clone(),
        verb,
        signer: decl.signer.clone(),
        bindings: decl.bindings.clone(),
    })
}

/// Method name → resolved descriptor. Built once at bind time, read-only
/// afterwards.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<(String, EndpointDescriptor)>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, method: impl Into<String>, descriptor: EndpointDescriptor) {
        self.endpoints.push((method.into(), descriptor));
    }

    /// Look up the descriptor for a method. An unregistered method is the
    /// analogue of a method lacking its endpoint annotation: `Metadata`
    /// error, surfaced immediately.
    pub fn lookup(&self, method: &str) -> Result<&EndpointDescriptor, InvokeError> {
        self.endpoints
            .iter()
            .find(|(name, _)| name == method)
            .map(|(_, descriptor)| descriptor)
            .ok_or_else(|| InvokeError::Metadata {
                method: method.to_string(),
                reason: "no endpoint registered for this method".to_string(),
            })
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> + '_ {
        self.endpoints.iter().map(|(name, _)| name.as_str())
    }
}
