//! Declarative interface binding.
//!
//! Rust has no runtime proxying, so "declare an interface, get a working
//! client" is an ahead-of-time expansion instead: `api_interface!` turns an
//! interface-like block into a struct wrapping [`ApiClient`], with one
//! forwarding method per declared endpoint. Arguments are
//! `Option<&dyn Display>` so callers omit optional parameters by passing
//! `None`, matching the collector's absent-parameter semantics.
//!
//! ```
//! use apibind_core::{api_interface, SignerRegistry, Transport, TransportError};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User { id: u64, name: String }
//!
//! api_interface! {
//!     /// Client for the user directory.
//!     pub struct UserApi {
//!         fn fetch_user(id) -> User { GET "http://api/users/{id}" }
//!         fn create_user(name, email) -> User { POST "http://api/users" }
//!     }
//! }
//!
//! # struct NoopTransport;
//! # impl Transport for NoopTransport {
//! #     fn get(&self, _url: &str) -> Result<String, TransportError> {
//! #         Ok(r#"{"id":42,"name":"Ann"}"#.to_string())
//! #     }
//! #     fn post(&self, _url: &str, _params: &[(String, String)]) -> Result<String, TransportError> {
//! #         Ok(r#"{"id":1,"name":"Bo"}"#.to_string())
//! #     }
//! # }
//! let api = UserApi::bind(NoopTransport, SignerRegistry::new()).unwrap();
//! let user = api.fetch_user(Some(&"42")).unwrap();
//! assert_eq!(user.name, "Ann");
//! ```

/// Expand an interface declaration into a bound client struct.
///
/// Each method line reads `fn name(params) -> ReturnType { VERB "url" }`,
/// optionally followed by `signed "strategy-name"` after the URL. Parameter
/// names bind positionally and double as the logical request-parameter
/// names, including `{name}` URL placeholders. Omitting the verb keyword
/// entirely is not supported here; declare `GET` or `POST` explicitly (the
/// registry-level default of POST still applies to hand-built
/// `EndpointDecl`s).
#[macro_export]
macro_rules! api_interface {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                fn $method:ident ( $( $arg:ident ),* $(,)? ) -> $ret:ty { $($decl:tt)+ }
            )+
        }
    ) => {
        $(#[$meta])*
        $vis struct $name<T: $crate::Transport> {
            client: $crate::ApiClient<T>,
        }

        impl<T: $crate::Transport> $name<T> {
            /// Bind every declared endpoint to `transport`, resolving signer
            /// references against `signers`.
            $vis fn bind(
                transport: T,
                signers: $crate::SignerRegistry,
            ) -> Result<Self, $crate::InvokeError> {
                let client = $crate::ApiClient::builder(transport)
                    .signers(signers)
                    $(
                        .endpoint(
                            stringify!($method),
                            $crate::api_interface!(@decl $($decl)+)
                                .params(&[ $( stringify!($arg) ),* ]),
                        )
                    )+
                    .build()?;
                Ok(Self { client })
            }

            $(
                $vis fn $method(
                    &self,
                    $( $arg: Option<&dyn ::std::fmt::Display> ),*
                ) -> Result<$ret, $crate::InvokeError> {
                    self.client.invoke(stringify!($method), &[ $( $arg ),* ])
                }
            )+
        }
    };

    (@decl GET $url:literal) => { $crate::EndpointDecl::new($url).get() };
    (@decl POST $url:literal) => { $crate::EndpointDecl::new($url).post() };
    (@decl GET $url:literal signed $strategy:literal) => {
        $crate::EndpointDecl::new($url).get().signed($strategy)
    };
    (@decl POST $url:literal signed $strategy:literal) => {
        $crate::EndpointDecl::new($url).post().signed($strategy)
    };
}
