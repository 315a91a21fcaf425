//! Verb-dependent request construction and the transport boundary.
//!
//! # Design
//! The core never touches the network. `Transport` is the collaborator
//! boundary: implementations perform the actual HTTP round trip and return
//! the raw body (the integration tests implement it with ureq against the
//! workspace mock server). The dispatcher owns GET query construction —
//! exactly one `?`, values percent-encoded, keys literal — while form
//! encoding of POST bodies belongs to the transport per its contract.

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{InvokeError, TransportError};
use crate::metadata::Verb;

/// Everything except RFC 3986 unreserved characters is percent-encoded, so
/// a space becomes `%20` (not `+`) and reserved characters like `&` or `=`
/// inside values cannot break the query string apart.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Executes HTTP round trips on behalf of the dispatcher.
///
/// Implementations must be safe for concurrent use if the client is shared
/// across threads, and must percent-encode POST form values themselves.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, TransportError>;
    fn post(&self, url: &str, params: &[(String, String)]) -> Result<String, TransportError>;
}

/// Append `params` to `url` as a query string.
///
/// Guarantees exactly one `?` introduces the query: a URL already ending in
/// `?` or `&` is continued as-is, anything else gets a `?` first. Values are
/// percent-encoded; keys are emitted literally.
pub fn append_query(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let mut out = String::with_capacity(url.len() + params.len() * 8);
    out.push_str(url);
    if !(url.ends_with('?') || url.ends_with('&')) {
        out.push('?');
    }
    for (i, (name, value)) in params.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(name);
        out.push('=');
        out.extend(utf8_percent_encode(value, QUERY_VALUE));
    }
    out
}

/// Build the final request shape for `verb` and hand it to the transport.
pub fn dispatch<T: Transport>(
    transport: &T,
    verb: Verb,
    url: &str,
    params: &[(String, String)],
) -> Result<String, InvokeError> {
    match verb {
        Verb::Get => {
            let full_url = append_query(url, params);
            debug!("GET {full_url}");
            transport.get(&full_url).map_err(InvokeError::from)
        }
        Verb::Post => {
            // The URL is never mutated for POST; every remaining pair goes
            // into the form body.
            debug!("POST {url} ({} form params)", params.len());
            transport.post(url, params).map_err(InvokeError::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records the calls it receives and replies with a canned body.
    struct RecordingTransport {
        calls: RefCell<Vec<(Verb, String, Vec<(String, String)>)>>,
        body: String,
    }

    impl RecordingTransport {
        fn new(body: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                body: body.to_string(),
            }
        }
    }

    impl Transport for RecordingTransport {
        fn get(&self, url: &str) -> Result<String, TransportError> {
            self.calls
                .borrow_mut()
                .push((Verb::Get, url.to_string(), Vec::new()));
            Ok(self.body.clone())
        }

        fn post(&self, url: &str, params: &[(String, String)]) -> Result<String, TransportError> {
            self.calls
                .borrow_mut()
                .push((Verb::Post, url.to_string(), params.to_vec()));
            Ok(self.body.clone())
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn get_encodes_values_but_not_keys() {
        let url = append_query("http://h/ep", &pairs(&[("a", "1"), ("b", "x y")]));
        assert_eq!(url, "http://h/ep?a=1&b=x%20y");
    }

    #[test]
    fn get_encodes_reserved_characters() {
        let url = append_query("http://h/ep", &pairs(&[("q", "a&b=c/d")]));
        assert_eq!(url, "http://h/ep?q=a%26b%3Dc%2Fd");
    }

    #[test]
    fn unreserved_characters_stay_literal() {
        let url = append_query("http://h/ep", &pairs(&[("q", "a-b_c.d~e")]));
        assert_eq!(url, "http://h/ep?q=a-b_c.d~e");
    }

    #[test]
    fn url_ending_in_question_mark_gets_no_spurious_separator() {
        let url = append_query("http://h/ep?", &pairs(&[("a", "1")]));
        assert_eq!(url, "http://h/ep?a=1");
    }

    #[test]
    fn url_ending_in_ampersand_is_continued() {
        let url = append_query("http://h/ep?fixed=1&", &pairs(&[("a", "2")]));
        assert_eq!(url, "http://h/ep?fixed=1&a=2");
    }

    #[test]
    fn no_params_leaves_url_untouched() {
        assert_eq!(append_query("http://h/ep", &[]), "http://h/ep");
    }

    #[test]
    fn get_dispatch_builds_query_before_calling_transport() {
        let transport = RecordingTransport::new("ok");
        let body = dispatch(
            &transport,
            Verb::Get,
            "http://h/ep",
            &pairs(&[("a", "1"), ("b", "x y")]),
        )
        .unwrap();
        assert_eq!(body, "ok");
        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "http://h/ep?a=1&b=x%20y");
    }

    #[test]
    fn post_dispatch_never_mutates_the_url() {
        let transport = RecordingTransport::new("ok");
        let params = pairs(&[("name", "Ann"), ("note", "x y")]);
        dispatch(&transport, Verb::Post, "http://h/ep", &params).unwrap();
        let calls = transport.calls.borrow();
        assert_eq!(calls[0].1, "http://h/ep");
        assert_eq!(calls[0].2, params);
    }

    #[test]
    fn transport_failure_surfaces_as_transport_error() {
        struct FailingTransport;
        impl Transport for FailingTransport {
            fn get(&self, _url: &str) -> Result<String, TransportError> {
                Err(TransportError::new("connection refused"))
            }
            fn post(
                &self,
                _url: &str,
                _params: &[(String, String)],
            ) -> Result<String, TransportError> {
                Err(TransportError::new("connection refused"))
            }
        }
        let err = dispatch(&FailingTransport, Verb::Get, "http://h/ep", &[]).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::Transport);
    }
}
