//! URL templating with consumption semantics.
//!
//! # Design
//! `{name}` placeholders are substituted left-to-right from the working
//! parameter map, and every substitution removes its key from the map so a
//! templated value is never duplicated into the query string or form body.
//! A placeholder whose key is absent fails fast with a `Template` error
//! naming the placeholder; by the same rule, a second occurrence of the same
//! placeholder fails because the first one consumed the entry.

use crate::error::InvokeError;
use crate::params::ParamMap;

/// Substitute `{name}` placeholders in `template` from `map`, consuming each
/// substituted entry. Returns the resolved URL.
pub fn expand(template: &str, map: &mut ParamMap) -> Result<String, InvokeError> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (head, tail) = rest.split_at(open);
        resolved.push_str(head);
        match tail[1..].find('}') {
            Some(close) => {
                let name = &tail[1..1 + close];
                match map.remove(name) {
                    Some(value) => resolved.push_str(&value),
                    None => {
                        return Err(InvokeError::Template {
                            template: template.to_string(),
                            placeholder: name.to_string(),
                        });
                    }
                }
                rest = &tail[close + 2..];
            }
            None => {
                // No closing brace: the remainder is literal text.
                resolved.push_str(tail);
                rest = "";
            }
        }
    }
    resolved.push_str(rest);
    Ok(resolved)
}
