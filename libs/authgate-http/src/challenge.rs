//! `WWW-Authenticate` challenge values.

use http::HeaderValue;

/// `<scheme>` or `<scheme> realm="<realm>"`.
///
/// The realm is written as an HTTP quoted-string, so `"` and `\` are
/// backslash-escaped. A realm that still cannot be carried in a header
/// value (control characters, non-ASCII) is dropped.
#[must_use]
pub fn challenge(scheme: &'static str, realm: Option<&str>) -> HeaderValue {
    realm
        .and_then(|r| HeaderValue::from_str(&format!("{scheme} realm={}", quoted_string(r))).ok())
        .unwrap_or_else(|| HeaderValue::from_static(scheme))
}

fn quoted_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn plain_scheme_without_realm() {
        assert_eq!(challenge("Bearer", None), "Bearer");
    }

    #[test]
    fn realm_is_quoted() {
        assert_eq!(challenge("Basic", Some("ops")), "Basic realm=\"ops\"");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(
            challenge("Basic", Some(r#"a", error="x"#)),
            r#"Basic realm="a\", error=\"x""#
        );
        assert_eq!(challenge("Basic", Some(r"dom\ain")), r#"Basic realm="dom\\ain""#);
    }

    #[test]
    fn unencodable_realm_is_dropped() {
        assert_eq!(challenge("Bearer", Some("bad\nrealm")), "Bearer");
    }
}
