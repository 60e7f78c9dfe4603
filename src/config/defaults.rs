//! Built-in header tables.
//!
//! Plain data: the variant for well-known response headers, safe values
//! for common security headers and the nickname map. `Defaults` is
//! handed to the registry explicitly; user configuration is merged over
//! it, never written into it.

use crate::header::{HeaderData, TypeHint};
use crate::registry::nickname::NicknameTree;
use indexmap::IndexMap;

const HEADER_CLASSES: &[(&str, TypeHint)] = &[
    ("Accept-Ranges", TypeHint::Value),
    ("Age", TypeHint::Value),
    ("Allow", TypeHint::CommaList),
    ("Cache-Control", TypeHint::Value),
    ("Connection", TypeHint::CommaList),
    ("Content-Disposition", TypeHint::SemicolonList),
    ("Content-Encoding", TypeHint::CommaList),
    ("Content-Language", TypeHint::CommaList),
    ("Content-Length", TypeHint::Value),
    ("Content-Location", TypeHint::Value),
    ("Content-Range", TypeHint::Value),
    ("Content-Security-Policy", TypeHint::Policies),
    ("Content-Security-Policy-Report-Only", TypeHint::Policies),
    ("Content-Type", TypeHint::SemicolonList),
    ("X-Content-Type-Options", TypeHint::Value),
    ("Date", TypeHint::Date),
    ("ETag", TypeHint::Value),
    ("Expect-CT", TypeHint::CommaList),
    ("Expires", TypeHint::Date),
    ("Feature-Policy", TypeHint::Policies),
    ("Last-Modified", TypeHint::Date),
    ("Public-Key-Pins", TypeHint::Value),
    ("Referrer-Policy", TypeHint::Value),
    ("Set-Cookie", TypeHint::SemicolonList),
    ("Strict-Transport-Security", TypeHint::SemicolonList),
    ("Tk", TypeHint::Value),
    ("Trailer", TypeHint::Value),
    ("Transfer-Encoding", TypeHint::Value),
    ("Vary", TypeHint::CommaList),
    ("Via", TypeHint::CommaList),
    ("Warning", TypeHint::Value),
    ("WWW-Authenticate", TypeHint::CommaList),
    ("X-DNS-Prefetch-Control", TypeHint::Value),
    ("X-Download-Options", TypeHint::Value),
    ("X-Frame-Options", TypeHint::Value),
    ("X-Permitted-Cross-Domain-Policies", TypeHint::Value),
    ("X-Powered-By", TypeHint::Value),
    ("X-XSS-Protection", TypeHint::SemicolonList),
    ("Access-Control-Allow-Credentials", TypeHint::Value),
    ("Access-Control-Allow-Headers", TypeHint::CommaList),
    ("Access-Control-Allow-Methods", TypeHint::CommaList),
    ("Access-Control-Allow-Origin", TypeHint::Value),
    ("Access-Control-Expose-Headers", TypeHint::CommaList),
    ("Access-Control-Max-Age", TypeHint::Value),
];

const NICKNAMES: &[(&str, &str)] = &[
    ("contentSecurityPolicy", "Content-Security-Policy"),
    ("crossdomain", "X-Permitted-Cross-Domain-Policies"),
    ("date", "Date"),
    ("expires", "Expires"),
    ("dnsPrefetchControl", "X-DNS-Prefetch-Control"),
    ("expectCt", "Expect-CT"),
    ("featurePolicy", "Feature-Policy"),
    ("frameguard", "X-Frame-Options"),
    ("hidePoweredBy", "X-Powered-By"),
    ("hpkp", "Public-Key-Pins"),
    ("hsts", "Strict-Transport-Security"),
    ("ienoopen", "X-Download-Options"),
    ("nocache", "Cache-Control"),
    ("noSniff", "X-Content-Type-Options"),
    ("referrerPolicy", "Referrer-Policy"),
    ("xssFilter", "X-XSS-Protection"),
];

const ACCESS_CONTROL_NICKNAMES: &[(&str, &str)] = &[
    ("allowCredentials", "Access-Control-Allow-Credentials"),
    ("allowHeaders", "Access-Control-Allow-Headers"),
    ("allowMethods", "Access-Control-Allow-Methods"),
    ("allowOrigin", "Access-Control-Allow-Origin"),
    ("exposeHeaders", "Access-Control-Expose-Headers"),
    ("maxAge", "Access-Control-Max-Age"),
    ("requestHeaders", "Access-Control-Request-Headers"),
    ("requestMethod", "Access-Control-Request-Method"),
];

/// Built-in tables the registry merges user configuration over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    /// Variant hint per canonical header name.
    pub header_classes: IndexMap<String, TypeHint>,
    /// Safe value per canonical header name, in write order.
    pub safe: IndexMap<String, HeaderData>,
    /// Shorthand access paths.
    pub nicknames: NicknameTree,
}

impl Defaults {
    /// The stock tables for well-known response headers.
    pub fn builtin() -> Self {
        let header_classes = HEADER_CLASSES
            .iter()
            .map(|(name, hint)| (name.to_string(), *hint))
            .collect();

        let mut safe = IndexMap::new();
        safe.insert(
            "Content-Security-Policy".to_string(),
            HeaderData::directives([("default-src", ["'self'"])]),
        );
        safe.insert("X-Permitted-Cross-Domain-Policies".to_string(), "'none'".into());
        safe.insert("X-DNS-Prefetch-Control".to_string(), "off".into());
        safe.insert("X-Frame-Options".to_string(), "SAMEORIGIN".into());
        safe.insert(
            "Strict-Transport-Security".to_string(),
            vec!["max-age=5184000", "includeSubDomains"].into(),
        );
        safe.insert("X-Download-Options".to_string(), "noopen".into());
        safe.insert("X-Content-Type-Options".to_string(), "nosniff".into());
        safe.insert("X-XSS-Protection".to_string(), vec!["1", "mode=block"].into());

        let mut nicknames = NicknameTree::new();
        for (nickname, canonical) in NICKNAMES {
            nicknames.insert_leaf(*nickname, *canonical);
        }
        let mut access_control = NicknameTree::new();
        for (nickname, canonical) in ACCESS_CONTROL_NICKNAMES {
            access_control.insert_leaf(*nickname, *canonical);
        }
        nicknames.insert_group("accessControl", access_control);

        Self {
            header_classes,
            safe,
            nicknames,
        }
    }

    /// No built-in knowledge at all.
    pub fn empty() -> Self {
        Self::default()
    }
}
