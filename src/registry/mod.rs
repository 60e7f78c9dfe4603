//! Header registry.
//!
//! # Data Flow
//! ```text
//! Seed (header map or "safe") + RegistryConfig + Defaults
//!     → Options (merged tables, user entries win)
//!     → add(): nickname → canonical name → create or add
//!     → caller mutates via get() / nicknames()
//!     → apply_to(sink): write in first-creation order
//!     → [reset_after_apply] rebuild from the captured seed
//! ```
//!
//! # Design Decisions
//! - One live header per canonical name; its variant is fixed at creation
//! - Write order is first-creation order
//! - The seed is deep-copied when reset-after-apply is enabled, so later
//!   mutation of the caller's data never leaks into a reset
//! - Not shared across threads; wrap in a mutex to share (see `middleware`)

pub mod nickname;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{Defaults, RegistryConfig};
use crate::error::Result;
use crate::header::{Applied, Delimiters, Header, HeaderData, TypeHint};
use crate::observability::metrics;
use crate::sink::ResponseSink;

pub use nickname::{NicknameEntry, NicknameScope, NicknameTree};

/// The sentinel seed value meaning "apply the safe profile".
pub const SAFE_SENTINEL: &str = "safe";

/// Initial data for a registry, or data for a bulk `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// Apply every configured safe value.
    Safe,
    /// Header name or nickname to raw value.
    Headers(IndexMap<String, HeaderData>),
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Headers(IndexMap::new())
    }
}

impl Seed {
    /// Build a header seed from `(name, value)` pairs.
    pub fn headers<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<HeaderData>,
    {
        Seed::Headers(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<IndexMap<String, HeaderData>> for Seed {
    fn from(headers: IndexMap<String, HeaderData>) -> Self {
        Seed::Headers(headers)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeed {
    Sentinel(String),
    Headers(IndexMap<String, HeaderData>),
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawSeed::deserialize(deserializer)? {
            RawSeed::Sentinel(s) if s == SAFE_SENTINEL => Ok(Seed::Safe),
            RawSeed::Sentinel(s) => Err(serde::de::Error::custom(format!(
                "expected \"{SAFE_SENTINEL}\" or a table of headers, found \"{s}\""
            ))),
            RawSeed::Headers(headers) => Ok(Seed::Headers(headers)),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Seed::Safe => serializer.serialize_str(SAFE_SENTINEL),
            Seed::Headers(headers) => headers.serialize(serializer),
        }
    }
}

/// Top-level nickname, then dotted nickname path, then the name itself.
fn canonical_name<'a>(nicknames: &'a NicknameTree, name: &'a str) -> &'a str {
    nicknames
        .canonical(name)
        .or_else(|| nicknames.resolve_path(name))
        .unwrap_or(name)
}

/// Built-in tables with the user configuration merged over them.
#[derive(Debug, Clone)]
struct Options {
    header_classes: IndexMap<String, Option<TypeHint>>,
    safe: IndexMap<String, HeaderData>,
    nicknames: NicknameTree,
    delimiters: IndexMap<String, Delimiters>,
}

impl Options {
    fn merge(config: &RegistryConfig, defaults: &Defaults) -> Self {
        let mut header_classes: IndexMap<String, Option<TypeHint>> = defaults
            .header_classes
            .iter()
            .map(|(name, hint)| (name.clone(), Some(*hint)))
            .collect();
        for (name, token) in &config.header_classes {
            // a configured entry wins even when the token is not recognized
            header_classes.insert(name.clone(), TypeHint::parse(token));
        }

        let nicknames = defaults.nicknames.merged(&config.nicknames);
        let mut safe = IndexMap::new();
        for (name, value) in defaults.safe.iter().chain(&config.safe) {
            let canonical = canonical_name(&nicknames, name).to_string();
            safe.insert(canonical, value.clone());
        }

        Self {
            header_classes,
            safe,
            nicknames,
            delimiters: config.delimiters.clone(),
        }
    }

    fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        canonical_name(&self.nicknames, name)
    }

    fn hint(&self, canonical: &str) -> Option<TypeHint> {
        self.header_classes.get(canonical).copied().flatten()
    }

    fn create(&self, canonical: &str, data: HeaderData) -> Result<Header> {
        Header::create(
            canonical,
            self.hint(canonical),
            data,
            self.delimiters.get(canonical),
            self.safe.get(canonical).cloned(),
        )
    }

    fn blank(&self, canonical: &str) -> Header {
        Header::empty(
            canonical,
            self.hint(canonical),
            self.delimiters.get(canonical),
            self.safe.get(canonical).cloned(),
        )
    }
}

/// Owns the live headers for one request/response cycle.
#[derive(Debug, Clone)]
pub struct HeaderRegistry {
    headers: IndexMap<String, Header>,
    options: Options,
    accessors: Option<NicknameTree>,
    reset_seed: Option<Seed>,
}

impl HeaderRegistry {
    /// Build a registry over the built-in tables.
    pub fn new(seed: impl Into<Seed>, config: RegistryConfig) -> Result<Self> {
        Self::with_defaults(seed, config, &Defaults::builtin())
    }

    /// Build a registry over explicit built-in tables.
    pub fn with_defaults(
        seed: impl Into<Seed>,
        config: RegistryConfig,
        defaults: &Defaults,
    ) -> Result<Self> {
        let seed = seed.into();
        let options = Options::merge(&config, defaults);
        let accessors = config.setup_nicknames.then(|| options.nicknames.clone());
        let reset_seed = config.reset_after_apply.then(|| seed.clone());

        let mut registry = Self {
            headers: IndexMap::new(),
            options,
            accessors,
            reset_seed,
        };
        registry.add(seed)?;
        Ok(registry)
    }

    /// Canonical name for a header name, nickname or dotted nickname path.
    pub fn resolve_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.options.canonical(name)
    }

    /// Add to existing headers, creating them as needed.
    ///
    /// `Seed::Safe` applies the safe profile instead. A type conflict
    /// stops at the offending header; headers added before it stay.
    pub fn add(&mut self, seed: impl Into<Seed>) -> Result<&mut Self> {
        let headers = match seed.into() {
            Seed::Safe => return Ok(self.apply_safe_profile()),
            Seed::Headers(headers) => headers,
        };

        for (name, data) in headers {
            let canonical = self.resolve_name(&name).to_string();
            match self.headers.get_mut(&canonical) {
                Some(header) => {
                    header.add(data);
                }
                None => {
                    let header = self.create_logged(&canonical, data)?;
                    self.headers.insert(canonical, header);
                }
            }
        }
        Ok(self)
    }

    /// Get a header, creating an empty one if needed.
    pub fn get(&mut self, name: &str) -> &mut Header {
        let canonical = self.resolve_name(name).to_string();
        self.get_canonical(&canonical)
    }

    /// Get a header, creating it from `data` if needed.
    ///
    /// `data` is ignored when the header already exists.
    pub fn get_with(&mut self, name: &str, data: impl Into<HeaderData>) -> Result<&mut Header> {
        let canonical = self.resolve_name(name).to_string();
        if !self.headers.contains_key(&canonical) {
            let header = self.create_logged(&canonical, data.into())?;
            self.headers.insert(canonical.clone(), header);
        }
        Ok(self.get_canonical(&canonical))
    }

    pub(crate) fn get_canonical(&mut self, canonical: &str) -> &mut Header {
        let options = &self.options;
        self.headers
            .entry(canonical.to_string())
            .or_insert_with(|| {
                let header = options.blank(canonical);
                tracing::debug!(header = canonical, kind = %header.kind(), "Header created");
                header
            })
    }

    fn create_logged(&self, canonical: &str, data: HeaderData) -> Result<Header> {
        match self.options.create(canonical, data) {
            Ok(header) => {
                tracing::debug!(header = canonical, kind = %header.kind(), "Header created");
                Ok(header)
            }
            Err(e) => {
                tracing::warn!(header = canonical, error = %e, "Rejected header creation");
                metrics::record_type_conflict();
                Err(e)
            }
        }
    }

    /// Look up a live header without creating it.
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.get(self.resolve_name(name))
    }

    /// Set every header that has a safe value to it, creating as needed.
    pub fn apply_safe_profile(&mut self) -> &mut Self {
        let names: Vec<String> = self
            .options
            .safe
            .keys()
            .map(|name| self.resolve_name(name).to_string())
            .collect();
        for name in names {
            self.get_canonical(&name).apply_safe();
        }
        self
    }

    /// Nickname accessors, if they were set up.
    pub fn nicknames(&mut self) -> Option<NicknameScope<'_>> {
        self.accessors.as_ref()?;
        Some(NicknameScope::new(self))
    }

    /// Header behind a dotted nickname path, e.g. `accessControl.allowOrigin`.
    pub fn nickname(&mut self, path: &str) -> Option<&mut Header> {
        let canonical = self.accessors.as_ref()?.resolve_path(path)?.to_string();
        Some(self.get_canonical(&canonical))
    }

    pub(crate) fn accessors(&self) -> Option<&NicknameTree> {
        self.accessors.as_ref()
    }

    /// Write every live header to the sink in creation order.
    ///
    /// Removed headers are deleted from the sink; empty ones are skipped.
    /// With reset-after-apply the registry is then rebuilt from its seed.
    pub fn apply_to<S: ResponseSink + ?Sized>(&mut self, sink: &mut S) -> &mut Self {
        let mut set = 0;
        let mut removed = 0;
        for header in self.headers.values() {
            match header.apply_to(&mut *sink) {
                Applied::Set => set += 1,
                Applied::Removed => removed += 1,
                Applied::Skipped => {}
            }
        }
        tracing::debug!(set, removed, "Headers applied");
        metrics::record_apply(set, removed);

        if let Some(seed) = self.reset_seed.clone() {
            self.reset(seed);
        }
        self
    }

    fn reset(&mut self, seed: Seed) {
        self.headers.clear();
        // the seed was accepted with these same options at construction
        if let Err(e) = self.add(seed) {
            tracing::error!(error = %e, "Failed to rebuild headers from seed");
        }
        tracing::debug!(headers = self.headers.len(), "Registry reset");
    }

    /// Apply to a fresh in-memory sink and return what was written.
    pub fn render(&mut self) -> IndexMap<String, String> {
        let mut sink: IndexMap<String, String> = IndexMap::new();
        self.apply_to(&mut sink);
        sink
    }

    pub fn resets_after_apply(&self) -> bool {
        self.reset_seed.is_some()
    }

    /// Live headers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.headers.values()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeaderError;
    use crate::header::HeaderKind;

    fn registry(seed: impl Into<Seed>) -> HeaderRegistry {
        HeaderRegistry::new(seed, RegistryConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_registry_writes_nothing() {
        let mut reg = registry(Seed::default());
        assert!(reg.is_empty());
        assert!(reg.render().is_empty());
    }

    #[test]
    fn test_add_resolves_nicknames() {
        let mut reg = registry(Seed::headers([("frameguard", "DENY")]));
        assert_eq!(reg.header("X-Frame-Options").unwrap().serialize(), "DENY");

        reg.add(Seed::headers([("X-Frame-Options", "-ish")])).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.render()["X-Frame-Options"], "DENY-ish");
    }

    #[test]
    fn test_get_creates_once() {
        let mut reg = registry(Seed::default());
        reg.get("hsts").add("max-age=60");
        reg.get("Strict-Transport-Security").add("preload");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("hsts").kind(), HeaderKind::DelimitedList);
        assert_eq!(reg.render()["Strict-Transport-Security"], "max-age=60; preload");
    }

    #[test]
    fn test_get_with_rejects_conflicts() {
        let mut reg = registry(Seed::default());
        let err = reg.get_with("Date", vec!["a"]).unwrap_err();
        assert_eq!(
            err,
            HeaderError::TypeConflict {
                header: "Date".into(),
                hint: HeaderKind::Timestamp,
                data: HeaderKind::DelimitedList,
            }
        );
        assert!(reg.header("Date").is_none());
    }

    #[test]
    fn test_get_with_ignores_data_for_existing() {
        let mut reg = registry(Seed::headers([("X-Custom", "one")]));
        let header = reg.get_with("X-Custom", vec!["two"]).unwrap();
        assert_eq!(header.kind(), HeaderKind::Scalar);
        assert_eq!(header.serialize(), "one");
    }

    #[test]
    fn test_bulk_conflict_keeps_earlier_headers() {
        let mut reg = registry(Seed::default());
        let err = reg.add(Seed::headers([
            ("X-First", HeaderData::from("ok")),
            ("Content-Security-Policy", HeaderData::from("foobar")),
        ]));
        assert!(err.is_err());
        assert!(reg.header("X-First").is_some());
        assert!(reg.header("Content-Security-Policy").is_none());
    }

    #[test]
    fn test_user_hint_overrides_builtin() {
        let mut config = RegistryConfig::default();
        config.header_classes.insert("X-Frame-Options".into(), "List,".into());
        config.header_classes.insert("Date".into(), "nonsense".into());
        let mut reg = HeaderRegistry::new(Seed::default(), config).unwrap();

        assert_eq!(reg.get("X-Frame-Options").kind(), HeaderKind::DelimitedList);
        // unrecognized user token means no hint at all
        assert_eq!(reg.get("Date").kind(), HeaderKind::Scalar);
    }

    #[test]
    fn test_user_safe_value_wins() {
        let mut config = RegistryConfig::default();
        config.safe.insert("X-Frame-Options".into(), "DENY".into());
        config.safe.insert("X-Custom-Safe".into(), "on".into());
        let mut reg = HeaderRegistry::new(Seed::Safe, config).unwrap();

        let written = reg.render();
        assert_eq!(written["X-Frame-Options"], "DENY");
        assert_eq!(written.keys().last().unwrap(), "X-Custom-Safe");
    }

    #[test]
    fn test_safe_value_keyed_by_nickname() {
        let mut config = RegistryConfig::default();
        config.safe.insert("frameguard".into(), "DENY".into());
        config.safe.insert("accessControl.allowOrigin".into(), "*".into());
        let mut reg = HeaderRegistry::new(Seed::Safe, config).unwrap();

        let written = reg.render();
        assert_eq!(written["X-Frame-Options"], "DENY");
        assert_eq!(written["Access-Control-Allow-Origin"], "*");
        assert!(!written.contains_key("frameguard"));
        assert!(!written.contains_key("accessControl.allowOrigin"));

        // the override keeps the built-in position in write order
        let position = written.get_index_of("X-Frame-Options").unwrap();
        assert_eq!(position, 3);
    }

    #[test]
    fn test_safe_profile_resolves_nickname_keyed_defaults() {
        let mut defaults = Defaults::empty();
        defaults.nicknames.insert_leaf("robots", "X-Robots-Tag");
        defaults.safe.insert("robots".into(), "noindex".into());
        let mut reg =
            HeaderRegistry::with_defaults(Seed::Safe, RegistryConfig::default(), &defaults).unwrap();

        let written = reg.render();
        assert_eq!(written.len(), 1);
        assert_eq!(written["X-Robots-Tag"], "noindex");
    }

    #[test]
    fn test_safe_profile_without_configured_value_is_noop() {
        let mut reg = registry(Seed::headers([("X-Custom", "keep")]));
        reg.apply_safe_profile();
        assert_eq!(reg.header("X-Custom").unwrap().serialize(), "keep");
    }

    #[test]
    fn test_nicknames_disabled() {
        let config = RegistryConfig {
            setup_nicknames: false,
            ..Default::default()
        };
        let mut reg = HeaderRegistry::new(Seed::default(), config).unwrap();
        assert!(reg.nicknames().is_none());
        assert!(reg.nickname("xssFilter").is_none());
        // plain name resolution still knows the nicknames
        assert_eq!(reg.resolve_name("xssFilter"), "X-XSS-Protection");
    }

    #[test]
    fn test_accessors_create_lazily() {
        let mut reg = registry(Seed::default());
        let names = reg.nicknames().unwrap().names();
        assert!(names.contains(&"accessControl".to_string()));
        assert!(reg.is_empty());

        reg.nickname("accessControl.maxAge").unwrap().set("600");
        assert_eq!(reg.render()["Access-Control-Max-Age"], "600");
    }

    #[test]
    fn test_scope_rejects_wrong_shape() {
        let mut reg = registry(Seed::default());
        assert!(reg.nicknames().unwrap().header("accessControl").is_none());
        assert!(reg.nicknames().unwrap().group("hsts").is_none());
        assert!(reg.nicknames().unwrap().header("unknown").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_reset_rebuilds_from_seed() {
        let config = RegistryConfig {
            reset_after_apply: true,
            ..Default::default()
        };
        let mut reg = HeaderRegistry::new(Seed::headers([("X-Seeded", "pristine")]), config).unwrap();
        assert!(reg.resets_after_apply());

        reg.get("X-Seeded").set("mutated");
        reg.add(Seed::headers([("X-Late", "late")])).unwrap();
        let first = reg.render();
        assert_eq!(first["X-Seeded"], "mutated");
        assert_eq!(first["X-Late"], "late");

        let second = reg.render();
        assert_eq!(second.len(), 1);
        assert_eq!(second["X-Seeded"], "pristine");
    }

    #[test]
    fn test_mutations_persist_without_reset() {
        let mut reg = registry(Seed::headers([("X-Seeded", "pristine")]));
        reg.get("X-Seeded").set("mutated");
        reg.render();
        assert_eq!(reg.render()["X-Seeded"], "mutated");
    }

    #[test]
    fn test_seed_deserialize() {
        #[derive(Deserialize)]
        struct Doc {
            seed: Seed,
        }

        let doc: Doc = toml::from_str(r#"seed = "safe""#).unwrap();
        assert_eq!(doc.seed, Seed::Safe);

        let doc: Doc = toml::from_str("[seed]\nX-Frame-Options = \"DENY\"").unwrap();
        assert_eq!(doc.seed, Seed::headers([("X-Frame-Options", "DENY")]));

        assert!(toml::from_str::<Doc>(r#"seed = "unsafe""#).is_err());
    }
}
