//! Named-directive header value (`Content-Security-Policy`, `Feature-Policy`).
//!
//! # Design Decisions
//! - Directive order is first-insertion order; adding tokens to an
//!   existing directive never moves it
//! - A directive whose tokens join to nothing renders as its bare name

use indexmap::IndexMap;

use crate::header::HeaderData;

/// Separator between a directive name and its tokens, and between tokens.
pub const DEFAULT_INTRA: &str = " ";
/// Separator between directives.
pub const DEFAULT_INTER: &str = "; ";

/// Render a directive mapping.
pub fn render(directives: &IndexMap<String, Vec<String>>, intra: &str, inter: &str) -> String {
    directives
        .iter()
        .map(|(name, tokens)| {
            let joined = tokens.join(intra);
            if joined.is_empty() {
                name.clone()
            } else {
                format!("{name}{intra}{joined}")
            }
        })
        .collect::<Vec<_>>()
        .join(inter)
}

/// A header consisting of named directives, each holding a token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSet {
    directives: IndexMap<String, Vec<String>>,
    intra: String,
    inter: String,
}

impl Default for DirectiveSet {
    fn default() -> Self {
        Self::new(HeaderData::Absent, None, None)
    }
}

impl DirectiveSet {
    pub fn new(data: HeaderData, intra: Option<&str>, inter: Option<&str>) -> Self {
        let mut set = Self {
            directives: IndexMap::new(),
            intra: intra.unwrap_or(DEFAULT_INTRA).to_string(),
            inter: inter.unwrap_or(DEFAULT_INTER).to_string(),
        };
        set.add(data);
        set
    }

    /// Append tokens to a directive, creating it at the end if absent.
    pub fn add_directive<I, T>(&mut self, name: &str, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.directives
            .entry(name.to_string())
            .or_default()
            .extend(tokens.into_iter().map(Into::into));
    }

    /// Add a mapping of directives, or bare directive names.
    pub fn add(&mut self, data: HeaderData) {
        match data {
            HeaderData::Absent => {}
            HeaderData::Directives(map) => {
                for (name, tokens) in map {
                    self.add_directive(&name, tokens);
                }
            }
            HeaderData::List(names) => {
                for name in names {
                    self.add_directive(&name, Vec::<String>::new());
                }
            }
            other => self.add_directive(&other.to_text(), Vec::<String>::new()),
        }
    }

    /// Replace all directives.
    pub fn set(&mut self, data: HeaderData) {
        self.directives.clear();
        self.add(data);
    }

    /// Remove a single directive, keeping the order of the rest.
    pub fn clear_directive(&mut self, name: &str) {
        self.directives.shift_remove(name);
    }

    pub fn directive(&self, name: &str) -> Option<&[String]> {
        self.directives.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn serialize(&self) -> String {
        render(&self.directives, &self.intra, &self.inter)
    }
}
