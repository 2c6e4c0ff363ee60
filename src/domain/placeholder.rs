// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placeholder resolution.
//!
//! A placeholder is `${name}` where `name` matches `[A-Za-z0-9._-]+`. Text such
//! as `${unterminated` or `${has space}` is not a placeholder and passes through
//! untouched.
//!
//! Resolution runs in passes. Each pass scans the current string for
//! placeholders and replaces every literal occurrence of each `${name}` whose
//! name the lookup knows. Passes repeat until the string stops changing (a
//! fixed point). Because the whole string is rescanned, nested placeholders
//! such as `${${inner}}` resolve naturally: once `${inner}` becomes `X` the next
//! pass sees `${X}`.
//!
//! A pass budget bounds the work. Running out of passes, revisiting an earlier
//! intermediate string, or growing past [`MAX_RESOLVED_LEN`] while a known
//! placeholder is still left all mean the input takes part in a circular (or
//! runaway) reference. In that case the original input is returned unchanged,
//! so callers can recognize "this is exactly what I gave you".
//!
//! Large values on their own are fine: a string past the length limit whose
//! remaining placeholders are all unknown is one pass away from its fixed point.

use crate::ports::Lookup;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Default number of substitution passes before a reference is considered circular.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Longest intermediate string that may still hold resolvable placeholders (1MB).
pub const MAX_RESOLVED_LEN: usize = 1024 * 1024;

/// Intermediate strings up to this length are remembered for cycle detection.
const HISTORY_ENTRY_LEN: usize = 16 * 1024;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{[A-Za-z0-9._-]+\}").expect("placeholder pattern is valid"));

/// Outcome of resolving one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A fixed point was reached. Unresolvable placeholders are kept verbatim.
    Resolved(String),
    /// Resolution gave up on a probable circular reference. Holds the
    /// original input.
    Circular(String),
}

impl Resolution {
    /// Returns true when resolution gave up.
    pub fn is_circular(&self) -> bool {
        matches!(self, Resolution::Circular(_))
    }

    /// Returns the resulting text.
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Resolved(s) | Resolution::Circular(s) => s,
        }
    }

    /// Converts into the resulting text.
    pub fn into_string(self) -> String {
        match self {
            Resolution::Resolved(s) | Resolution::Circular(s) => s,
        }
    }
}

/// Iterative `${name}` substitution with a pass budget.
///
/// The resolver holds no state besides its configuration; it can be shared
/// freely and used from several threads at once, each with its own lookup.
///
/// # Examples
///
/// ```rust
/// use envaware::domain::PlaceholderResolver;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("key.33".to_string(), "app.class.path".to_string());
/// vars.insert("app.class.path".to_string(), "/x/y".to_string());
///
/// let resolver = PlaceholderResolver::new();
/// assert_eq!(resolver.resolve("${${key.33}}", &vars), "/x/y");
/// assert_eq!(resolver.resolve("${missing}/bin", &vars), "${missing}/bin");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderResolver {
    max_depth: usize,
}

impl PlaceholderResolver {
    /// Creates a resolver with [`DEFAULT_MAX_DEPTH`].
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates a resolver allowing at most `max_depth` changing passes.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns the pass budget.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolves every placeholder in `raw`.
    ///
    /// Never fails: unknown names stay as literal `${name}` text and circular
    /// references yield `raw` itself.
    pub fn resolve<L: Lookup + ?Sized>(&self, raw: &str, lookup: &L) -> String {
        self.resolve_detailed(raw, lookup).into_string()
    }

    /// Like [`resolve`](Self::resolve), but an absent input stays absent.
    pub fn resolve_opt<L: Lookup + ?Sized>(&self, raw: Option<&str>, lookup: &L) -> Option<String> {
        raw.map(|raw| self.resolve(raw, lookup))
    }

    /// Resolves `raw` and reports whether resolution gave up.
    pub fn resolve_detailed<L: Lookup + ?Sized>(&self, raw: &str, lookup: &L) -> Resolution {
        if !PLACEHOLDER.is_match(raw) {
            return Resolution::Resolved(raw.to_string());
        }

        // Earlier intermediate strings; longer ones are bounded by the pass budget
        let mut history: HashSet<String> = HashSet::new();
        let mut current = raw.to_string();

        for _ in 0..self.max_depth {
            let next = substitute_once(&current, lookup);
            if next == current {
                return Resolution::Resolved(next);
            }
            if next.len() > MAX_RESOLVED_LEN && has_known_placeholder(&next, lookup) {
                return Resolution::Circular(raw.to_string());
            }
            if history.contains(&next) {
                return Resolution::Circular(raw.to_string());
            }

            if current.len() <= HISTORY_ENTRY_LEN {
                history.insert(current);
            }
            current = next;
        }

        Resolution::Circular(raw.to_string())
    }
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `raw` against `lookup` with an explicit pass budget.
///
/// Shorthand for `PlaceholderResolver::with_max_depth(max_depth).resolve(raw, lookup)`.
pub fn resolve<L: Lookup + ?Sized>(raw: &str, lookup: &L, max_depth: usize) -> String {
    PlaceholderResolver::with_max_depth(max_depth).resolve(raw, lookup)
}

/// Runs a single substitution pass over `input`.
///
/// Every well-formed placeholder found in `input` is looked up once; when the
/// lookup knows the name, all literal occurrences of that placeholder in the
/// working string are replaced.
pub fn substitute_once<L: Lookup + ?Sized>(input: &str, lookup: &L) -> String {
    let mut result = input.to_string();
    let mut visited = HashSet::new();

    for token in PLACEHOLDER.find_iter(input).map(|m| m.as_str()) {
        if !visited.insert(token) {
            continue;
        }
        let name = &token[2..token.len() - 1];
        if let Some(value) = lookup.lookup(name) {
            result = result.replace(token, &value);
        }
    }

    result
}

/// Returns the names of all well-formed placeholders in `input`, in order of
/// appearance (duplicates included).
pub fn placeholder_names(input: &str) -> Vec<&str> {
    PLACEHOLDER
        .find_iter(input)
        .map(|m| {
            let token = m.as_str();
            &token[2..token.len() - 1]
        })
        .collect()
}

fn has_known_placeholder<L: Lookup + ?Sized>(input: &str, lookup: &L) -> bool {
    placeholder_names(input)
        .into_iter()
        .any(|name| lookup.lookup(name).is_some())
}
