//! Compiled LIKE / MATCH patterns and their shared cache.
//!
//! The cache outlives individual kernel calls, so a pattern used by many
//! batches is compiled once. The lock is held only for lookup and insert;
//! matchers are `Arc`-shared and run outside it.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use regex::Regex;

use crate::error::{EvalError, Result};
use crate::logging::LOG_TARGET;

/// Default number of compiled patterns kept per cache.
pub const DEFAULT_PATTERN_CACHE_CAPACITY: usize = 256;

/// A compiled pattern.
#[derive(Debug)]
pub struct Matcher {
    regex: Regex,
    pattern: String,
    like: bool,
}

impl Matcher {
    /// Compiles `pattern` as SQL LIKE syntax (`is_like`) or as a regular
    /// expression.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::PatternCompile`] for malformed patterns.
    pub fn compile(pattern: &str, is_like: bool) -> Result<Self> {
        let source = if is_like {
            like_to_regex(pattern)
        } else {
            pattern.to_string()
        };
        let regex = Regex::new(&source).map_err(|source| EvalError::PatternCompile {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Matcher {
            regex,
            pattern: pattern.to_string(),
            like: is_like,
        })
    }

    /// Tests `text` against the pattern.
    ///
    /// LIKE patterns must match the whole text; regular expressions match
    /// anywhere.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the pattern text as given.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the pattern was compiled with LIKE syntax.
    #[must_use]
    pub fn is_like(&self) -> bool {
        self.like
    }
}

/// Translates a SQL LIKE pattern into an anchored regular expression.
///
/// `%` matches any run of characters, `_` exactly one, and `\` makes the
/// next character literal.
#[must_use]
pub fn like_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 6);
    out.push_str("(?s)^");
    let mut chars = pattern.chars();
    let mut buf = [0u8; 4];
    while let Some(ch) = chars.next() {
        match ch {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            '\\' => {
                let literal = chars.next().unwrap_or('\\');
                out.push_str(&regex::escape(literal.encode_utf8(&mut buf)));
            }
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PatternKey {
    pattern: String,
    like: bool,
}

/// Bounded LRU cache of compiled patterns.
#[derive(Debug)]
pub struct PatternCache {
    /// `None` when caching is disabled.
    inner: Option<Mutex<LruCache<PatternKey, Arc<Matcher>>>>,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN_CACHE_CAPACITY)
    }
}

impl PatternCache {
    /// Creates a cache holding at most `capacity` patterns.
    ///
    /// A capacity of zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        PatternCache {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Returns a compiled matcher for `pattern`, compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::PatternCompile`] for malformed patterns; failed
    /// compilations are not cached.
    pub fn compile(&self, pattern: &str, is_like: bool) -> Result<Arc<Matcher>> {
        let key = PatternKey {
            pattern: pattern.to_string(),
            like: is_like,
        };
        if let Some(cache) = &self.inner {
            if let Some(matcher) = cache.lock().get(&key) {
                return Ok(Arc::clone(matcher));
            }
        }

        let matcher = Arc::new(Matcher::compile(pattern, is_like)?);
        tracing::trace!(target: LOG_TARGET, pattern, is_like, "compiled pattern");

        if let Some(cache) = &self.inner {
            let mut cache = cache.lock();
            // another thread may have compiled the same pattern meanwhile
            if let Some(existing) = cache.get(&key) {
                return Ok(Arc::clone(existing));
            }
            if let Some((evicted, _)) = cache.push(key, Arc::clone(&matcher)) {
                tracing::trace!(target: LOG_TARGET, pattern = %evicted.pattern, "evicted pattern");
            }
        }
        Ok(matcher)
    }

    /// Returns the number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |cache| cache.lock().len())
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of cached patterns.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |cache| cache.lock().cap().get())
    }

    /// Drops every cached pattern.
    pub fn clear(&self) {
        if let Some(cache) = &self.inner {
            cache.lock().clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_wildcards() {
        let m = Matcher::compile("%cd%", true).unwrap();
        assert!(m.matches("abcdef"));
        assert!(!m.matches("abdcef"));

        let m = Matcher::compile("a_c", true).unwrap();
        assert!(m.matches("abc"));
        assert!(!m.matches("abbc"));
    }

    #[test]
    fn test_like_is_anchored() {
        let m = Matcher::compile("cd", true).unwrap();
        assert!(!m.matches("abcdef"));
        assert!(m.matches("cd"));
    }

    #[test]
    fn test_like_escapes_regex_metacharacters() {
        let m = Matcher::compile("a.b+(c)", true).unwrap();
        assert!(m.matches("a.b+(c)"));
        assert!(!m.matches("axbb(c)"));
    }

    #[test]
    fn test_like_backslash_escape() {
        let m = Matcher::compile("100\\%", true).unwrap();
        assert!(m.matches("100%"));
        assert!(!m.matches("1000"));
    }

    #[test]
    fn test_like_percent_spans_newlines() {
        let m = Matcher::compile("a%b", true).unwrap();
        assert!(m.matches("a\nb"));
    }

    #[test]
    fn test_regex_is_unanchored() {
        let m = Matcher::compile("c[de]", false).unwrap();
        assert!(m.matches("abcdef"));
        assert!(!m.matches("abc"));
    }

    #[test]
    fn test_bad_regex() {
        let err = Matcher::compile("(unclosed", false).unwrap_err();
        assert!(matches!(err, EvalError::PatternCompile { .. }));
    }

    #[test]
    fn test_cache_hit_returns_same_matcher() {
        let cache = PatternCache::new(4);
        let a = cache.compile("x%", true).unwrap();
        let b = cache.compile("x%", true).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_syntax_flag_is_part_of_key() {
        let cache = PatternCache::new(4);
        let like = cache.compile("a.c", true).unwrap();
        let regex = cache.compile("a.c", false).unwrap();
        assert!(!Arc::ptr_eq(&like, &regex));
        assert!(!like.matches("abc"));
        assert!(regex.matches("abc"));
    }

    #[test]
    fn test_lru_eviction() {
        let cache = PatternCache::new(2);
        let a = cache.compile("a", true).unwrap();
        cache.compile("b", true).unwrap();
        // touch "a" so "b" becomes least recently used
        cache.compile("a", true).unwrap();
        cache.compile("c", true).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(Arc::ptr_eq(&a, &cache.compile("a", true).unwrap()));
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = PatternCache::new(0);
        cache.compile("a", true).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn test_alternating_patterns_stay_cached() {
        let cache = PatternCache::new(2);
        let a = cache.compile("a%", true).unwrap();
        let b = cache.compile("b%", true).unwrap();
        for _ in 0..100 {
            assert!(Arc::ptr_eq(&a, &cache.compile("a%", true).unwrap()));
            assert!(Arc::ptr_eq(&b, &cache.compile("b%", true).unwrap()));
        }
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear() {
        let cache = PatternCache::default();
        cache.compile("a", false).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), DEFAULT_PATTERN_CACHE_CAPACITY);
    }
}
