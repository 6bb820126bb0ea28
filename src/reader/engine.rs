use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use tracing::debug;

use super::{Clock, FormCompletion, SymbolInfo, SymbolType, SystemClock, Viewport};
use crate::analysis::{
    check_balance, context_at, expand_to_form_boundaries, matching_paren, FormContext, IndentEngine,
    IndentInfo, ParenBalance,
};
use crate::scanning::{clamp, is_special_form, scan, TextRange, TokenSpan};

/// How long a cached viewport analysis may be reused. This bounds staleness;
/// hosts that mutate text invalidate explicitly.
pub const CACHE_TIMEOUT: Duration = Duration::from_secs(1);

/// Cache entries are keyed by the expanded range together with a hash of
/// the text it covers, so an edit that leaves the boundaries where they were
/// still misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    range: TextRange,
    fingerprint: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    range: TextRange,
    tokens: Vec<TokenSpan>,
    context: FormContext,
    timestamp: Instant,
}

fn fingerprint(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Callers sharing one engine across threads must serialize access to it
/// (a `Mutex` around the engine is sufficient); nothing here blocks.
#[derive(Debug)]
pub struct ReaderEngine<C = SystemClock> {
    cache: HashMap<CacheKey, CacheEntry>,
    clock: C,
    indenter: IndentEngine,
}

impl ReaderEngine<SystemClock> {
    pub fn new() -> ReaderEngine<SystemClock> {
        ReaderEngine::with_clock(SystemClock)
    }
}

impl Default for ReaderEngine<SystemClock> {
    fn default() -> Self {
        ReaderEngine::new()
    }
}

impl<C: Clock> ReaderEngine<C> {
    pub fn with_clock(clock: C) -> ReaderEngine<C> {
        ReaderEngine {
            cache: HashMap::new(),
            clock,
            indenter: IndentEngine::new(),
        }
    }

    /// Replace the indentation rules used by `calculate_indent()`.
    pub fn with_indenter(mut self, indenter: IndentEngine) -> ReaderEngine<C> {
        self.indenter = indenter;
        self
    }

    /// Fetch the live cache entry for `expanded`, computing and storing a
    /// fresh one if there is none. Expired entries are reaped on every miss.
    fn lookup(&mut self, text: &str, expanded: TextRange) -> &CacheEntry {
        let now = self
            .clock
            .now();
        let key = CacheKey {
            range: expanded,
            fingerprint: fingerprint(&text[expanded.start..expanded.end]),
        };

        let live = self
            .cache
            .get(&key)
            .is_some_and(|entry| now.duration_since(entry.timestamp) < CACHE_TIMEOUT);

        if live {
            debug!(?expanded, "viewport cache hit");
        } else {
            debug!(?expanded, "viewport cache miss");
            let context = context_at(expanded.start, text);
            let tokens = scan(text, expanded);

            self.cache
                .insert(
                    key,
                    CacheEntry {
                        range: expanded,
                        tokens,
                        context,
                        timestamp: now,
                    },
                );

            let before = self
                .cache
                .len();
            self.cache
                .retain(|_, entry| now.duration_since(entry.timestamp) < CACHE_TIMEOUT);
            let evicted = before
                - self
                    .cache
                    .len();
            if evicted > 0 {
                debug!(evicted, "expired viewport entries");
            }
        }

        &self.cache[&key]
    }

    /// Analyze the complete form(s) around `requested`. The returned tokens
    /// cover the whole expanded range, not just the request.
    pub fn analyze_viewport(&mut self, text: &str, requested: TextRange) -> Viewport {
        let expanded = expand_to_form_boundaries(requested, text);
        let entry = self.lookup(text, expanded);

        Viewport {
            range: entry.range,
            context: entry
                .context
                .clone(),
            tokens: entry
                .tokens
                .clone(),
        }
    }

    /// Tokens intersecting `requested`, scanned with the context of the
    /// complete form(s) around it.
    pub fn tokenize_viewport(&mut self, text: &str, requested: TextRange) -> Vec<TokenSpan> {
        let expanded = expand_to_form_boundaries(requested, text);
        let entry = self.lookup(text, expanded);

        entry
            .tokens
            .iter()
            .filter(|token| {
                token
                    .range()
                    .intersects(&requested)
            })
            .copied()
            .collect()
    }

    /// Decide whether `text` is ready for evaluation. Balanced input only
    /// counts as complete when it starts with a list, `'(`, or `` `( ``; a
    /// bare atom is reported as incomplete.
    pub fn is_form_complete(&self, text: &str) -> FormCompletion {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return FormCompletion::Incomplete {
                expecting: "form".to_string(),
            };
        }

        match check_balance(text.len(), text) {
            ParenBalance::Balanced => {
                if trimmed.starts_with('(') || trimmed.starts_with("'(") || trimmed.starts_with("`(")
                {
                    FormCompletion::Complete
                } else {
                    FormCompletion::Incomplete {
                        expecting: "complete form".to_string(),
                    }
                }
            }
            ParenBalance::ExtraOpen(n) => FormCompletion::Incomplete {
                expecting: format!("{} closing {}", n, parentheses(n)),
            },
            ParenBalance::ExtraClose(n) => FormCompletion::Invalid {
                error: format!("{} extra closing {}", n, parentheses(n)),
            },
        }
    }

    pub fn paren_balance(&self, upto: usize, text: &str) -> ParenBalance {
        check_balance(upto, text)
    }

    /// Indentation for zero-origin line `line`.
    pub fn calculate_indent(&self, line: usize, text: &str) -> IndentInfo {
        self.indenter
            .indent_line(line, text)
    }

    pub fn find_matching_paren(&self, position: usize, text: &str) -> Option<usize> {
        matching_paren(position, text)
    }

    /// The symbol under (or immediately before) `position`.
    pub fn symbol_at(&self, position: usize, text: &str) -> Option<SymbolInfo> {
        if position >= text.len() {
            return None;
        }
        let position = clamp(text, position);

        let start = text[..position]
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_symbol_char(*c))
            .last()
            .map_or(position, |(i, _)| i);

        let end = text[position..]
            .char_indices()
            .find(|(_, c)| !is_symbol_char(*c))
            .map_or(text.len(), |(i, _)| position + i);

        if start == end {
            return None;
        }

        let name = &text[start..end];
        let symbol_type = if name.starts_with(':') {
            SymbolType::Keyword
        } else if is_special_form(name) {
            SymbolType::SpecialForm
        } else {
            SymbolType::Unknown
        };

        Some(SymbolInfo {
            name: name.to_string(),
            range: TextRange::new(start, end),
            symbol_type,
            context: context_at(position, text),
        })
    }

    /// The innermost form around `position`, or `None` for empty text.
    pub fn form_boundaries_at(&self, position: usize, text: &str) -> Option<TextRange> {
        if position > text.len() {
            return None;
        }
        let range = expand_to_form_boundaries(TextRange::empty(position), text);
        if range.is_empty() {
            None
        } else {
            Some(range)
        }
    }

    /// Drop every cached analysis extending past `offset`; an edit there has
    /// moved or changed them.
    pub fn invalidate_from(&mut self, offset: usize) {
        self.cache
            .retain(|key, _| key.range.end <= offset);
    }

    pub fn clear_cache(&mut self) {
        self.cache
            .clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache
            .len()
    }
}

fn parentheses(n: usize) -> &'static str {
    if n == 1 {
        "parenthesis"
    } else {
        "parentheses"
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || "-+*/<>=!?_:".contains(c)
}
