//! Query-string configuration.
//!
//! Parses strings like `?ratio=16:9&min=160x90&gap=8&capacity=25` into a
//! [`GridConfig`], starting from [`GridConfig::default`]. Problems never abort
//! the parse; they surface as [`ParseWarning`]s and the offending key keeps
//! its default.
//!
//! # Keys
//!
//! | key | value |
//! |---|---|
//! | `ratio`, `aspect` | `16:9`, `16/9`, or a decimal |
//! | `min` | `WxH` minimum tile size |
//! | `minw`, `min_width` / `minh`, `min_height` | one axis of the minimum |
//! | `gap` | non-negative number |
//! | `capacity`, `page_size` | positive integer |
//! | `rows`, `max_rows` | positive integer, or `auto` for no cap |
//! | `policy` | `besteffort` or `strict` |
//! | `overflow` | `paginate` or `truncate` |
//! | `tile`, `preferred_width` | auto-fit preferred tile width |
//! | `autofit` | boolean |
//!
//! # Example
//!
//! ```
//! use zengrid::{MinSizePolicy, query};
//!
//! let result = query::parse("ratio=4:3&min=120x90&capacity=25&policy=strict");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.config.page_capacity, 25);
//! assert_eq!(result.config.constraints.policy, MinSizePolicy::Strict);
//! assert!((result.config.constraints.aspect_ratio - 4.0 / 3.0).abs() < 1e-12);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::autofit::AutoFit;
use crate::constraint::MinSizePolicy;
use crate::plan::{GridConfig, Overflow};

/// Result of parsing a configuration query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub config: GridConfig,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be used.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a configuration query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let mut state = State {
        config: GridConfig::default(),
        seen: Vec::new(),
        warnings: Vec::new(),
        auto_fit_width: None,
        auto_fit_enabled: None,
    };

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);
        state.dispatch(&key, &value);
    }

    state.finish()
}

struct State {
    config: GridConfig,
    seen: Vec<&'static str>,
    warnings: Vec<ParseWarning>,
    auto_fit_width: Option<f64>,
    auto_fit_enabled: Option<bool>,
}

impl State {
    fn dispatch(&mut self, key: &str, value: &str) {
        let Some(canonical) = canonical_key(key) else {
            self.warnings.push(ParseWarning::KeyNotRecognized {
                key: String::from(key),
                value: String::from(value),
            });
            return;
        };

        let applied = match canonical {
            "ratio" => parse_ratio(value)
                .map(|r| self.config.constraints.aspect_ratio = r)
                .ok_or("expected W:H, W/H, or a positive number"),
            "min" => parse_size(value)
                .map(|(w, h)| {
                    self.config.constraints.min_width = w;
                    self.config.constraints.min_height = h;
                })
                .ok_or("expected WxH with non-negative numbers"),
            "minw" => parse_non_negative(value)
                .map(|w| self.config.constraints.min_width = w)
                .ok_or("expected a non-negative number"),
            "minh" => parse_non_negative(value)
                .map(|h| self.config.constraints.min_height = h)
                .ok_or("expected a non-negative number"),
            "gap" => parse_non_negative(value)
                .map(|g| self.config.constraints.gap = g)
                .ok_or("expected a non-negative number"),
            "capacity" => parse_positive_int(value)
                .map(|c| self.config.page_capacity = c)
                .ok_or("expected a positive integer"),
            "rows" => parse_rows(value)
                .map(|r| self.config.max_rows = r)
                .ok_or("expected a positive integer or auto"),
            "policy" => parse_policy(value)
                .map(|p| self.config.constraints.policy = p)
                .ok_or("expected besteffort|strict"),
            "overflow" => parse_overflow(value)
                .map(|o| self.config.overflow = o)
                .ok_or("expected paginate|truncate"),
            "tile" => parse_positive(value)
                .map(|w| self.auto_fit_width = Some(w))
                .ok_or("expected a positive number"),
            "autofit" => parse_bool(value)
                .map(|b| self.auto_fit_enabled = Some(b))
                .ok_or("expected true|false"),
            _ => Ok(()),
        };

        match applied {
            Ok(()) => {
                if self.seen.contains(&canonical) {
                    self.warnings.push(ParseWarning::DuplicateKey {
                        key: String::from(canonical),
                        value: String::from(value),
                    });
                } else {
                    self.seen.push(canonical);
                }
            }
            Err(reason) => self.warnings.push(ParseWarning::ValueInvalid {
                key: canonical,
                value: String::from(value),
                reason,
            }),
        }
    }

    /// Auto-fit follows the final gap, so it is assembled last.
    fn finish(mut self) -> ParseResult {
        let gap = self.config.constraints.gap;
        let width = self
            .auto_fit_width
            .or(self.config.auto_fit.map(|f| f.preferred_tile_width))
            .unwrap_or(320.0);
        self.config.auto_fit = match self.auto_fit_enabled {
            Some(false) => None,
            _ => Some(AutoFit::new(width, gap)),
        };
        ParseResult {
            config: self.config,
            warnings: self.warnings,
        }
    }
}

/// Map aliases to one static name used in warnings and duplicate tracking.
fn canonical_key(key: &str) -> Option<&'static str> {
    Some(match key {
        "ratio" | "aspect" => "ratio",
        "min" => "min",
        "minw" | "min_width" => "minw",
        "minh" | "min_height" => "minh",
        "gap" => "gap",
        "capacity" | "page_size" => "capacity",
        "rows" | "max_rows" => "rows",
        "policy" => "policy",
        "overflow" => "overflow",
        "tile" | "preferred_width" => "tile",
        "autofit" => "autofit",
        _ => return None,
    })
}

// ---- Value parsers ----

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_non_negative(s: &str) -> Option<f64> {
    parse_f64(s).filter(|&v| v >= 0.0)
}

fn parse_positive(s: &str) -> Option<f64> {
    parse_f64(s).filter(|&v| v > 0.0)
}

fn parse_positive_int(s: &str) -> Option<usize> {
    s.trim().parse::<usize>().ok().filter(|&v| v > 0)
}

/// `16:9`, `16/9`, or `1.7778`.
fn parse_ratio(s: &str) -> Option<f64> {
    let s = s.trim();
    match s.find([':', '/']) {
        Some(pos) => {
            let w = parse_positive(&s[..pos])?;
            let h = parse_positive(&s[pos + 1..])?;
            Some(w / h).filter(|r| r.is_finite())
        }
        None => parse_positive(s),
    }
}

/// `160x90` (also `X` or `*`).
fn parse_size(s: &str) -> Option<(f64, f64)> {
    let s = s.trim();
    let pos = s.find(['x', 'X', '*'])?;
    Some((parse_non_negative(&s[..pos])?, parse_non_negative(&s[pos + 1..])?))
}

/// `Some(None)` means no cap.
fn parse_rows(s: &str) -> Option<Option<usize>> {
    if s.trim().eq_ignore_ascii_case("auto") {
        return Some(None);
    }
    parse_positive_int(s).map(Some)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_policy(s: &str) -> Option<MinSizePolicy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "besteffort" | "best-effort" | "best_effort" => Some(MinSizePolicy::BestEffort),
        "strict" => Some(MinSizePolicy::Strict),
        _ => None,
    }
}

fn parse_overflow(s: &str) -> Option<Overflow> {
    match s.trim().to_ascii_lowercase().as_str() {
        "paginate" | "pages" => Some(Overflow::Paginate),
        "truncate" | "hide" => Some(Overflow::Truncate),
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&', dropping a leading '?'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let raw = s.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < raw.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(raw[i + 1]), hex_digit(raw[i + 2])) {
                    bytes.push(hi << 4 | lo);
                    i += 3;
                } else {
                    bytes.push(b'%');
                    i += 1;
                }
            }
            b => {
                bytes.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
