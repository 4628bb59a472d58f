//! Repair of a handicap encoding defect found in some archived records.
//!
//! Affected records declare `HA[n]` but write the handicap stones as a run of
//! bare coordinates, often interleaved with move markers of the wrong color,
//! e.g. `HA[2]...AB[dd];B[pp];W[dp];B[pd])`. The repair keeps everything up to
//! the first `AB[..]`, then rewrites the rest as one placement statement
//! holding the first `n` coordinates followed by alternating moves starting
//! with White:
//!
//! ```text
//! HA[2]...AB[dd][pp];W[dp];B[pd])
//! ```
//!
//! Only values of `AB`, `B`, and `W` count as coordinates, and only along the
//! main line: sibling variations are ignored, and dropped when a record has
//! to be rewritten. Other root properties written after the stones (`HA`,
//! `KM`, ...) are carried over. Records without a handicap, or whose handicap
//! section is already written that way, come back unchanged.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

static HANDICAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HA\[\s*([0-9]+)\s*\]").expect("valid handicap regex"));

static PLACEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AB\[[a-z]{2}\]").expect("valid placement regex"));

/// A property identifier followed by its run of bracketed values.
static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)([A-Za-z]+)\s*((?:\[(?:[^\]\\]|\\.)*\]\s*)+)").expect("valid property regex")
});

static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[(?:[^\]\\]|\\.)*\]").expect("valid value regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Placement,
    Black,
    White,
}

/// A coordinate (`[xy]`) or pass (`[]`) value, with the statement marker in
/// front of it when it is the first value of its property.
#[derive(Debug)]
struct Token<'a> {
    marker: Option<Marker>,
    value: &'a str,
}

/// Tokens of the tail plus the other properties of the node holding `AB`.
#[derive(Debug, Default)]
struct Tail<'a> {
    tokens: Vec<Token<'a>>,
    root_properties: Vec<&'a str>,
}

fn is_coordinate(value: &str) -> bool {
    let inner = &value[1..value.len() - 1];
    inner.is_empty() || (inner.len() == 2 && inner.bytes().all(|b| b.is_ascii_lowercase()))
}

/// The tail with every variation except the first removed, and the
/// parentheses of the kept ones dropped. Stops at the end of the game tree.
fn main_line(tail: &str) -> String {
    let mut out = String::with_capacity(tail.len());
    // one entry per open tree: whether one of its variations has closed
    let mut levels = vec![false];
    let mut skip_from: Option<usize> = None;
    let mut in_value = false;
    let mut escaped = false;
    for ch in tail.chars() {
        let keep = skip_from.is_none();
        if in_value {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == ']' {
                in_value = false;
            }
            if keep {
                out.push(ch);
            }
            continue;
        }
        match ch {
            '(' => {
                if keep && levels.last() == Some(&true) {
                    skip_from = Some(levels.len());
                }
                levels.push(false);
            }
            ')' => {
                levels.pop();
                if skip_from == Some(levels.len()) {
                    skip_from = None;
                }
                match levels.last_mut() {
                    Some(closed) => *closed = true,
                    None => break,
                }
            }
            _ => {
                if ch == '[' {
                    in_value = true;
                }
                if keep {
                    out.push(ch);
                }
            }
        }
    }
    out
}

fn scan_tail(line: &str) -> Tail<'_> {
    let mut tail = Tail::default();
    let mut in_root = true;
    let mut last_end = 0;
    for caps in PROPERTY_RE.captures_iter(line) {
        let (Some(whole), Some(ident), Some(values)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if line[last_end..whole.start()].contains(';') {
            in_root = false;
        }
        last_end = whole.end();

        let marker = match ident.as_str() {
            "AB" => Marker::Placement,
            "B" => Marker::Black,
            "W" => Marker::White,
            _ => {
                if in_root {
                    tail.root_properties.push(whole.as_str().trim_end());
                }
                continue;
            }
        };
        let coordinates = VALUE_RE
            .find_iter(values.as_str())
            .map(|m| m.as_str())
            .filter(|v| is_coordinate(v));
        for (i, value) in coordinates.enumerate() {
            tail.tokens.push(Token {
                marker: (i == 0).then_some(marker),
                value,
            });
        }
    }
    tail
}

/// Marker expected in front of token `i` of a correctly encoded tail.
fn expected_marker(i: usize, handicap: usize) -> Option<Marker> {
    if i == 0 {
        Some(Marker::Placement)
    } else if i < handicap {
        None
    } else if (i - handicap) % 2 == 0 {
        Some(Marker::White)
    } else {
        Some(Marker::Black)
    }
}

/// Read the declared handicap, if any. `HA[0]` counts as no handicap.
pub fn declared_handicap(text: &str) -> Result<Option<usize>> {
    let Some(caps) = HANDICAP_RE.captures(text) else {
        return Ok(None);
    };
    let m = &caps[1];
    let handicap: usize = m.parse().map_err(|_| {
        Error::parse(
            caps.get(1).map_or(0, |g| g.start()),
            format!("handicap {m} out of range"),
        )
    })?;
    Ok((handicap > 0).then_some(handicap))
}

/// Return `text` with its handicap encoding corrected.
///
/// # Errors
/// - [`Error::MalformedMove`] if the record contains a `[ZZ]` move
/// - [`Error::MissingHandicapStones`] if a handicap is declared but no
///   `AB[xy]` placement follows
pub fn repair_record(text: &str) -> Result<String> {
    if text.contains("[ZZ]") {
        return Err(Error::MalformedMove);
    }
    let Some(handicap) = declared_handicap(text)? else {
        return Ok(text.to_string());
    };
    let Some(placement) = PLACEMENT_RE.find(text) else {
        return Err(Error::MissingHandicapStones { handicap });
    };

    let (preamble, rest) = text.split_at(placement.start());
    let line = main_line(rest);
    let Tail {
        tokens,
        root_properties,
    } = scan_tail(&line);

    let well_formed = tokens
        .iter()
        .enumerate()
        .all(|(i, t)| t.marker == expected_marker(i, handicap));
    if well_formed {
        return Ok(text.to_string());
    }

    let split = handicap.min(tokens.len());
    let mut repaired = String::with_capacity(text.len());
    repaired.push_str(preamble);
    repaired.push_str("AB");
    for token in &tokens[..split] {
        repaired.push_str(token.value);
    }
    for property in &root_properties {
        repaired.push_str(property);
    }
    for (token, marker) in tokens[split..].iter().zip([";W", ";B"].iter().cycle()) {
        repaired.push_str(marker);
        repaired.push_str(token.value);
    }
    repaired.push(')');

    debug!(
        "repaired handicap encoding: {split} placements, {} moves",
        tokens.len() - split
    );
    Ok(repaired)
}

/// Read a record from disk and repair its handicap encoding.
pub fn read_record(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    repair_record(&text)
}
