use std::fmt;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TracklistError;

// @module: Structure template compilation

// @const: Placeholder token regex - the five reserved two-character sequences
static PLACEHOLDER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[hmstn]").unwrap()
});

/// One of the five fields a structure template can capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Hours component of a timestamp (`\h`)
    Hour,
    /// Minutes component of a timestamp (`\m`)
    Minute,
    /// Seconds component of a timestamp (`\s`)
    Second,
    /// Track title (`\t`)
    Title,
    /// Track number, captured but unused downstream (`\n`)
    Index,
}

impl PlaceholderKind {
    /// The two-character template token for this kind
    pub fn token(&self) -> &'static str {
        match self {
            Self::Hour => r"\h",
            Self::Minute => r"\m",
            Self::Second => r"\s",
            Self::Title => r"\t",
            Self::Index => r"\n",
        }
    }

    // Token regex only ever matches the five reserved sequences
    fn from_token(token: &str) -> Self {
        match token {
            r"\h" => Self::Hour,
            r"\m" => Self::Minute,
            r"\s" => Self::Second,
            r"\t" => Self::Title,
            _ => Self::Index,
        }
    }

    /// Fixed capture rule for this kind: numeric kinds take 1-3 digits,
    /// the title takes a greedy run bounded by the surrounding literals
    pub fn capture_rule(&self) -> &'static str {
        match self {
            Self::Title => ".*",
            _ => r"\d{1,3}",
        }
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// One segment of a parsed template: literal gap text or a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Verbatim text between placeholders
    Literal(String),
    /// A placeholder occurrence
    Placeholder(PlaceholderKind),
}

/// Raw field values captured from one tracklist entry, one slot per
/// placeholder kind; kinds absent from the template stay `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCaptures {
    /// Captured hours digits
    pub hour: Option<String>,
    /// Captured minutes digits
    pub minute: Option<String>,
    /// Captured seconds digits
    pub second: Option<String>,
    /// Captured raw title
    pub title: Option<String>,
    /// Captured track number
    pub index: Option<String>,
}

impl EntryCaptures {
    /// Look up the captured value for a placeholder kind
    pub fn get(&self, kind: PlaceholderKind) -> Option<&str> {
        match kind {
            PlaceholderKind::Hour => self.hour.as_deref(),
            PlaceholderKind::Minute => self.minute.as_deref(),
            PlaceholderKind::Second => self.second.as_deref(),
            PlaceholderKind::Title => self.title.as_deref(),
            PlaceholderKind::Index => self.index.as_deref(),
        }
    }

    fn set(&mut self, kind: PlaceholderKind, value: String) {
        match kind {
            PlaceholderKind::Hour => self.hour = Some(value),
            PlaceholderKind::Minute => self.minute = Some(value),
            PlaceholderKind::Second => self.second = Some(value),
            PlaceholderKind::Title => self.title = Some(value),
            PlaceholderKind::Index => self.index = Some(value),
        }
    }
}

/// A structure template compiled into an anchored matcher.
///
/// The template alternates literal gap text with placeholder tokens, e.g.
/// `"\n. \m:\s - \t"` for entries like `"1. 2:30 - Some Song"`. Compilation
/// escapes the gaps, substitutes each placeholder with its capture rule and
/// reassembles the fragments in their original order, anchored at the start
/// of the entry. Trailing text after the match is ignored.
#[derive(Debug)]
pub struct CompiledMatcher {
    regex: Regex,
    slots: Vec<PlaceholderKind>,
}

impl CompiledMatcher {
    /// Compile a structure template into a matcher.
    ///
    /// Fails when the template has no placeholders or when two placeholders
    /// touch without a literal gap between them, which would make the
    /// capture boundaries ambiguous.
    pub fn compile(template: &str) -> Result<Self, TracklistError> {
        let segments = parse_template(template)?;

        let mut pattern = String::from("^");
        let mut slots = Vec::new();
        for segment in &segments {
            match segment {
                TemplateSegment::Literal(text) => {
                    pattern.push_str(&regex::escape(text));
                }
                TemplateSegment::Placeholder(kind) => {
                    pattern.push('(');
                    pattern.push_str(kind.capture_rule());
                    pattern.push(')');
                    slots.push(*kind);
                }
            }
        }

        debug!("Compiled template '{}' to pattern '{}'", template, pattern);

        let regex = Regex::new(&pattern).map_err(|source| TracklistError::BadTemplate {
            template: template.to_string(),
            source,
        })?;

        Ok(CompiledMatcher { regex, slots })
    }

    /// Apply the matcher to one tracklist entry.
    ///
    /// Returns `None` when the entry does not match the template from its
    /// first character; the caller decides whether that is a parse error.
    pub fn captures(&self, entry: &str) -> Option<EntryCaptures> {
        let caps = self.regex.captures(entry)?;
        let mut out = EntryCaptures::default();
        for (slot, kind) in self.slots.iter().enumerate() {
            // Group 0 is the whole match; capture groups start at 1
            let value = caps.get(slot + 1)?.as_str().to_string();
            out.set(*kind, value);
        }
        Some(out)
    }

    /// The placeholder kinds in capture order
    pub fn slots(&self) -> &[PlaceholderKind] {
        &self.slots
    }

    /// The assembled match expression, for diagnostics
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Split a template into its alternating literal and placeholder segments
pub fn parse_template(template: &str) -> Result<Vec<TemplateSegment>, TracklistError> {
    let tokens: Vec<(usize, usize, PlaceholderKind)> = PLACEHOLDER_TOKEN
        .find_iter(template)
        .map(|m| (m.start(), m.end(), PlaceholderKind::from_token(m.as_str())))
        .collect();

    if tokens.is_empty() {
        return Err(TracklistError::NoPlaceholders {
            template: template.to_string(),
        });
    }

    // Adjacent placeholders leave no literal to bound the captures; this
    // also catches a title placeholder butting against any other token
    for pair in tokens.windows(2) {
        let (_, prev_end, _) = pair[0];
        let (next_start, _, _) = pair[1];
        if prev_end == next_start {
            return Err(TracklistError::AmbiguousPlaceholders {
                template: template.to_string(),
                first: pair[0].0,
                second: next_start,
            });
        }
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for &(start, end, kind) in &tokens {
        if start > cursor {
            segments.push(TemplateSegment::Literal(template[cursor..start].to_string()));
        }
        segments.push(TemplateSegment::Placeholder(kind));
        cursor = end;
    }
    if cursor < template.len() {
        segments.push(TemplateSegment::Literal(template[cursor..].to_string()));
    }

    Ok(segments)
}
