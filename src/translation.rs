use std::borrow::Cow;

/// Placeholder style used by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?1`.
    Sqlite,
}

impl PlaceholderStyle {
    pub(crate) fn marker(self) -> u8 {
        match self {
            PlaceholderStyle::Postgres => b'$',
            PlaceholderStyle::Sqlite => b'?',
        }
    }

    pub(crate) fn opposite(self) -> Self {
        match self {
            PlaceholderStyle::Postgres => PlaceholderStyle::Sqlite,
            PlaceholderStyle::Sqlite => PlaceholderStyle::Postgres,
        }
    }
}

/// How to resolve placeholder translation for a call relative to the pool
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Follow the pool's default setting.
    #[default]
    PoolDefault,
    /// Force translation on, regardless of pool default.
    ForceOn,
    /// Force translation off, regardless of pool default.
    ForceOff,
}

impl TranslationMode {
    #[must_use]
    pub fn resolve(self, pool_default: bool) -> bool {
        match self {
            TranslationMode::PoolDefault => pool_default,
            TranslationMode::ForceOn => true,
            TranslationMode::ForceOff => false,
        }
    }
}

/// A numbered placeholder found outside literals and comments.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlaceholderSite {
    /// Byte offset of the marker character.
    pub start: usize,
    /// Byte offset one past the last digit.
    pub end: usize,
    /// The 1-based parameter index the digits encode.
    pub index: usize,
}

enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

fn scan_digits(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return None;
    }
    // The digit run is bounded, so this cannot fail to parse
    let index: usize = std::str::from_utf8(&bytes[start..end]).ok()?.parse().ok()?;
    Some((end, index))
}

fn is_tag_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_tag_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Detect a dollar-quote opener (`$$` or `$tag$`) at `idx`. Returns the tag
/// and the offset one past the opening delimiter. `$1` is a placeholder, not
/// a tag, because tags cannot start with a digit.
fn try_start_dollar_quote(bytes: &[u8], idx: usize) -> Option<(String, usize)> {
    let mut j = idx + 1;
    if j < bytes.len() && is_tag_start(bytes[j]) {
        j += 1;
        while j < bytes.len() && is_tag_byte(bytes[j]) {
            j += 1;
        }
    }
    if j < bytes.len() && bytes[j] == b'$' {
        let tag = std::str::from_utf8(&bytes[idx + 1..j]).ok()?.to_string();
        Some((tag, j + 1))
    } else {
        None
    }
}

fn closes_dollar_quote(bytes: &[u8], idx: usize, tag: &str) -> bool {
    let closer_len = tag.len() + 2;
    bytes.len() >= idx + closer_len
        && bytes[idx + 1..idx + 1 + tag.len()] == *tag.as_bytes()
        && bytes[idx + 1 + tag.len()] == b'$'
}

/// Find every `style`-marked numbered placeholder in `sql`, skipping string
/// literals, quoted identifiers, comments, and dollar-quoted blocks.
pub(crate) fn scan_placeholders(sql: &str, style: PlaceholderStyle) -> Vec<PlaceholderSite> {
    let bytes = sql.as_bytes();
    let marker = style.marker();
    let mut sites = Vec::new();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => {
                if b == b'\'' {
                    state = State::SingleQuoted;
                } else if b == b'"' {
                    state = State::DoubleQuoted;
                } else if b == b'-' && bytes.get(idx + 1) == Some(&b'-') {
                    state = State::LineComment;
                    idx += 1;
                } else if b == b'/' && bytes.get(idx + 1) == Some(&b'*') {
                    state = State::BlockComment(1);
                    idx += 1;
                } else if b == b'$' {
                    if let Some((tag, after)) = try_start_dollar_quote(bytes, idx) {
                        state = State::DollarQuoted(tag);
                        idx = after;
                        continue;
                    }
                    if marker == b'$'
                        && let Some((end, index)) = scan_digits(bytes, idx + 1)
                    {
                        sites.push(PlaceholderSite {
                            start: idx,
                            end,
                            index,
                        });
                        idx = end;
                        continue;
                    }
                } else if b == b'?'
                    && marker == b'?'
                    && let Some((end, index)) = scan_digits(bytes, idx + 1)
                {
                    sites.push(PlaceholderSite {
                        start: idx,
                        end,
                        index,
                    });
                    idx = end;
                    continue;
                }
            }
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if b == b'/' && bytes.get(idx + 1) == Some(&b'*') {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && closes_dollar_quote(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    state = State::Normal;
                }
            }
        }
        idx += 1;
    }

    sites
}

/// Translate numbered placeholders to `target` style (`$N` ↔ `?N`).
///
/// Placeholders inside string literals, quoted identifiers, comments, and
/// dollar-quoted blocks are left untouched. Returns a borrowed `Cow` when no
/// change is needed.
#[must_use]
pub fn translate_placeholders(sql: &str, target: PlaceholderStyle, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(sql);
    }

    let sites = scan_placeholders(sql, target.opposite());
    if sites.is_empty() {
        return Cow::Borrowed(sql);
    }

    let mut out = String::with_capacity(sql.len());
    let mut last = 0;
    for site in sites {
        out.push_str(&sql[last..site.start]);
        out.push(target.marker() as char);
        out.push_str(&sql[site.start + 1..site.end]);
        last = site.end;
    }
    out.push_str(&sql[last..]);
    Cow::Owned(out)
}
