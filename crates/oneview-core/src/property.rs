//! # Property Paths: Dotted/Indexed Resolution
//!
//! Resolves expressions such as `A.B.data[0].info` against nested JSON
//! request and response bodies.
//!
//! ## Grammar
//!
//! Segments are separated by `.`. A bracketed run of word characters
//! (`[0]`, `[name]`) starts a new segment without a separating dot, so
//! `data[0]` is the two segments `data` and `0`. Any other `[` is an
//! ordinary character: `data[-1]` is a single segment.
//!
//! The grammar is deliberately loose. Parsing never fails; a malformed
//! expression produces segments that simply do not resolve.
//!
//! ## Resolution
//!
//! Objects are entered by key, arrays by signed integer index. The first
//! segment that cannot be followed ends the walk with `None`. A missing
//! path is a normal outcome, not an error.

use std::fmt;

use serde_json::Value;

/// A parsed property path: an ordered list of key/index segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Tokenize a path expression.
    ///
    /// Produces the same segments as rewriting every `[w]` (w = one or more
    /// word characters) to `.w` and splitting the result on `.`. The empty
    /// expression yields a single empty segment.
    pub fn parse(expr: &str) -> Self {
        let chars: Vec<char> = expr.chars().collect();
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '.' => {
                    segments.push(std::mem::take(&mut current));
                    i += 1;
                }
                '[' => match bracket_index_len(&chars[i + 1..]) {
                    Some(len) => {
                        segments.push(std::mem::take(&mut current));
                        current.extend(&chars[i + 1..i + 1 + len]);
                        // Skip the brackets as well as their content.
                        i += len + 2;
                    }
                    None => {
                        current.push('[');
                        i += 1;
                    }
                },
                c => {
                    current.push(c);
                    i += 1;
                }
            }
        }
        segments.push(current);

        Self { segments }
    }

    /// The segments in walk order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk `root` along this path.
    ///
    /// Returns the value at the end of the path, or `None` as soon as a
    /// segment names a key the current object lacks, an index outside the
    /// current array, or the current value is a scalar.
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let mut current = root;
        for segment in &self.segments {
            let next = match current {
                Value::Object(map) => map.get(segment.as_str()),
                Value::Array(items) => array_element(items, segment),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => {
                    tracing::trace!(path = %self, segment = %segment, "property path not found");
                    return None;
                }
            }
        }
        Some(current)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for PropertyPath {
    fn from(expr: &str) -> Self {
        Self::parse(expr)
    }
}

/// Resolve `expr` against `root`. See [`PropertyPath::resolve`].
///
/// ```
/// use serde_json::json;
/// use oneview_core::get_dict_property;
///
/// let body = json!({"A": {"B": {"data": [{"info": "TEXT"}]}}});
/// assert_eq!(get_dict_property(&body, "A.B.data[0].info"), Some(&json!("TEXT")));
/// assert_eq!(get_dict_property(&body, "A.B.data[0].description"), None);
/// ```
pub fn get_dict_property<'v>(root: &'v Value, expr: &str) -> Option<&'v Value> {
    PropertyPath::parse(expr).resolve(root)
}

/// Bounds check for a signed index into a sequence of length `len`.
///
/// A negative index is first normalized to `abs(index + 1)`, so `-1 → 0`,
/// `-2 → 1`, `-3 → 2`. The index is in range iff the normalized value is
/// strictly less than `len`. Normalization only gates the check; elements
/// are still fetched with the original signed index.
pub fn list_has_index(len: usize, index: i64) -> bool {
    let normalized = if index < 0 {
        (index + 1).unsigned_abs()
    } else {
        index.unsigned_abs()
    };
    normalized < len as u64
}

/// [`list_has_index`] for an index still in text form.
///
/// Text that is not a signed 64-bit integer is never in range.
pub fn list_has_index_str(len: usize, index: &str) -> bool {
    index
        .parse::<i64>()
        .map(|i| list_has_index(len, i))
        .unwrap_or(false)
}

fn array_element<'v>(items: &'v [Value], segment: &str) -> Option<&'v Value> {
    let index: i64 = segment.parse().ok()?;
    if !list_has_index(items.len(), index) {
        return None;
    }
    if index >= 0 {
        items.get(usize::try_from(index).ok()?)
    } else {
        // Counted from the end: -1 is the last element.
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        items.get(items.len().checked_sub(back)?)
    }
}

/// Length of a `\w+]` run at the start of `rest`, excluding the `]`.
fn bracket_index_len(rest: &[char]) -> Option<usize> {
    let len = rest.iter().take_while(|c| is_word_char(**c)).count();
    (len > 0 && rest.get(len) == Some(&']')).then_some(len)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
