//! Label expression tokens and scanning
//!
//! Fixed tokens are `${name}`-style markers. The parametrized property token
//! is `${property:KEY}`, where `KEY` is one or more characters other than `}`.

/// Object name
pub const NAME: &str = "${name}";
/// Documentation text
pub const DOCUMENTATION: &str = "${documentation}";
/// Text content
pub const CONTENT: &str = "${content}";
/// All properties as `key: value` lines
pub const PROPERTIES: &str = "${properties}";
/// All property values, one per line
pub const PROPERTIES_VALUES: &str = "${propertiesvalues}";
/// Documentation of a note's connected neighbor
pub const LINKED_DOCUMENTATION: &str = "${linkeddoc}";

/// Opening of a parametrized property token
const PROPERTY_PREFIX: &str = "${property:";

/// The literal escape sequence for a newline in an expression
pub const NEWLINE_ESCAPE: &str = "\\n";

/// A recognized token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `${name}`
    Name,
    /// `${documentation}`
    Documentation,
    /// `${content}`
    Content,
    /// `${properties}`
    Properties,
    /// `${propertiesvalues}`
    PropertiesValues,
    /// `${linkeddoc}`
    LinkedDocumentation,
    /// `${property:KEY}`
    PropertyValue(String),
}

impl Token {
    /// Recognize a complete `${...}` token
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            NAME => Some(Self::Name),
            DOCUMENTATION => Some(Self::Documentation),
            CONTENT => Some(Self::Content),
            PROPERTIES => Some(Self::Properties),
            PROPERTIES_VALUES => Some(Self::PropertiesValues),
            LINKED_DOCUMENTATION => Some(Self::LinkedDocumentation),
            _ => raw
                .strip_prefix(PROPERTY_PREFIX)
                .and_then(|rest| rest.strip_suffix('}'))
                .filter(|key| !key.is_empty() && !key.contains('}'))
                .map(|key| Self::PropertyValue(key.to_string())),
        }
    }
}

/// Every fixed token with a short description, in documentation order
pub const FIXED_TOKENS: [(&str, &str); 6] = [
    (NAME, "name of the object or its concept"),
    (DOCUMENTATION, "documentation text"),
    (CONTENT, "text content of a note"),
    (PROPERTIES, "all properties as `key: value`, one per line"),
    (PROPERTIES_VALUES, "all property values, one per line"),
    (LINKED_DOCUMENTATION, "documentation of the concept a note is connected to"),
];

/// A `${...}`-shaped span found in an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan<'a> {
    /// Byte offset of the `$`
    pub start: usize,
    /// The raw token text including `${` and `}`
    pub raw: &'a str,
}

/// Find every `${...}` span, left to right, non-overlapping.
///
/// A `${` without a closing `}` is not a span, and a span starts at the last
/// `${` before its `}`. Spans are reported whether or not the token is
/// recognized.
#[must_use]
pub fn scan(expression: &str) -> Vec<TokenSpan<'_>> {
    let mut spans = Vec::new();
    let mut i = 0;

    while let Some(offset) = expression[i..].find("${") {
        let open = i + offset;
        match expression[open + 2..].find('}') {
            Some(close) => {
                let end = open + 2 + close + 1;
                let start = open + expression[open..end - 1].rfind("${").unwrap_or(0);
                spans.push(TokenSpan {
                    start,
                    raw: &expression[start..end],
                });
                i = end;
            }
            None => break,
        }
    }

    spans
}

/// Replace every `${property:KEY}` occurrence with `resolve(KEY)`.
///
/// Occurrences are found left to right and never overlap. Substituted values
/// are copied as-is and not scanned again. An empty key, or a `${property:`
/// without a closing `}`, is left literally in the output.
#[must_use]
pub fn replace_property_values<F>(expression: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut result = String::with_capacity(expression.len());
    let mut i = 0;

    while let Some(offset) = expression[i..].find(PROPERTY_PREFIX) {
        let start = i + offset;
        let key_start = start + PROPERTY_PREFIX.len();
        result.push_str(&expression[i..start]);

        match expression[key_start..].find('}') {
            Some(close) if close > 0 => {
                let key = &expression[key_start..key_start + close];
                result.push_str(&resolve(key));
                i = key_start + close + 1;
            }
            // Empty key: emit the prefix literally and keep scanning after it
            Some(_) => {
                result.push_str(PROPERTY_PREFIX);
                i = key_start;
            }
            None => {
                i = start;
                break;
            }
        }
    }

    result.push_str(&expression[i..]);
    result
}
