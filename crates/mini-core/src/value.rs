//! MINI value model and its textual codec.
//!
//! A value token is classified by looking only at its first and last
//! characters, in this order:
//!
//! | token shape      | variant | example                  |
//! |------------------|---------|--------------------------|
//! | starts with `"`  | String  | `"hello\n"`              |
//! | ends with `e`    | Bool    | `true`, `false`          |
//! | ends with `f`    | Float   | `0.5f`, `1e-3f`          |
//! | ends with `]`    | Array   | `[1, 2, 3]`              |
//! | anything else    | Int     | `1_000`, `0ffh`, `101b`  |
//!
//! Integers remember the radix they were written in ([`IntStyle`]) so that
//! writing a parsed file reproduces the same literal style.

use crate::error::{ErrorKind, Result};
use std::fmt;
use std::num::IntErrorKind;

/// Deepest array nesting accepted by [`Value::parse`]; `[[1]]` has depth 2.
pub const MAX_ARRAY_DEPTH: usize = 64;

/// Trim spaces, tabs and carriage returns from both ends of `s`.
///
/// Stripping `\r` makes CRLF input behave exactly like LF input.
pub(crate) fn trim_blank(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// The literal base an integer was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntStyle {
    /// Plain digits: `255`
    #[default]
    Decimal,
    /// Hex digits with an `h` suffix: `0ffh`
    Hex,
    /// Binary digits with a `b` suffix: `11111111b`
    Binary,
}

/// Variant tag of a [`Value`], used for array homogeneity and typed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    String,
    Int,
    Float,
    Bool,
    Array,
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueTag::String => "string",
            ValueTag::Int => "int",
            ValueTag::Float => "float",
            ValueTag::Bool => "bool",
            ValueTag::Array => "array",
        };
        f.write_str(name)
    }
}

/// A typed MINI value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int { value: i64, style: IntStyle },
    Float(f64),
    Bool(bool),
    /// Elements all share one [`ValueTag`] when produced by [`Value::parse`]
    /// or [`Value::array`].
    Array(Vec<Value>),
}

/// A value as stored in a section, with the comment lines written above it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: Value,
    /// Raw comment lines including the leading `#`.
    pub comments: Vec<String>,
}

impl Entry {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            comments: Vec::new(),
        }
    }

    pub fn with_comments(value: Value, comments: Vec<String>) -> Self {
        Self { value, comments }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Entry::new(value)
    }
}

impl Value {
    /// Decimal integer.
    pub fn int(value: i64) -> Self {
        Value::Int {
            value,
            style: IntStyle::Decimal,
        }
    }

    /// Integer written back in hexadecimal.
    pub fn hex(value: i64) -> Self {
        Value::Int {
            value,
            style: IntStyle::Hex,
        }
    }

    /// Integer written back in binary.
    pub fn binary(value: i64) -> Self {
        Value::Int {
            value,
            style: IntStyle::Binary,
        }
    }

    /// Build an array, rejecting elements whose variant differs from the first.
    pub fn array(items: Vec<Value>) -> Result<Self> {
        check_homogeneous(&items)?;
        Ok(Value::Array(items))
    }

    pub fn tag(&self) -> ValueTag {
        match self {
            Value::String(_) => ValueTag::String,
            Value::Int { .. } => ValueTag::Int,
            Value::Float(_) => ValueTag::Float,
            Value::Bool(_) => ValueTag::Bool,
            Value::Array(_) => ValueTag::Array,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn int_style(&self) -> Option<IntStyle> {
        match self {
            Value::Int { style, .. } => Some(*style),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Parse a raw value token (the text to the right of `=`).
    ///
    /// Surrounding spaces and tabs are ignored. The first failing rule decides
    /// the error; nothing is partially returned. Arrays nested deeper than
    /// [`MAX_ARRAY_DEPTH`] fail with `ArrayNestingTooDeep`.
    pub fn parse(token: &str) -> Result<Self> {
        parse_token(token, 0)
    }

    /// Serialize to the literal form accepted by [`Value::parse`].
    ///
    /// Fails for values that have no literal form: non-finite floats, arrays
    /// mixing variants and arrays nested past [`MAX_ARRAY_DEPTH`].
    pub fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        self.write_text(&mut out, 0)?;
        Ok(out)
    }

    fn write_text(&self, out: &mut String, depth: usize) -> Result<()> {
        match self {
            Value::String(s) => escape_into(s, out),
            Value::Int { value, style } => match style {
                IntStyle::Decimal => out.push_str(&value.to_string()),
                // Signed LowerHex/Binary print the 64-bit two's complement pattern.
                IntStyle::Hex => out.push_str(&format!("{:x}h", value)),
                IntStyle::Binary => out.push_str(&format!("{:b}b", value)),
            },
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(ErrorKind::FloatValueInvalid.into());
                }
                // Debug keeps a `.0` on whole numbers and is the shortest exact form.
                out.push_str(&format!("{:?}f", f));
            }
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Array(items) => {
                if depth >= MAX_ARRAY_DEPTH {
                    return Err(ErrorKind::ArrayNestingTooDeep.into());
                }
                check_homogeneous(items)?;
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_text(out, depth + 1)?;
                }
                out.push(']');
            }
        }
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Payload types that can be borrowed out of a [`Value`] by typed lookups
/// such as [`Section::get`](crate::Section::get).
pub trait FromValue {
    /// The variant this payload lives in.
    const TAG: ValueTag;

    /// Borrow the payload, or `None` if `value` is another variant.
    fn from_value(value: &Value) -> Option<&Self>;
}

impl FromValue for String {
    const TAG: ValueTag = ValueTag::String;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const TAG: ValueTag = ValueTag::Int;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Int { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const TAG: ValueTag = ValueTag::Float;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const TAG: ValueTag = ValueTag::Bool;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FromValue for Vec<Value> {
    const TAG: ValueTag = ValueTag::Array;

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Parse a token that sits `depth` arrays deep.
fn parse_token(token: &str, depth: usize) -> Result<Value> {
    let token = trim_blank(token);
    let (first, last) = match (token.chars().next(), token.chars().last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ErrorKind::ValueEmpty.into()),
    };

    if first == '"' {
        if last != '"' || token.len() < 2 {
            return Err(ErrorKind::MissingQuote.into());
        }
        return unescape(&token[1..token.len() - 1]).map(Value::String);
    }

    match last {
        'e' => parse_bool(token),
        'f' => parse_float(token),
        ']' => parse_array(token, depth + 1),
        _ => parse_int(token),
    }
}

fn check_homogeneous(items: &[Value]) -> Result<()> {
    if let Some(first) = items.first() {
        let tag = first.tag();
        if items.iter().any(|item| item.tag() != tag) {
            return Err(ErrorKind::ArrayDataTypeInconsistency.into());
        }
    }
    Ok(())
}

/// Unescape the body of a quoted string (quotes already stripped).
fn unescape(body: &str) -> Result<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    tracing::debug!(escape = %other, "unknown escape sequence");
                    return Err(ErrorKind::UnknownEscapeSequence.into());
                }
                None => return Err(ErrorKind::BadEscapeSequence.into()),
            },
            '"' => return Err(ErrorKind::UnescapedStringValue.into()),
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Quote and escape a string value.
fn escape_into(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn parse_bool(token: &str) -> Result<Value> {
    match token {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(ErrorKind::BooleanValueInvalid.into()),
    }
}

/// `token` ends with the `f` suffix. Only plain decimal/exponent notation is
/// accepted, so words like `inf` or `nan` are rejected.
fn parse_float(token: &str) -> Result<Value> {
    let number = &token[..token.len() - 1];
    let well_formed = number.bytes().any(|b| b.is_ascii_digit())
        && number
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'.' | b'+' | b'-' | b'e' | b'E'));
    if !well_formed {
        return Err(ErrorKind::FloatValueInvalid.into());
    }
    number
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| ErrorKind::FloatValueInvalid.into())
}

fn parse_int(token: &str) -> Result<Value> {
    let cleaned: String = token.chars().filter(|&c| c != '_').collect();
    let (digits, style) = match cleaned.as_bytes().last() {
        None => return Err(ErrorKind::IntegerValueInvalid.into()),
        Some(b'h') => (&cleaned[..cleaned.len() - 1], IntStyle::Hex),
        Some(b'b') => (&cleaned[..cleaned.len() - 1], IntStyle::Binary),
        Some(_) => (cleaned.as_str(), IntStyle::Decimal),
    };
    let value = match style {
        IntStyle::Decimal => parse_decimal(digits)?,
        IntStyle::Hex => parse_radix(digits, 16)?,
        IntStyle::Binary => parse_radix(digits, 2)?,
    };
    Ok(Value::Int { value, style })
}

fn parse_decimal(digits: &str) -> Result<i64> {
    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErrorKind::IntegerValueInvalid.into());
    }
    digits.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ErrorKind::IntegerValueOutOfRange.into()
        }
        _ => ErrorKind::IntegerValueInvalid.into(),
    })
}

/// Hex and binary accept an optional sign. Unsigned literals may use all 64
/// bits and are taken as a two's complement bit pattern, which is exactly what
/// the writer emits for negative numbers.
fn parse_radix(digits: &str, radix: u32) -> Result<i64> {
    let (negative, unsigned) = match digits.as_bytes().first() {
        Some(b'-') => (true, &digits[1..]),
        Some(b'+') => (false, &digits[1..]),
        _ => (false, digits),
    };
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_digit(radix)) {
        return Err(ErrorKind::IntegerValueInvalid.into());
    }
    // Digits are validated, so the only remaining failure is overflow.
    let magnitude = u64::from_str_radix(unsigned, radix)
        .map_err(|_| ErrorKind::IntegerValueOutOfRange)?;
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(ErrorKind::IntegerValueOutOfRange.into());
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        Ok(magnitude as i64)
    }
}

/// Parse an array token: `[` elements separated by top-level commas `]`.
/// `depth` is the nesting level of this array, 1 for the outermost.
fn parse_array(token: &str, depth: usize) -> Result<Value> {
    if !token.starts_with('[') || !token.ends_with(']') {
        return Err(ErrorKind::ArrayNotEnclosed.into());
    }

    let mut items = Vec::new();
    let mut tag = None;
    for element in split_array(token, depth)? {
        if element.is_empty() {
            return Err(ErrorKind::ValueEmpty.into());
        }
        let item = parse_token(&element, depth)?;
        match tag {
            None => tag = Some(item.tag()),
            Some(t) if t != item.tag() => {
                tracing::debug!(expected = %t, found = %item.tag(), "array element type mismatch");
                return Err(ErrorKind::ArrayDataTypeInconsistency.into());
            }
            Some(_) => {}
        }
        items.push(item);
    }
    Ok(Value::Array(items))
}

/// Split the outer array into raw element tokens.
///
/// Commas split only at depth 1 and outside strings. Nested arrays are kept
/// whole (brackets included) for the recursive parse. Whitespace outside
/// strings is dropped. Brackets reaching past [`MAX_ARRAY_DEPTH`] (counting
/// the `base` levels above this array) are rejected before any recursion.
fn split_array(token: &str, base: usize) -> Result<Vec<String>> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut closed = false;
    let mut chars = token.chars();

    while let Some(c) = chars.next() {
        if in_string {
            current.push(c);
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(ErrorKind::BadEscapeSequence.into()),
                },
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        if closed {
            // The outer `]` came before the end of the token.
            return Err(ErrorKind::ArrayBracketsInbalanced.into());
        }
        match c {
            '"' => {
                in_string = true;
                current.push(c);
            }
            '[' => {
                depth += 1;
                if base + depth - 1 > MAX_ARRAY_DEPTH {
                    tracing::debug!(limit = MAX_ARRAY_DEPTH, "array nested too deep");
                    return Err(ErrorKind::ArrayNestingTooDeep.into());
                }
                if depth > 1 {
                    current.push(c);
                }
            }
            ']' => {
                if depth == 0 {
                    return Err(ErrorKind::ArrayBracketsInbalanced.into());
                }
                depth -= 1;
                if depth >= 1 {
                    current.push(c);
                } else {
                    closed = true;
                }
            }
            ',' if depth == 1 => elements.push(std::mem::take(&mut current)),
            ' ' | '\t' => {}
            _ => current.push(c),
        }
    }

    if depth != 0 {
        return Err(ErrorKind::ArrayBracketsInbalanced.into());
    }
    if !current.is_empty() {
        elements.push(current);
    }
    Ok(elements)
}
