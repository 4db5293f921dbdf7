//! Literal values and their conversion from source text.
//!
//! Literal text is classified with a small logos lexer and then converted.
//! Numeric literals drop digit-group underscores and the `L`/`f`/`d` type
//! suffixes before conversion.

use std::fmt;

use logos::Logos;

use super::error::ExprError;

/// A constant value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
#[cfg_attr(feature = "dump", serde(rename_all = "lowercase"))]
pub enum Literal {
    String(String),
    Char(char),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Literal {
    /// Convert literal source text, e.g. `0x1F`, `1_000L`, `"a\tb"`.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let text = text.trim();
        let mut lexer = LiteralToken::lexer(text);
        let token = match lexer.next() {
            Some(Ok(token)) if lexer.span() == (0..text.len()) => token,
            _ => return Err(ExprError::malformed(text, "not a literal")),
        };

        match token {
            LiteralToken::True => Ok(Literal::Bool(true)),
            LiteralToken::False => Ok(Literal::Bool(false)),
            LiteralToken::Null => Ok(Literal::Null),
            LiteralToken::HexInt => parse_int(text, &text[2..], 16),
            LiteralToken::BinInt => parse_int(text, &text[2..], 2),
            LiteralToken::DecInt => {
                let digits = text.trim_end_matches(['l', 'L']);
                if digits.len() > 1 && digits.starts_with('0') {
                    parse_int(text, &digits[1..], 8)
                } else {
                    parse_int(text, digits, 10)
                }
            }
            LiteralToken::Float => {
                let digits: String = text
                    .trim_end_matches(['f', 'F', 'd', 'D'])
                    .chars()
                    .filter(|c| *c != '_')
                    .collect();
                digits
                    .parse::<f64>()
                    .map(Literal::Float)
                    .map_err(|_| ExprError::malformed(text, "invalid floating-point literal"))
            }
            LiteralToken::Str => unescape(text, &text[1..text.len() - 1]).map(Literal::String),
            LiteralToken::Char => {
                let value = unescape(text, &text[1..text.len() - 1])?;
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Literal::Char(c)),
                    _ => Err(ExprError::malformed(text, "character literal must hold one character")),
                }
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Int(_) | Literal::Float(_))
    }

    /// The arithmetic negation of a numeric literal.
    pub fn negate(&self) -> Option<Literal> {
        match self {
            // `-9223372036854775808L` arrives as the wrapped magnitude
            Literal::Int(v) => Some(Literal::Int(v.wrapping_neg())),
            Literal::Float(v) => Some(Literal::Float(-v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Char(c) => write!(f, "{c:?}"),
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

// ============================================================================
// LEXER
// ============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralToken {
    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    HexInt,

    #[regex(r"0[bB][01_]+[lL]?")]
    BinInt,

    /// Decimal, or octal with a leading zero.
    #[regex(r"[0-9][0-9_]*[lL]?")]
    DecInt,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,
}

fn parse_int(text: &str, digits: &str, radix: u32) -> Result<Literal, ExprError> {
    let digits: String = digits
        .trim_end_matches(['l', 'L'])
        .chars()
        .filter(|c| *c != '_')
        .collect();
    if digits.is_empty() {
        return Err(ExprError::malformed(text, "missing digits"));
    }
    let value = u64::from_str_radix(&digits, radix)
        .map_err(|_| ExprError::malformed(text, "integer literal out of range"))?;
    // hex, octal and binary literals may use all 64 bits; a decimal one only
    // reaches 2^63 as the operand of a unary minus
    if radix == 10 && value > i64::MAX as u64 + 1 {
        return Err(ExprError::malformed(text, "integer literal out of range"));
    }
    Ok(Literal::Int(value as i64))
}

fn unescape(text: &str, body: &str) -> Result<String, ExprError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('s') => ' ',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('u') => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| ExprError::malformed(text, "invalid unicode escape"))?
            }
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                // at most three digits, and a leading 4-7 allows only two
                let max = if d <= '3' { 2 } else { 1 };
                for _ in 0..max {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value).ok_or_else(|| ExprError::malformed(text, "invalid octal escape"))?
            }
            _ => return Err(ExprError::malformed(text, "invalid escape sequence")),
        };
        out.push(escaped);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", Literal::Int(42))]
    #[case("1_000_000", Literal::Int(1_000_000))]
    #[case("10L", Literal::Int(10))]
    #[case("0x1F", Literal::Int(31))]
    #[case("0b1010", Literal::Int(10))]
    #[case("017", Literal::Int(15))]
    #[case("0", Literal::Int(0))]
    #[case("0xFFFFFFFFFFFFFFFFL", Literal::Int(-1))]
    #[case("9223372036854775807L", Literal::Int(i64::MAX))]
    #[case("1.5", Literal::Float(1.5))]
    #[case("2f", Literal::Float(2.0))]
    #[case("1e3", Literal::Float(1000.0))]
    #[case(".25d", Literal::Float(0.25))]
    #[case("1_0.5_0", Literal::Float(10.5))]
    #[case("true", Literal::Bool(true))]
    #[case("false", Literal::Bool(false))]
    #[case("null", Literal::Null)]
    #[case(r#""a\tb""#, Literal::String("a\tb".to_string()))]
    #[case(r#""A\101""#, Literal::String("AA".to_string()))]
    #[case("'x'", Literal::Char('x'))]
    #[case(r"'\n'", Literal::Char('\n'))]
    fn test_parse_literal(#[case] text: &str, #[case] expected: Literal) {
        assert_eq!(Literal::parse(text), Ok(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("09")]
    #[case("12 34")]
    #[case(r#""\q""#)]
    #[case("'ab'")]
    #[case("99999999999999999999")]
    #[case("18446744073709551615")]
    #[case("9223372036854775809L")]
    fn test_malformed_literal(#[case] text: &str) {
        assert!(matches!(
            Literal::parse(text),
            Err(ExprError::MalformedLiteral { .. })
        ));
    }

    #[test]
    fn test_negate() {
        assert_eq!(Literal::Int(5).negate(), Some(Literal::Int(-5)));
        assert_eq!(Literal::Float(0.5).negate(), Some(Literal::Float(-0.5)));
        assert_eq!(Literal::Null.negate(), None);
        // the largest long magnitude only exists negated
        let min = Literal::parse("9223372036854775808L").unwrap();
        assert_eq!(min.negate(), Some(Literal::Int(i64::MIN)));
    }
}
