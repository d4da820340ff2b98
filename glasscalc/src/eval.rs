//! Arithmetic evaluation of the display buffer.
//!
//! Grammar, lowest precedence first. Binary operators are left-associative.
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('+' | '-')* number
//! ```
//!
//! Integer literals stay integers under `+ - *`; `/` always produces a
//! float, as does any operation involving a float or overflowing `i128`.
//! Literals take an optional exponent (`1e-05`, `2.5E+3`), so every
//! result the calculator prints can be read back in.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("expression ends early")]
    UnexpectedEnd,
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),
    #[error("division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(x) => x == 0.0,
        }
    }

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map_or(Number::Float(a as f64 + b as f64), Number::Int),
            _ => Number::Float(self.as_f64() + rhs.as_f64()),
        }
    }

    fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(b)
                .map_or(Number::Float(a as f64 - b as f64), Number::Int),
            _ => Number::Float(self.as_f64() - rhs.as_f64()),
        }
    }

    fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map_or(Number::Float(a as f64 * b as f64), Number::Int),
            _ => Number::Float(self.as_f64() * rhs.as_f64()),
        }
    }

    fn div(self, rhs: Number) -> Result<Number> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Number::Float(self.as_f64() / rhs.as_f64()))
    }

    fn neg(self) -> Number {
        match self {
            Number::Int(n) => n
                .checked_neg()
                .map_or(Number::Float(-(n as f64)), Number::Int),
            Number::Float(x) => Number::Float(-x),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => f.write_str(&format_float(x)),
        }
    }
}

/// Shortest round-trip rendering that always reads as a float:
/// "2.0", "3.5", "1e+16", "1.5e-05".
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{:e}", x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if x != 0.0 && (exp < -4 || exp >= 16) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        let plain = format!("{}", x);
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(Number),
    Plus,
    Minus,
    Star,
    Slash,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
        }
    }
}

/// Split `input` into tokens. Whitespace is skipped.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' => {
                chars.next();
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    _ => Token::Slash,
                });
            }
            '0'..='9' | '.' => {
                let mut end = take_while(&mut chars, start, |d| d.is_ascii_digit() || d == '.');
                if let Some(&(i, 'e' | 'E')) = chars.peek() {
                    chars.next();
                    end = i + 1;
                    if let Some(&(j, '+' | '-')) = chars.peek() {
                        chars.next();
                        end = j + 1;
                    }
                    end = take_while(&mut chars, end, |d| d.is_ascii_digit());
                }
                tokens.push(Token::Number(parse_literal(&input[start..end])?));
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

/// Consume chars matching `accept`, returning the byte offset after the
/// last one taken (or `end` if none matched).
fn take_while(
    chars: &mut Peekable<CharIndices<'_>>,
    mut end: usize,
    accept: impl Fn(char) -> bool,
) -> usize {
    while let Some(&(i, d)) = chars.peek() {
        if !accept(d) {
            break;
        }
        end = i + d.len_utf8();
        chars.next();
    }
    end
}

fn parse_literal(text: &str) -> Result<Number> {
    let invalid = || EvalError::InvalidNumber(text.to_string());
    let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };
    let digits = |s: &str| s.bytes().any(|b| b.is_ascii_digit());
    if mantissa.matches('.').count() > 1 || !digits(mantissa) {
        return Err(invalid());
    }
    match exponent {
        Some(exp) if !digits(exp) => return Err(invalid()),
        Some(_) => {}
        None if !mantissa.contains('.') => {
            if let Ok(n) = text.parse::<i128>() {
                return Ok(Number::Int(n));
            }
        }
        None => {}
    }
    text.parse::<f64>().map(Number::Float).map_err(|_| invalid())
}

/// Evaluate an arithmetic expression.
pub fn evaluate(input: &str) -> Result<Number> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(tok) => Err(EvalError::UnexpectedToken(tok.to_string())),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<Number> {
        let mut acc = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == Token::Plus { acc.add(rhs) } else { acc.sub(rhs) };
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<Number> {
        let mut acc = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            acc = if op == Token::Star { acc.mul(rhs) } else { acc.div(rhs)? };
        }
        Ok(acc)
    }

    // Iterative so a long run of signs can't exhaust the stack.
    fn unary(&mut self) -> Result<Number> {
        let mut negate = false;
        loop {
            match self.bump() {
                Some(Token::Plus) => {}
                Some(Token::Minus) => negate = !negate,
                Some(Token::Number(n)) => return Ok(if negate { n.neg() } else { n }),
                Some(tok) => return Err(EvalError::UnexpectedToken(tok.to_string())),
                None => return Err(EvalError::UnexpectedEnd),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(input: &str) -> String {
        match evaluate(input) {
            Ok(n) => n.to_string(),
            Err(e) => format!("error: {}", e),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(show("2+3*4"), "14");
        assert_eq!(show("2*3+4"), "10");
        assert_eq!(show("10-4/2"), "8.0");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(show("10-3-2"), "5");
        assert_eq!(show("8/2/2"), "2.0");
        assert_eq!(show("2*3*4"), "24");
    }

    #[test]
    fn test_division_is_float() {
        assert_eq!(show("7/2"), "3.5");
        assert_eq!(show("4/2"), "2.0");
        assert_eq!(show("1/3"), "0.3333333333333333");
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(show("1.5+1"), "2.5");
        assert_eq!(show("5.+1"), "6.0");
        assert_eq!(show(".5*2"), "1.0");
        assert_eq!(show("0.1+0.2"), "0.30000000000000004");
        assert_eq!(show("05"), "5");
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(show("5*-3"), "-15");
        assert_eq!(show("2++3"), "5");
        assert_eq!(show("2--3"), "5");
        assert_eq!(show("-4"), "-4");
        assert_eq!(show("-0.0"), "-0.0");
    }

    #[test]
    fn test_malformed() {
        assert_eq!(evaluate("2++"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("  "), Err(EvalError::Empty));
        assert_eq!(evaluate("*5"), Err(EvalError::UnexpectedToken("*".into())));
        assert_eq!(evaluate("2**3"), Err(EvalError::UnexpectedToken("*".into())));
        assert_eq!(evaluate("1.2.3"), Err(EvalError::InvalidNumber("1.2.3".into())));
        assert_eq!(evaluate("."), Err(EvalError::InvalidNumber(".".into())));
        assert_eq!(evaluate("Error5"), Err(EvalError::UnexpectedChar('E')));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5/0.0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5/(0)").unwrap_err(), EvalError::UnexpectedChar('('));
        assert_eq!(evaluate("1/2-0.5").map(|n| n.to_string()), Ok("0.0".to_string()));
    }

    #[test]
    fn test_wide_integers_stay_exact() {
        assert_eq!(show("12345678901234567890"), "12345678901234567890");
        assert_eq!(show("9999999999*9999999999"), "99999999980000000001");
        assert_eq!(show("9223372036854775807+1"), "9223372036854775808");
    }

    #[test]
    fn test_i128_overflow_promotes_to_float() {
        assert_eq!(
            evaluate("170141183460469231731687303715884105727+1"),
            Ok(Number::Float(170141183460469231731687303715884105728.0))
        );
        assert_eq!(show("1000000000000000000000000000000000000000"), "1e+39");
    }

    #[test]
    fn test_exponent_literals() {
        assert_eq!(show("1e-05*100000"), "1.0");
        assert_eq!(show("1e+20"), "1e+20");
        assert_eq!(show("2.5E3"), "2500.0");
        assert_eq!(evaluate("5e"), Err(EvalError::InvalidNumber("5e".into())));
        assert_eq!(evaluate("5e+"), Err(EvalError::InvalidNumber("5e+".into())));
        assert_eq!(evaluate("e5"), Err(EvalError::UnexpectedChar('e')));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e-5), "1.5e-05");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(123456789012345.6), "123456789012345.6");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }
}
