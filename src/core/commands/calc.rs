use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::{usage, Command, CommandResult};
use crate::core::env::Environment;
use crate::output::OutputSink;

const ALLOWED_CHARS: &str = "0123456789+-*/().% ";
const MAX_DEPTH: usize = 64;

/// Integers stay exact until an operation produces a fraction; true division
/// always yields a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{:.1}", x)
            }
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    InvalidCharacters,
    Syntax(String),
    DivisionByZero,
    Overflow,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidCharacters => write!(f, "invalid characters in expression"),
            CalcError::Syntax(msg) => write!(f, "invalid syntax: {}", msg),
            CalcError::DivisionByZero => write!(f, "division by zero"),
            CalcError::Overflow => write!(f, "result too large"),
        }
    }
}

impl std::error::Error for CalcError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

/// Recursive-descent evaluator over `+ - * / // % **` and parentheses.
struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            depth: 0,
        }
    }

    fn skip_spaces(&mut self) {
        while self.chars.next_if_eq(&' ').is_some() {}
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_spaces();
        self.chars.peek().copied()
    }

    fn parse(mut self) -> Result<Number, CalcError> {
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(c) => Err(CalcError::Syntax(format!("unexpected '{}'", c))),
        }
    }

    fn expr(&mut self) -> Result<Number, CalcError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek() {
                Some('+') => Op::Add,
                Some('-') => Op::Sub,
                _ => return Ok(left),
            };
            self.chars.next();
            let right = self.term()?;
            left = apply(op, left, right)?;
        }
    }

    fn term(&mut self) -> Result<Number, CalcError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some('*') => {
                    self.chars.next();
                    if self.chars.peek() == Some(&'*') {
                        // `**` belongs to the power level below.
                        return Err(CalcError::Syntax("unexpected '**'".to_string()));
                    }
                    Op::Mul
                }
                Some('/') => {
                    self.chars.next();
                    if self.chars.next_if_eq(&'/').is_some() {
                        Op::FloorDiv
                    } else {
                        Op::Div
                    }
                }
                Some('%') => {
                    self.chars.next();
                    Op::Mod
                }
                _ => return Ok(left),
            };
            let right = self.unary()?;
            left = apply(op, left, right)?;
        }
    }

    /// Enters one level of nesting, either a parenthesis or an exponent.
    fn descend(&mut self) -> Result<(), CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::Syntax("expression too deeply nested".to_string()));
        }
        self.depth += 1;
        Ok(())
    }

    fn unary(&mut self) -> Result<Number, CalcError> {
        let mut negate = false;
        loop {
            match self.peek() {
                Some('-') => negate = !negate,
                Some('+') => {}
                _ => break,
            }
            self.chars.next();
        }

        let value = self.power()?;
        if negate {
            apply(Op::Sub, Number::Int(0), value)
        } else {
            Ok(value)
        }
    }

    fn power(&mut self) -> Result<Number, CalcError> {
        let base = self.primary()?;
        if self.peek() == Some('*') {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if lookahead.peek() == Some(&'*') {
                self.chars.next();
                self.chars.next();
                self.descend()?;
                let exponent = self.unary()?;
                self.depth -= 1;
                return apply(Op::Pow, base, exponent);
            }
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Number, CalcError> {
        match self.peek() {
            Some('(') => {
                self.chars.next();
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                if self.peek() != Some(')') {
                    return Err(CalcError::Syntax("missing ')'".to_string()));
                }
                self.chars.next();
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(CalcError::Syntax(format!("unexpected '{}'", c))),
            None => Err(CalcError::Syntax("unexpected end of expression".to_string())),
        }
    }

    fn number(&mut self) -> Result<Number, CalcError> {
        let mut literal = String::new();
        while let Some(c) = self.chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
            literal.push(c);
        }

        if literal.contains('.') {
            literal
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| CalcError::Syntax(format!("bad number '{}'", literal)))
        } else {
            literal
                .parse::<i64>()
                .map(Number::Int)
                .map_err(|_| CalcError::Overflow)
        }
    }
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}

fn apply(op: Op, left: Number, right: Number) -> Result<Number, CalcError> {
    if matches!(op, Op::Div | Op::FloorDiv | Op::Mod) && right.is_zero() {
        return Err(CalcError::DivisionByZero);
    }

    let result = match (left, right) {
        (Number::Int(a), Number::Int(b)) => match op {
            Op::Add => a.checked_add(b).map(Number::Int),
            Op::Sub => a.checked_sub(b).map(Number::Int),
            Op::Mul => a.checked_mul(b).map(Number::Int),
            Op::Div => Some(Number::Float(a as f64 / b as f64)),
            Op::FloorDiv => floor_div(a, b).map(Number::Int),
            Op::Mod => floor_mod(a, b).map(Number::Int),
            Op::Pow if b >= 0 => u32::try_from(b)
                .ok()
                .and_then(|e| a.checked_pow(e))
                .map(Number::Int),
            Op::Pow if a == 0 => return Err(CalcError::DivisionByZero),
            Op::Pow => Some(Number::Float((a as f64).powf(b as f64))),
        },
        _ => {
            let (a, b) = (left.as_f64(), right.as_f64());
            let value = match op {
                Op::Add => a + b,
                Op::Sub => a - b,
                Op::Mul => a * b,
                Op::Div => a / b,
                Op::FloorDiv => (a / b).floor(),
                Op::Mod => a - b * (a / b).floor(),
                Op::Pow if a == 0.0 && b < 0.0 => return Err(CalcError::DivisionByZero),
                Op::Pow => a.powf(b),
            };
            Some(Number::Float(value))
        }
    };

    result.ok_or(CalcError::Overflow)
}

/// Evaluates an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<Number, CalcError> {
    if !expression.chars().all(|c| ALLOWED_CHARS.contains(c)) {
        return Err(CalcError::InvalidCharacters);
    }
    Parser::new(expression).parse()
}

#[derive(Clone)]
pub struct CalcCommand;

impl Command for CalcCommand {
    fn execute(
        &self,
        args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        if args.is_empty() {
            return usage(out, "calc EXPRESSION");
        }

        let expression = args.join(" ");
        match evaluate(&expression) {
            Ok(value) => out.output(&format!("{} = {}", expression, value)),
            Err(e) => out.error(&format!("calc: {}", e)),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{BufferSink, OutputStyle};

    fn eval_str(expr: &str) -> String {
        match evaluate(expr) {
            Ok(value) => value.to_string(),
            Err(e) => e.to_string(),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval_str("2 + 3 * 4"), "14");
        assert_eq!(eval_str("(2 + 3) * 4"), "20");
        assert_eq!(eval_str("10 - 4 - 3"), "3");
        assert_eq!(eval_str("2 ** 3 ** 2"), "512");
        assert_eq!(eval_str("-2 ** 2"), "-4");
        assert_eq!(eval_str("2 * -3"), "-6");
    }

    #[test]
    fn test_division_kinds() {
        assert_eq!(eval_str("6/2"), "3.0");
        assert_eq!(eval_str("7 / 2"), "3.5");
        assert_eq!(eval_str("7 // 2"), "3");
        assert_eq!(eval_str("-7 // 2"), "-4");
        assert_eq!(eval_str("-7 % 3"), "2");
        assert_eq!(eval_str("7 % -3"), "-2");
        assert_eq!(eval_str("7.5 % 2"), "1.5");
    }

    #[test]
    fn test_floats() {
        assert_eq!(eval_str("1.5 * 2"), "3.0");
        assert_eq!(eval_str(".5 + .25"), "0.75");
        assert_eq!(eval_str("2 ** -1"), "0.5");
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("1 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("5 % 0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("0 ** -1"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("2 + x"), Err(CalcError::InvalidCharacters));
        assert!(matches!(evaluate("(1 + 2"), Err(CalcError::Syntax(_))));
        assert!(matches!(evaluate("1 +"), Err(CalcError::Syntax(_))));
        assert!(matches!(evaluate("1.2.3"), Err(CalcError::Syntax(_))));
        assert!(matches!(evaluate("3 4"), Err(CalcError::Syntax(_))));
        assert_eq!(evaluate("9223372036854775807 + 1"), Err(CalcError::Overflow));
    }

    #[test]
    fn test_sign_runs() {
        assert_eq!(eval_str("--5"), "5");
        assert_eq!(eval_str("-+-+-5"), "-5");
        assert_eq!(eval_str("3 - -2"), "5");
        assert_eq!(eval_str(&format!("{}1", "-".repeat(200_000))), "1");
        assert_eq!(eval_str(&format!("{}1", "-".repeat(200_001))), "-1");
    }

    #[test]
    fn test_nesting_limit() {
        let too_deep = CalcError::Syntax("expression too deeply nested".to_string());

        let powers = format!("1{}", "**1".repeat(200_000));
        assert_eq!(evaluate(&powers), Err(too_deep.clone()));
        assert_eq!(eval_str(&format!("1{}", "**1".repeat(10))), "1");

        let parens = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
        assert_eq!(evaluate(&parens), Err(too_deep));
        assert_eq!(eval_str(&format!("{}1{}", "(".repeat(10), ")".repeat(10))), "1");
    }

    #[test]
    fn test_calc_command() {
        let mut env = Environment::with_dir("/");
        let mut out = BufferSink::new();
        let args: Vec<String> = ["(1", "+", "2)", "*", "3"].iter().map(|s| s.to_string()).collect();

        CalcCommand.execute(&args, &mut env, &mut out).unwrap();
        CalcCommand.execute(&["2^3".to_string()], &mut env, &mut out).unwrap();
        CalcCommand.execute(&[], &mut env, &mut out).unwrap();

        assert_eq!(
            out.lines(),
            &[
                ("(1 + 2) * 3 = 9".to_string(), OutputStyle::Output),
                (
                    "calc: invalid characters in expression".to_string(),
                    OutputStyle::Error
                ),
                ("Usage: calc EXPRESSION".to_string(), OutputStyle::Error),
            ]
        );
    }
}
