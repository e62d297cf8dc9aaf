//! Runtime values and expression evaluation.

use std::fmt;

use serde::Serialize;

use crate::ast::{BinaryOp, Expression, UnaryOp};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::token::Keyword;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // -0 prints as 0
            Value::Number(n) if *n == 0.0 => write!(f, "0"),
            Value::Number(n) => write_number(f, *n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(true) => write!(f, "{}", Keyword::True),
            Value::Bool(false) => write!(f, "{}", Keyword::False),
        }
    }
}

/// Plain decimal in `[1e-6, 1e21)`, exponent form (`1e+21`, `1.5e-7`)
/// outside it.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let magnitude = n.abs();
    if n.is_nan() || (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", n);
    }
    let exponent = format!("{:e}", n);
    match exponent.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
        _ => write!(f, "{}", exponent),
    }
}

impl Value {
    /// Converts a raw input entry: finite decimal numbers become numbers,
    /// anything else stays text.
    pub fn from_input(raw: &str) -> Value {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(raw.to_string()),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
        }
    }
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        operation: op.as_str(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

/// Evaluates `expr` against `env`.
pub fn eval_expression(expr: &Expression, env: &Environment) -> Result<Value, RuntimeError> {
    match expr {
        Expression::Number(n) => Ok(Value::Number(*n)),
        Expression::Str(s) => Ok(Value::Text(s.clone())),
        Expression::Bool(b) => Ok(Value::Bool(*b)),
        Expression::Variable(name) => {
            env.get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UnknownIdentifier { name: name.clone() })
        }
        Expression::Unary { op, operand } => {
            let value = eval_expression(operand, env)?;
            match (op, value) {
                (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
                (UnaryOp::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
                (UnaryOp::Negate, other) => Err(RuntimeError::TypeMismatch {
                    operation: "-",
                    left: other.type_name(),
                    right: "nothing",
                }),
            }
        }
        Expression::Binary { op: BinaryOp::And, left, right } => {
            let lhs = eval_expression(left, env)?;
            if !lhs.is_truthy() {
                return Ok(lhs);
            }
            eval_expression(right, env)
        }
        Expression::Binary { op: BinaryOp::Or, left, right } => {
            let lhs = eval_expression(left, env)?;
            if lhs.is_truthy() {
                return Ok(lhs);
            }
            eval_expression(right, env)
        }
        Expression::Binary { op, left, right } => {
            let lhs = eval_expression(left, env)?;
            let rhs = eval_expression(right, env)?;
            apply_binary(*op, lhs, rhs)
        }
    }
}

/// Applies a non-short-circuiting binary operator to evaluated operands.
pub fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Add => match (&lhs, &rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Text(_), _) | (_, Value::Text(_)) => {
                Ok(Value::Text(format!("{}{}", lhs, rhs)))
            }
            _ => Err(mismatch(op, &lhs, &rhs)),
        },
        BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => {
            let (Value::Number(a), Value::Number(b)) = (&lhs, &rhs) else {
                return Err(mismatch(op, &lhs, &rhs));
            };
            let result = match op {
                BinaryOp::Subtract => a - b,
                BinaryOp::Multiply => a * b,
                BinaryOp::Divide => a / b,
                _ => a % b,
            };
            Ok(Value::Number(result))
        }
        BinaryOp::GreaterThan
        | BinaryOp::GreaterOrEqual
        | BinaryOp::LessThan
        | BinaryOp::LessOrEqual => {
            let ordering = match (&lhs, &rhs) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
                _ => return Err(mismatch(op, &lhs, &rhs)),
            };
            // NaN compares false against everything
            let result = ordering.is_some_and(|ord| match op {
                BinaryOp::GreaterThan => ord.is_gt(),
                BinaryOp::GreaterOrEqual => ord.is_ge(),
                BinaryOp::LessThan => ord.is_lt(),
                _ => ord.is_le(),
            });
            Ok(Value::Bool(result))
        }
        BinaryOp::Equal => Ok(Value::Bool(lhs == rhs)),
        BinaryOp::NotEqual => Ok(Value::Bool(lhs != rhs)),
        BinaryOp::And => Ok(if lhs.is_truthy() { rhs } else { lhs }),
        BinaryOp::Or => Ok(if lhs.is_truthy() { lhs } else { rhs }),
    }
}
