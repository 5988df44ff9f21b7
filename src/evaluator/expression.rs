use crate::ast::{self, Expression, LiteralValue, Operator};
use crate::builtins;
use crate::environment::Environment;
use crate::value::{Result, RuntimeError, Value};

pub fn eval_expression(expression: &Expression, env: &Environment) -> Result<Value> {
    match expression {
        Expression::Literal(literal) => Ok(eval_literal(&literal.value)),
        Expression::Identifier(ident) => env.resolve(&ident.name),
        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env)?;
            eval_prefix_expression(prefix.operator, right)
        }
        Expression::Infix(infix) => eval_infix_expression(infix, env),
        Expression::Call(call) => eval_call_expression(call, env),
        // `x.toStr` without parentheses
        Expression::Access(access) => {
            let target = eval_expression(&access.target, env)?;
            builtins::call_method(&target, &access.member, vec![])
        }
    }
}

fn eval_literal(literal: &LiteralValue) -> Value {
    match literal {
        LiteralValue::Number { value, integer } => Value::Number {
            value: *value,
            integer: *integer,
        },
        LiteralValue::String(s) => Value::String(s.clone()),
        LiteralValue::Boolean(b) => Value::Boolean(*b),
    }
}

fn eval_prefix_expression(operator: Operator, right: Value) -> Result<Value> {
    match operator {
        Operator::Bang => Ok(Value::Boolean(!right.truth_value())),
        Operator::Minus => Ok(match right.to_num() {
            Value::Number { value, integer } => Value::Number {
                value: -value,
                integer,
            },
            other => other,
        }),
        _ => Err(RuntimeError::UnknownPrefixOperator { operator }),
    }
}

fn eval_infix_expression(infix: &ast::InfixExpression, env: &Environment) -> Result<Value> {
    let left = eval_expression(&infix.left, env)?;

    match infix.operator {
        Operator::And if !left.truth_value() => Ok(Value::Boolean(false)),
        Operator::Or if left.truth_value() => Ok(Value::Boolean(true)),
        Operator::And | Operator::Or => {
            let right = eval_expression(&infix.right, env)?;
            Ok(Value::Boolean(right.truth_value()))
        }
        operator => {
            let right = eval_expression(&infix.right, env)?;
            eval_binary(operator, &left, &right)
        }
    }
}

/// Applies a binary operator to two already evaluated operands.
pub fn eval_binary(operator: Operator, left: &Value, right: &Value) -> Result<Value> {
    match operator {
        Operator::Plus if is_string(left) || is_string(right) => {
            Ok(Value::String(format!("{}{}", left, right)))
        }
        Operator::Plus => Ok(eval_arithmetic(left, right, |a, b| a + b)),
        Operator::Minus => Ok(eval_arithmetic(left, right, |a, b| a - b)),
        Operator::Asterisk => Ok(eval_arithmetic(left, right, |a, b| a * b)),
        Operator::Slash if right.number() == 0.0 => Err(RuntimeError::DivisionByZero),
        Operator::Slash if left.to_num().is_integer() && right.to_num().is_integer() => {
            Ok(eval_arithmetic(left, right, |a, b| (a / b).trunc()))
        }
        Operator::Slash => Ok(eval_arithmetic(left, right, |a, b| a / b)),
        Operator::Percent if right.number() == 0.0 => Err(RuntimeError::ModuloByZero),
        Operator::Percent => Ok(eval_arithmetic(left, right, |a, b| a % b)),
        Operator::LT => Ok(Value::Boolean(left.number() < right.number())),
        Operator::GT => Ok(Value::Boolean(left.number() > right.number())),
        Operator::LE => Ok(Value::Boolean(left.number() <= right.number())),
        Operator::GE => Ok(Value::Boolean(left.number() >= right.number())),
        Operator::Eq => Ok(Value::Boolean(left == right)),
        Operator::NotEq => Ok(Value::Boolean(left != right)),
        Operator::And => Ok(Value::Boolean(left.truth_value() && right.truth_value())),
        Operator::Or => Ok(Value::Boolean(left.truth_value() || right.truth_value())),
        Operator::Bang => Err(RuntimeError::UnknownInfixOperator { operator }),
    }
}

fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// The result is integer-flagged only when both operands are.
fn eval_arithmetic(left: &Value, right: &Value, op: fn(f64, f64) -> f64) -> Value {
    let (left, right) = (left.to_num(), right.to_num());
    Value::Number {
        value: op(left.number(), right.number()),
        integer: left.is_integer() && right.is_integer(),
    }
}

fn eval_call_expression(call: &ast::CallExpression, env: &Environment) -> Result<Value> {
    let args = call
        .arguments
        .iter()
        .map(|arg| eval_expression(arg, env))
        .collect::<Result<Vec<_>>>()?;

    match call.function.as_ref() {
        Expression::Identifier(ident) => builtins::call_function(&ident.name, args),
        Expression::Access(access) => {
            let target = eval_expression(&access.target, env)?;
            builtins::call_method(&target, &access.member, args)
        }
        other => Err(RuntimeError::NotCallable {
            callee: other.to_string(),
        }),
    }
}
