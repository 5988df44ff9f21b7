mod expression;

pub use expression::{eval_binary, eval_expression};

use crate::ast::{
    BlockStatement, DeclStatement, DeclType, ForStatement, IfStatement, Initializer, Node,
    ObjStatement, Program, Statement,
};
use crate::environment::Environment;
use crate::value::{Result, RuntimeError, Value};

/// How a statement hands control back to the enclosing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Next,
    Break,
    Continue,
}

/// Runs a program against `env`, appending the records it emits.
///
/// A failed run leaves no partial records behind: everything emitted since the
/// call started is discarded together with the run's scopes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn eval(program: &Program, env: &mut Environment) -> Result<()> {
    let committed = env.output().len();
    tracing::debug!(statements = program.statements.len(), "evaluating program");

    match eval_statements(&program.statements, env) {
        Ok(_) => {
            tracing::debug!(
                records = env.output().len() - committed,
                "program finished"
            );
            Ok(())
        }
        Err(err) => {
            tracing::debug!(%err, "program failed, rolling back");
            env.rollback(committed);
            Err(err)
        }
    }
}

fn eval_statements(statements: &[Statement], env: &mut Environment) -> Result<Flow> {
    for statement in statements.iter() {
        match eval_statement(statement, env)? {
            Flow::Next => {}
            interrupted => return Ok(interrupted),
        }
    }
    Ok(Flow::Next)
}

fn eval_block(block: &BlockStatement, env: &mut Environment) -> Result<Flow> {
    env.push_scope();
    let flow = eval_statements(&block.statements, env);
    env.pop_scope();
    flow
}

fn eval_statement(statement: &Statement, env: &mut Environment) -> Result<Flow> {
    execute(statement, env).map_err(|err| err.at_line(statement.line()))
}

fn execute(statement: &Statement, env: &mut Environment) -> Result<Flow> {
    match statement {
        Statement::Expr(stmt) => {
            eval_expression(&stmt.expression, env)?;
            Ok(Flow::Next)
        }
        Statement::Assign(stmt) => {
            let value = eval_expression(&stmt.value, env)?;
            env.assign(&stmt.name, value);
            Ok(Flow::Next)
        }
        Statement::Decl(stmt) => eval_declaration(stmt, env),
        Statement::If(stmt) => eval_if_statement(stmt, env),
        Statement::For(stmt) => eval_for_statement(stmt, env),
        Statement::Obj(stmt) => eval_obj_statement(stmt, env),
        Statement::Break(_) if env.in_loop() => Ok(Flow::Break),
        Statement::Break(_) => Err(RuntimeError::BreakOutsideLoop),
        Statement::Continue(_) if env.in_loop() => Ok(Flow::Continue),
        Statement::Continue(_) => Err(RuntimeError::ContinueOutsideLoop),
    }
}

fn eval_declaration(decl: &DeclStatement, env: &mut Environment) -> Result<Flow> {
    let value = match &decl.init {
        Initializer::Default => default_value(decl.declared_type),
        Initializer::Expr(expr) => eval_expression(expr, env)?,
        Initializer::Block(block) => {
            env.begin_declaration_block();
            let flow = eval_statements(&block.statements, env);
            let last = env.end_declaration_block();
            match flow? {
                Flow::Next => last.unwrap_or_else(|| default_value(decl.declared_type)),
                interrupted => return Ok(interrupted),
            }
        }
    };

    env.declare(&decl.name, coerce(decl.declared_type, &value));
    Ok(Flow::Next)
}

fn default_value(declared_type: DeclType) -> Value {
    match declared_type {
        DeclType::Num => Value::integer(0),
        DeclType::Str => Value::from(""),
        DeclType::Bool => Value::from(false),
    }
}

fn coerce(declared_type: DeclType, value: &Value) -> Value {
    match declared_type {
        DeclType::Num => value.to_num(),
        DeclType::Str => value.to_str(),
        DeclType::Bool => value.to_bool(),
    }
}

fn eval_if_statement(stmt: &IfStatement, env: &mut Environment) -> Result<Flow> {
    if eval_expression(&stmt.condition, env)?.truth_value() {
        return eval_block(&stmt.consequence, env);
    }

    for (condition, body) in stmt.alternatives.iter() {
        if eval_expression(condition, env)?.truth_value() {
            return eval_block(body, env);
        }
    }

    match &stmt.otherwise {
        Some(body) => eval_block(body, env),
        None => Ok(Flow::Next),
    }
}

fn eval_for_statement(stmt: &ForStatement, env: &mut Environment) -> Result<Flow> {
    let (start, end, step) = loop_bounds(stmt, env)?;
    tracing::trace!(iterator = %stmt.iterator, start, end, step, "entering loop");

    env.push_scope();
    env.enter_loop();
    let result = run_loop(stmt, start, end, step, env);
    env.exit_loop();
    env.pop_scope();

    result.map(|_| Flow::Next)
}

/// `for(i, end)`, `for(i, start, end)` or `for(i, start, end, step)`.
///
/// Bounds are truncated to integers. Without an explicit step the two-bound
/// form picks its direction from `start <= end`, so `for(i, 5, 1)` counts down
/// instead of running zero times with a default step of 1. An explicit step
/// sets the direction by its sign; a zero step counts up by one.
fn loop_bounds(stmt: &ForStatement, env: &Environment) -> Result<(i64, i64, i64)> {
    let bounds = stmt
        .arguments
        .iter()
        .map(|arg| eval_expression(arg, env).map(|value| as_bound(&value)))
        .collect::<Result<Vec<_>>>()?;

    Ok(match bounds.as_slice() {
        [end] => (1, *end, 1),
        [start, end] if start <= end => (*start, *end, 1),
        [start, end] => (*start, *end, -1),
        [start, end, 0, ..] => (*start, *end, 1),
        [start, end, step, ..] => (*start, *end, *step),
        // the parser always supplies at least one bound
        [] => (1, 0, 1),
    })
}

fn as_bound(value: &Value) -> i64 {
    // saturating float to int cast
    value.to_int().number() as i64
}

fn run_loop(
    stmt: &ForStatement,
    start: i64,
    end: i64,
    step: i64,
    env: &mut Environment,
) -> Result<()> {
    let mut current = start;
    loop {
        let in_range = if step > 0 {
            current <= end
        } else {
            current >= end
        };
        if !in_range {
            return Ok(());
        }

        tracing::trace!(iterator = %stmt.iterator, current, "loop iteration");
        env.define(&stmt.iterator, Value::integer(current));
        if eval_block(&stmt.body, env)? == Flow::Break {
            return Ok(());
        }

        current = match current.checked_add(step) {
            Some(next) => next,
            None => return Ok(()),
        };
    }
}

fn eval_obj_statement(stmt: &ObjStatement, env: &mut Environment) -> Result<Flow> {
    if env.in_object() {
        return Err(RuntimeError::NestedObject {
            class: stmt.class_name.clone(),
        });
    }

    let id = match eval_expression(&stmt.id, env)? {
        number @ Value::Number { .. } => number,
        other => other.to_str(),
    };

    env.open_object(&stmt.class_name, id)?;
    let flow = eval_statements(&stmt.body.statements, env);
    let record = env.close_object();
    let flow = flow?;

    if let Some(record) = record {
        tracing::trace!(%record, "emitting record");
        env.emit(record);
    }
    Ok(flow)
}
