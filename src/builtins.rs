use crate::value::{Result, RuntimeError, Value};
use lazy_static::lazy_static;
use std::collections::HashMap;

pub type Builtin = fn(&Value) -> Value;

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = vec![
        ("toStr", Value::to_str as Builtin),
        ("toInt", Value::to_int as Builtin),
        ("toNum", Value::to_num as Builtin),
        ("toBool", Value::to_bool as Builtin),
    ]
    .into_iter()
    .collect();
}

/// `toStr(x)`: exactly one argument.
pub fn call_function(name: &str, args: Vec<Value>) -> Result<Value> {
    let builtin = BUILTINS
        .get(name)
        .ok_or_else(|| RuntimeError::UnknownFunction {
            name: name.to_owned(),
        })?;

    match args.as_slice() {
        [arg] => Ok(builtin(arg)),
        _ => Err(RuntimeError::WrongArgumentCount {
            name: name.to_owned(),
            want: 1,
            got: args.len(),
        }),
    }
}

/// `x.toStr()`: the receiver is the only operand.
pub fn call_method(target: &Value, name: &str, args: Vec<Value>) -> Result<Value> {
    let builtin = BUILTINS
        .get(name)
        .ok_or_else(|| RuntimeError::UnknownMethod {
            name: name.to_owned(),
        })?;

    if !args.is_empty() {
        return Err(RuntimeError::WrongArgumentCount {
            name: name.to_owned(),
            want: 0,
            got: args.len(),
        });
    }

    Ok(builtin(target))
}
