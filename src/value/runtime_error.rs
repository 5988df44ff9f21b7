use crate::ast::Operator;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub RuntimeError

    UndefinedVariable{name: String} = "undefined variable: {name}",
    DivisionByZero = "division by zero",
    ModuloByZero = "modulo by zero",
    UnknownFunction{name: String} = "unknown function: {name}",
    UnknownMethod{name: String} = "unknown method: {name}",
    WrongArgumentCount{name: String, want: usize, got: usize} = "wrong number of arguments to `{name}`: want={want}, got={got}",
    NotCallable{callee: String} = "not callable: {callee}",
    UnknownPrefixOperator{operator: Operator} = "unknown prefix operator: {operator}",
    UnknownInfixOperator{operator: Operator} = "unknown infix operator: {operator}",
    NestedObject{class: String} = "cannot open object `{class}` inside another object",
    BreakOutsideLoop = "`break` outside of a loop",
    ContinueOutsideLoop = "`continue` outside of a loop",
    AtLine{line: usize, inner: Box<RuntimeError>} = "Runtime error (line {line}): {inner}",
}

impl RuntimeError {
    /// Attaches a source line unless one is already attached.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::AtLine { .. } => self,
            inner => Self::AtLine {
                line,
                inner: Box::new(inner),
            },
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Self::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The error without its line information.
    pub fn kind(&self) -> &RuntimeError {
        match self {
            Self::AtLine { inner, .. } => inner.kind(),
            other => other,
        }
    }
}
