mod expression;
mod statement;
pub use expression::*;
pub use statement::*;

use std::fmt::{Display, Formatter};

pub trait Node: Display {
    /// Source line the node started on.
    fn line(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let statements: Vec<String> = self.statements.iter().map(Statement::to_string).collect();
        write!(f, "{}", statements.join("\n"))
    }
}
