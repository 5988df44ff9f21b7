use super::{Expression, Node};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(ExpressionStatement),
    Assign(AssignStatement),
    Decl(DeclStatement),
    If(IfStatement),
    For(ForStatement),
    Obj(ObjStatement),
    Break(LoopControl),
    Continue(LoopControl),
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Expr(stmt) => write!(f, "{}", stmt),
            Self::Assign(stmt) => write!(f, "{}", stmt),
            Self::Decl(stmt) => write!(f, "{}", stmt),
            Self::If(stmt) => write!(f, "{}", stmt),
            Self::For(stmt) => write!(f, "{}", stmt),
            Self::Obj(stmt) => write!(f, "{}", stmt),
            Self::Break(_) => write!(f, "break;"),
            Self::Continue(_) => write!(f, "continue;"),
        }
    }
}

impl Node for Statement {
    fn line(&self) -> usize {
        match self {
            Self::Expr(stmt) => stmt.line,
            Self::Assign(stmt) => stmt.line,
            Self::Decl(stmt) => stmt.line,
            Self::If(stmt) => stmt.line,
            Self::For(stmt) => stmt.line,
            Self::Obj(stmt) => stmt.line,
            Self::Break(stmt) | Self::Continue(stmt) => stmt.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for stmt in self.statements.iter() {
            write!(f, "{} ", stmt)?;
        }
        write!(f, "}}")
    }
}

impl From<Vec<Statement>> for BlockStatement {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub line: usize,
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub name: String,
    pub value: Expression,
    pub line: usize,
}

impl Display for AssignStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} = {};", self.name, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DeclType {
    #[strum(to_string = "num")]
    Num,
    #[strum(to_string = "str")]
    Str,
    #[strum(to_string = "bool")]
    Bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    /// `num(x) {}` or `num(x);`
    Default,
    Expr(Expression),
    /// Evaluates to the value of the last declaration executed inside.
    Block(BlockStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStatement {
    pub declared_type: DeclType,
    pub name: String,
    pub init: Initializer,
    pub line: usize,
}

impl Display for DeclStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}({}) ", self.declared_type, self.name)?;
        match &self.init {
            Initializer::Default => write!(f, "{{}}"),
            Initializer::Expr(expr) => write!(f, "{{ {} }}", expr),
            Initializer::Block(block) => write!(f, "{}", block),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequence: BlockStatement,
    pub alternatives: Vec<(Expression, BlockStatement)>,
    pub otherwise: Option<BlockStatement>,
    pub line: usize,
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        for (condition, body) in self.alternatives.iter() {
            write!(f, " elif ({}) {}", condition, body)?;
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, " else {}", otherwise)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub iterator: String,
    /// One to three bounds: `end`, `start, end` or `start, end, step`.
    pub arguments: Vec<Expression>,
    pub body: BlockStatement,
    pub line: usize,
}

impl Display for ForStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(Expression::to_string).collect();

        write!(
            f,
            "for ({}, {}) {}",
            self.iterator,
            arguments.join(", "),
            self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjStatement {
    pub class_name: String,
    pub id: Expression,
    pub body: BlockStatement,
    pub line: usize,
}

impl Display for ObjStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "obj({:?}, {}) {}", self.class_name, self.id, self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopControl {
    pub line: usize,
}
