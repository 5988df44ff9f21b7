use super::Node;
use crate::token::TokenKind;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Identifier(Identifier),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Call(CallExpression),
    Access(AccessExpression),
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Literal(expr) => write!(f, "{}", expr),
            Self::Identifier(expr) => write!(f, "{}", expr),
            Self::Prefix(expr) => write!(f, "{}", expr),
            Self::Infix(expr) => write!(f, "{}", expr),
            Self::Call(expr) => write!(f, "{}", expr),
            Self::Access(expr) => write!(f, "{}", expr),
        }
    }
}

impl Node for Expression {
    fn line(&self) -> usize {
        match self {
            Self::Literal(expr) => expr.line,
            Self::Identifier(expr) => expr.line,
            Self::Prefix(expr) => expr.line,
            Self::Infix(expr) => expr.line,
            Self::Call(expr) => expr.line,
            Self::Access(expr) => expr.line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Operator {
    #[strum(to_string = "!")]
    Bang,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "*")]
    Asterisk,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "%")]
    Percent,
    #[strum(to_string = "<")]
    LT,
    #[strum(to_string = ">")]
    GT,
    #[strum(to_string = "<=")]
    LE,
    #[strum(to_string = ">=")]
    GE,
    #[strum(to_string = "==")]
    Eq,
    #[strum(to_string = "!=")]
    NotEq,
    #[strum(to_string = "&&")]
    And,
    #[strum(to_string = "||")]
    Or,
}

impl TryFrom<TokenKind> for Operator {
    type Error = TokenKind;

    fn try_from(kind: TokenKind) -> Result<Self, Self::Error> {
        Ok(match kind {
            TokenKind::Bang => Self::Bang,
            TokenKind::Minus => Self::Minus,
            TokenKind::Plus => Self::Plus,
            TokenKind::Asterisk => Self::Asterisk,
            TokenKind::Slash => Self::Slash,
            TokenKind::Percent => Self::Percent,
            TokenKind::LT => Self::LT,
            TokenKind::GT => Self::GT,
            TokenKind::LE => Self::LE,
            TokenKind::GE => Self::GE,
            TokenKind::Eq => Self::Eq,
            TokenKind::NotEq => Self::NotEq,
            TokenKind::And => Self::And,
            TokenKind::Or => Self::Or,
            other => return Err(other),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `integer` only controls how the number is rendered.
    Number { value: f64, integer: bool },
    String(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub line: usize,
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.value {
            LiteralValue::Number {
                value,
                integer: true,
            } => write!(f, "{}", value),
            LiteralValue::Number { value, .. } if value.fract() == 0.0 => {
                write!(f, "{:.1}", value)
            }
            LiteralValue::Number { value, .. } => write!(f, "{}", value),
            LiteralValue::String(s) => write!(f, "{:?}", s),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub line: usize,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub operator: Operator,
    pub right: Box<Expression>,
    pub line: usize,
}

impl Display for PrefixExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: Operator,
    pub right: Box<Expression>,
    pub line: usize,
}

impl Display for InfixExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub line: usize,
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(Expression::to_string).collect();

        write!(f, "{}({})", self.function, arguments.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessExpression {
    pub target: Box<Expression>,
    pub member: String,
    pub line: usize,
}

impl Display for AccessExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}.{}", self.target, self.member)
    }
}
