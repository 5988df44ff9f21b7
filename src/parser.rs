use crate::ast::{
    AccessExpression, AssignStatement, BlockStatement, CallExpression, DeclStatement, DeclType,
    Expression, ExpressionStatement, ForStatement, Identifier, IfStatement, InfixExpression,
    Initializer, Literal, LiteralValue, LoopControl, ObjStatement, Operator, PrefixExpression,
    Program, Statement,
};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use custom_error::custom_error;
use std::convert::TryFrom;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError{message: String, line: usize, found: String} = "Parse error (line {line}): {message}, found '{found}'"
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Or,
    And,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Postfix,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Or => Precedence::Or,
        TokenKind::And => Precedence::And,
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::LT | TokenKind::GT | TokenKind::LE | TokenKind::GE => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
        TokenKind::LParen | TokenKind::Dot => Precedence::Postfix,
        _ => Precedence::Lowest,
    }
}

fn describe(kind: TokenKind) -> String {
    match kind {
        TokenKind::Ident => "an identifier".to_owned(),
        TokenKind::String => "a string literal".to_owned(),
        TokenKind::Int | TokenKind::Float => "a number".to_owned(),
        TokenKind::Eof | TokenKind::Illegal => kind.to_string(),
        punctuation => format!("'{}'", punctuation),
    }
}

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        Self {
            lexer,
            cur_token,
            peek_token,
        }
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> Result<Program> {
        let mut program = Program::default();

        while !self.cur_token.is(TokenKind::Eof) {
            program.statements.push(self.parse_statement()?);
            self.next_token();
        }

        tracing::debug!(statements = program.statements.len(), "parsed program");
        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur_token.kind {
            TokenKind::If => self.parse_if_statement().map(Statement::If),
            TokenKind::For => self.parse_for_statement().map(Statement::For),
            TokenKind::Obj => self.parse_obj_statement().map(Statement::Obj),
            kind if kind.is_type_keyword() => self.parse_decl_statement().map(Statement::Decl),
            TokenKind::Break => Ok(Statement::Break(self.parse_loop_control())),
            TokenKind::Continue => Ok(Statement::Continue(self.parse_loop_control())),
            // `name = ...` needs the second token to tell it apart from an expression
            TokenKind::Ident if self.peek_token.is(TokenKind::Assign) => {
                self.parse_assign_statement().map(Statement::Assign)
            }
            _ => self.parse_expression_statement().map(Statement::Expr),
        }
    }

    fn starts_statement(&self) -> bool {
        self.cur_token.kind.is_keyword()
            || (self.cur_token.is(TokenKind::Ident) && self.peek_token.is(TokenKind::Assign))
    }

    fn parse_loop_control(&mut self) -> LoopControl {
        let line = self.cur_token.line;
        self.skip_semicolon();
        LoopControl { line }
    }

    fn parse_assign_statement(&mut self) -> Result<AssignStatement> {
        let line = self.cur_token.line;
        let name = self.cur_token.text.clone();

        self.next_token();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(AssignStatement { name, value, line })
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement> {
        let line = self.cur_token.line;
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(ExpressionStatement { expression, line })
    }

    fn parse_if_statement(&mut self) -> Result<IfStatement> {
        let line = self.cur_token.line;
        let (condition, consequence) = self.parse_conditional_branch("if")?;

        let mut alternatives = vec![];
        while self.peek_token.is(TokenKind::Elif) {
            self.next_token();
            alternatives.push(self.parse_conditional_branch("elif")?);
        }

        let otherwise = if self.peek_token.is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace, "after 'else'")?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(IfStatement {
            condition,
            consequence,
            alternatives,
            otherwise,
            line,
        })
    }

    fn parse_conditional_branch(&mut self, keyword: &str) -> Result<(Expression, BlockStatement)> {
        self.expect_peek(TokenKind::LParen, &format!("after '{}'", keyword))?;
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::RParen, &format!("after {} condition", keyword))?;
        self.expect_peek(TokenKind::LBrace, &format!("to open the {} body", keyword))?;

        Ok((condition, self.parse_block_statement()?))
    }

    fn parse_for_statement(&mut self) -> Result<ForStatement> {
        let line = self.cur_token.line;

        self.expect_peek(TokenKind::LParen, "after 'for'")?;
        self.expect_peek(TokenKind::Ident, "for the loop variable")?;
        let iterator = self.cur_token.text.clone();
        self.expect_peek(TokenKind::Comma, "after the loop variable")?;
        self.next_token();

        let mut arguments = vec![self.parse_expression(Precedence::Lowest)?];
        while arguments.len() < 3 && self.peek_token.is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(TokenKind::RParen, "after the loop bounds")?;
        self.expect_peek(TokenKind::LBrace, "to open the loop body")?;
        let body = self.parse_block_statement()?;

        Ok(ForStatement {
            iterator,
            arguments,
            body,
            line,
        })
    }

    fn parse_obj_statement(&mut self) -> Result<ObjStatement> {
        let line = self.cur_token.line;

        self.expect_peek(TokenKind::LParen, "after 'obj'")?;
        self.expect_peek(TokenKind::String, "for the class name")?;
        let class_name = self.cur_token.text.clone();
        self.expect_peek(TokenKind::Comma, "after the class name")?;
        self.next_token();

        let id = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::RParen, "after the object id")?;
        self.expect_peek(TokenKind::LBrace, "to open the object body")?;
        let body = self.parse_block_statement()?;

        Ok(ObjStatement {
            class_name,
            id,
            body,
            line,
        })
    }

    fn parse_decl_statement(&mut self) -> Result<DeclStatement> {
        let line = self.cur_token.line;
        let declared_type = match self.cur_token.kind {
            TokenKind::Num => DeclType::Num,
            TokenKind::Str => DeclType::Str,
            TokenKind::Bool => DeclType::Bool,
            _ => return Err(self.error_at_current("expected a declared type")),
        };

        self.expect_peek(TokenKind::LParen, &format!("after '{}'", declared_type))?;
        self.expect_peek(TokenKind::Ident, "for the declared name")?;
        let name = self.cur_token.text.clone();
        self.expect_peek(TokenKind::RParen, "after the declared name")?;

        let init = if self.peek_token.is(TokenKind::LBrace) {
            self.next_token();
            self.parse_initializer()?
        } else {
            Initializer::Default
        };
        self.skip_semicolon();

        Ok(DeclStatement {
            declared_type,
            name,
            init,
            line,
        })
    }

    /// Called on the opening `{`. A lone expression becomes `Initializer::Expr`,
    /// anything longer becomes a block.
    fn parse_initializer(&mut self) -> Result<Initializer> {
        self.next_token();

        if self.cur_token.is(TokenKind::RBrace) {
            return Ok(Initializer::Default);
        }
        if self.starts_statement() {
            let statements = self.parse_statements_until_close()?;
            return Ok(Initializer::Block(statements.into()));
        }

        let line = self.cur_token.line;
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        if self.peek_token.is(TokenKind::RBrace) {
            self.next_token();
            return Ok(Initializer::Expr(expression));
        }

        let mut statements = vec![Statement::Expr(ExpressionStatement { expression, line })];
        self.next_token();
        statements.extend(self.parse_statements_until_close()?);

        Ok(Initializer::Block(statements.into()))
    }

    fn parse_block_statement(&mut self) -> Result<BlockStatement> {
        self.next_token();
        self.parse_statements_until_close().map(BlockStatement::from)
    }

    fn parse_statements_until_close(&mut self) -> Result<Vec<Statement>> {
        let mut statements = vec![];

        while !self.cur_token.is(TokenKind::RBrace) {
            if self.cur_token.is(TokenKind::Eof) {
                return Err(self.error_at_current("expected '}'"));
            }
            statements.push(self.parse_statement()?);
            self.next_token();
        }

        Ok(statements)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let mut left = self.parse_prefix()?;

        while precedence < precedence_of(self.peek_token.kind) {
            self.next_token();

            left = match self.cur_token.kind {
                TokenKind::LParen => self.parse_call_expression(left)?,
                TokenKind::Dot => self.parse_access_expression(left)?,
                _ => self.parse_infix_expression(left)?,
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        let line = self.cur_token.line;

        match self.cur_token.kind {
            TokenKind::Ident => Ok(match self.cur_token.text.as_str() {
                "true" => literal(LiteralValue::Boolean(true), line),
                "false" => literal(LiteralValue::Boolean(false), line),
                name => Expression::Identifier(Identifier {
                    name: name.to_owned(),
                    line,
                }),
            }),
            TokenKind::Int | TokenKind::Float => {
                let value = self
                    .cur_token
                    .text
                    .parse::<f64>()
                    .map_err(|_| self.error_at_current("invalid number literal"))?;
                let integer = self.cur_token.is(TokenKind::Int);
                Ok(literal(LiteralValue::Number { value, integer }, line))
            }
            TokenKind::String => Ok(literal(
                LiteralValue::String(self.cur_token.text.clone()),
                line,
            )),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::Illegal => {
                Err(self.error_at_current("unexpected character or unterminated string"))
            }
            _ => Err(self.error_at_current("expected an expression")),
        }
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let line = self.cur_token.line;
        let operator = self.current_operator()?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            operator,
            right: Box::new(right),
            line,
        }))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen, "to close the parenthesis")?;
        Ok(expression)
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let line = self.cur_token.line;
        let operator = self.current_operator()?;
        let precedence = precedence_of(self.cur_token.kind);

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            line,
        }))
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression> {
        let line = self.cur_token.line;
        let arguments = self.parse_call_arguments()?;

        Ok(Expression::Call(CallExpression {
            function: Box::new(function),
            arguments,
            line,
        }))
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut arguments = vec![];

        if self.peek_token.is(TokenKind::RParen) {
            self.next_token();
            return Ok(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(TokenKind::RParen, "after call arguments")?;
        Ok(arguments)
    }

    fn parse_access_expression(&mut self, target: Expression) -> Result<Expression> {
        let line = self.cur_token.line;
        self.expect_peek(TokenKind::Ident, "after '.'")?;

        Ok(Expression::Access(AccessExpression {
            target: Box::new(target),
            member: self.cur_token.text.clone(),
            line,
        }))
    }

    fn current_operator(&self) -> Result<Operator> {
        Operator::try_from(self.cur_token.kind)
            .map_err(|_| self.error_at_current("expected an operator"))
    }

    fn skip_semicolon(&mut self) {
        if self.peek_token.is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    fn expect_peek(&mut self, expected: TokenKind, context: &str) -> Result<()> {
        if self.peek_token.is(expected) {
            self.next_token();
            Ok(())
        } else {
            Err(self.peek_error(expected, context))
        }
    }

    fn peek_error(&self, expected: TokenKind, context: &str) -> ParseError {
        ParseError {
            message: format!("expected {} {}", describe(expected), context),
            line: self.peek_token.line,
            found: self.peek_token.text.clone(),
        }
    }

    fn error_at_current(&self, message: &str) -> ParseError {
        ParseError {
            message: message.to_owned(),
            line: self.cur_token.line,
            found: self.cur_token.text.clone(),
        }
    }
}

fn literal(value: LiteralValue, line: usize) -> Expression {
    Expression::Literal(Literal { value, line })
}
