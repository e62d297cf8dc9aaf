//! Recursive-descent parser with one token of lookahead.
//!
//! Precedence, lowest first:
//!
//! ```text
//! expression := not_expr (("dan" | "atau") not_expr)*
//! not_expr   := "bukan" not_expr | comparison
//! comparison := arith (rel_op arith)?
//! arith      := term (("+" | "-") term)*
//! term       := unary (("*" | "/" | "%") unary)*
//! unary      := "-" unary | literal
//! literal    := "(" expression ")" | "benar" | "salah" | number | string | identifier
//! ```
//!
//! Evaluation walks the tree recursively, so the parser bounds how deep a
//! program can get: nested parentheses, unary operators, blocks and
//! `kalogak` links share [`MAX_NESTING`], and one statement-level
//! expression may hold at most [`MAX_OPERATORS`] operators.

use crate::ast::{BinaryOp, Expression, Statement, UnaryOp};
use crate::error::{Error, SyntaxError};
use crate::lexer::Lexer;
use crate::token::{Keyword, Symbol, Token, TokenKind};

pub type ParseResult<T> = Result<T, Error>;

/// Deepest allowed nesting of parentheses, unary operators and blocks.
pub const MAX_NESTING: usize = 200;

/// Most operators allowed in one statement-level expression.
pub const MAX_OPERATORS: usize = 1000;

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
    operators: usize,
    expression_line: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
            operators: 0,
            expression_line: 1,
        })
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::NestingTooDeep {
                limit: MAX_NESTING,
                line: self.current.line,
            }
            .into());
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Counts one operator node against the current expression.
    fn count_operator(&mut self) -> ParseResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(SyntaxError::ExpressionTooLarge {
                limit: MAX_OPERATORS,
                line: self.expression_line,
            }
            .into());
        }
        Ok(())
    }

    /// Moves to the next token and returns the one that was current.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, expected: &str) -> Error {
        let err = match &self.current.kind {
            TokenKind::Eof => SyntaxError::UnexpectedEof {
                expected: expected.to_string(),
                line: self.current.line,
            },
            found => SyntaxError::Expected {
                expected: expected.to_string(),
                found: found.to_string(),
                line: self.current.line,
            },
        };
        err.into()
    }

    fn consume_keyword(&mut self, keyword: Keyword) -> ParseResult<()> {
        if self.current.is_keyword(keyword) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", keyword)))
        }
    }

    fn consume_symbol(&mut self, symbol: Symbol) -> ParseResult<()> {
        if self.current.is_symbol(symbol) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", symbol)))
        }
    }

    fn consume_identifier(&mut self, what: &str) -> ParseResult<String> {
        if let TokenKind::Identifier(name) = &self.current.kind {
            let name = name.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(self.unexpected(what))
        }
    }

    fn parse_program(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while self.current.kind != TokenKind::Eof {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::Input) => self.parse_input(),
            TokenKind::Keyword(Keyword::Print) => self.parse_print(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            _ => self.parse_assignment_or_expression(),
        }
    }

    /// Parses statements until `yaudah`, `kalogak` or `lainnya`, which are
    /// left for the caller to consume.
    fn parse_block(&mut self, construct: &'static str, opened_at: usize) -> ParseResult<Statement> {
        self.enter()?;
        let mut statements = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::Keyword(Keyword::End | Keyword::ElseIf | Keyword::Else) => break,
                TokenKind::Eof => {
                    return Err(SyntaxError::MissingTerminator {
                        construct,
                        line: opened_at,
                    }
                    .into())
                }
                _ => statements.push(self.parse_statement()?),
            }
        }
        self.leave();
        Ok(Statement::Block(statements))
    }

    fn parse_if(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.consume_keyword(Keyword::If)?;
        self.parse_conditional(line)
    }

    /// Parses `condition block` and whatever follows it. A `kalogak` nests
    /// another conditional in the else slot; only the innermost link
    /// consumes the closing `yaudah`.
    fn parse_conditional(&mut self, line: usize) -> ParseResult<Statement> {
        let condition = self.parse_expression()?;
        let then_branch = self.parse_block("kalo", line)?;

        let else_branch = match self.current.kind {
            TokenKind::Keyword(Keyword::ElseIf) => {
                self.advance()?;
                self.enter()?;
                let link = self.parse_conditional(line)?;
                self.leave();
                link
            }
            TokenKind::Keyword(Keyword::Else) => {
                self.advance()?;
                let block = self.parse_block("kalo", line)?;
                self.consume_keyword(Keyword::End)?;
                block
            }
            TokenKind::Keyword(Keyword::End) => {
                self.advance()?;
                Statement::Empty
            }
            _ => return Err(self.unexpected("'yaudah'")),
        };

        Ok(Statement::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn parse_for(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.consume_keyword(Keyword::For)?;
        let variable = self.consume_identifier("loop variable after 'ulangin'")?;
        self.consume_keyword(Keyword::RangeStart)?;
        let start = self.parse_expression()?;
        self.consume_keyword(Keyword::RangeEnd)?;
        let end = self.parse_expression()?;
        let body = self.parse_block("ulangin", line)?;
        self.consume_keyword(Keyword::End)?;
        Ok(Statement::ForRange {
            variable,
            start,
            end,
            body: Box::new(body),
        })
    }

    fn parse_while(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.consume_keyword(Keyword::While)?;
        let condition = self.parse_expression()?;
        let body = self.parse_block("selama", line)?;
        self.consume_keyword(Keyword::End)?;
        Ok(Statement::While {
            condition,
            body: Box::new(body),
        })
    }

    fn parse_input(&mut self) -> ParseResult<Statement> {
        self.consume_keyword(Keyword::Input)?;
        let target = self.consume_identifier("identifier after 'baca'")?;
        Ok(Statement::Input { target })
    }

    fn parse_print(&mut self) -> ParseResult<Statement> {
        self.consume_keyword(Keyword::Print)?;
        let value = self.parse_expression()?;
        Ok(Statement::Print { value })
    }

    fn parse_assignment_or_expression(&mut self) -> ParseResult<Statement> {
        let expr = self.parse_expression()?;
        if !self.current.is_keyword(Keyword::Assign) {
            return Ok(Statement::Expression(expr));
        }

        match expr {
            Expression::Variable(target) => {
                self.advance()?;
                let value = self.parse_expression()?;
                Ok(Statement::Assignment { target, value })
            }
            _ => Err(SyntaxError::Expected {
                expected: "identifier before 'itu'".to_string(),
                found: "expression".to_string(),
                line: self.current.line,
            }
            .into()),
        }
    }

    /// Parses a complete expression, resetting the operator budget.
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.operators = 0;
        self.expression_line = self.current.line;
        self.parse_logical()
    }

    fn parse_logical(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_not()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Keyword(Keyword::And) => BinaryOp::And,
                TokenKind::Keyword(Keyword::Or) => BinaryOp::Or,
                _ => return Ok(left),
            };
            self.count_operator()?;
            self.advance()?;
            let right = self.parse_not()?;
            left = Expression::binary(op, left, right);
        }
    }

    fn parse_not(&mut self) -> ParseResult<Expression> {
        if self.current.is_keyword(Keyword::Not) {
            self.count_operator()?;
            self.advance()?;
            self.enter()?;
            let operand = self.parse_not()?;
            self.leave();
            return Ok(Expression::unary(UnaryOp::Not, operand));
        }
        self.parse_comparison()
    }

    fn relational_op(&self) -> Option<BinaryOp> {
        match self.current.kind {
            TokenKind::Symbol(Symbol::Greater) => Some(BinaryOp::GreaterThan),
            TokenKind::Symbol(Symbol::GreaterEquals) => Some(BinaryOp::GreaterOrEqual),
            TokenKind::Symbol(Symbol::Less) => Some(BinaryOp::LessThan),
            TokenKind::Symbol(Symbol::LessEquals) => Some(BinaryOp::LessOrEqual),
            TokenKind::Symbol(Symbol::DoubleEquals) => Some(BinaryOp::Equal),
            TokenKind::Symbol(Symbol::NotEquals) => Some(BinaryOp::NotEqual),
            _ => None,
        }
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let left = self.parse_arith()?;
        let Some(op) = self.relational_op() else {
            return Ok(left);
        };
        self.count_operator()?;
        self.advance()?;
        let right = self.parse_arith()?;
        if self.relational_op().is_some() {
            return Err(SyntaxError::ChainedComparison {
                line: self.current.line,
            }
            .into());
        }
        Ok(Expression::binary(op, left, right))
    }

    fn parse_arith(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Symbol(Symbol::Plus) => BinaryOp::Add,
                TokenKind::Symbol(Symbol::Minus) => BinaryOp::Subtract,
                _ => return Ok(left),
            };
            self.count_operator()?;
            self.advance()?;
            let right = self.parse_term()?;
            left = Expression::binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Symbol(Symbol::Star) => BinaryOp::Multiply,
                TokenKind::Symbol(Symbol::Slash) => BinaryOp::Divide,
                TokenKind::Symbol(Symbol::Percent) => BinaryOp::Modulo,
                _ => return Ok(left),
            };
            self.count_operator()?;
            self.advance()?;
            let right = self.parse_unary()?;
            left = Expression::binary(op, left, right);
        }
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if self.current.is_symbol(Symbol::Minus) {
            self.count_operator()?;
            self.advance()?;
            self.enter()?;
            let operand = self.parse_unary()?;
            self.leave();
            return Ok(Expression::unary(UnaryOp::Negate, operand));
        }
        self.parse_literal()
    }

    fn parse_literal(&mut self) -> ParseResult<Expression> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.unexpected("expression"));
        }

        let token = self.advance()?;
        match token.kind {
            TokenKind::Symbol(Symbol::LParen) => {
                self.enter()?;
                let expr = self.parse_logical()?;
                self.consume_symbol(Symbol::RParen)?;
                self.leave();
                Ok(expr)
            }
            TokenKind::Keyword(Keyword::True) => Ok(Expression::Bool(true)),
            TokenKind::Keyword(Keyword::False) => Ok(Expression::Bool(false)),
            TokenKind::Number(text) => match text.parse::<f64>() {
                Ok(n) => Ok(Expression::Number(n)),
                Err(_) => Err(SyntaxError::InvalidNumber {
                    text,
                    line: token.line,
                }
                .into()),
            },
            TokenKind::Str(s) => Ok(Expression::Str(s)),
            TokenKind::Identifier(name) => Ok(Expression::Variable(name)),
            found => Err(SyntaxError::Expected {
                expected: "expression".to_string(),
                found: found.to_string(),
                line: token.line,
            }
            .into()),
        }
    }
}

/// Parses `source` into its top-level statement list.
pub fn parse(source: &str) -> ParseResult<Vec<Statement>> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}
