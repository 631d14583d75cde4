use crate::ast::{
    self, BlockStatement, Declaration, DeclarationStatement, Expression, FuncDeclaration,
    Identifier, Operator, Statement,
};
use crate::lexer::Lexer;
use crate::parse_error::ParseError;
use crate::token::{Token, TokenKind};
use std::collections::HashMap;

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Postfix,
    Equals,
    LessMore,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Passthrough => Precedence::Postfix,
        TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::LessOrEqual
        | TokenKind::MoreOrEqual => Precedence::Equals,
        TokenKind::LessThan | TokenKind::MoreThan => Precedence::LessMore,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Multiply | TokenKind::Divide => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBrack => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Tokens that terminate the Pratt loop before precedence is even consulted.
fn ends_expression(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Semicolon | TokenKind::Newline | TokenKind::Eof | TokenKind::Passthrough
    )
}

fn is_primary(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Ident | TokenKind::Int | TokenKind::String)
}

pub struct Parser {
    lexer: Lexer,
    errors: Vec<ParseError>,

    cur_token: Token,
    peek_token: Token,

    prefix_parse_fns: HashMap<TokenKind, PrefixParseFn>,
    infix_parse_fns: HashMap<TokenKind, InfixParseFn>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Self {
            lexer,
            cur_token,
            peek_token,
            errors: Default::default(),
            prefix_parse_fns: Default::default(),
            infix_parse_fns: Default::default(),
        };

        parser.register_prefix(TokenKind::Ident, Self::parse_identifier);
        parser.register_prefix(TokenKind::Int, Self::parse_int_literal);
        parser.register_prefix(TokenKind::String, Self::parse_string_literal);
        parser.register_prefix(TokenKind::True, Self::parse_boolean);
        parser.register_prefix(TokenKind::False, Self::parse_boolean);
        parser.register_prefix(TokenKind::Not, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::LParen, Self::parse_grouped_expression);
        parser.register_prefix(TokenKind::LBrack, Self::parse_array_literal);
        parser.register_prefix(TokenKind::LBrace, Self::parse_hash_literal);
        parser.register_prefix(TokenKind::If, Self::parse_if_expression);
        parser.register_prefix(TokenKind::Method, Self::parse_method_literal);

        parser.register_infix(TokenKind::Plus, Self::parse_infix_expression);
        parser.register_infix(TokenKind::Minus, Self::parse_infix_expression);
        parser.register_infix(TokenKind::Multiply, Self::parse_infix_expression);
        parser.register_infix(TokenKind::Divide, Self::parse_infix_expression);
        parser.register_infix(TokenKind::Equal, Self::parse_infix_expression);
        parser.register_infix(TokenKind::NotEqual, Self::parse_infix_expression);
        parser.register_infix(TokenKind::LessThan, Self::parse_infix_expression);
        parser.register_infix(TokenKind::MoreThan, Self::parse_infix_expression);
        parser.register_infix(TokenKind::LessOrEqual, Self::parse_infix_expression);
        parser.register_infix(TokenKind::MoreOrEqual, Self::parse_infix_expression);
        parser.register_infix(TokenKind::LParen, Self::parse_call_expression);
        parser.register_infix(TokenKind::LBrack, Self::parse_index_expression);

        parser
    }

    fn register_prefix(&mut self, kind: TokenKind, func: PrefixParseFn) {
        self.prefix_parse_fns.insert(kind, func);
    }

    fn register_infix(&mut self, kind: TokenKind, func: InfixParseFn) {
        self.infix_parse_fns.insert(kind, func);
    }

    fn next_token(&mut self) {
        self.cur_token = self.peek_token.clone();
        self.peek_token = self.lexer.next_token();
    }

    pub fn parse_program(mut self) -> Result<ast::Program, Vec<ParseError>> {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenKind::Eof) {
            if self.cur_token.is(TokenKind::Newline) || self.cur_token.is(TokenKind::Semicolon) {
                self.next_token();
                continue;
            }
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(self.errors)
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.kind {
            TokenKind::Ident if self.peek_token.is(TokenKind::Assign) => {
                self.parse_value_statement()
            }
            TokenKind::Method | TokenKind::Describe | TokenKind::Object
                if self.peek_token.is(TokenKind::Ident) =>
            {
                self.parse_declaration_statement()
            }
            TokenKind::Passthrough => {
                self.errors.push(ParseError::IllegalReturnTarget {
                    line: self.cur_token.line,
                    column: self.cur_token.column,
                });
                None
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_value_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let name: Identifier = self.cur_token.clone().into();

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.found_adjacent_value() {
            return None;
        }
        if self.peek_token.is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Value(ast::ValueStatement { token, name, value }))
    }

    fn parse_declaration_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let declaration = match token.kind {
            TokenKind::Method => self.parse_func_declaration()?,
            _ => self.parse_reserved_declaration()?,
        };

        Some(Statement::Declaration(DeclarationStatement {
            token,
            declaration,
        }))
    }

    fn parse_func_declaration(&mut self) -> Option<Declaration> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name: Identifier = self.cur_token.clone().into();

        let parameters = if self.peek_token.is(TokenKind::Colon) {
            self.next_token();
            self.parse_method_parameters()?
        } else {
            Vec::new()
        };

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Declaration::Method(FuncDeclaration {
            token,
            name,
            parameters,
            body,
        }))
    }

    /// `describe` and `object` are reserved: the name (and any parameter list
    /// and body) is consumed so parsing can continue, but only a placeholder
    /// lands in the tree.
    fn parse_reserved_declaration(&mut self) -> Option<Declaration> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name: Identifier = self.cur_token.clone().into();

        if self.peek_token.is(TokenKind::Colon) {
            self.next_token();
            self.parse_method_parameters()?;
        }
        if self.peek_token.is(TokenKind::LBrace) {
            self.next_token();
            self.parse_block_statement();
        }

        Some(Declaration::Reserved(ast::ReservedDeclaration {
            token,
            name,
        }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();

        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.found_adjacent_value() {
            return None;
        }

        if self.peek_token.is(TokenKind::Passthrough) {
            self.next_token();
            return Some(Statement::Return(ast::ReturnStatement {
                token,
                value: expression,
            }));
        }

        if self.peek_token.is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Expr(ast::ExpressionStatement { token, expression }))
    }

    /// Two primary tokens with no operator between them cannot be one
    /// expression; the error points at the second token.
    fn found_adjacent_value(&mut self) -> bool {
        if is_primary(self.cur_token.kind) && is_primary(self.peek_token.kind) {
            self.errors.push(ParseError::AdjacentValue {
                line: self.peek_token.line,
                column: self.peek_token.column,
                literal: self.peek_token.literal.clone(),
            });
            return true;
        }
        false
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match self.prefix_parse_fns.get(&self.cur_token.kind) {
            Some(prefix) => *prefix,
            None => {
                self.no_prefix_parser_error();
                return None;
            }
        };

        let mut left = prefix(self)?;

        // A block-bodied if can stand directly before another statement on
        // the same line (`if c { (1)-> } (2)->`), so nothing may attach to
        // it in infix position.
        if let Expression::If(_) = left {
            return Some(left);
        }

        while !ends_expression(self.peek_token.kind) && precedence < self.peek_precedence() {
            let infix = match self.infix_parse_fns.get(&self.peek_token.kind) {
                Some(infix) => *infix,
                None => return Some(left),
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn no_prefix_parser_error(&mut self) {
        let error = if self.cur_token.is(TokenKind::Eof) {
            ParseError::UnexpectedEof {
                line: self.cur_token.line,
                column: self.cur_token.column,
            }
        } else {
            ParseError::UnparsableToken {
                line: self.cur_token.line,
                column: self.cur_token.column,
                literal: self.cur_token.literal.clone(),
            }
        };
        self.errors.push(error);
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.clone().into()))
    }

    fn parse_int_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntLiteral(ast::IntLiteral { token, value })),
            Err(_) => {
                self.errors.push(ParseError::IntegerOverflow {
                    line: token.line,
                    column: token.column,
                    literal: token.literal,
                });
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let value = token.literal.clone();
        Some(Expression::StringLiteral(ast::StringLiteral { token, value }))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token.clone().into()))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = Operator::from(token.kind);

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(ast::PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = Operator::from(token.kind);
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(ast::InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        expression
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenKind::RBrack)?;

        Some(Expression::Array(ast::ArrayLiteral { token, elements }))
    }

    /// Hash literals are the one place interior newlines are legal: after the
    /// opening brace, around each comma, and before the closing brace.
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let mut pairs = Vec::new();

        while !self.peek_token.is(TokenKind::RBrace) {
            self.skip_peek_newlines();
            if self.peek_token.is(TokenKind::RBrace) {
                break;
            }

            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            self.skip_peek_newlines();
            if !self.peek_token.is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expression::HashMap(ast::HashMapLiteral { token, pairs }))
    }

    fn skip_peek_newlines(&mut self) {
        while self.peek_token.is(TokenKind::Newline) {
            self.next_token();
        }
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token.is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(ast::IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// `meth` in expression position: `meth: x, y { ... }` or a bare
    /// `meth { ... }` with no parameters.
    fn parse_method_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        let parameters = if self.peek_token.is(TokenKind::Colon) {
            self.next_token();
            self.parse_method_parameters()?
        } else {
            Vec::new()
        };

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function(ast::FuncLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_method_parameters(&mut self) -> Option<Vec<Identifier>> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }

        let mut parameters: Vec<Identifier> = vec![self.cur_token.clone().into()];

        while self.peek_token.is(TokenKind::Comma) {
            self.next_token();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            parameters.push(self.cur_token.clone().into());
        }

        Some(parameters)
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.cur_token.is(TokenKind::RBrace) {
            if self.cur_token.is(TokenKind::Eof) {
                self.errors.push(ParseError::UnexpectedToken {
                    line: self.cur_token.line,
                    column: self.cur_token.column,
                    expected: TokenKind::RBrace,
                    got: TokenKind::Eof,
                });
                break;
            }
            if self.cur_token.is(TokenKind::Newline) || self.cur_token.is(TokenKind::Semicolon) {
                self.next_token();
                continue;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let args = self.parse_expression_list(TokenKind::RParen)?;

        Some(Expression::Call(ast::CallExpression {
            token,
            function: Box::new(function),
            args,
        }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RBrack) {
            return None;
        }

        Some(Expression::Index(ast::IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur_token.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek_token.kind)
    }

    fn expect_peek(&mut self, expected: TokenKind) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.errors.push(ParseError::UnexpectedToken {
            line: self.peek_token.line,
            column: self.peek_token.column,
            expected,
            got: self.peek_token.kind,
        });
    }
}
