mod declaration;
mod expression;
mod statement;
pub use declaration::*;
pub use expression::*;
pub use statement::*;

use crate::token::{Token, TokenKind};
use std::fmt::{Display, Formatter};
use strum_macros::Display as StrumDisplay;

#[derive(Debug, Clone)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

impl From<Program> for Node {
    fn from(program: Program) -> Self {
        Self::Program(program)
    }
}

impl From<Statement> for Node {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

impl From<Expression> for Node {
    fn from(expression: Expression) -> Self {
        Self::Expression(expression)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<Token> for Identifier {
    fn from(token: Token) -> Self {
        let value = token.literal.clone();
        Self { token, value }
    }
}

/// The operators the parser can place in prefix and infix nodes. Displays as
/// the source spelling, which is also what evaluation errors print.
#[derive(Debug, StrumDisplay, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "<")]
    LessThan,
    #[strum(serialize = ">")]
    MoreThan,
    #[strum(serialize = "<=")]
    LessOrEqual,
    #[strum(serialize = ">=")]
    MoreOrEqual,
    #[strum(serialize = "==")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
}

impl From<TokenKind> for Operator {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Not => Self::Not,
            TokenKind::Minus => Self::Minus,
            TokenKind::Plus => Self::Plus,
            TokenKind::Multiply => Self::Multiply,
            TokenKind::Divide => Self::Divide,
            TokenKind::LessThan => Self::LessThan,
            TokenKind::MoreThan => Self::MoreThan,
            TokenKind::LessOrEqual => Self::LessOrEqual,
            TokenKind::MoreOrEqual => Self::MoreOrEqual,
            TokenKind::Equal => Self::Equal,
            TokenKind::NotEqual => Self::NotEqual,
            _ => panic!("converting non-operator token {} to operator", kind),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let program = Program {
            statements: vec![Statement::Value(ValueStatement {
                token: Token::new(TokenKind::Ident, "myVar", 1, 1),
                name: Token::new(TokenKind::Ident, "myVar", 1, 1).into(),
                value: Expression::Identifier(Identifier {
                    token: Token::new(TokenKind::Ident, "anotherVar", 9, 1),
                    value: "anotherVar".to_owned(),
                }),
            })],
        };

        assert_eq!(format!("{}", program), "myVar = anotherVar");
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(Operator::from(TokenKind::Plus).to_string(), "+");
        assert_eq!(Operator::from(TokenKind::NotEqual).to_string(), "!=");
        assert_eq!(Operator::from(TokenKind::LessOrEqual).to_string(), "<=");
    }
}
