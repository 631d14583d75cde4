use super::{BlockStatement, Identifier};
use crate::token::Token;
use std::fmt::{Display, Formatter};

/// Top-level named bindings. Only `meth` declarations carry behavior;
/// `describe` and `object` are reserved words that parse to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Method(FuncDeclaration),
    Reserved(ReservedDeclaration),
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Method(decl) => write!(f, "{}", decl),
            Self::Reserved(decl) => write!(f, "{}", decl),
        }
    }
}

/// `meth name: a, b { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDeclaration {
    pub token: Token,
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl Display for FuncDeclaration {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.parameters.is_empty() {
            return write!(f, "meth {} {}", self.name, self.body);
        }
        let parameters: Vec<String> = self.parameters.iter().map(Identifier::to_string).collect();
        write!(f, "meth {}: {} {}", self.name, parameters.join(", "), self.body)
    }
}

/// A declaration introduced by a reserved keyword (`describe`, `object`).
/// The name is recorded, any body is consumed and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedDeclaration {
    pub token: Token,
    pub name: Identifier,
}

impl Display for ReservedDeclaration {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.token.literal, self.name)
    }
}
