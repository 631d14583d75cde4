use strum_macros::Display;

/// The closed set of token kinds the lexer can emit. The serialized form is
/// what parse errors print, so operator kinds spell their source text and the
/// rest use their canonical upper-case names.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[strum(serialize = "ILLEGAL")]
    Illegal,
    #[strum(serialize = "EOF")]
    Eof,

    // Identifiers and literals
    #[strum(serialize = "IDENT")]
    Ident,
    #[strum(serialize = "INT")]
    Int,
    #[strum(serialize = "STRING")]
    String,

    // Delimiters
    #[strum(serialize = "{")]
    LBrace,
    #[strum(serialize = "}")]
    RBrace,
    #[strum(serialize = "(")]
    LParen,
    #[strum(serialize = ")")]
    RParen,
    #[strum(serialize = "[")]
    LBrack,
    #[strum(serialize = "]")]
    RBrack,
    #[strum(serialize = ".")]
    Stop,
    #[strum(serialize = ",")]
    Comma,
    #[strum(serialize = ";")]
    Semicolon,
    #[strum(serialize = ":")]
    Colon,

    // Operators
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "++")]
    Increment,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "--")]
    Decrement,
    #[strum(serialize = "=")]
    Assign,
    #[strum(serialize = "-=")]
    MinusAssign,
    #[strum(serialize = "+=")]
    PlusAssign,
    #[strum(serialize = "==")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
    #[strum(serialize = "->")]
    Passthrough,
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "?")]
    Question,
    #[strum(serialize = "<")]
    LessThan,
    #[strum(serialize = "<=")]
    LessOrEqual,
    #[strum(serialize = ">")]
    MoreThan,
    #[strum(serialize = ">=")]
    MoreOrEqual,
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,

    #[strum(serialize = "newline")]
    Newline,

    // Keywords
    #[strum(serialize = "METHOD")]
    Method,
    #[strum(serialize = "FOR")]
    For,
    #[strum(serialize = "IF")]
    If,
    #[strum(serialize = "ELSE")]
    Else,
    #[strum(serialize = "DESCRIBE")]
    Describe,
    #[strum(serialize = "OBJECT")]
    Object,
    #[strum(serialize = "OVERLOAD")]
    Overload,
    #[strum(serialize = "IN")]
    In,
    #[strum(serialize = "ERROR")]
    Error,
    #[strum(serialize = "TRUE")]
    True,
    #[strum(serialize = "FALSE")]
    False,
}

impl TokenKind {
    /// Keyword table consulted after an identifier run has been scanned.
    pub fn lookup_ident(literal: &str) -> Self {
        match literal {
            "meth" => Self::Method,
            "for" => Self::For,
            "if" => Self::If,
            "else" => Self::Else,
            "describe" => Self::Describe,
            "object" => Self::Object,
            "overload" => Self::Overload,
            "in" => Self::In,
            "error" => Self::Error,
            "true" => Self::True,
            "false" => Self::False,
            _ => Self::Ident,
        }
    }
}

/// A single lexed token. `literal` is the verbatim source slice (minus the
/// delimiting quotes for strings), `column` the 1-based byte column where
/// scanning began, `line` the 1-based line active at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub column: usize,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, column: usize, line: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            column,
            line,
        }
    }

    pub fn eof(column: usize, line: usize) -> Self {
        Self::new(TokenKind::Eof, "", column, line)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        let cases = [
            ("meth", TokenKind::Method),
            ("for", TokenKind::For),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("describe", TokenKind::Describe),
            ("object", TokenKind::Object),
            ("overload", TokenKind::Overload),
            ("in", TokenKind::In),
            ("error", TokenKind::Error),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("guitar", TokenKind::Ident),
            ("methodical", TokenKind::Ident),
        ];

        for (literal, kind) in cases.iter() {
            assert_eq!(TokenKind::lookup_ident(literal), *kind);
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::Passthrough.to_string(), "->");
        assert_eq!(TokenKind::PlusAssign.to_string(), "+=");
        assert_eq!(TokenKind::Ident.to_string(), "IDENT");
        assert_eq!(TokenKind::Newline.to_string(), "newline");
    }
}
