use crate::token::TokenKind;
use custom_error::custom_error;

custom_error! {
    /// Errors collected while parsing. Every variant carries the offending
    /// token's 1-based line and column, and renders with the prefix the REPL
    /// prints verbatim.
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{line: usize, column: usize, expected: TokenKind, got: TokenKind}
        = "line {line}, col {column}: expected {expected}, got {got}",
    UnparsableToken{line: usize, column: usize, literal: String}
        = "line {line}, col {column}: unexpected token \"{literal}\"",
    UnexpectedEof{line: usize, column: usize}
        = "line {line}, col {column}: unexpected end of input",
    IntegerOverflow{line: usize, column: usize, literal: String}
        = "line {line}, col {column}: could not parse \"{literal}\" as integer",
    AdjacentValue{line: usize, column: usize, literal: String}
        = "line {line}, col {column}: expected an operator before \"{literal}\"",
    IllegalReturnTarget{line: usize, column: usize}
        = "line {line}, col {column}: -> must follow an expression",
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let err = ParseError::UnexpectedToken {
            line: 2,
            column: 7,
            expected: TokenKind::RParen,
            got: TokenKind::Newline,
        };
        assert_eq!(err.to_string(), "line 2, col 7: expected ), got newline");

        let err = ParseError::IntegerOverflow {
            line: 1,
            column: 1,
            literal: "99999999999999999999".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "line 1, col 1: could not parse \"99999999999999999999\" as integer"
        );
    }
}
