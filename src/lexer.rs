use crate::token::{Token, TokenKind};

/// Byte cursor over UTF-8 source. `ch` is the byte under the cursor, 0 once
/// the input is exhausted. `line_start` is the byte offset of the first
/// character of the current line, which keeps column arithmetic O(1).
pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
    line: usize,
    line_start: usize,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn is_cluster_char(c: u8) -> bool {
    matches!(c, b'+' | b'-' | b'=' | b'<' | b'>' | b'|' | b'&' | b'!')
}

/// Exact-match table for operator clusters. Anything else is not an operator.
fn cluster_kind(cluster: &str) -> Option<TokenKind> {
    let kind = match cluster {
        "=" => TokenKind::Assign,
        "==" => TokenKind::Equal,
        "!" => TokenKind::Not,
        "!=" => TokenKind::NotEqual,
        "<" => TokenKind::LessThan,
        "<=" => TokenKind::LessOrEqual,
        ">" => TokenKind::MoreThan,
        ">=" => TokenKind::MoreOrEqual,
        "+" => TokenKind::Plus,
        "++" => TokenKind::Increment,
        "+=" => TokenKind::PlusAssign,
        "-" => TokenKind::Minus,
        "--" => TokenKind::Decrement,
        "-=" => TokenKind::MinusAssign,
        "->" => TokenKind::Passthrough,
        "&&" => TokenKind::And,
        "||" => TokenKind::Or,
        _ => return None,
    };
    Some(kind)
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            line_start: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn column(&self) -> usize {
        self.position - self.line_start + 1
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let column = self.column();
        let line = self.line;

        let token = match self.ch {
            0 => return Token::eof(column, line),
            b'\n' | b'\r' => {
                let token = Token::new(TokenKind::Newline, (self.ch as char).to_string(), column, line);
                self.read_char();
                self.line += 1;
                self.line_start = self.position;
                return token;
            }
            b'"' => return self.read_string(column, line),
            b'{' => Token::new(TokenKind::LBrace, "{", column, line),
            b'}' => Token::new(TokenKind::RBrace, "}", column, line),
            b'(' => Token::new(TokenKind::LParen, "(", column, line),
            b')' => Token::new(TokenKind::RParen, ")", column, line),
            b'[' => Token::new(TokenKind::LBrack, "[", column, line),
            b']' => Token::new(TokenKind::RBrack, "]", column, line),
            b',' => Token::new(TokenKind::Comma, ",", column, line),
            b'.' => Token::new(TokenKind::Stop, ".", column, line),
            b';' => Token::new(TokenKind::Semicolon, ";", column, line),
            b':' => Token::new(TokenKind::Colon, ":", column, line),
            b'?' => Token::new(TokenKind::Question, "?", column, line),
            b'*' => Token::new(TokenKind::Multiply, "*", column, line),
            b'/' => Token::new(TokenKind::Divide, "/", column, line),
            c if is_cluster_char(c) => return self.read_operator(column, line),
            c if is_letter(c) => {
                let literal = self.read_identifier().to_owned();
                return Token::new(TokenKind::lookup_ident(&literal), literal, column, line);
            }
            c if c.is_ascii_digit() => {
                let literal = self.read_number().to_owned();
                return Token::new(TokenKind::Int, literal, column, line);
            }
            c => Token::new(TokenKind::Illegal, (c as char).to_string(), column, line),
        };
        self.read_char();
        token
    }

    /// Scans the maximal run of operator characters and emits the longest
    /// prefix found in the cluster table, leaving the rest of the run for the
    /// next call. A run with no recognized prefix is one ILLEGAL token.
    fn read_operator(&mut self, column: usize, line: usize) -> Token {
        let start = self.position;
        let mut end = start;
        let bytes = self.input.as_bytes();
        while end < bytes.len() && is_cluster_char(bytes[end]) {
            end += 1;
        }
        let run = &self.input[start..end];

        let matched = (1..=run.len())
            .rev()
            .find_map(|len| cluster_kind(&run[..len]).map(|kind| (len, kind)));

        let (len, kind) = match matched {
            Some((len, kind)) => (len, kind),
            None => (run.len(), TokenKind::Illegal),
        };

        let literal = run[..len].to_owned();
        for _ in 0..len {
            self.read_char();
        }
        Token::new(kind, literal, column, line)
    }

    /// Consumes a double-quoted string. The literal excludes the delimiting
    /// quotes; a quote preceded by a backslash does not close the string and
    /// both bytes are kept (escape interpretation is not the lexer's job).
    /// Reaching end of input first yields ILLEGAL.
    fn read_string(&mut self, column: usize, line: usize) -> Token {
        self.read_char();
        let start = self.position;

        loop {
            match self.ch {
                0 => {
                    let literal = self.input[start..self.position].to_owned();
                    return Token::new(TokenKind::Illegal, literal, column, line);
                }
                b'"' if self.position == start
                    || self.input.as_bytes()[self.position - 1] != b'\\' =>
                {
                    break;
                }
                _ => self.read_char(),
            }
        }

        let literal = self.input[start..self.position].to_owned();
        self.read_char();
        Token::new(TokenKind::String, literal, column, line)
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_ident_char(self.ch) {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn skip_whitespace(&mut self) {
        while self.ch == b' ' || self.ch == b'\t' {
            self.read_char();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::TokenKind::*;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input.to_owned()).collect()
    }

    fn assert_tokens(input: &str, expect: &[(TokenKind, &str, usize, usize)]) {
        let tokens = lex(input);
        let expect: Vec<Token> = expect
            .iter()
            .map(|(kind, literal, column, line)| Token::new(*kind, *literal, *column, *line))
            .collect();
        assert_eq!(tokens, expect, "input: {:?}", input);
    }

    #[test]
    fn test_entrypoint() {
        assert_tokens(
            "meth main {\n}",
            &[
                (Method, "meth", 1, 1),
                (Ident, "main", 6, 1),
                (LBrace, "{", 11, 1),
                (Newline, "\n", 12, 1),
                (RBrace, "}", 1, 2),
            ],
        );
    }

    #[test]
    fn test_passthrough_return() {
        assert_tokens(
            "meth main {\n\t(1)->\n}",
            &[
                (Method, "meth", 1, 1),
                (Ident, "main", 6, 1),
                (LBrace, "{", 11, 1),
                (Newline, "\n", 12, 1),
                (LParen, "(", 2, 2),
                (Int, "1", 3, 2),
                (RParen, ")", 4, 2),
                (Passthrough, "->", 5, 2),
                (Newline, "\n", 7, 2),
                (RBrace, "}", 1, 3),
            ],
        );
    }

    #[test]
    fn test_value_assignment() {
        assert_tokens(
            "meth main {\n\tnum = 0\n\t(num)->\n}",
            &[
                (Method, "meth", 1, 1),
                (Ident, "main", 6, 1),
                (LBrace, "{", 11, 1),
                (Newline, "\n", 12, 1),
                (Ident, "num", 2, 2),
                (Assign, "=", 6, 2),
                (Int, "0", 8, 2),
                (Newline, "\n", 9, 2),
                (LParen, "(", 2, 3),
                (Ident, "num", 3, 3),
                (RParen, ")", 6, 3),
                (Passthrough, "->", 7, 3),
                (Newline, "\n", 9, 3),
                (RBrace, "}", 1, 4),
            ],
        );
    }

    #[test]
    fn test_increment_operators() {
        assert_tokens(
            "num++\nnum += 2",
            &[
                (Ident, "num", 1, 1),
                (Increment, "++", 4, 1),
                (Newline, "\n", 6, 1),
                (Ident, "num", 1, 2),
                (PlusAssign, "+=", 5, 2),
                (Int, "2", 8, 2),
            ],
        );
    }

    #[test]
    fn test_decrement_operators() {
        assert_tokens(
            "num--\nnum -= 2",
            &[
                (Ident, "num", 1, 1),
                (Decrement, "--", 4, 1),
                (Newline, "\n", 6, 1),
                (Ident, "num", 1, 2),
                (MinusAssign, "-=", 5, 2),
                (Int, "2", 8, 2),
            ],
        );
    }

    #[test]
    fn test_string_literal() {
        assert_tokens(
            "meth main {\n\tstr = \"Hello, World!\"\n\t(str)->\n}",
            &[
                (Method, "meth", 1, 1),
                (Ident, "main", 6, 1),
                (LBrace, "{", 11, 1),
                (Newline, "\n", 12, 1),
                (Ident, "str", 2, 2),
                (Assign, "=", 6, 2),
                (String, "Hello, World!", 8, 2),
                (Newline, "\n", 23, 2),
                (LParen, "(", 2, 3),
                (Ident, "str", 3, 3),
                (RParen, ")", 6, 3),
                (Passthrough, "->", 7, 3),
                (Newline, "\n", 9, 3),
                (RBrace, "}", 1, 4),
            ],
        );
    }

    #[test]
    fn test_escaped_quote_stays_in_literal() {
        assert_tokens(
            "str = \"\\\"Hello, World!\\\"\"",
            &[
                (Ident, "str", 1, 1),
                (Assign, "=", 5, 1),
                (String, "\\\"Hello, World!\\\"", 7, 1),
            ],
        );
    }

    #[test]
    fn test_and_or_operators() {
        assert_tokens(
            "if a == 2 * 2 && !b {\n}\nif a == 2 * 2 || !b {\n}",
            &[
                (If, "if", 1, 1),
                (Ident, "a", 4, 1),
                (Equal, "==", 6, 1),
                (Int, "2", 9, 1),
                (Multiply, "*", 11, 1),
                (Int, "2", 13, 1),
                (And, "&&", 15, 1),
                (Not, "!", 18, 1),
                (Ident, "b", 19, 1),
                (LBrace, "{", 21, 1),
                (Newline, "\n", 22, 1),
                (RBrace, "}", 1, 2),
                (Newline, "\n", 2, 2),
                (If, "if", 1, 3),
                (Ident, "a", 4, 3),
                (Equal, "==", 6, 3),
                (Int, "2", 9, 3),
                (Multiply, "*", 11, 3),
                (Int, "2", 13, 3),
                (Or, "||", 15, 3),
                (Not, "!", 18, 3),
                (Ident, "b", 19, 3),
                (LBrace, "{", 21, 3),
                (Newline, "\n", 22, 3),
                (RBrace, "}", 1, 4),
            ],
        );
    }

    #[test]
    fn test_full_method() {
        let input = "meth NewGuitar: tuning {
\tguitar = Guitar->new
\ttuning = tuning->toUpper
\tif !inValidTunings(tuning) {
\t\t(error: \"{tuning} is not a valid tuning\")->
\t}
\tfor i, t in array {
\t\tif t->len == 1 {
\t\t\tt = \" \" + t
\t\t}
\t\tguitar.Tuning[i+1] = t
\t}
\t(guitar)->
}";
        assert_tokens(
            input,
            &[
                (Method, "meth", 1, 1),
                (Ident, "NewGuitar", 6, 1),
                (Colon, ":", 15, 1),
                (Ident, "tuning", 17, 1),
                (LBrace, "{", 24, 1),
                (Newline, "\n", 25, 1),
                (Ident, "guitar", 2, 2),
                (Assign, "=", 9, 2),
                (Ident, "Guitar", 11, 2),
                (Passthrough, "->", 17, 2),
                (Ident, "new", 19, 2),
                (Newline, "\n", 22, 2),
                (Ident, "tuning", 2, 3),
                (Assign, "=", 9, 3),
                (Ident, "tuning", 11, 3),
                (Passthrough, "->", 17, 3),
                (Ident, "toUpper", 19, 3),
                (Newline, "\n", 26, 3),
                (If, "if", 2, 4),
                (Not, "!", 5, 4),
                (Ident, "inValidTunings", 6, 4),
                (LParen, "(", 20, 4),
                (Ident, "tuning", 21, 4),
                (RParen, ")", 27, 4),
                (LBrace, "{", 29, 4),
                (Newline, "\n", 30, 4),
                (LParen, "(", 3, 5),
                (Error, "error", 4, 5),
                (Colon, ":", 9, 5),
                (String, "{tuning} is not a valid tuning", 11, 5),
                (RParen, ")", 43, 5),
                (Passthrough, "->", 44, 5),
                (Newline, "\n", 46, 5),
                (RBrace, "}", 2, 6),
                (Newline, "\n", 3, 6),
                (For, "for", 2, 7),
                (Ident, "i", 6, 7),
                (Comma, ",", 7, 7),
                (Ident, "t", 9, 7),
                (In, "in", 11, 7),
                (Ident, "array", 14, 7),
                (LBrace, "{", 20, 7),
                (Newline, "\n", 21, 7),
                (If, "if", 3, 8),
                (Ident, "t", 6, 8),
                (Passthrough, "->", 7, 8),
                (Ident, "len", 9, 8),
                (Equal, "==", 13, 8),
                (Int, "1", 16, 8),
                (LBrace, "{", 18, 8),
                (Newline, "\n", 19, 8),
                (Ident, "t", 4, 9),
                (Assign, "=", 6, 9),
                (String, " ", 8, 9),
                (Plus, "+", 12, 9),
                (Ident, "t", 14, 9),
                (Newline, "\n", 15, 9),
                (RBrace, "}", 3, 10),
                (Newline, "\n", 4, 10),
                (Ident, "guitar", 3, 11),
                (Stop, ".", 9, 11),
                (Ident, "Tuning", 10, 11),
                (LBrack, "[", 16, 11),
                (Ident, "i", 17, 11),
                (Plus, "+", 18, 11),
                (Int, "1", 19, 11),
                (RBrack, "]", 20, 11),
                (Assign, "=", 22, 11),
                (Ident, "t", 24, 11),
                (Newline, "\n", 25, 11),
                (RBrace, "}", 2, 12),
                (Newline, "\n", 3, 12),
                (LParen, "(", 2, 13),
                (Ident, "guitar", 3, 13),
                (RParen, ")", 9, 13),
                (Passthrough, "->", 10, 13),
                (Newline, "\n", 12, 13),
                (RBrace, "}", 1, 14),
            ],
        );
    }

    #[test]
    fn test_longest_match() {
        let cases: Vec<(&str, Vec<(TokenKind, &str)>)> = vec![
            ("==", vec![(Equal, "==")]),
            ("->", vec![(Passthrough, "->")]),
            ("+==", vec![(PlusAssign, "+="), (Assign, "=")]),
            ("-->", vec![(Decrement, "--"), (MoreThan, ">")]),
            ("<=>=", vec![(LessOrEqual, "<="), (MoreOrEqual, ">=")]),
            ("&", vec![(Illegal, "&")]),
            ("|", vec![(Illegal, "|")]),
        ];

        for (input, expect) in cases.into_iter() {
            let kinds: Vec<(TokenKind, std::string::String)> = lex(input)
                .into_iter()
                .map(|t| (t.kind, t.literal))
                .collect();
            let expect: Vec<(TokenKind, std::string::String)> = expect
                .into_iter()
                .map(|(kind, literal)| (kind, literal.to_owned()))
                .collect();
            assert_eq!(kinds, expect, "input: {:?}", input);
        }
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = lex("\"no closing quote");
        assert_eq!(
            tokens,
            vec![Token::new(Illegal, "no closing quote", 1, 1)]
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let tokens = lex("a # b");
        assert_eq!(
            tokens,
            vec![
                Token::new(Ident, "a", 1, 1),
                Token::new(Illegal, "#", 3, 1),
                Token::new(Ident, "b", 5, 1),
            ]
        );
    }

    #[test]
    fn test_eof_is_terminal() {
        let mut lexer = Lexer::new("x".to_owned());
        assert_eq!(lexer.next_token().kind, Ident);
        assert_eq!(lexer.next_token().kind, Eof);
        assert_eq!(lexer.next_token().kind, Eof);
    }

    #[test]
    fn test_line_count_matches_newline_tokens() {
        let input = "a = 1\nb = 2\nc = a + b\n";
        let tokens = lex(input);
        let newlines = tokens.iter().filter(|t| t.is(Newline)).count();
        let mut lexer = Lexer::new(input.to_owned());
        let mut last = lexer.next_token();
        loop {
            let token = lexer.next_token();
            if token.is(Eof) {
                break;
            }
            assert!(token.line >= last.line);
            last = token;
        }
        assert_eq!(last.line, newlines);
        assert_eq!(lexer.next_token().line, newlines + 1);
    }
}
