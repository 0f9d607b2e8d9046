use std::str::Chars;

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Token {
    Word(String),
    Quoted(String),
}

/// Splits a right-hand side into alternatives of tokens.
pub(crate) struct Lexer<'a> {
    chars: Chars<'a>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn alternatives(rhs: &'a str) -> Vec<Vec<Token>> {
        let mut lexer = Lexer { chars: rhs.chars() };
        let mut result = vec![vec![]];
        while let Some(ch) = lexer.peek() {
            match ch {
                '|' => {
                    lexer.advance();
                    result.push(vec![]);
                }
                ch if ch.is_whitespace() => {
                    lexer.advance();
                }
                '"' => {
                    let token = lexer.quoted();
                    if let Some(alt) = result.last_mut() {
                        alt.push(token);
                    }
                }
                _ => {
                    let token = lexer.word();
                    if let Some(alt) = result.last_mut() {
                        alt.push(token);
                    }
                }
            }
        }
        result
    }

    fn word(&mut self) -> Token {
        let substring = self.chars.as_str();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '|' || ch == '"' {
                break;
            }
            self.advance();
        }
        Token::Word(substring[..substring.len() - self.chars.as_str().len()].to_string())
    }

    /// Reads a quoted literal. An unterminated literal runs to the end of
    /// the line.
    fn quoted(&mut self) -> Token {
        let mut result = String::new();
        self.advance();
        while let Some(ch) = self.peek() {
            self.advance();
            match ch {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = self.peek() {
                        result.push(escaped);
                        self.advance();
                    }
                }
                other => result.push(other),
            }
        }
        Token::Quoted(result)
    }

    fn advance(&mut self) {
        self.chars.next();
    }

    fn peek(&self) -> Option<char> {
        self.chars.as_str().chars().next()
    }
}
