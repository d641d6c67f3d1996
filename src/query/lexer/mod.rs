pub mod error;
mod keywords;
pub(crate) mod token;
pub(crate) mod token_cursor;

use crate::query::lexer::error::LexError;
use crate::query::lexer::keywords::Keywords;
use crate::query::lexer::token::{Token, TokenStream, TokenType};

/// Turns query text into a [`TokenStream`].
///
/// Keywords are matched without regard to case, string literals are delimited by single
/// quotes, and the stream always ends with an end-of-stream token.
pub(crate) struct Lexer {
    input: Vec<char>,
    position: usize,
    keywords: Keywords,
}

impl Lexer {
    pub(crate) fn new_with_default_keywords(source: &str) -> Self {
        Self::new(source, Keywords::new_with_default_keywords())
    }

    pub(crate) fn new(source: &str, keywords: Keywords) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            keywords,
        }
    }

    pub(crate) fn lex(&mut self) -> Result<TokenStream, LexError> {
        let mut stream = TokenStream::new();
        while let Some(char) = self.peek() {
            match char {
                ch if ch.is_whitespace() => self.eat(),
                ';' => self.capture_token(&mut stream, Token::semicolon()),
                '*' => self.capture_token(&mut stream, Token::star()),
                ',' => self.capture_token(&mut stream, Token::comma()),
                '(' => self.capture_token(&mut stream, Token::left_paren()),
                ')' => self.capture_token(&mut stream, Token::right_paren()),
                '=' => self.capture_token(&mut stream, Token::equal()),
                '\'' => stream.add(self.string()?),
                '>' => stream.add(self.operator_with_optional_equal(Token::greater(), Token::greater_equal())),
                '<' => stream.add(self.operator_with_optional_equal(Token::lesser(), Token::lesser_equal())),
                '!' => stream.add(self.not_equal()?),
                '-' if self.next_is_a_digit() => stream.add(self.number()),
                ch if Self::looks_like_a_whole_number(ch) => stream.add(self.number()),
                ch if Self::looks_like_an_identifier(ch) => {
                    stream.add(self.identifier_or_keyword())
                }
                _ => {
                    return Err(LexError::UnexpectedCharacter(char));
                }
            }
        }
        stream.add(Token::end_of_stream());
        Ok(stream)
    }

    fn capture_token(&mut self, stream: &mut TokenStream, token: Token) {
        stream.add(token);
        self.eat();
    }

    fn eat(&mut self) {
        let _ = self.advance();
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.peek();
        if char.is_some() {
            self.position += 1;
        }
        char
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn next_is_a_digit(&self) -> bool {
        self.input
            .get(self.position + 1)
            .is_some_and(|ch| Self::looks_like_a_whole_number(*ch))
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let lexeme = self.take_while(Self::looks_like_an_identifier);
        if self.keywords.contains(lexeme.as_str()) {
            Token::new(lexeme, TokenType::Keyword)
        } else {
            Token::new(lexeme, TokenType::Identifier)
        }
    }

    fn string(&mut self) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        self.eat();

        while let Some(ch) = self.advance() {
            if ch == '\'' {
                return Ok(Token::new(lexeme, TokenType::StringLiteral));
            }
            lexeme.push(ch);
        }
        Err(LexError::UnterminatedStringLiteral)
    }

    fn number(&mut self) -> Token {
        let mut lexeme = String::new();
        if self.peek() == Some('-') {
            self.eat();
            lexeme.push('-');
        }
        lexeme.push_str(&self.take_while(Self::looks_like_a_whole_number));
        Token::new(lexeme, TokenType::WholeNumber)
    }

    fn operator_with_optional_equal(&mut self, bare: Token, with_equal: Token) -> Token {
        self.eat();
        if let Some('=') = self.peek() {
            self.eat();
            return with_equal;
        }
        bare
    }

    fn not_equal(&mut self) -> Result<Token, LexError> {
        self.eat();
        if let Some('=') = self.peek() {
            self.eat();
            return Ok(Token::not_equal());
        }
        Err(LexError::UnsupportedOperator('!'))
    }

    fn take_while(&mut self, predicate: fn(char) -> bool) -> String {
        let mut lexeme = String::new();
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.eat();
            lexeme.push(ch);
        }
        lexeme
    }

    fn looks_like_an_identifier(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    fn looks_like_a_whole_number(ch: char) -> bool {
        ch.is_ascii_digit()
    }
}
