use crate::query::lexer::token_cursor::TokenCursor;

pub(crate) struct TokenStream {
    tokens: Vec<Token>,
}

pub(crate) struct Token {
    lexeme: String,
    token_type: TokenType,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub(crate) enum TokenType {
    Identifier,
    Keyword,
    Semicolon,
    Star,
    Comma,
    LeftParen,
    RightParen,
    StringLiteral,
    WholeNumber,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
    EndOfStream,
}

impl Token {
    pub(crate) fn new<S: Into<String>>(lexeme: S, token_type: TokenType) -> Token {
        Token {
            lexeme: lexeme.into(),
            token_type,
        }
    }

    pub(crate) fn end_of_stream() -> Token {
        Token::new("", TokenType::EndOfStream)
    }

    pub(crate) fn semicolon() -> Token {
        Token::new(";", TokenType::Semicolon)
    }

    pub(crate) fn star() -> Token {
        Token::new("*", TokenType::Star)
    }

    pub(crate) fn comma() -> Token {
        Token::new(",", TokenType::Comma)
    }

    pub(crate) fn left_paren() -> Token {
        Token::new("(", TokenType::LeftParen)
    }

    pub(crate) fn right_paren() -> Token {
        Token::new(")", TokenType::RightParen)
    }

    pub(crate) fn equal() -> Token {
        Token::new("=", TokenType::Equal)
    }

    pub(crate) fn not_equal() -> Token {
        Token::new("!=", TokenType::NotEqual)
    }

    pub(crate) fn greater() -> Token {
        Token::new(">", TokenType::Greater)
    }

    pub(crate) fn greater_equal() -> Token {
        Token::new(">=", TokenType::GreaterEqual)
    }

    pub(crate) fn lesser() -> Token {
        Token::new("<", TokenType::Lesser)
    }

    pub(crate) fn lesser_equal() -> Token {
        Token::new("<=", TokenType::LesserEqual)
    }

    pub(crate) fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub(crate) fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub(crate) fn matches(&self, token_type: TokenType, text: &str) -> bool {
        self.lexeme.eq_ignore_ascii_case(text) && self.token_type == token_type
    }

    pub(crate) fn is_keyword(&self, keyword: &str) -> bool {
        self.matches(TokenType::Keyword, keyword)
    }

    pub(crate) fn is_semicolon(&self) -> bool {
        self.token_type == TokenType::Semicolon
    }

    pub(crate) fn is_star(&self) -> bool {
        self.token_type == TokenType::Star
    }

    pub(crate) fn is_comma(&self) -> bool {
        self.token_type == TokenType::Comma
    }

    pub(crate) fn is_end_of_stream(&self) -> bool {
        self.token_type == TokenType::EndOfStream
    }

    pub(crate) fn is_identifier(&self) -> bool {
        !self.lexeme.is_empty() && self.token_type == TokenType::Identifier
    }

    pub(crate) fn is_a_whole_number(&self) -> bool {
        self.token_type == TokenType::WholeNumber
    }

    pub(crate) fn is_comparison_operator(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Equal
                | TokenType::NotEqual
                | TokenType::Greater
                | TokenType::GreaterEqual
                | TokenType::Lesser
                | TokenType::LesserEqual
        )
    }
}

impl TokenStream {
    pub(crate) fn new() -> TokenStream {
        Self { tokens: Vec::new() }
    }

    pub(crate) fn add(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub(crate) fn token_at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub(crate) fn cursor(self) -> TokenCursor {
        TokenCursor::new(self)
    }
}

#[cfg(test)]
impl TokenStream {
    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::query::lexer::token::{Token, TokenStream, TokenType};

    #[test]
    fn add_two_tokens() {
        let mut stream = TokenStream::new();
        stream.add(Token::semicolon());
        stream.add(Token::end_of_stream());

        assert_eq!(2, stream.len());
    }

    #[test]
    fn get_token_at() {
        let mut stream = TokenStream::new();
        stream.add(Token::semicolon());
        stream.add(Token::end_of_stream());

        assert_eq!(TokenType::Semicolon, stream.token_at(0).unwrap().token_type);
        assert_eq!(
            TokenType::EndOfStream,
            stream.token_at(1).unwrap().token_type
        );
    }

    #[test]
    fn attempt_to_get_token_at_index_beyond_available_tokens() {
        let mut stream = TokenStream::new();
        stream.add(Token::semicolon());

        assert!(stream.token_at(1).is_none());
    }

    #[test]
    fn token_is_a_comparison_operator() {
        assert!(Token::greater_equal().is_comparison_operator());
        assert!(!Token::comma().is_comparison_operator());
    }

    #[test]
    fn keyword_matches_ignoring_case() {
        assert!(Token::new("NULL", TokenType::Keyword).is_keyword("null"));
        assert!(!Token::new("null", TokenType::Identifier).is_keyword("null"));
    }
}
