use crate::query::lexer::token::{Token, TokenStream};

/// `TokenCursor` allows for traversing a `TokenStream` one token at a time.
pub(crate) struct TokenCursor {
    stream: TokenStream,
    index: usize,
}

impl TokenCursor {
    pub(crate) fn new(stream: TokenStream) -> TokenCursor {
        TokenCursor { stream, index: 0 }
    }

    /// Returns the current token and advances the cursor to the next position.
    pub(crate) fn next(&mut self) -> Option<&Token> {
        let token = self.stream.token_at(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// Returns the current token without advancing the cursor.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.stream.token_at(self.index)
    }
}
