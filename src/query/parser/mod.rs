pub(crate) mod ast;
pub mod error;
pub(crate) mod ordering_key;
pub(crate) mod projection;

use crate::query::lexer::token::{Token, TokenStream, TokenType};
use crate::query::lexer::token_cursor::TokenCursor;
use crate::query::parser::ast::{Ast, BinaryOperator, Condition, Literal, WhereClause};
use crate::query::parser::error::ParseError;
use crate::query::parser::ordering_key::{OrderingDirection, OrderingKey};
use crate::query::parser::projection::Projection;

/// Parses a [`TokenStream`] into an [`Ast`].
///
/// ```text
/// statement   := show_tables | describe | select
/// show_tables := SHOW TABLES [;]
/// describe    := DESCRIBE TABLE identifier [;]
/// select      := SELECT projection FROM identifier [where] [order_by] [limit] [;]
/// projection  := * | COUNT ( * ) | identifier (, identifier)*
/// where       := WHERE condition (AND condition)*
/// condition   := identifier (op literal | LIKE string | IS [NOT] NULL)
/// order_by    := ORDER BY identifier [ASC | DESC] (, identifier [ASC | DESC])*
/// limit       := LIMIT whole_number
/// ```
pub(crate) struct Parser {
    cursor: TokenCursor,
}

impl Parser {
    pub(crate) fn new(stream: TokenStream) -> Parser {
        Self {
            cursor: stream.cursor(),
        }
    }

    pub(crate) fn parse(&mut self) -> Result<Ast, ParseError> {
        let ast = self.parse_statement()?;
        self.expect_end_of_stream()?;
        Ok(ast)
    }

    fn parse_statement(&mut self) -> Result<Ast, ParseError> {
        match self.cursor.peek() {
            Some(token) => {
                if token.is_keyword("show") {
                    self.parse_show_tables()
                } else if token.is_keyword("describe") {
                    self.parse_describe_table()
                } else if token.is_keyword("select") {
                    self.parse_select()
                } else {
                    Err(ParseError::UnsupportedToken {
                        expected: "show | describe | select".to_string(),
                        found: token.lexeme().to_string(),
                    })
                }
            }
            None => Err(ParseError::NoTokens),
        }
    }

    fn parse_show_tables(&mut self) -> Result<Ast, ParseError> {
        self.expect_keyword("show")?;
        self.expect_keyword("tables")?;
        let _ = self.eat_if(|token| token.is_semicolon());

        Ok(Ast::ShowTables)
    }

    fn parse_describe_table(&mut self) -> Result<Ast, ParseError> {
        self.expect_keyword("describe")?;
        self.expect_keyword("table")?;
        let table_name = self.expect_identifier()?;
        let _ = self.eat_if(|token| token.is_semicolon());

        Ok(Ast::DescribeTable { table_name })
    }

    fn parse_select(&mut self) -> Result<Ast, ParseError> {
        self.expect_keyword("select")?;
        let projection = self.expect_projection()?;
        self.expect_keyword("from")?;
        let table_name = self.expect_identifier()?;
        let where_clause = self.maybe_where_clause()?;
        let order_by = self.maybe_order_by()?;
        let limit = self.maybe_limit()?;
        let _ = self.eat_if(|token| token.is_semicolon());

        Ok(Ast::Select {
            table_name,
            projection,
            where_clause,
            order_by,
            limit,
        })
    }

    fn expect_projection(&mut self) -> Result<Projection, ParseError> {
        if self.eat_if(|token| token.is_star()) {
            return Ok(Projection::All);
        }
        if self.eat_if(|token| token.is_keyword("count")) {
            self.expect_token(TokenType::LeftParen, "(")?;
            self.expect_token(TokenType::Star, "*")?;
            self.expect_token(TokenType::RightParen, ")")?;
            return Ok(Projection::CountAll);
        }
        let mut columns = vec![self.expect_identifier()?];
        while self.eat_if(|token| token.is_comma()) {
            columns.push(self.expect_identifier()?);
        }
        Ok(Projection::Columns(columns))
    }

    fn maybe_where_clause(&mut self) -> Result<Option<WhereClause>, ParseError> {
        if !self.eat_if(|token| token.is_keyword("where")) {
            return Ok(None);
        }
        let mut conditions = vec![self.expect_condition()?];
        while self.eat_if(|token| token.is_keyword("and")) {
            conditions.push(self.expect_condition()?);
        }
        Ok(Some(WhereClause::from_conditions(conditions)))
    }

    fn expect_condition(&mut self) -> Result<Condition, ParseError> {
        let column_name = self.expect_identifier()?;

        if self.eat_if(|token| token.is_keyword("is")) {
            let negated = self.eat_if(|token| token.is_keyword("not"));
            self.expect_keyword("null")?;
            return Ok(if negated {
                Condition::IsNotNull { column_name }
            } else {
                Condition::IsNull { column_name }
            });
        }
        if self.eat_if(|token| token.is_keyword("like")) {
            let pattern = self.expect_string_literal()?;
            return Ok(Condition::Like {
                column_name,
                pattern,
            });
        }

        let operator = self.expect_binary_operator()?;
        let literal = self.expect_literal()?;
        Ok(Condition::Comparison {
            column_name,
            operator,
            literal,
        })
    }

    fn expect_binary_operator(&mut self) -> Result<BinaryOperator, ParseError> {
        match self.cursor.next() {
            Some(token) => {
                BinaryOperator::from_token(token).ok_or_else(|| ParseError::UnexpectedToken {
                    expected: "= | != | > | >= | < | <= | like | is".to_string(),
                    found: token.lexeme().to_string(),
                })
            }
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn expect_literal(&mut self) -> Result<Literal, ParseError> {
        match self.cursor.next() {
            Some(token) if token.is_a_whole_number() => token
                .lexeme()
                .parse::<i64>()
                .map(Literal::Int)
                .map_err(|_| ParseError::NumericLiteralOutOfRange(token.lexeme().to_string())),
            Some(token) if token.token_type() == TokenType::StringLiteral => {
                Ok(Literal::Text(token.lexeme().to_string()))
            }
            Some(token) if token.is_keyword("null") => Ok(Literal::Null),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: "literal".to_string(),
                found: token.lexeme().to_string(),
            }),
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn expect_string_literal(&mut self) -> Result<String, ParseError> {
        match self.cursor.next() {
            Some(token) if token.token_type() == TokenType::StringLiteral => {
                Ok(token.lexeme().to_string())
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: "string literal".to_string(),
                found: token.lexeme().to_string(),
            }),
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn maybe_order_by(&mut self) -> Result<Option<Vec<OrderingKey>>, ParseError> {
        if !self.eat_if(|token| token.is_keyword("order")) {
            return Ok(None);
        }
        self.expect_keyword("by")?;

        let mut ordering_keys = vec![self.expect_ordering_key()?];
        while self.eat_if(|token| token.is_comma()) {
            ordering_keys.push(self.expect_ordering_key()?);
        }
        Ok(Some(ordering_keys))
    }

    fn expect_ordering_key(&mut self) -> Result<OrderingKey, ParseError> {
        let column_name = self.expect_identifier()?;
        Ok(OrderingKey::new(column_name, self.ordering_direction()))
    }

    fn ordering_direction(&mut self) -> OrderingDirection {
        if self.eat_if(|token| token.is_keyword("desc")) {
            return OrderingDirection::Descending;
        }
        let _ = self.eat_if(|token| token.is_keyword("asc"));
        OrderingDirection::Ascending
    }

    fn maybe_limit(&mut self) -> Result<Option<usize>, ParseError> {
        if !self.eat_if(|token| token.is_keyword("limit")) {
            return Ok(None);
        }
        let limit_value = match self.cursor.next() {
            Some(token) if token.is_a_whole_number() => token.lexeme().to_string(),
            Some(_) => return Err(ParseError::NoLimitValue),
            None => return Err(ParseError::UnexpectedEndOfInput),
        };
        let value = limit_value
            .parse::<usize>()
            .map_err(|_| ParseError::LimitOutOfRange(limit_value))?;

        if value == 0 {
            return Err(ParseError::ZeroLimit);
        }
        Ok(Some(value))
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        match self.cursor.next() {
            Some(token) if token.is_keyword(keyword) => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: keyword.to_string(),
                found: token.lexeme().to_string(),
            }),
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn expect_token(&mut self, token_type: TokenType, lexeme: &str) -> Result<(), ParseError> {
        match self.cursor.next() {
            Some(token) if token.token_type() == token_type => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: lexeme.to_string(),
                found: token.lexeme().to_string(),
            }),
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.cursor.next() {
            Some(token) if token.is_identifier() => Ok(token.lexeme().to_string()),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                found: token.lexeme().to_string(),
            }),
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    fn eat_if<F: Fn(&Token) -> bool>(&mut self, predicate: F) -> bool {
        if let Some(token) = self.cursor.peek() {
            if predicate(token) {
                self.cursor.next();
                return true;
            }
        }
        false
    }

    fn expect_end_of_stream(&mut self) -> Result<(), ParseError> {
        match self.cursor.next() {
            Some(token) if token.is_end_of_stream() => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: "end of stream".to_string(),
                found: token.lexeme().to_string(),
            }),
            None => Err(ParseError::UnexpectedEndOfInput),
        }
    }
}


#[cfg(test)]
mod select_tests {
    use super::*;
    use crate::query::lexer::Lexer;

    fn parse(query: &str) -> Result<Ast, ParseError> {
        let stream = Lexer::new_with_default_keywords(query).lex().unwrap();
        Parser::new(stream).parse()
    }

    #[test]
    fn parse_select_star() {
        let ast = parse("select * from snapshots;").unwrap();

        assert!(matches!(
            ast,
            Ast::Select { table_name, projection: Projection::All, where_clause: None, order_by: None, limit: None }
                if table_name == "snapshots"
        ));
    }

    #[test]
    fn parse_select_with_column_list() {
        let ast = parse("select uuid, message from snapshots").unwrap();

        assert!(matches!(
            ast,
            Ast::Select { projection: Projection::Columns(columns), .. } if columns == vec!["uuid", "message"]
        ));
    }

    #[test]
    fn parse_select_count() {
        let ast = parse("SELECT COUNT(*) FROM staged").unwrap();

        assert!(matches!(
            ast,
            Ast::Select { projection: Projection::CountAll, .. }
        ));
    }

    #[test]
    fn attempt_to_parse_count_without_closing_paren() {
        let result = parse("SELECT COUNT(* FROM staged");

        assert!(
            matches!(result, Err(ParseError::UnexpectedToken {expected, found}) if expected == ")" && found == "FROM")
        );
    }

    #[test]
    fn parse_where_is_null() {
        let ast = parse("SELECT COUNT(*) FROM staged WHERE message IS NULL;").unwrap();

        assert!(matches!(
            ast,
            Ast::Select { where_clause: Some(WhereClause::Single(Condition::IsNull { column_name })), .. }
                if column_name == "message"
        ));
    }

    #[test]
    fn parse_where_is_not_null() {
        let ast = parse("select * from staged where message is not null").unwrap();

        assert!(matches!(
            ast,
            Ast::Select { where_clause: Some(WhereClause::Single(Condition::IsNotNull { column_name })), .. }
                if column_name == "message"
        ));
    }

    #[test]
    fn parse_where_with_and_of_comparison_and_like() {
        let ast = parse("select * from snapshots where precomb >= 200 and message like 'This%'").unwrap();

        let Ast::Select {
            where_clause: Some(WhereClause::And(conditions)),
            ..
        } = ast
        else {
            panic!("expected a conjunction");
        };
        assert_eq!(
            vec![
                Condition::Comparison {
                    column_name: "precomb".to_string(),
                    operator: BinaryOperator::GreaterEq,
                    literal: Literal::Int(200),
                },
                Condition::Like {
                    column_name: "message".to_string(),
                    pattern: "This%".to_string(),
                },
            ],
            conditions
        );
    }

    #[test]
    fn parse_comparison_with_null_literal() {
        let ast = parse("select * from snapshots where message = null").unwrap();

        assert!(matches!(
            ast,
            Ast::Select { where_clause: Some(WhereClause::Single(Condition::Comparison { literal: Literal::Null, .. })), .. }
        ));
    }

    #[test]
    fn attempt_to_parse_like_with_a_number() {
        let result = parse("select * from snapshots where message like 10");

        assert!(
            matches!(result, Err(ParseError::UnexpectedToken {expected, found}) if expected == "string literal" && found == "10")
        );
    }

    #[test]
    fn attempt_to_parse_is_without_null() {
        let result = parse("select * from snapshots where message is 10");

        assert!(
            matches!(result, Err(ParseError::UnexpectedToken {expected, found}) if expected == "null" && found == "10")
        );
    }

    #[test]
    fn attempt_to_parse_numeric_literal_out_of_range() {
        let result = parse("select * from snapshots where uuid = 99999999999999999999");

        assert!(
            matches!(result, Err(ParseError::NumericLiteralOutOfRange(literal)) if literal == "99999999999999999999")
        );
    }

    #[test]
    fn parse_order_by_with_directions() {
        let ast = parse("select * from snapshots order by partition desc, uuid").unwrap();

        let Ast::Select {
            order_by: Some(ordering_keys),
            ..
        } = ast
        else {
            panic!("expected order by");
        };
        assert_eq!(
            vec![
                OrderingKey::descending_by("partition"),
                OrderingKey::ascending_by("uuid")
            ],
            ordering_keys
        );
    }

    #[test]
    fn parse_limit() {
        let ast = parse("select * from snapshots limit 5").unwrap();

        assert!(matches!(ast, Ast::Select { limit: Some(5), .. }));
    }

    #[test]
    fn attempt_to_parse_zero_limit() {
        let result = parse("select * from snapshots limit 0");

        assert!(matches!(result, Err(ParseError::ZeroLimit)));
    }

    #[test]
    fn attempt_to_parse_limit_without_value() {
        let result = parse("select * from snapshots limit uuid");

        assert!(matches!(result, Err(ParseError::NoLimitValue)));
    }

    #[test]
    fn attempt_to_parse_negative_limit() {
        let result = parse("select * from snapshots limit -1");

        assert!(matches!(result, Err(ParseError::LimitOutOfRange(value)) if value == "-1"));
    }

    #[test]
    fn attempt_to_parse_trailing_tokens() {
        let result = parse("select * from snapshots uuid");

        assert!(
            matches!(result, Err(ParseError::UnexpectedToken {expected, found}) if expected == "end of stream" && found == "uuid")
        );
    }
}
