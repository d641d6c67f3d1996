use crate::query::lexer::token::{Token, TokenType};
use crate::query::parser::ordering_key::OrderingKey;
use crate::query::parser::projection::Projection;

pub(crate) enum Ast {
    ShowTables,
    DescribeTable {
        table_name: String,
    },
    Select {
        table_name: String,
        projection: Projection,
        where_clause: Option<WhereClause>,
        order_by: Option<Vec<OrderingKey>>,
        limit: Option<usize>,
    },
}

/// Conditions of a `WHERE` clause, all of which must hold.
#[derive(Debug, PartialEq)]
pub(crate) enum WhereClause {
    Single(Condition),
    And(Vec<Condition>),
}

impl WhereClause {
    pub(crate) fn from_conditions(mut conditions: Vec<Condition>) -> Self {
        if conditions.len() == 1 {
            //SAFETY: length was checked above.
            return WhereClause::Single(conditions.pop().unwrap());
        }
        WhereClause::And(conditions)
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Condition {
    Comparison {
        column_name: String,
        operator: BinaryOperator,
        literal: Literal,
    },
    Like {
        column_name: String,
        pattern: String,
    },
    IsNull {
        column_name: String,
    },
    IsNotNull {
        column_name: String,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum BinaryOperator {
    Eq,
    NotEq,
    Greater,
    GreaterEq,
    Lesser,
    LesserEq,
}

impl BinaryOperator {
    pub(crate) fn from_token(token: &Token) -> Option<BinaryOperator> {
        match token.token_type() {
            TokenType::Equal => Some(BinaryOperator::Eq),
            TokenType::NotEqual => Some(BinaryOperator::NotEq),
            TokenType::Greater => Some(BinaryOperator::Greater),
            TokenType::GreaterEqual => Some(BinaryOperator::GreaterEq),
            TokenType::Lesser => Some(BinaryOperator::Lesser),
            TokenType::LesserEqual => Some(BinaryOperator::LesserEq),
            _ => None,
        }
    }
}

/// A constant on the right-hand side of a comparison.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum Literal {
    Int(i64),
    Text(String),
    Null,
}
