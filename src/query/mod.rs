//! SQL over the views registered in a [`Catalog`].

pub mod executor;
pub mod lexer;
pub mod parser;
pub mod plan;

use crate::catalog::Catalog;
use crate::query::executor::error::ExecutionError;
use crate::query::executor::result::QueryResult;
use crate::query::executor::Executor;
use crate::query::lexer::error::LexError;
use crate::query::lexer::Lexer;
use crate::query::parser::error::ParseError;
use crate::query::parser::Parser;
use crate::query::plan::error::PlanningError;
use crate::query::plan::LogicalPlanner;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Planning(#[from] PlanningError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Lexes, parses, plans and executes `query` against `catalog`.
pub(crate) fn run(catalog: &Catalog, query: &str) -> Result<QueryResult, QueryError> {
    let stream = Lexer::new_with_default_keywords(query).lex()?;
    let ast = Parser::new(stream).parse()?;
    let plan = LogicalPlanner::plan(ast)?;
    Ok(Executor::new(catalog).execute(plan)?)
}
