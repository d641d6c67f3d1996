pub mod error;
pub(crate) mod predicate;

use crate::query::parser::ast::Ast;
use crate::query::parser::ordering_key::OrderingKey;
use crate::query::parser::projection::Projection;
use crate::query::plan::error::PlanningError;
use crate::query::plan::predicate::Predicate;

pub(crate) enum LogicalPlan {
    ShowTables,
    DescribeTable { table_name: String },
    Select(SelectPlan),
}

/// A single-table row pipeline, applied bottom-up: scan, filter, sort, project or count, limit.
pub(crate) enum SelectPlan {
    Scan {
        table_name: String,
    },
    Filter {
        base: Box<SelectPlan>,
        predicate: Predicate,
    },
    Sort {
        base: Box<SelectPlan>,
        ordering_keys: Vec<OrderingKey>,
    },
    Projection {
        base: Box<SelectPlan>,
        columns: Vec<String>,
    },
    Count {
        base: Box<SelectPlan>,
    },
    Limit {
        base: Box<SelectPlan>,
        limit: usize,
    },
}

pub(crate) struct LogicalPlanner;

impl LogicalPlanner {
    pub(crate) fn plan(ast: Ast) -> Result<LogicalPlan, PlanningError> {
        match ast {
            Ast::ShowTables => Ok(LogicalPlan::ShowTables),
            Ast::DescribeTable { table_name } => Ok(LogicalPlan::DescribeTable { table_name }),
            Ast::Select {
                table_name,
                projection,
                where_clause,
                order_by,
                limit,
            } => {
                let mut plan = SelectPlan::Scan { table_name };
                if let Some(where_clause) = where_clause {
                    plan = SelectPlan::Filter {
                        base: Box::new(plan),
                        predicate: Predicate::try_from(where_clause)?,
                    };
                }
                if let Some(ordering_keys) = order_by {
                    plan = SelectPlan::Sort {
                        base: Box::new(plan),
                        ordering_keys,
                    };
                }
                plan = match projection {
                    Projection::All => plan,
                    Projection::Columns(columns) => SelectPlan::Projection {
                        base: Box::new(plan),
                        columns,
                    },
                    Projection::CountAll => SelectPlan::Count {
                        base: Box::new(plan),
                    },
                };
                if let Some(limit) = limit {
                    plan = SelectPlan::Limit {
                        base: Box::new(plan),
                        limit,
                    };
                }
                Ok(LogicalPlan::Select(plan))
            }
        }
    }
}
