pub(crate) mod count_result_set;
pub mod error;
pub(crate) mod filter_result_set;
pub(crate) mod limit_result_set;
pub(crate) mod ordering_result_set;
pub(crate) mod project_result_set;
pub mod result;
pub mod result_set;
pub(crate) mod scan_result_set;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::catalog::Catalog;
use crate::query::executor::count_result_set::CountResultSet;
use crate::query::executor::error::ExecutionError;
use crate::query::executor::filter_result_set::FilterResultSet;
use crate::query::executor::limit_result_set::LimitResultSet;
use crate::query::executor::ordering_result_set::OrderingResultSet;
use crate::query::executor::project_result_set::ProjectResultSet;
use crate::query::executor::result::QueryResult;
use crate::query::executor::result_set::ResultSet;
use crate::query::executor::scan_result_set::ScanResultSet;
use crate::query::plan::{LogicalPlan, SelectPlan};

/// Executes logical plans against the catalog.
pub(crate) struct Executor<'a> {
    catalog: &'a Catalog,
}

impl<'a> Executor<'a> {
    pub(crate) fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub(crate) fn execute(&self, logical_plan: LogicalPlan) -> Result<QueryResult, ExecutionError> {
        match logical_plan {
            LogicalPlan::ShowTables => Ok(QueryResult::TableList(self.catalog.show_tables())),
            LogicalPlan::DescribeTable { table_name } => Ok(QueryResult::TableDescription(
                self.catalog.describe_table(&table_name)?,
            )),
            LogicalPlan::Select(select_plan) => {
                Ok(QueryResult::ResultSet(self.result_set(select_plan)?))
            }
        }
    }

    fn result_set(&self, select_plan: SelectPlan) -> Result<Box<dyn ResultSet>, ExecutionError> {
        match select_plan {
            SelectPlan::Scan { table_name } => {
                let (table_scan, table) = self.catalog.scan(&table_name)?;
                Ok(Box::new(ScanResultSet::new(table_scan, table)))
            }
            SelectPlan::Filter { base, predicate } => Ok(Box::new(FilterResultSet::new(
                self.result_set(*base)?,
                predicate,
            ))),
            SelectPlan::Sort {
                base,
                ordering_keys,
            } => Ok(Box::new(OrderingResultSet::new(
                self.result_set(*base)?,
                ordering_keys,
            ))),
            SelectPlan::Projection { base, columns } => Ok(Box::new(ProjectResultSet::new(
                self.result_set(*base)?,
                &columns,
            )?)),
            SelectPlan::Count { base } => {
                Ok(Box::new(CountResultSet::new(self.result_set(*base)?)))
            }
            SelectPlan::Limit { base, limit } => Ok(Box::new(LimitResultSet::new(
                self.result_set(*base)?,
                limit,
            ))),
        }
    }
}
