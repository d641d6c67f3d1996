use crate::catalog::Catalog;
use crate::query;
use crate::query::executor::error::ExecutionError;
use crate::query::QueryError;
use crate::table::error::{TableError, ValidationError};
use crate::table::options::ValidatorSpec;
use crate::table::snapshot::TableSnapshot;
use crate::types::column_value::ColumnValue;
use tracing::debug;

const TABLE_NAME_PLACEHOLDER: &str = "<TABLE_NAME>";

type QueryRows = Vec<Vec<ColumnValue>>;

/// A check run against a staged commit before it is made visible.
pub(crate) trait PrecommitValidator {
    fn validate(&self, context: &ValidationContext) -> Result<(), ValidationError>;
}

pub(crate) fn validator_for(spec: &ValidatorSpec) -> Box<dyn PrecommitValidator> {
    match spec {
        ValidatorSpec::SqlEquality(queries) => Box::new(SqlQueryEqualityValidator {
            queries: queries.clone(),
        }),
        ValidatorSpec::SqlInequality(queries) => Box::new(SqlQueryInequalityValidator {
            queries: queries.clone(),
        }),
        ValidatorSpec::SqlSingleResult(queries) => Box::new(SqlQuerySingleResultValidator {
            queries: queries.clone(),
        }),
    }
}

/// The table as it is before the commit and as it would be after it, each registered as a
/// view named after the table.
pub(crate) struct ValidationContext {
    view_name: String,
    before: Catalog,
    after: Catalog,
}

impl ValidationContext {
    pub(crate) fn new(
        view_name: &str,
        before: &TableSnapshot,
        after: &TableSnapshot,
    ) -> Result<ValidationContext, TableError> {
        Ok(Self {
            view_name: view_name.to_string(),
            before: Self::catalog_of(view_name, before)?,
            after: Self::catalog_of(view_name, after)?,
        })
    }

    fn catalog_of(view_name: &str, snapshot: &TableSnapshot) -> Result<Catalog, TableError> {
        let catalog = Catalog::new();
        catalog.create_or_replace(view_name, snapshot.schema()?, snapshot.rows());
        Ok(catalog)
    }

    fn query_before(&self, query: &str) -> Result<QueryRows, ValidationError> {
        self.run(&self.before, query)
    }

    fn query_after(&self, query: &str) -> Result<QueryRows, ValidationError> {
        self.run(&self.after, query)
    }

    fn run(&self, catalog: &Catalog, query: &str) -> Result<QueryRows, ValidationError> {
        let statement = query.replace(TABLE_NAME_PLACEHOLDER, &self.view_name);
        debug!(query = %statement, "running precommit validation query");

        let failed = |source: QueryError| ValidationError::Query {
            query: query.to_string(),
            source,
        };
        let query_result = query::run(catalog, &statement).map_err(failed)?;
        let result_set = query_result
            .result_set()
            .ok_or_else(|| ValidationError::NotASelect {
                query: query.to_string(),
            })?;

        let collect = || -> Result<QueryRows, ExecutionError> {
            let mut rows = Vec::new();
            for row_view in result_set.iterator()? {
                rows.push(row_view?.visible_values().into_iter().cloned().collect());
            }
            Ok(rows)
        };
        collect().map_err(|err| failed(QueryError::Execution(err)))
    }
}

/// Each query must return the same rows before and after the commit.
pub(crate) struct SqlQueryEqualityValidator {
    queries: Vec<String>,
}

impl PrecommitValidator for SqlQueryEqualityValidator {
    fn validate(&self, context: &ValidationContext) -> Result<(), ValidationError> {
        for query in &self.queries {
            let before = context.query_before(query)?;
            let after = context.query_after(query)?;
            if before != after {
                return Err(ValidationError::EqualityMismatch {
                    query: query.clone(),
                    before: describe(&before),
                    after: describe(&after),
                });
            }
        }
        Ok(())
    }
}

/// Each query must return different rows after the commit.
pub(crate) struct SqlQueryInequalityValidator {
    queries: Vec<String>,
}

impl PrecommitValidator for SqlQueryInequalityValidator {
    fn validate(&self, context: &ValidationContext) -> Result<(), ValidationError> {
        for query in &self.queries {
            let before = context.query_before(query)?;
            let after = context.query_after(query)?;
            if before == after {
                return Err(ValidationError::InequalityMismatch {
                    query: query.clone(),
                    result: describe(&after),
                });
            }
        }
        Ok(())
    }
}

/// Each query must return a single value, equal to the expected text, after the commit.
pub(crate) struct SqlQuerySingleResultValidator {
    queries: Vec<(String, String)>,
}

impl PrecommitValidator for SqlQuerySingleResultValidator {
    fn validate(&self, context: &ValidationContext) -> Result<(), ValidationError> {
        for (query, expected) in &self.queries {
            let after = context.query_after(query)?;
            let value = match after.as_slice() {
                [row] if row.len() == 1 => &row[0],
                _ => {
                    return Err(ValidationError::NotASingleValue {
                        query: query.clone(),
                        result: describe(&after),
                    })
                }
            };
            if &value.to_string() != expected {
                return Err(ValidationError::SingleResultMismatch {
                    query: query.clone(),
                    expected: expected.clone(),
                    actual: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn describe(rows: &QueryRows) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(ColumnValue::to_string).collect();
            format!("[{}]", values.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(", "))
}
