use crate::query::executor::error::ExecutionError;
use crate::query::parser::ast::{BinaryOperator, Condition, Literal, WhereClause};
use crate::query::plan::error::PlanningError;
use crate::storage::row_view::RowView;
use crate::types::column_value::ColumnValue;
use regex::Regex;

/// A filter over rows, evaluated by name against each [`RowView`].
///
/// A `NULL` column value never satisfies a comparison or a `LIKE`; only `IS NULL` matches it.
#[derive(Debug)]
pub(crate) enum Predicate {
    Single(LogicalCondition),
    And(Vec<LogicalCondition>),
}

#[derive(Debug)]
pub(crate) enum LogicalCondition {
    Comparison {
        column_name: String,
        operator: LogicalOperator,
        literal: Literal,
    },
    Like {
        column_name: String,
        regex: Regex,
    },
    IsNull {
        column_name: String,
    },
    IsNotNull {
        column_name: String,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum LogicalOperator {
    Eq,
    NotEq,
    Greater,
    GreaterEq,
    Lesser,
    LesserEq,
}

impl Predicate {
    pub(crate) fn matches(&self, row_view: &RowView) -> Result<bool, ExecutionError> {
        match self {
            Predicate::Single(condition) => condition.matches(row_view),
            Predicate::And(conditions) => {
                for condition in conditions {
                    if !condition.matches(row_view)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

impl LogicalCondition {
    pub(crate) fn matches(&self, row_view: &RowView) -> Result<bool, ExecutionError> {
        match self {
            LogicalCondition::Comparison {
                column_name,
                operator,
                literal,
            } => operator.apply(Self::column_value(row_view, column_name)?, literal),
            LogicalCondition::Like { column_name, regex } => {
                match Self::column_value(row_view, column_name)? {
                    ColumnValue::Text(value) => Ok(regex.is_match(value)),
                    ColumnValue::Null => Ok(false),
                    ColumnValue::Int(_) => Err(ExecutionError::TypeMismatchInComparison),
                }
            }
            LogicalCondition::IsNull { column_name } => {
                Ok(Self::column_value(row_view, column_name)?.is_null())
            }
            LogicalCondition::IsNotNull { column_name } => {
                Ok(!Self::column_value(row_view, column_name)?.is_null())
            }
        }
    }

    fn column_value<'a>(
        row_view: &'a RowView,
        column_name: &str,
    ) -> Result<&'a ColumnValue, ExecutionError> {
        row_view
            .column_value_by(column_name)
            .ok_or_else(|| ExecutionError::UnknownColumn(column_name.to_string()))
    }
}

impl LogicalOperator {
    /// Compares a column value with a literal. Any `NULL` on either side yields `false`.
    pub(crate) fn apply(&self, lhs: &ColumnValue, rhs: &Literal) -> Result<bool, ExecutionError> {
        match (lhs, rhs) {
            (ColumnValue::Null, _) | (_, Literal::Null) => Ok(false),
            (ColumnValue::Int(left), Literal::Int(right)) => Ok(self.holds(left, right)),
            (ColumnValue::Text(left), Literal::Text(right)) => Ok(self.holds(left, right)),
            _ => Err(ExecutionError::TypeMismatchInComparison),
        }
    }

    fn holds<T: PartialOrd + ?Sized>(&self, left: &T, right: &T) -> bool {
        match self {
            LogicalOperator::Eq => left == right,
            LogicalOperator::NotEq => left != right,
            LogicalOperator::Greater => left > right,
            LogicalOperator::GreaterEq => left >= right,
            LogicalOperator::Lesser => left < right,
            LogicalOperator::LesserEq => left <= right,
        }
    }
}

impl From<BinaryOperator> for LogicalOperator {
    fn from(operator: BinaryOperator) -> Self {
        match operator {
            BinaryOperator::Eq => LogicalOperator::Eq,
            BinaryOperator::NotEq => LogicalOperator::NotEq,
            BinaryOperator::Greater => LogicalOperator::Greater,
            BinaryOperator::GreaterEq => LogicalOperator::GreaterEq,
            BinaryOperator::Lesser => LogicalOperator::Lesser,
            BinaryOperator::LesserEq => LogicalOperator::LesserEq,
        }
    }
}

impl TryFrom<WhereClause> for Predicate {
    type Error = PlanningError;

    fn try_from(clause: WhereClause) -> Result<Self, Self::Error> {
        match clause {
            WhereClause::Single(condition) => {
                Ok(Predicate::Single(LogicalCondition::try_from(condition)?))
            }
            WhereClause::And(conditions) => {
                let logical_conditions = conditions
                    .into_iter()
                    .map(LogicalCondition::try_from)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Predicate::And(logical_conditions))
            }
        }
    }
}

impl TryFrom<Condition> for LogicalCondition {
    type Error = PlanningError;

    fn try_from(condition: Condition) -> Result<Self, Self::Error> {
        Ok(match condition {
            Condition::Comparison {
                column_name,
                operator,
                literal,
            } => LogicalCondition::Comparison {
                column_name,
                operator: operator.into(),
                literal,
            },
            Condition::Like {
                column_name,
                pattern,
            } => LogicalCondition::Like {
                column_name,
                regex: like_pattern_to_regex(&pattern)?,
            },
            Condition::IsNull { column_name } => LogicalCondition::IsNull { column_name },
            Condition::IsNotNull { column_name } => LogicalCondition::IsNotNull { column_name },
        })
    }
}

/// `%` matches any run of characters and `_` exactly one; everything else is literal.
fn like_pattern_to_regex(pattern: &str) -> Result<Regex, PlanningError> {
    let mut expression = String::from("^(?s)");
    let mut buffer = [0u8; 4];
    for ch in pattern.chars() {
        match ch {
            '%' => expression.push_str(".*"),
            '_' => expression.push('.'),
            other => expression.push_str(&regex::escape(other.encode_utf8(&mut buffer))),
        }
    }
    expression.push('$');

    Regex::new(&expression).map_err(|source| PlanningError::InvalidLikePattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::column_type::ColumnType;
    use crate::{row, schema};

    fn condition(condition: Condition) -> Predicate {
        Predicate::try_from(WhereClause::Single(condition)).unwrap()
    }

    #[test]
    fn comparison_on_int_column() {
        let schema = schema!["uuid" => ColumnType::Int].unwrap();
        let positions = [0];
        let row_view = RowView::new(row![5], &schema, &positions);

        let predicate = condition(Condition::Comparison {
            column_name: "uuid".to_string(),
            operator: BinaryOperator::Greater,
            literal: Literal::Int(4),
        });

        assert!(predicate.matches(&row_view).unwrap());
    }

    #[test]
    fn comparison_with_null_column_value_is_false() {
        let schema = schema!["message" => ColumnType::Text].unwrap();
        let positions = [0];
        let row_view = RowView::new(row![ColumnValue::Null], &schema, &positions);

        for operator in [BinaryOperator::Eq, BinaryOperator::NotEq] {
            let predicate = condition(Condition::Comparison {
                column_name: "message".to_string(),
                operator,
                literal: Literal::Text("x".to_string()),
            });
            assert!(!predicate.matches(&row_view).unwrap());
        }
    }

    #[test]
    fn comparison_with_null_literal_is_false() {
        let schema = schema!["message" => ColumnType::Text].unwrap();
        let positions = [0];
        let row_view = RowView::new(row![ColumnValue::Null], &schema, &positions);

        let predicate = condition(Condition::Comparison {
            column_name: "message".to_string(),
            operator: BinaryOperator::Eq,
            literal: Literal::Null,
        });

        assert!(!predicate.matches(&row_view).unwrap());
    }

    #[test]
    fn comparison_with_mismatched_types() {
        let schema = schema!["uuid" => ColumnType::Int].unwrap();
        let positions = [0];
        let row_view = RowView::new(row![1], &schema, &positions);

        let predicate = condition(Condition::Comparison {
            column_name: "uuid".to_string(),
            operator: BinaryOperator::Eq,
            literal: Literal::Text("1".to_string()),
        });

        assert!(matches!(
            predicate.matches(&row_view),
            Err(ExecutionError::TypeMismatchInComparison)
        ));
    }

    #[test]
    fn is_null_and_is_not_null() {
        let schema = schema!["message" => ColumnType::Text].unwrap();
        let positions = [0];
        let null_row = RowView::new(row![ColumnValue::Null], &schema, &positions);
        let text_row = RowView::new(row!["text"], &schema, &positions);

        let is_null = condition(Condition::IsNull {
            column_name: "message".to_string(),
        });
        let is_not_null = condition(Condition::IsNotNull {
            column_name: "message".to_string(),
        });

        assert!(is_null.matches(&null_row).unwrap());
        assert!(!is_null.matches(&text_row).unwrap());
        assert!(is_not_null.matches(&text_row).unwrap());
    }

    #[test]
    fn like_with_wildcards() {
        let schema = schema!["message" => ColumnType::Text].unwrap();
        let positions = [0];
        let row_view = RowView::new(row!["This is APPEND 5"], &schema, &positions);

        let matching = condition(Condition::Like {
            column_name: "message".to_string(),
            pattern: "This is APPEND _".to_string(),
        });
        let prefix = condition(Condition::Like {
            column_name: "message".to_string(),
            pattern: "This%".to_string(),
        });
        let partial = condition(Condition::Like {
            column_name: "message".to_string(),
            pattern: "APPEND".to_string(),
        });

        assert!(matching.matches(&row_view).unwrap());
        assert!(prefix.matches(&row_view).unwrap());
        assert!(!partial.matches(&row_view).unwrap());
    }

    #[test]
    fn like_treats_regex_characters_literally() {
        let schema = schema!["message" => ColumnType::Text].unwrap();
        let positions = [0];
        let row_view = RowView::new(row!["a.b"], &schema, &positions);
        let other_row = RowView::new(row!["axb"], &schema, &positions);

        let predicate = condition(Condition::Like {
            column_name: "message".to_string(),
            pattern: "a.b".to_string(),
        });

        assert!(predicate.matches(&row_view).unwrap());
        assert!(!predicate.matches(&other_row).unwrap());
    }

    #[test]
    fn and_requires_every_condition() {
        let schema = schema!["uuid" => ColumnType::Int, "message" => ColumnType::Text].unwrap();
        let positions = [0, 1];
        let row_view = RowView::new(row![4, ColumnValue::Null], &schema, &positions);

        let predicate = Predicate::try_from(WhereClause::And(vec![
            Condition::Comparison {
                column_name: "uuid".to_string(),
                operator: BinaryOperator::Eq,
                literal: Literal::Int(4),
            },
            Condition::IsNotNull {
                column_name: "message".to_string(),
            },
        ]))
        .unwrap();

        assert!(!predicate.matches(&row_view).unwrap());
    }

    #[test]
    fn unknown_column() {
        let schema = schema!["uuid" => ColumnType::Int].unwrap();
        let positions = [0];
        let row_view = RowView::new(row![1], &schema, &positions);

        let predicate = condition(Condition::IsNull {
            column_name: "message".to_string(),
        });

        assert!(matches!(
            predicate.matches(&row_view),
            Err(ExecutionError::UnknownColumn(column)) if column == "message"
        ));
    }
}
