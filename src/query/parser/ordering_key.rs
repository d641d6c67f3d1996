#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OrderingKey {
    pub(crate) column: String,
    pub(crate) direction: OrderingDirection,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum OrderingDirection {
    Ascending,
    Descending,
}

impl OrderingKey {
    pub(crate) fn new<C: Into<String>>(column: C, direction: OrderingDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

#[cfg(test)]
impl OrderingKey {
    pub(crate) fn ascending_by(column: &str) -> Self {
        Self::new(column, OrderingDirection::Ascending)
    }

    pub(crate) fn descending_by(column: &str) -> Self {
        Self::new(column, OrderingDirection::Descending)
    }
}
