use crate::schema::Schema;

pub(crate) struct Table {
    name: String,
    schema: Schema,
}

impl Table {
    pub(crate) fn new<N: Into<String>>(name: N, schema: Schema) -> Table {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn schema(&self) -> &Schema {
        &self.schema
    }
}
