use super::{FilterError, SqlFragment, SqlParam};

/// Builds the SET clause of a partial UPDATE from whichever fields the
/// caller supplied. Columns with `None` values are skipped entirely, so
/// unsupplied fields keep their prior values.
#[derive(Debug)]
pub struct UpdateBuilder {
    assignments: Vec<String>,
    params: Vec<SqlParam>,
    param_index: usize,
}

impl UpdateBuilder {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            assignments: vec![],
            params: vec![],
            param_index: starting_param_index,
        }
    }

    /// Add `column = $n` when a value is present; no-op otherwise.
    pub fn set(&mut self, column: &str, value: Option<SqlParam>) -> &mut Self {
        if let Some(value) = value {
            self.assignments
                .push(format!("\"{}\" = ${}", column, self.param_index));
            self.params.push(value);
            self.param_index += 1;
        }
        self
    }

    /// Placeholder index available after the SET parameters, for the
    /// caller's WHERE clause.
    pub fn next_param_index(&self) -> usize {
        self.param_index
    }

    pub fn build(self) -> Result<SqlFragment, FilterError> {
        if self.assignments.is_empty() {
            return Err(FilterError::EmptyUpdate);
        }
        Ok(SqlFragment {
            clause: self.assignments.join(", "),
            params: self.params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_set_clause_for_present_fields_only() {
        let mut builder = UpdateBuilder::new(1);
        builder
            .set("name", Some(SqlParam::text("Acme")))
            .set("description", None)
            .set("num_employees", Some(SqlParam::Int(42)));
        assert_eq!(builder.next_param_index(), 3);

        let frag = builder.build().unwrap();
        assert_eq!(frag.clause, "\"name\" = $1, \"num_employees\" = $2");
        assert_eq!(
            frag.params,
            vec![SqlParam::text("Acme"), SqlParam::Int(42)]
        );
    }

    #[test]
    fn respects_starting_param_index() {
        let mut builder = UpdateBuilder::new(5);
        builder.set("title", Some(SqlParam::text("Engineer")));
        let frag = builder.build().unwrap();
        assert_eq!(frag.clause, "\"title\" = $5");
    }

    #[test]
    fn empty_update_is_an_error() {
        let mut builder = UpdateBuilder::new(1);
        builder.set("name", None);
        assert_eq!(builder.build().unwrap_err(), FilterError::EmptyUpdate);
    }
}
