use super::{SqlFragment, SqlParam};

/// Optional job search criteria, AND-combined like [`CompanyFilter`].
///
/// `has_equity: Some(true)` keeps only jobs with a nonzero equity share;
/// `Some(false)` and `None` both impose no predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && !matches!(self.has_equity, Some(true))
    }

    pub fn to_where_sql(&self, starting_param_index: usize) -> SqlFragment {
        let mut conditions = vec![];
        let mut params = vec![];
        let mut idx = starting_param_index;

        if let Some(title) = &self.title {
            conditions.push(format!("\"title\" ILIKE ${}", idx));
            params.push(SqlParam::text(format!("%{}%", title)));
            idx += 1;
        }
        if let Some(min_salary) = self.min_salary {
            conditions.push(format!("\"salary\" >= ${}", idx));
            params.push(SqlParam::Int(min_salary as i64));
        }
        if self.has_equity == Some(true) {
            conditions.push("\"equity\" > 0".to_string());
        }

        SqlFragment {
            clause: conditions.join(" AND "),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_generates_nothing() {
        let frag = JobFilter::default().to_where_sql(1);
        assert!(frag.is_empty());
        assert!(frag.params.is_empty());
    }

    #[test]
    fn has_equity_true_binds_no_parameter() {
        let filter = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        let frag = filter.to_where_sql(1);
        assert_eq!(frag.clause, "\"equity\" > 0");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn has_equity_false_imposes_no_predicate() {
        let filter = JobFilter {
            has_equity: Some(false),
            ..Default::default()
        };
        assert!(filter.to_where_sql(1).is_empty());
    }

    #[test]
    fn all_filters_combine_with_and() {
        let filter = JobFilter {
            title: Some("engineer".to_string()),
            min_salary: Some(90000),
            has_equity: Some(true),
        };
        let frag = filter.to_where_sql(1);
        assert_eq!(
            frag.clause,
            "\"title\" ILIKE $1 AND \"salary\" >= $2 AND \"equity\" > 0"
        );
        assert_eq!(
            frag.params,
            vec![SqlParam::text("%engineer%"), SqlParam::Int(90000)]
        );
    }
}
