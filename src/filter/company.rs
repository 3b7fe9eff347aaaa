use super::{SqlFragment, SqlParam};

/// Optional company search criteria. Each present field ANDs one
/// predicate into the WHERE clause; absent fields impose nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilter {
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
    pub name_like: Option<String>,
}

impl CompanyFilter {
    pub fn is_empty(&self) -> bool {
        self.min_employees.is_none() && self.max_employees.is_none() && self.name_like.is_none()
    }

    /// True when the caller supplied an inverted employee range.
    pub fn has_inverted_range(&self) -> bool {
        matches!(
            (self.min_employees, self.max_employees),
            (Some(min), Some(max)) if min > max
        )
    }

    pub fn to_where_sql(&self, starting_param_index: usize) -> SqlFragment {
        let mut conditions = vec![];
        let mut params = vec![];
        let mut idx = starting_param_index;

        if let Some(min) = self.min_employees {
            conditions.push(format!("\"num_employees\" >= ${}", idx));
            params.push(SqlParam::Int(min as i64));
            idx += 1;
        }
        if let Some(max) = self.max_employees {
            conditions.push(format!("\"num_employees\" <= ${}", idx));
            params.push(SqlParam::Int(max as i64));
            idx += 1;
        }
        if let Some(name) = &self.name_like {
            conditions.push(format!("\"name\" ILIKE ${}", idx));
            params.push(SqlParam::text(format!("%{}%", name)));
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
        let frag = CompanyFilter::default().to_where_sql(1);
        assert!(frag.is_empty());
        assert!(frag.params.is_empty());
    }

    #[test]
    fn single_filter_generates_one_predicate() {
        let filter = CompanyFilter {
            min_employees: Some(100),
            ..Default::default()
        };
        let frag = filter.to_where_sql(1);
        assert_eq!(frag.clause, "\"num_employees\" >= $1");
        assert_eq!(frag.params, vec![SqlParam::Int(100)]);
    }

    #[test]
    fn all_filters_combine_with_and() {
        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(500),
            name_like: Some("net".to_string()),
        };
        let frag = filter.to_where_sql(1);
        assert_eq!(
            frag.clause,
            "\"num_employees\" >= $1 AND \"num_employees\" <= $2 AND \"name\" ILIKE $3"
        );
        assert_eq!(
            frag.params,
            vec![
                SqlParam::Int(10),
                SqlParam::Int(500),
                SqlParam::text("%net%"),
            ]
        );
    }

    #[test]
    fn name_like_wraps_in_wildcards() {
        let filter = CompanyFilter {
            name_like: Some("Acme".to_string()),
            ..Default::default()
        };
        let frag = filter.to_where_sql(3);
        assert_eq!(frag.clause, "\"name\" ILIKE $3");
        assert_eq!(frag.params, vec![SqlParam::text("%Acme%")]);
    }

    #[test]
    fn inverted_range_is_detected() {
        let filter = CompanyFilter {
            min_employees: Some(500),
            max_employees: Some(10),
            ..Default::default()
        };
        assert!(filter.has_inverted_range());

        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(10),
            ..Default::default()
        };
        assert!(!filter.has_inverted_range());
    }
}
