use serde::Serialize;

use crate::pagination::Pagination;

/// Sort directive on the derived salary (`hours_worked * hour_cost`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SalaryOrder {
    #[default]
    Insertion,
    Asc,
    Desc,
}

impl SalaryOrder {
    /// `"asc"` and `"desc"` select a direction; anything else keeps insertion order.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => Self::Insertion,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insertion => "",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Normalized listing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub pagination: Pagination,
    /// Case-sensitive substring of `name`; empty matches everything.
    pub query: String,
    pub order: SalaryOrder,
}

impl ListQuery {
    pub fn new(page: u64, query: impl Into<String>, order: SalaryOrder) -> Self {
        Self { pagination: Pagination::new(page), query: query.into(), order }
    }

    /// Build from raw query-string values, defaulting anything malformed.
    pub fn from_raw(page: Option<&str>, query: Option<&str>, order_by: Option<&str>) -> Self {
        Self {
            pagination: Pagination::from_raw(page),
            query: query.unwrap_or_default().to_string(),
            order: SalaryOrder::parse(order_by.unwrap_or_default()),
        }
    }
}

/// One page of the filtered listing, in the wire shape of `GET /employee`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmployeePage {
    pub employees: Vec<models::employee::Model>,
    pub current_page: u64,
    pub total_employees: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_parse_is_strict() {
        assert_eq!(SalaryOrder::parse("asc"), SalaryOrder::Asc);
        assert_eq!(SalaryOrder::parse("desc"), SalaryOrder::Desc);
        assert_eq!(SalaryOrder::parse("ASC"), SalaryOrder::Insertion);
        assert_eq!(SalaryOrder::parse(""), SalaryOrder::Insertion);
        assert_eq!(SalaryOrder::parse("salary"), SalaryOrder::Insertion);
    }

    #[test]
    fn from_raw_applies_defaults() {
        let q = ListQuery::from_raw(None, None, None);
        assert_eq!(q, ListQuery::new(1, "", SalaryOrder::Insertion));

        let q = ListQuery::from_raw(Some("3"), Some("an"), Some("desc"));
        assert_eq!(q.pagination.page, 3);
        assert_eq!(q.query, "an");
        assert_eq!(q.order, SalaryOrder::Desc);
    }
}
