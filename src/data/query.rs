//! Back-end independent description of a school lookup.

use serde::Serialize;

use crate::core::{IncomeBracket, School};

/// Columns a query may filter or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    Id,
    Name,
    State,
    NoLoanPolicy,
    MeetsFullNeed,
    Gap(IncomeBracket),
}

impl Column {
    /// Dataset column name
    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::State => "state",
            Column::NoLoanPolicy => "no_loan_policy",
            Column::MeetsFullNeed => "meets_full_need",
            Column::Gap(bracket) => bracket.column_name(),
        }
    }

    /// Numeric value of this column on a record, for range filters and sorting
    pub(crate) fn number(&self, school: &School) -> Option<f64> {
        match self {
            Column::Gap(bracket) => bracket.gap_of(school),
            _ => None,
        }
    }

    pub(crate) fn is_null(&self, school: &School) -> bool {
        match self {
            Column::Id => school.id.is_empty(),
            Column::Name => school.name.is_empty(),
            Column::State => school.state.is_none(),
            Column::NoLoanPolicy | Column::MeetsFullNeed => false,
            Column::Gap(bracket) => bracket.gap_of(school).is_none(),
        }
    }

    pub(crate) fn matches(&self, school: &School, value: &FilterValue) -> bool {
        match (self, value) {
            (Column::Id, FilterValue::Text(v)) => school.id == *v,
            (Column::Name, FilterValue::Text(v)) => school.name == *v,
            (Column::State, FilterValue::Text(v)) => school
                .state
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(v)),
            (Column::NoLoanPolicy, FilterValue::Flag(v)) => school.no_loan_policy == *v,
            (Column::MeetsFullNeed, FilterValue::Flag(v)) => school.meets_full_need == *v,
            (Column::Gap(bracket), FilterValue::Number(v)) => bracket.gap_of(school) == Some(*v),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
    Number(f64),
}

impl FilterValue {
    /// Literal form used in query strings
    pub fn literal(&self) -> String {
        match self {
            FilterValue::Text(text) => text.clone(),
            FilterValue::Flag(flag) => flag.to_string(),
            FilterValue::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Filter {
    /// Exact match
    Eq(Column, FilterValue),
    /// Case-insensitive substring match on the school name
    NameContains(String),
    /// `column <= value`; rows where the column is null never match
    AtMost(Column, f64),
    NotNull(Column),
    IdIn(Vec<String>),
}

impl Filter {
    pub fn matches(&self, school: &School) -> bool {
        match self {
            Filter::Eq(column, value) => column.matches(school, value),
            Filter::NameContains(needle) => school
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Filter::AtMost(column, max) => column.number(school).is_some_and(|v| v <= *max),
            Filter::NotNull(column) => !column.is_null(school),
            Filter::IdIn(ids) => ids.iter().any(|id| *id == school.id),
        }
    }
}

/// Filters, an optional ascending sort and an optional row limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchoolQuery {
    pub filters: Vec<Filter>,
    pub order_by: Option<Column>,
    pub limit: Option<usize>,
}

impl SchoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_ascending(mut self, column: Column) -> Self {
        self.order_by = Some(column);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, school: &School) -> bool {
        self.filters.iter().all(|filter| filter.matches(school))
    }

    /// Schools with a reported gap for `criteria.bracket`, cheapest first.
    pub fn affordability_search(criteria: &SearchCriteria, limit: usize) -> Self {
        let gap = Column::Gap(criteria.bracket);
        let mut query = Self::new()
            .filter(Filter::NotNull(gap))
            .order_ascending(gap)
            .limit(limit);

        if let Some(max_gap) = criteria.max_gap {
            query = query.filter(Filter::AtMost(gap, max_gap));
        }
        if criteria.no_loan_only {
            query = query.filter(Filter::Eq(Column::NoLoanPolicy, FilterValue::Flag(true)));
        }
        if let Some(state) = criteria.state.as_deref() {
            query = query.filter(Filter::Eq(
                Column::State,
                FilterValue::Text(state.to_ascii_uppercase()),
            ));
        }
        query
    }

    /// Quick lookup by partial name, used to find schools to compare.
    pub fn name_search(text: &str, limit: usize) -> Self {
        Self::new()
            .filter(Filter::NameContains(text.trim().to_string()))
            .limit(limit)
    }

    pub fn by_ids(ids: &[String]) -> Self {
        Self::new().filter(Filter::IdIn(ids.to_vec()))
    }

    pub fn by_id(id: &str) -> Self {
        Self::new()
            .filter(Filter::Eq(Column::Id, FilterValue::Text(id.to_string())))
            .limit(1)
    }
}

/// What a family asked for on the search screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchCriteria {
    pub bracket: IncomeBracket,
    pub max_gap: Option<f64>,
    pub no_loan_only: bool,
    /// Two-letter state code
    pub state: Option<String>,
}
