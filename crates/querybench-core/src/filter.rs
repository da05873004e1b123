//! WHERE-clause fragment templating.
//!
//! Filters are plain string substitution into query templates. Values are
//! inserted as SQL literals with single quotes doubled; there is no full
//! parameterization, so templated queries are only as safe as the literal
//! escaping.

/// A single optional WHERE-clause fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    Equals { column: String, value: String },
    Between { column: String, low: f64, high: f64 },
}

impl FilterClause {
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        FilterClause::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn between(column: impl Into<String>, low: f64, high: f64) -> Self {
        FilterClause::Between {
            column: column.into(),
            low,
            high,
        }
    }

    /// The bare condition, without a leading AND.
    pub fn condition(&self) -> String {
        match self {
            FilterClause::Equals { column, value } => {
                format!("{} = '{}'", column, escape_literal(value))
            }
            FilterClause::Between { column, low, high } => {
                format!("{} BETWEEN {} AND {}", column, low, high)
            }
        }
    }

    /// The fragment as substituted into templates: `AND <condition>`.
    pub fn fragment(&self) -> String {
        format!("AND {}", self.condition())
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Named filter slots matched against `{name}` placeholders in templates.
///
/// Unset slots substitute as the empty string, so templates render cleanly
/// whether or not a filter is active.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    slots: Vec<(String, Option<FilterClause>)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a slot. Re-declaring a name replaces the earlier clause.
    pub fn set(&mut self, name: impl Into<String>, clause: Option<FilterClause>) {
        let name = name.into();
        if let Some(slot) = self.slots.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = clause;
        } else {
            self.slots.push((name, clause));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|(_, c)| c.is_none())
    }

    /// Substitute every declared `{name}` placeholder in the template.
    pub fn apply(&self, template: &str) -> String {
        let mut sql = template.to_string();
        for (name, clause) in &self.slots {
            let placeholder = format!("{{{}}}", name);
            let fragment = clause.as_ref().map(|c| c.fragment()).unwrap_or_default();
            sql = sql.replace(&placeholder, &fragment);
        }
        sql
    }

    /// Active conditions, in slot order, without the leading AND.
    pub fn conditions(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|(_, c)| c.as_ref().map(|c| c.condition()))
            .collect()
    }

    /// Attach the active conditions to a free-form query: extend an existing
    /// WHERE clause with `AND (...)`, or add one when the query has none.
    pub fn append_to(&self, sql: &str) -> String {
        let conditions = self.conditions();
        if conditions.is_empty() {
            return sql.to_string();
        }
        let base = sql.trim_end().trim_end_matches(';');
        let joined = conditions.join(" AND ");
        if contains_where_keyword(base) {
            format!("{} AND ({})", base, joined)
        } else {
            format!("{} WHERE {}", base, joined)
        }
    }
}

/// True when the query already has a WHERE keyword on any whitespace
/// boundary, including line starts in multi-line SQL.
fn contains_where_keyword(sql: &str) -> bool {
    sql.split_whitespace()
        .any(|token| token.eq_ignore_ascii_case("where"))
}
