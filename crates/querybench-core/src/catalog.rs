use crate::error::QuerybenchError;

/// An immutable SQL template plus the placeholder slots it recognizes.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sql: String,
}

/// The built-in benchmark queries, in id order.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<QueryTemplate>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let templates = vec![
            QueryTemplate {
                id: "Q1".into(),
                name: "Total violations & fines summary".into(),
                description: "Overall statistics from the violations table".into(),
                sql: "SELECT COUNT(*) AS total_violations, \
                      SUM(calculated_fine_amount) AS total_fines, \
                      AVG(calculated_fine_amount) AS avg_fine, \
                      MIN(calculated_fine_amount) AS min_fine, \
                      MAX(calculated_fine_amount) AS max_fine \
                      FROM violations \
                      WHERE calculated_fine_amount > 0 \
                      {street_filter} {amount_filter} {car_filter}"
                    .into(),
            },
            QueryTemplate {
                id: "Q2".into(),
                name: "Revenue by street".into(),
                description: "Top 10 streets by revenue".into(),
                sql: "SELECT street_name, COUNT(*) AS total_violations, \
                      SUM(calculated_fine_amount) AS total_revenue, \
                      AVG(calculated_fine_amount) AS avg_fine \
                      FROM violations \
                      WHERE street_name IS NOT NULL AND street_name != '' \
                      AND calculated_fine_amount > 0 \
                      {street_filter} {amount_filter} {car_filter} \
                      GROUP BY street_name ORDER BY total_revenue DESC LIMIT 10"
                    .into(),
            },
            QueryTemplate {
                id: "Q3".into(),
                name: "Vehicle make analysis".into(),
                description: "Violations by vehicle make".into(),
                sql: "SELECT vehicle_make, COUNT(*) AS violations, \
                      AVG(calculated_fine_amount) AS avg_fine, \
                      SUM(calculated_fine_amount) AS total_fines \
                      FROM violations \
                      WHERE vehicle_make IS NOT NULL AND calculated_fine_amount > 0 \
                      {street_filter} {amount_filter} {car_filter} \
                      GROUP BY vehicle_make ORDER BY violations DESC LIMIT 10"
                    .into(),
            },
            QueryTemplate {
                id: "Q4".into(),
                name: "Yearly trend analysis".into(),
                description: "Violations by year".into(),
                sql: "SELECT EXTRACT(YEAR FROM issue_date) AS year, \
                      COUNT(*) AS violation_count, \
                      SUM(calculated_fine_amount) AS total_revenue, \
                      AVG(calculated_fine_amount) AS avg_fine \
                      FROM violations \
                      WHERE issue_date IS NOT NULL AND calculated_fine_amount > 0 \
                      AND EXTRACT(YEAR FROM issue_date) BETWEEN 2010 AND 2024 \
                      {street_filter} {amount_filter} {car_filter} \
                      GROUP BY EXTRACT(YEAR FROM issue_date) ORDER BY year"
                    .into(),
            },
            QueryTemplate {
                id: "Q5".into(),
                name: "Interactive data filtering".into(),
                description: "Filter violations by street, fine amount and vehicle make".into(),
                sql: "SELECT summons_number, street_name, calculated_fine_amount, \
                      issue_date, vehicle_make, \
                      CASE WHEN calculated_fine_amount > 100 THEN 'High Fine' \
                      WHEN calculated_fine_amount > 50 THEN 'Medium Fine' \
                      ELSE 'Low Fine' END AS fine_category \
                      FROM violations \
                      WHERE calculated_fine_amount > 0 \
                      {street_filter} {amount_filter} {car_filter} \
                      ORDER BY calculated_fine_amount DESC LIMIT 100"
                    .into(),
            },
        ];
        Self { templates }
    }

    pub fn get(&self, id: &str) -> Result<&QueryTemplate, QuerybenchError> {
        self.templates
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| QuerybenchError::UnknownQuery(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Starter queries surfaced by the CLI for free-form execution.
pub fn sample_queries() -> &'static [&'static str] {
    &[
        "SELECT COUNT(*) AS total_violations FROM violations",
        "SELECT street_name, COUNT(*) AS violations FROM violations GROUP BY street_name ORDER BY violations DESC LIMIT 10",
        "SELECT vehicle_make, AVG(calculated_fine_amount) AS avg_fine FROM violations GROUP BY vehicle_make ORDER BY avg_fine DESC LIMIT 10",
        "SELECT EXTRACT(YEAR FROM issue_date) AS year, COUNT(*) AS violations FROM violations GROUP BY EXTRACT(YEAR FROM issue_date) ORDER BY year",
        "SELECT registration_state, COUNT(*) AS violations FROM violations GROUP BY registration_state ORDER BY violations DESC LIMIT 10",
    ]
}
