use crate::args::{Cli, CliCommand};
use crate::config::Config;
use crate::render;
use colored::Colorize;
use querybench_core::{
    catalog::sample_queries, Catalog, ExecutionRecord, FilterClause, FilterSet, History,
};
use querybench_exec::Connector;
use std::time::Duration;

pub async fn dispatch(cli: Cli, config: Config) -> anyhow::Result<()> {
    let connector = Connector::new(config.connector_config());
    let catalog = Catalog::builtin();
    let filters = filter_set(&cli);
    let timeout = Duration::from_secs(
        cli.timeout.unwrap_or(config.query.default_timeout_secs),
    );

    match cli.command {
        CliCommand::List => list(&catalog),
        CliCommand::Run { ref ids } => {
            run_templates(&connector, &catalog, &filters, ids, timeout).await?
        }
        CliCommand::Exec {
            ref sql,
            apply_filters,
        } => exec_free_form(&connector, &filters, sql, apply_filters, timeout).await,
        CliCommand::Bench => {
            let ids: Vec<String> = catalog.iter().map(|t| t.id.clone()).collect();
            run_templates(&connector, &catalog, &filters, &ids, timeout).await?
        }
        CliCommand::Ping => ping(&connector).await?,
        CliCommand::Diag => println!("{}", connector.diagnostics().await),
    }
    Ok(())
}

/// Map the CLI filter flags onto the catalog's placeholder slots.
fn filter_set(cli: &Cli) -> FilterSet {
    let mut filters = FilterSet::new();
    filters.set(
        "street_filter",
        cli.street
            .as_deref()
            .map(|s| FilterClause::equals("street_name", s)),
    );
    filters.set(
        "amount_filter",
        cli.amount_min.zip(cli.amount_max).map(|(lo, hi)| {
            FilterClause::between("calculated_fine_amount", lo, hi)
        }),
    );
    filters.set(
        "car_filter",
        cli.vehicle_make
            .as_deref()
            .map(|m| FilterClause::equals("vehicle_make", m)),
    );
    filters
}

fn list(catalog: &Catalog) {
    println!("{}", "benchmark queries".bold());
    for template in catalog.iter() {
        println!("  {:<4} {:<40} {}", template.id, template.name, template.description);
    }
    println!();
    println!("{}", "sample queries".bold());
    for sql in sample_queries() {
        println!("  {}", sql);
    }
}

async fn run_templates(
    connector: &Connector,
    catalog: &Catalog,
    filters: &FilterSet,
    ids: &[String],
    timeout: Duration,
) -> anyhow::Result<()> {
    let mut history = History::new();

    for id in ids {
        let template = catalog.get(id)?;
        let sql = filters.apply(&template.sql);
        let execution = connector.execute(&sql, timeout).await;
        let record = ExecutionRecord::new(
            template.id.clone(),
            sql,
            execution.elapsed,
            execution.success,
            execution.result_set.row_count(),
        );

        println!("{}: {}", template.id.bold(), template.name);
        if execution.success {
            println!("{}", render::result_table(&execution.result_set));
        }
        println!("{}\n", render::status_line(&template.id, record.success, record.elapsed_ms()));
        history.record(record);
    }

    if history.len() > 1 {
        println!("{}", "session summary".bold());
        println!("{}", render::history_table(&history));
    }
    Ok(())
}

async fn exec_free_form(
    connector: &Connector,
    filters: &FilterSet,
    sql: &str,
    apply_filters: bool,
    timeout: Duration,
) {
    let final_sql = if apply_filters {
        filters.append_to(sql)
    } else {
        sql.trim().to_string()
    };
    if apply_filters && final_sql != sql.trim() {
        println!("executed SQL: {}", final_sql);
    }

    let execution = connector.execute(&final_sql, timeout).await;
    if execution.success {
        println!("{}", render::result_table(&execution.result_set));
    }
    let elapsed_ms = execution.elapsed.as_secs_f64() * 1000.0;
    println!("{}", render::status_line("query", execution.success, elapsed_ms));
}

async fn ping(connector: &Connector) -> anyhow::Result<()> {
    if !connector.check_runtime().await {
        anyhow::bail!("container runtime or engine container is not available; try `querybench diag`");
    }
    if !connector.test_connection().await {
        anyhow::bail!("engine did not answer the probe query; try `querybench diag`");
    }
    println!("{} engine is reachable", "ok".green());
    Ok(())
}
