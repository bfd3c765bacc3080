use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use crate::{
    config::{ConfigManager, ReportConfig},
    core::services::{LedgerService, ReportService},
    domain::{LeaveSnapshot, YearMonth},
    ledger::{DiscrepancyKind, StatementEntry},
    summary::{LedgerTotals, ThresholdPolicy},
    utils::{build_info, persistence},
};

use super::{
    output::{self, band_label, days},
    table::{Table, TableColumn},
    CliError,
};

const USAGE: &str = "Usage: leave_ledger_cli <command>\n\
Commands:\n  \
ledger [snapshot.json] <employee> <from YYYY-MM> <to YYYY-MM>\n  \
statement [snapshot.json] <employee> <from YYYY-MM> <to YYYY-MM>\n  \
balances [snapshot.json] <YYYY-MM>\n  \
warnings [snapshot.json] <YYYY-MM> [threshold]\n  \
yearly [snapshot.json] <employee>\n  \
reconcile [snapshot.json]\n  \
version\n\
[snapshot.json] may be omitted when `default_snapshot` is set in the config file.";

pub fn usage() -> &'static str {
    USAGE
}

/// Dispatches one command line.
pub fn run(args: &[String]) -> Result<(), CliError> {
    let (command, rest) = args
        .split_first()
        .ok_or_else(|| CliError::Usage("missing command".into()))?;
    let config = ConfigManager::new().load()?;

    match command.as_str() {
        "ledger" => cmd_ledger(rest, &config),
        "statement" => cmd_statement(rest, &config),
        "balances" => cmd_balances(rest, &config),
        "warnings" => cmd_warnings(rest, &config),
        "yearly" => cmd_yearly(rest, &config),
        "reconcile" => cmd_reconcile(rest, &config),
        "version" => {
            output::info(build_info::current().summary());
            Ok(())
        }
        other => Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str, CliError> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("missing <{name}>")))
}

/// Loads the snapshot named by the first argument, or the configured default snapshot
/// when the first argument is not a snapshot file. Returns the remaining arguments.
fn load_snapshot<'a>(
    args: &'a [String],
    config: &ReportConfig,
) -> Result<(LeaveSnapshot, &'a [String]), CliError> {
    let (path, rest) = match (args.split_first(), &config.default_snapshot) {
        (Some((first, rest)), _) if is_snapshot_path(first) => (PathBuf::from(first), rest),
        (_, Some(default)) => {
            tracing::debug!(path = %default.display(), "using default snapshot");
            (default.clone(), args)
        }
        (Some((first, rest)), None) => (PathBuf::from(first), rest),
        (None, None) => return Err(CliError::Usage("missing <snapshot.json>".into())),
    };
    Ok((persistence::load_snapshot_from_file(&path)?, rest))
}

fn is_snapshot_path(raw: &str) -> bool {
    let path = Path::new(raw);
    path.is_file()
        || path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn month_arg(args: &[String], idx: usize, name: &str) -> Result<YearMonth, CliError> {
    Ok(arg(args, idx, name)?.parse()?)
}

fn cmd_ledger(args: &[String], config: &ReportConfig) -> Result<(), CliError> {
    let (snapshot, args) = load_snapshot(args, config)?;
    let code = arg(args, 0, "employee")?;
    let from = month_arg(args, 1, "from")?;
    let to = month_arg(args, 2, "to")?;
    let builder = LedgerService::builder(&snapshot, code, from, to)?;
    let scale = config.display_scale;

    output::section(format!(
        "Leave ledger: {} {} ({from} to {to})",
        builder.employee().code,
        builder.employee().name
    ));
    let mut table = Table::new(vec![
        TableColumn::left("Period"),
        TableColumn::right("Balance B/F"),
        TableColumn::right("Accrued"),
        TableColumn::right("Taken"),
        TableColumn::right("Balance C/F"),
        TableColumn::left(""),
    ]);
    let mut overdrawn = 0;
    for row in builder.rows() {
        let flag = if row.went_negative {
            overdrawn += 1;
            "overdrawn".to_string()
        } else {
            String::new()
        };
        table.push(vec![
            row.period.to_string(),
            days(row.balance_bf, scale),
            days(row.days_accrued, scale),
            days(row.days_taken, scale),
            days(row.balance_cf, scale),
            flag,
        ]);
    }
    output::info(table.render());
    output::info(format!(
        "Closing balance: {}",
        days(builder.closing_balance(), scale)
    ));
    if overdrawn > 0 {
        output::warning(format!("{overdrawn} period(s) overdrawn"));
    }
    Ok(())
}

fn cmd_statement(args: &[String], config: &ReportConfig) -> Result<(), CliError> {
    let (snapshot, args) = load_snapshot(args, config)?;
    let code = arg(args, 0, "employee")?;
    let from = month_arg(args, 1, "from")?;
    let to = month_arg(args, 2, "to")?;
    let entries = LedgerService::statement(&snapshot, code, from, to)?;
    let scale = config.display_scale;

    output::section(format!("Leave statement: {code} ({from} to {to})"));
    let mut table = Table::new(vec![
        TableColumn::left("Period"),
        TableColumn::left("Entry"),
        TableColumn::right("Days"),
        TableColumn::right("Balance"),
    ]);
    for entry in &entries {
        let (label, amount) = match entry {
            StatementEntry::Opening { .. } => ("OPENING BALANCE".to_string(), String::new()),
            StatementEntry::Accrued { days: accrued, .. } => {
                ("LEAVE ACCRUED".to_string(), days(*accrued, scale))
            }
            StatementEntry::Taken {
                leave_type,
                date_from,
                date_to,
                days: taken,
                ..
            } => (
                format!("{leave_type} {date_from} to {date_to}"),
                format!("-{}", days(*taken, scale)),
            ),
            StatementEntry::Closing { .. } => ("CLOSING BALANCE".to_string(), String::new()),
        };
        table.push(vec![
            entry.period().to_string(),
            label,
            amount,
            days(entry.balance(), scale),
        ]);
    }
    output::info(table.render());
    Ok(())
}

fn totals_cells(totals: &LedgerTotals, scale: u32) -> [String; 4] {
    [
        days(totals.balance_bf, scale),
        days(totals.days_accrued, scale),
        days(totals.days_taken, scale),
        days(totals.balance_cf, scale),
    ]
}

fn cmd_balances(args: &[String], config: &ReportConfig) -> Result<(), CliError> {
    let (snapshot, args) = load_snapshot(args, config)?;
    let as_of = month_arg(args, 0, "YYYY-MM")?;
    let report = ReportService::balances(&snapshot, as_of, &config.utilization);
    let scale = config.display_scale;

    output::section(format!("Leave balances as of {as_of}"));
    let mut table = Table::new(vec![
        TableColumn::left("Code"),
        TableColumn::left("Name"),
        TableColumn::right("Entitlement"),
        TableColumn::right("B/F"),
        TableColumn::right("Accrued"),
        TableColumn::right("Taken"),
        TableColumn::right("C/F"),
        TableColumn::right("Used %"),
        TableColumn::left("Status"),
    ]);
    for department in &report.departments {
        table.push(vec![format!("[{}]", department.department)]);
        for member in &department.members {
            let mut row = vec![
                member.code.clone(),
                member.name.clone(),
                days(member.leave_entitlement, scale),
            ];
            row.extend(totals_cells(&member.totals, scale));
            let line = report
                .utilization
                .iter()
                .find(|line| line.code == member.code);
            if let Some(line) = line {
                row.push(days(line.utilization, 1));
                row.push(band_label(line.band));
            }
            table.push(row);
        }
        let mut subtotal = vec![String::new(), "Subtotal".to_string(), String::new()];
        subtotal.extend(totals_cells(&department.subtotal, scale));
        table.push(subtotal);
    }
    let mut total = vec![String::new(), "GRAND TOTAL".to_string(), String::new()];
    total.extend(totals_cells(&report.grand_total, scale));
    table.push(total);

    output::info(table.render());
    output::info(format!(
        "Critical: {}  Warning: {}  Healthy: {}",
        report.counts.critical, report.counts.warning, report.counts.healthy
    ));
    Ok(())
}

fn cmd_warnings(args: &[String], config: &ReportConfig) -> Result<(), CliError> {
    let (snapshot, args) = load_snapshot(args, config)?;
    let as_of = month_arg(args, 0, "YYYY-MM")?;
    let policy = match args.get(1) {
        Some(raw) => {
            let threshold: Decimal = raw
                .trim()
                .parse()
                .map_err(|_| CliError::Usage(format!("invalid threshold `{raw}`")))?;
            ThresholdPolicy {
                threshold,
                ..config.thresholds
            }
        }
        None => config.thresholds,
    };
    let report = ReportService::warnings(&snapshot, as_of, &policy);
    let scale = config.display_scale;

    output::section(format!(
        "Low leave balances as of {as_of} (threshold {} days)",
        days(policy.threshold, scale)
    ));
    if report.entries.is_empty() {
        output::success("No employees at or below the threshold.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Code"),
            TableColumn::left("Name"),
            TableColumn::left("Department"),
            TableColumn::right("Balance"),
            TableColumn::left("Status"),
        ]);
        for entry in &report.entries {
            table.push(vec![
                entry.code.clone(),
                entry.name.clone(),
                entry.department.clone(),
                days(entry.balance_cf, scale),
                band_label(entry.band),
            ]);
        }
        output::info(table.render());
    }
    output::info(format!(
        "Critical: {}  Warning: {}  Healthy: {}",
        report.counts.critical, report.counts.warning, report.counts.healthy
    ));
    Ok(())
}

fn cmd_yearly(args: &[String], config: &ReportConfig) -> Result<(), CliError> {
    let (snapshot, args) = load_snapshot(args, config)?;
    let code = arg(args, 0, "employee")?;
    let years = ReportService::yearly(&snapshot, code)?;
    let scale = config.display_scale;

    output::section(format!("Yearly leave summary: {code}"));
    let mut table = Table::new(vec![
        TableColumn::left("Year"),
        TableColumn::right("Months"),
        TableColumn::right("B/F"),
        TableColumn::right("Accrued"),
        TableColumn::right("Taken"),
        TableColumn::right("C/F"),
    ]);
    for year in &years {
        let mut row = vec![year.year.to_string(), year.months.to_string()];
        row.extend(totals_cells(&year.totals, scale));
        table.push(row);
    }
    output::info(table.render());
    Ok(())
}

fn cmd_reconcile(args: &[String], config: &ReportConfig) -> Result<(), CliError> {
    let (snapshot, _) = load_snapshot(args, config)?;
    let found = ReportService::reconcile(&snapshot);

    output::section("Balance reconciliation");
    if found.is_empty() {
        output::success("No discrepancies found.");
        return Ok(());
    }
    for discrepancy in &found {
        let detail = match &discrepancy.kind {
            DiscrepancyKind::Conservation { expected, recorded } => {
                format!("closing balance {recorded}, expected {expected}")
            }
            DiscrepancyKind::Continuity { expected, recorded } => {
                format!("opening balance {recorded}, previous closing {expected}")
            }
            DiscrepancyKind::DaysTaken {
                applications,
                recorded,
            } => format!("days taken {recorded}, approved applications {applications}"),
            DiscrepancyKind::MissingPeriod { previous } => {
                format!("no balance row after {previous}")
            }
            DiscrepancyKind::DuplicatePeriod => "duplicate balance row".to_string(),
            DiscrepancyKind::UnpostedApplications { applications } => {
                format!("approved applications of {applications} days but no balance row")
            }
        };
        output::warning(format!(
            "{} {}: {detail}",
            discrepancy.employee_code, discrepancy.period
        ));
    }
    output::info(format!("{} discrepancy(ies) found", found.len()));
    Ok(())
}
