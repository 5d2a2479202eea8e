//! Subcommand handlers.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use properly_core::PortfolioSnapshot;
use properly_core::dashboard::{DashboardOptions, DashboardService, ManagerDashboard};
use properly_core::financial::{FinancialOverview, FinancialService};
use properly_core::rent_roll::{
    RentRollItem, RentRollOptions, RentRollQuery, RentRollService, RentStatus, SortDirection,
};
use properly_core::reports::{
    Cell, PropertyScope, ReportError, ReportFilter, ReportKind, ReportService, ReportTable,
    to_csv,
};
use properly_core::snapshot::SnapshotIndex;
use properly_shared::types::OwnerId;
use properly_shared::types::money::format_usd;
use properly_shared::{AppConfig, AppError, DuplicatePaymentPolicy};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, Command, OutputFormat, SortColumn};
use crate::render::{write_note, write_table};

/// Settings shared by every subcommand.
struct Context {
    config: AppConfig,
    snapshot: PortfolioSnapshot,
    now: DateTime<Utc>,
    format: OutputFormat,
    limit: usize,
}

/// Runs the parsed command, writing results to stdout.
pub fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    if matches!(cli.command, Command::Reports) {
        return list_reports(&mut io::stdout().lock());
    }

    let path = cli
        .snapshot
        .unwrap_or_else(|| PathBuf::from(&config.snapshot.path));
    let snapshot = load_snapshot(&path)?;
    let ctx = Context {
        limit: cli.limit.unwrap_or(config.report.preview_row_limit),
        now: cli.now.unwrap_or_else(Utc::now),
        format: cli.format,
        snapshot,
        config,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::RentRoll {
            property,
            status,
            search,
            sort,
            desc,
            reject_duplicates,
        } => {
            let query = rent_roll_query(property, status, search, sort, desc);
            rent_roll(&ctx, &query, reject_duplicates, &mut out)
        }
        Command::Report {
            kind,
            from,
            to,
            property,
            owner,
        } => {
            let owner_id = owner
                .map(|text| resolve_owner(&ctx.snapshot, &text))
                .transpose()?;
            let filter = ReportFilter {
                date_from: from,
                date_to: to,
                property: property.map(PropertyScope::from).unwrap_or_default(),
                owner_id,
            };
            report(&ctx, kind, &filter, &mut out)
        }
        Command::Overview { owner, year } => {
            let owner_id = resolve_owner(&ctx.snapshot, &owner)?;
            overview(&ctx, owner_id, year.unwrap_or_else(|| ctx.now.year()), &mut out)
        }
        Command::Dashboard => dashboard(&ctx, &mut out),
        Command::Projects { property } => {
            projects(&ctx, &property.map(PropertyScope::from).unwrap_or_default(), &mut out)
        }
        Command::Reports => list_reports(&mut out),
    }
}

/// Reads and parses the snapshot file.
pub fn load_snapshot(path: &Path) -> Result<PortfolioSnapshot, AppError> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Snapshot(format!("{}: {e}", path.display())))?;
    let snapshot = PortfolioSnapshot::from_json(&json)
        .map_err(|e| AppError::Snapshot(format!("{}: {e}", path.display())))?;

    info!(
        path = %path.display(),
        properties = snapshot.properties.len(),
        leases = snapshot.leases.len(),
        payments = snapshot.payments.len(),
        transactions = snapshot.transactions.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Finds an owner by id or by name, ignoring case.
pub fn resolve_owner(snapshot: &PortfolioSnapshot, text: &str) -> Result<OwnerId, AppError> {
    let wanted = text.trim();
    let by_id = wanted.parse::<OwnerId>().ok();
    snapshot
        .owners
        .iter()
        .find(|owner| Some(owner.id) == by_id || owner.name.eq_ignore_ascii_case(wanted))
        .map(|owner| owner.id)
        .ok_or_else(|| AppError::NotFound(format!("owner '{wanted}'")))
}

fn rent_roll_query(
    property: Option<String>,
    status: Option<RentStatus>,
    search: Option<String>,
    sort: SortColumn,
    desc: bool,
) -> RentRollQuery {
    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let mut query = RentRollQuery::new()
        .property(property.map(PropertyScope::from).unwrap_or_default())
        .sort_by(sort.into(), direction);
    if let Some(status) = status {
        query = query.status(status);
    }
    if let Some(search) = search {
        query = query.search(search);
    }
    query
}

fn rent_roll<W: Write>(
    ctx: &Context,
    query: &RentRollQuery,
    reject_duplicates: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut options = RentRollOptions::from(&ctx.config.report);
    if reject_duplicates {
        options.duplicate_policy = DuplicatePaymentPolicy::Reject;
    }

    let roll = RentRollService::derive(&ctx.snapshot, ctx.now, options);
    let rows = query.apply(&roll.items);
    let summary = RentRollService::summarize(rows.iter().copied());

    match ctx.format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "asOf": roll.as_of,
                "period": roll.period,
                "items": rows,
                "summary": summary,
                "diagnostics": roll.diagnostics,
            });
            write_json(out, &body)?;
        }
        OutputFormat::Csv => {
            let table = rent_roll_table(&roll.period.to_string(), &rows);
            out.write_all(to_csv(&table).map_err(report_error)?.as_bytes())?;
        }
        OutputFormat::Table => {
            write_table(out, &rent_roll_table(&roll.period.to_string(), &rows), ctx.limit)?;
            writeln!(out)?;
            writeln!(out, "Total rent:      {}", format_usd(summary.total_rent))?;
            writeln!(out, "Collected:       {}", format_usd(summary.total_collected))?;
            writeln!(out, "Overdue:         {}", format_usd(summary.total_overdue))?;
            writeln!(out, "Collection rate: {:.2}%", summary.collection_rate)?;
            write_note(out, &roll.diagnostics)?;
        }
    }
    Ok(())
}

fn rent_roll_table(period: &str, rows: &[&RentRollItem]) -> ReportTable {
    let cells = rows
        .iter()
        .map(|item| {
            vec![
                Cell::text(&item.tenant_name),
                Cell::text(&item.property_name),
                Cell::text(&item.unit_name),
                Cell::Money(item.rent),
                Cell::Money(item.balance),
                Cell::Date(item.due_date),
                Cell::text(item.status.label()),
            ]
        })
        .collect();
    ReportTable::new(
        format!("Rent Roll, {period}"),
        ReportKind::RentRoll.columns(),
        cells,
    )
}

fn report<W: Write>(
    ctx: &Context,
    kind: ReportKind,
    filter: &ReportFilter,
    out: &mut W,
) -> anyhow::Result<()> {
    let options = RentRollOptions::from(&ctx.config.report);
    let output = ReportService::build(kind, &ctx.snapshot, filter, ctx.now, options)
        .map_err(report_error)?;
    info!(report = kind.slug(), rows = output.table.rows.len(), "report built");

    match ctx.format {
        OutputFormat::Json => write_json(out, &output)?,
        OutputFormat::Csv => out.write_all(to_csv(&output.table).map_err(report_error)?.as_bytes())?,
        OutputFormat::Table => {
            write_table(out, &output.table, ctx.limit)?;
            write_note(out, &output.diagnostics)?;
        }
    }
    Ok(())
}

fn report_error(err: ReportError) -> AppError {
    match err {
        ReportError::InvalidDateRange { .. } | ReportError::UnknownReport(_) => {
            AppError::Validation(err.to_string())
        }
        ReportError::Csv(_) | ReportError::Encoding => AppError::Export(err.to_string()),
    }
}

fn list_reports<W: Write>(out: &mut W) -> anyhow::Result<()> {
    let width = ReportKind::ALL
        .iter()
        .map(|kind| kind.slug().len())
        .max()
        .unwrap_or_default();
    for kind in ReportKind::ALL {
        writeln!(out, "{:<width$}  {}", kind.slug(), kind.title())?;
    }
    Ok(())
}

fn overview<W: Write>(
    ctx: &Context,
    owner_id: OwnerId,
    year: i32,
    out: &mut W,
) -> anyhow::Result<()> {
    let overview = FinancialService::overview(&ctx.snapshot, owner_id, year);
    match ctx.format {
        OutputFormat::Json => write_json(out, &overview)?,
        OutputFormat::Csv => {
            return Err(AppError::Validation("overview has no CSV form; use a report".into()).into());
        }
        OutputFormat::Table => write_overview(out, &overview, ctx.limit)?,
    }
    Ok(())
}

fn write_overview<W: Write>(
    out: &mut W,
    overview: &FinancialOverview,
    limit: usize,
) -> io::Result<()> {
    let summary = &overview.summary;
    writeln!(out, "Financial overview {}", overview.year)?;
    writeln!(out, "Total revenue:  {}", format_usd(summary.total_revenue))?;
    writeln!(out, "Total expenses: {}", format_usd(summary.total_expenses))?;
    writeln!(out, "NOI:            {}", format_usd(summary.noi))?;
    writeln!(out, "Profit margin:  {:.2}%", summary.profit_margin)?;
    writeln!(out)?;

    let monthly = overview
        .monthly
        .months
        .iter()
        .map(|m| {
            vec![
                Cell::text(&m.month),
                Cell::Money(m.income),
                Cell::Money(m.expenses),
            ]
        })
        .collect();
    write_table(
        out,
        &ReportTable::new("Monthly", &["Month", "Income", "Expenses"], monthly),
        limit,
    )?;

    for (title, items) in [
        ("Income by type", &overview.income_breakdown),
        ("Expenses by type", &overview.expense_breakdown),
    ] {
        writeln!(out)?;
        let rows = items
            .iter()
            .map(|item| vec![Cell::text(&item.label), Cell::Money(item.amount)])
            .collect();
        write_table(out, &ReportTable::new(title, &["Type", "Amount"], rows), limit)?;
    }

    writeln!(out)?;
    let properties = overview
        .properties
        .iter()
        .map(|p| {
            vec![
                Cell::text(&p.property_name),
                Cell::Money(p.revenue),
                Cell::Money(p.expenses),
                Cell::Money(p.noi),
            ]
        })
        .collect();
    write_table(
        out,
        &ReportTable::new(
            "Properties",
            &["Property", "Revenue", "Expenses", "NOI"],
            properties,
        ),
        limit,
    )?;
    write_note(out, &overview.diagnostics)
}

fn dashboard<W: Write>(ctx: &Context, out: &mut W) -> anyhow::Result<()> {
    let dashboard =
        DashboardService::manager(&ctx.snapshot, ctx.now, DashboardOptions::from(&ctx.config.report));
    match ctx.format {
        OutputFormat::Json => write_json(out, &dashboard)?,
        OutputFormat::Csv => {
            return Err(AppError::Validation("dashboard has no CSV form; use a report".into()).into());
        }
        OutputFormat::Table => write_dashboard(out, &dashboard, ctx.limit)?,
    }
    Ok(())
}

fn write_dashboard<W: Write>(
    out: &mut W,
    dashboard: &ManagerDashboard,
    limit: usize,
) -> io::Result<()> {
    let rent = &dashboard.rent_collection;
    let occupancy = &dashboard.occupancy;
    writeln!(out, "Dashboard for {}", dashboard.period)?;
    writeln!(
        out,
        "Rent collected:    {} of {} ({:.2}%)",
        format_usd(rent.total_collected),
        format_usd(rent.total_rent),
        rent.collection_rate
    )?;
    writeln!(out, "Overdue:           {}", format_usd(rent.total_overdue))?;
    writeln!(
        out,
        "Occupancy:         {:.2}% ({} of {} units)",
        occupancy.occupancy_percentage, occupancy.occupied_units, occupancy.total_units
    )?;
    writeln!(out, "Monthly revenue:   {}", format_usd(occupancy.revenue))?;
    writeln!(
        out,
        "Maintenance:       {} open, {} urgent",
        dashboard.maintenance.open, dashboard.maintenance.urgent
    )?;
    writeln!(out)?;

    let expiring = dashboard
        .expiring_leases
        .iter()
        .map(|lease| {
            vec![
                Cell::text(&lease.tenant_name),
                Cell::text(&lease.property_name),
                Cell::text(&lease.unit_name),
                Cell::Date(lease.end_date),
                Cell::Count(usize::try_from(lease.days_left).unwrap_or_default()),
            ]
        })
        .collect();
    write_table(
        out,
        &ReportTable::new(
            "Expiring leases",
            &["Tenant", "Property", "Unit", "End Date", "Days Left"],
            expiring,
        ),
        limit,
    )?;

    writeln!(out)?;
    let due = dashboard
        .due_tenants
        .iter()
        .map(|item| {
            vec![
                Cell::text(&item.tenant_name),
                Cell::text(&item.unit_name),
                Cell::Money(item.balance),
                Cell::Date(item.due_date),
                Cell::text(item.status.label()),
            ]
        })
        .collect();
    write_table(
        out,
        &ReportTable::new(
            "Rent due",
            &["Tenant", "Unit", "Balance", "Due Date", "Status"],
            due,
        ),
        limit,
    )?;

    writeln!(out)?;
    let vacant = dashboard
        .vacant_units
        .iter()
        .map(|unit| {
            vec![
                Cell::text(&unit.property_name),
                Cell::text(&unit.building_name),
                Cell::text(&unit.unit_name),
                Cell::Money(unit.market_rent),
            ]
        })
        .collect();
    write_table(
        out,
        &ReportTable::new(
            "Vacant units",
            &["Property", "Building", "Unit", "Market Rent"],
            vacant,
        ),
        limit,
    )?;

    writeln!(out)?;
    let urgent = dashboard
        .urgent_requests
        .iter()
        .map(|request| {
            vec![
                Cell::text(&request.issue),
                Cell::text(&request.property_name),
                Cell::text_or_empty(request.unit_name.as_deref()),
                Cell::text(request.priority.label()),
                Cell::Date(request.submitted_date),
            ]
        })
        .collect();
    write_table(
        out,
        &ReportTable::new(
            "Urgent maintenance",
            &["Issue", "Property", "Unit", "Priority", "Submitted"],
            urgent,
        ),
        limit,
    )?;
    write_note(out, &dashboard.diagnostics)
}

fn projects<W: Write>(ctx: &Context, scope: &PropertyScope, out: &mut W) -> anyhow::Result<()> {
    let index = SnapshotIndex::new(&ctx.snapshot);
    let selected: Vec<_> = ctx
        .snapshot
        .capital_projects
        .iter()
        .filter_map(|project| {
            let property = index.property(project.property_id)?;
            scope.matches(&property.name).then_some((project, property))
        })
        .collect();

    if ctx.format == OutputFormat::Json {
        let body: Vec<_> = selected
            .iter()
            .map(|(project, property)| {
                serde_json::json!({
                    "project": project,
                    "propertyName": property.name,
                    "actualCost": project.actual_cost(),
                    "remainingBudget": project.remaining_budget(),
                    "overBudget": project.is_over_budget(),
                })
            })
            .collect();
        return write_json(out, &body);
    }

    let rows = selected
        .iter()
        .map(|(project, property)| {
            vec![
                Cell::text(&project.name),
                Cell::text(&property.name),
                Cell::text(project.status.label()),
                Cell::Money(project.budget),
                Cell::Money(project.actual_cost()),
                Cell::Money(project.remaining_budget()),
                Cell::text(if project.is_over_budget() { "Yes" } else { "No" }),
            ]
        })
        .collect();
    let table = ReportTable::new(
        "Capital Projects",
        &[
            "Name",
            "Property",
            "Status",
            "Budget",
            "Actual Cost",
            "Remaining",
            "Over Budget",
        ],
        rows,
    );

    if ctx.format == OutputFormat::Csv {
        out.write_all(to_csv(&table).map_err(report_error)?.as_bytes())?;
    } else {
        write_table(out, &table, ctx.limit)?;
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
