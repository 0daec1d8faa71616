use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use ptab_diff::{CellDiff, Classification, DiffSummary, RowDiff};
use ptab_sdk::{CompareRequest, Comparison, FsRowStore, PriceTables, SaveRequest, SdkConfig};
use ptab_types::{default_version_name, Row, VersionId, VersionMeta};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config_path();
    let config = SdkConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    debug!(path = %config_path.display(), "configuration loaded");

    if let Command::Config(_) = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let store = FsRowStore::open(&cli.root)
        .await
        .with_context(|| format!("opening {}", cli.root.display()))?;
    let tables = PriceTables::new(Arc::new(store), config);
    let format = cli.format;

    match cli.command {
        Command::Import(args) => cmd_import(&tables, args, format).await,
        Command::List(_) => cmd_list(&tables, format).await,
        Command::Show(args) => cmd_show(&tables, args, format).await,
        Command::Compare(args) => cmd_compare(&tables, args, format).await,
        Command::Delete(args) => cmd_delete(&tables, args).await,
        Command::Config(_) => Ok(()),
    }
}

async fn cmd_import(
    tables: &PriceTables,
    args: ImportArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    let name = version_name(&args, chrono::Local::now().date_naive());

    let mut request = SaveRequest::new(name, Vec::new())
        .with_category(args.category)
        .with_partner(args.partner)
        .with_region(args.region);
    if let Some(id) = args.id {
        request = request.with_id(VersionId::new(id));
    }

    let id = tables.import_json(request, &text).await?;
    let doc = tables.load_version(&id).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc.meta)?),
        OutputFormat::Text => println!(
            "{} Saved {} ({} rows) as {}",
            "✓".green().bold(),
            doc.meta.label().bold(),
            doc.rows.len(),
            id.as_str().yellow()
        ),
    }
    Ok(())
}

fn version_name(args: &ImportArgs, today: chrono::NaiveDate) -> String {
    match &args.name {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ => default_version_name(&args.category, &args.partner, &args.region, today),
    }
}

async fn cmd_list(tables: &PriceTables, format: OutputFormat) -> anyhow::Result<()> {
    let versions = tables.list_versions().await?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
        return Ok(());
    }
    if versions.is_empty() {
        println!("No versions stored.");
        return Ok(());
    }
    for meta in &versions {
        println!("{}  {}  {}", meta.id.as_str().yellow(), meta.label(), updated(meta).dimmed());
    }
    Ok(())
}

fn updated(meta: &VersionMeta) -> String {
    meta.updated_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

async fn cmd_show(
    tables: &PriceTables,
    args: ShowArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let doc = tables.load_version(&VersionId::new(args.id)).await?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }
    println!("{} {}", "Version".bold(), doc.meta.label().bold());
    println!("  Id: {}", doc.meta.id.as_str().yellow());
    println!("  Updated: {}", updated(&doc.meta));
    println!("  Rows: {}", doc.rows.len());
    for row in doc.rows.iter().take(args.limit) {
        println!("  {}", row_line(row));
    }
    if doc.rows.len() > args.limit {
        println!("  {}", format!("... {} more", doc.rows.len() - args.limit).dimmed());
    }
    Ok(())
}

fn row_line(row: &Row) -> String {
    row.iter()
        .filter(|(_, v)| !v.is_blank())
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("  ")
}

async fn cmd_compare(
    tables: &PriceTables,
    args: CompareArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let left = Some(VersionId::new(args.left));
    let right = Some(VersionId::new(args.right));
    let request = CompareRequest::new(left, right)?;
    let cmp = tables.compare(&request).await?;
    let rows = cmp.visible_rows(args.filter, args.include_unchanged);

    if format == OutputFormat::Json {
        let out = json!({
            "left": cmp.left,
            "right": cmp.right,
            "summary": cmp.summary,
            "schema": cmp.diff.schema(),
            "filter": args.filter.to_string(),
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_header(&cmp);
    if rows.is_empty() {
        println!("\nNo rows to show.");
        return Ok(());
    }
    println!();
    for row in rows {
        print_row(row);
    }
    Ok(())
}

fn print_header(cmp: &Comparison) {
    println!("{} → {}", cmp.left.label().bold(), cmp.right.label().bold());
    for side in [&cmp.left, &cmp.right] {
        if side.meta.is_none() {
            println!(
                "  {} version {} not found; compared as empty",
                "!".yellow().bold(),
                side.id.as_str().yellow()
            );
        }
    }
    println!("  {}", summary_line(&cmp.summary));
    if cmp.summary.is_identical() {
        println!("{} No differences.", "✓".green().bold());
    }
}

fn summary_line(summary: &DiffSummary) -> String {
    Classification::ALL
        .iter()
        .map(|kind| format!("{kind} {}", summary.get(*kind)))
        .collect::<Vec<_>>()
        .join("  ")
}

fn print_row(row: &RowDiff) {
    let marker = match row.kind {
        Classification::Added => "+".green().bold(),
        Classification::Deleted => "-".red().bold(),
        Classification::Changed => "~".yellow().bold(),
        Classification::Same => " ".normal(),
    };
    println!("{} {}  {}", marker, row.key.bold(), row.display_name);
    for cell in row.changed_cells() {
        println!("    {}", cell_line(cell));
    }
}

fn cell_line(cell: &CellDiff) -> String {
    let before = cell.before.as_ref().map(|v| v.display()).unwrap_or_default();
    let after = cell.after.as_ref().map(|v| v.display()).unwrap_or_default();
    match cell.change_label() {
        Some(label) => format!("{}: {before} → {after} ({label})", cell.field),
        None => format!("{}: {before} → {after}", cell.field),
    }
}

async fn cmd_delete(tables: &PriceTables, args: DeleteArgs) -> anyhow::Result<()> {
    let id = VersionId::new(args.id);
    if tables.delete_version(&id).await? {
        println!("Deleted version {}", id.as_str().yellow());
    } else {
        println!("No version {}", id.as_str().yellow());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ptab_diff::diff_rows;
    use ptab_types::fields::CODE;

    fn import_args(name: Option<&str>) -> ImportArgs {
        ImportArgs {
            file: "sheet.json".into(),
            name: name.map(String::from),
            id: None,
            category: "apple".into(),
            partner: "kt".into(),
            region: "kr".into(),
        }
    }

    #[test]
    fn explicit_version_name_wins() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(version_name(&import_args(Some("march")), today), "march");
    }

    #[test]
    fn default_version_name_from_metadata() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(version_name(&import_args(None), today), "apple_kt_kr_(2024_03_05)");
        assert_eq!(version_name(&import_args(Some("  ")), today), "apple_kt_kr_(2024_03_05)");
    }

    #[test]
    fn changed_cell_line() {
        let old = [Row::new().with(CODE, "X1").with("단가", 100)];
        let new = [Row::new().with(CODE, "X1").with("단가", 120)];
        let diff = diff_rows(&old, &new);
        let cell = diff.get("X1").unwrap().cell("단가").unwrap();
        assert_eq!(cell_line(cell), "단가: 100 → 120 (+20%)");
    }

    #[test]
    fn text_cell_line_has_no_badge() {
        let old = [Row::new().with(CODE, "X1").with("비고", "a")];
        let new = [Row::new().with(CODE, "X1")];
        let diff = diff_rows(&old, &new);
        let cell = diff.get("X1").unwrap().cell("비고").unwrap();
        assert_eq!(cell_line(cell), "비고: a → ");
    }

    #[test]
    fn summary_counts_in_order() {
        let summary = DiffSummary { added: 1, deleted: 2, changed: 3, same: 4 };
        assert_eq!(summary_line(&summary), "added 1  deleted 2  changed 3  same 4");
    }

    #[test]
    fn row_line_skips_blank_values() {
        let row = Row::new().with(CODE, "X1").with("비고", "").with("단가", 100);
        assert_eq!(row_line(&row), "단가=100  코드=X1");
    }
}
