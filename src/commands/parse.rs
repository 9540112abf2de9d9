use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::info;

use crate::cli::ParseArgs;
use crate::commands::verify;
use crate::model::{ParseRunManifest, ParsedServiceEntry, ServiceDefinition};
use crate::parsing::{ServicePage, parse_service};
use crate::util::{
    discover_html_pages, ensure_directory, now_utc_string, read_page, service_name_from_path,
    sha256_hex, utc_compact_string, write_json_pretty,
};

pub fn run(args: ParseArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("parse-{}", utc_compact_string(started_ts));

    ensure_directory(&args.output_dir)?;
    let pages = discover_html_pages(&args.html_dir)?;
    if pages.is_empty() {
        bail!("no service pages found in {}", args.html_dir.display());
    }

    // Every page is checked before any is decoded so a format change stops
    // the whole batch up front.
    let report = verify::build_report(&args.html_dir)?;
    if report.failing_page_count > 0 {
        bail!(
            "incorrect table assumptions found in {} of {} pages; nothing was decoded",
            report.failing_page_count,
            report.page_count
        );
    }
    info!(page_count = report.page_count, "verified all pages");

    let mut services = Vec::with_capacity(pages.len());
    for path in &pages {
        let entry = parse_file(path, &args.output_dir)?;
        info!(
            service = %entry.service,
            actions = entry.action_count,
            "wrote service definition"
        );
        services.push(entry);
    }

    let manifest = ParseRunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        completed_at: now_utc_string(),
        html_directory: args.html_dir.display().to_string(),
        output_directory: args.output_dir.display().to_string(),
        service_count: services.len(),
        services,
    };
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| args.output_dir.join("parse_run.json"));
    write_json_pretty(&manifest_path, &manifest)?;

    info!(
        path = %manifest_path.display(),
        service_count = manifest.service_count,
        "parse completed"
    );
    Ok(())
}

fn parse_file(path: &Path, output_dir: &Path) -> Result<ParsedServiceEntry> {
    let service = service_name_from_path(path)?;
    let markup = read_page(path)?;
    let page = ServicePage::parse(&markup);

    let definition = parse_service(&service, &page)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let output_path = output_dir.join(format!("{service}.json"));
    write_json_pretty(&output_path, &definition)?;

    Ok(summarize(
        &definition,
        path,
        &output_path,
        sha256_hex(markup.as_bytes()),
    ))
}

pub fn summarize(
    definition: &ServiceDefinition,
    source: &Path,
    output: &Path,
    source_sha256: String,
) -> ParsedServiceEntry {
    ParsedServiceEntry {
        service: definition.name.clone(),
        prefix: definition.prefix.clone(),
        source_file: source.display().to_string(),
        source_sha256,
        output_file: output.display().to_string(),
        action_count: definition.actions.len(),
        scenario_action_count: definition
            .actions
            .iter()
            .filter(|action| action.scenarios.is_some())
            .count(),
        resource_type_count: definition.resource_types.as_ref().map(Vec::len),
        condition_key_count: definition.condition_keys.as_ref().map(Vec::len),
    }
}
