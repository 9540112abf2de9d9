use std::path::Path;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::VerifyArgs;
use crate::model::{PageFindings, VerifyReport};
use crate::parsing::{ServicePage, verify_page};
use crate::util::{
    discover_html_pages, now_utc_string, read_page, service_name_from_path, write_json_pretty,
};

pub fn run(args: VerifyArgs) -> Result<()> {
    let report = build_report(&args.html_dir)?;

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote verification report");
    }

    if report.failing_page_count > 0 {
        bail!(
            "incorrect table assumptions found in {} of {} pages",
            report.failing_page_count,
            report.page_count
        );
    }

    info!(page_count = report.page_count, "all pages verified");
    Ok(())
}

/// Verifies every page under `html_dir` and keeps only pages with findings.
pub fn build_report(html_dir: &Path) -> Result<VerifyReport> {
    let pages = discover_html_pages(html_dir)?;
    if pages.is_empty() {
        bail!("no service pages found in {}", html_dir.display());
    }

    let mut failing = Vec::new();
    for path in &pages {
        let findings = verify_file(path)?;
        if !findings.problems.is_empty() {
            failing.push(findings);
        }
    }

    Ok(VerifyReport {
        manifest_version: 1,
        generated_at: now_utc_string(),
        html_directory: html_dir.display().to_string(),
        page_count: pages.len(),
        failing_page_count: failing.len(),
        pages: failing,
    })
}

pub fn verify_file(path: &Path) -> Result<PageFindings> {
    let service = service_name_from_path(path)?;
    let page = ServicePage::parse(&read_page(path)?);
    let problems = verify_page(&page);

    for problem in &problems {
        warn!(
            service = %service,
            problem = %problem.problem_description,
            html = %problem.html,
            "table assumption violated"
        );
    }

    Ok(PageFindings {
        service,
        source_file: path.display().to_string(),
        problems,
    })
}
