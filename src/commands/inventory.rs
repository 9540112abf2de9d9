use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::InventoryArgs;
use crate::model::{HtmlInventoryManifest, HtmlPageEntry};
use crate::util::{
    discover_html_pages, now_utc_string, service_name_from_path, sha256_hex, write_json_pretty,
};

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.html_dir)?;

    if args.dry_run {
        info!(
            page_count = manifest.page_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.html_dir.join("html_inventory.json"));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(page_count = manifest.page_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(html_dir: &Path) -> Result<HtmlInventoryManifest> {
    let page_paths = discover_html_pages(html_dir)?;
    if page_paths.is_empty() {
        bail!("no service pages found in {}", html_dir.display());
    }

    let mut pages = Vec::with_capacity(page_paths.len());
    for path in page_paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;
        let bytes =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;

        pages.push(HtmlPageEntry {
            service: service_name_from_path(&path)?,
            sha256: sha256_hex(&bytes),
            filename,
        });
    }

    pages.sort_by(|a, b| a.service.cmp(&b.service));

    Ok(HtmlInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: html_dir.display().to_string(),
        page_count: pages.len(),
        pages,
    })
}
