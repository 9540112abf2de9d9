use std::fs;
use std::path::{Path, PathBuf};

use super::{inventory, parse, verify};
use crate::cli::ParseArgs;
use crate::model::ServiceDefinition;

const CLEAN_PAGE: &str = r##"<html><body>
<p>Amazon SQS (service prefix: <code class="code">sqs</code>) provides the following resources.</p>
<table>
<thead><tr><th>Actions</th><th>Description</th><th>Access level</th><th>Resource types (*required)</th><th>Condition keys</th><th>Dependent actions</th></tr></thead>
<tbody>
<tr>
<td><a href="#send">SendMessage</a></td>
<td>Grants permission to deliver a message to a queue</td>
<td>Write</td>
<td><a href="#queue">queue*</a></td>
<td></td>
<td></td>
</tr>
</tbody>
</table>
<p>Amazon SQS has no service-specific context keys that can be used in the Condition element of policy statements.</p>
</body></html>"##;

const BROKEN_PAGE: &str = r##"<html><body>
<table>
<thead><tr><th>Actions</th><th>Description</th><th>Access level</th><th>Resource types (*required)</th><th>Condition keys</th><th>Dependent actions</th></tr></thead>
<tbody>
<tr><td colspan="2">Broken</td><td>Write</td><td></td><td></td><td></td></tr>
</tbody>
</table>
</body></html>"##;

struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "service-authz-parser-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("scratch dir should be created");
        Self { path }
    }

    fn write(&self, file: &str, contents: &str) {
        fs::write(self.path.join(file), contents).expect("fixture should be written");
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[test]
fn inventory_skips_index_and_non_html_files() {
    let dir = ScratchDir::new("inventory");
    dir.write("sqs.html", CLEAN_PAGE);
    dir.write("index.html", "<html></html>");
    dir.write("notes.txt", "ignored");

    let manifest = inventory::build_manifest(dir.path()).expect("inventory builds");

    assert_eq!(manifest.page_count, 1);
    assert_eq!(manifest.pages[0].service, "sqs");
    assert_eq!(manifest.pages[0].filename, "sqs.html");
    assert_eq!(manifest.pages[0].sha256.len(), 64);
}

#[test]
fn verify_report_lists_only_failing_pages() {
    let dir = ScratchDir::new("verify");
    dir.write("sqs.html", CLEAN_PAGE);
    dir.write("broken.html", BROKEN_PAGE);

    let report = verify::build_report(dir.path()).expect("report builds");

    assert_eq!(report.page_count, 2);
    assert_eq!(report.failing_page_count, 1);
    assert_eq!(report.pages[0].service, "broken");
    assert_eq!(report.pages[0].problems.len(), 1);
    assert_eq!(report.pages[0].problems[0].problem_description, "found colspan");
}

#[test]
fn parse_writes_definitions_and_run_manifest() {
    let html = ScratchDir::new("parse-html");
    let output = ScratchDir::new("parse-json");
    html.write("sqs.html", CLEAN_PAGE);

    parse::run(ParseArgs {
        html_dir: html.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        manifest_path: None,
    })
    .expect("parse run succeeds");

    let raw = fs::read(output.path().join("sqs.json")).expect("definition written");
    let definition: ServiceDefinition =
        serde_json::from_slice(&raw).expect("definition deserializes");
    assert_eq!(definition.name, "sqs");
    assert_eq!(definition.prefix, "sqs");
    assert_eq!(definition.actions[0].name, "SendMessage");
    assert_eq!(definition.actions[0].resource_types[0].name, "queue");
    assert!(definition.condition_keys.is_none());

    let manifest: serde_json::Value = serde_json::from_slice(
        &fs::read(output.path().join("parse_run.json")).expect("manifest written"),
    )
    .expect("manifest is json");
    assert_eq!(manifest["service_count"], 1);
    assert!(manifest.get("verified").is_none());
    assert_eq!(manifest["services"][0]["action_count"], 1);
}

#[test]
fn parse_aborts_the_batch_when_any_page_fails_verification() {
    let html = ScratchDir::new("abort-html");
    let output = ScratchDir::new("abort-json");
    html.write("sqs.html", CLEAN_PAGE);
    html.write("broken.html", BROKEN_PAGE);

    let result = parse::run(ParseArgs {
        html_dir: html.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        manifest_path: None,
    });

    assert!(result.is_err());
    assert!(!output.path().join("sqs.json").exists());
}
