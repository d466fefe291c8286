//! Report rendering: a static HTML view and a CSV export.
//!
//! Pure formatting of already-classified data. Both artifacts are
//! derived from the persisted report; the renderer never re-scans or
//! re-classifies anything.

use crate::error::Error;
use crate::models::report::Report;
use crate::models::{EnrichedUsage, SupportTier};
use std::fs;
use std::path::{Path, PathBuf};

pub const HTML_FILE: &str = "report.html";
pub const CSV_FILE: &str = "report.csv";

/// Read `report.json` from `dir` and write the HTML and CSV views next
/// to it. Missing or malformed input is a fatal setup failure.
pub fn run_render(dir: &Path) -> Result<(PathBuf, PathBuf), Error> {
    let report = Report::load(dir)?;
    let html_path = dir.join(HTML_FILE);
    let csv_path = dir.join(CSV_FILE);
    fs::write(&html_path, render_html(&report))?;
    fs::write(&csv_path, render_csv(&report.items))?;
    Ok((html_path, csv_path))
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn badge(tier: SupportTier) -> (&'static str, &'static str) {
    match tier {
        SupportTier::Widely => ("hi", "Widely"),
        SupportTier::Newly => ("lo", "Newly"),
        SupportTier::Unsupported => ("no", "Not in"),
        SupportTier::Unknown => ("un", "Unknown"),
    }
}

fn csv_tier(tier: SupportTier) -> &'static str {
    match tier {
        SupportTier::Widely => "high",
        SupportTier::Newly => "low",
        SupportTier::Unsupported => "false",
        SupportTier::Unknown => "",
    }
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn render_csv(items: &[EnrichedUsage]) -> String {
    let mut lines = vec!["file,loc,bcdKey,featureName,baseline,mdn,advice".to_string()];
    for item in items {
        let advice = collapse_whitespace(&item.advice);
        let fields = [
            item.file.as_str(),
            &item.loc.to_string(),
            &item.bcd_key,
            item.feature_name.as_deref().unwrap_or(""),
            csv_tier(item.baseline),
            item.mdn_url.as_deref().unwrap_or(""),
            &advice,
        ]
        .iter()
        .map(|v| csv_quote(v))
        .collect::<Vec<_>>()
        .join(",");
        lines.push(fields);
    }
    lines.join("\n")
}

pub fn render_html(report: &Report) -> String {
    let mut rows = String::new();
    for item in &report.items {
        let (class, label) = badge(item.baseline);
        let risky = matches!(item.baseline, SupportTier::Newly) || item.baseline.is_none_bucket();
        let docs = match item.mdn_url.as_deref() {
            Some(url) => format!(
                r#"<a href="{}" target="_blank" rel="noopener">MDN</a>"#,
                esc(url)
            ),
            None => String::new(),
        };
        rows.push_str(&format!(
            r#"      <tr{row_class}>
        <td><span class="b {class}">{label}</span></td>
        <td><code>{file}</code></td>
        <td>{loc}</td>
        <td>{feature}</td>
        <td><code>{key}</code></td>
        <td>{docs}</td>
        <td>{advice}</td>
      </tr>
"#,
            row_class = if risky { r#" class="risky""# } else { "" },
            class = class,
            label = label,
            file = esc(&item.file),
            loc = if item.loc == 0 {
                String::new()
            } else {
                item.loc.to_string()
            },
            feature = esc(item.feature_name.as_deref().unwrap_or("")),
            key = esc(&item.bcd_key),
            docs = docs,
            advice = esc(&item.advice),
        ));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<meta charset="utf-8">
<title>Baseline Compatibility Report</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>
:root{{--bd:#ddd;--bg:#fff;--ink:#111;--muted:#666;--chip:#f7f7f7;--row:#fff;--row-alt:#fafafa}}
@media (prefers-color-scheme: dark){{
  :root{{--bd:#3a3f45;--bg:#0f1419;--ink:#e6edf3;--muted:#9aa7b1;--chip:#1b222a;--row:#0f1419;--row-alt:#121820}}
}}
*{{box-sizing:border-box}}
body{{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Cantarell,Helvetica,Arial,sans-serif;margin:1.5rem;background:var(--bg);color:var(--ink)}}
h1{{font-size:1.35rem;margin:0 0 .5rem}}
.summary{{display:flex;gap:1rem;align-items:center;flex-wrap:wrap;margin:.25rem 0 1rem}}
.badges{{display:flex;gap:.5rem}}
.b{{display:inline-block;padding:.15rem .45rem;border-radius:.6rem;font-size:.8rem;border:1px solid var(--bd);background:var(--chip)}}
.b.hi{{box-shadow:0 0 0 999px #a1f0a31f inset}}
.b.lo{{box-shadow:0 0 0 999px #ffd6661f inset}}
.b.no{{box-shadow:0 0 0 999px #ff9aa21f inset}}
.b.un{{box-shadow:0 0 0 999px #9fb3c81f inset}}
table{{border-collapse:collapse;width:100%;background:var(--row)}}
caption{{text-align:left;font-weight:600;margin:.25rem 0}}
th,td{{border:1px solid var(--bd);padding:.5rem;vertical-align:top}}
th{{background:var(--chip);position:sticky;top:0}}
tbody tr:nth-child(even){{background:var(--row-alt)}}
tbody tr.risky td{{border-top:2px solid #ff9aa2aa;border-bottom:2px solid #ff9aa2aa}}
code{{background:var(--chip);padding:.1rem .25rem;border-radius:.25rem}}
.actions{{margin:.5rem 0 1rem}}
.btn{{padding:.5rem .75rem;border-radius:.5rem;border:1px solid var(--bd);color:var(--ink);text-decoration:none}}
</style>

<h1>Baseline Compatibility Report</h1>
<div class="summary" role="group" aria-label="Summary">
  <div><strong>Scanned:</strong> {scanned_at}</div>
  <div><strong>Root:</strong> <code>{root}</code></div>
  <div class="badges" aria-label="Baseline summary">
    <span class="b hi" title="Widely Baseline">Widely: {high}</span>
    <span class="b lo" title="Newly Baseline">Newly: {low}</span>
    <span class="b no" title="Not in Baseline">Not in: {none}</span>
  </div>
</div>

<div class="actions">
  <a download="report.csv" class="btn" href="report.csv">Download CSV</a>
</div>

<table>
  <caption>Findings (sorted by risk) — {declarations} usages in {files} files</caption>
  <thead>
    <tr>
      <th scope="col">Baseline</th>
      <th scope="col">File</th>
      <th scope="col">Line</th>
      <th scope="col">Feature</th>
      <th scope="col">BCD Key</th>
      <th scope="col">Docs</th>
      <th scope="col">Advice</th>
    </tr>
  </thead>
  <tbody>
{rows}  </tbody>
</table>
</html>
"#,
        scanned_at = esc(&report.scanned_at),
        root = esc(&report.root),
        high = report.summary.baseline.high,
        low = report.summary.baseline.low,
        none = report.summary.baseline.none,
        declarations = report.summary.declarations,
        files = report.summary.files,
        rows = rows,
    )
}
