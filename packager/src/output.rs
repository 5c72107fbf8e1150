//! Console report formatting for the packager CLI.
//!
//! Produces the per-asset status lines written while staging, the success
//! summary with the archive size in kilobytes, and the static upload
//! instructions printed after a successful run.

use crate::assembler::PackageOutput;
use crate::stager::AssetStatus;

/// Developer console where the archive is uploaded.
pub const WEB_STORE_CONSOLE_URL: &str = "https://chrome.google.com/webstore/devconsole";

/// Format the status line for one Manifest List entry.
///
/// # Example
///
/// ```
/// use link_collector_packager::output::asset_line;
/// use link_collector_packager::stager::AssetStatus;
///
/// assert_eq!(asset_line("popup.html", AssetStatus::Skipped), "  SKIP: popup.html (not found)");
/// ```
#[must_use]
pub fn asset_line(name: &str, status: AssetStatus) -> String {
    match status {
        AssetStatus::Staged { .. } => format!("  OK: {name}"),
        AssetStatus::Skipped => format!("  SKIP: {name} (not found)"),
    }
}

/// Format a byte count as kilobytes with two decimals.
///
/// Exact halves round to the even hundredth, so `128` bytes (0.125 KB)
/// prints as `0.12` and `384` bytes (0.375 KB) as `0.38`.
///
/// # Example
///
/// ```
/// use link_collector_packager::output::format_kilobytes;
///
/// assert_eq!(format_kilobytes(7_168), "7.00");
/// assert_eq!(format_kilobytes(1_000), "0.98");
/// assert_eq!(format_kilobytes(128), "0.12");
/// ```
#[must_use]
pub fn format_kilobytes(bytes: u64) -> String {
    let scaled = bytes.saturating_mul(100);
    let (quotient, remainder) = (scaled.div_euclid(1024), scaled.rem_euclid(1024));
    let round_up = remainder > 512 || (remainder == 512 && quotient % 2 == 1);
    let hundredths = quotient + u64::from(round_up);
    format!(
        "{}.{:02}",
        hundredths.div_euclid(100),
        hundredths.rem_euclid(100)
    )
}

/// Format the closing report for a finished run: the archive summary and
/// next steps, preceded by a blank line to separate it from the asset lines.
#[must_use]
pub fn report_text(output: &PackageOutput) -> String {
    format!("\n{}\n{}", success_message(output), next_steps(output))
}

/// Format the success summary for a finished archive.
#[must_use]
pub fn success_message(output: &PackageOutput) -> String {
    let mut lines = vec![format!(
        "SUCCESS: {} ({} KB)",
        output.archive_path,
        format_kilobytes(output.size_bytes)
    )];
    lines.push(format!("SHA-256: {}", output.sha256));
    if let Some(version) = &output.version {
        lines.push(format!("Version: {version}"));
    }
    if let Some(path) = &output.metadata_path {
        lines.push(format!("Metadata: {path}"));
    }
    let plural = if output.staged_count() == 1 { "file" } else { "files" };
    lines.push(format!("Packaged {} {plural}", output.staged_count()));
    lines.join("\n")
}

/// Format the static upload instructions.
#[must_use]
pub fn next_steps(output: &PackageOutput) -> String {
    let archive_name = output.archive_path.file_name().unwrap_or_default();
    format!(
        concat!(
            "\nReady for deployment!\n",
            "File: {}\n\n",
            "Next steps:\n",
            "1. Go to {}\n",
            "2. Click 'New item'\n",
            "3. Upload {}"
        ),
        output.archive_path, WEB_STORE_CONSOLE_URL, archive_name
    )
}
