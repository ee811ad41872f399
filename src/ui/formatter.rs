//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from the
//! release workflow. Functions here only print.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::ReleaseParameters;
use crate::github::UploadedAsset;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a refused precondition (the tag or release already exists).
///
/// Goes to stdout like the rest of the workflow report.
pub fn display_precondition_failure(message: &str) {
    println!("{} {}", style("✗").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
///
/// # Arguments
/// * `warning` - The boundary warning to display
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render the dry-run preview of a parameters bundle.
///
/// Kept separate from printing so the exact text can be tested.
pub fn format_release_parameters(params: &ReleaseParameters) -> String {
    let mut out = String::new();
    out.push_str(&format!("  tag:          {}\n", params.tag));
    out.push_str(&format!("  object:       {}\n", params.object));
    out.push_str(&format!("  type:         {}\n", params.object_type));
    out.push_str(&format!("  release name: {}\n", params.release_name));
    out.push_str(&format!("  tag message:  {}\n", params.tag_message));
    out.push_str(&format!(
        "  tagger:       {} <{}>\n",
        params.tagger.name, params.tagger.email
    ));
    out.push_str(&format!("  prerelease:   {}\n", params.prerelease));
    out.push_str("  release message:\n");
    for line in params.release_message.lines() {
        out.push_str(&format!("    {}\n", line));
    }
    out
}

/// Display the parameters a non-dry run would send.
///
/// # Arguments
/// * `params` - The assembled release parameters
pub fn display_release_parameters(params: &ReleaseParameters) {
    println!(
        "\n{}",
        style(format!("Dry run: release '{}' would be created with", params.tag)).bold()
    );
    print!("{}", format_release_parameters(params));
}

/// Display the name and download location of an uploaded asset.
pub fn display_uploaded_asset(asset: &UploadedAsset) {
    println!(
        "{} {} {}",
        style("✓").green(),
        asset.name,
        style(&asset.browser_download_url).cyan()
    );
}
