//! CLI argument definitions for the release packager.
//!
//! Every flag is optional: running the binary with no arguments from the
//! extension's directory packages it with the default behaviour.

use camino::Utf8PathBuf;
use clap::Parser;

/// Package the Link Collector extension for the Chrome Web Store.
#[derive(Parser, Debug, Default)]
#[command(name = "link-collector-packager")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package the Link Collector extension for the Chrome Web Store.\n\n",
    "Copies the extension's manifest, scripts, popup, and icons into a ",
    "temporary release directory, compresses them into link-collector.zip, ",
    "and removes the release directory. Missing assets are reported and ",
    "skipped unless --strict is given.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package the extension in the current directory:\n",
    "    $ link-collector-packager\n\n",
    "  Require every asset and write build-meta.json:\n",
    "    $ link-collector-packager --strict --metadata\n\n",
    "  Remove previous outputs:\n",
    "    $ link-collector-packager --clean",
))]
pub struct Cli {
    /// Directory containing the extension assets [default: current directory].
    #[arg(short = 'C', long, value_name = "DIR")]
    pub working_dir: Option<Utf8PathBuf>,

    /// Fail if any extension asset is missing.
    #[arg(long, conflicts_with = "clean")]
    pub strict: bool,

    /// Write build-meta.json next to the archive.
    #[arg(long, conflicts_with = "clean")]
    pub metadata: bool,

    /// Remove the release directory, archive, and metadata, then exit.
    #[arg(long)]
    pub clean: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}
