//! Command-line interface definitions.
//!
//! Kept in the library so `xtask` can render man pages from the same
//! definitions the binary parses.

use crate::export::Format;
use crate::mapping::{Mode, Pick};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Version string shown by `--version`, with build date and git SHA when
/// they were embedded at build time.
pub fn long_version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let version = env!("CARGO_PKG_VERSION");
        let date = option_env!("IMGCSV_BUILD_DATE").unwrap_or("unknown");
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) if !sha.is_empty() && sha != "unknown" => {
                let short = sha.get(..7).unwrap_or(sha);
                format!("{} ({} {})", version, short, date)
            }
            _ => format!("{} ({})", version, date),
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "imgcsv")]
#[command(author, version = long_version(), about)]
#[command(long_about = "Image CSV export.\n\n\
    Derives Itemcode, Colorcode and custom tag columns from the folder levels \
    or file name tokens of an image collection and writes one CSV row per image.\n\n\
    Typical flow: run `imgcsv template` to see the token positions of a sample \
    image, then `imgcsv export --role 0=itemcode --role 1=colorcode` to map them.")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the token positions of a sample image
    #[command(long_about = "Show the token positions of a sample image.\n\n\
        Tokens are numbered from the start (0, 1, ...) and from the end \
        (-1 is the last token). Both forms are accepted by `export --role`.")]
    Template(TemplateArgs),

    /// Export one row per image as CSV or JSON
    #[command(long_about = "Export one row per image as CSV or JSON.\n\n\
        Roles are given per token position as POS=ROLE, where ROLE is one of \
        ignore, itemcode, colorcode, tag or tag:<label>. Negative positions \
        count from the end.\n\n\
        EXAMPLES:\n  \
        imgcsv export ./photos --convention -o export.csv\n  \
        imgcsv export *.jpg -s - --role 0=itemcode --role 1=colorcode\n  \
        imgcsv export --list remote.txt --convention --base-url https://cdn.example.com/img")]
    Export(ExportArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Add missing fields to the config file, keeping existing values
    Migrate {
        /// Apply without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Where the images come from and how they are tokenized.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// A directory to walk, or individual image files
    #[arg(value_name = "SOURCE", required_unless_present = "list")]
    pub sources: Vec<PathBuf>,

    /// Read relative image paths from a listing file, one per line
    #[arg(long, value_name = "FILE", conflicts_with = "sources")]
    pub list: Option<PathBuf>,

    /// Tokenize folder levels or file names [default: folder for a directory
    /// or listing, filename otherwise]
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Filename separator, repeatable (e.g. -s - -s __)
    #[arg(short, long = "separator", value_name = "SEP", allow_hyphen_values = true)]
    pub separators: Vec<String>,

    /// Substring removed before splitting, repeatable
    #[arg(short, long = "remove", value_name = "KEYWORD", allow_hyphen_values = true)]
    pub remove_keywords: Vec<String>,

    /// Keep the file extension on the last filename token
    #[arg(long)]
    pub keep_extension: bool,

    /// Folder mode: include the file name as the last token
    #[arg(long)]
    pub include_leaf: bool,

    /// Accepted image extension, repeatable [default: jpg jpeg png webp]
    #[arg(short, long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Include hidden files and folders when walking a directory
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Which image serves as the template
    #[arg(long, default_value = "first")]
    pub pick: Pick,

    /// Number of example identifiers to show
    #[arg(long, default_value_t = 3)]
    pub samples: usize,

    /// Print the template as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Role for a token position as POS=ROLE, repeatable
    #[arg(long = "role", value_name = "POS=ROLE", allow_hyphen_values = true)]
    pub roles: Vec<String>,

    /// Folder convention: Itemcode two levels above the file, Colorcode in
    /// its folder. Folder mode only; the file name is never a token
    #[arg(long, conflicts_with = "roles")]
    pub convention: bool,

    /// Ask for the role of each template token
    #[arg(short, long, conflicts_with_all = ["roles", "convention"])]
    pub interactive: bool,

    /// Which image serves as the template for --interactive
    #[arg(long, default_value = "first")]
    pub pick: Pick,

    /// Column label for `tag` roles without an explicit label
    #[arg(long, value_name = "LABEL")]
    pub tag_label: Option<String>,

    /// Build image links from this base URL
    #[arg(long, value_name = "URL", conflicts_with = "links")]
    pub base_url: Option<String>,

    /// Look up image links in a CSV manifest of path,url pairs
    #[arg(long, value_name = "MANIFEST")]
    pub links: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "csv")]
    pub format: Format,

    /// Append a Filename column
    #[arg(long)]
    pub filename_column: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
