//! CLI argument definitions using the clap derive API.
//!
//! Argument names, aliases, help text, and value enums live here and
//! nowhere else.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stratum_core::application::FacadeConflictPolicy;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "stratum",
    bin_name = "stratum",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered application generator",
    long_about = "Stratum turns a declarative domain model into persistence, \
                  business, and transport classes wired together by generated \
                  facades and a configuration class.",
    after_help = "EXAMPLES:\n\
        \x20 stratum generate Shop --models ./models --out ./generated\n\
        \x20 stratum generate Shop --business Order --business Product --dry-run\n\
        \x20 stratum inspect --models ./models\n\
        \x20 stratum completions bash > /usr/share/bash-completion/completions/stratum",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the layered class model of an app and write its sources.
    #[command(
        visible_alias = "gen",
        about = "Generate sources for an app",
        after_help = "EXAMPLES:\n\
            \x20 stratum generate Shop --models ./models --out ./generated\n\
            \x20 stratum generate Shop --on-duplicate-facade fail\n\
            \x20 stratum generate Shop --dry-run --output-format json"
    )]
    Generate(GenerateArgs),

    /// Show the models in a store, or the class model of one app.
    #[command(
        visible_alias = "ls",
        about = "Inspect domain models",
        after_help = "EXAMPLES:\n\
            \x20 stratum inspect --models ./models\n\
            \x20 stratum inspect Shop --format json"
    )]
    Inspect(InspectArgs),

    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stratum init           # platform config directory\n\
            \x20 stratum init --local   # ./.stratum.toml"
    )]
    Init(InitArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stratum completions bash > ~/.local/share/bash-completion/completions/stratum\n\
            \x20 stratum completions zsh  > ~/.zfunc/_stratum\n\
            \x20 stratum completions fish > ~/.config/fish/completions/stratum.fish"
    )]
    Completions(CompletionsArgs),

    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stratum config get models.dir\n\
            \x20 stratum config list\n\
            \x20 stratum config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(value_name = "APP", help = "Name of the app to generate")]
    pub app: String,

    #[arg(
        short = 'm',
        long = "models",
        value_name = "DIR",
        help = "Directory of model files (default: models.dir from config)"
    )]
    pub models: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (default: output.dir from config)"
    )]
    pub out: Option<PathBuf>,

    /// Entities served by the business facade. Repeat or comma-separate.
    #[arg(
        short = 'b',
        long = "business",
        value_name = "ENTITY",
        value_delimiter = ',',
        help = "Restrict the business layer to these entities"
    )]
    pub business: Vec<String>,

    #[arg(
        long = "on-duplicate-facade",
        value_name = "POLICY",
        value_enum,
        help = "What to do when a facade is requested twice"
    )]
    pub on_duplicate_facade: Option<ConflictArg>,

    #[arg(
        long = "id-type",
        value_name = "TYPE",
        help = "Identifier type for entities without an `id` attribute"
    )]
    pub id_type: Option<String>,

    #[arg(long = "no-config-class", help = "Do not write the configuration class")]
    pub no_config_class: bool,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    pub yes: bool,

    /// Write into a non-empty output directory, replacing files of the same name.
    #[arg(long = "force", help = "Write into a non-empty output directory")]
    pub force: bool,

    #[arg(long = "dry-run", help = "Build and list files without writing them")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    /// Keep the facade already built in this run.
    Reuse,
    /// Abort the run.
    Fail,
}

impl From<ConflictArg> for FacadeConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Reuse => Self::Reuse,
            ConflictArg::Fail => Self::Fail,
        }
    }
}

// ── inspect ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// App to build and describe. Lists the store's apps when omitted.
    #[arg(value_name = "APP", help = "App to describe (lists apps when omitted)")]
    pub app: Option<String>,

    #[arg(
        short = 'm',
        long = "models",
        value_name = "DIR",
        help = "Directory of model files (default: models.dir from config)"
    )]
    pub models: Option<PathBuf>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: InspectFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    Table,
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long = "local", help = "Create ./.stratum.toml instead of the global file")]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.facade_conflict`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path of the global configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
