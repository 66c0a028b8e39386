use std::path::PathBuf;

use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use calinject::{
    cli,
    config::{self, PipelineConfig},
    error,
    types::{KeyRequest, ResourceKind, Selection, SelectionKey},
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Inject catalog sections into the calendar
    Inject(InjectOptions),

    /// Print the section for a week, block or topic filter
    Suggest(SuggestOptions),

    /// Check a catalog file for problems
    Validate(ValidateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(group(
    ArgGroup::new("keys")
        .required(true)
        .args(["week", "weeks", "blocks", "range", "all"])
))]
pub struct InjectOptions {
    /// Catalog kind to inject
    #[clap(long, value_enum)]
    pub kind: ResourceKind,

    /// Single week or block (e.g. S11, B5A)
    #[clap(short, long)]
    pub week: Option<String>,

    /// Explicit list of weeks (e.g. --weeks S3 S7 S11)
    #[clap(long, num_args = 1.., value_name = "Sxx")]
    pub weeks: Vec<String>,

    /// Explicit list of blocks (e.g. --blocks B1 B5A)
    #[clap(long, num_args = 1.., value_name = "Bx")]
    pub blocks: Vec<String>,

    /// Inclusive week range (e.g. --range S10 S14)
    #[clap(long, num_args = 2, value_names = ["FROM", "TO"])]
    pub range: Vec<String>,

    /// Inject S1..S24
    #[clap(long)]
    pub all: bool,

    /// Path to the catalog YAML
    #[clap(long)]
    pub index: Option<PathBuf>,

    /// Path to the calendar markdown
    #[clap(long)]
    pub calendar: Option<PathBuf>,

    /// Create the calendar if it does not exist
    #[clap(long)]
    pub create_if_missing: bool,

    /// Exit with code 3 when a key matched no entries
    #[clap(long)]
    pub strict: bool,
}

impl InjectOptions {
    fn key_request(&self) -> KeyRequest {
        if self.all {
            KeyRequest::All
        } else if let [from, to] = self.range.as_slice() {
            KeyRequest::Range(from.clone(), to.clone())
        } else if !self.weeks.is_empty() {
            KeyRequest::Weeks(self.weeks.clone())
        } else if !self.blocks.is_empty() {
            KeyRequest::Blocks(self.blocks.clone())
        } else {
            KeyRequest::Single(self.week.clone().unwrap_or_default())
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("scope").required(true).args(["week", "block"])))]
pub struct SuggestOptions {
    /// Catalog kind to query
    #[clap(long, value_enum)]
    pub kind: ResourceKind,

    /// Week (S1..S24)
    #[clap(short, long)]
    pub week: Option<String>,

    /// Block (B1..B5A/B5B)
    #[clap(short, long)]
    pub block: Option<String>,

    /// Filter by topics (any overlap matches)
    #[clap(short, long, num_args = 0..)]
    pub topics: Vec<String>,

    /// Path to the catalog YAML
    #[clap(long)]
    pub index: Option<PathBuf>,

    /// Exit with code 3 when nothing matched
    #[clap(long)]
    pub strict: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateOptions {
    /// Catalog kind to validate
    #[clap(long, value_enum)]
    pub kind: ResourceKind,

    /// Path to the catalog YAML
    #[clap(long)]
    pub index: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Inject(opt) => {
            let pipeline = PipelineConfig::from_env(opt.kind, opt.index.clone(), opt.calendar.clone())
                .create_if_missing(opt.create_if_missing)
                .strict(opt.strict);
            cli::inject(&opt.key_request(), &pipeline).map(|_| ())
        }
        Command::Suggest(opt) => suggest_selection(&opt).and_then(|selection| {
            let index = opt.index.clone().unwrap_or_else(|| config::index_path(opt.kind));
            cli::suggest(opt.kind, &selection, &index, opt.strict)
        }),
        Command::Validate(opt) => {
            let index = opt.index.unwrap_or_else(|| config::index_path(opt.kind));
            cli::validate(opt.kind, &index).map(|_| ())
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(code = e.exit_code(); "{}", e);
    }
}

fn suggest_selection(opt: &SuggestOptions) -> Result<Selection, cli::CliError> {
    let key = match (&opt.week, &opt.block) {
        (Some(week), _) => utils::parse_week(week).map(SelectionKey::Week),
        (None, Some(block)) => utils::parse_block(block).map(SelectionKey::Block),
        (None, None) => Err("a week or a block is required".to_string()),
    }
    .map_err(cli::CliError::InvalidTag)?;

    Ok(Selection::from(key).with_topics(opt.topics.clone()))
}
