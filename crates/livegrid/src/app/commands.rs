use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
pub use clap_complete::Shell;

pub use crate::adapters::presenter::OutputFormat;
use crate::domain::RenderMode;
use crate::infra::GridConfig;

const AFTER_HELP: &str =
    "Use --help for full details and examples. Use --format json for machine-readable output.";

const LONG_ABOUT: &str = "\
Show a scrollable grid of live cells that a timer mutates at random.\n\
\n\
Every visible slot is bound to one cell at a time. Scrolling reuses slots, and \
a slot only ever reflects the cell it currently shows.";

const AFTER_LONG_HELP: &str = r#"KEYS (run):
    arrows, h j k l   Scroll one row or column
    PageUp, PageDown  Scroll one screen
    g                 Jump to the top-left cell
    space             Pause or resume the mutation timer
    q, Esc, Ctrl-C    Quit

ENVIRONMENT:
    LIVEGRID_ROWS, LIVEGRID_COLUMNS   Grid shape (default 100 x 5)
    LIVEGRID_INTERVAL_MS              Mutation interval (default 200)
    LIVEGRID_FLASH_MS                 Highlight duration (default 300)
    LIVEGRID_RENDER_MODE              push or redraw-all
    LIVEGRID_LOG                      Log file path
    LIVEGRID_LOG_FORMAT               text or json
    LIVEGRID_LOG_STREAM               stderr or stdout

EXAMPLES:
    livegrid run
    livegrid run --rows 500 --columns 8 --interval-ms 50
    livegrid simulate --ticks 1000 --scroll-every 10 --seed 42
    livegrid simulate --mode redraw-all --format json"#;

#[derive(Parser)]
#[command(name = "livegrid")]
#[command(author, version, propagate_version = true)]
#[command(about = "Terminal grid of live cells bound to reusable slots")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = AFTER_HELP)]
#[command(after_long_help = AFTER_LONG_HELP)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        value_name = "FORMAT",
        default_value_t = OutputFormat::Text,
        help_heading = "Output Options"
    )]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true, help_heading = "Output Options")]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR", help_heading = "Output Options")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, help_heading = "Debug Options")]
    pub verbose: bool,
}

impl Cli {
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the live grid in the terminal
    #[command(after_long_help = "\
EXAMPLES:
    livegrid run
    livegrid run --paused --mode redraw-all
    livegrid run --rows 1000 --columns 12 --cell-width 8")]
    Run(RunArgs),

    /// Drive the grid headlessly and report binding counters
    #[command(long_about = "\
Drive the grid headlessly against an in-memory surface and a manual clock.

Each tick advances the clock by one interval. With --scroll-every the viewport \
pages down periodically, wrapping back to the top, so every slot is rebound \
many times. The summary must report zero leaked observers.")]
    Simulate(SimulateArgs),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum RenderModeArg {
    /// Slots subscribe to their cells and repaint on every write
    Push,
    /// Slots are repainted from the grid after each tick
    RedrawAll,
}

impl From<RenderModeArg> for RenderMode {
    fn from(arg: RenderModeArg) -> Self {
        match arg {
            RenderModeArg::Push => RenderMode::Push,
            RenderModeArg::RedrawAll => RenderMode::RedrawAll,
        }
    }
}

/// Grid flags shared by `run` and `simulate`. Unset flags keep the value from
/// the environment or the built-in default.
#[derive(Clone, Debug, Default, Args)]
pub struct GridArgs {
    /// Number of grid rows
    #[arg(long, value_name = "N", help_heading = "Grid Options")]
    pub rows: Option<usize>,

    /// Number of grid columns
    #[arg(long, value_name = "N", help_heading = "Grid Options")]
    pub columns: Option<usize>,

    /// Milliseconds between mutations
    #[arg(long, value_name = "MS", help_heading = "Grid Options")]
    pub interval_ms: Option<u64>,

    /// Milliseconds a changed slot stays highlighted
    #[arg(long, value_name = "MS", help_heading = "Grid Options")]
    pub flash_ms: Option<u64>,

    /// How slots learn about changes
    #[arg(long, value_enum, value_name = "MODE", help_heading = "Grid Options")]
    pub mode: Option<RenderModeArg>,

    /// Width of one cell in terminal columns
    #[arg(long, value_name = "COLS", help_heading = "Grid Options")]
    pub cell_width: Option<u16>,

    /// Largest value written into a cell
    #[arg(long, value_name = "N", help_heading = "Grid Options")]
    pub max_value: Option<u32>,

    /// Seed for the mutation RNG (random when omitted)
    #[arg(long, value_name = "SEED", help_heading = "Grid Options")]
    pub seed: Option<u64>,
}

impl GridArgs {
    pub fn apply(&self, mut config: GridConfig) -> GridConfig {
        if let Some(rows) = self.rows {
            config = config.with_rows(rows);
        }
        if let Some(columns) = self.columns {
            config = config.with_columns(columns);
        }
        if let Some(ms) = self.interval_ms {
            config = config.with_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = self.flash_ms {
            config = config.with_flash(Duration::from_millis(ms));
        }
        if let Some(mode) = self.mode {
            config = config.with_render_mode(mode.into());
        }
        if let Some(width) = self.cell_width {
            config = config.with_cell_width(width);
        }
        if let Some(max) = self.max_value {
            config = config.with_max_value(max);
        }
        config
    }
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Start with the mutation timer stopped
    #[arg(long)]
    pub paused: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Number of timer ticks to run
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub ticks: u64,

    /// Rows of slots in the simulated viewport
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub view_rows: usize,

    /// Columns of slots in the simulated viewport
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub view_cols: usize,

    /// Page the viewport down every N ticks (0 never scrolls)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub scroll_every: u64,
}
