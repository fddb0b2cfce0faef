use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use gridcursor::{GridOptions, grid::Order};

/// Which delivery mechanism drains the grid.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Worker threads pulling from a mutex-guarded cursor.
    Lock,
    /// Worker threads pulling from a lock-free cursor.
    Atomic,
    /// Reader tasks sharing a cancelable stream.
    Stream,
}

/// Command line and environment configuration for the `gridcursor` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gridcursor",
    version,
    about = "Hand out every coordinate of a grid to concurrent workers"
)]
pub struct CliArgs {
    /// Number of cells along x.
    ///
    /// Environment variable: `GRID_WIDTH`
    #[arg(long, env = "GRID_WIDTH")]
    pub width: u32,

    /// Number of cells along y.
    ///
    /// Environment variable: `GRID_HEIGHT`
    #[arg(long, env = "GRID_HEIGHT")]
    pub height: u32,

    /// Number of cells along z. Omit for a planar grid.
    ///
    /// Environment variable: `GRID_DEPTH`
    #[arg(long, env = "GRID_DEPTH")]
    pub depth: Option<u32>,

    /// Visit order: Ascending, Descending or Random (short forms accepted).
    ///
    /// Environment variable: `GRID_ORDER`
    #[arg(long, env = "GRID_ORDER", default_value_t = String::from("Ascending"))]
    pub order: String,

    /// Cycle through the grid forever. Requires `--limit`.
    ///
    /// Environment variable: `GRID_REPEAT`
    #[arg(long, env = "GRID_REPEAT", default_value_t = false)]
    pub repeat: bool,

    /// Delivery mechanism.
    ///
    /// Environment variable: `GRID_STRATEGY`
    #[arg(long, env = "GRID_STRATEGY", value_enum, default_value_t = Strategy::Atomic)]
    pub strategy: Strategy,

    /// Number of concurrent consumers.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, env = "NUM_WORKERS", default_value_t = 1)]
    pub workers: usize,

    /// Stop after this many coordinates have been delivered.
    ///
    /// Environment variable: `GRID_LIMIT`
    #[arg(long, env = "GRID_LIMIT")]
    pub limit: Option<u64>,

    /// Only print the summary, not every coordinate.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub options: GridOptions,
    pub strategy: Strategy,
    pub workers: usize,
    pub limit: Option<u64>,
    pub quiet: bool,
}

impl TryFrom<CliArgs> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let order: Order = args.order.parse().context("invalid GRID_ORDER")?;

        let mut options = GridOptions::new(args.width, args.height)
            .with_order(order)
            .with_repeat(args.repeat);
        if let Some(depth) = args.depth {
            options = options.with_depth(depth);
        }
        options.validate().context("invalid grid dimensions")?;

        if args.workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        if args.repeat && args.limit.is_none() {
            bail!("GRID_REPEAT never exhausts; set GRID_LIMIT to bound the run");
        }

        Ok(Self {
            options,
            strategy: args.strategy,
            workers: args.workers,
            limit: args.limit,
            quiet: args.quiet,
        })
    }
}
