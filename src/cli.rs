use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use four_fours::{
    BinaryOp, ExpressionSolver, SearchWorker, SolverConfig, UnaryOp, validate_digit_string,
};
use log::{info, warn};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum UnaryArg {
    Neg,
    Sqrt,
    Factorial,
}

impl From<UnaryArg> for UnaryOp {
    fn from(arg: UnaryArg) -> Self {
        match arg {
            UnaryArg::Neg => UnaryOp::Neg,
            UnaryArg::Sqrt => UnaryOp::Sqrt,
            UnaryArg::Factorial => UnaryOp::Factorial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum BinaryArg {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl From<BinaryArg> for BinaryOp {
    fn from(arg: BinaryArg) -> Self {
        match arg {
            BinaryArg::Add => BinaryOp::Add,
            BinaryArg::Sub => BinaryOp::Sub,
            BinaryArg::Mul => BinaryOp::Mul,
            BinaryArg::Div => BinaryOp::Div,
            BinaryArg::Pow => BinaryOp::Pow,
        }
    }
}

/// four-fours - List the cheapest expression for every target a digit string can reach
#[derive(Parser, Debug)]
#[command(name = "four-fours")]
#[command(
    about = "Find arithmetic expressions over a digit string for every integer target from 0 up"
)]
#[command(version)]
pub struct CliArgs {
    /// Digits to use, in order, each exactly once
    #[arg(default_value = "4444")]
    pub digit_string: String,

    /// Only look up this one target
    #[arg(short, long)]
    pub target: Option<f64>,

    /// Largest target to list
    #[arg(long, default_value_t = 1000)]
    pub max_target: u32,

    /// How many times unary operators are stacked at each level
    #[arg(long, default_value_t = 3)]
    pub unary_rounds: usize,

    /// Longest digit string to accept
    #[arg(long, default_value_t = 5)]
    pub max_digits: usize,

    /// Unary operators to use
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [UnaryArg::Neg, UnaryArg::Sqrt, UnaryArg::Factorial]
    )]
    pub unary: Vec<UnaryArg>,

    /// Disable unary operators entirely
    #[arg(long, conflicts_with = "unary")]
    pub no_unary: bool,

    /// Binary operators to use
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [BinaryArg::Add, BinaryArg::Sub, BinaryArg::Mul, BinaryArg::Div, BinaryArg::Pow]
    )]
    pub binary: Vec<BinaryArg>,

    /// Run the search on a dedicated worker thread
    #[arg(long)]
    pub worker: bool,

    /// Print expressions as LaTeX
    #[arg(long)]
    pub latex: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub digit_string: String,
    pub target: Option<f64>,
    pub solver: SolverConfig,
    pub use_worker: bool,
    pub latex: bool,
    pub log_level: LogLevel,
}

impl CliConfig {
    /// # Errors
    ///
    /// Fails if the digit string is empty or contains non-digits.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        validate_digit_string(&args.digit_string).context("Invalid digit string")?;

        let unary_ops = if args.no_unary {
            Vec::new()
        } else {
            args.unary.iter().copied().map(UnaryOp::from).collect()
        };

        let solver = SolverConfig {
            max_target: args.max_target,
            unary_rounds: args.unary_rounds,
            max_digits: args.max_digits,
            unary_ops,
            binary_ops: args.binary.iter().copied().map(BinaryOp::from).collect(),
            ..SolverConfig::default()
        };

        Ok(CliConfig {
            digit_string: args.digit_string,
            target: args.target,
            solver,
            use_worker: args.worker,
            latex: args.latex,
            log_level: args.log_level,
        })
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    CliConfig::from_args(CliArgs::parse())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

/// Produce the lines to print for a configuration
pub fn render(config: &CliConfig) -> Result<Vec<String>> {
    if let Some(target) = config.target {
        let solver = ExpressionSolver::with_config(config.solver.clone());
        info!(
            "Searching for an expression using digits '{}' that equals {}",
            config.digit_string, target
        );
        let found = solver
            .find_expression(&config.digit_string, target)
            .context("Search failed")?;
        return Ok(match found {
            Some(equation) if config.latex => vec![equation.expression.to_latex()],
            Some(equation) => vec![equation.expression.to_string()],
            None => {
                warn!("No matching expression found");
                vec!["Unknown.".to_string()]
            }
        });
    }

    info!(
        "Searching targets 0..={} using digits '{}'",
        config.solver.max_target, config.digit_string
    );
    let result = if config.use_worker {
        let worker =
            SearchWorker::spawn(config.solver.clone()).context("Could not start search worker")?;
        worker
            .submit(config.digit_string.as_str())
            .wait()
            .context("Search failed")?
    } else {
        ExpressionSolver::with_config(config.solver.clone())
            .search(&config.digit_string)
            .context("Search failed")?
    };

    if result.is_empty() {
        warn!("No target in range is reachable");
    }
    Ok(if config.latex {
        result.latex_lines()
    } else {
        result.lines()
    })
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    init_logging(&config.log_level)?;

    for line in render(&config)? {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(argv: &[&str]) -> Result<CliConfig> {
        let args = CliArgs::try_parse_from(argv)?;
        CliConfig::from_args(args)
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&["four-fours"]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert_eq!(config.digit_string, "4444");
            assert_eq!(config.target, None);
            assert_eq!(config.solver.max_target, 1000);
            assert_eq!(config.solver.max_digits, 5);
            assert_eq!(config.solver.unary_ops, UnaryOp::ALL.to_vec());
            assert_eq!(config.solver.binary_ops, BinaryOp::ALL.to_vec());
            assert!(!config.use_worker);
            assert!(matches!(config.log_level, LogLevel::Warn));
        }
    }

    #[test]
    fn test_operator_lists() {
        let config = config_from(&["four-fours", "123", "--unary", "sqrt", "--binary", "add,mul"]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert_eq!(config.solver.unary_ops, vec![UnaryOp::Sqrt]);
            assert_eq!(config.solver.binary_ops, vec![BinaryOp::Add, BinaryOp::Mul]);
        }

        let config = config_from(&["four-fours", "--no-unary"]);
        assert!(matches!(config, Ok(ref c) if c.solver.unary_ops.is_empty()));
    }

    #[test]
    fn test_invalid_digits_rejected() {
        assert!(config_from(&["four-fours", "12a3"]).is_err());
        assert!(config_from(&["four-fours", ""]).is_err());
    }

    #[test]
    fn test_render_lists_targets() {
        let config = config_from(&["four-fours", "11", "--no-unary"]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            let lines = render(&config);
            assert!(lines.is_ok());
            if let Ok(lines) = lines {
                assert_eq!(lines, vec!["0 = 1-1", "1 = 1*1", "2 = 1+1", "11 = 11"]);
            }
        }
    }

    #[test]
    fn test_render_single_target() {
        let config = config_from(&["four-fours", "44", "--target", "16"]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert!(matches!(render(&config), Ok(ref lines) if lines == &["4*4"]));
        }

        let config = config_from(&["four-fours", "1", "--target", "7"]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert!(matches!(render(&config), Ok(ref lines) if lines == &["Unknown."]));
        }
    }

    #[test]
    fn test_log_level_flag_sets_filter() {
        let cases = [
            ("error", log::LevelFilter::Error),
            ("info", log::LevelFilter::Info),
            ("trace", log::LevelFilter::Trace),
        ];
        for (flag, filter) in cases {
            let config = config_from(&["four-fours", "--log-level", flag]);
            assert!(config.is_ok(), "--log-level {} rejected", flag);
            if let Ok(config) = config {
                assert_eq!(config.log_level.to_log_level_filter(), filter);
            }
        }
        assert!(config_from(&["four-fours", "-l", "loud"]).is_err());
    }
}
