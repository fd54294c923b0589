mod session;
mod summary;

use ariadne::Source;
use clap::{Parser, ValueEnum};
use plot_error::Error;
use plot_graph::{Mode, PlotRequest, Plotter};
use rustyline::{error::ReadlineError, DefaultEditor};
use session::{Line, Session};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{io::{self, IsTerminal, Read}, process::ExitCode};
use summary::Summary;

/// Plots math expressions as curves or surfaces, printing a summary of the sampled points.
#[derive(Parser, Debug)]
#[command(name = "plot-repl", version)]
struct Cli {
    /// The expression to plot. If omitted, expressions are read from standard input, or
    /// interactively on a terminal.
    expression: Option<String>,

    /// Plot a surface `f(x, y)` instead of a curve `f(x)`.
    #[arg(long)]
    surface: bool,

    /// The lower bound of the x axis.
    #[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
    x_min: f64,

    /// The upper bound of the x axis.
    #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
    x_max: f64,

    /// The lower bound of the y axis.
    #[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
    y_min: f64,

    /// The upper bound of the y axis.
    #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
    y_max: f64,

    /// Also plot the derivative of the curve.
    #[arg(long)]
    derivative: bool,

    /// Also plot the integral of the curve.
    #[arg(long)]
    integral: bool,

    /// The number of points to sample (along each axis, for surfaces).
    #[arg(long, env = "PLOT_RESOLUTION")]
    resolution: Option<usize>,

    /// The level of log messages to print.
    #[arg(long, value_enum, env = "PLOT_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// The request described by the flags, for the given expression.
    fn request(&self, expression: &str) -> PlotRequest {
        let mut request = PlotRequest::new(expression)
            .mode(if self.surface { Mode::Surface } else { Mode::Curve })
            .x_bounds(self.x_min, self.x_max)
            .y_bounds(self.y_min, self.y_max)
            .show_derivative(self.derivative)
            .show_integral(self.integral);
        request.resolution = self.resolution;
        request
    }
}

/// Report the error to stderr, pointing into the expression if the error has spans.
fn report(err: &Error, input: &str) {
    if err.spans.is_empty() {
        eprintln!("{}", err);
        return;
    }

    let report = err.build_report("input");
    if report.eprint(("input", Source::from(input))).is_err() {
        eprintln!("{}", err);
    }
}

/// Plots the request, printing the summary or the error. Returns true on success.
fn plot(plotter: &Plotter, request: &PlotRequest) -> bool {
    match plotter.plot(request) {
        Ok(output) => {
            print!("{}", Summary(&output));
            true
        },
        Err(err) => {
            report(&err, &request.expression);
            false
        },
    }
}

/// Reads lines from the terminal until end of input, plotting each expression.
fn interactive(plotter: &Plotter, mut session: Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    println!("plotting {}s; type `:help` for a list of commands", session.mode());

    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if input.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(&input)?;

        match session.handle(&input) {
            Ok(Line::Plot(request)) => {
                plot(plotter, &request);
            },
            Ok(Line::Updated(message)) => println!("{}", message),
            Ok(Line::Empty) => (),
            Err(message) => eprintln!("{}", message),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if TermLogger::init(cli.log_level.into(), Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        eprintln!("could not install the logger");
    }
    log::debug!("{:?}", cli);

    let plotter = Plotter::new().with_cache();

    if let Some(expression) = &cli.expression {
        // plot once
        return if plot(&plotter, &cli.request(expression)) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if !io::stdin().is_terminal() {
        // plot each line of stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }

        let mut ok = true;
        for line in input.lines().filter(|line| !line.trim().is_empty()) {
            ok &= plot(&plotter, &cli.request(line.trim()));
        }
        return if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    }

    // run the repl / interactive mode
    match interactive(&plotter, Session::new(cli.request(""))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}
