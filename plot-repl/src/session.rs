use plot_graph::{Mode, PlotRequest};

/// The result of a line typed in interactive mode.
#[derive(Debug, PartialEq)]
pub enum Line {
    /// The line was a command, and the settings were updated.
    Updated(String),

    /// The line is an expression to plot with the current settings.
    Plot(PlotRequest),

    /// The line was empty.
    Empty,
}

/// The settings of an interactive session, applied to every expression typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The request that each expression is plotted with.
    pub template: PlotRequest,
}

/// Parses an on/off flag. A missing value toggles the flag.
fn parse_flag(value: Option<&str>, current: bool) -> Result<bool, String> {
    match value {
        None => Ok(!current),
        Some("on" | "true" | "yes" | "1") => Ok(true),
        Some("off" | "false" | "no" | "0") => Ok(false),
        Some(other) => Err(format!("expected `on` or `off`, got `{}`", other)),
    }
}

/// Parses a pair of bounds, such as `-5 5`.
fn parse_bounds<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<(f64, f64), String> {
    let mut next = || -> Result<f64, String> {
        let arg = args.next().ok_or("expected a minimum and a maximum")?;
        arg.parse().map_err(|_| format!("`{}` is not a number", arg))
    };
    let min = next()?;
    let max = next()?;
    if !(min < max) {
        return Err(format!("the minimum must be less than the maximum, got [{}, {}]", min, max));
    }
    Ok((min, max))
}

impl Session {
    /// Creates a session whose expressions are plotted like the given request.
    pub fn new(template: PlotRequest) -> Self {
        Self { template }
    }

    /// Handles a line of input, either running a command or producing a request to plot.
    pub fn handle(&mut self, line: &str) -> Result<Line, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Line::Empty);
        }

        let Some(command) = line.strip_prefix(':') else {
            return Ok(Line::Plot(self.template.clone().expression(line)));
        };

        let mut args = command.split_whitespace();
        let name = args.next().unwrap_or_default();
        let request = &mut self.template;
        match name {
            "mode" => {
                request.mode = args.next()
                    .ok_or_else(|| String::from("expected `curve` or `surface`"))?
                    .parse()?;
                Ok(Line::Updated(format!("mode: {}", request.mode)))
            },
            "x" => {
                request.x_bounds = parse_bounds(args)?;
                Ok(Line::Updated(format!("x: [{}, {}]", request.x_bounds.0, request.x_bounds.1)))
            },
            "y" => {
                request.y_bounds = parse_bounds(args)?;
                Ok(Line::Updated(format!("y: [{}, {}]", request.y_bounds.0, request.y_bounds.1)))
            },
            "derivative" => {
                request.show_derivative = parse_flag(args.next(), request.show_derivative)?;
                Ok(Line::Updated(format!("derivative: {}", request.show_derivative)))
            },
            "integral" => {
                request.show_integral = parse_flag(args.next(), request.show_integral)?;
                Ok(Line::Updated(format!("integral: {}", request.show_integral)))
            },
            "resolution" => {
                let arg = args.next().ok_or("expected a number of points")?;
                let n = arg.parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("`{}` is not a positive integer", arg))?;
                request.resolution = Some(n);
                Ok(Line::Updated(format!("resolution: {}", n)))
            },
            "help" => Ok(Line::Updated(String::from(HELP))),
            other => Err(format!("unknown command `:{}`; type `:help` for a list of commands", other)),
        }
    }

    /// The mode of the session.
    pub fn mode(&self) -> Mode {
        self.template.mode
    }
}

const HELP: &str = "\
type an expression to plot it, or one of these commands:
  :mode curve|surface     plot curves f(x) or surfaces f(x, y)
  :x MIN MAX              set the bounds of the x axis
  :y MIN MAX              set the bounds of the y axis
  :derivative [on|off]    also plot the derivative of curves
  :integral [on|off]      also plot the integral of curves
  :resolution N           sample N points (N×N for surfaces)";

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn commands() {
        let mut session = Session::new(PlotRequest::default());
        assert_eq!(session.handle(":mode 3d"), Ok(Line::Updated(String::from("mode: surface"))));
        assert_eq!(session.mode(), Mode::Surface);

        session.handle(":x -1 2.5").unwrap();
        assert_eq!(session.template.x_bounds, (-1.0, 2.5));

        session.handle(":derivative").unwrap();
        assert!(session.template.show_derivative);
        session.handle(":derivative off").unwrap();
        assert!(!session.template.show_derivative);

        session.handle(":resolution 50").unwrap();
        assert_eq!(session.template.resolution, Some(50));
    }

    #[test]
    fn expressions_use_settings() {
        let mut session = Session::new(PlotRequest::default());
        session.handle(":integral on").unwrap();
        let Ok(Line::Plot(request)) = session.handle("  x^2 ") else {
            panic!("expected a request");
        };
        assert_eq!(request.expression, "x^2");
        assert!(request.show_integral);
        assert_eq!(session.handle(""), Ok(Line::Empty));
    }

    #[test]
    fn bad_commands() {
        let mut session = Session::new(PlotRequest::default());
        for line in [":x 1", ":x 2 1", ":y a b", ":mode 4d", ":resolution 0", ":zoom"] {
            assert!(session.handle(line).is_err(), "{}", line);
        }
        assert_eq!(session, Session::new(PlotRequest::default()));
    }
}
