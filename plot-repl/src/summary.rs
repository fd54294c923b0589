use plot_graph::{PlotOutput, Series, SurfaceMesh};
use std::fmt::{self, Display, Formatter};

/// The number of evenly spaced sample values printed for each series.
const SAMPLES: usize = 5;

/// Formats a value for the summary, keeping non-finite values readable.
fn value(v: f64) -> String {
    if v.is_nan() {
        String::from("undefined")
    } else {
        format!("{:.6}", v)
    }
}

/// Picks up to [`SAMPLES`] evenly spaced indices in `0..len`, including both ends.
fn sample_indices(len: usize) -> Vec<usize> {
    match len {
        0 => Vec::new(),
        len if len <= SAMPLES => (0..len).collect(),
        len => (0..SAMPLES).map(|i| i * (len - 1) / (SAMPLES - 1)).collect(),
    }
}

/// Writes the parts of the summary shared by curves and surfaces.
fn write_counts(
    f: &mut Formatter,
    counts: &plot_graph::plot::StatusCounts,
    range: Option<(f64, f64)>,
) -> fmt::Result {
    writeln!(
        f,
        "  points: {} ({} finite, {} non-finite, {} complex)",
        counts.total(),
        counts.finite,
        counts.non_finite,
        counts.complex,
    )?;
    if let Some((min, max)) = range {
        writeln!(f, "  range: [{}, {}]", value(min), value(max))?;
    }
    Ok(())
}

/// A text summary of a plot, printed in place of a chart.
pub struct Summary<'a>(pub &'a PlotOutput);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.0 {
            PlotOutput::Curve(series) => series.iter().try_for_each(|series| write_series(f, series)),
            PlotOutput::Surface(mesh) => write_mesh(f, mesh),
        }
    }
}

fn write_series(f: &mut Formatter, series: &Series) -> fmt::Result {
    writeln!(f, "{} = {}", series.label, series.expression)?;
    write_counts(f, &series.counts, series.range())?;
    for index in sample_indices(series.x.len()) {
        writeln!(f, "    x = {:>12}  ->  {}", value(series.x[index]), value(series.y[index]))?;
    }
    Ok(())
}

fn write_mesh(f: &mut Formatter, mesh: &SurfaceMesh) -> fmt::Result {
    writeln!(f, "{} = {}", mesh.title, mesh.expression)?;
    write_counts(f, &mesh.counts, mesh.range())?;
    let rows = mesh.z.len();
    let cols = mesh.z.first().map_or(0, Vec::len);
    writeln!(f, "  mesh: {}x{}", rows, cols)?;
    for (i, j) in sample_indices(rows).into_iter().zip(sample_indices(cols)) {
        writeln!(
            f,
            "    (x, y) = ({}, {})  ->  {}",
            value(mesh.x[i][j]),
            value(mesh.y[i][j]),
            value(mesh.z[i][j]),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use plot_graph::{PlotRequest, Plotter};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn indices() {
        assert_eq!(sample_indices(0), Vec::<usize>::new());
        assert_eq!(sample_indices(3), vec![0, 1, 2]);
        assert_eq!(sample_indices(800), vec![0, 199, 399, 599, 799]);
    }

    #[test]
    fn curve() {
        let output = Plotter::new()
            .plot(&PlotRequest::new("1 / x").x_bounds(-1.0, 1.0).resolution(3))
            .unwrap();
        assert_eq!(Summary(&output).to_string(), [
            "f(x) = 1 / x",
            "  points: 3 (2 finite, 1 non-finite, 0 complex)",
            "  range: [-1.000000, 1.000000]",
            "    x =    -1.000000  ->  -1.000000",
            "    x =     0.000000  ->  inf",
            "    x =     1.000000  ->  1.000000",
            "",
        ].join("\n"));
    }
}
