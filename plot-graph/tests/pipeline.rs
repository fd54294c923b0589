use assert_float_eq::assert_float_absolute_eq;
use plot_compute::{grid::Shape, Expression};
use plot_error::Category;
use plot_graph::plot::{sample_curve, Mode, PlotRequest, Plotter, Status};
use plot_parser::SymbolTable;
use pretty_assertions::assert_eq;
use std::{f64::consts::PI, sync::Arc, thread};

#[test]
fn derivative_of_sine_is_cosine() {
    let derivative = Expression::parse("sin(x)", SymbolTable::CURVE).unwrap()
        .derivative(plot_parser::Variable::X).unwrap()
        .compile().unwrap();
    for x in [0.0, PI / 4.0, PI / 2.0, PI] {
        assert_float_absolute_eq!(derivative.eval_point(&[x]), x.cos(), 1e-12);
    }
}

#[test]
fn curve_shape() {
    let expression = Expression::parse("sin(x) / x", SymbolTable::CURVE).unwrap();
    let (grid, sampled) = sample_curve(&expression, -10.0, 10.0, 800).unwrap();
    assert_eq!(grid.shape(), Shape::Line(800));
    assert_eq!(sampled.values.len(), 800);
    assert_eq!(grid.axis(0).unwrap().len(), 800);

    let output = Plotter::new().plot(&PlotRequest::new("x^2")).unwrap();
    let series = &output.series()[0];
    assert_eq!(series.x.len(), 800);
    assert_eq!(series.y.len(), 800);
}

#[test]
fn pole_is_non_finite() {
    let expression = Expression::parse("1/x", SymbolTable::CURVE).unwrap();
    let (grid, sampled) = sample_curve(&expression, -1.0, 1.0, 201).unwrap();
    assert_eq!(grid.axis(0).unwrap()[100], 0.0);

    for (index, status) in sampled.statuses().enumerate() {
        if index == 100 {
            assert_eq!(status, Status::NonFinite);
        } else {
            assert_eq!(status, Status::Finite, "at index {}", index);
        }
    }
}

#[test]
fn nothing_finite() {
    let expression = Expression::parse("log(x)", SymbolTable::CURVE).unwrap();
    let err = sample_curve(&expression, -5.0, -1.0, 100).unwrap_err();
    assert_eq!(err.category(), Category::EmptyResult);
    assert!(err.render_plain("input", "log(x)").contains(&expression.to_string()));

    let err = Plotter::new()
        .plot(&PlotRequest::new("log(x)").x_bounds(-5.0, -1.0).resolution(100))
        .unwrap_err();
    assert_eq!(err.category(), Category::EmptyResult);
}

#[test]
fn integral_without_closed_form() {
    let err = Plotter::new()
        .plot(&PlotRequest::new("exp(x^2)").show_integral(true))
        .unwrap_err();
    assert_eq!(err.category(), Category::NoClosedForm);
}

#[test]
fn branches_share_the_grid() {
    let request = PlotRequest::new("x^2")
        .x_bounds(-2.0, 2.0)
        .resolution(5)
        .show_derivative(true)
        .show_integral(true);
    let output = Plotter::new().plot(&request).unwrap();
    let series = output.series();
    assert_eq!(series.len(), 3);

    for branch in series {
        assert_eq!(branch.x, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }
    assert_eq!(series[0].y, vec![4.0, 1.0, 0.0, 1.0, 4.0]);
    assert_eq!(series[1].y, vec![-4.0, -2.0, 0.0, 2.0, 4.0]);
    for (x, y) in series[2].finite_points() {
        assert_float_absolute_eq!(y, x * x * x / 3.0, 1e-12);
    }
}

#[test]
fn errors_by_stage() {
    let plotter = Plotter::new();
    let cases = [
        ("2 +", Mode::Curve, Category::Parse),
        ("sin(x", Mode::Curve, Category::Parse),
        ("import(x)", Mode::Curve, Category::InvalidSymbol),
        ("x + y", Mode::Curve, Category::InvalidSymbol),
        ("x + z", Mode::Surface, Category::InvalidSymbol),
        ("sqrt(x - 10)", Mode::Curve, Category::EmptyResult),
    ];
    for (text, mode, category) in cases {
        let err = plotter.plot(&PlotRequest::new(text).mode(mode)).unwrap_err();
        assert_eq!(err.category(), category, "{}", text);
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn surface() {
    let request = PlotRequest::new("sin(x) * cos(y)")
        .mode(Mode::Surface)
        .x_bounds(-PI, PI)
        .y_bounds(0.0, PI)
        .resolution(21);
    let output = Plotter::new().plot(&request).unwrap();
    let mesh = output.surface().unwrap();
    assert_eq!(mesh.z.len(), 21);
    assert!(mesh.z.iter().all(|row| row.len() == 21));
    assert_eq!(mesh.counts.finite, 21 * 21);

    let (min, max) = mesh.range().unwrap();
    assert_float_absolute_eq!(min, -1.0, 1e-12);
    assert_float_absolute_eq!(max, 1.0, 1e-12);
}

#[test]
fn cache_prepares_once() {
    let plotter = Arc::new(Plotter::new().with_cache());
    let request = PlotRequest::new("x * exp(x)").show_integral(true).resolution(50);

    let handles = (0..8)
        .map(|_| {
            let plotter = Arc::clone(&plotter);
            let request = request.clone();
            thread::spawn(move || plotter.plot(&request).unwrap())
        })
        .collect::<Vec<_>>();
    let outputs = handles.into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(plotter.cache().unwrap().len(), 1);

    // different bounds reuse the compiled branches
    plotter.plot(&request.clone().x_bounds(0.0, 1.0)).unwrap();
    assert_eq!(plotter.cache().unwrap().len(), 1);

    plotter.plot(&request.show_derivative(true)).unwrap();
    assert_eq!(plotter.cache().unwrap().len(), 2);
}

#[test]
fn cached_failures() {
    let plotter = Plotter::new().with_cache();
    let request = PlotRequest::new("1 / ln(x)").show_integral(true);
    let first = plotter.plot(&request).unwrap_err();
    let second = plotter.plot(&request).unwrap_err();
    assert_eq!(first.category(), Category::NoClosedForm);
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(plotter.cache().unwrap().len(), 1);
}
