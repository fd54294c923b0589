use plot_attrs::ErrorKind;
use plot_error::{Category, Error};

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidSymbol,
    message = format!("unknown function: `{}`", name),
    labels = ["this function"],
    help = "check the spelling",
)]
struct UnknownName {
    name: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = EmptyResult, message = "nothing to plot")]
struct Nothing;

#[test]
fn category_and_message() {
    let err = Error::new(vec![0..3], UnknownName { name: "foo".to_string() });
    assert_eq!(err.category(), Category::InvalidSymbol);
    assert_eq!(err.message(), "unknown function: `foo`");
    assert_eq!(err.to_string(), "invalid symbol: unknown function: `foo` (check the spelling)");
}

#[test]
fn downcast() {
    let err = Error::unspanned(Nothing);
    assert!(err.is::<Nothing>());
    assert!(!err.is::<UnknownName>());
    assert_eq!(err.downcast_ref::<Nothing>(), Some(&Nothing));
    assert_eq!(err.to_string(), "empty result: nothing to plot");
}

#[test]
fn plain_report_points_at_source() {
    let err = Error::new(vec![0..3], UnknownName { name: "foo".to_string() });
    let rendered = err.render_plain("input", "foo(x)");
    assert!(rendered.contains("unknown function: `foo`"));
    assert!(rendered.contains("this function"));
    assert!(rendered.contains("check the spelling"));
    assert!(!rendered.contains('\u{1b}'));
}

#[test]
fn report_without_spans() {
    let err = Error::unspanned(Nothing);
    let rendered = err.render_plain("input", "log(x)");
    assert!(rendered.contains("nothing to plot"));
}
