use clap::CommandFactory;
use rstest::rstest;

use super::*;

#[test]
fn cli_definition_is_valid() {
	HtmergeCli::command().debug_assert();
}

#[rstest]
#[case::bare("index.html", "merged_", "merged_index.html")]
#[case::nested("site/index.html", "merged_", "site/merged_index.html")]
#[case::custom_prefix("a/b/page.htm", "bundle-", "a/b/bundle-page.htm")]
fn default_output_paths(#[case] source: &str, #[case] prefix: &str, #[case] expected: &str) {
	assert_eq!(
		default_output_path(Path::new(source), prefix),
		PathBuf::from(expected)
	);
}

#[rstest]
#[case::default(&["htmerge", "index.html"], "info")]
#[case::verbose(&["htmerge", "-v", "index.html"], "debug")]
#[case::quiet(&["htmerge", "--quiet", "index.html"], "error")]
fn log_filters(#[case] argv: &[&str], #[case] expected: &str) {
	let args = HtmergeCli::parse_from(argv);
	assert_eq!(args.log_filter(), expected);
}

#[test]
fn positional_output() {
	let args = HtmergeCli::parse_from(["htmerge", "in.html", "out.html"]);
	assert_eq!(args.source, Some(PathBuf::from("in.html")));
	assert_eq!(args.output, Some(PathBuf::from("out.html")));
}

#[test]
fn no_arguments_has_no_source() {
	let args = HtmergeCli::parse_from(["htmerge"]);
	assert!(args.source.is_none());
}
