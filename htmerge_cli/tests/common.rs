use assert_cmd::Command;

pub fn htmerge_cmd() -> Command {
	let mut cmd = Command::cargo_bin("htmerge").unwrap_or_else(|e| panic!("htmerge binary: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}
