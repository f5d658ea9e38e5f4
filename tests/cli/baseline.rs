use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, HOME_WIDGET, run};

#[test]
fn test_baseline_dry_run() -> Result<()> {
    let test = CliTest::with_file("lib/home.dart", HOME_WIDGET)?;

    let (output, stdout) = run(test.baseline_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("--> lib/home.dart:7:17"));
    assert!(stdout.contains("+     // arblift-disable-next-line"));
    assert!(stdout.contains("Would insert 1 comment(s) in 1 file(s):"));
    assert!(stdout.contains("  - hardcoded: 1 issue(s)"));
    assert_eq!(test.read_file("lib/home.dart")?, HOME_WIDGET);

    Ok(())
}

#[test]
fn test_baseline_apply_then_check_is_clean() -> Result<()> {
    let test = CliTest::with_file(
        "lib/home.dart",
        r#"Widget build(BuildContext context) {
  return Column(children: [
    Text('Title'),
    Row(children: [Text('Left'), Text('Right')]),
  ]);
}
"#,
    )?;

    let mut cmd = test.baseline_command();
    cmd.arg("--apply");
    let (output, stdout) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Inserted 2 comment(s) in 1 file(s) (processed 3 issue(s)):"));
    assert_eq!(
        test.read_file("lib/home.dart")?,
        r#"Widget build(BuildContext context) {
  return Column(children: [
    // arblift-disable-next-line
    Text('Title'),
    // arblift-disable-next-line
    Row(children: [Text('Left'), Text('Right')]),
  ]);
}
"#
    );

    let (output, _) = run(test.check_command())?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_baseline_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file("lib/util.dart", "final path = '/api/v1/users';\n")?;

    let (output, stdout) = run(test.baseline_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("no issues found"));

    Ok(())
}
