use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, HOME_WIDGET, run};

#[test]
fn test_hardcoded_text() -> Result<()> {
    let test = CliTest::with_file("lib/home.dart", HOME_WIDGET)?;

    let (output, stdout) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("error: \"Hello World\"  hardcoded"));
    assert!(stdout.contains("--> lib/home.dart:7:17"));
    assert!(stdout.contains("= note: user-facing widget `Text`"));
    assert!(!stdout.contains("Connection failed"));
    assert!(stdout.contains("1 problems (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_file(
        "lib/home.dart",
        r#"
class Home extends StatelessWidget {
  Widget build(BuildContext context) {
    return Text(AppLocalizations.of(context)!.helloWorld);
  }
}
"#,
    )?;

    let (output, stdout) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout, "\u{2713} Checked 1 source file - no issues found\n");

    Ok(())
}

#[test]
fn test_suppression_directive() -> Result<()> {
    let test = CliTest::with_file(
        "lib/home.dart",
        r#"
Widget banner(BuildContext context) {
  // arblift-disable-next-line
  return Text('Beta');
}
"#,
    )?;

    let (output, _) = run(test.check_command())?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_unrewritable_is_a_warning() -> Result<()> {
    let test = CliTest::with_file(
        "lib/banner.dart",
        r#"
class Banner extends StatelessWidget {
  const Banner({super.key, this.label = 'Limited offer'});

  final String label;
}
"#,
    )?;
    test.write_file(
        ".arbliftrc.json",
        r#"{ "customUiPatterns": ["this\\.label"] }"#,
    )?;

    let (output, stdout) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("warning: \"Limited offer\"  unrewritable"));
    assert!(stdout.contains("= note: default parameter value cannot be rewritten"));

    Ok(())
}

#[test]
fn test_parse_error_exit_code() -> Result<()> {
    let test = CliTest::with_file("lib/broken.dart", "void main() {\n  print('x';\n")?;

    let (output, stdout) = run(test.check_command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("--> lib/broken.dart"));

    Ok(())
}

#[test]
fn test_non_ui_layer_and_generated_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lib/data/messages.dart", "const message = 'Retry';\n")?;
    test.write_file("lib/home.g.dart", "final w = Text('Generated');\n")?;
    test.write_file("test/home_test.dart", "final w = Text('In a test');\n")?;

    let (output, _) = run(test.check_command())?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_missing_scan_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".arbliftrc.json", r#"{ "scanRoots": ["app"] }"#)?;

    let output = test.check_command().output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Scan root does not exist"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let (output, stdout) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    for command in ["check", "fix", "baseline", "init"] {
        assert!(stdout.contains(command), "help should list `{}`", command);
    }

    Ok(())
}
