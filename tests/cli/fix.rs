use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, HOME_WIDGET, run};

#[test]
fn test_fix_dry_run_changes_nothing() -> Result<()> {
    let test = CliTest::with_file("lib/home.dart", HOME_WIDGET)?;

    let (output, stdout) = run(test.fix_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("--> lib/home.dart:7:17"));
    assert!(stdout.contains("- 'Hello World'"));
    assert!(stdout.contains("+ AppLocalizations.of(context)!.helloWorld"));
    assert!(stdout.contains("= key: helloWorld (new)"));
    assert!(stdout.contains("Would rewrite 1 literal(s) in 1 file(s), 1 new key(s)"));
    assert_eq!(test.read_file("lib/home.dart")?, HOME_WIDGET);
    assert!(!test.root().join("lib/l10n/app_en.arb").exists());

    Ok(())
}

#[test]
fn test_fix_apply_rewrites_and_creates_arb() -> Result<()> {
    let test = CliTest::with_file("lib/home.dart", HOME_WIDGET)?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let (output, stdout) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Rewrote 1 literal(s) in 1 file(s), added 1 key(s) to lib/l10n/app_en.arb."));

    let dart = test.read_file("lib/home.dart")?;
    assert_eq!(
        dart,
        r#"import 'package:flutter/material.dart';
import 'package:flutter_gen/gen_l10n/app_localizations.dart';

class Home extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    logger.error('Connection failed');
    return Text(AppLocalizations.of(context)!.helloWorld);
  }
}
"#
    );

    let arb: Value = serde_json::from_str(&test.read_file("lib/l10n/app_en.arb")?)?;
    assert_eq!(arb["@@locale"], "en");
    assert_eq!(arb["helloWorld"], "Hello World");
    assert_eq!(
        arb["@helloWorld"]["description"],
        "Extracted from lib/home.dart:7"
    );

    // A second run finds nothing left to do
    let (output, _) = run(test.check_command())?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_fix_interpolation_and_const() -> Result<()> {
    let test = CliTest::with_file(
        "lib/profile.dart",
        r#"class Profile extends StatelessWidget {
  Widget build(BuildContext context) {
    return Column(children: [
      Text('Welcome, $name!'),
      const Text('Save'),
    ]);
  }
}
"#,
    )?;
    test.write_file(
        "lib/l10n/app_en.arb",
        "{\n  \"@@locale\": \"en\",\n  \"save\": \"Save\"\n}\n",
    )?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let (output, _) = run(cmd)?;
    assert_eq!(output.status.code(), Some(0));

    let dart = test.read_file("lib/profile.dart")?;
    assert!(dart.contains("Text(AppLocalizations.of(context)!.welcome(name)),"));
    assert!(dart.contains("      Text(AppLocalizations.of(context)!.save),"));
    assert!(!dart.contains("const Text"));

    let arb: Value = serde_json::from_str(&test.read_file("lib/l10n/app_en.arb")?)?;
    assert_eq!(arb["save"], "Save");
    assert_eq!(arb["welcome"], "Welcome, {param0}!");
    assert_eq!(arb["@welcome"]["placeholders"]["param0"]["example"], "name");

    Ok(())
}

#[test]
fn test_fix_reports_unrewritable() -> Result<()> {
    let test = CliTest::with_file(
        "lib/mood.dart",
        "enum Mood {\n  happy('Feeling happy');\n\n  const Mood(this.label);\n  final String label;\n}\n",
    )?;
    test.write_file(".arbliftrc.json", r#"{ "customUiPatterns": ["happy\\("] }"#)?;

    let (output, stdout) = run(test.fix_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("warning: \"Feeling happy\"  unrewritable"));
    assert!(stdout.contains("Would rewrite 0 literal(s)"));

    Ok(())
}

#[test]
fn test_fix_clean_project() -> Result<()> {
    let test = CliTest::with_file("lib/main.dart", "void main() => runApp(const App());\n")?;

    let (output, stdout) = run(test.fix_command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("no issues found"));

    Ok(())
}
