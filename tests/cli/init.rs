use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["scanRoots"], serde_json::json!(["lib"]));
    assert_eq!(parsed["arbFile"], "lib/l10n/app_en.arb");
    assert_eq!(parsed["locale"], "en");
    assert!(
        parsed["rewrite"].get("ambientAccessor").is_some(),
        "Config should have 'rewrite.ambientAccessor' field"
    );
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (output, stdout) = run(cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Created .arbliftrc.json"));
    assert!(test.root().join(".arbliftrc.json").exists());

    let content = test.read_file(".arbliftrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".arbliftrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(".arbliftrc.json already exists"));
    assert_eq!(test.read_file(".arbliftrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_loadable() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lib/home.dart", "final x = 1;\n")?;

    let mut cmd = test.command();
    cmd.arg("init");
    run(cmd)?;

    let (output, _) = run(test.check_command())?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}
