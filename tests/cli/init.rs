use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["ignores", "ignoreTestFiles", "modulePrefix", "maxKeyLength", "ai"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["ai"]["model"], "gemma3:12b");

    // 2-space indentation
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\u{2713} Created .i18n4jrc.json\n");

    assert!(test.root().join(".i18n4jrc.json").exists());
    let content = test.read_file(".i18n4jrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18n4jrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .i18n4jrc.json already exists\n");
    assert_eq!(test.read_file(".i18n4jrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::maven()?;

    test.command().arg("init").output()?;
    test.write_file("src/A.java", r#"class A { String s = "欢迎使用"; }"#)?;

    let output = test.extract_command("messages.properties").output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.read_file("messages.properties")?.contains("欢迎使用=欢迎使用"));

    Ok(())
}
