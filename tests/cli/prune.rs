use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

fn setup_locales(test: &CliTest) -> Result<()> {
    test.write_file(
        "i18n/messages.properties",
        "total=总计: {}件\npage=第{0}页\nhello=你好世界\n",
    )?;
    test.write_file(
        "i18n/messages_en.properties",
        "# English\ntotal=Total: {} items\n\nhello=Hello world\npage=Page {0}\n",
    )?;
    test.write_file("i18n/messages_ja.properties", "hello=こんにちは\n")?;
    Ok(())
}

#[test]
fn test_prune_dry_run_leaves_files() -> Result<()> {
    let test = CliTest::new()?;
    setup_locales(&test)?;

    let output = test
        .command()
        .args(["prune-placeholders", "i18n/messages.properties"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "  --> i18n/messages_en.properties: 2 key(s)\nWould remove 2 key(s) from 1 file(s).\nRun with --apply to remove these keys.\n"
    );
    assert!(test.read_file("i18n/messages_en.properties")?.contains("total="));

    Ok(())
}

#[test]
fn test_prune_apply_rewrites_siblings() -> Result<()> {
    let test = CliTest::new()?;
    setup_locales(&test)?;

    let output = test
        .command()
        .args(["prune-placeholders", "i18n/messages.properties", "--apply"])
        .output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Removed 2 key(s) from 1 file(s)."));

    assert_snapshot!(test.read_file("i18n/messages_en.properties")?, @r"
    # English

    hello=Hello world
    ");
    assert_eq!(
        test.read_file("i18n/messages_ja.properties")?,
        "hello=こんにちは\n"
    );

    Ok(())
}

#[test]
fn test_prune_missing_main_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("prune-placeholders").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "Error: main file messages.properties does not exist\n"
    );

    Ok(())
}
