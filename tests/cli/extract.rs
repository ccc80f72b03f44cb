use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

const HELLO: &str = r#"package com.demo;

public class Hello {
    public String greet(String name) {
        log.info("Hello World");
        return "你好，" + name + "，欢迎回来";
    }

    public String title() {
        return "用户管理";
    }
}
"#;

fn setup_project(test: &CliTest) -> Result<()> {
    test.write_file("web/pom.xml", "<project/>")?;
    test.write_file("web/src/main/java/com/demo/Hello.java", HELLO)?;
    test.write_file(
        "web/src/test/java/com/demo/HelloTest.java",
        r#"class HelloTest { String data = "测试数据"; }"#,
    )?;
    test.write_file(
        "common/src/main/java/Util.java",
        r#"class Util { static final String OK = "操作成功"; }"#,
    )?;
    Ok(())
}

#[test]
fn test_extract_writes_properties() -> Result<()> {
    let test = CliTest::maven()?;
    setup_project(&test)?;

    let output = test.extract_command("i18n/messages.properties").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Scanned 2 files, found 3 strings\n  Added 3 new entries to i18n/messages.properties (0 already present, 3 total)\n"
    );
    assert_eq!(stderr(&output), "");

    assert_snapshot!(test.read_file("i18n/messages.properties")?, @r"
    # 自动生成的国际化配置文件
    # Auto-generated i18n configuration file

    操作成功=操作成功
    web.你好_欢迎回来=你好，{}，欢迎回来
    web.用户管理=用户管理
    ");

    Ok(())
}

#[test]
fn test_extract_is_idempotent_and_keeps_existing_entries() -> Result<()> {
    let test = CliTest::maven()?;
    setup_project(&test)?;
    test.write_file(
        "messages.properties",
        "# 手工维护\nuser.title=用户管理\n",
    )?;

    let output = test.extract_command("messages.properties").output()?;
    assert!(output.status.success());
    let first = test.read_file("messages.properties")?;

    let output = test.extract_command("messages.properties").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Added 0 new entries"));
    assert_eq!(test.read_file("messages.properties")?, first);

    assert_snapshot!(first, @r"
    # 自动生成的国际化配置文件
    # Auto-generated i18n configuration file

    user.title=用户管理
    操作成功=操作成功
    web.你好_欢迎回来=你好，{}，欢迎回来
    ");

    Ok(())
}

#[test]
fn test_extract_ini_without_module_prefix() -> Result<()> {
    let test = CliTest::maven()?;
    setup_project(&test)?;

    let output = test
        .extract_command("conf/i18n.ini")
        .arg("--no-module-prefix")
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_snapshot!(test.read_file("conf/i18n.ini")?, @r"
    [DEFAULT]
    操作成功 = 操作成功
    你好_欢迎回来 = 你好，{}，欢迎回来
    用户管理 = 用户管理
    ");

    Ok(())
}

#[test]
fn test_extract_ini_multiline_values_are_idempotent() -> Result<()> {
    let test = CliTest::maven()?;
    test.write_file(
        "src/main/java/Notice.java",
        r#"class Notice { String a = "第一行\n  第二行"; String b = "甲\r\n乙"; }"#,
    )?;

    let output = test.extract_command("i18n.ini").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let first = test.read_file("i18n.ini")?;
    assert_eq!(
        first,
        "[DEFAULT]\n第一行_第二行 = 第一行\n\t  第二行\n甲_乙 = 甲\\r\n\t乙\n\n"
    );

    let output = test.extract_command("i18n.ini").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Added 0 new entries"));
    assert_eq!(test.read_file("i18n.ini")?, first);

    Ok(())
}

#[test]
fn test_extract_decodes_gbk_sources() -> Result<()> {
    let test = CliTest::maven()?;
    let (bytes, _, _) = encoding_rs::GBK.encode(r#"class Legacy { String s = "系统繁忙，请稍后再试"; }"#);
    test.write_bytes("src/Legacy.java", &bytes)?;

    let output = test.extract_command("messages.properties").output()?;
    assert!(output.status.success());
    assert!(
        test.read_file("messages.properties")?
            .contains("系统繁忙_请稍后再试=系统繁忙，请稍后再试")
    );

    Ok(())
}

#[test]
fn test_extract_missing_pom_is_a_warning() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/A.java", r#"class A { String s = "欢迎使用"; }"#)?;

    let output = test.extract_command("messages.properties").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stderr(&output),
        "warning: 1 warning(s) (use -v for details)\n"
    );

    let output = test.extract_command("messages.properties").arg("-v").output()?;
    let out = stdout(&output);
    assert!(out.contains("warning: no pom.xml in project root"));
    assert!(out.contains("missing-pom"));

    Ok(())
}

#[test]
fn test_extract_verbose_lists_added_entries() -> Result<()> {
    let test = CliTest::maven()?;
    test.write_file(
        "src/A.java",
        r#"class A { String a = "欢迎使用"; String b = "保存成功了吗"; }"#,
    )?;

    let output = test.extract_command("messages.properties").arg("-v").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("  + 欢迎使用     = 欢迎使用\n  + 保存成功了吗 = 保存成功了吗\n"));

    Ok(())
}

#[test]
fn test_extract_ai_keys_without_api_key_falls_back() -> Result<()> {
    let test = CliTest::maven()?;
    test.write_file("src/A.java", r#"class A { String a = "欢迎使用"; }"#)?;

    let output = test
        .extract_command("messages.properties")
        .arg("--ai-keys")
        .arg("-v")
        .output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("key suggestion: "));
    assert!(test.read_file("messages.properties")?.contains("欢迎使用=欢迎使用"));

    Ok(())
}

#[test]
fn test_extract_respects_config_ignores() -> Result<()> {
    let test = CliTest::maven()?;
    setup_project(&test)?;
    test.write_file(".i18n4jrc.json", r#"{ "ignores": ["common"] }"#)?;

    let output = test.extract_command("messages.properties").output()?;
    assert!(output.status.success());
    let content = test.read_file("messages.properties")?;
    assert!(!content.contains("操作成功"));
    assert!(content.contains("web.用户管理=用户管理"));

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::maven()?;
    test.write_file(".i18n4jrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command("messages.properties").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignores"));

    Ok(())
}

#[test]
fn test_extract_missing_project_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("missing").arg("out.properties").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "Error: project directory missing does not exist or is not a directory\n"
    );
    assert!(!test.root().join("out.properties").exists());

    Ok(())
}

#[test]
fn test_no_arguments_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
