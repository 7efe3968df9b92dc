use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const COMPLETE: &str = r#"{ "messages": { "app.title": "Bienvenue {name}", "app.save": "Enregistrer" } }"#;

#[test]
fn test_fix_with_ignore_flag_is_rejected() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    for flag in [
        "--ignore-incompatible",
        "--ignore-unused=false",
        "--ignore-missing",
        "--ignore-untracked",
    ] {
        let output = test.run(&["--fix", flag])?;
        assert_eq!(output.status.code(), Some(1), "{}", flag);
        assert!(stderr(&output).contains("incompatible flags"), "{}", flag);
        // Validation happens before any stage runs.
        assert!(stdout(&output).is_empty(), "{}", flag);
    }
    Ok(())
}

#[test]
fn test_path_without_value_is_rejected() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    let output = test.run(&["--path"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("flags require a value: --path"));
    Ok(())
}

#[test]
fn test_include_config_without_value_is_rejected() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    let output = test.run(&["--include-config"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("flags require a value: --include-config"));
    Ok(())
}

#[test]
fn test_switches_reject_values() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    let output = test.run(&["--fix=yes"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("flag cannot have a value: --fix"));

    let output = test.run(&["--ignore-untracked", "src"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("flag cannot have a value: --ignore-untracked"));
    Ok(())
}

#[test]
fn test_verbose_logs_to_stderr() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    let output = test.run(&["-v"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("configuration loaded"));
    Ok(())
}
