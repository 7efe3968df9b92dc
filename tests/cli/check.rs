use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const COMPLETE: &str = r#"{
  "messages": {
    "app.title": "Bienvenue {name}",
    "app.save": "Enregistrer"
  }
}
"#;

#[test]
fn test_no_config_is_nothing_to_check() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/main.ts", "export const a = 1;\n")?;

    let output = test.run(&[])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("nothing to check"));
    Ok(())
}

#[test]
fn test_complete_translations_pass() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    let output = test.run(&[])?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    insta::assert_snapshot!(stdout(&output), @r"
    ✓ Checking for untracked messages
        ✓ src
    ✓ Extracting default messages
        ✓ app (2 message(s))
    ✓ Checking compatibility of translation files
        ✓ translations/fr-FR.json (2 translation(s))
    ");
    // Dry run leaves the file alone.
    assert_eq!(test.read_file("translations/fr-FR.json")?, COMPLETE);
    Ok(())
}

#[test]
fn test_problems_are_reported_once() -> Result<()> {
    let test = CliTest::with_project(
        r#"{
  "messages": {
    "app.title": "Bienvenue",
    "app.legacy": "Ancien"
  }
}"#,
    )?;

    let output = test.run(&[])?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains(" I18N ERROR "));
    assert!(err.contains(
        "Error in translations/fr-FR.json\n\
         Incompatible translations (1):\n  \
         app.title: expected {name}, found no placeholders\n\
         Unused translations (1):\n  \
         app.legacy\n\
         Missing translations (1):\n  \
         app.save"
    ));
    assert!(stdout(&output).contains("✘ translations/fr-FR.json"));
    Ok(())
}

#[test]
fn test_ignore_flags_tolerate_categories() -> Result<()> {
    let test = CliTest::with_project(
        r#"{ "messages": { "app.title": "Bienvenue {name}", "app.legacy": "Ancien" } }"#,
    )?;

    let output = test.run(&["--ignore-unused", "--ignore-missing=true"])?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    Ok(())
}

#[test]
fn test_untracked_files_fail_but_checks_continue() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;
    test.write_file(
        "src/other/widget.tsx",
        "const label = i18n.translate('other.label', { defaultMessage: 'Label' });\n",
    )?;

    let output = test.run(&[])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(
        "Error in src\n\
         1 file(s) contain i18n labels but are not covered by any namespace in .i18nrc.json:\n  \
         src/other/widget.tsx"
    ));
    assert!(stdout(&output).contains("✓ translations/fr-FR.json"));

    let output = test.run(&["--ignore-untracked"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Checking for untracked messages [skipped]"));
    Ok(())
}

#[test]
fn test_bad_namespace_prefix_aborts_extraction() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;
    test.write_file(
        "src/app/broken.ts",
        "const x = i18n.translate('other.title', { defaultMessage: 'Title' });\n",
    )?;

    let output = test.run(&[])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(
        "Error in app\nExpected \"other.title\" id to have \"app\" namespace prefix (src/app/broken.ts:1)"
    ));
    let out = stdout(&output);
    assert!(out.contains("✘ app"));
    // Compatibility still ran, with the failed namespace out of scope.
    assert!(out.contains("Checking compatibility of translation files"));
    Ok(())
}

#[test]
fn test_missing_include_config_is_unhandled() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    let output = test.run(&["--include-config", "x-pack/.i18nrc.json"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Included config file not found"));
    Ok(())
}

#[test]
fn test_include_config_adds_namespaces_and_translations() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;
    test.write_file(
        "x-pack/.i18nrc.json",
        r#"{ "paths": { "xpack": "plugins" }, "translations": ["translations/de-DE.json"] }"#,
    )?;
    test.write_file(
        "x-pack/plugins/index.ts",
        "i18n.translate('xpack.name', { defaultMessage: 'Name' });\n",
    )?;
    test.write_file(
        "x-pack/translations/de-DE.json",
        r#"{ "messages": { "xpack.name": "Name", "app.title": "Willkommen {name}", "app.save": "Speichern" } }"#,
    )?;
    test.write_file(
        "translations/fr-FR.json",
        r#"{ "messages": { "app.title": "Bienvenue {name}", "app.save": "Enregistrer", "xpack.name": "Nom" } }"#,
    )?;

    let output = test.run(&["--include-config", "x-pack/.i18nrc.json"])?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("✓ xpack (1 message(s))"));
    assert!(out.contains("✓ x-pack/translations/de-DE.json (3 translation(s))"));
    Ok(())
}

#[test]
fn test_path_limits_the_check() -> Result<()> {
    let test = CliTest::with_project(COMPLETE)?;

    let output = test.run(&["--path", "src/app"])?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("✓ src/app\n"));
    assert!(test.root().join("translations/fr-FR.json").is_file());
    Ok(())
}
