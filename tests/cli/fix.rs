use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_fix_rewrites_translation_file() -> Result<()> {
    let test = CliTest::with_project(
        r#"{
  "formats": { "number": { "currency": { "style": "currency" } } },
  "messages": {
    "app.title": "Bienvenue",
    "app.legacy": "Ancien",
    "app.save": { "text": "Enregistrer", "comment": "Button" }
  }
}"#,
    )?;
    test.write_file(
        "src/app/cancel.ts",
        "i18n.translate('app.cancel', { defaultMessage: 'Cancel' });\n",
    )?;

    let output = test.run(&["--fix"])?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("✓ translations/fr-FR.json (1 translation(s), file updated)"));
    assert_eq!(
        test.read_file("translations/fr-FR.json")?,
        r#"{
  "formats": {
    "number": {
      "currency": {
        "style": "currency"
      }
    }
  },
  "messages": {
    "app.save": {
      "text": "Enregistrer",
      "comment": "Button"
    }
  }
}
"#
    );
    Ok(())
}

#[test]
fn test_fix_keeps_ids_outside_extracted_namespaces() -> Result<()> {
    let test = CliTest::with_project(
        r#"{ "messages": { "xpack.name": "Nom", "app.title": "Bienvenue {name}", "app.gone": "Parti" } }"#,
    )?;

    let output = test.run(&["--fix"])?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let content = test.read_file("translations/fr-FR.json")?;
    assert!(content.contains("\"xpack.name\": \"Nom\""));
    assert!(content.contains("\"app.title\": \"Bienvenue {name}\""));
    assert!(!content.contains("app.gone"));
    Ok(())
}

#[test]
fn test_fix_is_idempotent() -> Result<()> {
    let test = CliTest::with_project(r#"{ "messages": { "app.old": "Vieux" } }"#)?;

    assert_eq!(test.run(&["--fix"])?.status.code(), Some(0));
    let first = test.read_file("translations/fr-FR.json")?;
    assert_eq!(test.run(&["--fix"])?.status.code(), Some(0));

    assert_eq!(test.read_file("translations/fr-FR.json")?, first);
    assert_eq!(first, "{\n  \"messages\": {}\n}\n");
    Ok(())
}

#[test]
fn test_unreadable_translation_file_is_reported() -> Result<()> {
    let test = CliTest::with_project("{ not json")?;

    let output = test.run(&["--fix"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse translation file translations/fr-FR.json"));
    Ok(())
}

#[test]
fn test_fix_keeps_translations_of_failed_namespaces() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18nrc.json",
        r#"{
  "paths": { "alpha": "src/alpha", "beta": "src/beta" },
  "translations": ["translations/fr-FR.json"]
}"#,
    )?;
    test.write_file(
        "src/alpha/index.ts",
        "i18n.translate('alpha.x', { defaultMessage: '' });\n",
    )?;
    test.write_file(
        "src/beta/index.ts",
        "i18n.translate('beta.y', { defaultMessage: 'Hello' });\n",
    )?;
    test.write_file(
        "translations/fr-FR.json",
        r#"{ "messages": { "beta.y": "Bonjour" } }"#,
    )?;

    let output = test.run(&["--fix"])?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("✘ alpha"));
    assert!(out.contains("- beta [aborted]"));
    assert!(stderr(&output).contains("Empty defaultMessage for \"alpha.x\""));
    let content = test.read_file("translations/fr-FR.json")?;
    assert!(content.contains("\"beta.y\": \"Bonjour\""), "{}", content);
    Ok(())
}
