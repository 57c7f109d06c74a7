use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const CONFIG: &str = r#"{ "correctHeaderLines": 2 }"#;

const CSV: &str = "\
land_morale;\"Morale of Armies\";\"Land Morale\"
global_tax_modifier;\"National Tax\";\"Tax Income\"
";

const SOURCE: &str = r#"// generated, do not edit
pub static MODIFIERS = phf_map! {
    "global_tax_modifier" => Modifier { name: "National Tax", short: "National Tax" },
    "land_morale" => Modifier { name: "Morale of Armies" },
    "prestige" => Modifier { name: "Prestige" },
};
"#;

const CORRECTED: &str = r#"// generated, do not edit
pub static MODIFIERS = phf_map! {
    "global_tax_modifier" => Modifier { name: "Tax Income", short: "Tax Income" },
    "land_morale" => Modifier { name: "Land Morale" },
    "prestige" => Modifier { name: "Prestige" },
};
"#;

fn setup() -> Result<CliTest> {
    let test = CliTest::with_file(".locfixrc.json", CONFIG)?;
    test.write_file("res/modifier_names.csv", CSV)?;
    test.write_file("modifiers.rs", SOURCE)?;
    Ok(test)
}

#[test]
fn test_correct_in_place() -> Result<()> {
    let test = setup()?;
    let _settings = test.settings().bind_to_scope();

    assert_cmd_snapshot!(test.correct_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Corrected 2 line(s) in [ROOT]/modifiers.rs (2 of 2 entries matched)

    ----- stderr -----
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, CORRECTED);
    Ok(())
}

#[test]
fn test_correct_is_default_command() -> Result<()> {
    let test = setup()?;
    let _settings = test.settings().bind_to_scope();

    assert_cmd_snapshot!(test.command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Corrected 2 line(s) in [ROOT]/modifiers.rs (2 of 2 entries matched)

    ----- stderr -----
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, CORRECTED);
    Ok(())
}

#[test]
fn test_correct_twice_audits_unchanged_entries() -> Result<()> {
    let test = setup()?;
    let _settings = test.settings().bind_to_scope();
    test.correct_command().output()?;

    let mut cmd = test.correct_command();
    cmd.arg("-v");
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [ROOT]/modifiers.rs:3 global_tax_modifier (already correct)
    [ROOT]/modifiers.rs:4 land_morale (already correct)
    ✓ Corrected 0 line(s) in [ROOT]/modifiers.rs (2 of 2 entries matched)

    ----- stderr -----
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, CORRECTED);
    Ok(())
}

#[test]
fn test_correct_dry_run_writes_nothing() -> Result<()> {
    let test = setup()?;
    let _settings = test.settings().bind_to_scope();

    let mut cmd = test.correct_command();
    cmd.arg("--dry-run");
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [ROOT]/modifiers.rs:3 global_tax_modifier
      -     "global_tax_modifier" => Modifier { name: "National Tax", short: "National Tax" },
      +     "global_tax_modifier" => Modifier { name: "Tax Income", short: "Tax Income" },
    [ROOT]/modifiers.rs:4 land_morale
      -     "land_morale" => Modifier { name: "Morale of Armies" },
      +     "land_morale" => Modifier { name: "Land Morale" },
    Would correct 2 line(s) in [ROOT]/modifiers.rs (2 of 2 entries matched).
    Run without --dry-run to write them.

    ----- stderr -----
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, SOURCE);
    Ok(())
}

#[test]
fn test_correct_to_output_file() -> Result<()> {
    let test = setup()?;
    let _settings = test.settings().bind_to_scope();

    let mut cmd = test.correct_command();
    cmd.args(["-o", "fixed.rs"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Corrected 2 line(s) in [ROOT]/fixed.rs (2 of 2 entries matched)

    ----- stderr -----
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, SOURCE);
    assert_eq!(test.read_file("fixed.rs")?, CORRECTED);
    Ok(())
}

#[test]
fn test_header_lines_are_never_modified() -> Result<()> {
    let test = setup()?;
    let _settings = test.settings().bind_to_scope();

    let mut cmd = test.correct_command();
    cmd.args(["--header-lines", "3"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Corrected 1 line(s) in [ROOT]/modifiers.rs (1 of 2 entries matched)

    ----- stderr -----
    "#);

    let content = test.read_file("modifiers.rs")?;
    assert!(content.contains(r#"name: "National Tax", short: "National Tax""#));
    assert!(content.contains(r#"name: "Land Morale""#));
    Ok(())
}

#[test]
fn test_correct_ignores_invalid_test_section() -> Result<()> {
    let test = setup()?;
    test.write_file(
        ".locfixrc.json",
        r#"{ "correctHeaderLines": 2, "maxRounds": 0, "test": { "timeoutSecs": 0 } }"#,
    )?;
    let _settings = test.settings().bind_to_scope();

    assert_cmd_snapshot!(test.correct_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Corrected 2 line(s) in [ROOT]/modifiers.rs (2 of 2 entries matched)

    ----- stderr -----
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, CORRECTED);
    Ok(())
}

#[test]
fn test_missing_csv_is_error() -> Result<()> {
    let test = CliTest::with_file("modifiers.rs", SOURCE)?;
    let _settings = test.settings().bind_to_scope();

    assert_cmd_snapshot!(test.correct_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to load corrections: file not found: [ROOT]/res/modifier_names.csv
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, SOURCE);
    Ok(())
}

#[test]
fn test_malformed_csv_row_is_error() -> Result<()> {
    let test = setup()?;
    test.write_file("res/modifier_names.csv", "ok;\"a\";\"b\"\nbroken;\"a\"\n")?;
    let _settings = test.settings().bind_to_scope();

    assert_cmd_snapshot!(test.correct_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to load corrections: [ROOT]/res/modifier_names.csv: row 2 has 2 field(s), expected at least 3
    "#);

    assert_eq!(test.read_file("modifiers.rs")?, SOURCE);
    Ok(())
}
