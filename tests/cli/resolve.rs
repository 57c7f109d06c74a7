use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

/// Fails with an UNKNOWN report for the first name in `pending.txt` that is
/// not in `modifiers.rs` yet.
const SUITE: &str = r#"
while IFS= read -r name; do
    if ! grep -q "\"$name\"" modifiers.rs; then
        printf '%s\n' "{ \"stdout\": \"    \\\"$name\\\" => Modifier,\\n}\\nUNKNOWN $name\\n\" }"
        exit 101
    fi
done < pending.txt
exit 0
"#;

const SOURCE: &str = r#"pub static MODIFIERS = phf_map! {
    "army_tradition" => Modifier,
    "land_morale" => Modifier,
};
"#;

fn setup(pending: &str) -> Result<CliTest> {
    let test = CliTest::with_file(
        ".locfixrc.json",
        r#"{ "insertHeaderLines": 1, "maxRounds": 5, "test": { "command": "sh suite.sh" } }"#,
    )?;
    test.write_file("suite.sh", SUITE)?;
    test.write_file("pending.txt", pending)?;
    test.write_file("modifiers.rs", SOURCE)?;
    Ok(test)
}

#[test]
fn test_resolve_inserts_until_tests_pass() -> Result<()> {
    let test = setup("prestige\nglobal_tax_modifier\n")?;
    let _settings = test.settings().bind_to_scope();

    assert_cmd_snapshot!(test.resolve_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Inserted prestige at line 4
    Inserted global_tax_modifier at line 3
    ✓ Tests pass after 3 round(s); inserted 2 line(s) into [ROOT]/modifiers.rs

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("modifiers.rs")?,
        r#"pub static MODIFIERS = phf_map! {
    "army_tradition" => Modifier,
    "global_tax_modifier" => Modifier,
    "land_morale" => Modifier,
    "prestige" => Modifier,
};
"#
    );

    Ok(())
}

#[test]
fn test_resolve_gives_up_after_max_rounds() -> Result<()> {
    let test = setup("a1\na2\na3\n")?;
    let _settings = test.settings().bind_to_scope();

    let mut cmd = test.resolve_command();
    cmd.args(["--max-rounds", "2"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 2
    ----- stdout -----
    Inserted a1 at line 2
    Inserted a2 at line 3

    ----- stderr -----
    Error: Failed to resolve unknown modifiers in [ROOT]/modifiers.rs: test command failed (exit code 101): still failing after 2 insertion round(s), last unknown modifier: a3
    --- stdout ---
    { "stdout": "    \"a3\" => Modifier,\n}\nUNKNOWN a3\n" }
    "#);

    let content = test.read_file("modifiers.rs")?;
    assert!(content.contains("\"a1\""));
    assert!(content.contains("\"a2\""));
    assert!(!content.contains("\"a3\""));

    Ok(())
}

#[test]
fn test_resolve_rejects_zero_max_rounds_in_config() -> Result<()> {
    let test = CliTest::with_file(".locfixrc.json", r#"{ "maxRounds": 0 }"#)?;
    let _settings = test.settings().bind_to_scope();

    assert_cmd_snapshot!(test.resolve_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: 'maxRounds' must be greater than 0
    ");

    Ok(())
}
