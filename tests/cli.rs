use assert_cmd::Command;
use tempfile::TempDir;

const UNTIDY: &str = "DISTNAME=  package-1.0\n";
const TIDY: &str = "DISTNAME=\tpackage-1.0\n";

fn mklint(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mklint").expect("binary should be built");
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn silent_run_reports_and_leaves_the_file_alone() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("Makefile"), UNTIDY)?;

    mklint(&dir).arg("Makefile").assert().code(1).stdout(
        "WARN: Makefile:1: Values should be separated from the assignment operator by a tab, not spaces.\n\
         \n\
         Found 1 problem.\n",
    );

    assert_eq!(std::fs::read_to_string(dir.path().join("Makefile"))?, UNTIDY);
    Ok(())
}

#[test]
fn preview_shows_the_fix_and_the_diff_without_writing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("Makefile"), UNTIDY)?;

    mklint(&dir)
        .args(["--show-autofix", "--source", "Makefile"])
        .assert()
        .code(1)
        .stdout(
            "WARN: Makefile:1: Values should be separated from the assignment operator by a tab, not spaces.\n\
             AUTOFIX: Makefile:1: Replacing regular expression \"^([A-Za-z_][A-Za-z0-9_.]*)([?+:]?=)[ ]+\" with \"$1$2\t\".\n\
             \n\
             - DISTNAME=  package-1.0\n\
             + DISTNAME=\tpackage-1.0\n\
             \n\
             Found 1 problem.\n",
        );

    assert_eq!(std::fs::read_to_string(dir.path().join("Makefile"))?, UNTIDY);
    Ok(())
}

#[test]
fn autofix_rewrites_the_file_and_the_next_run_is_clean() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("Makefile"), UNTIDY)?;

    mklint(&dir).args(["--autofix", "Makefile"]).assert().code(1).stdout(
        "AUTOFIX: Makefile:1: Replacing regular expression \"^([A-Za-z_][A-Za-z0-9_.]*)([?+:]?=)[ ]+\" with \"$1$2\t\".\n\
         AUTOFIX: Makefile: Has been auto-fixed. Please re-run mklint.\n\
         \n\
         Found 1 problem.\n",
    );

    assert_eq!(std::fs::read_to_string(dir.path().join("Makefile"))?, TIDY);

    mklint(&dir)
        .arg("Makefile")
        .assert()
        .success()
        .stdout("\nAll checks passed!\n");
    Ok(())
}

#[test]
fn explain_prints_the_attached_paragraph() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("Makefile"), UNTIDY)?;

    mklint(&dir).args(["--explain", "Makefile"]).assert().code(1).stdout(
        "WARN: Makefile:1: Values should be separated from the assignment operator by a tab, not spaces.\n\
         \n\
         \tA single tab after the operator keeps the values of consecutive\n\
         \tassignments aligned at the same column, which makes blocks of\n\
         \tvariable definitions easier to scan.\n\
         \n\
         \n\
         Found 1 problem.\n",
    );
    Ok(())
}

#[test]
fn preview_renders_continuation_spans_with_context() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("Makefile"),
        "SRCS=\tfoo.c \\\n\tbar.c  \n",
    )?;

    mklint(&dir)
        .args(["--show-autofix", "--source", "Makefile"])
        .assert()
        .code(1)
        .stdout(
            "NOTE: Makefile:1--2: Trailing whitespace.\n\
             AUTOFIX: Makefile:1--2: Replacing regular expression \"(?m)[ \\t]+$\" with \"\".\n\
             \n\
             > SRCS=\tfoo.c \\\n\
             - \tbar.c  \n\
             + \tbar.c\n\
             \n\
             Found 1 problem.\n",
        );
    Ok(())
}

#[test]
fn bare_diagnostics_disappear_in_preview() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    // Long lines only get a note, which has no fix to preview.
    std::fs::write(
        dir.path().join("Makefile"),
        format!("X=\t{}\n", "a".repeat(130)),
    )?;

    mklint(&dir)
        .args(["--show-autofix", "Makefile"])
        .assert()
        .success()
        .stdout("\nAll checks passed!\n");
    Ok(())
}

#[test]
fn directories_are_walked_for_build_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::create_dir(dir.path().join("sub"))?;
    std::fs::write(dir.path().join("sub").join("rules.mk"), "A=1  \n")?;
    std::fs::write(dir.path().join("README"), "not a build file  \n")?;

    mklint(&dir).arg(".").assert().code(1).stdout(
        "NOTE: ./sub/rules.mk:1: Trailing whitespace.\n\
         \n\
         Found 1 problem.\n",
    );
    Ok(())
}

#[test]
fn a_run_without_build_files_warns_and_succeeds() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::create_dir(dir.path().join("empty"))?;

    mklint(&dir)
        .arg("empty")
        .assert()
        .success()
        .stdout("Warning: No build-script files found under the given path(s).\n");
    Ok(())
}

#[test]
fn unreadable_input_fails_with_a_cause_chain() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let output = mklint(&dir).arg("missing/Makefile").output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mklint failed"), "stderr was: {stderr}");
    assert!(
        stderr.contains("Failed to read file: missing/Makefile"),
        "stderr was: {stderr}"
    );
    Ok(())
}
