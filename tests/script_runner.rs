// Scheem Script Runner
// Discovers all .scm files in tests/scripts/, runs each in a fresh environment,
// and compares the printed result (or error message) to the sibling .expected file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use walkdir::WalkDir;

use scheem::engine::run_source;
use scheem::Environment;

fn find_test_scripts(dir: &str) -> Vec<(PathBuf, PathBuf)> {
    let mut tests: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "scm"))
        .filter_map(|path| {
            let expected = path.with_extension("expected");
            expected.exists().then_some((path, expected))
        })
        .collect();
    tests.sort();
    tests
}

fn read_file_trimmed(path: &Path) -> io::Result<String> {
    Ok(fs::read_to_string(path)?
        .replace("\r\n", "\n")
        .trim()
        .to_string())
}

#[test]
fn integration_scripts() {
    let scripts = find_test_scripts("tests/scripts");
    assert!(
        !scripts.is_empty(),
        "No .scm test scripts found in tests/scripts/"
    );

    let mut failed = Vec::new();
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    for (script, expected) in scripts {
        let script_name = script.display().to_string();
        let source = read_file_trimmed(&script).expect("Failed to read script");
        let expected_output = read_file_trimmed(&expected).expect("Failed to read expected output");

        let actual_output = match run_source(&source, &script_name, &Environment::new()) {
            Ok(value) => value.to_string(),
            Err(e) => format!("error: {e}"),
        };

        if actual_output == expected_output {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
            let _ = writeln!(stdout, "PASS: {script_name}");
        } else {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
            let _ = writeln!(stdout, "FAIL: {script_name}");
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
            let _ = writeln!(stdout, "  Expected: {expected_output:?}");
            let _ = writeln!(stdout, "  Actual:   {actual_output:?}");
            failed.push(script_name);
        }
        let _ = stdout.reset();
    }

    assert!(failed.is_empty(), "failing scripts: {failed:?}");
}
