use std::fs;
use std::path::{Path, PathBuf};

const INPUT_EXT: &str = "syntra";
const INPUT_MARKER: &str = "=== INPUT ===";
const OUTPUT_MARKER: &str = "=== OUTPUT ===";

/// Compares `render(path, source)` for every `*.syntra` file in `dir` against a sibling file with
/// extension `golden_ext`.
///
/// A missing golden file is written and the test fails so it can be reviewed.
/// Set `BLESS=1` to rewrite every golden file from the current output.
pub fn run_golden_dir<F>(test_name: &str, dir: &Path, golden_ext: &str, mut render: F)
where
    F: FnMut(&Path, &str) -> String,
{
    let inputs = collect_inputs(dir);
    assert!(!inputs.is_empty(), "no .{INPUT_EXT} files in {dir:?}");

    let bless = std::env::var_os("BLESS").is_some();
    let mut mismatches = Vec::new();

    for input in inputs {
        let source = fs::read_to_string(&input)
            .unwrap_or_else(|e| panic!("failed to read {input:?}: {e}"));
        let actual = normalize_output(&render(&input, &source));
        let golden_path = input.with_extension(golden_ext);

        if bless {
            write_golden(&golden_path, &source, &actual);
            continue;
        }

        let Ok(golden) = fs::read_to_string(&golden_path) else {
            write_golden(&golden_path, &source, &actual);
            panic!(
                "wrote missing golden file {golden_path:?}; review it and re-run `cargo test {test_name}`"
            );
        };

        if normalize_output(extract_output(&golden)) != actual {
            mismatches.push(golden_path);
        }
    }

    assert!(
        mismatches.is_empty(),
        "golden mismatch in {mismatches:?}\nTo update: BLESS=1 cargo test {test_name}"
    );
}

fn collect_inputs(dir: &Path) -> Vec<PathBuf> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("failed to read test dir {dir:?}: {e}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some(INPUT_EXT))
        .collect();
    inputs.sort();
    inputs
}

fn write_golden(path: &Path, source: &str, output: &str) {
    let mut contents = format!("{INPUT_MARKER}\n{source}");
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(OUTPUT_MARKER);
    contents.push('\n');
    contents.push_str(output);

    fs::write(path, contents).unwrap_or_else(|e| panic!("failed to write {path:?}: {e}"));
}

fn extract_output(contents: &str) -> &str {
    match contents.split_once(OUTPUT_MARKER) {
        Some((_, after)) => after
            .strip_prefix("\r\n")
            .or_else(|| after.strip_prefix('\n'))
            .unwrap_or(after),
        None => contents,
    }
}

/// Trims trailing whitespace on each line and ends with exactly one newline.
fn normalize_output(s: &str) -> String {
    let mut out: String = s.lines().map(|l| format!("{}\n", l.trim_end())).collect();
    while out.ends_with("\n\n") {
        out.pop();
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}
