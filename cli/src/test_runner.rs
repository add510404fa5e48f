use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const FIXTURE_SUFFIX: &str = ".test.mr";

/// TOML front matter of a fixture.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Human-readable fixture description.
    #[serde(default)]
    pub description: Option<String>,

    /// Render as slides regardless of `%slide-mode`.
    #[serde(default)]
    pub slides: bool,

    /// Substrings that must all appear in the generated LaTeX.
    #[serde(default)]
    pub expect_contains: Vec<String>,

    /// Substrings that must not appear in the generated LaTeX.
    #[serde(default)]
    pub expect_not_contains: Vec<String>,

    /// If true, the fixture expects parsing to fail.
    #[serde(default)]
    pub expect_parse_error: bool,

    /// Expected parse error: its Display string must contain this substring.
    #[serde(default)]
    pub expect_error: Option<String>,
}

impl FixtureConfig {
    fn expects_failure(&self) -> bool {
        self.expect_parse_error || self.expect_error.is_some()
    }
}

/// Split a fixture into its TOML front matter and markright source.
fn split_fixture(content: &str) -> Result<(FixtureConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');
    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- front matter delimiter")?;
    let after_open = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'))
        .unwrap_or(after_open);

    let (toml_str, rest) = match after_open.strip_prefix("---") {
        Some(rest) => ("", rest),
        None => {
            let close = after_open
                .find("\n---")
                .ok_or("missing closing --- front matter delimiter")?;
            (
                after_open[..close].trim_end_matches('\r'),
                &after_open[close + "\n---".len()..],
            )
        }
    };
    let source = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: FixtureConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;
    Ok((config, source))
}

pub enum Outcome {
    Pass,
    Fail(String),
}

pub struct FixtureResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: Outcome,
}

impl FixtureResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_suffix(FIXTURE_SUFFIX))
                .unwrap_or("?")
        })
    }
}

fn run_fixture(path: &Path) -> FixtureResult {
    let (description, outcome) = match std::fs::read_to_string(path) {
        Err(e) => (None, Err(format!("cannot read file: {}", e))),
        Ok(content) => match split_fixture(&content) {
            Err(e) => (None, Err(format!("front matter error: {}", e))),
            Ok((config, source)) => (config.description.clone(), check_fixture(&config, source)),
        },
    };

    FixtureResult {
        path: path.to_path_buf(),
        description,
        outcome: match outcome {
            Ok(()) => Outcome::Pass,
            Err(reason) => Outcome::Fail(reason),
        },
    }
}

/// Parse and render `source`, then hold the result against `config`.
fn check_fixture(config: &FixtureConfig, source: &str) -> Result<(), String> {
    let parsed = markright::parser::Parser::new(source.to_string(), 0).parse();

    if config.expects_failure() {
        let err = match parsed {
            Ok(_) => return Err("expected parse error, but parsing succeeded".into()),
            Err(err) => err.to_string(),
        };
        return match &config.expect_error {
            Some(expected) if !err.contains(expected.as_str()) => Err(format!(
                "expected error containing \"{}\", got: {}",
                expected, err
            )),
            _ => Ok(()),
        };
    }

    let document = parsed.map_err(|e| format!("unexpected parse error: {}", e))?;
    let options = latex::Options {
        force_slides: config.slides,
        ..latex::Options::default()
    };
    let output = latex::render_with(&document, &options);

    let missing: Vec<&str> = config
        .expect_contains
        .iter()
        .map(String::as_str)
        .filter(|s| !output.contains(s))
        .collect();
    let unwanted: Vec<&str> = config
        .expect_not_contains
        .iter()
        .map(String::as_str)
        .filter(|s| output.contains(s))
        .collect();
    if missing.is_empty() && unwanted.is_empty() {
        return Ok(());
    }

    let mut reason = String::new();
    for s in missing {
        reason.push_str(&format!("missing from output: {:?}\n", s));
    }
    for s in unwanted {
        reason.push_str(&format!("unexpected in output: {:?}\n", s));
    }
    reason.push_str("output:\n");
    reason.push_str(&output);
    Err(reason)
}

/// Discover fixtures grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_fixtures(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_fixtures(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_fixtures(&path, root, out);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(FIXTURE_SUFFIX))
        {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// List available categories for the given fixture path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} fixtures)", category_label(category), files.len());
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

struct Style {
    no_color: bool,
}

impl Style {
    fn paint(&self, code: &str, s: &str) -> String {
        if self.no_color {
            s.to_string()
        } else {
            format!("\x1b[{}m{}\x1b[0m", code, s)
        }
    }

    fn pass(&self) -> String {
        self.paint("32", "PASS")
    }

    fn fail(&self) -> String {
        self.paint("31", "FAIL")
    }

    fn bold(&self, s: &str) -> String {
        self.paint("1", s)
    }
}

/// Run and print one fixture; failures are kept for the summary.
fn run_and_report(path: &Path, style: &Style, failures: &mut Vec<FixtureResult>) -> bool {
    let result = run_fixture(path);
    match result.outcome {
        Outcome::Pass => {
            eprintln!("  {}  {}", style.pass(), result.label());
            true
        }
        Outcome::Fail(_) => {
            eprintln!("  {}  {}", style.fail(), result.label());
            failures.push(result);
            false
        }
    }
}

/// Print failure details and the summary line. Returns the exit code.
fn summarize(passed: usize, failures: &[FixtureResult], style: &Style) -> i32 {
    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            if let Outcome::Fail(reason) = &failure.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    if failures.is_empty() {
        eprintln!("test result: {}. {} passed, 0 failed", style.paint("32", "ok"), passed);
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            style.paint("31", "FAILED"),
            passed,
            failures.len(),
            passed + failures.len()
        );
        1
    }
}

/// Run every fixture under `path` (or a single file).
/// If `categories` is non-empty, only run fixtures in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let style = Style { no_color };
    let mut passed = 0usize;
    let mut failures = Vec::new();

    if path.is_file() {
        if run_and_report(path, &style, &mut failures) {
            passed += 1;
        }
        return summarize(passed, &failures, &style);
    }

    let all_categories = discover_categorized(path);
    if all_categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return 1;
    }

    let selected: BTreeMap<&str, &Vec<PathBuf>> = if categories.is_empty() {
        all_categories.iter().map(|(k, v)| (k.as_str(), v)).collect()
    } else {
        let mut filtered = BTreeMap::new();
        for requested in categories {
            let req = requested.trim_matches('/');
            let prefix = format!("{}/", req);
            let before = filtered.len();
            for (category, files) in &all_categories {
                if category == req || category.starts_with(&prefix) {
                    filtered.insert(category.as_str(), files);
                }
            }
            if filtered.len() == before {
                let available: Vec<&str> = all_categories.keys().map(|k| category_label(k)).collect();
                eprintln!(
                    "warning: category '{}' not found (available: {})",
                    req,
                    available.join(", ")
                );
            }
        }
        filtered
    };

    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    for (category, files) in &selected {
        eprintln!();
        eprintln!("{}", style.bold(category_label(category)));
        for file in files.iter() {
            if run_and_report(file, &style, &mut failures) {
                passed += 1;
            }
        }
    }

    summarize(passed, &failures, &style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn splits_front_matter() {
        let (config, source) =
            split_fixture("---\ndescription = \"d\"\nslides = true\n---\n# S\n x\n").unwrap();
        assert_eq!(config.description.as_deref(), Some("d"));
        assert!(config.slides);
        assert_eq!(source, "# S\n x\n");
    }

    #[test]
    fn rejects_missing_front_matter() {
        assert!(split_fixture("# S").is_err());
        assert!(split_fixture("---\nslides = true\n# S").is_err());
    }

    #[test]
    fn passing_and_failing_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let pass = write_fixture(
            dir.path(),
            "ok.test.mr",
            "---\nexpect_contains = [\"\\\\section{S}\"]\n---\n# S\n",
        );
        let fail = write_fixture(
            dir.path(),
            "bad.test.mr",
            "---\nexpect_contains = [\"\\\\subsection\"]\n---\n# S\n",
        );
        assert!(matches!(run_fixture(&pass).outcome, Outcome::Pass));
        assert!(matches!(run_fixture(&fail).outcome, Outcome::Fail(_)));
        assert_eq!(run_tests(dir.path(), true, &[]), 1);
    }

    #[test]
    fn expected_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "err.test.mr",
            "---\nexpect_error = \"code block is not closed\"\n---\n# S\n[code]{\n",
        );
        assert!(matches!(run_fixture(&path).outcome, Outcome::Pass));

        let wrong = write_fixture(
            dir.path(),
            "wrong.test.mr",
            "---\nexpect_error = \"trailing input\"\n---\n# S\n[code]{\n",
        );
        assert!(matches!(run_fixture(&wrong).outcome, Outcome::Fail(_)));
    }

    #[test]
    fn categories_follow_subfolders() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "top.test.mr", "---\n---\n# S\n");
        write_fixture(dir.path(), "blocks/list.test.mr", "---\n---\n# S\n* a\n");
        write_fixture(dir.path(), "blocks/notes.txt", "ignored");
        let categories = discover_categorized(dir.path());
        let keys: Vec<&str> = categories.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["", "blocks"]);
        assert_eq!(categories["blocks"].len(), 1);
        assert_eq!(run_tests(dir.path(), true, &["blocks".to_string()]), 0);
    }

    #[test]
    fn bundled_fixtures_pass() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
        assert_eq!(run_tests(&root, true, &[]), 0);
    }
}
