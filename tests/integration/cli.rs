//! Flags, introspection modes and fatal errors.

use predicates::prelude::*;
use yaml_readme::test_utils::ReadmeProject;

use crate::common::yaml_readme;

#[test]
fn test_print_functions_lists_sorted_names() {
    let project = ReadmeProject::new().unwrap();
    let output = yaml_readme(project.path()).arg("--print-functions").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let names: Vec<&str> = stdout.lines().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();

    assert_eq!(names, sorted);
    for expected in ["item_count", "group_count", "repo_stars", "sanitize_render", "user_lookup"] {
        assert!(names.contains(&expected), "missing {expected} in {stdout}");
    }
}

#[test]
fn test_print_variables() {
    let project = ReadmeProject::new().unwrap();
    yaml_readme(project.path())
        .arg("--print-variables")
        .assert()
        .success()
        .stdout("filename\nparentname\nfullpath\n");
}

#[test]
fn test_help_mentions_flags() {
    let project = ReadmeProject::new().unwrap();
    yaml_readme(project.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--pattern"))
        .stdout(predicate::str::contains("--sort-by"))
        .stdout(predicate::str::contains("--include-header"));
}

#[test]
fn test_verbose_and_quiet_are_exclusive() {
    let project = ReadmeProject::new().unwrap();
    yaml_readme(project.path()).args(["--verbose", "--quiet"]).assert().failure();
}

#[test]
fn test_invalid_pattern_exits_with_error() {
    let project = ReadmeProject::new().unwrap();
    yaml_readme(project.path())
        .args(["--pattern", "items/[.yaml"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn test_malformed_template_exits_with_error() {
    let project = ReadmeProject::new().unwrap();
    project.write_record("a.yaml", "name: a\n").unwrap();
    project.write_template("# Title\n{% for item in items %}{{ item.name }}\n").unwrap();

    yaml_readme(project.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Failed to render template 'README.tpl'"))
        .stderr(predicate::str::contains("Template Syntax Error"));
}

#[test]
fn test_undefined_variable_suggests_binding() {
    let project = ReadmeProject::new().unwrap();
    project.write_template("{{ item }}").unwrap();

    yaml_readme(project.path())
        .arg("--include-header=false")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Variable: item"))
        .stderr(predicate::str::contains("- items"));
}
