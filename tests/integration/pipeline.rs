//! Loading, sorting, grouping and rendering records through the binary.

use predicates::prelude::*;
use yaml_readme::test_utils::{ReadmeProject, RecordFixture};

use crate::common::yaml_readme;

const NAMES: &str = "{% for item in items %}{{ item.name }}{% endfor %}";

fn project_with_years() -> ReadmeProject {
    let project = ReadmeProject::new().unwrap();
    project.write_fixture(&RecordFixture::named("b", "2019")).unwrap();
    project.write_fixture(&RecordFixture::named("a", "2020")).unwrap();
    project.write_fixture(&RecordFixture::named("c", "2018")).unwrap();
    project.write_template(NAMES).unwrap();
    project
}

#[test]
fn test_default_run_includes_header() {
    let project = project_with_years();
    yaml_readme(project.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "> This file was generated by [README.tpl](README.tpl) via [yaml-readme](https://github.com/LinuxSuRen/yaml-readme), please don't edit it directly!\n\n",
        ));
}

#[test]
fn test_sort_descending_by_default() {
    let project = project_with_years();
    yaml_readme(project.path())
        .args(["--include-header=false", "--sort-by", "year"])
        .assert()
        .success()
        .stdout("abc");
}

#[test]
fn test_sort_ascending_with_bang() {
    let project = project_with_years();
    yaml_readme(project.path())
        .args(["--include-header=false", "--sort-by", "!year"])
        .assert()
        .success()
        .stdout("cba");
}

#[test]
fn test_sort_from_environment() {
    let project = project_with_years();
    yaml_readme(project.path())
        .arg("--include-header=false")
        .env("YAML_README_SORT_BY", "!year")
        .assert()
        .success()
        .stdout("cba");
}

#[test]
fn test_records_without_string_sort_value_go_last() {
    let project = project_with_years();
    project.write_record("d.yaml", "name: d\nyear: 2021\n").unwrap();
    project.write_record("e.yaml", "name: e\n").unwrap();

    yaml_readme(project.path())
        .args(["--include-header=false", "--sort-by", "year"])
        .assert()
        .success()
        .stdout("abcde");

    yaml_readme(project.path())
        .args(["--include-header=false", "--sort-by", "!year"])
        .assert()
        .success()
        .stdout("cbade");
}

#[test]
fn test_ignored_and_malformed_records_are_skipped() {
    let project = project_with_years();
    project.write_fixture(&RecordFixture::ignored("hidden")).unwrap();
    project.write_fixture(&RecordFixture::malformed("broken")).unwrap();
    project.write_record("list.yaml", "- not\n- a mapping\n").unwrap();

    yaml_readme(project.path())
        .args(["--include-header=false", "--sort-by", "!year"])
        .assert()
        .success()
        .stdout("cba")
        .stderr(predicate::str::contains("broken.yaml"))
        .stderr(predicate::str::contains("list.yaml"));
}

#[test]
fn test_zero_matches_render_empty_list() {
    let project = ReadmeProject::new().unwrap();
    project.write_template("{{ item_count() }} records").unwrap();

    yaml_readme(project.path())
        .args(["--include-header=false", "--pattern", "nothing/*.yaml"])
        .assert()
        .success()
        .stdout("0 records");
}

#[test]
fn test_group_by_binds_sorted_groups() {
    let project = ReadmeProject::new().unwrap();
    project.write_record("a.yaml", "name: a\nyear: 2024\n").unwrap();
    project.write_record("b.yaml", "name: b\nyear: \"2023\"\n").unwrap();
    project.write_record("c.yaml", "name: c\nyear: 2024\n").unwrap();
    project
        .write_template(
            "{% for year, entries in groups %}{{ year }}:{% for e in entries %}{{ e.name }}{% endfor %};{% endfor %}{{ group_count() }}/{{ item_count() }}",
        )
        .unwrap();

    yaml_readme(project.path())
        .args(["--include-header=false", "--group-by", "year"])
        .assert()
        .success()
        .stdout("2023:b;2024:ac;2/3");
}

#[test]
fn test_records_missing_template_fields_render_empty() {
    let project = ReadmeProject::new().unwrap();
    project.write_record("a.yaml", "name: a\ndone: true\nkind: tool\n").unwrap();
    project.write_record("b.yaml", "name: b\nkind: tool\n").unwrap();
    project
        .write_template("{% for item in items %}{{ item.name }}={{ item.done | sanitize_render }};{% endfor %}")
        .unwrap();

    yaml_readme(project.path())
        .arg("--include-header=false")
        .assert()
        .success()
        .stdout("a=:white_check_mark:;b=;");

    project
        .write_template("{% for kind, entries in groups %}{% for item in entries %}{{ item.name }}={{ item.done | sanitize_render }};{% endfor %}{% endfor %}")
        .unwrap();

    yaml_readme(project.path())
        .args(["--include-header=false", "--group-by", "kind"])
        .assert()
        .success()
        .stdout("a=:white_check_mark:;b=;");
}

#[test]
fn test_provenance_fields() {
    let project = ReadmeProject::new().unwrap();
    project.write_record("tool.yaml", "name: tool\n").unwrap();
    project.write_template("{% for item in items %}{{ item.filename }}|{{ item.parentname }}|{{ item.fullpath }}{% endfor %}").unwrap();

    yaml_readme(project.path())
        .args(["--include-header=false"])
        .assert()
        .success()
        .stdout("tool|items|items/tool.yaml");
}

#[test]
fn test_directives_removed_and_toc_rendered() {
    let project = ReadmeProject::new().unwrap();
    project
        .write_template("#!yaml-readme -p items/*.yaml --output README.md\n{{ table_of_contents() }}\n## Install\n### Linux\n## Get Started\n")
        .unwrap();

    yaml_readme(project.path())
        .arg("--include-header=false")
        .assert()
        .success()
        .stdout("- [Install](#install)\n - [Linux](#linux)\n\n## Install\n### Linux\n## Get Started\n");
}

#[test]
fn test_missing_template_falls_back_to_table() {
    let project = ReadmeProject::new().unwrap();
    project.write_record("a.yaml", "zh: 甲\nen: A\njd: https://jd.example/a\n").unwrap();

    yaml_readme(project.path())
        .args(["--include-header=false", "--template", "absent.tpl"])
        .assert()
        .success()
        .stdout("|中文名称|英文名称|JD|\n|---|---|---|\n|甲|A|https://jd.example/a|")
        .stderr(predicate::str::contains("absent.tpl"));
}

#[test]
fn test_pure_functions_render() {
    let project = ReadmeProject::new().unwrap();
    project
        .write_record("a.yaml", "name: a\ndone: true\ntwitter: rick\nauthor: \"[Rick](https://github.com/linuxsuren)\"\n")
        .unwrap();
    project
        .write_template(
            "{% for item in items %}{{ item.done | sanitize_render }} {{ twitter_link(user=item.twitter) }} {{ github_id(link=item.author) }} {{ link_or_empty(text=\"x\", url=\"\") }}{% endfor %}",
        )
        .unwrap();

    yaml_readme(project.path())
        .arg("--include-header=false")
        .assert()
        .success()
        .stdout(":white_check_mark: [@rick](https://twitter.com/rick) linuxsuren ");
}
