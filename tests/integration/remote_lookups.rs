//! GitHub-backed template functions against a mock API.

use mockito::Server;
use yaml_readme::test_utils::ReadmeProject;

use crate::common::{yaml_readme, yaml_readme_with_api};

const USER_BODY: &str = r#"{
    "login": "LinuxSuRen",
    "name": "Rick",
    "html_url": "https://github.com/LinuxSuRen",
    "bio": "Open source lover"
}"#;

const REPO_BODY: &str = r#"{
    "stargazers_count": 42,
    "forks_count": 7,
    "license": { "spdx_id": "MIT" },
    "created_at": "2021-03-04T05:06:07Z",
    "pushed_at": "2022-01-02T03:04:05Z"
}"#;

fn project() -> ReadmeProject {
    let project = ReadmeProject::new().unwrap();
    project
        .write_record("tool.yaml", "name: tool\nowner: LinuxSuRen\nrepo: yaml-readme\n")
        .unwrap();
    project
        .write_template(
            "{% for item in items %}{{ user_lookup(id=item.owner, bio=true) }}|{{ repo_stars(owner=item.owner, repo=item.repo) }}|{{ repo_summary(owner=item.owner, repo=item.repo) }}{% endfor %}",
        )
        .unwrap();
    project
}

#[test]
fn test_lookups_use_the_api() {
    let mut server = Server::new();
    let user = server
        .mock("GET", "/users/LinuxSuRen")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USER_BODY)
        .create();
    let repo = server
        .mock("GET", "/repos/LinuxSuRen/yaml-readme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPO_BODY)
        .expect(2)
        .create();

    let project = project();
    yaml_readme_with_api(project.path(), &server.url())
        .arg("--include-header=false")
        .assert()
        .success()
        .stdout("[Rick](https://github.com/LinuxSuRen) (Open source lover)|42|MIT|42|2021-03-04|2022-01-02");

    user.assert();
    repo.assert();
}

#[test]
fn test_api_errors_render_fallbacks() {
    let mut server = Server::new();
    server.mock("GET", "/users/LinuxSuRen").with_status(404).create();
    server.mock("GET", "/repos/LinuxSuRen/yaml-readme").with_status(500).create();

    let project = project();
    yaml_readme_with_api(project.path(), &server.url())
        .arg("--include-header=false")
        .assert()
        .success()
        .stdout("LinuxSuRen||");
}

#[test]
fn test_unreachable_api_still_renders() {
    let project = project();
    yaml_readme(project.path())
        .arg("--include-header=false")
        .assert()
        .success()
        .stdout("LinuxSuRen||");
}
