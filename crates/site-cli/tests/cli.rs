//! CLI command integration tests.
//! Each test uses a temp directory via SITE_DATA_DIR for full isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ARTICLES_TOML: &str = r#"
[[articles]]
id = 1
title = "Hello World"
published = 100
summary = "The first post"
content = "Welcome to the **studio** blog."
author = "Maya"

[[articles]]
id = 2
title = "Second Post"
published = 200
summary = "The second post"
author = "Jonas"
"#;

fn site_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("site").unwrap();
    cmd.env("SITE_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_articles(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("articles.toml");
    std::fs::write(&path, ARTICLES_TOML).unwrap();
    path
}

#[test]
fn view_defaults_to_grid() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .arg("view")
        .assert()
        .success()
        .stdout("grid\n");
}

#[test]
fn view_set_persists_across_runs() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .args(["view", "list"])
        .assert()
        .success()
        .stdout("list\n");

    site_cmd(&dir).arg("view").assert().success().stdout("list\n");
    assert!(dir.path().join("site.db").exists());
}

#[test]
fn view_toggle_flips() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .args(["view", "toggle"])
        .assert()
        .success()
        .stdout("list\n");
    site_cmd(&dir)
        .args(["view", "toggle"])
        .assert()
        .success()
        .stdout("grid\n");
}

#[test]
fn view_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .args(["view", "GRID"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown view mode"));
}

#[test]
fn list_orders_most_recent_first() {
    let dir = TempDir::new().unwrap();
    let articles = write_articles(&dir);

    let output = site_cmd(&dir)
        .args(["list", "--view", "list", "--articles"])
        .arg(&articles)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let second = stdout.find("Second Post").expect("second post listed");
    let first = stdout.find("Hello World").expect("first post listed");
    assert!(second < first, "most recent should come first:\n{stdout}");
    assert!(stdout.contains("The second post"));
}

#[test]
fn list_uses_saved_preference() {
    let dir = TempDir::new().unwrap();
    let articles = write_articles(&dir);

    // grid hides summaries
    site_cmd(&dir)
        .args(["list", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stdout(predicate::str::contains("The first post").not());

    site_cmd(&dir).args(["view", "list"]).assert().success();

    site_cmd(&dir)
        .args(["list", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stdout(predicate::str::contains("The first post"));
}

#[test]
fn show_known_slug() {
    let dir = TempDir::new().unwrap();
    let articles = write_articles(&dir);
    site_cmd(&dir)
        .args(["show", "hello-world", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Hello World\n"))
        .stdout(predicate::str::contains("Welcome to the **studio** blog."))
        .stdout(predicate::str::contains("Second Post (/articles/second-post)"));
}

#[test]
fn show_unknown_slug_falls_back_to_list() {
    let dir = TempDir::new().unwrap();
    let articles = write_articles(&dir);
    site_cmd(&dir)
        .args(["show", "nonexistent-post", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stderr(predicate::str::contains("showing all articles"))
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("Second Post"));
}

#[test]
fn find_id_handles_bad_input() {
    let dir = TempDir::new().unwrap();
    let articles = write_articles(&dir);

    site_cmd(&dir)
        .args(["find-id", "2", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Second Post\n"));

    for bad in ["abc", "-1", "999999"] {
        site_cmd(&dir)
            .args(["find-id", bad, "--articles"])
            .arg(&articles)
            .assert()
            .success()
            .stderr(predicate::str::contains("no article with id"));
    }
}

#[test]
fn route_resolution() {
    let dir = TempDir::new().unwrap();
    let articles = write_articles(&dir);

    site_cmd(&dir)
        .args(["route", "/articles/second-post", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stdout("detail second-post (#2)\n");

    site_cmd(&dir)
        .args(["route", "/articles/nonexistent-post", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stdout("list (grid)\n");

    site_cmd(&dir)
        .args(["route", "/articles", "--articles"])
        .arg(&articles)
        .assert()
        .success()
        .stdout("list (grid)\n");
}

#[test]
fn goto_from_other_route_navigates_home_first() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .args(["goto", "testimonials", "--from", "/contact"])
        .assert()
        .success()
        .stdout("navigate /\nscroll #testimonials\n");
}

#[test]
fn goto_on_home_scrolls_immediately() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .args(["goto", "testimonials", "--from", "/"])
        .assert()
        .success()
        .stdout("scroll #testimonials\n");
}

#[test]
fn goto_missing_section_is_noop() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .args(["goto", "pricing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn export_writes_sorted_catalog() {
    let dir = TempDir::new().unwrap();
    let articles = write_articles(&dir);
    let out = dir.path().join("catalog.json");

    site_cmd(&dir)
        .args(["export", "--articles"])
        .arg(&articles)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported 2 articles"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["articles"][0]["slug"], "second-post");
    assert_eq!(json["articles"][1]["slug"], "hello-world");
}

#[test]
fn config_file_supplies_articles() {
    let dir = TempDir::new().unwrap();
    write_articles(&dir);
    std::fs::write(dir.path().join("site.toml"), "articles = \"articles.toml\"\n").unwrap();

    site_cmd(&dir)
        .args(["route", "/articles/hello-world"])
        .assert()
        .success()
        .stdout("detail hello-world (#1)\n");
}

#[test]
fn bundled_content_without_articles_file() {
    let dir = TempDir::new().unwrap();
    site_cmd(&dir)
        .args(["list", "--view", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Designing Websites That Convert"));
}

#[test]
fn invalid_articles_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("articles.toml");
    std::fs::write(&path, "[[articles]]\nid = 0\ntitle = \"Zero\"\npublished = 1\n").unwrap();

    site_cmd(&dir)
        .args(["list", "--articles"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid article content"));
}

#[test]
fn unreachable_title_is_warned() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("articles.toml");
    std::fs::write(&path, "[[articles]]\nid = 1\ntitle = \"!!!\"\npublished = 1\n").unwrap();

    site_cmd(&dir)
        .args(["list", "--articles"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("no URL reaches it"));
}
