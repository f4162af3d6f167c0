mod common;

use common::*;

#[test]
fn init_creates_layout() {
    let dir = tempfile::tempdir().unwrap();
    let result = minigit_ok(dir.path(), &["init"]);
    assert!(result.stdout.starts_with("Initialized empty minigit repository"));

    let git_dir = dir.path().join(".minigit");
    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs/heads").is_dir());
    assert_eq!(read_file(dir.path(), ".minigit/HEAD"), "ref: refs/heads/main\n");
}

#[test]
fn init_into_named_directory() {
    let dir = tempfile::tempdir().unwrap();
    minigit_ok(dir.path(), &["init", "-q", "project"]);
    assert!(dir.path().join("project/.minigit/HEAD").is_file());
}

#[test]
fn hash_object_without_repository() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "hello.txt", "hello\n");

    let result = minigit_ok(dir.path(), &["hash-object", "hello.txt"]);
    assert_eq!(result.stdout, "f572d396fae9206628714fb2ce00f72e94f2258f\n");
}

#[test]
fn hash_object_write_then_cat_file() {
    let dir = tempfile::tempdir().unwrap();
    setup_repo(dir.path());
    write_file(dir.path(), "hello.txt", "hello\n");

    let result = minigit_ok(dir.path(), &["hash-object", "-w", "hello.txt"]);
    let oid = result.stdout.trim().to_string();
    assert!(dir
        .path()
        .join(format!(".minigit/objects/{}/{}", &oid[..2], &oid[2..]))
        .is_file());

    let result = minigit_ok(dir.path(), &["cat-file", &oid]);
    assert_eq!(result.stdout, "hello\n");
}

#[test]
fn commit_writes_tree_and_advances_branch() {
    let dir = tempfile::tempdir().unwrap();
    setup_repo(dir.path());
    write_file(dir.path(), "a.txt", "alpha\n");
    write_file(dir.path(), "src/lib.rs", "pub fn x() {}\n");

    minigit_ok(dir.path(), &["add", "a.txt", "src"]);
    let index = read_file(dir.path(), ".minigit/index");
    assert_eq!(index.lines().count(), 2);
    assert!(index.lines().any(|l| l.starts_with("src/lib.rs ")));

    let result = minigit_ok(dir.path(), &["commit", "-m", "first"]);
    assert!(result.stdout.starts_with("[main "));

    let head = head_hash(dir.path());
    let commit = minigit_ok(dir.path(), &["cat-file", &head]).stdout;
    assert!(commit.starts_with("tree "));
    assert!(!commit.contains("\nparent "));
    assert!(commit.contains("author Test Author <test@example.com> "));
    assert!(commit.ends_with("\nfirst\n"));

    let tree = commit.lines().next().unwrap().trim_start_matches("tree ");
    let listing = minigit_ok(dir.path(), &["cat-file", tree]).stdout;
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("100644 blob ") && lines[0].ends_with(" a.txt"));
    assert!(lines[1].starts_with("40000 tree ") && lines[1].ends_with(" src"));
}

#[test]
fn second_commit_records_parent() {
    let dir = tempfile::tempdir().unwrap();
    setup_repo(dir.path());
    write_file(dir.path(), "a.txt", "one\n");
    commit_all(dir.path(), "one");
    let first = head_hash(dir.path());

    write_file(dir.path(), "a.txt", "two\n");
    commit_all(dir.path(), "two");

    let commit = minigit_ok(dir.path(), &["cat-file", &head_hash(dir.path())]).stdout;
    assert!(commit.contains(&format!("\nparent {first}\n")));
}

#[test]
fn log_follows_first_parents() {
    let dir = tempfile::tempdir().unwrap();
    setup_repo(dir.path());
    write_file(dir.path(), "a.txt", "one\n");
    commit_all(dir.path(), "one");
    write_file(dir.path(), "a.txt", "two\n");
    commit_all(dir.path(), "two");

    let result = minigit_ok(dir.path(), &["log", "--oneline"]);
    let summaries: Vec<&str> = result
        .stdout
        .lines()
        .map(|l| l.split_once(' ').unwrap().1)
        .collect();
    assert_eq!(summaries, ["two", "one"]);

    let result = minigit_ok(dir.path(), &["log", "-n", "1"]);
    assert!(result.stdout.starts_with(&format!("commit {}\n", head_hash(dir.path()))));
    assert!(result.stdout.contains("Author: Test Author <test@example.com>\n"));
    assert!(result.stdout.contains("\n    two\n"));
    assert!(!result.stdout.contains("    one"));
}

#[test]
fn log_on_unborn_branch_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    setup_repo(dir.path());
    let result = minigit_ok(dir.path(), &["log"]);
    assert!(result.stdout.is_empty());
}

#[test]
fn identity_falls_back_to_config() {
    let dir = tempfile::tempdir().unwrap();
    setup_repo(dir.path());
    write_file(
        dir.path(),
        ".minigit/config",
        "[user]\n\tname = Config Person\n\temail = config@example.com\n",
    );
    write_file(dir.path(), "a.txt", "a\n");
    minigit_ok(dir.path(), &["add", "a.txt"]);

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_minigit"))
        .args(["commit", "-m", "configured"])
        .current_dir(dir.path())
        .env_remove("MINIGIT_AUTHOR_NAME")
        .env_remove("MINIGIT_AUTHOR_EMAIL")
        .env_remove("MINIGIT_DIR")
        .output()
        .unwrap();
    assert!(output.status.success());

    let commit = minigit_ok(dir.path(), &["cat-file", &head_hash(dir.path())]).stdout;
    assert!(commit.contains("author Config Person <config@example.com> "));
}

#[test]
fn commands_work_from_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    setup_repo(dir.path());
    write_file(dir.path(), "nested/deep/file.txt", "x\n");

    let nested = dir.path().join("nested");
    minigit_ok(&nested, &["add", "deep/file.txt"]);
    minigit_ok(&nested, &["commit", "-m", "from below"]);

    let index = read_file(dir.path(), ".minigit/index");
    assert!(index.starts_with("nested/deep/file.txt "));
}
