// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn publish_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_publish"));
    cmd.current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("RUST_LOG", "warn");
    cmd
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn today_prefix() -> String {
    chrono::Local::now().format("%Y-%m-%d-").to_string()
}

#[test]
fn test_publish_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_publish"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("publish"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--stop-on-failure"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_publish"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Usage"));
}

#[test]
fn test_missing_draft_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("_drafts")).unwrap();
    fs::create_dir_all(temp_dir.path().join("_posts")).unwrap();

    let output = publish_cmd(temp_dir.path())
        .arg("_drafts/missing.md")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("ERROR"));
    // Commit message is only printed once the rename succeeded
    assert!(!stdout_of(&output).contains("Publishing new post"));
}

#[test]
fn test_dry_run_leaves_files_in_place() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("_drafts")).unwrap();
    fs::create_dir_all(temp_dir.path().join("_posts")).unwrap();
    fs::write(temp_dir.path().join("_drafts/post.md"), "draft").unwrap();

    let output = publish_cmd(temp_dir.path())
        .args(["--dry-run", "_drafts/post.md"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Dry run"));
    assert!(stdout.contains(&format!("{}post.md", today_prefix())));
    assert!(temp_dir.path().join("_drafts/post.md").exists());
}

#[cfg(test)]
mod git_operations_tests {
    use super::*;
    use git2::Repository;

    // Helper function to setup a temporary git repo with a committed README
    fn setup_test_repo(path: &Path) -> Repository {
        let repo = Repository::init(path).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Could not set commit.gpgsign");
            config
                .set_bool("pull.rebase", false)
                .expect("Could not set pull.rebase");
        }

        fs::write(path.join("README.md"), "blog\n").expect("Could not write README");

        {
            let mut index = repo.index().expect("Could not get index");
            index
                .add_path(Path::new("README.md"))
                .expect("Could not add file to index");
            index.write().expect("Could not write index");

            let tree_id = index.write_tree().expect("Could not write tree");
            let tree = repo.find_tree(tree_id).expect("Could not find tree");
            let sig = repo.signature().expect("Could not get sig");
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .expect("Could not create commit");
        }

        fs::create_dir_all(path.join("blog/_drafts")).unwrap();
        fs::create_dir_all(path.join("blog/_posts")).unwrap();
        fs::write(path.join("blog/_drafts/hello.md"), "# Hello\n").unwrap();

        repo
    }

    fn head_message(repo: &Repository) -> String {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        head.message().unwrap_or_default().trim().to_string()
    }

    fn attach_remote(work: &Path, remote_dir: &Path) -> String {
        Repository::init_bare(remote_dir).expect("Could not init bare remote");
        let repo = Repository::open(work).unwrap();
        repo.remote("origin", remote_dir.to_str().unwrap())
            .expect("Could not add remote");
        let branch = repo.head().unwrap().shorthand().unwrap().to_string();

        let status = Command::new("git")
            .args(["push", "-q", "-u", "origin", branch.as_str()])
            .current_dir(work)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .status()
            .expect("Could not run git push");
        assert!(status.success());
        branch
    }

    #[test]
    fn test_publish_commits_and_pushes() {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }

        let temp_dir = TempDir::new().unwrap();
        let work = temp_dir.path().join("work");
        let remote = temp_dir.path().join("remote.git");
        fs::create_dir_all(&work).unwrap();
        let repo = setup_test_repo(&work);
        let branch = attach_remote(&work, &remote);

        let output = publish_cmd(&work)
            .arg("blog/_drafts/hello.md")
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));

        let post = format!("{}hello.md", today_prefix());
        let message = format!("Publishing new post {}", post);
        assert!(stdout_of(&output).contains(&message));
        assert!(work.join("blog/_posts").join(&post).exists());
        assert!(!work.join("blog/_drafts/hello.md").exists());

        assert_eq!(head_message(&repo), message);

        let local_head = repo.head().unwrap().target().unwrap();
        let bare = Repository::open_bare(&remote).unwrap();
        let remote_head = bare
            .find_reference(&format!("refs/heads/{}", branch))
            .unwrap()
            .target()
            .unwrap();
        assert_eq!(local_head, remote_head);
    }

    #[test]
    fn test_stop_on_failure_exits_non_zero_at_pull() {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }

        // No remote configured: stage and commit succeed, pull fails
        let temp_dir = TempDir::new().unwrap();
        let repo = setup_test_repo(temp_dir.path());

        let output = publish_cmd(temp_dir.path())
            .args(["--stop-on-failure", "blog/_drafts/hello.md"])
            .output()
            .expect("Failed to execute command");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr_of(&output).contains("pull failed"));
        assert_eq!(
            head_message(&repo),
            format!("Publishing new post {}hello.md", today_prefix())
        );
    }

    #[test]
    fn test_failed_pull_and_push_still_exit_zero() {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }

        let temp_dir = TempDir::new().unwrap();
        setup_test_repo(temp_dir.path());

        let output = publish_cmd(temp_dir.path())
            .arg("blog/_drafts/hello.md")
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        let stderr = stderr_of(&output);
        assert!(stderr.contains("git pull"));
        assert!(stderr.contains("git push"));
    }
}
