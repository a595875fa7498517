//! Temporary git repository with a local bare remote

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A working repository on `main` whose `origin` is a bare repo next to it
pub struct TempGitRepo {
    _dir: TempDir,
    work: PathBuf,
    remote: PathBuf,
}

impl TempGitRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let work = dir.path().join("work");
        let remote = dir.path().join("remote.git");
        fs::create_dir_all(&work).expect("create work dir");

        git(dir.path(), &["init", "--bare", "-b", "main", "remote.git"]);
        git(&work, &["init", "-b", "main"]);
        git(&work, &["config", "commit.gpgsign", "false"]);

        let repo = Self {
            _dir: dir,
            work,
            remote,
        };
        repo.write_file("test-requirements.txt", "attrs==23.1.0\n");
        git(&repo.work, &["add", "."]);
        git(&repo.work, &["commit", "-m", "Initial commit"]);
        git(
            &repo.work,
            &["remote", "add", "origin", repo.remote.to_str().expect("utf-8 path")],
        );
        git(&repo.work, &["push", "origin", "main"]);
        repo
    }

    pub fn path(&self) -> &Path {
        &self.work
    }

    pub fn write_file(&self, name: &str, content: &str) {
        fs::write(self.work.join(name), content).expect("write file");
    }

    /// Full `HEAD` hash of the working repository
    pub fn head(&self) -> String {
        git(&self.work, &["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Branch names on the bare remote
    pub fn remote_branches(&self) -> Vec<String> {
        git(&self.remote, &["for-each-ref", "--format=%(refname:short)", "refs/heads"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// `author name|subject` of the tip of a remote branch
    pub fn remote_tip(&self, branch: &str) -> String {
        git(&self.remote, &["log", "-1", "--format=%an|%s", branch])
            .trim()
            .to_string()
    }

    /// Value of `key` in the working repository's own `.git/config`
    pub fn local_config(&self, key: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--local", "--get", key])
            .current_dir(&self.work)
            .output()
            .expect("run git");
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Currently checked-out branch of the working repository
    pub fn current_branch(&self) -> String {
        git(&self.work, &["rev-parse", "--abbrev-ref", "HEAD"])
            .trim()
            .to_string()
    }
}

/// Run git with a throwaway identity that never lands in any config file
fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
