//! Integration tests for Denver

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    const MANIFEST: &str = "[package]\nname = \"todo\"\nversion = \"0.1.0\"\n";

    fn denver(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("denver");
        cmd.env_remove("DENVER_PUBLISH_TOKEN")
            .arg("--config")
            .arg(config_dir.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let config = TempDir::new().unwrap();
        denver(&config)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Dockerfile builder"));
    }

    #[test]
    fn version_displays() {
        let config = TempDir::new().unwrap();
        denver(&config)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("denver"));
    }

    #[test]
    fn config_path() {
        let config = TempDir::new().unwrap();
        denver(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let config = TempDir::new().unwrap();
        denver(&config)
            .args(["--no-local", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[tools]"));
    }

    #[test]
    fn config_init_creates_file() {
        let config = TempDir::new().unwrap();
        denver(&config)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));
        assert!(config.path().join("config.toml").exists());
    }

    #[test]
    fn check_without_manifest_fails_with_hint() {
        let config = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        denver(&config)
            .arg("check")
            .current_dir(project.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cargo.toml not found"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn test_uses_local_tool_override() {
        let config = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("Cargo.toml"), MANIFEST).unwrap();
        std::fs::write(
            project.path().join("denver.toml"),
            "[tools]\ntest = \"echo ok > ran; true\"\n",
        )
        .unwrap();

        denver(&config)
            .arg("test")
            .arg("--project")
            .arg(project.path())
            .assert()
            .success();
        assert!(project.path().join("ran").exists());
    }

    #[test]
    fn failing_tool_exits_nonzero() {
        let config = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("Cargo.toml"), MANIFEST).unwrap();
        std::fs::write(
            project.path().join("denver.toml"),
            "[tools]\ncheck = \"exit 4 #\"\n",
        )
        .unwrap();

        denver(&config)
            .arg("check")
            .current_dir(project.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("exit code: 4"));
    }

    #[test]
    fn publish_with_token_redacts_it() {
        let config = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("Cargo.toml"), MANIFEST).unwrap();
        std::fs::write(
            project.path().join("denver.toml"),
            "[tools]\nbuild = \"true\"\npublish = \"false\"\n",
        )
        .unwrap();

        denver(&config)
            .args(["publish", "--token", "s3cret"])
            .current_dir(project.path())
            .assert()
            .failure()
            .stdout(predicate::str::contains("--token ***"))
            .stderr(predicate::str::contains("s3cret").not());
    }
}

mod dockerfile_tests {
    use denver::dockerfile::{Dockerfile, Fetch};
    use denver::{DenverError, DenverResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Debug, Default, Clone)]
    struct CountingFetcher {
        calls: Arc<AtomicUsize>,
    }

    impl Fetch for CountingFetcher {
        fn get(&self, _url: &str) -> DenverResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(b"#!/bin/sh\necho setup\n".to_vec())
        }
    }

    #[test]
    fn full_image_build() {
        let dir = TempDir::new().unwrap();
        let fetcher = CountingFetcher::default();
        let mut d = Dockerfile::with_fetcher(dir.path(), fetcher.clone());

        d.from_ubuntu("20.04")
            .arg_default()
            .expose([7101])
            .workdir_default()
            .copy_default()
            .run([
                Dockerfile::run_update(),
                Dockerfile::run_install(["curl", "ca-certificates"]),
            ])
            .unwrap();
        d.run([
            d.run_download_bash("https://example.com/tools/run.sh", false)
                .unwrap(),
            Dockerfile::run_update(),
        ])
        .unwrap();
        d.entrypoint(&[vec!["run-server --port 7101"]])
            .unwrap()
            .entrypoint_sleep()
            .unwrap();

        // Second download of the same URL is served from the cache
        let again = d
            .run_download("https://example.com/tools/run.sh", false)
            .unwrap();
        assert_eq!(again, "denver/2ba55e040b23ea878dd7ace9ef4fc44b/run.sh");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

        let path = d.save_default().unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("FROM ubuntu:20.04\n\n"));
        assert!(text.contains(
            "RUN bash denver/2ba55e040b23ea878dd7ace9ef4fc44b/run.sh && \\\n    apt-get update"
        ));
        assert!(text.ends_with("ENTRYPOINT bash denver/startup.sh\n"));

        let script = std::fs::read_to_string(dir.path().join("copy/startup.sh")).unwrap();
        assert!(script.ends_with("&\nsleep infinity\n"));
        assert!(dir
            .path()
            .join("copy/2ba55e040b23ea878dd7ace9ef4fc44b/run.sh")
            .is_file());
    }

    #[test]
    fn second_entrypoint_is_state_error() {
        let dir = TempDir::new().unwrap();
        let mut d = Dockerfile::with_fetcher(dir.path(), CountingFetcher::default());

        d.entrypoint(&[["echo a"]]).unwrap();
        let err = d.entrypoint(&[["echo b"]]).unwrap_err();

        assert!(matches!(err, DenverError::EntrypointFinalized));
        assert_eq!(d.render().matches("ENTRYPOINT").count(), 1);
    }
}
