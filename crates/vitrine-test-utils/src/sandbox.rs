//! Hermetic sandbox for running the `vitrine` binary in tests.
//!
//! - Everything lives under an `assert_fs::TempDir` and is cleaned up on drop
//! - `HOME` points into the sandbox so no user config leaks in
//! - `VITRINE_*` variables from the outer environment are not inherited
//! - `NO_COLOR=1` keeps output stable for snapshots
//!
//! ## Quick example
//! ```ignore
//! use vitrine_test_utils::fixtures;
//! use vitrine_test_utils::sandbox::Sandbox;
//!
//! let mut sb = Sandbox::new();
//! sb.write("content.json", fixtures::numbered_catalog(8));
//! let out = sb.run(env!("CARGO_BIN_EXE_vitrine"), ["list"]);
//! assert!(out.success());
//! ```

use assert_fs::TempDir;
use assert_fs::fixture::PathChild;
use duct::Expression;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Sandbox {
    root: TempDir,
    pub home: PathBuf,
    env: HashMap<String, String>,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured result of one command
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl Sandbox {
    /// Create a new sandbox; all state is under an auto-cleaned TempDir.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create sandbox TempDir");
        let home = root.child("home").to_path_buf();
        fs::create_dir_all(&home).expect("create home dir");
        Self {
            root,
            home,
            env: HashMap::new(),
        }
    }

    /// Absolute path to the sandbox root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Write/overwrite a file relative to the sandbox root.
    pub fn write<P: AsRef<Path>, S: AsRef<[u8]>>(&mut self, rel: P, contents: S) -> &mut Self {
        let p = self.root_path().join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(p, contents).expect("write file");
        self
    }

    /// Write the user config file (`~/.vitrine/config.toml`).
    pub fn write_config<S: AsRef<[u8]>>(&mut self, contents: S) -> &mut Self {
        let path = self.home.join(".vitrine").join("config.toml");
        fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
        fs::write(path, contents).expect("write config");
        self
    }

    /// Set an extra environment variable for commands run in this sandbox.
    pub fn env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Build a `duct::Expression` pre-wired with the sandbox env, rooted at
    /// the sandbox directory.
    pub fn cmd<S: AsRef<OsStr>, I: IntoIterator>(&self, program: S, args: I) -> Expression
    where
        I::Item: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect();
        let expr = duct::cmd(program.as_ref(), args).dir(self.root_path());
        self.inject_env(expr)
    }

    /// Run a binary inside the sandbox and capture its output. Pass
    /// `env!("CARGO_BIN_EXE_<name>")` for workspace binaries.
    /// Non-zero exit codes are returned, not treated as errors.
    pub fn run<S, I>(&self, program: S, args: I) -> RunOutput
    where
        S: AsRef<OsStr>,
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let output = self
            .cmd(program, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .expect("spawn command");
        RunOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn inject_env(&self, expr: Expression) -> Expression {
        let mut env_map: HashMap<String, String> = HashMap::new();
        if let Ok(path) = std::env::var("PATH") {
            env_map.insert("PATH".into(), path);
        }
        env_map.insert("HOME".into(), self.home.to_string_lossy().into_owned());
        env_map.insert(
            "XDG_CONFIG_HOME".into(),
            self.home.to_string_lossy().into_owned(),
        );
        env_map.insert("NO_COLOR".into(), "1".into());
        env_map.extend(self.env.clone());

        expr.full_env(&env_map)
    }
}
