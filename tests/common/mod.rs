#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{SystemTime, UNIX_EPOCH};

/// Outcome of one `lcdmenu` run plus the transcript written for it.
pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

impl CmdResult {
    /// Assertion message pointing at the transcript.
    pub fn context(&self) -> String {
        format!("status {}, transcript {}", self.status, self.log_path.display())
    }
}

fn lcdmenu_bin() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_lcdmenu") {
        return PathBuf::from(path);
    }
    let exe_name = if cfg!(windows) { "lcdmenu.exe" } else { "lcdmenu" };
    std::env::current_exe()
        .ok()
        .and_then(|test_exe| Some(test_exe.parent()?.parent()?.join(exe_name)))
        .filter(|path| path.exists())
        .unwrap_or_else(|| panic!("no {exe_name} next to the test binary"))
}

fn transcript_path(case_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("lcdmenu-test-logs");
    fs::create_dir_all(&dir).expect("create transcript dir");
    let slug: String = case_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    dir.join(format!("{slug}-{stamp}.log"))
}

/// Run the simulator with `args` from `cwd`.
///
/// `LCDMENU_*` overrides and `RUST_LOG` from the host are removed so only the
/// files in `cwd` shape the run.
pub fn run_cli_case_in(case_name: &str, cwd: &Path, args: &[&str]) -> CmdResult {
    let bin = lcdmenu_bin();
    let mut command = Command::new(&bin);
    command.args(args).current_dir(cwd).env_remove("RUST_LOG");
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("LCDMENU_") {
            command.env_remove(key);
        }
    }
    let output = command.output().expect("spawn lcdmenu");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    let mut transcript = String::new();
    let _ = writeln!(transcript, "case: {case_name}");
    let _ = writeln!(transcript, "run:  {} {}", bin.display(), args.join(" "));
    let _ = writeln!(transcript, "cwd:  {}", cwd.display());
    let _ = writeln!(transcript, "exit: {}", output.status);
    let _ = writeln!(transcript, "\n[stdout]\n{stdout}\n[stderr]\n{stderr}");
    let log_path = transcript_path(case_name);
    fs::write(&log_path, transcript).expect("write transcript");

    CmdResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}

pub fn run_cli_case(case_name: &str, args: &[&str]) -> CmdResult {
    run_cli_case_in(case_name, &std::env::temp_dir(), args)
}

/// Two-table layout: a header menu leading to a settings table with a range,
/// a toggle, a disabled command and a back item.
pub const DEMO_LAYOUT: &str = r#"
root = "main"

[[tables]]
name = "main"
items = [
    { type = "header", text = "Main" },
    { type = "menu", text = "Settings", table = "settings" },
    { type = "command", text = "Save" },
    { type = "back", text = "Exit" },
]

[[tables]]
name = "settings"
items = [
    { type = "range", text = "Volume", min = 0, max = 100, value = 50, step = 10 },
    { type = "toggle", text = "Wifi" },
    { type = "command", text = "Wipe", disabled_text = "Locked" },
    { type = "back", text = "Back" },
]
"#;

/// Write `contents` into `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}
