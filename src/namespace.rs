//! Tool naming for dynamically registered TriggerCMD commands.
//!
//! A command `Open Browser!!` on computer `Office PC` becomes the tool
//! `run_office_pc_open_browser`.

use std::sync::LazyLock;

use regex::Regex;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]").expect("static regex is valid"));

static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("static regex is valid"));

/// Derive the tool name for a command owned by a computer.
///
/// Output is lowercase `[a-z0-9_]`, never contains `__`, and never starts or
/// ends with `_`. Distinct pairs may collapse to the same name.
pub fn tool_name_for(computer: &str, command: &str) -> String {
    let raw = format!("run_{}_{}", computer, command).to_lowercase();
    let replaced = INVALID_CHARS.replace_all(&raw, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}
