//! User-facing text printed after each successful step.
//!
//! Each message ends by telling the user what to run next.

use std::path::Path;

use simplerity_api::Endpoint;

/// Login succeeded: list the agents the user can pick from.
///
/// ```text
/// Authorized. Now you should select agent to use:
/// 42: Agent42
/// Use `simplerity select --agent AGENT_ID` to select agent
/// ```
pub fn render_login(endpoints: &[Endpoint]) -> String {
    let mut out = String::from("Authorized. Now you should select agent to use:\n");
    for endpoint in endpoints {
        out.push_str(&format!("{endpoint}\n"));
    }
    out.push_str("Use `simplerity select --agent AGENT_ID` to select agent\n");
    out
}

pub fn render_select() -> String {
    "Agent selected. Now you can download configuration using `simplerity load`\n".to_string()
}

pub fn render_load(path: &Path) -> String {
    format!(
        "Config downloaded. Now you can launch packetbeat using `packetbeat -c {} run`\n",
        path.display()
    )
}
