//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners sometimes allocate a TTY nobody is watching
    if is_ci_environment() {
        return false;
    }

    env::var("DEBIAN_FRONTEND").unwrap_or_default() != "noninteractive"
}

/// Check if the terminal supports ANSI escape codes
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }

    #[cfg(windows)]
    {
        true
    }

    #[cfg(not(windows))]
    {
        !term.is_empty()
    }
}

/// Decide whether output should be colored
///
/// `NO_COLOR` always wins, then the configured preference, then terminal support.
pub fn should_colorize(color_enabled: bool) -> bool {
    if env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    color_enabled && supports_ansi()
}

fn is_ci_environment() -> bool {
    const CI_VARS: [&str; 8] = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "BUILDKITE",
        "TEAMCITY_VERSION",
        "TF_BUILD",
    ];

    CI_VARS.iter().any(|var| env::var_os(var).is_some())
}
