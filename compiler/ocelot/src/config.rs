//! CLI settings, gathered from the environment and command-line flags.

/// Prompt shown when `OCELOT_PROMPT` and `--prompt=` are both absent.
pub const DEFAULT_PROMPT: &str = "ocelot> ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// REPL prompt.
    pub prompt: String,
    /// `tracing` filter directives; logging is off when `None`.
    pub log_filter: Option<String>,
    /// Hierarchical log output instead of flat lines.
    pub log_tree: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            log_filter: None,
            log_tree: false,
        }
    }
}

impl CliConfig {
    /// Settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from `lookup`, which maps a variable name to its value.
    ///
    /// `OCELOT_LOG` wins over `RUST_LOG`; blank filters count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let prompt = lookup("OCELOT_PROMPT").unwrap_or_else(|| DEFAULT_PROMPT.to_string());
        let log_filter = lookup("OCELOT_LOG")
            .filter(|filter| !filter.trim().is_empty())
            .or_else(|| lookup("RUST_LOG"))
            .filter(|filter| !filter.trim().is_empty());
        let log_tree = lookup("OCELOT_LOG_TREE").is_some_and(|value| is_enabled(&value));
        CliConfig {
            prompt,
            log_filter,
            log_tree,
        }
    }

    /// Apply one command-line option.
    ///
    /// Returns `false` when `arg` is not a settings flag, leaving it for the
    /// command parser.
    pub fn apply_flag(&mut self, arg: &str) -> bool {
        if let Some(prompt) = arg.strip_prefix("--prompt=") {
            self.prompt = prompt.to_string();
        } else if let Some(filter) = arg.strip_prefix("--log=") {
            self.log_filter = Some(filter.to_string()).filter(|f| !f.trim().is_empty());
        } else if arg == "--log-tree" {
            self.log_tree = true;
        } else {
            return false;
        }
        true
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(CliConfig::from_lookup(lookup(&[])), CliConfig::default());
    }

    #[test]
    fn ocelot_log_wins_over_rust_log() {
        let config = CliConfig::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("OCELOT_LOG", "ocelot_eval=debug"),
        ]));
        assert_eq!(config.log_filter.as_deref(), Some("ocelot_eval=debug"));

        let config = CliConfig::from_lookup(lookup(&[("RUST_LOG", "warn"), ("OCELOT_LOG", " ")]));
        assert_eq!(config.log_filter.as_deref(), Some("warn"));
    }

    #[test]
    fn tree_logging_switch() {
        for (value, expected) in [("1", true), ("TRUE", true), ("on", true), ("0", false), ("", false)] {
            let config = CliConfig::from_lookup(lookup(&[("OCELOT_LOG_TREE", value)]));
            assert_eq!(config.log_tree, expected, "{value:?}");
        }
    }

    #[test]
    fn flags_override_environment() {
        let mut config = CliConfig::from_lookup(lookup(&[("OCELOT_PROMPT", "env> ")]));
        assert_eq!(config.prompt, "env> ");
        assert!(config.apply_flag("--prompt=λ "));
        assert!(config.apply_flag("--log=trace"));
        assert!(config.apply_flag("--log-tree"));
        assert!(!config.apply_flag("run"));
        assert_eq!(config.prompt, "λ ");
        assert_eq!(config.log_filter.as_deref(), Some("trace"));
        assert!(config.log_tree);
    }
}
