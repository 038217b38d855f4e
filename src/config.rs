//! Configuration file structures for the foosbot.
//!
//! The configuration is a YAML file split into four sections: the webhook
//! server, the storage files, the bot behavior and the rating parameters.
//! Every value can be overridden by an environment variable prefixed with
//! `FOOSBOT_`, nested keys being separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Webhook server
//! server:
//!   address: "0.0.0.0"
//!   port: 8080
//!
//! # Storage files, relative to the data directory
//! storage:
//!   installations: "installations.json"
//!   matches: "matches.json"
//!
//! # Optional command prefix stripped from incoming messages, and the
//! # leaderboard format: "html" (default) or "text"
//! bot:
//!   prefix: "/foosball"
//!   leaderboard: "html"
//!
//! # Optional TrueSkill parameters
//! rating:
//!   draw_probability: 0.1
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export FOOSBOT_SERVER__PORT=9000
//! export FOOSBOT_BOT__PREFIX="/table"
//! ```

use std::net::IpAddr;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "FOOSBOT_";

/// Root configuration structure for the foosbot.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Webhook server configuration
    pub server: Server,
    /// Storage configuration
    #[serde(default)]
    pub storage: Storage,
    /// Bot behavior configuration
    #[serde(default)]
    pub bot: Bot,
    /// Rating engine configuration
    #[serde(default)]
    pub rating: Rating,
}

impl Config {
    /// Loads the configuration from a YAML file, then applies the `FOOSBOT_`
    /// environment variables on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a required
    /// value is missing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use foosbot::config::Config;
    /// let config = Config::load("config.yaml")?;
    /// println!("listening on port {}", config.server.port);
    /// # Ok::<(), figment::Error>(())
    /// ```
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

/// Webhook server configuration.
///
/// ```yaml
/// server:
///   address: "0.0.0.0"
///   port: 8080
/// ```
#[derive(Debug, Deserialize)]
pub struct Server {
    /// Address to bind
    pub address: IpAddr,
    /// Port to bind
    pub port: u16,
}

/// Storage files configuration.
///
/// Both paths are resolved against the data directory given on the command
/// line.
#[derive(Debug, Deserialize)]
pub struct Storage {
    /// File holding the installations and their rooms
    pub installations: String,
    /// File holding the match history of every room
    pub matches: String,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            installations: "installations.json".to_owned(),
            matches: "matches.json".to_owned(),
        }
    }
}

/// Bot behavior configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Bot {
    /// Command prefix the chat platform leaves in front of the messages it
    /// forwards, e.g. `/foosball`. Stripped before parsing when present.
    pub prefix: Option<String>,
    /// Format of the leaderboard reply
    #[serde(default)]
    pub leaderboard: LeaderboardFormat,
}

/// Format of the leaderboard reply.
///
/// Every other reply is plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardFormat {
    /// HTML ordered list, names escaped
    #[default]
    Html,
    /// Numbered lines, for platforms that do not render HTML
    Text,
}

/// TrueSkill parameters used to rate the members.
///
/// The defaults are the usual TrueSkill ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Rating {
    /// Probability of a draw between two equally skilled teams
    pub draw_probability: f64,
    /// Skill difference giving an 80% chance of winning
    pub beta: f64,
    /// Uncertainty added before every match so that ratings keep moving
    pub dynamics: f64,
}

impl Default for Rating {
    fn default() -> Self {
        Rating {
            draw_probability: 0.1,
            beta: 25.0 / 6.0,
            dynamics: 25.0 / 300.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_load_full_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                concat!(
                    "server:\n",
                    "  address: \"127.0.0.1\"\n",
                    "  port: 8080\n",
                    "storage:\n",
                    "  installations: \"inst.json\"\n",
                    "  matches: \"history.json\"\n",
                    "bot:\n",
                    "  prefix: \"/foosball\"\n",
                    "  leaderboard: \"text\"\n",
                    "rating:\n",
                    "  draw_probability: 0.2\n",
                ),
            )?;

            let config = Config::load("config.yaml")?;
            assert_eq!(config.server.address.to_string(), "127.0.0.1");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.storage.installations, "inst.json");
            assert_eq!(config.storage.matches, "history.json");
            assert_eq!(config.bot.prefix.as_deref(), Some("/foosball"));
            assert_eq!(config.bot.leaderboard, LeaderboardFormat::Text);
            assert_eq!(config.rating.draw_probability, 0.2);
            assert_eq!(config.rating.beta, 25.0 / 6.0);

            Ok(())
        });
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "server:\n  address: \"0.0.0.0\"\n  port: 80\n",
            )?;

            let config = Config::load("config.yaml")?;
            assert_eq!(config.storage.installations, "installations.json");
            assert_eq!(config.storage.matches, "matches.json");
            assert!(config.bot.prefix.is_none());
            assert_eq!(config.bot.leaderboard, LeaderboardFormat::Html);
            assert_eq!(config.rating.draw_probability, 0.1);
            assert_eq!(config.rating.dynamics, 25.0 / 300.0);

            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "server:\n  address: \"0.0.0.0\"\n  port: 8080\n",
            )?;
            jail.set_env("FOOSBOT_SERVER__PORT", 9000);
            jail.set_env("FOOSBOT_BOT__PREFIX", "/table");
            jail.set_env("FOOSBOT_BOT__LEADERBOARD", "text");

            let config = Config::load("config.yaml")?;
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.bot.prefix.as_deref(), Some("/table"));
            assert_eq!(config.bot.leaderboard, LeaderboardFormat::Text);

            Ok(())
        });
    }

    #[test]
    fn test_missing_server_section_fails() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "bot:\n  prefix: \"/foosball\"\n")?;

            assert!(Config::load("config.yaml").is_err());

            Ok(())
        });
    }
}
