use clap::{Parser, Subcommand};

use crate::config::{AppConfig, IdStrategy, StoreBackend};

#[derive(Parser, Debug)]
#[command(name = "college-api")]
#[command(about = "Student records API with token login")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Interface to bind (overrides API_HOST)")]
    pub host: Option<String>,

    #[arg(long, global = true, help = "Port to listen on (overrides API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, global = true, help = "Student store: postgres or memory (overrides DATABASE_STORE)")]
    pub store: Option<StoreBackend>,

    #[arg(long, global = true, help = "Id assignment: store-generated or max-plus-one")]
    pub id_strategy: Option<IdStrategy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }

    /// Flags win over whatever the environment configured.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.api.host = host.clone();
        }
        if let Some(port) = self.port {
            config.api.port = port;
        }
        if let Some(store) = self.store {
            config.database.store = store;
        }
        if let Some(id_strategy) = self.id_strategy {
            config.database.id_strategy = id_strategy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::parse_from(["college-api"]);
        assert_eq!(cli.command(), Commands::Serve);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "college-api",
            "--port",
            "8081",
            "--store",
            "memory",
            "--id-strategy",
            "max-plus-one",
            "serve",
        ]);
        let mut config = AppConfig::development();
        cli.apply(&mut config);

        assert_eq!(config.api.port, 8081);
        assert_eq!(config.database.store, StoreBackend::Memory);
        assert_eq!(config.database.id_strategy, IdStrategy::MaxPlusOne);
    }

    #[test]
    fn parses_migrate() {
        let cli = Cli::parse_from(["college-api", "migrate"]);
        assert_eq!(cli.command(), Commands::Migrate);
    }
}
