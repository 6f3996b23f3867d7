pub mod config {
    use serde::Deserialize;

    /// Prefix of the environment variables holding configuration, e.g.
    /// `TASKS_PORT`.
    pub const ENV_PREFIX: &str = "TASKS";

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Config {
        #[serde(default = "default_database_url")]
        pub database_url: String,
        #[serde(default = "default_host")]
        pub host: String,
        #[serde(default = "default_port")]
        pub port: u16,
    }

    /// Values given on the command line. They take precedence over the
    /// environment.
    #[derive(Debug, Default, Clone)]
    pub struct Overrides {
        pub port: Option<u16>,
        pub database_url: Option<String>,
    }

    impl Config {
        /// Loads configuration from `environment`, then applies `overrides`.
        pub fn load(
            environment: config::Environment,
            overrides: Overrides,
        ) -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(environment)
                .set_override_option("port", overrides.port.map(i64::from))?
                .set_override_option("database_url", overrides.database_url)?
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_database_url() -> String {
        "sqlite://tasks.db?mode=rwc".to_string()
    }

    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8000
    }

}
pub mod entities;
pub mod task;
pub mod web;
