use eyre::WrapErr;

const DEFAULT_CONFIG_PATH: &str = "config.json";
const DEFAULT_KEEP_ALIVE_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub welcome_config_path: String,
    pub keep_alive_port: u16,
}

impl BotConfig {
    pub fn from_env() -> eyre::Result<Self> {
        let token = std::env::var("DISCORD_TOKEN").wrap_err("missing env var: DISCORD_TOKEN")?;
        let welcome_config_path = std::env::var("WELCOME_CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let keep_alive_port = parse_port(std::env::var("KEEP_ALIVE_PORT").ok())?;

        Ok(Self {
            token,
            welcome_config_path,
            keep_alive_port,
        })
    }
}

fn parse_port(value: Option<String>) -> eyre::Result<u16> {
    match value {
        Some(v) => v
            .trim()
            .parse::<u16>()
            .wrap_err("KEEP_ALIVE_PORT must be a valid u16"),
        None => Ok(DEFAULT_KEEP_ALIVE_PORT),
    }
}
