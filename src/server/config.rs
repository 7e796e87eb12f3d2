use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub listen_addr: String,
    pub jwt_secret: String,
    pub tick_period: Duration,
    pub probe_timeout: Duration,
    pub probe_concurrency: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let tick_period = Duration::from_secs(parse_env("CHECK_TICK_SECONDS", 5)?);
        let probe_timeout = Duration::from_secs(parse_env("PROBE_TIMEOUT_SECONDS", 10)?);
        let probe_concurrency = parse_env("PROBE_CONCURRENCY", 8)? as usize;

        Ok(ServerConfig {
            database_url,
            listen_addr,
            jwt_secret,
            tick_period,
            probe_timeout,
            probe_concurrency,
        })
    }
}

fn parse_env(name: &str, default: u64) -> Result<u64, String> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| format!("{name} must be a positive integer"))
            .and_then(|parsed| {
                if parsed == 0 {
                    Err(format!("{name} must be a positive integer"))
                } else {
                    Ok(parsed)
                }
            }),
    }
}
