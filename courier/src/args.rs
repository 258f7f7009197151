use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Courier chat proxy
#[derive(Debug, Parser)]
#[command(name = "courier", about = "Chat, upload and speech proxy for OpenAI-compatible providers")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "courier.toml", env = "COURIER_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "COURIER_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override only the listen port, keeping the host
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Log filter directive (e.g. "info" or "courier_chat=debug,info")
    #[arg(long, default_value = "info", env = "COURIER_LOG")]
    pub log_level: String,
}

impl Args {
    /// Resolve the address to bind, applying `--listen` and then `--port`
    pub fn listen_address(&self, configured: SocketAddr) -> SocketAddr {
        let mut address = self.listen.unwrap_or(configured);

        if let Some(port) = self.port {
            address.set_port(port);
        }

        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = temp_env::with_var_unset("PORT", || Args::try_parse_from(["courier"]).unwrap());

        assert_eq!(args.config, PathBuf::from("courier.toml"));
        assert!(args.listen.is_none());
        assert!(args.port.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "courier",
            "--config",
            "/etc/courier.toml",
            "--listen",
            "127.0.0.1:8080",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("/etc/courier.toml"));
        assert_eq!(args.listen, Some("127.0.0.1:8080".parse().unwrap()));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn invalid_listen_address_is_rejected() {
        assert!(Args::try_parse_from(["courier", "--listen", "localhost"]).is_err());
    }

    #[test]
    fn configured_address_is_kept_without_overrides() {
        let args = temp_env::with_var_unset("PORT", || Args::try_parse_from(["courier"]).unwrap());
        let configured: SocketAddr = "0.0.0.0:3000".parse().unwrap();

        assert_eq!(args.listen_address(configured), configured);
    }

    #[test]
    fn port_replaces_only_the_port() {
        let args = Args::try_parse_from(["courier", "--port", "8081"]).unwrap();

        assert_eq!(
            args.listen_address("127.0.0.1:3000".parse().unwrap()),
            "127.0.0.1:8081".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn port_applies_on_top_of_listen_override() {
        let args = Args::try_parse_from(["courier", "--listen", "10.0.0.1:9000", "--port", "7000"]).unwrap();

        assert_eq!(
            args.listen_address("0.0.0.0:3000".parse().unwrap()),
            "10.0.0.1:7000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn port_is_read_from_environment() {
        temp_env::with_vars([("PORT", Some("5050")), ("COURIER_LISTEN", None::<&str>)], || {
            let args = Args::try_parse_from(["courier"]).unwrap();

            assert_eq!(args.port, Some(5050));
            assert_eq!(
                args.listen_address("0.0.0.0:3000".parse().unwrap()),
                "0.0.0.0:5050".parse::<SocketAddr>().unwrap()
            );
        });
    }
}
