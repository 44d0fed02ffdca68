use clap::{Args, Parser, Subcommand};

use crate::generator::{GeneratorConfig, DEFAULT_MAX_ATTEMPTS};
use crate::key_store::{StoreBackend, StoreSettings};

#[derive(Parser, Debug)]
#[command(name = "serial-keygen")]
#[command(about = "Generate Luhn-valid serial keys")]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate keys once and print them
    Generate(GenerateArgs),
    /// Serve the generator over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Numeric prefix, at most 15 digits
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Text appended after the separator, e.g. "24"
    #[arg(long)]
    pub suffix: String,

    /// Number of valid keys to generate
    #[arg(long, allow_negative_numbers = true)]
    pub count: i64,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "SERIAL_KEYGEN_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(long, env = "SERIAL_KEYGEN_PORT", default_value_t = 8080)]
    pub port: u16,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long = "store", value_enum, default_value_t = StoreBackend::Memory)]
    pub backend: StoreBackend,

    #[arg(long, env = "REDIS_URL", default_value = "redis://localhost:6379/")]
    pub redis_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// Candidates tried per key before giving up
    #[arg(long, env = "SERIAL_KEYGEN_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl From<StoreArgs> for StoreSettings {
    fn from(args: StoreArgs) -> Self {
        StoreSettings {
            backend: args.backend,
            redis_url: args.redis_url,
        }
    }
}

impl From<GeneratorArgs> for GeneratorConfig {
    fn from(args: GeneratorArgs) -> Self {
        GeneratorConfig {
            max_attempts: args.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "serial-keygen",
            "generate",
            "--prefix",
            "1234",
            "--suffix",
            "24",
            "--count",
            "10",
        ]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.prefix, "1234");
                assert_eq!(args.suffix, "24");
                assert_eq!(args.count, 10);
                assert_eq!(args.store.backend, StoreBackend::Memory);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_negative_count_reaches_validation() {
        let cli = Cli::parse_from([
            "serial-keygen",
            "generate",
            "--suffix",
            "24",
            "--count",
            "-1",
        ]);
        match cli.command {
            Command::Generate(args) => assert_eq!(args.count, -1),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_redis() {
        let cli = Cli::parse_from([
            "serial-keygen",
            "--verbose",
            "serve",
            "--port",
            "9090",
            "--store",
            "redis",
            "--redis-url",
            "redis://cache:6379/",
            "--max-attempts",
            "4",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, 9090);
                let settings = StoreSettings::from(args.store);
                assert_eq!(settings.backend, StoreBackend::Redis);
                assert_eq!(settings.redis_url, "redis://cache:6379/");
                assert_eq!(GeneratorConfig::from(args.generator).max_attempts, 4);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
