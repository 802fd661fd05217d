//! CLI definitions for cargotrack.

use std::path::PathBuf;

use clap::Parser;

/// cargotrack CLI.
#[derive(Parser, Debug)]
#[command(name = "cargotrack")]
#[command(about = "Track ocean-freight cargo through a browser-driving agent")]
#[command(version)]
pub(crate) struct Cli {
    /// Booking or container reference to track
    pub reference_id: String,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Print the last stored result for the reference instead of tracking again
    #[arg(long)]
    pub cached: bool,

    /// Skip route map generation
    #[arg(long)]
    pub no_map: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cargotrack", "SINI25432400"]).unwrap();
        assert_eq!(cli.reference_id, "SINI25432400");
        assert!(!cli.headless);
        assert!(!cli.cached);
        assert!(!cli.no_map);
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "cargotrack",
            "--headless",
            "-c",
            "/tmp/track.toml",
            "--no-map",
            "SINI25432400",
        ])
        .unwrap();
        assert!(cli.headless);
        assert!(cli.no_map);
        assert_eq!(cli.config, PathBuf::from("/tmp/track.toml"));
    }

    #[test]
    fn test_reference_id_required() {
        assert!(Cli::try_parse_from(["cargotrack", "--headless"]).is_err());
    }
}
