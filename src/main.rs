//! nexadmin - Entry Point

use clap::Parser;
use nexadmin::query::{QueryEngine, QueryState};
use nexadmin::store::{JsonStore, SubmissionStore};
use std::path::PathBuf;
use tracing::info;

/// nexadmin - TUI admin console for contact-form submissions
#[derive(Parser, Debug)]
#[command(name = "nexadmin")]
#[command(version)]
#[command(about = "Browse, filter, edit, and export contact-form submissions")]
pub struct Args {
    /// Path to the submissions JSON file
    pub data: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rows per page
    #[arg(short, long, value_parser = clap::value_parser!(usize))]
    pub page_size: Option<usize>,

    /// Seconds between background data refreshes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: Option<u64>,

    /// Start with a search query active
    #[arg(short, long)]
    pub search: Option<String>,

    /// Write the filtered collection as CSV to this path and exit
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Full precedence chain: Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = nexadmin::config::load_config_with_precedence(args.config.clone())?;
        let merged = nexadmin::config::merge_config(config_file);
        let with_env = nexadmin::config::apply_env_overrides(merged);
        nexadmin::config::apply_cli_overrides(
            with_env,
            args.data.clone(),
            args.page_size,
            args.poll_interval,
        )
    };

    nexadmin::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let Some(data_path) = config.data_path.clone() else {
        return Err("no data file given (pass a path, set NEXADMIN_DATA, or configure data_path)".into());
    };
    let mut store = JsonStore::new(data_path);

    // Headless one-shot export: no terminal, no event loop.
    if let Some(export_path) = args.export {
        let records = store.fetch_all()?;
        let mut engine = QueryEngine::new(QueryState::new(config.page_size));
        engine.set_records(records);
        if let Some(search) = args.search {
            engine.state_mut().set_search(search);
        }
        let rows = engine.sorted();
        nexadmin::export::write_csv(&rows, &export_path)?;
        println!("Exported {} rows to {}", rows.len(), export_path.display());
        return Ok(());
    }

    nexadmin::view::run_with_store(store, config.page_size, config.poll_interval, args.search)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["nexadmin", "--help"]);
        // Help returns Err with DisplayHelp, which is success
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["nexadmin", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["nexadmin"]);
        assert_eq!(args.data, None);
        assert_eq!(args.config, None);
        assert_eq!(args.page_size, None);
        assert_eq!(args.poll_interval, None);
        assert_eq!(args.search, None);
        assert_eq!(args.export, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_data_path_populates_data_field() {
        let args = Args::parse_from(["nexadmin", "submissions.json"]);
        assert_eq!(args.data, Some(PathBuf::from("submissions.json")));
    }

    #[test]
    fn test_page_size_short_flag() {
        let args = Args::parse_from(["nexadmin", "-p", "25"]);
        assert_eq!(args.page_size, Some(25));
    }

    #[test]
    fn test_page_size_long_flag() {
        let args = Args::parse_from(["nexadmin", "--page-size", "5"]);
        assert_eq!(args.page_size, Some(5));
    }

    #[test]
    fn test_poll_interval_rejects_zero() {
        let result = Args::try_parse_from(["nexadmin", "--poll-interval", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_poll_interval_accepts_positive() {
        let args = Args::parse_from(["nexadmin", "--poll-interval", "30"]);
        assert_eq!(args.poll_interval, Some(30));
    }

    #[test]
    fn test_search_short_flag() {
        let args = Args::parse_from(["nexadmin", "-s", "gmail"]);
        assert_eq!(args.search, Some("gmail".to_string()));
    }

    #[test]
    fn test_search_long_flag() {
        let args = Args::parse_from(["nexadmin", "--search", "ada"]);
        assert_eq!(args.search, Some("ada".to_string()));
    }

    #[test]
    fn test_export_flag() {
        let args = Args::parse_from(["nexadmin", "data.json", "--export", "out.csv"]);
        assert_eq!(args.export, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["nexadmin", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["nexadmin", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "nexadmin",
            "submissions.json",
            "-p",
            "20",
            "--poll-interval",
            "5",
            "-s",
            "gmail",
        ]);
        assert_eq!(args.data, Some(PathBuf::from("submissions.json")));
        assert_eq!(args.page_size, Some(20));
        assert_eq!(args.poll_interval, Some(5));
        assert_eq!(args.search, Some("gmail".to_string()));
    }

    #[test]
    fn test_data_path_flows_through_config_precedence_chain() {
        use nexadmin::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            data_path: Some(PathBuf::from("/file/data.json")),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.data_path, Some(PathBuf::from("/file/data.json")));

        let with_cli =
            apply_cli_overrides(merged, Some(PathBuf::from("/cli/data.json")), None, None);
        assert_eq!(
            with_cli.data_path,
            Some(PathBuf::from("/cli/data.json")),
            "CLI data path should override the config file"
        );
    }
}
