#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_preset;
    use crate::cli::{Cli, Command, OutputFormat};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_preset_accepts_known_names() {
        assert_eq!(parse_preset("production"), Ok("production".to_string()));
        assert_eq!(parse_preset("Development"), Ok("development".to_string()));
        assert_eq!(parse_preset("none"), Ok("none".to_string()));
    }

    #[test]
    fn test_parse_preset_rejects_unknown() {
        let err = parse_preset("staging").unwrap_err();
        assert!(err.contains("staging"));
        assert!(err.contains("production"));
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = Cli::try_parse_from(["packrat", "resolve"]).unwrap();
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.config.preset, "production");
                assert!(args.config.config.is_none());
                assert!(args.out.is_none());
                assert!(!args.config.no_env);
            }
            other => panic!("expected resolve, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_with_selectors() {
        let cli = Cli::try_parse_from([
            "packrat",
            "resolve",
            "--config",
            "configs/web.toml",
            "--profile",
            "ci",
            "--preset",
            "none",
            "--format",
            "toml",
            "--out",
            "resolved.toml",
        ])
        .unwrap();
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.config.config, Some(PathBuf::from("configs/web.toml")));
                assert_eq!(args.config.profile.as_deref(), Some("ci"));
                assert_eq!(args.config.preset, "none");
                assert_eq!(args.format, OutputFormat::Toml);
                assert_eq!(args.out, Some(PathBuf::from("resolved.toml")));
            }
            other => panic!("expected resolve, got {other:?}"),
        }
    }

    #[test]
    fn test_explain_requires_module() {
        assert!(Cli::try_parse_from(["packrat", "explain"]).is_err());

        let cli = Cli::try_parse_from(["packrat", "explain", "src/app.css"]).unwrap();
        assert!(matches!(cli.command, Command::Explain(args) if args.module == "src/app.css"));
    }

    #[test]
    fn test_budget_dir_is_optional() {
        let cli = Cli::try_parse_from(["packrat", "budget"]).unwrap();
        assert!(matches!(cli.command, Command::Budget(args) if args.dir.is_none()));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["packrat", "check", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["packrat", "check", "-q", "-v"]).is_err());
    }
}
