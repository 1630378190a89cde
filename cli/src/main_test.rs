mod tests {
    use crate::*;
    use std::fs;

    #[test]
    fn test_cli_args_defaults() {
        let args = CliArgs::try_parse_from(["genbench"]).expect("should parse");
        assert!(!args.list);
        assert!(args.filter.is_none());
        assert!(args.json.is_none());
        let config = config::resolve(None, args.overrides()).expect("defaults resolve");
        assert_eq!(config, genbench_core::perf::RunnerConfig::default());
    }

    #[test]
    fn test_cli_args_runner_flags() {
        let args = CliArgs::try_parse_from([
            "genbench",
            "--filter",
            "Fib",
            "--min-time-ms",
            "5",
            "--max-iters",
            "64",
            "--epochs",
            "1",
        ])
        .expect("should parse");
        let config = config::resolve(None, args.overrides()).expect("flags resolve");
        assert_eq!(config.filter.as_deref(), Some("Fib"));
        assert_eq!(config.min_time_ms, 5);
        assert_eq!(config.max_iters, 64);
        assert_eq!(config.epochs, 1);
    }

    #[test]
    fn test_cli_args_rejects_non_numeric_budget() {
        assert!(CliArgs::try_parse_from(["genbench", "--min-time-ms", "soon"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("genbench.toml");
        fs::write(&path, "min_time_ms = 250\nepochs = 5\nfilter = \"Split\"\n").expect("write config");

        let args = CliArgs::try_parse_from(["genbench", "--epochs", "2"]).expect("should parse");
        let config = config::resolve(Some(&path), args.overrides()).expect("config resolves");
        assert_eq!(config.min_time_ms, 250);
        assert_eq!(config.epochs, 2);
        assert_eq!(config.filter.as_deref(), Some("Split"));
        assert_eq!(config.max_iters, 1 << 30);
    }

    #[test]
    fn test_config_rejects_zero_epochs() {
        let err = config::resolve(
            None,
            config::Overrides {
                epochs: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("epochs"));
    }

    #[test]
    fn test_config_reports_bad_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "epochs = \"three\"").expect("write config");
        let err = config::load_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse config"));
    }

    #[test]
    fn test_env_toggle_values() {
        assert!(env_toggle_enabled("1"));
        assert!(env_toggle_enabled("genbench::runner=debug"));
        assert!(!env_toggle_enabled(""));
        assert!(!env_toggle_enabled("off"));
        assert!(!env_toggle_enabled(" FALSE "));
    }

    #[test]
    fn test_filter_expr_from() {
        assert_eq!(filter_expr_from("true"), None);
        assert_eq!(filter_expr_from("on"), None);
        assert_eq!(
            filter_expr_from(" genbench::runner=debug "),
            Some("genbench::runner=debug".to_string())
        );
    }
}
