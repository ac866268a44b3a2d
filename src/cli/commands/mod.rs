use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("pordego")
        .about("Authentication Gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("3002")
                .env("PORDEGO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("provider-url")
                .long("provider-url")
                .help("Identity provider base URL, example: https://<project>.supabase.co/auth/v1")
                .env("PORDEGO_PROVIDER_URL")
                .required(true),
        )
        .arg(
            Arg::new("provider-key")
                .long("provider-key")
                .help("Identity provider API key")
                .env("PORDEGO_PROVIDER_KEY")
                .required(true),
        )
        .arg(
            Arg::new("origin")
                .long("origin")
                .help("Allowed CORS origin, repeat or comma separate for more than one")
                .env("PORDEGO_ORIGINS")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .default_values(["http://localhost:3000", "http://localhost:5173"]),
        )
        .arg(
            Arg::new("production")
                .long("production")
                .help("Production deployment, mark session cookies Secure")
                .env("PORDEGO_PRODUCTION")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PORDEGO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "pordego");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Authentication Gateway"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_provider() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "pordego",
            "--port",
            "3002",
            "--provider-url",
            "https://project.supabase.co/auth/v1",
            "--provider-key",
            "anon-key",
        ]);

        assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(3002));
        assert_eq!(
            matches
                .get_one::<String>("provider-url")
                .map(|s| s.to_string()),
            Some("https://project.supabase.co/auth/v1".to_string())
        );
        assert_eq!(
            matches
                .get_one::<String>("provider-key")
                .map(|s| s.to_string()),
            Some("anon-key".to_string())
        );
        assert!(!matches.get_flag("production"));
    }

    #[test]
    fn test_default_origins() {
        temp_env::with_vars([("PORDEGO_ORIGINS", None::<String>)], || {
            let command = new();
            let matches = command.get_matches_from(vec![
                "pordego",
                "--provider-url",
                "https://project.supabase.co/auth/v1",
                "--provider-key",
                "anon-key",
            ]);

            let origins: Vec<String> = matches
                .get_many::<String>("origin")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();

            assert_eq!(
                origins,
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string()
                ]
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PORDEGO_PORT", Some("443")),
                (
                    "PORDEGO_PROVIDER_URL",
                    Some("https://project.supabase.co/auth/v1"),
                ),
                ("PORDEGO_PROVIDER_KEY", Some("anon-key")),
                ("PORDEGO_ORIGINS", Some("https://app.pordego.dev")),
                ("PORDEGO_PRODUCTION", Some("true")),
                ("PORDEGO_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["pordego"]);
                assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(443));
                assert_eq!(
                    matches
                        .get_one::<String>("provider-url")
                        .map(|s| s.to_string()),
                    Some("https://project.supabase.co/auth/v1".to_string())
                );
                assert_eq!(
                    matches
                        .get_one::<String>("provider-key")
                        .map(|s| s.to_string()),
                    Some("anon-key".to_string())
                );
                let origins: Vec<String> = matches
                    .get_many::<String>("origin")
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                assert_eq!(origins, vec!["https://app.pordego.dev".to_string()]);
                assert!(matches.get_flag("production"));
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("PORDEGO_LOG_LEVEL", Some(level)),
                    (
                        "PORDEGO_PROVIDER_URL",
                        Some("https://project.supabase.co/auth/v1"),
                    ),
                    ("PORDEGO_PROVIDER_KEY", Some("anon-key")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["pordego"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").map(|s| *s),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PORDEGO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "pordego".to_string(),
                    "--provider-url".to_string(),
                    "https://project.supabase.co/auth/v1".to_string(),
                    "--provider-key".to_string(),
                    "anon-key".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }
}
