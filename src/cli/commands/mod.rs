use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
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

    Command::new("depot-auth")
        .about("Passwordless account provisioning and session lifecycle")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("DEPOT_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("endpoint")
                .short('e')
                .long("endpoint")
                .help("Identity provider endpoint, example: https://identity.tld")
                .env("DEPOT_APPWRITE_ENDPOINT")
                .required(true),
        )
        .arg(
            Arg::new("project")
                .long("project")
                .help("Identity provider project id")
                .env("DEPOT_APPWRITE_PROJECT")
                .required(true),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .help("Admin API key, elevated privileges, keep out of untrusted hands")
                .env("DEPOT_APPWRITE_API_KEY")
                .required(true),
        )
        .arg(
            Arg::new("database")
                .long("database")
                .help("Directory database id")
                .env("DEPOT_APPWRITE_DATABASE")
                .required(true),
        )
        .arg(
            Arg::new("users-collection")
                .long("users-collection")
                .help("Users collection id inside the directory database")
                .env("DEPOT_APPWRITE_USERS_COLLECTION")
                .required(true),
        )
        .arg(
            Arg::new("avatar-url")
                .long("avatar-url")
                .help("Placeholder avatar for newly provisioned identities")
                .default_value("https://depot.example/assets/avatar-placeholder.png")
                .env("DEPOT_AVATAR_URL"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("DEPOT_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_args() -> Vec<String> {
        vec![
            "depot-auth".to_string(),
            "--endpoint".to_string(),
            "https://identity.tld".to_string(),
            "--project".to_string(),
            "depot".to_string(),
            "--api-key".to_string(),
            "secret-key".to_string(),
            "--database".to_string(),
            "main".to_string(),
            "--users-collection".to_string(),
            "users".to_string(),
        ]
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "depot-auth");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Passwordless account provisioning and session lifecycle"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_endpoint() {
        let command = new();
        let mut args = required_args();
        args.push("--port".to_string());
        args.push("8080".to_string());
        let matches = command.get_matches_from(args);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(
            matches.get_one::<String>("endpoint").map(String::to_string),
            Some("https://identity.tld".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("project").map(String::to_string),
            Some("depot".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("api-key").map(String::to_string),
            Some("secret-key".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("database").map(String::to_string),
            Some("main".to_string())
        );
        assert_eq!(
            matches
                .get_one::<String>("users-collection")
                .map(String::to_string),
            Some("users".to_string())
        );
        assert_eq!(
            matches
                .get_one::<String>("avatar-url")
                .map(String::to_string),
            Some("https://depot.example/assets/avatar-placeholder.png".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("DEPOT_APPWRITE_ENDPOINT", Some("https://identity.tld")),
                ("DEPOT_APPWRITE_PROJECT", Some("depot")),
                ("DEPOT_APPWRITE_API_KEY", Some("secret-key")),
                ("DEPOT_APPWRITE_DATABASE", Some("main")),
                ("DEPOT_APPWRITE_USERS_COLLECTION", Some("users")),
                ("DEPOT_PORT", Some("443")),
                ("DEPOT_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["depot-auth"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>("endpoint").map(String::to_string),
                    Some("https://identity.tld".to_string())
                );
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
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
                    ("DEPOT_LOG_LEVEL", Some(level)),
                    ("DEPOT_APPWRITE_ENDPOINT", Some("https://identity.tld")),
                    ("DEPOT_APPWRITE_PROJECT", Some("depot")),
                    ("DEPOT_APPWRITE_API_KEY", Some("secret-key")),
                    ("DEPOT_APPWRITE_DATABASE", Some("main")),
                    ("DEPOT_APPWRITE_USERS_COLLECTION", Some("users")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["depot-auth"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("DEPOT_LOG_LEVEL", None::<String>)], || {
                let mut args = required_args();

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
