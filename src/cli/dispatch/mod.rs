use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let required = |name: &str| -> Result<String> {
        matches
            .get_one::<String>(name)
            .map(String::to_string)
            .ok_or_else(|| anyhow!("missing required argument: --{name}"))
    };

    let action = Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
    };

    let mut globals = GlobalArgs::new(required("endpoint")?);
    globals.project_id = required("project")?;
    globals.set_api_key(SecretString::from(required("api-key")?));
    globals.database_id = required("database")?;
    globals.users_collection_id = required("users-collection")?;
    globals.avatar_url = required("avatar-url")?;

    Ok((action, globals))
}
