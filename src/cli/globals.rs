use secrecy::SecretString;

/// Provider configuration shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: SecretString,
    pub database_id: String,
    pub users_collection_id: String,
    pub avatar_url: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            project_id: String::new(),
            api_key: SecretString::default(),
            database_id: String::new(),
            users_collection_id: String::new(),
            avatar_url: String::new(),
        }
    }

    pub fn set_api_key(&mut self, key: SecretString) {
        self.api_key = key;
    }
}
