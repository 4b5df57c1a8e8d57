use clap::{Args, Parser, Subcommand};
use firegate_auth::FirebaseAuthConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "firegate")]
#[command(about = "Firebase login bridge with a staff admin login", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the login server
    Serve {
        /// TOML configuration file (defaults to ./firegate.toml when present)
        #[arg(short, long, env = "FIREGATE_CONFIG")]
        config: Option<PathBuf>,

        /// Listen address
        #[arg(long, env = "FIREGATE_HOST")]
        host: Option<String>,

        /// Server port
        #[arg(short, long, env = "FIREGATE_PORT")]
        port: Option<u16>,

        /// TOML file of users to create at startup
        #[arg(short, long, env = "FIREGATE_USERS_FILE")]
        users_file: Option<PathBuf>,

        /// Log one JSON object per line
        #[arg(long)]
        log_json: bool,

        #[command(flatten)]
        firebase: FirebaseArgs,
    },

    /// Print an argon2 hash for a users file
    HashPassword {
        password: String,
    },
}

/// Per-key overrides of the `[firebase]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct FirebaseArgs {
    #[arg(long, env = "FIREBASE_AUTH_SERVICE_ACCOUNT_FILE")]
    pub service_account_file: Option<PathBuf>,

    #[arg(long, env = "FIREBASE_AUTH_PROJECT_ID")]
    pub project_id: Option<String>,

    #[arg(long, env = "FIREBASE_AUTH_WEB_API_KEY")]
    pub web_api_key: Option<String>,

    #[arg(long, env = "FIREBASE_AUTH_AUTH_DOMAIN")]
    pub auth_domain: Option<String>,

    #[arg(long, env = "FIREBASE_AUTH_JWT_HEADER_NAME")]
    pub jwt_header_name: Option<String>,

    #[arg(long, env = "FIREBASE_AUTH_ALLOW_NOT_CONFIRMED_EMAILS")]
    pub allow_not_confirmed_emails: Option<bool>,

    #[arg(long, env = "FIREBASE_AUTH_ENABLE_GOOGLE_LOGIN")]
    pub enable_google_login: Option<bool>,

    #[arg(long, env = "FIREBASE_AUTH_ADMIN_LOGIN_REDIRECT_URL")]
    pub admin_login_redirect_url: Option<String>,

    /// `email` or `uid`
    #[arg(long, env = "FIREBASE_AUTH_USER_GETTER")]
    pub user_getter: Option<String>,

    #[arg(long, env = "FIREBASE_AUTH_CREATE_USER_IF_NOT_EXISTS")]
    pub create_user_if_not_exists: Option<bool>,

    #[arg(long, env = "FIREBASE_AUTH_AUTH_BACKEND")]
    pub auth_backend: Option<String>,

    #[arg(long, env = "FIREBASE_AUTH_CLOCK_SKEW_SECONDS")]
    pub clock_skew_seconds: Option<u64>,
}

impl FirebaseArgs {
    /// Overwrite every key that was given on the command line or in the environment.
    pub fn apply(self, config: &mut FirebaseAuthConfig) {
        if let Some(v) = self.service_account_file {
            config.service_account_file = Some(v);
        }
        if let Some(v) = self.project_id {
            config.project_id = Some(v);
        }
        if let Some(v) = self.web_api_key {
            config.web_api_key = Some(v);
        }
        if let Some(v) = self.auth_domain {
            config.auth_domain = Some(v);
        }
        if let Some(v) = self.jwt_header_name {
            config.jwt_header_name = v;
        }
        if let Some(v) = self.allow_not_confirmed_emails {
            config.allow_not_confirmed_emails = v;
        }
        if let Some(v) = self.enable_google_login {
            config.enable_google_login = v;
        }
        if let Some(v) = self.admin_login_redirect_url {
            config.admin_login_redirect_url = v;
        }
        if let Some(v) = self.user_getter {
            config.user_getter = v;
        }
        if let Some(v) = self.create_user_if_not_exists {
            config.create_user_if_not_exists = v;
        }
        if let Some(v) = self.auth_backend {
            config.auth_backend = v;
        }
        if let Some(v) = self.clock_skew_seconds {
            config.clock_skew_seconds = v;
        }
    }
}
