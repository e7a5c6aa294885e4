use blogcheck_client::ApiConfig;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "blogcheck",
    version,
    about = "Contract checks and a thin client for the users/posts blog API"
)]
pub struct Cli {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the contract suite (create user, then create post)
    Run(RunArgs),
    /// List the built-in checks
    List,
    /// User endpoints
    Users(UsersArgs),
    /// Post endpoints
    Posts(PostsArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the service under test
    #[arg(
        long,
        global = true,
        env = "BLOGCHECK_API_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub url: String,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = "BLOGCHECK_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "BLOGCHECK_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Retries for transient failures of GET/DELETE requests (POST is never retried)
    #[arg(long, global = true, env = "BLOGCHECK_MAX_RETRIES", default_value_t = 0)]
    pub max_retries: u32,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> ApiConfig {
        let config = ApiConfig::default()
            .with_url(&self.url)
            .with_timeout_secs(self.timeout)
            .with_max_retries(self.max_retries);

        match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Only run the named check (repeatable), e.g. --check "create post"
    #[arg(long = "check")]
    pub checks: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub cmd: UsersSub,
}

#[derive(Subcommand, Debug)]
pub enum UsersSub {
    /// POST /users/
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        age: i64,
    },
    /// GET /users/{name}
    Get { name: String },
    /// DELETE /users/{id}
    Delete { id: i64 },
}

#[derive(clap::Args, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub cmd: PostsSub,
}

#[derive(Subcommand, Debug)]
pub enum PostsSub {
    /// POST /posts/
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        author_id: i64,
    },
    /// GET /post/
    List,
    /// DELETE /posts/{id}
    Delete { id: i64 },
}
