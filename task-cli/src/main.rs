use clap::{Parser, Subcommand};
use task_cli::{CreateTaskRequest, DEFAULT_URL, TaskClient, UpdateTaskRequest};

/// CLI client for the task server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Base URL of the server
    #[arg(long, default_value = DEFAULT_URL, global = true)]
    url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// List all tasks
    List,
    /// Create a task
    Create {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show a single task
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Change the given fields of a task
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a task
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let client = TaskClient::new(args.url);

    let response = match args.command {
        Commands::List => client.list().await?,
        Commands::Create {
            title,
            description,
            status,
        } => {
            let request = CreateTaskRequest {
                title,
                description,
                status,
            };
            client.create(&request).await?
        }
        Commands::Get { id } => client.get(id).await?,
        Commands::Update {
            id,
            title,
            description,
            status,
        } => {
            let request = UpdateTaskRequest {
                title,
                description,
                status,
            };
            client.update(id, &request).await?
        }
        Commands::Delete { id } => client.delete(id).await?,
    };

    println!("{}", response.render());
    Ok(())
}
