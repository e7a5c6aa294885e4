use blogcheck_client::{ApiClient, NewPost};

use super::{print_json, report_error};
use crate::cli::args::{PostsArgs, PostsSub};

pub async fn run(args: PostsArgs, client: &ApiClient) -> anyhow::Result<i32> {
    let result = match args.cmd {
        PostsSub::Create {
            title,
            body,
            author_id,
        } => client
            .create_post(&NewPost::new(title, body, author_id))
            .await
            .map(serde_json::to_value),
        PostsSub::List => client.list_posts().await.map(serde_json::to_value),
        PostsSub::Delete { id } => client.delete_post(id).await.map(serde_json::to_value),
    };

    match result {
        Ok(value) => print_json(&value?),
        Err(e) => Ok(report_error(&e)),
    }
}
