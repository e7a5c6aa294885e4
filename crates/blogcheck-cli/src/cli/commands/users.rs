use blogcheck_client::{ApiClient, NewUser};

use super::{print_json, report_error};
use crate::cli::args::{UsersArgs, UsersSub};

pub async fn run(args: UsersArgs, client: &ApiClient) -> anyhow::Result<i32> {
    let result = match args.cmd {
        UsersSub::Create { name, age } => client
            .create_user(&NewUser::new(name, age))
            .await
            .map(serde_json::to_value),
        UsersSub::Get { name } => client.get_user(&name).await.map(serde_json::to_value),
        UsersSub::Delete { id } => client.delete_user(id).await.map(serde_json::to_value),
    };

    match result {
        Ok(value) => print_json(&value?),
        Err(e) => Ok(report_error(&e)),
    }
}
