use colored::Colorize;

use crate::client::LinearClient;
use crate::error::Result;
use crate::output;

pub async fn test(client: &LinearClient) -> Result<()> {
    let user = client.test_connection().await?;

    output::print_item(&user, |user| {
        let email = user
            .email
            .as_deref()
            .map(|e| format!(" <{e}>"))
            .unwrap_or_default();
        println!("{} {}{}", "Connected as".green(), user.name.bold(), email);
    });

    Ok(())
}
