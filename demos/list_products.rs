mod env;

use panaccess::Params;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env::init_logging();
    let client = env::client_from_env()?;

    client.login().await?;
    for product in client.list_products(Params::new()).await? {
        println!(
            "{:>6}  {}{}",
            product.id,
            product.name,
            if product.deleted { " (deleted)" } else { "" }
        );
    }
    client.logout().await?;

    Ok(())
}
