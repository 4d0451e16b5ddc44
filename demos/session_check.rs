mod env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env::init_logging();
    let client = env::client_from_env()?;

    println!("before login: logged_in = {}", client.logged_in().await?);
    client.login().await?;
    println!("after login: logged_in = {}", client.logged_in().await?);
    client.logout().await?;
    println!("after logout: logged_in = {}", client.logged_in().await?);

    Ok(())
}
