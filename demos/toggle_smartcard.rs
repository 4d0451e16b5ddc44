mod env;

use std::io;

use panaccess::SmartcardSn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env::init_logging();
    let mut args = std::env::args().skip(1);
    let (Some(action), Some(sn)) = (args.next(), args.next()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "usage: toggle_smartcard <enable|disable> <serial>",
        )
        .into());
    };
    let sn = SmartcardSn::new(sn)?;
    let client = env::client_from_env()?;

    client.login().await?;
    match action.as_str() {
        "enable" => client.enable_smartcard(&sn).await?,
        "disable" => client.disable_smartcard(&sn).await?,
        other => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown action: {other}"),
            )
            .into());
        }
    }
    println!("{action}d smartcard {}", sn.as_str());
    client.logout().await?;

    Ok(())
}
