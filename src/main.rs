use std::{
    env,
    io::{self, BufReader},
    net::TcpStream,
    sync::LazyLock,
};

use atc_voice_control_rs::{VoiceControlConfig, VoiceControlSession, transport};

pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::from_env);

#[derive(Debug, Clone)]
pub struct AppConfig {
    config_path: Option<String>,
    port: Option<u16>,
    locale: String,
}

impl AppConfig {
    fn from_env() -> Self {
        let config_path = env::var("VOICE_CONTROL_CONFIG").ok();
        let port = env::var("VOICE_CONTROL_PORT")
            .ok()
            .and_then(|port| port.parse().ok());
        let locale = env::var("VOICE_CONTROL_LOCALE").unwrap_or_else(|_| "en-US".to_owned());
        Self {
            config_path,
            port,
            locale,
        }
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match &APP_CONFIG.config_path {
        Some(path) => VoiceControlConfig::load_from_file(path)?,
        None => VoiceControlConfig::load_default()?,
    };
    let mut session = VoiceControlSession::new(config)?.with_locale(&APP_CONFIG.locale)?;
    log::info!("Voice control ready for {}", session.locale());

    match APP_CONFIG.port {
        Some(port) => {
            let stream = TcpStream::connect(("127.0.0.1", port))?;
            log::info!("Connected to game on port {port}");
            let reader = BufReader::new(stream.try_clone()?);
            transport::serve(&mut session, reader, stream)?;
        }
        None => transport::serve(&mut session, io::stdin().lock(), io::stdout().lock())?,
    }
    Ok(())
}
