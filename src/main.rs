use clap::Parser;
use contact_book::utils::error::ErrorSeverity;
use contact_book::utils::logger;
use contact_book::{AddressBook, CliConfig, ConfigProvider, Session};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            // 日誌尚未初始化，直接輸出
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    tracing::info!("Starting contact-book");
    tracing::debug!("Settings: {:?}", settings);

    let book = AddressBook::from_config(&settings);
    let mut session = Session::new(
        book,
        io::stdin().lock(),
        io::stdout(),
        settings.default_file(),
    );

    if let Some(file) = &settings.startup_file {
        session.preload(file)?;
    }

    if let Err(e) = session.run() {
        tracing::error!(
            "Session ended: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        if e.severity() >= ErrorSeverity::High {
            std::process::exit(1);
        }
    }

    Ok(())
}
