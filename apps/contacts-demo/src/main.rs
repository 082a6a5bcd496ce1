use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== stickylist contacts demo ===");
    println!("Scripted session: scrolling, header taps that collapse a letter,");
    println!("a row tap in single choice mode and a contact added mid-session.");
    println!();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    contacts_demo::run(&mut out)?;
    out.flush()?;
    Ok(())
}
