//! Entry point for the `saferoute` binary.
#![forbid(unsafe_code)]

#[tokio::main]
async fn main() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    if let Err(err) = saferoute_server::run().await {
        if let saferoute_server::CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        log::error!("saferoute: {err}");
        eprintln!("saferoute: {err}");
        std::process::exit(1);
    }
}
