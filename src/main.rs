// src/main.rs

use std::io;

use carta::api::api_cliente::ClienteHttp;
use carta::sessao;
use carta::shared::config::{Args, Config};
use clap::Parser;
use tracing::info;

// Inicializa os logs em stderr, para não misturar com a tela em stdout.
// O nível padrão é "info" e pode ser trocado com RUST_LOG.
fn iniciar_logs() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

// Função principal da carta digital.
#[actix_web::main]
async fn main() -> io::Result<()> {
    iniciar_logs();

    let args = Args::parse();

    // Erros de configuração encerram o programa antes de abrir a sessão
    let config = Config::load(&args)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let api = ClienteHttp::new(config.url_api.clone());

    info!("Iniciando carta digital...");
    sessao::executar(config, api).await
}
