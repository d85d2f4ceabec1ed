// src/shared/config.rs

use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use url::Url;

use super::erro::ErroCarta;
use super::shared_structs::normalizar_moeda;

/// Argumentos de linha de comando da carta digital.
/// Cada opção também pode vir de uma variável de ambiente.
#[derive(Parser, Debug, Clone)]
#[command(name = "carta", about = "Carta digital para pedidos na mesa")]
pub struct Args {
    /// URL de entrada lida do QR code da mesa, ex.: http://192.168.0.10:8000/?mesa=3
    #[arg(long, env = "CARTA_URL")]
    pub url: String,

    /// Base da API de pedidos; por padrão, a origem da URL de entrada
    #[arg(long, env = "CARTA_API")]
    pub api: Option<String>,

    /// Símbolo de moeda padrão (apenas o primeiro token é usado)
    #[arg(long, env = "CARTA_MOEDA", default_value = "$")]
    pub moeda: String,

    /// Intervalo entre quadros de animação, em milissegundos
    #[arg(long = "quadro-ms", env = "CARTA_QUADRO_MS", default_value_t = 50)]
    pub quadro_ms: u64,
}

/// Configuração resolvida da sessão.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identificador da mesa, lido uma única vez do parâmetro `mesa`.
    /// A ausência não é erro de configuração: vira a tela de erro da sessão.
    pub mesa: Option<String>,
    pub url_api: Url,
    pub moeda_padrao: String,
    pub intervalo_quadro: Duration,
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, ErroCarta> {
        let entrada = Url::parse(&args.url)?;
        let mesa = mesa_da_url(&entrada);

        if mesa.is_none() {
            warn!("URL de entrada sem parâmetro 'mesa': {entrada}");
        }

        let url_api = match &args.api {
            Some(api) => base_com_barra(Url::parse(api)?),
            None => entrada.join("/")?,
        };

        if url_api.cannot_be_a_base() {
            return Err(ErroCarta::Configuracao(format!(
                "a URL da API não pode ser usada como base: {url_api}"
            )));
        }

        let intervalo_quadro = if args.quadro_ms == 0 {
            warn!("CARTA_QUADRO_MS inválido (0), usando 50ms");
            Duration::from_millis(50)
        } else {
            Duration::from_millis(args.quadro_ms)
        };

        let moeda_padrao = normalizar_moeda(&args.moeda);
        info!("API: {url_api}, moeda padrão: {moeda_padrao}");

        Ok(Self {
            mesa,
            url_api,
            moeda_padrao,
            intervalo_quadro,
        })
    }
}

/// Lê o parâmetro `mesa` da query string. Valor vazio conta como ausente.
pub fn mesa_da_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(chave, _)| chave == "mesa")
        .map(|(_, valor)| valor.trim().to_string())
        .filter(|valor| !valor.is_empty())
}

// `Url::join` descarta o último segmento quando não há barra final.
fn base_com_barra(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let caminho = format!("{}/", url.path());
        url.set_path(&caminho);
    }
    url
}
