// src/api/api_cliente.rs

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::cardapio::cardapio_structs::RespostaMenu;
use crate::pedidos::pedido_structs::{PedidoPendente, RespostaPedido};
use crate::shared::erro::ErroCarta;

/// As duas chamadas de rede da carta.
///
/// A sessão só depende desta trait; os testes trocam o cliente HTTP
/// por uma implementação em memória.
#[async_trait]
pub trait ApiCarta {
    /// Busca o cardápio completo. Status diferente de 2xx é erro.
    async fn buscar_menu(&self) -> Result<RespostaMenu, ErroCarta>;

    /// Envia o pedido da mesa. O corpo da resposta é lido qualquer que seja
    /// o status: o campo `success` decide o resultado.
    async fn enviar_pedido(
        &self,
        mesa: &str,
        pedido: &PedidoPendente,
    ) -> Result<RespostaPedido, ErroCarta>;
}

/// Implementação de `ApiCarta` sobre `reqwest`.
#[derive(Clone)]
pub struct ClienteHttp {
    http: Client,
    base: Url,
}

impl ClienteHttp {
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
        }
    }

    fn url_menu(&self) -> Result<Url, ErroCarta> {
        Ok(self.base.join("api/menu")?)
    }

    fn url_pedido(&self, mesa: &str) -> Result<Url, ErroCarta> {
        let mut url = self.base.join("api/pedido/")?;
        // path_segments_mut codifica a mesa, que vem de fora
        url.path_segments_mut()
            .map_err(|_| ErroCarta::Configuracao(format!("URL sem caminho: {}", self.base)))?
            .pop_if_empty()
            .push(mesa);
        Ok(url)
    }
}

#[async_trait]
impl ApiCarta for ClienteHttp {
    async fn buscar_menu(&self) -> Result<RespostaMenu, ErroCarta> {
        let url = self.url_menu()?;
        let resposta = self.http.get(url).send().await?;

        let status = resposta.status();
        if !status.is_success() {
            warn!("GET /api/menu respondeu {status}");
            return Err(ErroCarta::Status(status.as_u16()));
        }

        let texto = resposta.text().await?;
        let menu: RespostaMenu = serde_json::from_str(&texto)?;
        info!(
            "Cardápio recebido: {} categorias, {} produtos",
            menu.menu.len(),
            menu.total_produtos()
        );
        Ok(menu)
    }

    async fn enviar_pedido(
        &self,
        mesa: &str,
        pedido: &PedidoPendente,
    ) -> Result<RespostaPedido, ErroCarta> {
        let url = self.url_pedido(mesa)?;
        info!("Enviando pedido da mesa {mesa} com {} itens", pedido.items.len());

        let resposta = self.http.post(url).json(pedido).send().await?;
        let status = resposta.status();
        let texto = resposta.text().await?;

        if !status.is_success() {
            warn!("POST /api/pedido/{mesa} respondeu {status}");
        }

        // Corpo JSON com erro (ex.: {"detail": ...}) é tratado pela resposta
        Ok(serde_json::from_str(&texto)?)
    }
}
