// src/pedidos/pedido_structs.rs

use bigdecimal::BigDecimal;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::shared::shared_structs::RespostaGenerica;

/// Item individual do pedido enviado ao servidor.
/// Preço e nome ficam de fora: o servidor é a fonte dos preços.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemPedido {
    pub producto_id: i64,
    pub cantidad: i32,
}

/// Pedido pronto para envio. Existe só durante uma submissão.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PedidoPendente {
    pub items: Vec<ItemPedido>,
    /// `None` é serializado como `null` (notas omitidas).
    pub notas: Option<String>,
}

/// Campos extras que o servidor devolve quando aceita o pedido.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DadosPedido {
    #[serde(default)]
    pub pedido_id: Option<i64>,
    #[serde(default)]
    pub mesa: Option<serde_json::Value>,
    #[serde(default)]
    pub total: Option<BigDecimal>,
    #[serde(default)]
    pub moneda: Option<String>,
}

/// Resposta de POST /api/pedido/{mesa}.
pub type RespostaPedido = RespostaGenerica<DadosPedido>;

/// Último pedido aceito pelo servidor, exibido no topo da carta.
#[derive(Debug, Clone)]
pub struct PedidoConfirmado {
    pub pedido_id: Option<i64>,
    pub mesa: Option<String>,
    pub total: Option<BigDecimal>,
    pub moeda: Option<String>,
    pub enviado_em: DateTime<Local>,
}

impl PedidoConfirmado {
    pub fn da_resposta(resposta: &RespostaPedido, enviado_em: DateTime<Local>) -> Self {
        let mesa = resposta.body.mesa.as_ref().map(|valor| match valor {
            serde_json::Value::String(nome) => nome.clone(),
            outro => outro.to_string(),
        });

        Self {
            pedido_id: resposta.body.pedido_id,
            mesa,
            total: resposta.body.total.clone(),
            moeda: resposta.body.moneda.clone(),
            enviado_em,
        }
    }
}
