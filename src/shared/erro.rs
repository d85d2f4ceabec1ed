// src/shared/erro.rs

use thiserror::Error;

/// Erros que podem interromper uma operação da carta.
///
/// Os erros de sessão (`MesaAusente`, `CardapioInvalido` e falhas ao buscar o menu)
/// levam à tela de erro bloqueante; os demais viram um toast de erro.
#[derive(Error, Debug)]
pub enum ErroCarta {
    #[error("Escaneie o código QR da sua mesa")]
    MesaAusente,

    #[error("URL inválida: {0}")]
    UrlInvalida(#[from] url::ParseError),

    #[error("Configuração inválida: {0}")]
    Configuracao(String),

    #[error("Erro de conexão: {0}")]
    Rede(#[from] reqwest::Error),

    #[error("O servidor respondeu com status {0}")]
    Status(u16),

    #[error("Resposta inválida do servidor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cardápio inválido: {0}")]
    CardapioInvalido(String),
}
