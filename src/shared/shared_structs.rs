// src/shared/shared_structs.rs

use bigdecimal::BigDecimal;
use serde::Deserialize;

/// Estrutura genérica para as respostas do serviço de pedidos.
///
/// O servidor responde `{ success, mensaje, ... }` nas rotas próprias e
/// `{ detail }` quando o FastAPI levanta uma exceção HTTP. Todos os campos
/// são tolerantes: um corpo sem `success` é tratado como falha.
/// 'T' é o corpo específico da rota, achatado no mesmo objeto JSON.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RespostaGenerica<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> RespostaGenerica<T> {
    /// Mensagem de erro a ser exibida ao usuário: `mensaje`, depois `detail`,
    /// depois o texto padrão.
    pub fn mensagem_erro(&self) -> String {
        self.mensaje
            .as_deref()
            .or(self.detail.as_deref())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Erro ao enviar")
            .to_string()
    }
}

/// Símbolo de moeda usado quando o produto não define o seu.
pub const MOEDA_PADRAO: &str = "$";

/// Normaliza o símbolo configurado: só o primeiro token conta ("$ USD" -> "$").
pub fn normalizar_moeda(valor: &str) -> String {
    valor
        .split_whitespace()
        .next()
        .unwrap_or(MOEDA_PADRAO)
        .to_string()
}

/// Formata um valor arredondado para duas casas decimais, precedido do
/// símbolo da moeda.
pub fn formatar_preco(valor: &BigDecimal, moeda: &str) -> String {
    format!("{}{}", moeda, valor.round(2).with_scale(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[derive(Deserialize, Debug, Default)]
    struct Vazio {}

    #[test]
    fn formata_com_duas_casas() {
        let valor = BigDecimal::from_str("4").unwrap();
        assert_eq!(formatar_preco(&valor, "$"), "$4.00");
        let valor = BigDecimal::from_str("12.5").unwrap();
        assert_eq!(formatar_preco(&valor, "€"), "€12.50");
    }

    #[test]
    fn arredonda_em_vez_de_truncar() {
        let valor = BigDecimal::from_str("2.999").unwrap();
        assert_eq!(formatar_preco(&valor, "$"), "$3.00");
        let valor = BigDecimal::from_str("0.125").unwrap();
        assert_eq!(formatar_preco(&valor, "$"), "$0.13");
        let valor = BigDecimal::from_str("7.004").unwrap();
        assert_eq!(formatar_preco(&valor, "$"), "$7.00");
    }

    #[test]
    fn moeda_usa_primeiro_token() {
        assert_eq!(normalizar_moeda("$ USD"), "$");
        assert_eq!(normalizar_moeda("  S/  soles"), "S/");
        assert_eq!(normalizar_moeda("   "), "$");
    }

    #[test]
    fn mensagem_de_erro_prefere_mensaje_depois_detail() {
        let r: RespostaGenerica<Vazio> =
            serde_json::from_str(r#"{"success": false, "mensaje": "Sem estoque"}"#).unwrap();
        assert_eq!(r.mensagem_erro(), "Sem estoque");

        let r: RespostaGenerica<Vazio> =
            serde_json::from_str(r#"{"detail": "Mesa no encontrada o inactiva"}"#).unwrap();
        assert!(!r.success);
        assert_eq!(r.mensagem_erro(), "Mesa no encontrada o inactiva");

        let r: RespostaGenerica<Vazio> = serde_json::from_str("{}").unwrap();
        assert_eq!(r.mensagem_erro(), "Erro ao enviar");
    }
}
