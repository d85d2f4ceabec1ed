// src/cardapio/cardapio_structs.rs

use std::collections::HashSet;

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::shared::erro::ErroCarta;

/// Estrutura que representa um produto do cardápio, como enviado pelo servidor.
/// Imutável depois de carregada.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Produto {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: BigDecimal,
    #[serde(default)]
    pub imagen: Option<String>,
    /// Símbolo de moeda próprio do produto; sem ele vale o padrão da sessão.
    #[serde(default)]
    pub moneda: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
}

impl Produto {
    /// Resolve o símbolo de moeda do produto, caindo no padrão da sessão.
    pub fn moeda<'a>(&'a self, padrao: &'a str) -> &'a str {
        self.moneda
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(padrao)
    }
}

/// Cardápio completo: categoria -> produtos, na ordem em que o servidor enviou.
pub type Cardapio = IndexMap<String, Vec<Produto>>;

/// Corpo da resposta de GET /api/menu.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RespostaMenu {
    pub menu: Cardapio,
    #[serde(default)]
    pub categorias: Vec<String>,
}

impl RespostaMenu {
    /// Valida o cardápio inteiro antes de ele substituir o atual.
    ///
    /// Um preço negativo ou um id repetido invalida tudo: nunca aplicamos
    /// um cardápio parcial.
    pub fn validar(&self) -> Result<(), ErroCarta> {
        let zero = BigDecimal::from(0);
        let mut ids = HashSet::new();

        for (categoria, produtos) in &self.menu {
            for produto in produtos {
                if produto.precio < zero {
                    return Err(ErroCarta::CardapioInvalido(format!(
                        "preço negativo no produto {} ({categoria})",
                        produto.id
                    )));
                }
                if !ids.insert(produto.id) {
                    return Err(ErroCarta::CardapioInvalido(format!(
                        "id {} repetido",
                        produto.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Lista de categorias para os botões de filtro.
    /// Se o servidor não mandou a lista, usa as chaves do cardápio.
    pub fn lista_categorias(&self) -> Vec<String> {
        if self.categorias.is_empty() {
            self.menu.keys().cloned().collect()
        } else {
            self.categorias.clone()
        }
    }

    pub fn total_produtos(&self) -> usize {
        self.menu.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"{
        "menu": {
            "Postres": [{"id": 3, "nombre": "Flan", "precio": 3.5, "moneda": "€"}],
            "Bebidas": [
                {"id": 1, "nombre": "Agua", "precio": 2.0},
                {"id": 2, "nombre": "Café", "descripcion": "Espresso", "precio": 1.25, "imagen": "/images/cafe.png"}
            ]
        },
        "categorias": ["Bebidas", "Postres"]
    }"#;

    #[test]
    fn preserva_a_ordem_das_categorias_do_json() {
        let resposta: RespostaMenu = serde_json::from_str(MENU).unwrap();
        let chaves: Vec<_> = resposta.menu.keys().cloned().collect();
        assert_eq!(chaves, vec!["Postres", "Bebidas"]);
        assert_eq!(resposta.lista_categorias(), vec!["Bebidas", "Postres"]);
        assert_eq!(resposta.total_produtos(), 3);
        assert!(resposta.validar().is_ok());
    }

    #[test]
    fn moeda_do_produto_tem_prioridade() {
        let resposta: RespostaMenu = serde_json::from_str(MENU).unwrap();
        assert_eq!(resposta.menu["Postres"][0].moeda("$"), "€");
        assert_eq!(resposta.menu["Bebidas"][0].moeda("$"), "$");
    }

    #[test]
    fn rejeita_preco_negativo_e_id_repetido() {
        let negativo: RespostaMenu = serde_json::from_str(
            r#"{"menu": {"X": [{"id": 1, "nombre": "A", "precio": -1}]}}"#,
        )
        .unwrap();
        assert!(matches!(negativo.validar(), Err(ErroCarta::CardapioInvalido(_))));

        let repetido: RespostaMenu = serde_json::from_str(
            r#"{"menu": {"X": [{"id": 1, "nombre": "A", "precio": 1}],
                         "Y": [{"id": 1, "nombre": "B", "precio": 2}]}}"#,
        )
        .unwrap();
        assert!(matches!(repetido.validar(), Err(ErroCarta::CardapioInvalido(_))));
    }

    #[test]
    fn sem_lista_de_categorias_usa_as_chaves() {
        let resposta: RespostaMenu =
            serde_json::from_str(r#"{"menu": {"General": []}}"#).unwrap();
        assert_eq!(resposta.lista_categorias(), vec!["General"]);
    }
}
