// src/carrinho/carrinho_structs.rs

use bigdecimal::BigDecimal;

// Importa ItemPedido do módulo de pedidos, pois o carrinho gera o corpo do pedido
use crate::pedidos::pedido_structs::ItemPedido;

/// Uma linha do carrinho: todas as unidades de um mesmo produto.
///
/// Nome e preço são uma cópia tirada no momento em que o produto foi adicionado;
/// o `id` só referencia o produto do cardápio.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCarrinho {
    pub id: i64,
    pub nome: String,
    pub preco: BigDecimal,
    pub quantidade: i32,
}

impl ItemCarrinho {
    pub fn subtotal(&self) -> BigDecimal {
        &self.preco * &BigDecimal::from(self.quantidade)
    }
}

/// Carrinho de compras em memória, único por id.
///
/// Nenhuma linha fica com quantidade menor ou igual a zero.
#[derive(Debug, Default, Clone)]
pub struct Carrinho {
    itens: Vec<ItemCarrinho>,
}

impl Carrinho {
    /// Adiciona uma unidade do produto. Se ele já está no carrinho,
    /// soma na linha existente em vez de criar outra.
    pub fn adicionar(&mut self, id: i64, nome: &str, preco: BigDecimal) {
        // Procura a linha do produto; se não existir, cria com uma unidade
        match self.itens.iter_mut().find(|item| item.id == id) {
            Some(item) => item.quantidade = item.quantidade.saturating_add(1),
            None => self.itens.push(ItemCarrinho {
                id,
                nome: nome.to_string(),
                preco,
                quantidade: 1,
            }),
        }
    }

    /// Soma `delta` na quantidade da linha. A linha sai do carrinho quando
    /// chega a zero ou menos. Retorna `false` se o id não estava no carrinho.
    pub fn mudar_quantidade(&mut self, id: i64, delta: i32) -> bool {
        // Id fora do carrinho: nada a fazer
        let Some(posicao) = self.itens.iter().position(|item| item.id == id) else {
            return false;
        };

        // Calcula a nova quantidade e remove a linha se ela zerar
        let nova = self.itens[posicao].quantidade.saturating_add(delta);
        if nova <= 0 {
            self.itens.remove(posicao);
        } else {
            self.itens[posicao].quantidade = nova;
        }
        true
    }

    pub fn limpar(&mut self) {
        self.itens.clear();
    }

    pub fn itens(&self) -> &[ItemCarrinho] {
        &self.itens
    }

    pub fn esta_vazio(&self) -> bool {
        self.itens.is_empty()
    }

    /// Quantidade total de unidades (soma das quantidades).
    pub fn total_itens(&self) -> i64 {
        self.itens.iter().map(|item| i64::from(item.quantidade)).sum()
    }

    /// Soma de preço x quantidade de todas as linhas.
    pub fn total_preco(&self) -> BigDecimal {
        let mut total = BigDecimal::from(0);
        for item in &self.itens {
            total += item.subtotal();
        }
        total
    }

    /// Itens no formato do corpo do pedido: só id e quantidade.
    /// O servidor é quem define os preços.
    pub fn itens_pedido(&self) -> Vec<ItemPedido> {
        self.itens
            .iter()
            .map(|item| ItemPedido {
                producto_id: item.id,
                cantidad: item.quantidade,
            })
            .collect()
    }
}
