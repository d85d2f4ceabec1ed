// src/cardapio/cardapio_filtro.rs

use super::cardapio_structs::{Cardapio, Produto};

/// Categoria sentinela: sem restrição de categoria.
pub const TODAS: &str = "Todas";

/// Filtro ativo da vista: categoria x termo de busca.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiltroVista {
    pub categoria: String,
    pub termo: String,
}

impl Default for FiltroVista {
    fn default() -> Self {
        Self {
            categoria: TODAS.to_string(),
            termo: String::new(),
        }
    }
}

impl FiltroVista {
    /// Atualiza o termo a cada tecla; espaços nas pontas são ignorados.
    pub fn definir_termo(&mut self, texto: &str) {
        self.termo = texto.trim().to_string();
    }

    pub fn definir_categoria(&mut self, categoria: &str) {
        self.categoria = categoria.to_string();
    }

    /// Volta ao cardápio completo: limpa o termo e a categoria.
    pub fn limpar(&mut self) {
        *self = Self::default();
    }

    pub fn tem_termo(&self) -> bool {
        !self.termo.is_empty()
    }
}

/// Uma seção da vista filtrada: a categoria e os produtos que passaram no filtro.
#[derive(Debug, Clone, PartialEq)]
pub struct SecaoFiltrada<'a> {
    pub categoria: &'a str,
    pub produtos: Vec<&'a Produto>,
}

/// Resultado da filtragem. Categorias sem nenhum produto não aparecem.
#[derive(Debug, Clone, PartialEq)]
pub struct CardapioFiltrado<'a> {
    pub secoes: Vec<SecaoFiltrada<'a>>,
    pub total: usize,
}

impl CardapioFiltrado<'_> {
    /// Sem resultados: a vista mostra o indicador vazio e esconde o cardápio.
    pub fn vazio(&self) -> bool {
        self.total == 0
    }
}

/// Deriva a vista visível a partir do cardápio e do filtro.
///
/// Função pura: o mesmo par (cardápio, filtro) sempre produz o mesmo resultado.
/// A busca não diferencia maiúsculas e procura o termo como substring
/// do nome ou da descrição; termo vazio aceita tudo.
pub fn filtrar<'a>(cardapio: &'a Cardapio, filtro: &FiltroVista) -> CardapioFiltrado<'a> {
    let termo = filtro.termo.to_lowercase();
    let mut secoes = Vec::new();
    let mut total = 0;

    for (categoria, produtos) in cardapio {
        if filtro.categoria != TODAS && *categoria != filtro.categoria {
            continue;
        }

        let encontrados: Vec<&Produto> = produtos
            .iter()
            .filter(|p| corresponde(p, &termo))
            .collect();

        if !encontrados.is_empty() {
            total += encontrados.len();
            secoes.push(SecaoFiltrada {
                categoria: categoria.as_str(),
                produtos: encontrados,
            });
        }
    }

    CardapioFiltrado { secoes, total }
}

// `termo` já chega em minúsculas.
fn corresponde(produto: &Produto, termo: &str) -> bool {
    if termo.is_empty() {
        return true;
    }
    produto.nombre.to_lowercase().contains(termo)
        || produto
            .descripcion
            .as_deref()
            .map(|d| d.to_lowercase().contains(termo))
            .unwrap_or(false)
}
