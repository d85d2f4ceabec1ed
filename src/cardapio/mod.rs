// src/cardapio/mod.rs

// Estruturas do cardápio recebido de GET /api/menu
pub mod cardapio_structs;
// Derivação pura da vista filtrada (categoria + busca)
pub mod cardapio_filtro;
