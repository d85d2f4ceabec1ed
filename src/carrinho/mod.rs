// src/carrinho/mod.rs

// Carrinho em memória e seus totais
pub mod carrinho_structs;
