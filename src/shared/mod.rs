// src/shared/mod.rs

// Estruturas compartilhadas entre os módulos (respostas do servidor, moeda)
pub mod shared_structs;
// Carregamento da configuração (argumentos e variáveis de ambiente)
pub mod config;
// Tipo de erro único do crate
pub mod erro;
