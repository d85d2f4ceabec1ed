// src/interface/mod.rs

// Tabela de ações e despachante de cliques
pub mod acoes;
// Guarda de arrasto da faixa de categorias
pub mod arrasto;
// Modal de notas e a continuação pendente de uma vaga
pub mod notas;
// Máquina de estados do painel do carrinho
pub mod painel;
// Notificações temporárias
pub mod toasts;
// Modelo da tela e sua renderização em texto
pub mod vista;
// Leitura de comandos digitados
pub mod terminal;
