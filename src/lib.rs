// src/lib.rs

//! Carta digital para pedidos na mesa.
//!
//! O cliente carrega o cardápio do serviço de pedidos, deixa o cliente filtrar
//! e buscar produtos, montar um carrinho e enviar o pedido da sua mesa.
//!
//! Todo o estado fica em um único controlador, [`carta_app::CartaApp`]. Ele recebe
//! eventos (cliques, teclas, respostas da rede, quadros de animação) e devolve
//! efeitos que a [`sessao`] executa no runtime do actix.

// Importa os módulos
pub mod api;        // Módulo do cliente HTTP
pub mod cardapio;   // Módulo do cardápio e filtros
pub mod carrinho;   // Módulo do carrinho
pub mod carta_app;  // Controlador da sessão
pub mod interface;  // Módulo da interface (ações, painel, modal, toasts, vista)
pub mod pedidos;    // Módulo de pedidos
pub mod sessao;     // Laço de eventos
pub mod shared;     // Módulo shared
