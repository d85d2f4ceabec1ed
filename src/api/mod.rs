// src/api/mod.rs

// Cliente HTTP do serviço de pedidos (GET /api/menu, POST /api/pedido/{mesa})
pub mod api_cliente;
