// src/pedidos/mod.rs

// Corpo e resposta de POST /api/pedido/{mesa}
pub mod pedido_structs;
// Máquina de estados do envio (notas -> envio -> ocioso)
pub mod pedido_fluxo;
