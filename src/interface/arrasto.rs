// src/interface/arrasto.rs

use std::time::{Duration, Instant};

/// Deslocamento mínimo, em pixels, para um toque virar arrasto.
pub const LIMIAR_ARRASTO_PX: f64 = 5.0;
/// Um toque segurado por mais tempo que isso não conta como clique.
pub const LIMIAR_TOQUE_LONGO: Duration = Duration::from_millis(200);
/// A rolagem anda mais rápido que o dedo.
pub const MULTIPLICADOR_ROLAGEM: f64 = 1.5;
/// Depois de soltar, o arrasto continua valendo por este tempo para
/// barrar o clique disparado pelo próprio soltar.
pub const JANELA_POS_SOLTAR: Duration = Duration::from_millis(10);

/// Eventos de ponteiro (mouse ou toque) sobre a faixa de categorias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestoPonteiro {
    Pressionar { x: f64 },
    Mover { x: f64 },
    Soltar,
    Sair,
}

/// Distingue "tocar para filtrar" de "arrastar para rolar" na faixa de
/// categorias horizontal, e mantém o deslocamento da rolagem.
#[derive(Debug, Default)]
pub struct GuardaArrasto {
    pressionado: bool,
    arrastando: bool,
    inicio_x: f64,
    rolagem_inicial: f64,
    rolagem: f64,
    pressionado_em: Option<Instant>,
    solto_em: Option<Instant>,
}

impl GuardaArrasto {
    /// Aplica um gesto. Retorna `true` quando a rolagem mudou.
    pub fn gesto(&mut self, gesto: GestoPonteiro, agora: Instant) -> bool {
        match gesto {
            GestoPonteiro::Pressionar { x } => {
                self.pressionado = true;
                self.arrastando = false;
                self.inicio_x = x;
                self.rolagem_inicial = self.rolagem;
                self.pressionado_em = Some(agora);
                self.solto_em = None;
                false
            }
            GestoPonteiro::Mover { x } => {
                if !self.pressionado {
                    return false;
                }
                let deslocamento = x - self.inicio_x;
                if deslocamento.abs() > LIMIAR_ARRASTO_PX {
                    self.arrastando = true;
                }
                let nova = (self.rolagem_inicial - deslocamento * MULTIPLICADOR_ROLAGEM).max(0.0);
                let mudou = nova != self.rolagem;
                self.rolagem = nova;
                mudou
            }
            GestoPonteiro::Soltar | GestoPonteiro::Sair => {
                if self.pressionado {
                    self.pressionado = false;
                    self.solto_em = Some(agora);
                }
                false
            }
        }
    }

    /// Decide se um clique na faixa deve ser barrado antes de chegar ao
    /// despachante: houve arrasto, ou o toque durou mais que o limite.
    pub fn suprimir_clique(&self, agora: Instant) -> bool {
        let arrasto_vigente = self.arrastando
            && match self.solto_em {
                Some(solto) => agora.saturating_duration_since(solto) < JANELA_POS_SOLTAR,
                None => true,
            };

        let toque_longo = self
            .pressionado_em
            .map(|inicio| agora.saturating_duration_since(inicio) > LIMIAR_TOQUE_LONGO)
            .unwrap_or(false);

        arrasto_vigente || toque_longo
    }

    pub fn rolagem(&self) -> f64 {
        self.rolagem
    }
}
