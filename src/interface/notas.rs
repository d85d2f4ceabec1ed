// src/interface/notas.rs

use std::time::{Duration, Instant};

use futures::channel::oneshot;
use tracing::debug;

/// Tempo da animação de fechamento do modal antes de desmontá-lo.
pub const ATRASO_DESMONTAR_MODAL: Duration = Duration::from_millis(300);

/// Resposta do modal de notas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespostaNotas {
    /// "Omitir": segue com o envio sem notas (`notas: null`).
    Omitir,
    /// "Adicionar": segue com o texto digitado, que pode ser vazio.
    Adicionar(String),
    /// Modal dispensado ou substituído: o envio é abortado.
    Cancelar,
}

impl RespostaNotas {
    /// Converte a resposta nas notas do pedido; `None` quando não há envio.
    pub fn notas_do_pedido(self) -> Option<Option<String>> {
        match self {
            RespostaNotas::Omitir => Some(None),
            RespostaNotas::Adicionar(texto) => Some(Some(texto)),
            RespostaNotas::Cancelar => None,
        }
    }
}

/// Continuação pendente de uma única vaga.
///
/// `armar` entrega o receptor para quem vai esperar; `resolver` envia o valor
/// e esvazia a vaga. Armar de novo descarta o remetente anterior, e quem
/// esperava por ele recebe `Canceled`.
#[derive(Debug)]
pub struct SlotPendente<T> {
    remetente: Option<oneshot::Sender<T>>,
}

impl<T> Default for SlotPendente<T> {
    fn default() -> Self {
        Self { remetente: None }
    }
}

impl<T> SlotPendente<T> {
    pub fn armar(&mut self) -> oneshot::Receiver<T> {
        let (remetente, receptor) = oneshot::channel();
        if self.remetente.replace(remetente).is_some() {
            debug!("continuação pendente substituída");
        }
        receptor
    }

    /// Entrega o valor. Retorna `false` se não havia nada pendente
    /// ou se quem esperava já desistiu.
    pub fn resolver(&mut self, valor: T) -> bool {
        match self.remetente.take() {
            Some(remetente) => remetente.send(valor).is_ok(),
            None => false,
        }
    }

    pub fn pendente(&self) -> bool {
        self.remetente.is_some()
    }
}

/// Fase visual do modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaseModal {
    Oculto,
    /// Montado, esperando o próximo quadro para receber a classe "aberto".
    Montado,
    Aberto,
    Fechando { desmontar_em: Instant },
}

/// Modal de notas do pedido.
///
/// A resolução é imediata; a desmontagem espera a animação de fechamento.
#[derive(Debug)]
pub struct ModalNotas {
    slot: SlotPendente<RespostaNotas>,
    fase: FaseModal,
}

impl Default for ModalNotas {
    fn default() -> Self {
        Self {
            slot: SlotPendente::default(),
            fase: FaseModal::Oculto,
        }
    }
}

impl ModalNotas {
    pub fn abrir(&mut self) -> oneshot::Receiver<RespostaNotas> {
        self.fase = FaseModal::Montado;
        self.slot.armar()
    }

    pub fn resolver(&mut self, resposta: RespostaNotas, agora: Instant) -> bool {
        if matches!(self.fase, FaseModal::Montado | FaseModal::Aberto) {
            self.fase = FaseModal::Fechando {
                desmontar_em: agora + ATRASO_DESMONTAR_MODAL,
            };
        }
        self.slot.resolver(resposta)
    }

    /// Avança as transições pendentes. Retorna `true` se algo mudou.
    pub fn quadro(&mut self, agora: Instant) -> bool {
        match self.fase {
            FaseModal::Montado => {
                self.fase = FaseModal::Aberto;
                true
            }
            FaseModal::Fechando { desmontar_em } if agora >= desmontar_em => {
                self.fase = FaseModal::Oculto;
                true
            }
            _ => false,
        }
    }

    pub fn fase(&self) -> FaseModal {
        self.fase
    }

    pub fn visivel(&self) -> bool {
        self.fase != FaseModal::Oculto
    }

    pub fn aguardando(&self) -> bool {
        self.slot.pendente()
    }
}
