// src/interface/toasts.rs

use std::time::{Duration, Instant};

/// Tempo que um toast fica visível antes de recolher.
pub const DURACAO_TOAST: Duration = Duration::from_millis(3000);
/// Tempo da animação de saída antes de remover o toast.
pub const ATRASO_REMOVER_TOAST: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaseToast {
    /// Acabou de ser inserido; ganha a classe "visivel" no próximo quadro.
    Inserido,
    Visivel,
    Saindo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub mensagem: String,
    pub erro: bool,
    pub fase: FaseToast,
    criado_em: Instant,
}

/// Pilha de notificações. Nunca bloqueia nada e os toasts podem se sobrepor.
#[derive(Debug)]
pub struct Toasts {
    itens: Vec<Toast>,
    proximo_id: u64,
}

impl Default for Toasts {
    fn default() -> Self {
        Self {
            itens: Vec::new(),
            proximo_id: 1,
        }
    }
}

impl Toasts {
    pub fn mostrar(&mut self, mensagem: impl Into<String>, erro: bool, agora: Instant) -> u64 {
        let id = self.proximo_id;
        self.proximo_id += 1;
        self.itens.push(Toast {
            id,
            mensagem: mensagem.into(),
            erro,
            fase: FaseToast::Inserido,
            criado_em: agora,
        });
        id
    }

    /// Botão de fechar do toast: remove na hora.
    pub fn fechar(&mut self, id: u64) -> bool {
        let antes = self.itens.len();
        self.itens.retain(|toast| toast.id != id);
        self.itens.len() != antes
    }

    /// Avança as fases de todos os toasts. Retorna `true` se algo mudou.
    pub fn quadro(&mut self, agora: Instant) -> bool {
        let mut mudou = false;

        for toast in &mut self.itens {
            let idade = agora.saturating_duration_since(toast.criado_em);
            let fase = if idade >= DURACAO_TOAST {
                FaseToast::Saindo
            } else if toast.fase == FaseToast::Inserido {
                FaseToast::Visivel
            } else {
                toast.fase
            };
            if fase != toast.fase {
                toast.fase = fase;
                mudou = true;
            }
        }

        let antes = self.itens.len();
        self.itens.retain(|toast| {
            agora.saturating_duration_since(toast.criado_em) < DURACAO_TOAST + ATRASO_REMOVER_TOAST
        });

        mudou || self.itens.len() != antes
    }

    pub fn itens(&self) -> &[Toast] {
        &self.itens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciclo_de_vida_de_um_toast() {
        let t0 = Instant::now();
        let mut toasts = Toasts::default();
        let id = toasts.mostrar("Agua adicionado", false, t0);

        assert_eq!(toasts.itens()[0].fase, FaseToast::Inserido);
        assert!(toasts.quadro(t0 + Duration::from_millis(16)));
        assert_eq!(toasts.itens()[0].fase, FaseToast::Visivel);
        assert!(!toasts.quadro(t0 + Duration::from_millis(2999)));

        assert!(toasts.quadro(t0 + DURACAO_TOAST));
        assert_eq!(toasts.itens()[0].fase, FaseToast::Saindo);
        assert_eq!(toasts.itens()[0].id, id);

        assert!(toasts.quadro(t0 + DURACAO_TOAST + ATRASO_REMOVER_TOAST));
        assert!(toasts.itens().is_empty());
    }

    #[test]
    fn toasts_se_empilham_e_fecham_por_id() {
        let t0 = Instant::now();
        let mut toasts = Toasts::default();
        let a = toasts.mostrar("um", false, t0);
        let b = toasts.mostrar("dois", true, t0);
        assert_ne!(a, b);
        assert_eq!(toasts.itens().len(), 2);

        assert!(toasts.fechar(a));
        assert!(!toasts.fechar(a));
        assert_eq!(toasts.itens().len(), 1);
        assert!(toasts.itens()[0].erro);
    }
}
