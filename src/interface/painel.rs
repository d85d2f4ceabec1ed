// src/interface/painel.rs

use std::time::{Duration, Instant};

/// Duração da transição de fechamento do painel do carrinho.
pub const ATRASO_FECHAR_PAINEL: Duration = Duration::from_millis(300);

/// Estados do painel do carrinho.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoPainel {
    Fechado,
    /// Visível e com overlay, esperando o próximo quadro para animar.
    Abrindo,
    Aberto,
    /// Classe "aberto" já removida; o painel sai do fluxo em `ocultar_em`.
    Fechando { ocultar_em: Instant },
}

/// Classes aplicadas à vista em cada estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassesPainel {
    pub visivel: bool,
    pub aberto: bool,
    pub overlay: bool,
    pub rolagem_bloqueada: bool,
}

#[derive(Debug)]
pub struct PainelCarrinho {
    estado: EstadoPainel,
}

impl Default for PainelCarrinho {
    fn default() -> Self {
        Self {
            estado: EstadoPainel::Fechado,
        }
    }
}

impl PainelCarrinho {
    pub fn estado(&self) -> EstadoPainel {
        self.estado
    }

    /// Abre o painel em dois passos. Quem chama já conferiu que o carrinho
    /// não está vazio. Reabrir durante o fechamento cancela o fechamento.
    pub fn abrir(&mut self) -> bool {
        match self.estado {
            EstadoPainel::Fechado | EstadoPainel::Fechando { .. } => {
                self.estado = EstadoPainel::Abrindo;
                true
            }
            EstadoPainel::Abrindo | EstadoPainel::Aberto => false,
        }
    }

    pub fn fechar(&mut self, agora: Instant) -> bool {
        match self.estado {
            EstadoPainel::Abrindo | EstadoPainel::Aberto => {
                self.estado = EstadoPainel::Fechando {
                    ocultar_em: agora + ATRASO_FECHAR_PAINEL,
                };
                true
            }
            EstadoPainel::Fechado | EstadoPainel::Fechando { .. } => false,
        }
    }

    /// Avança as transições pendentes. Retorna `true` se o estado mudou.
    pub fn quadro(&mut self, agora: Instant) -> bool {
        match self.estado {
            EstadoPainel::Abrindo => {
                self.estado = EstadoPainel::Aberto;
                true
            }
            EstadoPainel::Fechando { ocultar_em } if agora >= ocultar_em => {
                self.estado = EstadoPainel::Fechado;
                true
            }
            _ => false,
        }
    }

    pub fn classes(&self) -> ClassesPainel {
        match self.estado {
            EstadoPainel::Fechado => ClassesPainel::default(),
            EstadoPainel::Abrindo | EstadoPainel::Fechando { .. } => ClassesPainel {
                visivel: true,
                aberto: false,
                overlay: true,
                rolagem_bloqueada: true,
            },
            EstadoPainel::Aberto => ClassesPainel {
                visivel: true,
                aberto: true,
                overlay: true,
                rolagem_bloqueada: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciclo_completo_de_abrir_e_fechar() {
        let t0 = Instant::now();
        let mut painel = PainelCarrinho::default();

        assert!(painel.abrir());
        assert_eq!(painel.estado(), EstadoPainel::Abrindo);
        assert!(painel.classes().visivel);
        assert!(!painel.classes().aberto);

        assert!(painel.quadro(t0));
        assert_eq!(painel.estado(), EstadoPainel::Aberto);
        assert!(painel.classes().aberto);

        assert!(painel.fechar(t0));
        let classes = painel.classes();
        assert!(!classes.aberto);
        assert!(classes.visivel && classes.overlay);

        assert!(!painel.quadro(t0 + Duration::from_millis(299)));
        assert!(painel.quadro(t0 + ATRASO_FECHAR_PAINEL));
        assert_eq!(painel.estado(), EstadoPainel::Fechado);
        assert_eq!(painel.classes(), ClassesPainel::default());
    }

    #[test]
    fn reabrir_durante_o_fechamento_cancela_o_fechamento() {
        let t0 = Instant::now();
        let mut painel = PainelCarrinho::default();
        painel.abrir();
        painel.quadro(t0);
        painel.fechar(t0);

        assert!(painel.abrir());
        painel.quadro(t0 + Duration::from_millis(10));
        painel.quadro(t0 + Duration::from_secs(1));
        assert_eq!(painel.estado(), EstadoPainel::Aberto);
    }

    #[test]
    fn fechar_um_painel_fechado_nao_faz_nada() {
        let mut painel = PainelCarrinho::default();
        assert!(!painel.fechar(Instant::now()));
        assert_eq!(painel.estado(), EstadoPainel::Fechado);
    }
}
