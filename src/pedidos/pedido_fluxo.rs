// src/pedidos/pedido_fluxo.rs

use tracing::debug;

/// Etapa do envio do pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtapaEnvio {
    Ocioso,
    /// Esperando a resposta do modal de notas da geração indicada.
    AguardandoNotas { geracao: u64 },
    Enviando,
}

/// Motivo pelo qual uma confirmação foi recusada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recusa {
    CarrinhoVazio,
    EnvioEmAndamento,
}

/// Controla o fluxo ocioso -> aguardando notas -> enviando -> ocioso.
///
/// A flag `ocupado` garante um único envio por vez; edições do carrinho
/// continuam permitidas enquanto ela está ligada.
#[derive(Debug)]
pub struct FluxoPedido {
    etapa: EtapaEnvio,
    ocupado: bool,
    proxima_geracao: u64,
}

impl Default for FluxoPedido {
    fn default() -> Self {
        Self {
            etapa: EtapaEnvio::Ocioso,
            ocupado: false,
            proxima_geracao: 1,
        }
    }
}

impl FluxoPedido {
    pub fn etapa(&self) -> EtapaEnvio {
        self.etapa
    }

    pub fn ocupado(&self) -> bool {
        self.ocupado
    }

    /// Pedido de confirmação. Se aceito, devolve a geração do modal de notas
    /// que deve ser aberto; uma confirmação durante a espera das notas
    /// substitui a espera anterior.
    pub fn solicitar(&mut self, carrinho_vazio: bool) -> Result<u64, Recusa> {
        if self.ocupado {
            return Err(Recusa::EnvioEmAndamento);
        }
        if carrinho_vazio {
            return Err(Recusa::CarrinhoVazio);
        }

        let geracao = self.proxima_geracao;
        self.proxima_geracao += 1;
        self.etapa = EtapaEnvio::AguardandoNotas { geracao };
        Ok(geracao)
    }

    /// As notas da geração `geracao` chegaram e o envio deve começar.
    /// Respostas de gerações antigas são ignoradas.
    pub fn iniciar_envio(&mut self, geracao: u64) -> bool {
        match self.etapa {
            EtapaEnvio::AguardandoNotas { geracao: atual } if atual == geracao => {
                self.etapa = EtapaEnvio::Enviando;
                self.ocupado = true;
                true
            }
            outra => {
                debug!("notas da geração {geracao} ignoradas na etapa {outra:?}");
                false
            }
        }
    }

    /// O usuário desistiu no modal: volta a ficar ocioso sem enviar nada.
    pub fn cancelar(&mut self, geracao: u64) -> bool {
        match self.etapa {
            EtapaEnvio::AguardandoNotas { geracao: atual } if atual == geracao => {
                self.etapa = EtapaEnvio::Ocioso;
                true
            }
            _ => false,
        }
    }

    /// Fim do envio, com sucesso ou falha. Sempre libera o botão.
    pub fn concluir(&mut self) {
        self.etapa = EtapaEnvio::Ocioso;
        self.ocupado = false;
    }

    pub fn rotulo_botao(&self) -> &'static str {
        if self.ocupado {
            "Enviando..."
        } else {
            "Confirmar Pedido"
        }
    }

    pub fn botao_desabilitado(&self) -> bool {
        self.ocupado
    }
}
