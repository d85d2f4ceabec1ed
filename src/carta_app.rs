// src/carta_app.rs

use std::time::{Duration, Instant};

use chrono::Local;
use futures::channel::oneshot;
use tracing::{debug, info, warn};

use crate::cardapio::cardapio_filtro::FiltroVista;
use crate::cardapio::cardapio_structs::{Cardapio, RespostaMenu};
use crate::carrinho::carrinho_structs::Carrinho;
use crate::interface::acoes::{resolver_acao, Acao, Alvo};
use crate::interface::arrasto::{GestoPonteiro, GuardaArrasto};
use crate::interface::notas::{ModalNotas, RespostaNotas};
use crate::interface::painel::PainelCarrinho;
use crate::interface::toasts::Toasts;
use crate::pedidos::pedido_fluxo::{FluxoPedido, Recusa};
use crate::pedidos::pedido_structs::{PedidoConfirmado, PedidoPendente, RespostaPedido};
use crate::shared::config::Config;
use crate::shared::erro::ErroCarta;

/// Duração do pulso de vibração ao adicionar um produto.
pub const PULSO_VIBRACAO: Duration = Duration::from_millis(40);

/// Estado do cardápio na sessão.
#[derive(Debug)]
pub enum EstadoCardapio {
    Carregando,
    Pronto {
        cardapio: Cardapio,
        categorias: Vec<String>,
    },
    /// Falha ao carregar: tela de erro com botão de recarregar.
    Falhou(String),
}

/// De onde veio o clique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrigemClique {
    Documento,
    /// Faixa horizontal de categorias: passa antes pela guarda de arrasto.
    FaixaCategorias,
    /// Fundo escurecido atrás do painel do carrinho.
    Overlay,
}

/// Tudo o que entra no controlador.
#[derive(Debug)]
pub enum Evento {
    /// Clique com o caminho de propagação, do elemento clicado para fora.
    Clique {
        caminho: Vec<Alvo>,
        origem: OrigemClique,
    },
    Acao(Acao),
    BuscaAlterada(String),
    TeclaEscape,
    Ponteiro(GestoPonteiro),
    MenuCarregado(Result<RespostaMenu, ErroCarta>),
    NotasResolvidas {
        geracao: u64,
        resposta: RespostaNotas,
    },
    PedidoRespondido(Result<RespostaPedido, ErroCarta>),
    /// Próximo quadro de animação.
    Quadro,
}

/// Trabalho que o controlador pede para a sessão executar.
#[derive(Debug)]
pub enum Efeito {
    CarregarMenu,
    /// Esperar a resposta do modal de notas da geração indicada.
    AguardarNotas {
        geracao: u64,
        resposta: oneshot::Receiver<RespostaNotas>,
    },
    EnviarPedido {
        mesa: String,
        pedido: PedidoPendente,
    },
    /// Retorno tátil; pode ser ignorado se não houver suporte.
    Vibrar(Duration),
    Redesenhar,
}

/// Controlador da carta digital: dono de todo o estado da sessão.
///
/// Cada chamada a `processar` aplica o evento por completo antes de retornar,
/// e toda mutação visível pede um `Efeito::Redesenhar` na mesma chamada.
#[derive(Debug)]
pub struct CartaApp {
    mesa: Option<String>,
    moeda_padrao: String,
    cardapio: EstadoCardapio,
    filtro: FiltroVista,
    carrinho: Carrinho,
    painel: PainelCarrinho,
    modal: ModalNotas,
    toasts: Toasts,
    fluxo: FluxoPedido,
    arrasto: GuardaArrasto,
    ultimo_pedido: Option<PedidoConfirmado>,
}

impl CartaApp {
    pub fn new(mesa: Option<String>, moeda_padrao: &str) -> Self {
        Self {
            mesa,
            moeda_padrao: moeda_padrao.to_string(),
            cardapio: EstadoCardapio::Carregando,
            filtro: FiltroVista::default(),
            carrinho: Carrinho::default(),
            painel: PainelCarrinho::default(),
            modal: ModalNotas::default(),
            toasts: Toasts::default(),
            fluxo: FluxoPedido::default(),
            arrasto: GuardaArrasto::default(),
            ultimo_pedido: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mesa.clone(), &config.moeda_padrao)
    }

    /// Início da sessão: sem mesa não há contexto de pedido e nada é carregado.
    pub fn iniciar(&mut self) -> Vec<Efeito> {
        match &self.mesa {
            Some(mesa) => {
                info!("Sessão iniciada para a mesa {mesa}");
                self.cardapio = EstadoCardapio::Carregando;
                vec![Efeito::CarregarMenu, Efeito::Redesenhar]
            }
            None => {
                warn!("Sessão sem mesa: {}", ErroCarta::MesaAusente);
                vec![Efeito::Redesenhar]
            }
        }
    }

    pub fn processar(&mut self, evento: Evento, agora: Instant) -> Vec<Efeito> {
        let mut efeitos = Vec::new();

        match evento {
            Evento::Clique { caminho, origem } => match origem {
                OrigemClique::FaixaCategorias if self.arrasto.suprimir_clique(agora) => {
                    debug!("clique na faixa de categorias barrado pelo arrasto");
                }
                OrigemClique::Overlay => {
                    self.executar(Acao::FecharCarrinho, agora, &mut efeitos);
                }
                _ => {
                    if let Some(acao) = resolver_acao(&caminho) {
                        self.executar(acao, agora, &mut efeitos);
                    }
                }
            },
            Evento::Acao(acao) => self.executar(acao, agora, &mut efeitos),
            Evento::BuscaAlterada(texto) => {
                self.filtro.definir_termo(&texto);
                efeitos.push(Efeito::Redesenhar);
            }
            Evento::TeclaEscape => {
                if self.modal.aguardando() {
                    self.executar(
                        Acao::ResolverNotas(RespostaNotas::Cancelar),
                        agora,
                        &mut efeitos,
                    );
                } else {
                    self.executar(Acao::LimparBusca, agora, &mut efeitos);
                }
            }
            Evento::Ponteiro(gesto) => {
                if self.arrasto.gesto(gesto, agora) {
                    efeitos.push(Efeito::Redesenhar);
                }
            }
            Evento::MenuCarregado(resultado) => {
                self.aplicar_menu(resultado);
                efeitos.push(Efeito::Redesenhar);
            }
            Evento::NotasResolvidas { geracao, resposta } => {
                self.notas_resolvidas(geracao, resposta, agora, &mut efeitos);
            }
            Evento::PedidoRespondido(resultado) => {
                self.pedido_respondido(resultado, agora);
                efeitos.push(Efeito::Redesenhar);
            }
            Evento::Quadro => {
                let painel = self.painel.quadro(agora);
                let modal = self.modal.quadro(agora);
                let toasts = self.toasts.quadro(agora);
                if painel || modal || toasts {
                    efeitos.push(Efeito::Redesenhar);
                }
            }
        }

        efeitos
    }

    fn executar(&mut self, acao: Acao, agora: Instant, efeitos: &mut Vec<Efeito>) {
        debug!("ação: {acao:?}");

        match acao {
            Acao::Adicionar { id, nome, preco } => {
                self.carrinho.adicionar(id, &nome, preco);
                efeitos.push(Efeito::Vibrar(PULSO_VIBRACAO));
                self.toasts.mostrar(format!("✓ {nome} adicionado"), false, agora);
                efeitos.push(Efeito::Redesenhar);
            }
            Acao::Filtrar { categoria } => {
                self.filtro.definir_categoria(&categoria);
                efeitos.push(Efeito::Redesenhar);
            }
            Acao::LimparBusca => {
                self.filtro.limpar();
                efeitos.push(Efeito::Redesenhar);
            }
            Acao::AbrirCarrinho => {
                if self.carrinho.esta_vazio() {
                    self.toasts.mostrar("Adicione produtos primeiro", false, agora);
                } else {
                    self.painel.abrir();
                }
                efeitos.push(Efeito::Redesenhar);
            }
            Acao::FecharCarrinho => {
                if self.painel.fechar(agora) {
                    efeitos.push(Efeito::Redesenhar);
                }
            }
            Acao::MudarQuantidade { id, delta } => {
                if self.carrinho.mudar_quantidade(id, delta) {
                    efeitos.push(Efeito::Redesenhar);
                }
            }
            Acao::ConfirmarPedido => match self.fluxo.solicitar(self.carrinho.esta_vazio()) {
                Ok(geracao) => {
                    let resposta = self.modal.abrir();
                    efeitos.push(Efeito::AguardarNotas { geracao, resposta });
                    efeitos.push(Efeito::Redesenhar);
                }
                Err(Recusa::CarrinhoVazio) => {
                    self.toasts.mostrar("Adicione produtos primeiro", false, agora);
                    efeitos.push(Efeito::Redesenhar);
                }
                Err(Recusa::EnvioEmAndamento) => {
                    debug!("confirmação ignorada: já existe um envio em andamento");
                }
            },
            Acao::ResolverNotas(resposta) => {
                if !self.modal.resolver(resposta, agora) {
                    debug!("nenhuma espera de notas pendente");
                }
                efeitos.push(Efeito::Redesenhar);
            }
            Acao::FecharToast { id } => {
                if self.toasts.fechar(id) {
                    efeitos.push(Efeito::Redesenhar);
                }
            }
            Acao::Recarregar => {
                efeitos.extend(self.recarregar());
            }
        }
    }

    // Recomeça a sessão do zero. O fluxo de envio é mantido para que um
    // pedido ainda em voo continue barrando envios duplicados.
    fn recarregar(&mut self) -> Vec<Efeito> {
        info!("Recarregando a carta");
        let fluxo = std::mem::take(&mut self.fluxo);
        let mesa = self.mesa.take();
        let moeda = std::mem::take(&mut self.moeda_padrao);
        *self = Self::new(mesa, &moeda);
        self.fluxo = fluxo;
        self.iniciar()
    }

    fn aplicar_menu(&mut self, resultado: Result<RespostaMenu, ErroCarta>) {
        let resposta = resultado.and_then(|resposta| {
            resposta.validar()?;
            Ok(resposta)
        });

        self.cardapio = match resposta {
            Ok(resposta) => {
                let categorias = resposta.lista_categorias();
                EstadoCardapio::Pronto {
                    cardapio: resposta.menu,
                    categorias,
                }
            }
            Err(e) => {
                warn!("Erro ao carregar o cardápio: {e}");
                EstadoCardapio::Falhou(
                    "Erro ao carregar o cardápio. Toque para recarregar.".to_string(),
                )
            }
        };
    }

    /// Continua a confirmação depois que o modal de notas respondeu.
    ///
    /// Passos:
    /// 1. Se o cliente cancelou, libera o fluxo da geração e não envia nada.
    /// 2. Confere se ainda há mesa e itens no carrinho.
    /// 3. Marca o fluxo como enviando, desde que a geração ainda seja a vigente.
    /// 4. Monta o corpo do pedido e pede à sessão o envio.
    fn notas_resolvidas(
        &mut self,
        geracao: u64,
        resposta: RespostaNotas,
        agora: Instant,
        efeitos: &mut Vec<Efeito>,
    ) {
        // 1. Cancelamento: nenhuma requisição sai
        let Some(notas) = resposta.notas_do_pedido() else {
            if self.fluxo.cancelar(geracao) {
                info!("Envio cancelado no modal de notas");
                efeitos.push(Efeito::Redesenhar);
            }
            return;
        };

        // 2. O carrinho pode ter sido esvaziado enquanto o modal estava aberto
        let mesa = match &self.mesa {
            Some(mesa) if !self.carrinho.esta_vazio() => mesa.clone(),
            _ => {
                if self.fluxo.cancelar(geracao) {
                    self.toasts.mostrar("Adicione produtos primeiro", false, agora);
                    efeitos.push(Efeito::Redesenhar);
                }
                return;
            }
        };

        // 3. Respostas de um modal já substituído não disparam envio
        if self.fluxo.iniciar_envio(geracao) {
            // 4. Só ids e quantidades: o servidor define os preços
            let pedido = PedidoPendente {
                items: self.carrinho.itens_pedido(),
                notas,
            };
            efeitos.push(Efeito::EnviarPedido { mesa, pedido });
            efeitos.push(Efeito::Redesenhar);
        }
    }

    /// Trata a resposta do envio.
    ///
    /// Passos:
    /// 1. Libera o botão de confirmar, qualquer que seja o resultado.
    /// 2. Em caso de sucesso, guarda o comprovante, avisa o cliente,
    ///    esvazia o carrinho e fecha o painel.
    /// 3. Em caso de recusa ou falha de rede, mostra o erro e mantém o
    ///    carrinho para uma nova tentativa.
    fn pedido_respondido(&mut self, resultado: Result<RespostaPedido, ErroCarta>, agora: Instant) {
        // 1. Fim do envio em andamento
        self.fluxo.concluir();

        match resultado {
            // 2. Pedido aceito pelo servidor
            Ok(resposta) if resposta.success => {
                info!("Pedido aceito: {:?}", resposta.body.pedido_id);
                self.ultimo_pedido = Some(PedidoConfirmado::da_resposta(&resposta, Local::now()));
                self.toasts.mostrar("🎉 Pedido enviado com sucesso!", false, agora);
                self.carrinho.limpar();
                self.painel.fechar(agora);
            }
            // 3. Recusa com corpo JSON: mensaje, detail ou mensagem padrão
            Ok(resposta) => {
                let mensagem = resposta.mensagem_erro();
                warn!("Pedido recusado pelo servidor: {mensagem}");
                self.toasts.mostrar(format!("❌ {mensagem}"), true, agora);
            }
            // 3. Falha de rede ou corpo ilegível
            Err(e) => {
                warn!("Falha ao enviar o pedido: {e}");
                self.toasts.mostrar(format!("❌ {e}"), true, agora);
            }
        }
    }

    /// Mensagem da tela de erro bloqueante, se a sessão estiver nela.
    pub fn erro_sessao(&self) -> Option<String> {
        if self.mesa.is_none() {
            return Some(ErroCarta::MesaAusente.to_string());
        }
        match &self.cardapio {
            EstadoCardapio::Falhou(mensagem) => Some(mensagem.clone()),
            _ => None,
        }
    }

    pub fn mesa(&self) -> Option<&str> {
        self.mesa.as_deref()
    }

    pub fn moeda_padrao(&self) -> &str {
        &self.moeda_padrao
    }

    pub fn cardapio(&self) -> &EstadoCardapio {
        &self.cardapio
    }

    pub fn filtro(&self) -> &FiltroVista {
        &self.filtro
    }

    pub fn carrinho(&self) -> &Carrinho {
        &self.carrinho
    }

    pub fn painel(&self) -> &PainelCarrinho {
        &self.painel
    }

    pub fn modal(&self) -> &ModalNotas {
        &self.modal
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn fluxo(&self) -> &FluxoPedido {
        &self.fluxo
    }

    pub fn arrasto(&self) -> &GuardaArrasto {
        &self.arrasto
    }

    pub fn ultimo_pedido(&self) -> Option<&PedidoConfirmado> {
        self.ultimo_pedido.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::acoes::{Alvo, ADICIONAR, FILTRAR};
    use crate::interface::painel::EstadoPainel;
    use crate::pedidos::pedido_fluxo::EtapaEnvio;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    const MENU: &str = r#"{
        "menu": {
            "Bebidas": [{"id": 1, "nombre": "Agua", "precio": 2.0}],
            "Postres": [{"id": 2, "nombre": "Flan", "descripcion": "Casero", "precio": 3.5}]
        },
        "categorias": ["Bebidas", "Postres"]
    }"#;

    fn app_pronto() -> CartaApp {
        let mut app = CartaApp::new(Some("4".to_string()), "$");
        app.iniciar();
        let resposta: RespostaMenu = serde_json::from_str(MENU).unwrap();
        app.processar(Evento::MenuCarregado(Ok(resposta)), Instant::now());
        app
    }

    fn adicionar(id: i64, nome: &str, preco: &str) -> Evento {
        Evento::Acao(Acao::Adicionar {
            id,
            nome: nome.to_string(),
            preco: BigDecimal::from_str(preco).unwrap(),
        })
    }

    fn espera_de_notas(efeitos: Vec<Efeito>) -> (u64, oneshot::Receiver<RespostaNotas>) {
        efeitos
            .into_iter()
            .find_map(|efeito| match efeito {
                Efeito::AguardarNotas { geracao, resposta } => Some((geracao, resposta)),
                _ => None,
            })
            .expect("esperava AguardarNotas")
    }

    fn recebida(receptor: &mut oneshot::Receiver<RespostaNotas>) -> RespostaNotas {
        match receptor.try_recv() {
            Ok(Some(resposta)) => resposta,
            Ok(None) => panic!("resposta ainda não enviada"),
            Err(_) => RespostaNotas::Cancelar,
        }
    }

    fn pedido_enviado(efeitos: &[Efeito]) -> Option<&PedidoPendente> {
        efeitos.iter().find_map(|efeito| match efeito {
            Efeito::EnviarPedido { pedido, .. } => Some(pedido),
            _ => None,
        })
    }

    fn resposta_ok() -> RespostaPedido {
        serde_json::from_str(r#"{"success": true, "pedido_id": 10, "total": 4.0}"#).unwrap()
    }

    /// Confirma e responde o modal; devolve os efeitos do evento de notas.
    fn confirmar_com(app: &mut CartaApp, resposta: RespostaNotas) -> Vec<Efeito> {
        let agora = Instant::now();
        let (geracao, mut receptor) =
            espera_de_notas(app.processar(Evento::Acao(Acao::ConfirmarPedido), agora));
        app.processar(Evento::Acao(Acao::ResolverNotas(resposta)), agora);
        let resposta = recebida(&mut receptor);
        app.processar(Evento::NotasResolvidas { geracao, resposta }, agora)
    }

    #[test]
    fn sem_mesa_nao_carrega_nada() {
        let mut app = CartaApp::new(None, "$");
        let efeitos = app.iniciar();
        assert!(!efeitos.iter().any(|e| matches!(e, Efeito::CarregarMenu)));
        assert_eq!(
            app.erro_sessao().as_deref(),
            Some("Escaneie o código QR da sua mesa")
        );
    }

    #[test]
    fn adicionar_duas_vezes_soma_na_mesma_linha() {
        let mut app = app_pronto();
        let agora = Instant::now();
        let efeitos = app.processar(adicionar(1, "Agua", "2.0"), agora);
        assert!(efeitos.iter().any(|e| matches!(e, Efeito::Vibrar(_))));
        assert!(efeitos.iter().any(|e| matches!(e, Efeito::Redesenhar)));
        app.processar(adicionar(1, "Agua", "2.0"), agora);

        assert_eq!(app.carrinho().itens().len(), 1);
        assert_eq!(app.carrinho().itens()[0].quantidade, 2);
        assert_eq!(app.carrinho().total_preco().with_scale(2).to_string(), "4.00");
        assert_eq!(app.toasts().itens().len(), 2);
        assert_eq!(app.toasts().itens()[0].mensagem, "✓ Agua adicionado");
    }

    #[test]
    fn confirmar_com_carrinho_vazio_mostra_aviso_e_nao_envia() {
        let mut app = app_pronto();
        let efeitos = app.processar(Evento::Acao(Acao::ConfirmarPedido), Instant::now());
        assert!(!efeitos
            .iter()
            .any(|e| matches!(e, Efeito::AguardarNotas { .. } | Efeito::EnviarPedido { .. })));
        assert_eq!(app.toasts().itens()[0].mensagem, "Adicione produtos primeiro");
        assert!(!app.toasts().itens()[0].erro);
        assert_eq!(app.fluxo().etapa(), EtapaEnvio::Ocioso);
    }

    #[test]
    fn omitir_notas_envia_com_notas_nulas() {
        let mut app = app_pronto();
        app.processar(adicionar(1, "Agua", "2.0"), Instant::now());

        let efeitos = confirmar_com(&mut app, RespostaNotas::Omitir);
        let pedido = pedido_enviado(&efeitos).expect("pedido deveria ser enviado");
        assert_eq!(pedido.notas, None);
        assert_eq!(pedido.items.len(), 1);
        assert_eq!(pedido.items[0].producto_id, 1);
        assert!(app.fluxo().ocupado());
        assert_eq!(app.fluxo().rotulo_botao(), "Enviando...");
    }

    #[test]
    fn texto_das_notas_vai_no_pedido() {
        let mut app = app_pronto();
        app.processar(adicionar(2, "Flan", "3.5"), Instant::now());
        let efeitos = confirmar_com(&mut app, RespostaNotas::Adicionar("sin azúcar".into()));
        assert_eq!(
            pedido_enviado(&efeitos).and_then(|p| p.notas.as_deref()),
            Some("sin azúcar")
        );
    }

    #[test]
    fn cancelar_o_modal_aborta_sem_enviar() {
        let mut app = app_pronto();
        app.processar(adicionar(1, "Agua", "2.0"), Instant::now());
        let efeitos = confirmar_com(&mut app, RespostaNotas::Cancelar);
        assert!(pedido_enviado(&efeitos).is_none());
        assert_eq!(app.fluxo().etapa(), EtapaEnvio::Ocioso);
        assert_eq!(app.carrinho().total_itens(), 1);
    }

    #[test]
    fn segunda_confirmacao_durante_o_envio_e_ignorada() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(adicionar(1, "Agua", "2.0"), agora);
        let efeitos = confirmar_com(&mut app, RespostaNotas::Omitir);
        assert!(pedido_enviado(&efeitos).is_some());

        let efeitos = app.processar(Evento::Acao(Acao::ConfirmarPedido), agora);
        assert!(efeitos.is_empty());

        // edições do carrinho continuam permitidas durante o envio
        app.processar(adicionar(2, "Flan", "3.5"), agora);
        assert_eq!(app.carrinho().total_itens(), 2);
    }

    #[test]
    fn sucesso_limpa_o_carrinho_e_fecha_o_painel() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(adicionar(1, "Agua", "2.0"), agora);
        app.processar(Evento::Acao(Acao::AbrirCarrinho), agora);
        app.processar(Evento::Quadro, agora);
        assert_eq!(app.painel().estado(), EstadoPainel::Aberto);

        confirmar_com(&mut app, RespostaNotas::Omitir);
        app.processar(Evento::PedidoRespondido(Ok(resposta_ok())), agora);

        assert!(app.carrinho().esta_vazio());
        assert!(!app.fluxo().ocupado());
        assert!(matches!(app.painel().estado(), EstadoPainel::Fechando { .. }));
        assert_eq!(app.ultimo_pedido().and_then(|p| p.pedido_id), Some(10));
        assert!(app
            .toasts()
            .itens()
            .iter()
            .any(|t| t.mensagem == "🎉 Pedido enviado com sucesso!"));
    }

    #[test]
    fn falha_mantem_o_carrinho_e_mostra_a_mensagem_do_servidor() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(adicionar(1, "Agua", "2.0"), agora);
        confirmar_com(&mut app, RespostaNotas::Omitir);

        let recusa: RespostaPedido =
            serde_json::from_str(r#"{"detail": "Mesa no encontrada o inactiva"}"#).unwrap();
        app.processar(Evento::PedidoRespondido(Ok(recusa)), agora);

        assert_eq!(app.carrinho().total_itens(), 1);
        assert!(!app.fluxo().ocupado());
        assert_eq!(app.fluxo().rotulo_botao(), "Confirmar Pedido");
        let ultimo = app.toasts().itens().last().unwrap();
        assert!(ultimo.erro);
        assert_eq!(ultimo.mensagem, "❌ Mesa no encontrada o inactiva");

        app.processar(
            Evento::PedidoRespondido(Err(ErroCarta::Status(502))),
            agora,
        );
        assert_eq!(app.carrinho().total_itens(), 1);
    }

    #[test]
    fn nova_confirmacao_substitui_o_modal_anterior() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(adicionar(1, "Agua", "2.0"), agora);

        let (antiga, mut receptor_antigo) =
            espera_de_notas(app.processar(Evento::Acao(Acao::ConfirmarPedido), agora));
        let (atual, mut receptor_atual) =
            espera_de_notas(app.processar(Evento::Acao(Acao::ConfirmarPedido), agora));

        // a espera antiga foi cancelada e não derruba a atual
        let resposta = recebida(&mut receptor_antigo);
        assert_eq!(resposta, RespostaNotas::Cancelar);
        app.processar(Evento::NotasResolvidas { geracao: antiga, resposta }, agora);
        assert_eq!(app.fluxo().etapa(), EtapaEnvio::AguardandoNotas { geracao: atual });

        app.processar(Evento::Acao(Acao::ResolverNotas(RespostaNotas::Omitir)), agora);
        let resposta = recebida(&mut receptor_atual);
        let efeitos = app.processar(Evento::NotasResolvidas { geracao: atual, resposta }, agora);
        assert!(pedido_enviado(&efeitos).is_some());
    }

    #[test]
    fn carrinho_esvaziado_com_o_modal_aberto_nao_envia() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(adicionar(1, "Agua", "2.0"), agora);
        let (geracao, mut receptor) =
            espera_de_notas(app.processar(Evento::Acao(Acao::ConfirmarPedido), agora));
        app.processar(Evento::Acao(Acao::MudarQuantidade { id: 1, delta: -1 }), agora);
        app.processar(Evento::Acao(Acao::ResolverNotas(RespostaNotas::Omitir)), agora);
        let resposta = recebida(&mut receptor);
        let efeitos = app.processar(Evento::NotasResolvidas { geracao, resposta }, agora);
        assert!(pedido_enviado(&efeitos).is_none());
        assert_eq!(app.fluxo().etapa(), EtapaEnvio::Ocioso);
    }

    #[test]
    fn escape_com_modal_aberto_cancela_as_notas() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(adicionar(1, "Agua", "2.0"), agora);
        let (_, mut receptor) =
            espera_de_notas(app.processar(Evento::Acao(Acao::ConfirmarPedido), agora));
        app.processar(Evento::TeclaEscape, agora);
        assert_eq!(recebida(&mut receptor), RespostaNotas::Cancelar);
    }

    #[test]
    fn abrir_carrinho_vazio_fica_fechado() {
        let mut app = app_pronto();
        app.processar(Evento::Acao(Acao::AbrirCarrinho), Instant::now());
        assert_eq!(app.painel().estado(), EstadoPainel::Fechado);
        assert_eq!(app.toasts().itens().len(), 1);
    }

    #[test]
    fn clique_no_overlay_fecha_o_carrinho() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(adicionar(1, "Agua", "2.0"), agora);
        app.processar(Evento::Acao(Acao::AbrirCarrinho), agora);
        app.processar(
            Evento::Clique {
                caminho: vec![Alvo::neutro()],
                origem: OrigemClique::Overlay,
            },
            agora,
        );
        assert!(matches!(app.painel().estado(), EstadoPainel::Fechando { .. }));
    }

    #[test]
    fn clique_apos_arrasto_na_faixa_nao_filtra() {
        let mut app = app_pronto();
        let agora = Instant::now();
        let filtro = Alvo::com_acao(FILTRAR).dado("categoria", "Postres");

        app.processar(Evento::Ponteiro(GestoPonteiro::Pressionar { x: 100.0 }), agora);
        app.processar(Evento::Ponteiro(GestoPonteiro::Mover { x: 40.0 }), agora);
        app.processar(Evento::Ponteiro(GestoPonteiro::Soltar), agora);
        app.processar(
            Evento::Clique {
                caminho: vec![filtro.clone()],
                origem: OrigemClique::FaixaCategorias,
            },
            agora,
        );
        assert_eq!(app.filtro().categoria, "Todas");
        assert_eq!(app.arrasto().rolagem(), 90.0);

        // um toque curto depois funciona
        let depois = agora + Duration::from_millis(500);
        app.processar(Evento::Ponteiro(GestoPonteiro::Pressionar { x: 10.0 }), depois);
        app.processar(Evento::Ponteiro(GestoPonteiro::Soltar), depois);
        app.processar(
            Evento::Clique {
                caminho: vec![filtro],
                origem: OrigemClique::FaixaCategorias,
            },
            depois,
        );
        assert_eq!(app.filtro().categoria, "Postres");
    }

    #[test]
    fn clique_com_dados_malformados_e_ignorado() {
        let mut app = app_pronto();
        let efeitos = app.processar(
            Evento::Clique {
                caminho: vec![Alvo::com_acao(ADICIONAR).dado("id", "um").dado("preco", "2")],
                origem: OrigemClique::Documento,
            },
            Instant::now(),
        );
        assert!(efeitos.is_empty());
        assert!(app.carrinho().esta_vazio());
    }

    #[test]
    fn busca_e_limpeza() {
        let mut app = app_pronto();
        let agora = Instant::now();
        app.processar(Evento::Acao(Acao::Filtrar { categoria: "Postres".into() }), agora);
        app.processar(Evento::BuscaAlterada("  fla ".into()), agora);
        assert_eq!(app.filtro().termo, "fla");

        app.processar(Evento::TeclaEscape, agora);
        assert_eq!(app.filtro(), &FiltroVista::default());
    }

    #[test]
    fn falha_no_menu_vira_erro_de_sessao_e_recarregar_tenta_de_novo() {
        let mut app = CartaApp::new(Some("4".to_string()), "$");
        app.iniciar();
        app.processar(Evento::MenuCarregado(Err(ErroCarta::Status(500))), Instant::now());
        assert!(app.erro_sessao().is_some());

        let efeitos = app.processar(Evento::Acao(Acao::Recarregar), Instant::now());
        assert!(efeitos.iter().any(|e| matches!(e, Efeito::CarregarMenu)));
        assert!(matches!(app.cardapio(), EstadoCardapio::Carregando));
        assert!(app.erro_sessao().is_none());
    }

    #[test]
    fn cardapio_invalido_nao_e_aplicado() {
        let mut app = CartaApp::new(Some("4".to_string()), "$");
        app.iniciar();
        let resposta: RespostaMenu = serde_json::from_str(
            r#"{"menu": {"X": [{"id": 1, "nombre": "A", "precio": -3}]}}"#,
        )
        .unwrap();
        app.processar(Evento::MenuCarregado(Ok(resposta)), Instant::now());
        assert!(matches!(app.cardapio(), EstadoCardapio::Falhou(_)));
    }
}
