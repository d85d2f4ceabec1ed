// src/sessao.rs

use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use actix_web::rt;
use futures::channel::mpsc::{self, UnboundedSender};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::api::api_cliente::ApiCarta;
use crate::carta_app::{CartaApp, Efeito, Evento};
use crate::interface::notas::RespostaNotas;
use crate::interface::terminal::{interpretar, Comando, AJUDA};
use crate::interface::vista::Tela;
use crate::shared::config::Config;

/// Mensagens que chegam ao laço da sessão.
#[derive(Debug)]
pub enum Mensagem {
    /// Linha digitada no terminal, ainda não interpretada.
    Linha(String),
    Evento(Evento),
    /// Fim da entrada padrão.
    Fim,
}

/// Executa um efeito assíncrono até o fim e devolve o evento de conclusão.
///
/// Efeitos síncronos (`Vibrar`, `Redesenhar`) não geram evento.
pub async fn resolver_efeito<A: ApiCarta>(api: &A, efeito: Efeito) -> Option<Evento> {
    match efeito {
        Efeito::CarregarMenu => Some(Evento::MenuCarregado(api.buscar_menu().await)),
        Efeito::AguardarNotas { geracao, resposta } => {
            // Remetente descartado: o modal foi substituído ou a sessão recomeçou
            let resposta = resposta.await.unwrap_or(RespostaNotas::Cancelar);
            Some(Evento::NotasResolvidas { geracao, resposta })
        }
        Efeito::EnviarPedido { mesa, pedido } => Some(Evento::PedidoRespondido(
            api.enviar_pedido(&mesa, &pedido).await,
        )),
        Efeito::Vibrar(_) | Efeito::Redesenhar => None,
    }
}

/// Laço principal: um único controlador, eventos processados em ordem de chegada.
///
/// As chamadas de rede e a espera das notas rodam em tarefas do runtime
/// e voltam para o laço como eventos. Os gestos de ponteiro da faixa de
/// categorias chegam pelo comando `arrastar` do terminal.
///
/// Quando a entrada termina com um pedido em voo, o laço continua até a
/// resposta chegar e ser exibida.
pub async fn executar<A: ApiCarta + 'static>(config: Config, api: A) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded::<Mensagem>();
    let api = Rc::new(api);

    ler_entrada(tx.clone());
    agendar_quadros(tx.clone(), config.intervalo_quadro);

    let mut app = CartaApp::from_config(&config);
    let mut tela = Tela::montar(&app);
    let mut ultima_saida = String::new();
    let mut entrada_encerrada = false;

    println!("{AJUDA}\n");
    let efeitos = app.iniciar();
    aplicar(efeitos, &api, &tx);
    redesenhar(&app, &mut tela, &mut ultima_saida)?;

    while let Some(mensagem) = rx.next().await {
        let eventos = match mensagem {
            Mensagem::Linha(linha) => match interpretar(&linha, &tela) {
                Comando::Evento(evento) => vec![evento],
                Comando::Eventos(eventos) => eventos,
                Comando::Ajuda => {
                    println!("{AJUDA}");
                    continue;
                }
                Comando::Invalido(motivo) => {
                    if !motivo.is_empty() {
                        println!("{motivo} (digite 'ajuda')");
                    }
                    continue;
                }
                Comando::Sair => break,
            },
            Mensagem::Evento(evento) => vec![evento],
            Mensagem::Fim => {
                if pode_encerrar(&app) {
                    break;
                }
                info!("Entrada encerrada; aguardando a resposta do pedido em andamento");
                entrada_encerrada = true;
                continue;
            }
        };

        let mut mudou = false;
        for evento in eventos {
            let efeitos = app.processar(evento, Instant::now());
            mudou |= aplicar(efeitos, &api, &tx);
        }
        if mudou {
            redesenhar(&app, &mut tela, &mut ultima_saida)?;
        }

        if entrada_encerrada && pode_encerrar(&app) {
            break;
        }
    }

    info!("Sessão encerrada");
    Ok(())
}

// A sessão só termina sem um envio em andamento.
fn pode_encerrar(app: &CartaApp) -> bool {
    !app.fluxo().ocupado()
}

// Dispara os efeitos; retorna `true` se algum pediu redesenho.
fn aplicar<A: ApiCarta + 'static>(
    efeitos: Vec<Efeito>,
    api: &Rc<A>,
    tx: &UnboundedSender<Mensagem>,
) -> bool {
    let mut redesenhar = false;

    for efeito in efeitos {
        match efeito {
            Efeito::Redesenhar => redesenhar = true,
            Efeito::Vibrar(duracao) => {
                debug!("vibração de {duracao:?}");
                // Retorno tátil no terminal: o sino; falhas são ignoradas
                let mut saida = io::stdout();
                let _ = saida.write_all(b"\x07").and_then(|_| saida.flush());
            }
            efeito => {
                let api = Rc::clone(api);
                let tx = tx.clone();
                rt::spawn(async move {
                    if let Some(evento) = resolver_efeito(&*api, efeito).await {
                        if tx.unbounded_send(Mensagem::Evento(evento)).is_err() {
                            warn!("sessão encerrada antes da conclusão de um efeito");
                        }
                    }
                });
            }
        }
    }

    redesenhar
}

fn redesenhar(app: &CartaApp, tela: &mut Tela, ultima_saida: &mut String) -> io::Result<()> {
    *tela = Tela::montar(app);
    let saida = tela.to_string();

    // Quadros de animação sem mudança visível no terminal não reimprimem a tela
    if saida != *ultima_saida {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "\n{saida}")?;
        stdout.flush()?;
        *ultima_saida = saida;
    }
    Ok(())
}

fn ler_entrada(tx: UnboundedSender<Mensagem>) {
    thread::spawn(move || {
        for linha in io::stdin().lock().lines() {
            let Ok(linha) = linha else { break };
            if tx.unbounded_send(Mensagem::Linha(linha)).is_err() {
                return;
            }
        }
        let _ = tx.unbounded_send(Mensagem::Fim);
    });
}

fn agendar_quadros(tx: UnboundedSender<Mensagem>, periodo: Duration) {
    rt::spawn(async move {
        let mut intervalo = rt::time::interval(periodo);
        loop {
            intervalo.tick().await;
            if tx.unbounded_send(Mensagem::Evento(Evento::Quadro)).is_err() {
                break;
            }
        }
    });
}
