// src/interface/terminal.rs

use crate::carta_app::{Evento, OrigemClique};
use crate::interface::acoes::{
    Alvo, ABRIR_CARRINHO, CANCELAR_NOTAS, CONFIRMAR_PEDIDO, FECHAR_CARRINHO, FECHAR_TOAST,
    FILTRAR, LIMPAR_BUSCA, MUDAR_QUANTIDADE, RECARREGAR, RESOLVER_NOTAS,
};
use crate::interface::arrasto::GestoPonteiro;
use crate::interface::vista::Tela;
use crate::cardapio::cardapio_filtro::TODAS;

pub const AJUDA: &str = "\
Comandos:
  + <id>            adicionar produto
  cat [categoria]   filtrar por categoria (sem nome: todas)
  arrastar <px>     rolar a faixa de categorias (negativo: avança)
  busca <texto>     buscar por nome ou descrição
  limpar | esc      limpar busca e filtros
  carrinho | fechar abrir / fechar o carrinho
  mais <id>         aumentar quantidade no carrinho
  menos <id>        diminuir quantidade no carrinho
  confirmar         confirmar pedido
  nota <texto>      enviar com notas
  omitir | cancelar responder o modal de notas
  x <id>            fechar notificação
  recarregar        recarregar a carta
  sair";

/// Resultado da leitura de uma linha do terminal.
#[derive(Debug)]
pub enum Comando {
    Evento(Evento),
    /// Sequência processada em ordem, como um gesto completo.
    Eventos(Vec<Evento>),
    Ajuda,
    Sair,
    /// Linha não entendida; a mensagem explica o motivo.
    Invalido(String),
}

fn clique(alvo: Alvo) -> Comando {
    Comando::Evento(Evento::Clique {
        caminho: vec![alvo],
        origem: OrigemClique::Documento,
    })
}

/// Traduz uma linha digitada no evento correspondente.
///
/// Os cliques usam os alvos da tela atual, como um toque no botão exibido.
/// Ids malformados seguem para o despachante, que simplesmente os ignora.
pub fn interpretar(linha: &str, tela: &Tela) -> Comando {
    let linha = linha.trim();
    let (comando, resto) = match linha.split_once(char::is_whitespace) {
        Some((comando, resto)) => (comando, resto.trim()),
        None => (linha, ""),
    };

    match comando.to_lowercase().as_str() {
        "" => Comando::Invalido(String::new()),
        "+" | "add" => match resto.parse::<i64>().ok().and_then(|id| tela.produto(id)) {
            Some(produto) => clique(produto.alvo_adicionar.clone()),
            None => Comando::Invalido(format!("Produto '{resto}' não está na tela")),
        },
        "cat" => {
            let nome = if resto.is_empty() { TODAS } else { resto };
            match tela.filtro(nome) {
                Some(botao) => Comando::Evento(Evento::Clique {
                    caminho: vec![Alvo::neutro(), botao.alvo.clone()],
                    origem: OrigemClique::FaixaCategorias,
                }),
                None => Comando::Invalido(format!("Categoria '{nome}' não encontrada")),
            }
        }
        "arrastar" => match resto.parse::<f64>() {
            Ok(dx) if dx.is_finite() => Comando::Eventos(vec![
                Evento::Ponteiro(GestoPonteiro::Pressionar { x: 0.0 }),
                Evento::Ponteiro(GestoPonteiro::Mover { x: dx }),
                Evento::Ponteiro(GestoPonteiro::Soltar),
            ]),
            _ => Comando::Invalido("Use: arrastar <px>".to_string()),
        },
        "busca" => Comando::Evento(Evento::BuscaAlterada(resto.to_string())),
        "limpar" => clique(Alvo::com_acao(LIMPAR_BUSCA)),
        "esc" => Comando::Evento(Evento::TeclaEscape),
        "carrinho" => clique(tela.alvo_abrir_carrinho.clone()),
        "fechar" => clique(Alvo::com_acao(FECHAR_CARRINHO)),
        "mais" => clique(Alvo::com_acao(MUDAR_QUANTIDADE).dado("id", resto).dado("delta", 1)),
        "menos" => clique(Alvo::com_acao(MUDAR_QUANTIDADE).dado("id", resto).dado("delta", -1)),
        "confirmar" => clique(Alvo::com_acao(CONFIRMAR_PEDIDO)),
        "nota" => match &tela.modal {
            Some(modal) => clique(modal.alvo_adicionar(resto)),
            None => clique(Alvo::com_acao(RESOLVER_NOTAS).dado("valor", "input").dado("texto", resto)),
        },
        "omitir" => clique(Alvo::com_acao(RESOLVER_NOTAS).dado("valor", "null")),
        "cancelar" => clique(Alvo::com_acao(CANCELAR_NOTAS)),
        "x" => clique(Alvo::com_acao(FECHAR_TOAST).dado("toast", resto)),
        "recarregar" => clique(Alvo::com_acao(RECARREGAR)),
        "ajuda" | "?" => Comando::Ajuda,
        "sair" | "q" => Comando::Sair,
        outro => Comando::Invalido(format!("Comando desconhecido: {outro}")),
    }
}
