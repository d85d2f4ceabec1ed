// src/interface/vista.rs

use std::fmt;

use crate::cardapio::cardapio_filtro::{filtrar, TODAS};
use crate::cardapio::cardapio_structs::Produto;
use crate::carta_app::{CartaApp, EstadoCardapio};
use crate::interface::acoes::{
    Alvo, ABRIR_CARRINHO, ADICIONAR, CANCELAR_NOTAS, CONFIRMAR_PEDIDO, FECHAR_CARRINHO,
    FECHAR_TOAST, FILTRAR, LIMPAR_BUSCA, MUDAR_QUANTIDADE, RECARREGAR, RESOLVER_NOTAS,
};
use crate::interface::notas::FaseModal;
use crate::interface::toasts::FaseToast;
use crate::shared::shared_structs::formatar_preco;

/// Largura aproximada de uma coluna do terminal, para converter a rolagem
/// da faixa de categorias em caracteres.
pub const LARGURA_COLUNA_PX: f64 = 8.0;

/// Emoji exibido ao lado de cada categoria conhecida.
pub fn emoji_categoria(categoria: &str) -> &'static str {
    match categoria {
        "Entrantes" | "Entradas" | "Aperitivos" => "🥗",
        "Principales" | "Platos Fuertes" => "🍽️",
        "Carnes" => "🥩",
        "Postres" | "Dulces" => "🍰",
        "Bebidas" | "Bebida" | "Refrescos" => "🥤",
        "Café" | "Cafeteria" => "☕",
        "Desayunos" => "🍳",
        "Almuerzos" => "🍛",
        "Cenas" => "🌙",
        "Snack" | "Snacks" => "🍿",
        "General" | "Otros" => "🍴",
        _ => "🍽️",
    }
}

/// Remove caracteres de controle de textos vindos do servidor, para que
/// nomes e descrições não injetem sequências de escape no terminal.
pub fn texto_seguro(texto: &str) -> String {
    texto.chars().filter(|c| !c.is_control()).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotaoFiltro {
    pub rotulo: String,
    pub categoria: String,
    pub ativo: bool,
    pub alvo: Alvo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProdutoVista {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: String,
    pub imagem: Option<String>,
    pub alvo_adicionar: Alvo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecaoVista {
    pub titulo: String,
    pub quantidade: usize,
    pub produtos: Vec<ProdutoVista>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Corpo {
    Carregando,
    /// Tela bloqueante: mesa ausente ou cardápio indisponível.
    ErroFatal { mensagem: String, alvo_recarregar: Alvo },
    SemResultados { alvo_limpar: Alvo },
    Cardapio(Vec<SecaoVista>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinhaVista {
    pub id: i64,
    pub nome: String,
    pub preco_unitario: String,
    pub quantidade: i32,
    pub alvo_menos: Alvo,
    pub alvo_mais: Alvo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PainelVista {
    pub aberto: bool,
    pub linhas: Vec<LinhaVista>,
    pub total: String,
    pub rotulo_botao: &'static str,
    pub botao_desabilitado: bool,
    pub alvo_confirmar: Alvo,
    pub alvo_fechar: Alvo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalVista {
    pub aberto: bool,
    pub alvo_omitir: Alvo,
    pub alvo_cancelar: Alvo,
}

impl ModalVista {
    /// Alvo do botão "Adicionar", com o conteúdo atual da caixa de texto.
    pub fn alvo_adicionar(&self, texto: &str) -> Alvo {
        Alvo::com_acao(RESOLVER_NOTAS)
            .dado("valor", "input")
            .dado("texto", texto)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastVista {
    pub id: u64,
    pub mensagem: String,
    pub erro: bool,
    pub visivel: bool,
    pub alvo_fechar: Alvo,
}

/// Modelo da tela inteira, derivado do estado do controlador.
#[derive(Debug, Clone, PartialEq)]
pub struct Tela {
    pub mesa: String,
    pub ultimo_pedido: Option<String>,
    pub busca: String,
    pub botao_limpar_visivel: bool,
    pub filtros: Vec<BotaoFiltro>,
    /// Colunas escondidas à esquerda da faixa de categorias.
    pub deslocamento_filtros: usize,
    pub corpo: Corpo,
    pub contador: i64,
    pub alvo_abrir_carrinho: Alvo,
    pub painel: Option<PainelVista>,
    pub modal: Option<ModalVista>,
    pub toasts: Vec<ToastVista>,
}

impl Tela {
    pub fn montar(app: &CartaApp) -> Self {
        let moeda = app.moeda_padrao();

        Tela {
            mesa: app.mesa().map(texto_seguro).unwrap_or_else(|| "-".to_string()),
            ultimo_pedido: app.ultimo_pedido().map(|pedido| {
                let numero = pedido
                    .pedido_id
                    .map(|id| format!(" #{id}"))
                    .unwrap_or_default();
                let total = pedido
                    .total
                    .as_ref()
                    .map(|total| {
                        let moeda = pedido.moeda.as_deref().unwrap_or(moeda);
                        format!(" ({})", formatar_preco(total, &texto_seguro(moeda)))
                    })
                    .unwrap_or_default();
                format!(
                    "Pedido{numero} enviado às {}{total}",
                    pedido.enviado_em.format("%H:%M")
                )
            }),
            busca: texto_seguro(&app.filtro().termo),
            botao_limpar_visivel: app.filtro().tem_termo(),
            filtros: montar_filtros(app),
            deslocamento_filtros: (app.arrasto().rolagem() / LARGURA_COLUNA_PX) as usize,
            corpo: montar_corpo(app),
            contador: app.carrinho().total_itens(),
            alvo_abrir_carrinho: Alvo::com_acao(ABRIR_CARRINHO),
            painel: montar_painel(app),
            modal: montar_modal(app),
            toasts: app
                .toasts()
                .itens()
                .iter()
                .map(|toast| ToastVista {
                    id: toast.id,
                    mensagem: texto_seguro(&toast.mensagem),
                    erro: toast.erro,
                    visivel: toast.fase == FaseToast::Visivel,
                    alvo_fechar: Alvo::com_acao(FECHAR_TOAST).dado("toast", toast.id),
                })
                .collect(),
        }
    }

    /// Produto visível com o id informado.
    pub fn produto(&self, id: i64) -> Option<&ProdutoVista> {
        match &self.corpo {
            Corpo::Cardapio(secoes) => secoes
                .iter()
                .flat_map(|secao| secao.produtos.iter())
                .find(|produto| produto.id == id),
            _ => None,
        }
    }

    /// Botão de filtro cuja categoria bate com o nome (sem diferenciar maiúsculas).
    pub fn filtro(&self, nome: &str) -> Option<&BotaoFiltro> {
        self.filtros
            .iter()
            .find(|botao| botao.categoria.to_lowercase() == nome.to_lowercase())
    }
}

fn montar_filtros(app: &CartaApp) -> Vec<BotaoFiltro> {
    let EstadoCardapio::Pronto { categorias, .. } = app.cardapio() else {
        return Vec::new();
    };

    let ativa = &app.filtro().categoria;
    let botao = |categoria: &str, rotulo: String| BotaoFiltro {
        rotulo,
        categoria: categoria.to_string(),
        ativo: categoria == ativa,
        alvo: Alvo::com_acao(FILTRAR).dado("categoria", categoria),
    };

    std::iter::once(botao(TODAS, format!("🍽️ {TODAS}")))
        .chain(categorias.iter().map(|categoria| {
            botao(
                categoria,
                format!("{} {}", emoji_categoria(categoria), texto_seguro(categoria)),
            )
        }))
        .collect()
}

fn montar_corpo(app: &CartaApp) -> Corpo {
    if let Some(mensagem) = app.erro_sessao() {
        return Corpo::ErroFatal {
            mensagem,
            alvo_recarregar: Alvo::com_acao(RECARREGAR),
        };
    }

    let cardapio = match app.cardapio() {
        EstadoCardapio::Carregando => return Corpo::Carregando,
        EstadoCardapio::Pronto { cardapio, .. } => cardapio,
        EstadoCardapio::Falhou(mensagem) => {
            return Corpo::ErroFatal {
                mensagem: mensagem.clone(),
                alvo_recarregar: Alvo::com_acao(RECARREGAR),
            }
        }
    };

    let filtrado = filtrar(cardapio, app.filtro());
    if filtrado.vazio() {
        return Corpo::SemResultados {
            alvo_limpar: Alvo::com_acao(LIMPAR_BUSCA),
        };
    }

    let secoes = filtrado
        .secoes
        .iter()
        .map(|secao| SecaoVista {
            titulo: format!(
                "{} {}",
                emoji_categoria(secao.categoria),
                texto_seguro(secao.categoria)
            ),
            quantidade: secao.produtos.len(),
            produtos: secao
                .produtos
                .iter()
                .map(|produto| produto_vista(produto, app.moeda_padrao()))
                .collect(),
        })
        .collect();

    Corpo::Cardapio(secoes)
}

fn produto_vista(produto: &Produto, moeda_padrao: &str) -> ProdutoVista {
    ProdutoVista {
        id: produto.id,
        nome: texto_seguro(&produto.nombre),
        descricao: produto.descripcion.as_deref().map(texto_seguro),
        preco: formatar_preco(&produto.precio, &texto_seguro(produto.moeda(moeda_padrao))),
        imagem: produto.imagen.clone(),
        // O alvo leva o nome original: é dado, não texto exibido
        alvo_adicionar: Alvo::com_acao(ADICIONAR)
            .dado("id", produto.id)
            .dado("nome", &produto.nombre)
            .dado("preco", &produto.precio),
    }
}

fn montar_painel(app: &CartaApp) -> Option<PainelVista> {
    let classes = app.painel().classes();
    if !classes.visivel {
        return None;
    }

    let moeda = texto_seguro(app.moeda_padrao());
    let carrinho = app.carrinho();

    Some(PainelVista {
        aberto: classes.aberto,
        linhas: carrinho
            .itens()
            .iter()
            .map(|item| LinhaVista {
                id: item.id,
                nome: texto_seguro(&item.nome),
                preco_unitario: formatar_preco(&item.preco, &moeda),
                quantidade: item.quantidade,
                alvo_menos: Alvo::com_acao(MUDAR_QUANTIDADE)
                    .dado("id", item.id)
                    .dado("delta", -1),
                alvo_mais: Alvo::com_acao(MUDAR_QUANTIDADE)
                    .dado("id", item.id)
                    .dado("delta", 1),
            })
            .collect(),
        total: formatar_preco(&carrinho.total_preco(), &moeda),
        rotulo_botao: app.fluxo().rotulo_botao(),
        botao_desabilitado: app.fluxo().botao_desabilitado(),
        alvo_confirmar: Alvo::com_acao(CONFIRMAR_PEDIDO),
        alvo_fechar: Alvo::com_acao(FECHAR_CARRINHO),
    })
}

fn montar_modal(app: &CartaApp) -> Option<ModalVista> {
    let fase = app.modal().fase();
    if fase == FaseModal::Oculto {
        return None;
    }
    Some(ModalVista {
        aberto: fase == FaseModal::Aberto,
        alvo_omitir: Alvo::com_acao(RESOLVER_NOTAS).dado("valor", "null"),
        alvo_cancelar: Alvo::com_acao(CANCELAR_NOTAS),
    })
}

impl fmt::Display for Tela {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==================== Mesa {} ====================", self.mesa)?;
        if let Some(pedido) = &self.ultimo_pedido {
            writeln!(f, "✔ {pedido}")?;
        }

        match &self.corpo {
            Corpo::Carregando => writeln!(f, "Carregando cardápio...")?,
            Corpo::ErroFatal { mensagem, .. } => {
                writeln!(f, "📱 {mensagem}")?;
                writeln!(f, "   [recarregar] Recarregar página")?;
                return Ok(());
            }
            Corpo::SemResultados { .. } => {
                self.escrever_controles(f)?;
                writeln!(f, "😕 Nenhum produto encontrado")?;
                writeln!(f, "   Tente outra busca ou categoria. [limpar] Ver todo o cardápio")?;
            }
            Corpo::Cardapio(secoes) => {
                self.escrever_controles(f)?;
                for secao in secoes {
                    writeln!(f, "\n{}  ({} itens)", secao.titulo, secao.quantidade)?;
                    for produto in &secao.produtos {
                        writeln!(f, "  [{:>3}] {:<30} {:>10}", produto.id, produto.nome, produto.preco)?;
                        if let Some(descricao) = &produto.descricao {
                            writeln!(f, "        {descricao}")?;
                        }
                    }
                }
            }
        }

        writeln!(f, "\n🛒 {} no carrinho [carrinho]", self.contador)?;

        if let Some(painel) = &self.painel {
            writeln!(f, "---------------- Seu pedido ----------------")?;
            if painel.linhas.is_empty() {
                writeln!(f, "  Seu carrinho está vazio")?;
            }
            for linha in &painel.linhas {
                writeln!(
                    f,
                    "  [{:>3}] {:<26} {} c/u   − {} +",
                    linha.id, linha.nome, linha.preco_unitario, linha.quantidade
                )?;
            }
            writeln!(f, "  Total: {}", painel.total)?;
            let botao = if painel.botao_desabilitado {
                format!("({})", painel.rotulo_botao)
            } else {
                format!("[confirmar] {}", painel.rotulo_botao)
            };
            writeln!(f, "  {botao}   [fechar]")?;
        }

        if self.modal.is_some() {
            writeln!(f, "---------------- 📝 Notas do pedido ----------------")?;
            writeln!(f, "  Alguma indicação especial? Ex.: sem cebola, bem passado...")?;
            writeln!(f, "  [nota <texto>] Adicionar   [omitir] Omitir   [cancelar]")?;
        }

        for toast in &self.toasts {
            let marca = if toast.erro { "!" } else { "•" };
            writeln!(f, "{marca} {}  [x {}]", toast.mensagem, toast.id)?;
        }

        Ok(())
    }
}

impl Tela {
    fn escrever_controles(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let busca = if self.botao_limpar_visivel {
            format!("🔍 {}  [limpar] ✕", self.busca)
        } else {
            "🔍 Buscar produto...".to_string()
        };
        writeln!(f, "{busca}")?;

        let filtros: Vec<String> = self
            .filtros
            .iter()
            .map(|botao| {
                if botao.ativo {
                    format!("<{}>", botao.rotulo)
                } else {
                    botao.rotulo.clone()
                }
            })
            .collect();
        let faixa = filtros.join("  ");
        if self.deslocamento_filtros == 0 {
            writeln!(f, "{faixa}")
        } else {
            let visivel: String = faixa.chars().skip(self.deslocamento_filtros).collect();
            writeln!(f, "…{visivel}")
        }
    }
}
