// src/interface/acoes.rs

use std::collections::BTreeMap;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use tracing::debug;

use super::notas::RespostaNotas;

/// Elemento que recebeu (ou propagou) um clique: a etiqueta de ação e os
/// dados associados, no papel dos atributos `data-*` de um botão.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alvo {
    pub acao: Option<String>,
    pub dados: BTreeMap<String, String>,
}

impl Alvo {
    pub fn com_acao(acao: &str) -> Self {
        Self {
            acao: Some(acao.to_string()),
            dados: BTreeMap::new(),
        }
    }

    /// Elemento sem etiqueta (um contêiner no caminho do clique).
    pub fn neutro() -> Self {
        Self::default()
    }

    pub fn dado(mut self, chave: &str, valor: impl ToString) -> Self {
        self.dados.insert(chave.to_string(), valor.to_string());
        self
    }

    fn ler(&self, chave: &str) -> Option<&str> {
        self.dados.get(chave).map(String::as_str)
    }

    fn ler_numero<T: FromStr>(&self, chave: &str) -> Option<T> {
        self.ler(chave)?.trim().parse().ok()
    }
}

// Etiquetas de ação reconhecidas pelo despachante.
pub const ADICIONAR: &str = "adicionar";
pub const FILTRAR: &str = "filtrar";
pub const LIMPAR_BUSCA: &str = "limpar-busca";
pub const ABRIR_CARRINHO: &str = "abrir-carrinho";
pub const FECHAR_CARRINHO: &str = "fechar-carrinho";
pub const MUDAR_QUANTIDADE: &str = "mudar-quantidade";
pub const CONFIRMAR_PEDIDO: &str = "confirmar-pedido";
pub const RESOLVER_NOTAS: &str = "resolver-notas";
pub const CANCELAR_NOTAS: &str = "cancelar-notas";
pub const FECHAR_TOAST: &str = "fechar-toast";
pub const RECARREGAR: &str = "recarregar";

/// Ações do usuário, já com os dados validados.
#[derive(Debug, Clone, PartialEq)]
pub enum Acao {
    Adicionar { id: i64, nome: String, preco: BigDecimal },
    Filtrar { categoria: String },
    LimparBusca,
    AbrirCarrinho,
    FecharCarrinho,
    MudarQuantidade { id: i64, delta: i32 },
    ConfirmarPedido,
    ResolverNotas(RespostaNotas),
    FecharToast { id: u64 },
    Recarregar,
}

impl Acao {
    /// Traduz um alvo em ação. Etiqueta desconhecida ou dados numéricos
    /// ausentes/malformados resultam em `None`: a ação é simplesmente pulada.
    pub fn do_alvo(alvo: &Alvo) -> Option<Acao> {
        let acao = match alvo.acao.as_deref()? {
            ADICIONAR => Acao::Adicionar {
                id: alvo.ler_numero("id")?,
                nome: alvo.ler("nome").unwrap_or_default().to_string(),
                preco: ler_preco(alvo)?,
            },
            FILTRAR => Acao::Filtrar {
                categoria: alvo.ler("categoria")?.to_string(),
            },
            LIMPAR_BUSCA => Acao::LimparBusca,
            ABRIR_CARRINHO => Acao::AbrirCarrinho,
            FECHAR_CARRINHO => Acao::FecharCarrinho,
            MUDAR_QUANTIDADE => Acao::MudarQuantidade {
                id: alvo.ler_numero("id")?,
                delta: alvo.ler_numero("delta")?,
            },
            CONFIRMAR_PEDIDO => Acao::ConfirmarPedido,
            RESOLVER_NOTAS => {
                if alvo.ler("valor") == Some("null") {
                    Acao::ResolverNotas(RespostaNotas::Omitir)
                } else {
                    let texto = alvo.ler("texto").unwrap_or_default();
                    Acao::ResolverNotas(RespostaNotas::Adicionar(texto.to_string()))
                }
            }
            CANCELAR_NOTAS => Acao::ResolverNotas(RespostaNotas::Cancelar),
            FECHAR_TOAST => Acao::FecharToast {
                id: alvo.ler_numero("toast")?,
            },
            RECARREGAR => Acao::Recarregar,
            desconhecida => {
                debug!("ação desconhecida ignorada: {desconhecida}");
                return None;
            }
        };
        Some(acao)
    }
}

// Preço do alvo de adicionar: decimal e não negativo, como no cardápio validado.
fn ler_preco(alvo: &Alvo) -> Option<BigDecimal> {
    let preco = BigDecimal::from_str(alvo.ler("preco")?.trim()).ok()?;
    if preco < BigDecimal::from(0) {
        debug!("preço negativo no alvo de adicionar: {preco}");
        return None;
    }
    Some(preco)
}

/// Resolve o clique: procura, do elemento clicado para fora, o primeiro
/// alvo com etiqueta de ação e traduz esse alvo. Os ancestrais acima dele
/// não são consultados, mesmo que a tradução falhe.
pub fn resolver_acao(caminho: &[Alvo]) -> Option<Acao> {
    let alvo = caminho.iter().find(|alvo| alvo.acao.is_some())?;
    let acao = Acao::do_alvo(alvo);
    if acao.is_none() {
        debug!("alvo {:?} sem dados válidos, clique ignorado", alvo.acao);
    }
    acao
}
