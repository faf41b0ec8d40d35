//! Weighted pattern tables used by the outcome scoring methods
//!
//! Tables are compiled once into [`PatternTables`] and shared read-only
//! between every scoring method and every document.

use regex::Regex;

/// A compiled pattern with its evidence weight and tag
#[derive(Debug, Clone)]
pub struct WeightedPattern {
    pub regex: Regex,
    pub weight: f64,
    pub tag: &'static str,
}

/// What an indirect pattern implies when it matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implication {
    Favorable,
    Unfavorable,
    /// Recorded in details only, never selects an outcome
    Auxiliary(&'static str),
}

/// A weighted pattern carrying its own implied outcome
#[derive(Debug, Clone)]
pub struct ImpliedPattern {
    pub pattern: WeightedPattern,
    pub implies: Implication,
}

/// Every table the classifier needs, compiled
#[derive(Debug, Clone)]
pub struct PatternTables {
    pub favorable: Vec<WeightedPattern>,
    pub unfavorable: Vec<WeightedPattern>,
    pub partial: Vec<WeightedPattern>,
    pub agreement: Vec<WeightedPattern>,
    pub extinct_with_merit: Vec<WeightedPattern>,
    pub extinct_without_merit: Vec<WeightedPattern>,
    pub inference: Vec<ImpliedPattern>,
    pub legal_language: Vec<ImpliedPattern>,
    pub dispositive_markers: Vec<WeightedPattern>,
    pub structure: Vec<Regex>,
}

impl PatternTables {
    /// Portuguese labor-court tables
    pub fn standard() -> Self {
        let tables = Self {
            favorable: compile_weighted(FAVORABLE),
            unfavorable: compile_weighted(UNFAVORABLE),
            partial: compile_weighted(PARTIAL),
            agreement: compile_weighted(AGREEMENT),
            extinct_with_merit: compile_weighted(EXTINCT_WITH_MERIT),
            extinct_without_merit: compile_weighted(EXTINCT_WITHOUT_MERIT),
            inference: compile_implied(INFERENCE),
            legal_language: compile_implied(LEGAL_LANGUAGE),
            dispositive_markers: compile_weighted(DISPOSITIVE_MARKERS),
            structure: STRUCTURE
                .iter()
                .filter_map(|pattern| compile(pattern, "(?is)"))
                .collect(),
        };
        tracing::debug!(
            favorable = tables.favorable.len(),
            unfavorable = tables.unfavorable.len(),
            partial = tables.partial.len(),
            inference = tables.inference.len(),
            structure = tables.structure.len(),
            "outcome pattern tables compiled"
        );
        tables
    }
}

impl Default for PatternTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn compile(pattern: &str, flags: &str) -> Option<Regex> {
    match Regex::new(&format!("{flags}{pattern}")) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "skipping outcome pattern");
            None
        }
    }
}

fn compile_weighted(table: &[(&str, f64, &'static str)]) -> Vec<WeightedPattern> {
    table
        .iter()
        .filter_map(|&(pattern, weight, tag)| {
            compile(pattern, "(?i)").map(|regex| WeightedPattern { regex, weight, tag })
        })
        .collect()
}

fn compile_implied(table: &[(&str, f64, &'static str, Implication)]) -> Vec<ImpliedPattern> {
    table
        .iter()
        .filter_map(|&(pattern, weight, tag, implies)| {
            compile(pattern, "(?i)").map(|regex| ImpliedPattern {
                pattern: WeightedPattern { regex, weight, tag },
                implies,
            })
        })
        .collect()
}

// ============================================================================
// Direct tables
// ============================================================================

const FAVORABLE: &[(&str, f64, &str)] = &[
    // Judgment verbs
    (r"\b(?:julgo|decido)\s+(?:totalmente\s+)?procedente\b", 0.98, "julgamento_procedente_direto"),
    (r"\b(?:homologo|homologar|homologada)\b", 0.95, "homologacao_favoravel"),
    (r"\b(?:concedo|conceder|concedido|concedida|concessão)\b", 0.9, "concessao"),
    (r"\b(?:defiro|deferir|deferimento|deferido|deferida)\b", 0.9, "deferimento"),
    (r"\b(?:acolho|acolher|acolhido|acolhida|acolhimento)\b", 0.9, "acolhimento"),
    (r"\b(?:reconheço|reconhecer|reconhecido|reconhecida|reconhecimento)\b", 0.88, "reconhecimento"),
    (r"\b(?:confirmo|confirmar|confirmado|confirmada|confirmação)\b", 0.85, "confirmacao_favoravel"),
    // Condemnation and payment orders
    (r"\b(?:condeno|condenar|condenado|condenada|condenação)\b", 0.95, "condenacao_direta"),
    (
        r"(?:condeno|condenar|condenado|condenada)\s+(?:o|a)?\s*(?:reclamad[ao]|réu|ré|empresa|empregador|parte)\s*(?:ao\s+pagamento|a\s+pagar|a\s+indenizar)\b",
        0.98,
        "condenacao_especifica",
    ),
    (r"\b(?:arbitro|arbitrar|arbitrado|arbitrada)\b", 0.85, "arbitramento"),
    (
        r"\b(?:determino|determinar|determinada|determinado)\s+(?:o\s+pagamento|a\s+reintegração|a\s+\w+ação)\b",
        0.85,
        "determinacao_positiva",
    ),
    // Appeals
    (r"\b(?:recurso\s+provido|recurso\s+parcialmente\s+provido)\b", 0.95, "recurso_provido_direto"),
    (r"\b(?:dar|dando|dou|dá)\s+provimento\b", 0.9, "dar_provimento_ao_recurso"),
    (r"\bprovimento\s+ao\s+recurso\b", 0.9, "provimento_ao_recurso_frase"),
    (
        r"\b(?:reformo|reformar|reformada|reformado)\s+(?:a\s+sentença|o\s+acórdão)\b",
        0.9,
        "reforma_favoravel",
    ),
    // Recognized entitlement
    (r"\b(?:faz\s+jus|fazendo\s+jus)\b", 0.85, "faz_jus"),
    (r"\b(?:tem\s+direito|tendo\s+direito)\b", 0.85, "tem_direito"),
    (r"\b(?:é\s+devido|são\s+devidos|devida|devido)\b", 0.85, "e_devido"),
    (r"\b(?:deve\s+ser\s+pago|devem\s+ser\s+pagos|deve\s+pagar)\b", 0.85, "deve_ser_pago"),
    (r"\bcabe\s+ao\s+(?:reclamante|autor|empregado)\b", 0.8, "cabe_ao_requerente"),
    (r"\b(?:vitória|êxito|procede)\b", 0.75, "vitoria_geral"),
    (r"em\s+favor\s+d[oa]\s+(?:reclamante|autor|empregado|parte)\b", 0.8, "em_favor_do_requerente"),
    (r"\brazão\s+à?s?\s+(?:reclamante|autor|parte)\b", 0.8, "razao_ao_requerente"),
    // Monetary values next to a payment verb
    (
        r"(?:pagar|pagamento|condeno|condenação)\s+R\$\s*\d{1,3}(?:\.?\d{3})*(?:,\d{2})?",
        0.7,
        "pagamento_com_valor",
    ),
    (
        r"(?:indenização|indenizar)\s+de\s+R\$\s*\d{1,3}(?:\.?\d{3})*(?:,\d{2})?",
        0.7,
        "indenizacao_com_valor",
    ),
    (r"no\s+valor\s+de\s+R\$\s*\d{1,3}(?:\.?\d{3})*(?:,\d{2})?", 0.6, "valor_monetario_especifico"),
    // Specific rights already marked as granted
    (r"\bhoras\s+extras\s+(?:devidas|deferidas|concedidas)\b", 0.8, "horas_extras_deferidas"),
    (
        r"\badicional\s+(?:noturno|de\s+insalubridade|de\s+periculosidade)\s+(?:devido|deferido|concedido)\b",
        0.8,
        "adicional_deferido",
    ),
    (r"\bverbas\s+rescisórias\s+(?:devidas|deferidas|concedidas)\b", 0.8, "verbas_rescisorias_deferidas"),
    (r"\baviso\s+prévio\s+(?:devido|deferido|concedido)\b", 0.75, "aviso_previo_deferido"),
    (
        r"\b(?:décimo\s+terceiro|13[º°]\s+salário)\s+(?:devido|deferido|concedido)\b",
        0.75,
        "decimo_terceiro_deferido",
    ),
    (r"\bférias\s+(?:devidas|deferidas|concedidas)\b", 0.75, "ferias_deferidas"),
    (r"\bFGTS\s+(?:devido|deferido|concedido|liberado)\b", 0.75, "fgts_deferido"),
    (r"\bvínculo\s+empregatício\s+(?:reconhecido|declarado)\b", 0.85, "vinculo_empregaticio_reconhecido"),
    (r"\breintegração\s+(?:deferida|determinada|ordenada)\b", 0.85, "reintegracao_deferida"),
    (r"\brescisão\s+indireta\s+(?:reconhecida|declarada)\b", 0.85, "rescisao_indireta_reconhecida"),
];

const UNFAVORABLE: &[(&str, f64, &str)] = &[
    (r"\b(?:improcedente|improcedência)\b", 0.9, "decisao_direta"),
    (r"\b(?:nego|negar|negado|negada)\b", 0.8, "negacao"),
    (r"\b(?:indefiro|indeferimento|indeferido|indeferida)\b", 0.8, "indeferimento"),
    (r"\b(?:rejeito|rejeição|rejeitado|rejeitada)\b", 0.8, "rejeicao"),
    (r"\b(?:desconheço|desconhecimento)\b", 0.7, "desconhecimento"),
    (r"julgo\s+improcedente", 0.95, "julgamento_improcedente"),
    (r"sentença\s+improcedente", 0.9, "sentenca_improcedente"),
    (r"ação\s+improcedente", 0.9, "acao_improcedente"),
    (r"pedido\s+improcedente", 0.85, "pedido_improcedente"),
    (r"recurso\s+desprovido", 0.8, "recurso_desprovido"),
    (r"negar\s+provimento", 0.8, "negar_provimento"),
    (r"nego\s+provimento", 0.8, "nego_provimento"),
    (r"nego\s+seguimento", 0.8, "nego_seguimento"),
    (r"denego\s+seguimento", 0.8, "denego_seguimento"),
    (r"nega\s+provimento", 0.8, "nega_provimento"),
    (r"desprovimento\s+do\s+recurso", 0.8, "desprovimento_recurso"),
    (r"rejeitado\s+o\s+recurso", 0.8, "rejeitado_recurso"),
    (r"rejeitado\s+o\s+pedido", 0.8, "rejeitado_pedido"),
    (r"não\s+tem\s+direito", 0.8, "nao_tem_direito"),
    (r"não\s+faz\s+jus", 0.8, "nao_faz_jus"),
    (r"não\s+é\s+devido", 0.8, "nao_e_devido"),
    (r"ausência\s+de\s+direito", 0.7, "ausencia_direito"),
    (r"não\s+deve\s+ser\s+pago", 0.7, "nao_deve_pago"),
    (r"não\s+procede", 0.7, "nao_procede"),
    (r"extingo\s+o\s+processo", 0.7, "extincao_processo"),
    (r"extingo\s+a\s+execução", 0.6, "extincao_execucao"),
    (r"processo\s+extinto", 0.6, "processo_extinto"),
    (r"\b(?:perdeu|perderam|derrota|insucesso)\b", 0.6, "derrota"),
    (r"em\s+favor\s+do\s+requerido", 0.7, "favor_requerido"),
    (r"em\s+favor\s+do\s+réu", 0.7, "favor_reu"),
    (r"razão\s+ao\s+requerido", 0.7, "razao_requerido"),
    (r"razão\s+ao\s+réu", 0.7, "razao_reu"),
    (r"\b(?:absolvo|absolvição|absolvido|absolvida)\b", 0.8, "absolvicao"),
    (r"isento\s+de\s+pagamento", 0.7, "isento_pagamento"),
    (r"sem\s+condenação", 0.7, "sem_condenacao"),
    (r"falta\s+de\s+prova", 0.6, "falta_prova"),
    (r"não\s+comprovado", 0.6, "nao_comprovado"),
    (r"prova\s+insuficiente", 0.6, "prova_insuficiente"),
    (r"não\s+demonstrado", 0.6, "nao_demonstrado"),
    (r"\b(?:arquivo|arquivado|arquivamento)\b", 0.6, "arquivamento"),
    (r"baixa\s+dos\s+autos", 0.5, "baixa_autos"),
];

const PARTIAL: &[(&str, f64, &str)] = &[
    (
        r"\b(?:julgo|decido)\s+(?:os\s+pedidos\s+)?parcialmente\s+procedentes?\b",
        0.98,
        "julgamento_parcial_direto",
    ),
    (r"\bprocedentes?\s+em\s+parte\b", 0.95, "procedente_em_parte_direto"),
    (
        r"\b(?:acolho|defiro|concedo)\s+(?:os\s+pedidos\s+)?parcialmente\b",
        0.95,
        "acolhimento_parcial_direto",
    ),
    (r"\b(?:dou|dá|dando|dar)\s+parcial\s+provimento\b", 0.95, "dar_parcial_provimento_direto"),
    (r"\brecurso\s+parcialmente\s+provido\b", 0.95, "recurso_parcialmente_provido_direto"),
    (
        r"\b(?:reformo|reformar|reformada|reformado)\s+parcialmente\s+(?:a\s+sentença|o\s+acórdão)\b",
        0.93,
        "reforma_parcial",
    ),
    (r"\b(?:parcialmente|em\s+parte)\b", 0.9, "indicador_parcialidade_geral"),
    (
        r"\b(?:parte\s+do\s+pedido|parte\s+dos\s+pedidos|parte\s+da\s+pretensão)\b",
        0.88,
        "parte_do_pedido",
    ),
    (r"\b(?:acolho|defiro|concedo)\s+em\s+parte\b", 0.88, "acolhimento_em_parte"),
    (
        r"(?:apenas|somente|tão\s+somente)\s+o\s+pedido\s+de\s+(?:.*?\s+)?(?:devido|procedente)\b",
        0.8,
        "apenas_pedido_especifico_procedente",
    ),
    (
        r"(?:concedo|defiro|acolho)\s+(?:somente|apenas)\s+o\s+pedido\s+de\s+.*\b",
        0.8,
        "concedido_somente_um_pedido",
    ),
    (
        r"\balguns\s+pedidos?\s+(?:foram\s+acolhidos|procedem|deferidos)\b",
        0.75,
        "alguns_pedidos_acolhidos",
    ),
    (
        r"\bparte\s+dos\s+direitos\s+(?:reconhecidos|deferidos)\b",
        0.75,
        "parte_dos_direitos_reconhecidos",
    ),
    (r"(?:rejeitados|indeferidos)\s+os\s+demais\s+pedidos?\b", 0.7, "rejeitado_o_restante"),
    (
        r"(?:não\s+procede|improcedente)\s+o\s+pedido\s+de\s+.*\s+(?:mas|porém|contudo)\s+procede\s+o\s+de\s+.*\b",
        0.85,
        "contraste_pedidos",
    ),
    (r"\blimitado\s+(?:a|ao|à|aos|às)\b", 0.7, "limitado_a"),
    (r"\brestrito\s+(?:a|ao|à|aos|às)\b", 0.7, "restrito_a"),
    (r"\bno\s+que\s+se\s+refere\s+a\b", 0.65, "no_que_se_refere_a"),
    (
        r"\b(?:excluído|excluímos|excluir)\s+(?:o\s+pedido\s+de|da\s+condenação)\b",
        0.7,
        "exclusao_de_pedido",
    ),
    (
        r"\b(?:afasto|afastado|afastar)\s+(?:a\s+condenação\s+em|o\s+pedido\s+de)\b",
        0.7,
        "afastamento_de_condenacao",
    ),
    (
        r"\b(?:apenas\s+no\s+tocante\s+a|somente\s+no\s+tocante\s+a)\b",
        0.7,
        "apenas_no_tocante_a",
    ),
];

// ============================================================================
// Auxiliary tables (details only)
// ============================================================================

const AGREEMENT: &[(&str, f64, &str)] = &[
    (
        r"\b(?:homologo|homologar|homologado|homologada)\s+(?:o\s+)?(?:acordo|conciliação|transação)\b",
        1.0,
        "acordo_homologado_direto",
    ),
    (
        r"\b(?:acordo|conciliação|transação)\s+(?:celebrado|firmado|obtido|realizado)\b",
        0.95,
        "acordo_celebrado_confirmado",
    ),
    (
        r"\bpartes\s+(?:transigiram|celebraram\s+acordo|conciliaram)\b",
        0.9,
        "partes_conciliaram",
    ),
    (
        r"\bextinção\s+do\s+processo\s+em\s+razão\s+do\s+(?:acordo|conciliação)\b",
        0.95,
        "extincao_por_acordo",
    ),
    (
        r"\bresolução\s+do\s+mérito\s+pelo\s+(?:acordo|conciliação)\b",
        0.9,
        "resolucao_merito_por_acordo",
    ),
    (
        r"\b(?:julgo|decido)\s+(?:extinto|resolvido)\s+o\s+processo\s+com\s+resolução\s+do\s+mérito\s+em\s+razão\s+do\s+acordo\b",
        0.98,
        "julgamento_extincao_acordo",
    ),
];

const EXTINCT_WITH_MERIT: &[(&str, f64, &str)] = &[
    (
        r"\b(?:extingo|extinta|extinto)\s+(?:o\s+processo|o\s+feito)\s+com\s+resolução\s+do\s+mérito\b",
        1.0,
        "extincao_com_merito_direta",
    ),
    (r"\bresolução\s+do\s+mérito\b", 0.9, "resolucao_merito_geral"),
    (
        r"\b(?:pronuncio|pronunciada|pronunciado|declaro|declarada|declarado)\s+a\s+(?:prescrição|decadência)\b",
        0.98,
        "declaracao_prescricao_decadencia",
    ),
    (
        r"\b(?:prescrição|decadência)\s+(?:reconhecida|declarada|configurada|acolhida)\b",
        0.95,
        "prescricao_decadencia_reconhecida",
    ),
    (
        r"\b(?:julgo|decido)\s+(?:o\s+processo|o\s+feito)\s+extinto\s+pela\s+(?:prescrição|decadência)\b",
        0.98,
        "julgamento_extinto_por_prescricao",
    ),
    (r"\bperda\s+do\s+direito\s+de\s+ação\b", 0.85, "perda_direito_acao"),
    (r"\bextinção\s+da\s+pretensão\b", 0.85, "extincao_pretensao"),
];

const EXTINCT_WITHOUT_MERIT: &[(&str, f64, &str)] = &[
    (
        r"\b(?:extingo|extinta|extinto)\s+(?:o\s+processo|o\s+feito)\s+sem\s+resolução\s+do\s+mérito\b",
        1.0,
        "extincao_sem_merito_direta",
    ),
    (r"\bausência\s+de\s+pressuposto\s+processual\b", 0.95, "ausencia_pressuposto"),
    (r"\bcarência\s+da\s+ação\b", 0.95, "carencia_acao"),
    (r"\bilegitimidade\s+de\s+(?:parte|polo)\b", 0.95, "ilegitimidade_parte"),
    (r"\bfalta\s+de\s+interesse\s+de\s+agir\b", 0.95, "falta_interesse_agir"),
    (r"\binépcia\s+da\s+inicial\b", 0.95, "inepcia_inicial"),
    (r"\b(?:coisa\s+julgada|litispendência|conexão)\b", 0.9, "pressuposto_negativo"),
    (
        r"\b(?:não\s+conheço|não\s+conhecido)\s+(?:do|do\s+recurso|do\s+apelo)\b",
        0.9,
        "nao_conhecimento_recurso",
    ),
    (r"\bintempestividade(?:\s+do\s+recurso)?\b", 0.85, "intempestividade_recurso"),
    (r"\b(?:arquivamento|arquivado|arquivada)\b", 0.8, "arquivamento_processo"),
    (r"\bindeferimento\s+da\s+petição\s+inicial\b", 0.9, "indeferimento_inicial"),
];

// ============================================================================
// Indirect tables
// ============================================================================

use Implication::{Auxiliary, Favorable, Unfavorable};

const INFERENCE: &[(&str, f64, &str, Implication)] = &[
    (
        r"\b(?:pagamento|pagar)\s+(?:de|referente\s+a|o\s+valor\s+de)?\s*(?:R\$\s*|quantia\s+de\s*R\$\s*|o\s+importe\s+de\s*R\$\s*)?\d{1,3}(?:\.?\d{3})*(?:,\d{2})?",
        0.7,
        "pagamento_com_valor_implied",
        Favorable,
    ),
    (
        r"\b(?:indenização|indenizar)\s+(?:por|a\s+título\s+de)?\s+danos?\s+(?:morais?|materiais?)\b",
        0.8,
        "indenizacao_explicit",
        Favorable,
    ),
    (
        r"\b(?:valor|montante|importe|quantia)\s+(?:de|referente\s+a)?\s*(?:R\$\s*)?\d{1,3}(?:\.?\d{3})*(?:,\d{2})?\s+(?:devido|a\s+ser\s+pago|condenado)\b",
        0.85,
        "valor_devido_condenado",
        Favorable,
    ),
    (r"\b(?:receber|recebimento)\s+de\s+(?:valores|verbas)\b", 0.65, "recebimento_verbas_implied", Favorable),
    (r"\b(?:liberação|liberado)\s+(?:do\s+)?(?:FGTS|guia)\b", 0.75, "liberacao_fgts", Favorable),
    (r"\b(?:reintegrar|reintegração)\b", 0.8, "reintegracao_implied", Favorable),
    (r"\bnão\s+há\s+que\s+se\s+falar\s+em\b", 0.9, "nao_ha_falar_explicit", Unfavorable),
    (
        r"\b(?:não\s+se\s+vislumbra|não\s+se\s+verifica|não\s+restou\s+comprovado|ausência\s+de\s+prova)\b",
        0.85,
        "falta_prova_vislumbre",
        Unfavorable,
    ),
    (r"\b(?:incabível|descabido|improcedente)\b", 0.8, "incabivel_descabido", Unfavorable),
    (
        r"\b(?:não\s+faz\s+jus|não\s+tem\s+direito|não\s+é\s+devido|não\s+cabe)\b",
        0.9,
        "negacao_direito",
        Unfavorable,
    ),
    (
        r"\b(?:indeferimento|rejeição)\s+(?:do|da|dos|das)?\s+(?:pedido|pretensão)\b",
        0.85,
        "indeferimento_rejeicao_nominal",
        Unfavorable,
    ),
    (
        r"\bônus\s+da\s+prova\s+não\s+foi\s+desincumbido\b",
        0.85,
        "onus_prova_nao_desincumbido",
        Unfavorable,
    ),
    (r"\b(?:improvido|improvida)\b", 0.7, "improvido_geral", Unfavorable),
    (
        r"\b(?:cumprir|cumprimento)\s+(?:com\s+a|de\s+sua)?\s*obrigação\b",
        0.7,
        "cumprir_obrigacao_explicit",
        Favorable,
    ),
    (
        r"\b(?:obrigação\s+de\s+fazer|obrigação\s+de\s+pagar|obrigação\s+de\s+entregar)\b",
        0.75,
        "obrigacao_de_acao",
        Favorable,
    ),
    (r"\b(?:anotação|retificação)\s+(?:na\s+)?CTPS\b", 0.7, "ctps_anotacao_retificacao", Favorable),
    (r"\b(?:registro|averbação)\s+em\s+(?:carteira|CTPS)\b", 0.7, "registro_carteira_explicit", Favorable),
    (
        r"\b(?:expedição|emitir|fornecer)\s+(?:de\s+)?(?:guias?|alvará|certidão)\b",
        0.75,
        "expedicao_documentos",
        Favorable,
    ),
    (
        r"\b(?:extinção|extinto|extinta)\s+(?:do\s+processo|do\s+feito|da\s+pretensão)\b",
        0.8,
        "extincao_processo",
        Auxiliary("extinct"),
    ),
    (r"\b(?:prescrição|prescrita|prescrito)\b", 0.85, "prescricao_declarada", Auxiliary("extinct_with_merit")),
    (r"\b(?:decadência|decaído|decaída)\b", 0.85, "decadencia_declarada", Auxiliary("extinct_with_merit")),
    (
        r"\b(?:carência\s+da\s+ação|ilegitimidade\s+de\s+parte|falta\s+de\s+interesse\s+de\s+agir)\b",
        0.8,
        "extincao_sem_merito_motivo",
        Auxiliary("extinct_without_merit"),
    ),
    (
        r"\b(?:acordo|conciliação|transação)\s+(?:homologado|celebrado|firmado|obtido)\b",
        0.9,
        "acordo_homologado",
        Auxiliary("agreement"),
    ),
];

const LEGAL_LANGUAGE: &[(&str, f64, &str, Implication)] = &[
    (r"pelos\s+fundamentos\s+.*\s+procedente", 0.8, "fundamentos_procedente", Favorable),
    (r"pelas\s+razões\s+.*\s+procedente", 0.8, "razoes_procedente", Favorable),
    (r"face\s+ao\s+conjunto\s+probatório", 0.5, "conjunto_probatorio", Favorable),
    (r"pelos\s+fundamentos\s+.*\s+improcedente", 0.8, "fundamentos_improcedente", Unfavorable),
    (r"pelas\s+razões\s+.*\s+improcedente", 0.8, "razoes_improcedente", Unfavorable),
    (r"ausência\s+de\s+elementos\s+probatórios", 0.6, "ausencia_elementos_probatorios", Unfavorable),
    (r"restou\s+comprovado", 0.6, "restou_comprovado", Favorable),
    (r"não\s+restou\s+comprovado", 0.6, "nao_restou_comprovado", Unfavorable),
    (r"ficou\s+demonstrado", 0.6, "ficou_demonstrado", Favorable),
    (r"não\s+ficou\s+demonstrado", 0.6, "nao_ficou_demonstrado", Unfavorable),
];

// ============================================================================
// Dispositive markers and document structure
// ============================================================================

const DISPOSITIVE_MARKERS: &[(&str, f64, &str)] = &[
    (r"\b(?:dispositivo|dispositiva|decisão|conclusão|decisório)\b", 1.0, "secao_dispositiva"),
    (
        r"\b(?:isto\s+posto|diante\s+do\s+exposto|pelo\s+exposto|ante\s+o\s+exposto|por\s+todo\s+o\s+exposto|em\s+face\s+do\s+exposto)\b",
        0.95,
        "conclusao_formal",
    ),
    (r"\b(?:assim\s+sendo|dessa\s+forma|portanto|em\s+consequência)\b", 0.85, "conclusao_inferencial"),
    (r"\b(?:com\s+efeito|nesse\s+sentido)\b", 0.7, "introducao_argumento"),
    (r"\bem\s+face\s+de\s+todo\s+o\s+conjunto\s+probatório\b", 0.75, "sinalizador_resultado_prova"),
    (r"\b(?:decido|decide|decidimos|decidir)\b", 0.9, "decisao_verbo"),
    (r"\b(?:julgo|julga|julgamos|julgar)\b", 0.95, "julgamento_verbo"),
    (r"\b(?:sentencio|sentencia|sentenciamos|sentenciar)\b", 0.9, "sentenciamento_verbo"),
    (r"\b(?:determino|determina|determinamos|determinar)\b", 0.85, "determinacao_verbo"),
    (r"\b(?:ordeno|ordena|ordenamos|ordenar)\b", 0.85, "ordem_verbo"),
    (r"\b(?:homologo|homologa|homologamos|homologar)\b", 0.9, "homologacao_verbo"),
    (r"\b(?:no\s+mérito|quanto\s+ao\s+mérito|em\s+relação\s+ao\s+mérito)\b", 0.9, "merito_direto"),
    (
        r"\b(?:análise\s+do\s+mérito|exame\s+do\s+mérito|discussão\s+do\s+mérito)\b",
        0.85,
        "analise_exame_merito",
    ),
    (r"\b(?:fundamentação|fundamentando|fundamento)\b", 0.8, "secao_fundamentacao"),
    (r"\b(?:voto|votando)\b", 0.8, "secao_voto"),
    (r"\b(?:passo\s+a\s+analisar|passamos\s+a\s+analisar)\b", 0.75, "introducao_analise"),
    (r"\b(?:da\s+análise\s+dos\s+autos|da\s+instrução\s+processual)\b", 0.7, "inicio_analise_fatos"),
];

const STRUCTURE: &[&str] = &[
    // First-instance rulings
    r"\b(?:sentença|decisão\s+de\s+primeiro\s+grau|decisão\s+de\s+primeira\s+instância)\s*(?:foi)?\s*(?:julgada|proferida|que\s+resultou\s+em)?\s*(?:totalmente\s+)?(?:procedente|improcedente|parcialmente\s+procedente|homologatória|extinta)\b",
    r"\b(?:julgo|decido|sentencio)\s+(?:o\s+pedido|a\s+ação|os\s+pedidos|a\s+pretensão)?\s*(?:totalmente\s+)?(?:procedente|improcedente|parcialmente\s+procedente)\b",
    // Appeals
    r"\b(?:acórdão|decisão\s+colegiada|julgado|aresto)\s*(?:que\s+)?(?:deu|negou|manteve|reformou|confirmou|proveu|desproveu|improvimento)?\s*(?:provimento|desprovimento|provimento\s+parcial|reforma|manutenção)?\s*(?:ao\s+recurso)?\b",
    r"\b(?:recurso\s+ordinário|recurso\s+de\s+revista|agravo\s+de\s+instrumento|embargos\s+de\s+declaração)\s*(?:foi)?\s*(?:provido|desprovido|parcialmente\s+provido|conhecido\s+e\s+não\s+provido|reformado|mantido|não\s+conhecido)\b",
    r"\b(?:dou|nego|mantenho|reformo|provejo|desprovejo)\s+(?:provimento\s+)?(?:ao\s+)?(?:recurso|apelo)?\b",
    // Dispositive conclusions
    r"\b(?:dispositivo|decisão|conclusão|ante\s+o\s+exposto|pelo\s+exposto|isto\s+posto|em\s+face\s+do\s+exposto)\s*(?:o\s+juiz|o\s+tribunal|o\s+relator)?\s*(?:julga|decide|condena|absolve|defere|indefere|acolhe|rejeita|homologa|concede|reconhece|determina|extingue)?\s*(?:o\s+pedido|a\s+ação)?\s*(?:totalmente\s+)?(?:procedente|improcedente|parcialmente\s+procedente|acordado|extinto)\b",
    r"\b(?:condeno|absolvo|defiro|indefiro|acolho|rejeito|homologo|concedo|reconheço|determino|extingo)\s+(?:o\s+reclamado|a\s+empresa|o\s+pedido|a\s+pretensão|as\s+partes)?(?:\s+ao\s+pagamento|\s+a\s+anotação|\s+o\s+vínculo|\s+a\s+extinção)?\b",
    // Headnotes
    r"\bementa\s*(?:deu|negou|proveu|desproveu)?\s*(?:provimento|desprovimento)?\s*(?:a\s+recurso)?\s*(?:para)?\s*(?:julgar|declarar)?\s*(?:procedente|improcedente|parcialmente)?\b",
    r"\bementa\s*:\s*(?:horas\s+extras|indenização|vínculo|adicional\s+noturno)\s*(?:devidas|deferido|reconhecido|indeferidas)\b",
    // Outcome stated in running text
    r"\b(?:restou\s+comprovado|não\s+restou\s+comprovado|ficou\s+demonstrado|não\s+ficou\s+demonstrado)\s+que\s+(?:o\s+reclamante\s+faz\s+jus|a\s+pretensão\s+não\s+procede)\b",
];
