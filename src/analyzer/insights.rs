use crate::analyzer::charts::{
    get_module_chart_data, get_process_chart_data, get_tags_chart_data, get_top_requesters,
    get_type_chart_data,
};
use crate::analyzer::stats::{priority_contains, status_contains, TicketStats};
use crate::config::AppConfig;
use crate::parser::types::Ticket;

/// Entrada compartilhada da bateria de regras.
pub struct InsightContext<'a> {
    pub tickets: &'a [Ticket],
    pub stats: &'a TicketStats,
    pub config: &'a AppConfig,
}

/// Uma regra heurística independente: predicado → mensagem opcional.
struct InsightRule {
    name: &'static str,
    admin_only: bool,
    eval: fn(&InsightContext) -> Option<String>,
}

/// Bateria fixa e ordenada. A ordem das mensagens emitidas segue a ordem
/// daqui; cada regra é avaliada isoladamente.
const RULES: &[InsightRule] = &[
    InsightRule {
        name: "urgencia_alta_prioridade",
        admin_only: false,
        eval: rule_urgencia,
    },
    InsightRule {
        name: "benchmark_resolucao",
        admin_only: true,
        eval: rule_benchmark,
    },
    InsightRule {
        name: "backlog_ou_gestao",
        admin_only: false,
        eval: rule_backlog,
    },
    InsightRule {
        name: "escalados",
        admin_only: false,
        eval: rule_escalados,
    },
    InsightRule {
        name: "processo_dominante",
        admin_only: false,
        eval: rule_processo_dominante,
    },
    InsightRule {
        name: "processo_anomalia",
        admin_only: false,
        eval: rule_processo_anomalia,
    },
    InsightRule {
        name: "modulo_dominante",
        admin_only: false,
        eval: rule_modulo,
    },
    InsightRule {
        name: "solicitante_top",
        admin_only: false,
        eval: rule_solicitante,
    },
    InsightRule {
        name: "tipo_dominante",
        admin_only: false,
        eval: rule_tipo,
    },
    InsightRule {
        name: "tag_recorrente",
        admin_only: false,
        eval: rule_tag,
    },
];

/// Avalia a bateria completa sobre a coleção corrente. As mensagens são
/// geradas a cada chamada, nunca armazenadas; a variante de administrador
/// inclui a regra de benchmark de SLA.
pub fn generate_insights(
    tickets: &[Ticket],
    stats: &TicketStats,
    config: &AppConfig,
    is_admin: bool,
) -> Vec<String> {
    let ctx = InsightContext {
        tickets,
        stats,
        config,
    };
    RULES
        .iter()
        .filter(|rule| is_admin || !rule.admin_only)
        .filter_map(|rule| (rule.eval)(&ctx))
        .collect()
}

/// Nomes das regras na ordem de avaliação (diagnóstico/testes).
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|r| r.name).collect()
}

fn pct(part: u64, total: u64) -> i64 {
    (part as f64 / total as f64 * 100.0).round() as i64
}

// ─── Regras ──────────────────────────────────────────────────────────────────

fn rule_urgencia(ctx: &InsightContext) -> Option<String> {
    if ctx.stats.prioridade_alta == 0 {
        return None;
    }
    let urgentes_abertos = ctx
        .tickets
        .iter()
        .filter(|t| priority_contains(t, "alta") && status_contains(t, "aberto"))
        .count();
    if urgentes_abertos == 0 {
        return None;
    }
    Some(format!(
        "⚠️ Atenção: {urgentes_abertos} tickets de prioridade alta estão em aberto e requerem ação imediata."
    ))
}

fn rule_benchmark(ctx: &InsightContext) -> Option<String> {
    let tmr = ctx.stats.tempo_medio_resolucao;
    if tmr <= 0 {
        return None;
    }
    let diff = tmr - ctx.config.benchmark_resolucao_horas;
    if diff > 0 {
        Some(format!(
            "⏱️ O tempo médio de resolução ({tmr}h) está {diff}h acima do benchmark ideal. Oportunidade de otimização identificada."
        ))
    } else {
        Some(format!(
            "✅ Excelente! O tempo médio de resolução ({tmr}h) está dentro do padrão ideal."
        ))
    }
}

/// Backlog alto e elogio de gestão são mutuamente exclusivos: o alerta de
/// abertos tem precedência.
fn rule_backlog(ctx: &InsightContext) -> Option<String> {
    let total = ctx.stats.total_tickets as u64;
    if total == 0 {
        return None;
    }
    let abertos_pct = pct(ctx.stats.tickets_abertos as u64, total);
    let fechados_pct = pct(ctx.stats.tickets_fechados as u64, total);
    if abertos_pct > ctx.config.limite_abertos_pct {
        Some(format!(
            "📊 {abertos_pct}% dos tickets estão em aberto. Sugestão: Priorizar fechamento dos chamados pendentes."
        ))
    } else if fechados_pct > ctx.config.limite_fechados_pct {
        Some(format!(
            "🎯 Taxa de fechamento de {fechados_pct}% demonstra excelente gestão de chamados!"
        ))
    } else {
        None
    }
}

fn rule_escalados(ctx: &InsightContext) -> Option<String> {
    let total = ctx.stats.total_tickets as u64;
    let escalados = ctx.tickets.iter().filter(|t| t.is_escalated).count() as u64;
    if total == 0 || escalados == 0 {
        return None;
    }
    let escalados_pct = pct(escalados, total);
    if escalados_pct > ctx.config.limite_escalados_pct {
        Some(format!(
            "🔺 {escalados_pct}% dos tickets foram escalados. Considerar revisão de processos de primeira linha."
        ))
    } else {
        None
    }
}

fn rule_processo_dominante(ctx: &InsightContext) -> Option<String> {
    let total = ctx.stats.total_tickets as u64;
    if total == 0 {
        return None;
    }
    let top = get_process_chart_data(ctx.tickets).into_iter().next()?;
    let processo_pct = pct(top.value, total);
    if processo_pct > ctx.config.limite_processo_pct {
        Some(format!(
            "🏭 O processo \"{}\" concentra {processo_pct}% dos chamados. Sugestão: Criar base de conhecimento específica para este módulo.",
            top.name
        ))
    } else {
        None
    }
}

fn rule_processo_anomalia(ctx: &InsightContext) -> Option<String> {
    let data = get_process_chart_data(ctx.tickets);
    let (top, segundo) = match (data.first(), data.get(1)) {
        (Some(a), Some(b)) if b.value > 0 => (a, b),
        _ => return None,
    };
    let crescimento =
        ((top.value as f64 - segundo.value as f64) / segundo.value as f64 * 100.0).round() as i64;
    if crescimento > ctx.config.limite_crescimento_pct {
        Some(format!(
            "📈 \"{}\" tem {crescimento}% mais tickets que \"{}\". Verificar se há problemas recorrentes.",
            top.name, segundo.name
        ))
    } else {
        None
    }
}

fn rule_modulo(ctx: &InsightContext) -> Option<String> {
    let total = ctx.stats.total_tickets as u64;
    if total == 0 {
        return None;
    }
    let top = get_module_chart_data(ctx.tickets).into_iter().next()?;
    let limite = total as f64 * ctx.config.limite_modulo_pct as f64 / 100.0;
    if top.value as f64 > limite {
        Some(format!(
            "📦 O módulo \"{}\" representa {}% dos tickets. Oportunidade para treinamento específico.",
            top.name,
            pct(top.value, total)
        ))
    } else {
        None
    }
}

fn rule_solicitante(ctx: &InsightContext) -> Option<String> {
    let top = get_top_requesters(ctx.tickets).into_iter().next()?;
    if top.value <= ctx.config.minimo_tickets_solicitante {
        return None;
    }
    let em_aberto = ctx
        .tickets
        .iter()
        .filter(|t| t.nome_solicitante == top.name && status_contains(t, "aberto"))
        .count();
    Some(format!(
        "👤 {} é o usuário mais ativo com {} tickets ({em_aberto} em aberto). Considerar suporte personalizado.",
        top.name, top.value
    ))
}

fn rule_tipo(ctx: &InsightContext) -> Option<String> {
    let total = ctx.stats.total_tickets as u64;
    if total == 0 {
        return None;
    }
    let top = get_type_chart_data(ctx.tickets).into_iter().next()?;
    let limite = total as f64 * ctx.config.limite_tipo_pct as f64 / 100.0;
    if top.value as f64 > limite {
        Some(format!(
            "🔍 {}% dos tickets são do tipo \"{}\". Avaliar criação de documentação preventiva.",
            pct(top.value, total),
            top.name
        ))
    } else {
        None
    }
}

fn rule_tag(ctx: &InsightContext) -> Option<String> {
    let top = get_tags_chart_data(ctx.tickets).into_iter().next()?;
    if top.value > ctx.config.minimo_ocorrencias_tag {
        Some(format!(
            "🏷️ A tag \"{}\" aparece em {} tickets. Padrão identificado para análise.",
            top.name, top.value
        ))
    } else {
        None
    }
}
