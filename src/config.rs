use serde::{Deserialize, Serialize};

/// Limiares das regras heurísticas de insight. Os valores padrão são os da
/// bateria original; overrides chegam por desserialização (JSON parcial).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Benchmark de tempo de resolução, em horas (regra administrativa).
    pub benchmark_resolucao_horas: i64,
    /// % de tickets abertos acima do qual há alerta de backlog.
    pub limite_abertos_pct: i64,
    /// % de tickets fechados acima do qual há elogio de gestão.
    pub limite_fechados_pct: i64,
    /// % de tickets escalados que dispara revisão de processos.
    pub limite_escalados_pct: i64,
    /// % de concentração do processo dominante.
    pub limite_processo_pct: i64,
    /// Crescimento relativo (%) entre 1º e 2º processo que vira anomalia.
    pub limite_crescimento_pct: i64,
    /// % de concentração do módulo dominante.
    pub limite_modulo_pct: i64,
    /// Mínimo de tickets para sugerir suporte dedicado ao solicitante top.
    pub minimo_tickets_solicitante: u64,
    /// % de concentração do tipo dominante.
    pub limite_tipo_pct: i64,
    /// Mínimo de ocorrências para destacar a tag mais frequente.
    pub minimo_ocorrencias_tag: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            benchmark_resolucao_horas: 12,
            limite_abertos_pct: 60,
            limite_fechados_pct: 80,
            limite_escalados_pct: 15,
            limite_processo_pct: 35,
            limite_crescimento_pct: 50,
            limite_modulo_pct: 30,
            minimo_tickets_solicitante: 10,
            limite_tipo_pct: 30,
            minimo_ocorrencias_tag: 5,
        }
    }
}
