use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::filter::{filter_tickets, FilterCriteria};
use crate::parser::types::Ticket;

/// Ticket de sequenciamento devolvido por [`SessionStore::begin_load`].
/// Apenas o token mais recente consegue efetivar um `commit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

#[derive(Default)]
struct Inner {
    tickets: Arc<Vec<Ticket>>,
    filters: FilterCriteria,
    latest_issued: u64,
}

/// Estado de sessão em memória: a coleção corrente e os critérios de filtro
/// ativos. A coleção é trocada atomicamente por inteiro, nunca editada no
/// lugar; leitores recebem um `Arc` da versão vigente no momento da chamada.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<Inner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|e| AppError::Custom(format!("Mutex poisoned: {e}")))
    }

    /// Inicia um carregamento e invalida todos os tokens anteriores ainda
    /// pendentes. Chamar antes de disparar o parse/fetch.
    pub fn begin_load(&self) -> Result<LoadToken, AppError> {
        let mut inner = self.lock()?;
        inner.latest_issued += 1;
        Ok(LoadToken(inner.latest_issued))
    }

    /// Efetiva o resultado de um carregamento. Retorna `Ok(false)` sem tocar
    /// no estado quando o token foi superado por um `begin_load` posterior —
    /// resultados fora de ordem nunca sobrescrevem os mais novos.
    pub fn commit(&self, token: LoadToken, tickets: Vec<Ticket>) -> Result<bool, AppError> {
        let mut inner = self.lock()?;
        if token.0 != inner.latest_issued {
            tracing::warn!(
                token = token.0,
                latest = inner.latest_issued,
                "carregamento obsoleto descartado"
            );
            return Ok(false);
        }
        inner.tickets = Arc::new(tickets);
        Ok(true)
    }

    /// Troca a coleção diretamente, sem sequenciamento (carga síncrona).
    pub fn replace(&self, tickets: Vec<Ticket>) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        inner.latest_issued += 1;
        inner.tickets = Arc::new(tickets);
        Ok(())
    }

    pub fn tickets(&self) -> Result<Arc<Vec<Ticket>>, AppError> {
        Ok(Arc::clone(&self.lock()?.tickets))
    }

    pub fn set_filters(&self, filters: FilterCriteria) -> Result<(), AppError> {
        self.lock()?.filters = filters;
        Ok(())
    }

    pub fn filters(&self) -> Result<FilterCriteria, AppError> {
        Ok(self.lock()?.filters.clone())
    }

    /// Coleção corrente projetada pelos critérios ativos.
    pub fn filtered_tickets(&self) -> Result<Vec<Ticket>, AppError> {
        let inner = self.lock()?;
        Ok(filter_tickets(&inner.tickets, &inner.filters))
    }

    /// Descarta coleção e filtros; tokens pendentes ficam obsoletos.
    pub fn clear(&self) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        inner.latest_issued += 1;
        inner.tickets = Arc::new(Vec::new());
        inner.filters = FilterCriteria::default();
        Ok(())
    }
}
