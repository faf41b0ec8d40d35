//! In-memory analysis store
//!
//! Keeps analyses serialized as JSON keyed by document id, the same
//! shape a persistent backend would write.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::{AnalysisStore, DecisioError, DocumentAnalysis, Result};

/// Analysis store backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemoryAnalysisStore {
    records: RwLock<BTreeMap<String, String>>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored analyses
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> DecisioError {
    DecisioError::Storage("analysis store lock poisoned".to_string())
}

#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn save(&self, analysis: &DocumentAnalysis) -> Result<()> {
        let encoded = serde_json::to_string(analysis)?;
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(analysis.document_id.clone(), encoded);
        tracing::debug!(document_id = %analysis.document_id, "analysis stored");
        Ok(())
    }

    async fn get(&self, document_id: &str) -> Result<Option<DocumentAnalysis>> {
        let encoded = {
            let records = self.records.read().map_err(poisoned)?;
            records.get(document_id).cloned()
        };

        match encoded {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.keys().cloned().collect())
    }
}
