//! DNS 记录资源生命周期服务

use std::sync::Arc;

use dns_record_provider::DnsClient;

use crate::error::{ResourceError, ResourceResult};
use crate::services::{log_failure, record_call_error, resolve_zone};
use crate::types::{RecordConfig, ResourceData};
use crate::validation::validate_config;

/// Create/read/update/delete of a single declared record.
pub struct RecordService {
    client: Arc<dyn DnsClient>,
}

impl RecordService {
    #[must_use]
    pub fn new(client: Arc<dyn DnsClient>) -> Self {
        Self { client }
    }

    /// Create the record and return its reconciled state.
    ///
    /// State is only returned once both the create and the read-back succeed.
    pub async fn create(&self, config: &RecordConfig) -> ResourceResult<ResourceData> {
        self.try_create(config)
            .await
            .inspect_err(|e| log_failure("create", e))
    }

    /// Refresh every remote-derived field of `state`. `state` is left untouched on failure.
    pub async fn read(&self, state: &mut ResourceData) -> ResourceResult<()> {
        self.try_read(state)
            .await
            .inspect_err(|e| log_failure("read", e))
    }

    /// Replace the remote record with `config` and reconcile `state`.
    pub async fn update(&self, state: &mut ResourceData, config: &RecordConfig) -> ResourceResult<()> {
        self.try_update(state, config)
            .await
            .inspect_err(|e| log_failure("update", e))
    }

    /// Delete the remote record and clear `state`.
    pub async fn delete(&self, state: &mut ResourceData) -> ResourceResult<()> {
        self.try_delete(state)
            .await
            .inspect_err(|e| log_failure("delete", e))
    }

    async fn try_create(&self, config: &RecordConfig) -> ResourceResult<ResourceData> {
        validate_config(config)?;
        let record = config.to_create_record();

        let zone_id = resolve_zone(self.client.as_ref(), &config.domain).await?;
        log::debug!(
            "Creating {} record '{}' in zone {zone_id}",
            config.record_type,
            config.name
        );

        let created = self
            .client
            .create_record(&zone_id, &record)
            .await
            .map_err(|source| ResourceError::Remote {
                operation: "create",
                context: format!("zone {zone_id}, name {}", config.name),
                source,
            })?;

        if created.id.is_empty() {
            return Err(ResourceError::EmptyRecordId {
                name: config.name.clone(),
            });
        }
        log::info!(
            "Created {} record '{}' with id {}",
            config.record_type,
            config.name,
            created.id
        );

        let mut state = ResourceData::from_config(created.id, config);
        if let Err(e) = self.try_read(&mut state).await {
            log::error!(
                "Record {} was created but could not be read back",
                state.id
            );
            return Err(e);
        }
        Ok(state)
    }

    async fn try_read(&self, state: &mut ResourceData) -> ResourceResult<()> {
        if state.is_new() {
            return Err(ResourceError::MissingId { operation: "read" });
        }

        let zone_id = resolve_zone(self.client.as_ref(), &state.domain).await?;
        let record = self
            .client
            .get_record(&zone_id, &state.id)
            .await
            .map_err(|e| record_call_error("read", &zone_id, &state.id, e))?;

        state.apply_record(&record);
        if state.zone_id.is_empty() {
            state.zone_id = zone_id;
        }
        Ok(())
    }

    async fn try_update(&self, state: &mut ResourceData, config: &RecordConfig) -> ResourceResult<()> {
        if state.is_new() {
            return Err(ResourceError::MissingId {
                operation: "update",
            });
        }
        if state.requires_replacement(config) {
            return Err(ResourceError::ReplacementRequired {
                field: "type",
                from: state.record_type.clone(),
                to: config.record_type.clone(),
            });
        }
        validate_config(config)?;
        let record = config.to_update_record();

        let zone_id = resolve_zone(self.client.as_ref(), &config.domain).await?;
        self.client
            .update_record(&zone_id, &state.id, &record)
            .await
            .map_err(|e| record_call_error("update", &zone_id, &state.id, e))?;
        log::info!("Updated record {} ('{}')", state.id, config.name);

        let mut next = state.clone();
        next.domain.clone_from(&config.domain);
        next.name.clone_from(&config.name);
        self.try_read(&mut next).await?;
        *state = next;
        Ok(())
    }

    async fn try_delete(&self, state: &mut ResourceData) -> ResourceResult<()> {
        if state.is_new() {
            return Err(ResourceError::MissingId {
                operation: "delete",
            });
        }

        let zone_id = resolve_zone(self.client.as_ref(), &state.domain).await?;
        self.client
            .delete_record(&zone_id, &state.id)
            .await
            .map_err(|e| record_call_error("delete", &zone_id, &state.id, e))?;
        log::info!("Deleted record {} ('{}')", state.id, state.name);

        *state = ResourceData::default();
        Ok(())
    }
}
