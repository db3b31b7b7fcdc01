//! Moderator - the operations exposed to the transport layer.
//!
//! Each privileged operation starts with an explicit `authorize` call.
//! Targets arrive already resolved; nothing here inspects message context.

use crate::diagnostics::{Diagnostic, DiagnosticReport};
use crate::dispatch::ExclusionDispatcher;
use crate::gate::{MembershipLookup, PermissionGate};
use crate::rules::RuleBook;
use crate::warnings::WarningEngine;
use groupwarden_core::{
    Error, GroupId, Result, Role, Sanction, SanctionIntent, UserId, WarnOutcome, WardenConfig,
};
use groupwarden_store::{RuleStore, WarningStore};
use std::sync::Arc;
use tracing::{error, info};

pub struct Moderator {
    config: Arc<WardenConfig>,
    gate: PermissionGate,
    warnings: WarningEngine,
    rules: RuleBook,
    warning_store: Arc<dyn WarningStore>,
    rule_store: Arc<dyn RuleStore>,
}

impl Moderator {
    pub fn new(
        config: Arc<WardenConfig>,
        membership: Arc<dyn MembershipLookup>,
        warning_store: Arc<dyn WarningStore>,
        rule_store: Arc<dyn RuleStore>,
    ) -> Self {
        Self {
            gate: PermissionGate::new(&config, membership),
            warnings: WarningEngine::new(warning_store.clone(), config.max_warnings),
            rules: RuleBook::new(rule_store.clone()),
            config,
            warning_store,
            rule_store,
        }
    }

    /// Admin: add one warning to `target`.
    pub async fn warn(
        &self,
        caller: UserId,
        group_id: GroupId,
        target: UserId,
    ) -> Result<WarnOutcome> {
        self.gate.authorize(caller, group_id, Role::Admin).await?;
        self.warnings.warn(group_id, target)
    }

    /// Admin: warn and, on the crossing, exclude through `dispatcher`.
    ///
    /// If the dispatcher fails the warning is retracted, so the count is what
    /// it was before the call and re-issuing the warn crosses again.
    pub async fn warn_and_enforce(
        &self,
        caller: UserId,
        group_id: GroupId,
        target: UserId,
        dispatcher: &dyn ExclusionDispatcher,
    ) -> Result<WarnOutcome> {
        let outcome = self.warn(caller, group_id, target).await?;
        if let Some(intent) = outcome.intent.clone() {
            let dispatched = self.dispatch(dispatcher, &SanctionIntent::from(intent)).await;
            if let Err(e) = dispatched {
                if let Err(undo) = self.warnings.retract(group_id, target) {
                    error!(%group_id, %target, error = %undo, "could not retract warning");
                }
                return Err(e);
            }
        }
        Ok(outcome)
    }

    /// Admin: clear `target`'s warnings.
    pub async fn reset_warn(
        &self,
        caller: UserId,
        group_id: GroupId,
        target: UserId,
    ) -> Result<()> {
        self.gate.authorize(caller, group_id, Role::Admin).await?;
        self.warnings.reset(group_id, target)
    }

    pub fn query_warn(&self, group_id: GroupId, target: UserId) -> Result<u32> {
        self.warnings.query(group_id, target)
    }

    /// Admin: replace the group's rules.
    pub async fn set_rules(&self, caller: UserId, group_id: GroupId, text: &str) -> Result<()> {
        self.gate.authorize(caller, group_id, Role::Admin).await?;
        self.rules.set(group_id, text)
    }

    pub fn get_rules(&self, group_id: GroupId) -> Result<Option<String>> {
        self.rules.get(group_id)
    }

    /// Admin: decide a manual sanction. The caller dispatches the returned intent.
    pub async fn sanction(
        &self,
        caller: UserId,
        group_id: GroupId,
        target: UserId,
        sanction: Sanction,
    ) -> Result<SanctionIntent> {
        self.gate.authorize(caller, group_id, Role::Admin).await?;
        info!(%caller, %group_id, %target, %sanction, "sanction issued");
        Ok(SanctionIntent::manual(group_id, target, sanction))
    }

    /// Owner: run one of the fixed diagnostics.
    pub async fn diagnose(
        &self,
        caller: UserId,
        group_id: GroupId,
        diagnostic: Diagnostic,
    ) -> Result<DiagnosticReport> {
        self.gate.authorize(caller, group_id, Role::Owner).await?;
        Ok(match diagnostic {
            Diagnostic::Version => DiagnosticReport::Version(env!("CARGO_PKG_VERSION")),
            Diagnostic::Config => DiagnosticReport::Config {
                owner_id: self.config.owner_id,
                max_warnings: self.config.max_warnings,
            },
            Diagnostic::Stats => DiagnosticReport::Stats {
                warning_records: self.warning_store.warning_records()?,
                rule_records: self.rule_store.rule_records()?,
            },
        })
    }

    /// Hand an intent to the dispatcher. Failures are reported, never retried.
    pub async fn dispatch(
        &self,
        dispatcher: &dyn ExclusionDispatcher,
        intent: &SanctionIntent,
    ) -> Result<()> {
        dispatcher.apply(intent).await.map_err(|e| {
            error!(
                group_id = %intent.group_id, user_id = %intent.user_id,
                sanction = %intent.sanction, error = %e, "dispatch failed"
            );
            Error::exclusion_failed(intent.group_id, intent.user_id, e.to_string())
        })
    }
}
