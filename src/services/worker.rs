use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::backup::{run_backup, run_restore, BackupCrypto, RemoteBackup};
use super::storage::Persistence;
use crate::model::{Account, GitSettings};

/// Work the UI loop hands to the background worker
#[derive(Debug, Clone)]
pub enum ServiceRequest {
    /// Persist the full list in canonical order
    SaveAccounts(Vec<Account>),

    /// Persist token and gist id
    SaveGitSettings(GitSettings),

    /// Encrypt and upload the list
    Backup {
        token: String,
        gist_id: String,
        password: String,
        accounts: Vec<Account>,
    },

    /// Download and decrypt a list
    Restore {
        token: String,
        gist_id: String,
        password: String,
    },
}

/// Results delivered back to the UI loop
#[derive(Debug)]
pub enum ServiceResponse {
    AccountsSaved(Result<()>),

    SettingsSaved(Result<()>),

    BackupFinished {
        token: String,
        gist_id: Result<String>,
    },

    RestoreFinished(Result<Vec<Account>>),
}

/// Collaborators used by the worker
#[derive(Clone)]
pub struct Services {
    pub persistence: Arc<dyn Persistence>,
    pub crypto: Arc<dyn BackupCrypto>,
    pub remote: Arc<dyn RemoteBackup>,
}

/// Background worker
///
/// Persistence requests run one at a time in arrival order, so the last
/// `SaveAccounts` sent is the one that sticks. Backup and restore jobs run
/// on their own tasks since they may wait on the network.
pub struct ServiceWorker {
    services: Services,
    response_tx: mpsc::UnboundedSender<ServiceResponse>,
}

impl ServiceWorker {
    pub fn new(services: Services, response_tx: mpsc::UnboundedSender<ServiceResponse>) -> Self {
        Self {
            services,
            response_tx,
        }
    }

    async fn handle(&self, request: ServiceRequest) {
        match request {
            ServiceRequest::SaveAccounts(accounts) => {
                tracing::debug!(count = accounts.len(), "saving accounts");
                let result = self.services.persistence.save_accounts(&accounts).await;
                if let Err(e) = &result {
                    tracing::warn!("save failed: {:#}", e);
                }
                let _ = self.response_tx.send(ServiceResponse::AccountsSaved(result));
            }

            ServiceRequest::SaveGitSettings(settings) => {
                let result = self.services.persistence.save_git_settings(&settings).await;
                let _ = self.response_tx.send(ServiceResponse::SettingsSaved(result));
            }

            ServiceRequest::Backup {
                token,
                gist_id,
                password,
                accounts,
            } => {
                let services = self.services.clone();
                let response_tx = self.response_tx.clone();
                tokio::spawn(async move {
                    tracing::info!(count = accounts.len(), "backup started");
                    let result = run_backup(
                        services.crypto.as_ref(),
                        services.remote.as_ref(),
                        &token,
                        &gist_id,
                        &password,
                        &accounts,
                    )
                    .await;

                    // Remember the gist the backup landed in
                    if let Ok(new_id) = &result {
                        let settings = GitSettings {
                            token: token.clone(),
                            gist_id: new_id.clone(),
                        };
                        if let Err(e) = services.persistence.save_git_settings(&settings).await {
                            tracing::warn!("failed to save backup settings: {:#}", e);
                        }
                    }
                    let _ = response_tx.send(ServiceResponse::BackupFinished {
                        token,
                        gist_id: result,
                    });
                });
            }

            ServiceRequest::Restore {
                token,
                gist_id,
                password,
            } => {
                let services = self.services.clone();
                let response_tx = self.response_tx.clone();
                tokio::spawn(async move {
                    tracing::info!("restore started");
                    let result = run_restore(
                        services.crypto.as_ref(),
                        services.remote.as_ref(),
                        &token,
                        &gist_id,
                        &password,
                    )
                    .await;
                    let _ = response_tx.send(ServiceResponse::RestoreFinished(result));
                });
            }
        }
    }
}

/// Spawn the service worker
pub fn spawn_service_worker(
    services: Services,
) -> (
    mpsc::UnboundedSender<ServiceRequest>,
    mpsc::UnboundedReceiver<ServiceResponse>,
    JoinHandle<()>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ServiceRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ServiceResponse>();

    let handle = tokio::spawn(async move {
        let worker = ServiceWorker::new(services, response_tx);
        while let Some(request) = request_rx.recv().await {
            worker.handle(request).await;
        }
        tracing::debug!("service worker stopped");
    });

    (request_tx, response_rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::backup::Unconfigured;
    use crate::services::storage::AccountDb;

    fn services(db: Arc<AccountDb>) -> Services {
        Services {
            persistence: db,
            crypto: Arc::new(Unconfigured),
            remote: Arc::new(Unconfigured),
        }
    }

    #[tokio::test]
    async fn test_saves_apply_in_order() {
        let db = Arc::new(AccountDb::new_in_memory().unwrap());
        let (tx, mut rx, _handle) = spawn_service_worker(services(db.clone()));

        let first = vec![Account::new("a", "", "AAAA")];
        let second = vec![Account::new("b", "", "BBBB"), Account::new("c", "", "CCCC")];
        tx.send(ServiceRequest::SaveAccounts(first)).unwrap();
        tx.send(ServiceRequest::SaveAccounts(second.clone())).unwrap();

        for _ in 0..2 {
            assert!(matches!(rx.recv().await, Some(ServiceResponse::AccountsSaved(Ok(())))));
        }
        assert_eq!(db.load_accounts().await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_backup_error_is_reported() {
        let db = Arc::new(AccountDb::new_in_memory().unwrap());
        let (tx, mut rx, _handle) = spawn_service_worker(services(db));

        tx.send(ServiceRequest::Backup {
            token: "t".into(),
            gist_id: String::new(),
            password: "p".into(),
            accounts: vec![],
        })
        .unwrap();

        match rx.recv().await {
            Some(ServiceResponse::BackupFinished { gist_id: Err(e), .. }) => {
                assert_eq!(e.to_string(), "Backup encryption is not configured");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
