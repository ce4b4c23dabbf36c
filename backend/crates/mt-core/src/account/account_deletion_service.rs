use crate::{
    AccountDeletionError, CallerContext, DataLayout, DeleteAccountResponse, DocumentStore,
    ErrorLocation, IdentityError, IdentityProvider, StoreError,
};

use std::panic::Location;
use std::sync::Arc;

use log::{error, info, warn};

/// Hard-deletes the caller's data and then the caller's identity.
///
/// Data deletion strictly precedes identity deletion. A failure at either
/// step stops the pipeline and is returned as-is; nothing is rolled back.
#[derive(Clone)]
pub struct AccountDeletionService {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    layout: DataLayout,
}

impl AccountDeletionService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        layout: DataLayout,
    ) -> Self {
        Self {
            store,
            identity,
            layout,
        }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub async fn delete_account(
        &self,
        caller: &CallerContext,
    ) -> Result<DeleteAccountResponse, AccountDeletionError> {
        let location = ErrorLocation::from(Location::caller());

        // The target is always the caller's own verified uid
        let Some(auth) = caller.auth.as_ref() else {
            warn!("Account deletion rejected: no verified caller identity");
            return Err(AccountDeletionError::Unauthenticated {
                message: "The function must be called while authenticated.".to_string(),
                location,
            });
        };
        let uid = &auth.uid;

        let root = self.layout.root_for(uid).map_err(|e| {
            let source = StoreError::InvalidPath {
                path: format!("{}/{}", self.layout.users_collection(), uid),
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
            AccountDeletionError::StoreFailure {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        info!("Deleting account {uid}: removing data under {root}");

        let removed = match self.store.recursive_delete(&root).await {
            Ok(removed) => removed,
            Err(source) => {
                error!(
                    "Account {uid}: data deletion failed ({}), identity left intact",
                    source.kind()
                );
                return Err(AccountDeletionError::StoreFailure { source, location });
            }
        };

        info!("Account {uid}: removed {removed} documents");

        match self.identity.delete_user(uid).await {
            Ok(()) => {}
            Err(IdentityError::UserNotFound { .. }) => {
                // Already gone, e.g. a retry after a previous partial run
                warn!("Account {uid}: identity record already absent");
            }
            Err(source) => {
                error!(
                    "Account {uid}: identity deletion failed ({}) after data was removed",
                    source.kind()
                );
                return Err(AccountDeletionError::IdentityProviderFailure { source, location });
            }
        }

        info!("Account {uid} deleted");

        Ok(DeleteAccountResponse::ok())
    }
}
