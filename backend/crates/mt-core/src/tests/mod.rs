
use crate::{
    Document, DocumentPath, DocumentStore, ErrorKind, IdentityError, IdentityProvider,
    IdentityRecord, StoreError, Uid,
};

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

// =========================================================================
// In-memory test doubles
// =========================================================================

/// Document store double with an optional injected failure
#[derive(Default)]
pub(crate) struct InMemoryStore {
    documents: Mutex<BTreeMap<DocumentPath, Document>>,
    fail_with: Mutex<Option<ErrorKind>>,
    pub(crate) delete_calls: AtomicUsize,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seed(&self, path: &str) {
        let path = DocumentPath::parse(path).unwrap();
        let document = Document::new(path.clone(), serde_json::json!({ "seeded": true }));
        self.documents.lock().unwrap().insert(path, document);
    }

    pub(crate) fn fail_deletes_with(&self, kind: ErrorKind) {
        *self.fail_with.lock().unwrap() = Some(kind);
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.documents
            .lock()
            .unwrap()
            .keys()
            .map(|p| p.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn set(&self, document: &Document) -> Result<(), StoreError> {
        self.documents
            .lock()
            .unwrap()
            .insert(document.path.clone(), document.clone());
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.lock().unwrap().get(path).cloned())
    }

    async fn list_subtree(&self, root: &DocumentPath) -> Result<Vec<DocumentPath>, StoreError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.is_same_or_descendant_of(root))
            .cloned()
            .collect())
    }

    async fn recursive_delete(&self, root: &DocumentPath) -> Result<u64, StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(kind) = *self.fail_with.lock().unwrap() {
            return Err(StoreError::operation(kind, "injected store failure"));
        }

        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|path, _| !path.is_same_or_descendant_of(root));
        Ok((before - documents.len()) as u64)
    }
}

/// Identity provider double with an optional injected failure
#[derive(Default)]
pub(crate) struct InMemoryIdentityProvider {
    users: Mutex<HashMap<Uid, IdentityRecord>>,
    fail_with: Mutex<Option<ErrorKind>>,
    pub(crate) delete_calls: AtomicUsize,
}

impl InMemoryIdentityProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(self, uid: &str) -> Self {
        let uid = Uid::parse(uid).unwrap();
        let record = IdentityRecord::new(uid.clone(), crate::SignInProvider::Password);
        self.users.lock().unwrap().insert(uid, record);
        self
    }

    pub(crate) fn fail_deletes_with(&self, kind: ErrorKind) {
        *self.fail_with.lock().unwrap() = Some(kind);
    }

    pub(crate) fn contains(&self, uid: &str) -> bool {
        self.users
            .lock()
            .unwrap()
            .contains_key(&Uid::parse(uid).unwrap())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_user(&self, record: &IdentityRecord) -> Result<(), IdentityError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&record.uid) {
            return Err(IdentityError::operation(
                ErrorKind::AlreadyExists,
                "uid already registered",
            ));
        }
        users.insert(record.uid.clone(), record.clone());
        Ok(())
    }

    async fn get_user(&self, uid: &Uid) -> Result<Option<IdentityRecord>, IdentityError> {
        Ok(self.users.lock().unwrap().get(uid).cloned())
    }

    async fn delete_user(&self, uid: &Uid) -> Result<(), IdentityError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(kind) = *self.fail_with.lock().unwrap() {
            return Err(IdentityError::operation(kind, "injected identity failure"));
        }

        match self.users.lock().unwrap().remove(uid) {
            Some(_) => Ok(()),
            None => Err(IdentityError::user_not_found(uid.as_str())),
        }
    }
}
