use std::sync::Arc;

use tracing::{info, warn};

use crate::db::ClientStore;
use crate::error::ServiceError;
use crate::files::FileStore;
use crate::models::{Client, ClientInput, NewClient};

/// A photo decoded from the multipart request. An upload with empty bytes
/// counts as no upload at all.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Orchestrates cpf uniqueness, photo lifecycle and persistence.
///
/// The duplicate check, photo write and persist are three separate calls, not
/// one transaction: a photo written here is left behind if the following
/// insert fails, and two concurrent creates with the same cpf can both pass
/// the check (the relational backend's unique index then rejects one).
pub struct ClientService {
    store: Arc<dyn ClientStore>,
    files: FileStore,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>, files: FileStore) -> Self {
        Self { store, files }
    }

    /// Create a client, rejecting duplicate cpfs and storing the photo if one
    /// was uploaded. Field shapes are the caller's responsibility.
    pub async fn create(
        &self,
        input: ClientInput,
        photo: Option<PhotoUpload>,
    ) -> Result<Client, ServiceError> {
        if let Some(existing) = self.store.find_by_cpf(&input.cpf).await? {
            return Err(ServiceError::DuplicateCpf(existing.cpf));
        }

        let photo_url = match photo {
            Some(upload) if !upload.is_empty() => Some(self.save_photo(&upload).await?),
            _ => None,
        };

        let created = self
            .store
            .insert(NewClient {
                name: input.name,
                email: input.email,
                cpf: input.cpf,
                phone: input.phone,
                photo_url,
            })
            .await?;

        info!(id = created.id, "created client");
        Ok(created)
    }

    /// Every registered client.
    pub async fn get_all(&self) -> Result<Vec<Client>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    /// Fetch one client by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Client, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Overwrite a client's fields, re-checking uniqueness when the cpf
    /// changes and replacing the stored photo when a new one is uploaded.
    pub async fn update(
        &self,
        id: i64,
        input: ClientInput,
        photo: Option<PhotoUpload>,
    ) -> Result<Client, ServiceError> {
        let mut existing = self.get_by_id(id).await?;

        existing.name = input.name;
        existing.email = input.email;
        existing.phone = input.phone;

        if existing.cpf != input.cpf {
            if let Some(other) = self.store.find_by_cpf(&input.cpf).await? {
                if other.id != id {
                    return Err(ServiceError::DuplicateCpf(input.cpf));
                }
            }
            existing.cpf = input.cpf;
        }

        if let Some(upload) = photo.filter(|p| !p.is_empty()) {
            if let Some(old) = existing.photo_url.take() {
                self.remove_photo(&old).await;
            }
            existing.photo_url = Some(self.save_photo(&upload).await?);
        }

        self.store.update(&existing).await?;
        info!(id, "updated client");
        Ok(existing)
    }

    /// Remove a client and its stored photo, if any.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get_by_id(id).await?;

        if let Some(name) = &existing.photo_url {
            self.remove_photo(name).await;
        }

        self.store.delete(id).await?;
        info!(id, "deleted client");
        Ok(())
    }

    async fn save_photo(&self, upload: &PhotoUpload) -> Result<String, ServiceError> {
        self.files
            .save(&upload.file_name, &upload.bytes)
            .await
            .map_err(ServiceError::FileStorage)
    }

    // Removal is best effort: a missing file is fine, anything else is
    // logged and the operation carries on.
    async fn remove_photo(&self, name: &str) {
        if let Err(err) = self.files.remove(name).await {
            warn!(file = %name, error = %err, "failed to remove stored photo");
        }
    }
}
