// src/services/upload_service.rs

use std::path::{Path, PathBuf};

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{
        error::AppError,
        upload::{generate_stored_name, public_url},
    },
    middleware::upload::{MultipartForm, PendingFile},
};

/// Arquivo gravado no diretório de uploads.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub field_name: String,
    pub original_name: String,
    pub file_name: String,
    #[schema(example = "/uploads/files-1700000000000-123456789.jpg")]
    pub url: String,
    pub size: usize,
}

#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn persist(&self, file: &PendingFile) -> Result<StoredFile, AppError> {
        // Criado no primeiro uso (idempotente)
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = generate_stored_name(&file.field, &file.original_name);
        tokio::fs::write(self.dir.join(&file_name), &file.bytes).await?;

        tracing::info!("📎 Arquivo salvo: {} ({} bytes)", file_name, file.bytes.len());

        Ok(StoredFile {
            field_name: file.field.clone(),
            original_name: file.original_name.clone(),
            url: public_url(&file_name),
            file_name,
            size: file.bytes.len(),
        })
    }

    // Grava todos; se algum falhar, apaga os que já foram gravados
    pub async fn persist_all<'a, I>(&self, files: I) -> Result<Vec<StoredFile>, AppError>
    where
        I: IntoIterator<Item = &'a PendingFile>,
    {
        let mut stored = Vec::new();
        for file in files {
            match self.persist(file).await {
                Ok(s) => stored.push(s),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    // Limpeza de melhor esforço: falha aqui só vira log
    pub async fn discard(&self, files: &[StoredFile]) {
        for file in files {
            if let Err(e) = tokio::fs::remove_file(self.dir.join(&file.file_name)).await {
                tracing::warn!("Não foi possível remover {}: {}", file.file_name, e);
            }
        }
    }

    /// Upload avulso (campo `files`): pelo menos um arquivo.
    pub async fn store_batch(&self, form: &MultipartForm) -> Result<Vec<StoredFile>, AppError> {
        if form.files.is_empty() {
            return Err(AppError::BadRequest("No files uploaded".to_string()));
        }
        self.persist_all(&form.files).await
    }
}
