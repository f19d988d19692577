// src/services/letter_service.rs

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        upload::{BATCH_FIELD, FAMILY_CARD_FIELD, ID_CARD_FIELD, OTHER_DOCUMENTS_FIELD},
    },
    db::LetterRepository,
    middleware::{rbac::ensure_owner_or_admin, upload::MultipartForm},
    models::{
        auth::CurrentUser,
        letter::{
            Attachments, LetterDetail, LetterRequest, LetterType, NewLetterRequest, OtherDocument,
            UpdateLetterPayload,
        },
    },
    services::upload_service::{StoredFile, UploadStore},
};

pub const LETTER_TYPE_FIELD: &str = "letterType";
pub const PURPOSE_FIELD: &str = "purpose";
pub const NOTES_FIELD: &str = "notes";
pub const DOCUMENT_NAMES_FIELD: &str = "otherDocumentNames";

/// Campos texto obrigatórios do pedido (sem os anexos).
pub fn parse_letter_fields(form: &MultipartForm) -> Result<(LetterType, String, Option<String>), AppError> {
    let letter_type = form
        .text(LETTER_TYPE_FIELD)
        .ok_or_else(|| AppError::BadRequest("Letter type is required".to_string()))?
        .parse::<LetterType>()?;
    let purpose = form
        .text(PURPOSE_FIELD)
        .ok_or_else(|| AppError::BadRequest("Purpose is required".to_string()))?
        .trim()
        .to_string();
    let notes = form.text(NOTES_FIELD).map(|n| n.trim().to_string());
    Ok((letter_type, purpose, notes))
}

/// Monta os anexos a partir do que foi gravado. `other-documents` usa o nome
/// informado na mesma posição (ou "Document N"); `files` usa o nome original.
pub fn build_attachments(stored: &[StoredFile], document_names: &[&str]) -> Attachments {
    let mut attachments = Attachments::default();
    let mut other_index = 0;

    for file in stored {
        match file.field_name.as_str() {
            ID_CARD_FIELD => attachments.id_card_url = Some(file.url.clone()),
            FAMILY_CARD_FIELD => attachments.family_card_url = Some(file.url.clone()),
            OTHER_DOCUMENTS_FIELD => {
                let name = document_names
                    .get(other_index)
                    .map(|n| n.trim())
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Document {}", other_index + 1));
                other_index += 1;
                attachments.other_documents.push(OtherDocument {
                    document_name: name,
                    file_url: file.url.clone(),
                });
            }
            BATCH_FIELD => attachments.other_documents.push(OtherDocument {
                document_name: file.original_name.clone(),
                file_url: file.url.clone(),
            }),
            _ => {}
        }
    }
    attachments
}

#[derive(Clone)]
pub struct LetterService {
    repo: LetterRepository,
    uploads: UploadStore,
}

impl LetterService {
    pub fn new(repo: LetterRepository, uploads: UploadStore) -> Self {
        Self { repo, uploads }
    }

    pub async fn create(&self, applicant: &CurrentUser, form: MultipartForm) -> Result<LetterRequest, AppError> {
        // Valida o texto antes de gravar qualquer arquivo
        let (letter_type, purpose, notes) = parse_letter_fields(&form)?;

        let stored = self.uploads.persist_all(&form.files).await?;
        let attachments = build_attachments(&stored, &form.texts(DOCUMENT_NAMES_FIELD));

        let new_letter = NewLetterRequest {
            letter_type,
            purpose,
            notes,
            attachments,
        };

        match self.repo.create(applicant.id, new_letter).await {
            Ok(letter) => {
                tracing::info!("✉️ Pedido de carta criado: {} ({} anexos)", letter.id, stored.len());
                Ok(letter)
            }
            Err(e) => {
                self.uploads.discard(&stored).await;
                Err(e)
            }
        }
    }

    pub async fn list_own(&self, user: &CurrentUser) -> Result<Vec<LetterDetail>, AppError> {
        self.repo.list(Some(user.id), None).await
    }

    pub async fn list_all(&self) -> Result<Vec<LetterDetail>, AppError> {
        self.repo.list(None, None).await
    }

    pub async fn get(&self, user: &CurrentUser, id: Uuid) -> Result<LetterDetail, AppError> {
        let detail = self
            .repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Letter request"))?;
        ensure_owner_or_admin(user, detail.letter.applicant_id)?;
        Ok(detail)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateLetterPayload) -> Result<LetterRequest, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::not_found("Letter request"))
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Letter request"))?;
        ensure_owner_or_admin(user, current.applicant_id)?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Letter request"));
        }
        tracing::info!("🗑️ Pedido de carta removido: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(field: &str, original: &str, url: &str) -> StoredFile {
        StoredFile {
            field_name: field.into(),
            original_name: original.into(),
            file_name: url.trim_start_matches("/uploads/").into(),
            url: url.into(),
            size: 1,
        }
    }

    #[test]
    fn attachments_follow_the_field_they_came_from() {
        let files = vec![
            stored(ID_CARD_FIELD, "ktp.jpg", "/uploads/id-card-1-000000001.jpg"),
            stored(FAMILY_CARD_FIELD, "kk.pdf", "/uploads/family-card-1-000000002.pdf"),
            stored(OTHER_DOCUMENTS_FIELD, "a.pdf", "/uploads/other-documents-1-000000003.pdf"),
            stored(OTHER_DOCUMENTS_FIELD, "b.pdf", "/uploads/other-documents-1-000000004.pdf"),
            stored(OTHER_DOCUMENTS_FIELD, "c.pdf", "/uploads/other-documents-1-000000005.pdf"),
            stored(BATCH_FIELD, "surat nikah.pdf", "/uploads/files-1-000000006.pdf"),
        ];

        let a = build_attachments(&files, &["Akta Lahir", "  "]);

        assert_eq!(a.id_card_url.as_deref(), Some("/uploads/id-card-1-000000001.jpg"));
        assert_eq!(a.family_card_url.as_deref(), Some("/uploads/family-card-1-000000002.pdf"));
        let names: Vec<&str> = a.other_documents.iter().map(|d| d.document_name.as_str()).collect();
        assert_eq!(names, vec!["Akta Lahir", "Document 2", "Document 3", "surat nikah.pdf"]);
    }

    #[test]
    fn letter_fields_are_required_and_typed() {
        let mut form = MultipartForm::default();
        assert!(matches!(parse_letter_fields(&form), Err(AppError::BadRequest(_))));

        form.push_text(LETTER_TYPE_FIELD, "Nikah");
        form.push_text(PURPOSE_FIELD, "Menikah");
        assert!(matches!(parse_letter_fields(&form), Err(AppError::BadRequest(_))));

        let mut form = MultipartForm::default();
        form.push_text(LETTER_TYPE_FIELD, "ID-card");
        form.push_text(PURPOSE_FIELD, " Perpanjangan KTP ");
        let (kind, purpose, notes) = parse_letter_fields(&form).unwrap();
        assert_eq!(kind, LetterType::IdCard);
        assert_eq!(purpose, "Perpanjangan KTP");
        assert!(notes.is_none());
    }

    #[test]
    fn no_files_means_empty_attachments() {
        assert_eq!(build_attachments(&[], &[]), Attachments::default());
    }
}
