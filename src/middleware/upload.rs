// src/middleware/upload.rs
//
// Lê o multipart inteiro para memória aplicando as regras de upload. Nada é
// gravado em disco aqui: quem grava é o UploadStore, depois das checagens de negócio.

use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
};

use crate::common::{
    error::AppError,
    upload::{check_file_type, find_field, AllowedKind, FileField, MAX_FILE_SIZE},
};

/// Arquivo aceito (campo, tipo e tamanho conferidos), ainda só em memória.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub field: String,
    pub original_name: String,
    pub kind: AllowedKind,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: Vec<(String, String)>,
    pub files: Vec<PendingFile>,
}

impl MultipartForm {
    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.push((name.into(), value.into()));
    }

    // Primeiro valor não vazio do campo texto
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(k, v)| k == name && !v.trim().is_empty())
            .map(|(_, v)| v.as_str())
    }

    // Todos os valores de um campo repetido, na ordem de envio
    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.texts
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn files_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a PendingFile> + 'a {
        self.files.iter().filter(move |f| f.field == field)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        // Estouro do DefaultBodyLimit chega como erro de stream com status 413
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

async fn read_limited(mut field: Field<'_>) -> Result<Bytes, AppError> {
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if buf.len() + chunk.len() > MAX_FILE_SIZE {
            return Err(AppError::PayloadTooLarge);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}

/// Consome o multipart validando cada parte de arquivo contra `fields`.
pub async fn read_multipart(mut multipart: Multipart, fields: &[FileField]) -> Result<MultipartForm, AppError> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field.text().await?;
            form.push_text(name, value);
            continue;
        };

        let Some(allowed) = find_field(fields, &name) else {
            tracing::warn!("Upload recusado: campo inesperado '{}'", name);
            return Err(AppError::UnexpectedField(name));
        };

        let already = form.files.iter().filter(|f| f.field == name).count();
        if already >= allowed.max_count {
            tracing::warn!("Upload recusado: arquivos demais em '{}'", name);
            return Err(AppError::UnexpectedField(format!(
                "{} (max {} file(s))",
                name, allowed.max_count
            )));
        }

        let kind = check_file_type(&file_name, field.content_type()).inspect_err(|_| {
            tracing::warn!("Upload recusado: tipo não permitido '{}'", file_name);
        })?;

        let bytes = read_limited(field).await?;
        form.files.push(PendingFile {
            field: name,
            original_name: file_name,
            kind,
            bytes,
        });
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(field: &str, name: &str) -> PendingFile {
        PendingFile {
            field: field.into(),
            original_name: name.into(),
            kind: AllowedKind::Pdf,
            bytes: Bytes::from_static(b"%PDF"),
        }
    }

    #[test]
    fn text_lookup_skips_blank_values() {
        let form = MultipartForm {
            texts: vec![
                ("notes".into(), "  ".into()),
                ("notes".into(), "segera".into()),
                ("otherDocumentNames".into(), "Akta".into()),
                ("otherDocumentNames".into(), "".into()),
            ],
            files: vec![],
        };
        assert_eq!(form.text("notes"), Some("segera"));
        assert_eq!(form.text("purpose"), None);
        assert_eq!(form.texts("otherDocumentNames"), vec!["Akta", ""]);
    }

    #[test]
    fn files_are_grouped_by_field() {
        let form = MultipartForm {
            texts: vec![],
            files: vec![file("id-card", "ktp.pdf"), file("files", "a.pdf"), file("files", "b.pdf")],
        };
        assert_eq!(form.files_for("files").count(), 2);
        assert_eq!(form.files_for("id-card").next().unwrap().original_name, "ktp.pdf");
        assert_eq!(form.files_for("family-card").count(), 0);
    }
}
