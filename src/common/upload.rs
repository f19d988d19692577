// src/common/upload.rs
//
// Regras do upload: limites, campos aceitos por endpoint, tipos permitidos e o
// formato do nome gravado em disco. Nada aqui toca o sistema de arquivos.

use std::path::Path;

use rand::Rng;
use validator::ValidationError;

use crate::common::error::AppError;

pub const MAX_FILE_SIZE_MB: usize = 5;
pub const MAX_FILE_SIZE: usize = MAX_FILE_SIZE_MB * 1024 * 1024;

// Prefixo público (ServeDir) dos arquivos gravados
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Um campo de arquivo aceito pelo endpoint e quantos arquivos ele pode receber.
#[derive(Debug, Clone, Copy)]
pub struct FileField {
    pub name: &'static str,
    pub max_count: usize,
}

pub const ID_CARD_FIELD: &str = "id-card";
pub const FAMILY_CARD_FIELD: &str = "family-card";
pub const OTHER_DOCUMENTS_FIELD: &str = "other-documents";
pub const BATCH_FIELD: &str = "files";
pub const PAYMENT_PROOF_FIELD: &str = "paymentProof";

pub const LETTER_FIELDS: &[FileField] = &[
    FileField { name: ID_CARD_FIELD, max_count: 1 },
    FileField { name: FAMILY_CARD_FIELD, max_count: 1 },
    FileField { name: OTHER_DOCUMENTS_FIELD, max_count: 5 },
    FileField { name: BATCH_FIELD, max_count: 5 },
];

pub const PAYMENT_PROOF_FIELDS: &[FileField] = &[FileField { name: PAYMENT_PROOF_FIELD, max_count: 1 }];

pub const BATCH_FIELDS: &[FileField] = &[FileField { name: BATCH_FIELD, max_count: 5 }];

// Limite do corpo inteiro para as rotas multipart (todos os campos cheios + folga para texto)
pub fn multipart_body_limit(fields: &[FileField]) -> usize {
    let files: usize = fields.iter().map(|f| f.max_count).sum();
    files * MAX_FILE_SIZE + 1024 * 1024
}

pub fn find_field<'a>(fields: &'a [FileField], name: &str) -> Option<&'a FileField> {
    fields.iter().find(|f| f.name == name)
}

/// Limite inclusivo: exatamente 5MB passa, 5MB + 1 byte não.
pub fn check_size(len: usize) -> Result<(), AppError> {
    if len > MAX_FILE_SIZE {
        return Err(AppError::PayloadTooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedKind {
    Jpeg,
    Png,
    Pdf,
}

impl AllowedKind {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(AllowedKind::Jpeg),
            "png" => Some(AllowedKind::Png),
            "pdf" => Some(AllowedKind::Pdf),
            _ => None,
        }
    }

    fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some(AllowedKind::Jpeg),
            "image/png" => Some(AllowedKind::Png),
            "application/pdf" => Some(AllowedKind::Pdf),
            _ => None,
        }
    }
}

/// Extensão original com o ponto (".JPG", ".pdf"), ou vazio se não houver.
pub fn original_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

/// Exige extensão E content-type na lista permitida, e que os dois concordem.
pub fn check_file_type(file_name: &str, content_type: Option<&str>) -> Result<AllowedKind, AppError> {
    let by_extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(AllowedKind::from_extension)
        .ok_or_else(|| AppError::UnsupportedFileType(file_name.to_string()))?;

    let declared = content_type.unwrap_or("application/octet-stream");
    let by_mime = AllowedKind::from_content_type(declared)
        .ok_or_else(|| AppError::UnsupportedFileType(format!("{} ({})", file_name, declared)))?;

    if by_extension != by_mime {
        return Err(AppError::UnsupportedFileType(format!("{} ({})", file_name, declared)));
    }
    Ok(by_extension)
}

/// {campo}-{epoch millis}-{9 dígitos}{extensão original}
pub fn stored_file_name(field: &str, epoch_millis: i64, suffix: u32, extension: &str) -> String {
    format!("{}-{}-{:09}{}", field, epoch_millis, suffix, extension)
}

pub fn generate_stored_name(field: &str, original_name: &str) -> String {
    let suffix = rand::thread_rng().gen_range(100_000_000..1_000_000_000);
    stored_file_name(
        field,
        chrono::Utc::now().timestamp_millis(),
        suffix,
        &original_extension(original_name),
    )
}

pub fn public_url(stored_name: &str) -> String {
    format!("{}/{}", UPLOAD_URL_PREFIX, stored_name)
}

// URLs de foto/comprovante enviadas no JSON precisam apontar para um arquivo nosso
pub fn validate_upload_url(url: &str) -> Result<(), ValidationError> {
    let stored = url
        .strip_prefix(UPLOAD_URL_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'));
    match stored {
        Some(name) if !name.is_empty() && !name.contains('/') && !name.contains("..") => Ok(()),
        _ => {
            let mut err = ValidationError::new("upload_url");
            err.message = Some("Must be a URL returned by the upload endpoint.".into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_size(MAX_FILE_SIZE).is_ok());
        assert!(matches!(check_size(MAX_FILE_SIZE + 1), Err(AppError::PayloadTooLarge)));
        assert!(check_size(0).is_ok());
    }

    #[test]
    fn accepts_matching_extension_and_content_type() {
        assert_eq!(check_file_type("ktp.JPG", Some("image/jpeg")).unwrap(), AllowedKind::Jpeg);
        assert_eq!(check_file_type("kk.jpeg", Some("image/jpg")).unwrap(), AllowedKind::Jpeg);
        assert_eq!(check_file_type("scan.png", Some("image/png")).unwrap(), AllowedKind::Png);
        assert_eq!(
            check_file_type("letter.pdf", Some("application/pdf; charset=binary")).unwrap(),
            AllowedKind::Pdf
        );
    }

    #[test]
    fn rejects_disallowed_or_mismatched_types() {
        assert!(matches!(
            check_file_type("virus.exe", Some("application/pdf")),
            Err(AppError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            check_file_type("photo.png", Some("image/gif")),
            Err(AppError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            check_file_type("photo.png", Some("application/pdf")),
            Err(AppError::UnsupportedFileType(_))
        ));
        assert!(matches!(check_file_type("photo.png", None), Err(AppError::UnsupportedFileType(_))));
        assert!(matches!(check_file_type("noextension", Some("image/png")), Err(AppError::UnsupportedFileType(_))));
    }

    #[test]
    fn stored_name_has_field_timestamp_suffix_and_extension() {
        assert_eq!(
            stored_file_name("id-card", 1_700_000_000_123, 123_456_789, ".pdf"),
            "id-card-1700000000123-123456789.pdf"
        );
        assert_eq!(stored_file_name("files", 1, 42, ""), "files-1-000000042");
    }

    #[test]
    fn generated_names_keep_the_original_extension() {
        let name = generate_stored_name(PAYMENT_PROOF_FIELD, "bukti transfer.PNG");
        assert!(name.starts_with("paymentProof-"));
        assert!(name.ends_with(".PNG"));

        let parts: Vec<&str> = name.trim_end_matches(".PNG").rsplitn(2, '-').collect();
        assert_eq!(parts[0].len(), 9);
        assert!(parts[0].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn generated_names_do_not_collide() {
        let a = generate_stored_name("files", "a.pdf");
        let b = generate_stored_name("files", "a.pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn field_lookup_and_body_limit() {
        assert_eq!(find_field(LETTER_FIELDS, OTHER_DOCUMENTS_FIELD).unwrap().max_count, 5);
        assert!(find_field(LETTER_FIELDS, "paymentProof").is_none());
        assert_eq!(multipart_body_limit(PAYMENT_PROOF_FIELDS), MAX_FILE_SIZE + 1024 * 1024);
    }

    #[test]
    fn upload_urls_must_stay_under_the_prefix() {
        assert!(validate_upload_url("/uploads/files-1-000000001.jpg").is_ok());
        assert!(validate_upload_url("/uploads/").is_err());
        assert!(validate_upload_url("/uploads/../etc/passwd").is_err());
        assert!(validate_upload_url("https://example.com/a.jpg").is_err());
    }

    #[test]
    fn public_url_uses_the_fixed_prefix() {
        assert_eq!(public_url("files-1-000000001.pdf"), "/uploads/files-1-000000001.pdf");
    }
}
