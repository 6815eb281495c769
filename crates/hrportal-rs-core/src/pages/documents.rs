use super::PageContext;
use crate::collection::{LoadState, RemoteCollection};
use crate::error::PortalError;
use crate::filter::DocumentFilter;
use crate::toast::{ToastKind, ToastOptions};
use hrportal_rs_protocol::{
    DOCUMENT_TYPES, DocumentStatistics, DocumentUpload, EmployeeDocument, RecordId,
};
use log::{info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// Result of an upload the server accepted.
///
/// A low OCR confidence is a business outcome rather than an error: the
/// document is stored but flagged for resubmission.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Verified(EmployeeDocument),
    NeedsResubmission {
        document: EmployeeDocument,
        reason: String,
    },
    PendingReview(EmployeeDocument),
}

impl UploadOutcome {
    fn classify(document: EmployeeDocument) -> Self {
        if document.is_verified {
            UploadOutcome::Verified(document)
        } else if document.needs_resubmission() {
            let reason = document.rejection_reason.clone().unwrap_or_else(|| {
                "The document could not be read clearly. Please upload a clearer copy."
                    .to_string()
            });
            UploadOutcome::NeedsResubmission { document, reason }
        } else {
            UploadOutcome::PendingReview(document)
        }
    }

    pub fn document(&self) -> &EmployeeDocument {
        match self {
            UploadOutcome::Verified(document)
            | UploadOutcome::PendingReview(document)
            | UploadOutcome::NeedsResubmission { document, .. } => document,
        }
    }
}

/// The signed-in employee's documents.
#[derive(Clone)]
pub struct DocumentCenter {
    ctx: PageContext,
    documents: Arc<Mutex<RemoteCollection<EmployeeDocument>>>,
}

impl DocumentCenter {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            documents: Arc::new(Mutex::new(RemoteCollection::new())),
        }
    }

    pub async fn refresh(&self) -> LoadState {
        let ticket = self.documents.lock().begin_fetch();
        let result = self.ctx.api.documents().await;
        let mut documents = self.documents.lock();
        match result {
            Ok(items) => {
                documents.apply(ticket, items);
            }
            Err(err) => {
                warn!("failed to load documents (error={})", err);
                documents.fail(ticket, err.user_message());
            }
        }
        documents.state().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.documents.lock().state().clone()
    }

    pub fn all(&self) -> Vec<EmployeeDocument> {
        self.documents.lock().items().to_vec()
    }

    pub fn filtered(&self, filter: &DocumentFilter) -> Vec<EmployeeDocument> {
        filter.apply(self.documents.lock().items())
    }

    pub async fn upload(&self, upload: DocumentUpload) -> Result<UploadOutcome, PortalError> {
        if !DOCUMENT_TYPES.contains(&upload.document_type.as_str()) {
            return Err(PortalError::InvalidInput(format!(
                "unknown document type: {}",
                upload.document_type
            )));
        }
        if upload.bytes.is_empty() {
            return Err(PortalError::InvalidInput("file is empty".to_string()));
        }
        let file_name = upload.file_name.clone();
        let document = self
            .ctx
            .api
            .upload_document(upload)
            .await
            .map_err(|err| self.ctx.write_failed("upload document", err))?;
        info!(
            "document uploaded (id={}, file={}, verified={}, confidence={:?})",
            document.id, file_name, document.is_verified, document.ocr_confidence
        );
        self.documents.lock().insert_front(document.clone());

        let outcome = UploadOutcome::classify(document);
        match &outcome {
            UploadOutcome::Verified(_) => {
                self.ctx
                    .toasts
                    .show("Document uploaded and verified", ToastKind::Success);
            }
            UploadOutcome::PendingReview(_) => {
                self.ctx
                    .toasts
                    .show("Document uploaded and awaiting review", ToastKind::Info);
            }
            UploadOutcome::NeedsResubmission { reason, .. } => {
                self.ctx.toasts.show_with(
                    format!("Document needs resubmission: {reason}"),
                    ToastKind::Warning,
                    ToastOptions {
                        persistent: true,
                        action: None,
                    },
                );
            }
        }
        Ok(outcome)
    }

    /// Manually verify or reject a document (Admin/HR).
    pub async fn verify(
        &self,
        id: RecordId,
        verified: bool,
        rejection_reason: Option<&str>,
    ) -> Result<EmployeeDocument, PortalError> {
        self.ctx.require_privileged("verifying documents")?;
        if !verified && rejection_reason.is_none_or(|reason| reason.trim().is_empty()) {
            return Err(PortalError::InvalidInput(
                "a rejection reason is required".to_string(),
            ));
        }
        let receipt = self
            .ctx
            .api
            .verify_document(id, verified, rejection_reason)
            .await
            .map_err(|err| self.ctx.write_failed("verify document", err))?;
        self.documents.lock().replace(receipt.document.clone());
        self.ctx.toasts.show(receipt.message, ToastKind::Success);
        Ok(receipt.document)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), PortalError> {
        self.ctx
            .api
            .delete_document(id)
            .await
            .map_err(|err| self.ctx.write_failed("delete document", err))?;
        self.documents.lock().remove(&id);
        self.ctx.toasts.show("Document deleted", ToastKind::Success);
        Ok(())
    }

    pub async fn statistics(&self) -> Result<DocumentStatistics, PortalError> {
        self.ctx.require_privileged("viewing document statistics")?;
        self.ctx.api.document_statistics().await
    }

    pub async fn pending_verification_count(&self) -> Result<u64, PortalError> {
        self.ctx.require_privileged("viewing the verification queue")?;
        self.ctx.api.pending_verification_count().await
    }
}
