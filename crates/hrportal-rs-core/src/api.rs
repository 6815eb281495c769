//! Typed endpoints over a [`Transport`].

use crate::error::PortalError;
use crate::fetch::{ApiRequest, Transport};
use hrportal_rs_protocol::{
    AcknowledgeReceipt, AcknowledgmentList, AnalyticsRange, Announcement, AnnouncementStats,
    CareerAnalytics, DocumentDetails, DocumentStatistics, DocumentTypes, DocumentUpload,
    EmployeeDocument, MessageReceipt, NewAnnouncement, OnboardingAnalytics,
    OnboardingNotification, PendingCount, RecordId, SkillAssessment, StatusToggle,
    VerificationReceipt,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

/// Cheap-to-clone handle exposing every backend resource the portal reads or
/// mutates.
#[derive(Clone)]
pub struct PortalApi {
    transport: Arc<dyn Transport>,
}

impl PortalApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, PortalError> {
        let value = self.transport.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn career_analytics(&self) -> Result<CareerAnalytics, PortalError> {
        self.fetch(ApiRequest::get("/career/analytics")).await
    }

    pub async fn skills_assessment(&self) -> Result<Vec<SkillAssessment>, PortalError> {
        self.fetch(ApiRequest::get("/career/skills-assessment")).await
    }

    pub async fn onboarding_analytics(
        &self,
        range: AnalyticsRange,
    ) -> Result<OnboardingAnalytics, PortalError> {
        self.fetch(ApiRequest::get("/onboarding/analytics").query("range", range)).await
    }

    pub async fn onboarding_notifications(
        &self,
    ) -> Result<Vec<OnboardingNotification>, PortalError> {
        self.fetch(ApiRequest::get("/onboarding/notifications")).await
    }

    pub async fn mark_notification_read(&self, id: RecordId) -> Result<(), PortalError> {
        self.transport
            .send(
                ApiRequest::put(format!("/onboarding/notifications/{id}"))
                    .json(json!({ "is_read": true })),
            )
            .await?;
        Ok(())
    }

    pub async fn announcements(&self) -> Result<Vec<Announcement>, PortalError> {
        self.fetch(ApiRequest::get("/announcements/")).await
    }

    /// Announcements annotated with the current user's acknowledgement state.
    pub async fn announcements_with_status(&self) -> Result<Vec<Announcement>, PortalError> {
        self.fetch(ApiRequest::get("/announcements/with-status")).await
    }

    pub async fn create_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, PortalError> {
        self.fetch(ApiRequest::post("/announcements/").json(serde_json::to_value(announcement)?))
            .await
    }

    pub async fn acknowledge_announcement(
        &self,
        id: RecordId,
    ) -> Result<AcknowledgeReceipt, PortalError> {
        self.fetch(ApiRequest::post(format!("/announcements/{id}/acknowledge"))).await
    }

    pub async fn toggle_announcement(&self, id: RecordId) -> Result<StatusToggle, PortalError> {
        self.fetch(ApiRequest::put(format!("/announcements/{id}/toggle-status"))).await
    }

    pub async fn announcement_stats(&self) -> Result<AnnouncementStats, PortalError> {
        self.fetch(ApiRequest::get("/announcements/stats")).await
    }

    pub async fn announcement_acknowledgments(
        &self,
        id: RecordId,
    ) -> Result<AcknowledgmentList, PortalError> {
        self.fetch(ApiRequest::get(format!("/announcements/{id}/acknowledgments"))).await
    }

    pub async fn documents(&self) -> Result<Vec<EmployeeDocument>, PortalError> {
        self.fetch(ApiRequest::get("/documents/")).await
    }

    /// Every employee's documents (Admin/HR), optionally narrowed server-side.
    pub async fn all_documents(
        &self,
        document_type: Option<&str>,
        verified: Option<bool>,
    ) -> Result<Vec<DocumentDetails>, PortalError> {
        let mut request = ApiRequest::get("/documents/all");
        if let Some(document_type) = document_type {
            request = request.query("document_type", document_type);
        }
        if let Some(verified) = verified {
            request = request.query("verification_status", verified);
        }
        self.fetch(request).await
    }

    pub async fn document_types(&self) -> Result<Vec<String>, PortalError> {
        let types: DocumentTypes = self.fetch(ApiRequest::get("/documents/types")).await?;
        Ok(types.document_types)
    }

    pub async fn document(&self, id: RecordId) -> Result<DocumentDetails, PortalError> {
        self.fetch(ApiRequest::get(format!("/documents/{id}"))).await
    }

    pub async fn upload_document(
        &self,
        upload: DocumentUpload,
    ) -> Result<EmployeeDocument, PortalError> {
        self.fetch(ApiRequest::post("/documents/upload").upload(upload)).await
    }

    pub async fn verify_document(
        &self,
        id: RecordId,
        verified: bool,
        rejection_reason: Option<&str>,
    ) -> Result<VerificationReceipt, PortalError> {
        let mut request = ApiRequest::put(format!("/documents/{id}/verify"))
            .query("verification_status", verified);
        if let Some(reason) = rejection_reason {
            request = request.query("rejection_reason", reason);
        }
        self.fetch(request).await
    }

    pub async fn delete_document(&self, id: RecordId) -> Result<MessageReceipt, PortalError> {
        self.fetch(ApiRequest::delete(format!("/documents/{id}"))).await
    }

    pub async fn pending_verification_count(&self) -> Result<u64, PortalError> {
        let count: PendingCount = self
            .fetch(ApiRequest::get("/documents/pending-verification/count"))
            .await?;
        Ok(count.pending_count)
    }

    pub async fn document_statistics(&self) -> Result<DocumentStatistics, PortalError> {
        self.fetch(ApiRequest::get("/documents/statistics")).await
    }
}
