use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

use super::{load_or, write_pretty};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

/// A contact-form submission (`leads.json`). `updated_at` only appears
/// once an admin has touched the lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

/// Public contact-form body. Name and phone are validated by the handler;
/// the rest defaults here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub service: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct LeadsFile {
    leads: Vec<Lead>,
}

#[derive(Debug, Clone)]
pub struct LeadStore {
    path: PathBuf,
}

impl LeadStore {
    pub fn new(data_dir: &Path) -> Self {
        LeadStore {
            path: data_dir.join("leads.json"),
        }
    }

    /// Newest first (submissions are prepended on create).
    pub async fn list(&self) -> Vec<Lead> {
        load_or::<LeadsFile>(&self.path).await.leads
    }

    pub async fn create(&self, new: NewLead) -> Result<Lead, AppError> {
        let lead = Lead {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email.unwrap_or_default(),
            phone: new.phone,
            service: non_empty_or(new.service, "General Inquiry"),
            message: new.message.unwrap_or_default(),
            source: non_empty_or(new.source, "contact-form"),
            status: LeadStatus::New,
            created_at: Utc::now(),
            updated_at: None,
            notes: String::new(),
        };

        let mut file = load_or::<LeadsFile>(&self.path).await;
        file.leads.insert(0, lead.clone());
        write_pretty(&self.path, &file).await?;
        Ok(lead)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateLead) -> Result<Lead, AppError> {
        let mut file = load_or::<LeadsFile>(&self.path).await;
        let lead = file
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

        if let Some(v) = patch.name {
            lead.name = v;
        }
        if let Some(v) = patch.email {
            lead.email = v;
        }
        if let Some(v) = patch.phone {
            lead.phone = v;
        }
        if let Some(v) = patch.service {
            lead.service = v;
        }
        if let Some(v) = patch.message {
            lead.message = v;
        }
        if let Some(v) = patch.source {
            lead.source = v;
        }
        if let Some(v) = patch.status {
            lead.status = v;
        }
        if let Some(v) = patch.notes {
            lead.notes = v;
        }
        lead.updated_at = Some(Utc::now());

        let updated = lead.clone();
        write_pretty(&self.path, &file).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut file = load_or::<LeadsFile>(&self.path).await;
        let before = file.leads.len();
        file.leads.retain(|l| l.id != id);
        if file.leads.len() == before {
            return Err(AppError::NotFound("Lead not found".to_string()));
        }
        write_pretty(&self.path, &file).await
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
