//! Per-entity drafts driven by [`FormController`](crate::FormController).

use api::{
    ApplicationStatus, Appointment, AppointmentStatus, Entity, FilePart, InvoiceMeta,
    InvoiceStatus, Job, JobApplication, JobPayload, JobStatus, JobType, ModuleUpdate, NewModule,
    NewProject, Project, ProjectModule, ProjectStatus, QuoteRequest, QuoteStatus, SearchCandidate,
    Ticket, TicketStatus,
};

use crate::form::{missing, Draft, RepeatableField, ValidationError};
use crate::timer::{now_iso, now_millis};

fn money(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn clamp_progress(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

// Jobs

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobDraft {
    pub title: String,
    pub department: String,
    pub location: String,
    pub job_type: JobType,
    pub status: JobStatus,
    pub description: String,
    pub requirements: RepeatableField,
}

impl Draft for JobDraft {
    type Entity = Job;
    type Output = JobPayload;

    fn from_entity(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            status: job.status.clone(),
            description: job.description.clone(),
            requirements: RepeatableField::from_values(job.requirements.iter().cloned()),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        missing([
            ("Job Title", self.title.as_str()),
            ("Department", self.department.as_str()),
            ("Location", self.location.as_str()),
            ("Description", self.description.as_str()),
        ])
    }

    fn to_output(&self) -> JobPayload {
        JobPayload {
            title: self.title.trim().to_string(),
            department: self.department.trim().to_string(),
            location: self.location.trim().to_string(),
            job_type: self.job_type.clone(),
            status: self.status.clone(),
            description: self.description.trim().to_string(),
            requirements: self.requirements.compacted(),
        }
    }
}

// Projects

/// The "add module" row of the project form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: u8,
}

impl ModuleDraft {
    pub fn set_progress(&mut self, value: f64) {
        self.progress = clamp_progress(value);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDraft {
    pub client_id: String,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub project_name: String,
    pub project_value: String,
    pub amount_paid: String,
    pub initial_payment_date: String,
    pub second_due_date: String,
    pub location: String,
    pub description: String,
    pub status: ProjectStatus,
    pub thumbnail: String,
    pub modules: Vec<NewModule>,
    pub new_module: ModuleDraft,
    next_module: u32,
}

impl ProjectDraft {
    /// Copy the picked client's contact details into the form.
    pub fn select_client(&mut self, client: &SearchCandidate) {
        self.client_id = client.id.clone();
        self.client_name = client.name.clone();
        self.email = client.email.clone();
        self.phone = client.phone.clone().unwrap_or_default();
    }

    /// Append the pending module row. Returns `false` if it has no name.
    pub fn add_module(&mut self) -> bool {
        if self.new_module.name.trim().is_empty() {
            return false;
        }
        self.next_module += 1;
        let pending = std::mem::take(&mut self.new_module);
        self.modules.push(NewModule {
            id: format!("module-{}", self.next_module),
            name: pending.name.trim().to_string(),
            description: pending.description.trim().to_string(),
            status: pending.status,
            progress: pending.progress,
            start_date: String::new(),
            end_date: String::new(),
        });
        true
    }

    pub fn remove_module(&mut self, id: &str) {
        self.modules.retain(|m| m.id != id);
    }
}

impl Draft for ProjectDraft {
    type Entity = Project;
    type Output = NewProject;

    fn from_entity(project: &Project) -> Self {
        let modules: Vec<NewModule> = project
            .modules
            .iter()
            .map(|m| NewModule {
                id: m.id.clone(),
                name: m.name.clone(),
                description: m.description.clone(),
                status: m.status.clone(),
                progress: clamp_progress(m.progress),
                start_date: m.start_date.clone().unwrap_or_default(),
                end_date: m.end_date.clone().unwrap_or_default(),
            })
            .collect();
        Self {
            client_id: project.client_id.clone().unwrap_or_default(),
            client_name: project.client_name.clone(),
            email: project.email.clone(),
            phone: project.phone.clone(),
            project_name: project.project_name.clone(),
            project_value: money(project.project_value),
            amount_paid: money(project.amount_paid),
            initial_payment_date: project.initial_payment_date.clone().unwrap_or_default(),
            second_due_date: project.second_due_date.clone().unwrap_or_default(),
            location: project.location.clone(),
            description: project.description.clone(),
            status: project.status.clone(),
            thumbnail: project.thumbnail.clone().unwrap_or_default(),
            next_module: modules.len() as u32,
            modules,
            new_module: ModuleDraft::default(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        missing([
            ("Client Name", self.client_name.as_str()),
            ("Project Name", self.project_name.as_str()),
        ])
    }

    fn check(&self) -> Result<(), ValidationError> {
        for (label, value) in [
            ("Project Value", &self.project_value),
            ("Amount Paid", &self.amount_paid),
        ] {
            let value = value.trim();
            if !value.is_empty() && value.parse::<f64>().is_err() {
                return Err(ValidationError::Invalid(format!("{label} must be a number")));
            }
        }
        Ok(())
    }

    fn to_output(&self) -> NewProject {
        let started = now_iso();
        NewProject {
            client_id: self.client_id.clone(),
            client_name: self.client_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            project_name: self.project_name.trim().to_string(),
            project_value: self.project_value.trim().to_string(),
            amount_paid: self.amount_paid.trim().to_string(),
            initial_payment_date: self.initial_payment_date.clone(),
            second_due_date: self.second_due_date.clone(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status.clone(),
            thumbnail: self.thumbnail.trim().to_string(),
            modules: self
                .modules
                .iter()
                .map(|m| NewModule {
                    start_date: if m.start_date.is_empty() {
                        started.clone()
                    } else {
                        m.start_date.clone()
                    },
                    ..m.clone()
                })
                .collect(),
        }
    }
}

/// Edit form for one module on the project detail page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleUpdateDraft {
    pub status: ProjectStatus,
    pub progress: u8,
    pub description: String,
}

impl ModuleUpdateDraft {
    pub fn set_progress(&mut self, value: f64) {
        self.progress = clamp_progress(value);
    }
}

impl Draft for ModuleUpdateDraft {
    type Entity = ProjectModule;
    type Output = ModuleUpdate;

    fn from_entity(module: &ProjectModule) -> Self {
        Self {
            status: module.status.clone(),
            progress: clamp_progress(module.progress),
            description: module.description.clone(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn to_output(&self) -> ModuleUpdate {
        ModuleUpdate {
            status: self.status.clone(),
            progress: self.progress,
            description: self.description.trim().to_string(),
        }
    }
}

// Invoices

const INVOICE_TYPES: [(&str, &str); 4] = [
    ("pdf", "application/pdf"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
];

/// Wrap a picked file, refusing anything but PDF, JPEG and PNG.
pub fn invoice_file(file_name: &str, bytes: Vec<u8>) -> Result<FilePart, ValidationError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = INVOICE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| mime.to_string())
        .ok_or_else(|| ValidationError::Invalid("Please select a PDF or image file".into()))?;
    Ok(FilePart {
        file_name: file_name.to_string(),
        mime,
        bytes,
    })
}

/// Invoice display number from a millisecond clock: `INV-` and its last four digits.
pub fn invoice_number(millis: u64) -> String {
    format!("INV-{:04}", millis % 10_000)
}

/// `2026-10-19T08:00:00Z` becomes `Oct 19, 2026`. Anything unparseable is
/// returned empty.
pub fn issue_date(iso: &str) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let mut parts = iso.get(..10).unwrap_or_default().split('-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return String::new();
    };
    let (Ok(year), Ok(month), Ok(day)) = (
        year.parse::<u32>(),
        month.parse::<usize>(),
        day.parse::<u32>(),
    ) else {
        return String::new();
    };
    match MONTHS.get(month.wrapping_sub(1)) {
        Some(name) => format!("{name} {day}, {year}"),
        None => String::new(),
    }
}

/// What the invoice modal hands to its save callback.
#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceUpload {
    pub client_id: Option<String>,
    pub file: FilePart,
    pub meta: InvoiceMeta,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvoiceUploadDraft {
    pub client_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub amount: String,
    pub status: InvoiceStatus,
    pub due_date: String,
    pub project: String,
    pub file: Option<FilePart>,
}

impl InvoiceUploadDraft {
    pub fn select_client(&mut self, client: &SearchCandidate) {
        self.client_id = Some(client.id.clone());
        self.name = client.name.clone();
        self.email = client.email.clone();
        self.phone = client.phone.clone().unwrap_or_default();
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.file_name.as_str())
    }
}

impl Draft for InvoiceUploadDraft {
    /// The users page opens the upload with a client already chosen.
    type Entity = SearchCandidate;
    type Output = InvoiceUpload;

    fn from_entity(client: &SearchCandidate) -> Self {
        let mut draft = Self::default();
        draft.select_client(client);
        draft
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut fields = missing([
            ("Name", self.name.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
        ]);
        if self.file.is_none() {
            fields.push("Invoice File");
        }
        fields
    }

    fn check(&self) -> Result<(), ValidationError> {
        let amount = self.amount.trim();
        if !amount.is_empty() && amount.parse::<f64>().is_err() {
            return Err(ValidationError::Invalid("Amount must be a number".into()));
        }
        match &self.file {
            Some(file) if !INVOICE_TYPES.iter().any(|(_, mime)| *mime == file.mime) => Err(
                ValidationError::Invalid("Please select a PDF or image file".into()),
            ),
            _ => Ok(()),
        }
    }

    fn to_output(&self) -> InvoiceUpload {
        InvoiceUpload {
            client_id: self.client_id.clone(),
            // `to_output` only runs after `missing_fields` saw a file.
            file: self.file.clone().unwrap_or_else(|| FilePart {
                file_name: String::new(),
                mime: String::new(),
                bytes: Vec::new(),
            }),
            meta: InvoiceMeta {
                id: invoice_number(now_millis()),
                date: issue_date(&now_iso()),
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                amount: self.amount.trim().to_string(),
                status: self.status.clone(),
                due_date: self.due_date.clone(),
                project: self.project.trim().to_string(),
            },
        }
    }
}

// Status changes

/// An entity whose status the admin can change from its list page.
pub trait HasStatus: Entity {
    type Status: Clone + Default + PartialEq + std::fmt::Debug;

    fn status(&self) -> &Self::Status;
}

macro_rules! has_status {
    ($($entity:ty => $status:ty),* $(,)?) => {
        $(impl HasStatus for $entity {
            type Status = $status;

            fn status(&self) -> &$status {
                &self.status
            }
        })*
    };
}

has_status! {
    Ticket => TicketStatus,
    Appointment => AppointmentStatus,
    QuoteRequest => QuoteStatus,
    JobApplication => ApplicationStatus,
}

/// The status picker shown for a single row.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusDraft<T: HasStatus> {
    pub id: String,
    pub status: T::Status,
}

impl<T: HasStatus> Default for StatusDraft<T> {
    fn default() -> Self {
        Self {
            id: String::new(),
            status: T::Status::default(),
        }
    }
}

impl<T: HasStatus + Clone + PartialEq> Draft for StatusDraft<T> {
    type Entity = T;
    /// Row id and the chosen status.
    type Output = (String, T::Status);

    fn from_entity(entity: &T) -> Self {
        Self {
            id: entity.id().to_string(),
            status: entity.status().clone(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        missing([("Record", self.id.as_str())])
    }

    fn to_output(&self) -> Self::Output {
        (self.id.clone(), self.status.clone())
    }
}

// Login

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl Draft for LoginDraft {
    type Entity = ();
    type Output = (String, String);

    fn from_entity(_: &()) -> Self {
        Self::default()
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut fields = missing([("Email", self.email.as_str())]);
        if self.password.is_empty() {
            fields.push("Password");
        }
        fields
    }

    fn to_output(&self) -> Self::Output {
        (self.email.trim().to_string(), self.password.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormController;

    fn engineer() -> Job {
        Job {
            id: "j1".into(),
            title: "Engineer".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_job_without_requirements_shows_one_blank_row() {
        let mut form = FormController::<JobDraft>::new();
        form.open(Some(&engineer()));
        assert_eq!(form.draft().title, "Engineer");
        assert_eq!(form.draft().requirements.entries(), [""]);
        assert_eq!(form.draft().job_type, JobType::FullTime);
        assert_eq!(form.draft().status, JobStatus::Active);
    }

    #[test]
    fn test_job_submit_drops_blank_requirements() {
        let mut form = FormController::<JobDraft>::new();
        form.open(None);
        let draft = form.draft_mut();
        draft.title = "Engineer".into();
        draft.department = "Engineering".into();
        draft.location = "Remote".into();
        draft.description = "Build things".into();
        draft.requirements = RepeatableField::from_values(["", "React", ""]);

        let payload = form.submit().expect("draft is complete");
        assert_eq!(payload.requirements, vec!["React".to_string()]);
    }

    #[test]
    fn test_empty_job_never_reaches_save() {
        let mut form = FormController::<JobDraft>::new();
        form.open(None);
        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["Job Title", "Department", "Location", "Description"])
        );
    }

    #[test]
    fn test_opening_create_after_edit_resets() {
        let mut form = FormController::<JobDraft>::new();
        form.open(Some(&Job {
            requirements: vec!["Rust".into()],
            job_type: JobType::Contract,
            ..engineer()
        }));
        form.close();
        form.open(None);
        assert_eq!(*form.draft(), JobDraft::default());
        assert_eq!(form.draft().requirements.len(), 1);
    }

    #[test]
    fn test_project_modules_need_a_name() {
        let mut draft = ProjectDraft::default();
        assert!(!draft.add_module());

        draft.new_module.name = "Design".into();
        draft.new_module.set_progress(140.0);
        assert!(draft.add_module());
        assert_eq!(draft.new_module, ModuleDraft::default());

        draft.new_module.name = "Build".into();
        draft.add_module();
        assert_eq!(draft.modules.len(), 2);
        assert_eq!(draft.modules[0].progress, 100);
        assert_ne!(draft.modules[0].id, draft.modules[1].id);

        let first = draft.modules[0].id.clone();
        draft.remove_module(&first);
        assert_eq!(draft.modules[0].name, "Build");
    }

    #[test]
    fn test_project_client_selection_fills_contact() {
        let mut draft = ProjectDraft::default();
        draft.select_client(&SearchCandidate {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: None,
        });
        draft.project_name = "Shop".into();
        draft.project_value = "abc".into();
        assert!(draft.missing_fields().is_empty());
        assert!(matches!(draft.check(), Err(ValidationError::Invalid(_))));

        draft.project_value = "1200".into();
        let out = draft.to_output();
        assert_eq!(out.client_id, "u1");
        assert_eq!(out.phone, "");
        assert_eq!(out.status, ProjectStatus::Planning);
    }

    #[test]
    fn test_module_update_seeds_and_clamps() {
        let module = ProjectModule {
            id: "m1".into(),
            progress: 42.6,
            status: ProjectStatus::InProgress,
            ..Default::default()
        };
        let mut draft = ModuleUpdateDraft::from_entity(&module);
        assert_eq!(draft.progress, 43);
        draft.set_progress(-5.0);
        assert_eq!(draft.to_output().progress, 0);
    }

    #[test]
    fn test_invoice_file_types() {
        assert_eq!(invoice_file("a.PDF", vec![1]).unwrap().mime, "application/pdf");
        assert_eq!(invoice_file("scan.jpg", vec![]).unwrap().mime, "image/jpeg");
        assert!(invoice_file("notes.docx", vec![]).is_err());
        assert!(invoice_file("noext", vec![]).is_err());
    }

    #[test]
    fn test_invoice_requires_contact_and_file() {
        let mut form = FormController::<InvoiceUploadDraft>::new();
        form.open(Some(&SearchCandidate {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: Some("555".into()),
        }));
        assert_eq!(
            form.submit(),
            Err(ValidationError::MissingFields(vec!["Invoice File"]))
        );

        form.draft_mut().file = Some(invoice_file("inv.png", vec![0x89]).unwrap());
        form.draft_mut().amount = "250".into();
        let upload = form.submit().expect("draft is complete");
        assert_eq!(upload.client_id.as_deref(), Some("u1"));
        assert_eq!(upload.meta.status, InvoiceStatus::Pending);
        assert_eq!(upload.file.mime, "image/png");
        assert!(upload.meta.id.starts_with("INV-"));
        assert_eq!(upload.meta.id.len(), 8);
    }

    #[test]
    fn test_invoice_number_and_date() {
        assert_eq!(invoice_number(1_760_860_800_123), "INV-0123");
        assert_eq!(invoice_number(98_765), "INV-8765");
        assert_eq!(issue_date("2026-10-19T08:30:00.000Z"), "Oct 19, 2026");
        assert_eq!(issue_date("2026-01-05"), "Jan 5, 2026");
        assert_eq!(issue_date(""), "");
        assert_eq!(issue_date("2026-13-01"), "");
    }

    #[test]
    fn test_status_draft_targets_row() {
        let ticket = Ticket {
            id: "t9".into(),
            status: TicketStatus::InProgress,
            ..Default::default()
        };
        let mut form = FormController::<StatusDraft<Ticket>>::new();
        form.open(Some(&ticket));
        form.draft_mut().status = TicketStatus::Resolved;
        assert_eq!(
            form.submit(),
            Ok(("t9".to_string(), TicketStatus::Resolved))
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let draft = LoginDraft {
            email: "admin@example.com".into(),
            password: String::new(),
        };
        assert_eq!(draft.missing_fields(), vec!["Password"]);
    }
}
