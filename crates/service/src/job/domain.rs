use models::enums::{ExperienceLevel, JobType, RemoteOption};
use models::{company, job};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use crate::errors::ServiceError;

/// Validated input for a new job. Enum fields carry the names accepted by
/// upstream validation and are mapped to the closed domain by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub company_id: i64,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub job_type: String,
    pub experience_level: String,
    pub remote_option: String,
    pub expiry_date: Option<DateTimeWithTimeZone>,
    pub application_url: Option<String>,
}

/// A job ready to be inserted: enums resolved, posting date fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub company_id: i64,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub remote_option: RemoteOption,
    pub posted_date: DateTimeWithTimeZone,
    pub expiry_date: Option<DateTimeWithTimeZone>,
    pub is_active: bool,
    pub application_url: Option<String>,
}

impl NewJob {
    pub fn into_draft(self, posted_date: DateTimeWithTimeZone) -> Result<JobDraft, ServiceError> {
        Ok(JobDraft {
            job_type: JobType::parse(&self.job_type)?,
            experience_level: ExperienceLevel::parse(&self.experience_level)?,
            remote_option: RemoteOption::parse(&self.remote_option)?,
            title: self.title,
            description: self.description,
            company_id: self.company_id,
            location: self.location,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            posted_date,
            expiry_date: self.expiry_date,
            is_active: true,
            application_url: self.application_url,
        })
    }
}

/// Partial update. `None` leaves a field untouched; for nullable columns
/// `Some(None)` clears the stored value. `posted_date` is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company_id: Option<i64>,
    pub location: Option<String>,
    pub salary_min: Option<Option<Decimal>>,
    pub salary_max: Option<Option<Decimal>>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub remote_option: Option<String>,
    pub expiry_date: Option<Option<DateTimeWithTimeZone>>,
    pub is_active: Option<bool>,
    pub application_url: Option<Option<String>>,
}

impl JobPatch {
    /// Names of the fields this patch touches, for logging.
    pub fn fields(&self) -> Vec<&'static str> {
        let present = [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("company_id", self.company_id.is_some()),
            ("location", self.location.is_some()),
            ("salary_min", self.salary_min.is_some()),
            ("salary_max", self.salary_max.is_some()),
            ("job_type", self.job_type.is_some()),
            ("experience_level", self.experience_level.is_some()),
            ("remote_option", self.remote_option.is_some()),
            ("expiry_date", self.expiry_date.is_some()),
            ("is_active", self.is_active.is_some()),
            ("application_url", self.application_url.is_some()),
        ];
        present.into_iter().filter(|(_, p)| *p).map(|(name, _)| name).collect()
    }

    /// Merge onto `target`. Enum names are resolved before any field is
    /// written, so an error leaves `target` untouched.
    pub fn apply(self, target: &mut job::Model) -> Result<(), ServiceError> {
        let job_type = self.job_type.as_deref().map(JobType::parse).transpose()?;
        let experience_level = self.experience_level.as_deref().map(ExperienceLevel::parse).transpose()?;
        let remote_option = self.remote_option.as_deref().map(RemoteOption::parse).transpose()?;

        if let Some(v) = self.title { target.title = v; }
        if let Some(v) = self.description { target.description = v; }
        if let Some(v) = self.company_id { target.company_id = v; }
        if let Some(v) = self.location { target.location = v; }
        if let Some(v) = self.salary_min { target.salary_min = v; }
        if let Some(v) = self.salary_max { target.salary_max = v; }
        if let Some(v) = job_type { target.job_type = v; }
        if let Some(v) = experience_level { target.experience_level = v; }
        if let Some(v) = remote_option { target.remote_option = v; }
        if let Some(v) = self.expiry_date { target.expiry_date = v; }
        if let Some(v) = self.is_active { target.is_active = v; }
        if let Some(v) = self.application_url { target.application_url = v; }
        Ok(())
    }
}

/// Read shape of a job: the row plus a summary of its company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: job::Model,
    pub company: company::Summary,
}

impl JobView {
    pub fn new(job: job::Model, company: &company::Model) -> Self {
        Self { job, company: company.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn posting() -> job::Model {
        let now = Utc::now().into();
        job::Model {
            id: 1,
            title: "Engineer".into(),
            description: "Build".into(),
            company_id: 1,
            location: "NYC".into(),
            salary_min: Some(Decimal::new(90000, 0)),
            salary_max: Some(Decimal::new(120000, 0)),
            job_type: JobType::FullTime,
            experience_level: ExperienceLevel::Mid,
            remote_option: RemoteOption::Remote,
            posted_date: now,
            expiry_date: None,
            is_active: true,
            application_url: None,
            created_at: now,
            updated_at: now,
            version: 2,
        }
    }

    fn new_job() -> NewJob {
        NewJob {
            title: "Engineer".into(),
            description: "x".into(),
            company_id: 1,
            location: "NYC".into(),
            salary_min: None,
            salary_max: None,
            job_type: "CONTRACT".into(),
            experience_level: "ENTRY".into(),
            remote_option: "HYBRID".into(),
            expiry_date: None,
            application_url: None,
        }
    }

    #[test]
    fn draft_maps_enum_names_and_defaults_active() {
        let now = Utc::now().into();
        let draft = new_job().into_draft(now).unwrap();
        assert_eq!(draft.job_type, JobType::Contract);
        assert_eq!(draft.experience_level, ExperienceLevel::Entry);
        assert_eq!(draft.remote_option, RemoteOption::Hybrid);
        assert_eq!(draft.posted_date, now);
        assert!(draft.is_active);
    }

    #[test]
    fn draft_rejects_unmapped_enum_name() {
        let input = NewJob { remote_option: "ON_MARS".into(), ..new_job() };
        let err = input.into_draft(Utc::now().into()).unwrap_err();
        assert_eq!(err, ServiceError::InvalidEnumValue { field: "remote_option", value: "ON_MARS".into() });
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let mut j = posting();
        let before = j.clone();
        let patch = JobPatch { title: Some("Senior Engineer".into()), job_type: Some("PART_TIME".into()), ..Default::default() };
        assert_eq!(patch.fields(), vec!["title", "job_type"]);
        patch.apply(&mut j).unwrap();
        assert_eq!(j.title, "Senior Engineer");
        assert_eq!(j.job_type, JobType::PartTime);
        assert_eq!(j.description, before.description);
        assert_eq!(j.salary_min, before.salary_min);
        assert_eq!(j.posted_date, before.posted_date);
        assert_eq!(j.version, before.version);
    }

    #[test]
    fn patch_can_clear_salary_and_deactivate() {
        let mut j = posting();
        JobPatch { salary_max: Some(None), is_active: Some(false), ..Default::default() }
            .apply(&mut j)
            .unwrap();
        assert_eq!(j.salary_max, None);
        assert_eq!(j.salary_min, Some(Decimal::new(90000, 0)));
        assert!(!j.is_active);
    }

    #[test]
    fn bad_enum_leaves_target_untouched() {
        let mut j = posting();
        let before = j.clone();
        let patch = JobPatch {
            title: Some("Changed".into()),
            experience_level: Some("GURU".into()),
            ..Default::default()
        };
        assert!(matches!(patch.apply(&mut j), Err(ServiceError::InvalidEnumValue { .. })));
        assert_eq!(j, before);
    }

    #[test]
    fn view_flattens_job_and_nests_company() {
        let now = Utc::now().into();
        let owner = company::Model {
            id: 1,
            name: "Acme".into(),
            description: None,
            website: None,
            location: "NYC".into(),
            created_at: now,
            updated_at: now,
            version: 0,
        };
        let json = serde_json::to_value(JobView::new(posting(), &owner)).unwrap();
        assert_eq!(json["title"], "Engineer");
        assert_eq!(json["job_type"], "FULL_TIME");
        assert_eq!(json["company"]["name"], "Acme");
        assert_eq!(json["company"]["id"], 1);
    }
}
