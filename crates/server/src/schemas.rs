//! Request bodies for the company and job endpoints.

use chrono::Utc;
use common::serde_ext::double_option;
use models::enums::{one_of, ExperienceLevel, JobType, RemoteOption};
use models::{company, job};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use service::company::domain::{CompanyPatch, NewCompany};
use service::job::domain::{JobPatch, NewJob};

use crate::validation::{not_null, required, FieldErrors, Validate};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCompanyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

impl Validate for CreateCompanyRequest {
    type Output = NewCompany;

    fn validate(self) -> Result<NewCompany, FieldErrors> {
        let mut errs = FieldErrors::new();
        let name = required(&mut errs, "name", self.name);
        if let Some(v) = &name { errs.check("name", company::validate_name(v)); }
        let location = required(&mut errs, "location", self.location);
        if let Some(v) = &location { errs.check("location", company::validate_location(v)); }
        if let Some(v) = &self.website { errs.check("website", company::validate_website(v)); }

        match (name, location) {
            (Some(name), Some(location)) if errs.is_empty() => Ok(NewCompany {
                name,
                description: self.description,
                website: self.website,
                location,
            }),
            _ => Err(errs),
        }
    }
}

/// PATCH body. `description` and `website` accept `null` to clear.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCompanyRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
}

impl Validate for UpdateCompanyRequest {
    type Output = CompanyPatch;

    fn validate(self) -> Result<CompanyPatch, FieldErrors> {
        let mut errs = FieldErrors::new();
        let name = not_null(&mut errs, "name", self.name);
        if let Some(v) = &name { errs.check("name", company::validate_name(v)); }
        let location = not_null(&mut errs, "location", self.location);
        if let Some(v) = &location { errs.check("location", company::validate_location(v)); }
        if let Some(Some(v)) = &self.website { errs.check("website", company::validate_website(v)); }

        errs.finish(|| CompanyPatch { name, description: self.description, website: self.website, location })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company_id: Option<i64>,
    pub location: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub remote_option: Option<String>,
    pub expiry_date: Option<DateTimeWithTimeZone>,
    pub application_url: Option<String>,
}

impl Validate for CreateJobRequest {
    type Output = NewJob;

    fn validate(self) -> Result<NewJob, FieldErrors> {
        let mut errs = FieldErrors::new();
        let title = required(&mut errs, "title", self.title);
        if let Some(v) = &title { errs.check("title", job::validate_title(v)); }
        let description = required(&mut errs, "description", self.description);
        if let Some(v) = &description { errs.check("description", job::validate_description(v)); }
        let company_id = required(&mut errs, "company_id", self.company_id);
        let location = required(&mut errs, "location", self.location);
        if let Some(v) = &location { errs.check("location", job::validate_location(v)); }
        let job_type = required(&mut errs, "job_type", self.job_type);
        if let Some(v) = &job_type { errs.check("job_type", one_of(JobType::NAMES, v)); }
        let experience_level = required(&mut errs, "experience_level", self.experience_level);
        if let Some(v) = &experience_level { errs.check("experience_level", one_of(ExperienceLevel::NAMES, v)); }
        let remote_option = required(&mut errs, "remote_option", self.remote_option);
        if let Some(v) = &remote_option { errs.check("remote_option", one_of(RemoteOption::NAMES, v)); }
        check_salaries(&mut errs, self.salary_min, self.salary_max);
        check_expiry(&mut errs, self.expiry_date);
        if let Some(v) = &self.application_url { errs.check("application_url", job::validate_application_url(v)); }

        match (title, description, company_id, location, job_type, experience_level, remote_option) {
            (
                Some(title),
                Some(description),
                Some(company_id),
                Some(location),
                Some(job_type),
                Some(experience_level),
                Some(remote_option),
            ) if errs.is_empty() => Ok(NewJob {
                title,
                description,
                company_id,
                location,
                salary_min: self.salary_min,
                salary_max: self.salary_max,
                job_type,
                experience_level,
                remote_option,
                expiry_date: self.expiry_date,
                application_url: self.application_url,
            }),
            _ => Err(errs),
        }
    }
}

/// PATCH body. Salary bounds, `expiry_date` and `application_url` accept
/// `null` to clear; `posted_date` is not accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateJobRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub company_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary_min: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary_max: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub job_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub experience_level: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub remote_option: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub expiry_date: Option<Option<DateTimeWithTimeZone>>,
    #[serde(default, deserialize_with = "double_option")]
    pub is_active: Option<Option<bool>>,
    #[serde(default, deserialize_with = "double_option")]
    pub application_url: Option<Option<String>>,
}

impl Validate for UpdateJobRequest {
    type Output = JobPatch;

    fn validate(self) -> Result<JobPatch, FieldErrors> {
        let mut errs = FieldErrors::new();
        let title = not_null(&mut errs, "title", self.title);
        if let Some(v) = &title { errs.check("title", job::validate_title(v)); }
        let description = not_null(&mut errs, "description", self.description);
        if let Some(v) = &description { errs.check("description", job::validate_description(v)); }
        let company_id = not_null(&mut errs, "company_id", self.company_id);
        let location = not_null(&mut errs, "location", self.location);
        if let Some(v) = &location { errs.check("location", job::validate_location(v)); }
        let job_type = not_null(&mut errs, "job_type", self.job_type);
        if let Some(v) = &job_type { errs.check("job_type", one_of(JobType::NAMES, v)); }
        let experience_level = not_null(&mut errs, "experience_level", self.experience_level);
        if let Some(v) = &experience_level { errs.check("experience_level", one_of(ExperienceLevel::NAMES, v)); }
        let remote_option = not_null(&mut errs, "remote_option", self.remote_option);
        if let Some(v) = &remote_option { errs.check("remote_option", one_of(RemoteOption::NAMES, v)); }
        let is_active = not_null(&mut errs, "is_active", self.is_active);
        // the pair is only compared when both arrive in this payload
        check_salaries(&mut errs, self.salary_min.flatten(), self.salary_max.flatten());
        check_expiry(&mut errs, self.expiry_date.flatten());
        if let Some(Some(v)) = &self.application_url { errs.check("application_url", job::validate_application_url(v)); }

        errs.finish(|| JobPatch {
            title,
            description,
            company_id,
            location,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            job_type,
            experience_level,
            remote_option,
            expiry_date: self.expiry_date,
            is_active,
            application_url: self.application_url,
        })
    }
}

fn check_salaries(errs: &mut FieldErrors, min: Option<Decimal>, max: Option<Decimal>) {
    if let Some(v) = min { errs.check("salary_min", job::validate_salary(v)); }
    if let Some(v) = max { errs.check("salary_max", job::validate_salary(v)); }
    if let (Some(min), Some(max)) = (min, max) {
        errs.check("salary_max", job::validate_salary_range(min, max));
    }
}

fn check_expiry(errs: &mut FieldErrors, expiry: Option<DateTimeWithTimeZone>) {
    if let Some(v) = expiry {
        errs.check("expiry_date", job::validate_expiry_date(v, Utc::now().into()));
    }
}
