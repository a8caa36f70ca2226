use models::company;

/// Validated input for a new company.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: String,
}

/// Partial update. `None` leaves a field untouched; for the nullable columns
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub location: Option<String>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.website.is_none() && self.location.is_none()
    }

    /// Names of the fields this patch touches, for logging.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.name.is_some() { out.push("name"); }
        if self.description.is_some() { out.push("description"); }
        if self.website.is_some() { out.push("website"); }
        if self.location.is_some() { out.push("location"); }
        out
    }

    pub fn apply(self, target: &mut company::Model) {
        if let Some(v) = self.name { target.name = v; }
        if let Some(v) = self.description { target.description = v; }
        if let Some(v) = self.website { target.website = v; }
        if let Some(v) = self.location { target.location = v; }
    }
}
