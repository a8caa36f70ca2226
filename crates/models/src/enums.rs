//! Closed value domains for job postings.
//!
//! Stored as their upper-case names; `parse` is the only way in from raw
//! strings and is total over the accepted names.

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:tt { $($variant:ident => $text:tt),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
        #[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
        pub enum $name {
            $(
                #[sea_orm(string_value = $text)]
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Accepted names, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            pub fn parse(value: &str) -> Result<Self, ModelError> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ModelError::UnknownVariant { field: $field, value: value.to_string() }),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum! {
    JobType, "job_type" {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        Contract => "CONTRACT",
        Internship => "INTERNSHIP",
    }
}

closed_enum! {
    ExperienceLevel, "experience_level" {
        Entry => "ENTRY",
        Mid => "MID",
        Senior => "SENIOR",
    }
}

closed_enum! {
    RemoteOption, "remote_option" {
        Remote => "REMOTE",
        Hybrid => "HYBRID",
        Onsite => "ONSITE",
    }
}

/// Membership check used by the request validation layer.
pub fn one_of(names: &[&str], value: &str) -> Result<(), ModelError> {
    if names.contains(&value) {
        return Ok(());
    }
    Err(ModelError::Validation(format!("Must be one of: {}.", names.join(", "))))
}
