//! Commit authorship metadata

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Author or committer identity attached to a commit.
///
/// Timestamps are taken verbatim from the caller; nothing requires them to
/// increase along a branch, and dates before 1970 are allowed. Git records
/// whole seconds only, so fractional times are rejected on conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub when: DateTime<Utc>,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>, when: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when,
        }
    }

    /// Convert to a `git2` signature with a UTC offset.
    pub fn to_git2(&self) -> Result<git2::Signature<'static>> {
        self.ensure_whole_seconds()?;
        let time = git2::Time::new(self.when.timestamp(), 0);
        git2::Signature::new(&self.name, &self.email, &time).map_err(|source| Error::Signature {
            name: self.name.clone(),
            email: self.email.clone(),
            source,
        })
    }

    /// Whether `when` lies before the Unix epoch.
    pub fn is_pre_epoch(&self) -> bool {
        self.when.timestamp() < 0
    }

    /// The identity line of a raw commit object, e.g.
    /// `Aleks <af@ncr.com> -1388534400 +0000`.
    ///
    /// The timestamp is written signed. libgit2 formats it unsigned, which
    /// turns pre-1970 dates into far-future ones.
    pub fn to_ident(&self) -> Result<String> {
        let sig = self.to_git2()?;
        Ok(format!(
            "{} <{}> {} +0000",
            sig.name().unwrap_or(&self.name),
            sig.email().unwrap_or(&self.email),
            self.when.timestamp()
        ))
    }

    fn ensure_whole_seconds(&self) -> Result<()> {
        if self.when.timestamp_subsec_nanos() == 0 {
            return Ok(());
        }
        Err(Error::FractionalTime {
            name: self.name.clone(),
            email: self.email.clone(),
            when: self.when.to_rfc3339(),
        })
    }

    /// Read a signature back from a `git2` commit.
    pub fn from_git2(sig: &git2::Signature<'_>) -> Self {
        let when = Utc
            .timestamp_opt(sig.when().seconds(), 0)
            .single()
            .unwrap_or_default();
        Self {
            name: sig.name().unwrap_or("Unknown").to_string(),
            email: sig.email().unwrap_or("").to_string(),
            when,
        }
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {}", self.name, self.email, self.when.to_rfc3339())
    }
}
