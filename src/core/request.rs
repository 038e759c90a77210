//! Access Request Model
//!
//! Structured description of a temporary access grant: which platform,
//! which kind of principal, what permissions, for how long, and which
//! shell the generated script should target. The set of valid principal
//! kinds depends on the selected platform; the lookup table here is the
//! single source of truth for that invariant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest grant the form accepts, in hours.
pub const MIN_DURATION_HOURS: u8 = 1;
/// Longest grant the form accepts, in hours.
pub const MAX_DURATION_HOURS: u8 = 24;

// ============================================================================
// Enumerated Options
// ============================================================================

/// Access-control system the generated script talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPlatform {
    KubernetesRbac,
    AwsIam,
    HashicorpVault,
    AzureAd,
}

/// Kind of principal the grant is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalKind {
    User,
    Role,
    ServiceAccount,
}

/// Shell/OS flavor of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputShell {
    Bash,
    PowerShell,
}

impl TargetPlatform {
    pub const ALL: [TargetPlatform; 4] = [
        TargetPlatform::KubernetesRbac,
        TargetPlatform::AwsIam,
        TargetPlatform::HashicorpVault,
        TargetPlatform::AzureAd,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TargetPlatform::KubernetesRbac => "Kubernetes RBAC",
            TargetPlatform::AwsIam => "AWS IAM",
            TargetPlatform::HashicorpVault => "HashiCorp Vault",
            TargetPlatform::AzureAd => "Azure AD",
        }
    }

    /// Principal kinds valid for this platform. The first entry is the
    /// default selected when the platform changes.
    pub fn principal_kinds(self) -> &'static [PrincipalKind] {
        match self {
            TargetPlatform::KubernetesRbac => &[
                PrincipalKind::ServiceAccount,
                PrincipalKind::User,
                PrincipalKind::Role,
            ],
            TargetPlatform::AwsIam => &[PrincipalKind::Role, PrincipalKind::User],
            TargetPlatform::HashicorpVault => &[PrincipalKind::Role, PrincipalKind::User],
            TargetPlatform::AzureAd => &[PrincipalKind::User, PrincipalKind::ServiceAccount],
        }
    }

    /// Display label for a principal kind in the context of this platform.
    /// Some platforms use their own terminology for the same kind.
    pub fn principal_kind_label(self, kind: PrincipalKind) -> &'static str {
        match (self, kind) {
            (TargetPlatform::HashicorpVault, PrincipalKind::User) => "User Pass Auth",
            (TargetPlatform::AzureAd, PrincipalKind::ServiceAccount) => "Service Principal",
            (_, PrincipalKind::User) => "User",
            (_, PrincipalKind::Role) => "Role",
            (_, PrincipalKind::ServiceAccount) => "Service Account",
        }
    }

    pub fn next(self) -> TargetPlatform {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> TargetPlatform {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl OutputShell {
    pub const ALL: [OutputShell; 2] = [OutputShell::Bash, OutputShell::PowerShell];

    pub fn label(self) -> &'static str {
        match self {
            OutputShell::Bash => "Bash (Linux/macOS)",
            OutputShell::PowerShell => "PowerShell (Windows)",
        }
    }

    /// File extension for saved scripts.
    pub fn extension(self) -> &'static str {
        match self {
            OutputShell::Bash => "sh",
            OutputShell::PowerShell => "ps1",
        }
    }

    pub fn next(self) -> OutputShell {
        match self {
            OutputShell::Bash => OutputShell::PowerShell,
            OutputShell::PowerShell => OutputShell::Bash,
        }
    }
}

// ============================================================================
// Access Request
// ============================================================================

/// A single temporary access request, as filled in by the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    pub platform: TargetPlatform,
    pub principal_kind: PrincipalKind,
    pub principal_name: String,
    /// Comma-separated permission list, kept as the raw string the user
    /// typed — the model decides how to interpret it.
    pub permissions: String,
    pub duration_hours: u8,
    pub shell: OutputShell,
    pub environment: String,
}

/// Validation failures for an [`AccessRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("duration must be between {MIN_DURATION_HOURS} and {MAX_DURATION_HOURS} hours")]
    DurationOutOfRange,

    #[error("principal kind is not valid for {0}")]
    InvalidPrincipalKind(&'static str),
}

impl AccessRequest {
    /// Check every form-level invariant. The TUI makes most of these
    /// unrepresentable, but the model stays authoritative.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !self.platform.principal_kinds().contains(&self.principal_kind) {
            return Err(RequestError::InvalidPrincipalKind(self.platform.label()));
        }
        if self.principal_name.trim().is_empty() {
            return Err(RequestError::MissingField("principal name"));
        }
        if self.permissions.trim().is_empty() {
            return Err(RequestError::MissingField("required permissions"));
        }
        if self.environment.trim().is_empty() {
            return Err(RequestError::MissingField("target environment"));
        }
        if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&self.duration_hours) {
            return Err(RequestError::DurationOutOfRange);
        }
        Ok(())
    }

    /// Display label for the selected principal kind on the selected
    /// platform.
    pub fn principal_kind_label(&self) -> &'static str {
        self.platform.principal_kind_label(self.principal_kind)
    }
}
