//! Request Model Tests (parameterized)
//!
//! Table-driven coverage of the platform/principal-kind validity matrix
//! and the shell metadata. Scalar edge cases live inline in the model.

use rstest::rstest;

use crate::core::request::{OutputShell, PrincipalKind, TargetPlatform};
use crate::tests::common::fixtures::kubernetes_request;

#[rstest]
#[case(TargetPlatform::KubernetesRbac, PrincipalKind::ServiceAccount, true)]
#[case(TargetPlatform::KubernetesRbac, PrincipalKind::User, true)]
#[case(TargetPlatform::KubernetesRbac, PrincipalKind::Role, true)]
#[case(TargetPlatform::AwsIam, PrincipalKind::Role, true)]
#[case(TargetPlatform::AwsIam, PrincipalKind::User, true)]
#[case(TargetPlatform::AwsIam, PrincipalKind::ServiceAccount, false)]
#[case(TargetPlatform::HashicorpVault, PrincipalKind::Role, true)]
#[case(TargetPlatform::HashicorpVault, PrincipalKind::User, true)]
#[case(TargetPlatform::HashicorpVault, PrincipalKind::ServiceAccount, false)]
#[case(TargetPlatform::AzureAd, PrincipalKind::User, true)]
#[case(TargetPlatform::AzureAd, PrincipalKind::ServiceAccount, true)]
#[case(TargetPlatform::AzureAd, PrincipalKind::Role, false)]
fn test_platform_kind_matrix(
    #[case] platform: TargetPlatform,
    #[case] kind: PrincipalKind,
    #[case] valid: bool,
) {
    let mut request = kubernetes_request();
    request.platform = platform;
    request.principal_kind = kind;
    assert_eq!(request.validate().is_ok(), valid);
}

#[rstest]
#[case(OutputShell::Bash, "sh")]
#[case(OutputShell::PowerShell, "ps1")]
fn test_shell_extensions(#[case] shell: OutputShell, #[case] extension: &str) {
    assert_eq!(shell.extension(), extension);
}
