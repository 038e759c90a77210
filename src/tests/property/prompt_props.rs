//! Property-based tests for prompt building and request validation
//!
//! Invariants:
//! - Every user-entered field appears verbatim in the prompt
//! - Prompt construction is deterministic
//! - Validation accepts exactly the platform's allowed principal kinds
//! - Durations outside 1..=24 are always rejected

use proptest::prelude::*;

use crate::core::prompt::build_prompt;
use crate::core::request::{
    AccessRequest, OutputShell, PrincipalKind, TargetPlatform, MAX_DURATION_HOURS,
    MIN_DURATION_HOURS,
};

fn arb_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 /,._-]{0,40}"
}

fn arb_duration() -> impl Strategy<Value = u8> {
    MIN_DURATION_HOURS..=MAX_DURATION_HOURS
}

fn request_for(
    platform: TargetPlatform,
    kind: PrincipalKind,
    name: &str,
    permissions: &str,
    environment: &str,
    duration: u8,
) -> AccessRequest {
    AccessRequest {
        platform,
        principal_kind: kind,
        principal_name: name.to_string(),
        permissions: permissions.to_string(),
        duration_hours: duration,
        shell: OutputShell::Bash,
        environment: environment.to_string(),
    }
}

proptest! {
    #[test]
    fn prop_prompt_embeds_every_field(
        name in arb_field(),
        permissions in arb_field(),
        environment in arb_field(),
        duration in arb_duration(),
    ) {
        for platform in TargetPlatform::ALL {
            let kind = platform.principal_kinds()[0];
            let request = request_for(platform, kind, &name, &permissions, &environment, duration);
            let prompt = build_prompt(&request);

            prop_assert!(prompt.contains(name.trim()));
            prop_assert!(prompt.contains(permissions.trim()));
            prop_assert!(prompt.contains(environment.trim()));
            prop_assert!(prompt.contains(platform.label()));
            prop_assert!(prompt.contains(&duration.to_string()));
        }
    }

    #[test]
    fn prop_prompt_is_deterministic(
        name in arb_field(),
        permissions in arb_field(),
        environment in arb_field(),
        duration in arb_duration(),
    ) {
        let request = request_for(
            TargetPlatform::KubernetesRbac,
            PrincipalKind::ServiceAccount,
            &name,
            &permissions,
            &environment,
            duration,
        );
        prop_assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn prop_validation_matches_platform_kind_table(
        name in arb_field(),
        duration in arb_duration(),
    ) {
        let all_kinds = [
            PrincipalKind::User,
            PrincipalKind::Role,
            PrincipalKind::ServiceAccount,
        ];
        for platform in TargetPlatform::ALL {
            for kind in all_kinds {
                let request = request_for(platform, kind, &name, "read-only", "staging", duration);
                let allowed = platform.principal_kinds().contains(&kind);
                prop_assert_eq!(request.validate().is_ok(), allowed);
            }
        }
    }

    #[test]
    fn prop_out_of_range_duration_rejected(duration in 25u8..) {
        let mut request = request_for(
            TargetPlatform::AwsIam,
            PrincipalKind::Role,
            "temp-role",
            "s3:GetObject",
            "staging",
            1,
        );
        request.duration_hours = duration;
        prop_assert!(request.validate().is_err());

        request.duration_hours = 0;
        prop_assert!(request.validate().is_err());
    }
}
