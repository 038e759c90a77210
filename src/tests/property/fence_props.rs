//! Property-based tests for code fence stripping
//!
//! Invariants:
//! - A fenced wrap of any backtick-free script recovers the script
//! - Backtick-free text passes through with only trimming
//! - The language tag never leaks into the output

use proptest::prelude::*;

use crate::core::llm::strip_code_fences;

/// Script bodies without backticks (the fence delimiter itself).
fn arb_script() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 #$/_.\\n-]{1,200}"
}

/// Language tags models actually emit.
fn arb_lang() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("bash".to_string()),
        Just("sh".to_string()),
        Just("powershell".to_string()),
        Just("ps1".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_fenced_wrap_recovers_script(script in arb_script(), lang in arb_lang()) {
        let wrapped = format!("```{lang}\n{script}\n```");
        prop_assert_eq!(strip_code_fences(&wrapped), script.trim());
    }

    #[test]
    fn prop_fence_with_surrounding_whitespace(script in arb_script()) {
        let wrapped = format!("\n\n  ```bash\n{script}\n```  \n");
        prop_assert_eq!(strip_code_fences(&wrapped), script.trim());
    }

    #[test]
    fn prop_unfenced_text_only_trimmed(text in arb_script()) {
        prop_assert_eq!(strip_code_fences(&text), text.trim());
    }

    #[test]
    fn prop_language_tag_never_leaks(script in arb_script(), lang in arb_lang()) {
        let wrapped = format!("```{lang}\n{script}\n```");
        let stripped = strip_code_fences(&wrapped);
        prop_assert!(!stripped.starts_with("```"));
        if !lang.is_empty() && !script.contains(&lang) {
            prop_assert!(!stripped.contains(&lang));
        }
    }
}
