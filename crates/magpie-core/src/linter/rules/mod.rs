//! Rule registry: all available lint rules.

pub mod no_array_prototype_findlast;
pub mod no_array_prototype_flat;
pub mod no_array_prototype_includes;
pub mod no_array_string_prototype_at;
pub mod no_date_prototype_togmtstring;
pub mod no_intl_numberformat_prototype_formatrange;
pub mod no_promise_prototype_finally;
pub mod no_regexp_prototype_compile;
pub mod no_string_prototype_replaceall;
pub mod no_string_prototype_trimstart_trimend;
pub mod no_symbol_prototype_description;

use super::rule::LintRule;

/// Returns all available lint rules with their default configuration.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        // ES2016
        Box::new(no_array_prototype_includes::NoArrayPrototypeIncludes),
        // ES2018
        Box::new(no_promise_prototype_finally::NoPromisePrototypeFinally),
        // ES2019
        Box::new(no_array_prototype_flat::NoArrayPrototypeFlat),
        Box::new(no_string_prototype_trimstart_trimend::NoStringPrototypeTrimStartTrimEnd),
        Box::new(no_symbol_prototype_description::NoSymbolPrototypeDescription),
        // ES2021
        Box::new(no_string_prototype_replaceall::NoStringPrototypeReplaceAll),
        // ES2022
        Box::new(no_array_string_prototype_at::NoArrayStringPrototypeAt),
        // ES2023
        Box::new(no_array_prototype_findlast::NoArrayPrototypeFindLast),
        Box::new(
            no_intl_numberformat_prototype_formatrange::NoIntlNumberFormatPrototypeFormatRange,
        ),
        // Legacy
        Box::new(no_regexp_prototype_compile::NoRegExpPrototypeCompile),
        Box::new(no_date_prototype_togmtstring::NoDatePrototypeToGMTString),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_names_and_codes_are_unique() {
        let rules = all_rules();
        let names: HashSet<_> = rules.iter().map(|r| r.meta().name).collect();
        let codes: HashSet<_> = rules.iter().map(|r| r.meta().code).collect();
        assert_eq!(names.len(), rules.len());
        assert_eq!(codes.len(), rules.len());
    }

    #[test]
    fn fixable_rules_declare_it() {
        for rule in all_rules() {
            let meta = rule.meta();
            if meta.fixable {
                assert!(
                    meta.name.contains("trimstart") || meta.name.contains("togmtstring"),
                    "unexpected fixable rule {}",
                    meta.name
                );
            }
        }
    }
}
