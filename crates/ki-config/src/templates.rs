//! Configuration templates for `ki init`.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template.
///
/// Settings are shown at their defaults with only `corpus` left active, so a
/// fresh file points at `articles.json` next to it and changes nothing else.
pub fn local_template() -> String {
    comment_out_except(LOCAL_TEMPLATE, &["corpus"])
}

/// Returns the global configuration template, fully commented out.
pub fn global_template() -> String {
    comment_out_except(GLOBAL_TEMPLATE, &[])
}

/// Prefixes every non-empty, non-comment line with `# `, except top-level
/// assignments to one of `keep`.
fn comment_out_except(template: &str, keep: &[&str]) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    let mut in_section = false;
    for line in template.lines() {
        if line.starts_with('[') {
            in_section = true;
        }
        let kept = !in_section
            && keep
                .iter()
                .any(|key| line.split('=').next().is_some_and(|k| k.trim() == *key));
        if !line.is_empty() && !line.starts_with('#') && !kept {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn raw_templates_parse() {
        assert!(parse_config(LOCAL_TEMPLATE).is_ok());
        assert!(parse_config(GLOBAL_TEMPLATE).is_ok());
    }

    #[test]
    fn local_template_keeps_only_corpus_active() {
        let config = parse_config(&local_template()).unwrap();
        assert_eq!(config.corpus.unwrap(), vec!["articles.json"]);
        assert!(config.search.is_none());
        assert!(config.root.is_none());
    }

    #[test]
    fn global_template_is_inert() {
        let config = parse_config(&global_template()).unwrap();
        assert!(config.corpus.is_none());
        assert!(config.search.is_none());
    }

    #[test]
    fn comments_and_blank_lines_are_preserved() {
        let out = comment_out_except("# note\n\n[search]\nlimit = 5\n", &[]);
        assert_eq!(out, "# note\n\n# [search]\n# limit = 5\n");
    }

    #[test]
    fn kept_keys_inside_sections_are_commented() {
        let out = comment_out_except("corpus = \"a\"\n[x]\ncorpus = \"b\"\n", &["corpus"]);
        assert_eq!(out, "corpus = \"a\"\n# [x]\n# corpus = \"b\"\n");
    }
}
