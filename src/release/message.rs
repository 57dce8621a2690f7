//! Commit and tag message templates.

/// Placeholder replaced by the version
pub const VERSION_PLACEHOLDER: &str = "%s";

/// Expand a message template.
///
/// Every `%s` is replaced with `version`; a template without one gets the
/// version appended.
pub fn format_message(template: &str, version: &str) -> String {
    if template.contains(VERSION_PLACEHOLDER) {
        template.replace(VERSION_PLACEHOLDER, version)
    } else {
        format!("{template}{version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_placeholder() {
        let out = format_message("release %s (%s)", "1.2.3");
        assert_eq!(out, "release 1.2.3 (1.2.3)");
        assert!(!out.contains("%s"));
    }

    #[test]
    fn test_appends_without_placeholder() {
        assert_eq!(format_message("release v", "1.2.3"), "release v1.2.3");
        assert_eq!(format_message("", "1.2.3"), "1.2.3");
    }

    #[test]
    fn test_placeholder_variety() {
        let templates = ["%s", "v%s", "%s%s%s", "chore(release): %s\n\nbump to %s", "%%s"];
        for template in templates {
            let out = format_message(template, "0.9.0-rc.1");
            assert!(!out.contains("%s"), "{template:?} -> {out:?}");
            assert_eq!(
                out.matches("0.9.0-rc.1").count(),
                template.matches("%s").count()
            );
        }
    }

    #[test]
    fn test_append_variety() {
        for template in ["release: v", "Bump ", "%", "s%", "100% done "] {
            assert_eq!(format_message(template, "2.0.0"), format!("{template}2.0.0"));
        }
    }
}
