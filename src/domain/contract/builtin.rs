//! Templates shipped with the tool.

use once_cell::sync::Lazy;

use crate::domain::foundation::TemplateId;

use super::ContractTemplate;

static BUILTIN_TEMPLATES: Lazy<Vec<ContractTemplate>> = Lazy::new(|| {
    serde_json::from_str(include_str!("builtin_templates.json")).unwrap_or_default()
});

/// Every built-in template, in display order.
pub fn builtin_templates() -> &'static [ContractTemplate] {
    &BUILTIN_TEMPLATES
}

/// Looks up a built-in template by slug.
pub fn builtin_template(id: &TemplateId) -> Option<&'static ContractTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| &t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_templates_parse() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 5);
        assert!(templates.iter().all(|t| !t.clauses.is_empty()));
        assert!(templates.iter().all(|t| !t.id.is_custom()));
    }

    #[test]
    fn finds_template_by_slug() {
        let id = TemplateId::new("freelancer").unwrap();
        let template = builtin_template(&id).unwrap();
        assert_eq!(template.name, "Freelancer");
        assert_eq!(template.clauses.len(), 6);
    }

    #[test]
    fn unknown_slug_is_none() {
        let id = TemplateId::new("astronauta").unwrap();
        assert!(builtin_template(&id).is_none());
    }
}
