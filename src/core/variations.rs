use std::collections::HashMap;

/// One surface form of a canonical role, with its lower-cased form kept
/// alongside for substring comparison
#[derive(Debug, Clone)]
struct Variation {
    text: String,
    lower: String,
}

impl Variation {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lower: text.to_lowercase(),
        }
    }
}

/// Static synonym table: canonical role -> known surface forms
///
/// Built once at startup and shared read-only. Lookup is by exact canonical
/// name; unknown roles expand to themselves.
#[derive(Debug, Clone, Default)]
pub struct RoleVariations {
    table: HashMap<String, Vec<Variation>>,
}

impl RoleVariations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of the roles produced by rule-based inference
    pub fn standard() -> Self {
        Self::new()
            .with_role("Web Developer", &[
                "Website Developer",
                "Web Programmer",
                "Web Engineer",
                "Web Application Developer",
            ])
            .with_role("Frontend Developer", &[
                "Front-end Developer",
                "Front End Developer",
                "UI Developer",
                "Frontend Engineer",
                "UI Engineer",
                "JavaScript Developer",
            ])
            .with_role("Backend Developer", &[
                "Back-end Developer",
                "Back End Developer",
                "Backend Engineer",
                "Server-side Developer",
                "API Developer",
            ])
            .with_role("Full Stack Developer", &[
                "Full-Stack Developer",
                "Full Stack Engineer",
                "Full-Stack Engineer",
                "Full Stack Web Developer",
            ])
            .with_role("Python Developer", &[
                "Python Engineer",
                "Python Programmer",
                "Django Developer",
                "Flask Developer",
                "Python Backend Developer",
            ])
            .with_role("Node.js Developer", &[
                "Node Developer",
                "Node Engineer",
                "Node Programmer",
                "Express Developer",
                "JavaScript Backend Developer",
            ])
    }

    /// Add a role; the canonical name is always stored as the first variation
    pub fn with_role(mut self, role: &str, synonyms: &[&str]) -> Self {
        let mut forms = Vec::with_capacity(synonyms.len() + 1);
        forms.push(Variation::new(role));
        forms.extend(
            synonyms
                .iter()
                .filter(|s| !s.eq_ignore_ascii_case(role))
                .map(|s| Variation::new(s)),
        );
        self.table.insert(role.to_string(), forms);
        self
    }

    /// Surface forms for a role, canonical name first
    pub fn variations<'a>(&'a self, role: &'a str) -> Vec<&'a str> {
        match self.table.get(role) {
            Some(forms) => forms.iter().map(|v| v.text.as_str()).collect(),
            None => vec![role],
        }
    }

    /// First variation of `role` that overlaps the job title
    ///
    /// Overlap is case-insensitive containment in either direction.
    /// `title_lower` must already be lower-cased.
    pub fn find_overlap<'a>(&'a self, role: &'a str, title_lower: &str) -> Option<&'a str> {
        match self.table.get(role) {
            Some(forms) => forms
                .iter()
                .find(|v| overlaps(&v.lower, title_lower))
                .map(|v| v.text.as_str()),
            None => overlaps(&role.to_lowercase(), title_lower).then_some(role),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[inline]
fn overlaps(variation_lower: &str, title_lower: &str) -> bool {
    title_lower.contains(variation_lower) || variation_lower.contains(title_lower)
}
